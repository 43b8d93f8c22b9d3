use async_trait::async_trait;
use reqwest::Client;

use crate::error::CheckResult;

use super::{symbols::SymbolConvention, types::ExchangeInstrument};

/// One adapter per exchange: where its catalog lives, how to read it,
/// and how it spells a pair.
#[async_trait]
pub trait ExchangeCatalog: Send + Sync {
    fn name(&self) -> &str;
    fn url(&self) -> &str;
    fn convention(&self) -> &SymbolConvention;

    /// Fetches the full instrument catalog. Fails with `SourceUnreachable`,
    /// `MalformedResponse` or `EmptyCatalog`.
    async fn fetch(&self, client: &Client) -> CheckResult<Vec<ExchangeInstrument>>;
}
