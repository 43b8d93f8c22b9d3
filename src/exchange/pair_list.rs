//! Pair-list catalogs: a bare array of joined pair strings.
//!
//! Bitfinex `conf/pub:list:pair:exchange` answers `[["BTCUSD","AAVE:USD",...]]`.
//! Listing is the tradable signal; six-letter pairs split 3/3, longer
//! tickers carry an explicit ':'.

use std::collections::HashMap;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::debug;

use crate::error::{CatalogKind, CheckError, CheckResult};

use super::{
    http::fetch_json,
    symbols::{split_joined, SymbolConvention},
    traits::ExchangeCatalog,
    types::ExchangeInstrument,
};

#[derive(Clone, Debug)]
pub struct PairListCatalog {
    pub name: String,
    pub url: String,
    /// JSON pointer to the string array ("" = document root).
    pub envelope: String,
    pub convention: SymbolConvention,
    pub aliases: HashMap<String, String>,
}

impl PairListCatalog {
    pub fn parse(&self, root: &Value) -> CheckResult<Vec<ExchangeInstrument>> {
        let located = if self.envelope.is_empty() {
            Some(root)
        } else {
            root.pointer(&self.envelope)
        };
        let pairs = located.and_then(Value::as_array).ok_or_else(|| {
            CheckError::malformed(
                CatalogKind::Exchange,
                &self.url,
                format!("expected an array of pairs at '{}'", self.envelope),
            )
        })?;

        let instruments: Vec<ExchangeInstrument> = pairs
            .iter()
            .filter_map(Value::as_str)
            .filter_map(split_pair)
            .map(|(base, quote)| ExchangeInstrument::new(&base, &quote, true, &self.aliases))
            .collect();

        debug!(url = %self.url, listed = pairs.len(), parsed = instruments.len(), "pair list parsed");

        if instruments.is_empty() {
            return Err(CheckError::empty(CatalogKind::Exchange, &self.url));
        }
        Ok(instruments)
    }
}

fn split_pair(pair: &str) -> Option<(String, String)> {
    if pair.contains(':') {
        return split_joined(pair, ":");
    }
    if pair.len() == 6 && pair.is_ascii() {
        let (base, quote) = pair.split_at(3);
        return Some((base.to_uppercase(), quote.to_uppercase()));
    }
    None
}

#[async_trait]
impl ExchangeCatalog for PairListCatalog {
    fn name(&self) -> &str {
        &self.name
    }

    fn url(&self) -> &str {
        &self.url
    }

    fn convention(&self) -> &SymbolConvention {
        &self.convention
    }

    async fn fetch(&self, client: &Client) -> CheckResult<Vec<ExchangeInstrument>> {
        let root = fetch_json(client, &self.url, CatalogKind::Exchange).await?;
        self.parse(&root)
    }
}
