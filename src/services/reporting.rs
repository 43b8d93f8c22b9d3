//! Reporter/validator: the only place pass results become process output.

use serde_json::json;

use crate::{
    data::feeds::FeedBases,
    error::{CatalogKind, CheckError, CheckResult},
    exchange::types::{ExchangeInstrument, ExchangeSymbolSet, MatchResult},
};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Header, one `"BASE/QUOTE",` line per match, count line
    #[default]
    List,
    /// One JSON object per exchange on a single line
    Json,
}

/// Rejects empty inputs before matching starts.
pub fn validate_inputs(
    bases: &FeedBases,
    feeds_location: &str,
    instruments: &[ExchangeInstrument],
    symbols: &ExchangeSymbolSet,
    exchange_url: &str,
) -> CheckResult<()> {
    if bases.is_empty() {
        return Err(CheckError::empty(CatalogKind::Feed, feeds_location));
    }
    if instruments.is_empty() {
        return Err(CheckError::empty(CatalogKind::Exchange, exchange_url));
    }
    if symbols.is_empty() {
        return Err(CheckError::NoTradableInstruments {
            url: exchange_url.to_string(),
            listed: instruments.len(),
        });
    }
    Ok(())
}

/// Formats matches for stdout. Deterministic for identical input.
pub fn render(exchange: &str, matches: &[MatchResult], format: OutputFormat) -> String {
    match format {
        OutputFormat::List => {
            let mut out = format!("== {} ==\n", exchange);
            for m in matches {
                out.push_str(&format!("\"{}\",\n", m.pair()));
            }
            out.push_str(&format!("{}: {} supported feeds\n", exchange, matches.len()));
            out
        }
        OutputFormat::Json => {
            let pairs: Vec<String> = matches.iter().map(MatchResult::pair).collect();
            let line = json!({
                "exchange": exchange,
                "pairs": pairs,
                "count": matches.len(),
            });
            format!("{}\n", line)
        }
    }
}

/// Final verdict for a matched pass: the match count, or `NoMatches`.
pub fn verdict(exchange: &str, matches: &[MatchResult], bases: usize, quotes: usize) -> CheckResult<usize> {
    if matches.is_empty() {
        return Err(CheckError::NoMatches {
            exchange: exchange.to_string(),
            bases,
            quotes,
        });
    }
    Ok(matches.len())
}
