use crate::{
    data::feeds::FeedBases,
    exchange::{
        symbols::SymbolConvention,
        types::{ExchangeSymbolSet, MatchResult, QuoteUniverse},
    },
};

/// Feed pairs tradable on one exchange, ordered by base then configured quote order.
///
/// Exact membership only: a base listed against USD says nothing about USDT.
/// An empty result is not an error here.
pub fn match_feeds(
    bases: &FeedBases,
    quotes: &QuoteUniverse,
    convention: &SymbolConvention,
    symbols: &ExchangeSymbolSet,
) -> Vec<MatchResult> {
    let mut matches = Vec::new();
    for base in bases.iter() {
        for quote in quotes.iter() {
            if symbols.contains(&convention.symbol(base, quote)) {
                matches.push(MatchResult {
                    base: base.to_string(),
                    quote: quote.to_string(),
                });
            }
        }
    }
    matches
}
