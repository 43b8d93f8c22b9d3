use std::collections::{HashMap, HashSet};

use serde::Serialize;

use super::symbols::{canonical_pair, SymbolConvention};

/// One instrument as reported by an exchange, already upper-cased and aliased.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExchangeInstrument {
    pub base: String,
    pub quote: String,
    pub tradable: bool,
}

impl ExchangeInstrument {
    /// Normalizes casing and applies asset aliases (e.g. XBT -> BTC).
    pub fn new(base: &str, quote: &str, tradable: bool, aliases: &HashMap<String, String>) -> Self {
        Self {
            base: normalize_asset(base, aliases),
            quote: normalize_asset(quote, aliases),
            tradable,
        }
    }
}

fn normalize_asset(asset: &str, aliases: &HashMap<String, String>) -> String {
    let upper = asset.trim().to_uppercase();
    match aliases.get(&upper) {
        Some(alias) => alias.to_uppercase(),
        None => upper,
    }
}

/// Exchange-native literal symbols of every tradable instrument.
#[derive(Clone, Debug, Default)]
pub struct ExchangeSymbolSet {
    symbols: HashSet<String>,
}

impl ExchangeSymbolSet {
    pub fn from_instruments<'a, I>(instruments: I, convention: &SymbolConvention) -> Self
    where
        I: IntoIterator<Item = &'a ExchangeInstrument>,
    {
        let symbols = instruments
            .into_iter()
            .filter(|i| i.tradable)
            .map(|i| convention.symbol(&i.base, &i.quote))
            .collect();
        Self { symbols }
    }

    pub fn contains(&self, symbol: &str) -> bool {
        self.symbols.contains(symbol)
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

/// Accepted quote currencies, upper-cased, deduplicated, configured order kept.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuoteUniverse {
    quotes: Vec<String>,
}

impl QuoteUniverse {
    pub fn new<I, S>(quotes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen = HashSet::new();
        let quotes = quotes
            .into_iter()
            .map(|q| q.as_ref().trim().to_uppercase())
            .filter(|q| !q.is_empty() && seen.insert(q.clone()))
            .collect();
        Self { quotes }
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.quotes.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.quotes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quotes.is_empty()
    }
}

/// A feed pair confirmed tradable on one exchange.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct MatchResult {
    pub base: String,
    pub quote: String,
}

impl MatchResult {
    pub fn pair(&self) -> String {
        canonical_pair(&self.base, &self.quote)
    }
}
