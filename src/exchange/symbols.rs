//! Symbol normalization.
//!
//! Canonical pair (used internally): "BASE/QUOTE", both upper-case.
//!
//! Exchange-native literals are produced from a per-exchange
//! `SymbolConvention` record instead of per-exchange branches:
//! - Gate.io:  "BTC_USDT"
//! - OKX:      "BTC-USDT"
//! - Binance:  "BTCUSDT"
//! - Bitrue:   "btcusdt"

use serde::Deserialize;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Casing {
    #[default]
    Upper,
    Lower,
    Preserve,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct SymbolConvention {
    #[serde(default)]
    pub separator: String,
    #[serde(default)]
    pub casing: Casing,
}

impl SymbolConvention {
    pub fn new(separator: &str, casing: Casing) -> Self {
        Self {
            separator: separator.to_string(),
            casing,
        }
    }

    /// Literal symbol this exchange uses for `(base, quote)`.
    pub fn symbol(&self, base: &str, quote: &str) -> String {
        let joined = format!("{}{}{}", base, self.separator, quote);
        match self.casing {
            Casing::Upper => joined.to_uppercase(),
            Casing::Lower => joined.to_lowercase(),
            Casing::Preserve => joined,
        }
    }
}

/// "BASE/QUOTE" as printed in reports and feed names.
pub fn canonical_pair(base: &str, quote: &str) -> String {
    format!("{}/{}", base, quote)
}

/// Base segment of a feed name: left of the first '/', trimmed and upper-cased.
///
/// Returns `None` for names with an empty base.
pub fn feed_base(name: &str) -> Option<String> {
    let base = name.split('/').next().unwrap_or_default().trim();
    if base.is_empty() {
        None
    } else {
        Some(base.to_uppercase())
    }
}

/// Split a joined exchange pair such as "XBT/USD" or "AAVE:USD".
pub fn split_joined(pair: &str, separator: &str) -> Option<(String, String)> {
    if separator.is_empty() {
        return None;
    }
    let (base, quote) = pair.split_once(separator)?;
    let (base, quote) = (base.trim(), quote.trim());
    if base.is_empty() || quote.is_empty() {
        return None;
    }
    Some((base.to_uppercase(), quote.to_uppercase()))
}
