//! Built-in catalog descriptions for the supported exchanges.
//!
//! Each entry is data only: endpoint, response shape, symbol convention
//! and asset aliases. Any of them can be overridden from config.yaml.

use std::collections::HashMap;

use serde::Deserialize;

use super::{
    records::{InstrumentLayout, SymbolFields, TradableCheck},
    symbols::{Casing, SymbolConvention},
};

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ResponseShape {
    Records(InstrumentLayout),
    PairList {
        #[serde(default)]
        envelope: String,
    },
}

#[derive(Clone, Debug, PartialEq)]
pub struct ExchangePreset {
    pub url: String,
    pub shape: ResponseShape,
    pub convention: SymbolConvention,
    pub aliases: HashMap<String, String>,
}

pub const PRESET_NAMES: [&str; 12] = [
    "binance",
    "binanceus",
    "bitfinex",
    "bitrue",
    "bitstamp",
    "bybit",
    "coinbase",
    "gateio",
    "kraken",
    "kucoin",
    "mexc",
    "okx",
];

pub fn preset(name: &str) -> Option<ExchangePreset> {
    let preset = match name {
        "gateio" => ExchangePreset {
            url: "https://api.gateio.ws/api/v4/spot/currency_pairs".into(),
            shape: records("", split("base", "quote"), vec![TradableCheck::new("trade_status", "tradable")]),
            convention: SymbolConvention::new("_", Casing::Upper),
            aliases: HashMap::new(),
        },
        "okx" => ExchangePreset {
            url: "https://www.okx.com/api/v5/public/instruments?instType=SPOT".into(),
            shape: records("/data", split("baseCcy", "quoteCcy"), vec![TradableCheck::new("state", "live")]),
            convention: SymbolConvention::new("-", Casing::Upper),
            aliases: HashMap::new(),
        },
        "coinbase" => ExchangePreset {
            url: "https://api.exchange.coinbase.com/products".into(),
            shape: records(
                "",
                split("base_currency", "quote_currency"),
                vec![
                    TradableCheck::new("status", "online"),
                    TradableCheck::new("trading_disabled", false),
                ],
            ),
            convention: SymbolConvention::new("-", Casing::Upper),
            aliases: HashMap::new(),
        },
        "bybit" => ExchangePreset {
            url: "https://api.bybit.com/v5/market/instruments-info?category=spot".into(),
            shape: records("/result/list", split("baseCoin", "quoteCoin"), vec![TradableCheck::new("status", "Trading")]),
            convention: SymbolConvention::new("", Casing::Upper),
            aliases: HashMap::new(),
        },
        "kucoin" => ExchangePreset {
            url: "https://api.kucoin.com/api/v2/symbols".into(),
            shape: records(
                "/data",
                split("baseCurrency", "quoteCurrency"),
                vec![TradableCheck::new("enableTrading", true)],
            ),
            convention: SymbolConvention::new("-", Casing::Upper),
            aliases: HashMap::new(),
        },
        "bitrue" => ExchangePreset {
            url: "https://openapi.bitrue.com/api/v1/exchangeInfo".into(),
            shape: records("/symbols", split("baseAsset", "quoteAsset"), vec![TradableCheck::new("status", "TRADING")]),
            convention: SymbolConvention::new("", Casing::Lower),
            aliases: HashMap::new(),
        },
        "binance" | "binanceus" => ExchangePreset {
            url: if name == "binance" {
                "https://api.binance.com/api/v3/exchangeInfo".into()
            } else {
                "https://api.binance.us/api/v3/exchangeInfo".into()
            },
            shape: records("/symbols", split("baseAsset", "quoteAsset"), vec![TradableCheck::new("status", "TRADING")]),
            convention: SymbolConvention::new("", Casing::Upper),
            aliases: HashMap::new(),
        },
        "mexc" => ExchangePreset {
            url: "https://api.mexc.com/api/v3/exchangeInfo".into(),
            shape: records(
                "/symbols",
                split("baseAsset", "quoteAsset"),
                vec![
                    TradableCheck::new("isSpotTradingAllowed", true),
                    TradableCheck::new("status", "1"),
                ],
            ),
            convention: SymbolConvention::new("_", Casing::Upper),
            aliases: HashMap::new(),
        },
        "bitstamp" => ExchangePreset {
            url: "https://www.bitstamp.net/api/v2/trading-pairs-info/".into(),
            shape: records("", joined("name", "/"), vec![TradableCheck::new("trading", "Enabled")]),
            convention: SymbolConvention::new("", Casing::Lower),
            aliases: HashMap::new(),
        },
        "kraken" => ExchangePreset {
            url: "https://api.kraken.com/0/public/AssetPairs".into(),
            shape: records("/result", joined("wsname", "/"), vec![TradableCheck::new("status", "online")]),
            convention: SymbolConvention::new("/", Casing::Upper),
            aliases: aliases(&[("XBT", "BTC"), ("XDG", "DOGE")]),
        },
        "bitfinex" => ExchangePreset {
            url: "https://api-pub.bitfinex.com/v2/conf/pub:list:pair:exchange".into(),
            shape: ResponseShape::PairList { envelope: "/0".into() },
            convention: SymbolConvention::new("", Casing::Upper),
            aliases: aliases(&[("UST", "USDT")]),
        },
        _ => return None,
    };
    Some(preset)
}

fn records(envelope: &str, fields: SymbolFields, tradable: Vec<TradableCheck>) -> ResponseShape {
    ResponseShape::Records(InstrumentLayout {
        envelope: envelope.to_string(),
        fields,
        tradable,
    })
}

fn split(base: &str, quote: &str) -> SymbolFields {
    SymbolFields::Split {
        base: base.to_string(),
        quote: quote.to_string(),
    }
}

fn joined(pair: &str, separator: &str) -> SymbolFields {
    SymbolFields::Joined {
        pair: pair.to_string(),
        separator: separator.to_string(),
    }
}

fn aliases(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(from, to)| (from.to_string(), to.to_string()))
        .collect()
}
