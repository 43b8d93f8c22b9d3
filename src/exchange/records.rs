//! Record-shaped catalogs: a list (or map) of JSON objects, one per instrument.
//!
//! Covers every exchange whose metadata endpoint returns objects carrying
//! base/quote fields and some status flag. Field names, the envelope and
//! the tradable sentinel all come from an `InstrumentLayout` record.

use std::collections::HashMap;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::error::{CatalogKind, CheckError, CheckResult};

use super::{
    http::fetch_json,
    symbols::{split_joined, SymbolConvention},
    traits::ExchangeCatalog,
    types::ExchangeInstrument,
};

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct InstrumentLayout {
    /// JSON pointer to the instrument collection ("" = document root).
    #[serde(default)]
    pub envelope: String,
    pub fields: SymbolFields,
    /// All checks must hold for an instrument to be tradable. Empty = listed means tradable.
    #[serde(default)]
    pub tradable: Vec<TradableCheck>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum SymbolFields {
    /// Separate base and quote fields, e.g. `baseCcy` / `quoteCcy`.
    Split { base: String, quote: String },
    /// One joined field, e.g. Kraken `wsname: "XBT/USD"`.
    Joined { pair: String, separator: String },
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct TradableCheck {
    pub field: String,
    pub equals: Value,
}

impl TradableCheck {
    pub fn new(field: &str, equals: impl Into<Value>) -> Self {
        Self {
            field: field.to_string(),
            equals: equals.into(),
        }
    }

    fn holds(&self, record: &Value) -> bool {
        match (field(record, &self.field), &self.equals) {
            (Some(Value::String(actual)), Value::String(expected)) => {
                actual.eq_ignore_ascii_case(expected)
            }
            (Some(Value::Number(actual)), Value::String(expected)) => actual.to_string() == *expected,
            (Some(Value::Bool(actual)), Value::String(expected)) => {
                expected.trim().eq_ignore_ascii_case(if *actual { "true" } else { "false" })
            }
            (Some(actual), expected) => actual == expected,
            (None, _) => false,
        }
    }
}

/// Field lookup: a leading '/' means JSON pointer, otherwise a top-level key.
fn field<'a>(record: &'a Value, name: &str) -> Option<&'a Value> {
    if name.starts_with('/') {
        record.pointer(name)
    } else {
        record.get(name)
    }
}

fn locate<'a>(root: &'a Value, envelope: &str) -> Option<&'a Value> {
    if envelope.is_empty() {
        Some(root)
    } else {
        root.pointer(envelope)
    }
}

impl InstrumentLayout {
    pub fn parse(
        &self,
        root: &Value,
        url: &str,
        aliases: &HashMap<String, String>,
    ) -> CheckResult<Vec<ExchangeInstrument>> {
        let collection = locate(root, &self.envelope).ok_or_else(|| {
            CheckError::malformed(
                CatalogKind::Exchange,
                url,
                format!("missing envelope '{}'", self.envelope),
            )
        })?;

        let records: Box<dyn Iterator<Item = &Value> + '_> = match collection {
            Value::Array(items) => Box::new(items.iter()),
            Value::Object(map) => Box::new(map.values()),
            other => {
                return Err(CheckError::malformed(
                    CatalogKind::Exchange,
                    url,
                    format!("envelope '{}' holds {}, expected array or object", self.envelope, kind_of(other)),
                ))
            }
        };

        let mut skipped = 0usize;
        let instruments: Vec<ExchangeInstrument> = records
            .filter_map(|record| {
                let parsed = self.instrument(record, aliases);
                if parsed.is_none() {
                    skipped += 1;
                }
                parsed
            })
            .collect();

        if skipped > 0 {
            debug!(%url, skipped, "records without usable base/quote skipped");
        }
        if instruments.is_empty() {
            return Err(CheckError::empty(CatalogKind::Exchange, url));
        }
        Ok(instruments)
    }

    fn instrument(&self, record: &Value, aliases: &HashMap<String, String>) -> Option<ExchangeInstrument> {
        let (base, quote) = match &self.fields {
            SymbolFields::Split { base, quote } => {
                let base = field(record, base)?.as_str()?;
                let quote = field(record, quote)?.as_str()?;
                if base.trim().is_empty() || quote.trim().is_empty() {
                    return None;
                }
                (base.to_string(), quote.to_string())
            }
            SymbolFields::Joined { pair, separator } => {
                split_joined(field(record, pair)?.as_str()?, separator)?
            }
        };
        let tradable = self.tradable.iter().all(|check| check.holds(record));
        Some(ExchangeInstrument::new(&base, &quote, tradable, aliases))
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[derive(Clone, Debug)]
pub struct RecordCatalog {
    pub name: String,
    pub url: String,
    pub layout: InstrumentLayout,
    pub convention: SymbolConvention,
    pub aliases: HashMap<String, String>,
}

#[async_trait]
impl ExchangeCatalog for RecordCatalog {
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
        self.layout.parse(&root, &self.url, &self.aliases)
    }
}
