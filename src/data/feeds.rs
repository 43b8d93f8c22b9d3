//! Feed catalog loader.
//!
//! The catalog is a JSON array of descriptors shaped like
//! `{"feed": {"category": 1, "name": "BTC/USD"}, ...}`. Only the base
//! segment of each name matters; quotes come from the configured universe.

use std::collections::BTreeSet;
use std::path::PathBuf;

use reqwest::Client;
use serde_json::Value;
use tracing::{debug, info};

use crate::{
    config::is_http_url,
    constants::events,
    error::{CatalogKind, CheckError, CheckResult},
    exchange::{http::fetch_json, symbols::feed_base},
};

/// Unique, upper-cased feed base symbols in lexicographic order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FeedBases {
    bases: BTreeSet<String>,
}

impl FeedBases {
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            bases: names.into_iter().filter_map(|n| feed_base(n.as_ref())).collect(),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.bases.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.bases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bases.is_empty()
    }
}

/// Extracts feed bases from an already-decoded catalog document.
pub fn parse_feed_catalog(root: &Value, location: &str) -> CheckResult<FeedBases> {
    let descriptors = root.as_array().ok_or_else(|| {
        CheckError::malformed(CatalogKind::Feed, location, "expected a JSON array of feed descriptors")
    })?;

    let names = descriptors.iter().filter_map(|d| {
        d.pointer("/feed/name")
            .or_else(|| d.get("name"))
            .and_then(Value::as_str)
    });
    let bases = FeedBases::from_names(names);

    debug!(%location, descriptors = descriptors.len(), bases = bases.len(), "feed catalog parsed");

    if bases.is_empty() {
        return Err(CheckError::empty(CatalogKind::Feed, location));
    }
    Ok(bases)
}

/// Loads the feed catalog from an http(s) URL or a local JSON file.
pub async fn load_feed_bases(client: &Client, location: &str) -> CheckResult<FeedBases> {
    let root = if is_http_url(location) {
        fetch_json(client, location, CatalogKind::Feed).await?
    } else {
        read_local(location).await?
    };

    let bases = parse_feed_catalog(&root, location)?;
    info!(event = events::FEEDS_LOADED, %location, bases = bases.len(), "Loaded feed catalog");
    Ok(bases)
}

async fn read_local(location: &str) -> CheckResult<Value> {
    let path = match url::Url::parse(location) {
        Ok(u) if u.scheme() == "file" => u
            .to_file_path()
            .map_err(|_| CheckError::unreachable(CatalogKind::Feed, location, "not a local file URL"))?,
        _ => PathBuf::from(location),
    };

    let text = tokio::fs::read_to_string(&path)
        .await
        .map_err(|e| CheckError::unreachable(CatalogKind::Feed, location, e))?;

    if text.trim().is_empty() {
        return Err(CheckError::empty(CatalogKind::Feed, location));
    }

    serde_json::from_str(&text).map_err(|e| CheckError::malformed(CatalogKind::Feed, location, e))
}
