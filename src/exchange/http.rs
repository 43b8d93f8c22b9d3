//! Bounded-timeout JSON GET shared by the feed loader and exchange adapters.
//!
//! No caching: every call hits the network, results are a point-in-time snapshot.

use std::time::Duration;

use reqwest::Client;
use serde_json::Value;
use tracing::debug;

use crate::{
    constants::http::{CONNECT_TIMEOUT, ERROR_BODY_EXCERPT, USER_AGENT},
    error::{CatalogKind, CheckError, CheckResult},
};

pub fn build_client(timeout: Duration) -> Result<Client, reqwest::Error> {
    Client::builder()
        .timeout(timeout)
        .connect_timeout(CONNECT_TIMEOUT.min(timeout))
        .user_agent(USER_AGENT)
        .build()
}

pub async fn fetch_json(client: &Client, url: &str, catalog: CatalogKind) -> CheckResult<Value> {
    debug!(%url, %catalog, "GET");

    let resp = client
        .get(url)
        .send()
        .await
        .map_err(|e| CheckError::unreachable(catalog, url, describe(&e)))?;

    let status = resp.status();
    let text = resp
        .text()
        .await
        .map_err(|e| CheckError::unreachable(catalog, url, describe(&e)))?;

    if !status.is_success() {
        return Err(CheckError::unreachable(
            catalog,
            url,
            format!("HTTP {} (body: {})", status, excerpt(&text)),
        ));
    }

    if text.trim().is_empty() {
        return Err(CheckError::empty(catalog, url));
    }

    serde_json::from_str(&text)
        .map_err(|e| CheckError::malformed(catalog, url, format!("{} (body: {})", e, excerpt(&text))))
}

fn describe(err: &reqwest::Error) -> String {
    if err.is_timeout() {
        format!("timed out: {}", err)
    } else if err.is_connect() {
        format!("connection failed: {}", err)
    } else {
        err.to_string()
    }
}

fn excerpt(body: &str) -> &str {
    match body.char_indices().nth(ERROR_BODY_EXCERPT) {
        Some((idx, _)) => &body[..idx],
        None => body,
    }
}
