//! Error types for feed coverage checks
//!
//! Every failure names the catalog it came from and the URL that was hit,
//! so a CI log line is enough to tell a broken source from a genuine
//! lack of overlap.

use std::fmt;

use thiserror::Error;

use crate::constants::exit_codes;

/// Which of the two catalogs a failure belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CatalogKind {
    Feed,
    Exchange,
}

impl fmt::Display for CatalogKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogKind::Feed => write!(f, "feed catalog"),
            CatalogKind::Exchange => write!(f, "exchange catalog"),
        }
    }
}

/// Terminal conditions of a single pass
#[derive(Error, Debug)]
pub enum CheckError {
    #[error("{catalog} unreachable at {url}: {reason}")]
    SourceUnreachable {
        catalog: CatalogKind,
        url: String,
        reason: String,
    },

    #[error("{catalog} at {url} is malformed: {reason}")]
    MalformedResponse {
        catalog: CatalogKind,
        url: String,
        reason: String,
    },

    #[error("{catalog} at {url} is empty")]
    EmptyCatalog { catalog: CatalogKind, url: String },

    #[error("exchange catalog at {url} lists {listed} instruments but none are tradable")]
    NoTradableInstruments { url: String, listed: usize },

    #[error("no feeds supported on {exchange} ({bases} bases x {quotes} quotes checked)")]
    NoMatches {
        exchange: String,
        bases: usize,
        quotes: usize,
    },

    #[error("pass aborted: {reason}")]
    Aborted { reason: String },
}

impl CheckError {
    pub fn unreachable(catalog: CatalogKind, url: &str, reason: impl fmt::Display) -> Self {
        CheckError::SourceUnreachable {
            catalog,
            url: url.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn malformed(catalog: CatalogKind, url: &str, reason: impl fmt::Display) -> Self {
        CheckError::MalformedResponse {
            catalog,
            url: url.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn empty(catalog: CatalogKind, url: &str) -> Self {
        CheckError::EmptyCatalog {
            catalog,
            url: url.to_string(),
        }
    }

    /// Process exit code for this failure kind.
    pub fn exit_code(&self) -> i32 {
        match self {
            CheckError::SourceUnreachable { .. } => exit_codes::SOURCE_UNREACHABLE,
            CheckError::MalformedResponse { .. } => exit_codes::MALFORMED_RESPONSE,
            CheckError::EmptyCatalog {
                catalog: CatalogKind::Feed,
                ..
            } => exit_codes::EMPTY_FEED_CATALOG,
            CheckError::EmptyCatalog {
                catalog: CatalogKind::Exchange,
                ..
            }
            | CheckError::NoTradableInstruments { .. } => exit_codes::EMPTY_EXCHANGE_CATALOG,
            CheckError::NoMatches { .. } => exit_codes::NO_MATCHES,
            CheckError::Aborted { .. } => exit_codes::PASS_ABORTED,
        }
    }
}

/// A `CheckError` scoped to the exchange whose pass produced it.
#[derive(Error, Debug)]
#[error("{exchange}: {error}")]
pub struct PassFailure {
    pub exchange: String,
    #[source]
    pub error: CheckError,
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Unknown exchange '{name}' (no preset and no url/shape configured)")]
    UnknownExchange { name: String },
}

impl From<String> for ConfigError {
    fn from(err: String) -> Self {
        ConfigError::Invalid(err)
    }
}

impl From<&str> for ConfigError {
    fn from(err: &str) -> Self {
        ConfigError::Invalid(err.to_string())
    }
}

pub type CheckResult<T> = Result<T, CheckError>;
