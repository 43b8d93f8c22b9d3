//! Application-wide constants
//!
//! Defaults and process-visible codes live here so the runner and the
//! library agree on them.

use std::time::Duration;

/// HTTP defaults
pub mod http {
    use super::*;

    /// Upper bound on any single catalog fetch (connect + body)
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

    /// Connect phase bound, kept below the overall timeout
    pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

    /// How much of a failing response body ends up in the error message
    pub const ERROR_BODY_EXCERPT: usize = 200;

    pub const USER_AGENT: &str = concat!("feed_check/", env!("CARGO_PKG_VERSION"));
}

/// Configuration defaults and environment overrides
pub mod config {
    pub const DEFAULT_CONFIG_PATH: &str = "config.yaml";

    pub const ENV_FEEDS_URL: &str = "FEED_CHECK_FEEDS_URL";
    pub const ENV_TIMEOUT_SECS: &str = "FEED_CHECK_TIMEOUT_SECS";

    pub const DEFAULT_QUOTES: [&str; 2] = ["USD", "USDT"];
}

/// Process exit codes
///
/// Distinct per failure kind so CI can tell a broken source from an
/// exchange that simply lists none of the feeds.
pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    pub const MIXED_FAILURES: i32 = 1;
    pub const CONFIG: i32 = 2;
    pub const SOURCE_UNREACHABLE: i32 = 3;
    pub const MALFORMED_RESPONSE: i32 = 4;
    pub const EMPTY_FEED_CATALOG: i32 = 5;
    pub const EMPTY_EXCHANGE_CATALOG: i32 = 6;
    pub const NO_MATCHES: i32 = 7;
    pub const PASS_ABORTED: i32 = 8;
}

/// Logging event names for structured logging
pub mod events {
    pub const FEEDS_LOADED: &str = "feeds_loaded";
    pub const CATALOG_FETCHED: &str = "catalog_fetched";
    pub const PASS_SUCCEEDED: &str = "pass_succeeded";
    pub const PASS_FAILED: &str = "pass_failed";
}
