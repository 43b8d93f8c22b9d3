//! feed_check - exchange coverage check for price feeds
//!
//! Cross-references a canonical feed catalog against the live instrument
//! catalogs of several exchanges and reports, per exchange, which feed
//! pairs are currently tradable there.

pub mod config;
pub mod constants;
pub mod data;
pub mod error;
pub mod exchange;
pub mod services;

// Re-export commonly used types
pub use config::AppConfig;
pub use error::{CatalogKind, CheckError, ConfigError, PassFailure};
pub use services::pass::{run_pass, run_passes, PassOutcome, PassSettings};
pub use services::reporting::OutputFormat;

#[cfg(test)]
mod config_tests;
