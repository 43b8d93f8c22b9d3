use serde::Deserialize;
use std::collections::{HashMap, HashSet};
use std::{env, fs, time::Duration};

use crate::{
    constants::config::{DEFAULT_QUOTES, ENV_FEEDS_URL, ENV_TIMEOUT_SECS},
    constants::http::DEFAULT_TIMEOUT,
    error::ConfigError,
    exchange::{presets::ResponseShape, symbols::SymbolConvention, types::QuoteUniverse},
};

/// One exchange to check. Everything but `name` falls back to the built-in preset.
#[derive(Clone, Debug, Deserialize)]
pub struct ExchangeConfig {
    pub name: String,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    pub url: Option<String>,
    pub shape: Option<ResponseShape>,
    pub convention: Option<SymbolConvention>,
    pub aliases: Option<HashMap<String, String>>,
}

impl ExchangeConfig {
    pub fn named(name: &str) -> Self {
        Self {
            name: name.to_string(),
            enabled: true,
            url: None,
            shape: None,
            convention: None,
            aliases: None,
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct AppConfig {
    /// http(s) URL or local path of the feed catalog
    pub feeds_url: String,
    #[serde(default = "default_quotes")]
    pub quotes: Vec<String>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    pub exchanges: Vec<ExchangeConfig>,
}

fn default_enabled() -> bool {
    true
}

fn default_quotes() -> Vec<String> {
    DEFAULT_QUOTES.iter().map(|q| q.to_string()).collect()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT.as_secs()
}

impl AppConfig {
    pub fn load(path: &str) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_string(),
            source,
        })?;

        let mut config = Self::from_yaml(&content, path)?;
        config.apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_yaml(content: &str, path: &str) -> Result<Self, ConfigError> {
        // Strip BOM if present
        let content = content.strip_prefix('\u{feff}').unwrap_or(content);

        serde_yaml::from_str(content).map_err(|source| ConfigError::Parse {
            path: path.to_string(),
            source,
        })
    }

    pub fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        if let Ok(url) = env::var(ENV_FEEDS_URL) {
            self.feeds_url = url;
        }
        if let Ok(raw) = env::var(ENV_TIMEOUT_SECS) {
            self.timeout_secs = raw
                .trim()
                .parse()
                .map_err(|_| format!("{} must be a whole number of seconds, got '{}'", ENV_TIMEOUT_SECS, raw))?;
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.feeds_url.trim().is_empty() {
            return Err("feeds_url is empty".into());
        }
        if self.quote_universe().is_empty() {
            return Err("quotes must name at least one quote currency".into());
        }
        if self.timeout_secs == 0 {
            return Err("timeout_secs must be positive".into());
        }

        let mut seen = HashSet::new();
        for exchange in &self.exchanges {
            if exchange.name.trim().is_empty() {
                return Err("exchange with an empty name".into());
            }
            if !seen.insert(exchange.name.trim().to_lowercase()) {
                return Err(format!("exchange '{}' is configured twice", exchange.name).into());
            }
            if let Some(url) = &exchange.url {
                if !is_http_url(url) {
                    return Err(format!("exchange '{}' has an invalid url '{}'", exchange.name, url).into());
                }
            }
        }

        if !self.exchanges.iter().any(|e| e.enabled) {
            return Err("no exchange is enabled".into());
        }
        Ok(())
    }

    pub fn quote_universe(&self) -> QuoteUniverse {
        QuoteUniverse::new(&self.quotes)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Exchanges to run. An explicit selection picks by name (case-insensitive,
    /// first occurrence wins) and ignores `enabled`.
    pub fn selected_exchanges(&self, names: &[String]) -> Result<Vec<ExchangeConfig>, ConfigError> {
        if names.is_empty() {
            return Ok(self.exchanges.iter().filter(|e| e.enabled).cloned().collect());
        }

        let mut selected: Vec<ExchangeConfig> = Vec::with_capacity(names.len());
        for name in names {
            let exchange = self
                .exchanges
                .iter()
                .find(|e| e.name.eq_ignore_ascii_case(name))
                .ok_or_else(|| ConfigError::Invalid(format!("exchange '{}' is not configured", name)))?;
            // Repeated --exchange flags run the pass once
            if !selected.iter().any(|s| s.name.eq_ignore_ascii_case(&exchange.name)) {
                selected.push(exchange.clone());
            }
        }
        Ok(selected)
    }
}

pub fn is_http_url(raw: &str) -> bool {
    url::Url::parse(raw)
        .map(|u| matches!(u.scheme(), "http" | "https"))
        .unwrap_or(false)
}
