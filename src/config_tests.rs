//! Unit tests for configuration structures and parsing.

#[cfg(test)]
mod config_tests {
    use crate::config::*;
    use std::sync::Mutex;

    use crate::constants::config::{ENV_FEEDS_URL, ENV_TIMEOUT_SECS};
    use crate::error::ConfigError;
    use crate::exchange::presets::ResponseShape;
    use crate::exchange::symbols::{Casing, SymbolConvention};

    const MINIMAL: &str = r#"
feeds_url: "https://feeds.test/feeds.json"
exchanges:
  - name: gateio
  - name: okx
"#;

    // Env overrides are process-wide; tests touching them run one at a time.
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    fn parse(yaml: &str) -> AppConfig {
        AppConfig::from_yaml(yaml, "test.yaml").unwrap()
    }

    // ============= Parsing Tests =============

    #[test]
    fn test_minimal_config_defaults() {
        let config = parse(MINIMAL);

        assert_eq!(config.feeds_url, "https://feeds.test/feeds.json");
        assert_eq!(config.quotes, vec!["USD".to_string(), "USDT".to_string()]);
        assert_eq!(config.timeout_secs, 15);
        assert_eq!(config.exchanges.len(), 2);
        assert!(config.exchanges.iter().all(|e| e.enabled));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_bom_is_stripped() {
        let config = parse(&format!("\u{feff}{}", MINIMAL));
        assert_eq!(config.exchanges[0].name, "gateio");
    }

    #[test]
    fn test_full_exchange_override() {
        let yaml = r#"
feeds_url: ./feeds.json
quotes: [usdt, USD]
timeout_secs: 5
exchanges:
  - name: custom
    url: https://custom.test/api/symbols
    shape:
      type: records
      envelope: /result/list
      fields: { base: baseCoin, quote: quoteCoin }
      tradable:
        - { field: status, equals: Trading }
    convention: { separator: "-", casing: lower }
    aliases: { XBT: BTC }
  - name: bitrue
    enabled: false
"#;
        let config = parse(yaml);
        assert!(config.validate().is_ok());

        let custom = &config.exchanges[0];
        assert_eq!(custom.url.as_deref(), Some("https://custom.test/api/symbols"));
        assert!(matches!(custom.shape, Some(ResponseShape::Records(_))));
        assert_eq!(custom.convention, Some(SymbolConvention::new("-", Casing::Lower)));
        assert_eq!(custom.aliases.as_ref().unwrap().get("XBT").map(String::as_str), Some("BTC"));

        assert!(!config.exchanges[1].enabled);
        assert_eq!(config.timeout().as_secs(), 5);

        let quote_universe = config.quote_universe();
        let quotes: Vec<&str> = quote_universe.iter().collect();
        assert_eq!(quotes, vec!["USDT", "USD"]);
    }

    #[test]
    fn test_invalid_yaml() {
        let err = AppConfig::from_yaml("feeds_url: [unclosed", "broken.yaml").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains("broken.yaml"));
    }

    #[test]
    fn test_missing_file() {
        let err = AppConfig::load("/nonexistent/feed_check/config.yaml").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    // ============= Validation Tests =============

    #[test]
    fn test_empty_quotes_rejected() {
        let mut config = parse(MINIMAL);
        config.quotes = vec![" ".to_string()];
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let mut config = parse(MINIMAL);
        config.timeout_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_empty_feeds_url_rejected() {
        let mut config = parse(MINIMAL);
        config.feeds_url = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_duplicate_exchange_rejected() {
        let mut config = parse(MINIMAL);
        config.exchanges.push(ExchangeConfig::named("okx"));
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("okx"));
    }

    #[test]
    fn test_duplicate_exchange_differing_case_rejected() {
        let mut config = parse(MINIMAL);
        config.exchanges.push(ExchangeConfig::named("OKX"));
        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
        assert!(err.to_string().contains("OKX"));
    }

    #[test]
    fn test_invalid_exchange_url_rejected() {
        let mut config = parse(MINIMAL);
        config.exchanges[0].url = Some("ftp://files.test/pairs".to_string());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_all_disabled_rejected() {
        let mut config = parse(MINIMAL);
        for e in &mut config.exchanges {
            e.enabled = false;
        }
        assert!(config.validate().is_err());
    }

    // ============= Selection Tests =============

    #[test]
    fn test_selection_defaults_to_enabled() {
        let mut config = parse(MINIMAL);
        config.exchanges[1].enabled = false;

        let selected = config.selected_exchanges(&[]).unwrap();
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].name, "gateio");
    }

    #[test]
    fn test_explicit_selection_ignores_enabled() {
        let mut config = parse(MINIMAL);
        config.exchanges[1].enabled = false;

        let selected = config.selected_exchanges(&["OKX".to_string()]).unwrap();
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].name, "okx");
    }

    #[test]
    fn test_repeated_selection_runs_once() {
        let config = parse(MINIMAL);

        let names = vec!["okx".to_string(), "gateio".to_string(), "OKX".to_string()];
        let selected = config.selected_exchanges(&names).unwrap();
        let selected: Vec<&str> = selected.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(selected, vec!["okx", "gateio"]);
    }

    #[test]
    fn test_selection_of_unconfigured_exchange() {
        let config = parse(MINIMAL);
        assert!(config.selected_exchanges(&["kraken".to_string()]).is_err());
    }

    // ============= Helper Tests =============

    #[test]
    fn test_is_http_url() {
        assert!(is_http_url("https://api.gateio.ws/api/v4/spot/currency_pairs"));
        assert!(is_http_url("http://127.0.0.1:8080/feeds"));
        assert!(!is_http_url("./feeds.json"));
        assert!(!is_http_url("file:///tmp/feeds.json"));
    }

    #[test]
    fn test_env_override() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        std::env::set_var(ENV_FEEDS_URL, "https://override.test/feeds.json");
        let mut config = parse(MINIMAL);
        let result = config.apply_env_overrides();
        std::env::remove_var(ENV_FEEDS_URL);

        assert!(result.is_ok());
        assert_eq!(config.feeds_url, "https://override.test/feeds.json");
    }

    #[test]
    fn test_timeout_env_override() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());

        std::env::set_var(ENV_TIMEOUT_SECS, " 42 ");
        let mut config = parse(MINIMAL);
        let result = config.apply_env_overrides();
        std::env::remove_var(ENV_TIMEOUT_SECS);

        assert!(result.is_ok());
        assert_eq!(config.timeout_secs, 42);
        assert_eq!(config.timeout().as_secs(), 42);
    }

    #[test]
    fn test_timeout_env_override_not_a_number() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());

        std::env::set_var(ENV_TIMEOUT_SECS, "soon");
        let mut config = parse(MINIMAL);
        let result = config.apply_env_overrides();
        std::env::remove_var(ENV_TIMEOUT_SECS);

        let err = result.unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
        assert!(err.to_string().contains("whole number of seconds"));
        assert_eq!(config.timeout_secs, 15);
    }

    #[test]
    fn test_timeout_env_override_zero_rejected() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());

        std::env::set_var(ENV_TIMEOUT_SECS, "0");
        let mut config = parse(MINIMAL);
        let result = config.apply_env_overrides();
        std::env::remove_var(ENV_TIMEOUT_SECS);

        assert!(result.is_ok());
        assert_eq!(config.timeout_secs, 0);
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }
}
