//! Unit tests for the reporting module - output format and validation.

#[cfg(test)]
mod reporting_tests {
    use std::collections::HashMap;

    use crate::constants::exit_codes;
    use crate::data::feeds::FeedBases;
    use crate::error::{CatalogKind, CheckError};
    use crate::exchange::symbols::SymbolConvention;
    use crate::exchange::types::*;
    use crate::services::reporting::*;

    fn m(base: &str, quote: &str) -> MatchResult {
        MatchResult {
            base: base.to_string(),
            quote: quote.to_string(),
        }
    }

    fn instruments(tradable: bool) -> Vec<ExchangeInstrument> {
        vec![ExchangeInstrument::new("BTC", "USD", tradable, &HashMap::new())]
    }

    // ============= Render Tests =============

    #[test]
    fn test_render_list() {
        let out = render("bybit", &[m("BTC", "USDT"), m("ETH", "USD")], OutputFormat::List);
        assert_eq!(out, "== bybit ==\n\"BTC/USDT\",\n\"ETH/USD\",\nbybit: 2 supported feeds\n");
    }

    #[test]
    fn test_render_list_without_matches_has_no_pair_lines() {
        let out = render("okx", &[], OutputFormat::List);
        assert_eq!(out, "== okx ==\nokx: 0 supported feeds\n");
        assert!(!out.contains("\","));
    }

    #[test]
    fn test_render_json() {
        let out = render("kraken", &[m("BTC", "USD")], OutputFormat::Json);
        let value: serde_json::Value = serde_json::from_str(out.trim_end()).unwrap();
        assert_eq!(value["exchange"], "kraken");
        assert_eq!(value["pairs"][0], "BTC/USD");
        assert_eq!(value["count"], 1);
        assert!(out.ends_with('\n'));
        assert_eq!(out.lines().count(), 1);
    }

    #[test]
    fn test_render_is_deterministic() {
        let matches = vec![m("ADA", "USD"), m("BTC", "USDT")];
        assert_eq!(
            render("gateio", &matches, OutputFormat::List),
            render("gateio", &matches, OutputFormat::List)
        );
        assert_eq!(
            render("gateio", &matches, OutputFormat::Json),
            render("gateio", &matches, OutputFormat::Json)
        );
    }

    #[test]
    fn test_output_format_default() {
        assert_eq!(OutputFormat::default(), OutputFormat::List);
    }

    // ============= Validation Tests =============

    #[test]
    fn test_validate_ok() {
        let bases = FeedBases::from_names(["BTC/USD"]);
        let inst = instruments(true);
        let set = ExchangeSymbolSet::from_instruments(&inst, &SymbolConvention::default());
        assert!(validate_inputs(&bases, "feeds", &inst, &set, "exchange").is_ok());
    }

    #[test]
    fn test_validate_empty_feeds() {
        let inst = instruments(true);
        let set = ExchangeSymbolSet::from_instruments(&inst, &SymbolConvention::default());
        let err = validate_inputs(&FeedBases::default(), "feeds", &inst, &set, "exchange").unwrap_err();
        assert!(matches!(
            err,
            CheckError::EmptyCatalog {
                catalog: CatalogKind::Feed,
                ..
            }
        ));
    }

    #[test]
    fn test_validate_empty_exchange_catalog() {
        let bases = FeedBases::from_names(["BTC/USD"]);
        let err = validate_inputs(&bases, "feeds", &[], &ExchangeSymbolSet::default(), "exchange").unwrap_err();
        assert_eq!(err.exit_code(), exit_codes::EMPTY_EXCHANGE_CATALOG);
    }

    #[test]
    fn test_validate_nothing_tradable() {
        let bases = FeedBases::from_names(["BTC/USD"]);
        let inst = instruments(false);
        let set = ExchangeSymbolSet::from_instruments(&inst, &SymbolConvention::default());
        let err = validate_inputs(&bases, "feeds", &inst, &set, "https://x.test").unwrap_err();
        assert!(matches!(err, CheckError::NoTradableInstruments { listed: 1, .. }));
        assert_eq!(err.exit_code(), exit_codes::EMPTY_EXCHANGE_CATALOG);
    }

    // ============= Verdict Tests =============

    #[test]
    fn test_verdict_counts_matches() {
        assert_eq!(verdict("okx", &[m("BTC", "USD"), m("ETH", "USD")], 2, 2).unwrap(), 2);
    }

    #[test]
    fn test_verdict_no_matches() {
        let err = verdict("okx", &[], 3, 2).unwrap_err();
        assert!(matches!(err, CheckError::NoMatches { bases: 3, quotes: 2, .. }));
        assert_eq!(err.exit_code(), exit_codes::NO_MATCHES);
        assert!(err.to_string().contains("okx"));
    }

    #[test]
    fn test_exit_codes_are_distinct() {
        let codes = [
            CheckError::unreachable(CatalogKind::Exchange, "u", "refused").exit_code(),
            CheckError::malformed(CatalogKind::Exchange, "u", "bad").exit_code(),
            CheckError::empty(CatalogKind::Feed, "u").exit_code(),
            CheckError::empty(CatalogKind::Exchange, "u").exit_code(),
            verdict("x", &[], 1, 1).unwrap_err().exit_code(),
        ];
        for (i, a) in codes.iter().enumerate() {
            assert_ne!(*a, exit_codes::SUCCESS);
            for b in &codes[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_error_messages_name_catalog_and_url() {
        let err = CheckError::unreachable(CatalogKind::Feed, "https://feeds.test", "timed out");
        let msg = err.to_string();
        assert!(msg.contains("feed catalog"));
        assert!(msg.contains("https://feeds.test"));
        assert!(msg.contains("timed out"));
    }
}
