//! One pass per exchange: FETCHING -> VALIDATING -> MATCHING -> REPORTING.
//!
//! Passes share nothing mutable. Each runs in its own tokio task; the runner
//! prints their buffered output afterwards in configured order.

use std::fmt;
use std::sync::Arc;

use futures_util::future::join_all;
use reqwest::Client;
use tokio::task::JoinError;
use tracing::{debug, error, info};

use crate::{
    constants::{events, exit_codes},
    data::feeds::load_feed_bases,
    error::{CheckError, CheckResult, PassFailure},
    exchange::{
        traits::ExchangeCatalog,
        types::{ExchangeSymbolSet, QuoteUniverse},
    },
    services::{
        matching::match_feeds,
        reporting::{render, validate_inputs, verdict, OutputFormat},
    },
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stage {
    Fetching,
    Validating,
    Matching,
    Reporting,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Stage::Fetching => "FETCHING",
            Stage::Validating => "VALIDATING",
            Stage::Matching => "MATCHING",
            Stage::Reporting => "REPORTING",
        };
        f.write_str(s)
    }
}

/// Inputs shared read-only by every pass
#[derive(Clone, Debug)]
pub struct PassSettings {
    pub feeds_location: String,
    pub quotes: QuoteUniverse,
    pub format: OutputFormat,
}

#[derive(Debug)]
pub struct PassOutcome {
    pub exchange: String,
    /// Text destined for stdout. Empty when the pass failed before matching.
    pub output: String,
    pub result: Result<usize, PassFailure>,
}

impl PassOutcome {
    pub fn exit_code(&self) -> i32 {
        match &self.result {
            Ok(_) => exit_codes::SUCCESS,
            Err(failure) => failure.error.exit_code(),
        }
    }
}

pub async fn run_pass(client: &Client, settings: &PassSettings, catalog: &dyn ExchangeCatalog) -> PassOutcome {
    let exchange = catalog.name().to_string();
    let (output, result) = execute(client, settings, catalog).await;

    let result = match result {
        Ok(count) => {
            info!(event = events::PASS_SUCCEEDED, %exchange, matches = count, "Pass succeeded");
            Ok(count)
        }
        Err(error) => {
            let failure = PassFailure {
                exchange: exchange.clone(),
                error,
            };
            error!(event = events::PASS_FAILED, %exchange, code = failure.error.exit_code(), "{}", failure);
            Err(failure)
        }
    };

    PassOutcome {
        exchange,
        output,
        result,
    }
}

async fn execute(
    client: &Client,
    settings: &PassSettings,
    catalog: &dyn ExchangeCatalog,
) -> (String, CheckResult<usize>) {
    let exchange = catalog.name();

    debug!(%exchange, stage = %Stage::Fetching, "pass stage");
    let (bases, instruments) = tokio::join!(
        load_feed_bases(client, &settings.feeds_location),
        catalog.fetch(client)
    );
    let bases = match bases {
        Ok(bases) => bases,
        Err(e) => return (String::new(), Err(e)),
    };
    let instruments = match instruments {
        Ok(instruments) => instruments,
        Err(e) => return (String::new(), Err(e)),
    };
    info!(
        event = events::CATALOG_FETCHED,
        %exchange,
        url = catalog.url(),
        instruments = instruments.len(),
        "Fetched exchange catalog"
    );

    debug!(%exchange, stage = %Stage::Validating, "pass stage");
    let symbols = ExchangeSymbolSet::from_instruments(&instruments, catalog.convention());
    if let Err(e) = validate_inputs(&bases, &settings.feeds_location, &instruments, &symbols, catalog.url()) {
        return (String::new(), Err(e));
    }

    debug!(%exchange, stage = %Stage::Matching, tradable = symbols.len(), "pass stage");
    let matches = match_feeds(&bases, &settings.quotes, catalog.convention(), &symbols);

    debug!(%exchange, stage = %Stage::Reporting, "pass stage");
    let output = render(exchange, &matches, settings.format);
    (output, verdict(exchange, &matches, bases.len(), settings.quotes.len()))
}

/// Spawns one task per pass; outcomes come back in input order.
pub async fn run_passes(
    client: &Client,
    settings: &PassSettings,
    catalogs: &[Arc<dyn ExchangeCatalog>],
) -> Vec<PassOutcome> {
    let settings = Arc::new(settings.clone());

    let handles = catalogs.iter().map(|catalog| {
        let client = client.clone();
        let settings = Arc::clone(&settings);
        let catalog = Arc::clone(catalog);
        tokio::spawn(async move { run_pass(&client, &settings, catalog.as_ref()).await })
    });
    let joined = join_all(handles).await;

    catalogs
        .iter()
        .zip(joined)
        .map(|(catalog, joined)| match joined {
            Ok(outcome) => outcome,
            Err(e) => aborted(catalog.name(), e),
        })
        .collect()
}

fn aborted(exchange: &str, err: JoinError) -> PassOutcome {
    let reason = if err.is_panic() {
        "task panicked".to_string()
    } else {
        err.to_string()
    };
    let failure = PassFailure {
        exchange: exchange.to_string(),
        error: CheckError::Aborted { reason },
    };
    error!(event = events::PASS_FAILED, %exchange, code = failure.error.exit_code(), "{}", failure);

    PassOutcome {
        exchange: exchange.to_string(),
        output: String::new(),
        result: Err(failure),
    }
}

/// Zero when every pass succeeded; the shared failure code when all failures
/// agree; otherwise the mixed-failure code.
pub fn aggregate_exit_code(outcomes: &[PassOutcome]) -> i32 {
    let mut codes = outcomes
        .iter()
        .map(PassOutcome::exit_code)
        .filter(|code| *code != exit_codes::SUCCESS);

    let Some(first) = codes.next() else {
        return exit_codes::SUCCESS;
    };
    if codes.all(|code| code == first) {
        first
    } else {
        exit_codes::MIXED_FAILURES
    }
}
