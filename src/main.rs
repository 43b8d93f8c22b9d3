use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use feed_check::{
    config::AppConfig,
    constants::{config::DEFAULT_CONFIG_PATH, exit_codes},
    exchange::{factory::build_catalog, http::build_client, presets::PRESET_NAMES, traits::ExchangeCatalog},
    services::pass::{aggregate_exit_code, run_passes, PassSettings},
    ConfigError, OutputFormat,
};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Checks which price feeds each configured exchange can serve
#[derive(Parser)]
#[command(name = "feed_check")]
#[command(about = "Cross-reference a feed catalog against exchange instrument catalogs")]
struct Cli {
    /// Path to the YAML configuration
    #[arg(long, short = 'c', default_value = DEFAULT_CONFIG_PATH)]
    config: String,

    /// Only check these exchanges (repeatable); ignores `enabled`
    #[arg(long = "exchange", short = 'e')]
    exchanges: Vec<String>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::List)]
    format: OutputFormat,

    /// Override the per-request timeout
    #[arg(long)]
    timeout_secs: Option<u64>,

    /// Print the built-in exchange presets and exit
    #[arg(long)]
    list_exchanges: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    // Logs go to stderr; stdout carries only the report
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("failed to install tracing subscriber: {}", e);
    }

    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    if cli.list_exchanges {
        for name in PRESET_NAMES {
            println!("{}", name);
        }
        return ExitCode::SUCCESS;
    }

    let code = match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            error!("{}", e);
            exit_codes::CONFIG
        }
    };
    ExitCode::from(u8::try_from(code).unwrap_or(1))
}

async fn run(cli: Cli) -> Result<i32, ConfigError> {
    let mut config = AppConfig::load(&cli.config)?;
    if let Some(secs) = cli.timeout_secs {
        config.timeout_secs = secs;
        config.validate()?;
    }
    info!("Loaded configuration from {}", cli.config);

    let catalogs = config
        .selected_exchanges(&cli.exchanges)?
        .iter()
        .map(build_catalog)
        .collect::<Result<Vec<Arc<dyn ExchangeCatalog>>, _>>()?;

    let settings = PassSettings {
        feeds_location: config.feeds_url.clone(),
        quotes: config.quote_universe(),
        format: cli.format,
    };
    let client = build_client(config.timeout())
        .map_err(|e| ConfigError::Invalid(format!("failed to build HTTP client: {}", e)))?;

    info!(
        "Checking {} exchange(s) against {} quote(s), timeout {}s",
        catalogs.len(),
        settings.quotes.len(),
        config.timeout_secs
    );

    let outcomes = run_passes(&client, &settings, &catalogs).await;
    for outcome in &outcomes {
        print!("{}", outcome.output);
    }

    let failed: Vec<&str> = outcomes
        .iter()
        .filter(|o| o.result.is_err())
        .map(|o| o.exchange.as_str())
        .collect();
    if failed.is_empty() {
        info!("All {} pass(es) succeeded", outcomes.len());
    } else {
        error!("{} of {} pass(es) failed: {}", failed.len(), outcomes.len(), failed.join(", "));
    }

    Ok(aggregate_exit_code(&outcomes))
}
