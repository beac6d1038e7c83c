//! Equity Ticker
//!
//! Brokerage portfolio value on a serial character display.

use anyhow::{Context, Result};
use tracing_subscriber::{fmt, EnvFilter};

use equity_ticker::adapters::cli;
use equity_ticker::adapters::display::open_serial_display;
use equity_ticker::adapters::robinhood::{RobinhoodClient, RobinhoodConfig};
use equity_ticker::adapters::totp::TotpGenerator;
use equity_ticker::application::{Authenticator, PortfolioPoller};
use equity_ticker::config::{load_config, Config};
use equity_ticker::domain::RefreshPolicy;
use equity_ticker::ports::SystemClock;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (secrets go here, not in config.toml)
    dotenvy::dotenv().ok();

    let app = cli::init();
    let config_path = app.config_path();

    let config = load_config(&config_path)
        .with_context(|| format!("Failed to load configuration from {}", config_path.display()))?;
    init_logging(app.verbose, app.debug, &config.logging.level)?;

    run(config).await
}

fn init_logging(verbose: bool, debug: bool, config_level: &str) -> Result<()> {
    let filter = if debug {
        EnvFilter::new("debug")
    } else if verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(config_level))
    };

    fmt().with_env_filter(filter).init();
    Ok(())
}

async fn run(config: Config) -> Result<()> {
    tracing::info!("Starting equity ticker...");

    let mut display = open_serial_display(
        &config.display.com_port,
        config.display.baud,
        config.display.width,
    )
    .context("Failed to open display")?;
    display.initialize().context("Failed to initialize display")?;
    display.clear().context("Failed to clear display")?;

    let mut robinhood_config = RobinhoodConfig::default();
    if let Some(ref url) = config.robinhood.api_url {
        robinhood_config.api_base_url = url.clone();
    }
    robinhood_config.device_token = config.robinhood.device_token.clone();
    let brokerage = RobinhoodClient::with_config(robinhood_config)
        .context("Failed to create Robinhood client")?;

    let codes = TotpGenerator::new();
    let clock = SystemClock;

    let session = Authenticator::new(&brokerage, &codes, &clock, config.robinhood.credentials())
        .authenticate(&mut display)
        .await
        .context("Authentication aborted")?;

    let poller = PortfolioPoller::new(
        &brokerage,
        &clock,
        session,
        RefreshPolicy::from(&config.ticker),
    );

    tokio::select! {
        result = poller.run(&mut display) => {
            result.context("Ticker stopped")?;
        }
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Shutdown signal received");
        }
    }

    tracing::info!("Equity ticker stopped");
    Ok(())
}
