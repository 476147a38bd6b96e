//! One-shot CLI: checks whether `<ADDRESS>` ever paid the fixed receiver.

use std::io;

use clap::Parser;
use interaction_check_domain::{
    init_telemetry, CheckContext, ConfigError, ExplorerConfig, TelemetryConfig, TelemetryError,
};
use interaction_check_explorer::{check_interaction, EsploraSource, ExplorerError};
use thiserror::Error;

#[derive(Debug, Parser)]
#[command(name = "interaction-check", version, about)]
struct Cli {
    /// Wallet address whose history is scanned.
    address: String,
}

#[derive(Debug, Error)]
enum CheckError {
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
    #[error("telemetry error: {0}")]
    Telemetry(#[from] TelemetryError),
    #[error("explorer error: {0}")]
    Explorer(#[from] ExplorerError),
    #[error("{0}")]
    Rejected(String),
}

#[tokio::main]
async fn main() -> io::Result<()> {
    if let Err(err) = run(Cli::parse()).await {
        eprintln!("[check] {err}");
        return Err(io::Error::other(err.to_string()));
    }

    Ok(())
}

async fn run(cli: Cli) -> Result<(), CheckError> {
    let config = ExplorerConfig::load_from_env()?;
    init_telemetry(&TelemetryConfig::from_env("CHECK"))?;
    let source = EsploraSource::from_config(&config)?;

    let context =
        check_interaction(&source, CheckContext::new(cli.address), config.max_pages()).await;

    let Some(result) = context.result else {
        return Err(CheckError::Rejected(context.error.unwrap_or_default()));
    };
    if let Some(error) = context.error.as_deref() {
        eprintln!("{error}");
    }

    println!(
        "Interaction Found: {}",
        if result.is_found() { "Yes" } else { "No" }
    );
    if let Some(txid) = result.matched_transaction_id() {
        println!("Transaction ID: {txid}");
    }

    Ok(())
}
