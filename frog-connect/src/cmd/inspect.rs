//! `frog-connect inspect` command — load, validate, and print the
//! resolved configuration.
//!
//! Builds the connection configuration from the TOML file, opens the
//! configured storage backend, and prints the resolved configuration as
//! JSON. A non-zero exit means the file would not boot the application.

use std::path::Path;

use dotenvy::dotenv;

use frog_connect::config::load_config;
use frog_connect::connection::ConnectionConfig;
use frog_connect::telemetry;

/// Execute the `inspect` command.
///
/// # Errors
///
/// Returns an error if configuration loading, validation, or opening the
/// storage backend fails.
#[allow(clippy::print_stdout, clippy::future_not_send)]
pub async fn run(config_path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    // Load .env variables
    dotenv().ok();
    telemetry::init("info");

    let config = load_config(config_path)?;
    let connection = ConnectionConfig::from_config(&config)?;
    let storage = connection.storage().open().await?;

    tracing::info!(
        chains = connection.chains().len(),
        connectors = connection.connectors().len(),
        storage_key = storage.key(),
        "configuration OK"
    );

    println!("{}", serde_json::to_string_pretty(&connection)?);
    Ok(())
}
