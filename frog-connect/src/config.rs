//! Configuration loading and default template generation.
//!
//! This module provides:
//!
//! - [`Config`] — Serde model of the TOML configuration file.
//! - [`load_config`] — Reads and parses a TOML configuration file.
//! - [`generate_default_config`] — Produces a commented TOML template
//!   reproducing the stock setup.
//! - [`resolve_env`] — Expands `$VAR` / `${VAR}` environment references.
//!
//! # Configuration File Format
//!
//! ```toml
//! [chains."8453"]            # Base, resolved from the built-in registry
//!
//! [[connectors]]
//! kind = "walletconnect"
//! project_id = "$WALLETCONNECT_PROJECT_ID"
//! show_qr_modal = false
//!
//! [storage]
//! backend = "file"
//! key = "frog"
//!
//! [transports."8453"]        # empty table = default public RPC endpoint
//! ```
//!
//! A missing section falls back to the stock setup, so an empty file is
//! a valid configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::chain::ChainsConfig;
use crate::connector::ConnectorConfig;
use crate::error::Error;
use crate::storage::StorageSettings;
use crate::transport::TransportsConfig;

/// Serde model of the whole configuration file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Active chain set (default: the built-in seven).
    #[serde(default)]
    pub chains: ChainsConfig,
    /// Connector sequence, in priority order (default: the stock pair).
    #[serde(default = "ConnectorConfig::default_set")]
    pub connectors: Vec<ConnectorConfig>,
    /// Storage binding (default: file backend under `"frog"`).
    #[serde(default)]
    pub storage: StorageSettings,
    /// Transport map (default: one default HTTP transport per built-in
    /// chain).
    #[serde(default)]
    pub transports: TransportsConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            chains: ChainsConfig::default(),
            connectors: ConnectorConfig::default_set(),
            storage: StorageSettings::default(),
            transports: TransportsConfig::default(),
        }
    }
}

/// Load configuration from a TOML file at the given path.
///
/// # Errors
///
/// Returns an error if the file cannot be resolved, read, or parsed.
pub fn load_config(path: &Path) -> Result<Config, Error> {
    let config_path = path.canonicalize().map_err(|e| {
        Error::config_with(format!("failed to resolve config path '{}'", path.display()), e)
    })?;
    let content = std::fs::read_to_string(&config_path).map_err(|e| {
        Error::config_with(
            format!("failed to read config file '{}'", config_path.display()),
            e,
        )
    })?;
    let config: Config = toml::from_str(&content).map_err(|e| {
        Error::config_with(
            format!("failed to parse TOML config '{}'", config_path.display()),
            e,
        )
    })?;
    Ok(config)
}

/// Resolve an environment-variable reference (`$VAR` or `${VAR}`),
/// returning the literal string unchanged if it matches neither pattern.
///
/// # Errors
///
/// Returns an error if the referenced environment variable is not set.
pub fn resolve_env(value: &str) -> Result<String, Error> {
    if let Some(var_name) = value.strip_prefix("${").and_then(|v| v.strip_suffix('}')) {
        return std::env::var(var_name).map_err(|_| {
            Error::config(format!(
                "env var '{var_name}' not found (referenced as '{value}')"
            ))
        });
    }
    if let Some(var_name) = value.strip_prefix('$')
        && !var_name.is_empty()
        && var_name.chars().all(|c| c.is_alphanumeric() || c == '_')
    {
        return std::env::var(var_name).map_err(|_| {
            Error::config(format!(
                "env var '{var_name}' not found (referenced as '{value}')"
            ))
        });
    }
    Ok(value.to_owned())
}

/// Generate a default TOML configuration template.
///
/// Parsing the output yields exactly the stock configuration.
#[must_use]
pub fn generate_default_config() -> String {
    String::from(
        r#"# Frog Devtools wallet connection configuration
# Values support environment variable references: "$VAR" or "${VAR}"

# ── Chains ──────────────────────────────────────────────────────────
# Keyed by numeric chain id, in priority order. Fields omitted here
# resolve from the built-in registry; ids outside the registry must set
# at least name and rpc_url.

[chains."1"]         # Ethereum
[chains."42161"]     # Arbitrum One
[chains."8453"]      # Base
[chains."84532"]     # Base Sepolia
[chains."666666666"] # Degen
[chains."10"]        # OP Mainnet
[chains."7777777"]   # Zora

# ── Connectors ──────────────────────────────────────────────────────

[[connectors]]
kind = "coinbase-wallet"
app_name = "Frog Devtools"
headless_mode = true

[[connectors]]
kind = "walletconnect"
# Override via WALLETCONNECT_PROJECT_ID or an env reference here.
project_id = "3fbb6bba6f1de962d911bb5b5c9dba88"
show_qr_modal = false

# ── Storage ─────────────────────────────────────────────────────────
# Connection state persists under the given key in the selected
# backend ("file" or "memory").

[storage]
backend = "file"
key = "frog"
# path = "frog-store.json"

# ── Transports ──────────────────────────────────────────────────────
# One entry per active chain. An empty table selects the chain's
# default public RPC endpoint; set url to override:
#
# [transports."1"]
# url = "https://eth.example.com"

[transports."1"]
[transports."42161"]
[transports."8453"]
[transports."84532"]
[transports."666666666"]
[transports."10"]
[transports."7777777"]
"#,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn default_template_parses_to_the_stock_config() {
        let config: Config = toml::from_str(&generate_default_config()).expect("valid template");
        assert_eq!(config, Config::default());
    }

    #[test]
    fn an_empty_file_is_the_stock_config() {
        let config: Config = toml::from_str("").expect("empty file");
        assert_eq!(config, Config::default());
    }

    #[test]
    fn load_config_reads_a_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.toml");
        let mut file = std::fs::File::create(&path).expect("create");
        file.write_all(generate_default_config().as_bytes())
            .expect("write");
        drop(file);

        let config = load_config(&path).expect("load");
        assert_eq!(config, Config::default());
    }

    #[test]
    fn load_config_missing_file_is_an_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let err = load_config(&dir.path().join("nope.toml")).expect_err("missing");
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn env_references_resolve() {
        assert_eq!(resolve_env("literal").expect("literal"), "literal");
        // "$" alone and "$not-a-var-name" pass through unchanged.
        assert_eq!(resolve_env("$").expect("bare dollar"), "$");
        assert_eq!(
            resolve_env("$not-a-var").expect("invalid name"),
            "$not-a-var"
        );

        let path = std::env::var("PATH").expect("PATH is set in test environments");
        assert_eq!(resolve_env("$PATH").expect("dollar form"), path);
        assert_eq!(resolve_env("${PATH}").expect("braced form"), path);

        assert!(resolve_env("${FROG_CONNECT_TEST_UNSET_VAR}").is_err());
    }
}
