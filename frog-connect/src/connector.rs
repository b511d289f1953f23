//! Wallet connector configuration.
//!
//! Two connection strategies are supported, mirroring the stock devtools
//! setup: an in-app wallet connector identified by an application name,
//! and a relay-based connector authenticated by a project identifier.

use serde::{Deserialize, Serialize};

use crate::config::resolve_env;
use crate::error::Error;

/// Application name the in-app wallet connector reports by default.
pub const DEFAULT_APP_NAME: &str = "Frog Devtools";

/// Stock relay project identifier, kept for behavioural parity with the
/// original deployment. Override via [`PROJECT_ID_ENV`] or an env
/// reference in the config file.
pub const DEFAULT_PROJECT_ID: &str = "3fbb6bba6f1de962d911bb5b5c9dba88";

/// Environment variable consulted for the relay project identifier.
pub const PROJECT_ID_ENV: &str = "WALLETCONNECT_PROJECT_ID";

const fn default_true() -> bool {
    true
}

fn default_project_id() -> String {
    std::env::var(PROJECT_ID_ENV)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_PROJECT_ID.to_owned())
}

/// Options for the in-app wallet connector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoinbaseWalletOptions {
    /// Application name shown to the wallet.
    pub app_name: String,
    /// Suppress the connector's embedded connection UI; the consuming
    /// application renders its own (default: true).
    #[serde(default = "default_true")]
    pub headless_mode: bool,
}

impl Default for CoinbaseWalletOptions {
    fn default() -> Self {
        Self {
            app_name: DEFAULT_APP_NAME.to_owned(),
            headless_mode: true,
        }
    }
}

/// Options for the relay-based connector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalletConnectOptions {
    /// Project identifier used to authenticate against the relay
    /// service. Supports `$VAR` / `${VAR}` environment references.
    #[serde(default = "default_project_id")]
    pub project_id: String,
    /// Show the connector's own QR-code modal. The stock setup keeps
    /// this off and renders its own (default: false).
    #[serde(default)]
    pub show_qr_modal: bool,
}

impl Default for WalletConnectOptions {
    fn default() -> Self {
        Self {
            project_id: default_project_id(),
            show_qr_modal: false,
        }
    }
}

impl WalletConnectOptions {
    /// Resolves the configured project identifier, expanding `$VAR` /
    /// `${VAR}` environment references.
    ///
    /// # Errors
    ///
    /// Returns an error if the value references an environment variable
    /// that is not set.
    pub fn resolved_project_id(&self) -> Result<String, Error> {
        resolve_env(&self.project_id)
    }
}

/// One way of establishing a wallet connection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum ConnectorConfig {
    /// In-app wallet connector.
    CoinbaseWallet(CoinbaseWalletOptions),
    /// Relay-based connector.
    #[serde(rename = "walletconnect")]
    WalletConnect(WalletConnectOptions),
}

impl ConnectorConfig {
    /// The connector's config-file tag.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::CoinbaseWallet(_) => "coinbase-wallet",
            Self::WalletConnect(_) => "walletconnect",
        }
    }

    /// The stock connector pair, in priority order.
    #[must_use]
    pub fn default_set() -> Vec<Self> {
        vec![
            Self::CoinbaseWallet(CoinbaseWalletOptions::default()),
            Self::WalletConnect(WalletConnectOptions::default()),
        ]
    }
}
