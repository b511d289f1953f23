//! Immutable wallet-connection configuration and its builder.
//!
//! [`ConnectionConfig`] is the composed result of four inputs: the
//! active chain set, the connector sequence, a storage binding, and the
//! per-chain transport map. [`ConnectionConfigBuilder::build`] validates
//! the combination and is pure in-memory assembly — no network, no
//! filesystem. Share the result via `Arc`; it never changes after
//! construction.

use serde::Serialize;

use crate::cache::CacheClient;
use crate::chain::{Chain, ChainId};
use crate::config::Config;
use crate::connector::ConnectorConfig;
use crate::error::Error;
use crate::storage::StorageSettings;
use crate::transport::{Transport, TransportsConfig};
use url::Url;

/// Composed wallet-connection configuration.
///
/// Two configurations built from the same inputs compare equal.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConnectionConfig {
    chains: Vec<Chain>,
    connectors: Vec<ConnectorConfig>,
    storage: StorageSettings,
    transports: TransportsConfig,
}

impl ConnectionConfig {
    /// Starts building a configuration from scratch.
    #[must_use]
    pub fn builder() -> ConnectionConfigBuilder {
        ConnectionConfigBuilder::default()
    }

    /// Builds a configuration from a parsed [`Config`] file.
    ///
    /// # Errors
    ///
    /// Returns an error if validation fails; see
    /// [`ConnectionConfigBuilder::build`].
    pub fn from_config(config: &Config) -> Result<Self, Error> {
        Self::builder()
            .chains(config.chains.iter().cloned())
            .connectors(config.connectors.iter().cloned())
            .storage(config.storage.clone())
            .transports(config.transports.iter().cloned())
            .build()
    }

    /// The active chain set, in priority order.
    #[must_use]
    pub fn chains(&self) -> &[Chain] {
        &self.chains
    }

    /// Looks up an active chain by identifier.
    #[must_use]
    pub fn chain(&self, id: ChainId) -> Option<&Chain> {
        self.chains.iter().find(|chain| chain.id == id)
    }

    /// The connector sequence, in priority order.
    #[must_use]
    pub fn connectors(&self) -> &[ConnectorConfig] {
        &self.connectors
    }

    /// The storage binding.
    #[must_use]
    pub fn storage(&self) -> &StorageSettings {
        &self.storage
    }

    /// The transport map.
    #[must_use]
    pub fn transports(&self) -> &TransportsConfig {
        &self.transports
    }

    /// The RPC endpoint an active chain is reached at, after applying
    /// any transport override.
    #[must_use]
    pub fn endpoint(&self, id: ChainId) -> Option<Url> {
        let chain = self.chain(id)?;
        let transport = self.transports.get(id)?;
        Some(transport.endpoint(chain))
    }
}

/// Builder for [`ConnectionConfig`].
#[derive(Debug, Clone, Default)]
pub struct ConnectionConfigBuilder {
    chains: Vec<Chain>,
    connectors: Vec<ConnectorConfig>,
    storage: Option<StorageSettings>,
    transports: Vec<(ChainId, Transport)>,
}

impl ConnectionConfigBuilder {
    /// Appends one chain to the active set.
    #[must_use]
    pub fn chain(mut self, chain: Chain) -> Self {
        self.chains.push(chain);
        self
    }

    /// Appends chains to the active set.
    #[must_use]
    pub fn chains(mut self, chains: impl IntoIterator<Item = Chain>) -> Self {
        self.chains.extend(chains);
        self
    }

    /// Appends one connector.
    #[must_use]
    pub fn connector(mut self, connector: ConnectorConfig) -> Self {
        self.connectors.push(connector);
        self
    }

    /// Appends connectors.
    #[must_use]
    pub fn connectors(mut self, connectors: impl IntoIterator<Item = ConnectorConfig>) -> Self {
        self.connectors.extend(connectors);
        self
    }

    /// Sets the storage binding. Unset, the stock binding applies.
    #[must_use]
    pub fn storage(mut self, storage: StorageSettings) -> Self {
        self.storage = Some(storage);
        self
    }

    /// Binds a transport to one chain.
    #[must_use]
    pub fn transport(mut self, id: ChainId, transport: Transport) -> Self {
        self.transports.push((id, transport));
        self
    }

    /// Appends transport bindings.
    #[must_use]
    pub fn transports(
        mut self,
        transports: impl IntoIterator<Item = (ChainId, Transport)>,
    ) -> Self {
        self.transports.extend(transports);
        self
    }

    /// Validates and assembles the configuration.
    ///
    /// # Errors
    ///
    /// - [`Error::Chain`] — empty chain set or duplicate chain id.
    /// - [`Error::Transport`] — a chain without a transport, or a
    ///   transport bound to a chain outside the active set.
    /// - [`Error::Connector`] — a relay connector whose project id is
    ///   empty after environment resolution.
    /// - [`Error::Config`] — an unresolvable environment reference.
    pub fn build(self) -> Result<ConnectionConfig, Error> {
        if self.chains.is_empty() {
            return Err(Error::chain("at least one chain must be configured"));
        }

        let mut seen = Vec::with_capacity(self.chains.len());
        for chain in &self.chains {
            if seen.contains(&chain.id) {
                return Err(Error::chain(format!("duplicate chain id {}", chain.id)));
            }
            seen.push(chain.id);
        }

        for chain in &self.chains {
            if !self.transports.iter().any(|(id, _)| *id == chain.id) {
                return Err(Error::transport(format!(
                    "no transport configured for chain {} ({})",
                    chain.id, chain.name
                )));
            }
        }
        for (id, _) in &self.transports {
            if !seen.contains(id) {
                return Err(Error::transport(format!(
                    "transport configured for chain {id}, which is not in the active set"
                )));
            }
        }

        for connector in &self.connectors {
            if let ConnectorConfig::WalletConnect(options) = connector {
                let project_id = options.resolved_project_id()?;
                if project_id.trim().is_empty() {
                    return Err(Error::connector(
                        "walletconnect project id must not be empty",
                    ));
                }
            }
        }

        tracing::debug!(
            chains = self.chains.len(),
            connectors = self.connectors.len(),
            "connection configuration assembled"
        );
        Ok(ConnectionConfig {
            chains: self.chains,
            connectors: self.connectors,
            storage: self.storage.unwrap_or_default(),
            transports: TransportsConfig(self.transports),
        })
    }
}

/// Builds the stock configuration and a cache client with the default
/// policy.
///
/// This is the composition root the rest of the application receives its
/// two shared values from; both are plain values to pass on explicitly,
/// not globals.
///
/// # Errors
///
/// Returns an error if the stock configuration fails validation, which
/// only happens when an environment override is malformed.
pub fn defaults() -> Result<(ConnectionConfig, CacheClient), Error> {
    let config = ConnectionConfig::from_config(&Config::default())?;
    Ok((config, CacheClient::new()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chain::{builtin, default_chains};
    use crate::connector::DEFAULT_PROJECT_ID;
    use crate::storage::StorageBackend;

    // Plain #[test]: building needs no async runtime, no HTTP client,
    // no filesystem.
    #[test]
    fn stock_configuration_is_valid_and_matches_the_deployment() {
        let (config, _cache) = defaults().expect("stock configuration");

        let ids: Vec<u64> = config.chains().iter().map(|c| c.id.0).collect();
        assert_eq!(ids, vec![1, 42_161, 8453, 84_532, 666_666_666, 10, 7_777_777]);

        // Transport keys cover the chain set exactly.
        let chain_ids: Vec<ChainId> = config.chains().iter().map(|c| c.id).collect();
        assert_eq!(config.transports().chain_ids(), chain_ids);

        // Connector pair with the deployed literals.
        assert_eq!(config.connectors().len(), 2);
        let ConnectorConfig::CoinbaseWallet(coinbase) = &config.connectors()[0] else {
            panic!("first connector must be the in-app wallet");
        };
        assert_eq!(coinbase.app_name, "Frog Devtools");
        assert!(coinbase.headless_mode);
        let ConnectorConfig::WalletConnect(walletconnect) = &config.connectors()[1] else {
            panic!("second connector must be the relay connector");
        };
        assert_eq!(walletconnect.project_id, DEFAULT_PROJECT_ID);
        assert!(!walletconnect.show_qr_modal);

        // Storage binds the local persistent backend under "frog".
        assert_eq!(config.storage().key, "frog");
        assert_eq!(config.storage().backend, StorageBackend::File);
    }

    #[test]
    fn two_builds_from_the_same_inputs_are_structurally_equal() {
        let (first, _) = defaults().expect("stock configuration");
        let (second, _) = defaults().expect("stock configuration");
        assert_eq!(first, second);
    }

    #[test]
    fn endpoints_resolve_through_transport_overrides() {
        let zora = builtin(ChainId::ZORA).expect("built in").clone();
        let base = builtin(ChainId::BASE).expect("built in").clone();
        let override_url = Url::parse("https://zora.example.com").expect("valid url");

        let config = ConnectionConfig::builder()
            .chain(zora)
            .chain(base)
            .transport(ChainId::ZORA, Transport::http_url(override_url.clone()))
            .transport(ChainId::BASE, Transport::http())
            .build()
            .expect("valid");

        assert_eq!(config.endpoint(ChainId::ZORA), Some(override_url));
        assert_eq!(
            config.endpoint(ChainId::BASE).map(String::from),
            Some("https://mainnet.base.org/".to_owned())
        );
        assert_eq!(config.endpoint(ChainId::ETHEREUM), None);
    }

    #[test]
    fn an_empty_chain_set_is_rejected() {
        let err = ConnectionConfig::builder().build().expect_err("invalid");
        assert!(matches!(err, Error::Chain(_)));
    }

    #[test]
    fn duplicate_chain_ids_are_rejected() {
        let mainnet = builtin(ChainId::ETHEREUM).expect("built in").clone();
        let err = ConnectionConfig::builder()
            .chain(mainnet.clone())
            .chain(mainnet)
            .transport(ChainId::ETHEREUM, Transport::http())
            .build()
            .expect_err("invalid");
        assert!(matches!(err, Error::Chain(_)));
    }

    #[test]
    fn a_chain_without_a_transport_is_rejected() {
        let err = ConnectionConfig::builder()
            .chains(default_chains().iter().cloned())
            .transports(
                default_chains()
                    .iter()
                    .skip(1)
                    .map(|chain| (chain.id, Transport::http())),
            )
            .build()
            .expect_err("invalid");
        assert!(matches!(err, Error::Transport(_)));
    }

    #[test]
    fn a_transport_for_an_inactive_chain_is_rejected() {
        let mainnet = builtin(ChainId::ETHEREUM).expect("built in").clone();
        let err = ConnectionConfig::builder()
            .chain(mainnet)
            .transport(ChainId::ETHEREUM, Transport::http())
            .transport(ChainId::ZORA, Transport::http())
            .build()
            .expect_err("invalid");
        assert!(matches!(err, Error::Transport(_)));
    }

    #[test]
    fn an_empty_relay_project_id_is_rejected() {
        use crate::connector::WalletConnectOptions;

        let mainnet = builtin(ChainId::ETHEREUM).expect("built in").clone();
        let err = ConnectionConfig::builder()
            .chain(mainnet)
            .transport(ChainId::ETHEREUM, Transport::http())
            .connector(ConnectorConfig::WalletConnect(WalletConnectOptions {
                project_id: "  ".to_owned(),
                show_qr_modal: false,
            }))
            .build()
            .expect_err("invalid");
        assert!(matches!(err, Error::Connector(_)));
    }
}
