//! Wallet connection configuration for Frog Devtools.
//!
//! This crate assembles the two shared values the devtools UI is wired
//! with: an immutable [`ConnectionConfig`] (active chains, wallet
//! connectors, storage binding, per-chain transports) and a
//! [`CacheClient`] for data-fetching call sites. Both are built once at
//! startup and passed on explicitly.
//!
//! ```
//! let (config, cache) = frog_connect::defaults().expect("stock configuration is valid");
//! assert_eq!(config.chains().len(), 7);
//! drop(cache);
//! ```
//!
//! Deployments override the stock setup through a TOML file
//! ([`config::load_config`]) with `$VAR` / `${VAR}` environment
//! references, or programmatically through
//! [`ConnectionConfig::builder`].

pub mod cache;
pub mod chain;
pub mod config;
pub mod connection;
pub mod connector;
pub mod error;
pub mod storage;
pub mod telemetry;
pub mod transport;

pub use cache::CacheClient;
pub use chain::{Chain, ChainId};
pub use config::{Config, load_config};
pub use connection::{ConnectionConfig, ConnectionConfigBuilder, defaults};
pub use connector::ConnectorConfig;
pub use error::Error;
pub use storage::{Storage, StorageSettings};
pub use transport::Transport;
