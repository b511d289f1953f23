//! Unified error types for the crate.

use thiserror::Error as ThisError;

/// Top-level error type.
#[derive(Debug, ThisError)]
pub enum Error {
    /// Configuration file could not be resolved, read, or parsed, or an
    /// environment reference could not be resolved.
    #[error("config: {0}")]
    Config(String),

    /// Chain set validation or chain resolution failed.
    #[error("chain: {0}")]
    Chain(String),

    /// Connector validation failed.
    #[error("connector: {0}")]
    Connector(String),

    /// Storage backend I/O or (de)serialisation failed.
    #[error("storage: {0}")]
    Storage(String),

    /// Transport map validation failed.
    #[error("transport: {0}")]
    Transport(String),
}

impl Error {
    /// Creates a [`Error::Config`] from a message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Creates a [`Error::Config`] from a message and a source error.
    pub fn config_with(msg: impl Into<String>, err: impl std::fmt::Display) -> Self {
        Self::Config(format!("{}: {err}", msg.into()))
    }

    /// Creates a [`Error::Chain`] from a message.
    pub fn chain(msg: impl Into<String>) -> Self {
        Self::Chain(msg.into())
    }

    /// Creates a [`Error::Connector`] from a message.
    pub fn connector(msg: impl Into<String>) -> Self {
        Self::Connector(msg.into())
    }

    /// Creates a [`Error::Storage`] from a message.
    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }

    /// Creates a [`Error::Storage`] from a message and a source error.
    pub fn storage_with(msg: impl Into<String>, err: impl std::fmt::Display) -> Self {
        Self::Storage(format!("{}: {err}", msg.into()))
    }

    /// Creates a [`Error::Transport`] from a message.
    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }
}
