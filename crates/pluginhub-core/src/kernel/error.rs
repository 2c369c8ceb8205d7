//! # Pluginhub Core Errors
//!
//! Defines the crate-wide error type.
//!
//! Every subsystem owns a typed error enum ([`EventSystemError`],
//! [`PluginSystemError`], [`StorageSystemError`], [`SerializerError`]) and
//! each of them converts into [`Error`] with `?`. Callers at the edge (the
//! CLI, an HTTP handler) only ever deal with [`Error`] and its `Display`
//! chain.
use std::path::PathBuf;
use std::result::Result as StdResult;

use crate::event::error::EventSystemError;
use crate::plugin_system::error::PluginSystemError;
use crate::serializer::error::SerializerError;
use crate::storage::error::StorageSystemError;
use thiserror::Error as ThisError;

/// Error type for every pluginhub operation
#[derive(Debug, ThisError)]
pub enum Error {
    /// Specific, typed plugin system error
    #[error("Plugin system error: {0}")]
    PluginSystem(#[from] PluginSystemError),

    /// Specific, typed storage system error
    #[error("Storage system error: {0}")]
    StorageSystem(#[from] StorageSystemError),

    /// Analytics event system error
    #[error("Event system error: {0}")]
    EventSystem(#[from] EventSystemError),

    /// View-model serialization error
    #[error("Serializer error: {0}")]
    Serializer(#[from] SerializerError),

    /// Generic error with message
    #[error("Error: {0}")]
    Other(String),
}

/// Shorthand for Result with our Error type
pub type Result<T> = StdResult<T, Error>;

impl Error {
    /// Wrap an I/O failure together with the operation and path it happened on.
    pub fn io(source: std::io::Error, operation: impl Into<String>, path: PathBuf) -> Self {
        Error::StorageSystem(StorageSystemError::io(source, operation, path))
    }

    /// True when this is the plugin "not implemented" signal.
    pub fn is_not_implemented(&self) -> bool {
        matches!(
            self,
            Error::PluginSystem(PluginSystemError::NotImplemented { .. })
        )
    }
}

impl From<&str> for Error {
    fn from(msg: &str) -> Self {
        Error::Other(msg.to_string())
    }
}

impl From<String> for Error {
    fn from(msg: String) -> Self {
        Error::Other(msg)
    }
}
