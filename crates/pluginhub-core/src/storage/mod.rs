//! # Pluginhub Storage
//!
//! File access and the persisted option store.
//!
//! - [`provider`] / [`local`]: the [`StorageProvider`] abstraction over a
//!   directory tree and its local filesystem implementation.
//! - [`config`]: format-agnostic [`ConfigData`] (JSON, TOML, YAML) and the
//!   installation [`HubSettings`].
//! - [`option`]: the [`OptionStore`] consulted by plugins and serializers,
//!   with in-memory and file-backed implementations.
pub mod provider;
pub mod local;
pub mod config;
pub mod option;
pub mod error;

/// Re-export key types
pub use provider::StorageProvider;
pub use local::LocalStorageProvider;
pub use config::{ConfigData, ConfigFormat, HubSettings};
pub use option::{FileOptionStore, MemoryOptionStore, OptionScope, OptionStore};
pub use error::StorageSystemError;
