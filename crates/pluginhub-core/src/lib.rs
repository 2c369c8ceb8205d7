pub mod event;
pub mod kernel;
pub mod plugin_system;
pub mod serializer;
pub mod storage;
pub mod utils;

// Re-export key public types for the binary and embedders
pub use event::{AnalyticsEvent, EventRegistry, RecordedEvent};
pub use kernel::error::{Error, Result};
pub use plugin_system::{ManifestLoader, Plugin, PluginManifest, PluginRegistry, Project, User};
pub use serializer::{ModelSerializer, PluginSerializer, PluginViewModel, PluginWithConfigSerializer, SerializerContext};
pub use storage::{FileOptionStore, HubSettings, LocalStorageProvider, OptionScope, OptionStore, StorageProvider};

#[cfg(test)]
mod tests;
