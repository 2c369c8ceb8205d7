//! # Pluginhub Plugin System Errors
//!
//! Defines [`PluginSystemError`]: manifest parsing and validation failures,
//! registry conflicts, failures raised by plugin code, and the
//! [`NotImplemented`](PluginSystemError::NotImplemented) signal a plugin
//! returns for a capability it advertises but does not provide.
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum PluginSystemError {
    #[error("Plugin '{plugin_id}' does not implement '{feature}'")]
    NotImplemented {
        plugin_id: String,
        feature: String,
    },

    #[error("Plugin manifest error for '{path}': {message}")]
    ManifestError {
        path: PathBuf,
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Plugin registration error for '{plugin_id}': {message}")]
    RegistrationError {
        plugin_id: String,
        message: String,
    },

    #[error("Plugin '{plugin_id}' not found")]
    NotFound { plugin_id: String },

    #[error("Operation error in plugin '{plugin_id}': {message}", plugin_id = .plugin_id.as_deref().unwrap_or("<unknown>"))]
    OperationError {
        plugin_id: Option<String>,
        message: String,
    },
}

impl PluginSystemError {
    pub fn not_implemented(plugin_id: impl Into<String>, feature: impl Into<String>) -> Self {
        PluginSystemError::NotImplemented {
            plugin_id: plugin_id.into(),
            feature: feature.into(),
        }
    }
}
