//! # Pluginhub Serializer Errors
//!
//! Failures raised by the collaborators the view-model serializers call
//! out to: asset URL resolution and release webhook URL construction.
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SerializerError {
    #[error("Cannot resolve asset '{asset}' for '{module}': {reason}")]
    AssetResolution {
        module: String,
        asset: String,
        reason: String,
    },

    #[error("Cannot build release webhook URL for plugin '{plugin_id}': {reason}")]
    WebhookUrl { plugin_id: String, reason: String },
}
