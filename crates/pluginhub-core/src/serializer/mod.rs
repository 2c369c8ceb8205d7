//! # Pluginhub Serializers
//!
//! Turns [`Plugin`](crate::plugin_system::Plugin)s into the JSON view models
//! served by the plugin API.
//!
//! - [`PluginSerializer`] builds the base [`PluginViewModel`].
//! - [`PluginWithConfigSerializer`] adds the normalized `config` list, one
//!   [`NormalizedConfigField`] per field descriptor (see [`serialize_field`]).
//! - [`SerializerContext`] bundles the collaborators both need: the
//!   [`OptionStore`](crate::storage::OptionStore), a [`WebhookUrlBuilder`]
//!   and an [`AssetUrlResolver`].
//!
//! Optional view-model keys are omitted rather than emitted as `null`.
pub mod context;
pub mod error;
pub mod field;
pub mod plugin;
pub mod view_model;

pub use context::{
    AssetUrlResolver, ReleaseWebhookUrlBuilder, SerializerContext, StaticAssetResolver, WebhookUrlBuilder,
};
pub use error::SerializerError;
pub use field::{default_label, serialize_field};
pub use plugin::{ModelSerializer, PluginSerializer, PluginWithConfigSerializer};
pub use view_model::{
    AssetView, AuthorView, FeatureDescriptionView, NormalizedConfigField, PluginViewModel, ResourceLinkView,
    StoredValue,
};

#[cfg(test)]
mod tests;
