//! # Pluginhub Plugin System
//!
//! The plugin object model consumed by the serializers.
//!
//! ## Key Submodules and Responsibilities:
//!
//! - **[`traits`]**: the [`Plugin`] trait. Identity is mandatory, everything
//!   else has a default, and optional capabilities
//!   ([`ReleaseDocRenderer`], [`Testable`], custom contexts) are reached
//!   through `Option` accessors that callers check before use.
//! - **[`config_field`]**: [`RawConfigField`], a plugin's declaration of one
//!   configuration input.
//! - **[`context`]**: the [`Project`] and [`User`] a plugin is evaluated for.
//! - **[`manifest`]**: the declarative [`PluginManifest`] and the
//!   [`ManifestPlugin`] implementing [`Plugin`] on top of it.
//! - **[`loader`]**: discovers manifests on disk.
//! - **[`registry`]**: the [`PluginRegistry`] of known plugins.
//! - **[`error`]**: [`PluginSystemError`](error::PluginSystemError).
pub mod config_field;
pub mod context;
pub mod error;
pub mod loader;
pub mod manifest;
pub mod registry;
pub mod traits;

pub use config_field::RawConfigField;
pub use context::{Project, User};
pub use error::PluginSystemError;
pub use loader::ManifestLoader;
pub use manifest::{ManifestPlugin, PluginManifest};
pub use registry::PluginRegistry;
pub use traits::{
    CustomContext, FeatureDescription, FeatureGate, Plugin, PluginStatus, PluginType, ReleaseDocRenderer,
    Testable,
};
