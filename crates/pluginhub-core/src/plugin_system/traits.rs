use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::kernel::constants::ENABLED_OPTION_SUFFIX;
use crate::kernel::error::Result;
use crate::plugin_system::config_field::RawConfigField;
use crate::plugin_system::context::{Project, User};
use crate::storage::option::{OptionScope, OptionStore};

/// Broad category a plugin belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PluginType {
    #[default]
    Default,
    Notification,
    IssueTracking,
    DataForwarding,
    Release,
}

impl fmt::Display for PluginType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PluginType::Default => "default",
            PluginType::Notification => "notification",
            PluginType::IssueTracking => "issue-tracking",
            PluginType::DataForwarding => "data-forwarding",
            PluginType::Release => "release",
        };
        write!(f, "{}", name)
    }
}

/// Maturity of a plugin
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PluginStatus {
    #[default]
    Unknown,
    Beta,
    Stable,
}

/// Identifier of a feature gate
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeatureGate(String);

impl FeatureGate {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn value(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FeatureGate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A feature a plugin advertises, gated by [`FeatureGate`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureDescription {
    #[serde(rename = "featureGate", alias = "feature_gate")]
    pub feature_gate: FeatureGate,
    pub description: String,
}

impl FeatureDescription {
    pub fn new(feature_gate: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            feature_gate: FeatureGate::new(feature_gate),
            description: description.into(),
        }
    }
}

/// Custom event context a plugin contributes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomContext {
    #[serde(rename = "type")]
    pub context_type: String,
}

impl CustomContext {
    pub fn new(context_type: impl Into<String>) -> Self {
        Self {
            context_type: context_type.into(),
        }
    }
}

/// Capability: render setup docs for the release webhook
pub trait ReleaseDocRenderer: Send + Sync {
    /// Render HTML docs for `webhook_url`.
    ///
    /// Returning [`PluginSystemError::NotImplemented`](crate::plugin_system::error::PluginSystemError::NotImplemented)
    /// means "no docs"; any other error is a real failure.
    fn release_doc_html(&self, webhook_url: &str) -> Result<String>;
}

/// Capability: the plugin can be exercised with a test notification
pub trait Testable: Send + Sync {
    fn is_testable(&self) -> bool;
}

/// Core trait that all plugins must implement.
///
/// Only identity is mandatory; every other accessor has a default. Optional
/// capabilities are exposed as `Option<...>` accessors which callers must
/// check before use.
pub trait Plugin: Send + Sync {
    /// Unique identifier. May be empty for legacy plugins, in which case the
    /// serializer derives one from the title.
    fn slug(&self) -> &str;

    /// Human-readable name
    fn title(&self) -> &str;

    fn short_title(&self) -> &str {
        self.title()
    }

    fn plugin_type(&self) -> PluginType {
        PluginType::Default
    }

    /// Installation-wide switch; a globally disabled plugin is never enabled for a project
    fn enabled(&self) -> bool {
        true
    }

    fn can_disable(&self) -> bool {
        true
    }

    /// Whether the plugin can be toggled per project at all
    fn can_enable_for_projects(&self) -> bool {
        true
    }

    /// Enabled state used when a project never toggled the plugin
    fn project_default_enabled(&self) -> bool {
        false
    }

    /// Enabled state of the plugin, optionally scoped to a project.
    fn is_enabled(&self, project: Option<&Project>, options: &dyn OptionStore) -> Result<bool> {
        if !self.enabled() {
            return Ok(false);
        }
        if !self.can_disable() || !self.can_enable_for_projects() {
            return Ok(true);
        }
        match project {
            Some(project) => {
                let stored = self.get_option(ENABLED_OPTION_SUFFIX, Some(project), options)?;
                Ok(match stored {
                    Some(Value::Bool(enabled)) => enabled,
                    _ => self.project_default_enabled(),
                })
            }
            None => Ok(true),
        }
    }

    fn is_hidden(&self) -> bool {
        false
    }

    fn metadata(&self) -> Map<String, Value> {
        Map::new()
    }

    fn status(&self) -> PluginStatus {
        PluginStatus::Unknown
    }

    /// Static asset file names, resolved relative to [`Plugin::asset_key`] or the slug
    fn assets(&self) -> Vec<String> {
        Vec::new()
    }

    fn asset_key(&self) -> Option<&str> {
        None
    }

    fn version(&self) -> Option<&str> {
        None
    }

    fn author(&self) -> Option<&str> {
        None
    }

    fn author_url(&self) -> Option<&str> {
        None
    }

    fn description(&self) -> Option<&str> {
        None
    }

    /// Ordered `(title, url)` pairs
    fn resource_links(&self) -> Vec<(String, String)> {
        Vec::new()
    }

    fn feature_descriptions(&self) -> Vec<FeatureDescription> {
        Vec::new()
    }

    /// Map a feature gate value to the flag name the frontend checks
    fn feature_flag_name(&self, feature_gate: &str) -> String {
        feature_gate.to_string()
    }

    fn has_project_conf(&self) -> bool {
        false
    }

    /// Ordered configuration field descriptors for a project/user context
    fn get_config(
        &self,
        _project: Option<&Project>,
        _user: Option<&User>,
        _add_additional_fields: bool,
    ) -> Result<Vec<RawConfigField>> {
        Ok(Vec::new())
    }

    /// Prefix namespacing this plugin's option keys
    fn option_prefix(&self) -> &str {
        self.slug()
    }

    /// Stored value of option `key`, scoped to `project` (global when `None`)
    fn get_option(&self, key: &str, project: Option<&Project>, options: &dyn OptionStore) -> Result<Option<Value>> {
        let scope = match project {
            Some(project) => project.option_scope(),
            None => OptionScope::Global,
        };
        options.get_value(&scope, &format!("{}:{}", self.option_prefix(), key))
    }

    /// Optional capability: release webhook documentation
    fn release_doc_renderer(&self) -> Option<&dyn ReleaseDocRenderer> {
        None
    }

    /// Optional capability: test notifications
    fn testable(&self) -> Option<&dyn Testable> {
        None
    }

    /// Optional capability: custom event contexts
    fn custom_contexts(&self) -> Option<Vec<CustomContext>> {
        None
    }
}

impl fmt::Debug for dyn Plugin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Plugin")
            .field("slug", &self.slug())
            .field("title", &self.title())
            .finish()
    }
}
