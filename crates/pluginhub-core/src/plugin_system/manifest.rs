use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::kernel::error::Result;
use crate::plugin_system::config_field::RawConfigField;
use crate::plugin_system::context::{Project, User};
use crate::plugin_system::error::PluginSystemError;
use crate::plugin_system::traits::{
    CustomContext, FeatureDescription, Plugin, PluginStatus, PluginType, ReleaseDocRenderer, Testable,
};

/// Placeholder substituted in `release_doc` templates
pub const WEBHOOK_URL_PLACEHOLDER: &str = "{webhook_url}";

fn default_true() -> bool {
    true
}

/// Represents a plugin manifest that describes a plugin declaratively
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PluginManifest {
    /// Unique identifier for the plugin
    pub slug: String,

    /// Human-readable name
    pub title: String,

    /// Short name shown in compact lists
    #[serde(default)]
    pub short_title: Option<String>,

    #[serde(default, rename = "type")]
    pub plugin_type: PluginType,

    #[serde(default)]
    pub status: PluginStatus,

    /// Installation-wide switch
    #[serde(default = "default_true")]
    pub enabled: bool,

    #[serde(default = "default_true")]
    pub can_disable: bool,

    #[serde(default)]
    pub project_default_enabled: bool,

    #[serde(default)]
    pub hidden: bool,

    #[serde(default)]
    pub metadata: Map<String, Value>,

    #[serde(default)]
    pub assets: Vec<String>,

    #[serde(default)]
    pub asset_key: Option<String>,

    /// Semver version string
    #[serde(default)]
    pub version: Option<String>,

    #[serde(default)]
    pub author: Option<String>,

    #[serde(default)]
    pub author_url: Option<String>,

    #[serde(default)]
    pub description: Option<String>,

    /// `[title, url]` pairs
    #[serde(default)]
    pub resource_links: Vec<(String, String)>,

    #[serde(default)]
    pub features: Vec<FeatureDescription>,

    /// Prefix prepended to feature gates to form frontend flag names
    #[serde(default)]
    pub feature_flag_prefix: Option<String>,

    #[serde(default)]
    pub config: Vec<RawConfigField>,

    /// Config fields only offered when the caller asks for additional fields
    #[serde(default)]
    pub additional_config: Vec<RawConfigField>,

    /// Defaults to "has any config field"
    #[serde(default)]
    pub has_project_conf: Option<bool>,

    /// HTML template for release webhook docs; `{webhook_url}` is substituted
    #[serde(default)]
    pub release_doc: Option<String>,

    /// Declares the test capability when present
    #[serde(default)]
    pub testable: Option<bool>,

    /// Declares the custom context capability when present
    #[serde(default)]
    pub contexts: Option<Vec<String>>,
}

impl PluginManifest {
    /// Create a minimal manifest
    pub fn new(slug: &str, title: &str) -> Self {
        Self {
            slug: slug.to_string(),
            title: title.to_string(),
            short_title: None,
            plugin_type: PluginType::Default,
            status: PluginStatus::Unknown,
            enabled: true,
            can_disable: true,
            project_default_enabled: false,
            hidden: false,
            metadata: Map::new(),
            assets: Vec::new(),
            asset_key: None,
            version: None,
            author: None,
            author_url: None,
            description: None,
            resource_links: Vec::new(),
            features: Vec::new(),
            feature_flag_prefix: None,
            config: Vec::new(),
            additional_config: Vec::new(),
            has_project_conf: None,
            release_doc: None,
            testable: None,
            contexts: None,
        }
    }

    /// Add a configuration field
    pub fn add_config_field(&mut self, field: RawConfigField) -> &mut Self {
        self.config.push(field);
        self
    }

    /// Add a described feature
    pub fn add_feature(&mut self, feature_gate: &str, description: &str) -> &mut Self {
        self.features.push(FeatureDescription::new(feature_gate, description));
        self
    }

    /// Add a resource link
    pub fn add_resource_link(&mut self, title: &str, url: &str) -> &mut Self {
        self.resource_links.push((title.to_string(), url.to_string()));
        self
    }

    /// Check the invariants serde cannot express. `path` is only used for error reporting.
    pub fn validate(&self, path: &Path) -> std::result::Result<(), PluginSystemError> {
        let invalid = |message: String| PluginSystemError::ManifestError {
            path: path.to_path_buf(),
            message,
            source: None,
        };

        if self.slug.trim().is_empty() {
            return Err(invalid("slug must not be empty".to_string()));
        }
        if self.title.trim().is_empty() {
            return Err(invalid(format!("title of '{}' must not be empty", self.slug)));
        }

        if let Some(version) = self.version.as_deref() {
            semver::Version::parse(version).map_err(|e| PluginSystemError::ManifestError {
                path: path.to_path_buf(),
                message: format!("invalid version '{}': {}", version, e),
                source: Some(Box::new(e)),
            })?;
        }

        let mut seen = HashSet::new();
        for field in self.config.iter().chain(self.additional_config.iter()) {
            if field.name.trim().is_empty() {
                return Err(invalid("config field name must not be empty".to_string()));
            }
            if !seen.insert(field.name.as_str()) {
                return Err(invalid(format!("duplicate config field '{}'", field.name)));
            }
        }

        Ok(())
    }
}

/// A [`Plugin`] driven entirely by its [`PluginManifest`]
#[derive(Debug, Clone)]
pub struct ManifestPlugin {
    manifest: PluginManifest,
}

impl ManifestPlugin {
    pub fn new(manifest: PluginManifest) -> Self {
        Self { manifest }
    }

    pub fn manifest(&self) -> &PluginManifest {
        &self.manifest
    }
}

impl Plugin for ManifestPlugin {
    fn slug(&self) -> &str {
        &self.manifest.slug
    }

    fn title(&self) -> &str {
        &self.manifest.title
    }

    fn short_title(&self) -> &str {
        self.manifest.short_title.as_deref().unwrap_or(&self.manifest.title)
    }

    fn plugin_type(&self) -> PluginType {
        self.manifest.plugin_type
    }

    fn enabled(&self) -> bool {
        self.manifest.enabled
    }

    fn can_disable(&self) -> bool {
        self.manifest.can_disable
    }

    fn project_default_enabled(&self) -> bool {
        self.manifest.project_default_enabled
    }

    fn is_hidden(&self) -> bool {
        self.manifest.hidden
    }

    fn metadata(&self) -> Map<String, Value> {
        self.manifest.metadata.clone()
    }

    fn status(&self) -> PluginStatus {
        self.manifest.status
    }

    fn assets(&self) -> Vec<String> {
        self.manifest.assets.clone()
    }

    fn asset_key(&self) -> Option<&str> {
        self.manifest.asset_key.as_deref()
    }

    fn version(&self) -> Option<&str> {
        self.manifest.version.as_deref()
    }

    fn author(&self) -> Option<&str> {
        self.manifest.author.as_deref()
    }

    fn author_url(&self) -> Option<&str> {
        self.manifest.author_url.as_deref()
    }

    fn description(&self) -> Option<&str> {
        self.manifest.description.as_deref()
    }

    fn resource_links(&self) -> Vec<(String, String)> {
        self.manifest.resource_links.clone()
    }

    fn feature_descriptions(&self) -> Vec<FeatureDescription> {
        self.manifest.features.clone()
    }

    fn feature_flag_name(&self, feature_gate: &str) -> String {
        match self.manifest.feature_flag_prefix.as_deref() {
            Some(prefix) => format!("{}{}", prefix, feature_gate),
            None => feature_gate.to_string(),
        }
    }

    fn has_project_conf(&self) -> bool {
        self.manifest
            .has_project_conf
            .unwrap_or(!self.manifest.config.is_empty())
    }

    fn get_config(
        &self,
        _project: Option<&Project>,
        _user: Option<&User>,
        add_additional_fields: bool,
    ) -> Result<Vec<RawConfigField>> {
        let mut fields = self.manifest.config.clone();
        if add_additional_fields {
            fields.extend(self.manifest.additional_config.iter().cloned());
        }
        Ok(fields)
    }

    fn release_doc_renderer(&self) -> Option<&dyn ReleaseDocRenderer> {
        Some(self)
    }

    fn testable(&self) -> Option<&dyn Testable> {
        self.manifest.testable.map(|_| self as &dyn Testable)
    }

    fn custom_contexts(&self) -> Option<Vec<CustomContext>> {
        self.manifest
            .contexts
            .as_ref()
            .map(|contexts| contexts.iter().map(CustomContext::new).collect())
    }
}

impl ReleaseDocRenderer for ManifestPlugin {
    fn release_doc_html(&self, webhook_url: &str) -> Result<String> {
        match self.manifest.release_doc.as_deref() {
            Some(template) => Ok(template.replace(WEBHOOK_URL_PLACEHOLDER, webhook_url)),
            None => Err(PluginSystemError::not_implemented(&self.manifest.slug, "release_doc_html").into()),
        }
    }
}

impl Testable for ManifestPlugin {
    fn is_testable(&self) -> bool {
        self.manifest.testable.unwrap_or(false)
    }
}
