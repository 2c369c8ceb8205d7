use serde::Serialize;
use serde_json::{Map, Value};

use crate::plugin_system::traits::{PluginStatus, PluginType};

/// JSON view of a plugin, as returned by the plugin API endpoints.
///
/// `Option` fields marked `skip_serializing_if` are absent from the output
/// when `None`; they are never rendered as `null`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PluginViewModel {
    pub id: String,
    pub name: String,
    pub slug: String,
    pub short_name: String,
    #[serde(rename = "type")]
    pub plugin_type: PluginType,
    pub can_disable: bool,
    pub is_testable: bool,
    pub has_configuration: bool,
    pub metadata: Map<String, Value>,
    pub contexts: Vec<String>,
    pub status: PluginStatus,
    pub assets: Vec<AssetView>,
    pub doc: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<AuthorView>,
    pub is_hidden: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub features: Vec<String>,
    pub feature_descriptions: Vec<FeatureDescriptionView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_links: Option<Vec<ResourceLinkView>>,
    /// Only set by the configured serializer
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config: Option<Vec<NormalizedConfigField>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssetView {
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthorView {
    pub name: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureDescriptionView {
    pub description: String,
    pub feature_gate: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResourceLinkView {
    pub title: String,
    pub url: String,
}

/// JSON view of one configuration field.
///
/// All keys are always present (`help`, `placeholder`, `choices` and
/// `defaultValue` as `null` when unset) except the stored-value pair, see
/// [`StoredValue`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedConfigField {
    pub name: String,
    pub label: String,
    #[serde(rename = "type")]
    pub field_type: String,
    pub required: bool,
    pub help: Option<String>,
    pub placeholder: Option<String>,
    pub choices: Option<Value>,
    pub readonly: bool,
    pub default_value: Option<Value>,
    #[serde(flatten)]
    pub stored: StoredValue,
}

impl NormalizedConfigField {
    pub fn is_secret(&self) -> bool {
        matches!(self.stored, StoredValue::Secret { .. })
    }
}

/// Exactly one of `value` (plain fields) or `hasSavedValue` + `prefix`
/// (secret fields) is emitted.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum StoredValue {
    Plain {
        value: Option<Value>,
    },
    Secret {
        #[serde(rename = "hasSavedValue")]
        has_saved_value: bool,
        prefix: String,
    },
}
