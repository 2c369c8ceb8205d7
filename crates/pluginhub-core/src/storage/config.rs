use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::{Serialize, Deserialize};
use serde_json::Value;
#[cfg(feature = "yaml-config")]
use serde_yaml;
#[cfg(feature = "toml-config")]
use toml;

use crate::kernel::constants::{
    DEFAULT_BASE_URL, DEFAULT_OPTIONS_DIR, DEFAULT_PLUGINS_DIR, DEFAULT_STATIC_PREFIX,
};
use crate::kernel::error::Result;
use crate::storage::error::StorageSystemError;
use crate::storage::StorageProvider;

/// Supported configuration file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// JSON format (.json)
    Json,
    /// YAML format (.yaml, .yml) - requires "yaml-config" feature
    #[cfg(feature = "yaml-config")]
    Yaml,
    /// TOML format (.toml) - requires "toml-config" feature
    #[cfg(feature = "toml-config")]
    Toml,
}

impl ConfigFormat {
    /// Every format compiled into this build, in lookup order
    pub fn all() -> &'static [ConfigFormat] {
        &[
            ConfigFormat::Json,
            #[cfg(feature = "toml-config")]
            ConfigFormat::Toml,
            #[cfg(feature = "yaml-config")]
            ConfigFormat::Yaml,
        ]
    }

    /// Get the file extension for this format
    pub fn extension(&self) -> &'static str {
        match self {
            ConfigFormat::Json => "json",
            #[cfg(feature = "yaml-config")]
            ConfigFormat::Yaml => "yaml",
            #[cfg(feature = "toml-config")]
            ConfigFormat::Toml => "toml",
        }
    }

    /// Determine format from file extension
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(|ext| match ext.to_lowercase().as_str() {
                "json" => Some(ConfigFormat::Json),
                #[cfg(feature = "yaml-config")]
                "yaml" | "yml" => Some(ConfigFormat::Yaml),
                #[cfg(feature = "toml-config")]
                "toml" => Some(ConfigFormat::Toml),
                _ => None,
            })
    }
}

/// In-memory representation of configuration data
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConfigData {
    /// Raw configuration values
    #[serde(flatten)]
    values: HashMap<String, Value>,
}

impl ConfigData {
    /// Create a new empty configuration
    pub fn new() -> Self {
        Self {
            values: HashMap::new(),
        }
    }

    /// Create a configuration from a HashMap
    pub fn from_hashmap(values: HashMap<String, Value>) -> Self {
        Self { values }
    }

    /// Get a configuration value
    pub fn get<T: for<'de> Deserialize<'de>>(&self, key: &str) -> Option<T> {
        self.values.get(key)
            .and_then(|value| serde_json::from_value(value.clone()).ok())
    }

    /// Get a configuration value with default
    pub fn get_or<T: for<'de> Deserialize<'de>>(&self, key: &str, default: T) -> T {
        self.get(key).unwrap_or(default)
    }

    /// Get the raw JSON value stored under `key`
    pub fn get_value(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    /// Set a configuration value
    pub fn set<T: Serialize>(&mut self, key: &str, value: T) -> Result<()> {
        let json_value = serde_json::to_value(value).map_err(|e| StorageSystemError::SerializationError {
            format: "json".to_string(),
            source: Box::new(e),
        })?;
        self.values.insert(key.to_string(), json_value);
        Ok(())
    }

    /// Remove a configuration value
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.values.remove(key)
    }

    /// Check if key exists
    pub fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Get all keys
    pub fn keys(&self) -> Vec<String> {
        self.values.keys().cloned().collect()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Merge with another config, overriding existing values
    pub fn merge(&mut self, other: &ConfigData) {
        for (key, value) in &other.values {
            self.values.insert(key.clone(), value.clone());
        }
    }

    /// Serialize to string based on format
    pub fn serialize(&self, format: ConfigFormat) -> Result<String> {
        let serialized = match format {
            ConfigFormat::Json => serde_json::to_string_pretty(&self)
                .map_err(|e| serialization_error("json", e)),
            #[cfg(feature = "yaml-config")]
            ConfigFormat::Yaml => serde_yaml::to_string(&self)
                .map_err(|e| serialization_error("yaml", e)),
            #[cfg(feature = "toml-config")]
            ConfigFormat::Toml => toml::to_string_pretty(&self)
                .map_err(|e| serialization_error("toml", e)),
        };
        Ok(serialized?)
    }

    /// Deserialize from string based on format
    pub fn deserialize(data: &str, format: ConfigFormat) -> Result<Self> {
        let deserialized = match format {
            ConfigFormat::Json => serde_json::from_str(data)
                .map_err(|e| deserialization_error("json", e)),
            #[cfg(feature = "yaml-config")]
            ConfigFormat::Yaml => serde_yaml::from_str(data)
                .map_err(|e| deserialization_error("yaml", e)),
            #[cfg(feature = "toml-config")]
            ConfigFormat::Toml => toml::from_str(data)
                .map_err(|e| deserialization_error("toml", e)),
        };
        Ok(deserialized?)
    }

    /// Convert into a typed settings struct
    pub fn into_typed<T: for<'de> Deserialize<'de>>(self) -> Result<T> {
        let value = serde_json::to_value(self).map_err(|e| serialization_error("json", e))?;
        Ok(serde_json::from_value(value).map_err(|e| deserialization_error("json", e))?)
    }
}

fn serialization_error<E>(format: &str, source: E) -> StorageSystemError
where
    E: std::error::Error + Send + Sync + 'static,
{
    StorageSystemError::SerializationError {
        format: format.to_string(),
        source: Box::new(source),
    }
}

fn deserialization_error<E>(format: &str, source: E) -> StorageSystemError
where
    E: std::error::Error + Send + Sync + 'static,
{
    StorageSystemError::DeserializationError {
        format: format.to_string(),
        source: Box::new(source),
    }
}

/// Read and parse a configuration file, picking the format from its extension.
pub fn load_config_file<P: StorageProvider + ?Sized>(provider: &P, path: &Path) -> Result<ConfigData> {
    let format = ConfigFormat::from_path(path)
        .ok_or_else(|| StorageSystemError::UnsupportedConfigFormat(path.display().to_string()))?;
    let content = provider.read_to_string(path)?;
    ConfigData::deserialize(&content, format)
}

/// Settings of a pluginhub installation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HubSettings {
    /// Public base URL used to absolutize asset and webhook links
    pub base_url: String,
    /// URL prefix under which plugin assets are served
    pub static_prefix: String,
    /// Directory scanned for plugin manifests
    pub plugins_dir: PathBuf,
    /// Directory holding global and per-project option files
    pub options_dir: PathBuf,
}

impl Default for HubSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            static_prefix: DEFAULT_STATIC_PREFIX.to_string(),
            plugins_dir: PathBuf::from(DEFAULT_PLUGINS_DIR),
            options_dir: PathBuf::from(DEFAULT_OPTIONS_DIR),
        }
    }
}

impl HubSettings {
    /// Load settings from a JSON, TOML or YAML file. Missing keys keep their defaults.
    pub fn load<P: StorageProvider + ?Sized>(provider: &P, path: &Path) -> Result<Self> {
        load_config_file(provider, path)?.into_typed()
    }
}
