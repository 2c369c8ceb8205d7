use std::collections::HashMap;
use std::fmt;
use std::path::{Component, Path, PathBuf};
use std::sync::{Arc, RwLock};

use log::debug;
use serde_json::Value;

use crate::kernel::error::Result;
use crate::storage::config::{load_config_file, ConfigData, ConfigFormat};
use crate::storage::error::StorageSystemError;
use crate::storage::StorageProvider;

/// Scope an option value is stored under
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum OptionScope {
    /// Installation-wide options
    Global,
    /// Options of one project, keyed by project slug
    Project(String),
}

impl OptionScope {
    pub fn project(slug: impl Into<String>) -> Self {
        OptionScope::Project(slug.into())
    }
}

impl fmt::Display for OptionScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionScope::Global => write!(f, "global"),
            OptionScope::Project(slug) => write!(f, "project:{}", slug),
        }
    }
}

/// Persisted key/value option store
pub trait OptionStore: Send + Sync + fmt::Debug {
    /// Point read of one option. `Ok(None)` when the key is unset.
    fn get_value(&self, scope: &OptionScope, key: &str) -> Result<Option<Value>>;

    /// Write one option
    fn set_value(&self, scope: &OptionScope, key: &str, value: Value) -> Result<()>;

    /// Remove one option, returning the previous value
    fn unset_value(&self, scope: &OptionScope, key: &str) -> Result<Option<Value>>;

    /// Read an option that must be a string. Non-string values are treated as unset.
    fn get_str(&self, scope: &OptionScope, key: &str) -> Result<Option<String>> {
        Ok(match self.get_value(scope, key)? {
            Some(Value::String(s)) => Some(s),
            _ => None,
        })
    }
}

/// Option store kept entirely in memory
#[derive(Debug, Default)]
pub struct MemoryOptionStore {
    scopes: RwLock<HashMap<OptionScope, ConfigData>>,
}

impl MemoryOptionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert, convenient when seeding fixtures
    pub fn with_value(self, scope: OptionScope, key: &str, value: Value) -> Result<Self> {
        self.set_value(&scope, key, value)?;
        Ok(self)
    }
}

fn poisoned(scope: &OptionScope) -> StorageSystemError {
    StorageSystemError::LockPoisoned {
        scope: scope.to_string(),
    }
}

/// A project slug must name exactly one file under `projects/`
fn validate_project_slug(slug: &str) -> std::result::Result<(), StorageSystemError> {
    let invalid = |reason: &str| StorageSystemError::InvalidScope {
        scope: format!("project:{}", slug),
        reason: reason.to_string(),
    };

    if slug.is_empty() {
        return Err(invalid("project slug is empty"));
    }
    if slug.contains(['/', '\\']) {
        return Err(invalid("project slug contains a path separator"));
    }
    match Path::new(slug).components().collect::<Vec<_>>().as_slice() {
        [Component::Normal(_)] => Ok(()),
        _ => Err(invalid("project slug is not a plain file name")),
    }
}

impl OptionStore for MemoryOptionStore {
    fn get_value(&self, scope: &OptionScope, key: &str) -> Result<Option<Value>> {
        let scopes = self.scopes.read().map_err(|_| poisoned(scope))?;
        Ok(scopes.get(scope).and_then(|data| data.get_value(key)).cloned())
    }

    fn set_value(&self, scope: &OptionScope, key: &str, value: Value) -> Result<()> {
        let mut scopes = self.scopes.write().map_err(|_| poisoned(scope))?;
        scopes.entry(scope.clone()).or_default().set(key, value)
    }

    fn unset_value(&self, scope: &OptionScope, key: &str) -> Result<Option<Value>> {
        let mut scopes = self.scopes.write().map_err(|_| poisoned(scope))?;
        Ok(scopes.get_mut(scope).and_then(|data| data.remove(key)))
    }
}

/// Option store backed by one file per scope.
///
/// Layout under the root directory: `global.<ext>` and
/// `projects/<project-slug>.<ext>`, where `<ext>` is any supported
/// [`ConfigFormat`]. A scope without a file reads as empty; writes go to the
/// existing file or, if none exists, to a new file in the default format.
pub struct FileOptionStore<P: StorageProvider + ?Sized> {
    provider: Arc<P>,
    root: PathBuf,
    default_format: ConfigFormat,
    /// Loaded scopes
    cache: RwLock<HashMap<OptionScope, ConfigData>>,
}

impl<P: StorageProvider + ?Sized> FileOptionStore<P> {
    pub fn new(provider: Arc<P>, root: PathBuf, default_format: ConfigFormat) -> Self {
        Self {
            provider,
            root,
            default_format,
            cache: RwLock::new(HashMap::new()),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn scope_stem(&self, scope: &OptionScope) -> Result<PathBuf> {
        match scope {
            OptionScope::Global => Ok(self.root.join("global")),
            OptionScope::Project(slug) => {
                validate_project_slug(slug)?;
                Ok(self.root.join("projects").join(slug))
            }
        }
    }

    /// Path of the file holding `scope`: the first existing candidate, else the default format
    pub fn resolve_scope_path(&self, scope: &OptionScope) -> Result<PathBuf> {
        let stem = self.scope_stem(scope)?;
        Ok(ConfigFormat::all()
            .iter()
            .map(|format| stem.with_extension(format.extension()))
            .find(|candidate| self.provider.is_file(candidate))
            .unwrap_or_else(|| stem.with_extension(self.default_format.extension())))
    }

    /// Load a scope from disk, bypassing and refreshing the cache
    pub fn load_scope(&self, scope: &OptionScope) -> Result<ConfigData> {
        let path = self.resolve_scope_path(scope)?;
        let data = if self.provider.is_file(&path) {
            debug!("Loading options for {} from {:?}", scope, path);
            load_config_file(self.provider.as_ref(), &path)?
        } else {
            ConfigData::new()
        };

        self.cache
            .write()
            .map_err(|_| poisoned(scope))?
            .insert(scope.clone(), data.clone());
        Ok(data)
    }

    fn cached_scope(&self, scope: &OptionScope) -> Result<ConfigData> {
        {
            let cache = self.cache.read().map_err(|_| poisoned(scope))?;
            if let Some(data) = cache.get(scope) {
                return Ok(data.clone());
            }
        }
        self.load_scope(scope)
    }

    fn save_scope(&self, scope: &OptionScope, data: &ConfigData) -> Result<()> {
        let path = self.resolve_scope_path(scope)?;
        let format = ConfigFormat::from_path(&path).unwrap_or(self.default_format);
        let content = data.serialize(format)?;
        self.provider.write_string(&path, &content)?;

        self.cache
            .write()
            .map_err(|_| poisoned(scope))?
            .insert(scope.clone(), data.clone());
        Ok(())
    }

    /// Drop every cached scope
    pub fn clear_cache(&self) {
        if let Ok(mut cache) = self.cache.write() {
            cache.clear();
        }
    }
}

impl<P: StorageProvider + ?Sized> fmt::Debug for FileOptionStore<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileOptionStore")
            .field("provider", &self.provider.name())
            .field("root", &self.root)
            .field("default_format", &self.default_format)
            .finish()
    }
}

impl<P: StorageProvider + ?Sized> OptionStore for FileOptionStore<P> {
    fn get_value(&self, scope: &OptionScope, key: &str) -> Result<Option<Value>> {
        Ok(self.cached_scope(scope)?.get_value(key).cloned())
    }

    fn set_value(&self, scope: &OptionScope, key: &str, value: Value) -> Result<()> {
        let mut data = self.load_scope(scope)?;
        data.set(key, value)?;
        self.save_scope(scope, &data)
    }

    fn unset_value(&self, scope: &OptionScope, key: &str) -> Result<Option<Value>> {
        let mut data = self.load_scope(scope)?;
        let previous = data.remove(key);
        if previous.is_some() {
            self.save_scope(scope, &data)?;
        }
        Ok(previous)
    }
}
