use std::path::{Path, PathBuf};
use std::sync::Arc;

use log::{debug, warn};

use crate::kernel::error::Result;
use crate::plugin_system::error::PluginSystemError;
use crate::plugin_system::manifest::{ManifestPlugin, PluginManifest};
use crate::plugin_system::registry::PluginRegistry;
use crate::storage::config::{load_config_file, ConfigFormat};
use crate::storage::StorageProvider;

/// File stem looked up inside plugin subdirectories
const MANIFEST_STEM: &str = "manifest";

/// Discovers plugin manifests on disk.
///
/// A plugin directory may hold manifests directly (`<dir>/<name>.toml`) or
/// one subdirectory per plugin containing `manifest.<ext>`.
pub struct ManifestLoader {
    provider: Arc<dyn StorageProvider>,
    plugin_dirs: Vec<PathBuf>,
}

impl ManifestLoader {
    pub fn new(provider: Arc<dyn StorageProvider>) -> Self {
        Self {
            provider,
            plugin_dirs: Vec::new(),
        }
    }

    /// Add a directory to scan
    pub fn add_plugin_dir<P: AsRef<Path>>(&mut self, dir: P) {
        self.plugin_dirs.push(dir.as_ref().to_path_buf());
    }

    pub fn plugin_dirs(&self) -> &[PathBuf] {
        &self.plugin_dirs
    }

    /// Scan all plugin directories. Manifests that fail to load are logged and skipped.
    pub fn scan_for_manifests(&self) -> Result<Vec<PluginManifest>> {
        let mut manifests = Vec::new();

        for dir in &self.plugin_dirs {
            if !self.provider.is_dir(dir) {
                debug!("Plugin directory {:?} does not exist, skipping", dir);
                continue;
            }

            for entry in self.provider.read_dir(dir)? {
                let candidate = if self.provider.is_dir(&entry) {
                    match self.find_manifest_in(&entry) {
                        Some(path) => path,
                        None => continue,
                    }
                } else if ConfigFormat::from_path(&entry).is_some() {
                    entry
                } else {
                    continue;
                };

                match self.load_manifest(&candidate) {
                    Ok(manifest) => manifests.push(manifest),
                    Err(e) => warn!("Error loading manifest from {}: {}", candidate.display(), e),
                }
            }
        }

        Ok(manifests)
    }

    fn find_manifest_in(&self, dir: &Path) -> Option<PathBuf> {
        ConfigFormat::all()
            .iter()
            .map(|format| dir.join(MANIFEST_STEM).with_extension(format.extension()))
            .find(|path| self.provider.is_file(path))
    }

    /// Load and validate a single manifest file
    pub fn load_manifest(&self, path: &Path) -> Result<PluginManifest> {
        let data = load_config_file(self.provider.as_ref(), path).map_err(|e| PluginSystemError::ManifestError {
            path: path.to_path_buf(),
            message: "failed to parse manifest".to_string(),
            source: Some(Box::new(e)),
        })?;

        let manifest: PluginManifest = data.into_typed().map_err(|e| PluginSystemError::ManifestError {
            path: path.to_path_buf(),
            message: "manifest does not match the plugin schema".to_string(),
            source: Some(Box::new(e)),
        })?;

        manifest.validate(path)?;
        debug!("Loaded manifest for plugin '{}' from {:?}", manifest.slug, path);
        Ok(manifest)
    }

    /// Scan and register every discovered plugin. Returns the number registered.
    pub fn register_all_plugins(&self, registry: &mut PluginRegistry) -> Result<usize> {
        let manifests = self.scan_for_manifests()?;
        let mut count = 0;
        for manifest in manifests {
            registry.register_plugin(Arc::new(ManifestPlugin::new(manifest)))?;
            count += 1;
        }
        Ok(count)
    }
}
