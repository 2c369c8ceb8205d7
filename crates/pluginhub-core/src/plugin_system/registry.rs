use std::collections::HashMap;
use std::sync::Arc;

use log::info;

use crate::kernel::error::Result;
use crate::plugin_system::context::Project;
use crate::plugin_system::error::PluginSystemError;
use crate::plugin_system::traits::Plugin;
use crate::storage::option::OptionStore;

/// Registry for managing plugins, keyed by slug
#[derive(Default)]
pub struct PluginRegistry {
    /// Registered plugins (using Arc for shared ownership)
    plugins: HashMap<String, Arc<dyn Plugin>>,
}

impl PluginRegistry {
    /// Create an empty plugin registry
    pub fn new() -> Self {
        Self {
            plugins: HashMap::new(),
        }
    }

    /// Register a plugin
    pub fn register_plugin(&mut self, plugin: Arc<dyn Plugin>) -> Result<()> {
        let id = plugin.slug().to_string();

        if id.is_empty() {
            return Err(PluginSystemError::RegistrationError {
                plugin_id: plugin.title().to_string(),
                message: "plugin has no slug".to_string(),
            }
            .into());
        }
        if self.plugins.contains_key(&id) {
            return Err(PluginSystemError::RegistrationError {
                plugin_id: id,
                message: "plugin already registered".to_string(),
            }
            .into());
        }

        info!("Registered plugin '{}'", id);
        self.plugins.insert(id, plugin);
        Ok(())
    }

    /// Unregister a plugin by slug
    pub fn unregister_plugin(&mut self, id: &str) -> Result<Arc<dyn Plugin>> {
        self.plugins.remove(id).ok_or_else(|| {
            PluginSystemError::NotFound {
                plugin_id: id.to_string(),
            }
            .into()
        })
    }

    /// Check if a plugin is registered by slug
    pub fn has_plugin(&self, id: &str) -> bool {
        self.plugins.contains_key(id)
    }

    /// Get a plugin Arc by slug
    pub fn get_plugin(&self, id: &str) -> Option<Arc<dyn Plugin>> {
        self.plugins.get(id).cloned()
    }

    /// Get a plugin Arc by slug, failing when it is unknown
    pub fn require_plugin(&self, id: &str) -> Result<Arc<dyn Plugin>> {
        self.get_plugin(id).ok_or_else(|| {
            PluginSystemError::NotFound {
                plugin_id: id.to_string(),
            }
            .into()
        })
    }

    pub fn plugin_count(&self) -> usize {
        self.plugins.len()
    }

    /// All plugins, sorted by slug
    pub fn plugins(&self) -> Vec<Arc<dyn Plugin>> {
        let mut plugins: Vec<Arc<dyn Plugin>> = self.plugins.values().cloned().collect();
        plugins.sort_by(|a, b| a.slug().cmp(b.slug()));
        plugins
    }

    /// Plugins shown to users. A hidden plugin only shows up once it is
    /// enabled for `project`; without a project it never does.
    pub fn visible_plugins(&self, project: Option<&Project>, options: &dyn OptionStore) -> Result<Vec<Arc<dyn Plugin>>> {
        let mut visible = Vec::new();
        for plugin in self.plugins() {
            if plugin.is_hidden() {
                let enabled = match project {
                    Some(project) => plugin.is_enabled(Some(project), options)?,
                    None => false,
                };
                if !enabled {
                    continue;
                }
            }
            visible.push(plugin);
        }
        Ok(visible)
    }
}
