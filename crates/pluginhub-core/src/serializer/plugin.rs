use std::collections::BTreeSet;

use log::{debug, warn};
use serde::Serialize;
use serde_json::Value;

use crate::kernel::constants::RELEASE_TOKEN_OPTION;
use crate::kernel::error::{Error, Result};
use crate::plugin_system::context::{Project, User};
use crate::plugin_system::traits::Plugin;
use crate::serializer::context::SerializerContext;
use crate::serializer::field::serialize_field;
use crate::serializer::view_model::{
    AssetView, AuthorView, FeatureDescriptionView, PluginViewModel, ResourceLinkView,
};
use crate::utils::{absolute_uri, slugify};

/// Turns a domain object into its API view model
pub trait ModelSerializer<T: ?Sized> {
    type Output: Serialize;

    fn serialize(&self, obj: &T, user: Option<&User>) -> Result<Self::Output>;

    /// Serialize straight to a JSON value
    fn to_value(&self, obj: &T, user: Option<&User>) -> Result<Value> {
        let output = self.serialize(obj, user)?;
        serde_json::to_value(output).map_err(|e| Error::Other(format!("Failed to encode view model: {}", e)))
    }
}

/// Serializes plugins without their configuration
#[derive(Debug, Clone)]
pub struct PluginSerializer {
    project: Option<Project>,
    context: SerializerContext,
}

impl PluginSerializer {
    pub fn new(project: Option<Project>, context: SerializerContext) -> Self {
        Self { project, context }
    }

    pub fn project(&self) -> Option<&Project> {
        self.project.as_ref()
    }

    pub fn context(&self) -> &SerializerContext {
        &self.context
    }

    /// Release webhook docs. Empty unless the project has a release token and
    /// the plugin renders docs.
    fn render_doc(&self, plugin: &dyn Plugin) -> Result<String> {
        let Some(project) = self.project.as_ref() else {
            return Ok(String::new());
        };
        let Some(token) = self
            .context
            .options
            .get_str(&project.option_scope(), RELEASE_TOKEN_OPTION)?
        else {
            return Ok(String::new());
        };

        let webhook_url = self
            .context
            .webhook_urls
            .build_release_webhook_url(project, plugin.slug(), &token)?;

        let Some(renderer) = plugin.release_doc_renderer() else {
            return Ok(String::new());
        };
        match renderer.release_doc_html(&webhook_url) {
            Ok(doc) => Ok(doc),
            Err(e) if e.is_not_implemented() => {
                debug!("Plugin '{}' has no release docs: {}", plugin.slug(), e);
                Ok(String::new())
            }
            Err(e) => {
                warn!("Failed to render release docs for plugin '{}': {}", plugin.slug(), e);
                Err(e)
            }
        }
    }

    fn asset_urls(&self, plugin: &dyn Plugin) -> Result<Vec<AssetView>> {
        let module = plugin.asset_key().unwrap_or_else(|| plugin.slug());
        plugin
            .assets()
            .iter()
            .map(|asset| {
                let path = self.context.asset_urls.resolve_asset_url(module, asset)?;
                Ok(AssetView {
                    url: absolute_uri(&self.context.base_url, &path),
                })
            })
            .collect()
    }

    /// Build the base view model of `plugin`
    pub fn build_base(&self, plugin: &dyn Plugin, _user: Option<&User>) -> Result<PluginViewModel> {
        let doc = self.render_doc(plugin)?;

        let contexts = plugin
            .custom_contexts()
            .map(|contexts| contexts.into_iter().map(|c| c.context_type).collect())
            .unwrap_or_default();

        let slug = match plugin.slug() {
            "" => slugify(plugin.title()),
            slug => slug.to_string(),
        };

        let enabled = match self.project.as_ref() {
            Some(project) => Some(plugin.is_enabled(Some(project), self.context.options.as_ref())?),
            None => None,
        };

        let author = plugin.author().filter(|name| !name.is_empty()).map(|name| AuthorView {
            name: name.to_string(),
            url: plugin.author_url().unwrap_or_default().to_string(),
        });

        let descriptions = plugin.feature_descriptions();
        let features: BTreeSet<String> = descriptions
            .iter()
            .map(|d| d.feature_gate.value().to_string())
            .collect();
        let feature_descriptions = descriptions
            .iter()
            .map(|d| FeatureDescriptionView {
                description: d.description.trim().to_string(),
                feature_gate: plugin.feature_flag_name(d.feature_gate.value()),
            })
            .collect();

        let resource_links = plugin.resource_links();
        let resource_links = (!resource_links.is_empty()).then(|| {
            resource_links
                .into_iter()
                .map(|(title, url)| ResourceLinkView { title, url })
                .collect()
        });

        Ok(PluginViewModel {
            id: plugin.slug().to_string(),
            name: plugin.title().to_string(),
            slug,
            short_name: plugin.short_title().to_string(),
            plugin_type: plugin.plugin_type(),
            can_disable: plugin.can_disable(),
            is_testable: plugin.testable().is_some_and(|t| t.is_testable()),
            has_configuration: plugin.has_project_conf(),
            metadata: plugin.metadata(),
            contexts,
            status: plugin.status(),
            assets: self.asset_urls(plugin)?,
            doc,
            enabled,
            version: plugin.version().filter(|v| !v.is_empty()).map(str::to_string),
            author,
            is_hidden: !enabled.unwrap_or(false) && plugin.is_hidden(),
            description: plugin.description().filter(|d| !d.is_empty()).map(str::to_string),
            features: features.into_iter().collect(),
            feature_descriptions,
            resource_links,
            config: None,
        })
    }
}

impl ModelSerializer<dyn Plugin> for PluginSerializer {
    type Output = PluginViewModel;

    fn serialize(&self, plugin: &dyn Plugin, user: Option<&User>) -> Result<PluginViewModel> {
        self.build_base(plugin, user)
    }
}

/// Serializes plugins together with their normalized configuration
#[derive(Debug, Clone)]
pub struct PluginWithConfigSerializer {
    base: PluginSerializer,
}

impl PluginWithConfigSerializer {
    pub fn new(project: Option<Project>, context: SerializerContext) -> Self {
        Self {
            base: PluginSerializer::new(project, context),
        }
    }

    /// Base view model plus every config field, normalized in order
    pub fn build_configured(&self, plugin: &dyn Plugin, user: Option<&User>) -> Result<PluginViewModel> {
        let mut view = self.base.build_base(plugin, user)?;
        let project = self.base.project();
        let options = self.base.context().options.as_ref();

        let config = plugin
            .get_config(project, user, true)?
            .iter()
            .map(|field| serialize_field(project, plugin, field, options))
            .collect::<Result<Vec<_>>>()?;

        view.config = Some(config);
        Ok(view)
    }
}

impl ModelSerializer<dyn Plugin> for PluginWithConfigSerializer {
    type Output = PluginViewModel;

    fn serialize(&self, plugin: &dyn Plugin, user: Option<&User>) -> Result<PluginViewModel> {
        self.build_configured(plugin, user)
    }
}
