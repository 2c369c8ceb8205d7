use std::fmt;
use std::sync::Arc;

use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::kernel::constants::{DEFAULT_BASE_URL, DEFAULT_STATIC_PREFIX, RELEASE_HOOK_PATH};
use crate::kernel::error::Result;
use crate::plugin_system::context::Project;
use crate::serializer::error::SerializerError;
use crate::storage::config::HubSettings;
use crate::storage::option::OptionStore;
use crate::utils::absolute_uri;

type HmacSha256 = Hmac<Sha256>;

/// Builds the URL a CI system calls to announce a release to a plugin
pub trait WebhookUrlBuilder: Send + Sync + fmt::Debug {
    fn build_release_webhook_url(&self, project: &Project, plugin_slug: &str, token: &str) -> Result<String>;
}

/// Maps a plugin asset to the path it is served from
pub trait AssetUrlResolver: Send + Sync + fmt::Debug {
    /// `module` is the plugin's asset key or slug
    fn resolve_asset_url(&self, module: &str, asset: &str) -> Result<String>;
}

/// Release webhook URLs signed with the project's release token.
///
/// `{base_url}/api/hooks/release/{plugin}/{project_id}/{signature}/`, where
/// the signature is the hex HMAC-SHA256 of `"{plugin}-{project_id}"` keyed
/// with the token.
#[derive(Debug, Clone)]
pub struct ReleaseWebhookUrlBuilder {
    base_url: String,
}

impl ReleaseWebhookUrlBuilder {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    pub fn signature(plugin_slug: &str, project_id: u64, token: &str) -> std::result::Result<String, SerializerError> {
        let mut mac = HmacSha256::new_from_slice(token.as_bytes()).map_err(|e| SerializerError::WebhookUrl {
            plugin_id: plugin_slug.to_string(),
            reason: e.to_string(),
        })?;
        mac.update(format!("{}-{}", plugin_slug, project_id).as_bytes());
        Ok(hex::encode(mac.finalize().into_bytes()))
    }
}

impl WebhookUrlBuilder for ReleaseWebhookUrlBuilder {
    fn build_release_webhook_url(&self, project: &Project, plugin_slug: &str, token: &str) -> Result<String> {
        let signature = Self::signature(plugin_slug, project.id, token)?;
        let path = format!("{}/{}/{}/{}/", RELEASE_HOOK_PATH, plugin_slug, project.id, signature);
        Ok(absolute_uri(&self.base_url, &path))
    }
}

/// Assets served from `{static_prefix}/{module}/{asset}`
#[derive(Debug, Clone)]
pub struct StaticAssetResolver {
    static_prefix: String,
}

impl StaticAssetResolver {
    pub fn new(static_prefix: impl Into<String>) -> Self {
        Self {
            static_prefix: static_prefix.into(),
        }
    }
}

impl AssetUrlResolver for StaticAssetResolver {
    fn resolve_asset_url(&self, module: &str, asset: &str) -> Result<String> {
        let asset = asset.trim_start_matches('/');
        if module.is_empty() || asset.is_empty() {
            return Err(SerializerError::AssetResolution {
                module: module.to_string(),
                asset: asset.to_string(),
                reason: "module and asset name must not be empty".to_string(),
            }
            .into());
        }
        Ok(format!("{}/{}/{}", self.static_prefix.trim_end_matches('/'), module, asset))
    }
}

/// Collaborators shared by the plugin serializers
#[derive(Debug, Clone)]
pub struct SerializerContext {
    pub options: Arc<dyn OptionStore>,
    pub webhook_urls: Arc<dyn WebhookUrlBuilder>,
    pub asset_urls: Arc<dyn AssetUrlResolver>,
    /// Base used to absolutize asset URLs
    pub base_url: String,
}

impl SerializerContext {
    /// Context with the default webhook builder and asset resolver
    pub fn new(options: Arc<dyn OptionStore>, base_url: impl Into<String>, static_prefix: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            options,
            webhook_urls: Arc::new(ReleaseWebhookUrlBuilder::new(base_url.clone())),
            asset_urls: Arc::new(StaticAssetResolver::new(static_prefix)),
            base_url,
        }
    }

    pub fn from_settings(options: Arc<dyn OptionStore>, settings: &HubSettings) -> Self {
        Self::new(options, settings.base_url.clone(), settings.static_prefix.clone())
    }

    /// Context using the default base URL and static prefix
    pub fn with_defaults(options: Arc<dyn OptionStore>) -> Self {
        Self::new(options, DEFAULT_BASE_URL, DEFAULT_STATIC_PREFIX)
    }

    pub fn with_webhook_url_builder(mut self, builder: Arc<dyn WebhookUrlBuilder>) -> Self {
        self.webhook_urls = builder;
        self
    }

    pub fn with_asset_url_resolver(mut self, resolver: Arc<dyn AssetUrlResolver>) -> Self {
        self.asset_urls = resolver;
        self
    }
}
