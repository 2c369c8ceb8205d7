#![cfg(test)]

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tempfile::{tempdir, TempDir};

use crate::plugin_system::loader::ManifestLoader;
use crate::plugin_system::registry::PluginRegistry;
use crate::serializer::context::SerializerContext;
use crate::storage::config::{ConfigFormat, HubSettings};
use crate::storage::local::LocalStorageProvider;
use crate::storage::option::FileOptionStore;

pub const RELEASES_MANIFEST: &str = r#"
slug = "releases"
title = "Release Tracking"
short_title = "Releases"
type = "release"
status = "beta"
version = "2.1.0"
author = "Acme"
author_url = "https://acme.example"
description = "Announce releases from CI."
assets = ["dist/releases.js"]
resource_links = [["Docs", "https://docs.example.com/releases"]]
release_doc = "<p>Point your CI at <code>{webhook_url}</code></p>"
testable = true
contexts = ["release"]

[metadata]
category = "deploys"

[[features]]
featureGate = "deployment"
description = "Track deploys."

[[features]]
featureGate = "deployment"
description = "Mark releases as deployed."

[[config]]
name = "repo"
placeholder = "owner/name"

[[config]]
name = "api_key"
type = "secret"
has_saved_value = true
prefix = "ab12"

[[additional_config]]
name = "notify_on_failure"
type = "bool"
"#;

pub const INTERNAL_MANIFEST: &str = r#"{
    "slug": "internal-audit",
    "title": "Internal Audit",
    "hidden": true
}"#;

pub const SETTINGS: &str = r#"
base_url = "https://hub.example.com"
static_prefix = "/_static"
"#;

/// Everything a serializer test needs, rooted in a temp directory
pub struct TestEnvironment {
    /// Held so the directory outlives the test
    pub temp_dir: TempDir,
    pub provider: Arc<LocalStorageProvider>,
    pub options: Arc<FileOptionStore<LocalStorageProvider>>,
    pub registry: PluginRegistry,
    pub settings: HubSettings,
}

impl TestEnvironment {
    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn context(&self) -> SerializerContext {
        SerializerContext::from_settings(self.options.clone(), &self.settings)
    }
}

pub fn write_file(root: &Path, relative: &str, contents: &str) {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("Failed to create directory");
    }
    fs::write(path, contents).expect("Failed to write file");
}

/// Lay out settings, manifests and an empty option directory, then load them
pub fn setup_test_environment() -> TestEnvironment {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    write_file(temp_dir.path(), "pluginhub.toml", SETTINGS);
    write_file(temp_dir.path(), "plugins/releases/manifest.toml", RELEASES_MANIFEST);
    write_file(temp_dir.path(), "plugins/internal-audit.json", INTERNAL_MANIFEST);

    let provider = Arc::new(LocalStorageProvider::new(temp_dir.path().to_path_buf()));
    let settings = HubSettings::load(provider.as_ref(), Path::new("pluginhub.toml")).expect("Failed to load settings");

    let mut loader = ManifestLoader::new(provider.clone());
    loader.add_plugin_dir(&settings.plugins_dir);
    let mut registry = PluginRegistry::new();
    loader.register_all_plugins(&mut registry).expect("Failed to register plugins");

    let options = Arc::new(FileOptionStore::new(
        provider.clone(),
        PathBuf::from(&settings.options_dir),
        ConfigFormat::Json,
    ));

    TestEnvironment {
        temp_dir,
        provider,
        options,
        registry,
        settings,
    }
}
