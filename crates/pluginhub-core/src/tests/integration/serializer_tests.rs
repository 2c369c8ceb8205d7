#![cfg(test)]

use serde_json::{json, Value};

use crate::kernel::error::Result;
use crate::plugin_system::context::{Project, User};
use crate::serializer::context::ReleaseWebhookUrlBuilder;
use crate::serializer::plugin::{ModelSerializer, PluginSerializer, PluginWithConfigSerializer};
use crate::storage::option::{OptionScope, OptionStore};

use super::common::setup_test_environment;

fn backend() -> Project {
    Project::new(42, "backend", "acme")
}

#[test]
fn test_manifest_plugin_without_project() -> Result<()> {
    let env = setup_test_environment();
    let plugin = env.registry.require_plugin("releases")?;
    let serializer = PluginSerializer::new(None, env.context());

    let value = serializer.to_value(plugin.as_ref(), None)?;
    assert_eq!(value["id"], json!("releases"));
    assert_eq!(value["name"], json!("Release Tracking"));
    assert_eq!(value["shortName"], json!("Releases"));
    assert_eq!(value["type"], json!("release"));
    assert_eq!(value["status"], json!("beta"));
    assert_eq!(value["isTestable"], json!(true));
    assert_eq!(value["hasConfiguration"], json!(true));
    assert_eq!(value["metadata"], json!({"category": "deploys"}));
    assert_eq!(value["contexts"], json!(["release"]));
    assert_eq!(
        value["assets"],
        json!([{"url": "https://hub.example.com/_static/releases/dist/releases.js"}])
    );
    assert_eq!(value["doc"], json!(""));
    assert_eq!(value["version"], json!("2.1.0"));
    assert_eq!(value["author"], json!({"name": "Acme", "url": "https://acme.example"}));
    assert_eq!(value["features"], json!(["deployment"]));
    assert_eq!(value["featureDescriptions"].as_array().map(Vec::len), Some(2));
    assert_eq!(
        value["resourceLinks"],
        json!([{"title": "Docs", "url": "https://docs.example.com/releases"}])
    );
    assert!(value.get("enabled").is_none());
    assert!(value.get("config").is_none());
    Ok(())
}

#[test]
fn test_release_doc_uses_stored_token() -> Result<()> {
    let env = setup_test_environment();
    env.options
        .set_value(&OptionScope::project("backend"), "pluginhub:release-token", json!("t0ken"))?;
    let plugin = env.registry.require_plugin("releases")?;

    let view = PluginSerializer::new(Some(backend()), env.context()).build_base(plugin.as_ref(), None)?;
    let signature = ReleaseWebhookUrlBuilder::signature("releases", 42, "t0ken")?;
    assert_eq!(
        view.doc,
        format!(
            "<p>Point your CI at <code>https://hub.example.com/api/hooks/release/releases/42/{}/</code></p>",
            signature
        )
    );
    Ok(())
}

#[test]
fn test_configured_plugin_reads_persisted_options() -> Result<()> {
    let env = setup_test_environment();
    let scope = OptionScope::project("backend");
    env.options.set_value(&scope, "releases:repo", json!("acme/api"))?;
    env.options.set_value(&scope, "releases:enabled", json!(true))?;
    env.options.clear_cache();

    let plugin = env.registry.require_plugin("releases")?;
    let user = User::new(1, "admin");
    let serializer = PluginWithConfigSerializer::new(Some(backend()), env.context());
    let value = serializer.to_value(plugin.as_ref(), Some(&user))?;

    assert_eq!(value["enabled"], json!(true));
    assert_eq!(
        value["config"],
        json!([
            {
                "name": "repo",
                "label": "Repo",
                "type": "text",
                "required": true,
                "help": null,
                "placeholder": "owner/name",
                "choices": null,
                "readonly": false,
                "defaultValue": null,
                "value": "acme/api",
            },
            {
                "name": "api_key",
                "label": "Api Key",
                "type": "secret",
                "required": true,
                "help": null,
                "placeholder": null,
                "choices": null,
                "readonly": false,
                "defaultValue": null,
                "hasSavedValue": true,
                "prefix": "ab12",
            },
            {
                "name": "notify_on_failure",
                "label": "Notify On Failure",
                "type": "bool",
                "required": true,
                "help": null,
                "placeholder": null,
                "choices": null,
                "readonly": false,
                "defaultValue": null,
                "value": null,
            },
        ])
    );

    assert!(env.root().join("options/projects/backend.json").is_file());
    Ok(())
}

#[test]
fn test_hidden_plugin_shown_once_enabled() -> Result<()> {
    let env = setup_test_environment();
    let plugin = env.registry.require_plugin("internal-audit")?;
    let serializer = PluginSerializer::new(Some(backend()), env.context());

    let view = serializer.build_base(plugin.as_ref(), None)?;
    assert_eq!(view.enabled, Some(false));
    assert!(view.is_hidden);
    assert_eq!(env.registry.visible_plugins(Some(&backend()), env.options.as_ref())?.len(), 1);

    env.options
        .set_value(&OptionScope::project("backend"), "internal-audit:enabled", json!(true))?;
    let view = serializer.build_base(plugin.as_ref(), None)?;
    assert_eq!(view.enabled, Some(true));
    assert!(!view.is_hidden);
    assert_eq!(env.registry.visible_plugins(Some(&backend()), env.options.as_ref())?.len(), 2);
    Ok(())
}

#[test]
fn test_every_plugin_serializes() -> Result<()> {
    let env = setup_test_environment();
    let serializer = PluginWithConfigSerializer::new(None, env.context());

    let views = env
        .registry
        .plugins()
        .iter()
        .map(|plugin| serializer.to_value(plugin.as_ref(), None))
        .collect::<Result<Vec<Value>>>()?;

    assert_eq!(views.len(), 2);
    assert_eq!(views[0]["id"], json!("internal-audit"));
    assert_eq!(views[0]["isHidden"], json!(true));
    assert_eq!(views[0]["config"], json!([]));
    assert_eq!(views[1]["id"], json!("releases"));
    assert_eq!(env.provider.base_path(), env.root());
    Ok(())
}
