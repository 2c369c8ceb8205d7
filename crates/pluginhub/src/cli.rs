use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use log::{debug, info};
use serde::Serialize;
use serde_json::Value;

use pluginhub_core::event::EventRegistry;
use pluginhub_core::kernel::constants::{DEFAULT_SETTINGS_FILE, ENABLED_OPTION_SUFFIX};
use pluginhub_core::kernel::error::{Error, Result};
use pluginhub_core::plugin_system::{ManifestLoader, Plugin, PluginRegistry, Project, User};
use pluginhub_core::serializer::{ModelSerializer, PluginSerializer, PluginWithConfigSerializer, SerializerContext};
use pluginhub_core::storage::{
    ConfigFormat, FileOptionStore, HubSettings, LocalStorageProvider, OptionStore, StorageProvider,
};

/// Pluginhub: inspect plugins and analytics events
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct CliArgs {
    /// Simple liveness check
    #[arg(long)]
    pub ping: bool,

    /// Settings file (JSON, TOML or YAML). Defaults to ./pluginhub.toml when present
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Override the plugin manifest directory
    #[arg(long, global = true)]
    pub plugins_dir: Option<PathBuf>,

    /// Override the option store directory
    #[arg(long, global = true)]
    pub options_dir: Option<PathBuf>,

    /// Override the public base URL
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Inspect and toggle plugins
    Plugin {
        #[command(subcommand)]
        command: PluginCommand,
    },
    /// Inspect analytics event schemas
    Event {
        #[command(subcommand)]
        command: EventCommand,
    },
}

/// Project a command is scoped to
#[derive(Args, Debug, Clone)]
pub struct ProjectArgs {
    /// Project slug
    #[arg(long)]
    pub project: Option<String>,

    /// Numeric project id, used in release webhook URLs
    #[arg(long, default_value_t = 1)]
    pub project_id: u64,

    /// Organization slug of the project
    #[arg(long, default_value = "default")]
    pub organization: String,
}

impl ProjectArgs {
    fn project(&self) -> Option<Project> {
        self.project
            .as_ref()
            .map(|slug| Project::new(self.project_id, slug.clone(), self.organization.clone()))
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum PluginCommand {
    /// List visible plugins
    List {
        #[command(flatten)]
        project: ProjectArgs,
    },
    /// Print the view model of one plugin as JSON
    Show {
        /// Plugin slug
        slug: String,
        #[command(flatten)]
        project: ProjectArgs,
        /// Include the normalized configuration fields
        #[arg(long)]
        with_config: bool,
        /// Acting username
        #[arg(long)]
        user: Option<String>,
    },
    /// Enable a plugin for a project (persist setting)
    Enable {
        /// Plugin slug
        slug: String,
        /// Project slug
        #[arg(long)]
        project: String,
    },
    /// Disable a plugin for a project (persist setting)
    Disable {
        /// Plugin slug
        slug: String,
        /// Project slug
        #[arg(long)]
        project: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum EventCommand {
    /// List registered event types
    Types,
    /// Validate a JSON payload against an event schema
    Validate {
        /// Event type, e.g. inbox.inbox_out
        event_type: String,
        /// JSON object with the event attributes
        payload: String,
    },
}

/// Loaded settings, plugins and option store backing every command
pub struct Hub {
    settings: HubSettings,
    registry: PluginRegistry,
    options: Arc<FileOptionStore<LocalStorageProvider>>,
}

impl Hub {
    /// Resolve settings from the config file and CLI overrides, then load plugins
    pub fn load(args: &CliArgs) -> Result<Self> {
        let provider = Arc::new(LocalStorageProvider::new(PathBuf::from(".")));
        let mut settings = load_settings(provider.as_ref(), args.config.as_deref())?;

        if let Some(dir) = &args.plugins_dir {
            settings.plugins_dir = dir.clone();
        }
        if let Some(dir) = &args.options_dir {
            settings.options_dir = dir.clone();
        }
        if let Some(base_url) = &args.base_url {
            settings.base_url = base_url.clone();
        }
        debug!("Using settings {:?}", settings);

        let mut loader = ManifestLoader::new(provider.clone());
        loader.add_plugin_dir(&settings.plugins_dir);
        let mut registry = PluginRegistry::new();
        let count = loader.register_all_plugins(&mut registry)?;
        info!("Loaded {} plugin(s) from {:?}", count, settings.plugins_dir);

        let options = Arc::new(FileOptionStore::new(
            provider,
            settings.options_dir.clone(),
            ConfigFormat::Json,
        ));

        Ok(Self {
            settings,
            registry,
            options,
        })
    }

    fn context(&self) -> SerializerContext {
        SerializerContext::from_settings(self.options.clone(), &self.settings)
    }

    pub fn run_plugin(&self, command: PluginCommand) -> Result<()> {
        match command {
            PluginCommand::List { project } => self.list_plugins(project.project()),
            PluginCommand::Show {
                slug,
                project,
                with_config,
                user,
            } => {
                let user = user.map(|name| User::new(0, name));
                self.show_plugin(&slug, project.project(), with_config, user.as_ref())
            }
            PluginCommand::Enable { slug, project } => self.set_enabled(&slug, &project, true),
            PluginCommand::Disable { slug, project } => self.set_enabled(&slug, &project, false),
        }
    }

    fn list_plugins(&self, project: Option<Project>) -> Result<()> {
        let plugins = self.registry.visible_plugins(project.as_ref(), self.options.as_ref())?;
        if plugins.is_empty() {
            println!("No plugins registered.");
            return Ok(());
        }

        for plugin in plugins {
            let status = match project.as_ref() {
                Some(project) if plugin.is_enabled(Some(project), self.options.as_ref())? => "enabled",
                Some(_) => "disabled",
                None => "available",
            };
            println!(
                "{}\t{}\t{}\t{}",
                plugin.slug(),
                plugin.title(),
                plugin.version().unwrap_or("-"),
                status
            );
        }
        Ok(())
    }

    fn show_plugin(&self, slug: &str, project: Option<Project>, with_config: bool, user: Option<&User>) -> Result<()> {
        let plugin = self.registry.require_plugin(slug)?;
        let value = if with_config {
            PluginWithConfigSerializer::new(project, self.context()).to_value(plugin.as_ref(), user)?
        } else {
            PluginSerializer::new(project, self.context()).to_value(plugin.as_ref(), user)?
        };
        print_json(&value)
    }

    fn set_enabled(&self, slug: &str, project: &str, enabled: bool) -> Result<()> {
        let plugin = self.registry.require_plugin(slug)?;
        if !enabled && !plugin.can_disable() {
            return Err(Error::Other(format!("Plugin '{}' cannot be disabled", slug)));
        }

        let project = Project::new(0, project, "default");
        let key = format!("{}:{}", plugin.option_prefix(), ENABLED_OPTION_SUFFIX);
        self.options.set_value(&project.option_scope(), &key, Value::Bool(enabled))?;
        info!("Persisted {}={} for project '{}'", key, enabled, project.slug);

        let state = if enabled { "enabled" } else { "disabled" };
        println!("Plugin '{}' {} for project '{}'.", slug, state, project.slug);
        Ok(())
    }
}

fn load_settings(provider: &dyn StorageProvider, path: Option<&Path>) -> Result<HubSettings> {
    match path {
        Some(path) => HubSettings::load(provider, path),
        None => {
            let default_path = Path::new(DEFAULT_SETTINGS_FILE);
            if provider.is_file(default_path) {
                HubSettings::load(provider, default_path)
            } else {
                Ok(HubSettings::default())
            }
        }
    }
}

pub fn run_event(command: EventCommand) -> Result<()> {
    let registry = EventRegistry::global();
    match command {
        EventCommand::Types => {
            for event_type in registry.event_types() {
                println!("{}", event_type);
            }
            Ok(())
        }
        EventCommand::Validate { event_type, payload } => {
            let payload: Value = serde_json::from_str(&payload)
                .map_err(|e| Error::Other(format!("Invalid JSON payload: {}", e)))?;
            let event = registry.build(&event_type, &payload)?;
            print_json(&event)
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let rendered = serde_json::to_string_pretty(value)
        .map_err(|e| Error::Other(format!("Failed to encode JSON: {}", e)))?;
    println!("{}", rendered);
    Ok(())
}
