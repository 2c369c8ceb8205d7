/// Application name
pub const APP_NAME: &str = "pluginhub";

/// Application version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Project option holding the release webhook token
pub const RELEASE_TOKEN_OPTION: &str = "pluginhub:release-token";

/// Per-plugin option suffix storing the project enabled state (`<slug>:enabled`)
pub const ENABLED_OPTION_SUFFIX: &str = "enabled";

/// Path template of the release webhook endpoint
pub const RELEASE_HOOK_PATH: &str = "/api/hooks/release";

/// Default public base URL used to absolutize links
pub const DEFAULT_BASE_URL: &str = "http://localhost:9000";

/// Default URL prefix under which static plugin assets are served
pub const DEFAULT_STATIC_PREFIX: &str = "/_static";

/// Default plugins directory
pub const DEFAULT_PLUGINS_DIR: &str = "plugins";

/// Default options directory
pub const DEFAULT_OPTIONS_DIR: &str = "options";

/// Default settings file looked up in the working directory
pub const DEFAULT_SETTINGS_FILE: &str = "pluginhub.toml";

/// Config field type whose stored value is never echoed back
pub const SECRET_FIELD_TYPE: &str = "secret";

/// Config field type used when a descriptor does not name one
pub const DEFAULT_FIELD_TYPE: &str = "text";
