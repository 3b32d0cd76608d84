//! Configuration model loaded from external sources.

use std::path::Path;

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use validator::Validate;

#[derive(Clone, Debug, Deserialize, Validate)]
/// Server settings shared across handlers.
pub struct ServerConfig {
    pub address: String,
    pub port: u16,
    pub templates_dir: String,
    pub assets_dir: String,
    /// Key for the session and flash cookies.
    #[validate(length(min = 64))]
    pub secret: String,
    /// Base URL of the passenger API; the add endpoint is `{api_base_url}/add`.
    #[validate(url)]
    pub api_base_url: String,
    /// Prefix for relative attachment locators returned by the API.
    #[serde(default)]
    #[validate(url)]
    pub files_base_url: Option<String>,
    #[validate(range(min = 1))]
    pub api_timeout_secs: u64,
    #[validate(range(min = 1))]
    pub max_attachment_bytes: usize,
    #[validate(range(min = 1))]
    pub workspace_idle_minutes: i64,
    /// Upper bound on live workspaces (one per browser session).
    #[serde(default = "default_max_workspaces")]
    #[validate(range(min = 1))]
    pub max_workspaces: usize,
}

fn default_max_workspaces() -> usize {
    1000
}

impl ServerConfig {
    /// Reads `{dir}/default.yaml`, the optional `{dir}/{app_env}.yaml` overrides
    /// and `APP_*` environment variables, in that order.
    pub fn load(dir: &Path, app_env: &str) -> Result<Self, ConfigError> {
        let default = dir.join("default");
        let overrides = dir.join(app_env);
        Config::builder()
            .add_source(File::with_name(&default.to_string_lossy()))
            .add_source(File::with_name(&overrides.to_string_lossy()).required(false))
            .add_source(Environment::with_prefix("APP"))
            .build()?
            .try_deserialize()
    }
}
