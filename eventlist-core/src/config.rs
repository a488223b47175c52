//! Configuration for the eventlist client and development server.
//!
//! Both are read from `~/.config/eventlist/config.toml` (optional), then
//! overridden by `EVENTLIST_*` environment variables. Command-line flags
//! are applied on top by the binaries.

use std::path::{Path, PathBuf};

use config::{Config, Environment, File};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::{EventListError, EventListResult};

static DEFAULT_BASE_URL: &str = "http://localhost:3000";
static DEFAULT_RESOURCE: &str = "events";
const DEFAULT_PORT: u16 = 3000;

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_resource() -> String {
    DEFAULT_RESOURCE.to_string()
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

/// Where the client finds the REST resource.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_resource")]
    pub resource: String,

    /// Request timeout. Requests wait indefinitely when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig {
            base_url: default_base_url(),
            resource: default_resource(),
            timeout_secs: None,
        }
    }
}

impl ClientConfig {
    /// Load from the user config file, creating a commented default if
    /// none exists yet.
    pub fn load() -> EventListResult<Self> {
        let path = config_path()?;
        if !path.exists() {
            create_default_config(&path)?;
        }
        load_layered(Some(&path))
    }

    /// Load from an explicit file (if any) plus the environment.
    pub fn load_from(path: Option<&Path>) -> EventListResult<Self> {
        load_layered(path)
    }
}

/// Settings for `eventlist-server`.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    #[serde(default = "default_port")]
    pub port: u16,

    /// JSON file the collection is loaded from and saved to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_file: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            port: default_port(),
            data_file: None,
        }
    }
}

impl ServerConfig {
    pub fn load() -> EventListResult<Self> {
        let path = config_path()?;
        load_layered(Some(&path))
    }

    pub fn load_from(path: Option<&Path>) -> EventListResult<Self> {
        load_layered(path)
    }
}

/// Path of the shared config file.
pub fn config_path() -> EventListResult<PathBuf> {
    let config_dir = dirs::config_dir()
        .ok_or_else(|| EventListError::Config("Could not determine config directory".into()))?
        .join("eventlist");

    Ok(config_dir.join("config.toml"))
}

fn load_layered<T: DeserializeOwned>(path: Option<&Path>) -> EventListResult<T> {
    let mut builder = Config::builder();
    if let Some(path) = path {
        builder = builder.add_source(File::from(path.to_path_buf()).required(false));
    }

    builder
        .add_source(Environment::with_prefix("EVENTLIST"))
        .build()
        .map_err(|e| EventListError::Config(e.to_string()))?
        .try_deserialize()
        .map_err(|e| EventListError::Config(e.to_string()))
}

/// Create a default config file with all options commented out.
pub fn create_default_config(path: &Path) -> EventListResult<()> {
    let contents = format!(
        "\
# eventlist configuration

# Where the events API lives:
# base_url = \"{DEFAULT_BASE_URL}\"
# resource = \"{DEFAULT_RESOURCE}\"

# Give up on requests after this many seconds:
# timeout_secs = 10

# eventlist-server settings:
# port = {DEFAULT_PORT}
# data_file = \"~/eventlist-db.json\"
"
    );

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| {
            EventListError::Config(format!("Could not create config directory: {e}"))
        })?;
    }

    std::fs::write(path, contents)
        .map_err(|e| EventListError::Config(format!("Could not write config file: {e}")))?;

    Ok(())
}

/// Serialize a config back to TOML, e.g. for `--print-config` style output.
pub fn to_toml<T: Serialize>(config: &T) -> EventListResult<String> {
    toml::to_string_pretty(config).map_err(|e| EventListError::Config(e.to_string()))
}
