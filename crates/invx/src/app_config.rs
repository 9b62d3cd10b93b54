//! 🔧 App Configuration: the sacred TOML-to-struct pipeline.
//!
//! 📡 Three layers, lowest to highest priority:
//! 1. serde defaults (a localhost cluster, a 30s heartbeat, the built-in catalogs)
//! 2. `INVX_*` environment variables, nested keys split on `__`
//! 3. an optional TOML file
//!
//! ...and then the CLI gets the last word through [`ConfigOverrides`].
//! The result is one immutable [`AppConfig`], built once, handed around by reference. 🦆

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use figment::{
    Figment,
    providers::{Env, Format, Toml},
};
use serde::Deserialize;
use tracing::info;

use crate::catalog::Catalog;
use crate::discovery::CloudConfig;
use crate::error::InventoryError;

/// 📦 Everything the app needs to know about itself.
#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    /// 🔒 CSV with `username,password` columns. First data row wins.
    #[serde(default = "default_credentials_file")]
    pub credentials_file: PathBuf,
    /// 📡 Where the documents go, or how to find out.
    #[serde(default)]
    pub endpoint: EndpointConfig,
    #[serde(default)]
    pub runtime: RuntimeConfig,
    /// 📚 What gets reported. Defaults to the built-in lineup.
    #[serde(default)]
    pub catalog: Catalog,
}

/// 🎭 Static URL, or ask the Elastic Cloud control plane.
#[derive(Debug, Deserialize, Clone)]
pub enum EndpointConfig {
    Static { url: String },
    Discovery(CloudConfig),
}

impl Default for EndpointConfig {
    fn default() -> Self {
        EndpointConfig::Static {
            url: "http://localhost:9200".to_string(),
        }
    }
}

/// ⏱️ The runtime knobs: how often, how long to wait, and whether to actually send.
#[derive(Debug, Deserialize, Clone)]
pub struct RuntimeConfig {
    /// 💤 Pause between steady-state software sends.
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,
    /// 📡 Upper bound on each bulk POST.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    /// 🔭 Upper bound on each control-plane call and credential probe.
    #[serde(default = "default_probe_timeout_secs")]
    pub probe_timeout_secs: u64,
    /// 🧪 Record payloads in memory instead of POSTing them.
    #[serde(default)]
    pub dry_run: bool,
}

fn default_credentials_file() -> PathBuf {
    PathBuf::from("credentials.csv")
}

fn default_interval_secs() -> u64 {
    30
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_probe_timeout_secs() -> u64 {
    10
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            interval_secs: default_interval_secs(),
            request_timeout_secs: default_request_timeout_secs(),
            probe_timeout_secs: default_probe_timeout_secs(),
            dry_run: false,
        }
    }
}

impl RuntimeConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn probe_timeout(&self) -> Duration {
        Duration::from_secs(self.probe_timeout_secs)
    }
}

/// 🚩 Whatever the command line said. `None`/`false` means "don't touch".
#[derive(Debug, Default, Clone)]
pub struct ConfigOverrides {
    pub credentials_file: Option<PathBuf>,
    pub endpoint: Option<String>,
    pub discover: bool,
    pub api_key_file: Option<PathBuf>,
    pub interval_secs: Option<u64>,
    pub dry_run: bool,
}

impl AppConfig {
    /// 🚩 Layer the CLI on top. A static `--endpoint` beats `--discover` if both sneak through.
    pub fn with_overrides(mut self, overrides: ConfigOverrides) -> Self {
        if let Some(credentials_file) = overrides.credentials_file {
            self.credentials_file = credentials_file;
        }
        if overrides.discover && !matches!(self.endpoint, EndpointConfig::Discovery(_)) {
            self.endpoint = EndpointConfig::Discovery(CloudConfig::default());
        }
        if let Some(url) = overrides.endpoint {
            self.endpoint = EndpointConfig::Static { url };
        }
        if let (Some(key_file), EndpointConfig::Discovery(cloud)) =
            (overrides.api_key_file, &mut self.endpoint)
        {
            cloud.api_key_file = Some(key_file);
        }
        if let Some(interval_secs) = overrides.interval_secs {
            self.runtime.interval_secs = interval_secs;
        }
        if overrides.dry_run {
            self.runtime.dry_run = true;
        }
        self
    }

    /// 🔍 Catch the configs that parse fine but can't possibly work.
    pub fn validate(&self) -> Result<(), InventoryError> {
        self.catalog.validate()?;
        if let EndpointConfig::Static { url } = &self.endpoint {
            if url.trim().is_empty() {
                return Err(InventoryError::configuration("the static endpoint URL is empty"));
            }
        }
        Ok(())
    }
}

/// 🚀 Load the config from `INVX_*` env vars and, if given, a TOML file. TOML wins on conflicts.
///
/// No file means env vars (and defaults) only. We don't go looking for an
/// `invx.toml` nobody asked us to read.
pub fn load_config(config_file_name: Option<&Path>) -> anyhow::Result<AppConfig> {
    info!(
        "🔧 Loading configuration: {:#?}",
        config_file_name.unwrap_or(Path::new(""))
    );

    let config = Figment::new().merge(Env::prefixed("INVX_").split("__"));
    let config = match config_file_name {
        Some(file_name) => config.merge(Toml::file(file_name)),
        None => config,
    };

    let context_msg = match config_file_name {
        Some(path) => format!(
            "💀 Failed to parse configuration from file '{}' and environment variables (INVX_*).",
            path.display()
        ),
        None => "💀 Failed to parse configuration from environment variables (INVX_*). \
                 No file was provided, so this one's all on the environment."
            .to_string(),
    };

    config.extract().context(context_msg)
}
