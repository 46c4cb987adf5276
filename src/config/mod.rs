// ABOUTME: Configuration types and parsing for ananeo.yml.
// ABOUTME: Registry prefix, engine image name, daemon config path, probe tuning.

mod init;
mod probe;

pub use init::init_config;
pub use probe::ProbeConfig;

use crate::error::{Error, Result};
use crate::runtime::RuntimeConfig;
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const CONFIG_FILENAME: &str = "ananeo.yml";
pub const CONFIG_FILENAME_ALT: &str = "ananeo.yaml";

#[derive(Debug, Clone, Deserialize)]
pub struct EngineConfig {
    /// Registry prefix the engine image lives under (e.g. `docker.io/acme`).
    pub registry_prefix: String,

    /// Engine image name under the prefix.
    #[serde(default = "default_engine_image")]
    pub engine_image: String,

    /// Engine daemon configuration file, bind-mounted into the engine task.
    #[serde(default = "default_config_file")]
    pub config_file: PathBuf,

    /// Version activated when the command line does not name one.
    #[serde(default)]
    pub version: Option<String>,

    #[serde(default)]
    pub probe: ProbeConfig,

    /// Explicit runtime/socket override; auto-detected when absent.
    #[serde(default)]
    pub runtime: Option<RuntimeConfig>,
}

impl EngineConfig {
    pub fn from_yaml(content: &str) -> Result<Self> {
        let config: EngineConfig = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    pub fn discover(dir: &Path) -> Result<Self> {
        let candidates = [dir.join(CONFIG_FILENAME), dir.join(CONFIG_FILENAME_ALT)];

        for path in &candidates {
            if path.exists() {
                return Self::load(path);
            }
        }

        Err(Error::ConfigNotFound(dir.to_path_buf()))
    }

    /// Reference components are validated here, at the boundary, so that
    /// reference construction stays infallible downstream.
    fn validate(&self) -> Result<()> {
        if self.registry_prefix.is_empty() {
            return Err(Error::InvalidConfig(
                "registry_prefix cannot be empty".to_string(),
            ));
        }
        if self.registry_prefix.starts_with('/')
            || self.registry_prefix.ends_with('/')
            || self.registry_prefix.contains(char::is_whitespace)
        {
            return Err(Error::InvalidConfig(format!(
                "invalid registry_prefix: {}",
                self.registry_prefix
            )));
        }
        if self.engine_image.is_empty()
            || self.engine_image.contains('/')
            || self.engine_image.contains(':')
        {
            return Err(Error::InvalidConfig(format!(
                "invalid engine_image: {}",
                self.engine_image
            )));
        }
        Ok(())
    }

    pub fn template() -> Self {
        EngineConfig {
            registry_prefix: "docker.io/acme".to_string(),
            engine_image: default_engine_image(),
            config_file: default_config_file(),
            version: None,
            probe: ProbeConfig::default(),
            runtime: None,
        }
    }
}

fn default_engine_image() -> String {
    "engine".to_string()
}

fn default_config_file() -> PathBuf {
    PathBuf::from("/etc/engine/daemon.json")
}
