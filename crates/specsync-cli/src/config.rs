//! CLI configuration: `.specsync/config.toml` plus environment overrides.
//!
//! The auth token is environment-only and never read from disk.

use serde::Deserialize;
use std::fs;
use std::path::Path;

pub const CONFIG_PATH: &str = ".specsync/config.toml";
const DEFAULT_ENDPOINT: &str = "https://api.specsync.dev/v1/graphql";

const ENV_ENDPOINT: &str = "SPECSYNC_ENDPOINT";
const ENV_ACTOR: &str = "SPECSYNC_ACTOR";
const ENV_TOKEN: &str = "SPECSYNC_TOKEN";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {0}: {1}")]
    Io(String, String),

    #[error("failed to parse {0}: {1}")]
    Parse(String, String),
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct ConfigFile {
    endpoint: Option<String>,
    actor: Option<String>,
}

/// Resolved CLI configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub endpoint: String,
    pub actor: Option<String>,
    pub token: Option<String>,
}

impl Config {
    /// Load `.specsync/config.toml` from the working directory, apply
    /// environment overrides, and fall back to defaults when absent.
    pub fn load() -> Result<Config, ConfigError> {
        Config::load_from(Path::new(CONFIG_PATH))
    }

    fn load_from(path: &Path) -> Result<Config, ConfigError> {
        let file = if path.exists() {
            let raw = fs::read_to_string(path)
                .map_err(|e| ConfigError::Io(path.display().to_string(), e.to_string()))?;
            toml::from_str::<ConfigFile>(&raw)
                .map_err(|e| ConfigError::Parse(path.display().to_string(), e.to_string()))?
        } else {
            ConfigFile::default()
        };

        let endpoint = std::env::var(ENV_ENDPOINT)
            .ok()
            .filter(|v| !v.is_empty())
            .or(file.endpoint)
            .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());
        let actor = std::env::var(ENV_ACTOR)
            .ok()
            .filter(|v| !v.is_empty())
            .or(file.actor);
        let token = std::env::var(ENV_TOKEN).ok().filter(|v| !v.is_empty());

        Ok(Config {
            endpoint,
            actor,
            token,
        })
    }
}
