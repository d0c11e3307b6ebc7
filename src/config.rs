use serde::Deserialize;
use std::env::{self, VarError};
use std::fs;
use std::path::Path;

use crate::constants::{API_KEY_ENV, DEFAULT_CHANNELS_API_URL};
use crate::error::{MembershipError, Result};

pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub youtube: YoutubeConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct YoutubeConfig {
    pub api_base_url: String,
    pub api_key: Option<String>,
    pub timeout_seconds: u64,
}

impl Default for YoutubeConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_CHANNELS_API_URL.to_string(),
            api_key: None,
            timeout_seconds: 10,
        }
    }
}

impl Config {
    /// Loads the file at `path`, falling back to defaults when it does not exist.
    /// `YOUTUBE_API_KEY` overrides the key from the file.
    pub fn load_from(path: &Path) -> Result<Self> {
        let mut config = if path.exists() {
            let config_content = fs::read_to_string(path).map_err(|e| {
                MembershipError::Config(format!(
                    "Failed to read config file '{}': {}",
                    path.display(),
                    e
                ))
            })?;
            Self::parse(&config_content)?
        } else {
            Self::default()
        };

        match env::var(API_KEY_ENV) {
            Ok(key) if !key.trim().is_empty() => config.youtube.api_key = Some(key),
            Ok(_) | Err(VarError::NotPresent) => {}
            Err(e) => return Err(e.into()),
        }

        Ok(config)
    }

    pub fn parse(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        if config.youtube.timeout_seconds == 0 {
            return Err(MembershipError::Config(
                "youtube.timeout_seconds must be greater than zero".to_string(),
            ));
        }
        Ok(config)
    }
}
