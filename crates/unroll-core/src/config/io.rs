use super::models::AppConfig;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use tracing::{debug, info, warn};

/// Load configuration from the given path, falling back to defaults on error.
pub fn load_config(path: &Path) -> AppConfig {
    let contents = match fs::read_to_string(path) {
        Ok(data) => {
            info!(path = %path.display(), "Loaded base config");
            data
        }
        Err(err) => {
            warn!(
                path = %path.display(),
                "Falling back to default config: {err}"
            );
            return AppConfig::default();
        }
    };

    match parse_config(&contents) {
        Ok(cfg) => {
            debug!(
                segments = cfg.poem_segments.len(),
                images = cfg.image_assets.len(),
                audio = cfg.audio_assets.len(),
                "Parsed configuration from disk"
            );
            cfg
        }
        Err(err) => {
            warn!(path = %path.display(), "Invalid config TOML: {err:#}");
            AppConfig::default()
        }
    }
}

pub fn parse_config(contents: &str) -> Result<AppConfig> {
    toml::from_str::<AppConfig>(contents).context("Parsing config tables")
}

pub fn serialize_config(config: &AppConfig) -> Result<String> {
    toml::to_string(config).context("Serializing config tables")
}
