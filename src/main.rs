//! Entry point for the unrolling scroll.
//!
//! - Parse the optional config path from the command line.
//! - Load configuration and apply its log level.
//! - Validate it by building the coordinator, then launch the window.

mod app;
mod asset_io;
mod audio;

use crate::app::run_app;
use anyhow::{Context, Result};
use std::env;
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, fmt, prelude::*, reload};
use unroll_core::Coordinator;
use unroll_core::config::load_config;

type ReloadHandle = reload::Handle<EnvFilter, tracing_subscriber::Registry>;

const DEFAULT_CONFIG_PATH: &str = "conf/config.toml";

fn main() {
    let reload_handle = init_tracing();
    if let Err(err) = run(&reload_handle) {
        error!("{err:?}");
        std::process::exit(1);
    }
}

fn run(reload_handle: &ReloadHandle) -> Result<()> {
    let config_path = parse_args();
    let config = load_config(&config_path);
    set_log_level(reload_handle, config.log_level.as_filter_str());

    let asset_root = asset_root(&config_path);
    info!(
        config = %config_path.display(),
        assets = %asset_root.display(),
        level = %config.log_level,
        "Starting unrolling scroll"
    );
    info!(
        images = config.image_assets.len(),
        audio = config.audio_assets.len(),
        segments = config.poem_segments.len(),
        total_duration_secs = config.total_duration_secs,
        "Active timeline configuration"
    );

    let coordinator = Coordinator::new(config).context("Invalid configuration")?;
    run_app(coordinator, asset_root).context("Failed to start the GUI")?;
    Ok(())
}

fn parse_args() -> PathBuf {
    env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH))
}

/// Asset paths in the config are relative to the directory above the config's
/// own directory, so `conf/config.toml` resolves assets from the working dir.
fn asset_root(config_path: &Path) -> PathBuf {
    config_path
        .parent()
        .and_then(Path::parent)
        .filter(|dir| !dir.as_os_str().is_empty())
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."))
}

fn init_tracing() -> ReloadHandle {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
    let (filter_layer, handle) = reload::Layer::new(env_filter);
    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(true)
                .with_file(true)
                .with_line_number(true)
                .with_filter(filter_layer),
        )
        .init();
    warn!("Logging initialized; override level with config.log_level or RUST_LOG");
    handle
}

fn set_log_level(handle: &ReloadHandle, level: &str) {
    let parsed = EnvFilter::builder()
        .parse(level)
        .unwrap_or_else(|_| EnvFilter::new("debug"));
    if let Err(err) = handle.modify(|filter| *filter = parsed.clone()) {
        warn!(%level, "Failed to update log level from config: {err}");
    } else {
        info!(%level, "Applied log level from config");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_resolves_assets_from_the_working_dir() {
        assert_eq!(asset_root(Path::new("conf/config.toml")), PathBuf::from("."));
        assert_eq!(asset_root(Path::new("config.toml")), PathBuf::from("."));
    }

    #[test]
    fn nested_config_resolves_assets_from_its_grandparent() {
        assert_eq!(
            asset_root(Path::new("/srv/scroll/conf/config.toml")),
            PathBuf::from("/srv/scroll")
        );
    }
}
