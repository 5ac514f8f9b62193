//! Configuration loading for the scroll viewer.
//!
//! All tunable constants of the unrolling sequence are centralized here and
//! loaded from `conf/config.toml` if present. Any missing or invalid entries
//! fall back to defaults so the stage can still launch.

mod defaults;
mod io;
mod models;
mod tables;

pub use io::{load_config, parse_config, serialize_config};
pub use models::{AppConfig, LogLevel, PoemSegmentConfig};
