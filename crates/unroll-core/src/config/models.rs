use serde::Deserialize;

/// Flat configuration consumed by the coordinator and the host window.
///
/// On disk the values are grouped into tables (see `tables.rs`); this struct
/// is what the rest of the program reads.
#[derive(Debug, Clone, PartialEq, Deserialize, serde::Serialize)]
#[serde(from = "super::tables::ConfigTables", into = "super::tables::ConfigTables")]
pub struct AppConfig {
    pub scroll_image: String,
    pub image_assets: Vec<String>,
    pub audio_assets: Vec<String>,
    pub per_asset_timeout_ms: u64,
    pub overall_timeout_ms: u64,
    pub reveal_delay_ms: u64,
    pub total_duration_secs: f64,
    pub fill_count: u32,
    pub opening_delay_ms: u64,
    pub poem_lead_ms: u64,
    pub frame_interval_ms: f64,
    pub content_height_ratio: f32,
    pub timer_poll_ms: u64,
    pub open_sound: Option<String>,
    pub music: Option<String>,
    pub open_sound_volume: f32,
    pub music_volume: f32,
    pub music_fallback_delay_ms: u64,
    pub window_width: f32,
    pub window_height: f32,
    pub log_level: LogLevel,
    pub poem_segments: Vec<PoemSegmentConfig>,
}

impl Default for AppConfig {
    fn default() -> Self {
        super::tables::ConfigTables::default().into()
    }
}

impl AppConfig {
    pub fn total_duration_ms(&self) -> f64 {
        self.total_duration_secs * 1000.0
    }
}

/// One column of poem text as written in the config.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, serde::Serialize)]
pub struct PoemSegmentConfig {
    pub text: String,
    /// Slot index at which the column appears; defaults to its position.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delay: Option<u32>,
    /// Title columns never fade.
    #[serde(default)]
    pub title: bool,
}

/// Supported logging verbosity levels.
#[derive(Debug, Clone, Copy, Deserialize, serde::Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    #[default]
    Debug,
    Info,
    Warn,
    Error,
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_filter_str())
    }
}

impl LogLevel {
    pub fn as_filter_str(self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}
