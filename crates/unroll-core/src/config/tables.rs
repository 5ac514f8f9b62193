use super::defaults;
use super::models::{AppConfig, LogLevel, PoemSegmentConfig};
use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize, serde::Serialize)]
pub(super) struct ConfigTables {
    #[serde(default)]
    assets: AssetsConfig,
    #[serde(default)]
    loading: LoadingConfig,
    #[serde(default)]
    timeline: TimelineConfig,
    #[serde(default)]
    audio: AudioConfig,
    #[serde(default)]
    window: WindowConfig,
    #[serde(default)]
    logging: LoggingConfig,
    #[serde(default)]
    poem: PoemConfig,
}

impl From<ConfigTables> for AppConfig {
    fn from(tables: ConfigTables) -> Self {
        AppConfig {
            scroll_image: tables.assets.scroll_image,
            image_assets: tables.assets.images,
            audio_assets: tables.assets.audio,
            per_asset_timeout_ms: tables.loading.per_asset_timeout_ms,
            overall_timeout_ms: tables.loading.overall_timeout_ms,
            reveal_delay_ms: tables.loading.reveal_delay_ms,
            total_duration_secs: tables.timeline.total_duration_secs,
            fill_count: tables.timeline.fill_count,
            opening_delay_ms: tables.timeline.opening_delay_ms,
            poem_lead_ms: tables.timeline.poem_lead_ms,
            frame_interval_ms: tables.timeline.frame_interval_ms,
            content_height_ratio: tables.timeline.content_height_ratio,
            timer_poll_ms: tables.timeline.timer_poll_ms,
            open_sound: tables.audio.open_sound,
            music: tables.audio.music,
            open_sound_volume: tables.audio.open_sound_volume,
            music_volume: tables.audio.music_volume,
            music_fallback_delay_ms: tables.audio.music_fallback_delay_ms,
            window_width: tables.window.width,
            window_height: tables.window.height,
            log_level: tables.logging.log_level,
            poem_segments: tables.poem.segments,
        }
    }
}

impl From<AppConfig> for ConfigTables {
    fn from(config: AppConfig) -> Self {
        ConfigTables {
            assets: AssetsConfig {
                scroll_image: config.scroll_image,
                images: config.image_assets,
                audio: config.audio_assets,
            },
            loading: LoadingConfig {
                per_asset_timeout_ms: config.per_asset_timeout_ms,
                overall_timeout_ms: config.overall_timeout_ms,
                reveal_delay_ms: config.reveal_delay_ms,
            },
            timeline: TimelineConfig {
                total_duration_secs: config.total_duration_secs,
                fill_count: config.fill_count,
                opening_delay_ms: config.opening_delay_ms,
                poem_lead_ms: config.poem_lead_ms,
                frame_interval_ms: config.frame_interval_ms,
                content_height_ratio: config.content_height_ratio,
                timer_poll_ms: config.timer_poll_ms,
            },
            audio: AudioConfig {
                open_sound: config.open_sound,
                music: config.music,
                open_sound_volume: config.open_sound_volume,
                music_volume: config.music_volume,
                music_fallback_delay_ms: config.music_fallback_delay_ms,
            },
            window: WindowConfig {
                width: config.window_width,
                height: config.window_height,
            },
            logging: LoggingConfig {
                log_level: config.log_level,
            },
            poem: PoemConfig {
                segments: config.poem_segments,
            },
        }
    }
}

#[derive(Debug, Clone, Deserialize, serde::Serialize)]
struct AssetsConfig {
    #[serde(default = "defaults::default_scroll_image")]
    scroll_image: String,
    #[serde(default = "defaults::default_image_assets")]
    images: Vec<String>,
    #[serde(default = "defaults::default_audio_assets")]
    audio: Vec<String>,
}

impl Default for AssetsConfig {
    fn default() -> Self {
        AssetsConfig {
            scroll_image: defaults::default_scroll_image(),
            images: defaults::default_image_assets(),
            audio: defaults::default_audio_assets(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, serde::Serialize)]
struct LoadingConfig {
    #[serde(default = "defaults::default_per_asset_timeout_ms")]
    per_asset_timeout_ms: u64,
    #[serde(default = "defaults::default_overall_timeout_ms")]
    overall_timeout_ms: u64,
    #[serde(default = "defaults::default_reveal_delay_ms")]
    reveal_delay_ms: u64,
}

impl Default for LoadingConfig {
    fn default() -> Self {
        LoadingConfig {
            per_asset_timeout_ms: defaults::default_per_asset_timeout_ms(),
            overall_timeout_ms: defaults::default_overall_timeout_ms(),
            reveal_delay_ms: defaults::default_reveal_delay_ms(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, serde::Serialize)]
struct TimelineConfig {
    #[serde(default = "defaults::default_total_duration_secs")]
    total_duration_secs: f64,
    #[serde(default = "defaults::default_fill_count")]
    fill_count: u32,
    #[serde(default = "defaults::default_opening_delay_ms")]
    opening_delay_ms: u64,
    #[serde(default = "defaults::default_poem_lead_ms")]
    poem_lead_ms: u64,
    #[serde(default = "defaults::default_frame_interval_ms")]
    frame_interval_ms: f64,
    #[serde(default = "defaults::default_content_height_ratio")]
    content_height_ratio: f32,
    #[serde(default = "defaults::default_timer_poll_ms")]
    timer_poll_ms: u64,
}

impl Default for TimelineConfig {
    fn default() -> Self {
        TimelineConfig {
            total_duration_secs: defaults::default_total_duration_secs(),
            fill_count: defaults::default_fill_count(),
            opening_delay_ms: defaults::default_opening_delay_ms(),
            poem_lead_ms: defaults::default_poem_lead_ms(),
            frame_interval_ms: defaults::default_frame_interval_ms(),
            content_height_ratio: defaults::default_content_height_ratio(),
            timer_poll_ms: defaults::default_timer_poll_ms(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, serde::Serialize)]
struct AudioConfig {
    #[serde(default = "defaults::default_open_sound")]
    open_sound: Option<String>,
    #[serde(default = "defaults::default_music")]
    music: Option<String>,
    #[serde(default = "defaults::default_open_sound_volume")]
    open_sound_volume: f32,
    #[serde(default = "defaults::default_music_volume")]
    music_volume: f32,
    #[serde(default = "defaults::default_music_fallback_delay_ms")]
    music_fallback_delay_ms: u64,
}

impl Default for AudioConfig {
    fn default() -> Self {
        AudioConfig {
            open_sound: defaults::default_open_sound(),
            music: defaults::default_music(),
            open_sound_volume: defaults::default_open_sound_volume(),
            music_volume: defaults::default_music_volume(),
            music_fallback_delay_ms: defaults::default_music_fallback_delay_ms(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, serde::Serialize)]
struct WindowConfig {
    #[serde(default = "defaults::default_window_width")]
    width: f32,
    #[serde(default = "defaults::default_window_height")]
    height: f32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        WindowConfig {
            width: defaults::default_window_width(),
            height: defaults::default_window_height(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, serde::Serialize)]
struct LoggingConfig {
    #[serde(default = "defaults::default_log_level")]
    log_level: LogLevel,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            log_level: defaults::default_log_level(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, serde::Serialize)]
struct PoemConfig {
    #[serde(default = "defaults::default_poem_segments")]
    segments: Vec<PoemSegmentConfig>,
}

impl Default for PoemConfig {
    fn default() -> Self {
        PoemConfig {
            segments: defaults::default_poem_segments(),
        }
    }
}
