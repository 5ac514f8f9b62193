use super::models::{LogLevel, PoemSegmentConfig};

pub(crate) fn default_scroll_image() -> String {
    "assets/image.png".to_string()
}

pub(crate) fn default_image_assets() -> Vec<String> {
    vec![
        default_scroll_image(),
        "assets/scroll_paper.png".to_string(),
        "assets/handle_texture.png".to_string(),
    ]
}

pub(crate) fn default_audio_assets() -> Vec<String> {
    vec!["assets/open.wav".to_string(), "assets/music.mp3".to_string()]
}

pub(crate) fn default_per_asset_timeout_ms() -> u64 {
    3_000
}

pub(crate) fn default_overall_timeout_ms() -> u64 {
    10_000
}

pub(crate) fn default_reveal_delay_ms() -> u64 {
    500
}

pub(crate) fn default_total_duration_secs() -> f64 {
    60.0
}

pub(crate) fn default_fill_count() -> u32 {
    6
}

pub(crate) fn default_opening_delay_ms() -> u64 {
    2_800
}

pub(crate) fn default_poem_lead_ms() -> u64 {
    500
}

pub(crate) fn default_frame_interval_ms() -> f64 {
    1000.0 / 60.0
}

pub(crate) fn default_content_height_ratio() -> f32 {
    0.7
}

pub(crate) fn default_timer_poll_ms() -> u64 {
    16
}

pub(crate) fn default_open_sound() -> Option<String> {
    Some("assets/open.wav".to_string())
}

pub(crate) fn default_music() -> Option<String> {
    Some("assets/music.mp3".to_string())
}

pub(crate) fn default_open_sound_volume() -> f32 {
    0.8
}

pub(crate) fn default_music_volume() -> f32 {
    0.5
}

pub(crate) fn default_music_fallback_delay_ms() -> u64 {
    3_000
}

pub(crate) fn default_window_width() -> f32 {
    1280.0
}

pub(crate) fn default_window_height() -> f32 {
    800.0
}

pub(crate) fn default_log_level() -> LogLevel {
    LogLevel::Debug
}

/// Zhang Ruoxu's "Spring River in the Flower Moon Night", first twelve
/// couplets, one column each, with the title in front.
pub(crate) fn default_poem_segments() -> Vec<PoemSegmentConfig> {
    const COLUMNS: [&str; 12] = [
        "春江潮水连海平，海上明月共潮生。",
        "滟滟随波千万里，何处春江无月明！",
        "江流宛转绕芳甸，月照花林皆似霰。",
        "空里流霜不觉飞，汀上白沙看不见。",
        "江天一色无纤尘，皎皎空中孤月轮。",
        "江畔何人初见月？江月何年初照人？",
        "人生代代无穷已，江月年年望相似。",
        "不知江月待何人，但见长江送流水。",
        "白云一片去悠悠，青枫浦上不胜愁。",
        "谁家今夜扁舟子？何处相思明月楼？",
        "可怜楼上月徘徊，应照离人妆镜台。",
        "玉户帘中卷不去，捣衣砧上拂还来。",
    ];
    let mut segments = vec![PoemSegmentConfig {
        text: "春江花月夜".to_string(),
        delay: Some(0),
        title: true,
    }];
    segments.extend(COLUMNS.iter().map(|text| PoemSegmentConfig {
        text: (*text).to_string(),
        delay: None,
        title: false,
    }));
    segments
}
