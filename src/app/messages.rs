use std::time::Instant;
use unroll_core::audio::Track;

use crate::asset_io::LoadedAsset;

/// Messages emitted by the UI and the runtime.
#[derive(Debug, Clone)]
pub enum Message {
    AssetLoaded {
        index: usize,
        loaded: LoadedAsset,
    },
    ScrollClicked,
    Frame(Instant),
    Tick(Instant),
    WindowResized {
        width: f32,
        height: f32,
    },
    PlaybackFailed {
        track: Track,
        reason: String,
    },
}
