//! Failure taxonomy for the unrolling sequence.
//!
//! Nothing that happens once the window is up is fatal: every runtime failure
//! is a [`Degradation`] that skips one effect and lets the sequence continue.
//! Only a broken setup ([`SetupError`]) stops the program, and it does so
//! before any animation starts.

use crate::audio::Track;
use thiserror::Error;

/// A runtime failure that was absorbed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Degradation {
    #[error("asset {source_locator} failed to load: {reason}")]
    AssetLoadFailure {
        source_locator: String,
        reason: String,
    },
    #[error("asset {source_locator} did not load within {timeout_ms} ms")]
    AssetLoadTimeout {
        source_locator: String,
        timeout_ms: u64,
    },
    #[error("playback of {track} was rejected: {reason}")]
    PlaybackRejected { track: Track, reason: String },
    #[error(
        "scroll image ({content_width:.1}px) fits the viewport ({viewport_width:.1}px); nothing to scroll"
    )]
    DegenerateLayout {
        content_width: f32,
        viewport_width: f32,
    },
}

/// Precondition violations detected while building the coordinator.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SetupError {
    #[error("no poem segments configured")]
    NoPoemSegments,
    #[error("total duration must be positive, got {0} s")]
    InvalidDuration(f64),
    #[error("frame interval must be positive, got {0} ms")]
    InvalidFrameInterval(f64),
    #[error("scroll image {0} is not part of the preloaded images")]
    ScrollImageNotPreloaded(String),
    #[error("volume for {track} must be within 0.0..=1.0, got {volume}")]
    InvalidVolume { track: Track, volume: f32 },
}
