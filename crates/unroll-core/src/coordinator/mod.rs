//! The timeline coordinator.
//!
//! `Coordinator` owns every piece of sequence state and is driven entirely by
//! the host: each call to [`Coordinator::handle`] carries the current time in
//! milliseconds and one [`Input`]. Due timers fire first, in schedule order,
//! then the input is applied. Side effects the host must perform come back as
//! a list of [`Effect`]s; visual state is read through accessors.

mod preload;
mod session;

#[cfg(test)]
mod tests;

use crate::assets::{AssetDescriptor, AssetLoader, AssetOutcome, LoadProgress, ReadyReason};
use crate::audio::{AudioCommand, AudioCoordinator, Track};
use crate::config::AppConfig;
use crate::error::{Degradation, SetupError};
use crate::image_scroller::{ImageMetrics, ImageScroller, ScrollLayout, Viewport};
use crate::poem::{PoemRevealer, Visibility};
use crate::scheduler::{Scheduler, TimerId, TimerOwner};
use crate::scroll_state::{ScrollPhase, ScrollState};
use crate::timeline::{ScrollSession, Timeline};
use tracing::{debug, trace, warn};

/// Where the page is in its startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Loading,
    /// Assets are ready; the overlay is on its way out.
    Revealing,
    Interactive,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Input {
    /// Nothing happened except time passing.
    Tick,
    AssetSettled { index: usize, outcome: AssetOutcome },
    ImageMeasured(ImageMetrics),
    Click,
    Frame,
    Resize(Viewport),
    OpenSoundEnded,
    PlaybackRejected { track: Track, reason: String },
}

/// Work the host must carry out.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    LoadAsset {
        index: usize,
        descriptor: AssetDescriptor,
    },
    Progress(LoadProgress),
    Ready(ReadyReason),
    ScrollImageTo(f32),
    Audio(AudioCommand),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TimerAction {
    AssetTimeout(usize),
    PreloadDeadline,
    RevealStage,
    BeginTimeline,
    ShowSegment(usize),
    FadeSegment(usize),
    MusicFallback,
}

pub struct Coordinator {
    config: AppConfig,
    stage: Stage,
    loader: AssetLoader,
    asset_timers: Vec<Option<TimerId>>,
    scheduler: Scheduler<TimerAction>,
    scroll: ScrollState,
    timeline: Timeline,
    scroller: ImageScroller,
    poem: PoemRevealer,
    audio: AudioCoordinator,
    image_metrics: Option<ImageMetrics>,
    viewport: Viewport,
    degradations: Vec<Degradation>,
}

impl Coordinator {
    /// Validate the configuration and build an idle coordinator.
    pub fn new(config: AppConfig) -> Result<Self, SetupError> {
        validate(&config)?;
        let descriptors = AssetDescriptor::from_config(&config);
        let has_open_sound = configured(&config.open_sound);
        let has_music = configured(&config.music);
        let audio = AudioCoordinator::new(
            has_open_sound,
            has_music,
            config.open_sound_volume,
            config.music_volume,
        );
        let viewport = Viewport::new(
            config.window_width,
            config.window_height * config.content_height_ratio,
        );
        Ok(Self {
            stage: Stage::Loading,
            asset_timers: vec![None; descriptors.len()],
            loader: AssetLoader::new(descriptors),
            scheduler: Scheduler::new(),
            scroll: ScrollState::new(),
            timeline: Timeline::new(),
            scroller: ImageScroller::new(),
            poem: PoemRevealer::new(&config.poem_segments),
            audio,
            image_metrics: None,
            viewport,
            degradations: Vec::new(),
            config,
        })
    }

    /// Apply one input at `now_ms`, firing any timers that came due first.
    pub fn handle(&mut self, now_ms: f64, input: Input) -> Vec<Effect> {
        let mut effects = Vec::new();
        self.fire_due(now_ms, &mut effects);
        match input {
            Input::Tick => {}
            Input::AssetSettled { index, outcome } => {
                self.handle_asset_settled(now_ms, index, outcome, &mut effects)
            }
            Input::ImageMeasured(metrics) => self.handle_image_measured(metrics),
            Input::Click => self.handle_click(now_ms, &mut effects),
            Input::Frame => self.handle_frame(&mut effects),
            Input::Resize(viewport) => self.handle_resize(viewport),
            Input::OpenSoundEnded => self.handle_open_sound_ended(&mut effects),
            Input::PlaybackRejected { track, reason } => {
                self.handle_playback_rejected(track, reason)
            }
        }
        self.timeline.advance(now_ms);
        effects
    }

    fn fire_due(&mut self, now_ms: f64, effects: &mut Vec<Effect>) {
        while let Some(event) = self.scheduler.pop_due(now_ms) {
            trace!(
                action = ?event.action,
                fire_at_ms = event.fire_at_ms,
                now_ms,
                "Timer fired"
            );
            match (event.owner, event.action) {
                (TimerOwner::Preload, TimerAction::AssetTimeout(index)) => {
                    self.handle_asset_timeout(event.fire_at_ms, index, effects)
                }
                (TimerOwner::Preload, TimerAction::PreloadDeadline) => {
                    self.handle_preload_deadline(event.fire_at_ms, effects)
                }
                (TimerOwner::Preload, TimerAction::RevealStage) => self.reveal_stage(),
                (TimerOwner::Session(session), action) => {
                    if !self.timeline.is_live(session) {
                        debug!(%session, ?action, "Dropping stale session timer");
                        continue;
                    }
                    self.handle_session_timer(session, event.fire_at_ms, action, effects);
                }
                (owner, action) => {
                    warn!(?owner, ?action, "Timer fired for an unexpected owner");
                }
            }
        }
    }

    fn record(&mut self, degradation: Degradation) {
        warn!("{degradation}");
        self.degradations.push(degradation);
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn progress(&self) -> LoadProgress {
        self.loader.progress()
    }

    pub fn ready(&self) -> Option<ReadyReason> {
        self.loader.ready()
    }

    pub fn phase(&self) -> ScrollPhase {
        self.scroll.phase()
    }

    pub fn is_open(&self) -> bool {
        self.scroll.is_open()
    }

    pub fn session(&self) -> Option<&ScrollSession> {
        self.timeline.session()
    }

    pub fn elapsed_ms(&self) -> f64 {
        self.timeline.elapsed_ms()
    }

    pub fn image_offset(&self) -> f32 {
        self.scroller.offset()
    }

    pub fn layout(&self) -> ScrollLayout {
        self.scroller.layout()
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn segment_visibility(&self, segment: usize) -> Option<Visibility> {
        self.poem.visibility(segment)
    }

    pub fn segment_count(&self) -> usize {
        self.poem.len()
    }

    /// True while the image scroll wants another display frame.
    pub fn wants_frames(&self) -> bool {
        self.scroller.wants_frame()
    }

    pub fn next_deadline(&self) -> Option<f64> {
        self.scheduler.next_deadline()
    }

    pub fn pending_timers(&self) -> usize {
        self.scheduler.len()
    }

    pub fn degradations(&self) -> &[Degradation] {
        &self.degradations
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn asset(&self, index: usize) -> Option<&AssetDescriptor> {
        self.loader.descriptor(index)
    }
}

fn configured(path: &Option<String>) -> bool {
    path.as_deref().is_some_and(|p| !p.trim().is_empty())
}

fn validate(config: &AppConfig) -> Result<(), SetupError> {
    if config.poem_segments.is_empty() {
        return Err(SetupError::NoPoemSegments);
    }
    let duration = config.total_duration_secs;
    if !(duration.is_finite() && duration > 0.0) {
        return Err(SetupError::InvalidDuration(duration));
    }
    let frame = config.frame_interval_ms;
    if !(frame.is_finite() && frame > 0.0) {
        return Err(SetupError::InvalidFrameInterval(frame));
    }
    if !config.image_assets.contains(&config.scroll_image) {
        return Err(SetupError::ScrollImageNotPreloaded(
            config.scroll_image.clone(),
        ));
    }
    for (track, volume) in [
        (Track::OpenSound, config.open_sound_volume),
        (Track::Music, config.music_volume),
    ] {
        if !(0.0..=1.0).contains(&volume) {
            return Err(SetupError::InvalidVolume { track, volume });
        }
    }
    Ok(())
}
