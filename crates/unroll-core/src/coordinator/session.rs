use super::{Coordinator, Effect, Stage, TimerAction};
use crate::audio::{MusicTrigger, Track};
use crate::error::Degradation;
use crate::image_scroller::{FrameStep, ImageMetrics, ScrollLayout, ScrollStart, Viewport};
use crate::poem::{CueKind, RevealTiming};
use crate::scheduler::TimerOwner;
use crate::timeline::SessionId;
use tracing::{debug, info, warn};

impl Coordinator {
    pub(super) fn handle_click(&mut self, now_ms: f64, effects: &mut Vec<Effect>) {
        if self.stage != Stage::Interactive {
            debug!(stage = ?self.stage, "Click ignored before the stage is interactive");
            return;
        }
        if self.scroll.is_open() {
            self.close(effects);
        } else {
            self.open(now_ms, effects);
        }
    }

    pub(super) fn open(&mut self, now_ms: f64, effects: &mut Vec<Effect>) {
        let layout = self.current_layout();
        let Some(session) = self.timeline.open(now_ms, layout) else {
            return;
        };
        let start_at_ms = now_ms + self.config.opening_delay_ms as f64;
        if !self.scroll.request_open(session, start_at_ms) {
            self.timeline.close();
            return;
        }
        info!(%session, start_at_ms, "Opening scroll");

        let owner = TimerOwner::Session(session);
        let mut commands = Vec::new();
        if self.audio.on_open(&mut commands) {
            self.scheduler.schedule(
                now_ms + self.config.music_fallback_delay_ms as f64,
                owner,
                TimerAction::MusicFallback,
            );
        }
        effects.extend(commands.into_iter().map(Effect::Audio));
        self.scheduler.schedule(start_at_ms, owner, TimerAction::BeginTimeline);
    }

    pub(super) fn close(&mut self, effects: &mut Vec<Effect>) {
        let Some(session) = self.scroll.begin_closing() else {
            return;
        };
        let dropped = self.scheduler.invalidate(TimerOwner::Session(session));
        self.scroller.reset();
        self.poem.reset();
        effects.extend(self.audio.on_close().into_iter().map(Effect::Audio));
        effects.push(Effect::ScrollImageTo(0.0));
        self.timeline.close();
        self.scroll.finish_closing();
        info!(%session, dropped_timers = dropped, "Closed scroll");
    }

    pub(super) fn handle_session_timer(
        &mut self,
        session: SessionId,
        fired_at_ms: f64,
        action: TimerAction,
        effects: &mut Vec<Effect>,
    ) {
        match action {
            TimerAction::BeginTimeline => self.begin_timeline(session, fired_at_ms),
            TimerAction::ShowSegment(segment) => self.apply_cue(segment, CueKind::Show),
            TimerAction::FadeSegment(segment) => self.apply_cue(segment, CueKind::Fade),
            TimerAction::MusicFallback => {
                if let Some(command) = self.audio.start_music(MusicTrigger::Fallback) {
                    effects.push(Effect::Audio(command));
                }
            }
            other => warn!(%session, action = ?other, "Preload timer scheduled on a session"),
        }
    }

    /// End of the opening transition: start the scroll and schedule the poem.
    fn begin_timeline(&mut self, session: SessionId, now_ms: f64) {
        if !self.scroll.complete_opening(session) || !self.timeline.start(session, now_ms) {
            debug!(%session, "Opening was superseded; timeline not started");
            return;
        }

        let layout = self.current_layout();
        self.scroller.relayout(layout);
        self.timeline.relayout(layout);
        match self.scroller.begin() {
            ScrollStart::Running { max_scroll } => {
                info!(%session, max_scroll, "Image scroll started");
            }
            ScrollStart::Degenerate => self.record(Degradation::DegenerateLayout {
                content_width: layout.scaled_content_width,
                viewport_width: layout.viewport_width,
            }),
        }

        let timing = RevealTiming {
            total_duration_ms: self.config.total_duration_ms(),
            fill_count: self.config.fill_count,
            lead_ms: self.config.poem_lead_ms as f64,
        };
        let owner = TimerOwner::Session(session);
        let cues = self.poem.plan(timing);
        debug!(%session, cues = cues.len(), "Scheduling poem cues");
        for cue in cues {
            let action = match cue.kind {
                CueKind::Show => TimerAction::ShowSegment(cue.segment),
                CueKind::Fade => TimerAction::FadeSegment(cue.segment),
            };
            self.scheduler.schedule(now_ms + cue.at_ms, owner, action);
        }
    }

    fn apply_cue(&mut self, segment: usize, kind: CueKind) {
        if !self.scroll.is_open() {
            return;
        }
        if let Some(visibility) = self.poem.apply(segment, kind) {
            debug!(segment, ?visibility, "Poem segment changed");
        }
    }

    pub(super) fn handle_frame(&mut self, effects: &mut Vec<Effect>) {
        if !self.scroller.wants_frame() {
            return;
        }
        if !self.scroll.is_open() {
            self.scroller.halt();
            return;
        }
        let step = self
            .scroller
            .step(self.config.total_duration_ms(), self.config.frame_interval_ms);
        match step {
            FrameStep::Advanced { offset } => effects.push(Effect::ScrollImageTo(offset)),
            FrameStep::Finished { offset } => {
                info!(offset, "Image scroll reached the end");
                effects.push(Effect::ScrollImageTo(offset));
            }
            FrameStep::Idle => {}
        }
    }

    pub(super) fn handle_resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        let layout = self.current_layout();
        self.scroller.relayout(layout);
        self.timeline.relayout(layout);
        debug!(
            width = viewport.width,
            height = viewport.height,
            max_scroll = layout.max_scroll(),
            "Viewport resized"
        );
    }

    pub(super) fn handle_image_measured(&mut self, metrics: ImageMetrics) {
        self.image_metrics = Some(metrics);
        let layout = self.current_layout();
        self.scroller.relayout(layout);
        self.timeline.relayout(layout);
        debug!(
            natural_width = metrics.natural_width,
            natural_height = metrics.natural_height,
            scaled_width = layout.scaled_content_width,
            "Scroll image measured"
        );
    }

    pub(super) fn handle_open_sound_ended(&mut self, effects: &mut Vec<Effect>) {
        if !self.scroll.is_open() {
            return;
        }
        if let Some(command) = self.audio.start_music(MusicTrigger::OpenSoundEnded) {
            effects.push(Effect::Audio(command));
        }
    }

    pub(super) fn handle_playback_rejected(&mut self, track: Track, reason: String) {
        self.audio.on_rejected(track);
        self.record(Degradation::PlaybackRejected { track, reason });
    }

    fn current_layout(&self) -> ScrollLayout {
        ScrollLayout::compute(self.image_metrics, self.viewport)
    }
}
