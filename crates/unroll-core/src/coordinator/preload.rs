use super::{Coordinator, Effect, Stage, TimerAction};
use crate::assets::{AssetOutcome, ReadyReason, Settlement};
use crate::error::Degradation;
use crate::scheduler::TimerOwner;
use tracing::{debug, info};

impl Coordinator {
    /// Kick off preloading: one load request per asset, all at once, plus the
    /// per-asset and overall timeouts.
    pub fn start(&mut self, now_ms: f64) -> Vec<Effect> {
        let mut effects = Vec::new();
        if self.stage != Stage::Loading || self.loader.ready().is_some() {
            return effects;
        }
        let progress = self.loader.progress();
        info!(
            total = progress.total,
            per_asset_timeout_ms = self.config.per_asset_timeout_ms,
            overall_timeout_ms = self.config.overall_timeout_ms,
            "Preloading assets"
        );

        if self.loader.settle_empty() {
            effects.push(Effect::Progress(progress));
            self.on_ready(now_ms, ReadyReason::AllSettled, &mut effects);
            return effects;
        }

        let per_asset = self.config.per_asset_timeout_ms as f64;
        for (index, descriptor) in self.loader.descriptors().iter().enumerate() {
            effects.push(Effect::LoadAsset {
                index,
                descriptor: descriptor.clone(),
            });
            self.asset_timers[index] = Some(self.scheduler.schedule(
                now_ms + per_asset,
                TimerOwner::Preload,
                TimerAction::AssetTimeout(index),
            ));
        }
        self.scheduler.schedule(
            now_ms + self.config.overall_timeout_ms as f64,
            TimerOwner::Preload,
            TimerAction::PreloadDeadline,
        );
        effects
    }

    pub(super) fn handle_asset_settled(
        &mut self,
        now_ms: f64,
        index: usize,
        outcome: AssetOutcome,
        effects: &mut Vec<Effect>,
    ) {
        if let AssetOutcome::Failed(reason) = &outcome {
            if let Some(descriptor) = self.loader.descriptor(index) {
                if !self.loader.is_settled(index) {
                    let degradation = Degradation::AssetLoadFailure {
                        source_locator: descriptor.source.clone(),
                        reason: reason.clone(),
                    };
                    self.record(degradation);
                }
            }
        }
        self.settle(now_ms, index, outcome, effects);
    }

    pub(super) fn handle_asset_timeout(
        &mut self,
        fired_at_ms: f64,
        index: usize,
        effects: &mut Vec<Effect>,
    ) {
        self.asset_timers[index] = None;
        if self.loader.is_settled(index) {
            return;
        }
        if let Some(descriptor) = self.loader.descriptor(index) {
            let degradation = Degradation::AssetLoadTimeout {
                source_locator: descriptor.source.clone(),
                timeout_ms: self.config.per_asset_timeout_ms,
            };
            self.record(degradation);
        }
        self.settle(fired_at_ms, index, AssetOutcome::TimedOut, effects);
    }

    pub(super) fn handle_preload_deadline(&mut self, fired_at_ms: f64, effects: &mut Vec<Effect>) {
        if self.loader.expire() {
            let progress = self.loader.progress();
            info!(
                completed = progress.completed,
                total = progress.total,
                "Preload deadline reached; continuing with what loaded"
            );
            self.on_ready(fired_at_ms, ReadyReason::Deadline, effects);
        }
    }

    fn settle(&mut self, now_ms: f64, index: usize, outcome: AssetOutcome, effects: &mut Vec<Effect>) {
        let source = self
            .loader
            .descriptor(index)
            .map(|d| d.source.clone())
            .unwrap_or_default();
        match self.loader.settle(index, outcome) {
            Settlement::Ignored => {
                debug!(index, %source, "Ignoring repeated or late asset signal");
            }
            Settlement::Progress(progress) => {
                self.cancel_asset_timer(index);
                debug!(
                    index,
                    %source,
                    completed = progress.completed,
                    total = progress.total,
                    "Asset settled"
                );
                effects.push(Effect::Progress(progress));
            }
            Settlement::Ready(progress) => {
                self.cancel_asset_timer(index);
                effects.push(Effect::Progress(progress));
                self.on_ready(now_ms, ReadyReason::AllSettled, effects);
            }
        }
    }

    fn cancel_asset_timer(&mut self, index: usize) {
        if let Some(id) = self.asset_timers.get_mut(index).and_then(Option::take) {
            self.scheduler.cancel(id);
        }
    }

    fn on_ready(&mut self, now_ms: f64, reason: ReadyReason, effects: &mut Vec<Effect>) {
        let dropped = self.scheduler.invalidate(TimerOwner::Preload);
        self.asset_timers.iter_mut().for_each(|slot| *slot = None);
        info!(?reason, dropped_timers = dropped, now_ms, "Assets ready");
        effects.push(Effect::Ready(reason));
        self.stage = Stage::Revealing;

        let delay = match reason {
            ReadyReason::AllSettled => self.config.reveal_delay_ms as f64,
            ReadyReason::Deadline => 0.0,
        };
        if delay <= 0.0 {
            self.reveal_stage();
        } else {
            self.scheduler.schedule(
                now_ms + delay,
                TimerOwner::Preload,
                TimerAction::RevealStage,
            );
        }
    }

    pub(super) fn reveal_stage(&mut self) {
        if self.stage == Stage::Revealing {
            info!("Stage is interactive");
            self.stage = Stage::Interactive;
        }
    }
}
