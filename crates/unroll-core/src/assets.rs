//! Preload bookkeeping.
//!
//! The loader does no I/O. The coordinator hands out load requests, and the
//! host reports back one outcome per descriptor. Failures and timeouts count
//! toward completion exactly like successes so that one bad file cannot keep
//! the stage hidden.

use crate::config::AppConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssetKind {
    Image,
    Audio,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AssetDescriptor {
    pub kind: AssetKind,
    pub source: String,
}

impl AssetDescriptor {
    pub fn image(source: impl Into<String>) -> Self {
        Self {
            kind: AssetKind::Image,
            source: source.into(),
        }
    }

    pub fn audio(source: impl Into<String>) -> Self {
        Self {
            kind: AssetKind::Audio,
            source: source.into(),
        }
    }

    /// Images first, then audio, in config order.
    pub fn from_config(config: &AppConfig) -> Vec<Self> {
        config
            .image_assets
            .iter()
            .map(Self::image)
            .chain(config.audio_assets.iter().map(Self::audio))
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssetOutcome {
    Loaded,
    Failed(String),
    TimedOut,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LoadProgress {
    pub total: usize,
    pub completed: usize,
}

impl LoadProgress {
    pub fn fraction(&self) -> f32 {
        if self.total == 0 {
            1.0
        } else {
            self.completed as f32 / self.total as f32
        }
    }

    pub fn is_complete(&self) -> bool {
        self.completed >= self.total
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadyReason {
    AllSettled,
    Deadline,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Settlement {
    /// Duplicate, out-of-range, or after readiness.
    Ignored,
    Progress(LoadProgress),
    Ready(LoadProgress),
}

#[derive(Debug)]
pub struct AssetLoader {
    descriptors: Vec<AssetDescriptor>,
    outcomes: Vec<Option<AssetOutcome>>,
    progress: LoadProgress,
    ready: Option<ReadyReason>,
}

impl AssetLoader {
    pub fn new(descriptors: Vec<AssetDescriptor>) -> Self {
        let total = descriptors.len();
        Self {
            outcomes: vec![None; total],
            descriptors,
            progress: LoadProgress {
                total,
                completed: 0,
            },
            ready: None,
        }
    }

    /// Record the first terminal outcome for `index`.
    pub fn settle(&mut self, index: usize, outcome: AssetOutcome) -> Settlement {
        if self.ready.is_some() {
            return Settlement::Ignored;
        }
        let Some(slot) = self.outcomes.get_mut(index) else {
            return Settlement::Ignored;
        };
        if slot.is_some() {
            return Settlement::Ignored;
        }
        *slot = Some(outcome);
        self.progress.completed = (self.progress.completed + 1).min(self.progress.total);
        if self.progress.is_complete() {
            self.ready = Some(ReadyReason::AllSettled);
            Settlement::Ready(self.progress)
        } else {
            Settlement::Progress(self.progress)
        }
    }

    /// Overall deadline. True if this call is what made the loader ready.
    pub fn expire(&mut self) -> bool {
        if self.ready.is_some() {
            return false;
        }
        self.ready = Some(ReadyReason::Deadline);
        true
    }

    /// Nothing to wait for: ready on the spot.
    pub fn settle_empty(&mut self) -> bool {
        if self.ready.is_some() || !self.descriptors.is_empty() {
            return false;
        }
        self.ready = Some(ReadyReason::AllSettled);
        true
    }

    pub fn descriptors(&self) -> &[AssetDescriptor] {
        &self.descriptors
    }

    pub fn descriptor(&self, index: usize) -> Option<&AssetDescriptor> {
        self.descriptors.get(index)
    }

    pub fn outcome(&self, index: usize) -> Option<&AssetOutcome> {
        self.outcomes.get(index).and_then(Option::as_ref)
    }

    pub fn is_settled(&self, index: usize) -> bool {
        self.outcome(index).is_some()
    }

    pub fn progress(&self) -> LoadProgress {
        self.progress
    }

    pub fn ready(&self) -> Option<ReadyReason> {
        self.ready
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loader(count: usize) -> AssetLoader {
        AssetLoader::new(
            (0..count)
                .map(|i| AssetDescriptor::image(format!("img-{i}.png")))
                .collect(),
        )
    }

    #[test]
    fn first_outcome_wins() {
        let mut loader = loader(2);
        assert_eq!(
            loader.settle(0, AssetOutcome::TimedOut),
            Settlement::Progress(LoadProgress {
                total: 2,
                completed: 1
            })
        );
        assert_eq!(loader.settle(0, AssetOutcome::Loaded), Settlement::Ignored);
        assert_eq!(loader.outcome(0), Some(&AssetOutcome::TimedOut));
        assert_eq!(loader.settle(7, AssetOutcome::Loaded), Settlement::Ignored);
        assert_eq!(loader.progress().completed, 1);
    }

    #[test]
    fn failures_still_complete_the_set() {
        let mut loader = loader(3);
        loader.settle(2, AssetOutcome::Failed("decode".into()));
        loader.settle(0, AssetOutcome::Loaded);
        let last = loader.settle(1, AssetOutcome::TimedOut);
        assert_eq!(
            last,
            Settlement::Ready(LoadProgress {
                total: 3,
                completed: 3
            })
        );
        assert_eq!(loader.ready(), Some(ReadyReason::AllSettled));
        assert!(!loader.expire());
    }

    #[test]
    fn deadline_freezes_progress() {
        let mut loader = loader(3);
        loader.settle(0, AssetOutcome::Loaded);
        assert!(loader.expire());
        assert!(!loader.expire());
        assert_eq!(loader.settle(1, AssetOutcome::Loaded), Settlement::Ignored);
        assert_eq!(loader.progress().completed, 1);
        assert_eq!(loader.ready(), Some(ReadyReason::Deadline));
    }

    #[test]
    fn empty_list_is_ready_immediately() {
        let mut loader = loader(0);
        assert_eq!(loader.progress().fraction(), 1.0);
        assert!(loader.settle_empty());
        assert!(!loader.settle_empty());
        assert!(!loader.expire());
    }

    #[test]
    fn descriptors_follow_config_order() {
        let config = AppConfig::default();
        let descriptors = AssetDescriptor::from_config(&config);
        assert_eq!(descriptors.len(), 5);
        assert_eq!(descriptors[0], AssetDescriptor::image("assets/image.png"));
        assert_eq!(descriptors[3].kind, AssetKind::Audio);
    }
}
