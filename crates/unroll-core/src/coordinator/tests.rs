use super::*;
use crate::assets::AssetKind;

const ASSETS: usize = 5;

fn wide_image() -> ImageMetrics {
    ImageMetrics::new(4000.0, 1000.0).expect("usable metrics")
}

fn count<F: Fn(&Effect) -> bool>(effects: &[Effect], pred: F) -> usize {
    effects.iter().filter(|effect| pred(*effect)).count()
}

fn is_ready(effect: &Effect) -> bool {
    matches!(effect, Effect::Ready(_))
}

fn plays(track: Track) -> impl Fn(&Effect) -> bool {
    move |effect| {
        matches!(effect, Effect::Audio(AudioCommand::Play { track: t, .. }) if *t == track)
    }
}

/// Coordinator with every asset loaded, the scroll image measured, and the
/// stage revealed at t=510.
fn interactive(config: AppConfig, metrics: ImageMetrics) -> Coordinator {
    let mut coordinator = Coordinator::new(config).expect("valid config");
    let effects = coordinator.start(0.0);
    assert_eq!(
        count(&effects, |e| matches!(e, Effect::LoadAsset { .. })),
        ASSETS
    );
    for index in 0..ASSETS {
        coordinator.handle(
            10.0,
            Input::AssetSettled {
                index,
                outcome: AssetOutcome::Loaded,
            },
        );
    }
    coordinator.handle(10.0, Input::ImageMeasured(metrics));
    assert_eq!(coordinator.stage(), Stage::Revealing);
    coordinator.handle(510.0, Input::Tick);
    assert_eq!(coordinator.stage(), Stage::Interactive);
    coordinator
}

/// Interactive coordinator opened at t=1000 with the timeline started at t=3800.
fn running() -> Coordinator {
    let mut coordinator = interactive(AppConfig::default(), wide_image());
    coordinator.handle(1_000.0, Input::Click);
    coordinator.handle(3_800.0, Input::Tick);
    assert!(matches!(coordinator.phase(), ScrollPhase::Open { .. }));
    coordinator
}

fn all_hidden(coordinator: &Coordinator) -> bool {
    (0..coordinator.segment_count())
        .all(|idx| coordinator.segment_visibility(idx) == Some(Visibility::Hidden))
}

#[test]
fn one_failure_and_one_timeout_still_become_ready() {
    let mut coordinator = Coordinator::new(AppConfig::default()).expect("valid config");
    let mut effects = coordinator.start(0.0);
    let kinds: Vec<_> = effects
        .iter()
        .filter_map(|e| match e {
            Effect::LoadAsset { descriptor, .. } => Some(descriptor.kind),
            _ => None,
        })
        .collect();
    assert_eq!(
        kinds,
        vec![
            AssetKind::Image,
            AssetKind::Image,
            AssetKind::Image,
            AssetKind::Audio,
            AssetKind::Audio
        ]
    );

    let settle = [
        (100.0, 0, AssetOutcome::Loaded),
        (200.0, 1, AssetOutcome::Failed("corrupt png".into())),
        (300.0, 2, AssetOutcome::Loaded),
        (400.0, 3, AssetOutcome::Loaded),
    ];
    for (at, index, outcome) in settle {
        effects.extend(coordinator.handle(at, Input::AssetSettled { index, outcome }));
    }
    effects.extend(coordinator.handle(2_999.0, Input::Tick));
    assert_eq!(count(&effects, is_ready), 0);
    assert_eq!(coordinator.progress().completed, 4);

    let at_timeout = coordinator.handle(3_000.0, Input::Tick);
    assert_eq!(
        at_timeout,
        vec![
            Effect::Progress(LoadProgress {
                total: 5,
                completed: 5
            }),
            Effect::Ready(ReadyReason::AllSettled)
        ]
    );
    effects.extend(at_timeout);

    effects.extend(coordinator.handle(
        3_500.0,
        Input::AssetSettled {
            index: 4,
            outcome: AssetOutcome::Loaded,
        },
    ));
    effects.extend(coordinator.handle(20_000.0, Input::Tick));
    assert_eq!(count(&effects, is_ready), 1);
    assert_eq!(coordinator.progress().completed, 5);
    assert_eq!(coordinator.pending_timers(), 0);

    let degradations = coordinator.degradations();
    assert!(degradations.iter().any(|d| matches!(
        d,
        Degradation::AssetLoadFailure { source_locator, .. } if source_locator == "assets/scroll_paper.png"
    )));
    assert!(degradations.iter().any(|d| matches!(
        d,
        Degradation::AssetLoadTimeout { source_locator, timeout_ms: 3_000 } if source_locator == "assets/music.mp3"
    )));
}

#[test]
fn overall_deadline_wins_over_slow_assets() {
    let mut config = AppConfig::default();
    config.per_asset_timeout_ms = 20_000;
    config.overall_timeout_ms = 8_000;
    let mut coordinator = Coordinator::new(config).expect("valid config");
    coordinator.start(0.0);
    coordinator.handle(
        50.0,
        Input::AssetSettled {
            index: 0,
            outcome: AssetOutcome::Loaded,
        },
    );

    assert!(coordinator.handle(7_999.0, Input::Tick).is_empty());
    let effects = coordinator.handle(8_000.0, Input::Tick);
    assert_eq!(effects, vec![Effect::Ready(ReadyReason::Deadline)]);
    assert_eq!(coordinator.stage(), Stage::Interactive);

    let late = coordinator.handle(
        9_000.0,
        Input::AssetSettled {
            index: 1,
            outcome: AssetOutcome::Loaded,
        },
    );
    assert!(late.is_empty());
    assert!(coordinator.handle(30_000.0, Input::Tick).is_empty());
    assert_eq!(coordinator.progress().completed, 1);
}

#[test]
fn ready_fires_once_for_every_arrival_pattern() {
    let overall = AppConfig::default().overall_timeout_ms as f64;
    for pattern in 0u32..(1 << ASSETS) {
        let mut coordinator = Coordinator::new(AppConfig::default()).expect("valid config");
        let mut effects = coordinator.start(0.0);
        let mut ready_at = None;
        let mut now = 0.0;
        while now <= 15_000.0 {
            let index = (now / 700.0) as usize;
            let input = if now % 700.0 == 0.0 && index < ASSETS && pattern & (1 << index) != 0 {
                Input::AssetSettled {
                    index,
                    outcome: if index % 2 == 0 {
                        AssetOutcome::Loaded
                    } else {
                        AssetOutcome::Failed("404".into())
                    },
                }
            } else {
                Input::Tick
            };
            let step = coordinator.handle(now, input);
            if ready_at.is_none() && step.iter().any(is_ready) {
                ready_at = Some(now);
            }
            effects.extend(step);
            now += 100.0;
        }

        assert_eq!(count(&effects, is_ready), 1, "pattern {pattern:05b}");
        assert!(ready_at.expect("became ready") <= overall);

        let completed: Vec<_> = effects
            .iter()
            .filter_map(|e| match e {
                Effect::Progress(p) => Some(p.completed),
                _ => None,
            })
            .collect();
        assert!(completed.windows(2).all(|w| w[0] < w[1]));
        assert!(completed.iter().all(|c| *c <= ASSETS));
    }
}

#[test]
fn clicks_before_reveal_are_ignored() {
    let mut coordinator = Coordinator::new(AppConfig::default()).expect("valid config");
    coordinator.start(0.0);
    for index in 0..ASSETS {
        coordinator.handle(
            10.0,
            Input::AssetSettled {
                index,
                outcome: AssetOutcome::Loaded,
            },
        );
    }
    assert!(coordinator.handle(100.0, Input::Click).is_empty());
    assert_eq!(coordinator.phase(), ScrollPhase::Closed);
}

#[test]
fn close_during_opening_cancels_the_start() {
    let mut coordinator = interactive(AppConfig::default(), wide_image());
    let opened = coordinator.handle(1_000.0, Input::Click);
    assert_eq!(count(&opened, plays(Track::OpenSound)), 1);
    assert!(coordinator.is_open());
    assert!(matches!(coordinator.phase(), ScrollPhase::Opening { .. }));

    let closed = coordinator.handle(2_000.0, Input::Click);
    assert!(closed.contains(&Effect::Audio(AudioCommand::Stop {
        track: Track::OpenSound
    })));
    assert!(closed.contains(&Effect::Audio(AudioCommand::Stop {
        track: Track::Music
    })));
    assert_eq!(coordinator.pending_timers(), 0);

    let later: Vec<_> = [3_800.0, 4_000.0, 10_000.0]
        .into_iter()
        .flat_map(|at| coordinator.handle(at, Input::Tick))
        .collect();
    assert!(later.is_empty());
    assert_eq!(coordinator.phase(), ScrollPhase::Closed);
    assert!(!coordinator.wants_frames());
    assert!(all_hidden(&coordinator));
    assert!(coordinator.handle(10_016.0, Input::Frame).is_empty());
}

#[test]
fn poem_segments_follow_their_slots() {
    let mut coordinator = running();
    coordinator.handle(4_300.0, Input::Tick);
    assert_eq!(coordinator.segment_visibility(0), Some(Visibility::Visible));

    // Segment 3 shows at 3800 + 3 * 60000/13 + 500 and fades six slots later.
    coordinator.handle(18_146.0, Input::Tick);
    assert_eq!(coordinator.segment_visibility(3), Some(Visibility::Hidden));
    coordinator.handle(18_147.0, Input::Tick);
    assert_eq!(coordinator.segment_visibility(3), Some(Visibility::Visible));
    coordinator.handle(45_838.0, Input::Tick);
    assert_eq!(coordinator.segment_visibility(3), Some(Visibility::Visible));
    coordinator.handle(45_839.0, Input::Tick);
    assert_eq!(coordinator.segment_visibility(3), Some(Visibility::Fading));

    coordinator.handle(70_000.0, Input::Tick);
    assert_eq!(coordinator.segment_visibility(0), Some(Visibility::Visible));
    assert_eq!(coordinator.segment_visibility(12), Some(Visibility::Visible));
    assert_eq!(coordinator.segment_visibility(6), Some(Visibility::Fading));
    assert_eq!(coordinator.pending_timers(), 0);
}

#[test]
fn elapsed_time_tracks_the_started_timeline() {
    let mut coordinator = interactive(AppConfig::default(), wide_image());
    coordinator.handle(1_000.0, Input::Click);
    coordinator.handle(2_000.0, Input::Tick);
    assert_eq!(coordinator.elapsed_ms(), 0.0);
    coordinator.handle(3_800.0, Input::Tick);
    coordinator.handle(4_800.0, Input::Tick);
    assert_eq!(coordinator.elapsed_ms(), 1_000.0);
}

#[test]
fn frames_scroll_to_the_end_and_stop() {
    let mut coordinator = running();
    assert!(coordinator.wants_frames());
    let max_scroll = coordinator.layout().max_scroll();
    assert_eq!(max_scroll, 960.0);

    let mut now = 3_800.0;
    let mut frames = 0;
    let mut last = None;
    while coordinator.wants_frames() {
        now += 1000.0 / 60.0;
        frames += 1;
        for effect in coordinator.handle(now, Input::Frame) {
            if let Effect::ScrollImageTo(offset) = effect {
                last = Some(offset);
            }
        }
        assert!(frames < 4_000, "frame loop never ended");
    }
    assert_eq!(last, Some(960.0));
    assert_eq!(coordinator.image_offset(), 960.0);
    assert!(coordinator.handle(now + 20.0, Input::Frame).is_empty());
}

#[test]
fn narrow_image_skips_the_scroll_but_not_the_poem() {
    let narrow = ImageMetrics::new(800.0, 1000.0).expect("usable metrics");
    let mut coordinator = interactive(AppConfig::default(), narrow);
    coordinator.handle(1_000.0, Input::Click);
    coordinator.handle(3_800.0, Input::Tick);

    assert!(!coordinator.wants_frames());
    assert!(coordinator.handle(3_820.0, Input::Frame).is_empty());
    assert_eq!(coordinator.image_offset(), 0.0);
    assert!(
        coordinator
            .degradations()
            .iter()
            .any(|d| matches!(d, Degradation::DegenerateLayout { .. }))
    );

    coordinator.handle(4_300.0, Input::Tick);
    assert_eq!(coordinator.segment_visibility(0), Some(Visibility::Visible));
}

#[test]
fn resize_mid_scroll_changes_only_future_increments() {
    let mut coordinator = running();
    let mut now = 3_800.0;
    for _ in 0..100 {
        now += 16.0;
        coordinator.handle(now, Input::Frame);
    }
    let before = coordinator.image_offset();
    assert!((before - 100.0 * 960.0 / 3600.0).abs() < 1e-2);

    // Content height 800 scales the image to 3200px; range becomes 1920px.
    coordinator.handle(now, Input::Resize(Viewport::new(1280.0, 800.0)));
    assert_eq!(coordinator.image_offset(), before);
    assert_eq!(coordinator.layout().max_scroll(), 1920.0);
    let session = coordinator.session().expect("live session");
    assert_eq!(session.scaled_content_width, 3200.0);
    assert!(coordinator.wants_frames());

    coordinator.handle(now + 16.0, Input::Frame);
    let increment = coordinator.image_offset() - before;
    assert!((increment - 1920.0 / 3600.0).abs() < 1e-3);
}

#[test]
fn reopening_starts_from_a_clean_slate() {
    let mut coordinator = running();
    let first = coordinator.session().expect("session").id;
    let first_pending = coordinator.pending_timers();
    let mut now = 3_800.0;
    for _ in 0..300 {
        now += 16.0;
        coordinator.handle(now, Input::Frame);
    }
    coordinator.handle(20_000.0, Input::Tick);
    assert!(coordinator.image_offset() > 0.0);
    assert!(!all_hidden(&coordinator));

    let closed = coordinator.handle(20_000.0, Input::Click);
    assert!(closed.contains(&Effect::ScrollImageTo(0.0)));
    assert_eq!(coordinator.image_offset(), 0.0);
    assert!(all_hidden(&coordinator));
    assert_eq!(coordinator.pending_timers(), 0);

    coordinator.handle(21_000.0, Input::Click);
    let second = coordinator.session().expect("session").id;
    assert_ne!(first, second);
    assert_eq!(coordinator.elapsed_ms(), 0.0);
    assert_eq!(coordinator.image_offset(), 0.0);
    assert!(all_hidden(&coordinator));

    coordinator.handle(23_800.0, Input::Tick);
    assert_eq!(coordinator.pending_timers(), first_pending);
    assert_eq!(coordinator.elapsed_ms(), 0.0);
    assert!(coordinator.wants_frames());
}

#[test]
fn repeated_open_or_close_is_a_no_op() {
    let mut coordinator = interactive(AppConfig::default(), wide_image());
    let mut effects = Vec::new();
    coordinator.close(&mut effects);
    assert!(effects.is_empty());

    coordinator.open(1_000.0, &mut effects);
    let pending = coordinator.pending_timers();
    assert_eq!(pending, 2);
    coordinator.open(1_100.0, &mut effects);
    assert_eq!(coordinator.pending_timers(), pending);
    assert_eq!(count(&effects, plays(Track::OpenSound)), 1);

    coordinator.close(&mut effects);
    let stops = effects.len();
    coordinator.close(&mut effects);
    assert_eq!(effects.len(), stops);
}

#[test]
fn music_starts_once_whichever_trigger_comes_first() {
    let mut coordinator = interactive(AppConfig::default(), wide_image());
    let mut effects = coordinator.handle(1_000.0, Input::Click);
    effects.extend(coordinator.handle(2_400.0, Input::OpenSoundEnded));
    assert_eq!(count(&effects, plays(Track::Music)), 1);
    effects.extend(coordinator.handle(4_000.0, Input::Tick));
    effects.extend(coordinator.handle(4_100.0, Input::OpenSoundEnded));
    assert_eq!(count(&effects, plays(Track::Music)), 1);
}

#[test]
fn fallback_starts_music_when_the_end_signal_never_comes() {
    let mut coordinator = interactive(AppConfig::default(), wide_image());
    coordinator.handle(1_000.0, Input::Click);
    coordinator.handle(
        1_001.0,
        Input::PlaybackRejected {
            track: Track::OpenSound,
            reason: "no output device".into(),
        },
    );
    assert!(coordinator.handle(3_999.0, Input::Tick).is_empty());
    let effects = coordinator.handle(4_000.0, Input::Tick);
    assert_eq!(
        effects,
        vec![Effect::Audio(AudioCommand::Play {
            track: Track::Music,
            volume: 0.5
        })]
    );
    assert_eq!(coordinator.degradations().len(), 1);
}

#[test]
fn rejected_music_can_be_retried_by_the_fallback() {
    let mut coordinator = interactive(AppConfig::default(), wide_image());
    coordinator.handle(1_000.0, Input::Click);
    let ended = coordinator.handle(2_000.0, Input::OpenSoundEnded);
    assert_eq!(count(&ended, plays(Track::Music)), 1);
    coordinator.handle(
        2_001.0,
        Input::PlaybackRejected {
            track: Track::Music,
            reason: "autoplay blocked".into(),
        },
    );
    let fallback = coordinator.handle(4_000.0, Input::Tick);
    assert_eq!(count(&fallback, plays(Track::Music)), 1);
}

#[test]
fn late_end_signal_after_close_does_nothing() {
    let mut coordinator = interactive(AppConfig::default(), wide_image());
    coordinator.handle(1_000.0, Input::Click);
    coordinator.handle(1_500.0, Input::Click);
    assert!(coordinator.handle(2_400.0, Input::OpenSoundEnded).is_empty());
}

#[test]
fn setup_preconditions_fail_fast() {
    let mut config = AppConfig::default();
    config.poem_segments.clear();
    assert_eq!(
        Coordinator::new(config).err(),
        Some(SetupError::NoPoemSegments)
    );

    let mut config = AppConfig::default();
    config.scroll_image = "assets/elsewhere.png".into();
    assert!(matches!(
        Coordinator::new(config),
        Err(SetupError::ScrollImageNotPreloaded(_))
    ));

    let mut config = AppConfig::default();
    config.total_duration_secs = 0.0;
    assert!(matches!(
        Coordinator::new(config),
        Err(SetupError::InvalidDuration(_))
    ));

    let mut config = AppConfig::default();
    config.music_volume = 1.5;
    assert!(matches!(
        Coordinator::new(config),
        Err(SetupError::InvalidVolume {
            track: Track::Music,
            ..
        })
    ));
}
