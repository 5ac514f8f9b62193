//! Staggered reveal of the poem columns.
//!
//! The total duration is split into one slot per segment. A segment appears
//! at its slot and, unless it is the title, fades `fill_count` slots later so
//! the scroll stays full before older text clears.

use crate::config::PoemSegmentConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Visibility {
    #[default]
    Hidden,
    Visible,
    Fading,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PoemSegment {
    pub order_index: usize,
    /// Slot the segment appears in (explicit delay, else its order index).
    pub reveal_offset: u32,
    pub is_title: bool,
    pub visibility: Visibility,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CueKind {
    Show,
    Fade,
}

/// A visibility change relative to the start of the timeline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RevealCue {
    pub segment: usize,
    pub at_ms: f64,
    pub kind: CueKind,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RevealTiming {
    pub total_duration_ms: f64,
    pub fill_count: u32,
    pub lead_ms: f64,
}

#[derive(Debug, Clone)]
pub struct PoemRevealer {
    segments: Vec<PoemSegment>,
}

impl PoemRevealer {
    pub fn new(segments: &[PoemSegmentConfig]) -> Self {
        let segments = segments
            .iter()
            .enumerate()
            .map(|(order_index, segment)| PoemSegment {
                order_index,
                reveal_offset: segment.delay.unwrap_or(order_index as u32),
                is_title: segment.title,
                visibility: Visibility::Hidden,
            })
            .collect();
        Self { segments }
    }

    pub fn slot_duration_ms(&self, total_duration_ms: f64) -> f64 {
        total_duration_ms / self.segments.len().max(1) as f64
    }

    /// Every show/fade cue for one run of the timeline, sorted by time.
    pub fn plan(&self, timing: RevealTiming) -> Vec<RevealCue> {
        let slot = self.slot_duration_ms(timing.total_duration_ms);
        let mut cues = Vec::with_capacity(self.segments.len() * 2);
        for segment in &self.segments {
            let d = f64::from(segment.reveal_offset);
            cues.push(RevealCue {
                segment: segment.order_index,
                at_ms: d * slot + timing.lead_ms,
                kind: CueKind::Show,
            });
            if segment.is_title {
                continue;
            }
            let fade_at = (d + f64::from(timing.fill_count)) * slot + timing.lead_ms;
            if fade_at < timing.total_duration_ms {
                cues.push(RevealCue {
                    segment: segment.order_index,
                    at_ms: fade_at,
                    kind: CueKind::Fade,
                });
            }
        }
        cues.sort_by(|a, b| a.at_ms.total_cmp(&b.at_ms));
        cues
    }

    pub fn apply(&mut self, segment: usize, kind: CueKind) -> Option<Visibility> {
        let target = self.segments.get_mut(segment)?;
        target.visibility = match kind {
            CueKind::Show => Visibility::Visible,
            CueKind::Fade => Visibility::Fading,
        };
        Some(target.visibility)
    }

    pub fn reset(&mut self) {
        for segment in &mut self.segments {
            segment.visibility = Visibility::Hidden;
        }
    }

    pub fn visibility(&self, segment: usize) -> Option<Visibility> {
        self.segments.get(segment).map(|s| s.visibility)
    }

    pub fn segments(&self) -> &[PoemSegment] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn thirteen_segments() -> Vec<PoemSegmentConfig> {
        (0..13)
            .map(|i| PoemSegmentConfig {
                text: format!("column {i}"),
                delay: (i == 0).then_some(0),
                title: i == 0,
            })
            .collect()
    }

    fn timing() -> RevealTiming {
        RevealTiming {
            total_duration_ms: 60_000.0,
            fill_count: 6,
            lead_ms: 500.0,
        }
    }

    #[test]
    fn segment_three_shows_and_fades_on_its_slots() {
        let revealer = PoemRevealer::new(&thirteen_segments());
        let cues = revealer.plan(timing());
        let for_segment = |idx: usize, kind: CueKind| {
            cues.iter()
                .find(|cue| cue.segment == idx && cue.kind == kind)
                .map(|cue| cue.at_ms)
        };

        let show = for_segment(3, CueKind::Show).expect("show cue");
        let fade = for_segment(3, CueKind::Fade).expect("fade cue");
        assert!((show - 14_346.15).abs() < 0.01, "show at {show}");
        assert!((fade - 42_038.46).abs() < 0.01, "fade at {fade}");
    }

    #[test]
    fn title_never_fades() {
        let revealer = PoemRevealer::new(&thirteen_segments());
        let cues = revealer.plan(timing());
        assert!(
            cues.iter()
                .any(|cue| cue.segment == 0 && cue.kind == CueKind::Show && cue.at_ms == 500.0)
        );
        assert!(
            !cues
                .iter()
                .any(|cue| cue.segment == 0 && cue.kind == CueKind::Fade)
        );
    }

    #[test]
    fn late_segments_stay_visible() {
        let revealer = PoemRevealer::new(&thirteen_segments());
        let cues = revealer.plan(timing());
        let fades: Vec<_> = cues
            .iter()
            .filter(|cue| cue.kind == CueKind::Fade)
            .map(|cue| cue.segment)
            .collect();
        // (d + 6) * 60000/13 + 500 < 60000 holds for d <= 6.
        assert_eq!(fades, vec![1, 2, 3, 4, 5, 6]);
        assert_eq!(cues.len(), 13 + 6);
        assert!(cues.windows(2).all(|w| w[0].at_ms <= w[1].at_ms));
    }

    #[test]
    fn explicit_delay_overrides_position() {
        let mut config = thirteen_segments();
        config[5].delay = Some(1);
        let revealer = PoemRevealer::new(&config);
        assert_eq!(revealer.segments()[5].reveal_offset, 1);
        assert_eq!(revealer.segments()[6].reveal_offset, 6);
    }

    #[test]
    fn reset_hides_everything() {
        let mut revealer = PoemRevealer::new(&thirteen_segments());
        revealer.apply(0, CueKind::Show);
        revealer.apply(2, CueKind::Show);
        revealer.apply(2, CueKind::Fade);
        assert_eq!(revealer.visibility(2), Some(Visibility::Fading));
        assert_eq!(revealer.apply(99, CueKind::Show), None);

        revealer.reset();
        assert!(
            revealer
                .segments()
                .iter()
                .all(|segment| segment.visibility == Visibility::Hidden)
        );
    }
}
