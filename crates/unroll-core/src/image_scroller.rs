//! Horizontal travel of the scroll image.
//!
//! The image is scaled to the content height, and whatever is wider than the
//! viewport is the distance to cover over the timeline. The offset advances a
//! fixed amount per display frame, not per elapsed millisecond.

/// Natural pixel size of the decoded scroll image.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImageMetrics {
    pub natural_width: f32,
    pub natural_height: f32,
}

impl ImageMetrics {
    /// Returns `None` for an image with no usable size.
    pub fn new(natural_width: f32, natural_height: f32) -> Option<Self> {
        let usable = |v: f32| v.is_finite() && v > 0.0;
        (usable(natural_width) && usable(natural_height)).then_some(Self {
            natural_width,
            natural_height,
        })
    }
}

/// Size of the region the image scrolls through.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        let sanitize = |v: f32| if v.is_finite() { v.max(0.0) } else { 0.0 };
        Self {
            width: sanitize(width),
            height: sanitize(height),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollLayout {
    pub scaled_content_width: f32,
    pub content_height: f32,
    pub viewport_width: f32,
}

impl ScrollLayout {
    /// Without metrics (image missing or still loading) the content is treated as zero-width.
    pub fn compute(metrics: Option<ImageMetrics>, viewport: Viewport) -> Self {
        let scaled_content_width = metrics
            .map(|m| m.natural_width * (viewport.height / m.natural_height))
            .unwrap_or(0.0);
        Self {
            scaled_content_width,
            content_height: viewport.height,
            viewport_width: viewport.width,
        }
    }

    pub fn max_scroll(&self) -> f32 {
        (self.scaled_content_width - self.viewport_width).max(0.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScrollStart {
    Running { max_scroll: f32 },
    Degenerate,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FrameStep {
    Advanced { offset: f32 },
    /// Offset reached the end; no further frames are wanted.
    Finished { offset: f32 },
    Idle,
}

#[derive(Debug, Default)]
pub struct ImageScroller {
    offset: f32,
    layout: ScrollLayout,
    frame_requested: bool,
}

impl ImageScroller {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the layout. The current offset is left alone.
    pub fn relayout(&mut self, layout: ScrollLayout) {
        self.layout = layout;
    }

    pub fn begin(&mut self) -> ScrollStart {
        let max_scroll = self.layout.max_scroll();
        if max_scroll <= 0.0 {
            self.frame_requested = false;
            return ScrollStart::Degenerate;
        }
        self.frame_requested = true;
        ScrollStart::Running { max_scroll }
    }

    /// Advance by one frame's share of the current scrollable range.
    pub fn step(&mut self, total_duration_ms: f64, frame_interval_ms: f64) -> FrameStep {
        if !self.frame_requested {
            return FrameStep::Idle;
        }
        let max_scroll = self.layout.max_scroll();
        if self.offset >= max_scroll {
            self.frame_requested = false;
            return FrameStep::Finished {
                offset: self.offset,
            };
        }
        let frames = (total_duration_ms / frame_interval_ms).max(1.0);
        let increment = (max_scroll as f64 / frames) as f32;
        self.offset = (self.offset + increment).min(max_scroll);
        if self.offset >= max_scroll {
            self.frame_requested = false;
            FrameStep::Finished {
                offset: self.offset,
            }
        } else {
            FrameStep::Advanced {
                offset: self.offset,
            }
        }
    }

    /// Cancel the frame loop without moving the image.
    pub fn halt(&mut self) {
        self.frame_requested = false;
    }

    pub fn reset(&mut self) {
        self.frame_requested = false;
        self.offset = 0.0;
    }

    pub fn offset(&self) -> f32 {
        self.offset
    }

    pub fn layout(&self) -> ScrollLayout {
        self.layout
    }

    pub fn wants_frame(&self) -> bool {
        self.frame_requested
    }
}
