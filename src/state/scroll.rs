//! Scroll-progress ratchet and timeline reveal math.
//!
//! The timeline reveal is independent of the phase sequencer but shares the
//! same scroll event stream and the same ratchet discipline: progress only
//! ever moves forward, so scrolling back up never hides revealed content.

use crate::anim::Ratchet;

/// Viewport fraction where an entry's reveal animation starts.
///
const TRIGGER_LINE_FRACTION: f64 = 0.5;

/// Scroll distance in pixels over which an entry's reveal completes.
///
const REVEAL_DISTANCE_PX: f64 = 150.0;

/// Maximum horizontal slide distance for a revealing content line.
///
const LINE_SLIDE_PX: f64 = 50.0;

/// Monotonic reveal-progress tracker over the scrollable region.
///
#[derive(Debug, Clone, Default)]
pub struct ScrollProgressTracker {
    progress: Ratchet,
}

impl ScrollProgressTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stored reveal progress in [0, 1].
    ///
    pub fn progress(&self) -> f64 {
        self.progress.value()
    }

    /// Recompute progress from the scroll offset against the scrollable
    /// height. The stored value only moves forward.
    ///
    pub fn on_scroll(&mut self, scroll_offset: f64, viewport_height: f64, content_height: f64) -> f64 {
        let scrollable = content_height - viewport_height;
        let candidate = if scrollable > 0.0 {
            (scroll_offset / scrollable).min(1.0)
        } else {
            0.0
        };
        self.progress.advance_if_greater(candidate);
        self.progress.value()
    }

    /// Reset when the reveal region is rebuilt.
    ///
    pub fn reset(&mut self) {
        self.progress.reset();
    }
}

/// Reveal state of a single timeline entry for one frame.
///
#[derive(Debug, Clone, PartialEq)]
pub struct EntryReveal {
    /// Entry progress in [0, 1] against the trigger line.
    pub progress: f64,
    /// Whether the label and point are visible at all.
    pub visible: bool,
    /// Per-line opacity, in document order.
    pub line_opacities: Vec<f64>,
    /// Per-line horizontal offset in pixels (negative slides from the
    /// right, for right-side entries).
    pub line_offsets: Vec<f64>,
}

/// Progress of an entry whose anchor sits at `anchor_top` pixels below the
/// viewport top. Reveal starts when the anchor crosses the trigger line and
/// completes over a fixed scroll distance.
///
pub fn entry_progress(anchor_top: f64, viewport_height: f64) -> f64 {
    let start = viewport_height * TRIGGER_LINE_FRACTION;
    let end = start - REVEAL_DISTANCE_PX;
    ((start - anchor_top) / (start - end)).clamp(0.0, 1.0)
}

/// Per-entry reveal: label/point visibility plus line-by-line opacity and
/// slide for the entry's content block.
///
pub fn entry_reveal(
    anchor_top: f64,
    viewport_height: f64,
    line_count: usize,
    right_side: bool,
) -> EntryReveal {
    let progress = entry_progress(anchor_top, viewport_height);
    let line_progress = progress * line_count as f64;

    let mut line_opacities = Vec::with_capacity(line_count);
    let mut line_offsets = Vec::with_capacity(line_count);
    for index in 0..line_count {
        let current = (line_progress - index as f64).clamp(0.0, 1.0);
        line_opacities.push(current);
        let slide = (1.0 - current) * LINE_SLIDE_PX;
        line_offsets.push(if right_side { -slide } else { slide });
    }

    EntryReveal {
        progress,
        visible: progress > 0.0,
        line_opacities,
        line_offsets,
    }
}

/// Line-weighted progress used for the black progress bars: each fully
/// revealed content line contributes equally, partially revealed lines
/// contribute their fraction.
///
pub fn content_weighted_progress(entry_progress: f64, line_count: usize) -> f64 {
    if line_count == 0 {
        return entry_progress;
    }
    let line_progress = entry_progress * line_count as f64;
    let mut visible = 0.0;
    for index in 0..line_count {
        let line_start = index as f64;
        if line_progress > line_start + 1.0 {
            visible += 1.0;
        } else if line_progress > line_start {
            visible += line_progress - line_start;
        }
    }
    visible / line_count as f64
}

/// Height in pixels of a progress bar capped at `max_height`.
///
pub fn progress_bar_height(entry_progress: f64, line_count: usize, max_height: f64) -> f64 {
    content_weighted_progress(entry_progress, line_count) * max_height
}
