use crate::state::{State, WheelOutcome};
use anyhow::Result;
use log::*;

/// Document scroll position and dimensions at the time of a scroll event.
///
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollMetrics {
    pub scroll_top: f64,
    pub viewport_height: f64,
    pub content_height: f64,
}

/// Viewport-relative top positions of the reveal anchors: the skills panel,
/// the emblem wrapper, and each timeline entry in display order.
///
#[derive(Debug, Clone, PartialEq)]
pub struct RevealAnchors {
    pub skills_top: f64,
    pub wrapper_top: f64,
    pub entry_tops: Vec<f64>,
}

/// Specify different scroll event types.
///
#[derive(Debug, Clone)]
pub enum Event {
    Wheel { delta_y: f64 },
    Scrolled { metrics: ScrollMetrics, anchors: RevealAnchors },
}

/// Specify struct for managing state with scroll events.
///
pub struct Handler;

impl Handler {
    /// Return new instance.
    ///
    pub fn new() -> Self {
        Handler
    }

    /// Handle scroll events by type. Wheel events return an outcome telling
    /// the embedder whether to suppress default scrolling; scrolled events
    /// always leave the default alone.
    ///
    pub fn handle(&self, state: &mut State, event: Event) -> Result<WheelOutcome> {
        trace!("Processing scroll event '{:?}'...", event);
        match event {
            Event::Wheel { delta_y } => Ok(state.handle_wheel(delta_y)),
            Event::Scrolled { metrics, anchors } => {
                state.handle_scrolled(&metrics, &anchors);
                Ok(WheelOutcome::default())
            }
        }
    }
}

impl Default for Handler {
    fn default() -> Self {
        Handler::new()
    }
}
