use crate::state::{Section, State};
use anyhow::Result;
use log::*;

/// Specify different pointer event types. Coordinates are normalized device
/// coordinates in the -1..1 range, `hit` reports whether the pointer ray
/// intersects the emblem.
///
#[derive(Debug, Clone)]
pub enum Event {
    Moved {
        x: f64,
        y: f64,
        hit: bool,
        now_ms: f64,
    },
    Clicked {
        hit: bool,
    },
    NavClicked {
        section: Section,
    },
    Left,
}

/// Specify struct for managing state with pointer events.
///
pub struct Handler;

impl Handler {
    /// Return new instance.
    ///
    pub fn new() -> Self {
        Handler
    }

    /// Handle pointer events by type.
    ///
    pub fn handle(&self, state: &mut State, event: Event) -> Result<()> {
        trace!("Processing pointer event '{:?}'...", event);
        match event {
            Event::Moved { x, y, hit, now_ms } => state.handle_pointer_move(x, y, hit, now_ms),
            Event::Clicked { hit } => state.handle_click(hit),
            Event::NavClicked { section } => state.handle_nav_click(section)?,
            Event::Left => state.handle_pointer_left(),
        }
        Ok(())
    }
}

impl Default for Handler {
    fn default() -> Self {
        Handler::new()
    }
}
