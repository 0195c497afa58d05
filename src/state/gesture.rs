//! Directional pointer-gesture recognition over the emblem.
//!
//! A leftward "page-turn" movement while hovering the emblem advances the
//! navigation cycle; rightward movement is intentionally inert. A fixed
//! cooldown window debounces repeated triggers.

use log::*;

/// Minimum normalized horizontal movement that counts as a gesture.
///
const MOVE_DETECTION_THRESHOLD: f64 = 0.02;

/// Cooldown window after an accepted gesture, in milliseconds. A pure timer,
/// deliberately not tied to rotation completion.
///
const TRIGGER_RESET_MS: f64 = 500.0;

/// Tracks pointer hit-testing and horizontal movement sign, emitting a
/// single debounced advance trigger per accepted gesture.
///
#[derive(Debug, Clone, Default)]
pub struct GestureRecognizer {
    hovering_target: bool,
    last_pointer_x: f64,
    cooldown_until: Option<f64>,
    advance_count: u32,
}

impl GestureRecognizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_hovering_target(&self) -> bool {
        self.hovering_target
    }

    /// Number of accepted gestures so far. Monotonically increasing.
    ///
    pub fn advance_count(&self) -> u32 {
        self.advance_count
    }

    pub fn cooldown_active(&self, now_ms: f64) -> bool {
        matches!(self.cooldown_until, Some(until) if now_ms < until)
    }

    /// Record the hit-test result for the current pointer position.
    ///
    pub fn set_hovering(&mut self, hovering: bool) {
        self.hovering_target = hovering;
    }

    /// Feed one pointer-move sample. Returns true when a leftward gesture is
    /// accepted; `busy` reflects the callers' guards (mid-rotation, focused
    /// mode, focus transition), during which no gesture may fire. The last
    /// pointer position is updated on every call regardless of outcome.
    ///
    pub fn on_pointer_move(&mut self, x: f64, busy: bool, now_ms: f64) -> bool {
        let delta_x = x - self.last_pointer_x;
        let mut triggered = false;

        if self.hovering_target && !busy {
            if delta_x < -MOVE_DETECTION_THRESHOLD && !self.cooldown_active(now_ms) {
                debug!("Accepted leftward gesture, delta_x = {:.4}.", delta_x);
                self.cooldown_until = Some(now_ms + TRIGGER_RESET_MS);
                self.advance_count += 1;
                triggered = true;
            } else if delta_x > MOVE_DETECTION_THRESHOLD {
                debug!("Rightward movement ignored, delta_x = {:.4}.", delta_x);
            }
        }

        self.last_pointer_x = x;
        triggered
    }
}
