//! Animation primitives shared by every animated quantity.
//!
//! This module contains:
//! - Exponential approach-to-target interpolation with snap semantics
//! - Completion checks over multiple animated channels
//! - The `Ratchet` type for monotonically non-decreasing progress values

/// Default per-frame interpolation factor for the exponential-decay feel.
///
pub const INTERPOLATION_FACTOR: f64 = 0.1;

/// Snap threshold below which an animated value lands exactly on target.
///
pub const SNAP_EPSILON: f64 = 0.01;

/// Move `current` toward `target` by the default factor, snapping to the
/// target exactly once the remaining difference falls under the epsilon.
///
pub fn approach(current: f64, target: f64) -> f64 {
    approach_with(current, target, INTERPOLATION_FACTOR)
}

/// Move `current` toward `target` by an explicit factor. Pure function; the
/// caller owns the animated value.
///
pub fn approach_with(current: f64, target: f64, factor: f64) -> f64 {
    let diff = target - current;
    if diff.abs() > SNAP_EPSILON {
        current + diff * factor
    } else {
        target
    }
}

/// Sum of absolute differences across animated channels. Used to decide
/// overall completion of multi-channel transitions.
///
pub fn total_abs_diff(diffs: &[f64]) -> f64 {
    diffs.iter().map(|d| d.abs()).sum()
}

/// True once every channel is within the given threshold of its target.
///
pub fn is_complete(diffs: &[f64], threshold: f64) -> bool {
    diffs.iter().all(|d| d.abs() <= threshold)
}

/// A value that only ever moves forward. Scroll reveal progress and similar
/// quantities use this so that scrolling back up never hides content that
/// was already revealed.
///
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Ratchet {
    value: f64,
}

impl Ratchet {
    pub fn new() -> Self {
        Ratchet { value: 0.0 }
    }

    /// Current ratcheted value.
    ///
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Accept `candidate` only if it exceeds the stored value. Returns true
    /// when the value advanced.
    ///
    pub fn advance_if_greater(&mut self, candidate: f64) -> bool {
        if candidate > self.value {
            self.value = candidate;
            true
        } else {
            false
        }
    }

    /// Drop back to zero. Only legal when the region the ratchet tracks is
    /// rebuilt from scratch.
    ///
    pub fn reset(&mut self) {
        self.value = 0.0;
    }
}
