//! Cyclic three-state rotation machine for the emblem.
//!
//! Each navigation step turns the emblem toward a fixed orientation. The
//! targets come from a lookup table keyed by the (from, to) section pair;
//! per-frame interpolation and the completion check live here, driven by the
//! shared animation primitives.

use crate::anim;
use crate::state::navigation::Section;
use log::*;
use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI};

/// Per-axis epsilon under which an angle counts as settled.
///
const ROTATION_EPSILON: f64 = 0.01;

/// Target orientation triple (x, y, z) in radians.
///
pub type RotationTriple = [f64; 3];

/// Fixed orientation table keyed by the ordered section pair. Every entry
/// that lands on the same section shares its triple, which is what makes
/// repeated advances reproduce identical targets every cycle.
///
const ROTATION_TARGETS: [(Section, Section, RotationTriple); 6] = [
    (Section::Identity, Section::Works, [0.0, FRAC_PI_2, 0.0]),
    (
        Section::Works,
        Section::Contact,
        [-FRAC_PI_2, FRAC_PI_2 + FRAC_PI_4, 0.0],
    ),
    (Section::Contact, Section::Identity, [0.0, 0.0, 0.0]),
    (
        Section::Identity,
        Section::Contact,
        [-FRAC_PI_2, FRAC_PI_2 + FRAC_PI_4, 0.0],
    ),
    (Section::Works, Section::Identity, [0.0, 0.0, 0.0]),
    (Section::Contact, Section::Works, [0.0, FRAC_PI_2, 0.0]),
];

/// Look up the target orientation for a section change.
///
pub fn rotation_target(from: Section, to: Section) -> Option<RotationTriple> {
    ROTATION_TARGETS
        .iter()
        .find(|(f, t, _)| *f == from && *t == to)
        .map(|(_, _, triple)| *triple)
}

/// Owns the current/target orientation of the emblem and the cyclic
/// three-state navigation model.
///
#[derive(Debug, Clone)]
pub struct RotationStateMachine {
    current_section: Section,
    target_section: Section,
    current: RotationTriple,
    target: RotationTriple,
    rotating: bool,
    progress: f64,
    advance_count: u32,
}

impl Default for RotationStateMachine {
    fn default() -> Self {
        RotationStateMachine {
            current_section: Section::Identity,
            target_section: Section::Identity,
            current: [0.0; 3],
            target: [0.0; 3],
            rotating: false,
            progress: 1.0,
            advance_count: 0,
        }
    }
}

impl RotationStateMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current_section(&self) -> Section {
        self.current_section
    }

    pub fn target_section(&self) -> Section {
        self.target_section
    }

    pub fn is_rotating(&self) -> bool {
        self.rotating
    }

    /// Transition progress in [0, 1], derived from remaining angular
    /// distance. Used only for cross-fading the navigation label.
    ///
    pub fn progress(&self) -> f64 {
        self.progress
    }

    pub fn angles(&self) -> RotationTriple {
        self.current
    }

    pub fn target_angles(&self) -> RotationTriple {
        self.target
    }

    pub fn advance_count(&self) -> u32 {
        self.advance_count
    }

    /// Step one section forward in the fixed cycle. Caller is responsible
    /// for the gesture-level guards; the machine itself refuses to start a
    /// new turn mid-rotation.
    ///
    pub fn advance(&mut self) -> bool {
        if self.rotating {
            debug!("Ignoring advance while rotation is in progress.");
            return false;
        }
        let to = self.current_section.next();
        self.advance_count += 1;
        self.begin(to);
        true
    }

    /// Jump directly to the given section from the navigation UI. Idempotent
    /// no-op when already there or mid-rotation.
    ///
    pub fn switch_to(&mut self, to: Section) -> bool {
        if self.current_section == to || self.rotating {
            debug!("Ignoring switch to {:?} (already there or rotating).", to);
            return false;
        }
        self.begin(to);
        true
    }

    fn begin(&mut self, to: Section) {
        // The pair table covers every from != to combination.
        if let Some(triple) = rotation_target(self.current_section, to) {
            self.target = triple;
            self.target_section = to;
            self.rotating = true;
            self.progress = 0.0;
            debug!(
                "Turning emblem {:?} -> {:?}, target angles {:?}.",
                self.current_section, to, triple
            );
        } else {
            warn!(
                "No rotation target for {:?} -> {:?}; skipping.",
                self.current_section, to
            );
        }
    }

    /// Advance the three angles one frame. Completion is polled here, never
    /// pushed: once every axis is within epsilon, the machine settles with
    /// `current == target` and `progress == 1`.
    ///
    pub fn tick(&mut self) {
        if !self.rotating {
            return;
        }

        let diffs = [
            self.target[0] - self.current[0],
            self.target[1] - self.current[1],
            self.target[2] - self.current[2],
        ];

        for axis in 0..3 {
            self.current[axis] = anim::approach(self.current[axis], self.target[axis]);
        }

        let total = anim::total_abs_diff(&diffs);
        self.progress = (1.0 - total / PI).clamp(0.0, 1.0);

        if anim::is_complete(&diffs, ROTATION_EPSILON) {
            self.rotating = false;
            self.current_section = self.target_section;
            self.progress = 1.0;
        }
    }

    /// Apply the hover wobble while idle: a gentle sway on the Y axis that
    /// hints the emblem reacts to the pointer.
    ///
    pub fn apply_hover_wobble(&mut self, now_ms: f64) {
        const HOVER_EFFECT_SPEED: f64 = 0.002;
        const HOVER_EFFECT_AMPLITUDE: f64 = 0.003;
        if !self.rotating {
            self.current[1] += (now_ms * HOVER_EFFECT_SPEED).sin() * HOVER_EFFECT_AMPLITUDE;
        }
    }
}
