//! Application state management module.
//!
//! This module contains the orchestrated state for the emblem stage:
//! - Main `State` struct tying the components together
//! - Navigation types (the three-section cycle)
//! - Rotation, gesture, focus, phase-sequencer and scroll components
//! - State error handling

mod error;
mod focus;
mod gesture;
mod navigation;
mod rotation;
mod scroll;
mod sequence;

pub use error::StateError;
pub use focus::FocusController;
pub use gesture::GestureRecognizer;
pub use navigation::Section;
pub use rotation::{rotation_target, RotationStateMachine, RotationTriple};
pub use scroll::{
    content_weighted_progress, entry_progress, entry_reveal, progress_bar_height, EntryReveal,
    ScrollProgressTracker,
};
pub use sequence::{PhaseSequencer, WheelOutcome, TERMINAL_PHASE};

// State struct and its operations are in state_impl.rs
#[path = "state_impl.rs"]
mod state_impl;

pub use state_impl::{FrameSnapshot, NavLabel, State};
