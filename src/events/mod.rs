//! Event handling module.
//!
//! This module contains handlers for different types of events:
//! - Pointer events: hover, movement gestures and clicks on the emblem
//! - Scroll events: wheel deltas and document scroll positions
//! - Network events: lazy fetches of presentation content fragments

pub mod network;
pub mod pointer;
pub mod scroll;
