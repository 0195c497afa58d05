//! Presentation-state orchestrator for an interactive 3D emblem that
//! doubles as primary navigation for a three-section presentation
//! (identity / works / contact).
//!
//! The embedding shell owns the window, the real renderer and the DOM; this
//! crate owns every state transition behind them:
//! - A directional pointer gesture over the emblem advances a cyclic
//!   three-section navigation model
//! - Rotation, scale and position interpolate toward their targets every
//!   frame with an exponential-decay feel
//! - A focused (detail) view shrinks and parks the emblem beside section
//!   content
//! - A strictly-ordered, scroll-gated 13-phase reveal sequence plays the
//!   identity section's narrative beats
//!
//! Input events mutate state; the per-frame tick only advances interpolated
//! values and reads. See [`app::App`] for the embedder surface.

pub mod anim;
pub mod app;
pub mod config;
pub mod content;
pub mod error;
pub mod events;
pub mod logger;
pub mod scene;
pub mod stage;
pub mod state;
