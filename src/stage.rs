//! Presentation-layer vocabulary.
//!
//! The core never performs environment lookups itself. The embedding shell
//! resolves its element references once at setup and hands the table in;
//! afterwards the core only speaks in terms of `ElementId`, emits
//! `StageCommand`s for the shell to execute, and receives one-shot
//! `transition_end` signals identified by `AnimationName`.

/// Identifies a presentation element the core may reference in commands.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementId {
    Navbar,
    DetailContent,
    TimelineContainer,
    SkillsPanel,
    CircleWrapper,
    BowlLid,
    PersonFigure,
    NarrativeText,
    LeftEye,
    RightEye,
    LeftEyeText,
    RightEyeText,
    LoadingIndicator,
}

/// Names of declared visual transitions. The shell fires `transition_end`
/// with the matching name exactly once per started animation; the core
/// treats that signal as the sole source of truth for completion.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationName {
    BallDrop,
    LidClose,
    TransformToBody,
    RestoreToCircle,
    TextRotate,
    MoveLeft,
    MoveRight,
    EyeAppear,
}

/// Instruction for the presentation layer, produced by event handlers.
/// Commands are applied in order, synchronously, before the next frame.
///
#[derive(Debug, Clone, PartialEq)]
pub enum StageCommand {
    /// Start a declared animation on an element.
    Animate {
        element: ElementId,
        animation: AnimationName,
    },
    /// Remove every animation marker from an element, restoring its
    /// pre-animation baseline.
    ClearAnimations { element: ElementId },
    /// Replace an element's text content.
    SetText { element: ElementId, text: String },
    /// Set an element's opacity directly (no transition).
    SetOpacity { element: ElementId, opacity: f64 },
    /// Create an element that does not exist yet.
    Spawn { element: ElementId },
    /// Detach an element from its wrapper so it can move independently.
    Promote { element: ElementId },
}

/// Resolved references the shell found at setup. Optional entries cover the
/// degraded case where an expected element is absent; the affected operation
/// logs and is skipped rather than failing.
///
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StageRefs {
    /// Vertical screen-space center of the navigation bar, in pixels from
    /// the top of the window. `None` when the navbar is missing.
    pub navbar_center_y: Option<f64>,
}

impl StageRefs {
    pub fn new(navbar_center_y: Option<f64>) -> Self {
        StageRefs { navbar_center_y }
    }
}

impl Default for StageRefs {
    fn default() -> Self {
        StageRefs {
            navbar_center_y: None,
        }
    }
}
