//! Scroll-gated narrative phase sequencer for the identity section.
//!
//! A fixed sequence of visual beats (rings filling, tokens falling into a
//! bowl, a lid closing, a shape collapsing into a figure, text reveals, a
//! split into two shapes, eyes) plays strictly in order. The scroll wheel is
//! the sole advance trigger; gated phases intercept forward scrolling until
//! their exit animation reports completion. Each gated phase has exactly one
//! admissible transition.

use crate::stage::{AnimationName, ElementId, StageCommand};
use log::*;

/// Terminal phase; all further forward scrolling is swallowed.
///
pub const TERMINAL_PHASE: u8 = 12;

/// First wheel-gated phase. Phases before this are driven by reveal
/// positions and fall through to ordinary scroll handling.
///
const FIRST_GATED_PHASE: u8 = 3;

/// Viewport fraction at which the skills panel starts its ring fill.
///
const SKILLS_REVEAL_FRACTION: f64 = 0.8;

/// Viewport fraction at which the bowl wrapper starts the token drop.
///
const WRAPPER_REVEAL_FRACTION: f64 = 0.7;

const NARRATIVE_TEXT_INTRO: &str = "Manchmal will ich";
const NARRATIVE_TEXT_FULL: &str = "Manchmal will ich\ndie Welt auf\nden Kopf stellen";
const LEFT_EYE_TEXT: &str = "manchmal\nwill\nich";
const RIGHT_EYE_TEXT: &str = "einfach\nmit\nihr\nquatschen";

/// How a gated step finishes: either a one-shot animation-finished signal
/// from the presentation layer, or immediately within the triggering event.
///
#[derive(Debug, Clone, Copy, PartialEq)]
enum Completion {
    Signal {
        element: ElementId,
        animation: AnimationName,
    },
    Immediate,
}

/// One admissible transition of the gated portion of the sequence.
///
#[derive(Debug, Clone, Copy)]
struct GatedStep {
    phase: u8,
    completion: Completion,
}

/// Transition table for the wheel-gated phases. Auditable in one place
/// instead of a ladder of inline conditionals.
///
const GATED_STEPS: [GatedStep; 9] = [
    GatedStep {
        phase: 3,
        completion: Completion::Signal {
            element: ElementId::BowlLid,
            animation: AnimationName::LidClose,
        },
    },
    GatedStep {
        phase: 4,
        completion: Completion::Signal {
            element: ElementId::PersonFigure,
            animation: AnimationName::TransformToBody,
        },
    },
    GatedStep {
        phase: 5,
        completion: Completion::Signal {
            element: ElementId::CircleWrapper,
            animation: AnimationName::RestoreToCircle,
        },
    },
    GatedStep {
        phase: 6,
        completion: Completion::Signal {
            element: ElementId::NarrativeText,
            animation: AnimationName::TextRotate,
        },
    },
    GatedStep {
        phase: 7,
        completion: Completion::Signal {
            element: ElementId::PersonFigure,
            animation: AnimationName::TransformToBody,
        },
    },
    GatedStep {
        phase: 8,
        completion: Completion::Signal {
            element: ElementId::CircleWrapper,
            animation: AnimationName::RestoreToCircle,
        },
    },
    GatedStep {
        phase: 9,
        completion: Completion::Immediate,
    },
    GatedStep {
        phase: 10,
        completion: Completion::Immediate,
    },
    GatedStep {
        phase: 11,
        completion: Completion::Immediate,
    },
];

fn gated_step(phase: u8) -> Option<&'static GatedStep> {
    GATED_STEPS.iter().find(|step| step.phase == phase)
}

/// Presentation work coupled 1:1 to each gated transition. Content swaps
/// happen here, exactly once, atomically with the step.
///
fn step_commands(phase: u8) -> Vec<StageCommand> {
    match phase {
        3 => vec![StageCommand::Animate {
            element: ElementId::BowlLid,
            animation: AnimationName::LidClose,
        }],
        4 => vec![StageCommand::Animate {
            element: ElementId::PersonFigure,
            animation: AnimationName::TransformToBody,
        }],
        // Return to the pre-collapse circle baseline with the first text
        // line; the phase counter itself keeps moving forward.
        5 => vec![
            StageCommand::SetText {
                element: ElementId::NarrativeText,
                text: NARRATIVE_TEXT_INTRO.to_string(),
            },
            StageCommand::SetOpacity {
                element: ElementId::NarrativeText,
                opacity: 1.0,
            },
            StageCommand::Animate {
                element: ElementId::CircleWrapper,
                animation: AnimationName::RestoreToCircle,
            },
        ],
        6 => vec![
            StageCommand::SetText {
                element: ElementId::NarrativeText,
                text: NARRATIVE_TEXT_FULL.to_string(),
            },
            StageCommand::Animate {
                element: ElementId::NarrativeText,
                animation: AnimationName::TextRotate,
            },
        ],
        7 => vec![
            StageCommand::SetOpacity {
                element: ElementId::NarrativeText,
                opacity: 0.0,
            },
            StageCommand::ClearAnimations {
                element: ElementId::CircleWrapper,
            },
            StageCommand::SetOpacity {
                element: ElementId::PersonFigure,
                opacity: 1.0,
            },
            StageCommand::Animate {
                element: ElementId::PersonFigure,
                animation: AnimationName::TransformToBody,
            },
        ],
        8 => vec![
            StageCommand::ClearAnimations {
                element: ElementId::CircleWrapper,
            },
            StageCommand::SetText {
                element: ElementId::NarrativeText,
                text: NARRATIVE_TEXT_INTRO.to_string(),
            },
            StageCommand::Animate {
                element: ElementId::CircleWrapper,
                animation: AnimationName::RestoreToCircle,
            },
        ],
        9 => vec![
            StageCommand::Promote {
                element: ElementId::PersonFigure,
            },
            StageCommand::Animate {
                element: ElementId::CircleWrapper,
                animation: AnimationName::MoveLeft,
            },
            StageCommand::Animate {
                element: ElementId::PersonFigure,
                animation: AnimationName::MoveRight,
            },
            StageCommand::SetOpacity {
                element: ElementId::NarrativeText,
                opacity: 1.0,
            },
        ],
        10 => vec![
            StageCommand::SetOpacity {
                element: ElementId::NarrativeText,
                opacity: 0.0,
            },
            StageCommand::Spawn {
                element: ElementId::LeftEye,
            },
            StageCommand::Spawn {
                element: ElementId::RightEye,
            },
            StageCommand::Animate {
                element: ElementId::LeftEye,
                animation: AnimationName::EyeAppear,
            },
            StageCommand::Animate {
                element: ElementId::RightEye,
                animation: AnimationName::EyeAppear,
            },
        ],
        11 => vec![
            StageCommand::Spawn {
                element: ElementId::LeftEyeText,
            },
            StageCommand::SetText {
                element: ElementId::LeftEyeText,
                text: LEFT_EYE_TEXT.to_string(),
            },
            StageCommand::Spawn {
                element: ElementId::RightEyeText,
            },
            StageCommand::SetText {
                element: ElementId::RightEyeText,
                text: RIGHT_EYE_TEXT.to_string(),
            },
        ],
        _ => vec![],
    }
}

/// Result of feeding one wheel event to the sequencer.
///
#[derive(Debug, Clone, PartialEq, Default)]
pub struct WheelOutcome {
    /// Whether the default scroll action must be suppressed.
    pub suppress_default: bool,
    /// Whether the event was consumed by the sequencer at all. When false,
    /// the event falls through to ordinary scroll handling.
    pub consumed: bool,
    /// Presentation work triggered by this event.
    pub commands: Vec<StageCommand>,
}

/// The 13-phase, strictly-forward state machine gating scroll input while
/// the identity detail view is active.
///
#[derive(Debug, Clone, Default)]
pub struct PhaseSequencer {
    phase: u8,
    in_flight: Option<(ElementId, AnimationName)>,
    active: bool,
}

impl PhaseSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> u8 {
        self.phase
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Start (or restart) the sequence when the identity detail view is
    /// entered. The phase counter resets to 0.
    ///
    pub fn attach(&mut self) {
        self.active = true;
        self.phase = 0;
        self.in_flight = None;
        debug!("Phase sequence attached, phase reset to 0.");
    }

    /// Detach from scroll events when the detail view closes or the section
    /// is exited.
    ///
    pub fn detach(&mut self) {
        self.active = false;
        self.phase = 0;
        self.in_flight = None;
        debug!("Phase sequence detached.");
    }

    /// Feed reveal-anchor positions from the shared scroll stream. The two
    /// earliest transitions are driven by content crossing fixed viewport
    /// fractions rather than by gated wheel events.
    ///
    pub fn on_reveal(
        &mut self,
        skills_top: f64,
        wrapper_top: f64,
        viewport_height: f64,
    ) -> Vec<StageCommand> {
        if !self.active {
            return vec![];
        }

        let mut commands = vec![];

        if self.phase == 0 && skills_top < viewport_height * SKILLS_REVEAL_FRACTION {
            self.phase = 1;
            debug!("Skills panel revealed, phase -> 1.");
            commands.push(StageCommand::SetOpacity {
                element: ElementId::SkillsPanel,
                opacity: 1.0,
            });
        }

        if self.phase == 1 && wrapper_top < viewport_height * WRAPPER_REVEAL_FRACTION {
            self.phase = 2;
            self.in_flight = Some((ElementId::CircleWrapper, AnimationName::BallDrop));
            debug!("Token drop started, phase -> 2.");
            commands.push(StageCommand::SetOpacity {
                element: ElementId::CircleWrapper,
                opacity: 1.0,
            });
            commands.push(StageCommand::Animate {
                element: ElementId::CircleWrapper,
                animation: AnimationName::BallDrop,
            });
        }

        commands
    }

    /// Feed one wheel event. Only forward (positive-delta) events interact
    /// with gated phases; everything else falls through.
    ///
    pub fn on_wheel(&mut self, delta_y: f64) -> WheelOutcome {
        if !self.active || delta_y <= 0.0 {
            return WheelOutcome::default();
        }

        if self.phase >= TERMINAL_PHASE {
            // Sequence exhausted; swallow with no effect.
            return WheelOutcome {
                suppress_default: true,
                consumed: true,
                commands: vec![],
            };
        }

        if self.phase < FIRST_GATED_PHASE {
            return WheelOutcome::default();
        }

        let step = match gated_step(self.phase) {
            Some(step) => step,
            None => return WheelOutcome::default(),
        };

        if self.in_flight.is_some() {
            // Exit animation already playing; keep the page pinned but do
            // not start a second one.
            return WheelOutcome {
                suppress_default: true,
                consumed: true,
                commands: vec![],
            };
        }

        let commands = step_commands(step.phase);
        match step.completion {
            Completion::Signal { element, animation } => {
                self.in_flight = Some((element, animation));
                debug!(
                    "Phase {} exit animation started ({:?} on {:?}).",
                    self.phase, animation, element
                );
            }
            Completion::Immediate => {
                self.phase += 1;
                debug!("Phase advanced immediately to {}.", self.phase);
            }
        }

        WheelOutcome {
            suppress_default: true,
            consumed: true,
            commands,
        }
    }

    /// One-shot animation-finished signal from the presentation layer. The
    /// phase increments by exactly 1 when the signal matches the pending
    /// transition; anything else is logged and ignored.
    ///
    pub fn on_transition_end(&mut self, element: ElementId, animation: AnimationName) -> bool {
        match self.in_flight {
            Some((pending_element, pending_animation))
                if pending_element == element && pending_animation == animation =>
            {
                self.in_flight = None;
                self.phase += 1;
                debug!("Transition finished, phase -> {}.", self.phase);
                true
            }
            _ => {
                debug!(
                    "Ignoring unexpected transition end ({:?}, {:?}).",
                    element, animation
                );
                false
            }
        }
    }
}
