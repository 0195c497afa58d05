//! Focused (detail) view transition for the emblem.
//!
//! Entering focus shrinks the emblem and parks it beside the section
//! content; exiting restores it to the origin at full size. The controller
//! owns the transform targets exclusively; the render tick reads the
//! current values every frame.

use crate::anim;
use crate::scene::{OrthoCamera, Viewport};
use crate::stage::StageRefs;
use log::*;

/// Scale the emblem shrinks to in focused mode.
///
const DETAIL_SCALE: f64 = 0.2;

/// Fraction of the frustum width used for the horizontal offset.
///
const CAMERA_MOVE_FACTOR: f64 = 0.12;

/// Extra multiplier pushing the emblem a little further out than the raw
/// camera-move distance.
///
const HORIZONTAL_OVERSHOOT: f64 = 1.2;

/// Summed absolute delta across scale + position channels under which the
/// transition counts as complete.
///
const POSITION_THRESHOLD: f64 = 0.1;

/// Hover boost applied to the current scale in focused mode, hinting that a
/// click will leave the detail view.
///
const HOVER_SCALE_BOOST: f64 = 1.1;

/// Fallback navbar anchor, in pixels from the top, when the resolved
/// reference table has no navbar entry.
///
const NAVBAR_FALLBACK_Y_PX: f64 = 80.0;

/// Governs enter/exit of the focused view and the emblem's scale/position
/// interpolation toward the mode's targets.
///
#[derive(Debug, Clone)]
pub struct FocusController {
    focused: bool,
    transitioning: bool,
    current_scale: f64,
    target_scale: f64,
    current_position: [f64; 3],
    target_position: [f64; 3],
    camera_controls_enabled: bool,
}

impl Default for FocusController {
    fn default() -> Self {
        FocusController {
            focused: false,
            transitioning: false,
            current_scale: 1.0,
            target_scale: 1.0,
            current_position: [0.0; 3],
            target_position: [0.0; 3],
            camera_controls_enabled: true,
        }
    }
}

impl FocusController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn is_transitioning(&self) -> bool {
        self.transitioning
    }

    /// Whether free camera manipulation is currently allowed.
    ///
    pub fn camera_controls_enabled(&self) -> bool {
        self.camera_controls_enabled
    }

    pub fn scale(&self) -> f64 {
        self.current_scale
    }

    pub fn target_scale(&self) -> f64 {
        self.target_scale
    }

    pub fn position(&self) -> [f64; 3] {
        self.current_position
    }

    pub fn target_position(&self) -> [f64; 3] {
        self.target_position
    }

    /// Enter the focused view. The horizontal target is proportional to the
    /// current frustum width; the vertical target projects the navbar's
    /// screen-space center into world space. Idempotent no-op when already
    /// focused or mid-transition.
    ///
    pub fn enter(
        &mut self,
        camera: &OrthoCamera,
        viewport: Viewport,
        refs: &StageRefs,
    ) -> bool {
        if self.focused || self.transitioning {
            debug!("Ignoring focus enter (already focused or transitioning).");
            return false;
        }

        self.transitioning = true;
        self.focused = true;
        self.camera_controls_enabled = false;

        let move_distance = camera.width() * CAMERA_MOVE_FACTOR;
        self.target_scale = DETAIL_SCALE;
        self.target_position[0] = -move_distance * HORIZONTAL_OVERSHOOT;

        let anchor_y_px = match refs.navbar_center_y {
            Some(y) => y,
            None => {
                warn!("Navbar reference missing; using fallback anchor.");
                NAVBAR_FALLBACK_Y_PX
            }
        };
        let ndc_y = viewport.pixel_y_to_ndc(anchor_y_px);
        self.target_position[1] = camera.unproject_ndc_y(ndc_y);
        self.target_position[2] = 0.0;

        info!(
            "Entering focused view, target scale {} position {:?}.",
            self.target_scale, self.target_position
        );
        true
    }

    /// Exit the focused view, restoring scale 1 at the origin. Idempotent
    /// no-op when not focused.
    ///
    pub fn exit(&mut self) -> bool {
        if !self.focused {
            debug!("Ignoring focus exit (not focused).");
            return false;
        }

        self.transitioning = true;
        self.focused = false;
        self.camera_controls_enabled = true;

        self.target_scale = 1.0;
        self.target_position = [0.0; 3];

        info!("Exiting focused view.");
        true
    }

    /// Advance scale and position one frame. The transitioning flag clears
    /// once the combined delta across all four channels falls under the
    /// threshold; this check is independent of the rotation machine, so
    /// rotation and focus transitions run concurrently.
    ///
    pub fn tick(&mut self) {
        let diffs = [
            self.target_scale - self.current_scale,
            self.target_position[0] - self.current_position[0],
            self.target_position[1] - self.current_position[1],
            self.target_position[2] - self.current_position[2],
        ];

        // Keep interpolating past the completion threshold until every
        // channel has snapped onto its target.
        if !self.transitioning && diffs.iter().all(|d| *d == 0.0) {
            return;
        }

        self.current_scale = anim::approach(self.current_scale, self.target_scale);
        for axis in 0..3 {
            self.current_position[axis] =
                anim::approach(self.current_position[axis], self.target_position[axis]);
        }

        if self.transitioning && anim::total_abs_diff(&diffs) < POSITION_THRESHOLD {
            self.transitioning = false;
            debug!("Focus transition completed.");
        }
    }

    /// Temporary scale boost while the pointer hovers the emblem in focused
    /// mode. Overrides only the current value; the target is untouched, so
    /// the regular interpolation restores the baseline once hovering stops.
    ///
    pub fn apply_hover_boost(&mut self) {
        if self.focused {
            self.current_scale = self.target_scale * HOVER_SCALE_BOOST;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn camera_and_viewport() -> (OrthoCamera, Viewport) {
        let viewport = Viewport::new(1000.0, 1000.0);
        (OrthoCamera::new(viewport), viewport)
    }

    fn settle(controller: &mut FocusController) {
        for _ in 0..500 {
            controller.tick();
            if !controller.is_transitioning() {
                return;
            }
        }
        panic!("focus transition did not settle");
    }

    #[test]
    fn test_enter_sets_targets_once() {
        let (camera, viewport) = camera_and_viewport();
        let refs = StageRefs::new(Some(40.0));
        let mut controller = FocusController::new();

        assert!(controller.enter(&camera, viewport, &refs));
        assert_eq!(controller.target_scale(), DETAIL_SCALE);
        let first_target = controller.target_position();
        // frustum width 100 -> move distance 12 -> x = -14.4
        assert!((first_target[0] + 14.4).abs() < 1e-9);

        // Second call before completion is a no-op; targets unchanged.
        assert!(!controller.enter(&camera, viewport, &refs));
        assert_eq!(controller.target_position(), first_target);
    }

    #[test]
    fn test_vertical_target_projects_navbar_center() {
        let (camera, viewport) = camera_and_viewport();
        let refs = StageRefs::new(Some(250.0));
        let mut controller = FocusController::new();
        controller.enter(&camera, viewport, &refs);
        // 250px of 1000 -> ndc 0.5 -> world y = 25 on a 100-unit frustum.
        assert!((controller.target_position()[1] - 25.0).abs() < 1e-9);
    }

    #[test]
    fn test_missing_navbar_uses_fallback() {
        let (camera, viewport) = camera_and_viewport();
        let mut controller = FocusController::new();
        controller.enter(&camera, viewport, &StageRefs::default());
        // 80px of 1000 -> ndc 0.84 -> world y = 42.
        assert!((controller.target_position()[1] - 42.0).abs() < 1e-9);
    }

    #[test]
    fn test_enter_disables_camera_controls_exit_restores() {
        let (camera, viewport) = camera_and_viewport();
        let mut controller = FocusController::new();
        assert!(controller.camera_controls_enabled());
        controller.enter(&camera, viewport, &StageRefs::new(Some(40.0)));
        assert!(!controller.camera_controls_enabled());
        settle(&mut controller);
        controller.exit();
        assert!(controller.camera_controls_enabled());
    }

    #[test]
    fn test_exit_when_not_focused_is_noop() {
        let mut controller = FocusController::new();
        assert!(!controller.exit());
        assert!(!controller.is_transitioning());
    }

    #[test]
    fn test_transition_completes_under_threshold() {
        let (camera, viewport) = camera_and_viewport();
        let mut controller = FocusController::new();
        controller.enter(&camera, viewport, &StageRefs::new(Some(40.0)));
        assert!(controller.is_transitioning());
        settle(&mut controller);
        assert!((controller.scale() - DETAIL_SCALE).abs() < POSITION_THRESHOLD);
    }

    #[test]
    fn test_exit_returns_to_origin() {
        let (camera, viewport) = camera_and_viewport();
        let mut controller = FocusController::new();
        controller.enter(&camera, viewport, &StageRefs::new(Some(40.0)));
        settle(&mut controller);
        controller.exit();
        settle(&mut controller);
        assert_eq!(controller.target_scale(), 1.0);
        assert_eq!(controller.target_position(), [0.0; 3]);
        for _ in 0..500 {
            controller.tick();
        }
        assert_eq!(controller.scale(), 1.0);
        assert_eq!(controller.position(), [0.0; 3]);
    }

    #[test]
    fn test_hover_boost_leaves_target_untouched() {
        let (camera, viewport) = camera_and_viewport();
        let mut controller = FocusController::new();
        controller.enter(&camera, viewport, &StageRefs::new(Some(40.0)));
        settle(&mut controller);

        controller.apply_hover_boost();
        assert!((controller.scale() - DETAIL_SCALE * HOVER_SCALE_BOOST).abs() < 1e-9);
        assert_eq!(controller.target_scale(), DETAIL_SCALE);

        // Without hovering the interpolation pulls the scale back down.
        let boosted = controller.scale();
        controller.tick();
        assert!(controller.scale() < boosted);
    }

    #[test]
    fn test_hover_boost_ignored_outside_focus() {
        let mut controller = FocusController::new();
        controller.apply_hover_boost();
        assert_eq!(controller.scale(), 1.0);
    }
}
