//! Orthographic camera and viewport math.
//!
//! The core never touches a real renderer; it only needs enough frustum
//! geometry to place the emblem in focused mode and to size the view after
//! the asset loader reports the model's bounding dimensions.

use serde::Deserialize;

/// Frustum span used before the emblem geometry has loaded.
///
pub const DEFAULT_FRUSTUM_SIZE: f64 = 100.0;

/// Margin multiplier applied to the model's largest dimension when fitting
/// the frustum after load.
///
pub const FIT_MARGIN_FACTOR: f64 = 4.5;

/// Bounding dimensions reported by the asset loader for the emblem mesh.
///
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct GeometryBounds {
    pub width: f64,
    pub height: f64,
    pub depth: f64,
}

impl GeometryBounds {
    pub fn max_dimension(&self) -> f64 {
        self.width.max(self.height).max(self.depth)
    }
}

/// Window dimensions in pixels, kept current by resize events.
///
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Viewport { width, height }
    }

    pub fn aspect(&self) -> f64 {
        if self.height > 0.0 {
            self.width / self.height
        } else {
            1.0
        }
    }

    /// Convert a vertical pixel coordinate (top-down) to normalized device
    /// coordinates (-1 at the bottom, +1 at the top).
    ///
    pub fn pixel_y_to_ndc(&self, y_px: f64) -> f64 {
        if self.height > 0.0 {
            -(y_px / self.height) * 2.0 + 1.0
        } else {
            0.0
        }
    }
}

/// Symmetric orthographic frustum centered on the origin.
///
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrthoCamera {
    pub left: f64,
    pub right: f64,
    pub top: f64,
    pub bottom: f64,
    frustum_size: f64,
}

impl OrthoCamera {
    /// Camera with the pre-load frustum for the given viewport.
    ///
    pub fn new(viewport: Viewport) -> Self {
        let mut camera = OrthoCamera {
            left: 0.0,
            right: 0.0,
            top: 0.0,
            bottom: 0.0,
            frustum_size: DEFAULT_FRUSTUM_SIZE,
        };
        camera.apply_frustum(viewport.aspect());
        camera
    }

    fn apply_frustum(&mut self, aspect: f64) {
        self.left = self.frustum_size * aspect / -2.0;
        self.right = self.frustum_size * aspect / 2.0;
        self.top = self.frustum_size / 2.0;
        self.bottom = self.frustum_size / -2.0;
    }

    /// Refit the frustum around the loaded geometry, leaving generous margin
    /// so the emblem reads as an object rather than filling the screen.
    ///
    pub fn fit_to_bounds(&mut self, bounds: GeometryBounds, viewport: Viewport) {
        self.frustum_size = bounds.max_dimension() * FIT_MARGIN_FACTOR;
        self.apply_frustum(viewport.aspect());
    }

    /// Recompute the frustum for a new aspect ratio, keeping the stored
    /// frustum size.
    ///
    pub fn resize(&mut self, viewport: Viewport) {
        self.apply_frustum(viewport.aspect());
    }

    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    pub fn height(&self) -> f64 {
        self.top - self.bottom
    }

    /// Inverse-project a normalized device Y coordinate onto the world-space
    /// plane the emblem lives on.
    ///
    pub fn unproject_ndc_y(&self, ndc_y: f64) -> f64 {
        (self.top + self.bottom) / 2.0 + ndc_y * (self.top - self.bottom) / 2.0
    }
}
