//! Cover-fit viewport transform between background space and screen space.
//!
//! Background space is the illustration's natural pixel grid (nominally
//! 1920×1080); screen space is the current canvas. The transform is defined
//! for any positive background size and has no error states.

use glam::Vec2;

/// Current canvas size in physical pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width * 0.5, self.height * 0.5)
    }
}

/// Natural size of the background illustration; immutable once loaded.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BackgroundSize {
    pub width: f32,
    pub height: f32,
}

impl BackgroundSize {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// A zero/undefined size reported before the asset finishes loading.
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

/// "Cover" scale: the background fully fills the viewport, cropping the
/// longer axis. Exact-size input returns 1.0 exactly so the canonical
/// resolution never accumulates float drift.
pub fn cover_scale(viewport: Viewport, bg: BackgroundSize) -> f32 {
    if viewport.width == bg.width && viewport.height == bg.height {
        return 1.0;
    }
    (viewport.width / bg.width).max(viewport.height / bg.height)
}

/// Scale plus the background's on-screen center point.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SceneTransform {
    pub scale: f32,
    pub center: Vec2,
}

impl SceneTransform {
    /// Initial transform: cover scale, background centered in the viewport.
    pub fn initial(viewport: Viewport, bg: BackgroundSize) -> Self {
        Self {
            scale: cover_scale(viewport, bg),
            center: viewport.center(),
        }
    }

    /// Refresh the scale for a new viewport. The center is preserved; callers
    /// re-clamp it against the new displayed size.
    pub fn recompute(&mut self, viewport: Viewport, bg: BackgroundSize) {
        self.scale = cover_scale(viewport, bg);
    }

    /// On-screen size of the scaled background.
    #[inline]
    pub fn displayed_size(&self, bg: BackgroundSize) -> Vec2 {
        Vec2::new(bg.width * self.scale, bg.height * self.scale)
    }

    /// Background pixel coordinates to screen coordinates.
    #[inline]
    pub fn to_screen(&self, bg: BackgroundSize, p: Vec2) -> Vec2 {
        Vec2::new(
            self.center.x + (p.x / bg.width - 0.5) * bg.width * self.scale,
            self.center.y + (p.y / bg.height - 0.5) * bg.height * self.scale,
        )
    }

    /// Exact inverse of [`to_screen`]. The scene itself only maps outward,
    /// but the inverse is kept for completeness.
    #[inline]
    pub fn to_background(&self, bg: BackgroundSize, p: Vec2) -> Vec2 {
        Vec2::new(
            ((p.x - self.center.x) / (bg.width * self.scale) + 0.5) * bg.width,
            ((p.y - self.center.y) / (bg.height * self.scale) + 0.5) * bg.height,
        )
    }
}
