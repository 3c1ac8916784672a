//! Drag-to-pan controller for the oversized background.
//!
//! A pan session starts on pointerdown outside every hotspot's activation
//! radius, moves the background center with the pointer, and clamps the
//! center so the background never under-fills the viewport.

use crate::viewport::{BackgroundSize, SceneTransform, Viewport};
use glam::Vec2;

#[derive(Clone, Copy, Debug)]
pub struct PanSession {
    pub start_pointer: Vec2,
    pub start_center: Vec2,
}

#[derive(Default, Debug)]
pub struct PanController {
    session: Option<PanSession>,
}

/// Clamp a candidate background center per axis. Overflowing axes keep the
/// background edges outside the viewport; non-overflowing axes stay centered.
pub fn clamp_center(candidate: Vec2, viewport: Viewport, displayed: Vec2) -> Vec2 {
    let mid = viewport.center();
    let half_over_x = (displayed.x - viewport.width).max(0.0) * 0.5;
    let half_over_y = (displayed.y - viewport.height).max(0.0) * 0.5;
    Vec2::new(
        candidate.x.clamp(mid.x - half_over_x, mid.x + half_over_x),
        candidate.y.clamp(mid.y - half_over_y, mid.y + half_over_y),
    )
}

impl PanController {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    /// Attempt to start a drag. Refused when the pointer sits inside a
    /// hotspot's activation radius (the press falls through to hit-testing)
    /// or when more than one touch is down.
    pub fn begin(
        &mut self,
        pointer: Vec2,
        center: Vec2,
        over_hotspot: bool,
        touch_count: u32,
    ) -> bool {
        if over_hotspot || touch_count > 1 {
            return false;
        }
        self.session = Some(PanSession {
            start_pointer: pointer,
            start_center: center,
        });
        true
    }

    /// Move the background with the pointer; returns the new clamped center,
    /// or `None` when no session is active.
    pub fn drag_to(
        &self,
        pointer: Vec2,
        viewport: Viewport,
        bg: BackgroundSize,
        transform: &SceneTransform,
    ) -> Option<Vec2> {
        let s = self.session?;
        let candidate = s.start_center + (pointer - s.start_pointer);
        Some(clamp_center(
            candidate,
            viewport,
            transform.displayed_size(bg),
        ))
    }

    pub fn end(&mut self) {
        self.session = None;
    }

    /// A second touch mid-drag cancels the session with no retry; the
    /// background stays at its last valid center.
    pub fn cancel(&mut self) {
        self.session = None;
    }
}
