// Host-side tests for the pan controller and center clamping.

#![allow(dead_code)]
#[path = "../src/constants.rs"]
mod constants;
#[path = "../src/viewport.rs"]
mod viewport;
#[path = "../src/pan.rs"]
mod pan;

use glam::Vec2;
use pan::*;
use viewport::{BackgroundSize, SceneTransform, Viewport};

fn scene() -> (Viewport, BackgroundSize, SceneTransform) {
    let vp = Viewport::new(1280.0, 720.0);
    let bg = BackgroundSize::new(1920.0, 1080.0);
    let mut t = SceneTransform::initial(vp, bg);
    // Scale up so both axes overflow and there is room to pan.
    t.scale *= 1.5;
    (vp, bg, t)
}

#[test]
fn clamp_is_idempotent() {
    let (vp, bg, t) = scene();
    let displayed = t.displayed_size(bg);
    for &c in &[
        Vec2::new(-5000.0, -5000.0),
        Vec2::new(5000.0, 5000.0),
        Vec2::new(640.0, 360.0),
        Vec2::new(100.0, 9000.0),
    ] {
        let once = clamp_center(c, vp, displayed);
        let twice = clamp_center(once, vp, displayed);
        assert_eq!(once, twice, "clamp moved an already-clamped center {c:?}");
    }
}

#[test]
fn clamped_center_keeps_viewport_covered() {
    let (vp, bg, t) = scene();
    let displayed = t.displayed_size(bg);
    let c = clamp_center(Vec2::new(1e6, -1e6), vp, displayed);
    // Background edges must sit at or outside the viewport edges.
    assert!(c.x - displayed.x * 0.5 <= 0.0 + 1e-3);
    assert!(c.x + displayed.x * 0.5 >= vp.width - 1e-3);
    assert!(c.y - displayed.y * 0.5 <= 0.0 + 1e-3);
    assert!(c.y + displayed.y * 0.5 >= vp.height - 1e-3);
}

#[test]
fn non_overflowing_axis_stays_centered() {
    // Displayed size exactly matches the viewport width: no horizontal play.
    let vp = Viewport::new(1920.0, 1080.0);
    let displayed = Vec2::new(1920.0, 1400.0);
    let c = clamp_center(Vec2::new(123.0, 900.0), vp, displayed);
    assert_eq!(c.x, vp.center().x);
    assert!(c.y > vp.center().y);
}

#[test]
fn drag_moves_center_with_pointer_delta() {
    let (vp, bg, t) = scene();
    let mut pc = PanController::new();
    assert!(pc.begin(Vec2::new(600.0, 300.0), t.center, false, 0));

    let new_center = pc
        .drag_to(Vec2::new(640.0, 330.0), vp, bg, &t)
        .expect("active session");
    assert!((new_center - (t.center + Vec2::new(40.0, 30.0))).length() < 1e-3);
}

#[test]
fn overscroll_drag_is_clamped() {
    let (vp, bg, t) = scene();
    let displayed = t.displayed_size(bg);
    let mut pc = PanController::new();
    assert!(pc.begin(Vec2::new(600.0, 300.0), t.center, false, 0));

    // Drag far right: the background's left edge must stop at the viewport's
    // left edge instead of exposing a gap.
    let c = pc
        .drag_to(Vec2::new(600.0 + 1e5, 300.0), vp, bg, &t)
        .expect("active session");
    assert!((c.x - displayed.x * 0.5).abs() <= 1e-2);
    assert_eq!(c, clamp_center(c, vp, displayed));
}

#[test]
fn drag_with_no_overflow_leaves_center_pinned() {
    // Background displayed at exactly the viewport size: nothing to pan.
    let vp = Viewport::new(1920.0, 1080.0);
    let bg = BackgroundSize::new(1920.0, 1080.0);
    let t = SceneTransform::initial(vp, bg);
    let mut pc = PanController::new();
    assert!(pc.begin(Vec2::new(400.0, 400.0), t.center, false, 0));

    let c = pc
        .drag_to(Vec2::new(450.0, 450.0), vp, bg, &t)
        .expect("active session");
    assert_eq!(c, vp.center());
}

#[test]
fn begin_refused_over_hotspot_or_multitouch() {
    let (_, _, t) = scene();
    let mut pc = PanController::new();
    assert!(!pc.begin(Vec2::ZERO, t.center, true, 0));
    assert!(!pc.is_active());
    assert!(!pc.begin(Vec2::ZERO, t.center, false, 2));
    assert!(!pc.is_active());
    assert!(pc.begin(Vec2::ZERO, t.center, false, 1));
    assert!(pc.is_active());
}

#[test]
fn cancel_and_end_stop_dragging() {
    let (vp, bg, t) = scene();
    let mut pc = PanController::new();

    assert!(pc.begin(Vec2::ZERO, t.center, false, 0));
    pc.cancel();
    assert!(!pc.is_active());
    assert!(pc.drag_to(Vec2::new(10.0, 10.0), vp, bg, &t).is_none());

    assert!(pc.begin(Vec2::ZERO, t.center, false, 0));
    pc.end();
    assert!(!pc.is_active());
}

#[test]
fn drag_without_session_is_none() {
    let (vp, bg, t) = scene();
    let pc = PanController::new();
    assert!(pc.drag_to(Vec2::new(5.0, 5.0), vp, bg, &t).is_none());
}
