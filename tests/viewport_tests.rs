// Host-side tests for the cover-fit transform.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
#[path = "../src/constants.rs"]
mod constants;
#[path = "../src/viewport.rs"]
mod viewport;

use glam::Vec2;
use viewport::*;

#[test]
fn cover_scale_fills_both_axes() {
    let bg = BackgroundSize::new(1920.0, 1080.0);
    for &(w, h) in &[
        (2400.0, 1000.0),
        (800.0, 1200.0),
        (1280.0, 720.0),
        (500.0, 500.0),
        (3840.0, 2160.0),
    ] {
        let vp = Viewport::new(w, h);
        let s = cover_scale(vp, bg);
        assert!(bg.width * s >= vp.width - 1e-3, "{w}x{h} under-fills width");
        assert!(
            bg.height * s >= vp.height - 1e-3,
            "{w}x{h} under-fills height"
        );
    }
}

#[test]
fn exact_size_viewport_is_identity_scale() {
    let bg = BackgroundSize::new(1920.0, 1080.0);
    let vp = Viewport::new(1920.0, 1080.0);
    assert_eq!(cover_scale(vp, bg), 1.0);

    let t = SceneTransform::initial(vp, bg);
    let p = Vec2::new(312.0, 652.0);
    let on_screen = t.to_screen(bg, p);
    assert!((on_screen - p).length() < 1e-3);
}

#[test]
fn wide_viewport_crops_vertically() {
    // Wider than the background's aspect: width pins the scale and the
    // background overflows the viewport vertically.
    let bg = BackgroundSize::new(1920.0, 1080.0);
    let vp = Viewport::new(2400.0, 1000.0);
    let s = cover_scale(vp, bg);
    assert!((s - 2400.0 / 1920.0).abs() < 1e-6);

    let t = SceneTransform::initial(vp, bg);
    let displayed = t.displayed_size(bg);
    assert!((displayed.x - vp.width).abs() < 1e-3);
    assert!(displayed.y > vp.height);
}

#[test]
fn tall_viewport_crops_horizontally() {
    let bg = BackgroundSize::new(1920.0, 1080.0);
    let vp = Viewport::new(800.0, 1200.0);
    let s = cover_scale(vp, bg);
    assert!((s - 1200.0 / 1080.0).abs() < 1e-6);

    let t = SceneTransform::initial(vp, bg);
    let displayed = t.displayed_size(bg);
    assert!((displayed.y - vp.height).abs() < 1e-3);
    assert!(displayed.x > vp.width);
}

#[test]
fn to_background_inverts_to_screen() {
    let bg = BackgroundSize::new(1920.0, 1080.0);
    let t = SceneTransform {
        scale: 1.3,
        center: Vec2::new(610.0, 402.0),
    };
    for &p in &[
        Vec2::new(0.0, 0.0),
        Vec2::new(1920.0, 1080.0),
        Vec2::new(960.0, 540.0),
        Vec2::new(212.0, 486.0),
        Vec2::new(1814.0, 512.0),
    ] {
        let round = t.to_background(bg, t.to_screen(bg, p));
        assert!((round - p).length() < 1e-2, "{p:?} -> {round:?}");
    }
}

#[test]
fn background_center_maps_to_transform_center() {
    let bg = BackgroundSize::new(1920.0, 1080.0);
    let t = SceneTransform {
        scale: 0.9,
        center: Vec2::new(333.0, 777.0),
    };
    let mapped = t.to_screen(bg, Vec2::new(bg.width * 0.5, bg.height * 0.5));
    assert!((mapped - t.center).length() < 1e-3);
}

#[test]
fn recompute_keeps_center() {
    let bg = BackgroundSize::new(1920.0, 1080.0);
    let vp = Viewport::new(1280.0, 720.0);
    let mut t = SceneTransform::initial(vp, bg);
    t.center = Vec2::new(500.0, 360.0);
    t.recompute(Viewport::new(2560.0, 1440.0), bg);
    assert_eq!(t.center, Vec2::new(500.0, 360.0));
    assert!((t.scale - 2560.0 / 1920.0).abs() < 1e-6);
}

#[test]
fn degenerate_background_is_flagged() {
    assert!(BackgroundSize::new(0.0, 0.0).is_degenerate());
    assert!(BackgroundSize::new(1920.0, 0.0).is_degenerate());
    assert!(!BackgroundSize::new(1920.0, 1080.0).is_degenerate());
}
