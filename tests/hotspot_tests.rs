// Host-side tests for hotspot placement and the scene table.

#![allow(dead_code)]
#[path = "../src/constants.rs"]
mod constants;
#[path = "../src/viewport.rs"]
mod viewport;
#[path = "../src/hotspot.rs"]
mod hotspot;
#[path = "../src/config.rs"]
mod config;

use glam::Vec2;
use hotspot::*;
use viewport::{BackgroundSize, SceneTransform, Viewport};

fn test_config(id: &'static str, anchor: Vec2, offset: Vec2) -> HotspotConfig {
    HotspotConfig {
        id,
        anchor,
        native_size: Vec2::new(200.0, 160.0),
        box_size: Vec2::new(100.0, 80.0),
        relative_scale: None,
        offset,
        destination: "https://example.com",
        open_in_new_tab: true,
        mobile_label: true,
        label_text: "TEST",
    }
}

fn scene() -> (SceneTransform, BackgroundSize) {
    let bg = BackgroundSize::new(1920.0, 1080.0);
    let t = SceneTransform::initial(Viewport::new(2400.0, 1000.0), bg);
    (t, bg)
}

#[test]
fn reposition_is_pure_in_its_inputs() {
    let (t, bg) = scene();
    let mut a = HotspotRegistry::new();
    let mut b = HotspotRegistry::new();
    for r in [&mut a, &mut b] {
        r.register(test_config("one", Vec2::new(212.0, 486.0), Vec2::ZERO));
        r.register(test_config("two", Vec2::new(1695.0, 238.0), Vec2::new(12.0, -4.0)));
    }
    a.reposition(&t, bg);
    a.reposition(&t, bg);
    b.reposition(&t, bg);
    for i in 0..a.len() {
        assert_eq!(a.get(i).unwrap().placement, b.get(i).unwrap().placement);
    }
}

#[test]
fn anchor_pins_to_transform() {
    let (t, bg) = scene();
    let anchor = Vec2::new(742.0, 196.0);
    let mut reg = HotspotRegistry::new();
    reg.register(test_config("pin", anchor, Vec2::ZERO));
    reg.reposition(&t, bg);
    let placed = reg.get(0).unwrap().placement.center;
    assert!((placed - t.to_screen(bg, anchor)).length() < 1e-3);
}

#[test]
fn offset_scales_with_the_scene() {
    let (mut t, bg) = scene();
    let anchor = Vec2::new(1000.0, 500.0);
    let offset = Vec2::new(12.0, -24.0);
    let mut reg = HotspotRegistry::new();
    reg.register(test_config("off", anchor, offset));

    reg.reposition(&t, bg);
    let at_base = reg.get(0).unwrap().placement.center;
    assert!((at_base - (t.to_screen(bg, anchor) + offset * t.scale)).length() < 1e-3);

    t.scale *= 2.0;
    reg.reposition(&t, bg);
    let at_double = reg.get(0).unwrap().placement.center;
    assert!((at_double - (t.to_screen(bg, anchor) + offset * t.scale)).length() < 1e-3);
}

#[test]
fn panning_translates_placements_rigidly() {
    let (mut t, bg) = scene();
    let mut reg = HotspotRegistry::new();
    reg.register(test_config("a", Vec2::new(212.0, 486.0), Vec2::ZERO));
    reg.register(test_config("b", Vec2::new(1436.0, 602.0), Vec2::new(5.0, 5.0)));

    reg.reposition(&t, bg);
    let before: Vec<Vec2> = reg.hotspots().iter().map(|h| h.placement.center).collect();

    let delta = Vec2::new(-80.0, 33.0);
    t.center += delta;
    reg.reposition(&t, bg);
    for (i, h) in reg.hotspots().iter().enumerate() {
        assert!((h.placement.center - (before[i] + delta)).length() < 1e-3);
    }
}

#[test]
fn sprite_fit_prefers_explicit_scale() {
    let mut c = test_config("s", Vec2::ZERO, Vec2::ZERO);
    assert!((sprite_fit_scale(&c) - 0.5).abs() < 1e-6); // cover fit of 100/200, 80/160

    c.relative_scale = Some(0.7);
    assert!((sprite_fit_scale(&c) - 0.7).abs() < 1e-6);
}

#[test]
fn cover_fit_uses_the_larger_axis_ratio() {
    let mut c = test_config("s", Vec2::ZERO, Vec2::ZERO);
    c.native_size = Vec2::new(400.0, 100.0);
    c.box_size = Vec2::new(100.0, 80.0);
    // width ratio 0.25, height ratio 0.8; cover takes 0.8
    assert!((sprite_fit_scale(&c) - 0.8).abs() < 1e-6);
}

#[test]
fn degenerate_background_skips_reposition() {
    let (t, bg) = scene();
    let mut reg = HotspotRegistry::new();
    reg.register(test_config("x", Vec2::new(100.0, 100.0), Vec2::ZERO));
    reg.reposition(&t, bg);
    let placed = reg.get(0).unwrap().placement;

    reg.reposition(&t, BackgroundSize::new(0.0, 0.0));
    assert_eq!(reg.get(0).unwrap().placement, placed);
}

#[test]
fn dot_hit_test_respects_slack() {
    let (t, bg) = scene();
    let anchor = Vec2::new(960.0, 540.0);
    let mut reg = HotspotRegistry::new();
    reg.register(test_config("hit", anchor, Vec2::ZERO));
    reg.reposition(&t, bg);

    let p = reg.get(0).unwrap().placement;
    assert!(reg.any_dot_contains(p.dot_center, 0.0));
    let just_outside = p.dot_center + Vec2::new(p.dot_radius + 1.0, 0.0);
    assert!(!reg.any_dot_contains(just_outside, 0.0));
    assert!(reg.any_dot_contains(just_outside, 2.0));
}

#[test]
fn index_lookup_by_id() {
    let mut reg = HotspotRegistry::new();
    reg.register(test_config("first", Vec2::ZERO, Vec2::ZERO));
    reg.register(test_config("second", Vec2::ZERO, Vec2::ZERO));
    assert_eq!(reg.index_of("second"), Some(1));
    assert_eq!(reg.index_of("missing"), None);
}

#[test]
fn scene_table_is_well_formed() {
    let hotspots = config::scene_hotspots();
    assert!(!hotspots.is_empty());

    let mut reg = HotspotRegistry::new();
    for c in &hotspots {
        assert!(c.anchor.x >= 0.0 && c.anchor.x <= constants::BACKGROUND_WIDTH);
        assert!(c.anchor.y >= 0.0 && c.anchor.y <= constants::BACKGROUND_HEIGHT);
        assert!(c.native_size.x > 0.0 && c.native_size.y > 0.0);
        assert!(!c.destination.is_empty());
        reg.register(*c);
    }
    // Ids must be unique or the index map silently drops entries.
    for (i, c) in hotspots.iter().enumerate() {
        assert_eq!(reg.index_of(c.id), Some(i), "duplicate id {}", c.id);
    }
    // At least one same-tab destination exercises the deferred redirect path.
    assert!(hotspots.iter().any(|c| !c.open_in_new_tab));
}
