// Host-side tests for the hover state machine.

#![allow(dead_code)]
#[path = "../src/constants.rs"]
mod constants;
#[path = "../src/viewport.rs"]
mod viewport;
#[path = "../src/hotspot.rs"]
mod hotspot;
#[path = "../src/interact.rs"]
mod interact;

use glam::Vec2;
use hotspot::Placement;
use interact::*;

fn placement_at(center: Vec2, scene_scale: f32) -> Placement {
    Placement {
        center,
        scale: scene_scale,
        dot_center: center,
        dot_radius: constants::DOT_BASE_RADIUS * scene_scale,
        stroke_radius: 80.0 * scene_scale,
        mobile_label_pos: center + Vec2::new(0.0, 40.0),
    }
}

#[test]
fn hover_enter_and_exit_round_trip() {
    let scale = 1.25;
    let placements = vec![placement_at(Vec2::new(400.0, 300.0), scale)];
    let mut ic = InteractionController::new(DeviceProfile::Desktop, 1);
    let mut events = InteractionEvents::new();

    // Far away: stays Idle, dot visible.
    ic.evaluate(Some(Vec2::new(50.0, 50.0)), &placements, scale, &mut events);
    assert!(events.is_empty());
    assert!(ic.dot_visible(0));
    assert!(!ic.affordance_visible(0));

    // Inside the activation radius: Activated fires once, dot and affordance
    // swap visibility.
    ic.evaluate(Some(Vec2::new(402.0, 301.0)), &placements, scale, &mut events);
    assert_eq!(events.as_slice(), &[InteractionEvent::Activated(0)]);
    assert!(!ic.dot_visible(0));
    assert!(ic.affordance_visible(0));
    assert!(ic.state(0).unwrap().label.is_some());

    // Holding inside: no further transition events.
    events.clear();
    ic.evaluate(Some(Vec2::new(401.0, 299.0)), &placements, scale, &mut events);
    assert!(events.is_empty());
    assert_eq!(ic.phase(0), HotspotPhase::Active);

    // Leaving: immediate cutover, label dropped.
    events.clear();
    ic.evaluate(Some(Vec2::new(900.0, 900.0)), &placements, scale, &mut events);
    assert_eq!(events.as_slice(), &[InteractionEvent::Deactivated(0)]);
    assert!(ic.dot_visible(0));
    assert!(ic.state(0).unwrap().label.is_none());
}

#[test]
fn activation_boundary_matches_radius_formula() {
    let scale = 2.0;
    let center = Vec2::new(500.0, 500.0);
    let placements = vec![placement_at(center, scale)];
    let r = activation_radius(&placements[0], scale);
    let mut ic = InteractionController::new(DeviceProfile::Desktop, 1);
    let mut events = InteractionEvents::new();

    ic.evaluate(
        Some(center + Vec2::new(r - 0.5, 0.0)),
        &placements,
        scale,
        &mut events,
    );
    assert_eq!(ic.phase(0), HotspotPhase::Active);

    let mut ic = InteractionController::new(DeviceProfile::Desktop, 1);
    events.clear();
    ic.evaluate(
        Some(center + Vec2::new(r + 0.5, 0.0)),
        &placements,
        scale,
        &mut events,
    );
    assert_eq!(ic.phase(0), HotspotPhase::Idle);
}

#[test]
fn no_pointer_means_everything_idle() {
    let scale = 1.0;
    let placements = vec![placement_at(Vec2::new(100.0, 100.0), scale)];
    let mut ic = InteractionController::new(DeviceProfile::Desktop, 1);
    let mut events = InteractionEvents::new();

    ic.evaluate(Some(Vec2::new(100.0, 100.0)), &placements, scale, &mut events);
    assert_eq!(ic.phase(0), HotspotPhase::Active);

    // Pointer left the canvas (or a drag started).
    events.clear();
    ic.evaluate(None, &placements, scale, &mut events);
    assert_eq!(events.as_slice(), &[InteractionEvent::Deactivated(0)]);
}

#[test]
fn touch_profile_never_hovers_but_taps_hit() {
    let scale = 1.0;
    let center = Vec2::new(250.0, 250.0);
    let placements = vec![placement_at(center, scale)];
    let mut ic = InteractionController::new(DeviceProfile::Touch, 1);
    let mut events = InteractionEvents::new();

    ic.evaluate(Some(center), &placements, scale, &mut events);
    assert!(events.is_empty());
    assert_eq!(ic.phase(0), HotspotPhase::Idle);
    assert!(!ic.affordance_visible(0));

    assert_eq!(ic.tap_target(center, &placements, scale), Some(0));
    assert_eq!(
        ic.tap_target(Vec2::new(900.0, 900.0), &placements, scale),
        None
    );
}

#[test]
fn label_eases_to_target_and_settles() {
    let mut label = LabelSlide::start();
    let start_dist = label.current.distance(label.target);
    assert!(start_dist > 0.0);

    let mut prev = start_dist;
    for _ in 0..2000 {
        label.step();
        let d = label.current.distance(label.target);
        assert!(d <= prev + 1e-4, "label moved away from its target");
        prev = d;
        if label.settled {
            break;
        }
    }
    assert!(label.settled);
    assert_eq!(label.current, label.target);

    // Settled labels stay put.
    label.step();
    assert_eq!(label.current, label.target);
}

#[test]
fn affordance_tracks_pointer_with_offset() {
    let scale = 1.0;
    let center = Vec2::new(300.0, 300.0);
    let placements = vec![placement_at(center, scale)];
    let mut ic = InteractionController::new(DeviceProfile::Desktop, 1);
    let mut events = InteractionEvents::new();

    let p = center + Vec2::new(3.0, -2.0);
    ic.evaluate(Some(p), &placements, scale, &mut events);
    let expected = p + Vec2::from(constants::AFFORDANCE_POINTER_OFFSET);
    assert!((ic.state(0).unwrap().affordance_pos - expected).length() < 1e-3);
}

#[test]
fn reset_all_reports_each_active_hotspot() {
    let scale = 1.0;
    let placements = vec![
        placement_at(Vec2::new(100.0, 100.0), scale),
        placement_at(Vec2::new(101.0, 101.0), scale),
        placement_at(Vec2::new(700.0, 700.0), scale),
    ];
    let mut ic = InteractionController::new(DeviceProfile::Desktop, 3);
    let mut events = InteractionEvents::new();

    // Overlapping hotspots can both be active; first tap hit still wins by
    // index order.
    ic.evaluate(Some(Vec2::new(100.0, 100.0)), &placements, scale, &mut events);
    assert_eq!(ic.phase(0), HotspotPhase::Active);
    assert_eq!(ic.phase(1), HotspotPhase::Active);
    assert_eq!(
        ic.tap_target(Vec2::new(100.0, 100.0), &placements, scale),
        Some(0)
    );

    events.clear();
    ic.reset_all(&mut events);
    assert_eq!(
        events.as_slice(),
        &[
            InteractionEvent::Deactivated(0),
            InteractionEvent::Deactivated(1)
        ]
    );
    assert_eq!(ic.phase(2), HotspotPhase::Idle);
}
