//! Per-hotspot interaction state machine.
//!
//! Proximity is evaluated every animation frame against the latest
//! placements, not only on pointer-move, so sprite motion under a stationary
//! pointer (panning, resize) can enter or leave the hover state too.

use crate::constants::{
    ACTIVATION_TOLERANCE, AFFORDANCE_POINTER_OFFSET, DOT_PULSE_EXPANSION, LABEL_EASE,
    LABEL_EJECT_DISTANCE, LABEL_SETTLE_EPSILON, LABEL_TARGET_X, LABEL_TARGET_Y,
};
use crate::hotspot::Placement;
use glam::Vec2;
use smallvec::SmallVec;

/// Desktop gets the full hover protocol; touch/small screens suppress the
/// affordance and slide-in label, show a static label under each dot and
/// navigate on a single tap.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeviceProfile {
    Desktop,
    Touch,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HotspotPhase {
    Idle,
    Active,
}

/// Slide-in label animation in background space. Every hotspot shares one
/// target point; the label starts ejected vertically below it and eases in
/// exponentially each frame.
#[derive(Clone, Copy, Debug)]
pub struct LabelSlide {
    pub current: Vec2,
    pub target: Vec2,
    pub settled: bool,
}

impl LabelSlide {
    pub fn start() -> Self {
        let target = Vec2::new(LABEL_TARGET_X, LABEL_TARGET_Y);
        Self {
            current: target + Vec2::new(0.0, LABEL_EJECT_DISTANCE),
            target,
            settled: false,
        }
    }

    /// One easing step: `current += (target - current) * k`. Marks itself
    /// settled once within epsilon so callers can drop the per-frame work.
    pub fn step(&mut self) {
        if self.settled {
            return;
        }
        self.current += (self.target - self.current) * LABEL_EASE;
        if self.current.distance(self.target) <= LABEL_SETTLE_EPSILON {
            self.current = self.target;
            self.settled = true;
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct InteractionState {
    pub phase: HotspotPhase,
    pub label: Option<LabelSlide>,
    /// Affordance center: pointer position plus a fixed offset so the cursor
    /// never covers it. Only meaningful while Active on desktop.
    pub affordance_pos: Vec2,
}

impl Default for InteractionState {
    fn default() -> Self {
        Self {
            phase: HotspotPhase::Idle,
            label: None,
            affordance_pos: Vec2::ZERO,
        }
    }
}

/// Phase transitions reported to the caller so side effects (audio cues,
/// sprite speed-up) stay outside the state machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InteractionEvent {
    Activated(usize),
    Deactivated(usize),
}

pub type InteractionEvents = SmallVec<[InteractionEvent; 4]>;

/// Effective hit radius: pulsing dot at full expansion plus tolerance, all in
/// screen pixels at the current scene scale.
#[inline]
pub fn activation_radius(placement: &Placement, scene_scale: f32) -> f32 {
    placement.dot_radius + (DOT_PULSE_EXPANSION + ACTIVATION_TOLERANCE) * scene_scale
}

pub struct InteractionController {
    profile: DeviceProfile,
    states: Vec<InteractionState>,
}

impl InteractionController {
    pub fn new(profile: DeviceProfile, hotspot_count: usize) -> Self {
        Self {
            profile,
            states: vec![InteractionState::default(); hotspot_count],
        }
    }

    #[inline]
    pub fn profile(&self) -> DeviceProfile {
        self.profile
    }

    #[inline]
    pub fn state(&self, index: usize) -> Option<&InteractionState> {
        self.states.get(index)
    }

    #[inline]
    pub fn phase(&self, index: usize) -> HotspotPhase {
        self.states
            .get(index)
            .map(|s| s.phase)
            .unwrap_or(HotspotPhase::Idle)
    }

    /// The pulsing dot shows exactly when the affordance does not.
    #[inline]
    pub fn dot_visible(&self, index: usize) -> bool {
        self.phase(index) == HotspotPhase::Idle
    }

    #[inline]
    pub fn affordance_visible(&self, index: usize) -> bool {
        self.profile == DeviceProfile::Desktop && self.phase(index) == HotspotPhase::Active
    }

    /// One frame of proximity evaluation and label easing. `pointer` is
    /// `None` when no pointer is over the canvas (everything falls Idle).
    /// Dragging callers pass `None` as well: panning and hover are mutually
    /// exclusive.
    pub fn evaluate(
        &mut self,
        pointer: Option<Vec2>,
        placements: &[Placement],
        scene_scale: f32,
        out: &mut InteractionEvents,
    ) {
        let n = self.states.len().min(placements.len());
        for i in 0..n {
            let inside = match (self.profile, pointer) {
                // Touch has no hover phase at all.
                (DeviceProfile::Touch, _) | (_, None) => false,
                (DeviceProfile::Desktop, Some(p)) => {
                    let r = activation_radius(&placements[i], scene_scale);
                    p.distance_squared(placements[i].dot_center) <= r * r
                }
            };
            let state = &mut self.states[i];
            match (state.phase, inside) {
                (HotspotPhase::Idle, true) => {
                    state.phase = HotspotPhase::Active;
                    state.label = Some(LabelSlide::start());
                    if let Some(p) = pointer {
                        state.affordance_pos = p + Vec2::from(AFFORDANCE_POINTER_OFFSET);
                    }
                    out.push(InteractionEvent::Activated(i));
                }
                (HotspotPhase::Active, true) => {
                    if let Some(p) = pointer {
                        state.affordance_pos = p + Vec2::from(AFFORDANCE_POINTER_OFFSET);
                    }
                    if let Some(label) = &mut state.label {
                        label.step();
                    }
                }
                (HotspotPhase::Active, false) => {
                    // Immediate cutover, no fade: avoids flicker at the
                    // activation boundary.
                    state.phase = HotspotPhase::Idle;
                    state.label = None;
                    out.push(InteractionEvent::Deactivated(i));
                }
                (HotspotPhase::Idle, false) => {}
            }
        }
    }

    /// Hit-test a tap/click against every activation area; first hit wins.
    /// The caller navigates at most once per pointerup.
    pub fn tap_target(
        &self,
        pointer: Vec2,
        placements: &[Placement],
        scene_scale: f32,
    ) -> Option<usize> {
        placements.iter().position(|pl| {
            let r = activation_radius(pl, scene_scale);
            pointer.distance_squared(pl.dot_center) <= r * r
        })
    }

    /// Drop every hotspot back to Idle (visibility loss, drag start).
    pub fn reset_all(&mut self, out: &mut InteractionEvents) {
        for (i, state) in self.states.iter_mut().enumerate() {
            if state.phase == HotspotPhase::Active {
                state.phase = HotspotPhase::Idle;
                state.label = None;
                out.push(InteractionEvent::Deactivated(i));
            }
        }
    }
}
