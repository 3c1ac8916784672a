//! Pointer wiring: pan gestures, tap navigation and pointer tracking.
//!
//! Pointer events cover mouse and touch; multi-touch is tracked through
//! per-pointer down/up counting. A press inside a hotspot's activation area
//! falls through to hit-testing, anywhere else it starts a pan.

use crate::audio::AudioSystem;
use crate::constants::{ACTIVATION_TOLERANCE, DOT_PULSE_EXPANSION};
use crate::dom;
use crate::frame::LoadProgress;
use crate::hotspot::HotspotRegistry;
use crate::interact::InteractionController;
use crate::nav;
use crate::pan::PanController;
use crate::viewport::{BackgroundSize, SceneTransform, Viewport};
use glam::Vec2;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Last known pointer position in canvas pixels, plus touch bookkeeping.
#[derive(Default, Clone, Copy, Debug)]
pub struct PointerState {
    pub pos: Option<Vec2>,
    pub down: bool,
    pub touch_count: u32,
}

#[derive(Clone)]
pub struct InputWiring {
    pub canvas: web::HtmlCanvasElement,
    pub transform: Rc<RefCell<SceneTransform>>,
    pub bg: Rc<RefCell<BackgroundSize>>,
    pub registry: Rc<RefCell<HotspotRegistry>>,
    pub interact: Rc<RefCell<InteractionController>>,
    pub pan: Rc<RefCell<PanController>>,
    pub pointer: Rc<RefCell<PointerState>>,
    pub audio: Rc<RefCell<Option<AudioSystem>>>,
    pub progress: Rc<RefCell<LoadProgress>>,
}

pub fn wire_input_handlers(w: InputWiring) {
    wire_pointerdown(&w);
    wire_pointermove(&w);
    wire_pointerup(&w);
    wire_pointercancel(&w);
    wire_pointerleave(&w);
}

#[inline]
fn activation_slack(scene_scale: f32) -> f32 {
    (DOT_PULSE_EXPANSION + ACTIVATION_TOLERANCE) * scene_scale
}

fn wire_pointerdown(w: &InputWiring) {
    let w = w.clone();
    let canvas_for_listener = w.canvas.clone();

    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        let pos = dom::client_to_canvas_px(&w.canvas, ev.client_x() as f32, ev.client_y() as f32);
        {
            let mut ps = w.pointer.borrow_mut();
            ps.pos = Some(pos);
            ps.down = true;
            if ev.pointer_type() == "touch" {
                ps.touch_count += 1;
            }
        }
        // First gesture unblocks a suspended audio context.
        if let Some(a) = w.audio.borrow().as_ref() {
            a.resume_on_gesture();
        }

        let touch_count = w.pointer.borrow().touch_count;
        if touch_count > 1 {
            // Second finger cancels any drag; the background keeps its last
            // valid center.
            w.pan.borrow_mut().cancel();
            return;
        }

        let transform = *w.transform.borrow();
        let over_hotspot = w
            .registry
            .borrow()
            .any_dot_contains(pos, activation_slack(transform.scale));
        if w.pan
            .borrow_mut()
            .begin(pos, transform.center, over_hotspot, touch_count)
        {
            log::info!("[pan] begin at ({:.0},{:.0})", pos.x, pos.y);
        }
        _ = w.canvas.set_pointer_capture(ev.pointer_id());
        ev.prevent_default();
    }) as Box<dyn FnMut(_)>);
    _ = canvas_for_listener
        .add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref());
    closure.forget();
}

fn wire_pointermove(w: &InputWiring) {
    let w = w.clone();

    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        let pos = dom::client_to_canvas_px(&w.canvas, ev.client_x() as f32, ev.client_y() as f32);
        w.pointer.borrow_mut().pos = Some(pos);

        if !w.pan.borrow().is_active() {
            return;
        }
        let bg = *w.bg.borrow();
        if bg.is_degenerate() {
            return;
        }
        let viewport = Viewport::new(w.canvas.width() as f32, w.canvas.height() as f32);
        let new_center = {
            let transform = w.transform.borrow();
            w.pan.borrow().drag_to(pos, viewport, bg, &transform)
        };
        if let Some(center) = new_center {
            let mut transform = w.transform.borrow_mut();
            transform.center = center;
            // Hotspots stay pinned to the background through every move.
            w.registry.borrow_mut().reposition(&transform, bg);
        }
    }) as Box<dyn FnMut(_)>);

    if let Some(wnd) = web::window() {
        _ = wnd.add_event_listener_with_callback("pointermove", closure.as_ref().unchecked_ref());
    }
    closure.forget();
}

fn wire_pointerup(w: &InputWiring) {
    let w = w.clone();

    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        let pos = dom::client_to_canvas_px(&w.canvas, ev.client_x() as f32, ev.client_y() as f32);
        {
            let mut ps = w.pointer.borrow_mut();
            ps.down = false;
            if ev.pointer_type() == "touch" {
                ps.touch_count = ps.touch_count.saturating_sub(1);
            }
        }

        let was_dragging = w.pan.borrow().is_active();
        if was_dragging {
            w.pan.borrow_mut().end();
        } else {
            // Navigation fires at most once per tap, from this handler only.
            let transform_scale = w.transform.borrow().scale;
            let target = {
                let registry = w.registry.borrow();
                let placements: Vec<_> =
                    registry.hotspots().iter().map(|h| h.placement).collect();
                w.interact
                    .borrow()
                    .tap_target(pos, &placements, transform_scale)
            };
            if let Some(i) = target {
                let (dest, new_tab) = {
                    let registry = w.registry.borrow();
                    match registry.get(i) {
                        Some(h) => (h.config.destination, h.config.open_in_new_tab),
                        None => return,
                    }
                };
                let complete = w.progress.borrow().complete();
                nav::open_destination(dest, new_tab, complete);
            }
        }
        ev.prevent_default();
    }) as Box<dyn FnMut(_)>);

    if let Some(wnd) = web::window() {
        _ = wnd.add_event_listener_with_callback("pointerup", closure.as_ref().unchecked_ref());
    }
    closure.forget();
}

fn wire_pointercancel(w: &InputWiring) {
    let w = w.clone();

    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |_ev: web::PointerEvent| {
        w.pan.borrow_mut().cancel();
        let mut ps = w.pointer.borrow_mut();
        ps.down = false;
        ps.touch_count = 0;
    }) as Box<dyn FnMut(_)>);

    if let Some(wnd) = web::window() {
        _ = wnd.add_event_listener_with_callback("pointercancel", closure.as_ref().unchecked_ref());
    }
    closure.forget();
}

fn wire_pointerleave(w: &InputWiring) {
    let w = w.clone();
    let canvas_for_listener = w.canvas.clone();

    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |_ev: web::PointerEvent| {
        // Off-canvas pointer clears proximity on the next frame.
        w.pointer.borrow_mut().pos = None;
    }) as Box<dyn FnMut(_)>);
    _ = canvas_for_listener
        .add_event_listener_with_callback("pointerleave", closure.as_ref().unchecked_ref());
    closure.forget();
}
