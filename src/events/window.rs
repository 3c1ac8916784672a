//! Window-level events: resize, orientation, fullscreen, visibility.
//!
//! Each geometry event fully recomputes the transform, re-clamps the pan
//! center and repositions every hotspot before the next frame's proximity
//! pass runs.

use crate::dom;
use crate::frame::FrameContext;
use crate::interact::InteractionEvents;
use crate::pan::clamp_center;
use crate::viewport::Viewport;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

fn refit_scene(frame_ctx: &Rc<RefCell<FrameContext>>) {
    let mut ctx = frame_ctx.borrow_mut();
    dom::sync_canvas_backing_size(&ctx.canvas);
    let viewport = Viewport::new(ctx.canvas.width() as f32, ctx.canvas.height() as f32);
    let bg = *ctx.bg.borrow();
    ctx.last_viewport = viewport;
    if bg.is_degenerate() {
        return;
    }
    {
        let mut transform = ctx.transform.borrow_mut();
        transform.recompute(viewport, bg);
        transform.center = clamp_center(transform.center, viewport, transform.displayed_size(bg));
        ctx.registry.borrow_mut().reposition(&transform, bg);
    }
}

fn wire_refit(frame_ctx: Rc<RefCell<FrameContext>>, event: &'static str) {
    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move || {
        refit_scene(&frame_ctx);
    }) as Box<dyn FnMut()>);
    if let Some(window) = web::window() {
        _ = window.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
    }
    closure.forget();
}

pub fn wire_window_events(frame_ctx: Rc<RefCell<FrameContext>>) {
    wire_refit(frame_ctx.clone(), "resize");
    wire_refit(frame_ctx.clone(), "orientationchange");
    wire_refit(frame_ctx.clone(), "fullscreenchange");

    // Hidden tab: silence any hover cue and drop every hotspot to Idle.
    let ctx_vis = frame_ctx.clone();
    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move || {
        let Some(doc) = dom::window_document() else {
            return;
        };
        if !doc.hidden() {
            return;
        }
        let mut ctx = ctx_vis.borrow_mut();
        let mut events = InteractionEvents::new();
        ctx.interact.borrow_mut().reset_all(&mut events);
        ctx.apply_interaction_events(&events);
        ctx.pan.borrow_mut().cancel();
        log::info!("[visibility] hidden, interactions reset");
    }) as Box<dyn FnMut()>);
    if let Some(doc) = dom::window_document() {
        _ = doc.add_event_listener_with_callback("visibilitychange", closure.as_ref().unchecked_ref());
    }
    closure.forget();
}
