//! Per-frame tick: one `requestAnimationFrame` loop drives the loading
//! reveal, proximity evaluation, label easing, sprite animation and
//! rendering. Single-threaded and cooperative; no work happens outside this
//! tick and the event listeners.

use crate::audio::AudioSystem;
use crate::constants::{
    DOT_PULSE_EXPANSION, DOT_PULSE_HZ, REVEAL_RADIUS, SPRITE_BOB_AMPLITUDE, SPRITE_BOB_HZ,
};
use crate::events::pointer::PointerState;
use crate::hotspot::HotspotRegistry;
use crate::interact::{DeviceProfile, InteractionController, InteractionEvent, InteractionEvents};
use crate::overlay;
use crate::pan::{clamp_center, PanController};
use crate::render::{self, CircleDraw, SceneTexture, SpriteDraw};
use crate::reveal::RevealTracker;
use crate::viewport::{BackgroundSize, SceneTransform, Viewport};
use glam::Vec2;
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

const DOT_COLOR: [f32; 4] = [1.0, 1.0, 1.0, 0.9];
const AFFORDANCE_COLOR: [f32; 4] = [1.0, 0.85, 0.4, 0.95];
const STROKE_COLOR: [f32; 4] = [1.0, 0.95, 0.7, 0.8];

/// Asset-loading progress shared with the pointer handlers (same-tab
/// redirects are gated on completion).
#[derive(Default, Debug)]
pub struct LoadProgress {
    pub loaded: usize,
    pub total: usize,
}

impl LoadProgress {
    pub fn complete(&self) -> bool {
        self.total > 0 && self.loaded >= self.total
    }
}

/// Uploaded textures, filled in as assets arrive; `None` slots stay absent.
#[derive(Default)]
pub struct SceneTextures {
    pub background: Option<SceneTexture>,
    pub sprites: Vec<Option<SceneTexture>>,
    pub labels: Vec<Option<SceneTexture>>,
}

/// Idle bob animation per sprite; hovering accelerates it.
#[derive(Clone, Copy, Debug)]
pub struct SpriteAnim {
    pub phase: f32,
    pub speed: f32,
}

impl Default for SpriteAnim {
    fn default() -> Self {
        Self {
            phase: 0.0,
            speed: 1.0,
        }
    }
}

pub struct FrameContext {
    pub canvas: web::HtmlCanvasElement,
    pub document: web::Document,

    pub transform: Rc<RefCell<SceneTransform>>,
    pub bg: Rc<RefCell<BackgroundSize>>,
    pub registry: Rc<RefCell<HotspotRegistry>>,
    pub interact: Rc<RefCell<InteractionController>>,
    pub pan: Rc<RefCell<PanController>>,
    pub pointer: Rc<RefCell<PointerState>>,
    pub audio: Rc<RefCell<Option<AudioSystem>>>,
    pub progress: Rc<RefCell<LoadProgress>>,

    pub gpu: Option<render::GpuState<'static>>,
    pub textures: Rc<RefCell<SceneTextures>>,
    pub anims: Vec<SpriteAnim>,

    pub reveal: Option<RevealTracker>,

    pub started_at: Instant,
    pub last_instant: Instant,
    pub last_viewport: Viewport,
}

impl FrameContext {
    pub fn frame(&mut self) {
        let now = Instant::now();
        let dt_sec = (now - self.last_instant).as_secs_f32();
        self.last_instant = now;
        let now_sec = (now - self.started_at).as_secs_f64();
        let time = now_sec as f32;

        self.tick_reveal(now_sec);

        let viewport = Viewport::new(self.canvas.width() as f32, self.canvas.height() as f32);
        let bg = *self.bg.borrow();

        // A resize listener normally handles this, but catching it here too
        // keeps hit-testing correct when the backing size changes between
        // events (at worst one frame of stale positions, self-correcting).
        if viewport != self.last_viewport && !bg.is_degenerate() {
            self.last_viewport = viewport;
            let mut transform = self.transform.borrow_mut();
            transform.recompute(viewport, bg);
            transform.center =
                clamp_center(transform.center, viewport, transform.displayed_size(bg));
            self.registry
                .borrow_mut()
                .reposition(&transform, bg);
        }

        if !bg.is_degenerate() {
            self.evaluate_interactions(dt_sec);
        }

        self.render_scene(dt_sec, time, viewport, bg);
    }

    fn tick_reveal(&mut self, now_sec: f64) {
        let Some(rev) = &mut self.reveal else {
            return;
        };
        rev.tick(now_sec);
        let focus = rev.focus();
        overlay::set_reveal_focus(&self.document, focus.x, focus.y, REVEAL_RADIUS);
        if rev.ready(now_sec) {
            log::info!(
                "[reveal] dismissing overlay at coverage {:.2}",
                rev.coverage()
            );
            overlay::hide_loading(&self.document);
            self.reveal = None;
        }
    }

    fn evaluate_interactions(&mut self, dt_sec: f32) {
        let transform_scale = self.transform.borrow().scale;
        // Panning and hover are mutually exclusive; a drag in progress
        // evaluates as "no pointer" so every hotspot falls Idle.
        let pointer = if self.pan.borrow().is_active() {
            None
        } else {
            self.pointer.borrow().pos
        };

        let mut events: InteractionEvents = InteractionEvents::new();
        {
            let registry = self.registry.borrow();
            let placements: Vec<_> = registry.hotspots().iter().map(|h| h.placement).collect();
            self.interact
                .borrow_mut()
                .evaluate(pointer, &placements, transform_scale, &mut events);
        }
        self.apply_interaction_events(&events);

        for anim in &mut self.anims {
            anim.phase += dt_sec * anim.speed;
        }
    }

    pub fn apply_interaction_events(&mut self, events: &[InteractionEvent]) {
        let mut audio = self.audio.borrow_mut();
        for ev in events {
            match *ev {
                InteractionEvent::Activated(i) => {
                    if let Some(h) = self.registry.borrow().get(i) {
                        log::info!("[hover] {}", h.config.label_text);
                    }
                    if let Some(a) = audio.as_mut() {
                        a.start_hover(i);
                    }
                    if let Some(anim) = self.anims.get_mut(i) {
                        anim.speed = crate::constants::SPRITE_HOVER_SPEEDUP;
                    }
                }
                InteractionEvent::Deactivated(i) => {
                    if let Some(a) = audio.as_mut() {
                        a.stop_hover(i);
                    }
                    if let Some(anim) = self.anims.get_mut(i) {
                        anim.speed = 1.0;
                    }
                }
            }
        }
    }

    fn render_scene(&mut self, dt_sec: f32, time: f32, viewport: Viewport, bg: BackgroundSize) {
        let Some(gpu) = &mut self.gpu else {
            return;
        };
        gpu.resize_if_needed(viewport.width as u32, viewport.height as u32);

        let textures = self.textures.borrow();
        let transform = *self.transform.borrow();
        let registry = self.registry.borrow();
        let interact = self.interact.borrow();
        let touch = interact.profile() == DeviceProfile::Touch;

        let mut sprites: Vec<SpriteDraw> = Vec::new();
        let mut circles: Vec<CircleDraw> = Vec::new();

        if let (Some(bg_tex), false) = (&textures.background, bg.is_degenerate()) {
            sprites.push(SpriteDraw {
                texture: bg_tex,
                center: transform.center,
                size: transform.displayed_size(bg),
                alpha: 1.0,
            });
        }

        for (i, h) in registry.hotspots().iter().enumerate() {
            let pl = &h.placement;
            if let Some(tex) = textures.sprites.get(i).and_then(|t| t.as_ref()) {
                let bob = (self.anims[i].phase * std::f32::consts::TAU * SPRITE_BOB_HZ).sin()
                    * SPRITE_BOB_AMPLITUDE
                    * transform.scale;
                sprites.push(SpriteDraw {
                    texture: tex,
                    center: pl.center + Vec2::new(0.0, bob),
                    size: h.config.native_size * pl.scale,
                    alpha: 1.0,
                });
            }

            if interact.dot_visible(i) {
                let pulse =
                    0.5 * (1.0 + (time * std::f32::consts::TAU * DOT_PULSE_HZ).sin());
                circles.push(CircleDraw {
                    center: pl.dot_center,
                    radius: pl.dot_radius + DOT_PULSE_EXPANSION * transform.scale * pulse,
                    inner_frac: 0.0,
                    color: DOT_COLOR,
                });
            }

            if interact.affordance_visible(i) {
                if let Some(state) = interact.state(i) {
                    circles.push(CircleDraw {
                        center: state.affordance_pos,
                        radius: crate::constants::AFFORDANCE_RADIUS * transform.scale,
                        inner_frac: 0.78,
                        color: AFFORDANCE_COLOR,
                    });
                    circles.push(CircleDraw {
                        center: pl.center,
                        radius: pl.stroke_radius,
                        inner_frac: 0.94,
                        color: STROKE_COLOR,
                    });
                    // Desktop slide-in label, eased in background space.
                    if let (Some(label), Some(tex)) = (
                        state.label,
                        textures.labels.get(i).and_then(|t| t.as_ref()),
                    ) {
                        sprites.push(SpriteDraw {
                            texture: tex,
                            center: transform.to_screen(bg, label.current),
                            size: Vec2::new(tex.width as f32, tex.height as f32)
                                * transform.scale,
                            alpha: 1.0,
                        });
                    }
                }
            }

            // Touch profile: permanent static label under the dot instead of
            // the hover protocol.
            if touch && h.config.mobile_label {
                if let Some(tex) = textures.labels.get(i).and_then(|t| t.as_ref()) {
                    sprites.push(SpriteDraw {
                        texture: tex,
                        center: pl.mobile_label_pos,
                        size: Vec2::new(tex.width as f32, tex.height as f32)
                            * transform.scale
                            * 0.5,
                        alpha: 0.9,
                    });
                }
            }
        }

        if let Err(e) = gpu.render(dt_sec, &sprites, &circles) {
            log::error!("render error: {:?}", e);
        }
    }
}

pub async fn init_gpu(canvas: &web::HtmlCanvasElement) -> Option<render::GpuState<'static>> {
    // leak a canvas clone to satisfy 'static lifetime for surface
    let leaked_canvas = Box::leak(Box::new(canvas.clone()));
    match render::GpuState::new(leaked_canvas).await {
        Ok(g) => Some(g),
        Err(e) => {
            log::error!("WebGPU init error: {:?}", e);
            None
        }
    }
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext>>) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    let frame_ctx_tick = frame_ctx.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        frame_ctx_tick.borrow_mut().frame();
        if let Some(w) = web::window() {
            _ = w.request_animation_frame(
                tick_clone
                    .borrow()
                    .as_ref()
                    .unwrap()
                    .as_ref()
                    .unchecked_ref(),
            );
        }
    }) as Box<dyn FnMut()>));
    if let Some(w) = web::window() {
        _ = w.request_animation_frame(tick.borrow().as_ref().unwrap().as_ref().unchecked_ref());
    }
}
