#![cfg(target_arch = "wasm32")]
//! Interactive panoramic scene: an oversized background illustration that
//! always covers the viewport, pannable by drag, with fixed-anchor hotspot
//! sprites driving a layered hover protocol and external navigation.

use glam::Vec2;
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod assets;
mod audio;
mod config;
mod constants;
mod dom;
mod events;
mod frame;
mod hotspot;
mod interact;
mod nav;
mod overlay;
mod pan;
mod render;
mod reveal;
mod viewport;

use frame::{FrameContext, LoadProgress, SceneTextures, SpriteAnim};
use hotspot::HotspotRegistry;
use interact::{DeviceProfile, InteractionController};
use pan::PanController;
use viewport::{BackgroundSize, SceneTransform, Viewport};

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("panorama-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

/// Logo bounding box for the loading reveal, read from the overlay element
/// with a centered fallback when the element is missing.
fn reveal_logo_box(document: &web::Document) -> reveal::LogoBox {
    if let Some(el) = document.get_element_by_id("loading-logo") {
        let rect = el.get_bounding_client_rect();
        if rect.width() > 0.0 && rect.height() > 0.0 {
            return reveal::LogoBox::new(
                Vec2::new(0.0, 0.0),
                Vec2::new(rect.width() as f32, rect.height() as f32),
            );
        }
    }
    reveal::LogoBox::new(Vec2::new(0.0, 0.0), Vec2::new(480.0, 270.0))
}

async fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    let canvas_el = document
        .get_element_by_id("scene-canvas")
        .ok_or_else(|| anyhow::anyhow!("missing #scene-canvas"))?;
    let canvas: web::HtmlCanvasElement = canvas_el
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;
    dom::sync_canvas_backing_size(&canvas);

    let profile = if dom::css_window_width() <= constants::SMALL_SCREEN_MAX_CSS_WIDTH {
        DeviceProfile::Touch
    } else {
        DeviceProfile::Desktop
    };
    log::info!("[init] device profile {:?}", profile);

    let viewport = Viewport::new(canvas.width() as f32, canvas.height() as f32);

    // Shared scene state. The background size stays degenerate until the
    // texture reports its natural size; repositioning is skipped until then.
    let bg = Rc::new(RefCell::new(BackgroundSize::new(0.0, 0.0)));
    let transform = Rc::new(RefCell::new(SceneTransform {
        scale: 1.0,
        center: viewport.center(),
    }));

    let hotspot_configs = config::scene_hotspots();
    let mut registry = HotspotRegistry::new();
    for c in &hotspot_configs {
        registry.register(*c);
    }
    let hotspot_count = registry.len();
    let registry = Rc::new(RefCell::new(registry));

    let interact = Rc::new(RefCell::new(InteractionController::new(
        profile,
        hotspot_count,
    )));
    let pan = Rc::new(RefCell::new(PanController::new()));
    let pointer = Rc::new(RefCell::new(events::pointer::PointerState::default()));
    let progress = Rc::new(RefCell::new(LoadProgress {
        loaded: 0,
        total: assets::total_steps(hotspot_count),
    }));

    let audio = Rc::new(RefCell::new(audio::AudioSystem::new(hotspot_count).ok()));

    let gpu = frame::init_gpu(&canvas).await;

    let seed = js_sys::Date::now() as u64 ^ config::LOADING_SEED_FALLBACK;
    let started_at = Instant::now();
    let reveal_tracker = reveal::RevealTracker::new(reveal_logo_box(&document), 0.0, seed);

    let frame_ctx = Rc::new(RefCell::new(FrameContext {
        canvas: canvas.clone(),
        document: document.clone(),
        transform: transform.clone(),
        bg: bg.clone(),
        registry: registry.clone(),
        interact: interact.clone(),
        pan: pan.clone(),
        pointer: pointer.clone(),
        audio: audio.clone(),
        progress: progress.clone(),
        gpu,
        textures: Rc::new(RefCell::new(SceneTextures::default())),
        anims: vec![SpriteAnim::default(); hotspot_count],
        reveal: Some(reveal_tracker),
        started_at,
        last_instant: started_at,
        last_viewport: viewport,
    }));

    events::pointer::wire_input_handlers(events::pointer::InputWiring {
        canvas: canvas.clone(),
        transform: transform.clone(),
        bg: bg.clone(),
        registry: registry.clone(),
        interact: interact.clone(),
        pan: pan.clone(),
        pointer: pointer.clone(),
        audio: audio.clone(),
        progress: progress.clone(),
    });
    events::keyboard::wire_global_keydown(audio.clone(), canvas.clone());
    events::window::wire_window_events(frame_ctx.clone());

    // Clicking the popup-blocked notice dismisses it.
    let notice_doc = document.clone();
    dom::add_click_listener(&document, "popup-notice", move || {
        overlay::hide_popup_notice(&notice_doc);
    });

    // Assets stream in behind the running frame loop; each arrival updates
    // the progress line, failures leave their hotspot absent.
    spawn_local(load_assets_task(
        frame_ctx.clone(),
        hotspot_configs,
        document.clone(),
        progress,
    ));

    frame::start_loop(frame_ctx);
    Ok(())
}

async fn load_assets_task(
    frame_ctx: Rc<RefCell<FrameContext>>,
    hotspot_configs: Vec<hotspot::HotspotConfig>,
    document: web::Document,
    progress: Rc<RefCell<LoadProgress>>,
) {
    let scene_assets = assets::load_scene(&hotspot_configs, |loaded, total| {
        {
            let mut p = progress.borrow_mut();
            p.loaded = loaded;
            p.total = total;
        }
        overlay::set_progress(&document, loaded, total);
    })
    .await;

    let ctx = frame_ctx.borrow();
    {
        let mut textures = ctx.textures.borrow_mut();
        if let Some(img) = &scene_assets.background {
            if let Some(gpu) = &ctx.gpu {
                textures.background = Some(gpu.upload_texture("background", &img.bitmap));
            }
            *ctx.bg.borrow_mut() = BackgroundSize::new(img.width as f32, img.height as f32);
        }
        for (i, img) in scene_assets.sprites.iter().enumerate() {
            let tex = match (img, &ctx.gpu) {
                (Some(img), Some(gpu)) => {
                    Some(gpu.upload_texture(hotspot_configs[i].id, &img.bitmap))
                }
                _ => None,
            };
            textures.sprites.push(tex);
        }
        for (i, img) in scene_assets.labels.iter().enumerate() {
            let tex = match (img, &ctx.gpu) {
                (Some(img), Some(gpu)) => {
                    Some(gpu.upload_texture(hotspot_configs[i].id, &img.bitmap))
                }
                _ => None,
            };
            textures.labels.push(tex);
        }
    }

    // First real fit now that the background reported its natural size.
    let bg = *ctx.bg.borrow();
    if !bg.is_degenerate() {
        let viewport = Viewport::new(ctx.canvas.width() as f32, ctx.canvas.height() as f32);
        let mut transform = ctx.transform.borrow_mut();
        transform.recompute(viewport, bg);
        transform.center = pan::clamp_center(
            transform.center,
            viewport,
            transform.displayed_size(bg),
        );
        ctx.registry.borrow_mut().reposition(&transform, bg);
    }
    log::info!("[assets] scene ready");
}
