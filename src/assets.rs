//! Sequential startup asset loading.
//!
//! Every texture is fetched once, before the interactive systems are wired.
//! An individual failure is logged and leaves that slot empty — the hotspot
//! is simply absent — and still counts toward progress so the loading bar
//! never stalls.

use crate::config;
use crate::hotspot::HotspotConfig;
use wasm_bindgen_futures::JsFuture;
use web_sys as web;

pub struct LoadedImage {
    pub bitmap: web::ImageBitmap,
    pub width: u32,
    pub height: u32,
}

pub async fn load_image(url: &str) -> anyhow::Result<LoadedImage> {
    let img = web::HtmlImageElement::new().map_err(|e| anyhow::anyhow!("{:?}", e))?;
    img.set_src(url);
    JsFuture::from(img.decode())
        .await
        .map_err(|e| anyhow::anyhow!("decode {url}: {:?}", e))?;
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let promise = window
        .create_image_bitmap_with_html_image_element(&img)
        .map_err(|e| anyhow::anyhow!("createImageBitmap {url}: {:?}", e))?;
    let bitmap: web::ImageBitmap = JsFuture::from(promise)
        .await
        .map_err(|e| anyhow::anyhow!("bitmap {url}: {:?}", e))?
        .into();
    Ok(LoadedImage {
        width: bitmap.width(),
        height: bitmap.height(),
        bitmap,
    })
}

pub struct SceneAssets {
    pub background: Option<LoadedImage>,
    pub sprites: Vec<Option<LoadedImage>>,
    pub labels: Vec<Option<LoadedImage>>,
}

/// Total number of progress steps for a hotspot table: background plus one
/// sprite and one label per entry.
pub fn total_steps(hotspot_count: usize) -> usize {
    1 + hotspot_count * 2
}

pub async fn load_scene(
    configs: &[HotspotConfig],
    mut on_progress: impl FnMut(usize, usize),
) -> SceneAssets {
    let total = total_steps(configs.len());
    let mut loaded = 0usize;
    let mut step = |loaded: &mut usize| {
        *loaded += 1;
        on_progress(*loaded, total);
    };

    let background = match load_image(config::BACKGROUND_URL).await {
        Ok(img) => Some(img),
        Err(e) => {
            log::error!("[assets] background failed: {e:?}");
            None
        }
    };
    step(&mut loaded);

    let mut sprites = Vec::with_capacity(configs.len());
    let mut labels = Vec::with_capacity(configs.len());
    for c in configs {
        let sprite = match load_image(&config::sprite_url(c.id)).await {
            Ok(img) => Some(img),
            Err(e) => {
                log::error!("[assets] sprite {} failed: {e:?}", c.id);
                None
            }
        };
        step(&mut loaded);
        let label = match load_image(&config::label_url(c.id)).await {
            Ok(img) => Some(img),
            Err(e) => {
                log::error!("[assets] label {} failed: {e:?}", c.id);
                None
            }
        };
        step(&mut loaded);
        sprites.push(sprite);
        labels.push(label);
    }

    SceneAssets {
        background,
        sprites,
        labels,
    }
}
