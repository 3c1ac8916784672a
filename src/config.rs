//! Static scene description: the hotspot table and asset locations.
//!
//! One entry per decorative sprite. Anchors and sizes are authored against
//! the 1920×1080 background; everything screen-facing is derived from them at
//! runtime.

use crate::hotspot::HotspotConfig;
use glam::Vec2;

pub const BACKGROUND_URL: &str = "assets/background.png";
pub const LOADING_SEED_FALLBACK: u64 = 42;

pub fn sprite_url(id: &str) -> String {
    format!("assets/sprites/{id}.png")
}

pub fn label_url(id: &str) -> String {
    format!("assets/labels/{id}.png")
}

const fn hotspot(
    id: &'static str,
    anchor: (f32, f32),
    native: (f32, f32),
    boxed: (f32, f32),
    destination: &'static str,
    label_text: &'static str,
) -> HotspotConfig {
    HotspotConfig {
        id,
        anchor: Vec2::new(anchor.0, anchor.1),
        native_size: Vec2::new(native.0, native.1),
        box_size: Vec2::new(boxed.0, boxed.1),
        relative_scale: None,
        offset: Vec2::ZERO,
        destination,
        open_in_new_tab: true,
        mobile_label: true,
        label_text,
    }
}

/// The scene's hotspots, ordered back-to-front for drawing.
pub fn scene_hotspots() -> Vec<HotspotConfig> {
    vec![
        hotspot(
            "lighthouse",
            (212.0, 486.0),
            (180.0, 320.0),
            (120.0, 210.0),
            "https://github.com/rgilks",
            "THE LIGHTHOUSE",
        ),
        hotspot(
            "observatory",
            (1695.0, 238.0),
            (240.0, 200.0),
            (150.0, 125.0),
            "https://www.youtube.com/@panorama-scene",
            "THE OBSERVATORY",
        ),
        HotspotConfig {
            relative_scale: Some(0.55),
            offset: Vec2::new(0.0, -24.0),
            ..hotspot(
                "balloon",
                (742.0, 196.0),
                (220.0, 300.0),
                (220.0, 300.0),
                "https://open.spotify.com/artist/panorama-scene",
                "THE BALLOON",
            )
        },
        hotspot(
            "windmill",
            (1128.0, 420.0),
            (190.0, 260.0),
            (130.0, 180.0),
            "https://www.instagram.com/panorama.scene",
            "THE WINDMILL",
        ),
        hotspot(
            "sailboat",
            (468.0, 788.0),
            (260.0, 180.0),
            (170.0, 115.0),
            "https://twitter.com/panorama_scene",
            "THE SAILBOAT",
        ),
        HotspotConfig {
            relative_scale: Some(0.7),
            ..hotspot(
                "whale",
                (908.0, 902.0),
                (340.0, 170.0),
                (340.0, 170.0),
                "https://www.twitch.tv/panorama_scene",
                "THE WHALE",
            )
        },
        hotspot(
            "ferris-wheel",
            (1436.0, 602.0),
            (280.0, 300.0),
            (185.0, 200.0),
            "https://discord.gg/panorama-scene",
            "THE FERRIS WHEEL",
        ),
        hotspot(
            "campfire",
            (662.0, 628.0),
            (140.0, 150.0),
            (90.0, 95.0),
            "https://panorama-scene.bandcamp.com",
            "THE CAMPFIRE",
        ),
        HotspotConfig {
            offset: Vec2::new(12.0, 0.0),
            ..hotspot(
                "train",
                (1262.0, 812.0),
                (360.0, 150.0),
                (240.0, 100.0),
                "https://soundcloud.com/panorama-scene",
                "THE NIGHT TRAIN",
            )
        },
        hotspot(
            "radio-tower",
            (1814.0, 512.0),
            (120.0, 340.0),
            (80.0, 225.0),
            "https://panorama-scene.com/radio",
            "THE RADIO TOWER",
        ),
        hotspot(
            "market",
            (312.0, 652.0),
            (250.0, 190.0),
            (165.0, 125.0),
            "https://shop.panorama-scene.com",
            "THE MARKET",
        ),
        // Same-tab destination: the redirect waits for the loading overlay to
        // report 100% before leaving the page.
        HotspotConfig {
            open_in_new_tab: false,
            mobile_label: false,
            ..hotspot(
                "airship",
                (1020.0, 132.0),
                (300.0, 160.0),
                (200.0, 105.0),
                "https://panorama-scene.com/expedition",
                "THE AIRSHIP",
            )
        },
    ]
}
