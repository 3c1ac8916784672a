//! Hotspot registry: fixed background-space anchors bound to drawables.
//!
//! Each hotspot is one parameterized record; the registry recomputes every
//! screen placement on any transform or pan change so sprites, dots, strokes
//! and labels stay pixel-aligned to the background.

use crate::constants::{DOT_BASE_RADIUS, MOBILE_LABEL_GAP, STROKE_MARGIN};
use crate::viewport::{BackgroundSize, SceneTransform};
use fnv::FnvHashMap;
use glam::Vec2;

/// Author-provided description of one hotspot. Anchor, sizes and offset are
/// in background pixels and constant for the life of the scene.
#[derive(Clone, Copy, Debug)]
pub struct HotspotConfig {
    pub id: &'static str,
    pub anchor: Vec2,
    /// Natural pixel size of the sprite texture.
    pub native_size: Vec2,
    /// Reference box the sprite is cover-fitted into when no explicit
    /// relative scale is configured.
    pub box_size: Vec2,
    pub relative_scale: Option<f32>,
    pub offset: Vec2,
    pub destination: &'static str,
    pub open_in_new_tab: bool,
    pub mobile_label: bool,
    pub label_text: &'static str,
}

/// Screen-space placement, recomputed by [`HotspotRegistry::reposition`].
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Placement {
    pub center: Vec2,
    /// Final sprite scale (relative/cover fit multiplied by the scene scale).
    pub scale: f32,
    pub dot_center: Vec2,
    pub dot_radius: f32,
    pub stroke_radius: f32,
    pub mobile_label_pos: Vec2,
}

#[derive(Debug)]
pub struct Hotspot {
    pub config: HotspotConfig,
    pub placement: Placement,
}

/// Displayed scale for a sprite: an explicit override, or a per-hotspot
/// "cover" fit of the native size into the configured box (aspect preserved).
pub fn sprite_fit_scale(config: &HotspotConfig) -> f32 {
    match config.relative_scale {
        Some(s) => s,
        None => (config.box_size.x / config.native_size.x)
            .max(config.box_size.y / config.native_size.y),
    }
}

#[derive(Default, Debug)]
pub struct HotspotRegistry {
    hotspots: Vec<Hotspot>,
    index_by_id: FnvHashMap<&'static str, usize>,
}

impl HotspotRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, config: HotspotConfig) {
        self.index_by_id.insert(config.id, self.hotspots.len());
        self.hotspots.push(Hotspot {
            config,
            placement: Placement::default(),
        });
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.hotspots.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.hotspots.is_empty()
    }

    #[inline]
    pub fn hotspots(&self) -> &[Hotspot] {
        &self.hotspots
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&Hotspot> {
        self.hotspots.get(index)
    }

    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.index_by_id.get(id).copied()
    }

    /// True when the pointer sits inside any hotspot's activation area; used
    /// to decide whether a press starts a pan or falls through to the
    /// interaction layer.
    pub fn any_dot_contains(&self, pointer: Vec2, slack: f32) -> bool {
        self.hotspots.iter().any(|h| {
            let r = h.placement.dot_radius + slack;
            pointer.distance_squared(h.placement.dot_center) <= r * r
        })
    }

    /// Recompute every placement from the current transform. Pure in
    /// (transform, bg): identical inputs give identical placements. A
    /// degenerate background size skips the pass for this call only; it
    /// self-heals once the asset reports a real size.
    pub fn reposition(&mut self, transform: &SceneTransform, bg: BackgroundSize) {
        if bg.is_degenerate() {
            log::warn!("[hotspots] degenerate background size, skipping reposition");
            return;
        }
        for h in &mut self.hotspots {
            let center =
                transform.to_screen(bg, h.config.anchor) + h.config.offset * transform.scale;
            let scale = sprite_fit_scale(&h.config) * transform.scale;
            let half_extent = 0.5 * h.config.native_size.max_element() * scale;
            let dot_radius = DOT_BASE_RADIUS * transform.scale;
            h.placement = Placement {
                center,
                scale,
                dot_center: center,
                dot_radius,
                stroke_radius: half_extent + STROKE_MARGIN * transform.scale,
                mobile_label_pos: center
                    + Vec2::new(0.0, dot_radius + MOBILE_LABEL_GAP * transform.scale),
            };
        }
    }
}
