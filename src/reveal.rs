//! Loading-screen flashlight reveal with Monte-Carlo coverage tracking.
//!
//! A focus point wanders over the logo: every ~700 ms it picks a new target
//! (mostly uniform inside the logo box, periodically the exact center for an
//! emphasis flash) and eases toward it each frame. A fixed grid records which
//! parts of the logo the light has visited; the overlay may come down once
//! coverage crosses the threshold, or unconditionally after the fallback
//! timer. Covering is probabilistic by design, never deterministic.

use crate::constants::{
    REVEAL_CENTER_BIAS, REVEAL_COVERAGE_THRESHOLD, REVEAL_EASE, REVEAL_FALLBACK_SECS, REVEAL_GRID,
    REVEAL_RADIUS, REVEAL_RETARGET_JITTER_SECS, REVEAL_RETARGET_SECS,
};
use glam::Vec2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Logo bounding box in overlay pixels.
#[derive(Clone, Copy, Debug)]
pub struct LogoBox {
    pub min: Vec2,
    pub max: Vec2,
}

impl LogoBox {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    #[inline]
    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }
}

pub struct RevealTracker {
    bounds: LogoBox,
    focus: Vec2,
    target: Vec2,
    next_retarget_at: f64,
    started_at: f64,
    grid: Vec<bool>,
    covered: usize,
    rng: StdRng,
}

impl RevealTracker {
    pub fn new(bounds: LogoBox, now_sec: f64, seed: u64) -> Self {
        let center = bounds.center();
        Self {
            bounds,
            focus: center,
            target: center,
            next_retarget_at: now_sec,
            started_at: now_sec,
            grid: vec![false; REVEAL_GRID * REVEAL_GRID],
            covered: 0,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    #[inline]
    pub fn focus(&self) -> Vec2 {
        self.focus
    }

    /// Covered share of the grid, in [0, 1].
    pub fn coverage(&self) -> f32 {
        self.covered as f32 / self.grid.len() as f32
    }

    /// The overlay may be dismissed: coverage threshold met, or the hard
    /// fallback timer expired.
    pub fn ready(&self, now_sec: f64) -> bool {
        self.coverage() >= REVEAL_COVERAGE_THRESHOLD
            || now_sec - self.started_at >= REVEAL_FALLBACK_SECS
    }

    /// One animation frame: retarget when due, ease the focus, mark cells.
    pub fn tick(&mut self, now_sec: f64) {
        if now_sec >= self.next_retarget_at {
            self.retarget(now_sec);
        }
        self.focus += (self.target - self.focus) * REVEAL_EASE;
        self.mark_covered();
    }

    fn retarget(&mut self, now_sec: f64) {
        self.target = if self.rng.gen_bool(REVEAL_CENTER_BIAS) {
            // Periodic emphasis flash on the logo center.
            self.bounds.center()
        } else {
            Vec2::new(
                self.rng.gen_range(self.bounds.min.x..=self.bounds.max.x),
                self.rng.gen_range(self.bounds.min.y..=self.bounds.max.y),
            )
        };
        let jitter = self.rng.gen_range(0.0..REVEAL_RETARGET_JITTER_SECS);
        self.next_retarget_at = now_sec + REVEAL_RETARGET_SECS + jitter;
    }

    /// Mark the focus cell plus every cell whose center lies within the
    /// flashlight radius. The covered counter only moves on first marking,
    /// so coverage is monotonically non-decreasing.
    fn mark_covered(&mut self) {
        let n = REVEAL_GRID;
        let size = self.bounds.size();
        if size.x <= 0.0 || size.y <= 0.0 {
            return;
        }
        let cell = Vec2::new(size.x / n as f32, size.y / n as f32);
        let local = self.focus - self.bounds.min;
        let fx = ((local.x / cell.x) as isize).clamp(0, n as isize - 1);
        let fy = ((local.y / cell.y) as isize).clamp(0, n as isize - 1);
        self.mark_cell(fx as usize, fy as usize);

        let reach_x = (REVEAL_RADIUS / cell.x).ceil() as isize;
        let reach_y = (REVEAL_RADIUS / cell.y).ceil() as isize;
        let r2 = REVEAL_RADIUS * REVEAL_RADIUS;
        for gy in (fy - reach_y).max(0)..=(fy + reach_y).min(n as isize - 1) {
            for gx in (fx - reach_x).max(0)..=(fx + reach_x).min(n as isize - 1) {
                let center = self.bounds.min
                    + Vec2::new((gx as f32 + 0.5) * cell.x, (gy as f32 + 0.5) * cell.y);
                if center.distance_squared(self.focus) <= r2 {
                    self.mark_cell(gx as usize, gy as usize);
                }
            }
        }
    }

    #[inline]
    fn mark_cell(&mut self, gx: usize, gy: usize) {
        let idx = gy * REVEAL_GRID + gx;
        if !self.grid[idx] {
            self.grid[idx] = true;
            self.covered += 1;
        }
    }
}
