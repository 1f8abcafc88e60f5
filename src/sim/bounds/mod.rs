//! Toroidal playfield bounds.
//!
//! Positions are checked in normalized viewport space (`[0, 1]` on both axes,
//! origin bottom-left). Anything inside the wrap zone near an edge is
//! reflected to the opposite side, pushed in by the teleport threshold so it
//! does not immediately wrap back.
//!
//! The horizontal thresholds are divided by the aspect ratio so the wrap
//! zone has the same world-space width on every edge.

use bevy::math::Vec2;
use rand::Rng;

use crate::common::config::{BoundsConfig, PlayfieldConfig};

/// Orthographic view of the playfield: world-space centre and size.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub center: Vec2,
    pub size: Vec2,
}

impl Viewport {
    pub fn new(center: Vec2, size: Vec2) -> Self {
        Self { center, size }
    }

    pub fn centered(size: Vec2) -> Self {
        Self::new(Vec2::ZERO, size)
    }

    pub fn from_config(cfg: &PlayfieldConfig) -> Self {
        Self::centered(Vec2::new(cfg.width, cfg.height))
    }

    /// Width over height.
    #[inline]
    pub fn aspect(&self) -> f32 {
        self.size.x / self.size.y
    }

    #[inline]
    fn bottom_left(&self) -> Vec2 {
        self.center - self.size * 0.5
    }

    #[inline]
    pub fn world_to_viewport(&self, world: Vec2) -> Vec2 {
        (world - self.bottom_left()) / self.size
    }

    #[inline]
    pub fn viewport_to_world(&self, viewport: Vec2) -> Vec2 {
        self.bottom_left() + viewport * self.size
    }
}

#[derive(Clone, Debug)]
pub struct BoundsWrapper {
    viewport: Viewport,
    threshold: f32,
    teleport: f32,
    // Inset corners in world space, computed once.
    inset_min: Vec2,
    inset_max: Vec2,
}

impl BoundsWrapper {
    pub fn new(viewport: Viewport, screen_bounds_threshold: f32, teleport_threshold: f32) -> Self {
        let aspect = viewport.aspect();
        let inset_min = viewport.viewport_to_world(Vec2::new(
            screen_bounds_threshold / aspect,
            screen_bounds_threshold,
        ));
        let inset_max = viewport.viewport_to_world(Vec2::new(
            1.0 - screen_bounds_threshold / aspect,
            1.0 - screen_bounds_threshold,
        ));

        Self {
            viewport,
            threshold: screen_bounds_threshold,
            teleport: teleport_threshold,
            inset_min,
            inset_max,
        }
    }

    pub fn from_config(viewport: Viewport, cfg: &BoundsConfig) -> Self {
        Self::new(viewport, cfg.screen_bounds_threshold, cfg.teleport_threshold)
    }

    #[inline]
    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// World-space corners of the safe zone.
    #[inline]
    pub fn inset_corners(&self) -> (Vec2, Vec2) {
        (self.inset_min, self.inset_max)
    }

    /// Reflect a position that entered a wrap zone to the opposite edge.
    /// Positions in the safe zone are returned unchanged.
    pub fn wrap_position(&self, world: Vec2) -> Vec2 {
        let aspect = self.viewport.aspect();
        let (t, p) = (self.threshold, self.teleport);

        let vp = self.viewport.world_to_viewport(world);
        let mut out = vp;

        if vp.x < t / aspect {
            out.x = 1.0 - (vp.x + p) / aspect;
        }
        if vp.x > 1.0 - t / aspect {
            out.x = (1.0 - vp.x + p) / aspect;
        }

        if vp.y < t {
            out.y = 1.0 - vp.y - p;
        }
        if vp.y > 1.0 - t {
            out.y = 1.0 - vp.y + p;
        }

        if out == vp {
            return world;
        }
        self.viewport.viewport_to_world(out)
    }

    /// Uniform random position inside the safe zone.
    pub fn random_position_in_bounds(&self, rng: &mut impl Rng) -> Vec2 {
        Vec2::new(
            sample_between(rng, self.inset_min.x, self.inset_max.x),
            sample_between(rng, self.inset_min.y, self.inset_max.y),
        )
    }
}

// `gen_range` panics on an empty range; a zero-width safe zone just pins the axis.
#[inline]
fn sample_between(rng: &mut impl Rng, lo: f32, hi: f32) -> f32 {
    if hi > lo { rng.gen_range(lo..hi) } else { lo }
}

#[cfg(test)]
mod tests;
