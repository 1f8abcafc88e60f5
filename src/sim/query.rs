//! Collision query seam.
//!
//! The core decides *when* to cast and *what* a hit means; the cast itself
//! belongs to whoever implements [`CollisionQuery`]. In the game that is
//! avian2d's `SpatialQuery` (see `plugins::session::query`); in tests it is
//! a scripted double.

use avian2d::prelude::LayerMask;
use bevy::math::Vec2;

use crate::common::layers::Layer;
use crate::sim::views::ViewId;

/// What struck an entity. Decides fragmentation and piercing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum WeaponKind {
    Projectile,
    Laser,
}

/// A view reported by a cast, tagged with the layer it was found on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Hit {
    pub view: ViewId,
    pub layer: Layer,
}

/// A weapon hit, routed to the controller that owns `hit.view`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WeaponHit {
    pub hit: Hit,
    pub weapon: WeaponKind,
}

pub trait CollisionQuery {
    /// Sweep a circle from `origin` along `direction` for `distance`.
    /// Returns the first hit on a layer in `mask`.
    fn circle_cast(
        &self,
        origin: Vec2,
        radius: f32,
        direction: Vec2,
        distance: f32,
        mask: LayerMask,
    ) -> Option<Hit>;

    /// Every hit on the segment `start..end` on a layer in `mask`.
    fn line_cast_all(&self, start: Vec2, end: Vec2, mask: LayerMask) -> Vec<Hit>;
}

/// A query that never hits anything.
#[derive(Clone, Copy, Debug, Default)]
pub struct EmptyQuery;

impl CollisionQuery for EmptyQuery {
    fn circle_cast(&self, _: Vec2, _: f32, _: Vec2, _: f32, _: LayerMask) -> Option<Hit> {
        None
    }

    fn line_cast_all(&self, _: Vec2, _: Vec2, _: LayerMask) -> Vec<Hit> {
        Vec::new()
    }
}
