//! Collision layers.

use avian2d::prelude::*;

#[derive(PhysicsLayer, Default, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Layer {
    #[default]
    Default,
    Player,
    Asteroid,
    Enemy,
    Projectile,
}

/// What the ship and its weapons can hit: asteroids (both sizes) and enemies.
#[inline]
pub fn hostile_mask() -> LayerMask {
    LayerMask::from([Layer::Asteroid, Layer::Enemy])
}

#[inline]
pub fn is_hostile(layer: Layer) -> bool {
    matches!(layer, Layer::Asteroid | Layer::Enemy)
}
