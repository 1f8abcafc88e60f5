//! Ship vs. world.

use bevy::math::Vec2;

use crate::common::layers::{hostile_mask, is_hostile};
use crate::sim::query::{CollisionQuery, Hit};

/// Sweep the ship's circle over the distance it covers next tick.
///
/// Only asteroid and enemy hits count; anything else the query returns is
/// ignored.
pub fn sweep_for_hostiles(
    query: &impl CollisionQuery,
    origin: Vec2,
    radius: f32,
    forward: Vec2,
    distance: f32,
) -> Option<Hit> {
    query
        .circle_cast(origin, radius, forward, distance, hostile_mask())
        .filter(|hit| is_hostile(hit.layer))
}
