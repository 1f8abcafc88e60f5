//! Test helpers.
//!
//! `run_system_once` runs a single system against a bare `World` and flushes
//! queued commands before the caller asserts.
//!
//! [`ObstacleQuery`] is a geometric stand-in for the avian2d spatial query:
//! a flat list of circles, each standing in for a view.

use avian2d::prelude::LayerMask;
use bevy::ecs::system::{IntoSystem, RunSystemOnce};
use bevy::prelude::*;

use crate::common::layers::Layer;
use crate::sim::query::{CollisionQuery, Hit};
use crate::sim::views::ViewId;

/// Run a system once on the given world, then flush deferred commands.
/// Returns the system output.
pub fn run_system_once<T, Out, Marker>(world: &mut World, system: T) -> Out
where
    T: IntoSystem<(), Out, Marker>,
{
    let out = world.run_system_once(system).expect("system run failed");
    world.flush();
    out
}

#[derive(Clone, Copy, Debug)]
pub struct Obstacle {
    pub view: ViewId,
    pub layer: Layer,
    pub center: Vec2,
    pub radius: f32,
}

/// Brute-force circle/segment queries over a fixed obstacle list.
#[derive(Clone, Debug, Default)]
pub struct ObstacleQuery {
    pub obstacles: Vec<Obstacle>,
}

impl ObstacleQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, view: ViewId, layer: Layer, center: Vec2, radius: f32) -> Self {
        self.obstacles.push(Obstacle {
            view,
            layer,
            center,
            radius,
        });
        self
    }

    fn candidates(&self, mask: LayerMask) -> impl Iterator<Item = &Obstacle> {
        self.obstacles.iter().filter(move |o| mask.has_all(o.layer))
    }
}

/// Distance along `start + dir * t`, `t ∈ [0, len]`, of the closest approach to `p`,
/// and the distance at that point.
fn closest_on_segment(start: Vec2, dir: Vec2, len: f32, p: Vec2) -> (f32, f32) {
    let t = (p - start).dot(dir).clamp(0.0, len);
    (t, (start + dir * t).distance(p))
}

impl CollisionQuery for ObstacleQuery {
    fn circle_cast(
        &self,
        origin: Vec2,
        radius: f32,
        direction: Vec2,
        distance: f32,
        mask: LayerMask,
    ) -> Option<Hit> {
        let dir = direction.normalize_or_zero();
        self.candidates(mask)
            .filter_map(|o| {
                let (t, d) = closest_on_segment(origin, dir, distance, o.center);
                (d <= radius + o.radius).then_some((t, o))
            })
            .min_by(|a, b| a.0.total_cmp(&b.0))
            .map(|(_, o)| Hit {
                view: o.view,
                layer: o.layer,
            })
    }

    fn line_cast_all(&self, start: Vec2, end: Vec2, mask: LayerMask) -> Vec<Hit> {
        let len = start.distance(end);
        let dir = (end - start).normalize_or_zero();
        self.candidates(mask)
            .filter(|o| closest_on_segment(start, dir, len, o.center).1 <= o.radius)
            .map(|o| Hit {
                view: o.view,
                layer: o.layer,
            })
            .collect()
    }
}
