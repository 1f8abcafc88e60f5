//! [`CollisionQuery`] over avian2d's [`SpatialQuery`].
//!
//! Every mirrored view entity carries a [`ViewLink`]. Hits on anything
//! without one (or filtered out by layer) are dropped. Inactive views have
//! empty memberships, so no mask ever matches them.

use avian2d::prelude::*;
use bevy::ecs::system::SystemParam;
use bevy::prelude::*;

use crate::common::layers::Layer;
use crate::sim::query::{CollisionQuery, Hit};
use crate::sim::views::ViewId;

/// Back-reference from a mirrored entity to its view slot.
#[derive(Component, Clone, Copy, Debug, PartialEq, Eq)]
pub struct ViewLink {
    pub view: ViewId,
    pub layer: Layer,
}

#[derive(SystemParam)]
pub struct AvianQuery<'w, 's> {
    spatial: SpatialQuery<'w, 's>,
    links: Query<'w, 's, &'static ViewLink>,
}

impl AvianQuery<'_, '_> {
    fn hit(&self, entity: Entity) -> Option<Hit> {
        let link = self.links.get(entity).ok()?;
        Some(Hit {
            view: link.view,
            layer: link.layer,
        })
    }
}

impl CollisionQuery for AvianQuery<'_, '_> {
    fn circle_cast(
        &self,
        origin: Vec2,
        radius: f32,
        direction: Vec2,
        distance: f32,
        mask: LayerMask,
    ) -> Option<Hit> {
        let shape = Collider::circle(radius);
        let filter = SpatialQueryFilter::from_mask(mask);

        match Dir2::new(direction) {
            Ok(dir) if distance > 0.0 => {
                let config = ShapeCastConfig::from_max_distance(distance);
                let hit = self
                    .spatial
                    .cast_shape(&shape, origin, 0.0, dir, &config, &filter)?;
                self.hit(hit.entity)
            }
            // Not moving: an overlap test is all a zero-length sweep can find.
            _ => self
                .spatial
                .shape_intersections(&shape, origin, 0.0, &filter)
                .into_iter()
                .find_map(|e| self.hit(e)),
        }
    }

    fn line_cast_all(&self, start: Vec2, end: Vec2, mask: LayerMask) -> Vec<Hit> {
        let Ok(dir) = Dir2::new(end - start) else {
            return Vec::new();
        };
        let filter = SpatialQueryFilter::from_mask(mask);

        self.spatial
            .ray_hits(start, dir, start.distance(end), u32::MAX, true, &filter)
            .iter()
            .filter_map(|h| self.hit(h.entity))
            .collect()
    }
}
