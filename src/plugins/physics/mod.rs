//! Physics plugin: avian2d with no gravity, plus the spatial-query bridge the
//! simulation casts against.

pub mod query;

use avian2d::prelude::*;
use bevy::prelude::*;

/// World units per physics metre.
pub const PIXELS_PER_METER: f32 = 20.0;

pub fn plugin(app: &mut App) {
    app.add_plugins(PhysicsPlugins::default().with_length_unit(PIXELS_PER_METER));
    app.insert_resource(Gravity(Vec2::ZERO));
}
