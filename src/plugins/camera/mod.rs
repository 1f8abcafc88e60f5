//! Camera plugin (render-only).
//!
//! The playfield wraps, so the camera stays put at the viewport centre and
//! never follows the ship.

use bevy::prelude::*;
use bevy_firefly::prelude::*;

#[derive(Component)]
pub struct MainCamera;

pub fn plugin(app: &mut App) {
    app.add_systems(Startup, spawn_camera);
}

fn spawn_camera(mut commands: Commands) {
    commands.spawn((
        Name::new("MainCamera"),
        Camera2d,
        MainCamera,
        FireflyConfig::default(),
        Transform::from_xyz(0.0, 0.0, 999.0),
    ));
}
