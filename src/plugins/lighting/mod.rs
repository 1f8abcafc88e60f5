//! Lighting plugin (Firefly) (render-only).

use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;
use bevy_firefly::prelude::*;

use crate::common::state::GameState;
use crate::plugins::views::PlayerShip;

#[derive(Component)]
pub struct ShipLight;

pub fn plugin(app: &mut App) {
    if !app.is_plugin_added::<FireflyPlugin>() {
        app.add_plugins(FireflyPlugin);
    }

    app.add_systems(OnEnter(GameState::Running), setup)
        .add_systems(Update, follow_ship.run_if(in_state(GameState::Running)));
}

fn setup(mut commands: Commands) {
    commands.spawn((
        Name::new("ShipLight"),
        ShipLight,
        PointLight2d {
            color: Color::srgb(1.0, 0.9, 0.75),
            radius: 450.0,
            ..default()
        },
        Transform::from_xyz(0.0, 0.0, 10.0),
        DespawnOnExit(GameState::Running),
    ));
}

fn follow_ship(
    q_ship: Query<&Transform, (With<PlayerShip>, Without<ShipLight>)>,
    mut q_light: Query<&mut Transform, (With<ShipLight>, Without<PlayerShip>)>,
) {
    let Ok(tf_ship) = q_ship.single() else {
        return;
    };
    let Ok(mut tf_light) = q_light.single_mut() else {
        return;
    };

    tf_light.translation.x = tf_ship.translation.x;
    tf_light.translation.y = tf_ship.translation.y;
}
