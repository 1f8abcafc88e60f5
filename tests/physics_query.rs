//! The avian2d-backed collision query, end to end.

mod common;

use avian2d::prelude::*;
use bevy::prelude::*;
use rock_drift::common::config::{AsteroidConfig, EnemyConfig, GameConfig};
use rock_drift::common::layers::Layer;
use rock_drift::plugins::physics::query::ViewLink;
use rock_drift::plugins::session::{ActiveSession, PlayerInput};
use rock_drift::sim::ViewKind;

fn config() -> GameConfig {
    GameConfig {
        asteroid: AsteroidConfig {
            spawn_period: 0.1,
            speed: 0.0,
            ..AsteroidConfig::default()
        },
        enemy: EnemyConfig {
            spawn_period: 1000.0,
            ..EnemyConfig::default()
        },
        ..GameConfig::default()
    }
}

#[test]
fn laser_destroys_an_asteroid_found_by_the_spatial_query() {
    let mut app = common::app_with_config(config());
    common::step(&mut app, 2);
    app.world_mut().resource_mut::<PlayerInput>().start = true;

    let spawned = common::step_until(&mut app, 60, |app| {
        app.world()
            .resource::<ActiveSession>()
            .asteroids()
            .big_pool()
            .active_len()
            > 0
    });
    assert!(spawned, "no asteroid spawned");

    let rock = {
        let session = app.world().resource::<ActiveSession>();
        session
            .arena()
            .iter()
            .find(|(_, s)| s.active && s.kind == ViewKind::Asteroid)
            .map(|(v, _)| v)
            .unwrap()
    };

    // A second collider for the same view, straight up the ship's nose.
    let decoy = Vec2::new(0.0, 120.0);
    app.world_mut().spawn((
        ViewLink {
            view: rock,
            layer: Layer::Asteroid,
        },
        Transform::from_translation(decoy.extend(0.0)),
        Position(decoy),
        RigidBody::Static,
        Collider::circle(12.0),
        CollisionLayers::new(Layer::Asteroid, LayerMask::NONE),
    ));
    common::step(&mut app, 1);

    app.world_mut().resource_mut::<PlayerInput>().laser = true;
    common::step(&mut app, 2);

    let session = app.world().resource::<ActiveSession>();
    assert!(session.is_running());
    assert!(!session.arena().is_active(rock));
    assert!(session.score() >= session.config().score.asteroid);
}

#[test]
fn inactive_views_are_invisible_to_casts() {
    let mut app = common::app_with_config(config());
    common::step(&mut app, 3);

    // Idle: every view is inactive, so nothing is in the hostile mask.
    let session = app.world().resource::<ActiveSession>();
    assert_eq!(session.active_entities(), 0);

    let members: Vec<LayerMask> = app
        .world_mut()
        .query::<(&ViewLink, &CollisionLayers)>()
        .iter(app.world())
        .map(|(_, l)| l.memberships)
        .collect();
    assert!(!members.is_empty());
    assert!(members.iter().all(|m| *m == LayerMask::NONE));
}
