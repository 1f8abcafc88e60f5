//! View mirror: one sprite entity per [`ViewId`], kept in step with the
//! session's [`ViewArena`](crate::sim::views::ViewArena).
//!
//! Slots never disappear, so the mirror is an append-only `Vec<Entity>`
//! indexed by `ViewId::index()`. New slots (a pool grew) get an entity on
//! the next sync. Inactive views are hidden and carry empty collision
//! layers, so spatial queries never see them.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::plugins::physics::query::ViewLink;
use crate::plugins::session::ActiveSession;
use crate::sim::views::{ViewId, ViewKind, ViewSlot};

/// Marker on the ship's view entity.
#[derive(Component)]
pub struct PlayerShip;

/// The laser beam sprite, stretched from the ship to the beam end.
#[derive(Component)]
pub struct LaserBeam;

#[derive(Resource, Debug, Default)]
pub struct ViewEntities(pub Vec<Entity>);

const BEAM_WIDTH: f32 = 3.0;

fn color(kind: ViewKind) -> Color {
    match kind {
        ViewKind::Player => Color::srgb(0.2, 0.75, 0.9),
        ViewKind::Asteroid => Color::srgb(0.55, 0.5, 0.45),
        ViewKind::Enemy => Color::srgb(0.9, 0.25, 0.3),
        ViewKind::Projectile => Color::srgb(1.0, 0.95, 0.6),
    }
}

fn depth(kind: ViewKind) -> f32 {
    match kind {
        ViewKind::Asteroid => 1.0,
        ViewKind::Enemy => 2.0,
        ViewKind::Projectile => 3.0,
        ViewKind::Player => 4.0,
    }
}

fn layers(slot: &ViewSlot) -> CollisionLayers {
    if slot.active {
        CollisionLayers::new(slot.kind.layer(), LayerMask::NONE)
    } else {
        CollisionLayers::NONE
    }
}

fn visibility(slot: &ViewSlot) -> Visibility {
    if slot.active {
        Visibility::Inherited
    } else {
        Visibility::Hidden
    }
}

fn transform(slot: &ViewSlot) -> Transform {
    Transform::from_translation(slot.position.extend(depth(slot.kind)))
        .with_rotation(Quat::from_rotation_z(slot.rotation.to_radians()))
        .with_scale(Vec3::new(slot.scale, slot.scale, 1.0))
}

fn spawn_view(commands: &mut Commands, view: ViewId, slot: &ViewSlot, radius: f32) -> Entity {
    let mut entity = commands.spawn((
        Name::new(format!("{:?}#{}", slot.kind, view.index())),
        ViewLink {
            view,
            layer: slot.kind.layer(),
        },
        Sprite {
            color: color(slot.kind),
            custom_size: Some(Vec2::splat(radius * 2.0)),
            ..default()
        },
        transform(slot),
        visibility(slot),
        RigidBody::Kinematic,
        Collider::circle(radius),
        layers(slot),
    ));
    if slot.kind == ViewKind::Player {
        entity.insert(PlayerShip);
    }
    entity.id()
}

pub fn spawn_beam(mut commands: Commands) {
    commands.spawn((
        Name::new("LaserBeam"),
        LaserBeam,
        Sprite {
            color: Color::srgb(1.0, 0.3, 0.9),
            custom_size: Some(Vec2::ONE),
            ..default()
        },
        Transform::default(),
        Visibility::Hidden,
    ));
}

pub fn plugin(app: &mut App) {
    app.init_resource::<ViewEntities>()
        .add_systems(Startup, spawn_beam);
}

/// Copy every slot onto its entity, spawning entities for new slots.
pub fn sync_views(
    mut commands: Commands,
    session: Res<ActiveSession>,
    mut mirror: ResMut<ViewEntities>,
    mut q_views: Query<(&mut Transform, &mut Visibility, &mut CollisionLayers), With<ViewLink>>,
    mut q_beam: Query<(&mut Transform, &mut Visibility), (With<LaserBeam>, Without<ViewLink>)>,
) {
    let arena = session.arena();

    for (view, slot) in arena.iter() {
        match mirror.0.get(view.index()) {
            Some(&entity) => {
                // Spawned last frame; commands may not have landed yet.
                let Ok((mut tf, mut vis, mut lay)) = q_views.get_mut(entity) else {
                    continue;
                };
                *tf = transform(slot);
                vis.set_if_neq(visibility(slot));
                *lay = layers(slot);
            }
            None => {
                let entity = spawn_view(&mut commands, view, slot, session.base_radius(slot.kind));
                mirror.0.push(entity);
            }
        }
    }

    let Ok((mut tf, mut vis)) = q_beam.single_mut() else {
        return;
    };
    let ship = session.player();
    match arena.slot(ship.view()).beam {
        Some(end) if arena.is_active(ship.view()) => {
            let start = ship.position(arena);
            let along = end - start;
            tf.translation = ((start + end) * 0.5).extend(depth(ViewKind::Player) - 0.5);
            tf.rotation = Quat::from_rotation_z(along.to_angle());
            tf.scale = Vec3::new(along.length(), BEAM_WIDTH, 1.0);
            vis.set_if_neq(Visibility::Inherited);
        }
        _ => {
            vis.set_if_neq(Visibility::Hidden);
        }
    }
}
