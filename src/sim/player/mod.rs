//! Player ship: movement, both weapons and the collision check that ends a
//! game.
//!
//! The session calls `update_movement`, `update_weapons` and
//! `check_collision` separately, so destruction from the weapon pass is
//! applied before the ship sweeps for hostiles.

pub mod collision;
pub mod laser;
pub mod movement;
pub mod projectiles;

use bevy::math::Vec2;

use crate::common::config::GameConfig;
use crate::sim::bounds::BoundsWrapper;
use crate::sim::input::InputFrame;
use crate::sim::query::{CollisionQuery, Hit, WeaponHit};
use crate::sim::views::{ViewArena, ViewId, ViewKind};

use self::laser::LaserWeapon;
use self::movement::{PlayerMovement, forward_from_rotation};
use self::projectiles::ProjectileWeapon;

/// Per-tick player snapshot for the UI.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerUiData {
    pub position: Vec2,
    /// Degrees.
    pub rotation: f32,
    pub speed: f32,
    pub laser_charges: u32,
    /// Seconds until the next laser charge.
    pub laser_recharge_remaining: f32,
}

#[derive(Debug)]
pub struct PlayerController {
    view: ViewId,
    start: Vec2,
    collision_radius: f32,
    movement: PlayerMovement,
    projectiles: ProjectileWeapon,
    laser: LaserWeapon,
    weapons_armed: bool,
}

impl PlayerController {
    pub fn new(cfg: &GameConfig, arena: &mut ViewArena) -> Self {
        let view = arena.create(ViewKind::Player);
        Self {
            view,
            start: cfg.player.start(),
            collision_radius: cfg.player.collision_radius,
            movement: PlayerMovement::new(cfg.player),
            projectiles: ProjectileWeapon::new(cfg.projectile, arena),
            laser: LaserWeapon::new(cfg.laser),
            weapons_armed: false,
        }
    }

    #[inline]
    pub fn view(&self) -> ViewId {
        self.view
    }

    #[inline]
    pub fn position(&self, arena: &ViewArena) -> Vec2 {
        arena.position(self.view)
    }

    #[inline]
    pub fn forward(&self, arena: &ViewArena) -> Vec2 {
        forward_from_rotation(arena.slot(self.view).rotation)
    }

    #[inline]
    pub fn speed(&self) -> f32 {
        self.movement.speed()
    }

    #[inline]
    pub fn laser(&self) -> &LaserWeapon {
        &self.laser
    }

    #[inline]
    pub fn projectiles(&self) -> &ProjectileWeapon {
        &self.projectiles
    }

    /// Back to the start position, at rest, full charges, visible.
    pub fn enable(&mut self, arena: &mut ViewArena) {
        let slot = arena.slot_mut(self.view);
        slot.rotation = 0.0;
        slot.scale = 1.0;
        arena.activate(self.view, self.start);

        self.movement.reset();
        self.laser.reset();
        self.weapons_armed = true;
    }

    /// Hide the ship and drop every projectile in flight.
    pub fn disable(&mut self, arena: &mut ViewArena) {
        self.weapons_armed = false;
        self.movement.reset();
        self.projectiles.disable(arena);
        arena.deactivate(self.view);
    }

    pub fn update_movement(
        &mut self,
        input: &InputFrame,
        dt: f32,
        arena: &mut ViewArena,
        bounds: &BoundsWrapper,
    ) {
        self.movement.update(self.view, input, dt, arena, bounds);
    }

    /// Handle fire inputs, then run the projectile and laser passes.
    pub fn update_weapons(
        &mut self,
        input: &InputFrame,
        now: f32,
        dt: f32,
        arena: &mut ViewArena,
        query: &impl CollisionQuery,
        hits: &mut Vec<WeaponHit>,
    ) {
        let origin = self.position(arena);
        let forward = self.forward(arena);

        if self.weapons_armed {
            if input.fire {
                self.projectiles.fire(origin, forward, now, arena);
            }
            if input.laser {
                self.laser.fire(now);
            }
        }

        self.projectiles.update(now, dt, arena, query, hits);

        let beam = self.laser.update(now, origin, forward, query, hits);
        arena.slot_mut(self.view).beam = beam;
    }

    /// Sweep the ship over the distance it covers this tick.
    pub fn check_collision(
        &self,
        dt: f32,
        arena: &ViewArena,
        query: &impl CollisionQuery,
    ) -> Option<Hit> {
        collision::sweep_for_hostiles(
            query,
            self.position(arena),
            self.collision_radius,
            self.forward(arena),
            self.movement.speed() * dt,
        )
    }

    pub fn telemetry(&self, now: f32, arena: &ViewArena) -> PlayerUiData {
        let slot = arena.slot(self.view);
        PlayerUiData {
            position: slot.position,
            rotation: slot.rotation,
            speed: self.movement.speed(),
            laser_charges: self.laser.charges(),
            laser_recharge_remaining: self.laser.recharge_remaining(now),
        }
    }
}
