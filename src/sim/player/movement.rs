//! Ship kinematics.

use bevy::math::Vec2;

use crate::common::config::PlayerMovementConfig;
use crate::sim::bounds::BoundsWrapper;
use crate::sim::input::InputFrame;
use crate::sim::views::{ViewArena, ViewId};

/// Unit heading for a rotation in degrees. Rotation 0 faces +Y.
#[inline]
pub fn forward_from_rotation(rotation_deg: f32) -> Vec2 {
    let angle = (rotation_deg + 90.0).to_radians();
    Vec2::new(angle.cos(), angle.sin())
}

#[derive(Debug, Clone)]
pub struct PlayerMovement {
    cfg: PlayerMovementConfig,
    speed: f32,
}

impl PlayerMovement {
    pub fn new(cfg: PlayerMovementConfig) -> Self {
        Self { cfg, speed: 0.0 }
    }

    #[inline]
    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn reset(&mut self) {
        self.speed = 0.0;
    }

    /// Rotate, update speed, then move along the new heading and wrap.
    pub fn update(
        &mut self,
        view: ViewId,
        input: &InputFrame,
        dt: f32,
        arena: &mut ViewArena,
        bounds: &BoundsWrapper,
    ) {
        let slot = arena.slot_mut(view);

        slot.rotation = (slot.rotation + input.rotate * self.cfg.rotate_speed * dt).rem_euclid(360.0);

        self.speed = (self.speed
            + (input.thrust * self.cfg.forward_acceleration - self.cfg.deceleration) * dt)
            .clamp(0.0, self.cfg.max_speed);

        let step = forward_from_rotation(slot.rotation) * self.speed * dt;
        slot.position = bounds.wrap_position(slot.position + step);
    }
}
