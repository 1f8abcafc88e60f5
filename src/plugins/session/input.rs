//! Keyboard sampling.
//!
//! Sampled every frame in `Update`, consumed once per fixed step. Analog
//! axes hold their last value; triggers latch until consumed so a tap
//! between two fixed steps is never lost.

use bevy::prelude::*;

use crate::sim::input::InputFrame;

#[derive(Resource, Debug, Default, Clone, Copy, PartialEq)]
pub struct PlayerInput {
    pub rotate: f32,
    pub thrust: f32,
    pub fire: bool,
    pub laser: bool,
    /// Start a game if none is running.
    pub start: bool,
}

impl PlayerInput {
    /// Current axes and latched triggers; clears the triggers.
    pub fn take_frame(&mut self) -> InputFrame {
        InputFrame {
            rotate: self.rotate,
            thrust: self.thrust,
            fire: std::mem::take(&mut self.fire),
            laser: std::mem::take(&mut self.laser),
        }
    }

    pub fn take_start(&mut self) -> bool {
        std::mem::take(&mut self.start)
    }
}

fn any_pressed(keys: &ButtonInput<KeyCode>, codes: &[KeyCode]) -> bool {
    codes.iter().any(|&k| keys.pressed(k))
}

fn any_just_pressed(keys: &ButtonInput<KeyCode>, codes: &[KeyCode]) -> bool {
    codes.iter().any(|&k| keys.just_pressed(k))
}

/// A/D or arrows rotate, W/Up thrusts, Space fires, L/Shift fires the laser,
/// Enter starts. No keyboard resource (headless) means no input.
pub fn gather_input(keys: Option<Res<ButtonInput<KeyCode>>>, mut input: ResMut<PlayerInput>) {
    let Some(keys) = keys else {
        return;
    };

    let mut rotate = 0.0;
    if any_pressed(&keys, &[KeyCode::KeyA, KeyCode::ArrowLeft]) {
        rotate += 1.0;
    }
    if any_pressed(&keys, &[KeyCode::KeyD, KeyCode::ArrowRight]) {
        rotate -= 1.0;
    }
    input.rotate = rotate;
    input.thrust = if any_pressed(&keys, &[KeyCode::KeyW, KeyCode::ArrowUp]) {
        1.0
    } else {
        0.0
    };

    input.fire |= any_just_pressed(&keys, &[KeyCode::Space]);
    input.laser |= any_just_pressed(&keys, &[KeyCode::KeyL, KeyCode::ShiftLeft, KeyCode::ShiftRight]);
    input.start |= any_just_pressed(&keys, &[KeyCode::Enter, KeyCode::NumpadEnter]);
}
