//! Global state machine.
//!
//! Mirrors the simulation session so render-only plugins can hook
//! `OnEnter` / `DespawnOnExit`. The session itself is the source of truth.

use bevy::prelude::*;

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, States, Default)]
pub enum GameState {
    #[default]
    Idle,
    Running,
}
