//! Integration test harness.
//!
//! Keep integration tests headless:
//! - `MinimalPlugins` provides core ECS runtime.
//! - we then call `rock_drift::game::configure_headless` to install gameplay plugins.
//!
//! Time is stepped manually, one fixed step per `app.update()`, so the
//! simulation advances by a known `dt` regardless of wall-clock speed.

#![allow(dead_code)]

use std::time::Duration;

use bevy::asset::AssetPlugin;
use bevy::prelude::*;
use bevy::scene::ScenePlugin;
use bevy::state::app::StatesPlugin;
use bevy::time::TimeUpdateStrategy;
use rock_drift::common::config::GameConfig;

/// One fixed step: 1/64 s.
pub const STEP: Duration = Duration::from_micros(15_625);

pub fn app_headless() -> App {
    app_with_config(GameConfig::default())
}

/// Headless app using `cfg` instead of `assets/game.toml`.
pub fn app_with_config(cfg: GameConfig) -> App {
    let mut app = App::new();

    // Add AssetPlugin + ScenePlugin so SceneSpawner exists.
    app.add_plugins((
        MinimalPlugins,
        StatesPlugin,
        AssetPlugin::default(),
        ScenePlugin,
    ));
    app.insert_resource(TimeUpdateStrategy::ManualDuration(STEP));
    app.insert_resource(Time::<Fixed>::from_duration(STEP));
    app.insert_resource(cfg);

    rock_drift::game::configure_headless(&mut app);
    // `App::run` is never called, so complete plugin setup by hand.
    app.finish();
    app.cleanup();
    app
}

pub fn step(app: &mut App, frames: usize) {
    for _ in 0..frames {
        app.update();
    }
}

/// Step until `done` holds, at most `max_frames` frames. Returns whether it held.
pub fn step_until(app: &mut App, max_frames: usize, mut done: impl FnMut(&mut App) -> bool) -> bool {
    for _ in 0..max_frames {
        app.update();
        if done(app) {
            return true;
        }
    }
    false
}
