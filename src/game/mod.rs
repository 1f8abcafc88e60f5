//! Game composition root.
//!
//! Provides two public configuration functions:
//! - `configure_full`: includes DefaultPlugins (window/render) + game plugins.
//! - `configure_headless`: minimal configuration for integration tests.

use bevy::prelude::*;
use bevy::window::WindowResolution;

use crate::common::config::{DEFAULT_CONFIG_PATH, GameConfig};
use crate::common::state::GameState;
use crate::plugins;

pub fn run() {
    App::new().add_plugins(configure_full).run();
}

/// Full configuration for `cargo run`.
///
/// The config is loaded before the window so the window matches the
/// playfield.
pub fn configure_full(app: &mut App) {
    let cfg = GameConfig::load_or_default(DEFAULT_CONFIG_PATH);
    let (width, height) = (cfg.playfield.width as u32, cfg.playfield.height as u32);

    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: "Rock Drift".into(),
            resolution: WindowResolution::new(width, height),
            ..default()
        }),
        ..default()
    }));
    app.insert_resource(cfg);

    configure_game(app);
    plugins::register_render(app);
}

/// Headless configuration for integration tests.
///
/// Notes:
/// - Do NOT add DefaultPlugins.
/// - Do NOT add render-only plugins (Firefly/camera).
/// - Insert a `GameConfig` first to override `assets/game.toml`.
pub fn configure_headless(app: &mut App) {
    configure_game(app);
}

/// Configuration shared by both full and headless apps.
fn configure_game(app: &mut App) {
    app.init_state::<GameState>();
    plugins::register_gameplay(app);
}
