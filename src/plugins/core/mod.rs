//! Core plugin: shared resources and global settings.

use bevy::prelude::*;

use crate::common::config::{DEFAULT_CONFIG_PATH, GameConfig};

pub fn plugin(app: &mut App) {
    if !app.world().contains_resource::<GameConfig>() {
        app.insert_resource(GameConfig::load_or_default(DEFAULT_CONFIG_PATH));
    }
    app.insert_resource(ClearColor(Color::srgb(0.02, 0.02, 0.05)));
}
