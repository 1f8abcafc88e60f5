//! Runtime game configuration loaded from `assets/game.toml`.
//!
//! [`GameConfig`] is split per concern (movement, bounds, shooting, laser,
//! asteroids, enemies, scores) so each controller only sees the section it
//! needs. Every section implements `Default`; a TOML file can override any
//! subset of keys and the rest keep their compiled defaults.
//!
//! ```toml
//! [laser]
//! start_charges = 5
//!
//! [score]
//! enemy = 50
//! ```
//!
//! Values are range-checked once by [`GameConfig::validate`]. Controllers
//! assume a validated config and do not re-check.

use std::path::Path;

use bevy::prelude::*;
use serde::Deserialize;

use super::error::{
    require_non_negative, require_positive, require_range, ConfigError, ConfigResult,
};

pub const DEFAULT_CONFIG_PATH: &str = "assets/game.toml";

/// Upper bound shared by both screen-bounds thresholds (normalized viewport units).
pub const MAX_BOUNDS_THRESHOLD: f32 = 0.2;

#[derive(Resource, Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Seed for the simulation RNG (spawn positions, drift directions).
    pub seed: u64,
    pub playfield: PlayfieldConfig,
    pub bounds: BoundsConfig,
    pub player: PlayerMovementConfig,
    pub projectile: ShootingConfig,
    pub laser: LaserConfig,
    pub asteroid: AsteroidConfig,
    pub enemy: EnemyConfig,
    pub score: ScoreConfig,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            seed: 0x5EED_D21F,
            playfield: PlayfieldConfig::default(),
            bounds: BoundsConfig::default(),
            player: PlayerMovementConfig::default(),
            projectile: ShootingConfig::default(),
            laser: LaserConfig::default(),
            asteroid: AsteroidConfig::default(),
            enemy: EnemyConfig::default(),
            score: ScoreConfig::default(),
        }
    }
}

/// Size of the visible playfield in world units, centred on the origin.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct PlayfieldConfig {
    pub width: f32,
    pub height: f32,
}

impl Default for PlayfieldConfig {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 720.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct BoundsConfig {
    /// Normalized distance from an edge at which an entity wraps.
    pub screen_bounds_threshold: f32,
    /// Normalized overshoot added on wrap. Should exceed the threshold,
    /// otherwise a wrapped entity can land inside the opposite wrap zone.
    pub teleport_threshold: f32,
}

impl Default for BoundsConfig {
    fn default() -> Self {
        Self {
            screen_bounds_threshold: 0.02,
            teleport_threshold: 0.04,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct PlayerMovementConfig {
    pub start_position: [f32; 2],
    /// Units per second², applied scaled by thrust input.
    pub forward_acceleration: f32,
    /// Units per second², always applied (passive drag).
    pub deceleration: f32,
    /// Degrees per second at full rotation input.
    pub rotate_speed: f32,
    pub max_speed: f32,
    pub collision_radius: f32,
}

impl Default for PlayerMovementConfig {
    fn default() -> Self {
        Self {
            start_position: [0.0, 0.0],
            forward_acceleration: 420.0,
            deceleration: 120.0,
            rotate_speed: 220.0,
            max_speed: 420.0,
            collision_radius: 14.0,
        }
    }
}

impl PlayerMovementConfig {
    #[inline]
    pub fn start(&self) -> Vec2 {
        Vec2::from_array(self.start_position)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct ShootingConfig {
    pub speed: f32,
    /// Seconds before an unhit projectile is recycled.
    pub lifetime: f32,
    pub radius: f32,
    pub pool_size: usize,
}

impl Default for ShootingConfig {
    fn default() -> Self {
        Self {
            speed: 720.0,
            lifetime: 1.2,
            radius: 3.0,
            pool_size: 32,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct LaserConfig {
    /// Seconds the beam stays active after a shot.
    pub duration: f32,
    pub length: f32,
    /// Seconds to restore one charge.
    pub charge_cooldown: f32,
    /// Charges at game start; also the maximum.
    pub start_charges: u32,
}

impl Default for LaserConfig {
    fn default() -> Self {
        Self {
            duration: 0.35,
            length: 520.0,
            charge_cooldown: 5.0,
            start_charges: 3,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct AsteroidConfig {
    pub spawn_period: f32,
    pub speed: f32,
    pub scale: f32,
    /// Collider radius at scale 1.
    pub radius: f32,
    pub minis_per_asteroid: u32,
    pub mini_speed: f32,
    pub mini_scale: f32,
    /// Views pre-created for big asteroids.
    pub pool_size: usize,
    pub mini_pool_size: usize,
}

impl Default for AsteroidConfig {
    fn default() -> Self {
        Self {
            spawn_period: 1.5,
            speed: 90.0,
            scale: 1.0,
            radius: 28.0,
            minis_per_asteroid: 3,
            mini_speed: 140.0,
            mini_scale: 0.45,
            pool_size: 16,
            mini_pool_size: 24,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct EnemyConfig {
    pub spawn_period: f32,
    pub speed: f32,
    pub radius: f32,
    pub pool_size: usize,
}

impl Default for EnemyConfig {
    fn default() -> Self {
        Self {
            spawn_period: 4.0,
            speed: 110.0,
            radius: 14.0,
            pool_size: 8,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ScoreConfig {
    pub asteroid: u32,
    pub mini_asteroid: u32,
    pub enemy: u32,
}

impl Default for ScoreConfig {
    fn default() -> Self {
        Self {
            asteroid: 10,
            mini_asteroid: 5,
            enemy: 25,
        }
    }
}

impl GameConfig {
    /// Range-check every tunable.
    pub fn validate(&self) -> ConfigResult<()> {
        require_positive("playfield.width", self.playfield.width)?;
        require_positive("playfield.height", self.playfield.height)?;

        require_range(
            "bounds.screen_bounds_threshold",
            self.bounds.screen_bounds_threshold,
            0.0,
            MAX_BOUNDS_THRESHOLD,
            "[0, 0.2]",
        )?;
        require_range(
            "bounds.teleport_threshold",
            self.bounds.teleport_threshold,
            0.0,
            MAX_BOUNDS_THRESHOLD,
            "[0, 0.2]",
        )?;
        if self.bounds.teleport_threshold < self.bounds.screen_bounds_threshold {
            // Allowed, but wrapped entities may bounce between edges.
            warn!(
                "bounds.teleport_threshold ({}) is below bounds.screen_bounds_threshold ({})",
                self.bounds.teleport_threshold, self.bounds.screen_bounds_threshold
            );
        }

        let [x, y] = self.player.start_position;
        if !x.is_finite() || !y.is_finite() {
            return Err(ConfigError::OutOfRange {
                name: "player.start_position",
                value: if x.is_finite() { y } else { x },
                expected: "finite coordinates",
            });
        }
        require_non_negative("player.forward_acceleration", self.player.forward_acceleration)?;
        require_non_negative("player.deceleration", self.player.deceleration)?;
        require_non_negative("player.rotate_speed", self.player.rotate_speed)?;
        require_non_negative("player.max_speed", self.player.max_speed)?;
        require_positive("player.collision_radius", self.player.collision_radius)?;

        require_non_negative("projectile.speed", self.projectile.speed)?;
        require_positive("projectile.lifetime", self.projectile.lifetime)?;
        require_positive("projectile.radius", self.projectile.radius)?;

        require_non_negative("laser.duration", self.laser.duration)?;
        require_non_negative("laser.length", self.laser.length)?;
        require_positive("laser.charge_cooldown", self.laser.charge_cooldown)?;

        require_positive("asteroid.spawn_period", self.asteroid.spawn_period)?;
        require_non_negative("asteroid.speed", self.asteroid.speed)?;
        require_positive("asteroid.scale", self.asteroid.scale)?;
        require_positive("asteroid.radius", self.asteroid.radius)?;
        require_non_negative("asteroid.mini_speed", self.asteroid.mini_speed)?;
        require_positive("asteroid.mini_scale", self.asteroid.mini_scale)?;

        require_positive("enemy.spawn_period", self.enemy.spawn_period)?;
        require_non_negative("enemy.speed", self.enemy.speed)?;
        require_positive("enemy.radius", self.enemy.radius)?;

        Ok(())
    }

    /// Parse a TOML document and validate the result.
    pub fn from_toml_str(path: &Path, contents: &str) -> ConfigResult<Self> {
        let config: GameConfig = toml::from_str(contents).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load `path`. `Ok(None)` means the file does not exist.
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Option<Self>> {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(contents) => Self::from_toml_str(path, &contents).map(Some),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(ConfigError::Io {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    /// Load `path`, falling back to compiled defaults on any problem.
    ///
    /// A missing file is normal; parse and range errors are logged.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::load(path) {
            Ok(Some(config)) => {
                info!("loaded game config from {}", path.display());
                config
            }
            Ok(None) => {
                debug!("no {} found; using compiled defaults", path.display());
                Self::default()
            }
            Err(e) => {
                error!("{e}; using compiled defaults");
                Self::default()
            }
        }
    }
}
