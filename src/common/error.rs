//! Configuration error types.
//!
//! The simulation never fails across component boundaries for expected
//! conditions (a projectile expiring, a miss, a signal nobody listens to).
//! The only fallible boundary is loading and validating [`GameConfig`].
//!
//! [`GameConfig`]: crate::common::config::GameConfig

use std::fmt;
use std::path::PathBuf;

#[derive(Debug)]
pub enum ConfigError {
    /// A numeric tunable is outside the range the simulation supports.
    OutOfRange {
        /// Dotted TOML key, e.g. `bounds.teleport_threshold`.
        name: &'static str,
        value: f32,
        /// Human-readable description of the accepted range.
        expected: &'static str,
    },

    /// The config file exists but could not be read.
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The config file is not valid TOML for [`GameConfig`](crate::common::config::GameConfig).
    Parse { path: PathBuf, message: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::OutOfRange {
                name,
                value,
                expected,
            } => write!(f, "'{name}' = {value} is outside the accepted range {expected}"),
            ConfigError::Io { path, source } => {
                write!(f, "failed to read {}: {source}", path.display())
            }
            ConfigError::Parse { path, message } => {
                write!(f, "failed to parse {}: {message}", path.display())
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

pub type ConfigResult<T> = Result<T, ConfigError>;

pub(crate) fn require_range(
    name: &'static str,
    value: f32,
    min: f32,
    max: f32,
    expected: &'static str,
) -> ConfigResult<()> {
    if value.is_finite() && (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange {
            name,
            value,
            expected,
        })
    }
}

pub(crate) fn require_non_negative(name: &'static str, value: f32) -> ConfigResult<()> {
    require_range(name, value, 0.0, f32::MAX, "[0, ∞)")
}

pub(crate) fn require_positive(name: &'static str, value: f32) -> ConfigResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange {
            name,
            value,
            expected: "(0, ∞)",
        })
    }
}
