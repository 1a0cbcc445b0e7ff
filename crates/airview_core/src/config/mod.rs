//! Configuration loading
//!
//! Viewer tuning lives in TOML, the scene manifest in RON; both load
//! through the same extension-dispatched [`Config`] trait.

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The file could not be read
    #[error("failed to read {path}: {source}")]
    Read {
        /// Offending path
        path: String,
        /// Underlying IO error
        source: std::io::Error,
    },

    /// The file could not be written
    #[error("failed to write {path}: {source}")]
    Write {
        /// Offending path
        path: String,
        /// Underlying IO error
        source: std::io::Error,
    },

    /// The file contents did not parse
    #[error("failed to parse {path}: {reason}")]
    Parse {
        /// Offending path
        path: String,
        /// Parser diagnostic
        reason: String,
    },

    /// The value could not be serialized
    #[error("failed to serialize for {path}: {reason}")]
    Serialize {
        /// Offending path
        path: String,
        /// Serializer diagnostic
        reason: String,
    },

    /// The file extension maps to no known format
    #[error("unsupported config format: {0}")]
    UnsupportedFormat(String),
}

fn extension(path: &Path) -> Option<&str> {
    path.extension().and_then(|ext| ext.to_str())
}

/// Extension-dispatched config file loading and saving.
///
/// `.toml` and `.ron` are recognized; anything else is an error rather
/// than a guess.
pub trait Config: Serialize + DeserializeOwned {
    /// Load a value of this type from `path`.
    fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        match extension(path) {
            Some("toml") => toml::from_str(&text).map_err(|err| ConfigError::Parse {
                path: path.display().to_string(),
                reason: err.to_string(),
            }),
            Some("ron") => ron::from_str(&text).map_err(|err| ConfigError::Parse {
                path: path.display().to_string(),
                reason: err.to_string(),
            }),
            _ => Err(ConfigError::UnsupportedFormat(path.display().to_string())),
        }
    }

    /// Save this value to `path`, format chosen by extension.
    fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let text = match extension(path) {
            Some("toml") => toml::to_string_pretty(self).map_err(|err| ConfigError::Serialize {
                path: path.display().to_string(),
                reason: err.to_string(),
            })?,
            Some("ron") => ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
                .map_err(|err| ConfigError::Serialize {
                    path: path.display().to_string(),
                    reason: err.to_string(),
                })?,
            _ => return Err(ConfigError::UnsupportedFormat(path.display().to_string())),
        };
        std::fs::write(path, text).map_err(|source| ConfigError::Write {
            path: path.display().to_string(),
            source,
        })
    }
}

/// Motion integration rates.
///
/// Linear rates are world units per second, angular rates radians per
/// second. Each discrete motion command integrates `rate * dt` while its
/// key is held.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MotionRates {
    /// Forward/backward speed
    pub move_speed: f32,
    /// Climb/descend speed
    pub vertical_speed: f32,
    /// Yaw rate for turn-left/turn-right
    pub turn_rate: f32,
    /// Pitch rate for look-up/look-down
    pub look_rate: f32,
}

impl Default for MotionRates {
    fn default() -> Self {
        Self {
            move_speed: 4.0,
            vertical_speed: 3.0,
            turn_rate: std::f32::consts::FRAC_PI_2,
            look_rate: std::f32::consts::FRAC_PI_3,
        }
    }
}

/// Startup pose in config form.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StartPose {
    /// Initial world position (x, y, z)
    pub position: [f32; 3],
    /// Initial orientation (pitch, yaw, roll) in radians
    pub orientation: [f32; 3],
}

impl Default for StartPose {
    fn default() -> Self {
        Self {
            position: [0.0, 0.0, -10.0],
            orientation: [0.0; 3],
        }
    }
}

/// Global directional light in config form.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LightConfig {
    /// Light direction
    pub direction: [f32; 3],
    /// Ambient color (RGBA)
    pub ambient: [f32; 4],
    /// Diffuse color (RGBA)
    pub diffuse: [f32; 4],
    /// Specular color (RGBA)
    pub specular: [f32; 4],
    /// Specular exponent
    pub specular_power: f32,
}

impl Default for LightConfig {
    fn default() -> Self {
        Self {
            direction: [0.0, 0.0, 1.0],
            ambient: [0.15, 0.15, 0.15, 1.0],
            diffuse: [1.0, 1.0, 1.0, 1.0],
            specular: [1.0, 1.0, 1.0, 1.0],
            specular_power: 64.0,
        }
    }
}

/// Viewer tuning loaded at startup.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    /// Back-buffer clear color (RGBA)
    pub clear_color: [f32; 4],
    /// Motion command rates
    pub motion: MotionRates,
    /// Startup viewpoint
    pub start: StartPose,
    /// Global light parameters
    pub light: LightConfig,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            clear_color: [0.0, 0.0, 0.0, 1.0],
            motion: MotionRates::default(),
            start: StartPose::default(),
            light: LightConfig::default(),
        }
    }
}

impl Config for ViewerConfig {}
