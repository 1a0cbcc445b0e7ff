//! Scene illumination state
//!
//! One global directional light, configured at startup and read by every
//! lit-Phong dispatch. The orchestrator never mutates it after setup.

use crate::config::LightConfig;
use crate::foundation::math::{Vec3, Vec4};

/// Directional light parameter bundle for Phong shading.
#[derive(Debug, Clone, PartialEq)]
pub struct LightDescriptor {
    /// Direction the light travels
    pub direction: Vec3,
    /// Ambient color (RGBA)
    pub ambient: Vec4,
    /// Diffuse color (RGBA)
    pub diffuse: Vec4,
    /// Specular color (RGBA)
    pub specular: Vec4,
    /// Specular exponent; higher is a tighter highlight
    pub specular_power: f32,
}

impl LightDescriptor {
    /// Neutral daylight: dim ambient, full white diffuse and specular,
    /// light travelling down +Z, tight highlight.
    pub fn daylight() -> Self {
        Self {
            direction: Vec3::new(0.0, 0.0, 1.0),
            ambient: Vec4::new(0.15, 0.15, 0.15, 1.0),
            diffuse: Vec4::new(1.0, 1.0, 1.0, 1.0),
            specular: Vec4::new(1.0, 1.0, 1.0, 1.0),
            specular_power: 64.0,
        }
    }

    /// Replace the light direction.
    pub fn with_direction(mut self, direction: Vec3) -> Self {
        self.direction = direction;
        self
    }

    /// Replace the ambient color.
    pub fn with_ambient(mut self, ambient: Vec4) -> Self {
        self.ambient = ambient;
        self
    }

    /// Replace the diffuse color.
    pub fn with_diffuse(mut self, diffuse: Vec4) -> Self {
        self.diffuse = diffuse;
        self
    }

    /// Replace the specular color and exponent.
    pub fn with_specular(mut self, specular: Vec4, power: f32) -> Self {
        self.specular = specular;
        self.specular_power = power;
        self
    }
}

impl Default for LightDescriptor {
    fn default() -> Self {
        Self::daylight()
    }
}

impl From<&LightConfig> for LightDescriptor {
    fn from(config: &LightConfig) -> Self {
        Self {
            direction: Vec3::from(config.direction),
            ambient: Vec4::from(config.ambient),
            diffuse: Vec4::from(config.diffuse),
            specular: Vec4::from(config.specular),
            specular_power: config.specular_power,
        }
    }
}
