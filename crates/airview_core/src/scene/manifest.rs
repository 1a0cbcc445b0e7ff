//! Scene manifest schema
//!
//! The roster is data-driven: a RON (or TOML) file maps entity names to
//! asset paths, placement, motion policy, and shading technique. The
//! schema types here stay plain serde structs; [`crate::scene::registry`]
//! converts them into runtime entities with nalgebra math types.

use crate::config::Config;
use crate::foundation::math::{Unit, Vec3};
use crate::scene::entity::{MotionPolicy, ShadingTechnique};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// xyz triple in manifest form.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Triple {
    /// x component
    pub x: f32,
    /// y component
    pub y: f32,
    /// z component
    pub z: f32,
}

impl Triple {
    /// All-ones triple, the default scale.
    pub fn one() -> Self {
        Self {
            x: 1.0,
            y: 1.0,
            z: 1.0,
        }
    }

    /// The +Y axis, the default spin/orbit axis.
    pub fn unit_y() -> Self {
        Self {
            x: 0.0,
            y: 1.0,
            z: 0.0,
        }
    }
}

impl Default for Triple {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            z: 0.0,
        }
    }
}

impl From<Triple> for Vec3 {
    fn from(triple: Triple) -> Self {
        Vec3::new(triple.x, triple.y, triple.z)
    }
}

/// Motion policy in manifest form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum PolicySpec {
    /// Fixed in the world
    Static,

    /// Orbit around an axis at a fixed angular rate
    Orbiting {
        /// Orbit axis (normalized on conversion)
        #[serde(default = "Triple::unit_y")]
        axis: Triple,
        /// Radians per second
        angular_rate: f32,
        /// Displacement applied after the orbit rotation
        #[serde(default)]
        orbit_offset: Triple,
    },

    /// Track the camera eye with an optional in-place spin
    CameraFollow {
        /// Extra height above the eye
        vertical_offset: f32,
        /// Spin axis (normalized on conversion)
        #[serde(default = "Triple::unit_y")]
        axis: Triple,
        /// Radians per second, 0 for no spin
        #[serde(default)]
        angular_rate: f32,
    },
}

impl From<&PolicySpec> for MotionPolicy {
    fn from(spec: &PolicySpec) -> Self {
        match spec {
            PolicySpec::Static => MotionPolicy::Static,
            PolicySpec::Orbiting {
                axis,
                angular_rate,
                orbit_offset,
            } => MotionPolicy::Orbiting {
                axis: Unit::new_normalize(Vec3::from(*axis)),
                angular_rate: *angular_rate,
                orbit_offset: Vec3::from(*orbit_offset),
            },
            PolicySpec::CameraFollow {
                vertical_offset,
                axis,
                angular_rate,
            } => MotionPolicy::CameraFollow {
                vertical_offset: *vertical_offset,
                axis: Unit::new_normalize(Vec3::from(*axis)),
                angular_rate: *angular_rate,
            },
        }
    }
}

/// One roster entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntityRecord {
    /// Unique entity identifier
    pub name: String,
    /// Mesh file path, resolved by the asset provider
    pub mesh: PathBuf,
    /// Texture file path, resolved by the asset provider
    pub texture: PathBuf,
    /// Per-axis scale
    #[serde(default = "Triple::one")]
    pub scale: Triple,
    /// Base translation
    #[serde(default)]
    pub offset: Triple,
    /// Motion policy
    pub policy: PolicySpec,
    /// Shading technique
    pub technique: ShadingTechnique,
}

/// The scene roster. Listing order is registration order is draw order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SceneManifest {
    /// Roster entries
    pub entities: Vec<EntityRecord>,
}

impl Config for SceneManifest {}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
        SceneManifest(
            entities: [
                EntityRecord(
                    name: "terrain",
                    mesh: "models/terrain.txt",
                    texture: "textures/grass.dds",
                    scale: (x: 10.0, y: 10.0, z: 10.5),
                    policy: Static,
                    technique: UnlitTextured,
                ),
                EntityRecord(
                    name: "airliner",
                    mesh: "models/airliner.txt",
                    texture: "textures/metal.dds",
                    offset: (x: -3.0, y: 0.0, z: 0.0),
                    policy: Orbiting(
                        axis: (x: 0.0, y: 1.0, z: 0.0),
                        angular_rate: 0.12,
                        orbit_offset: (x: -3.5, y: 10.0, z: 10.0),
                    ),
                    technique: LitPhong,
                ),
                EntityRecord(
                    name: "sky_dome",
                    mesh: "models/sky_dome.txt",
                    texture: "textures/clouds.dds",
                    policy: CameraFollow(vertical_offset: -0.25),
                    technique: UnlitTextured,
                ),
            ],
        )
    "#;

    #[test]
    fn test_manifest_parses_from_ron() {
        let manifest: SceneManifest = ron::from_str(SAMPLE).unwrap();
        assert_eq!(manifest.entities.len(), 3);
        assert_eq!(manifest.entities[0].name, "terrain");
        assert_eq!(manifest.entities[0].scale, Triple { x: 10.0, y: 10.0, z: 10.5 });
        // Unspecified scale falls back to one.
        assert_eq!(manifest.entities[1].scale, Triple::one());
    }

    #[test]
    fn test_policy_defaults_fill_in() {
        let manifest: SceneManifest = ron::from_str(SAMPLE).unwrap();
        let MotionPolicy::CameraFollow {
            vertical_offset,
            axis,
            angular_rate,
        } = MotionPolicy::from(&manifest.entities[2].policy)
        else {
            panic!("expected a camera-follow policy");
        };
        assert_eq!(vertical_offset, -0.25);
        assert_eq!(angular_rate, 0.0);
        assert_eq!(axis.into_inner(), Vec3::new(0.0, 1.0, 0.0));
    }

    #[test]
    fn test_orbit_axis_is_normalized() {
        let spec = PolicySpec::Orbiting {
            axis: Triple { x: 0.0, y: 2.0, z: 0.0 },
            angular_rate: 1.0,
            orbit_offset: Triple::default(),
        };
        let MotionPolicy::Orbiting { axis, .. } = MotionPolicy::from(&spec) else {
            panic!("expected an orbiting policy");
        };
        assert!((axis.into_inner().norm() - 1.0).abs() < 1e-6);
    }
}
