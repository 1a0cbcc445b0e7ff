//! Scene entity types
//!
//! An entity is one renderable of the fixed roster: a model handle, a
//! placement, a motion policy, and a shading technique. All fields are
//! immutable after registration; the per-frame world transform is never
//! stored, it is recomputed in [`crate::scene::motion`].

use crate::foundation::math::{Axis, Vec3};
use crate::render::ModelHandle;
use serde::{Deserialize, Serialize};

/// How an entity's world transform evolves per frame.
#[derive(Debug, Clone, PartialEq)]
pub enum MotionPolicy {
    /// Fixed in the world.
    Static,

    /// Circles the axis through the world origin, anchored at the entity's
    /// base offset.
    Orbiting {
        /// Orbit axis
        axis: Axis,
        /// Radians per second of simulated time
        angular_rate: f32,
        /// Displacement applied after the orbit rotation
        orbit_offset: Vec3,
    },

    /// Pinned to the camera eye each frame, spinning in place.
    CameraFollow {
        /// Extra height above the eye
        vertical_offset: f32,
        /// Spin axis
        axis: Axis,
        /// Radians per second of in-place spin (0 disables the spin)
        angular_rate: f32,
    },
}

/// Which GPU dispatch path draws an entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShadingTechnique {
    /// Textured, no lighting
    UnlitTextured,
    /// Textured with directional Phong lighting
    LitPhong,
}

/// One renderable of the fixed scene roster.
#[derive(Debug, Clone)]
pub struct SceneEntity {
    /// Manifest identifier, unique within the roster
    pub name: String,
    /// Drawable handle from the asset provider
    pub model: ModelHandle,
    /// Per-axis scale
    pub scale: Vec3,
    /// Base translation (the orbit anchor for orbiting entities)
    pub offset: Vec3,
    /// Motion policy, fixed at registration
    pub policy: MotionPolicy,
    /// Shading technique, fixed at registration
    pub technique: ShadingTechnique,
}
