//! Per-policy world transform computation
//!
//! An entity's world transform is a pure function of its motion policy,
//! the clock value, and the camera eye position; nothing is cached
//! between frames. Each policy maps to a fixed, ordered list of
//! elementary transforms; the ordering is part of the contract and the
//! tests below pin it down.

use crate::foundation::math::{compose, Mat4, TransformStep, Vec3};
use crate::scene::entity::{MotionPolicy, SceneEntity};

/// The ordered elementary-transform list for one entity at one instant.
///
/// Static entities scale, then translate to their base offset. Orbiting
/// entities additionally rotate about the orbit axis (angle grows with
/// the clock) and then displace by the orbit offset. Camera-follow
/// entities spin in model space first so that the translation that
/// follows pins their center exactly to the eye position.
pub fn transform_steps(entity: &SceneEntity, elapsed: f32, eye: Vec3) -> Vec<TransformStep> {
    match &entity.policy {
        MotionPolicy::Static => vec![
            TransformStep::Scale(entity.scale),
            TransformStep::Translate(entity.offset),
        ],
        MotionPolicy::Orbiting {
            axis,
            angular_rate,
            orbit_offset,
        } => vec![
            TransformStep::Scale(entity.scale),
            TransformStep::Translate(entity.offset),
            TransformStep::RotateAxis(*axis, angular_rate * elapsed),
            TransformStep::Translate(*orbit_offset),
        ],
        MotionPolicy::CameraFollow {
            vertical_offset,
            axis,
            angular_rate,
        } => vec![
            TransformStep::RotateAxis(*axis, angular_rate * elapsed),
            TransformStep::Translate(eye + Vec3::new(0.0, *vertical_offset, 0.0)),
        ],
    }
}

/// World transform for one entity at the given clock value.
pub fn world_transform(entity: &SceneEntity, elapsed: f32, eye: Vec3) -> Mat4 {
    compose(&transform_steps(entity, elapsed, eye))
}
