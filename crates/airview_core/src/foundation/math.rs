//! Math types and transform composition
//!
//! Fundamental math types for the viewer core, re-exported from nalgebra,
//! plus the elementary-transform machinery the motion policies build their
//! world matrices from.

pub use nalgebra::{Matrix4, Unit, Vector3, Vector4};

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// 4D vector type (homogeneous positions, RGBA colors)
pub type Vec4 = Vector4<f32>;

/// 4x4 matrix type
pub type Mat4 = Matrix4<f32>;

/// Unit-length rotation axis
pub type Axis = Unit<Vector3<f32>>;

/// Math constants
pub mod constants {
    /// Pi
    pub const PI: f32 = std::f32::consts::PI;

    /// Full turn (2π)
    pub const TAU: f32 = 2.0 * PI;
}

/// Wrap an angle in radians into `[0, 2π)`.
pub fn wrap_angle(angle: f32) -> f32 {
    angle.rem_euclid(constants::TAU)
}

/// One elementary stage of a world-transform composition.
///
/// A motion policy describes an entity's world transform as an ordered
/// list of these steps and [`compose`] folds the list into a matrix.
/// Keeping the steps explicit keeps the per-policy ordering auditable and
/// testable; the order is part of the policy contract, not a style choice.
#[derive(Debug, Clone, PartialEq)]
pub enum TransformStep {
    /// Non-uniform scale about the model origin.
    Scale(Vec3),
    /// Translation.
    Translate(Vec3),
    /// Rotation about an axis through the origin, angle in radians.
    RotateAxis(Axis, f32),
}

impl TransformStep {
    /// The 4x4 matrix for this single step.
    ///
    /// Rotation angles are reduced modulo 2π before matrix construction.
    /// Rotation matrices are 2π-periodic, so the reduction never changes
    /// the result, but it keeps long-running accumulated angles out of the
    /// trig evaluation.
    pub fn matrix(&self) -> Mat4 {
        match self {
            TransformStep::Scale(factors) => Mat4::new_nonuniform_scaling(factors),
            TransformStep::Translate(offset) => Mat4::new_translation(offset),
            TransformStep::RotateAxis(axis, angle) => {
                Mat4::from_axis_angle(axis, wrap_angle(*angle))
            }
        }
    }
}

/// Fold an ordered list of steps into a single matrix.
///
/// Steps apply in list order: the first entry acts on model-local
/// coordinates and each later entry acts on the result of everything
/// before it. With column vectors that means each successive step is
/// left-multiplied onto the accumulator.
pub fn compose(steps: &[TransformStep]) -> Mat4 {
    steps
        .iter()
        .fold(Mat4::identity(), |acc, step| step.matrix() * acc)
}

/// Right-handed perspective projection matrix.
pub fn perspective(fov_y: f32, aspect: f32, near: f32, far: f32) -> Mat4 {
    nalgebra::Perspective3::new(aspect, fov_y, near, far).to_homogeneous()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use nalgebra::Point3;

    #[test]
    fn test_compose_applies_steps_in_list_order() {
        let steps = [
            TransformStep::Scale(Vec3::new(2.0, 2.0, 2.0)),
            TransformStep::Translate(Vec3::new(1.0, 0.0, 0.0)),
        ];
        let matrix = compose(&steps);
        // Scale first, then translate: (1,0,0) -> (2,0,0) -> (3,0,0).
        let moved = matrix.transform_point(&Point3::new(1.0, 0.0, 0.0));
        assert_relative_eq!(moved, Point3::new(3.0, 0.0, 0.0), epsilon = 1e-6);

        let swapped = [
            TransformStep::Translate(Vec3::new(1.0, 0.0, 0.0)),
            TransformStep::Scale(Vec3::new(2.0, 2.0, 2.0)),
        ];
        let reversed = compose(&swapped);
        // Translate first, then scale: (1,0,0) -> (2,0,0) -> (4,0,0).
        let moved = reversed.transform_point(&Point3::new(1.0, 0.0, 0.0));
        assert_relative_eq!(moved, Point3::new(4.0, 0.0, 0.0), epsilon = 1e-6);
    }

    #[test]
    fn test_compose_of_empty_list_is_identity() {
        assert_eq!(compose(&[]), Mat4::identity());
    }

    #[test]
    fn test_rotation_step_is_full_turn_periodic() {
        let axis = Vec3::y_axis();
        let one = TransformStep::RotateAxis(axis, 1.25).matrix();
        let other = TransformStep::RotateAxis(axis, 1.25 + constants::TAU).matrix();
        assert_relative_eq!(one, other, epsilon = 1e-5);
    }

    #[test]
    fn test_wrap_angle_bounds() {
        assert_relative_eq!(wrap_angle(constants::TAU + 0.5), 0.5, epsilon = 1e-6);
        assert_relative_eq!(wrap_angle(-0.5), constants::TAU - 0.5, epsilon = 1e-6);
        assert!(wrap_angle(12345.678) < constants::TAU);
        assert!(wrap_angle(-12345.678) >= 0.0);
    }
}
