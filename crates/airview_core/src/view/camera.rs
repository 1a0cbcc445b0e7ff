//! Pose-derived view camera
//!
//! Recomputed every frame from the viewpoint model's pose; stateless
//! between frames apart from the last-computed view transform and the
//! cached world-space eye position that lighting and camera-relative
//! entities read.

use crate::foundation::math::{Mat4, Vec3};
use crate::view::viewpoint::Pose;
use nalgebra::{Point3, Rotation3};

/// Derives the view transform from the current viewer pose.
#[derive(Debug, Clone)]
pub struct Camera {
    eye: Vec3,
    view: Mat4,
}

impl Camera {
    /// Create a camera at the default pose.
    pub fn new() -> Self {
        let mut camera = Self {
            eye: Vec3::zeros(),
            view: Mat4::identity(),
        };
        camera.set_pose(&Pose::default());
        camera
    }

    /// Recompute the view transform from the given pose.
    ///
    /// Pitch rotates about X, yaw about Y, roll about Z, the same axes
    /// the viewpoint model integrates, so view direction and movement
    /// direction stay consistent.
    pub fn set_pose(&mut self, pose: &Pose) {
        let rotation = Rotation3::from_axis_angle(&Vec3::y_axis(), pose.yaw())
            * Rotation3::from_axis_angle(&Vec3::x_axis(), pose.pitch())
            * Rotation3::from_axis_angle(&Vec3::z_axis(), pose.roll());
        let forward = rotation * Vec3::z();
        let up = rotation * Vec3::y();
        let eye = pose.position;

        self.view = Mat4::look_at_rh(&Point3::from(eye), &Point3::from(eye + forward), &up);
        self.eye = eye;
    }

    /// The last-computed view transform.
    pub fn view_transform(&self) -> Mat4 {
        self.view
    }

    /// World-space eye position as of the last [`set_pose`](Self::set_pose).
    pub fn eye_position(&self) -> Vec3 {
        self.eye
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_view_transform_places_eye_at_origin() {
        let mut camera = Camera::new();
        let pose = Pose {
            position: Vec3::new(3.0, -2.0, 7.5),
            orientation: Vec3::new(0.3, 1.2, 0.0),
        };
        camera.set_pose(&pose);
        let mapped = camera
            .view_transform()
            .transform_point(&Point3::from(pose.position));
        assert_relative_eq!(mapped, Point3::origin(), epsilon = 1e-5);
    }

    #[test]
    fn test_view_direction_matches_yaw() {
        // With a quarter turn of yaw the facing is +X; the point one unit
        // ahead must land one unit down the view axis (-Z in view space).
        let mut camera = Camera::new();
        let pose = Pose {
            position: Vec3::new(0.0, 0.0, 0.0),
            orientation: Vec3::new(0.0, std::f32::consts::FRAC_PI_2, 0.0),
        };
        camera.set_pose(&pose);
        let ahead = camera
            .view_transform()
            .transform_point(&Point3::new(1.0, 0.0, 0.0));
        assert_relative_eq!(ahead, Point3::new(0.0, 0.0, -1.0), epsilon = 1e-5);
    }

    #[test]
    fn test_eye_position_tracks_pose() {
        let mut camera = Camera::new();
        let pose = Pose {
            position: Vec3::new(-4.0, 12.0, 0.5),
            orientation: Vec3::zeros(),
        };
        camera.set_pose(&pose);
        assert_eq!(camera.eye_position(), pose.position);
    }

    #[test]
    fn test_zero_pose_looks_down_positive_z() {
        let mut camera = Camera::new();
        camera.set_pose(&Pose::default());
        let ahead = camera
            .view_transform()
            .transform_point(&Point3::new(0.0, 0.0, 5.0));
        assert_relative_eq!(ahead, Point3::new(0.0, 0.0, -5.0), epsilon = 1e-5);
    }
}
