//! Viewer pose and camera derivation

pub mod camera;
pub mod viewpoint;

pub use camera::Camera;
pub use viewpoint::{Pose, ViewpointModel};
