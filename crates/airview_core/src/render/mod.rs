//! Rendering contracts
//!
//! Narrow interfaces the orchestration core uses to reach its graphics
//! collaborators: the device (clear/present plus its base transforms), the
//! two-technique shading dispatcher, and the asset provider that turns
//! manifest paths into drawable handles. Implementations live outside
//! this crate; the demo app ships headless ones and the engine tests use
//! mocks.

pub mod lighting;

use crate::foundation::math::{Mat4, Vec3};
use self::lighting::LightDescriptor;
use std::path::Path;
use thiserror::Error;

/// Handle to a mesh drawable owned by the asset/device layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DrawableHandle(pub u64);

/// Handle to a texture owned by the asset/device layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureHandle(pub u64);

/// Everything the dispatcher needs to draw one loaded model.
#[derive(Debug, Clone, Copy)]
pub struct ModelHandle {
    /// Opaque drawable (vertex/index buffers) reference
    pub drawable: DrawableHandle,
    /// Number of indices to submit
    pub index_count: u32,
    /// Texture bound for the draw
    pub texture: TextureHandle,
}

/// World/view/projection bundle for one draw dispatch.
#[derive(Debug, Clone, Copy)]
pub struct TransformBundle {
    /// Per-entity world transform for this frame
    pub world: Mat4,
    /// Camera view transform
    pub view: Mat4,
    /// Device projection transform
    pub projection: Mat4,
}

/// Graphics device failures.
#[derive(Error, Debug)]
pub enum DeviceError {
    /// Clearing/opening the frame failed
    #[error("failed to begin frame: {0}")]
    BeginFrame(String),

    /// Presenting the completed frame failed
    #[error("failed to present frame: {0}")]
    Present(String),
}

/// Draw dispatch failures.
///
/// The only data-dependent failure in the steady-state render path; any
/// occurrence aborts the rest of the frame's submissions.
#[derive(Error, Debug)]
pub enum DispatchError {
    /// A device resource backing the draw is gone
    #[error("missing device resource: {0}")]
    MissingResource(String),

    /// The draw submission itself failed
    #[error("draw submission failed: {0}")]
    Submission(String),
}

/// Asset provider failures. Fatal during scene setup.
#[derive(Error, Debug)]
pub enum AssetError {
    /// The mesh file could not be loaded
    #[error("failed to load mesh {path}: {reason}")]
    Mesh {
        /// Offending mesh path
        path: String,
        /// Loader diagnostic
        reason: String,
    },

    /// The texture file could not be loaded
    #[error("failed to load texture {path}: {reason}")]
    Texture {
        /// Offending texture path
        path: String,
        /// Loader diagnostic
        reason: String,
    },
}

/// Graphics device contract: frame open/close and base transforms.
pub trait GraphicsDevice {
    /// Clear the back buffer and open the frame.
    fn begin_frame(&mut self, clear_color: [f32; 4]) -> Result<(), DeviceError>;

    /// Present the completed frame.
    fn end_frame(&mut self) -> Result<(), DeviceError>;

    /// The device's base world transform, composed under every entity
    /// transform (identity unless the backend says otherwise).
    fn base_world(&self) -> Mat4;

    /// The device's projection transform.
    fn projection(&self) -> Mat4;
}

/// Two-technique shading dispatch contract.
///
/// One call per entity per frame; both techniques report success or
/// failure and a failure propagates without retry.
pub trait ShadingDispatch {
    /// Textured draw with no lighting applied.
    fn submit_unlit_textured(
        &mut self,
        model: &ModelHandle,
        transforms: &TransformBundle,
    ) -> Result<(), DispatchError>;

    /// Phong-lit textured draw. Takes the full light bundle plus the
    /// camera eye position for the specular half-vector.
    fn submit_lit_phong(
        &mut self,
        model: &ModelHandle,
        transforms: &TransformBundle,
        light: &LightDescriptor,
        eye_position: Vec3,
    ) -> Result<(), DispatchError>;
}

/// Asset provider contract, consumed only during scene setup.
pub trait AssetProvider {
    /// Load a mesh + texture pair, yielding a drawable model handle.
    ///
    /// The provider keeps ownership of the underlying resources; handles
    /// stay valid until the provider itself is torn down.
    fn load_model(
        &mut self,
        mesh_path: &Path,
        texture_path: &Path,
    ) -> Result<ModelHandle, AssetError>;
}
