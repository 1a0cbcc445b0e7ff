//! Headless demo collaborators
//!
//! Stand-ins for the windowing, GPU, and asset backends: a scripted input
//! source, a device that logs clears and presents and supplies a real
//! perspective projection, a dispatcher that logs each draw, and an
//! in-memory asset catalog keyed by manifest path.

use airview_core::foundation::math::perspective;
use airview_core::prelude::*;
use std::collections::{HashMap, VecDeque};
use std::path::{Path, PathBuf};

/// Replays a fixed command script, one entry per frame, then requests
/// exit once the script runs dry.
pub struct ScriptedInput {
    frames: VecDeque<CommandSet>,
    current: CommandSet,
    exit: bool,
}

impl ScriptedInput {
    /// Build from a per-frame command list.
    pub fn new(frames: Vec<CommandSet>) -> Self {
        Self {
            frames: frames.into(),
            current: CommandSet::empty(),
            exit: false,
        }
    }
}

impl InputSource for ScriptedInput {
    fn poll(&mut self) -> Result<(), InputError> {
        match self.frames.pop_front() {
            Some(commands) => self.current = commands,
            None => {
                self.current = CommandSet::empty();
                self.exit = true;
            }
        }
        Ok(())
    }

    fn commands(&self) -> CommandSet {
        self.current
    }

    fn exit_requested(&self) -> bool {
        self.exit
    }
}

/// Device stand-in: logs frame boundaries and supplies the identity base
/// world plus a right-handed perspective projection.
pub struct HeadlessDevice {
    projection: Mat4,
    frames_presented: u32,
}

impl HeadlessDevice {
    /// Create a device with a 45-degree vertical field of view.
    pub fn new(aspect: f32) -> Self {
        Self {
            projection: perspective(45.0f32.to_radians(), aspect, 0.1, 1000.0),
            frames_presented: 0,
        }
    }

    /// Frames presented so far.
    pub fn frames_presented(&self) -> u32 {
        self.frames_presented
    }
}

impl GraphicsDevice for HeadlessDevice {
    fn begin_frame(&mut self, clear_color: [f32; 4]) -> Result<(), DeviceError> {
        log::trace!("begin frame, clear {clear_color:?}");
        Ok(())
    }

    fn end_frame(&mut self) -> Result<(), DeviceError> {
        self.frames_presented += 1;
        log::trace!("present (frame {})", self.frames_presented);
        Ok(())
    }

    fn base_world(&self) -> Mat4 {
        Mat4::identity()
    }

    fn projection(&self) -> Mat4 {
        self.projection
    }
}

/// Dispatcher stand-in: accepts every submission and logs it.
#[derive(Default)]
pub struct LoggingDispatch {
    draws: u64,
}

impl LoggingDispatch {
    /// Create a dispatcher with zero draws recorded.
    pub fn new() -> Self {
        Self::default()
    }

    /// Draws submitted so far.
    pub fn draws(&self) -> u64 {
        self.draws
    }
}

impl ShadingDispatch for LoggingDispatch {
    fn submit_unlit_textured(
        &mut self,
        model: &ModelHandle,
        _transforms: &TransformBundle,
    ) -> Result<(), DispatchError> {
        self.draws += 1;
        log::debug!(
            "unlit draw: {} indices, texture {:?}",
            model.index_count,
            model.texture
        );
        Ok(())
    }

    fn submit_lit_phong(
        &mut self,
        model: &ModelHandle,
        _transforms: &TransformBundle,
        light: &LightDescriptor,
        eye_position: Vec3,
    ) -> Result<(), DispatchError> {
        self.draws += 1;
        log::debug!(
            "phong draw: {} indices, specular power {}, eye ({:.2}, {:.2}, {:.2})",
            model.index_count,
            light.specular_power,
            eye_position.x,
            eye_position.y,
            eye_position.z
        );
        Ok(())
    }
}

/// In-memory stand-in for the asset layer.
///
/// Knows a fixed table of mesh paths with their index counts; loading an
/// unknown path fails, which exercises the fatal-setup path end to end.
#[derive(Default)]
pub struct AssetCatalog {
    index_counts: HashMap<PathBuf, u32>,
    next_id: u64,
}

impl AssetCatalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a mesh path with its index count.
    pub fn with_model(mut self, mesh_path: &str, index_count: u32) -> Self {
        self.index_counts.insert(mesh_path.into(), index_count);
        self
    }
}

impl AssetProvider for AssetCatalog {
    fn load_model(
        &mut self,
        mesh_path: &Path,
        texture_path: &Path,
    ) -> Result<ModelHandle, AssetError> {
        let index_count = *self.index_counts.get(mesh_path).ok_or_else(|| AssetError::Mesh {
            path: mesh_path.display().to_string(),
            reason: "not present in demo catalog".to_string(),
        })?;
        let drawable = DrawableHandle(self.next_id);
        let texture = TextureHandle(self.next_id + 1);
        self.next_id += 2;
        log::debug!(
            "loaded {} with {} ({index_count} indices)",
            mesh_path.display(),
            texture_path.display()
        );
        Ok(ModelHandle {
            drawable,
            index_count,
            texture,
        })
    }
}
