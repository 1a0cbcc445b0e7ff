//! # Airview Core
//!
//! The per-frame orchestration core of a first-person 3D scene viewer:
//! the frame loop, the viewpoint and camera state, the fixed scene roster
//! with per-entity motion policies, and the two-technique shading
//! dispatch it drives on a graphics device.
//!
//! The windowing/input backend, the GPU device, the shader programs, and
//! asset file parsing are collaborators behind the narrow contracts in
//! [`input`] and [`render`]; this crate owns everything between polling
//! input and presenting a frame.
//!
//! ## Frame anatomy
//!
//! 1. Advance the clock by the real elapsed time.
//! 2. Poll input; a poll failure fails the frame.
//! 3. If the exit command is active, stop cleanly; nothing else runs.
//! 4. Integrate motion commands into the viewpoint, derive the camera.
//! 5. Begin the device frame (clear).
//! 6. For each entity in registration order: compute its world transform
//!    from its motion policy and dispatch one draw. The first failure
//!    abandons the frame.
//! 7. Present, only if every dispatch succeeded.

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod config;
pub mod engine;
pub mod foundation;
pub mod input;
pub mod render;
pub mod scene;
pub mod view;

pub use engine::{Engine, EngineError, FrameFlow};

/// Common imports for viewer applications
pub mod prelude {
    pub use crate::config::{Config, LightConfig, MotionRates, StartPose, ViewerConfig};
    pub use crate::engine::{
        Engine, EngineError, FrameError, FrameFlow, LifecycleState, SetupError,
    };
    pub use crate::foundation::math::{Mat4, Vec3, Vec4};
    pub use crate::foundation::time::{Clock, FrameTimer};
    pub use crate::input::{CommandSet, InputError, InputSource};
    pub use crate::render::lighting::LightDescriptor;
    pub use crate::render::{
        AssetError, AssetProvider, DeviceError, DispatchError, DrawableHandle, GraphicsDevice,
        ModelHandle, ShadingDispatch, TextureHandle, TransformBundle,
    };
    pub use crate::scene::{
        MotionPolicy, SceneEntity, SceneManifest, SceneRegistry, ShadingTechnique,
    };
    pub use crate::view::{Camera, Pose, ViewpointModel};
}
