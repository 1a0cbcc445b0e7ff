//! Frame orchestration
//!
//! [`Engine`] owns the loop: advance the clock, poll input, integrate the
//! viewpoint, derive the camera, then walk the scene roster computing each
//! entity's world transform and issuing one draw dispatch per entity. A
//! poll or dispatch failure ends the loop; the exit command ends it
//! cleanly before any state update or render that frame.
//!
//! Everything is single-threaded and synchronous. The stage order within
//! a frame (poll → update → camera → transforms → dispatches → present)
//! is fixed: camera-relative entities and lit dispatches read state that
//! the earlier stages produce.

use crate::config::ViewerConfig;
use crate::foundation::time::{Clock, FrameTimer};
use crate::input::{CommandSet, InputError, InputSource};
use crate::render::lighting::LightDescriptor;
use crate::render::{
    AssetProvider, DeviceError, DispatchError, GraphicsDevice, ShadingDispatch, TransformBundle,
};
use crate::scene::{motion, SceneError, SceneManifest, SceneRegistry, ShadingTechnique};
use crate::view::{Camera, Pose, ViewpointModel};
use thiserror::Error;

/// Engine lifecycle states.
///
/// The pre-construction `Uninitialized` state of the design maps to the
/// absence of an `Engine` value; a successfully built engine starts at
/// `Ready`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleState {
    /// Constructed, no frame run yet
    Ready,
    /// Inside the frame loop
    Running,
    /// Leaving the frame loop
    ShuttingDown,
    /// Loop finished; only teardown remains
    Terminated,
}

/// Why a frame ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameFlow {
    /// Keep looping
    Continue,
    /// Exit command observed; terminate cleanly
    Exit,
}

/// Setup failures. Fatal: no frame runs after one.
#[derive(Error, Debug)]
pub enum SetupError {
    /// Configuration could not be loaded
    #[error("configuration: {0}")]
    Config(#[from] crate::config::ConfigError),

    /// The scene could not be constructed
    #[error("scene construction: {0}")]
    Scene(#[from] SceneError),
}

/// Steady-state frame failures. The loop terminates; nothing is retried.
#[derive(Error, Debug)]
pub enum FrameError {
    /// Input polling failed
    #[error("input poll: {0}")]
    Input(#[from] InputError),

    /// The device failed to open or present the frame
    #[error("device: {0}")]
    Device(#[from] DeviceError),

    /// A draw dispatch failed; the frame was abandoned without presenting
    #[error("draw dispatch for {entity}: {source}")]
    Dispatch {
        /// Entity whose dispatch failed
        entity: String,
        /// Underlying dispatch failure
        #[source]
        source: DispatchError,
    },
}

/// Top-level engine failure.
#[derive(Error, Debug)]
pub enum EngineError {
    /// Setup failed before any frame ran
    #[error("setup failed: {0}")]
    Setup(#[from] SetupError),

    /// A frame failed and the loop terminated
    #[error("frame failed: {0}")]
    Frame(#[from] FrameError),
}

/// The frame orchestrator.
pub struct Engine<I, D, S>
where
    I: InputSource,
    D: GraphicsDevice,
    S: ShadingDispatch,
{
    // Field order is teardown order: scene resources release before the
    // dispatcher, device, and input collaborators, reversing acquisition.
    registry: SceneRegistry,
    light: LightDescriptor,
    camera: Camera,
    viewpoint: ViewpointModel,
    clock: Clock,
    dispatch: S,
    device: D,
    input: I,
    clear_color: [f32; 4],
    start_pose: Pose,
    state: LifecycleState,
}

impl<I, D, S> Engine<I, D, S>
where
    I: InputSource,
    D: GraphicsDevice,
    S: ShadingDispatch,
{
    /// Build the engine from configuration and the scene manifest.
    ///
    /// Asset loading happens here, one entity at a time in manifest
    /// order; the first collaborator failure aborts setup.
    pub fn initialize(
        config: &ViewerConfig,
        manifest: &SceneManifest,
        input: I,
        device: D,
        dispatch: S,
        assets: &mut dyn AssetProvider,
    ) -> Result<Self, SetupError> {
        log::info!(
            "initializing viewer engine ({} manifest entities)",
            manifest.entities.len()
        );

        let registry = SceneRegistry::from_manifest(manifest, assets)?;

        let start_pose = Pose::from(&config.start);
        let viewpoint = ViewpointModel::with_pose(config.motion.clone(), start_pose);
        let mut camera = Camera::new();
        camera.set_pose(&viewpoint.pose());

        log::info!("viewer engine ready");
        Ok(Self {
            registry,
            light: LightDescriptor::from(&config.light),
            camera,
            viewpoint,
            clock: Clock::new(),
            dispatch,
            device,
            input,
            clear_color: config.clear_color,
            start_pose,
            state: LifecycleState::Ready,
        })
    }

    /// Run frames with real timing until exit or failure.
    ///
    /// Retry policy, if any, belongs to the caller; the engine reports
    /// the first failure and stops.
    pub fn run(&mut self) -> Result<(), EngineError> {
        self.state = LifecycleState::Running;
        log::info!("entering frame loop");

        let mut timer = FrameTimer::new();
        let outcome = loop {
            match self.frame(timer.tick()) {
                Ok(FrameFlow::Continue) => {}
                Ok(FrameFlow::Exit) => {
                    log::info!("exit requested, leaving frame loop");
                    break Ok(());
                }
                Err(err) => {
                    log::error!("frame failed: {err}");
                    break Err(EngineError::Frame(err));
                }
            }
        };

        self.state = LifecycleState::ShuttingDown;
        log::info!(
            "frame loop finished after {:.1}s simulated",
            self.clock.elapsed()
        );
        self.state = LifecycleState::Terminated;
        outcome
    }

    /// Execute one frame with the given real delta in seconds.
    pub fn frame(&mut self, dt: f32) -> Result<FrameFlow, FrameError> {
        let dt = self.clock.advance(dt);

        self.input.poll()?;

        // Exit wins over everything else: no state update, no render.
        if self.input.exit_requested() {
            return Ok(FrameFlow::Exit);
        }

        let commands = self.input.commands();
        if commands.contains(CommandSet::RESET_VIEW) {
            log::debug!("view reset to startup pose");
            self.viewpoint
                .set_pose(self.start_pose.position, self.start_pose.orientation);
        }
        self.viewpoint.advance_frame_time(dt);
        self.viewpoint.apply(commands);
        self.camera.set_pose(&self.viewpoint.pose());

        self.render()?;
        Ok(FrameFlow::Continue)
    }

    /// Clear, dispatch every entity in registration order, present.
    ///
    /// The entity walk short-circuits at the first dispatch failure; the
    /// frame is then abandoned without presenting.
    fn render(&mut self) -> Result<(), FrameError> {
        self.device.begin_frame(self.clear_color)?;

        let elapsed = self.clock.elapsed();
        let eye = self.camera.eye_position();
        let base_world = self.device.base_world();
        let view = self.camera.view_transform();
        let projection = self.device.projection();

        let dispatch = &mut self.dispatch;
        let light = &self.light;
        self.registry.iter().try_for_each(|entity| {
            let world = motion::world_transform(entity, elapsed, eye) * base_world;
            let transforms = TransformBundle {
                world,
                view,
                projection,
            };
            match entity.technique {
                ShadingTechnique::UnlitTextured => {
                    dispatch.submit_unlit_textured(&entity.model, &transforms)
                }
                ShadingTechnique::LitPhong => {
                    dispatch.submit_lit_phong(&entity.model, &transforms, light, eye)
                }
            }
            .map_err(|source| FrameError::Dispatch {
                entity: entity.name.clone(),
                source,
            })
        })?;

        self.device.end_frame()?;
        Ok(())
    }

    /// Current lifecycle state.
    pub fn state(&self) -> LifecycleState {
        self.state
    }

    /// The viewpoint model.
    pub fn viewpoint(&self) -> &ViewpointModel {
        &self.viewpoint
    }

    /// The derived camera.
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// The simulated clock.
    pub fn clock(&self) -> &Clock {
        &self.clock
    }

    /// The scene roster.
    pub fn registry(&self) -> &SceneRegistry {
        &self.registry
    }

    /// The global light.
    pub fn light(&self) -> &LightDescriptor {
        &self.light
    }

    /// The input collaborator.
    pub fn input(&self) -> &I {
        &self.input
    }

    /// The device collaborator.
    pub fn device(&self) -> &D {
        &self.device
    }

    /// The dispatch collaborator.
    pub fn dispatch(&self) -> &S {
        &self.dispatch
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::{Mat4, Vec3};
    use crate::render::{AssetError, DrawableHandle, ModelHandle, TextureHandle};
    use crate::scene::{EntityRecord, PolicySpec, Triple};
    use approx::assert_relative_eq;
    use std::path::Path;

    #[derive(Default)]
    struct ScriptInput {
        frames: Vec<(CommandSet, bool)>,
        cursor: usize,
        current: CommandSet,
        exit: bool,
        fail_at: Option<usize>,
        polls: usize,
    }

    impl ScriptInput {
        fn script(frames: Vec<(CommandSet, bool)>) -> Self {
            Self {
                frames,
                ..Self::default()
            }
        }

        fn failing_at(poll_index: usize) -> Self {
            Self {
                fail_at: Some(poll_index),
                ..Self::default()
            }
        }
    }

    impl InputSource for ScriptInput {
        fn poll(&mut self) -> Result<(), InputError> {
            if self.fail_at == Some(self.polls) {
                return Err(InputError::Poll("scripted poll failure".to_string()));
            }
            self.polls += 1;
            let (commands, exit) = self
                .frames
                .get(self.cursor)
                .copied()
                .unwrap_or((CommandSet::empty(), true));
            self.cursor += 1;
            self.current = commands;
            self.exit = exit;
            Ok(())
        }

        fn commands(&self) -> CommandSet {
            self.current
        }

        fn exit_requested(&self) -> bool {
            self.exit
        }
    }

    #[derive(Default)]
    struct RecordingDevice {
        begins: u32,
        presents: u32,
    }

    impl GraphicsDevice for RecordingDevice {
        fn begin_frame(&mut self, _clear_color: [f32; 4]) -> Result<(), DeviceError> {
            self.begins += 1;
            Ok(())
        }

        fn end_frame(&mut self) -> Result<(), DeviceError> {
            self.presents += 1;
            Ok(())
        }

        fn base_world(&self) -> Mat4 {
            Mat4::identity()
        }

        fn projection(&self) -> Mat4 {
            Mat4::identity()
        }
    }

    struct Submission {
        index_count: u32,
        world: Mat4,
        lit: bool,
    }

    #[derive(Default)]
    struct RecordingDispatch {
        submissions: Vec<Submission>,
        fail_at: Option<usize>,
        attempts: usize,
    }

    impl RecordingDispatch {
        fn failing_at(index: usize) -> Self {
            Self {
                fail_at: Some(index),
                ..Self::default()
            }
        }

        fn record(
            &mut self,
            model: &ModelHandle,
            transforms: &TransformBundle,
            lit: bool,
        ) -> Result<(), DispatchError> {
            let index = self.attempts;
            self.attempts += 1;
            if self.fail_at == Some(index) {
                return Err(DispatchError::MissingResource(
                    "scripted dispatch failure".to_string(),
                ));
            }
            self.submissions.push(Submission {
                index_count: model.index_count,
                world: transforms.world,
                lit,
            });
            Ok(())
        }
    }

    impl ShadingDispatch for RecordingDispatch {
        fn submit_unlit_textured(
            &mut self,
            model: &ModelHandle,
            transforms: &TransformBundle,
        ) -> Result<(), DispatchError> {
            self.record(model, transforms, false)
        }

        fn submit_lit_phong(
            &mut self,
            model: &ModelHandle,
            transforms: &TransformBundle,
            _light: &LightDescriptor,
            _eye_position: Vec3,
        ) -> Result<(), DispatchError> {
            self.record(model, transforms, true)
        }
    }

    #[derive(Default)]
    struct SequentialAssets {
        loaded: u32,
    }

    impl AssetProvider for SequentialAssets {
        fn load_model(
            &mut self,
            _mesh_path: &Path,
            _texture_path: &Path,
        ) -> Result<ModelHandle, AssetError> {
            self.loaded += 1;
            Ok(ModelHandle {
                drawable: DrawableHandle(u64::from(self.loaded)),
                index_count: 100 + self.loaded,
                texture: TextureHandle(u64::from(self.loaded) + 50),
            })
        }
    }

    fn record(name: &str, policy: PolicySpec, technique: ShadingTechnique) -> EntityRecord {
        EntityRecord {
            name: name.to_string(),
            mesh: format!("models/{name}.txt").into(),
            texture: format!("textures/{name}.dds").into(),
            scale: Triple::one(),
            offset: Triple::default(),
            policy,
            technique,
        }
    }

    fn airfield_manifest() -> SceneManifest {
        SceneManifest {
            entities: vec![
                record("terrain", PolicySpec::Static, ShadingTechnique::UnlitTextured),
                record(
                    "airliner",
                    PolicySpec::Orbiting {
                        axis: Triple::unit_y(),
                        angular_rate: 0.25,
                        orbit_offset: Triple::default(),
                    },
                    ShadingTechnique::LitPhong,
                ),
                record("tower", PolicySpec::Static, ShadingTechnique::LitPhong),
            ],
        }
    }

    fn engine_with(
        input: ScriptInput,
        dispatch: RecordingDispatch,
    ) -> Engine<ScriptInput, RecordingDevice, RecordingDispatch> {
        Engine::initialize(
            &ViewerConfig::default(),
            &airfield_manifest(),
            input,
            RecordingDevice::default(),
            dispatch,
            &mut SequentialAssets::default(),
        )
        .unwrap()
    }

    #[test]
    fn test_successful_frame_draws_every_entity_in_order() {
        let input = ScriptInput::script(vec![(CommandSet::empty(), false)]);
        let mut engine = engine_with(input, RecordingDispatch::default());

        let flow = engine.frame(1.0 / 60.0).unwrap();
        assert_eq!(flow, FrameFlow::Continue);
        assert_eq!(engine.device().begins, 1);
        assert_eq!(engine.device().presents, 1);

        let counts: Vec<u32> = engine
            .dispatch()
            .submissions
            .iter()
            .map(|submission| submission.index_count)
            .collect();
        assert_eq!(counts, [101, 102, 103]);
        assert!(!engine.dispatch().submissions[0].lit);
        assert!(engine.dispatch().submissions[2].lit);
    }

    #[test]
    fn test_dispatch_failure_aborts_frame_without_presenting() {
        let input = ScriptInput::script(vec![(CommandSet::empty(), false)]);
        let mut engine = engine_with(input, RecordingDispatch::failing_at(1));

        let err = engine.frame(1.0 / 60.0).unwrap_err();
        assert!(matches!(
            err,
            FrameError::Dispatch { ref entity, .. } if entity == "airliner"
        ));
        // Entities after the failing one were never attempted, and the
        // frame never presented.
        assert_eq!(engine.dispatch().attempts, 2);
        assert_eq!(engine.dispatch().submissions.len(), 1);
        assert_eq!(engine.device().begins, 1);
        assert_eq!(engine.device().presents, 0);
    }

    #[test]
    fn test_exit_precedes_update_and_render() {
        let input = ScriptInput::script(vec![(
            CommandSet::MOVE_FORWARD | CommandSet::TURN_LEFT,
            true,
        )]);
        let mut engine = engine_with(input, RecordingDispatch::default());
        let before = engine.viewpoint().pose();

        let flow = engine.frame(1.0).unwrap();
        assert_eq!(flow, FrameFlow::Exit);
        assert_eq!(engine.viewpoint().pose(), before);
        assert_eq!(engine.device().begins, 0);
        assert!(engine.dispatch().submissions.is_empty());
    }

    #[test]
    fn test_poll_failure_fails_the_frame() {
        let input = ScriptInput::failing_at(0);
        let mut engine = engine_with(input, RecordingDispatch::default());

        let err = engine.frame(1.0 / 60.0).unwrap_err();
        assert!(matches!(err, FrameError::Input(_)));
        assert_eq!(engine.device().begins, 0);
    }

    #[test]
    fn test_follow_entity_reads_the_freshly_derived_camera() {
        let manifest = SceneManifest {
            entities: vec![record(
                "sky_dome",
                PolicySpec::CameraFollow {
                    vertical_offset: 0.5,
                    axis: Triple::unit_y(),
                    angular_rate: 0.0,
                },
                ShadingTechnique::UnlitTextured,
            )],
        };
        let input = ScriptInput::script(vec![(CommandSet::MOVE_FORWARD, false)]);
        let mut engine = Engine::initialize(
            &ViewerConfig::default(),
            &manifest,
            input,
            RecordingDevice::default(),
            RecordingDispatch::default(),
            &mut SequentialAssets::default(),
        )
        .unwrap();

        engine.frame(1.0).unwrap();

        // One second forward from (0, 0, -10) at 4 units/s lands the eye
        // at z = -6; the dome transform must already use that position.
        let world = engine.dispatch().submissions[0].world;
        assert_relative_eq!(world[(0, 3)], 0.0, epsilon = 1e-6);
        assert_relative_eq!(world[(1, 3)], 0.5, epsilon = 1e-6);
        assert_relative_eq!(world[(2, 3)], -6.0, epsilon = 1e-5);
        assert_eq!(engine.camera().eye_position(), engine.viewpoint().pose().position);
    }

    #[test]
    fn test_view_reset_restores_startup_pose() {
        let input = ScriptInput::script(vec![
            (CommandSet::MOVE_FORWARD, false),
            (CommandSet::RESET_VIEW, false),
        ]);
        let mut engine = engine_with(input, RecordingDispatch::default());
        let start = engine.viewpoint().pose();

        engine.frame(1.0).unwrap();
        assert_ne!(engine.viewpoint().pose(), start);

        engine.frame(1.0).unwrap();
        assert_eq!(engine.viewpoint().pose(), start);
    }

    #[test]
    fn test_run_terminates_cleanly_on_exit() {
        let input = ScriptInput::script(vec![
            (CommandSet::empty(), false),
            (CommandSet::empty(), false),
            (CommandSet::empty(), true),
        ]);
        let mut engine = engine_with(input, RecordingDispatch::default());

        engine.run().unwrap();
        assert_eq!(engine.state(), LifecycleState::Terminated);
        assert_eq!(engine.device().presents, 2);
    }

    #[test]
    fn test_run_surfaces_frame_failure() {
        let input = ScriptInput::script(vec![(CommandSet::empty(), false)]);
        let mut engine = engine_with(input, RecordingDispatch::failing_at(0));

        let err = engine.run().unwrap_err();
        assert!(matches!(err, EngineError::Frame(FrameError::Dispatch { .. })));
        assert_eq!(engine.state(), LifecycleState::Terminated);
        assert_eq!(engine.device().presents, 0);
    }

    #[test]
    fn test_clock_advances_once_per_frame() {
        let input = ScriptInput::script(vec![
            (CommandSet::empty(), false),
            (CommandSet::empty(), false),
        ]);
        let mut engine = engine_with(input, RecordingDispatch::default());

        engine.frame(0.25).unwrap();
        engine.frame(0.5).unwrap();
        assert_relative_eq!(engine.clock().elapsed(), 0.75, epsilon = 1e-6);
    }

    #[test]
    fn test_setup_failure_propagates_from_assets() {
        struct RefusingAssets;

        impl AssetProvider for RefusingAssets {
            fn load_model(
                &mut self,
                mesh_path: &Path,
                _texture_path: &Path,
            ) -> Result<ModelHandle, AssetError> {
                Err(AssetError::Mesh {
                    path: mesh_path.display().to_string(),
                    reason: "no such file".to_string(),
                })
            }
        }

        let result = Engine::initialize(
            &ViewerConfig::default(),
            &airfield_manifest(),
            ScriptInput::default(),
            RecordingDevice::default(),
            RecordingDispatch::default(),
            &mut RefusingAssets,
        );
        assert!(matches!(
            result,
            Err(SetupError::Scene(SceneError::Asset { .. }))
        ));
    }
}
