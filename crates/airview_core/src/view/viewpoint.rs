//! First-person viewpoint state
//!
//! Owns the viewer pose and integrates the discrete per-frame motion
//! commands. Commands are stateless between frames: displacement depends
//! only on this frame's active flags and the recorded frame delta, never
//! on what was pressed before.

use crate::config::{MotionRates, StartPose};
use crate::foundation::math::{wrap_angle, Vec3};
use crate::foundation::time::sanitize_delta;
use crate::input::CommandSet;

/// Position plus orientation triple.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Pose {
    /// World-space position
    pub position: Vec3,
    /// (pitch, yaw, roll) in radians, each wrapped into `[0, 2π)`
    pub orientation: Vec3,
}

impl Pose {
    /// Pitch component (rotation about X).
    pub fn pitch(&self) -> f32 {
        self.orientation.x
    }

    /// Yaw component (rotation about Y).
    pub fn yaw(&self) -> f32 {
        self.orientation.y
    }

    /// Roll component (rotation about Z).
    pub fn roll(&self) -> f32 {
        self.orientation.z
    }
}

impl From<&StartPose> for Pose {
    fn from(start: &StartPose) -> Self {
        Self {
            position: Vec3::from(start.position),
            orientation: Vec3::new(
                wrap_angle(start.orientation[0]),
                wrap_angle(start.orientation[1]),
                wrap_angle(start.orientation[2]),
            ),
        }
    }
}

/// Integrates motion commands into the viewer pose.
///
/// Every command displaces position or orientation by `rate * dt` along
/// its axis while active. Orientation components wrap into `[0, 2π)`
/// after every change; unbounded accumulation is treated as a defect.
#[derive(Debug, Clone)]
pub struct ViewpointModel {
    pose: Pose,
    rates: MotionRates,
    frame_time: f32,
}

impl ViewpointModel {
    /// Create a model at the origin with the given rates.
    pub fn new(rates: MotionRates) -> Self {
        Self {
            pose: Pose::default(),
            rates,
            frame_time: 0.0,
        }
    }

    /// Create a model with an explicit starting pose.
    pub fn with_pose(rates: MotionRates, pose: Pose) -> Self {
        let mut model = Self::new(rates);
        model.set_pose(pose.position, pose.orientation);
        model
    }

    /// Absolute pose override (startup and view reset).
    pub fn set_pose(&mut self, position: Vec3, orientation: Vec3) {
        self.pose.position = position;
        self.pose.orientation = Vec3::new(
            wrap_angle(orientation.x),
            wrap_angle(orientation.y),
            wrap_angle(orientation.z),
        );
    }

    /// Record the frame delta used by subsequent command integration.
    ///
    /// Negative and non-finite deltas clamp to zero, keeping motion
    /// monotonically forward-safe.
    pub fn advance_frame_time(&mut self, dt: f32) {
        self.frame_time = sanitize_delta(dt);
    }

    /// Apply a whole command set for the current frame.
    ///
    /// Turn commands run before move commands, so movement this frame
    /// follows the freshly-turned facing.
    pub fn apply(&mut self, commands: CommandSet) {
        self.turn_left(commands.contains(CommandSet::TURN_LEFT));
        self.turn_right(commands.contains(CommandSet::TURN_RIGHT));
        self.move_forward(commands.contains(CommandSet::MOVE_FORWARD));
        self.move_backward(commands.contains(CommandSet::MOVE_BACKWARD));
        self.move_up(commands.contains(CommandSet::MOVE_UP));
        self.move_down(commands.contains(CommandSet::MOVE_DOWN));
        self.look_up(commands.contains(CommandSet::LOOK_UP));
        self.look_down(commands.contains(CommandSet::LOOK_DOWN));
    }

    /// Yaw left at the configured turn rate.
    pub fn turn_left(&mut self, active: bool) {
        if active {
            self.pose.orientation.y =
                wrap_angle(self.pose.orientation.y - self.rates.turn_rate * self.frame_time);
        }
    }

    /// Yaw right at the configured turn rate.
    pub fn turn_right(&mut self, active: bool) {
        if active {
            self.pose.orientation.y =
                wrap_angle(self.pose.orientation.y + self.rates.turn_rate * self.frame_time);
        }
    }

    /// Advance in the ground plane along the current yaw.
    pub fn move_forward(&mut self, active: bool) {
        if active {
            let distance = self.rates.move_speed * self.frame_time;
            let yaw = self.pose.orientation.y;
            self.pose.position.x += yaw.sin() * distance;
            self.pose.position.z += yaw.cos() * distance;
        }
    }

    /// Back away in the ground plane along the current yaw.
    pub fn move_backward(&mut self, active: bool) {
        if active {
            let distance = self.rates.move_speed * self.frame_time;
            let yaw = self.pose.orientation.y;
            self.pose.position.x -= yaw.sin() * distance;
            self.pose.position.z -= yaw.cos() * distance;
        }
    }

    /// Climb straight up.
    pub fn move_up(&mut self, active: bool) {
        if active {
            self.pose.position.y += self.rates.vertical_speed * self.frame_time;
        }
    }

    /// Descend straight down.
    pub fn move_down(&mut self, active: bool) {
        if active {
            self.pose.position.y -= self.rates.vertical_speed * self.frame_time;
        }
    }

    /// Pitch the view upward.
    pub fn look_up(&mut self, active: bool) {
        if active {
            self.pose.orientation.x =
                wrap_angle(self.pose.orientation.x - self.rates.look_rate * self.frame_time);
        }
    }

    /// Pitch the view downward.
    pub fn look_down(&mut self, active: bool) {
        if active {
            self.pose.orientation.x =
                wrap_angle(self.pose.orientation.x + self.rates.look_rate * self.frame_time);
        }
    }

    /// The current pose.
    pub fn pose(&self) -> Pose {
        self.pose
    }

    /// The configured motion rates.
    pub fn rates(&self) -> &MotionRates {
        &self.rates
    }

    /// The delta recorded by the last [`advance_frame_time`](Self::advance_frame_time).
    pub fn frame_time(&self) -> f32 {
        self.frame_time
    }
}
