//! Input contract
//!
//! The core never talks to a window or keyboard directly; it consumes an
//! [`InputSource`] that snapshots key state into a [`CommandSet`] once per
//! frame. How keys map to commands is the backend's business.

use bitflags::bitflags;
use thiserror::Error;

bitflags! {
    /// Motion commands active for one frame.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct CommandSet: u16 {
        /// Yaw the viewpoint left
        const TURN_LEFT = 1 << 0;
        /// Yaw the viewpoint right
        const TURN_RIGHT = 1 << 1;
        /// Advance along the current facing
        const MOVE_FORWARD = 1 << 2;
        /// Back away along the current facing
        const MOVE_BACKWARD = 1 << 3;
        /// Climb
        const MOVE_UP = 1 << 4;
        /// Descend
        const MOVE_DOWN = 1 << 5;
        /// Pitch the view upward
        const LOOK_UP = 1 << 6;
        /// Pitch the view downward
        const LOOK_DOWN = 1 << 7;
        /// Restore the configured startup viewpoint
        const RESET_VIEW = 1 << 8;
    }
}

impl Default for CommandSet {
    fn default() -> Self {
        Self::empty()
    }
}

/// Input collaborator failures.
#[derive(Error, Debug)]
pub enum InputError {
    /// The input device disappeared (unplugged, focus lost for exclusive
    /// devices, backend shut down)
    #[error("input device lost: {0}")]
    DeviceLost(String),

    /// The poll itself failed
    #[error("input poll failed: {0}")]
    Poll(String),
}

/// Input source contract.
///
/// [`poll`](Self::poll) refreshes the snapshot; the query methods reflect
/// key state as of the most recent successful poll. A poll failure fails
/// the frame and ends the loop.
pub trait InputSource {
    /// Refresh the key-state snapshot.
    fn poll(&mut self) -> Result<(), InputError>;

    /// The set of motion commands active this frame.
    fn commands(&self) -> CommandSet;

    /// Whether the exit command is active.
    fn exit_requested(&self) -> bool;

    /// Boolean query for a single command.
    fn is_active(&self, command: CommandSet) -> bool {
        self.commands().contains(command)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedInput(CommandSet);

    impl InputSource for FixedInput {
        fn poll(&mut self) -> Result<(), InputError> {
            Ok(())
        }

        fn commands(&self) -> CommandSet {
            self.0
        }

        fn exit_requested(&self) -> bool {
            false
        }
    }

    #[test]
    fn test_is_active_reflects_command_set() {
        let input = FixedInput(CommandSet::MOVE_FORWARD | CommandSet::TURN_LEFT);
        assert!(input.is_active(CommandSet::MOVE_FORWARD));
        assert!(input.is_active(CommandSet::TURN_LEFT));
        assert!(!input.is_active(CommandSet::LOOK_UP));
    }

    #[test]
    fn test_command_set_defaults_empty() {
        assert_eq!(CommandSet::default(), CommandSet::empty());
    }
}
