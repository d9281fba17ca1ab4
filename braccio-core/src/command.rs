//! Arm commands
//!
//! In a concurrent firmware the controller is owned by a single motion task.
//! Every other task expresses what it wants as an [`ArmCommand`] and sends it
//! over a channel; the motion task applies commands between update ticks.

use braccio_hal::{Clock, OutputPin, Servo};

use crate::arm::{ArmController, SetOutcome};
use crate::joint::{Joint, Pose};

/// Request for the motion task
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ArmCommand {
    /// Set one joint's target
    SetOneAbsolute { joint: Joint, value: i32 },
    /// Move one joint's target by a delta
    SetOneRelative { joint: Joint, delta: i32 },
    /// Set every joint's target
    SetAllAbsolute(Pose),
    /// Move every joint's target by a delta
    SetAllRelative(Pose),
    /// Jump every joint immediately, bypassing limits
    SetAllNow(Pose),
    /// Change a joint's per-tick step
    SetDelta { joint: Joint, step: i32 },
    /// Change a joint's limits
    ///
    /// An existing target outside the new range is kept; `Hold` or the next
    /// target setter clamps it.
    SetLimits { joint: Joint, min: i32, max: i32 },
    /// Change a joint's home angle
    SetCenter { joint: Joint, center: i32 },
    /// Walk every joint back to its center
    Home,
    /// Stop every joint where it is
    Hold,
}

/// What applying a command reported
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CommandResult {
    /// Single-joint target result
    Joint(SetOutcome),
    /// All-joint target result (true = nothing clamped)
    All(bool),
    /// Command has no result to report
    Done,
}

impl CommandResult {
    /// Check if the command went through without clamping
    pub fn is_applied(&self) -> bool {
        match self {
            Self::Joint(outcome) => outcome.is_applied(),
            Self::All(all_applied) => *all_applied,
            Self::Done => true,
        }
    }
}

impl ArmCommand {
    /// Apply this command to a controller
    pub fn apply<S, P, C>(self, arm: &mut ArmController<S, P, C>) -> CommandResult
    where
        S: Servo,
        P: OutputPin,
        C: Clock,
    {
        match self {
            Self::SetOneAbsolute { joint, value } => {
                CommandResult::Joint(arm.set_one_absolute(joint, value))
            }
            Self::SetOneRelative { joint, delta } => {
                CommandResult::Joint(arm.set_one_relative(joint, delta))
            }
            Self::SetAllAbsolute(pose) => CommandResult::All(arm.set_all_absolute(pose)),
            Self::SetAllRelative(deltas) => CommandResult::All(arm.set_all_relative(deltas)),
            Self::SetAllNow(pose) => {
                arm.set_all_now(pose);
                CommandResult::Done
            }
            Self::SetDelta { joint, step } => {
                arm.set_delta(joint, step);
                CommandResult::Done
            }
            Self::SetLimits { joint, min, max } => {
                arm.set_joint_min(joint, min);
                arm.set_joint_max(joint, max);
                CommandResult::Done
            }
            Self::SetCenter { joint, center } => {
                arm.set_joint_center(joint, center);
                CommandResult::Done
            }
            Self::Home => CommandResult::All(arm.home()),
            Self::Hold => {
                arm.hold();
                CommandResult::Done
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::joint::JointMap;
    use crate::mock::{MockClock, MockPin, MockServo};

    fn started_arm() -> ArmController<MockServo, MockPin, MockClock> {
        let mut arm = ArmController::new(
            JointMap::from_fn(|_| MockServo::default()),
            MockPin::default(),
            MockClock::default(),
        );
        arm.start(true);
        arm
    }

    #[test]
    fn test_single_joint_commands() {
        let mut arm = started_arm();

        let result = ArmCommand::SetOneAbsolute {
            joint: Joint::Gripper,
            value: 100,
        }
        .apply(&mut arm);
        assert_eq!(
            result,
            CommandResult::Joint(SetOutcome::Clamped {
                requested: 100,
                applied: 73
            })
        );
        assert!(!result.is_applied());

        let result = ArmCommand::SetOneRelative {
            joint: Joint::Gripper,
            delta: -3,
        }
        .apply(&mut arm);
        assert_eq!(result, CommandResult::Joint(SetOutcome::Applied(70)));
    }

    #[test]
    fn test_all_joint_commands() {
        let mut arm = started_arm();

        let result = ArmCommand::SetAllAbsolute(Pose::from_angles(0, 0, 0, 0, 0, 0)).apply(&mut arm);
        assert_eq!(result, CommandResult::All(false));
        assert_eq!(arm.target(Joint::Shoulder), 15);

        assert_eq!(ArmCommand::Home.apply(&mut arm), CommandResult::All(true));
        assert_eq!(arm.target(Joint::Shoulder), 90);
    }

    #[test]
    fn test_configuration_commands() {
        let mut arm = started_arm();

        ArmCommand::SetLimits {
            joint: Joint::Elbow,
            min: 30,
            max: 300,
        }
        .apply(&mut arm);
        ArmCommand::SetCenter {
            joint: Joint::Elbow,
            center: 60,
        }
        .apply(&mut arm);
        ArmCommand::SetDelta {
            joint: Joint::Elbow,
            step: 4,
        }
        .apply(&mut arm);

        assert_eq!(arm.min(Joint::Elbow), 30);
        assert_eq!(arm.max(Joint::Elbow), 180);
        assert_eq!(arm.center(Joint::Elbow), 60);
        assert_eq!(arm.delta(Joint::Elbow), 4);
    }

    #[test]
    fn test_narrowed_limits_keep_target_until_reset() {
        let mut arm = started_arm();
        arm.set_one_absolute(Joint::Base, 150);

        ArmCommand::SetLimits {
            joint: Joint::Base,
            min: 0,
            max: 100,
        }
        .apply(&mut arm);
        assert_eq!(arm.target(Joint::Base), 150);

        let result = ArmCommand::SetOneRelative {
            joint: Joint::Base,
            delta: 0,
        }
        .apply(&mut arm);
        assert_eq!(
            result,
            CommandResult::Joint(SetOutcome::Clamped {
                requested: 150,
                applied: 100
            })
        );
        assert_eq!(arm.target(Joint::Base), 100);
    }

    #[test]
    fn test_hold_and_set_now() {
        let mut arm = started_arm();

        ArmCommand::SetAllNow(Pose::from_angles(10, 20, 30, 40, 50, 60)).apply(&mut arm);
        assert_eq!(arm.current(Joint::Base), Some(10));

        arm.set_one_absolute(Joint::Base, 50);
        arm.update();
        assert_eq!(ArmCommand::Hold.apply(&mut arm), CommandResult::Done);
        assert_eq!(arm.target(Joint::Base), 11);
        assert!(arm.is_settled());
    }
}
