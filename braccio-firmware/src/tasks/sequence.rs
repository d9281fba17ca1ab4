//! Demo pose sequence
//!
//! Cycles the arm through a few poses, waiting for every joint to settle
//! before sending the next one.

use defmt::*;
use embassy_time::Timer;

use braccio_core::{ArmCommand, Joint, Pose};

use crate::channels::{ARM_COMMANDS, ARM_SETTLED};

/// Poses in base, shoulder, elbow, wrist, wrist rotation, gripper order
const POSES: [Pose; 4] = [
    Pose::from_angles(90, 90, 90, 90, 90, 50),
    Pose::from_angles(45, 110, 60, 120, 90, 10),
    Pose::from_angles(45, 110, 60, 120, 90, 73),
    Pose::from_angles(135, 70, 120, 60, 0, 73),
];

/// Pause at each pose
const DWELL_MS: u64 = 1000;

/// Demo sequence task
#[embassy_executor::task]
pub async fn sequence_task() {
    info!("Sequence task started");

    // Startup publishes a settled state once the ramp is done
    wait_settled().await;

    ARM_COMMANDS
        .send(ArmCommand::SetDelta {
            joint: Joint::Base,
            step: 3,
        })
        .await;

    loop {
        for (i, pose) in POSES.iter().enumerate() {
            info!("Moving to pose {}", i);
            ARM_SETTLED.reset();
            ARM_COMMANDS.send(ArmCommand::SetAllAbsolute(*pose)).await;
            wait_settled().await;
            Timer::after_millis(DWELL_MS).await;
        }
    }
}

async fn wait_settled() {
    while !ARM_SETTLED.wait().await {}
}
