//! Braccio - six-joint servo arm firmware
//!
//! Main firmware binary for RP2040-based boards driving a Braccio arm.
//! One task owns the arm controller; everything else talks to it through
//! the command channel.
//!
//! Pin map (RP2040):
//!
//! | Joint          | GPIO | PWM slice |
//! |----------------|------|-----------|
//! | Base           | 2    | 1A        |
//! | Shoulder       | 3    | 1B        |
//! | Elbow          | 4    | 2A        |
//! | Wrist          | 5    | 2B        |
//! | Wrist rotation | 6    | 3A        |
//! | Gripper        | 7    | 3B        |
//! | Soft start     | 8    | -         |

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::gpio::{Level, Output};
use embassy_rp::pwm::{Config as PwmConfig, Pwm, PwmOutput};
use {defmt_rtt as _, panic_probe as _};

use braccio_core::{ArmController, JointMap};
use braccio_drivers::{HalOutputPin, PwmServo, ServoTiming};

use crate::clock::EmbassyClock;
use crate::tasks::FirmwareArm;

mod channels;
mod clock;
mod config;
mod tasks;

/// PWM counter rate after the divider (125 MHz / 125)
const PWM_COUNTER_HZ: u32 = 1_000_000;

/// Servo frame rate
const SERVO_FRAME_HZ: u32 = 50;

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Braccio firmware starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    let config = config::load_config();

    // Servo PWM: 1 µs per count, 20 ms frame
    let mut pwm_config = PwmConfig::default();
    pwm_config.divider = 125u8.into();
    pwm_config.top = (PWM_COUNTER_HZ / SERVO_FRAME_HZ - 1) as u16;

    let (base, shoulder) =
        Pwm::new_output_ab(p.PWM_SLICE1, p.PIN_2, p.PIN_3, pwm_config.clone()).split();
    let (elbow, wrist) =
        Pwm::new_output_ab(p.PWM_SLICE2, p.PIN_4, p.PIN_5, pwm_config.clone()).split();
    let (wrist_rotation, gripper) =
        Pwm::new_output_ab(p.PWM_SLICE3, p.PIN_6, p.PIN_7, pwm_config).split();

    let servos = JointMap::new([
        servo(base),
        servo(shoulder),
        servo(elbow),
        servo(wrist),
        servo(wrist_rotation),
        servo(gripper),
    ]);
    info!("Servo PWM initialized");

    // Soft-start line starts low so servo power stays gated until the ramp
    let soft_start = HalOutputPin::new(Output::new(p.PIN_8, Level::Low), false);

    let arm: FirmwareArm = ArmController::with_config(servos, soft_start, EmbassyClock, &config);

    spawner.spawn(tasks::motion_task(arm, config.snap_to_center)).unwrap();
    spawner.spawn(tasks::sequence_task()).unwrap();

    info!("All tasks spawned, firmware running");

    loop {
        embassy_time::Timer::after_secs(60).await;
        trace!("Main loop heartbeat");
    }
}

/// Wrap one PWM channel half as a servo
fn servo(output: Option<PwmOutput<'static>>) -> PwmServo<PwmOutput<'static>> {
    PwmServo::new(unwrap!(output), ServoTiming::default())
}
