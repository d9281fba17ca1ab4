//! Shared recording mocks for integration tests

#![allow(dead_code)]

use braccio_core::{ArmController, JointMap};
use braccio_hal::{Clock, OutputPin, Servo};

#[derive(Debug, Default)]
pub struct RecordingServo {
    pub attached: bool,
    pub writes: Vec<i32>,
}

impl Servo for RecordingServo {
    fn attach(&mut self) {
        self.attached = true;
    }

    fn detach(&mut self) {
        self.attached = false;
    }

    fn is_attached(&self) -> bool {
        self.attached
    }

    fn write(&mut self, degrees: i32) {
        self.writes.push(degrees);
    }
}

#[derive(Debug, Default)]
pub struct RecordingPin {
    pub levels: Vec<bool>,
}

impl OutputPin for RecordingPin {
    fn set_high(&mut self) {
        self.levels.push(true);
    }

    fn set_low(&mut self) {
        self.levels.push(false);
    }

    fn is_set_high(&self) -> bool {
        self.levels.last().copied().unwrap_or(false)
    }
}

#[derive(Debug, Default)]
pub struct SimClock {
    pub now_us: u64,
}

impl Clock for SimClock {
    fn now_millis(&self) -> u64 {
        self.now_us / 1000
    }

    fn sleep_millis(&mut self, ms: u32) {
        self.now_us += u64::from(ms) * 1000;
    }

    fn sleep_micros(&mut self, us: u32) {
        self.now_us += u64::from(us);
    }
}

pub type SimArm = ArmController<RecordingServo, RecordingPin, SimClock>;

pub fn sim_arm() -> SimArm {
    ArmController::new(
        JointMap::from_fn(|_| RecordingServo::default()),
        RecordingPin::default(),
        SimClock::default(),
    )
}

pub fn started_sim_arm() -> SimArm {
    let mut arm = sim_arm();
    arm.start(true);
    arm
}
