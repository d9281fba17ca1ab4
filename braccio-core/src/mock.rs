//! Recording mocks for the hardware traits

use braccio_hal::{Clock, OutputPin, Servo};
use heapless::Vec;

/// Servo that remembers every angle written to it
#[derive(Debug, Default)]
pub struct MockServo {
    pub attached: bool,
    pub writes: Vec<i32, 64>,
    pub write_count: u32,
    pub last: Option<i32>,
}

impl Servo for MockServo {
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
        // Only the first writes are kept, long runs rely on the counter
        let _ = self.writes.push(degrees);
        self.write_count += 1;
        self.last = Some(degrees);
    }
}

/// Output pin that counts rising edges
#[derive(Debug, Default)]
pub struct MockPin {
    pub high: bool,
    pub rising_edges: u32,
    pub set_low_calls: u32,
    /// `set_low` calls seen before the first rising edge
    pub lows_before_first_rise: u32,
}

impl OutputPin for MockPin {
    fn set_high(&mut self) {
        if self.rising_edges == 0 {
            self.lows_before_first_rise = self.set_low_calls;
        }
        if !self.high {
            self.rising_edges += 1;
        }
        self.high = true;
    }

    fn set_low(&mut self) {
        self.high = false;
        self.set_low_calls += 1;
    }

    fn is_set_high(&self) -> bool {
        self.high
    }
}

/// Clock that only advances when slept on
#[derive(Debug, Default)]
pub struct MockClock {
    pub now_us: u64,
}

impl MockClock {
    pub fn starting_at_ms(ms: u64) -> Self {
        Self { now_us: ms * 1000 }
    }
}

impl Clock for MockClock {
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
