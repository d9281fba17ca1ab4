//! embassy-time backed clock
//!
//! Sleeps are busy-waits (`block_for`): the soft-start ramp needs
//! microsecond pulses and runs before any other motion work.

use braccio_hal::Clock;
use embassy_time::{block_for, Duration, Instant};

/// Clock reading the embassy time driver
pub struct EmbassyClock;

impl Clock for EmbassyClock {
    fn now_millis(&self) -> u64 {
        Instant::now().as_millis()
    }

    fn sleep_millis(&mut self, ms: u32) {
        block_for(Duration::from_millis(u64::from(ms)));
    }

    fn sleep_micros(&mut self, us: u32) {
        block_for(Duration::from_micros(u64::from(us)));
    }
}
