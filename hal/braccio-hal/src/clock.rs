//! Timing primitives
//!
//! The soft-start ramp and the blocking update helper need a monotonic
//! millisecond counter plus blocking sleeps. Both routines compare elapsed
//! time with `wrapping_sub`, so a counter that wraps is tolerated.

/// Monotonic clock with blocking delays
pub trait Clock {
    /// Milliseconds since an arbitrary fixed epoch (usually boot)
    fn now_millis(&self) -> u64;

    /// Block for `ms` milliseconds
    fn sleep_millis(&mut self, ms: u32);

    /// Block for `us` microseconds
    fn sleep_micros(&mut self, us: u32);

    /// Milliseconds elapsed since `since` (a previous `now_millis` reading)
    fn elapsed_since(&self, since: u64) -> u64 {
        self.now_millis().wrapping_sub(since)
    }
}

impl<T: Clock + ?Sized> Clock for &mut T {
    fn now_millis(&self) -> u64 {
        (**self).now_millis()
    }

    fn sleep_millis(&mut self, ms: u32) {
        (**self).sleep_millis(ms);
    }

    fn sleep_micros(&mut self, us: u32) {
        (**self).sleep_micros(us);
    }
}
