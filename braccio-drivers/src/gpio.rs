//! embedded-hal output pin adapter

use braccio_hal::OutputPin;
use embedded_hal::digital::OutputPin as HalPin;

/// Wraps an embedded-hal output and remembers the last level driven
///
/// The wrapped pin must already be configured as an output. Pin errors are
/// latched in a fault flag; the logical level is updated regardless.
pub struct HalOutputPin<P> {
    pin: P,
    high: bool,
    faulted: bool,
}

impl<P: HalPin> HalOutputPin<P> {
    /// Wrap a pin whose current level is `initially_high`
    pub fn new(pin: P, initially_high: bool) -> Self {
        Self {
            pin,
            high: initially_high,
            faulted: false,
        }
    }

    /// Check if the pin ever reported an error
    pub fn is_faulted(&self) -> bool {
        self.faulted
    }

    /// Give back the wrapped pin
    pub fn release(self) -> P {
        self.pin
    }
}

impl<P: HalPin> OutputPin for HalOutputPin<P> {
    fn set_high(&mut self) {
        self.high = true;
        if self.pin.set_high().is_err() {
            self.faulted = true;
        }
    }

    fn set_low(&mut self) {
        self.high = false;
        if self.pin.set_low().is_err() {
            self.faulted = true;
        }
    }

    fn is_set_high(&self) -> bool {
        self.high
    }
}
