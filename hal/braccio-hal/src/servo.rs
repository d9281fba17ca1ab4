//! Hobby servo channel
//!
//! One instance per joint, mapped to a fixed physical channel. Angles are in
//! whole degrees. The admissible signal range is 0..=180; implementations
//! clamp at the signal level, the same way a classic servo library does,
//! so a caller can never command a pulse width outside the servo frame.

/// Lowest angle a servo channel accepts
pub const SERVO_MIN_DEGREES: i32 = 0;

/// Highest angle a servo channel accepts
pub const SERVO_MAX_DEGREES: i32 = 180;

/// Hobby servo actuator
pub trait Servo {
    /// Attach the channel and start emitting a control signal
    fn attach(&mut self);

    /// Stop emitting a control signal (servo goes limp)
    fn detach(&mut self);

    /// Check if the channel is currently attached
    fn is_attached(&self) -> bool;

    /// Command an angle in degrees
    ///
    /// Values outside `SERVO_MIN_DEGREES..=SERVO_MAX_DEGREES` are clamped by the
    /// implementation before they reach the signal generator.
    fn write(&mut self, degrees: i32);
}

impl<T: Servo + ?Sized> Servo for &mut T {
    fn attach(&mut self) {
        (**self).attach();
    }

    fn detach(&mut self) {
        (**self).detach();
    }

    fn is_attached(&self) -> bool {
        (**self).is_attached()
    }

    fn write(&mut self, degrees: i32) {
        (**self).write(degrees);
    }
}
