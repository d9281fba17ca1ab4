//! PWM hobby servo driver
//!
//! Maps an angle in degrees to a pulse width inside a fixed frame:
//! 0° → `min_pulse_us`, 180° → `max_pulse_us`, linear in between. The PWM
//! channel must already run at the frame rate (50 Hz for a 20 ms frame);
//! the duty cycle is set as `pulse / frame`.
//!
//! ```ignore
//! let mut servo = PwmServo::new(pwm_channel, ServoTiming::default());
//! servo.attach();
//! servo.write(90); // 1472 µs pulse
//! ```

use braccio_hal::servo::{SERVO_MAX_DEGREES, SERVO_MIN_DEGREES};
use braccio_hal::Servo;
use embedded_hal::pwm::SetDutyCycle;

/// Angle emitted on attach when nothing was written yet
pub const DEFAULT_ANGLE: i32 = 90;

/// Pulse timing of a servo
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ServoTiming {
    /// Pulse width at 0°
    pub min_pulse_us: u16,
    /// Pulse width at 180°
    pub max_pulse_us: u16,
    /// Length of one PWM frame
    pub frame_us: u16,
}

impl Default for ServoTiming {
    /// Classic hobby servo range, 544-2400 µs in a 20 ms frame
    fn default() -> Self {
        Self {
            min_pulse_us: 544,
            max_pulse_us: 2400,
            frame_us: 20_000,
        }
    }
}

impl ServoTiming {
    /// Pulse width for an angle, clamped to the servo's range
    pub fn pulse_us(&self, degrees: i32) -> u16 {
        let degrees = degrees.clamp(SERVO_MIN_DEGREES, SERVO_MAX_DEGREES) as u32;
        let min = u32::from(self.min_pulse_us);
        let span = u32::from(self.max_pulse_us.saturating_sub(self.min_pulse_us));
        (min + span * degrees / SERVO_MAX_DEGREES as u32) as u16
    }
}

/// Servo on a PWM channel
pub struct PwmServo<P> {
    pwm: P,
    timing: ServoTiming,
    attached: bool,
    /// Last commanded angle (already clamped)
    angle: Option<i32>,
    /// Set when the PWM channel reported an error
    faulted: bool,
}

impl<P: SetDutyCycle> PwmServo<P> {
    /// Create a detached servo
    pub fn new(pwm: P, timing: ServoTiming) -> Self {
        Self {
            pwm,
            timing,
            attached: false,
            angle: None,
            faulted: false,
        }
    }

    /// Last commanded angle
    pub fn angle(&self) -> Option<i32> {
        self.angle
    }

    /// Pulse timing in use
    pub fn timing(&self) -> &ServoTiming {
        &self.timing
    }

    /// Check if the PWM channel ever rejected a duty cycle
    pub fn is_faulted(&self) -> bool {
        self.faulted
    }

    /// Clear the fault flag
    pub fn clear_fault(&mut self) {
        self.faulted = false;
    }

    /// Give back the PWM channel
    pub fn release(self) -> P {
        self.pwm
    }

    fn emit(&mut self, degrees: i32) {
        let pulse = self.timing.pulse_us(degrees);
        if self
            .pwm
            .set_duty_cycle_fraction(pulse, self.timing.frame_us)
            .is_err()
        {
            self.faulted = true;
        }
    }
}

impl<P: SetDutyCycle> Servo for PwmServo<P> {
    fn attach(&mut self) {
        self.attached = true;
        let angle = self.angle.unwrap_or(DEFAULT_ANGLE);
        self.emit(angle);
    }

    fn detach(&mut self) {
        self.attached = false;
        if self.pwm.set_duty_cycle_fully_off().is_err() {
            self.faulted = true;
        }
    }

    fn is_attached(&self) -> bool {
        self.attached
    }

    fn write(&mut self, degrees: i32) {
        let degrees = degrees.clamp(SERVO_MIN_DEGREES, SERVO_MAX_DEGREES);
        self.angle = Some(degrees);
        if self.attached {
            self.emit(degrees);
        }
    }
}
