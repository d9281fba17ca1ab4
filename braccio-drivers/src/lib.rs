//! Hardware driver implementations
//!
//! This crate adapts embedded-hal 1.0 peripherals to the capability traits
//! in `braccio-hal`:
//!
//! - Hobby servos driven by any [`embedded_hal::pwm::SetDutyCycle`] channel
//! - Digital outputs from any [`embedded_hal::digital::OutputPin`]

#![no_std]
#![deny(unsafe_code)]

pub mod gpio;
pub mod servo;

pub use gpio::HalOutputPin;
pub use servo::{PwmServo, ServoTiming};
