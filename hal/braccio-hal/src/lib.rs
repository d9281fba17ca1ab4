//! Braccio Hardware Abstraction Layer
//!
//! This crate defines the hardware capabilities the arm controller consumes.
//! Chip-specific code (embassy-rp, embedded-hal adapters, test mocks)
//! implements them so the motion logic stays board-agnostic.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Application (braccio-firmware)         │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  braccio-core (ArmController)           │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  braccio-hal (this crate - traits)      │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  braccio-drivers (embedded-hal 1.0)     │
//! └─────────────────────────────────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::OutputPin`] - Digital output (soft-start control line)
//! - [`servo::Servo`] - Hobby servo channel, one per joint
//! - [`clock::Clock`] - Wall-clock reads and blocking sleeps

#![no_std]
#![deny(unsafe_code)]

pub mod clock;
pub mod gpio;
pub mod servo;

// Re-export key traits at crate root for convenience
pub use clock::Clock;
pub use gpio::OutputPin;
pub use servo::Servo;
