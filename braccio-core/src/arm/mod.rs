//! Arm controller
//!
//! Per-joint current/target tracking with bounded per-tick stepping.

pub mod controller;
pub mod outcome;

pub use controller::{ArmController, JointState, DEFAULT_TICK_MS};
pub use outcome::SetOutcome;
