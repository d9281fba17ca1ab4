//! Board-agnostic motion logic for the Braccio arm
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Joint identifiers, limits and per-joint configuration
//! - The arm controller (target setting, per-tick stepping, startup)
//! - The soft-start power ramp
//! - Cooperative cancellation for the blocking routines
//! - The command set a single owning motion task applies
//! - Configuration types and the `arm.toml` parser
//!
//! Hardware is reached only through the traits in `braccio-hal`.

#![no_std]
#![deny(unsafe_code)]

pub mod arm;
pub mod cancel;
pub mod command;
pub mod config;
pub mod joint;
pub mod soft_start;

#[cfg(test)]
pub(crate) mod mock;

pub use arm::{ArmController, JointState, SetOutcome};
pub use cancel::{CancelFn, CancelToken, NeverCancel};
pub use command::{ArmCommand, CommandResult};
pub use config::ArmConfig;
pub use joint::{Joint, JointConfig, JointMap, Pose};
pub use soft_start::{SoftStartOutcome, SoftStartProfile};
