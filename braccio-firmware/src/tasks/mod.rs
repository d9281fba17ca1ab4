//! Embassy async tasks
//!
//! Each task runs independently and communicates via channels/signals.

pub mod motion;
pub mod sequence;

pub use motion::{motion_task, FirmwareArm};
pub use sequence::sequence_task;
