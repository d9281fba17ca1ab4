//! Configuration type definitions

use crate::arm::DEFAULT_TICK_MS;
use crate::joint::{JointConfig, JointMap};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Complete arm configuration
///
/// Values are stored as written. Range clamping happens when the config is
/// applied to a controller, through the same setters a caller would use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ArmConfig {
    /// Per-joint limits, center and step
    pub joints: JointMap<JointConfig>,
    /// Update cadence in milliseconds
    pub tick_ms: u32,
    /// Snap every joint to its center during startup
    pub snap_to_center: bool,
}

impl Default for ArmConfig {
    fn default() -> Self {
        Self {
            joints: JointMap::from_fn(JointConfig::factory),
            tick_ms: DEFAULT_TICK_MS,
            snap_to_center: true,
        }
    }
}
