//! Embedded arm configuration
//!
//! `arm.toml` is compiled into the firmware (and validated by build.rs).
//! Edit it and rebuild to change limits, centers or speeds.

use defmt::*;

use braccio_core::config::parse_config;
use braccio_core::{ArmConfig, Joint};

const EMBEDDED_CONFIG: &str = include_str!("../arm.toml");

/// Parse the embedded configuration, falling back to factory defaults
pub fn load_config() -> ArmConfig {
    let config = match parse_config(EMBEDDED_CONFIG) {
        Ok(config) => {
            info!("Parsed embedded arm.toml");
            config
        }
        Err(e) => {
            error!("arm.toml line {}: {:?}", e.line(), e);
            error!("Using factory joint configuration");
            ArmConfig::default()
        }
    };

    for joint in Joint::ALL {
        let j = config.joints[joint];
        debug!(
            "{}: min={} max={} center={} step={}",
            joint.name(),
            j.min,
            j.max,
            j.center,
            j.step
        );
    }
    info!(
        "Motion: tick={}ms snap_to_center={}",
        config.tick_ms, config.snap_to_center
    );

    config
}
