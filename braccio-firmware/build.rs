//! Build script for braccio-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates arm.toml at compile time

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

const JOINTS: [&str; 6] = ["base", "shoulder", "elbow", "wrist", "wrist_rotation", "gripper"];
const JOINT_KEYS: [&str; 4] = ["min", "max", "center", "step"];
const MOTION_KEYS: [&str; 2] = ["tick_ms", "snap_to_center"];

fn main() {
    setup_linker();
    validate_config();
}

/// Set up linker search paths for memory.x
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    // Copy memory.x to the output directory
    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    // Tell rustc where to find memory.x
    println!("cargo:rustc-link-search={}", out_dir.display());

    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Validate arm.toml configuration at compile time
///
/// Structural problems fail the build. Values the firmware would clamp or
/// accept as-is at runtime only produce warnings.
fn validate_config() {
    println!("cargo:rerun-if-changed=arm.toml");

    let config_path = Path::new("arm.toml");

    if !config_path.exists() {
        fail("arm.toml not found", &["The firmware embeds arm.toml; create one next to Cargo.toml."]);
    }

    let content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => fail("Failed to read arm.toml", &[&e.to_string()]),
    };

    let config: toml::Value = match toml::from_str(&content) {
        Ok(value) => value,
        Err(e) => {
            let msg = e.to_string();
            let lines: Vec<&str> = msg.lines().collect();
            fail("Invalid TOML syntax in arm.toml", &lines);
        }
    };

    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    let Some(root) = config.as_table() else {
        fail("arm.toml must be a table", &[]);
    };

    for (name, value) in root {
        match name.as_str() {
            "motion" => validate_motion(value, &mut errors),
            "joint" => validate_joints(value, &mut errors, &mut warnings),
            other => errors.push(format!("Unknown section [{}]", other)),
        }
    }

    for warning in &warnings {
        println!("cargo:warning=arm.toml: {}", warning);
    }

    if !errors.is_empty() {
        let lines: Vec<&str> = errors.iter().map(String::as_str).collect();
        fail("Invalid arm.toml configuration", &lines);
    }

    println!("cargo:warning=arm.toml validated successfully");
}

fn validate_motion(value: &toml::Value, errors: &mut Vec<String>) {
    let Some(motion) = value.as_table() else {
        errors.push("[motion] must be a table".to_string());
        return;
    };

    for (key, value) in motion {
        if !MOTION_KEYS.contains(&key.as_str()) {
            errors.push(format!("[motion] unknown key '{}'", key));
        }
        match (key.as_str(), value) {
            ("tick_ms", toml::Value::Integer(ms)) if *ms <= 0 || *ms > u32::MAX as i64 => {
                errors.push("[motion] tick_ms must be a positive integer".to_string());
            }
            ("tick_ms", toml::Value::Integer(_)) => {}
            ("tick_ms", _) => errors.push("[motion] tick_ms must be an integer".to_string()),
            ("snap_to_center", toml::Value::Boolean(_)) => {}
            ("snap_to_center", _) => {
                errors.push("[motion] snap_to_center must be true or false".to_string());
            }
            _ => {}
        }
    }
}

fn validate_joints(value: &toml::Value, errors: &mut Vec<String>, warnings: &mut Vec<String>) {
    let Some(joints) = value.as_table() else {
        errors.push("[joint.*] must be tables".to_string());
        return;
    };

    for (name, joint) in joints {
        if !JOINTS.contains(&name.as_str()) {
            errors.push(format!("[joint.{}] is not a joint of the arm", name));
            continue;
        }

        let Some(joint) = joint.as_table() else {
            errors.push(format!("[joint.{}] must be a table", name));
            continue;
        };

        for (key, value) in joint {
            if !JOINT_KEYS.contains(&key.as_str()) {
                errors.push(format!("[joint.{}] unknown key '{}'", name, key));
                continue;
            }
            match value {
                toml::Value::Integer(v) if *v < i32::MIN as i64 || *v > i32::MAX as i64 => {
                    errors.push(format!("[joint.{}] {} does not fit in i32", name, key));
                }
                toml::Value::Integer(v) if key != "step" && !(0..=180).contains(v) => {
                    warnings.push(format!("[joint.{}] {} = {} will be clamped to 0-180", name, key, v));
                }
                toml::Value::Integer(v) if key == "step" && *v <= 0 => {
                    warnings.push(format!("[joint.{}] step = {} never reaches its target", name, v));
                }
                toml::Value::Integer(_) => {}
                _ => errors.push(format!("[joint.{}] {} must be an integer", name, key)),
            }
        }

        let (default_min, default_max) = factory_limits(name);
        let min = joint.get("min").and_then(toml::Value::as_integer).unwrap_or(default_min);
        let max = joint.get("max").and_then(toml::Value::as_integer).unwrap_or(default_max);
        if min > max {
            warnings.push(format!("[joint.{}] min {} is above max {}", name, min, max));
        }
        if let Some(center) = joint.get("center").and_then(toml::Value::as_integer) {
            if center < min || center > max {
                warnings.push(format!(
                    "[joint.{}] center {} is outside {}-{}, target clamped",
                    name, center, min, max
                ));
            }
        }
    }
}

/// Limits a joint keeps when `arm.toml` does not set them
fn factory_limits(name: &str) -> (i64, i64) {
    match name {
        "shoulder" => (15, 165),
        "gripper" => (10, 73),
        _ => (0, 180),
    }
}

/// Abort the build with a boxed error message
fn fail(title: &str, lines: &[&str]) -> ! {
    let body = lines
        .iter()
        .map(|line| {
            let truncated = if line.len() > 62 {
                format!("{}...", &line[..59])
            } else {
                line.to_string()
            };
            format!("║  • {:<62} ║", truncated)
        })
        .collect::<Vec<_>>()
        .join("\n");

    panic!(
        "\n\
        ╔══════════════════════════════════════════════════════════════════╗\n\
        ║  ERROR: {:<56} ║\n\
        ╠══════════════════════════════════════════════════════════════════╣\n\
        {}\n\
        ╚══════════════════════════════════════════════════════════════════╝\n",
        title, body
    );
}
