//! Minimal TOML parser for `arm.toml`
//!
//! Handles only the subset the arm configuration needs. It does NOT support
//! the full TOML grammar.
//!
//! Supported features:
//! - `[motion]` and `[joint.<name>]` section headers
//! - Key = value pairs (integer, boolean)
//! - Comments (# ...), whole-line or trailing
//!
//! Sections may appear in any order and keys not given keep their defaults.

use heapless::String as HString;

use super::types::ArmConfig;
use crate::joint::{Joint, JointConfig};

/// Longest section or key name kept in an error
pub const MAX_NAME_LEN: usize = 24;

/// Parse error, carrying the 1-based line number
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseError {
    /// Malformed `[...]` header
    InvalidSection { line: u16 },
    /// Header names a section or joint that does not exist
    UnknownSection {
        line: u16,
        name: HString<MAX_NAME_LEN>,
    },
    /// Key not valid in the current section
    UnknownKey {
        line: u16,
        key: HString<MAX_NAME_LEN>,
    },
    /// Line is not `key = value`
    MissingEquals { line: u16 },
    /// Value has the wrong type or is out of range
    InvalidValue { line: u16 },
}

impl ParseError {
    /// Line the error was found on
    pub fn line(&self) -> u16 {
        match self {
            Self::InvalidSection { line }
            | Self::UnknownSection { line, .. }
            | Self::UnknownKey { line, .. }
            | Self::MissingEquals { line }
            | Self::InvalidValue { line } => *line,
        }
    }
}

/// Current parsing context
#[derive(Debug, Clone, Copy)]
enum Section {
    Root,
    Motion,
    Joint(Joint),
}

/// Parse `arm.toml` contents on top of [`ArmConfig::default`]
pub fn parse_config(input: &str) -> Result<ArmConfig, ParseError> {
    let mut config = ArmConfig::default();
    let mut section = Section::Root;

    for (index, raw) in input.lines().enumerate() {
        let line = u16::try_from(index + 1).unwrap_or(u16::MAX);
        let text = strip_comment(raw).trim();

        if text.is_empty() {
            continue;
        }

        if text.starts_with('[') {
            section = parse_section_header(text, line)?;
            continue;
        }

        let (key, value) = text
            .split_once('=')
            .map(|(k, v)| (k.trim(), v.trim()))
            .ok_or(ParseError::MissingEquals { line })?;

        match section {
            Section::Root => return Err(unknown_key(key, line)),
            Section::Motion => parse_motion_key(&mut config, key, value, line)?,
            Section::Joint(joint) => {
                parse_joint_key(&mut config.joints[joint], key, value, line)?;
            }
        }
    }

    Ok(config)
}

fn strip_comment(line: &str) -> &str {
    match line.find('#') {
        Some(pos) => &line[..pos],
        None => line,
    }
}

fn parse_section_header(text: &str, line: u16) -> Result<Section, ParseError> {
    let name = text
        .strip_prefix('[')
        .and_then(|rest| rest.strip_suffix(']'))
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .ok_or(ParseError::InvalidSection { line })?;

    if name == "motion" {
        return Ok(Section::Motion);
    }

    if let Some(joint_name) = name.strip_prefix("joint.") {
        return Joint::from_name(joint_name.trim())
            .map(Section::Joint)
            .ok_or_else(|| ParseError::UnknownSection {
                line,
                name: truncated(name),
            });
    }

    Err(ParseError::UnknownSection {
        line,
        name: truncated(name),
    })
}

fn parse_motion_key(
    config: &mut ArmConfig,
    key: &str,
    value: &str,
    line: u16,
) -> Result<(), ParseError> {
    match key {
        "tick_ms" => {
            let tick_ms: u32 = value
                .parse()
                .map_err(|_| ParseError::InvalidValue { line })?;
            if tick_ms == 0 {
                return Err(ParseError::InvalidValue { line });
            }
            config.tick_ms = tick_ms;
        }
        "snap_to_center" => config.snap_to_center = parse_bool(value, line)?,
        _ => return Err(unknown_key(key, line)),
    }
    Ok(())
}

fn parse_joint_key(
    joint: &mut JointConfig,
    key: &str,
    value: &str,
    line: u16,
) -> Result<(), ParseError> {
    let slot = match key {
        "min" => &mut joint.min,
        "max" => &mut joint.max,
        "center" => &mut joint.center,
        "step" => &mut joint.step,
        _ => return Err(unknown_key(key, line)),
    };
    *slot = value
        .parse()
        .map_err(|_| ParseError::InvalidValue { line })?;
    Ok(())
}

fn parse_bool(value: &str, line: u16) -> Result<bool, ParseError> {
    match value {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(ParseError::InvalidValue { line }),
    }
}

fn unknown_key(key: &str, line: u16) -> ParseError {
    ParseError::UnknownKey {
        line,
        key: truncated(key),
    }
}

fn truncated(text: &str) -> HString<MAX_NAME_LEN> {
    let mut out = HString::new();
    for c in text.chars() {
        if out.push(c).is_err() {
            break;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
# Braccio arm configuration

[motion]
tick_ms = 20          # slower cadence
snap_to_center = false

[joint.gripper]
min = 15
max = 70
center = 40
step = 2

[joint.wrist_rotation]
center = 0
"#;

    #[test]
    fn test_parse_sample() {
        let config = parse_config(SAMPLE).unwrap();

        assert_eq!(config.tick_ms, 20);
        assert!(!config.snap_to_center);

        let gripper = config.joints[Joint::Gripper];
        assert_eq!((gripper.min, gripper.max, gripper.center, gripper.step), (15, 70, 40, 2));

        let wrist_rot = config.joints[Joint::WristRotation];
        assert_eq!(wrist_rot.center, 0);
        assert_eq!(wrist_rot.max, 180);

        // Untouched joints keep factory values
        assert_eq!(config.joints[Joint::Shoulder], JointConfig::factory(Joint::Shoulder));
    }

    #[test]
    fn test_empty_input_is_default() {
        assert_eq!(parse_config("").unwrap(), ArmConfig::default());
        assert_eq!(parse_config("# only a comment\n\n").unwrap(), ArmConfig::default());
    }

    #[test]
    fn test_out_of_range_values_are_kept_raw() {
        let config = parse_config("[joint.base]\nmax = 250\nstep = -3\n").unwrap();
        assert_eq!(config.joints[Joint::Base].max, 250);
        assert_eq!(config.joints[Joint::Base].step, -3);
    }

    #[test]
    fn test_unknown_joint() {
        let err = parse_config("[joint.knee]\nmin = 0\n").unwrap_err();
        assert!(matches!(err, ParseError::UnknownSection { line: 1, .. }));
        if let ParseError::UnknownSection { name, .. } = err {
            assert_eq!(name.as_str(), "joint.knee");
        }
    }

    #[test]
    fn test_unknown_key() {
        let err = parse_config("[motion]\nspeed = 3\n").unwrap_err();
        assert_eq!(err.line(), 2);
        assert!(matches!(err, ParseError::UnknownKey { .. }));
    }

    #[test]
    fn test_key_outside_section() {
        let err = parse_config("tick_ms = 10\n").unwrap_err();
        assert!(matches!(err, ParseError::UnknownKey { line: 1, .. }));
    }

    #[test]
    fn test_invalid_values() {
        assert_eq!(
            parse_config("[motion]\ntick_ms = 0\n").unwrap_err(),
            ParseError::InvalidValue { line: 2 }
        );
        assert_eq!(
            parse_config("[motion]\nsnap_to_center = yes\n").unwrap_err(),
            ParseError::InvalidValue { line: 2 }
        );
        assert_eq!(
            parse_config("[joint.elbow]\nmin = low\n").unwrap_err(),
            ParseError::InvalidValue { line: 2 }
        );
    }

    #[test]
    fn test_malformed_lines() {
        assert_eq!(
            parse_config("[motion\n").unwrap_err(),
            ParseError::InvalidSection { line: 1 }
        );
        assert_eq!(
            parse_config("[]\n").unwrap_err(),
            ParseError::InvalidSection { line: 1 }
        );
        assert_eq!(
            parse_config("[motion]\ntick_ms 10\n").unwrap_err(),
            ParseError::MissingEquals { line: 2 }
        );
    }

    #[test]
    fn test_long_names_are_truncated() {
        let err = parse_config("[motion]\nthis_key_name_is_much_longer_than_allowed = 1\n")
            .unwrap_err();
        if let ParseError::UnknownKey { key, .. } = err {
            assert_eq!(key.len(), MAX_NAME_LEN);
        } else {
            panic!("expected UnknownKey");
        }
    }
}
