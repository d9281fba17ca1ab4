//! Joint identifiers and per-joint configuration
//!
//! The arm has six fixed degrees of freedom. Everything that is "one per
//! joint" lives in a [`JointMap`], an array indexed by [`Joint`] so that
//! iteration order (base → shoulder → elbow → wrist → wrist rotation →
//! gripper) is fixed and observable.

use core::ops::{Index, IndexMut};

use braccio_hal::servo::{SERVO_MAX_DEGREES, SERVO_MIN_DEGREES};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Lowest angle any joint limit may be configured to
pub const ANGLE_MIN: i32 = SERVO_MIN_DEGREES;

/// Highest angle any joint limit may be configured to
pub const ANGLE_MAX: i32 = SERVO_MAX_DEGREES;

/// Number of joints on the arm
pub const JOINT_COUNT: usize = 6;

/// Default per-tick step in degrees
pub const DEFAULT_STEP: i32 = 1;

/// Clamp a configuration value into the global admissible range
pub fn clamp_angle(value: i32) -> i32 {
    value.clamp(ANGLE_MIN, ANGLE_MAX)
}

/// Joint identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Joint {
    /// Base rotation
    Base,
    /// Shoulder
    Shoulder,
    /// Elbow
    Elbow,
    /// Wrist pitch
    Wrist,
    /// Wrist rotation
    WristRotation,
    /// Gripper
    Gripper,
}

impl Joint {
    /// All joints in update order
    pub const ALL: [Joint; JOINT_COUNT] = [
        Joint::Base,
        Joint::Shoulder,
        Joint::Elbow,
        Joint::Wrist,
        Joint::WristRotation,
        Joint::Gripper,
    ];

    /// Position of this joint in [`Joint::ALL`]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Look up a joint by its position in [`Joint::ALL`]
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Name used in `arm.toml` section headers
    pub const fn name(self) -> &'static str {
        match self {
            Joint::Base => "base",
            Joint::Shoulder => "shoulder",
            Joint::Elbow => "elbow",
            Joint::Wrist => "wrist",
            Joint::WristRotation => "wrist_rotation",
            Joint::Gripper => "gripper",
        }
    }

    /// Parse a joint from its `arm.toml` name
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|joint| joint.name() == name)
    }
}

/// One value per joint, indexed by [`Joint`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct JointMap<T>([T; JOINT_COUNT]);

/// A full-arm angle set, in [`Joint::ALL`] order
pub type Pose = JointMap<i32>;

impl<T> JointMap<T> {
    /// Build a map from values in [`Joint::ALL`] order
    pub const fn new(values: [T; JOINT_COUNT]) -> Self {
        Self(values)
    }

    /// Build a map by evaluating `f` for every joint in order
    pub fn from_fn(mut f: impl FnMut(Joint) -> T) -> Self {
        Self(core::array::from_fn(|i| f(Joint::ALL[i])))
    }

    /// Iterate `(joint, value)` pairs in update order
    pub fn iter(&self) -> impl Iterator<Item = (Joint, &T)> {
        Joint::ALL.into_iter().zip(self.0.iter())
    }

    /// Iterate `(joint, value)` pairs mutably in update order
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (Joint, &mut T)> {
        Joint::ALL.into_iter().zip(self.0.iter_mut())
    }

    /// Transform every value, keeping joint association
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> JointMap<U> {
        JointMap(self.0.map(f))
    }

    /// Unwrap into the underlying array
    pub fn into_array(self) -> [T; JOINT_COUNT] {
        self.0
    }
}

impl Pose {
    /// Build a pose from six angles in base, shoulder, elbow, wrist,
    /// wrist rotation, gripper order
    pub const fn from_angles(
        base: i32,
        shoulder: i32,
        elbow: i32,
        wrist: i32,
        wrist_rotation: i32,
        gripper: i32,
    ) -> Self {
        Self([base, shoulder, elbow, wrist, wrist_rotation, gripper])
    }
}

impl<T> Index<Joint> for JointMap<T> {
    type Output = T;

    fn index(&self, joint: Joint) -> &T {
        &self.0[joint.index()]
    }
}

impl<T> IndexMut<Joint> for JointMap<T> {
    fn index_mut(&mut self, joint: Joint) -> &mut T {
        &mut self.0[joint.index()]
    }
}

impl<T> From<[T; JOINT_COUNT]> for JointMap<T> {
    fn from(values: [T; JOINT_COUNT]) -> Self {
        Self(values)
    }
}

/// Limits, home angle and speed of one joint
///
/// `min <= max` is the caller's responsibility. Only the range of each value
/// is enforced, by the controller's configuration setters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct JointConfig {
    /// Lowest commandable angle
    pub min: i32,
    /// Highest commandable angle
    pub max: i32,
    /// Home angle used by the startup snap
    pub center: i32,
    /// Degrees moved per update tick (not validated; 0 stalls, negative inverts)
    pub step: i32,
}

impl Default for JointConfig {
    fn default() -> Self {
        Self {
            min: ANGLE_MIN,
            max: ANGLE_MAX,
            center: 90,
            step: DEFAULT_STEP,
        }
    }
}

impl JointConfig {
    /// Factory configuration for a joint of the Braccio arm
    pub fn factory(joint: Joint) -> Self {
        match joint {
            Joint::Shoulder => Self {
                min: 15,
                max: 165,
                ..Self::default()
            },
            Joint::Gripper => Self {
                min: 10,
                max: 73,
                center: 50,
                ..Self::default()
            },
            Joint::Base | Joint::Elbow | Joint::Wrist | Joint::WristRotation => Self::default(),
        }
    }

    /// Clamp a value into `[min, max]`
    ///
    /// The lower bound is checked first, so an inverted `min > max` pair
    /// never panics: values below `min` resolve to `min`, everything else
    /// above `max` resolves to `max`.
    pub fn clamp(&self, value: i32) -> i32 {
        if value < self.min {
            self.min
        } else if value > self.max {
            self.max
        } else {
            value
        }
    }

    /// Check if a value is within `[min, max]`
    pub fn contains(&self, value: i32) -> bool {
        value >= self.min && value <= self.max
    }
}
