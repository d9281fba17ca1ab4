//! Six-joint arm controller
//!
//! The controller tracks, per joint, the angle last written to the servo
//! (`current`) and the angle it is walking toward (`target`). Target setters
//! only touch `target`; [`ArmController::update`] moves every joint one step
//! toward its target and is the only place the servos are written during
//! normal motion.
//!
//! # Usage
//!
//! ```ignore
//! let mut arm = ArmController::new(servos, soft_start_pin, clock);
//! arm.start(true);
//!
//! arm.set_one_absolute(Joint::Gripper, 30);
//! loop {
//!     arm.update();
//!     clock.sleep_millis(10);
//! }
//! ```
//!
//! Stepping is a plain linear walk without clamping: when `step` does not
//! divide the remaining distance the last tick overshoots the target, and
//! later ticks keep bouncing around it. Use a step of 1 for exact arrival.

use braccio_hal::{Clock, OutputPin, Servo};

use super::outcome::SetOutcome;
use crate::cancel::{CancelToken, NeverCancel};
use crate::config::ArmConfig;
use crate::joint::{clamp_angle, Joint, JointConfig, JointMap, Pose};
use crate::soft_start::{SoftStartOutcome, SoftStartProfile};

/// Default update cadence of the blocking delay helper
pub const DEFAULT_TICK_MS: u32 = 10;

/// Snapshot of one joint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct JointState {
    pub joint: Joint,
    /// Last angle written to the servo, `None` before the first write
    pub current: Option<i32>,
    pub target: i32,
    pub config: JointConfig,
}

impl JointState {
    /// Check if the joint still has distance to cover
    pub fn is_moving(&self) -> bool {
        matches!(self.current, Some(current) if current != self.target)
    }
}

/// Arm controller owning six servos, the soft-start line and a clock
pub struct ArmController<S, P, C> {
    servos: JointMap<S>,
    soft_start: P,
    clock: C,
    joints: JointMap<JointConfig>,
    current: JointMap<Option<i32>>,
    target: JointMap<i32>,
    tick_ms: u32,
}

impl<S, P, C> ArmController<S, P, C>
where
    S: Servo,
    P: OutputPin,
    C: Clock,
{
    /// Create a controller with the factory joint limits
    pub fn new(servos: JointMap<S>, soft_start: P, clock: C) -> Self {
        let joints = JointMap::from_fn(JointConfig::factory);
        Self {
            servos,
            soft_start,
            clock,
            joints,
            current: JointMap::default(),
            target: joints.map(|config| config.center),
            tick_ms: DEFAULT_TICK_MS,
        }
    }

    /// Create a controller and apply `config` through the clamping setters
    pub fn with_config(servos: JointMap<S>, soft_start: P, clock: C, config: &ArmConfig) -> Self {
        let mut arm = Self::new(servos, soft_start, clock);
        arm.apply_config(config);
        arm
    }

    /// Apply limits, centers, steps and tick period from `config`
    ///
    /// Targets are reset to the new centers, clamped to the new limits;
    /// current positions are untouched.
    pub fn apply_config(&mut self, config: &ArmConfig) {
        for (joint, joint_config) in config.joints.iter() {
            self.set_joint_min(joint, joint_config.min);
            self.set_joint_max(joint, joint_config.max);
            self.set_joint_center(joint, joint_config.center);
            self.set_delta(joint, joint_config.step);
            self.set_one_absolute(joint, self.joints[joint].center);
        }
        self.tick_ms = config.tick_ms;
    }

    // ---- configuration ----

    /// Set the highest commandable angle, clamped to the global range
    pub fn set_joint_max(&mut self, joint: Joint, value: i32) {
        self.joints[joint].max = clamp_angle(value);
    }

    /// Set the lowest commandable angle, clamped to the global range
    pub fn set_joint_min(&mut self, joint: Joint, value: i32) {
        self.joints[joint].min = clamp_angle(value);
    }

    /// Set the home angle, clamped to the global range
    pub fn set_joint_center(&mut self, joint: Joint, offset: i32) {
        self.joints[joint].center = clamp_angle(offset);
    }

    /// Set the per-tick step, stored verbatim
    ///
    /// A step of 0 stalls the joint and a negative step walks it away from
    /// its target. Neither is rejected.
    pub fn set_delta(&mut self, joint: Joint, value: i32) {
        self.joints[joint].step = value;
    }

    /// Set the cadence used by [`Self::delay_with_updates`]
    pub fn set_tick_ms(&mut self, tick_ms: u32) {
        self.tick_ms = tick_ms;
    }

    /// Home angle of a joint
    pub fn center(&self, joint: Joint) -> i32 {
        self.joints[joint].center
    }

    /// Lowest commandable angle of a joint
    pub fn min(&self, joint: Joint) -> i32 {
        self.joints[joint].min
    }

    /// Highest commandable angle of a joint
    pub fn max(&self, joint: Joint) -> i32 {
        self.joints[joint].max
    }

    /// Per-tick step of a joint
    pub fn delta(&self, joint: Joint) -> i32 {
        self.joints[joint].step
    }

    /// Cadence used by [`Self::delay_with_updates`]
    pub fn tick_ms(&self) -> u32 {
        self.tick_ms
    }

    /// Full configuration of a joint
    pub fn joint_config(&self, joint: Joint) -> JointConfig {
        self.joints[joint]
    }

    /// Home angles of all joints
    pub fn centers(&self) -> Pose {
        self.joints.map(|config| config.center)
    }

    // ---- startup ----

    /// Energize the arm
    ///
    /// Drives the soft-start line low, attaches every servo, optionally
    /// snaps all joints to their centers, then runs the ~6 s power ramp.
    /// Blocks for the whole ramp.
    pub fn start(&mut self, snap_to_center: bool) -> SoftStartOutcome {
        self.start_with_cancel(snap_to_center, &NeverCancel)
    }

    /// [`Self::start`] with a token polled once per ramp pulse
    pub fn start_with_cancel<T>(&mut self, snap_to_center: bool, cancel: &T) -> SoftStartOutcome
    where
        T: CancelToken + ?Sized,
    {
        self.soft_start.set_low();
        for (_, servo) in self.servos.iter_mut() {
            servo.attach();
        }

        if snap_to_center {
            self.set_all_now(self.centers());
        }

        SoftStartProfile::braccio().run(&mut self.soft_start, &mut self.clock, cancel)
    }

    // ---- target setting ----

    /// Set one joint's target, clamped to its limits
    pub fn set_one_absolute(&mut self, joint: Joint, value: i32) -> SetOutcome {
        let applied = self.joints[joint].clamp(value);
        self.target[joint] = applied;
        SetOutcome::new(value, applied)
    }

    /// Move one joint's target by `delta`, clamped to its limits
    pub fn set_one_relative(&mut self, joint: Joint, delta: i32) -> SetOutcome {
        let requested = self.target[joint].saturating_add(delta);
        let applied = self.joints[joint].clamp(requested);
        self.target[joint] = applied;
        SetOutcome::new(requested, applied)
    }

    /// Set every joint's target in update order
    ///
    /// Returns true only if no joint needed clamping. All six joints are
    /// written even when an earlier one was clamped.
    pub fn set_all_absolute(&mut self, pose: Pose) -> bool {
        let mut all_applied = true;
        for (joint, &value) in pose.iter() {
            all_applied &= self.set_one_absolute(joint, value).is_applied();
        }
        all_applied
    }

    /// Move every joint's target by the matching delta, in update order
    ///
    /// Same result and no-short-circuit rule as [`Self::set_all_absolute`].
    pub fn set_all_relative(&mut self, deltas: Pose) -> bool {
        let mut all_applied = true;
        for (joint, &delta) in deltas.iter() {
            all_applied &= self.set_one_relative(joint, delta).is_applied();
        }
        all_applied
    }

    /// Write every joint straight to its servo, current and target
    ///
    /// No clamping and no interpolation. Meant for initialization and
    /// emergency repositioning; the caller must pass angles inside each
    /// joint's limits. The servo itself still bounds the signal to 0..=180.
    pub fn set_all_now(&mut self, pose: Pose) {
        for (joint, &value) in pose.iter() {
            self.write_joint(joint, value);
            self.target[joint] = value;
        }
    }

    /// Point every joint back at its center, stepping there on later ticks
    pub fn home(&mut self) -> bool {
        self.set_all_absolute(self.centers())
    }

    /// Stop motion where it is
    ///
    /// Each joint with a known position takes it as its new target, clamped
    /// to limits, so a joint that overshot steps back inside them.
    pub fn hold(&mut self) {
        for joint in Joint::ALL {
            if let Some(current) = self.current[joint] {
                self.set_one_absolute(joint, current);
            }
        }
    }

    // ---- motion ----

    /// Advance every joint one step toward its target
    ///
    /// Joints already at their target, or whose position was never written,
    /// are left alone. Returns how many servos were written.
    pub fn update(&mut self) -> usize {
        let mut written = 0;
        for joint in Joint::ALL {
            let Some(current) = self.current[joint] else {
                continue;
            };
            let target = self.target[joint];
            if current == target {
                continue;
            }

            let direction = if current <= target { 1 } else { -1 };
            let next = current.saturating_add(self.joints[joint].step.saturating_mul(direction));
            self.write_joint(joint, next);
            written += 1;
        }
        written
    }

    /// Block for `total_ms`, calling [`Self::update`] every configured tick
    ///
    /// Returns the number of updates performed.
    pub fn delay_with_updates(&mut self, total_ms: u32) -> u32 {
        self.delay_with_updates_until(total_ms, self.tick_ms, &NeverCancel)
    }

    /// Block for `total_ms`, calling [`Self::update`] every `tick_ms`
    pub fn delay_with_updates_every(&mut self, total_ms: u32, tick_ms: u32) -> u32 {
        self.delay_with_updates_until(total_ms, tick_ms, &NeverCancel)
    }

    /// [`Self::delay_with_updates_every`] with a token polled once per tick
    pub fn delay_with_updates_until<T>(&mut self, total_ms: u32, tick_ms: u32, cancel: &T) -> u32
    where
        T: CancelToken + ?Sized,
    {
        let start = self.clock.now_millis();
        let mut ticks: u32 = 0;

        while self.clock.elapsed_since(start) < u64::from(total_ms) {
            if cancel.is_cancelled() {
                break;
            }
            self.update();
            self.clock.sleep_millis(tick_ms);
            ticks = ticks.wrapping_add(1);
        }

        ticks
    }

    // ---- state ----

    /// Last angle written to a joint, `None` before the first write
    pub fn current(&self, joint: Joint) -> Option<i32> {
        self.current[joint]
    }

    /// Angle a joint is walking toward
    pub fn target(&self, joint: Joint) -> i32 {
        self.target[joint]
    }

    /// Snapshot of one joint
    pub fn joint_state(&self, joint: Joint) -> JointState {
        JointState {
            joint,
            current: self.current[joint],
            target: self.target[joint],
            config: self.joints[joint],
        }
    }

    /// Check if a joint still has distance to cover
    pub fn is_moving(&self, joint: Joint) -> bool {
        self.joint_state(joint).is_moving()
    }

    /// Check if no joint is moving
    ///
    /// Joints whose position is unknown never step, so they count as settled
    /// even when their target differs. After `start(false)` the arm reports
    /// settled until [`Self::set_all_now`] gives every joint a position.
    pub fn is_settled(&self) -> bool {
        Joint::ALL.into_iter().all(|joint| !self.is_moving(joint))
    }

    /// Updates needed for a joint to reach (or first pass) its target
    ///
    /// `None` when the position is unknown, or when the step can never
    /// close the distance (`step <= 0` with distance left).
    pub fn ticks_to_target(&self, joint: Joint) -> Option<u32> {
        let current = self.current[joint]?;
        let distance = current.abs_diff(self.target[joint]);
        if distance == 0 {
            return Some(0);
        }

        let step = self.joints[joint].step;
        if step <= 0 {
            return None;
        }
        Some(distance.div_ceil(step.unsigned_abs()))
    }

    // ---- hardware access ----

    /// Servo driving a joint
    pub fn servo(&self, joint: Joint) -> &S {
        &self.servos[joint]
    }

    /// Soft-start control line
    pub fn soft_start_pin(&self) -> &P {
        &self.soft_start
    }

    /// Clock used for ramp and delay timing
    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Give back the owned hardware
    pub fn release(self) -> (JointMap<S>, P, C) {
        (self.servos, self.soft_start, self.clock)
    }

    fn write_joint(&mut self, joint: Joint, value: i32) {
        self.servos[joint].write(value);
        self.current[joint] = Some(value);
    }
}
