//! Property tests for target clamping and per-tick stepping

mod common;

use braccio_core::{Joint, Pose};
use common::started_sim_arm;
use proptest::prelude::*;

fn any_joint() -> impl Strategy<Value = Joint> {
    (0usize..6).prop_map(|i| Joint::ALL[i])
}

fn any_pose() -> impl Strategy<Value = Pose> {
    prop::array::uniform6(-400i32..400).prop_map(Pose::new)
}

proptest! {
    #[test]
    fn absolute_target_is_clamped(joint in any_joint(), value in -1000i32..1000) {
        let mut arm = started_sim_arm();
        let (min, max) = (arm.min(joint), arm.max(joint));

        let outcome = arm.set_one_absolute(joint, value);

        prop_assert_eq!(arm.target(joint), value.clamp(min, max));
        prop_assert_eq!(outcome.is_applied(), value == arm.target(joint));
    }

    #[test]
    fn relative_target_is_clamped(joint in any_joint(), first in -200i32..200, delta in -200i32..200) {
        let mut arm = started_sim_arm();
        let (min, max) = (arm.min(joint), arm.max(joint));
        arm.set_one_relative(joint, first);
        let start = arm.target(joint);

        let outcome = arm.set_one_relative(joint, delta);

        prop_assert_eq!(arm.target(joint), (start + delta).clamp(min, max));
        prop_assert_eq!(outcome.is_applied(), (min..=max).contains(&(start + delta)));
    }

    #[test]
    fn set_all_absolute_is_and_of_joints(pose in any_pose()) {
        let mut arm = started_sim_arm();
        let expected = Joint::ALL
            .iter()
            .all(|&joint| (arm.min(joint)..=arm.max(joint)).contains(&pose[joint]));

        prop_assert_eq!(arm.set_all_absolute(pose), expected);

        // Every joint was written, clamped or not
        for joint in Joint::ALL {
            prop_assert_eq!(arm.target(joint), pose[joint].clamp(arm.min(joint), arm.max(joint)));
        }
    }

    #[test]
    fn set_all_relative_is_and_of_joints(deltas in any_pose()) {
        let mut arm = started_sim_arm();
        let before = Joint::ALL.map(|joint| arm.target(joint));
        let expected = Joint::ALL.iter().all(|&joint| {
            (arm.min(joint)..=arm.max(joint)).contains(&(before[joint.index()] + deltas[joint]))
        });

        prop_assert_eq!(arm.set_all_relative(deltas), expected);

        for joint in Joint::ALL {
            let raw = before[joint.index()] + deltas[joint];
            prop_assert_eq!(arm.target(joint), raw.clamp(arm.min(joint), arm.max(joint)));
        }
    }

    #[test]
    fn update_is_idempotent_at_target(pose in any_pose()) {
        let mut arm = started_sim_arm();
        arm.set_all_now(pose);
        let writes = Joint::ALL.map(|joint| arm.servo(joint).writes.len());

        for _ in 0..5 {
            prop_assert_eq!(arm.update(), 0);
        }

        for joint in Joint::ALL {
            prop_assert_eq!(arm.servo(joint).writes.len(), writes[joint.index()]);
            prop_assert_eq!(arm.current(joint), Some(pose[joint]));
        }
    }

    #[test]
    fn stepping_reaches_or_overshoots_in_bounded_ticks(
        joint in any_joint(),
        value in 0i32..=180,
        step in 1i32..12,
    ) {
        let mut arm = started_sim_arm();
        arm.set_delta(joint, step);
        let target = arm.set_one_absolute(joint, value).applied();
        let start = arm.current(joint).unwrap();
        let distance = start.abs_diff(target);
        let ticks = distance.div_ceil(step.unsigned_abs());

        prop_assert_eq!(arm.ticks_to_target(joint), Some(ticks));
        for _ in 0..ticks {
            arm.update();
        }

        let end = arm.current(joint).unwrap();
        let remainder = distance % step.unsigned_abs();
        if remainder == 0 {
            prop_assert_eq!(end, target);
        } else {
            // Last tick lands past the target by step - remainder, never corrected
            let overshoot = step.unsigned_abs() - remainder;
            prop_assert_eq!(end.abs_diff(target), overshoot);
            prop_assert!(overshoot <= step.unsigned_abs() - 1);
            prop_assert_eq!(end > target, target > start);
        }
    }
}
