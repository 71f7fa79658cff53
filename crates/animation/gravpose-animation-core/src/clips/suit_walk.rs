//! Pressurised-suit walk in place.
//!
//! Step height grows as gravity weakens (`35 (2 - m)`), arm swing and lean
//! shrink with it. Below 1 m/s² the whole pose is damped and the arms pick
//! up a slow floating gesture.

use std::f32::consts::PI;

use super::{ClipDefinition, ClipType, DurationRule, FallbackDuration, SynthInput};
use crate::interp::ease_in_out;
use crate::joints::{JointId, Side};
use crate::pose::Pose;

/// Suit stiffness applied to every amplitude.
const SUIT_FACTOR: f32 = 0.7;
/// Gravity below which the float damping kicks in (m/s²).
const FLOAT_THRESHOLD: f32 = 1.0;

pub(super) const DEFINITION: ClipDefinition = ClipDefinition {
    clip: ClipType::SuitWalk,
    duration: DurationRule::Explicit {
        fallback: FallbackDuration::Clip,
    },
    phases: &["leftStep", "rightStep"],
    locomotion: false,
    constrained: true,
};

fn step(progress: f32) -> (Side, f32) {
    let cycle = (progress * 2.0).rem_euclid(2.0);
    let side = if cycle < 1.0 { Side::Left } else { Side::Right };
    (side, cycle.rem_euclid(1.0))
}

pub(super) fn phase(input: &SynthInput<'_>) -> &'static str {
    match step(input.progress).0 {
        Side::Left => "leftStep",
        Side::Right => "rightStep",
    }
}

pub(super) fn synthesize(input: &SynthInput<'_>) -> Pose {
    let mut pose = Pose::REST;
    let m = input.gravity.multiplier;
    let (stepping, t) = step(input.progress);
    let support = stepping.opposite();
    let s = stepping.sign();
    let smooth = ease_in_out(t);

    let step_height = 35.0 * (2.0 - m) * SUIT_FACTOR;
    let arm_swing = 45.0 * m.min(1.2) * SUIT_FACTOR;
    let lean = 12.0 * m.min(1.0) * SUIT_FACTOR;

    let primary = (t * PI).sin();
    let secondary = (t * PI * 2.0).sin();
    let rock = (t * PI * 2.0).sin() * 4.0;
    let twist = (t * PI).sin() * 6.0;
    let undulation = (t * PI * 1.5).sin() * 3.0;

    let lift = primary * step_height;
    let knee = (t * PI * 1.2).sin() * step_height * 1.8;
    pose.set(
        JointId::upleg(stepping),
        [-lift * 0.7 + undulation, s * (t * PI * 1.5).sin() * 5.0, -s * 5.0],
    );
    pose.set(JointId::leg(stepping), [knee, 0.0, 0.0]);
    pose.set(
        JointId::foot(stepping),
        [-lift * 0.4 + (t * PI * 2.0).sin() * 8.0, 0.0, 0.0],
    );
    pose.set(JointId::toe_base(stepping), [(lift * 0.3).max(0.0), 0.0, 0.0]);

    pose.set(
        JointId::upleg(support),
        [lift * 0.4 + undulation * 0.5, 0.0, s * 8.0],
    );
    pose.set(JointId::leg(support), [(lift * 0.15).max(0.0), 0.0, 0.0]);
    pose.set(JointId::foot(support), [lift * 0.1, 0.0, 0.0]);

    pose.set(
        JointId::arm(stepping),
        [arm_swing * 0.6 * smooth, s * secondary * 8.0, -s * (15.0 + twist)],
    );
    pose.set(
        JointId::arm(support),
        [-arm_swing * 0.8 * smooth, -s * secondary * 6.0, s * (15.0 + twist)],
    );
    pose.set(JointId::forearm(stepping), [(arm_swing * 0.3).max(0.0), 0.0, 0.0]);
    pose.set(JointId::forearm(support), [(arm_swing * 0.4).max(0.0), 0.0, 0.0]);

    pose.set(
        JointId::shoulder(stepping),
        [twist * 0.4, s * arm_swing * 0.1, -s * twist * 0.5],
    );
    pose.set(
        JointId::shoulder(support),
        [-twist * 0.4, -s * arm_swing * 0.1, s * twist * 0.5],
    );

    pose.set(
        JointId::Spine,
        [rock + undulation, s * rock * 0.6, s * lean * 0.4],
    );
    pose.set(JointId::Spine1, [undulation * 0.7, s * rock * 0.4, s * lean * 0.3]);
    pose.set(JointId::Spine2, [undulation * 0.5, s * rock * 0.2, s * lean * 0.2]);
    pose.set(
        JointId::Hips,
        [rock * 0.3, s * (rock * 0.4 + twist * 0.3), -s * lean * 0.3],
    );
    pose.set(
        JointId::Neck,
        [-rock * 0.4 + undulation * 0.2, rock * 0.3, -twist * 0.2],
    );
    pose.set(JointId::Head, [rock * 0.2, -rock * 0.15, twist * 0.1]);

    let g = input.gravity.gravity;
    if g < FLOAT_THRESHOLD {
        let float = (1.0 - g) * 0.6;
        pose.scale_rotations(1.0 - float * 0.4);

        let gesture = (input.progress * PI * 3.0).sin() * 15.0 * float;
        let left = pose.rotation_mut(JointId::LeftArm);
        left[0] += gesture;
        left[2] -= gesture * 0.8;
        let right = pose.rotation_mut(JointId::RightArm);
        right[0] -= gesture;
        right[2] += gesture * 0.8;
    }

    pose.set_root_translation(input.anchor());
    pose
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gravity::GravityContext;
    use crate::locomotion::LocomotionState;

    fn knee_peak(g: f32) -> f32 {
        let loco = LocomotionState::default();
        (0..=100)
            .map(|i| {
                let inp = SynthInput::new(i as f32 / 100.0, GravityContext::new(g), &loco, 2000.0);
                synthesize(&inp).rotation(JointId::LeftLeg)[0]
            })
            .fold(f32::MIN, f32::max)
    }

    #[test]
    fn steps_are_higher_in_low_gravity() {
        assert!(knee_peak(1.6) > knee_peak(9.8));
    }

    #[test]
    fn zero_g_damps_the_gait() {
        let loco = LocomotionState::default();
        let ctx = GravityContext::new(0.0);
        let inp = SynthInput::new(0.25, ctx, &loco, 2000.0);
        let damped = synthesize(&inp);
        let mut reference = SynthInput::new(0.25, ctx, &loco, 2000.0);
        reference.gravity.gravity = 1.0;
        let undamped = synthesize(&reference);
        let k = undamped.rotation(JointId::LeftLeg)[0];
        assert!((damped.rotation(JointId::LeftLeg)[0] - k * (1.0 - 0.6 * 0.4)).abs() < 1e-3);
    }

    #[test]
    fn alternates_feet() {
        assert_eq!(step(0.2).0, Side::Left);
        assert_eq!(step(0.7).0, Side::Right);
    }
}
