//! Lunar bounding gait: long, high bounds at a fixed 1.5 cycles per clip.

use std::f32::consts::PI;

use super::{ClipDefinition, ClipType, DurationRule, FallbackDuration, SynthInput};
use crate::joints::{JointId, Side};
use crate::pose::Pose;

const CYCLES_PER_CLIP: f32 = 1.5;

pub(super) const DEFINITION: ClipDefinition = ClipDefinition {
    clip: ClipType::MoonWalk,
    duration: DurationRule::Explicit {
        fallback: FallbackDuration::Clip,
    },
    phases: &["leftBound", "rightBound"],
    locomotion: false,
    constrained: true,
};

fn bound(progress: f32) -> (Side, f32) {
    let cycle = (progress * CYCLES_PER_CLIP).rem_euclid(2.0);
    let side = if cycle < 1.0 { Side::Left } else { Side::Right };
    (side, cycle.rem_euclid(1.0))
}

pub(super) fn phase(input: &SynthInput<'_>) -> &'static str {
    match bound(input.progress).0 {
        Side::Left => "leftBound",
        Side::Right => "rightBound",
    }
}

pub(super) fn synthesize(input: &SynthInput<'_>) -> Pose {
    let mut pose = Pose::REST;
    let (leading, t) = bound(input.progress);
    let trailing = leading.opposite();
    let s = leading.sign();

    let bounce = (t * PI).sin() * 60.0;
    let arm_float = (t * PI * 1.2).sin() * 25.0;
    let flutter = (t * PI * 3.0).sin();

    pose.set(
        JointId::upleg(leading),
        [-bounce * 0.5, s * (t * PI * 2.0).sin() * 8.0, -s * 10.0],
    );
    pose.set(JointId::leg(leading), [bounce * 1.2, 0.0, 0.0]);
    pose.set(JointId::foot(leading), [-bounce * 0.3, 0.0, 0.0]);
    pose.set(JointId::upleg(trailing), [bounce * 0.3, 0.0, s * 10.0]);
    pose.set(JointId::leg(trailing), [(bounce * 0.2).max(0.0), 0.0, 0.0]);

    pose.set(
        JointId::arm(leading),
        [arm_float, s * flutter * 15.0, -s * (30.0 + arm_float)],
    );
    pose.set(
        JointId::arm(trailing),
        [-arm_float * 1.5, -s * flutter * 10.0, s * (40.0 + arm_float)],
    );

    let body = (t * PI).sin() * 8.0;
    let twist = (t * PI * 2.0).sin();
    pose.set(JointId::Spine, [body, twist * 4.0, 0.0]);
    pose.set(JointId::Spine1, [body * 0.7, 0.0, 0.0]);
    pose.set(JointId::Hips, [body * 0.5, (t * PI * 1.5).sin() * 3.0, 0.0]);
    pose.set(JointId::Neck, [-body * 0.3, twist * 3.0, 0.0]);
    pose.set(JointId::Head, [body * 0.2, 0.0, 0.0]);

    pose.set_root_translation(input.anchor());
    pose
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_and_a_half_cycles() {
        assert_eq!(bound(0.0), (Side::Left, 0.0));
        assert_eq!(bound(0.5).0, Side::Left);
        assert_eq!(bound(0.7).0, Side::Right);
        let (side, t) = bound(1.0);
        assert_eq!(side, Side::Right);
        assert!((t - 0.5).abs() < 1e-6);
    }
}
