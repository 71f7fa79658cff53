//! Free drift: three incommensurate waves layered across the body.

use std::f32::consts::PI;

use super::{ClipDefinition, ClipType, DurationRule, FallbackDuration, SynthInput};
use crate::joints::JointId;
use crate::pose::Pose;

pub(super) const PHASE: &str = "drift";

pub(super) const DEFINITION: ClipDefinition = ClipDefinition {
    clip: ClipType::ZeroGFloat,
    duration: DurationRule::Explicit {
        fallback: FallbackDuration::Clip,
    },
    phases: &[PHASE],
    locomotion: false,
    constrained: true,
};

pub(super) fn synthesize(input: &SynthInput<'_>) -> Pose {
    let mut pose = Pose::REST;
    let p = input.progress;
    let slow = (p * PI * 0.8).sin();
    let medium = (p * PI * 1.5).sin();
    let fast = (p * PI * 3.0).sin();

    pose.set(JointId::Spine, [slow * 8.0, medium * 5.0, fast * 3.0]);
    pose.set(JointId::Spine1, [slow * 6.0, medium * 3.0, -fast * 2.0]);
    pose.set(JointId::Spine2, [slow * 4.0, medium * 2.0, fast * 1.5]);
    pose.set(JointId::Hips, [slow * 3.0, medium * 4.0, -fast * 2.0]);

    pose.set(
        JointId::LeftArm,
        [-30.0 + slow * 20.0, medium * 25.0, -60.0 + fast * 15.0],
    );
    pose.set(
        JointId::RightArm,
        [-30.0 - slow * 20.0, -medium * 25.0, 60.0 - fast * 15.0],
    );
    pose.set(JointId::LeftForearm, [45.0 + medium * 20.0, fast * 8.0, 0.0]);
    pose.set(JointId::RightForearm, [45.0 - medium * 20.0, -fast * 8.0, 0.0]);
    pose.set(JointId::LeftHand, [fast * 12.0, medium * 8.0, slow * 5.0]);
    pose.set(JointId::RightHand, [-fast * 12.0, -medium * 8.0, -slow * 5.0]);

    pose.set(
        JointId::LeftUpLeg,
        [slow * 15.0, medium * 12.0, -10.0 + fast * 8.0],
    );
    pose.set(
        JointId::RightUpLeg,
        [-slow * 15.0, -medium * 12.0, 10.0 - fast * 8.0],
    );
    pose.set(JointId::LeftLeg, [30.0 + medium * 25.0, fast * 6.0, 0.0]);
    pose.set(JointId::RightLeg, [30.0 - medium * 25.0, -fast * 6.0, 0.0]);
    pose.set(JointId::LeftFoot, [slow * 10.0, medium * 8.0, 0.0]);
    pose.set(JointId::RightFoot, [-slow * 10.0, -medium * 8.0, 0.0]);

    pose.set(JointId::Neck, [medium * 6.0, slow * 8.0, fast * 4.0]);
    pose.set(JointId::Head, [-medium * 4.0, -slow * 5.0, -fast * 2.0]);

    pose.set_root_translation(input.anchor());
    pose
}
