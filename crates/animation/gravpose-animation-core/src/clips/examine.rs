//! Bent-over inspection of an object held in both hands.

use std::f32::consts::PI;

use super::{ClipDefinition, ClipType, DurationRule, FallbackDuration, SynthInput};
use crate::joints::JointId;
use crate::pose::Pose;

pub(super) const PHASE: &str = "observe";

/// Forward lean the whole posture is built on (degrees).
const BASE_LEAN: f32 = 25.0;

pub(super) const DEFINITION: ClipDefinition = ClipDefinition {
    clip: ClipType::Examine,
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
    let wave = (p * PI * 2.0).sin();
    let focus = (p * PI * 4.0).sin();
    let curious = (p * PI * 1.5).sin();
    let lean = BASE_LEAN;

    pose.set(JointId::Spine, [lean + wave * 8.0, curious * 5.0, 0.0]);
    pose.set(JointId::Spine1, [lean * 0.7 + wave * 5.0, curious * 3.0, 0.0]);
    pose.set(JointId::Spine2, [lean * 0.5 + wave * 3.0, -curious * 2.0, 0.0]);

    pose.set(JointId::LeftUpLeg, [lean * 0.8, 0.0, -8.0]);
    pose.set(JointId::RightUpLeg, [lean * 0.8, 0.0, 8.0]);
    pose.set(JointId::LeftLeg, [lean * 0.6, 0.0, 0.0]);
    pose.set(JointId::RightLeg, [lean * 0.6, 0.0, 0.0]);

    pose.set(
        JointId::LeftArm,
        [-40.0 + wave * 15.0, focus * 12.0, -35.0 + curious * 10.0],
    );
    pose.set(
        JointId::RightArm,
        [-45.0 + wave * 12.0, -focus * 10.0, 40.0 + curious * 8.0],
    );
    pose.set(JointId::LeftForearm, [50.0 + focus * 20.0, wave * 5.0, 0.0]);
    pose.set(JointId::RightForearm, [55.0 + focus * 18.0, -wave * 4.0, 0.0]);
    pose.set(JointId::LeftHand, [focus * 8.0, wave * 6.0, curious * 4.0]);
    pose.set(JointId::RightHand, [-focus * 6.0, -wave * 5.0, -curious * 3.0]);

    pose.set(
        JointId::Neck,
        [lean * 0.8 + focus * 6.0, wave * 8.0, curious * 3.0],
    );
    pose.set(
        JointId::Head,
        [lean * 0.5 + focus * 4.0, -wave * 5.0, -curious * 2.0],
    );

    pose.set(JointId::LeftShoulder, [wave * 3.0, focus * 4.0, -curious * 2.0]);
    pose.set(JointId::RightShoulder, [-wave * 2.0, -focus * 3.0, curious * 2.0]);

    pose.set_root_translation(input.anchor());
    pose
}
