//! Surface sample collection: approach, crouch, collect, rise.

use std::f32::consts::PI;

use super::{ClipDefinition, ClipType, DurationRule, FallbackDuration, SynthInput};
use crate::interp::{Ease, PhaseSpan, PhaseTable};
use crate::joints::{JointId, Side};
use crate::pose::Pose;

const PHASES: PhaseTable = PhaseTable(&[
    PhaseSpan::new("approach", 0.0, 0.3, Ease::InOut),
    PhaseSpan::new("crouch", 0.3, 0.6, Ease::InOut),
    PhaseSpan::new("collect", 0.6, 0.8, Ease::InOut),
    PhaseSpan::new("rise", 0.8, 1.0, Ease::InOut),
]);

pub(super) const DEFINITION: ClipDefinition = ClipDefinition {
    clip: ClipType::Sample,
    duration: DurationRule::Explicit {
        fallback: FallbackDuration::Clip,
    },
    phases: &["approach", "crouch", "collect", "rise"],
    locomotion: false,
    constrained: true,
};

pub(super) fn phase(input: &SynthInput<'_>) -> &'static str {
    PHASES.name_at(input.progress).unwrap_or("approach")
}

/// Both hips and knees folded by `bend` with the given hip splay.
fn squat(pose: &mut Pose, hip: f32, knee: f32, splay: f32) {
    for side in Side::BOTH {
        pose.set(JointId::upleg(side), [hip, 0.0, -splay * side.sign()]);
        pose.set(JointId::leg(side), [knee, 0.0, 0.0]);
    }
}

pub(super) fn synthesize(input: &SynthInput<'_>) -> Pose {
    let mut pose = Pose::REST;
    let Some((idx, span)) = PHASES.locate(input.progress) else {
        return pose;
    };
    let t = span.local(input.progress);
    let k = span.eased(input.progress);
    let arc = (t * PI).sin();

    match idx {
        0 => {
            let lean = k * 20.0;
            pose.set(JointId::Spine, [lean, 0.0, 0.0]);
            pose.set(JointId::Spine1, [lean * 0.7, 0.0, 0.0]);
            pose.set(JointId::LeftArm, [-lean, arc * 10.0, -20.0]);
            pose.set(JointId::RightArm, [-lean, -arc * 8.0, 25.0]);
            pose.set(JointId::Neck, [lean * 0.5, (t * PI * 2.0).sin() * 3.0, 0.0]);
        }
        1 => {
            let crouch = k * 60.0;
            pose.set(JointId::Spine, [crouch * 0.8, 0.0, 0.0]);
            pose.set(JointId::Spine1, [crouch * 0.6, 0.0, 0.0]);
            squat(&mut pose, crouch * 1.5, crouch * 2.0, 10.0);
            pose.set(JointId::LeftArm, [-crouch * 0.3, 0.0, -30.0]);
            pose.set(JointId::RightArm, [-crouch * 0.8, arc * 15.0, 40.0]);
            pose.set(JointId::RightForearm, [crouch * 0.8, 0.0, 0.0]);
            pose.set(JointId::Neck, [crouch * 0.6, 0.0, 0.0]);
            pose.set(JointId::Head, [crouch * 0.4, (t * PI * 3.0).sin() * 5.0, 0.0]);
        }
        2 => {
            let scrape = (t * PI * 6.0).sin() * 5.0;
            let reach = k * 45.0;
            pose.set(JointId::Spine, [reach * 0.8, scrape * 0.5, 0.0]);
            squat(&mut pose, reach * 1.5, reach * 2.0, 10.0);
            pose.set(JointId::LeftArm, [-reach * 0.3, scrape, -30.0]);
            pose.set(JointId::RightArm, [-reach * 0.9, scrape * 2.0, 50.0]);
            pose.set(
                JointId::RightForearm,
                [reach * 0.9 + scrape * 3.0, scrape * 2.0, 0.0],
            );
            pose.set(JointId::RightHand, [scrape * 4.0, scrape * 2.0, scrape]);
            pose.set(JointId::Neck, [reach * 0.7, scrape * 0.3, 0.0]);
            pose.set(JointId::Head, [reach * 0.5 + scrape, scrape * 0.5, 0.0]);
        }
        _ => {
            let lowered = (1.0 - k) * 45.0;
            pose.set(JointId::Spine, [lowered * 0.6, 0.0, 0.0]);
            pose.set(JointId::Spine1, [lowered * 0.4, 0.0, 0.0]);
            squat(&mut pose, lowered * 1.2, lowered * 1.5, 8.0);
            pose.set(JointId::LeftArm, [-lowered * 0.2, 0.0, -25.0]);
            pose.set(JointId::RightArm, [-40.0 + lowered * 0.5, arc * 8.0, 30.0]);
            pose.set(JointId::RightForearm, [60.0 + arc * 10.0, 0.0, 0.0]);
            pose.set(JointId::Neck, [lowered * 0.3, 0.0, 0.0]);
            pose.set(JointId::Head, [lowered * 0.2, arc * 3.0, 0.0]);
        }
    }

    pose.set_root_translation(input.anchor());
    pose
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gravity::GravityContext;
    use crate::locomotion::LocomotionState;

    #[test]
    fn crouch_deepens_then_rises() {
        let loco = LocomotionState::default();
        let at = |p| synthesize(&SynthInput::new(p, GravityContext::default(), &loco, 2000.0));
        let knee = |p| at(p).rotation(JointId::LeftLeg)[0];
        assert_eq!(knee(0.1), 0.0);
        assert!(knee(0.59) > knee(0.4));
        assert!(knee(0.99) < knee(0.85));
        assert_eq!(
            phase(&SynthInput::new(0.7, GravityContext::default(), &loco, 2000.0)),
            "collect"
        );
    }
}
