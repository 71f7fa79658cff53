//! Left-hand wave: raise, wave, lower. Gravity-independent.

use std::f32::consts::PI;

use super::{ClipDefinition, ClipType, DurationRule, FallbackDuration, SynthInput};
use crate::interp::{Ease, PhaseSpan, PhaseTable};
use crate::joints::{Finger, JointId, Side};
use crate::pose::Pose;

const PHASES: PhaseTable = PhaseTable(&[
    PhaseSpan::new("raise", 0.0, 0.3, Ease::InOut),
    PhaseSpan::new("wave", 0.3, 0.9, Ease::InOut),
    PhaseSpan::new("lower", 0.9, 1.0, Ease::InOut),
]);

pub(super) const DEFINITION: ClipDefinition = ClipDefinition {
    clip: ClipType::Greeting,
    duration: DurationRule::Explicit {
        fallback: FallbackDuration::Clip,
    },
    phases: &["raise", "wave", "lower"],
    locomotion: false,
    constrained: false,
};

pub(super) fn phase(input: &SynthInput<'_>) -> &'static str {
    PHASES.name_at(input.progress).unwrap_or("raise")
}

/// Raised-arm target the wave oscillates around.
fn raised(pose: &mut Pose, k: f32) {
    pose.set(JointId::LeftShoulder, [-45.0 * k, 15.0 * k, -90.0 * k]);
    pose.set(JointId::LeftArm, [0.0, 70.0 * k, -45.0 * k]);
    pose.set(JointId::LeftForearm, [0.0, 0.0, -45.0 * k]);
    pose.set(JointId::LeftHand, [20.0 * k, 0.0, 0.0]);
}

pub(super) fn synthesize(input: &SynthInput<'_>) -> Pose {
    let mut pose = Pose::REST;
    let Some((idx, span)) = PHASES.locate(input.progress) else {
        return pose;
    };
    let t = span.eased(input.progress);

    match idx {
        0 => {
            raised(&mut pose, t);
            pose.set(JointId::LeftThumb1, [0.0, 0.0, -12.0 * t]);
            for finger in Finger::DIGITS {
                pose.set(JointId::finger(Side::Left, finger, 1), [-3.0 * t, 0.0, 0.0]);
            }
        }
        1 => {
            let wave = (t * PI * 4.0).sin();
            let shoulder = wave * 45.0;
            let arm = wave * 45.0;
            let hand = wave * 45.0;
            pose.set(
                JointId::LeftShoulder,
                [-45.0 + shoulder * 0.3, 15.0, -90.0 + shoulder * 0.5],
            );
            pose.set(JointId::LeftArm, [0.0, 70.0 + arm * 0.6, -45.0 + arm]);
            pose.set(JointId::LeftForearm, [0.0, 0.0, -45.0 + wave * 40.0]);
            pose.set(JointId::LeftHand, [20.0, 0.0, hand]);
            pose.set(JointId::LeftThumb1, [0.0, 0.0, -12.0]);
            for finger in Finger::DIGITS {
                pose.set(JointId::finger(Side::Left, finger, 1), [-3.0, 0.0, 0.0]);
            }
        }
        _ => {
            let k = 1.0 - t;
            raised(&mut pose, k);
            let relax = 6.0 * t;
            pose.set(JointId::LeftThumb1, [0.0, 0.0, -12.0 * k]);
            pose.set(JointId::LeftThumb2, [relax, 0.0, 0.0]);
            pose.set(JointId::LeftThumb3, [relax * 0.8, 0.0, 0.0]);
            for finger in Finger::DIGITS {
                pose.set(
                    JointId::finger(Side::Left, finger, 1),
                    [-3.0 * k + relax * 0.5, 0.0, 0.0],
                );
                pose.set(JointId::finger(Side::Left, finger, 2), [relax * 0.8, 0.0, 0.0]);
                pose.set(JointId::finger(Side::Left, finger, 3), [relax * 0.6, 0.0, 0.0]);
            }
        }
    }

    // Idle right hand, loosely curled.
    let relax = 8.0;
    pose.set(JointId::RightThumb1, [0.0, 0.0, relax]);
    pose.set(JointId::RightThumb2, [relax * 0.8, 0.0, 0.0]);
    pose.set(JointId::RightThumb3, [relax * 0.6, 0.0, 0.0]);
    pose.set_fingers(
        Side::Right,
        &Finger::DIGITS,
        [
            [relax * 0.5, 0.0, 0.0],
            [relax * 0.8, 0.0, 0.0],
            [relax * 0.6, 0.0, 0.0],
        ],
    );

    pose.set_root_translation(input.anchor());
    pose
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gravity::GravityContext;
    use crate::locomotion::LocomotionState;

    #[test]
    fn raise_wave_lower() {
        let loco = LocomotionState::default();
        let at = |p| synthesize(&SynthInput::new(p, GravityContext::default(), &loco, 2000.0));

        assert_eq!(at(0.0).rotation(JointId::LeftShoulder), [0.0, 0.0, 0.0]);
        let top = at(0.3);
        assert_eq!(top.rotation(JointId::LeftShoulder), [-45.0, 15.0, -90.0]);
        assert_ne!(at(0.4).rotation(JointId::LeftHand)[2], 0.0);
        let lowered = at(1.0);
        assert!(lowered.rotation(JointId::LeftArm).iter().all(|v| v.abs() < 1e-5));
        assert_eq!(lowered.rotation(JointId::RightShoulder), [0.0; 3]);
        assert_eq!(phase(&SynthInput::new(0.95, GravityContext::default(), &loco, 2000.0)), "lower");
    }
}
