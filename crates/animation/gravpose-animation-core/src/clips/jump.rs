//! Vertical jump. Root height follows the projectile arc for the whole clip;
//! the crouch, flight, and landing read only through joint rotation.

use super::projectile::{Projectile, LIFTOFF_HEIGHT};
use super::{ClipDefinition, ClipType, DurationRule, SynthInput};
use crate::interp::{ease_in_out, ease_out};
use crate::joints::{Finger, JointId, Side};
use crate::pose::Pose;

pub(super) const REFERENCE_HEIGHT: f32 = 0.8;
/// Wall-clock seconds of crouch, capped at 30 % of the clip.
const PREP_SECONDS: f32 = 0.3;
const MAX_PREP_RATIO: f32 = 0.3;

pub(super) const DEFINITION: ClipDefinition = ClipDefinition {
    clip: ClipType::Jump,
    duration: DurationRule::Projectile {
        reference_height: REFERENCE_HEIGHT,
    },
    phases: &["prep", "flight", "landing"],
    locomotion: false,
    constrained: false,
};

enum Stage {
    Prep(f32),
    Flight { height_ratio: f32 },
    Landing(f32),
}

struct Arc {
    height: f32,
    stage: Stage,
}

fn arc(input: &SynthInput<'_>) -> Arc {
    let proj = Projectile::earth_reference(REFERENCE_HEIGHT, input.gravity.gravity);
    let flight = proj.flight_time();
    let p = input.progress;
    let height = proj.height(p * flight);
    let prep_ratio = (PREP_SECONDS / flight).min(MAX_PREP_RATIO);

    let stage = if p < prep_ratio {
        Stage::Prep(ease_out(p / prep_ratio))
    } else if height > LIFTOFF_HEIGHT {
        Stage::Flight {
            height_ratio: (height / proj.apex()).min(1.0),
        }
    } else {
        let land = ((p - prep_ratio) / (1.0 - prep_ratio)).min(1.0);
        Stage::Landing(ease_out(land))
    };
    Arc { height, stage }
}

pub(super) fn phase(input: &SynthInput<'_>) -> &'static str {
    match arc(input).stage {
        Stage::Prep(_) => "prep",
        Stage::Flight { .. } => "flight",
        Stage::Landing(_) => "landing",
    }
}

pub(super) fn synthesize(input: &SynthInput<'_>) -> Pose {
    let mut pose = Pose::REST;
    let Arc { height, stage } = arc(input);

    match stage {
        Stage::Prep(prep) => {
            for side in Side::BOTH {
                let s = side.sign();
                pose.set(JointId::upleg(side), [-45.0 * prep, 0.0, -5.0 * s]);
                pose.set(JointId::leg(side), [85.0 * prep, 0.0, 0.0]);
                pose.set(JointId::foot(side), [-20.0 * prep, 0.0, 0.0]);
                pose.set(JointId::shoulder(side), [-20.0 * prep, 0.0, -10.0 * s]);
                pose.set(JointId::arm(side), [15.0 * prep, 15.0 * prep * s, -20.0 * s]);
                pose.set(JointId::forearm(side), [10.0 * prep, 0.0, 0.0]);
            }
            pose.set(JointId::Spine, [15.0 * prep, 0.0, 0.0]);
            pose.set(JointId::Spine1, [10.0 * prep, 0.0, 0.0]);
        }
        Stage::Flight { height_ratio } => {
            let reach = 80.0 * ease_in_out(height_ratio);
            for side in Side::BOTH {
                let s = side.sign();
                pose.set(JointId::upleg(side), [15.0, 0.0, -3.0 * s]);
                pose.set(JointId::foot(side), [-10.0, 0.0, 0.0]);
                pose.set(JointId::shoulder(side), [30.0, 0.0, -15.0 * s]);
                pose.set(JointId::arm(side), [-reach, 20.0 * s, -30.0 * s]);
                pose.set(JointId::forearm(side), [-20.0, 0.0, 0.0]);
                pose.set(JointId::hand(side), [-10.0, 0.0, -10.0 * s]);
                pose.set(JointId::finger(side, Finger::Thumb, 1), [0.0, 0.0, -15.0 * s]);
            }
        }
        Stage::Landing(impact) => {
            let k = 1.0 - impact;
            let tension = 5.0 * impact;
            for side in Side::BOTH {
                let s = side.sign();
                pose.set(JointId::upleg(side), [30.0 * k, 0.0, -3.0 * k * s]);
                pose.set(JointId::leg(side), [45.0 * k, 0.0, 0.0]);
                pose.set(JointId::foot(side), [-15.0 * k, 0.0, 0.0]);
                pose.set(
                    JointId::shoulder(side),
                    [30.0 * k - 10.0 * impact, 0.0, -(15.0 + 15.0 * impact) * s],
                );
                pose.set(
                    JointId::arm(side),
                    [
                        -80.0 * k + 10.0 * impact,
                        20.0 * k * s,
                        -(30.0 * k + 20.0 * impact) * s,
                    ],
                );
                pose.set(JointId::forearm(side), [-20.0 * k + 30.0 * impact, 0.0, 0.0]);
                pose.set(JointId::hand(side), [-10.0 * k, 0.0, -10.0 * k * s]);
                pose.set(
                    JointId::finger(side, Finger::Thumb, 1),
                    [0.0, 0.0, -15.0 * k * s + tension],
                );
                pose.set(
                    JointId::finger(side, Finger::Thumb, 2),
                    [tension * 0.8, 0.0, 0.0],
                );
                pose.set_fingers(
                    side,
                    &Finger::DIGITS,
                    [
                        [tension * 0.5, 0.0, 0.0],
                        [tension * 0.8, 0.0, 0.0],
                        [tension * 0.6, 0.0, 0.0],
                    ],
                );
            }
            pose.set(JointId::Spine, [10.0 * k, 0.0, 0.0]);
            pose.set(JointId::Spine1, [5.0 * k, 0.0, 0.0]);
            pose.set(JointId::Neck, [-5.0 * k, 0.0, 0.0]);
        }
    }

    pose.set_root_translation(input.anchored([0.0, height, 0.0]));
    pose
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gravity::GravityContext;
    use crate::locomotion::LocomotionState;

    #[test]
    fn phases_follow_the_arc() {
        let loco = LocomotionState::default();
        let at = |p| SynthInput::new(p, GravityContext::new(9.8), &loco, 0.0);
        assert_eq!(phase(&at(0.1)), "prep");
        assert_eq!(phase(&at(0.5)), "flight");
        assert_eq!(phase(&at(1.0)), "landing");
    }

    #[test]
    fn crouch_is_rotation_only() {
        let loco = LocomotionState::default();
        let inp = SynthInput::new(0.05, GravityContext::new(9.8), &loco, 0.0);
        let pose = synthesize(&inp);
        assert!(pose.rotation(JointId::LeftLeg)[0] > 0.0);
        assert!(pose.root_translation()[1] >= 0.0);
    }

    #[test]
    fn landing_returns_limbs_to_rest() {
        let loco = LocomotionState::default();
        let pose = synthesize(&SynthInput::new(1.0, GravityContext::new(9.8), &loco, 0.0));
        assert!(pose.rotation(JointId::LeftUpLeg).iter().all(|v| v.abs() < 1e-5));
        assert!(pose.root_translation()[1].abs() < 1e-4);
    }
}
