//! Front and back tuck flips.
//!
//! Both share one arc (1.2 m Earth reference). Whole-body pitch on `HIPS.x`
//! is 0 until lift-off, ramps linearly across the airborne window, and holds
//! at ±360 from touchdown on. Limb folding is driven by that rotation ratio.

use std::f32::consts::PI;

use super::preparation::preparation;
use super::projectile::Projectile;
use super::{ClipDefinition, ClipType, DurationRule, SynthInput};
use crate::interp::{ease_in_out, ease_out, window};
use crate::joints::{JointId, Side};
use crate::pose::Pose;

pub(super) const REFERENCE_HEIGHT: f32 = 1.2;
const TUCK_END: f32 = 0.85;

/// Joint amplitudes that differ between the two flip directions.
pub(super) struct FlipShape {
    /// +1 pitches forward, -1 backward.
    spin: f32,
    /// Upper-leg X during the tuck: `base + amp * tuck`.
    tuck_upleg: [f32; 2],
    /// Knee X during the tuck: `base + amp * tuck`.
    tuck_leg: [f32; 2],
    /// Spine, spine1 and neck X per unit of tuck.
    spine_curl: [f32; 3],
    /// Upper-leg and knee fold held at the start of the landing.
    landing_fold: [f32; 2],
    /// Root axis the small drift travels along (0 = x, 2 = z).
    drift_axis: usize,
}

pub(super) const FRONT: FlipShape = FlipShape {
    spin: 1.0,
    tuck_upleg: [-30.0, -110.0],
    tuck_leg: [45.0, 120.0],
    spine_curl: [35.0, 30.0, 20.0],
    landing_fold: [130.0, 165.0],
    drift_axis: 0,
};

pub(super) const BACK: FlipShape = FlipShape {
    spin: -1.0,
    tuck_upleg: [30.0, 80.0],
    tuck_leg: [5.0, 50.0],
    spine_curl: [-5.0, -5.0, -5.0],
    landing_fold: [100.0, 95.0],
    drift_axis: 2,
};

pub(super) const FRONT_DEFINITION: ClipDefinition = ClipDefinition {
    clip: ClipType::FrontFlip,
    duration: DurationRule::Projectile {
        reference_height: REFERENCE_HEIGHT,
    },
    phases: &["crouch", "tuck", "landing"],
    locomotion: false,
    constrained: false,
};

pub(super) const BACK_DEFINITION: ClipDefinition = ClipDefinition {
    clip: ClipType::BackFlip,
    ..FRONT_DEFINITION
};

enum Stage {
    Crouch,
    Tuck { ratio: f32 },
    Landing { ratio: f32, height_ratio: f32 },
}

struct Flight {
    height: f32,
    /// Fraction of the full turn done, [0, 1].
    ratio: f32,
    stage: Stage,
}

fn flight(input: &SynthInput<'_>) -> Flight {
    let proj = Projectile::earth_reference(REFERENCE_HEIGHT, input.gravity.gravity);
    let t = input.progress * proj.flight_time();
    let height = proj.height(t);
    let (lift_off, _) = proj.airborne_window();
    let ratio = proj.airborne_fraction(t);

    let stage = if t < lift_off {
        Stage::Crouch
    } else if ratio > 0.01 && ratio < TUCK_END {
        Stage::Tuck { ratio }
    } else {
        Stage::Landing {
            ratio,
            height_ratio: height / proj.apex(),
        }
    };
    Flight {
        height,
        ratio,
        stage,
    }
}

/// Whole-body pitch in degrees at `input.progress`.
pub(super) fn rotation(shape: &FlipShape, input: &SynthInput<'_>) -> f32 {
    shape.spin * 360.0 * flight(input).ratio
}

pub(super) fn phase(input: &SynthInput<'_>) -> &'static str {
    match flight(input).stage {
        Stage::Crouch => "crouch",
        Stage::Tuck { .. } => "tuck",
        Stage::Landing { .. } => "landing",
    }
}

fn curl_spine(pose: &mut Pose, curl: [f32; 3], amount: f32) {
    pose.set(JointId::Spine, [curl[0] * amount, 0.0, 0.0]);
    pose.set(JointId::Spine1, [curl[1] * amount, 0.0, 0.0]);
    pose.set(JointId::Neck, [curl[2] * amount, 0.0, 0.0]);
}

pub(super) fn synthesize(shape: &FlipShape, input: &SynthInput<'_>) -> Pose {
    let Flight {
        height,
        ratio,
        stage,
    } = flight(input);

    let mut pose = match stage {
        Stage::Crouch => preparation(1.0),
        Stage::Tuck { ratio } => {
            let mut pose = Pose::REST;
            let t = ((ratio - 0.05) / 0.8).max(0.0);
            let tuck = (t * PI * 0.6).sin() * (t * 2.0).min(1.0);
            let arms_in = ease_in_out(window(ratio, 0.05, 0.2));
            let shoulder_z = -60.0 - 30.0 * arms_in;
            for side in Side::BOTH {
                let s = side.sign();
                pose.set(
                    JointId::upleg(side),
                    [shape.tuck_upleg[0] + shape.tuck_upleg[1] * tuck, 0.0, -5.0 * s],
                );
                pose.set(
                    JointId::leg(side),
                    [shape.tuck_leg[0] + shape.tuck_leg[1] * tuck, 0.0, 0.0],
                );
                pose.set(JointId::shoulder(side), [-15.0, 0.0, shoulder_z * s]);
            }
            curl_spine(&mut pose, shape.spine_curl, tuck);
            pose
        }
        Stage::Landing {
            ratio,
            height_ratio,
        } => {
            let mut pose = Pose::REST;
            let t = ((ratio - TUCK_END) / (1.0 - TUCK_END))
                .max((0.2 - height_ratio) / 0.2)
                .clamp(0.0, 1.0);
            let landing = ease_out(t);
            let fold = (1.0 - landing).max(0.0);
            for side in Side::BOTH {
                let s = side.sign();
                pose.set(
                    JointId::upleg(side),
                    [-(shape.landing_fold[0] * fold - 15.0 * landing), 0.0, -5.0 * fold * s],
                );
                pose.set(
                    JointId::leg(side),
                    [shape.landing_fold[1] * fold + landing, 0.0, 0.0],
                );
                pose.set(
                    JointId::shoulder(side),
                    [-15.0 + 5.0 * landing, 0.0, (-90.0 + 70.0 * landing) * s],
                );
                pose.set(JointId::forearm(side), [15.0 * landing, 0.0, 0.0]);
                pose.set(JointId::hand(side), [5.0 * landing, 0.0, 0.0]);
            }
            curl_spine(&mut pose, shape.spine_curl, fold);
            pose
        }
    };

    pose.rotation_mut(JointId::Hips)[0] = shape.spin * 360.0 * ratio;

    let mut offset = [0.0, height, 0.0];
    offset[shape.drift_axis] = 0.03 * (input.progress * PI).sin();
    pose.set_root_translation(input.anchored(offset));
    pose
}
