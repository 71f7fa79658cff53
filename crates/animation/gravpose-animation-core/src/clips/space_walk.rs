//! Low-gravity bounding walk.
//!
//! Cadence follows `1.25 * sqrt(g / 9.8)` steps per second, so steps slow
//! down as gravity weakens, while sway, float height, and limb amplitude grow
//! with `sqrt(9.8 / g)`. Each step is a small hop on its own projectile arc.

use std::f32::consts::PI;

use super::{ClipDefinition, ClipType, DurationRule, SynthInput};
use crate::gravity::EARTH_GRAVITY;
use crate::interp::{ease_in, ease_out};
use crate::joints::{Finger, JointId, Side};
use crate::pose::Pose;

const EDGE: f32 = 0.15;
const BASE_STEP_FREQUENCY: f32 = 1.25;
/// Earth hop height for a single step (m).
const BASE_HOP_HEIGHT: f32 = 0.15;
const STEP_LENGTH: f32 = 0.012;

pub(super) const DEFINITION: ClipDefinition = ClipDefinition {
    clip: ClipType::SpaceWalk,
    duration: DurationRule::SteppedCadence {
        earth_step_s: 0.8,
        steps: 4.0,
    },
    phases: &["start", "leftStep", "rightStep", "settle"],
    locomotion: true,
    constrained: false,
};

fn eased_progress(p: f32) -> f32 {
    if p < EDGE {
        ease_out(p / EDGE) * EDGE
    } else if p > 1.0 - EDGE {
        (1.0 - EDGE) + ease_in((p - (1.0 - EDGE)) / EDGE) * EDGE
    } else {
        p
    }
}

fn intensity(p: f32) -> f32 {
    if p < EDGE {
        ease_out(p / EDGE)
    } else if p > 1.0 - EDGE {
        1.0 - ease_in((p - (1.0 - EDGE)) / EDGE)
    } else {
        1.0
    }
}

/// Steps completed so far, fractional.
fn step_count(input: &SynthInput<'_>) -> f32 {
    let freq = BASE_STEP_FREQUENCY * input.gravity.earth_ratio().sqrt();
    let total_steps = freq * input.duration_ms / 1000.0;
    eased_progress(input.progress) * total_steps
}

fn stepping_side(count: f32) -> Side {
    if (count.floor() as i64).rem_euclid(2) == 0 {
        Side::Left
    } else {
        Side::Right
    }
}

pub(super) fn phase(input: &SynthInput<'_>) -> &'static str {
    let p = input.progress;
    if p < EDGE {
        "start"
    } else if p > 1.0 - EDGE {
        "settle"
    } else {
        match stepping_side(step_count(input)) {
            Side::Left => "leftStep",
            Side::Right => "rightStep",
        }
    }
}

pub(super) fn travel(input: &SynthInput<'_>) -> f32 {
    let step_distance =
        input.locomotion.walk_speed * STEP_LENGTH * input.gravity.earth_ratio().sqrt();
    step_count(input) * step_distance
}

pub(super) fn synthesize(input: &SynthInput<'_>) -> Pose {
    let mut pose = Pose::REST;
    let p = input.progress;
    let g = input.gravity.divisor();
    let lightness = EARTH_GRAVITY / g;
    let k = intensity(p);
    let balance = input.gravity.float_intensity();

    let count = step_count(input);
    let t = count.rem_euclid(1.0);
    let stepping = stepping_side(count);
    let support = stepping.opposite();

    // Per-step hop, launched to reach the (gravity-inflated) hop height.
    let hop_height = BASE_HOP_HEIGHT * lightness;
    let v0 = (2.0 * input.gravity.gravity * hop_height).sqrt();
    let hop_time = 2.0 * v0 / g;
    let ht = t * hop_time;
    let hop = (v0 * ht - 0.5 * input.gravity.gravity * ht * ht).max(0.0);

    let base_float = 0.03 + 0.02 * lightness;
    let hop_lift = (hop / hop_height) * (0.02 + 0.03 * lightness);
    let bob = base_float + hop_lift * k;

    let sway_x = 0.012 * (count * PI * 0.7).sin() * k * balance;
    let sway_z = 0.008 * (count * PI * 0.9).cos() * k * balance;

    let lift_height = k * balance;
    let swing_range = 30.0 * k * balance;
    let hip_sway = 1.5 * k * balance;

    let near_landing = hop < hop_height * 0.2 && t > 0.6;
    let landing = if near_landing {
        1.0 - hop / (hop_height * 0.2)
    } else {
        0.0
    };

    let lift_curve = (t * PI).sin();
    let swing_curve = (t * PI * 2.0).sin() * 0.5;

    // Legs.
    let s = stepping.sign();
    let knee = (lift_curve * lift_height * 45.0 - landing * 10.0).max(0.0);
    let ankle = -lift_curve * lift_height * 1.2 + landing * 5.0;
    pose.set(
        JointId::upleg(stepping),
        [
            swing_curve * swing_range * 0.8 - landing * 8.0,
            0.0,
            s * (lift_curve * lift_height * 0.4 + hip_sway - landing * 3.0),
        ],
    );
    pose.set(JointId::leg(stepping), [knee, 0.0, 0.0]);
    pose.set(
        JointId::foot(stepping),
        [ankle, 0.0, s * (lift_curve * 3.0 - landing)],
    );
    pose.set(
        JointId::upleg(support),
        [
            -swing_curve * swing_range * 0.3 + landing * 3.0,
            0.0,
            -s * hip_sway * 0.4,
        ],
    );
    pose.set(JointId::leg(support), [3.0 * k + landing * 5.0, 0.0, 0.0]);
    pose.set(JointId::foot(support), [2.0 * k + landing * 3.0, 0.0, 0.0]);

    // Arms: the opposite arm swings, the same-side arm balances.
    let arm_range = 12.0 * k * balance;
    let arm_balance = 6.0 * k * balance;
    let shoulder_float = 3.0 * k * balance;
    let offset = if stepping == Side::Left { 0.5 } else { 0.0 };
    let arm_phase = ((t + offset) * PI).sin();

    let a = -support.sign();
    pose.set(
        JointId::shoulder(support),
        [
            arm_phase * arm_range * 0.3,
            a * arm_phase * arm_range * 0.15,
            a * shoulder_float,
        ],
    );
    pose.set(
        JointId::arm(support),
        [
            arm_phase * arm_range * 0.8,
            a * arm_phase * arm_range * 0.25,
            a * 10.0 * k,
        ],
    );
    pose.set(
        JointId::forearm(support),
        [(arm_phase * arm_range * 0.4).max(0.0), 0.0, a * shoulder_float],
    );

    let b = -s;
    pose.set(
        JointId::shoulder(stepping),
        [
            -arm_phase * arm_balance * 0.25,
            b * arm_phase * arm_balance * 0.15,
            b * shoulder_float * 0.5,
        ],
    );
    pose.set(
        JointId::arm(stepping),
        [
            -arm_phase * arm_balance * 0.8,
            b * arm_phase * arm_balance * 0.2,
            b * 8.0 * k,
        ],
    );
    pose.set(
        JointId::forearm(stepping),
        [
            (arm_phase * arm_balance * 0.3).max(0.0),
            0.0,
            b * shoulder_float * 0.3,
        ],
    );

    // Hands open slightly with the fingers fanned.
    let relax = 6.0;
    let spread = 3.0;
    for side in Side::BOTH {
        let sign = side.sign();
        pose.set(JointId::finger(side, Finger::Thumb, 1), [spread, 0.0, relax * sign]);
        pose.set(JointId::finger(side, Finger::Thumb, 2), [relax * 0.5, 0.0, 0.0]);
        for (i, finger) in Finger::DIGITS.into_iter().enumerate() {
            let fan = spread * 0.2 * (i as f32 + 1.0);
            pose.set(JointId::finger(side, finger, 1), [relax * 0.3, 0.0, -fan * sign]);
            pose.set(JointId::finger(side, finger, 2), [relax * 0.5, 0.0, 0.0]);
            pose.set(JointId::finger(side, finger, 3), [relax * 0.3, 0.0, 0.0]);
        }
    }

    let spine = (count * PI * 0.5).sin() * 1.5 * k * balance;
    let head = (count * PI * 0.3).cos() * k * balance;
    pose.set(JointId::Spine, [spine, sway_x * 2.0, sway_z * 1.5]);
    pose.set(JointId::Spine1, [spine * 0.6, sway_x * 1.5, -sway_z * 0.8]);
    pose.set(JointId::Neck, [-spine * 0.3, -sway_x * 0.8, head]);
    pose.set(JointId::Head, [head * 0.2, head * 0.3, -head * 0.15]);

    let d = input.locomotion.along(travel(input));
    pose.set_root_translation(input.anchored([d[0] + sway_x, bob, d[2] + sway_z]));
    pose
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::gravity::GravityContext;
    use crate::locomotion::LocomotionState;

    fn input(p: f32, g: f32, loco: &LocomotionState) -> SynthInput<'_> {
        let duration = DEFINITION.duration.resolve(None, g, &Config::default());
        SynthInput::new(p, GravityContext::new(g), loco, duration)
    }

    #[test]
    fn four_steps_per_clip_at_any_gravity() {
        let loco = LocomotionState::default();
        for g in [0.27, 1.6, 9.8, 24.8] {
            assert!((step_count(&input(1.0, g, &loco)) - 4.0).abs() < 1e-3, "g={g}");
        }
    }

    #[test]
    fn moon_cadence_is_slower_with_more_sway() {
        let loco = LocomotionState::default();
        let moon = GravityContext::new(1.6);
        let earth = GravityContext::new(9.8);
        assert!(moon.float_intensity() > earth.float_intensity());
        let moon_dur = DEFINITION.duration.resolve(None, 1.6, &Config::default());
        let earth_dur = DEFINITION.duration.resolve(None, 9.8, &Config::default());
        assert!((moon_dur / earth_dur - (9.8f32 / 1.6).sqrt()).abs() < 1e-3);

        let pm = synthesize(&input(0.5, 1.6, &loco));
        let pe = synthesize(&input(0.5, 9.8, &loco));
        assert!(pm.root_translation()[1] > pe.root_translation()[1]);
    }

    #[test]
    fn final_frame_travel_has_no_sway() {
        let loco = LocomotionState::default();
        let inp = input(1.0, 9.8, &loco);
        let root = synthesize(&inp).root_translation();
        assert!(root[0].abs() < 1e-6);
        assert!((root[2] - travel(&inp)).abs() < 1e-6);
        assert!((travel(&inp) - 4.0 * 0.012).abs() < 1e-4);
    }
}
