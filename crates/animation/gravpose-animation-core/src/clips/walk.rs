//! Earth-style walk. Cadence scales with the gravity multiplier, so weak
//! gravity slows the stride.

use std::f32::consts::PI;

use super::{ClipDefinition, ClipType, DurationRule, FallbackDuration, SynthInput};
use crate::interp::{ease_in, ease_out};
use crate::joints::{Finger, JointId, Side};
use crate::pose::Pose;

/// Fraction of progress spent accelerating in and settling out.
const EDGE: f32 = 0.1;
/// Metres per unit of walk speed per step.
const STEP_LENGTH: f32 = 0.02;

pub(super) const DEFINITION: ClipDefinition = ClipDefinition {
    clip: ClipType::Walk,
    duration: DurationRule::Explicit {
        fallback: FallbackDuration::Walk,
    },
    phases: &["start", "leftStep", "rightStep", "settle"],
    locomotion: true,
    constrained: false,
};

/// Progress with eased start and stop edges; linear in the stride.
fn eased_progress(p: f32) -> f32 {
    if p < EDGE {
        ease_out(p / EDGE) * EDGE
    } else if p > 1.0 - EDGE {
        (1.0 - EDGE) + ease_in((p - (1.0 - EDGE)) / EDGE) * EDGE
    } else {
        p
    }
}

/// Amplitude envelope: ramps 0→1 over the start edge and 1→0 over the settle edge.
fn intensity(p: f32) -> f32 {
    if p < EDGE {
        p / EDGE
    } else if p > 1.0 - EDGE {
        (1.0 - p) / EDGE
    } else {
        1.0
    }
}

#[inline]
fn step_frequency(input: &SynthInput<'_>) -> f32 {
    2.0 * input.gravity.multiplier
}

/// Which foot is stepping and how far into that step, [0, 1).
fn step(input: &SynthInput<'_>) -> (Side, f32) {
    let cycle = (eased_progress(input.progress) * step_frequency(input)).rem_euclid(1.0);
    if cycle < 0.5 {
        (Side::Left, cycle * 2.0)
    } else {
        (Side::Right, (cycle - 0.5) * 2.0)
    }
}

pub(super) fn phase(input: &SynthInput<'_>) -> &'static str {
    let p = input.progress;
    if p < EDGE {
        "start"
    } else if p > 1.0 - EDGE {
        "settle"
    } else {
        match step(input).0 {
            Side::Left => "leftStep",
            Side::Right => "rightStep",
        }
    }
}

pub(super) fn travel(input: &SynthInput<'_>) -> f32 {
    let step_distance = input.locomotion.walk_speed * STEP_LENGTH;
    eased_progress(input.progress) * step_distance * step_frequency(input)
}

pub(super) fn synthesize(input: &SynthInput<'_>) -> Pose {
    let mut pose = Pose::REST;
    let p = input.progress;
    let eased = eased_progress(p);
    let freq = step_frequency(input);
    let k = intensity(p);
    let (stepping, t) = step(input);
    let support = stepping.opposite();
    let arc = (t * PI).sin();

    // Legs: the stepping leg lifts and swings through, the support leg trails.
    let lift = arc * 25.0 * k;
    let swing = (t - 0.5) * 20.0 * k;
    pose.set(
        JointId::upleg(stepping),
        [swing, 0.0, lift * 0.1 * stepping.sign()],
    );
    pose.set(JointId::leg(stepping), [lift.max(0.0), 0.0, 0.0]);
    pose.set(JointId::foot(stepping), [-lift * 0.3, 0.0, 0.0]);
    pose.set(JointId::upleg(support), [-swing * 0.8, 0.0, 0.0]);

    // Arms counter-swing the legs.
    let arm_swing = 15.0 * k;
    let forward = arc * arm_swing;
    let back = -arc * arm_swing * 0.8;
    for side in Side::BOTH {
        let sign = side.sign();
        let (swing_x, forearm) = if side == support {
            (forward, (forward * 0.5).max(0.0))
        } else {
            (back, (-back * 0.5).max(0.0))
        };
        pose.set(JointId::shoulder(side), [0.0, 0.0, -5.0 * k * sign]);
        pose.set(JointId::arm(side), [swing_x, 0.0, -10.0 * k * sign]);
        pose.set(JointId::forearm(side), [forearm, 0.0, 0.0]);

        let relax = 8.0;
        pose.set(JointId::finger(side, Finger::Thumb, 1), [0.0, 0.0, relax * sign]);
        pose.set(JointId::finger(side, Finger::Thumb, 2), [relax * 0.6, 0.0, 0.0]);
        pose.set_fingers(
            side,
            &Finger::DIGITS,
            [
                [relax * 0.4, 0.0, 0.0],
                [relax * 0.6, 0.0, 0.0],
                [relax * 0.4, 0.0, 0.0],
            ],
        );
    }

    let sway = 0.01 * (eased * PI * freq).sin() * k;
    pose.set(JointId::Spine, [0.0, sway * 5.0, 0.0]);
    pose.set(JointId::Spine1, [0.0, sway * 3.0, 0.0]);
    pose.set(JointId::Neck, [0.0, -sway * 2.0, 0.0]);

    let bob = 0.02 * (eased * PI * freq * 2.0).sin() * k;
    let d = input.locomotion.along(travel(input));
    pose.set_root_translation(input.anchored([d[0], bob, d[2]]));
    pose
}
