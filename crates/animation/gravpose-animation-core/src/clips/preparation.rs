//! Grounded take-off crouch shared by the flips.

use crate::interp::{ease_in_out, ease_out};
use crate::joints::{JointId, Side};
use crate::pose::Pose;

/// Take-off crouch used while flips are still grounded.
///
/// `t` in [0, 1]: the first half sinks into the crouch, the second half loads
/// the spine and shoulders for the push. Only rotations are written.
pub fn preparation(t: f32) -> Pose {
    let t = t.clamp(0.0, 1.0);
    let mut pose = Pose::REST;

    if t <= 0.5 {
        let crouch = ease_in_out(t / 0.5);
        for side in Side::BOTH {
            pose.set(JointId::upleg(side), [-5.0 * crouch, 0.0, -3.0 * side.sign()]);
            pose.set(JointId::leg(side), [5.0 * crouch, 0.0, 0.0]);
        }
        pose.set(JointId::Spine, [5.0 * crouch, 0.0, 0.0]);
        pose.set(JointId::Spine1, [1.5 * crouch, 0.0, 0.0]);
    } else {
        let push = ease_out((t - 0.5) / 0.5);
        let crouch = 1.0 - push * 0.7;
        for side in Side::BOTH {
            pose.set(
                JointId::upleg(side),
                [-(10.0 + 30.0 * crouch), 0.0, -3.0 * side.sign()],
            );
            pose.set(JointId::leg(side), [5.0 + 30.0 * crouch, 0.0, 0.0]);
            pose.set(
                JointId::shoulder(side),
                [-5.0 * push, 0.0, -10.0 * push * side.sign()],
            );
        }
        pose.set(JointId::Spine, [5.0 + 15.0 * push, 0.0, 0.0]);
        pose.set(JointId::Spine1, [1.5 + 10.0 * push, 0.0, 0.0]);
        pose.set(JointId::Neck, [5.0 * push, 0.0, 0.0]);
    }
    pose
}
