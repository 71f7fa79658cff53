//! Mapping BVH joints and values onto the gravpose joint vocabulary.
//!
//! Mocap data is Y-up in centimetres with the opposite handedness on Z.
//! Positions are scaled by 1/100 with Z flipped. X and Z rotations are
//! negated, Y is kept.

use std::collections::BTreeSet;

use gravpose_animation_core::{Finger, JointId, Pose, Side};
use hashbrown::{HashMap, HashSet};
use serde::Serialize;
use tracing::warn;

use crate::parser::{BvhClip, BvhJoint};

const MIXAMO_PREFIX: &str = "mixamorig:";

/// Non-finger joints, by their bare rig name.
const BODY: [(&str, JointId); 24] = [
    ("Hips", JointId::Hips),
    ("Spine", JointId::Spine),
    ("Spine1", JointId::Spine1),
    ("Spine2", JointId::Spine2),
    ("Neck", JointId::Neck),
    ("Head", JointId::Head),
    ("LeftShoulder", JointId::LeftShoulder),
    ("LeftArm", JointId::LeftArm),
    ("LeftForeArm", JointId::LeftForearm),
    ("LeftHand", JointId::LeftHand),
    ("RightShoulder", JointId::RightShoulder),
    ("RightArm", JointId::RightArm),
    ("RightForeArm", JointId::RightForearm),
    ("RightHand", JointId::RightHand),
    ("LeftUpLeg", JointId::LeftUpLeg),
    ("LeftLeg", JointId::LeftLeg),
    ("LeftFoot", JointId::LeftFoot),
    ("RightUpLeg", JointId::RightUpLeg),
    ("RightLeg", JointId::RightLeg),
    ("RightFoot", JointId::RightFoot),
    // Mixamo-only below.
    ("LeftToeBase", JointId::LeftToeBase),
    ("LeftToe_End", JointId::LeftToeEnd),
    ("RightToeBase", JointId::RightToeBase),
    ("RightToe_End", JointId::RightToeEnd),
];

/// Entries of [`BODY`] that plain (unprefixed) rigs also use.
const PLAIN_BODY: usize = 20;

/// BVH joint name to [`JointId`] lookup.
#[derive(Clone, Debug, Default)]
pub struct JointNameMap {
    names: HashMap<String, JointId>,
}

impl JointNameMap {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Mixamo (`mixamorig:LeftForeArm`, fingers included) plus plain body names (`LeftForeArm`).
    pub fn mixamo() -> Self {
        let mut map = Self::empty();
        for (name, joint) in BODY {
            map.insert(format!("{MIXAMO_PREFIX}{name}"), joint);
        }
        for (name, joint) in &BODY[..PLAIN_BODY] {
            map.insert(*name, *joint);
        }
        for side in Side::BOTH {
            let side_name = match side {
                Side::Left => "Left",
                Side::Right => "Right",
            };
            for finger in Finger::ALL {
                let finger_name = match finger {
                    Finger::Thumb => "Thumb",
                    Finger::Index => "Index",
                    Finger::Middle => "Middle",
                    Finger::Ring => "Ring",
                    Finger::Pinky => "Pinky",
                };
                for seg in 1..=4u8 {
                    map.insert(
                        format!("{MIXAMO_PREFIX}{side_name}Hand{finger_name}{seg}"),
                        JointId::finger(side, finger, seg),
                    );
                }
            }
        }
        map
    }

    pub fn insert(&mut self, bvh_name: impl Into<String>, joint: JointId) {
        self.names.insert(bvh_name.into(), joint);
    }

    pub fn get(&self, bvh_name: &str) -> Option<JointId> {
        self.names.get(bvh_name).copied()
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

#[inline]
pub fn convert_position(p: [f32; 3]) -> [f32; 3] {
    [p[0] / 100.0, p[1] / 100.0, -p[2] / 100.0]
}

#[inline]
pub fn convert_rotation(r: [f32; 3]) -> [f32; 3] {
    [-r[0], r[1], -r[2]]
}

fn looks_like_end(joint: &BvhJoint) -> bool {
    joint.end_site || joint.name.ends_with("End") || joint.name.contains("_End")
}

/// Converts BVH frames into poses. Unmapped joints are skipped and reported
/// once per name.
#[derive(Clone, Debug, Default)]
pub struct Retargeter {
    map: JointNameMap,
    warned: HashSet<String>,
}

impl Retargeter {
    pub fn new(map: JointNameMap) -> Self {
        Self {
            map,
            warned: HashSet::new(),
        }
    }

    pub fn map(&self) -> &JointNameMap {
        &self.map
    }

    /// Names skipped so far, sorted.
    pub fn unmapped(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.warned.iter().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    fn resolve(&mut self, joint: &BvhJoint) -> Option<JointId> {
        if let Some(id) = self.map.get(&joint.name) {
            return Some(id);
        }
        if !looks_like_end(joint) && self.warned.insert(joint.name.clone()) {
            warn!(joint = %joint.name, "no mapping for BVH joint, skipping");
        }
        None
    }

    /// Pose for frame `index`. Out-of-range frames give the rest pose.
    pub fn frame_to_pose(&mut self, clip: &BvhClip, index: usize) -> Pose {
        let mut pose = Pose::REST;
        let Some(row) = clip.frame(index) else {
            return pose;
        };
        for joint in clip.joints() {
            if joint.channels.is_empty() {
                continue;
            }
            let Some(target) = self.resolve(joint) else {
                continue;
            };
            let mut position = [0.0; 3];
            let mut rotation = [0.0; 3];
            let mut has_position = false;
            for (channel, value) in clip.joint_values(joint, row) {
                if channel.is_position() {
                    position[channel.axis()] = value;
                    has_position = true;
                } else {
                    rotation[channel.axis()] = value;
                }
            }
            pose.set(target, convert_rotation(rotation));
            if has_position && target.is_root() {
                pose.set_root_translation(convert_position(position));
            }
        }
        pose
    }
}

/// Joint coverage of a clip against a host model.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Compatibility {
    /// Either side is fully covered by the other.
    pub compatible: bool,
    pub missing_in_bvh: Vec<JointId>,
    pub missing_in_model: Vec<JointId>,
}

/// Compare the mapped joints of `clip` with `model_joints`. Never fails;
/// mismatches are logged.
pub fn check_compatibility(
    clip: &BvhClip,
    map: &JointNameMap,
    model_joints: &[JointId],
) -> Compatibility {
    let in_bvh: BTreeSet<JointId> = clip.joints().iter().filter_map(|j| map.get(&j.name)).collect();
    let in_model: BTreeSet<JointId> = model_joints.iter().copied().collect();

    let missing_in_bvh: Vec<_> = in_model.difference(&in_bvh).copied().collect();
    let missing_in_model: Vec<_> = in_bvh.difference(&in_model).copied().collect();
    let compatible = missing_in_bvh.is_empty() || missing_in_model.is_empty();
    if !compatible {
        warn!(
            missing_in_bvh = ?missing_in_bvh,
            missing_in_model = ?missing_in_model,
            "BVH and model hierarchies are not fully compatible"
        );
    }
    Compatibility {
        compatible,
        missing_in_bvh,
        missing_in_model,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mixamo_and_plain_names_resolve() {
        let map = JointNameMap::mixamo();
        assert_eq!(map.get("mixamorig:LeftForeArm"), Some(JointId::LeftForearm));
        assert_eq!(map.get("LeftForeArm"), Some(JointId::LeftForearm));
        assert_eq!(map.get("mixamorig:RightHandPinky4"), Some(JointId::RightPinky4));
        assert_eq!(map.get("mixamorig:LeftToe_End"), Some(JointId::LeftToeEnd));
        assert_eq!(map.get("LeftToeBase"), None);
        assert_eq!(map.get("mixamorig:HeadTop_End"), None);
    }

    #[test]
    fn coordinate_conversion() {
        assert_eq!(convert_position([100.0, 250.0, -40.0]), [1.0, 2.5, 0.4]);
        assert_eq!(convert_rotation([10.0, 20.0, 30.0]), [-10.0, 20.0, -30.0]);
    }
}
