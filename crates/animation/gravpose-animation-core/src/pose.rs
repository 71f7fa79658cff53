//! Full-body pose snapshot.
//!
//! A [`Pose`] always carries one Euler rotation (degrees, X/Y/Z) for every
//! joint in the vocabulary plus the root translation. Synthesizers start from
//! [`Pose::REST`] and overwrite only the joints they animate.
//!
//! JSON form:
//! `{ "rotations": { "HIPS": [x, y, z], ... }, "translations": { "HIPS": [x, y, z] } }`

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::joints::{Finger, JointId, Side, JOINT_COUNT};

/// Euler angles in degrees, applied X, Y, Z.
pub type Rotation = [f32; 3];

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(into = "PoseRecord", from = "PoseRecord")]
pub struct Pose {
    rotations: [Rotation; JOINT_COUNT],
    root_translation: [f32; 3],
}

impl Pose {
    /// Every joint at zero rotation with the root at the origin.
    pub const REST: Pose = Pose {
        rotations: [[0.0; 3]; JOINT_COUNT],
        root_translation: [0.0; 3],
    };

    /// Rest rotations with the root placed at `translation`.
    pub fn rest_at(translation: [f32; 3]) -> Self {
        let mut pose = Self::REST;
        pose.root_translation = translation;
        pose
    }

    #[inline]
    pub fn rotation(&self, joint: JointId) -> Rotation {
        self.rotations[joint.index()]
    }

    #[inline]
    pub fn rotation_mut(&mut self, joint: JointId) -> &mut Rotation {
        &mut self.rotations[joint.index()]
    }

    #[inline]
    pub fn set(&mut self, joint: JointId, rotation: Rotation) {
        self.rotations[joint.index()] = rotation;
    }

    /// Apply the same rotation to segments `1..=3` of each listed finger.
    pub fn set_fingers(&mut self, side: Side, fingers: &[Finger], segments: [Rotation; 3]) {
        for &finger in fingers {
            for (seg, rot) in (1u8..=3).zip(segments) {
                self.set(JointId::finger(side, finger, seg), rot);
            }
        }
    }

    #[inline]
    pub fn root_translation(&self) -> [f32; 3] {
        self.root_translation
    }

    #[inline]
    pub fn set_root_translation(&mut self, translation: [f32; 3]) {
        self.root_translation = translation;
    }

    /// Iterate `(joint, rotation)` in vocabulary order.
    pub fn iter(&self) -> impl Iterator<Item = (JointId, Rotation)> + '_ {
        JointId::ALL
            .iter()
            .copied()
            .zip(self.rotations.iter().copied())
    }

    /// True when every joint rotation equals the rest rotation.
    pub fn has_rest_rotations(&self) -> bool {
        self.rotations == Self::REST.rotations
    }
}

impl Default for Pose {
    fn default() -> Self {
        Self::REST
    }
}

/// Serde shape of a pose, keyed by contract joint names.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct PoseRecord {
    #[serde(default)]
    pub rotations: BTreeMap<JointId, Rotation>,
    #[serde(default)]
    pub translations: BTreeMap<JointId, [f32; 3]>,
}

impl From<Pose> for PoseRecord {
    fn from(pose: Pose) -> Self {
        let rotations = pose.iter().collect();
        let mut translations = BTreeMap::new();
        translations.insert(JointId::Hips, pose.root_translation);
        Self {
            rotations,
            translations,
        }
    }
}

/// Joints absent from the record take the rest rotation; translations on
/// anything but the root are ignored.
impl From<PoseRecord> for Pose {
    fn from(record: PoseRecord) -> Self {
        let mut pose = Pose::REST;
        for (joint, rot) in record.rotations {
            pose.set(joint, rot);
        }
        if let Some(t) = record.translations.get(&JointId::Hips) {
            pose.root_translation = *t;
        }
        pose
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rest_pose_is_all_zero() {
        let rest = Pose::REST;
        assert!(rest.has_rest_rotations());
        assert_eq!(rest.root_translation(), [0.0; 3]);
        assert_eq!(rest.iter().count(), JOINT_COUNT);
    }

    #[test]
    fn set_fingers_touches_three_segments_only() {
        let mut pose = Pose::REST;
        pose.set_fingers(
            Side::Right,
            &Finger::DIGITS,
            [[1.0, 0.0, 0.0], [2.0, 0.0, 0.0], [3.0, 0.0, 0.0]],
        );
        assert_eq!(pose.rotation(JointId::RightIndex1), [1.0, 0.0, 0.0]);
        assert_eq!(pose.rotation(JointId::RightPinky3), [3.0, 0.0, 0.0]);
        assert_eq!(pose.rotation(JointId::RightPinky4), [0.0; 3]);
        assert_eq!(pose.rotation(JointId::RightThumb1), [0.0; 3]);
        assert_eq!(pose.rotation(JointId::LeftIndex1), [0.0; 3]);
    }

    #[test]
    fn json_contract_shape() {
        let mut pose = Pose::rest_at([1.0, 0.5, -2.0]);
        pose.set(JointId::LeftForearm, [10.0, 20.0, 30.0]);
        let v = serde_json::to_value(&pose).unwrap();
        assert_eq!(v["rotations"]["LEFT_FOREARM"], serde_json::json!([10.0, 20.0, 30.0]));
        assert_eq!(v["rotations"]["HEAD"], serde_json::json!([0.0, 0.0, 0.0]));
        assert_eq!(v["translations"]["HIPS"], serde_json::json!([1.0, 0.5, -2.0]));
        assert_eq!(v["rotations"].as_object().unwrap().len(), JOINT_COUNT);
        assert_eq!(v["translations"].as_object().unwrap().len(), 1);
    }

    #[test]
    fn partial_json_fills_rest() {
        let json = r#"{ "rotations": { "NECK": [5, 0, 0] } }"#;
        let pose: Pose = serde_json::from_str(json).unwrap();
        assert_eq!(pose.rotation(JointId::Neck), [5.0, 0.0, 0.0]);
        assert_eq!(pose.rotation(JointId::Hips), [0.0; 3]);
        assert_eq!(pose.root_translation(), [0.0; 3]);

        let bad = r#"{ "rotations": { "TAIL": [5, 0, 0] } }"#;
        assert!(serde_json::from_str::<Pose>(bad).is_err());
    }
}
