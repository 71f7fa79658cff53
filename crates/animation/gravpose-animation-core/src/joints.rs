//! Fixed joint vocabulary shared by every pose source.
//!
//! The string names are part of the output contract: renderers and the BVH
//! retargeter key on them, so they must stay bit-exact (`LEFT_FOREARM`,
//! `RIGHT_PINKY3`, ...). Declaration order is topological: every joint's parent
//! appears before it in [`JointId::ALL`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Number of joints in the vocabulary.
pub const JOINT_COUNT: usize = 64;

macro_rules! joint_table {
    ($( $variant:ident = $name:literal, parent = $parent:tt; )+) => {
        /// Identifier of one skeletal segment.
        #[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[repr(u8)]
        pub enum JointId {
            $(
                #[serde(rename = $name)]
                $variant,
            )+
        }

        impl JointId {
            /// Every joint, in declaration (topological) order.
            pub const ALL: [JointId; JOINT_COUNT] = [$(JointId::$variant),+];

            /// Contract name of the joint, e.g. `"LEFT_FOREARM"`.
            pub const fn name(self) -> &'static str {
                match self {
                    $(JointId::$variant => $name,)+
                }
            }

            /// Parent in the default humanoid hierarchy. `None` only for the root.
            pub const fn parent(self) -> Option<JointId> {
                match self {
                    $(JointId::$variant => joint_table!(@parent $parent),)+
                }
            }
        }
    };
    (@parent None) => { None };
    (@parent $p:ident) => { Some(JointId::$p) };
}

joint_table! {
    Hips = "HIPS", parent = None;
    Spine = "SPINE", parent = Hips;
    Spine1 = "SPINE1", parent = Spine;
    Spine2 = "SPINE2", parent = Spine1;
    Neck = "NECK", parent = Spine2;
    Head = "HEAD", parent = Neck;

    LeftShoulder = "LEFT_SHOULDER", parent = Spine2;
    LeftArm = "LEFT_ARM", parent = LeftShoulder;
    LeftForearm = "LEFT_FOREARM", parent = LeftArm;
    LeftHand = "LEFT_HAND", parent = LeftForearm;
    LeftThumb1 = "LEFT_THUMB1", parent = LeftHand;
    LeftThumb2 = "LEFT_THUMB2", parent = LeftThumb1;
    LeftThumb3 = "LEFT_THUMB3", parent = LeftThumb2;
    LeftThumb4 = "LEFT_THUMB4", parent = LeftThumb3;
    LeftIndex1 = "LEFT_INDEX1", parent = LeftHand;
    LeftIndex2 = "LEFT_INDEX2", parent = LeftIndex1;
    LeftIndex3 = "LEFT_INDEX3", parent = LeftIndex2;
    LeftIndex4 = "LEFT_INDEX4", parent = LeftIndex3;
    LeftMiddle1 = "LEFT_MIDDLE1", parent = LeftHand;
    LeftMiddle2 = "LEFT_MIDDLE2", parent = LeftMiddle1;
    LeftMiddle3 = "LEFT_MIDDLE3", parent = LeftMiddle2;
    LeftMiddle4 = "LEFT_MIDDLE4", parent = LeftMiddle3;
    LeftRing1 = "LEFT_RING1", parent = LeftHand;
    LeftRing2 = "LEFT_RING2", parent = LeftRing1;
    LeftRing3 = "LEFT_RING3", parent = LeftRing2;
    LeftRing4 = "LEFT_RING4", parent = LeftRing3;
    LeftPinky1 = "LEFT_PINKY1", parent = LeftHand;
    LeftPinky2 = "LEFT_PINKY2", parent = LeftPinky1;
    LeftPinky3 = "LEFT_PINKY3", parent = LeftPinky2;
    LeftPinky4 = "LEFT_PINKY4", parent = LeftPinky3;

    RightShoulder = "RIGHT_SHOULDER", parent = Spine2;
    RightArm = "RIGHT_ARM", parent = RightShoulder;
    RightForearm = "RIGHT_FOREARM", parent = RightArm;
    RightHand = "RIGHT_HAND", parent = RightForearm;
    RightThumb1 = "RIGHT_THUMB1", parent = RightHand;
    RightThumb2 = "RIGHT_THUMB2", parent = RightThumb1;
    RightThumb3 = "RIGHT_THUMB3", parent = RightThumb2;
    RightThumb4 = "RIGHT_THUMB4", parent = RightThumb3;
    RightIndex1 = "RIGHT_INDEX1", parent = RightHand;
    RightIndex2 = "RIGHT_INDEX2", parent = RightIndex1;
    RightIndex3 = "RIGHT_INDEX3", parent = RightIndex2;
    RightIndex4 = "RIGHT_INDEX4", parent = RightIndex3;
    RightMiddle1 = "RIGHT_MIDDLE1", parent = RightHand;
    RightMiddle2 = "RIGHT_MIDDLE2", parent = RightMiddle1;
    RightMiddle3 = "RIGHT_MIDDLE3", parent = RightMiddle2;
    RightMiddle4 = "RIGHT_MIDDLE4", parent = RightMiddle3;
    RightRing1 = "RIGHT_RING1", parent = RightHand;
    RightRing2 = "RIGHT_RING2", parent = RightRing1;
    RightRing3 = "RIGHT_RING3", parent = RightRing2;
    RightRing4 = "RIGHT_RING4", parent = RightRing3;
    RightPinky1 = "RIGHT_PINKY1", parent = RightHand;
    RightPinky2 = "RIGHT_PINKY2", parent = RightPinky1;
    RightPinky3 = "RIGHT_PINKY3", parent = RightPinky2;
    RightPinky4 = "RIGHT_PINKY4", parent = RightPinky3;

    LeftUpLeg = "LEFT_UPLEG", parent = Hips;
    LeftLeg = "LEFT_LEG", parent = LeftUpLeg;
    LeftFoot = "LEFT_FOOT", parent = LeftLeg;
    LeftToeBase = "LEFT_TOEBASE", parent = LeftFoot;
    LeftToeEnd = "LEFT_TOEEND", parent = LeftToeBase;

    RightUpLeg = "RIGHT_UPLEG", parent = Hips;
    RightLeg = "RIGHT_LEG", parent = RightUpLeg;
    RightFoot = "RIGHT_FOOT", parent = RightLeg;
    RightToeBase = "RIGHT_TOEBASE", parent = RightFoot;
    RightToeEnd = "RIGHT_TOEEND", parent = RightToeBase;
}

/// Body side of a mirrored joint.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub const BOTH: [Side; 2] = [Side::Left, Side::Right];

    /// +1 for left, -1 for right. Mirrors lateral (Y/Z) angles across the body.
    #[inline]
    pub const fn sign(self) -> f32 {
        match self {
            Side::Left => 1.0,
            Side::Right => -1.0,
        }
    }

    #[inline]
    pub const fn opposite(self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

/// Digits of a hand, in vocabulary order.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Finger {
    Thumb,
    Index,
    Middle,
    Ring,
    Pinky,
}

impl Finger {
    pub const ALL: [Finger; 5] = [
        Finger::Thumb,
        Finger::Index,
        Finger::Middle,
        Finger::Ring,
        Finger::Pinky,
    ];
    /// The four non-thumb digits.
    pub const DIGITS: [Finger; 4] = [Finger::Index, Finger::Middle, Finger::Ring, Finger::Pinky];
}

impl JointId {
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    #[inline]
    pub fn from_index(idx: usize) -> Option<JointId> {
        JointId::ALL.get(idx).copied()
    }

    pub const fn is_root(self) -> bool {
        matches!(self, JointId::Hips)
    }

    pub fn side(self) -> Option<Side> {
        let name = self.name();
        if name.starts_with("LEFT_") {
            Some(Side::Left)
        } else if name.starts_with("RIGHT_") {
            Some(Side::Right)
        } else {
            None
        }
    }

    pub const fn shoulder(side: Side) -> JointId {
        match side {
            Side::Left => JointId::LeftShoulder,
            Side::Right => JointId::RightShoulder,
        }
    }

    pub const fn arm(side: Side) -> JointId {
        match side {
            Side::Left => JointId::LeftArm,
            Side::Right => JointId::RightArm,
        }
    }

    pub const fn forearm(side: Side) -> JointId {
        match side {
            Side::Left => JointId::LeftForearm,
            Side::Right => JointId::RightForearm,
        }
    }

    pub const fn hand(side: Side) -> JointId {
        match side {
            Side::Left => JointId::LeftHand,
            Side::Right => JointId::RightHand,
        }
    }

    pub const fn upleg(side: Side) -> JointId {
        match side {
            Side::Left => JointId::LeftUpLeg,
            Side::Right => JointId::RightUpLeg,
        }
    }

    pub const fn leg(side: Side) -> JointId {
        match side {
            Side::Left => JointId::LeftLeg,
            Side::Right => JointId::RightLeg,
        }
    }

    pub const fn foot(side: Side) -> JointId {
        match side {
            Side::Left => JointId::LeftFoot,
            Side::Right => JointId::RightFoot,
        }
    }

    pub const fn toe_base(side: Side) -> JointId {
        match side {
            Side::Left => JointId::LeftToeBase,
            Side::Right => JointId::RightToeBase,
        }
    }

    /// Finger segment `1..=4` on the given side. Out-of-range segments are clamped.
    pub fn finger(side: Side, finger: Finger, segment: u8) -> JointId {
        let seg = segment.clamp(1, 4) as usize - 1;
        let idx = JointId::hand(side).index() + 1 + finger as usize * 4 + seg;
        JointId::ALL[idx]
    }
}

impl fmt::Display for JointId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for JointId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        JointId::ALL
            .iter()
            .copied()
            .find(|j| j.name() == s)
            .ok_or_else(|| Error::UnknownJoint(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip_through_from_str() {
        for j in JointId::ALL {
            assert_eq!(j.name().parse::<JointId>().unwrap(), j);
        }
        assert!("LEFT_ELBOW".parse::<JointId>().is_err());
    }

    #[test]
    fn declaration_order_is_topological() {
        for (i, j) in JointId::ALL.iter().enumerate() {
            assert_eq!(j.index(), i);
            if let Some(p) = j.parent() {
                assert!(p.index() < i, "{j} declared before its parent {p}");
            } else {
                assert!(j.is_root());
            }
        }
    }

    #[test]
    fn finger_lookup_matches_names() {
        assert_eq!(
            JointId::finger(Side::Left, Finger::Thumb, 1),
            JointId::LeftThumb1
        );
        assert_eq!(
            JointId::finger(Side::Right, Finger::Pinky, 4),
            JointId::RightPinky4
        );
        assert_eq!(
            JointId::finger(Side::Left, Finger::Ring, 9),
            JointId::LeftRing4
        );
        assert_eq!(
            JointId::finger(Side::Right, Finger::Middle, 2).name(),
            "RIGHT_MIDDLE2"
        );
    }

    #[test]
    fn serde_uses_contract_names() {
        let s = serde_json::to_string(&JointId::LeftToeBase).unwrap();
        assert_eq!(s, "\"LEFT_TOEBASE\"");
        let j: JointId = serde_json::from_str("\"RIGHT_FOREARM\"").unwrap();
        assert_eq!(j, JointId::RightForearm);
    }

    #[test]
    fn sides() {
        assert_eq!(JointId::Hips.side(), None);
        assert_eq!(JointId::LeftUpLeg.side(), Some(Side::Left));
        assert_eq!(JointId::RightThumb3.side(), Some(Side::Right));
        assert_eq!(Side::Left.opposite(), Side::Right);
    }
}
