//! Static joint-limit clamping for suited motion.
//!
//! Pressurised suits restrict range of motion at the shoulders, elbows, hips,
//! and trunk. Limits are per-axis `[min, max]` in degrees and applied as a
//! final pass over a synthesized pose.

use serde::{Deserialize, Serialize};

use crate::joints::JointId;
use crate::pose::Pose;

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct JointLimit {
    pub joint: JointId,
    pub min: [f32; 3],
    pub max: [f32; 3],
}

impl JointLimit {
    pub const fn new(joint: JointId, x: [f32; 2], y: [f32; 2], z: [f32; 2]) -> Self {
        Self {
            joint,
            min: [x[0], y[0], z[0]],
            max: [x[1], y[1], z[1]],
        }
    }

    #[inline]
    pub fn clamp(&self, rot: [f32; 3]) -> [f32; 3] {
        [
            rot[0].clamp(self.min[0], self.max[0]),
            rot[1].clamp(self.min[1], self.max[1]),
            rot[2].clamp(self.min[2], self.max[2]),
        ]
    }
}

#[derive(Copy, Clone, Debug)]
pub struct JointLimits {
    limits: &'static [JointLimit],
}

const SPACESUIT_TABLE: [JointLimit; 9] = [
    JointLimit::new(JointId::LeftArm, [-120.0, 80.0], [-60.0, 60.0], [-90.0, 90.0]),
    JointLimit::new(JointId::RightArm, [-120.0, 80.0], [-60.0, 60.0], [-90.0, 90.0]),
    JointLimit::new(JointId::LeftForearm, [0.0, 140.0], [-30.0, 30.0], [-45.0, 45.0]),
    JointLimit::new(JointId::RightForearm, [0.0, 140.0], [-30.0, 30.0], [-45.0, 45.0]),
    JointLimit::new(JointId::LeftUpLeg, [-90.0, 90.0], [-45.0, 45.0], [-30.0, 30.0]),
    JointLimit::new(JointId::RightUpLeg, [-90.0, 90.0], [-45.0, 45.0], [-30.0, 30.0]),
    JointLimit::new(JointId::Spine, [-45.0, 45.0], [-30.0, 30.0], [-25.0, 25.0]),
    JointLimit::new(JointId::Spine1, [-30.0, 30.0], [-20.0, 20.0], [-15.0, 15.0]),
    JointLimit::new(JointId::Neck, [-60.0, 60.0], [-45.0, 45.0], [-30.0, 30.0]),
];

impl JointLimits {
    /// Range-of-motion table for a pressurised EVA suit.
    pub const SPACESUIT: JointLimits = JointLimits {
        limits: &SPACESUIT_TABLE,
    };

    pub const fn new(limits: &'static [JointLimit]) -> Self {
        Self { limits }
    }

    pub fn get(&self, joint: JointId) -> Option<&JointLimit> {
        self.limits.iter().find(|l| l.joint == joint)
    }

    pub fn limits(&self) -> &'static [JointLimit] {
        self.limits
    }

    /// Clamp every limited joint of `pose` in place. Unlisted joints and the
    /// root translation are untouched.
    pub fn apply(&self, pose: &mut Pose) {
        for limit in self.limits {
            let rot = pose.rotation_mut(limit.joint);
            *rot = limit.clamp(*rot);
        }
    }
}
