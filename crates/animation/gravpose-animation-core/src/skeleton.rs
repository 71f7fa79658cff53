//! Host-side application of poses.
//!
//! [`Skeleton`] is a flat node array (parents by index) that hosts without a
//! scene graph can drive directly. Hosts that own their own hierarchy
//! implement [`PoseSink`] instead. Both receive absolute writes: every joint's
//! local rotation is overwritten each frame, so application order never
//! matters and nothing drifts.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::joints::{JointId, JOINT_COUNT};
use crate::pose::{Pose, Rotation};

/// Anything that yields a pose per step: the procedural engine, a BVH player.
pub trait PoseSource {
    /// Advance by `dt_ms` and return the pose for this step, or `None` when idle.
    fn next_pose(&mut self, dt_ms: f32) -> Option<Pose>;
}

/// Angle unit expected by the host.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AngleUnit {
    #[default]
    Degrees,
    Radians,
}

impl AngleUnit {
    #[inline]
    pub fn from_degrees(self, rotation: Rotation) -> Rotation {
        match self {
            AngleUnit::Degrees => rotation,
            AngleUnit::Radians => rotation.map(f32::to_radians),
        }
    }
}

/// Host-facing write seam.
pub trait PoseSink {
    /// Hosts missing some joints return `false` and are skipped for them.
    fn has_joint(&self, _joint: JointId) -> bool {
        true
    }

    fn set_local_rotation(&mut self, joint: JointId, rotation: Rotation);

    fn set_root_translation(&mut self, translation: [f32; 3]);
}

/// Write every rotation of `pose` (converted to `unit`) and the root translation into `sink`.
pub fn apply_pose_to_sink<S: PoseSink + ?Sized>(pose: &Pose, sink: &mut S, unit: AngleUnit) {
    for (joint, rotation) in pose.iter() {
        if sink.has_joint(joint) {
            sink.set_local_rotation(joint, unit.from_degrees(rotation));
        }
    }
    sink.set_root_translation(pose.root_translation());
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SkeletonNode {
    pub joint: JointId,
    /// Index of the parent node, `None` for roots.
    pub parent: Option<usize>,
    pub children: Vec<usize>,
    /// Bind-pose offset from the parent.
    pub rest_offset: [f32; 3],
    /// Current local rotation, in the unit of the last `apply_pose`.
    pub rotation: Rotation,
    /// Current local translation. Only the root ever moves off `rest_offset`.
    pub translation: [f32; 3],
}

#[derive(Clone, Debug, PartialEq)]
pub struct Skeleton {
    nodes: Vec<SkeletonNode>,
    by_joint: [Option<usize>; JOINT_COUNT],
}

impl Skeleton {
    /// Every joint of the vocabulary wired to its default parent, zero offsets.
    pub fn humanoid() -> Self {
        let mut skeleton = Self::empty(JOINT_COUNT);
        for joint in JointId::ALL {
            let parent = joint.parent().and_then(|p| skeleton.by_joint[p.index()]);
            skeleton.push(joint, parent, [0.0; 3]);
        }
        skeleton
    }

    /// Build from `(joint, parent, rest_offset)` triples. Parents must be
    /// declared before their children and each joint may appear once.
    pub fn from_parents(joints: &[(JointId, Option<JointId>, [f32; 3])]) -> Result<Self> {
        let mut skeleton = Self::empty(joints.len());
        for &(joint, parent, rest_offset) in joints {
            if skeleton.by_joint[joint.index()].is_some() {
                return Err(Error::InvalidSkeleton(format!("duplicate joint {joint}")));
            }
            let parent = match parent {
                None => None,
                Some(p) => Some(skeleton.by_joint[p.index()].ok_or_else(|| {
                    Error::InvalidSkeleton(format!("{joint} declared before its parent {p}"))
                })?),
            };
            skeleton.push(joint, parent, rest_offset);
        }
        Ok(skeleton)
    }

    fn empty(capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
            by_joint: [None; JOINT_COUNT],
        }
    }

    fn push(&mut self, joint: JointId, parent: Option<usize>, rest_offset: [f32; 3]) {
        let idx = self.nodes.len();
        if let Some(p) = parent {
            self.nodes[p].children.push(idx);
        }
        self.nodes.push(SkeletonNode {
            joint,
            parent,
            children: Vec::new(),
            rest_offset,
            rotation: [0.0; 3],
            translation: rest_offset,
        });
        self.by_joint[joint.index()] = Some(idx);
    }

    /// Overwrite every node's local rotation from `pose`. The translation
    /// goes to the `HIPS` node only.
    pub fn apply_pose(&mut self, pose: &Pose, unit: AngleUnit) {
        apply_pose_to_sink(pose, self, unit);
    }

    pub fn node(&self, joint: JointId) -> Option<&SkeletonNode> {
        self.by_joint[joint.index()].map(|i| &self.nodes[i])
    }

    pub fn nodes(&self) -> &[SkeletonNode] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

impl PoseSink for Skeleton {
    fn has_joint(&self, joint: JointId) -> bool {
        self.by_joint[joint.index()].is_some()
    }

    fn set_local_rotation(&mut self, joint: JointId, rotation: Rotation) {
        if let Some(i) = self.by_joint[joint.index()] {
            self.nodes[i].rotation = rotation;
        }
    }

    fn set_root_translation(&mut self, translation: [f32; 3]) {
        if let Some(i) = self.by_joint[JointId::Hips.index()] {
            self.nodes[i].translation = translation;
        }
    }
}
