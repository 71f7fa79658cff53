//! Gravpose BVH
//!
//! Loads BVH motion capture, retargets it onto the gravpose joint vocabulary
//! and plays it back as a [`PoseSource`](gravpose_animation_core::PoseSource),
//! so hosts can swap it in for the procedural engine.

pub mod error;
pub mod parser;
pub mod player;
pub mod retarget;

pub use error::{BvhError, Result};
pub use parser::{parse_bvh, BvhClip, BvhJoint, Channel};
pub use player::{BvhPlayer, FrameInfo};
pub use retarget::{check_compatibility, Compatibility, JointNameMap, Retargeter};
