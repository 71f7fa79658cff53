//! Gravpose Animation Core (engine-agnostic)
//!
//! Procedural humanoid poses that respond to gravity: a clip catalogue of pure
//! synthesizers, a single-clip playback scheduler, a persistent locomotion
//! accumulator, suit joint limits and a skeleton applier. Adapters (WASM, BVH)
//! sit on top of [`MotionEngine`] and the [`PoseSource`] / [`PoseSink`] seams.

pub mod clips;
pub mod config;
pub mod constraints;
pub mod engine;
pub mod error;
pub mod gravity;
pub mod interp;
pub mod joints;
pub mod locomotion;
pub mod outputs;
pub mod playback;
pub mod pose;
pub mod skeleton;

// Re-exports for consumers (adapters)
pub use clips::{preparation, ClipDefinition, ClipType, DurationRule, Projectile, SynthInput};
pub use config::Config;
pub use constraints::{JointLimit, JointLimits};
pub use engine::MotionEngine;
pub use error::{Error, Result};
pub use gravity::{GravityContext, GravityPreset, EARTH_GRAVITY};
pub use joints::{Finger, JointId, Side, JOINT_COUNT};
pub use locomotion::LocomotionState;
pub use outputs::MotionEvent;
pub use playback::{PlaybackState, Tick};
pub use pose::{Pose, PoseRecord, Rotation};
pub use skeleton::{apply_pose_to_sink, AngleUnit, PoseSink, PoseSource, Skeleton, SkeletonNode};
