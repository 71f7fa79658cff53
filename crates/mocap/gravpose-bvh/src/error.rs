//! Errors raised while parsing BVH text. Line numbers are 1-based and refer
//! to the original input.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum BvhError {
    #[error("BVH data must start with HIERARCHY")]
    MissingHierarchy,

    #[error("line {line}: unexpected '{text}'")]
    UnexpectedLine { line: usize, text: String },

    #[error("line {line}: expected '{{'")]
    ExpectedOpenBrace { line: usize },

    #[error("unexpected end of input inside joint '{joint}'")]
    UnterminatedJoint { joint: String },

    #[error("line {line}: unknown channel '{name}'")]
    UnknownChannel { line: usize, name: String },

    #[error("line {line}: CHANNELS declares {declared} channels but lists {listed}")]
    ChannelCount {
        line: usize,
        declared: usize,
        listed: usize,
    },

    #[error("line {line}: invalid number '{token}'")]
    InvalidNumber { line: usize, token: String },

    #[error("no MOTION section found")]
    MissingMotion,

    #[error("expected 'Frames:' but got '{found}'")]
    MissingFrames { found: String },

    #[error("expected 'Frame Time:' but got '{found}'")]
    MissingFrameTime { found: String },

    #[error("frame time must be positive, got {0}")]
    InvalidFrameTime(f32),

    #[error("expected {expected} frames, found {found}")]
    MissingFrameData { expected: usize, found: usize },

    #[error("expected {expected} frames, found {found} data lines")]
    ExtraFrameData { expected: usize, found: usize },

    #[error("frame {frame}: expected {expected} values, found {found}")]
    FrameWidth {
        frame: usize,
        expected: usize,
        found: usize,
    },
}

pub type Result<T> = std::result::Result<T, BvhError>;
