//! Error type for name lookups and configuration parsing.
//!
//! The synthesis path itself never fails; these errors only surface at the
//! host-facing edges where strings are turned into typed values.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum Error {
    #[error("unknown joint name '{0}'")]
    UnknownJoint(String),

    #[error("unknown clip type '{0}'")]
    UnknownClip(String),

    #[error("unknown gravity preset '{0}'")]
    UnknownPreset(String),

    #[error("config parse error: {0}")]
    Config(String),

    #[error("invalid skeleton: {0}")]
    InvalidSkeleton(String),
}

pub type Result<T> = std::result::Result<T, Error>;
