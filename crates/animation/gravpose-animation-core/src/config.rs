//! Core configuration for gravpose-animation-core.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::gravity::EARTH_GRAVITY;

/// Engine defaults. Every field is optional in JSON; missing fields keep
/// their default.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Duration for clips without a physics or cadence rule, in ms.
    pub clip_duration_ms: f32,
    /// Duration for `walk` when no explicit duration is given, in ms.
    pub walk_duration_ms: f32,
    /// Gravity the engine starts with (m/s²).
    pub gravity: f32,
    pub walk_speed: f32,
    pub run_speed: f32,
    /// Record [`MotionEvent`](crate::outputs::MotionEvent)s for `drain_events`.
    pub record_events: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            clip_duration_ms: 2000.0,
            walk_duration_ms: 3000.0,
            gravity: EARTH_GRAVITY,
            walk_speed: 1.0,
            run_speed: 2.0,
            record_events: true,
        }
    }
}

impl Config {
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| Error::Config(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_overrides_only_named_fields() {
        let cfg = Config::from_json_str(r#"{ "gravity": 1.6, "walk_speed": 1.5 }"#).unwrap();
        assert_eq!(cfg.gravity, 1.6);
        assert_eq!(cfg.walk_speed, 1.5);
        assert_eq!(cfg.clip_duration_ms, 2000.0);
        assert_eq!(cfg.walk_duration_ms, 3000.0);
        assert!(cfg.record_events);
    }

    #[test]
    fn malformed_json_is_a_config_error() {
        let err = Config::from_json_str("{ gravity: }").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }
}
