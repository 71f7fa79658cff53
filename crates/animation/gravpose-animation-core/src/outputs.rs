//! Output contracts from the motion engine.
//!
//! Poses are returned directly from `MotionEngine::update`. Discrete playback
//! signals are buffered as [`MotionEvent`]s and drained by adapters.

use serde::{Deserialize, Serialize};

use crate::clips::ClipType;

/// Discrete semantic signals emitted while stepping.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum MotionEvent {
    ClipStarted {
        clip: ClipType,
        duration_ms: f32,
        looping: bool,
    },
    PhaseEntered {
        clip: ClipType,
        phase: String,
    },
    ClipLooped {
        clip: ClipType,
    },
    /// A non-looping clip reached its end. `displacement` is what was folded
    /// into the accumulator (zero for in-place clips).
    ClipFinished {
        clip: ClipType,
        displacement: [f32; 3],
    },
    /// Pre-empted by `start_clip` or `stop` before completing.
    ClipInterrupted {
        clip: ClipType,
        elapsed_ms: f32,
    },
    GravityChanged {
        gravity: f32,
    },
}

/// Event buffer owned by the engine.
#[derive(Clone, Debug, Default)]
pub struct EventLog {
    enabled: bool,
    events: Vec<MotionEvent>,
}

impl EventLog {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            events: Vec::new(),
        }
    }

    #[inline]
    pub fn push(&mut self, event: MotionEvent) {
        if self.enabled {
            self.events.push(event);
        }
    }

    #[inline]
    pub fn drain(&mut self) -> Vec<MotionEvent> {
        std::mem::take(&mut self.events)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn externally_tagged_json() {
        let ev = MotionEvent::ClipLooped {
            clip: ClipType::SpaceWalk,
        };
        let json = serde_json::to_value(&ev).unwrap();
        assert_eq!(json["ClipLooped"]["clip"], "spaceWalk");
    }

    #[test]
    fn disabled_log_drops_events() {
        let mut log = EventLog::new(false);
        log.push(MotionEvent::GravityChanged { gravity: 1.6 });
        assert!(log.is_empty());

        let mut log = EventLog::new(true);
        log.push(MotionEvent::GravityChanged { gravity: 1.6 });
        assert_eq!(log.drain().len(), 1);
        assert!(log.is_empty());
    }
}
