//! Playback bookkeeping for the single active clip.
//!
//! `PlaybackState` owns time only: it advances elapsed time, detects wrap and
//! completion, and reports what happened as a [`Tick`]. Synthesis and the
//! locomotion fold live in the engine.

use serde::Serialize;

use crate::clips::ClipType;

/// Result of advancing playback by one step.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Tick {
    /// No clip is playing.
    Idle,
    /// Mid-clip frame.
    Active { clip: ClipType, progress: f32 },
    /// A looping clip reached its end; elapsed was reset to 0. The frame is
    /// synthesised at progress 1.
    Wrapped { clip: ClipType },
    /// A non-looping clip reached its end and playback is now idle.
    Completed { clip: ClipType, duration_ms: f32 },
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct PlaybackState {
    clip: Option<ClipType>,
    elapsed_ms: f32,
    duration_ms: f32,
    playing: bool,
    looping: bool,
    phase: Option<&'static str>,
}

impl PlaybackState {
    pub fn idle() -> Self {
        Self::default()
    }

    /// Begin `clip`. Returns the pre-empted clip and its elapsed time, if any.
    pub fn start(
        &mut self,
        clip: ClipType,
        duration_ms: f32,
        looping: bool,
    ) -> Option<(ClipType, f32)> {
        let previous = self.stop();
        self.clip = Some(clip);
        self.elapsed_ms = 0.0;
        self.duration_ms = duration_ms;
        self.playing = true;
        self.looping = looping;
        previous
    }

    /// Abandon the active clip. Returns it together with its elapsed time.
    pub fn stop(&mut self) -> Option<(ClipType, f32)> {
        let active = self.active_clip().map(|c| (c, self.elapsed_ms));
        self.clip = None;
        self.playing = false;
        self.elapsed_ms = 0.0;
        self.phase = None;
        active
    }

    /// Advance by `dt_ms`. Negative and NaN steps count as zero.
    pub fn advance(&mut self, dt_ms: f32) -> Tick {
        let Some(clip) = self.active_clip() else {
            return Tick::Idle;
        };
        let dt = if dt_ms.is_finite() { dt_ms.max(0.0) } else { 0.0 };
        self.elapsed_ms += dt;

        let progress = self.progress();
        if progress < 1.0 {
            return Tick::Active { clip, progress };
        }
        if self.looping {
            self.elapsed_ms = 0.0;
            return Tick::Wrapped { clip };
        }
        let duration_ms = self.duration_ms;
        self.clip = None;
        self.playing = false;
        self.phase = None;
        Tick::Completed { clip, duration_ms }
    }

    /// `elapsed / duration`, clamped to [0, 1].
    pub fn progress(&self) -> f32 {
        if self.duration_ms <= 0.0 {
            return 1.0;
        }
        (self.elapsed_ms / self.duration_ms).clamp(0.0, 1.0)
    }

    /// Record the current phase. Returns `true` when it differs from the last one.
    pub fn enter_phase(&mut self, phase: &'static str) -> bool {
        if self.phase == Some(phase) {
            return false;
        }
        self.phase = Some(phase);
        true
    }

    #[inline]
    pub fn active_clip(&self) -> Option<ClipType> {
        if self.playing {
            self.clip
        } else {
            None
        }
    }

    #[inline]
    pub fn is_playing(&self) -> bool {
        self.playing
    }

    #[inline]
    pub fn is_looping(&self) -> bool {
        self.looping
    }

    #[inline]
    pub fn elapsed_ms(&self) -> f32 {
        self.elapsed_ms
    }

    #[inline]
    pub fn duration_ms(&self) -> f32 {
        self.duration_ms
    }

    #[inline]
    pub fn phase(&self) -> Option<&'static str> {
        self.phase
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idle_until_started() {
        let mut pb = PlaybackState::idle();
        assert_eq!(pb.advance(16.0), Tick::Idle);
        assert!(pb.stop().is_none());
    }

    #[test]
    fn completes_once() {
        let mut pb = PlaybackState::idle();
        pb.start(ClipType::Greeting, 100.0, false);
        assert_eq!(
            pb.advance(50.0),
            Tick::Active {
                clip: ClipType::Greeting,
                progress: 0.5
            }
        );
        assert_eq!(
            pb.advance(60.0),
            Tick::Completed {
                clip: ClipType::Greeting,
                duration_ms: 100.0
            }
        );
        assert!(!pb.is_playing());
        assert_eq!(pb.advance(10.0), Tick::Idle);
    }

    #[test]
    fn looping_wraps_to_zero() {
        let mut pb = PlaybackState::idle();
        pb.start(ClipType::Walk, 100.0, true);
        assert_eq!(
            pb.advance(100.0),
            Tick::Wrapped {
                clip: ClipType::Walk
            }
        );
        assert_eq!(pb.elapsed_ms(), 0.0);
        assert!(pb.is_playing());
    }

    #[test]
    fn bad_steps_do_not_rewind() {
        let mut pb = PlaybackState::idle();
        pb.start(ClipType::Greeting, 100.0, false);
        pb.advance(40.0);
        pb.advance(-30.0);
        pb.advance(f32::NAN);
        assert_eq!(pb.elapsed_ms(), 40.0);
    }

    #[test]
    fn infinite_steps_do_not_complete() {
        let mut pb = PlaybackState::idle();
        pb.start(ClipType::Greeting, 100.0, false);
        pb.advance(40.0);
        assert_eq!(
            pb.advance(f32::INFINITY),
            Tick::Active {
                clip: ClipType::Greeting,
                progress: 0.4
            }
        );
        pb.advance(f32::NEG_INFINITY);
        assert_eq!(pb.elapsed_ms(), 40.0);
        assert!(pb.is_playing());
    }

    #[test]
    fn start_reports_preempted_clip() {
        let mut pb = PlaybackState::idle();
        pb.start(ClipType::Walk, 1000.0, false);
        pb.advance(250.0);
        let prev = pb.start(ClipType::Jump, 500.0, false);
        assert_eq!(prev, Some((ClipType::Walk, 250.0)));
        assert_eq!(pb.elapsed_ms(), 0.0);
    }

    #[test]
    fn phase_changes_are_edge_triggered() {
        let mut pb = PlaybackState::idle();
        assert!(pb.enter_phase("raise"));
        assert!(!pb.enter_phase("raise"));
        assert!(pb.enter_phase("wave"));
    }
}
