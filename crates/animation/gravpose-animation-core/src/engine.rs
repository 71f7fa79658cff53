//! MotionEngine: owns gravity, playback and the locomotion accumulator and
//! turns `update(dt)` calls into poses.
//!
//! Methods:
//! - new, set_gravity / set_environment / set_preset, start_clip, stop, update
//! - set_walking_direction, set_movement_speed, reset_position, current_position
//! - playback, is_playing, current_phase, drain_events

use tracing::{debug, trace, warn};

use crate::clips::{ClipType, SynthInput};
use crate::config::Config;
use crate::constraints::JointLimits;
use crate::error::Result;
use crate::gravity::{self, GravityContext, GravityPreset};
use crate::locomotion::LocomotionState;
use crate::outputs::{EventLog, MotionEvent};
use crate::playback::{PlaybackState, Tick};
use crate::pose::Pose;
use crate::skeleton::PoseSource;

#[derive(Debug)]
pub struct MotionEngine {
    config: Config,
    gravity: GravityContext,
    playback: PlaybackState,
    locomotion: LocomotionState,
    events: EventLog,
}

impl Default for MotionEngine {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

impl MotionEngine {
    pub fn new(config: Config) -> Self {
        let (g, replaced) = gravity::sanitize(config.gravity);
        if replaced {
            warn!(gravity = config.gravity, "invalid initial gravity, using zero-g");
        }
        Self {
            gravity: GravityContext::new(g),
            playback: PlaybackState::idle(),
            locomotion: LocomotionState::new(config.walk_speed, config.run_speed),
            events: EventLog::new(config.record_events),
            config,
        }
    }

    // ----- gravity -----

    /// Set gravity in m/s². Negative or non-finite values become zero-g.
    /// A running clip keeps the duration it started with.
    pub fn set_gravity(&mut self, gravity: f32) -> f32 {
        let (g, replaced) = gravity::sanitize(gravity);
        if replaced {
            warn!(gravity, "invalid gravity, using zero-g");
        }
        self.gravity = GravityContext::new(g);
        self.events.push(MotionEvent::GravityChanged { gravity: g });
        g
    }

    /// Lenient environment lookup; unknown names fall back to Earth.
    pub fn set_environment(&mut self, name: &str) -> GravityPreset {
        let preset = GravityPreset::from_environment(name);
        if name.parse::<GravityPreset>().is_err() {
            debug!(name, "unknown environment, using earth");
        }
        self.set_preset(preset);
        preset
    }

    pub fn set_preset(&mut self, preset: GravityPreset) {
        self.set_gravity(preset.gravity());
    }

    #[inline]
    pub fn gravity(&self) -> f32 {
        self.gravity.gravity
    }

    #[inline]
    pub fn gravity_context(&self) -> GravityContext {
        self.gravity
    }

    // ----- playback -----

    /// Start `clip`, pre-empting any running clip without folding its travel.
    /// Returns the resolved duration in ms.
    pub fn start_clip(&mut self, clip: ClipType, duration_ms: Option<f32>, looping: bool) -> f32 {
        let duration = clip.resolve_duration(duration_ms, self.gravity.gravity, &self.config);
        if let Some((prev, elapsed_ms)) = self.playback.start(clip, duration, looping) {
            debug!(clip = %prev, elapsed_ms, "clip interrupted");
            self.events.push(MotionEvent::ClipInterrupted {
                clip: prev,
                elapsed_ms,
            });
        }
        debug!(
            clip = %clip,
            duration_ms = duration,
            looping,
            gravity = self.gravity.gravity,
            "clip started"
        );
        self.events.push(MotionEvent::ClipStarted {
            clip,
            duration_ms: duration,
            looping,
        });
        duration
    }

    /// Name-based variant used by adapters.
    pub fn start_clip_by_name(
        &mut self,
        name: &str,
        duration_ms: Option<f32>,
        looping: bool,
    ) -> Result<f32> {
        let clip: ClipType = name.parse()?;
        Ok(self.start_clip(clip, duration_ms, looping))
    }

    /// Abandon the running clip. Returns the rest pose at the accumulated
    /// position, or `None` if nothing was playing.
    pub fn stop(&mut self) -> Option<Pose> {
        let (clip, elapsed_ms) = self.playback.stop()?;
        debug!(clip = %clip, elapsed_ms, "clip stopped");
        self.events.push(MotionEvent::ClipInterrupted { clip, elapsed_ms });
        Some(Pose::rest_at(self.locomotion.current_position()))
    }

    /// Advance playback by `dt_ms` and return the pose for this step.
    /// `None` when idle.
    pub fn update(&mut self, dt_ms: f32) -> Option<Pose> {
        match self.playback.advance(dt_ms) {
            Tick::Idle => None,
            Tick::Active { clip, progress } => Some(self.frame(clip, progress)),
            Tick::Wrapped { clip } => {
                trace!(clip = %clip, "clip looped");
                self.events.push(MotionEvent::ClipLooped { clip });
                Some(self.frame(clip, 1.0))
            }
            Tick::Completed { clip, duration_ms } => Some(self.finish(clip, duration_ms)),
        }
    }

    fn frame(&mut self, clip: ClipType, progress: f32) -> Pose {
        let input = SynthInput::new(
            progress,
            self.gravity,
            &self.locomotion,
            self.playback.duration_ms(),
        );
        let phase = clip.phase(&input);
        let mut pose = clip.synthesize(&input);
        if clip.is_constrained() {
            JointLimits::SPACESUIT.apply(&mut pose);
        }

        if self.playback.enter_phase(phase) {
            trace!(clip = %clip, phase, progress, "phase entered");
            self.events.push(MotionEvent::PhaseEntered {
                clip,
                phase: phase.to_string(),
            });
        }
        pose
    }

    /// Fold locomotion travel once and return the terminal rest frame.
    fn finish(&mut self, clip: ClipType, duration_ms: f32) -> Pose {
        let input = SynthInput::new(1.0, self.gravity, &self.locomotion, duration_ms);
        let distance = clip.cycle_distance(&input);
        let displacement = self.locomotion.along(distance);
        if clip.is_locomotion() {
            self.locomotion.accumulate(displacement);
            debug!(
                clip = %clip,
                distance,
                position = ?self.locomotion.current_position(),
                "locomotion folded"
            );
        }
        debug!(clip = %clip, "clip finished");
        self.events.push(MotionEvent::ClipFinished { clip, displacement });
        Pose::rest_at(self.locomotion.current_position())
    }

    #[inline]
    pub fn playback(&self) -> &PlaybackState {
        &self.playback
    }

    #[inline]
    pub fn is_playing(&self) -> bool {
        self.playback.is_playing()
    }

    #[inline]
    pub fn current_clip(&self) -> Option<ClipType> {
        self.playback.active_clip()
    }

    /// Phase of the last synthesised frame of the running clip.
    #[inline]
    pub fn current_phase(&self) -> Option<&'static str> {
        self.playback.phase()
    }

    // ----- locomotion -----

    /// Normalised walking direction. Zero-length input is ignored.
    pub fn set_walking_direction(&mut self, x: f32, y: f32, z: f32) -> bool {
        let changed = self.locomotion.set_direction(x, y, z);
        if !changed {
            debug!(x, y, z, "ignored degenerate walking direction");
        }
        changed
    }

    /// Both speeds must be finite and non-negative, otherwise the call is ignored.
    pub fn set_movement_speed(&mut self, walk_speed: f32, run_speed: f32) -> bool {
        let valid = |v: f32| v.is_finite() && v >= 0.0;
        if !(valid(walk_speed) && valid(run_speed)) {
            warn!(walk_speed, run_speed, "ignored invalid movement speed");
            return false;
        }
        self.locomotion.set_speeds(walk_speed, run_speed);
        true
    }

    pub fn reset_position(&mut self) {
        self.locomotion.reset();
        debug!("locomotion position reset");
    }

    #[inline]
    pub fn current_position(&self) -> [f32; 3] {
        self.locomotion.current_position()
    }

    #[inline]
    pub fn locomotion(&self) -> &LocomotionState {
        &self.locomotion
    }

    // ----- events / config -----

    pub fn drain_events(&mut self) -> Vec<MotionEvent> {
        self.events.drain()
    }

    #[inline]
    pub fn config(&self) -> &Config {
        &self.config
    }
}

impl PoseSource for MotionEngine {
    fn next_pose(&mut self, dt_ms: f32) -> Option<Pose> {
        self.update(dt_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idle_engine_yields_nothing() {
        let mut eng = MotionEngine::default();
        assert!(eng.update(16.0).is_none());
        assert!(eng.stop().is_none());
        assert!(!eng.is_playing());
    }

    #[test]
    fn invalid_gravity_becomes_zero_g() {
        let mut eng = MotionEngine::default();
        assert_eq!(eng.set_gravity(-3.0), 0.0);
        assert_eq!(eng.gravity_context().multiplier, 0.1);
        assert_eq!(eng.set_gravity(f32::NAN), 0.0);
        assert_eq!(eng.set_environment("moon"), GravityPreset::Moon);
        assert_eq!(eng.gravity(), 1.6);
        assert_eq!(eng.set_environment("krypton"), GravityPreset::Earth);
        assert_eq!(eng.gravity(), 9.8);
    }

    #[test]
    fn phase_events_follow_progress() {
        let mut eng = MotionEngine::default();
        eng.start_clip(ClipType::Greeting, Some(1000.0), false);
        eng.update(100.0);
        assert_eq!(eng.current_phase(), Some("raise"));
        eng.update(300.0);
        assert_eq!(eng.current_phase(), Some("wave"));
        let phases: Vec<_> = eng
            .drain_events()
            .into_iter()
            .filter_map(|e| match e {
                MotionEvent::PhaseEntered { phase, .. } => Some(phase),
                _ => None,
            })
            .collect();
        assert_eq!(phases, vec!["raise", "wave"]);
    }

    #[test]
    fn suited_clips_are_clamped() {
        let mut eng = MotionEngine::default();
        eng.start_clip(ClipType::ZeroGFloat, Some(1000.0), false);
        for _ in 0..60 {
            let Some(pose) = eng.update(16.0) else { break };
            for limit in JointLimits::SPACESUIT.limits() {
                let r = pose.rotation(limit.joint);
                assert_eq!(limit.clamp(r), r);
            }
        }
    }

    #[test]
    fn rejected_speeds_keep_previous() {
        let mut eng = MotionEngine::default();
        assert!(!eng.set_movement_speed(f32::INFINITY, 1.0));
        assert_eq!(eng.locomotion().walk_speed, 1.0);
        assert!(eng.set_movement_speed(1.5, 3.0));
        assert_eq!(eng.locomotion().run_speed, 3.0);
    }
}
