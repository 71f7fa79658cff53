//! Frame-stepping playback of a parsed BVH clip.

use gravpose_animation_core::{Pose, PoseSource};
use serde::Serialize;
use tracing::debug;

use crate::parser::BvhClip;
use crate::retarget::{JointNameMap, Retargeter};

pub const MIN_SPEED: f32 = 0.1;
pub const MAX_SPEED: f32 = 3.0;

#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
pub struct FrameInfo {
    pub current: usize,
    pub total: usize,
    /// Seconds into the clip at `current`.
    pub time_s: f32,
    pub total_time_s: f32,
}

/// Steps through a clip one frame at a time, wrapping at the end.
#[derive(Clone, Debug)]
pub struct BvhPlayer {
    clip: BvhClip,
    retargeter: Retargeter,
    current_frame: usize,
    playing: bool,
    speed: f32,
    since_last_frame_ms: f32,
}

impl BvhPlayer {
    /// Paused at frame 0.
    pub fn new(clip: BvhClip, map: JointNameMap) -> Self {
        Self {
            clip,
            retargeter: Retargeter::new(map),
            current_frame: 0,
            playing: false,
            speed: 1.0,
            since_last_frame_ms: 0.0,
        }
    }

    pub fn play(&mut self) {
        self.playing = true;
        self.since_last_frame_ms = 0.0;
    }

    pub fn pause(&mut self) {
        self.playing = false;
    }

    pub fn reset(&mut self) {
        self.current_frame = 0;
        self.since_last_frame_ms = 0.0;
    }

    /// Jump to `frame`, clamped to the clip.
    pub fn set_frame(&mut self, frame: usize) {
        self.current_frame = frame.min(self.clip.frame_count().saturating_sub(1));
    }

    /// Clamped to [`MIN_SPEED`, `MAX_SPEED`]. NaN is ignored.
    pub fn set_playback_speed(&mut self, speed: f32) {
        if speed.is_nan() {
            return;
        }
        self.speed = speed.clamp(MIN_SPEED, MAX_SPEED);
    }

    /// Accumulate `dt_ms` and move to the next frame once a full (speed-scaled)
    /// frame time has passed. At most one frame per call; the remainder is
    /// dropped. Returns whether the frame changed.
    pub fn advance(&mut self, dt_ms: f32) -> bool {
        let total = self.clip.frame_count();
        if !self.playing || total == 0 {
            return false;
        }
        if dt_ms.is_finite() && dt_ms > 0.0 {
            self.since_last_frame_ms += dt_ms;
        }
        let frame_ms = self.clip.frame_time_s() * 1000.0 / self.speed;
        if self.since_last_frame_ms < frame_ms {
            return false;
        }
        self.since_last_frame_ms = 0.0;
        self.current_frame = (self.current_frame + 1) % total;
        if self.current_frame == 0 {
            debug!(frames = total, "BVH clip wrapped");
        }
        true
    }

    /// Pose of the current frame.
    pub fn current_pose(&mut self) -> Pose {
        self.retargeter.frame_to_pose(&self.clip, self.current_frame)
    }

    pub fn frame_info(&self) -> FrameInfo {
        let ft = self.clip.frame_time_s();
        FrameInfo {
            current: self.current_frame,
            total: self.clip.frame_count(),
            time_s: self.current_frame as f32 * ft,
            total_time_s: self.clip.duration_s(),
        }
    }

    #[inline]
    pub fn is_playing(&self) -> bool {
        self.playing
    }

    #[inline]
    pub fn speed(&self) -> f32 {
        self.speed
    }

    #[inline]
    pub fn current_frame(&self) -> usize {
        self.current_frame
    }

    pub fn clip(&self) -> &BvhClip {
        &self.clip
    }

    pub fn retargeter(&self) -> &Retargeter {
        &self.retargeter
    }
}

impl PoseSource for BvhPlayer {
    /// `None` while paused or for an empty clip.
    fn next_pose(&mut self, dt_ms: f32) -> Option<Pose> {
        if !self.playing || self.clip.frame_count() == 0 {
            return None;
        }
        self.advance(dt_ms);
        Some(self.current_pose())
    }
}
