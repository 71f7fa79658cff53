//! Clip catalogue.
//!
//! Each clip is a pure synthesizer `fn(&SynthInput) -> Pose` plus a phase
//! classifier. Clips own their gravity policy; nothing here unifies cadence
//! rules across clips.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::Error;
use crate::gravity::{self, GravityContext};
use crate::locomotion::LocomotionState;
use crate::pose::Pose;

mod examine;
mod flip;
mod greeting;
mod jump;
mod moon_walk;
mod preparation;
pub mod projectile;
mod sample;
mod space_walk;
mod suit_walk;
mod walk;
mod zero_g_float;

pub use preparation::preparation;
pub use projectile::Projectile;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ClipType {
    Greeting,
    Walk,
    Jump,
    SpaceWalk,
    FrontFlip,
    BackFlip,
    SuitWalk,
    MoonWalk,
    ZeroGFloat,
    Sample,
    Examine,
}

/// Which configured default an explicit-duration clip falls back to.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FallbackDuration {
    Clip,
    Walk,
}

/// How a clip's duration is computed when it starts.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum DurationRule {
    /// Full flight time of a jump that would reach `reference_height` metres
    /// on Earth, evaluated at the current gravity.
    Projectile { reference_height: f32 },
    /// `steps` steps of `earth_step_s` seconds each, stretched by `1 / sqrt(g / 9.8)`.
    SteppedCadence { earth_step_s: f32, steps: f32 },
    /// Host-provided duration, or the configured fallback.
    Explicit { fallback: FallbackDuration },
}

impl DurationRule {
    /// Resolve the duration in ms. Explicit values are honoured only by
    /// [`DurationRule::Explicit`]; unusable ones fall back with a warning.
    pub fn resolve(&self, explicit_ms: Option<f32>, gravity: f32, config: &Config) -> f32 {
        match *self {
            DurationRule::Projectile { reference_height } => {
                if explicit_ms.is_some() {
                    debug!(?explicit_ms, "explicit duration ignored for projectile clip");
                }
                Projectile::earth_reference(reference_height, gravity).flight_time() * 1000.0
            }
            DurationRule::SteppedCadence {
                earth_step_s,
                steps,
            } => {
                if explicit_ms.is_some() {
                    debug!(?explicit_ms, "explicit duration ignored for stepped clip");
                }
                let ratio = gravity::divisor(gravity) / gravity::EARTH_GRAVITY;
                steps * earth_step_s / ratio.sqrt() * 1000.0
            }
            DurationRule::Explicit { fallback } => {
                let default = match fallback {
                    FallbackDuration::Clip => config.clip_duration_ms,
                    FallbackDuration::Walk => config.walk_duration_ms,
                };
                match explicit_ms {
                    Some(ms) if ms.is_finite() && ms > 0.0 => ms,
                    Some(ms) => {
                        warn!(explicit_ms = ms, default, "unusable clip duration, using default");
                        default
                    }
                    None => default,
                }
            }
        }
    }
}

/// Static description of one clip type.
#[derive(Copy, Clone, Debug)]
pub struct ClipDefinition {
    pub clip: ClipType,
    pub duration: DurationRule,
    /// Phase names in the order they are entered. Boundaries may depend on gravity.
    pub phases: &'static [&'static str],
    /// Root travels along the walking direction and is folded into the
    /// accumulator on completion.
    pub locomotion: bool,
    /// Output is clamped by the suit joint-limit table.
    pub constrained: bool,
}

/// Everything a synthesizer reads for one frame.
#[derive(Copy, Clone, Debug)]
pub struct SynthInput<'a> {
    /// Clip progress in [0, 1].
    pub progress: f32,
    pub gravity: GravityContext,
    pub locomotion: &'a LocomotionState,
    /// Resolved duration of the running clip, in ms.
    pub duration_ms: f32,
}

impl<'a> SynthInput<'a> {
    /// Builds an input with `progress` clamped to [0, 1] (NaN maps to 0).
    pub fn new(
        progress: f32,
        gravity: GravityContext,
        locomotion: &'a LocomotionState,
        duration_ms: f32,
    ) -> Self {
        let progress = if progress.is_nan() {
            0.0
        } else {
            progress.clamp(0.0, 1.0)
        };
        Self {
            progress,
            gravity,
            locomotion,
            duration_ms,
        }
    }

    pub fn with_progress(&self, progress: f32) -> Self {
        Self::new(progress, self.gravity, self.locomotion, self.duration_ms)
    }

    /// Accumulated root position every clip starts from.
    #[inline]
    pub fn anchor(&self) -> [f32; 3] {
        self.locomotion.current_position()
    }

    /// Anchor plus an offset.
    #[inline]
    pub fn anchored(&self, offset: [f32; 3]) -> [f32; 3] {
        let a = self.anchor();
        [a[0] + offset[0], a[1] + offset[1], a[2] + offset[2]]
    }
}

impl ClipType {
    pub const ALL: [ClipType; 11] = [
        ClipType::Greeting,
        ClipType::Walk,
        ClipType::Jump,
        ClipType::SpaceWalk,
        ClipType::FrontFlip,
        ClipType::BackFlip,
        ClipType::SuitWalk,
        ClipType::MoonWalk,
        ClipType::ZeroGFloat,
        ClipType::Sample,
        ClipType::Examine,
    ];

    /// Host-facing identifier, e.g. `"spaceWalk"`.
    pub const fn name(self) -> &'static str {
        match self {
            ClipType::Greeting => "greeting",
            ClipType::Walk => "walk",
            ClipType::Jump => "jump",
            ClipType::SpaceWalk => "spaceWalk",
            ClipType::FrontFlip => "frontFlip",
            ClipType::BackFlip => "backFlip",
            ClipType::SuitWalk => "suitWalk",
            ClipType::MoonWalk => "moonWalk",
            ClipType::ZeroGFloat => "zeroGFloat",
            ClipType::Sample => "sample",
            ClipType::Examine => "examine",
        }
    }

    pub const fn definition(self) -> &'static ClipDefinition {
        match self {
            ClipType::Greeting => &greeting::DEFINITION,
            ClipType::Walk => &walk::DEFINITION,
            ClipType::Jump => &jump::DEFINITION,
            ClipType::SpaceWalk => &space_walk::DEFINITION,
            ClipType::FrontFlip => &flip::FRONT_DEFINITION,
            ClipType::BackFlip => &flip::BACK_DEFINITION,
            ClipType::SuitWalk => &suit_walk::DEFINITION,
            ClipType::MoonWalk => &moon_walk::DEFINITION,
            ClipType::ZeroGFloat => &zero_g_float::DEFINITION,
            ClipType::Sample => &sample::DEFINITION,
            ClipType::Examine => &examine::DEFINITION,
        }
    }

    #[inline]
    pub fn is_locomotion(self) -> bool {
        self.definition().locomotion
    }

    #[inline]
    pub fn is_constrained(self) -> bool {
        self.definition().constrained
    }

    pub fn resolve_duration(self, explicit_ms: Option<f32>, gravity: f32, config: &Config) -> f32 {
        self.definition()
            .duration
            .resolve(explicit_ms, gravity, config)
    }

    /// Unconstrained pose for one frame.
    pub fn synthesize(self, input: &SynthInput<'_>) -> Pose {
        match self {
            ClipType::Greeting => greeting::synthesize(input),
            ClipType::Walk => walk::synthesize(input),
            ClipType::Jump => jump::synthesize(input),
            ClipType::SpaceWalk => space_walk::synthesize(input),
            ClipType::FrontFlip => flip::synthesize(&flip::FRONT, input),
            ClipType::BackFlip => flip::synthesize(&flip::BACK, input),
            ClipType::SuitWalk => suit_walk::synthesize(input),
            ClipType::MoonWalk => moon_walk::synthesize(input),
            ClipType::ZeroGFloat => zero_g_float::synthesize(input),
            ClipType::Sample => sample::synthesize(input),
            ClipType::Examine => examine::synthesize(input),
        }
    }

    /// Name of the phase `input.progress` falls in.
    pub fn phase(self, input: &SynthInput<'_>) -> &'static str {
        match self {
            ClipType::Greeting => greeting::phase(input),
            ClipType::Walk => walk::phase(input),
            ClipType::Jump => jump::phase(input),
            ClipType::SpaceWalk => space_walk::phase(input),
            ClipType::FrontFlip | ClipType::BackFlip => flip::phase(input),
            ClipType::SuitWalk => suit_walk::phase(input),
            ClipType::MoonWalk => moon_walk::phase(input),
            ClipType::ZeroGFloat => zero_g_float::PHASE,
            ClipType::Sample => sample::phase(input),
            ClipType::Examine => examine::PHASE,
        }
    }

    /// Distance travelled along the walking direction at `input.progress`.
    /// Zero for clips that stay in place.
    pub fn travel(self, input: &SynthInput<'_>) -> f32 {
        match self {
            ClipType::Walk => walk::travel(input),
            ClipType::SpaceWalk => space_walk::travel(input),
            _ => 0.0,
        }
    }

    /// Net distance of one complete cycle: the travel of the final frame.
    pub fn cycle_distance(self, input: &SynthInput<'_>) -> f32 {
        self.travel(&input.with_progress(1.0))
    }
}

impl fmt::Display for ClipType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ClipType {
    type Err = Error;

    /// Case-insensitive match on the host-facing name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        ClipType::ALL
            .iter()
            .copied()
            .find(|c| c.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| Error::UnknownClip(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gravity::GravityPreset;

    fn input(progress: f32, gravity: f32, loco: &LocomotionState, clip: ClipType) -> SynthInput<'_> {
        let duration = clip.resolve_duration(None, gravity, &Config::default());
        SynthInput::new(progress, GravityContext::new(gravity), loco, duration)
    }

    #[test]
    fn names_parse_and_match_serde() {
        for c in ClipType::ALL {
            assert_eq!(c.name().parse::<ClipType>().unwrap(), c);
            let json = serde_json::to_string(&c).unwrap();
            assert_eq!(json, format!("\"{}\"", c.name()));
            assert_eq!(c.definition().clip, c);
        }
        assert_eq!("FRONTFLIP".parse::<ClipType>().unwrap(), ClipType::FrontFlip);
        assert!(matches!(
            "cartwheel".parse::<ClipType>(),
            Err(Error::UnknownClip(_))
        ));
    }

    #[test]
    fn flags() {
        let loco: Vec<_> = ClipType::ALL.into_iter().filter(|c| c.is_locomotion()).collect();
        assert_eq!(loco, vec![ClipType::Walk, ClipType::SpaceWalk]);
        let suited: Vec<_> = ClipType::ALL.into_iter().filter(|c| c.is_constrained()).collect();
        assert_eq!(
            suited,
            vec![
                ClipType::SuitWalk,
                ClipType::MoonWalk,
                ClipType::ZeroGFloat,
                ClipType::Sample,
                ClipType::Examine
            ]
        );
    }

    #[test]
    fn duration_rules() {
        let cfg = Config::default();
        assert_eq!(ClipType::Greeting.resolve_duration(None, 9.8, &cfg), 2000.0);
        assert_eq!(ClipType::Greeting.resolve_duration(Some(500.0), 9.8, &cfg), 500.0);
        assert_eq!(ClipType::Greeting.resolve_duration(Some(-5.0), 9.8, &cfg), 2000.0);
        assert_eq!(ClipType::Walk.resolve_duration(None, 9.8, &cfg), 3000.0);
        assert_eq!(ClipType::Walk.resolve_duration(Some(f32::NAN), 9.8, &cfg), 3000.0);

        let v0 = (2.0f32 * 9.8 * 0.8).sqrt();
        let jump = ClipType::Jump.resolve_duration(Some(100.0), 9.8, &cfg);
        assert!((jump - 2.0 * v0 / 9.8 * 1000.0).abs() < 1e-2);

        let space = ClipType::SpaceWalk.resolve_duration(None, 9.8, &cfg);
        assert!((space - 3200.0).abs() < 1e-2);
        let space_moon = ClipType::SpaceWalk.resolve_duration(None, 1.6, &cfg);
        assert!(space_moon > space);
    }

    #[test]
    fn every_clip_is_total_over_progress_and_gravity() {
        let loco = LocomotionState::default();
        let mut gravities: Vec<f32> = GravityPreset::ALL.iter().map(|p| p.gravity()).collect();
        gravities.extend([0.001, 30.0]);
        for clip in ClipType::ALL {
            for &g in &gravities {
                for i in 0..=40 {
                    let inp = input(i as f32 / 40.0, g, &loco, clip);
                    let pose = clip.synthesize(&inp);
                    for (j, r) in pose.iter() {
                        assert!(
                            r.iter().all(|v| v.is_finite()),
                            "{clip} {j} not finite at g={g}"
                        );
                    }
                    assert!(pose.root_translation().iter().all(|v| v.is_finite()));
                    assert!(clip.definition().phases.contains(&clip.phase(&inp)));
                }
            }
        }
    }

    #[test]
    fn progress_is_clamped_on_entry() {
        let loco = LocomotionState::default();
        let ctx = GravityContext::default();
        assert_eq!(SynthInput::new(1.7, ctx, &loco, 1.0).progress, 1.0);
        assert_eq!(SynthInput::new(-0.2, ctx, &loco, 1.0).progress, 0.0);
        assert_eq!(SynthInput::new(f32::NAN, ctx, &loco, 1.0).progress, 0.0);
    }

    #[test]
    fn clips_anchor_at_accumulated_position() {
        let mut loco = LocomotionState::default();
        loco.accumulate([2.0, 0.0, -3.0]);
        for clip in [ClipType::Greeting, ClipType::Jump, ClipType::Examine] {
            let t = clip.synthesize(&input(0.5, 9.8, &loco, clip)).root_translation();
            assert_eq!((t[0], t[2]), (2.0, -3.0), "{clip}");
        }
    }

    #[test]
    fn cycle_distance_is_final_frame_travel() {
        let loco = LocomotionState::default();
        let inp = input(0.3, 9.8, &loco, ClipType::Walk);
        let d = ClipType::Walk.cycle_distance(&inp);
        assert!((d - 0.02 * 2.0).abs() < 1e-6);
        assert_eq!(ClipType::Greeting.cycle_distance(&inp), 0.0);
    }
}
