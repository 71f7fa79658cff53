//! Gravity model: maps a gravity magnitude to the dimensionless multiplier used
//! by clip timing and amplitude formulas, plus the named environment presets.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Reference gravity (m/s²). `multiplier(EARTH_GRAVITY) == 1.0`.
pub const EARTH_GRAVITY: f32 = 9.8;

/// Floor applied wherever gravity is used as a divisor.
pub const GRAVITY_EPSILON: f32 = 0.01;

/// Multiplier used for exact zero gravity instead of collapsing to zero.
pub const ZERO_G_MULTIPLIER: f32 = 0.1;

/// `sqrt(gravity / 9.8)`, with zero gravity pinned to [`ZERO_G_MULTIPLIER`].
#[inline]
pub fn multiplier(gravity: f32) -> f32 {
    if gravity == 0.0 {
        return ZERO_G_MULTIPLIER;
    }
    (gravity / EARTH_GRAVITY).sqrt()
}

/// Gravity floored to [`GRAVITY_EPSILON`] for use as a divisor.
#[inline]
pub fn divisor(gravity: f32) -> f32 {
    gravity.max(GRAVITY_EPSILON)
}

/// Replace values the formulas cannot take (negative, NaN, infinite) with zero-g.
/// Returns the sanitised value and whether a replacement happened.
pub fn sanitize(gravity: f32) -> (f32, bool) {
    if gravity.is_finite() && gravity >= 0.0 {
        (gravity, false)
    } else {
        (0.0, true)
    }
}

/// Gravity magnitude together with its derived multiplier.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GravityContext {
    pub gravity: f32,
    pub multiplier: f32,
}

impl GravityContext {
    pub fn new(gravity: f32) -> Self {
        Self {
            gravity,
            multiplier: multiplier(gravity),
        }
    }

    #[inline]
    pub fn divisor(&self) -> f32 {
        divisor(self.gravity)
    }

    /// `g / 9.8` floored, the ratio several cadence formulas take a root of.
    #[inline]
    pub fn earth_ratio(&self) -> f32 {
        self.divisor() / EARTH_GRAVITY
    }

    /// `sqrt(9.8 / g)`: grows as gravity weakens. Drives float and sway amplitude.
    #[inline]
    pub fn float_intensity(&self) -> f32 {
        (EARTH_GRAVITY / self.divisor()).sqrt()
    }
}

impl Default for GravityContext {
    fn default() -> Self {
        Self::new(EARTH_GRAVITY)
    }
}

/// Named gravity environments.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GravityPreset {
    Mercury,
    Venus,
    Earth,
    Moon,
    Mars,
    Jupiter,
    Saturn,
    Uranus,
    Neptune,
    Titan,
    Europa,
    Ceres,
    ZeroG,
    MicroG,
}

impl GravityPreset {
    pub const ALL: [GravityPreset; 14] = [
        GravityPreset::Mercury,
        GravityPreset::Venus,
        GravityPreset::Earth,
        GravityPreset::Moon,
        GravityPreset::Mars,
        GravityPreset::Jupiter,
        GravityPreset::Saturn,
        GravityPreset::Uranus,
        GravityPreset::Neptune,
        GravityPreset::Titan,
        GravityPreset::Europa,
        GravityPreset::Ceres,
        GravityPreset::ZeroG,
        GravityPreset::MicroG,
    ];

    /// Surface gravity in m/s².
    pub const fn gravity(self) -> f32 {
        match self {
            GravityPreset::Mercury => 3.70,
            GravityPreset::Venus => 8.87,
            GravityPreset::Earth => EARTH_GRAVITY,
            GravityPreset::Moon => 1.6,
            GravityPreset::Mars => 3.7,
            GravityPreset::Jupiter => 24.8,
            GravityPreset::Saturn => 10.44,
            GravityPreset::Uranus => 8.69,
            GravityPreset::Neptune => 11.15,
            GravityPreset::Titan => 1.4,
            GravityPreset::Europa => 1.3,
            GravityPreset::Ceres => 0.27,
            GravityPreset::ZeroG => 0.0,
            GravityPreset::MicroG => 0.01,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            GravityPreset::Mercury => "mercury",
            GravityPreset::Venus => "venus",
            GravityPreset::Earth => "earth",
            GravityPreset::Moon => "moon",
            GravityPreset::Mars => "mars",
            GravityPreset::Jupiter => "jupiter",
            GravityPreset::Saturn => "saturn",
            GravityPreset::Uranus => "uranus",
            GravityPreset::Neptune => "neptune",
            GravityPreset::Titan => "titan",
            GravityPreset::Europa => "europa",
            GravityPreset::Ceres => "ceres",
            GravityPreset::ZeroG => "zerog",
            GravityPreset::MicroG => "microg",
        }
    }

    /// Lenient lookup used by hosts: unknown environments resolve to Earth.
    pub fn from_environment(name: &str) -> GravityPreset {
        name.parse().unwrap_or(GravityPreset::Earth)
    }
}

impl fmt::Display for GravityPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for GravityPreset {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        let preset = match lower.as_str() {
            "asteroid" => GravityPreset::Ceres,
            "space" | "zero-g" | "zero_g" => GravityPreset::ZeroG,
            "micro-g" | "micro_g" => GravityPreset::MicroG,
            other => GravityPreset::ALL
                .iter()
                .copied()
                .find(|p| p.name() == other)
                .ok_or_else(|| Error::UnknownPreset(s.to_string()))?,
        };
        Ok(preset)
    }
}
