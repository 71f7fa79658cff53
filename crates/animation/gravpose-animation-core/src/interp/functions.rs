//! Interpolation helpers:
//! - cubic ease-in / ease-out and quadratic ease-in-out
//! - scalar lerp
//! - phase tables mapping clip progress to a phase-local [0,1] parameter

use serde::{Deserialize, Serialize};

/// Cubic ease-in: `t³`.
#[inline]
pub fn ease_in(t: f32) -> f32 {
    t * t * t
}

/// Cubic ease-out: `1 - (1 - t)³`.
#[inline]
pub fn ease_out(t: f32) -> f32 {
    let u = 1.0 - t;
    1.0 - u * u * u
}

/// Quadratic ease-in-out: `2t²` below 0.5, `-1 + (4 - 2t)t` above.
#[inline]
pub fn ease_in_out(t: f32) -> f32 {
    if t < 0.5 {
        2.0 * t * t
    } else {
        -1.0 + (4.0 - 2.0 * t) * t
    }
}

#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Re-normalise `progress` into `[start, end]`, clamped to [0,1].
#[inline]
pub fn window(progress: f32, start: f32, end: f32) -> f32 {
    let span = end - start;
    if span <= 0.0 {
        return if progress >= end { 1.0 } else { 0.0 };
    }
    ((progress - start) / span).clamp(0.0, 1.0)
}

/// Easing shape selector, for phase tables that carry their curve.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Ease {
    Linear,
    In,
    Out,
    InOut,
}

impl Ease {
    #[inline]
    pub fn apply(self, t: f32) -> f32 {
        match self {
            Ease::Linear => t,
            Ease::In => ease_in(t),
            Ease::Out => ease_out(t),
            Ease::InOut => ease_in_out(t),
        }
    }
}

/// A named sub-interval of clip progress.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PhaseSpan {
    pub name: &'static str,
    pub start: f32,
    pub end: f32,
    pub ease: Ease,
}

impl PhaseSpan {
    pub const fn new(name: &'static str, start: f32, end: f32, ease: Ease) -> Self {
        Self {
            name,
            start,
            end,
            ease,
        }
    }

    /// Phase-local progress, un-eased.
    #[inline]
    pub fn local(&self, progress: f32) -> f32 {
        window(progress, self.start, self.end)
    }

    /// Phase-local progress passed through this phase's easing curve.
    #[inline]
    pub fn eased(&self, progress: f32) -> f32 {
        self.ease.apply(self.local(progress))
    }
}

/// Ordered, contiguous phase boundaries covering [0,1].
#[derive(Copy, Clone, Debug)]
pub struct PhaseTable(pub &'static [PhaseSpan]);

impl PhaseTable {
    pub const EMPTY: PhaseTable = PhaseTable(&[]);

    /// Index and span containing `progress`. Progress past the last boundary
    /// lands in the final phase.
    pub fn locate(&self, progress: f32) -> Option<(usize, &'static PhaseSpan)> {
        let spans = self.0;
        let idx = spans
            .iter()
            .position(|s| progress < s.end)
            .unwrap_or(spans.len().checked_sub(1)?);
        spans.get(idx).map(|s| (idx, s))
    }

    pub fn name_at(&self, progress: f32) -> Option<&'static str> {
        self.locate(progress).map(|(_, s)| s.name)
    }

    pub fn spans(&self) -> &'static [PhaseSpan] {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn easing_endpoints() {
        for f in [ease_in, ease_out, ease_in_out] {
            assert_eq!(f(0.0), 0.0);
            assert!((f(1.0) - 1.0).abs() < 1e-6);
        }
        assert_eq!(ease_in_out(0.5), 1.0 - 0.5);
        assert!((ease_in(0.5) - 0.125).abs() < 1e-6);
        assert!((ease_out(0.5) - 0.875).abs() < 1e-6);
    }

    #[test]
    fn easing_is_monotonic() {
        for f in [ease_in, ease_out, ease_in_out] {
            let mut last = f(0.0);
            for i in 1..=100 {
                let v = f(i as f32 / 100.0);
                assert!(v >= last);
                last = v;
            }
        }
    }

    #[test]
    fn window_clamps_and_handles_degenerate_span() {
        assert_eq!(window(0.15, 0.1, 0.2), 0.5);
        assert_eq!(window(-1.0, 0.1, 0.2), 0.0);
        assert_eq!(window(3.0, 0.1, 0.2), 1.0);
        assert_eq!(window(0.5, 0.5, 0.5), 1.0);
    }

    const TABLE: PhaseTable = PhaseTable(&[
        PhaseSpan::new("a", 0.0, 0.3, Ease::InOut),
        PhaseSpan::new("b", 0.3, 0.9, Ease::InOut),
        PhaseSpan::new("c", 0.9, 1.0, Ease::InOut),
    ]);

    #[test]
    fn phase_table_locates_spans() {
        assert_eq!(TABLE.name_at(0.0), Some("a"));
        assert_eq!(TABLE.name_at(0.3), Some("b"));
        assert_eq!(TABLE.name_at(0.95), Some("c"));
        assert_eq!(TABLE.name_at(1.0), Some("c"));
        let (idx, span) = TABLE.locate(0.6).unwrap();
        assert_eq!(idx, 1);
        assert!((span.local(0.6) - 0.5).abs() < 1e-6);
        assert_eq!(PhaseTable::EMPTY.locate(0.5), None);
    }
}
