//! Easing and phase helpers.
//!
//! Clips shape acceleration with three easing curves and slice progress into
//! named phases; both live here so every synthesizer shares one definition.

pub mod functions;

pub use functions::{ease_in, ease_in_out, ease_out, lerp, window, Ease, PhaseSpan, PhaseTable};
