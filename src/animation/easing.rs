//! Easing (timing) functions

use serde::{Deserialize, Serialize};

/// Linear interpolation
pub fn linear(t: f64) -> f64 {
    t
}

/// Ease in (slow start)
pub fn ease_in_quad(t: f64) -> f64 {
    t * t
}

/// Ease out (slow end)
pub fn ease_out_quad(t: f64) -> f64 {
    1.0 - (1.0 - t) * (1.0 - t)
}

/// Ease in and out
pub fn ease_in_out_quad(t: f64) -> f64 {
    if t < 0.5 {
        2.0 * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
    }
}

pub fn ease_in_cubic(t: f64) -> f64 {
    t * t * t
}

pub fn ease_out_cubic(t: f64) -> f64 {
    1.0 - (1.0 - t).powi(3)
}

pub fn ease_in_out_cubic(t: f64) -> f64 {
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}

/// Bounce effect
pub fn bounce(t: f64) -> f64 {
    let n1 = 7.5625;
    let d1 = 2.75;

    if t < 1.0 / d1 {
        n1 * t * t
    } else if t < 2.0 / d1 {
        let t = t - 1.5 / d1;
        n1 * t * t + 0.75
    } else if t < 2.5 / d1 {
        let t = t - 2.25 / d1;
        n1 * t * t + 0.9375
    } else {
        let t = t - 2.625 / d1;
        n1 * t * t + 0.984375
    }
}

/// Named easing curves, plus an escape hatch for arbitrary functions.
///
/// `Custom` cannot be written to or read from a config file.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Easing {
    #[default]
    Linear,
    QuadIn,
    QuadOut,
    QuadInOut,
    CubicIn,
    CubicOut,
    CubicInOut,
    Bounce,
    #[serde(skip)]
    Custom(fn(f64) -> f64),
}

impl Easing {
    pub fn apply(self, t: f64) -> f64 {
        match self {
            Easing::Linear => linear(t),
            Easing::QuadIn => ease_in_quad(t),
            Easing::QuadOut => ease_out_quad(t),
            Easing::QuadInOut => ease_in_out_quad(t),
            Easing::CubicIn => ease_in_cubic(t),
            Easing::CubicOut => ease_out_cubic(t),
            Easing::CubicInOut => ease_in_out_cubic(t),
            Easing::Bounce => bounce(t),
            Easing::Custom(f) => f(t),
        }
    }
}
