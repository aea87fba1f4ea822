//! Stateless numeric helpers used by the trajectory engine

/// A numeric range that may be ascending or descending.
///
/// A bare number `n` converts to `[0, n]`, so `modulate(x, 1.0, 10.0)`
/// reads the same as `modulate(x, [0.0, 1.0], [0.0, 10.0])`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub start: f64,
    pub end: f64,
}

impl Bounds {
    pub const fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    pub fn min(&self) -> f64 {
        self.start.min(self.end)
    }

    pub fn max(&self) -> f64 {
        self.start.max(self.end)
    }

    /// Distance between the two ends, always non-negative
    pub fn width(&self) -> f64 {
        euclidean_distance(self.start, self.end)
    }
}

impl From<f64> for Bounds {
    fn from(end: f64) -> Self {
        Self::new(0.0, end)
    }
}

impl From<[f64; 2]> for Bounds {
    fn from([start, end]: [f64; 2]) -> Self {
        Self::new(start, end)
    }
}

impl From<(f64, f64)> for Bounds {
    fn from((start, end): (f64, f64)) -> Self {
        Self::new(start, end)
    }
}

/// Remap `number` from one range onto another.
///
/// The mapping is a plain affine extrapolation: inputs outside `from` land
/// outside `to`. A zero-width `from` range maps everything to `to.start`.
pub fn modulate(number: f64, from: impl Into<Bounds>, to: impl Into<Bounds>) -> f64 {
    let from = from.into();
    let to = to.into();

    let span = from.end - from.start;
    if span == 0.0 {
        return to.start;
    }

    let percent = (number - from.start) / span;
    if to.end > to.start {
        percent * (to.end - to.start) + to.start
    } else {
        to.start - percent * (to.start - to.end)
    }
}

/// Absolute distance between two scalars
pub fn euclidean_distance(a: f64, b: f64) -> f64 {
    if a == b {
        return 0.0;
    }
    (a - b).abs()
}

/// Wrap `number` into `[min, max]` of `range`.
///
/// Values already inside the range come back unchanged. A value that wraps
/// exactly onto one bound snaps to the opposite bound, so `720` in
/// `[0, 360]` becomes `360` while `-360` becomes `0`.
pub fn cycle_number(number: f64, range: impl Into<Bounds>) -> f64 {
    let range = range.into();
    let max = range.max();
    let min = range.min();

    if max == 0.0 && min == 0.0 {
        return 0.0;
    }

    let span = euclidean_distance(min, max);
    if span == 0.0 {
        return min;
    }

    if number > max {
        let wrapped = euclidean_distance(number, max) % span + min;
        if wrapped == min {
            max
        } else {
            wrapped
        }
    } else if number < min {
        let wrapped = max - euclidean_distance(number, min) % span;
        if wrapped == max {
            min
        } else {
            wrapped
        }
    } else {
        number
    }
}

/// Magnitude of `(x, y)` by factoring out the larger component, which keeps
/// extreme inputs from overflowing or underflowing
pub fn hypotenuse(x: f64, y: f64) -> f64 {
    let (ax, ay) = (x.abs(), y.abs());
    let max = ax.max(ay);
    if max == 0.0 {
        return 0.0;
    }
    let n = ax.min(ay) / max;
    max * (1.0 + n * n).sqrt()
}

/// Linear interpolation
pub fn lerp(from: f64, to: f64, t: f64) -> f64 {
    (1.0 - t) * from + t * to
}

/// Scalar cubic Bézier. `t` is expected in `[0, 1]` but is not clamped.
pub fn cubic_bezier(t: f64, p0: f64, c1: f64, c2: f64, p1: f64) -> f64 {
    let u = 1.0 - t;
    u.powi(3) * p0 + 3.0 * t * u.powi(2) * c1 + 3.0 * t * t * u * c2 + t.powi(3) * p1
}
