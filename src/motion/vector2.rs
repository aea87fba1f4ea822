//! 2D point/vector value type

use std::f64::consts::PI;
use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use serde::{Deserialize, Serialize};

use super::math;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vector2 {
    pub x: f64,
    pub y: f64,
}

impl Vector2 {
    pub const ZERO: Vector2 = Vector2 { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Point at `length` along `angle` (radians)
    pub fn from_polar(angle: f64, length: f64) -> Self {
        Self::new(angle.cos() * length, angle.sin() * length)
    }

    /// Evaluate a cubic Bézier curve at `t`, one axis at a time
    pub fn cubic_bezier(t: f64, p0: Vector2, c1: Vector2, c2: Vector2, p1: Vector2) -> Self {
        Self::new(
            math::cubic_bezier(t, p0.x, c1.x, c2.x, p1.x),
            math::cubic_bezier(t, p0.y, c1.y, c2.y, p1.y),
        )
    }

    pub fn magnitude(&self) -> f64 {
        math::hypotenuse(self.x, self.y)
    }

    /// Unit-length copy. The zero vector stays zero.
    pub fn normalize(self) -> Self {
        let mut magnitude = self.magnitude().abs();
        if magnitude == 0.0 {
            magnitude = 1.0;
        }
        self / magnitude
    }

    /// Direction in radians, in `[0, 2π)`. The zero vector reports 0.
    pub fn angle(&self) -> f64 {
        let magnitude = self.magnitude();
        if magnitude == 0.0 {
            return 0.0;
        }
        let angle = (self.x / magnitude).clamp(-1.0, 1.0).acos();
        if self.y < 0.0 {
            PI + (PI - angle)
        } else {
            angle
        }
    }

    /// Direction from `self` towards `to`
    pub fn angle_to(&self, to: Vector2) -> f64 {
        (to - *self).angle()
    }

    pub fn distance_to(&self, to: Vector2) -> f64 {
        (*self - to).magnitude()
    }

    pub fn lerp(self, to: Vector2, t: f64) -> Self {
        Self::new(math::lerp(self.x, to.x, t), math::lerp(self.y, to.y, t))
    }

    /// Overwrite this point with the Bézier position at `t`
    pub fn apply_cubic_bezier(
        &mut self,
        t: f64,
        p0: Vector2,
        c1: Vector2,
        c2: Vector2,
        p1: Vector2,
    ) -> &mut Self {
        *self = Self::cubic_bezier(t, p0, c1, c2, p1);
        self
    }
}

impl From<(f64, f64)> for Vector2 {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

impl Add for Vector2 {
    type Output = Vector2;

    fn add(self, rhs: Vector2) -> Vector2 {
        Vector2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Add<f64> for Vector2 {
    type Output = Vector2;

    fn add(self, rhs: f64) -> Vector2 {
        Vector2::new(self.x + rhs, self.y + rhs)
    }
}

impl Sub for Vector2 {
    type Output = Vector2;

    fn sub(self, rhs: Vector2) -> Vector2 {
        Vector2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Sub<f64> for Vector2 {
    type Output = Vector2;

    fn sub(self, rhs: f64) -> Vector2 {
        Vector2::new(self.x - rhs, self.y - rhs)
    }
}

impl Mul for Vector2 {
    type Output = Vector2;

    fn mul(self, rhs: Vector2) -> Vector2 {
        Vector2::new(self.x * rhs.x, self.y * rhs.y)
    }
}

impl Mul<f64> for Vector2 {
    type Output = Vector2;

    fn mul(self, rhs: f64) -> Vector2 {
        Vector2::new(self.x * rhs, self.y * rhs)
    }
}

impl Div for Vector2 {
    type Output = Vector2;

    fn div(self, rhs: Vector2) -> Vector2 {
        Vector2::new(self.x / rhs.x, self.y / rhs.y)
    }
}

impl Div<f64> for Vector2 {
    type Output = Vector2;

    fn div(self, rhs: f64) -> Vector2 {
        Vector2::new(self.x / rhs, self.y / rhs)
    }
}

impl Neg for Vector2 {
    type Output = Vector2;

    fn neg(self) -> Vector2 {
        Vector2::new(-self.x, -self.y)
    }
}

impl AddAssign for Vector2 {
    fn add_assign(&mut self, rhs: Vector2) {
        *self = *self + rhs;
    }
}

impl SubAssign for Vector2 {
    fn sub_assign(&mut self, rhs: Vector2) {
        *self = *self - rhs;
    }
}

impl MulAssign<f64> for Vector2 {
    fn mul_assign(&mut self, rhs: f64) {
        *self = *self * rhs;
    }
}

impl DivAssign<f64> for Vector2 {
    fn div_assign(&mut self, rhs: f64) {
        *self = *self / rhs;
    }
}
