//! 2D float vector used by every effect in the crate.
//!
//! World coordinates are y-up and angles are counter-clockwise radians, so
//! `(cos θ, sin θ)` is the unit vector pointing at angle θ. Backends that draw
//! in y-down screen space convert at the very last step (see
//! [`crate::render`]).
//!
//! # Zero vector
//!
//! [`Vector2::normalize`] divides by the norm and yields NaN components for
//! the zero vector. Internal callers always go through the guarded
//! [`Vector2::try_normalize`] or [`Vector2::normalize_or_zero`].

use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vector2 {
    pub x: f32,
    pub y: f32,
}

impl Vector2 {
    pub const ZERO: Vector2 = Vector2 { x: 0.0, y: 0.0 };
    pub const RIGHT: Vector2 = Vector2 { x: 1.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Unit vector `(cos θ, sin θ)`.
    pub fn from_angle(angle: f32) -> Self {
        let (sin, cos) = angle.sin_cos();
        Self { x: cos, y: sin }
    }

    /// Angle of this vector in radians, in `(-π, π]`.
    pub fn angle(self) -> f32 {
        self.y.atan2(self.x)
    }

    pub fn scale(self, factor: f32) -> Self {
        Self {
            x: self.x * factor,
            y: self.y * factor,
        }
    }

    pub fn dot(self, other: Vector2) -> f32 {
        self.x * other.x + self.y * other.y
    }

    pub fn norm2(self) -> f32 {
        self.dot(self)
    }

    pub fn norm(self) -> f32 {
        self.norm2().sqrt()
    }

    /// Unit vector in the same direction.
    ///
    /// The zero vector has no direction: the result is NaN. Use
    /// [`try_normalize`](Self::try_normalize) when the input may be zero.
    pub fn normalize(self) -> Self {
        self.scale(1.0 / self.norm())
    }

    /// Unit vector in the same direction, or `None` for the zero vector.
    pub fn try_normalize(self) -> Option<Self> {
        let norm = self.norm();
        if norm > 0.0 && norm.is_finite() {
            Some(self.scale(1.0 / norm))
        } else {
            None
        }
    }

    pub fn normalize_or_zero(self) -> Self {
        self.try_normalize().unwrap_or(Self::ZERO)
    }

    /// Applies the rotation matrix encoded by `cos_sin = (cos θ, sin θ)`.
    ///
    /// `cos_sin` is expected to be a unit vector; any other length also
    /// scales the result by that length.
    pub fn rotate(self, cos_sin: Vector2) -> Self {
        Self {
            x: cos_sin.x * self.x - cos_sin.y * self.y,
            y: cos_sin.y * self.x + cos_sin.x * self.y,
        }
    }
}

impl Add for Vector2 {
    type Output = Vector2;

    fn add(self, rhs: Vector2) -> Vector2 {
        Vector2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Vector2 {
    fn add_assign(&mut self, rhs: Vector2) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Vector2 {
    type Output = Vector2;

    fn sub(self, rhs: Vector2) -> Vector2 {
        Vector2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl SubAssign for Vector2 {
    fn sub_assign(&mut self, rhs: Vector2) {
        self.x -= rhs.x;
        self.y -= rhs.y;
    }
}

impl Neg for Vector2 {
    type Output = Vector2;

    fn neg(self) -> Vector2 {
        Vector2::new(-self.x, -self.y)
    }
}

impl Mul<f32> for Vector2 {
    type Output = Vector2;

    fn mul(self, rhs: f32) -> Vector2 {
        self.scale(rhs)
    }
}

impl Mul<Vector2> for f32 {
    type Output = Vector2;

    fn mul(self, rhs: Vector2) -> Vector2 {
        rhs.scale(self)
    }
}
