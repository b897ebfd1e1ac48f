//! Basic building blocks.

use std::ops::{Add, Mul, Neg, Sub};

/// 2D vector in world coordinates (meters).
#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd)]
pub struct Vector2 {
    x: f64,
    y: f64,
}

impl Vector2 {
    pub const ZERO: Vector2 = Vector2 { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    pub fn magnitude(&self) -> f64 {
        (self.x.powi(2) + self.y.powi(2)).sqrt()
    }

    /// Unit vector in the same direction. The zero vector normalizes to
    /// itself so that NaN never enters the simulation.
    pub fn normalize(&self) -> Vector2 {
        let magnitude = self.magnitude();
        if magnitude == 0.0 {
            Vector2::ZERO
        } else {
            Vector2::new(self.x / magnitude, self.y / magnitude)
        }
    }

    pub fn dot(&self, other: Vector2) -> f64 {
        self.x * other.x + self.y * other.y
    }

    pub fn distance(&self, other: Vector2) -> f64 {
        (*self - other).magnitude()
    }

    /// Rotate counter-clockwise by an angle in degrees.
    pub fn rotate_deg(&self, angle_deg: f64) -> Vector2 {
        let (sin, cos) = angle_deg.to_radians().sin_cos();
        Vector2::new(self.x * cos - self.y * sin, self.x * sin + self.y * cos)
    }
}

impl From<Vector2> for (f64, f64) {
    fn from(value: Vector2) -> Self {
        (value.x, value.y)
    }
}

impl Add for Vector2 {
    type Output = Vector2;

    fn add(self, rhs: Self) -> Self::Output {
        Self {
            x: self.x + rhs.x,
            y: self.y + rhs.y,
        }
    }
}

impl Sub for Vector2 {
    type Output = Vector2;

    fn sub(self, rhs: Self) -> Self::Output {
        Self {
            x: self.x - rhs.x,
            y: self.y - rhs.y,
        }
    }
}

impl Neg for Vector2 {
    type Output = Vector2;

    fn neg(self) -> Self::Output {
        Self {
            x: -self.x,
            y: -self.y,
        }
    }
}

impl Mul<f64> for Vector2 {
    type Output = Vector2;

    fn mul(self, rhs: f64) -> Self::Output {
        Self {
            x: self.x * rhs,
            y: self.y * rhs,
        }
    }
}

/// Fold an accumulated heading into `(-180, 180]` degrees.
///
/// Internal rotation is additive and may exceed the range; callers
/// normalize at query time only.
pub fn normalize_deg(angle_deg: f64) -> f64 {
    let wrapped = angle_deg.rem_euclid(360.0);
    if wrapped > 180.0 {
        wrapped - 360.0
    } else {
        wrapped
    }
}
