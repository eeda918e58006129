//! Immutable 2D vector used for positions, sizes and speeds
//!
//! Arithmetic goes through `glam::Vec2`; the wrapper keeps the value
//! semantics explicit (every operation returns a new vector).

use std::ops::{Add, Mul, Neg};

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// A 2D point or offset in tile units
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vector {
    pub x: f32,
    pub y: f32,
}

impl Vector {
    pub const ZERO: Vector = Vector { x: 0.0, y: 0.0 };
    pub const ONE: Vector = Vector { x: 1.0, y: 1.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Component-wise sum
    #[inline]
    pub fn plus(self, other: Vector) -> Vector {
        (self.as_vec2() + other.as_vec2()).into()
    }

    /// Scale both components
    #[inline]
    pub fn times(self, scalar: f32) -> Vector {
        (self.as_vec2() * scalar).into()
    }

    #[inline]
    pub fn as_vec2(self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    /// True when both components are finite numbers
    #[inline]
    pub fn is_finite(self) -> bool {
        self.as_vec2().is_finite()
    }
}

impl From<Vec2> for Vector {
    fn from(v: Vec2) -> Self {
        Self::new(v.x, v.y)
    }
}

impl From<Vector> for Vec2 {
    fn from(v: Vector) -> Self {
        v.as_vec2()
    }
}

impl Add for Vector {
    type Output = Vector;

    fn add(self, rhs: Vector) -> Vector {
        self.plus(rhs)
    }
}

impl Mul<f32> for Vector {
    type Output = Vector;

    fn mul(self, rhs: f32) -> Vector {
        self.times(rhs)
    }
}

impl Neg for Vector {
    type Output = Vector;

    fn neg(self) -> Vector {
        self.times(-1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plus_is_pure() {
        let a = Vector::new(1.0, 2.0);
        let b = Vector::new(3.0, -1.0);
        let c = a.plus(b);
        assert_eq!(c, Vector::new(4.0, 1.0));
        assert_eq!(a, Vector::new(1.0, 2.0));
        assert_eq!(b, Vector::new(3.0, -1.0));
    }

    #[test]
    fn test_times() {
        let a = Vector::new(1.5, -2.0);
        assert_eq!(a.times(2.0), Vector::new(3.0, -4.0));
        assert_eq!(a.times(1.0), a);
        assert_eq!(-a, Vector::new(-1.5, 2.0));
    }

    #[test]
    fn test_glam_roundtrip() {
        let v: Vector = Vec2::new(0.25, 7.0).into();
        assert_eq!(Vec2::from(v), Vec2::new(0.25, 7.0));
        assert!(v.is_finite());
        assert!(!Vector::new(f32::NAN, 0.0).is_finite());
    }
}
