//! 2-D Points

use crate::pbrt::*;
use std::ops::{Add, Index, Mul};

/// A 2-D point containing `Float` values. Used for UVs, film positions and
/// 2-D random samples.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Point2f {
    /// X-coordinate.
    pub x: Float,

    /// Y-coordinate.
    pub y: Float,
}

impl Point2f {
    /// Creates a new 2-D point.
    ///
    /// * `x` - X-coordinate.
    /// * `y` - Y-coordinate.
    pub const fn new(x: Float, y: Float) -> Self {
        Self { x, y }
    }

    /// Creates a new 2-D zero point.
    pub const fn zero() -> Self {
        Self::new(0.0, 0.0)
    }
}

impl Add for Point2f {
    type Output = Self;

    fn add(self, other: Self) -> Self::Output {
        Self::new(self.x + other.x, self.y + other.y)
    }
}

impl Mul<Float> for Point2f {
    type Output = Self;

    fn mul(self, f: Float) -> Self::Output {
        Self::new(self.x * f, self.y * f)
    }
}

impl Index<usize> for Point2f {
    type Output = Float;

    fn index(&self, i: usize) -> &Self::Output {
        match i {
            0 => &self.x,
            1 => &self.y,
            _ => panic!("Invalid axis for std::Index on Point2f"),
        }
    }
}
