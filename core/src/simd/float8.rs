//! 8-lane float vector

use super::Mask8;
use crate::geometry::*;
use crate::pbrt::*;
use std::ops::{Add, Index, Mul, Sub};

/// Eight `Float` lanes.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Float8(pub [Float; 8]);

impl Float8 {
    /// All lanes set to `v`.
    #[inline]
    pub const fn splat(v: Float) -> Self {
        Self([v; 8])
    }

    /// Lane-wise minimum; NaN lanes take the other operand.
    #[inline]
    pub fn min(&self, other: &Self) -> Self {
        Self(std::array::from_fn(|i| self.0[i].min(other.0[i])))
    }

    /// Lane-wise maximum; NaN lanes take the other operand.
    #[inline]
    pub fn max(&self, other: &Self) -> Self {
        Self(std::array::from_fn(|i| self.0[i].max(other.0[i])))
    }

    /// Lane-wise `self < other`.
    #[inline]
    pub fn lt(&self, other: &Self) -> Mask8 {
        Mask8::from_lanes(std::array::from_fn(|i| self.0[i] < other.0[i]))
    }

    /// Lane-wise `self >= other`.
    #[inline]
    pub fn ge(&self, other: &Self) -> Mask8 {
        Mask8::from_lanes(std::array::from_fn(|i| self.0[i] >= other.0[i]))
    }
}

impl Add for Float8 {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self::Output {
        Self(std::array::from_fn(|i| self.0[i] + other.0[i]))
    }
}

impl Sub for Float8 {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self::Output {
        Self(std::array::from_fn(|i| self.0[i] - other.0[i]))
    }
}

impl Mul for Float8 {
    type Output = Self;

    #[inline]
    fn mul(self, other: Self) -> Self::Output {
        Self(std::array::from_fn(|i| self.0[i] * other.0[i]))
    }
}

impl Index<usize> for Float8 {
    type Output = Float;

    fn index(&self, lane: usize) -> &Self::Output {
        &self.0[lane]
    }
}

/// Eight 3-D vectors in structure-of-arrays layout.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Vector3x8 {
    /// X-coordinates.
    pub x: Float8,

    /// Y-coordinates.
    pub y: Float8,

    /// Z-coordinates.
    pub z: Float8,
}

impl Vector3x8 {
    /// Gather eight vectors.
    ///
    /// * `v` - One vector per lane.
    pub fn from_lanes(v: &[Vector3f; 8]) -> Self {
        Self {
            x: Float8(std::array::from_fn(|i| v[i].x)),
            y: Float8(std::array::from_fn(|i| v[i].y)),
            z: Float8(std::array::from_fn(|i| v[i].z)),
        }
    }

    /// Extract a single lane.
    ///
    /// * `lane` - Lane index.
    pub fn lane(&self, lane: usize) -> Vector3f {
        Vector3f::new(self.x[lane], self.y[lane], self.z[lane])
    }
}
