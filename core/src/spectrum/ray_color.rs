//! Ray Color

use crate::pbrt::*;
use std::ops::{Add, AddAssign, Div, Index, Mul, MulAssign, Sub};

/// Number of colour channels carried by a ray.
pub const RAY_COLOR_CHANNELS: usize = 3;

/// Radiometric quantity carried along a ray as a weighted sum of red, green
/// and blue components.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct RayColor {
    /// The channel values.
    c: [Float; RAY_COLOR_CHANNELS],
}

impl RayColor {
    /// Create a new `RayColor` from RGB components.
    ///
    /// * `r` - Red.
    /// * `g` - Green.
    /// * `b` - Blue.
    pub const fn new(r: Float, g: Float, b: Float) -> Self {
        Self { c: [r, g, b] }
    }

    /// Create a new `RayColor` with the same value in all channels.
    ///
    /// * `v` - Channel value.
    pub const fn splat(v: Float) -> Self {
        Self::new(v, v, v)
    }

    /// Returns black.
    pub const fn zero() -> Self {
        Self::splat(0.0)
    }

    /// Returns white.
    pub const fn one() -> Self {
        Self::splat(1.0)
    }

    /// Red channel.
    pub fn r(&self) -> Float {
        self.c[0]
    }

    /// Green channel.
    pub fn g(&self) -> Float {
        self.c[1]
    }

    /// Blue channel.
    pub fn b(&self) -> Float {
        self.c[2]
    }

    /// Returns true if all channels are zero.
    pub fn is_black(&self) -> bool {
        self.c.iter().all(|&v| v == 0.0)
    }

    /// Returns true if no channel is NaN, infinite or negative.
    pub fn is_valid(&self) -> bool {
        self.c.iter().all(|&v| v.is_finite() && v >= 0.0)
    }

    /// Returns the largest channel value.
    pub fn max(&self) -> Float {
        max(self.c[0], max(self.c[1], self.c[2]))
    }

    /// Returns the mean of the channels.
    pub fn average(&self) -> Float {
        (self.c[0] + self.c[1] + self.c[2]) / 3.0
    }

    /// Returns the luminance (y-coefficient).
    pub fn luminance(&self) -> Float {
        0.212671 * self.c[0] + 0.715160 * self.c[1] + 0.072169 * self.c[2]
    }

    /// Returns the channel values.
    pub fn to_rgb(&self) -> [Float; RAY_COLOR_CHANNELS] {
        self.c
    }
}

impl From<[Float; RAY_COLOR_CHANNELS]> for RayColor {
    fn from(c: [Float; RAY_COLOR_CHANNELS]) -> Self {
        Self { c }
    }
}

impl Add for RayColor {
    type Output = Self;

    fn add(self, other: Self) -> Self::Output {
        Self::new(
            self.c[0] + other.c[0],
            self.c[1] + other.c[1],
            self.c[2] + other.c[2],
        )
    }
}

impl AddAssign for RayColor {
    fn add_assign(&mut self, other: Self) {
        for i in 0..RAY_COLOR_CHANNELS {
            self.c[i] += other.c[i];
        }
    }
}

impl Sub for RayColor {
    type Output = Self;

    fn sub(self, other: Self) -> Self::Output {
        Self::new(
            self.c[0] - other.c[0],
            self.c[1] - other.c[1],
            self.c[2] - other.c[2],
        )
    }
}

impl Mul for RayColor {
    type Output = Self;

    fn mul(self, other: Self) -> Self::Output {
        Self::new(
            self.c[0] * other.c[0],
            self.c[1] * other.c[1],
            self.c[2] * other.c[2],
        )
    }
}

impl MulAssign for RayColor {
    fn mul_assign(&mut self, other: Self) {
        for i in 0..RAY_COLOR_CHANNELS {
            self.c[i] *= other.c[i];
        }
    }
}

impl Mul<Float> for RayColor {
    type Output = Self;

    fn mul(self, f: Float) -> Self::Output {
        Self::new(self.c[0] * f, self.c[1] * f, self.c[2] * f)
    }
}

impl Mul<RayColor> for Float {
    type Output = RayColor;

    fn mul(self, c: RayColor) -> Self::Output {
        c * self
    }
}

impl MulAssign<Float> for RayColor {
    fn mul_assign(&mut self, f: Float) {
        for v in self.c.iter_mut() {
            *v *= f;
        }
    }
}

impl Div<Float> for RayColor {
    type Output = Self;

    fn div(self, f: Float) -> Self::Output {
        debug_assert!(f != 0.0);
        self * (1.0 / f)
    }
}

impl Index<usize> for RayColor {
    type Output = Float;

    fn index(&self, i: usize) -> &Self::Output {
        &self.c[i]
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validity() {
        assert!(RayColor::new(0.0, 1.0, 2.0).is_valid());
        assert!(!RayColor::new(-0.1, 1.0, 2.0).is_valid());
        assert!(!RayColor::new(Float::NAN, 1.0, 2.0).is_valid());
        assert!(!RayColor::new(0.0, INFINITY, 2.0).is_valid());
    }

    #[test]
    fn arithmetic() {
        let a = RayColor::new(1.0, 2.0, 3.0);
        let b = RayColor::splat(2.0);
        assert_eq!(a * b, RayColor::new(2.0, 4.0, 6.0));
        assert_eq!(a + RayColor::zero(), a);
        assert_eq!(0.5 * a, RayColor::new(0.5, 1.0, 1.5));
        assert_eq!(a.max(), 3.0);
        assert!(RayColor::zero().is_black());
    }
}
