//! 3-D Vectors

use crate::pbrt::*;
use std::ops::{Add, AddAssign, Div, Index, Mul, MulAssign, Neg, Sub};

/// A 3-D vector containing `Float` values.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Vector3f {
    /// X-coordinate.
    pub x: Float,

    /// Y-coordinate.
    pub y: Float,

    /// Z-coordinate.
    pub z: Float,
}

/// Positions share the vector representation.
pub type Point3f = Vector3f;

impl Vector3f {
    /// Unit vector along the x-axis.
    pub const X_AXIS: Self = Self::new(1.0, 0.0, 0.0);

    /// Unit vector along the y-axis.
    pub const Y_AXIS: Self = Self::new(0.0, 1.0, 0.0);

    /// Unit vector along the z-axis.
    pub const Z_AXIS: Self = Self::new(0.0, 0.0, 1.0);

    /// Creates a new 3-D vector.
    ///
    /// * `x` - X-coordinate.
    /// * `y` - Y-coordinate.
    /// * `z` - Z-coordinate.
    pub const fn new(x: Float, y: Float, z: Float) -> Self {
        Self { x, y, z }
    }

    /// Creates a vector with all components set to `v`.
    pub const fn splat(v: Float) -> Self {
        Self::new(v, v, v)
    }

    /// Creates a new 3-D zero vector.
    pub const fn zero() -> Self {
        Self::splat(0.0)
    }

    /// Returns true if all components are finite.
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }

    /// Returns the square of the vector's length.
    pub fn length_squared(&self) -> Float {
        self.x * self.x + self.y * self.y + self.z * self.z
    }

    /// Returns the vector's length.
    pub fn length(&self) -> Float {
        self.length_squared().sqrt()
    }

    /// Returns the unit vector.
    pub fn normalize(&self) -> Self {
        *self / self.length()
    }

    /// Returns a new vector containing absolute values of the components.
    pub fn abs(&self) -> Self {
        Self::new(abs(self.x), abs(self.y), abs(self.z))
    }

    /// Returns the dot product with another vector.
    ///
    /// * `other` - The other vector.
    pub fn dot(&self, other: &Self) -> Float {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Returns the cross product with another vector.
    ///
    /// * `other` - The other vector.
    pub fn cross(&self, other: &Self) -> Self {
        Self::new(
            self.y * other.z - self.z * other.y,
            self.z * other.x - self.x * other.z,
            self.x * other.y - self.y * other.x,
        )
    }

    /// Return the component-wise minimum coordinate values with another
    /// vector.
    ///
    /// * `other` - The other vector.
    pub fn min(&self, other: &Self) -> Self {
        Self::new(
            min(self.x, other.x),
            min(self.y, other.y),
            min(self.z, other.z),
        )
    }

    /// Return the component-wise maximum coordinate values with another
    /// vector.
    ///
    /// * `other` - The other vector.
    pub fn max(&self, other: &Self) -> Self {
        Self::new(
            max(self.x, other.x),
            max(self.y, other.y),
            max(self.z, other.z),
        )
    }

    /// Returns the largest coordinate value.
    pub fn max_component(&self) -> Float {
        max(self.x, max(self.y, self.z))
    }

    /// Returns the index of the coordinate with the largest value.
    pub fn max_dimension(&self) -> Axis {
        if self.x > self.y {
            if self.x > self.z {
                Axis::X
            } else {
                Axis::Z
            }
        } else if self.y > self.z {
            Axis::Y
        } else {
            Axis::Z
        }
    }

    /// Component-wise reciprocal.
    pub fn recip(&self) -> Self {
        Self::new(1.0 / self.x, 1.0 / self.y, 1.0 / self.z)
    }

    /// Component-wise product.
    pub fn mul_elements(&self, other: &Self) -> Self {
        Self::new(self.x * other.x, self.y * other.y, self.z * other.z)
    }

    /// Mirrors the vector about `n`. Both vectors point away from the surface.
    ///
    /// * `n` - Unit normal.
    pub fn reflect(&self, n: &Self) -> Self {
        2.0 * self.dot(n) * *n - *self
    }

    /// Builds two unit vectors that together with this (unit) vector form an
    /// orthonormal basis.
    pub fn coordinate_system(&self) -> (Self, Self) {
        let v2 = if abs(self.x) > abs(self.y) {
            Self::new(-self.z, 0.0, self.x) / (self.x * self.x + self.z * self.z).sqrt()
        } else {
            Self::new(0.0, self.z, -self.y) / (self.y * self.y + self.z * self.z).sqrt()
        };
        (v2, self.cross(&v2))
    }
}

impl Add for Vector3f {
    type Output = Self;

    fn add(self, other: Self) -> Self::Output {
        Self::new(self.x + other.x, self.y + other.y, self.z + other.z)
    }
}

impl AddAssign for Vector3f {
    fn add_assign(&mut self, other: Self) {
        self.x += other.x;
        self.y += other.y;
        self.z += other.z;
    }
}

impl Sub for Vector3f {
    type Output = Self;

    fn sub(self, other: Self) -> Self::Output {
        Self::new(self.x - other.x, self.y - other.y, self.z - other.z)
    }
}

impl Mul<Float> for Vector3f {
    type Output = Self;

    fn mul(self, f: Float) -> Self::Output {
        Self::new(self.x * f, self.y * f, self.z * f)
    }
}

impl Mul<Vector3f> for Float {
    type Output = Vector3f;

    fn mul(self, v: Vector3f) -> Self::Output {
        v * self
    }
}

impl MulAssign<Float> for Vector3f {
    fn mul_assign(&mut self, f: Float) {
        self.x *= f;
        self.y *= f;
        self.z *= f;
    }
}

impl Div<Float> for Vector3f {
    type Output = Self;

    fn div(self, f: Float) -> Self::Output {
        debug_assert!(f != 0.0);
        let inv = 1.0 / f;
        Self::new(self.x * inv, self.y * inv, self.z * inv)
    }
}

impl Neg for Vector3f {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self::new(-self.x, -self.y, -self.z)
    }
}

impl Index<usize> for Vector3f {
    type Output = Float;

    fn index(&self, i: usize) -> &Self::Output {
        match i {
            0 => &self.x,
            1 => &self.y,
            2 => &self.z,
            _ => panic!("Invalid axis for std::Index on Vector3f"),
        }
    }
}

impl Index<Axis> for Vector3f {
    type Output = Float;

    fn index(&self, axis: Axis) -> &Self::Output {
        &self[usize::from(axis)]
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::*;
    use proptest::prelude::*;

    fn unit_vector() -> impl Strategy<Value = Vector3f> {
        (-1.0..1.0f32, -1.0..1.0f32, -1.0..1.0f32)
            .prop_filter("non-degenerate", |(x, y, z)| x * x + y * y + z * z > 1e-2)
            .prop_map(|(x, y, z)| Vector3f::new(x, y, z).normalize())
    }

    #[test]
    fn cross_of_axes() {
        assert_eq!(Vector3f::X_AXIS.cross(&Vector3f::Y_AXIS), Vector3f::Z_AXIS);
    }

    #[test]
    fn max_dimension_picks_largest() {
        assert_eq!(Vector3f::new(1.0, 5.0, 2.0).max_dimension(), Axis::Y);
        assert_eq!(Vector3f::new(1.0, 0.0, 2.0).max_dimension(), Axis::Z);
    }

    proptest! {
        #[test]
        fn coordinate_system_is_orthonormal(v in unit_vector()) {
            let (t, b) = v.coordinate_system();
            prop_assert!(approx_eq!(f32, t.length(), 1.0, epsilon = 1e-5));
            prop_assert!(approx_eq!(f32, b.length(), 1.0, epsilon = 1e-5));
            prop_assert!(abs(t.dot(&v)) < 1e-5);
            prop_assert!(abs(b.dot(&v)) < 1e-5);
            prop_assert!(abs(t.dot(&b)) < 1e-5);
        }

        #[test]
        fn reflect_preserves_cosine(v in unit_vector(), n in unit_vector()) {
            let r = v.reflect(&n);
            prop_assert!(approx_eq!(f32, r.dot(&n), v.dot(&n), epsilon = 1e-5));
            prop_assert!(approx_eq!(f32, r.length(), 1.0, epsilon = 1e-4));
        }
    }
}
