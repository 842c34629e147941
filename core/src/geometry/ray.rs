//! Ray

use super::*;
use crate::pbrt::*;

/// Direction components smaller than this are clamped before taking the
/// reciprocal so slab tests only ever see finite values.
const MIN_DIR_COMPONENT: Float = 1.0e-20;

/// A semi-infinite line with precomputed reciprocals for slab tests.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Ray {
    /// Origin.
    pub origin: Point3f,

    /// Unit direction.
    pub dir: Vector3f,

    /// Component-wise reciprocal of `dir`.
    pub inv_dir: Vector3f,

    /// Component-wise `origin / dir`.
    pub origin_div_dir: Vector3f,
}

impl Ray {
    /// Create a new ray.
    ///
    /// * `origin` - Origin.
    /// * `dir`    - Direction; expected to be normalized.
    pub fn new(origin: Point3f, dir: Vector3f) -> Self {
        let safe_recip = |d: Float| {
            if d.abs() >= MIN_DIR_COMPONENT {
                1.0 / d
            } else if d < 0.0 {
                -1.0 / MIN_DIR_COMPONENT
            } else {
                1.0 / MIN_DIR_COMPONENT
            }
        };
        let inv_dir = Vector3f::new(safe_recip(dir.x), safe_recip(dir.y), safe_recip(dir.z));
        Self {
            origin,
            dir,
            inv_dir,
            origin_div_dir: origin.mul_elements(&inv_dir),
        }
    }

    /// Returns the point at distance `t` along the ray.
    ///
    /// * `t` - The distance.
    pub fn at(&self, t: Float) -> Point3f {
        self.origin + self.dir * t
    }
}
