//! 3-D Axis Aligned Bounding Boxes.

use super::*;
use crate::pbrt::*;

/// 3-D Axis Aligned Bounding Box.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Bounds3f {
    /// Minimum bounds.
    pub p_min: Point3f,

    /// Maximum bounds.
    pub p_max: Point3f,
}

impl Default for Bounds3f {
    /// Returns an empty box.
    fn default() -> Self {
        Self::empty()
    }
}

impl Bounds3f {
    /// Creates a new bounding box from two corner points.
    ///
    /// * `p1` - First corner.
    /// * `p2` - Second corner.
    pub fn new(p1: Point3f, p2: Point3f) -> Self {
        Self {
            p_min: p1.min(&p2),
            p_max: p1.max(&p2),
        }
    }

    /// Returns an empty box that any union will overwrite.
    pub const fn empty() -> Self {
        Self {
            p_min: Vector3f::splat(INFINITY),
            p_max: Vector3f::splat(-INFINITY),
        }
    }

    /// Returns a box enclosing a single point.
    ///
    /// * `p` - The point.
    pub fn from_point(p: Point3f) -> Self {
        Self { p_min: p, p_max: p }
    }

    /// Returns true if the box contains no points.
    pub fn is_empty(&self) -> bool {
        self.p_min.x > self.p_max.x || self.p_min.y > self.p_max.y || self.p_min.z > self.p_max.z
    }

    /// Returns a box enclosing this box and another.
    ///
    /// * `other` - The other box.
    pub fn union(&self, other: &Self) -> Self {
        Self {
            p_min: self.p_min.min(&other.p_min),
            p_max: self.p_max.max(&other.p_max),
        }
    }

    /// Returns a box enclosing this box and a point.
    ///
    /// * `p` - The point.
    pub fn union_point(&self, p: &Point3f) -> Self {
        Self {
            p_min: self.p_min.min(p),
            p_max: self.p_max.max(p),
        }
    }

    /// Returns the vector from the minimum to the maximum corner.
    pub fn diagonal(&self) -> Vector3f {
        self.p_max - self.p_min
    }

    /// Returns the centre of the box.
    pub fn centroid(&self) -> Point3f {
        0.5 * (self.p_min + self.p_max)
    }

    /// Returns the surface area of the box; zero for empty boxes.
    pub fn surface_area(&self) -> Float {
        if self.is_empty() {
            return 0.0;
        }
        let d = self.diagonal();
        2.0 * (d.x * d.y + d.x * d.z + d.y * d.z)
    }

    /// Returns the axis with the largest extent.
    pub fn maximum_extent(&self) -> Axis {
        self.diagonal().max_dimension()
    }

    /// Returns the position of a point relative to the corners of the box
    /// where `p_min` maps to (0, 0, 0) and `p_max` maps to (1, 1, 1).
    ///
    /// * `p` - The point.
    pub fn offset(&self, p: &Point3f) -> Vector3f {
        let mut o = *p - self.p_min;
        if self.p_max.x > self.p_min.x {
            o.x /= self.p_max.x - self.p_min.x;
        }
        if self.p_max.y > self.p_min.y {
            o.y /= self.p_max.y - self.p_min.y;
        }
        if self.p_max.z > self.p_min.z {
            o.z /= self.p_max.z - self.p_min.z;
        }
        o
    }

    /// Returns true if the point lies inside the box (boundary inclusive).
    ///
    /// * `p` - The point.
    pub fn contains(&self, p: &Point3f) -> bool {
        p.x >= self.p_min.x
            && p.x <= self.p_max.x
            && p.y >= self.p_min.y
            && p.y <= self.p_max.y
            && p.z >= self.p_min.z
            && p.z <= self.p_max.z
    }

    /// Returns the centre and radius of a sphere enclosing the box.
    pub fn bounding_sphere(&self) -> (Point3f, Float) {
        let center = self.centroid();
        let radius = if self.is_empty() {
            0.0
        } else {
            (self.p_max - center).length()
        };
        (center, radius)
    }

    /// Slab test against a ray. Returns the entry and exit distances when the
    /// ray overlaps the box in front of its origin and the entry distance is
    /// closer than `max_distance`. The entry distance is negative when the
    /// origin lies inside the box.
    ///
    /// The 8-wide packet test performs exactly the same arithmetic per lane.
    ///
    /// * `ray`          - The ray.
    /// * `max_distance` - Current closest hit distance.
    #[inline]
    pub fn intersect_ray(&self, ray: &Ray, max_distance: Float) -> Option<(Float, Float)> {
        let lx0 = self.p_min.x * ray.inv_dir.x - ray.origin_div_dir.x;
        let lx1 = self.p_max.x * ray.inv_dir.x - ray.origin_div_dir.x;
        let ly0 = self.p_min.y * ray.inv_dir.y - ray.origin_div_dir.y;
        let ly1 = self.p_max.y * ray.inv_dir.y - ray.origin_div_dir.y;
        let lz0 = self.p_min.z * ray.inv_dir.z - ray.origin_div_dir.z;
        let lz1 = self.p_max.z * ray.inv_dir.z - ray.origin_div_dir.z;

        let near = lx0.min(lx1).max(ly0.min(ly1)).max(lz0.min(lz1));
        let far = lx0.max(lx1).min(ly0.max(ly1)).min(lz0.max(lz1));

        if far >= near.max(0.0) && near < max_distance {
            Some((near, far))
        } else {
            None
        }
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::*;

    fn unit_box() -> Bounds3f {
        Bounds3f::new(Point3f::new(-1.0, -1.0, -1.0), Point3f::new(1.0, 1.0, 1.0))
    }

    #[test]
    fn union_and_surface_area() {
        let b = Bounds3f::empty()
            .union_point(&Point3f::new(0.0, 0.0, 0.0))
            .union(&Bounds3f::from_point(Point3f::new(1.0, 2.0, 3.0)));
        assert_eq!(b.p_min, Point3f::zero());
        assert_eq!(b.p_max, Point3f::new(1.0, 2.0, 3.0));
        assert_eq!(b.surface_area(), 22.0);
        assert_eq!(b.maximum_extent(), Axis::Z);
        assert_eq!(Bounds3f::empty().surface_area(), 0.0);
    }

    #[test]
    fn ray_hits_from_outside() {
        let ray = Ray::new(Point3f::new(-5.0, 0.0, 0.0), Vector3f::X_AXIS);
        let (near, far) = unit_box().intersect_ray(&ray, INFINITY).unwrap();
        assert!(approx_eq!(f32, near, 4.0, epsilon = 1e-6));
        assert!(approx_eq!(f32, far, 6.0, epsilon = 1e-6));
    }

    #[test]
    fn ray_from_inside_has_negative_entry() {
        let ray = Ray::new(Point3f::zero(), Vector3f::new(0.0, 1.0, 0.0));
        let (near, far) = unit_box().intersect_ray(&ray, INFINITY).unwrap();
        assert!(near < 0.0);
        assert!(approx_eq!(f32, far, 1.0, epsilon = 1e-6));
    }

    #[test]
    fn ray_misses_behind_and_beyond_max_distance() {
        let ray = Ray::new(Point3f::new(5.0, 0.0, 0.0), Vector3f::X_AXIS);
        assert!(unit_box().intersect_ray(&ray, INFINITY).is_none());

        let ray = Ray::new(Point3f::new(-5.0, 0.0, 0.0), Vector3f::X_AXIS);
        assert!(unit_box().intersect_ray(&ray, 3.0).is_none());
    }
}
