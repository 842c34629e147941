//! 8-ray packet

use super::*;
use crate::geometry::*;

/// Eight rays traced together.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Ray8 {
    /// Origins.
    pub origin: Vector3x8,

    /// Unit directions.
    pub dir: Vector3x8,

    /// Reciprocal directions.
    pub inv_dir: Vector3x8,

    /// `origin / dir`.
    pub origin_div_dir: Vector3x8,
}

impl Ray8 {
    /// Gather eight single rays, keeping their precomputed reciprocals.
    ///
    /// * `rays` - One ray per lane.
    pub fn from_rays(rays: &[Ray; 8]) -> Self {
        Self {
            origin: Vector3x8::from_lanes(&rays.map(|r| r.origin)),
            dir: Vector3x8::from_lanes(&rays.map(|r| r.dir)),
            inv_dir: Vector3x8::from_lanes(&rays.map(|r| r.inv_dir)),
            origin_div_dir: Vector3x8::from_lanes(&rays.map(|r| r.origin_div_dir)),
        }
    }

    /// Extract a single ray.
    ///
    /// * `lane` - Lane index.
    pub fn lane(&self, lane: usize) -> Ray {
        Ray {
            origin: self.origin.lane(lane),
            dir: self.dir.lane(lane),
            inv_dir: self.inv_dir.lane(lane),
            origin_div_dir: self.origin_div_dir.lane(lane),
        }
    }

    /// Slab test of all lanes against one box; lane for lane identical to
    /// `Bounds3f::intersect_ray`. Returns the mask of lanes that hit and
    /// their entry distances.
    ///
    /// * `bounds`       - The box.
    /// * `max_distance` - Current closest hit distance per lane.
    #[inline]
    pub fn intersect_box(&self, bounds: &Bounds3f, max_distance: &Float8) -> (Mask8, Float8) {
        let slab = |lo: Float8, hi: Float8, inv: Float8, odd: Float8| {
            let t0 = lo * inv - odd;
            let t1 = hi * inv - odd;
            (t0.min(&t1), t0.max(&t1))
        };

        let (x_near, x_far) = slab(
            Float8::splat(bounds.p_min.x),
            Float8::splat(bounds.p_max.x),
            self.inv_dir.x,
            self.origin_div_dir.x,
        );
        let (y_near, y_far) = slab(
            Float8::splat(bounds.p_min.y),
            Float8::splat(bounds.p_max.y),
            self.inv_dir.y,
            self.origin_div_dir.y,
        );
        let (z_near, z_far) = slab(
            Float8::splat(bounds.p_min.z),
            Float8::splat(bounds.p_max.z),
            self.inv_dir.z,
            self.origin_div_dir.z,
        );

        let near = x_near.max(&y_near).max(&z_near);
        let far = x_far.min(&y_far).min(&z_far);

        let hit = far.ge(&near.max(&Float8::splat(0.0))) & near.lt(max_distance);
        (hit, near)
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pbrt::*;
    use crate::rng::RNG;
    use crate::sampling::uniform_sample_sphere;

    #[test]
    fn packet_box_test_matches_scalar() {
        let mut rng = RNG::new(11);
        let bounds = Bounds3f::new(Point3f::new(-1.0, -0.5, -2.0), Point3f::new(1.5, 1.0, 0.5));
        for _ in 0..500 {
            let rays: [Ray; 8] = std::array::from_fn(|_| {
                let o = Point3f::new(
                    4.0 * rng.uniform_float() - 2.0,
                    4.0 * rng.uniform_float() - 2.0,
                    4.0 * rng.uniform_float() - 2.0,
                );
                Ray::new(o, uniform_sample_sphere(&rng.uniform_point2f()))
            });
            let max_distance = Float8(std::array::from_fn(|_| 3.0 * rng.uniform_float()));
            let packet = Ray8::from_rays(&rays);
            let (mask, near) = packet.intersect_box(&bounds, &max_distance);
            for (lane, ray) in rays.iter().enumerate() {
                assert_eq!(packet.lane(lane), *ray);
                match bounds.intersect_ray(ray, max_distance[lane]) {
                    Some((scalar_near, _)) => {
                        assert!(mask.get(lane));
                        assert_eq!(scalar_near, near[lane]);
                    }
                    None => assert!(!mask.get(lane)),
                }
            }
        }
        assert_eq!(Float8::splat(INFINITY)[3], INFINITY);
    }
}
