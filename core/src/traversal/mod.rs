//! Ray traversal state shared by shapes and acceleration structures.

use crate::geometry::*;
use crate::pbrt::*;
use crate::rng::RNG;
use crate::simd::*;
use crate::spectrum::*;
use std::fmt;
use std::ops::AddAssign;

/// Object id of a hit point that hit nothing.
pub const INVALID_OBJECT: u32 = u32::MAX;

/// Closest hit found so far along a ray.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct HitPoint {
    /// Distance along the ray; `INFINITY` when nothing was hit.
    pub distance: Float,

    /// Index of the object hit.
    pub object_id: u32,

    /// Shape specific sub-object (face, triangle).
    pub sub_object_id: u32,
}

impl Default for HitPoint {
    fn default() -> Self {
        Self::with_max_distance(INFINITY)
    }
}

impl HitPoint {
    /// Returns an empty hit point limited to `distance`. Used by shadow rays
    /// to restrict the query to a segment.
    ///
    /// * `distance` - Maximum distance.
    pub fn with_max_distance(distance: Float) -> Self {
        Self {
            distance,
            object_id: INVALID_OBJECT,
            sub_object_id: 0,
        }
    }

    /// Record a hit.
    ///
    /// * `distance`      - Distance along the ray.
    /// * `object_id`     - Object index.
    /// * `sub_object_id` - Sub-object index.
    #[inline]
    pub fn set(&mut self, distance: Float, object_id: u32, sub_object_id: u32) {
        self.distance = distance;
        self.object_id = object_id;
        self.sub_object_id = sub_object_id;
    }

    /// Returns true if an object was hit.
    #[inline]
    pub fn is_hit(&self) -> bool {
        self.object_id != INVALID_OBJECT
    }
}

/// Closest hits for an 8-ray packet.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct HitPoint8 {
    /// Distances.
    pub distance: Float8,

    /// Object indices.
    pub object_id: [u32; 8],

    /// Sub-object indices.
    pub sub_object_id: [u32; 8],
}

impl Default for HitPoint8 {
    fn default() -> Self {
        Self {
            distance: Float8::splat(INFINITY),
            object_id: [INVALID_OBJECT; 8],
            sub_object_id: [0; 8],
        }
    }
}

impl HitPoint8 {
    /// Extract one lane.
    ///
    /// * `lane` - Lane index.
    pub fn lane(&self, lane: usize) -> HitPoint {
        HitPoint {
            distance: self.distance[lane],
            object_id: self.object_id[lane],
            sub_object_id: self.sub_object_id[lane],
        }
    }

    /// Overwrite one lane.
    ///
    /// * `lane`      - Lane index.
    /// * `hit_point` - New value.
    pub fn set_lane(&mut self, lane: usize, hit_point: &HitPoint) {
        self.distance.0[lane] = hit_point.distance;
        self.object_id[lane] = hit_point.object_id;
        self.sub_object_id[lane] = hit_point.sub_object_id;
    }
}

/// Statistics gathered while tracing rays.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct RayTracingCounters {
    /// Rays traced.
    pub num_rays: u64,

    /// Ray vs. BVH node box tests.
    pub num_ray_box_tests: u64,

    /// Box tests that hit.
    pub num_passed_ray_box_tests: u64,

    /// Ray vs. shape tests.
    pub num_primitive_tests: u64,

    /// Shape tests that hit.
    pub num_passed_primitive_tests: u64,
}

impl RayTracingCounters {
    /// Reset all counters to zero.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

impl AddAssign<&RayTracingCounters> for RayTracingCounters {
    fn add_assign(&mut self, other: &RayTracingCounters) {
        self.num_rays += other.num_rays;
        self.num_ray_box_tests += other.num_ray_box_tests;
        self.num_passed_ray_box_tests += other.num_passed_ray_box_tests;
        self.num_primitive_tests += other.num_primitive_tests;
        self.num_passed_primitive_tests += other.num_passed_primitive_tests;
    }
}

impl fmt::Display for RayTracingCounters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ratio = |a: u64, b: u64| if b > 0 { a as f64 / b as f64 } else { 0.0 };
        write!(
            f,
            "rays: {}, ray-box tests: {} ({:.1}% passed), primitive tests: {} ({:.1}% passed), \
             box tests per ray: {:.2}",
            self.num_rays,
            self.num_ray_box_tests,
            100.0 * ratio(self.num_passed_ray_box_tests, self.num_ray_box_tests),
            self.num_primitive_tests,
            100.0 * ratio(self.num_passed_primitive_tests, self.num_primitive_tests),
            ratio(self.num_ray_box_tests, self.num_rays),
        )
    }
}

/// Per-thread rendering state.
#[derive(Clone)]
pub struct RenderingContext {
    /// Random numbers for this thread.
    pub rng: RNG,

    /// Traversal statistics for this thread.
    pub counters: RayTracingCounters,

    /// Wavelength carried by the current path.
    pub wavelength: Wavelength,
}

impl RenderingContext {
    /// Create a new context.
    ///
    /// * `seed` - RNG sequence index; use a distinct value per thread.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: RNG::new(seed),
            counters: RayTracingCounters::default(),
            wavelength: Wavelength::default(),
        }
    }
}

/// Single ray query.
pub struct SingleTraversalContext<'a> {
    /// The ray.
    pub ray: &'a Ray,

    /// Closest hit so far; its distance bounds the query.
    pub hit_point: &'a mut HitPoint,

    /// Thread state.
    pub context: &'a mut RenderingContext,
}

impl<'a> SingleTraversalContext<'a> {
    /// Create a new query.
    ///
    /// * `ray`       - The ray.
    /// * `hit_point` - Closest hit so far.
    /// * `context`   - Thread state.
    pub fn new(ray: &'a Ray, hit_point: &'a mut HitPoint, context: &'a mut RenderingContext) -> Self {
        Self {
            ray,
            hit_point,
            context,
        }
    }
}

/// 8-ray packet query.
pub struct PacketTraversalContext<'a> {
    /// The rays.
    pub ray: &'a Ray8,

    /// Closest hits so far.
    pub hit_point: &'a mut HitPoint8,

    /// Thread state.
    pub context: &'a mut RenderingContext,
}

impl<'a> PacketTraversalContext<'a> {
    /// Create a new packet query.
    ///
    /// * `ray`       - The rays.
    /// * `hit_point` - Closest hits so far.
    /// * `context`   - Thread state.
    pub fn new(ray: &'a Ray8, hit_point: &'a mut HitPoint8, context: &'a mut RenderingContext) -> Self {
        Self {
            ray,
            hit_point,
            context,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_accumulate() {
        let mut total = RayTracingCounters::default();
        let one = RayTracingCounters {
            num_rays: 1,
            num_ray_box_tests: 10,
            num_passed_ray_box_tests: 4,
            num_primitive_tests: 3,
            num_passed_primitive_tests: 1,
        };
        total += &one;
        total += &one;
        assert_eq!(total.num_ray_box_tests, 20);
        assert_eq!(total.num_passed_primitive_tests, 2);
        assert!(format!("{}", total).contains("40.0% passed"));
        total.reset();
        assert_eq!(total, RayTracingCounters::default());
    }

    #[test]
    fn packet_lanes_round_trip_hit_points() {
        let mut packet = HitPoint8::default();
        assert!(!packet.lane(5).is_hit());
        let mut hp = HitPoint::default();
        hp.set(2.5, 7, 3);
        packet.set_lane(5, &hp);
        assert_eq!(packet.lane(5), hp);
        assert_eq!(packet.lane(4), HitPoint::default());
    }
}
