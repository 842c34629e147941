//! Shapes grouped under a BVH.

use crate::bvh::*;
use rt_core::geometry::*;
use rt_core::interaction::*;
use rt_core::shape::*;
use rt_core::traversal::*;

/// A list of shapes and the BVH built over their bounding boxes. Object ids
/// reported in hit points are indices into the shape list.
pub struct ShapeAggregate {
    shapes: Vec<ArcShape>,
    bvh: BVH,
}

impl ShapeAggregate {
    /// Build the aggregate.
    ///
    /// * `shapes`            - The shapes.
    /// * `max_prims_in_node` - Maximum number of shapes in a BVH leaf.
    /// * `split_method`      - BVH split method.
    pub fn new(shapes: Vec<ArcShape>, max_prims_in_node: usize, split_method: SplitMethod) -> Self {
        let bounds: Vec<Bounds3f> = shapes.iter().map(|s| s.bounding_box()).collect();
        let bvh = BVH::new(&bounds, max_prims_in_node, split_method);
        Self { shapes, bvh }
    }

    /// Returns the shapes.
    pub fn shapes(&self) -> &[ArcShape] {
        &self.shapes
    }

    /// Returns the hierarchy.
    pub fn bvh(&self) -> &BVH {
        &self.bvh
    }

    /// Returns the bounding box of all shapes.
    pub fn bounding_box(&self) -> Bounds3f {
        self.bvh.bounding_box()
    }

    /// Find the closest hit along the context ray.
    ///
    /// * `ctx` - Traversal context.
    pub fn traverse(&self, ctx: &mut SingleTraversalContext) {
        self.bvh.traverse(ctx, |ctx, id| self.shapes[id as usize].traverse(ctx, id));
    }

    /// Returns true if any shape is crossed before the hit point distance.
    ///
    /// * `ctx` - Traversal context.
    pub fn traverse_shadow(&self, ctx: &mut SingleTraversalContext) -> bool {
        self.bvh
            .traverse_shadow(ctx, |ctx, id| self.shapes[id as usize].traverse_shadow(ctx, id))
    }

    /// Find the closest hit for each ray of a packet.
    ///
    /// * `ctx` - Packet traversal context.
    pub fn traverse_packet(&self, ctx: &mut PacketTraversalContext) {
        self.bvh.traverse_packet(ctx, |ctx, mask, id| {
            let shape = &self.shapes[id as usize];
            for lane in mask.iter() {
                let ray = ctx.ray.lane(lane);
                let mut hit_point = ctx.hit_point.lane(lane);
                shape.traverse(&mut SingleTraversalContext::new(&ray, &mut hit_point, ctx.context), id);
                ctx.hit_point.set_lane(lane, &hit_point);
            }
        });
    }

    /// Returns the surface data at a hit, or `None` if nothing was hit.
    ///
    /// * `ray`       - The ray.
    /// * `hit_point` - The hit.
    pub fn evaluate_intersection(&self, ray: &Ray, hit_point: &HitPoint) -> Option<IntersectionData> {
        if !hit_point.is_hit() {
            return None;
        }
        self.shapes
            .get(hit_point.object_id as usize)
            .map(|shape| shape.evaluate_intersection(ray, hit_point))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rt_core::rng::*;
    use rt_core::sampling::*;
    use rt_core::simd::*;
    use shapes::*;
    use std::sync::Arc;

    fn random_box_scene(rng: &mut RNG, n: usize) -> Vec<ArcShape> {
        (0..n)
            .map(|_| {
                let center = Point3f::new(
                    rng.uniform_float() * 20.0 - 10.0,
                    rng.uniform_float() * 20.0 - 10.0,
                    rng.uniform_float() * 20.0 - 10.0,
                );
                let half_size = Vector3f::new(
                    0.05 + 0.5 * rng.uniform_float(),
                    0.05 + 0.5 * rng.uniform_float(),
                    0.05 + 0.5 * rng.uniform_float(),
                );
                Arc::new(BoxShape::from_center(center, half_size)) as ArcShape
            })
            .collect()
    }

    fn random_ray(rng: &mut RNG) -> Ray {
        let origin = Point3f::new(
            rng.uniform_float() * 30.0 - 15.0,
            rng.uniform_float() * 30.0 - 15.0,
            rng.uniform_float() * 30.0 - 15.0,
        );
        let dir = uniform_sample_sphere(&rng.uniform_point2f());
        Ray::new(origin, dir)
    }

    fn brute_force(shapes: &[ArcShape], ray: &Ray, hit_point: &mut HitPoint, context: &mut RenderingContext) {
        for (id, shape) in shapes.iter().enumerate() {
            shape.traverse(&mut SingleTraversalContext::new(ray, hit_point, context), id as u32);
        }
    }

    #[test]
    fn closest_hit_matches_brute_force() {
        let mut rng = RNG::new(11);
        let shapes = random_box_scene(&mut rng, 500);

        for method in [SplitMethod::SAH, SplitMethod::Middle, SplitMethod::EqualCounts] {
            let aggregate = ShapeAggregate::new(shapes.clone(), 4, method);
            let mut context = RenderingContext::new(1);
            let mut hits = 0;

            for _ in 0..10_000 {
                let ray = random_ray(&mut rng);

                let mut expected = HitPoint::default();
                brute_force(&shapes, &ray, &mut expected, &mut context);

                let mut actual = HitPoint::default();
                aggregate.traverse(&mut SingleTraversalContext::new(&ray, &mut actual, &mut context));

                assert_eq!(actual.distance, expected.distance);
                assert_eq!(actual.object_id, expected.object_id);
                if actual.is_hit() {
                    hits += 1;
                }
            }
            assert!(hits > 500, "too few hits to be meaningful: {}", hits);
        }
    }

    #[test]
    fn packet_lanes_match_single_rays() {
        let mut rng = RNG::new(12);
        let aggregate = ShapeAggregate::new(random_box_scene(&mut rng, 300), 4, SplitMethod::SAH);
        let mut context = RenderingContext::new(1);

        for _ in 0..1000 {
            let rays: [Ray; 8] = std::array::from_fn(|_| random_ray(&mut rng));
            let ray8 = Ray8::from_rays(&rays);
            let mut hit8 = HitPoint8::default();
            aggregate.traverse_packet(&mut PacketTraversalContext::new(&ray8, &mut hit8, &mut context));

            for (lane, ray) in rays.iter().enumerate() {
                let mut hit_point = HitPoint::default();
                aggregate.traverse(&mut SingleTraversalContext::new(ray, &mut hit_point, &mut context));
                assert_eq!(hit8.lane(lane), hit_point);
            }
        }
        assert_eq!(context.counters.num_rays, 2 * 8 * 1000);
    }

    #[test]
    fn shadow_agrees_with_closest_hit() {
        let mut rng = RNG::new(13);
        let aggregate = ShapeAggregate::new(random_box_scene(&mut rng, 200), 2, SplitMethod::SAH);
        let mut context = RenderingContext::new(1);

        for _ in 0..5000 {
            let ray = random_ray(&mut rng);
            let max_distance = 1.0 + 30.0 * rng.uniform_float();

            let mut closest = HitPoint::with_max_distance(max_distance);
            aggregate.traverse(&mut SingleTraversalContext::new(&ray, &mut closest, &mut context));

            let mut shadow = HitPoint::with_max_distance(max_distance);
            let occluded =
                aggregate.traverse_shadow(&mut SingleTraversalContext::new(&ray, &mut shadow, &mut context));

            assert_eq!(occluded, closest.is_hit());
        }
    }

    #[test]
    fn evaluate_hit_surface() {
        let shapes: Vec<ArcShape> = vec![
            Arc::new(Sphere::new(Point3f::new(0.0, 0.0, -5.0), 1.0)),
            Arc::new(BoxShape::new(Point3f::new(-1.0, -1.0, -12.0), Point3f::new(1.0, 1.0, -10.0))),
        ];
        let aggregate = ShapeAggregate::new(shapes, 1, SplitMethod::SAH);
        let mut context = RenderingContext::new(0);

        let ray = Ray::new(Point3f::new(0.0, 0.0, 0.0), Vector3f::new(0.0, 0.0, -1.0));
        let mut hit_point = HitPoint::default();
        aggregate.traverse(&mut SingleTraversalContext::new(&ray, &mut hit_point, &mut context));
        assert_eq!(hit_point.object_id, 0);
        assert!((hit_point.distance - 4.0).abs() < 1e-5);

        let isect = aggregate.evaluate_intersection(&ray, &hit_point).expect("hit expected");
        assert!((isect.normal.z - 1.0).abs() < 1e-5);

        let miss = Ray::new(Point3f::new(5.0, 0.0, 0.0), Vector3f::new(0.0, 0.0, -1.0));
        let mut hit_point = HitPoint::default();
        aggregate.traverse(&mut SingleTraversalContext::new(&miss, &mut hit_point, &mut context));
        assert!(aggregate.evaluate_intersection(&miss, &hit_point).is_none());
    }

    #[test]
    fn empty_aggregate_misses() {
        let aggregate = ShapeAggregate::new(vec![], 4, SplitMethod::SAH);
        let mut context = RenderingContext::new(0);
        let ray = Ray::new(Point3f::new(0.0, 0.0, 0.0), Vector3f::new(0.0, 0.0, -1.0));
        let mut hit_point = HitPoint::default();
        aggregate.traverse(&mut SingleTraversalContext::new(&ray, &mut hit_point, &mut context));
        assert!(!hit_point.is_hit());
        assert!(!aggregate.traverse_shadow(&mut SingleTraversalContext::new(&ray, &mut hit_point, &mut context)));
    }
}
