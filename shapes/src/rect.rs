//! Rectangles

use rt_core::geometry::*;
use rt_core::interaction::*;
use rt_core::pbrt::*;
use rt_core::shape::*;
use rt_core::traversal::*;

/// A flat parallelogram. Has no volume so it implements traversal directly.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Rect {
    /// Centre.
    pub center: Point3f,

    /// First edge; maps to texture U.
    pub edge_u: Vector3f,

    /// Second edge; maps to texture V.
    pub edge_v: Vector3f,

    /// Unit normal `edge_u × edge_v`.
    pub normal: Vector3f,

    /// Area.
    area: Float,
}

impl Rect {
    /// Create a new rectangle.
    ///
    /// * `center` - Centre.
    /// * `edge_u` - First edge vector (full length).
    /// * `edge_v` - Second edge vector (full length), not parallel to `edge_u`.
    pub fn new(center: Point3f, edge_u: Vector3f, edge_v: Vector3f) -> Self {
        let cross = edge_u.cross(&edge_v);
        let area = cross.length();
        assert!(area > 0.0, "rectangle edges are degenerate");
        debug!("Rect at {:?} edges {:?} {:?}", center, edge_u, edge_v);
        Self {
            center,
            edge_u,
            edge_v,
            normal: cross / area,
            area,
        }
    }

    /// Returns the distance and texture coordinates where the ray crosses
    /// the rectangle.
    ///
    /// * `ray` - The ray.
    fn intersect_plane(&self, ray: &Ray) -> Option<(Float, Point2f)> {
        let denom = ray.dir.dot(&self.normal);
        if denom == 0.0 {
            return None;
        }

        let t = (self.center - ray.origin).dot(&self.normal) / denom;
        let local = ray.at(t) - self.center;

        // Coordinates along the edges, valid when both lie in [-0.5, 0.5].
        let a = local.dot(&self.edge_u) / self.edge_u.length_squared();
        let b = local.dot(&self.edge_v) / self.edge_v.length_squared();
        if a.abs() <= 0.5 && b.abs() <= 0.5 {
            Some((t, Point2f::new(a + 0.5, b + 0.5)))
        } else {
            None
        }
    }
}

impl Shape for Rect {
    fn get_type(&self) -> &'static str {
        "rect"
    }

    fn bounding_box(&self) -> Bounds3f {
        let hu = self.edge_u * 0.5;
        let hv = self.edge_v * 0.5;
        Bounds3f::from_point(self.center + hu + hv)
            .union_point(&(self.center + hu - hv))
            .union_point(&(self.center - hu + hv))
            .union_point(&(self.center - hu - hv))
    }

    fn surface_area(&self) -> Float {
        self.area
    }

    fn traverse(&self, ctx: &mut SingleTraversalContext, object_id: u32) {
        ctx.context.counters.num_primitive_tests += 1;
        if let Some((t, _)) = self.intersect_plane(ctx.ray) {
            if t > 0.0 && t < ctx.hit_point.distance {
                ctx.hit_point.set(t, object_id, 0);
                ctx.context.counters.num_passed_primitive_tests += 1;
            }
        }
    }

    fn sample(&self, u: &[Float; 3]) -> ShapeSample {
        ShapeSample {
            position: self.center + self.edge_u * (u[0] - 0.5) + self.edge_v * (u[1] - 0.5),
            normal: self.normal,
            pdf_a: 1.0 / self.area,
        }
    }

    fn evaluate_intersection(&self, ray: &Ray, hit_point: &HitPoint) -> IntersectionData {
        let position = ray.at(hit_point.distance);
        let local = position - self.center;
        let tex_coord = Point2f::new(
            clamp(local.dot(&self.edge_u) / self.edge_u.length_squared() + 0.5, 0.0, 1.0),
            clamp(local.dot(&self.edge_v) / self.edge_v.length_squared() + 0.5, 0.0, 1.0),
        );
        IntersectionData::with_tangent(position, self.normal, self.edge_u, tex_coord)
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::*;
    use rt_core::rng::RNG;
    use rt_core::sampling::uniform_sample_sphere;

    fn ceiling() -> Rect {
        // Faces down.
        Rect::new(
            Point3f::new(0.0, 2.0, 0.0),
            Vector3f::new(1.0, 0.0, 0.0),
            Vector3f::new(0.0, 0.0, 1.0),
        )
    }

    #[test]
    fn normal_and_area() {
        let rect = ceiling();
        assert_eq!(rect.normal, Vector3f::new(0.0, -1.0, 0.0));
        assert_eq!(rect.surface_area(), 1.0);
        let b = rect.bounding_box();
        assert_eq!(b.p_min, Point3f::new(-0.5, 2.0, -0.5));
        assert_eq!(b.p_max, Point3f::new(0.5, 2.0, 0.5));
    }

    #[test]
    #[should_panic]
    fn volume_intersection_is_a_logic_error() {
        ceiling().intersect(&Ray::new(Point3f::zero(), Vector3f::Y_AXIS));
    }

    #[test]
    fn traversal_hits_from_both_sides() {
        let rect = ceiling();
        let mut context = RenderingContext::new(0);

        let up = Ray::new(Point3f::new(0.2, 0.0, 0.1), Vector3f::Y_AXIS);
        let mut hit_point = HitPoint::default();
        rect.traverse(&mut SingleTraversalContext::new(&up, &mut hit_point, &mut context), 1);
        assert!(approx_eq!(f32, hit_point.distance, 2.0, epsilon = 1e-6));

        let data = rect.evaluate_intersection(&up, &hit_point);
        assert!(approx_eq!(f32, data.tex_coord.x, 0.7, epsilon = 1e-5));
        assert!(approx_eq!(f32, data.tex_coord.y, 0.6, epsilon = 1e-5));

        let down = Ray::new(Point3f::new(0.2, 5.0, 0.1), -Vector3f::Y_AXIS);
        let mut hit_point = HitPoint::default();
        assert!(rect.traverse_shadow(&mut SingleTraversalContext::new(&down, &mut hit_point, &mut context), 1));

        let miss = Ray::new(Point3f::new(0.7, 0.0, 0.0), Vector3f::Y_AXIS);
        let mut hit_point = HitPoint::default();
        rect.traverse(&mut SingleTraversalContext::new(&miss, &mut hit_point, &mut context), 1);
        assert!(!hit_point.is_hit());
        assert_eq!(context.counters.num_primitive_tests, 3);
        assert_eq!(context.counters.num_passed_primitive_tests, 2);
    }

    #[test]
    fn sampled_solid_angle_matches_ray_casting() {
        let rect = ceiling();
        let reference = Point3f::new(0.3, 0.0, -0.2);
        let mut rng = RNG::new(17);
        let n = 200_000;

        // E[1 / pdf_w] over samples equals the subtended solid angle.
        let mut estimate = 0.0_f64;
        for _ in 0..n {
            if let Some(s) = rect.sample_from(&reference, &rng.uniform_float3()) {
                estimate += 1.0 / s.pdf_w as f64;
                let pdf = rect.pdf_w(&reference, &s.position, &s.normal);
                assert!(approx_eq!(f32, pdf, s.pdf_w, epsilon = 1e-4 * s.pdf_w));
            }
        }
        estimate /= n as f64;

        let n_cast = 1_000_000;
        let mut hits = 0;
        let mut context = RenderingContext::new(1);
        for _ in 0..n_cast {
            let ray = Ray::new(reference, uniform_sample_sphere(&rng.uniform_point2f()));
            let mut hit_point = HitPoint::default();
            rect.traverse(&mut SingleTraversalContext::new(&ray, &mut hit_point, &mut context), 0);
            if hit_point.is_hit() {
                hits += 1;
            }
        }
        let cast = 4.0 * std::f64::consts::PI * hits as f64 / n_cast as f64;
        assert!((estimate - cast).abs() < 0.03 * cast, "{} vs {}", estimate, cast);
    }
}
