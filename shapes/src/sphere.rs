//! Spheres

use rt_core::geometry::*;
use rt_core::interaction::*;
use rt_core::pbrt::*;
use rt_core::sampling::*;
use rt_core::shape::*;
use rt_core::traversal::*;

/// A sphere.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Sphere {
    /// Centre.
    pub center: Point3f,

    /// Radius.
    pub radius: Float,
}

impl Sphere {
    /// Create a new sphere.
    ///
    /// * `center` - Centre.
    /// * `radius` - Radius; must be positive.
    pub fn new(center: Point3f, radius: Float) -> Self {
        assert!(radius > 0.0, "sphere radius must be positive, got {}", radius);
        debug!("Sphere at {:?} radius {}", center, radius);
        Self { center, radius }
    }

    /// Returns the cosine of the half angle of the cone the sphere subtends
    /// from `reference`, or `None` if `reference` is inside the sphere.
    ///
    /// * `reference` - Reference point.
    fn cos_theta_max(&self, reference: &Point3f) -> Option<Float> {
        let dist_sqr = (self.center - *reference).length_squared();
        let radius_sqr = self.radius * self.radius;
        if dist_sqr <= radius_sqr {
            None
        } else {
            let sin_theta_max_sqr = radius_sqr / dist_sqr;
            Some(max(0.0, 1.0 - sin_theta_max_sqr).sqrt())
        }
    }
}

impl Shape for Sphere {
    fn get_type(&self) -> &'static str {
        "sphere"
    }

    fn bounding_box(&self) -> Bounds3f {
        let r = Vector3f::splat(self.radius);
        Bounds3f::new(self.center - r, self.center + r)
    }

    fn surface_area(&self) -> Float {
        FOUR_PI * self.radius * self.radius
    }

    fn intersect(&self, ray: &Ray) -> Option<ShapeIntersection> {
        let oc = ray.origin - self.center;
        let b = oc.dot(&ray.dir);
        let c = oc.length_squared() - self.radius * self.radius;
        let discriminant = b * b - c;
        if discriminant < 0.0 {
            return None;
        }

        let root = discriminant.sqrt();
        Some(ShapeIntersection {
            near_dist: -b - root,
            far_dist: -b + root,
            sub_object_id: 0,
        })
    }

    fn sample(&self, u: &[Float; 3]) -> ShapeSample {
        let normal = uniform_sample_sphere(&Point2f::new(u[0], u[1]));
        ShapeSample {
            position: self.center + normal * self.radius,
            normal,
            pdf_a: 1.0 / self.surface_area(),
        }
    }

    /// Samples the cone of directions the sphere subtends, so no sample is
    /// wasted on the far side. Inside the sphere falls back to area
    /// sampling.
    fn sample_from(&self, reference: &Point3f, u: &[Float; 3]) -> Option<ShapeSolidAngleSample> {
        let cos_theta_max = match self.cos_theta_max(reference) {
            Some(cos_theta_max) => cos_theta_max,
            None => {
                let s = self.sample(u);
                let to_surface = s.position - *reference;
                let distance = to_surface.length();
                if distance == 0.0 {
                    return None;
                }
                let direction = to_surface / distance;
                // Seen from inside the surface faces away.
                let cos_at_surface = direction.dot(&s.normal);
                if cos_at_surface < COS_EPSILON {
                    return None;
                }
                return Some(ShapeSolidAngleSample {
                    position: s.position,
                    normal: -s.normal,
                    direction,
                    distance,
                    pdf_w: s.pdf_a * distance * distance / cos_at_surface,
                    cos_at_surface,
                });
            }
        };

        let axis = (self.center - *reference).normalize();
        let (tangent, bitangent) = axis.coordinate_system();
        let local = uniform_sample_cone(&Point2f::new(u[0], u[1]), cos_theta_max);
        let direction = (tangent * local.x + bitangent * local.y + axis * local.z).normalize();

        // Nearest crossing along the sampled direction; grazing samples are
        // clamped onto the silhouette.
        let oc = *reference - self.center;
        let b = oc.dot(&direction);
        let c = oc.length_squared() - self.radius * self.radius;
        let distance = -b - max(0.0, b * b - c).sqrt();
        if distance <= 0.0 {
            return None;
        }

        let position = *reference + direction * distance;
        let normal = (position - self.center).normalize();
        let cos_at_surface = -direction.dot(&normal);
        if cos_at_surface <= 0.0 {
            return None;
        }

        Some(ShapeSolidAngleSample {
            position,
            normal,
            direction,
            distance,
            pdf_w: uniform_cone_pdf(cos_theta_max),
            cos_at_surface,
        })
    }

    fn pdf_w(&self, reference: &Point3f, position: &Point3f, normal: &Vector3f) -> Float {
        match self.cos_theta_max(reference) {
            Some(cos_theta_max) => uniform_cone_pdf(cos_theta_max),
            None => {
                // Either orientation of the normal is accepted from inside.
                let to_surface = *position - *reference;
                let dist_sqr = to_surface.length_squared();
                let cos_at_surface = abs(to_surface.dot(normal)) / dist_sqr.sqrt();
                if dist_sqr == 0.0 || cos_at_surface < COS_EPSILON {
                    0.0
                } else {
                    dist_sqr / (cos_at_surface * self.surface_area())
                }
            }
        }
    }

    fn evaluate_intersection(&self, ray: &Ray, hit_point: &HitPoint) -> IntersectionData {
        let position = ray.at(hit_point.distance);
        let normal = (position - self.center).normalize();
        let phi = normal.y.atan2(normal.x);
        let tex_coord = Point2f::new(
            phi * INV_TWO_PI + 0.5,
            clamp(normal.z, -1.0, 1.0).acos() * INV_PI,
        );
        let tangent = Vector3f::new(-normal.y, normal.x, 0.0);
        IntersectionData::with_tangent(position, normal, tangent, tex_coord)
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
    use rt_core::rng::RNG;

    fn unit_sphere() -> Sphere {
        Sphere::new(Point3f::new(0.0, 0.0, 5.0), 1.0)
    }

    #[test]
    fn ray_through_center_enters_and_leaves() {
        let ray = Ray::new(Point3f::zero(), Vector3f::Z_AXIS);
        let isect = unit_sphere().intersect(&ray).unwrap();
        assert!(approx_eq!(f32, isect.near_dist, 4.0, epsilon = 1e-5));
        assert!(approx_eq!(f32, isect.far_dist, 6.0, epsilon = 1e-5));
        assert!(unit_sphere()
            .intersect(&Ray::new(Point3f::zero(), Vector3f::X_AXIS))
            .is_none());
    }

    #[test]
    fn traverse_takes_far_crossing_from_inside() {
        let sphere = unit_sphere();
        let ray = Ray::new(Point3f::new(0.0, 0.0, 5.0), Vector3f::Z_AXIS);
        let mut hit_point = HitPoint::default();
        let mut context = RenderingContext::new(0);
        sphere.traverse(&mut SingleTraversalContext::new(&ray, &mut hit_point, &mut context), 3);
        assert_eq!(hit_point.object_id, 3);
        assert!(approx_eq!(f32, hit_point.distance, 1.0, epsilon = 1e-6));
        assert_eq!(context.counters.num_primitive_tests, 1);
        assert_eq!(context.counters.num_passed_primitive_tests, 1);

        // A closer hit already recorded is kept.
        let mut closer = HitPoint::with_max_distance(0.5);
        assert!(!sphere.traverse_shadow(&mut SingleTraversalContext::new(&ray, &mut closer, &mut context), 3));
        assert!(!closer.is_hit());
    }

    #[test]
    fn intersection_frame_faces_outwards() {
        let sphere = unit_sphere();
        let ray = Ray::new(Point3f::new(0.0, 0.0, 0.0), Vector3f::Z_AXIS);
        let hit = HitPoint { distance: 4.0, object_id: 0, sub_object_id: 0 };
        let data = sphere.evaluate_intersection(&ray, &hit);
        assert!(approx_eq!(f32, data.normal.z, -1.0, epsilon = 1e-6));
        assert!(data.tangent.dot(&data.normal).abs() < 1e-5);
        assert!(approx_eq!(f32, data.tex_coord.y, 1.0, epsilon = 1e-4));
    }

    #[test]
    fn cone_samples_hit_the_visible_cap() {
        let sphere = unit_sphere();
        let mut rng = RNG::new(5);
        let reference = Point3f::zero();
        let expected = uniform_cone_pdf((1.0 - 1.0 / 25.0 as Float).sqrt());
        for _ in 0..1000 {
            let s = sphere.sample_from(&reference, &rng.uniform_float3()).unwrap();
            assert!(approx_eq!(f32, (s.position - sphere.center).length(), 1.0, epsilon = 1e-4));
            assert!(s.cos_at_surface > 0.0);
            assert!(approx_eq!(f32, s.pdf_w, expected, ulps = 4));
            assert!(approx_eq!(f32, sphere.pdf_w(&reference, &s.position, &s.normal), s.pdf_w, ulps = 4));
        }
    }

    #[test]
    fn samples_from_inside_see_inner_surface() {
        let sphere = unit_sphere();
        let mut rng = RNG::new(9);
        let reference = Point3f::new(0.0, 0.2, 5.0);
        let mut count = 0;
        for _ in 0..1000 {
            if let Some(s) = sphere.sample_from(&reference, &rng.uniform_float3()) {
                count += 1;
                assert!(s.normal.dot(&s.direction) < 0.0);
                let pdf = sphere.pdf_w(&reference, &s.position, &s.normal);
                assert!(approx_eq!(f32, pdf, s.pdf_w, epsilon = 1e-3 * s.pdf_w));
            }
        }
        assert!(count > 990);
    }

    proptest! {
        #[test]
        fn samples_lie_on_surface(u0 in 0.0f32..1.0, u1 in 0.0f32..1.0) {
            let sphere = unit_sphere();
            let s = sphere.sample(&[u0, u1, 0.5]);
            prop_assert!(((s.position - sphere.center).length() - 1.0).abs() < 1e-4);
            prop_assert!((s.normal.length() - 1.0).abs() < 1e-4);
        }
    }
}
