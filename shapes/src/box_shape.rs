//! Axis Aligned Boxes

use rt_core::geometry::*;
use rt_core::interaction::*;
use rt_core::pbrt::*;
use rt_core::shape::*;
use rt_core::traversal::*;

/// An axis aligned box.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct BoxShape {
    /// Extent of the box.
    pub bounds: Bounds3f,
}

impl BoxShape {
    /// Create a new box from two corners.
    ///
    /// * `p1` - First corner.
    /// * `p2` - Opposite corner.
    pub fn new(p1: Point3f, p2: Point3f) -> Self {
        let bounds = Bounds3f::new(p1, p2);
        assert!(!bounds.is_empty(), "box has no extent");
        debug!("Box {:?}", bounds);
        Self { bounds }
    }

    /// Create a new box from its centre and half extents.
    ///
    /// * `center`    - Centre.
    /// * `half_size` - Half extents; must be non-negative.
    pub fn from_center(center: Point3f, half_size: Vector3f) -> Self {
        Self::new(center - half_size, center + half_size)
    }

    /// Area of the faces perpendicular to each axis (one face per axis).
    fn face_areas(&self) -> [Float; 3] {
        let d = self.bounds.diagonal();
        [d.y * d.z, d.x * d.z, d.x * d.y]
    }
}

fn axis_vector(axis: usize, value: Float) -> Vector3f {
    let mut v = [0.0; 3];
    v[axis] = value;
    Vector3f::new(v[0], v[1], v[2])
}

impl Shape for BoxShape {
    fn get_type(&self) -> &'static str {
        "box"
    }

    fn bounding_box(&self) -> Bounds3f {
        self.bounds
    }

    fn surface_area(&self) -> Float {
        self.bounds.surface_area()
    }

    fn intersect(&self, ray: &Ray) -> Option<ShapeIntersection> {
        self.bounds
            .intersect_ray(ray, INFINITY)
            .map(|(near_dist, far_dist)| ShapeIntersection {
                near_dist,
                far_dist,
                sub_object_id: 0,
            })
    }

    fn sample(&self, u: &[Float; 3]) -> ShapeSample {
        let areas = self.face_areas();
        let d = self.bounds.diagonal();

        // Pick one of the six faces proportionally to its area.
        let mut target = u[2] * 2.0 * (areas[0] + areas[1] + areas[2]);
        let mut face = (2, 1.0);
        'faces: for (axis, area) in areas.iter().enumerate() {
            for sign in [1.0, -1.0] {
                if target < *area {
                    face = (axis, sign);
                    break 'faces;
                }
                target -= area;
            }
        }

        let (axis, sign) = face;
        let b = (axis + 1) % 3;
        let c = (axis + 2) % 3;
        let mut p = [0.0; 3];
        p[axis] = if sign > 0.0 {
            self.bounds.p_max[axis]
        } else {
            self.bounds.p_min[axis]
        };
        p[b] = self.bounds.p_min[b] + u[0] * d[b];
        p[c] = self.bounds.p_min[c] + u[1] * d[c];

        ShapeSample {
            position: Point3f::new(p[0], p[1], p[2]),
            normal: axis_vector(axis, sign),
            pdf_a: 1.0 / self.surface_area(),
        }
    }

    fn evaluate_intersection(&self, ray: &Ray, hit_point: &HitPoint) -> IntersectionData {
        let position = ray.at(hit_point.distance);
        let center = self.bounds.centroid();
        let d = self.bounds.diagonal();

        // The face is the axis along which the hit is relatively farthest
        // from the centre.
        let mut axis = 0;
        let mut largest = -1.0;
        for i in 0..3 {
            let extent = if d[i] > 0.0 {
                abs(position[i] - center[i]) / (0.5 * d[i])
            } else {
                INFINITY
            };
            if extent > largest {
                largest = extent;
                axis = i;
            }
        }

        let sign = if position[axis] >= center[axis] { 1.0 } else { -1.0 };
        let b = (axis + 1) % 3;
        let c = (axis + 2) % 3;
        let rel = |i: usize| {
            if d[i] > 0.0 {
                clamp((position[i] - self.bounds.p_min[i]) / d[i], 0.0, 1.0)
            } else {
                0.0
            }
        };

        IntersectionData::with_tangent(
            position,
            axis_vector(axis, sign),
            axis_vector(b, 1.0),
            Point2f::new(rel(b), rel(c)),
        )
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

    fn test_box() -> BoxShape {
        BoxShape::new(Point3f::new(-1.0, -2.0, -3.0), Point3f::new(1.0, 2.0, 3.0))
    }

    #[test]
    fn ray_crossing_reports_entry_and_exit() {
        let ray = Ray::new(Point3f::new(-5.0, 0.5, 0.5), Vector3f::X_AXIS);
        let isect = test_box().intersect(&ray).unwrap();
        assert!(approx_eq!(f32, isect.near_dist, 4.0, epsilon = 1e-5));
        assert!(approx_eq!(f32, isect.far_dist, 6.0, epsilon = 1e-5));

        let hit = HitPoint { distance: isect.near_dist, object_id: 0, sub_object_id: 0 };
        let data = test_box().evaluate_intersection(&ray, &hit);
        assert_eq!(data.normal, Vector3f::new(-1.0, 0.0, 0.0));
        assert!(approx_eq!(f32, data.tex_coord.x, 0.625, epsilon = 1e-5));
        assert!(approx_eq!(f32, data.tex_coord.y, 0.5833333, epsilon = 1e-5));
    }

    #[test]
    fn shadow_ray_inside_box_sees_the_wall() {
        let ray = Ray::new(Point3f::zero(), Vector3f::Y_AXIS);
        let mut context = RenderingContext::new(0);

        let mut short = HitPoint::with_max_distance(1.5);
        assert!(!test_box().traverse_shadow(&mut SingleTraversalContext::new(&ray, &mut short, &mut context), 0));

        let mut long = HitPoint::with_max_distance(2.5);
        assert!(test_box().traverse_shadow(&mut SingleTraversalContext::new(&ray, &mut long, &mut context), 0));
        assert!(approx_eq!(f32, long.distance, 2.0, epsilon = 1e-6));
    }

    #[test]
    fn area_matches_faces() {
        let b = test_box();
        let areas = b.face_areas();
        assert!(approx_eq!(f32, 2.0 * (areas[0] + areas[1] + areas[2]), b.surface_area(), epsilon = 1e-4));
    }

    proptest! {
        #[test]
        fn samples_lie_on_faces(u0 in 0.0f32..1.0, u1 in 0.0f32..1.0, u2 in 0.0f32..1.0) {
            let b = test_box();
            let s = b.sample(&[u0, u1, u2]);
            prop_assert!(b.bounds.contains(&s.position));
            let axis = (0..3).find(|&i| s.normal[i] != 0.0).unwrap();
            let face = if s.normal[axis] > 0.0 { b.bounds.p_max[axis] } else { b.bounds.p_min[axis] };
            prop_assert_eq!(s.position[axis], face);
            prop_assert!((s.pdf_a * b.surface_area() - 1.0).abs() < 1e-5);
        }
    }
}
