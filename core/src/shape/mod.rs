//! Shape

use crate::geometry::*;
use crate::interaction::*;
use crate::pbrt::*;
use crate::traversal::*;
use std::sync::Arc;

/// Entry and exit distances of a ray through a closed shape.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct ShapeIntersection {
    /// Distance at which the ray enters the shape (may be negative).
    pub near_dist: Float,

    /// Distance at which the ray leaves the shape.
    pub far_dist: Float,

    /// Shape specific sub-object.
    pub sub_object_id: u32,
}

/// A point sampled on the surface of a shape by area.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct ShapeSample {
    /// Sampled position.
    pub position: Point3f,

    /// Surface normal at the position.
    pub normal: Vector3f,

    /// PDF with respect to surface area.
    pub pdf_a: Float,
}

/// A point sampled on the surface of a shape as seen from a reference point.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct ShapeSolidAngleSample {
    /// Sampled position.
    pub position: Point3f,

    /// Surface normal at the position.
    pub normal: Vector3f,

    /// Unit direction from the reference point to the sampled position.
    pub direction: Vector3f,

    /// Distance from the reference point to the sampled position.
    pub distance: Float,

    /// PDF with respect to solid angle at the reference point.
    pub pdf_w: Float,

    /// Cosine between the surface normal and the direction back to the
    /// reference point.
    pub cos_at_surface: Float,
}

/// Shape interface.
pub trait Shape: Send + Sync {
    /// Returns the type name of the shape.
    fn get_type(&self) -> &'static str;

    /// Returns the world space bounding box.
    fn bounding_box(&self) -> Bounds3f;

    /// Returns the surface area.
    fn surface_area(&self) -> Float;

    /// Returns the entry and exit distances of a ray through the volume of
    /// the shape. Shapes without volume have no such span and must override
    /// `traverse` and `traverse_shadow` instead; calling this on them is a
    /// logic error.
    ///
    /// * `ray` - The ray.
    fn intersect(&self, _ray: &Ray) -> Option<ShapeIntersection> {
        panic!("{} has no volume to intersect", self.get_type());
    }

    /// Update the closest hit with this shape.
    ///
    /// * `ctx`       - Traversal context.
    /// * `object_id` - Index of this shape in the scene.
    fn traverse(&self, ctx: &mut SingleTraversalContext, object_id: u32) {
        ctx.context.counters.num_primitive_tests += 1;
        if let Some(isect) = self.intersect(ctx.ray) {
            let hit_point = &mut *ctx.hit_point;
            let distance = if isect.near_dist > 0.0 && isect.near_dist < hit_point.distance {
                isect.near_dist
            } else if isect.far_dist > 0.0 && isect.far_dist < hit_point.distance {
                isect.far_dist
            } else {
                return;
            };
            hit_point.set(distance, object_id, isect.sub_object_id);
            ctx.context.counters.num_passed_primitive_tests += 1;
        }
    }

    /// Returns true if the surface is crossed before the current hit
    /// distance. Records the crossing in the hit point.
    ///
    /// * `ctx`       - Traversal context.
    /// * `object_id` - Index of this shape in the scene.
    fn traverse_shadow(&self, ctx: &mut SingleTraversalContext, object_id: u32) -> bool {
        let before = ctx.hit_point.object_id;
        self.traverse(ctx, object_id);
        ctx.hit_point.object_id != before
    }

    /// Sample a point on the surface uniformly by area.
    ///
    /// * `u` - Uniform random values.
    fn sample(&self, u: &[Float; 3]) -> ShapeSample;

    /// Sample a point on the surface as seen from `reference` and convert
    /// the PDF to solid angle. Returns `None` for points seen from behind.
    ///
    /// * `reference` - Reference point.
    /// * `u`         - Uniform random values.
    fn sample_from(&self, reference: &Point3f, u: &[Float; 3]) -> Option<ShapeSolidAngleSample> {
        let s = self.sample(u);
        let to_surface = s.position - *reference;
        let dist_sqr = to_surface.length_squared();
        if dist_sqr == 0.0 {
            return None;
        }

        let distance = dist_sqr.sqrt();
        let direction = to_surface / distance;
        let cos_at_surface = -direction.dot(&s.normal);
        if cos_at_surface < COS_EPSILON {
            return None;
        }

        Some(ShapeSolidAngleSample {
            position: s.position,
            normal: s.normal,
            direction,
            distance,
            pdf_w: s.pdf_a * dist_sqr / cos_at_surface,
            cos_at_surface,
        })
    }

    /// Solid angle PDF of `sample_from` for a point on the surface.
    ///
    /// * `reference` - Reference point.
    /// * `position`  - Point on the surface.
    /// * `normal`    - Surface normal at `position`.
    fn pdf_w(&self, reference: &Point3f, position: &Point3f, normal: &Vector3f) -> Float {
        area_to_solid_angle_pdf(1.0 / self.surface_area(), reference, position, normal)
    }

    /// Compute the shading geometry at a hit.
    ///
    /// * `ray`       - The ray that hit this shape.
    /// * `hit_point` - The hit.
    fn evaluate_intersection(&self, ray: &Ray, hit_point: &HitPoint) -> IntersectionData;
}

/// Convert a PDF with respect to surface area into one with respect to
/// solid angle at `reference`. Returns 0 for points seen from behind.
///
/// * `pdf_a`     - Area PDF.
/// * `reference` - Reference point.
/// * `position`  - Point on the surface.
/// * `normal`    - Surface normal at `position`.
pub fn area_to_solid_angle_pdf(
    pdf_a: Float,
    reference: &Point3f,
    position: &Point3f,
    normal: &Vector3f,
) -> Float {
    let to_surface = *position - *reference;
    let dist_sqr = to_surface.length_squared();
    if dist_sqr == 0.0 {
        return 0.0;
    }
    let cos_at_surface = -to_surface.dot(normal) / dist_sqr.sqrt();
    if cos_at_surface < COS_EPSILON {
        return 0.0;
    }
    pdf_a * dist_sqr / cos_at_surface
}

/// Atomic reference counted `Shape`.
pub type ArcShape = Arc<dyn Shape>;
