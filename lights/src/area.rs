//! Area Light Source

use rt_core::geometry::*;
use rt_core::light::*;
use rt_core::pbrt::*;
use rt_core::sampling::*;
use rt_core::shape::*;
use rt_core::spectrum::*;
use rt_core::traversal::*;

/// Light emitted uniformly from the front side of a shape.
#[derive(Clone)]
pub struct AreaLight {
    /// The emitting shape.
    pub shape: ArcShape,

    /// Emitted radiance.
    color: RayColor,
}

impl AreaLight {
    /// Returns a new `AreaLight`.
    ///
    /// * `shape` - The emitting shape.
    /// * `color` - Emitted radiance.
    pub fn new(shape: ArcShape, color: RayColor) -> Self {
        debug!("Area light on {} with area {}", shape.get_type(), shape.surface_area());
        Self { shape, color }
    }
}

impl Light for AreaLight {
    fn get_type(&self) -> &'static str {
        "area"
    }

    fn flags(&self) -> LightFlags {
        LightFlags::IS_FINITE
    }

    fn color(&self) -> RayColor {
        self.color
    }

    fn set_color(&mut self, color: RayColor) {
        self.color = color;
    }

    fn bounding_box(&self) -> Bounds3f {
        self.shape.bounding_box()
    }

    fn test_ray_hit(&self, ray: &Ray) -> Option<Float> {
        let mut hit_point = HitPoint::default();
        let mut context = RenderingContext::new(0);
        self.shape
            .traverse(&mut SingleTraversalContext::new(ray, &mut hit_point, &mut context), 0);
        if hit_point.is_hit() {
            Some(hit_point.distance)
        } else {
            None
        }
    }

    fn illuminate(&self, param: &IlluminateParam) -> Option<IlluminateResult> {
        let s = self.shape.sample_from(&param.intersection.position, &param.sample)?;
        if s.pdf_w <= 0.0 || !s.pdf_w.is_finite() {
            return None;
        }

        Some(IlluminateResult {
            radiance: self.color,
            direction_to_light: s.direction,
            distance: s.distance,
            direct_pdf_w: s.pdf_w,
            emission_pdf_w: cosine_hemisphere_pdf(s.cos_at_surface) / self.shape.surface_area(),
            cos_at_light: s.cos_at_surface,
        })
    }

    /// Emitted radiance is returned unscaled; callers weight it by
    /// `cos_at_light`.
    fn emit(&self, param: &EmitParam) -> Option<EmitResult> {
        let s = self.shape.sample(&param.position_sample);
        let local = cosine_sample_hemisphere(&param.direction_sample);
        if local.z < COS_EPSILON {
            return None;
        }

        let (tangent, bitangent) = s.normal.coordinate_system();
        let direction = (tangent * local.x + bitangent * local.y + s.normal * local.z).normalize();

        Some(EmitResult {
            radiance: self.color,
            position: s.position,
            direction,
            direct_pdf_a: s.pdf_a,
            emission_pdf_w: s.pdf_a * cosine_hemisphere_pdf(local.z),
            cos_at_light: local.z,
        })
    }

    fn get_radiance(&self, param: &RadianceParam) -> RadianceResult {
        let cos_at_light = -param.ray.dir.dot(&param.normal);
        if cos_at_light < COS_EPSILON {
            return RadianceResult::default();
        }

        let direct_pdf_a = 1.0 / self.shape.surface_area();
        RadianceResult {
            radiance: self.color,
            direct_pdf_a,
            direct_pdf_w: self.shape.pdf_w(&param.ray.origin, &param.hit_point, &param.normal),
            emission_pdf_w: cosine_hemisphere_pdf(cos_at_light) * direct_pdf_a,
        }
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
