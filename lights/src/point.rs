//! Point Light Source

use rt_core::geometry::*;
use rt_core::light::*;
use rt_core::pbrt::*;
use rt_core::sampling::*;
use rt_core::spectrum::*;

/// Isotropic point light source.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PointLight {
    /// Position.
    pub position: Point3f,

    /// Intensity.
    color: RayColor,
}

impl PointLight {
    /// Returns a new `PointLight`.
    ///
    /// * `position` - Position.
    /// * `color`    - Intensity.
    pub fn new(position: Point3f, color: RayColor) -> Self {
        debug!("Point light at {:?}", position);
        Self { position, color }
    }
}

impl Light for PointLight {
    fn get_type(&self) -> &'static str {
        "point"
    }

    fn flags(&self) -> LightFlags {
        LightFlags::IS_FINITE | LightFlags::IS_DELTA
    }

    fn color(&self) -> RayColor {
        self.color
    }

    fn set_color(&mut self, color: RayColor) {
        self.color = color;
    }

    fn bounding_box(&self) -> Bounds3f {
        Bounds3f::from_point(self.position)
    }

    fn illuminate(&self, param: &IlluminateParam) -> Option<IlluminateResult> {
        let to_light = self.position - param.intersection.position;
        let dist_sqr = to_light.length_squared();
        if dist_sqr == 0.0 {
            return None;
        }

        let distance = dist_sqr.sqrt();
        Some(IlluminateResult {
            radiance: self.color,
            direction_to_light: to_light / distance,
            distance,
            direct_pdf_w: dist_sqr,
            emission_pdf_w: INV_FOUR_PI,
            cos_at_light: 1.0,
        })
    }

    fn emit(&self, param: &EmitParam) -> Option<EmitResult> {
        Some(EmitResult {
            radiance: self.color,
            position: self.position,
            direction: uniform_sample_sphere(&param.direction_sample),
            direct_pdf_a: 1.0,
            emission_pdf_w: INV_FOUR_PI,
            cos_at_light: 1.0,
        })
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
