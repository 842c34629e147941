//! Spot Light Source

use rt_core::geometry::*;
use rt_core::light::*;
use rt_core::pbrt::*;
use rt_core::sampling::*;
use rt_core::spectrum::*;

/// Point light that emits in a cone of directions around its axis.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SpotLight {
    /// Position.
    pub position: Point3f,

    /// Unit direction of the cone axis.
    pub direction: Vector3f,

    /// Intensity.
    color: RayColor,

    /// Cosine of overall angular width of the cone.
    cos_total_width: Float,

    /// Cosine of angle at which falloff starts.
    cos_falloff_start: Float,
}

impl SpotLight {
    /// Returns a new `SpotLight`.
    ///
    /// * `position`      - Position.
    /// * `direction`     - Cone axis.
    /// * `color`         - Intensity.
    /// * `total_width`   - Overall angular width of the cone in degrees.
    /// * `falloff_start` - Angle at which falloff starts in degrees.
    pub fn new(
        position: Point3f,
        direction: Vector3f,
        color: RayColor,
        total_width: Float,
        falloff_start: Float,
    ) -> Self {
        let falloff_start = min(falloff_start, total_width);
        debug!("Spot light at {:?} towards {:?}", position, direction);
        Self {
            position,
            direction: direction.normalize(),
            color,
            cos_total_width: total_width.to_radians().cos(),
            cos_falloff_start: falloff_start.to_radians().cos(),
        }
    }

    /// Returns the distribution of light accounting for the spotlight cone.
    ///
    /// * `w` - Unit vector from the light.
    fn falloff(&self, w: &Vector3f) -> Float {
        let cos_theta = w.dot(&self.direction);
        if cos_theta < self.cos_total_width {
            return 0.0;
        }
        if cos_theta >= self.cos_falloff_start {
            return 1.0;
        }

        // Compute falloff inside spotlight cone.
        let delta =
            (cos_theta - self.cos_total_width) / (self.cos_falloff_start - self.cos_total_width);
        (delta * delta) * (delta * delta)
    }
}

impl Light for SpotLight {
    fn get_type(&self) -> &'static str {
        "spot"
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
        let direction_to_light = to_light / distance;
        let falloff = self.falloff(&-direction_to_light);
        if falloff == 0.0 {
            return None;
        }

        Some(IlluminateResult {
            radiance: self.color * falloff,
            direction_to_light,
            distance,
            direct_pdf_w: dist_sqr,
            emission_pdf_w: uniform_cone_pdf(self.cos_total_width),
            cos_at_light: 1.0,
        })
    }

    fn emit(&self, param: &EmitParam) -> Option<EmitResult> {
        let local = uniform_sample_cone(&param.direction_sample, self.cos_total_width);
        let (tangent, bitangent) = self.direction.coordinate_system();
        let direction =
            (tangent * local.x + bitangent * local.y + self.direction * local.z).normalize();

        Some(EmitResult {
            radiance: self.color * self.falloff(&direction),
            position: self.position,
            direction,
            direct_pdf_a: 1.0,
            emission_pdf_w: uniform_cone_pdf(self.cos_total_width),
            cos_at_light: 1.0,
        })
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
