//! Background Light Source

use rt_core::geometry::*;
use rt_core::light::*;
use rt_core::pbrt::*;
use rt_core::sampling::*;
use rt_core::spectrum::*;

/// Uniform environment light surrounding the scene. Rays that escape the
/// scene hit it.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct BackgroundLight {
    /// Radiance.
    color: RayColor,

    /// Sphere bounding the scene, used to place emitted photons.
    scene: SceneSphere,
}

impl BackgroundLight {
    /// Returns a new `BackgroundLight`.
    ///
    /// * `color` - Radiance.
    pub fn new(color: RayColor) -> Self {
        Self {
            color,
            scene: SceneSphere::default(),
        }
    }
}

impl Light for BackgroundLight {
    fn preprocess(&mut self, scene_bounds: &Bounds3f) {
        self.scene = SceneSphere::from_bounds(scene_bounds);
    }

    fn get_type(&self) -> &'static str {
        "background"
    }

    fn flags(&self) -> LightFlags {
        LightFlags::empty()
    }

    fn color(&self) -> RayColor {
        self.color
    }

    fn set_color(&mut self, color: RayColor) {
        self.color = color;
    }

    fn bounding_box(&self) -> Bounds3f {
        Bounds3f::empty()
    }

    fn illuminate(&self, param: &IlluminateParam) -> Option<IlluminateResult> {
        let direction_to_light = uniform_sample_sphere(&Point2f::new(param.sample[0], param.sample[1]));
        Some(IlluminateResult {
            radiance: self.color,
            direction_to_light,
            distance: BACKGROUND_LIGHT_DISTANCE,
            direct_pdf_w: uniform_sphere_pdf(),
            emission_pdf_w: uniform_sphere_pdf() * self.scene.inv_disk_area,
            cos_at_light: 1.0,
        })
    }

    fn emit(&self, param: &EmitParam) -> Option<EmitResult> {
        let direction = -uniform_sample_sphere(&param.direction_sample);
        let disk = concentric_sample_disk(&Point2f::new(param.position_sample[0], param.position_sample[1]));
        let (tangent, bitangent) = direction.coordinate_system();
        let offset = tangent * disk.x + bitangent * disk.y - direction;

        Some(EmitResult {
            radiance: self.color,
            position: self.scene.center + offset * self.scene.radius,
            direction,
            direct_pdf_a: uniform_sphere_pdf(),
            emission_pdf_w: uniform_sphere_pdf() * self.scene.inv_disk_area,
            cos_at_light: 1.0,
        })
    }

    fn get_radiance(&self, _param: &RadianceParam) -> RadianceResult {
        RadianceResult {
            radiance: self.color,
            direct_pdf_a: uniform_sphere_pdf(),
            direct_pdf_w: uniform_sphere_pdf(),
            emission_pdf_w: uniform_sphere_pdf() * self.scene.inv_disk_area,
        }
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
