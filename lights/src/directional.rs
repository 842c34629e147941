//! Directional Light Source

use rt_core::geometry::*;
use rt_core::light::*;
use rt_core::pbrt::*;
use rt_core::sampling::*;
use rt_core::spectrum::*;

/// Light arriving from a single direction at infinity, like the sun.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct DirectionalLight {
    /// Unit direction the light travels in.
    pub direction: Vector3f,

    /// Radiance.
    color: RayColor,

    /// Sphere bounding the scene, used to place emitted photons.
    scene: SceneSphere,
}

impl DirectionalLight {
    /// Returns a new `DirectionalLight`.
    ///
    /// * `direction` - Direction the light travels in.
    /// * `color`     - Radiance.
    pub fn new(direction: Vector3f, color: RayColor) -> Self {
        Self {
            direction: direction.normalize(),
            color,
            scene: SceneSphere::default(),
        }
    }
}

impl Light for DirectionalLight {
    fn preprocess(&mut self, scene_bounds: &Bounds3f) {
        self.scene = SceneSphere::from_bounds(scene_bounds);
        debug!("Directional light scene radius {}", self.scene.radius);
    }

    fn get_type(&self) -> &'static str {
        "directional"
    }

    fn flags(&self) -> LightFlags {
        LightFlags::IS_DELTA
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

    fn illuminate(&self, _param: &IlluminateParam) -> Option<IlluminateResult> {
        Some(IlluminateResult {
            radiance: self.color,
            direction_to_light: -self.direction,
            distance: BACKGROUND_LIGHT_DISTANCE,
            direct_pdf_w: 1.0,
            emission_pdf_w: self.scene.inv_disk_area,
            cos_at_light: 1.0,
        })
    }

    /// Photons start on a disk facing the light direction that covers the
    /// scene bounding sphere.
    fn emit(&self, param: &EmitParam) -> Option<EmitResult> {
        let disk = concentric_sample_disk(&Point2f::new(param.position_sample[0], param.position_sample[1]));
        let (tangent, bitangent) = self.direction.coordinate_system();
        let offset = tangent * disk.x + bitangent * disk.y - self.direction;

        Some(EmitResult {
            radiance: self.color,
            position: self.scene.center + offset * self.scene.radius,
            direction: self.direction,
            direct_pdf_a: 1.0,
            emission_pdf_w: self.scene.inv_disk_area,
            cos_at_light: 1.0,
        })
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
