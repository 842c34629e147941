//! Light

use crate::geometry::*;
use crate::interaction::*;
use crate::pbrt::*;
use crate::spectrum::*;
use bitflags::bitflags;
use std::sync::Arc;

bitflags! {
    /// Light flags. Fixed per light type.
    #[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
    pub struct LightFlags: u8 {
        /// The light has a position (point, spot, area).
        const IS_FINITE = 1 << 0;

        /// The light cannot be hit by a ray (point, spot, directional).
        const IS_DELTA = 1 << 1;
    }
}

/// Input for `Light::illuminate()`.
pub struct IlluminateParam<'a> {
    /// The shaded point.
    pub intersection: &'a IntersectionData,

    /// Wavelength carried by the path.
    pub wavelength: &'a Wavelength,

    /// Uniform random values.
    pub sample: [Float; 3],
}

/// Return value for `Light::illuminate()`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct IlluminateResult {
    /// Radiance arriving at the shaded point (unoccluded).
    pub radiance: RayColor,

    /// Unit direction from the shaded point to the light.
    pub direction_to_light: Vector3f,

    /// Distance to the light; `BACKGROUND_LIGHT_DISTANCE` for lights at
    /// infinity.
    pub distance: Float,

    /// Probability of sampling `direction_to_light` with respect to solid
    /// angle at the shaded point. Delta lights store the factor that turns
    /// intensity into irradiance (distance squared) instead.
    pub direct_pdf_w: Float,

    /// Probability of `emit()` producing the same photon with respect to
    /// solid angle at the light.
    pub emission_pdf_w: Float,

    /// Cosine between the light normal and the direction to the shaded
    /// point.
    pub cos_at_light: Float,
}

/// Input for `Light::emit()`.
pub struct EmitParam<'a> {
    /// Wavelength carried by the path.
    pub wavelength: &'a Wavelength,

    /// Uniform random values used to choose the position.
    pub position_sample: [Float; 3],

    /// Uniform random values used to choose the direction.
    pub direction_sample: Point2f,
}

/// Return value for `Light::emit()`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct EmitResult {
    /// Emitted radiance.
    pub radiance: RayColor,

    /// Photon origin.
    pub position: Point3f,

    /// Photon direction.
    pub direction: Vector3f,

    /// Probability of the origin with respect to area (solid angle for
    /// lights at infinity).
    pub direct_pdf_a: Float,

    /// Probability of origin and direction with respect to solid angle.
    pub emission_pdf_w: Float,

    /// Cosine between the light normal and the emitted direction.
    pub cos_at_light: Float,
}

/// Input for `Light::get_radiance()`.
pub struct RadianceParam<'a> {
    /// The ray that hit the light.
    pub ray: &'a Ray,

    /// Hit position on the light; ignored by lights at infinity.
    pub hit_point: Point3f,

    /// Surface normal at `hit_point`; ignored by lights at infinity.
    pub normal: Vector3f,

    /// Wavelength carried by the path.
    pub wavelength: &'a Wavelength,
}

/// Return value for `Light::get_radiance()`.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct RadianceResult {
    /// Radiance leaving the light towards the ray origin.
    pub radiance: RayColor,

    /// Probability of `illuminate()` choosing the hit point with respect to
    /// area (solid angle for lights at infinity).
    pub direct_pdf_a: Float,

    /// Probability of `illuminate()` choosing the hit point with respect to
    /// solid angle at the ray origin.
    pub direct_pdf_w: Float,

    /// Probability of `emit()` producing the reversed ray with respect to
    /// solid angle.
    pub emission_pdf_w: Float,
}

/// Light trait provides common behavior.
pub trait Light: Send + Sync {
    /// Initialize the light source before rendering begins.
    ///
    /// * `scene_bounds` - Bounds of all geometry in the scene.
    fn preprocess(&mut self, _scene_bounds: &Bounds3f) {}

    /// Returns the type name of the light.
    fn get_type(&self) -> &'static str;

    /// Returns the light flags.
    fn flags(&self) -> LightFlags;

    /// Returns the light colour.
    fn color(&self) -> RayColor;

    /// Set the light colour.
    ///
    /// * `color` - New colour.
    fn set_color(&mut self, color: RayColor);

    /// Returns the bounds of the emitting surface. Lights at infinity return
    /// an empty box.
    fn bounding_box(&self) -> Bounds3f;

    /// Returns the distance at which a ray hits the light surface.
    ///
    /// * `ray` - The ray.
    fn test_ray_hit(&self, _ray: &Ray) -> Option<Float> {
        None
    }

    /// Sample a direction towards the light for next event estimation.
    ///
    /// * `param` - Shaded point and random values.
    fn illuminate(&self, param: &IlluminateParam) -> Option<IlluminateResult>;

    /// Emit a photon from the light.
    ///
    /// * `param` - Random values.
    fn emit(&self, param: &EmitParam) -> Option<EmitResult>;

    /// Radiance for a ray that hit the light directly. Delta lights cannot
    /// be hit and return zero.
    ///
    /// * `param` - The ray and hit point.
    fn get_radiance(&self, _param: &RadianceParam) -> RadianceResult {
        RadianceResult::default()
    }

    /// Returns true if the light has a position.
    fn is_finite(&self) -> bool {
        self.flags().contains(LightFlags::IS_FINITE)
    }

    /// Returns true if the light cannot be hit by a ray.
    fn is_delta(&self) -> bool {
        self.flags().contains(LightFlags::IS_DELTA)
    }
}

/// Atomic reference counted `Light`.
pub type ArcLight = Arc<dyn Light>;

/// Centre and radius of the sphere bounding the scene, used by lights at
/// infinity to place emitted photons.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SceneSphere {
    /// Centre.
    pub center: Point3f,

    /// Radius.
    pub radius: Float,

    /// Reciprocal of the disk area `π r²`.
    pub inv_disk_area: Float,
}

impl Default for SceneSphere {
    fn default() -> Self {
        Self::new(Point3f::zero(), 1.0)
    }
}

impl SceneSphere {
    /// Create a new `SceneSphere`.
    ///
    /// * `center` - Centre.
    /// * `radius` - Radius; must be positive.
    pub fn new(center: Point3f, radius: Float) -> Self {
        debug_assert!(radius > 0.0);
        Self {
            center,
            radius,
            inv_disk_area: 1.0 / (PI * radius * radius),
        }
    }

    /// Bounding sphere of a box; empty or degenerate boxes give a unit
    /// sphere around their centre.
    ///
    /// * `bounds` - Scene bounds.
    pub fn from_bounds(bounds: &Bounds3f) -> Self {
        if bounds.is_empty() {
            return Self::default();
        }
        let (center, radius) = bounds.bounding_sphere();
        Self::new(center, max(radius, 1.0e-3))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scene_sphere_from_bounds() {
        let b = Bounds3f::new(Point3f::new(-1.0, -1.0, -1.0), Point3f::new(1.0, 1.0, 1.0));
        let s = SceneSphere::from_bounds(&b);
        assert_eq!(s.center, Point3f::zero());
        assert!((s.radius - (3.0 as Float).sqrt()).abs() < 1e-5);
        assert!((s.inv_disk_area * PI * 3.0 - 1.0).abs() < 1e-5);
        assert_eq!(SceneSphere::from_bounds(&Bounds3f::empty()), SceneSphere::default());
    }

    #[test]
    fn flags_compose() {
        let f = LightFlags::IS_FINITE | LightFlags::IS_DELTA;
        assert!(f.contains(LightFlags::IS_DELTA));
        assert!(!LightFlags::IS_FINITE.contains(LightFlags::IS_DELTA));
    }
}
