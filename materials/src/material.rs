//! Material

use crate::parameter::*;
use rt_core::geometry::*;
use rt_core::interaction::*;
use rt_core::pbrt::*;
use rt_core::reflection::*;
use rt_core::spectrum::*;
use rt_core::texture::*;
use std::sync::Arc;

/// Name of the BSDF new materials start with.
pub const DEFAULT_BSDF_NAME: &str = "diffuse";

/// Mask map values above this are opaque.
pub const MASK_THRESHOLD: Float = 0.5;

/// Result of `Material::sample()`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct MaterialSample {
    /// BSDF value times cosine divided by `pdf`.
    pub color: RayColor,

    /// Sampled incoming direction in world space.
    pub incoming_dir_world: Vector3f,

    /// Probability of the sampled direction with respect to solid angle.
    pub pdf: Float,

    /// Sampled event; `BSDFEvent::NULL` if sampling failed.
    pub event: BSDFEvent,
}

impl MaterialSample {
    /// Returns the sample produced when there is no valid direction.
    pub fn null() -> Self {
        Self {
            color: RayColor::zero(),
            incoming_dir_world: Vector3f::zero(),
            pdf: 0.0,
            event: BSDFEvent::NULL,
        }
    }

    /// Returns true if a direction was sampled.
    pub fn is_valid(&self) -> bool {
        self.event != BSDFEvent::NULL
    }
}

/// Surface description of a scene object. Owns exactly one BSDF and resolves
/// texture driven parameters per shading point.
pub struct Material {
    /// Name used in log messages.
    pub debug_name: String,

    /// Emitted radiance.
    pub emission: ColorParameter,

    /// Albedo / specular colour.
    pub base_color: ColorParameter,

    /// Roughness in [0, 1].
    pub roughness: ScalarParameter,

    /// Metalness in [0, 1].
    pub metalness: ScalarParameter,

    /// Index of refraction.
    pub ior: Float,

    /// Extinction coefficient of metals.
    pub k: Float,

    /// Blend factor between the geometric normal and the normal map.
    pub normal_map_strength: Float,

    /// Tangent space normal map in unipolar [0, 1] encoding.
    pub normal_map: Option<ArcTexture>,

    /// Opacity mask; first channel compared against `MASK_THRESHOLD`.
    pub mask_map: Option<ArcTexture>,

    /// Dispersion of dielectrics.
    pub dispersion: DispersionParams,

    /// The scattering model.
    bsdf: Option<Box<dyn BSDF>>,
}

impl Default for Material {
    fn default() -> Self {
        Self::new("default")
    }
}

impl Material {
    /// Create a new diffuse material with default parameters.
    ///
    /// * `debug_name` - Name used in log messages.
    pub fn new(debug_name: &str) -> Self {
        let defaults = MaterialParams::default();
        let mut material = Self {
            debug_name: debug_name.to_string(),
            emission: ColorParameter::new(defaults.emission_color),
            base_color: ColorParameter::new(defaults.base_color),
            roughness: ScalarParameter::new(defaults.roughness),
            metalness: ScalarParameter::new(defaults.metalness),
            ior: defaults.ior,
            k: defaults.k,
            normal_map_strength: 1.0,
            normal_map: None,
            mask_map: None,
            dispersion: defaults.dispersion,
            bsdf: None,
        };
        material.set_bsdf_by_name(DEFAULT_BSDF_NAME);
        material.compile();
        material
    }

    /// Returns the assigned BSDF, if any.
    pub fn bsdf(&self) -> Option<&dyn BSDF> {
        self.bsdf.as_deref()
    }

    /// Replace the BSDF. The old one is dropped.
    ///
    /// * `bsdf` - The new BSDF; `None` leaves the material unassigned.
    pub fn set_bsdf(&mut self, bsdf: Option<Box<dyn BSDF>>) {
        self.bsdf = bsdf;
    }

    /// Replace the BSDF with one from the registry. Panics on unknown names.
    ///
    /// * `name` - Registered BSDF name.
    pub fn set_bsdf_by_name(&mut self, name: &str) {
        match create_bsdf(name) {
            Some(bsdf) => {
                debug!("Material '{}' uses BSDF '{}'", self.debug_name, name);
                self.bsdf = Some(bsdf);
            }
            None => panic!(
                "Unknown BSDF name '{}' for material '{}'",
                name, self.debug_name
            ),
        }
    }

    /// Validate parameters. Must be called after editing any of them; a
    /// violation is a programming error and panics.
    pub fn compile(&self) {
        let name = &self.debug_name;
        assert!(self.bsdf.is_some(), "material '{}' has no BSDF", name);
        assert!(self.emission.base_value.is_valid(), "material '{}': invalid emission", name);
        assert!(self.base_color.base_value.is_valid(), "material '{}': invalid base colour", name);

        let roughness = self.roughness.base_value;
        assert!(
            roughness.is_finite() && (0.0..=1.0).contains(&roughness),
            "material '{}': roughness {} outside [0, 1]",
            name,
            roughness
        );

        let metalness = self.metalness.base_value;
        assert!(
            metalness.is_finite() && (0.0..=1.0).contains(&metalness),
            "material '{}': metalness {} outside [0, 1]",
            name,
            metalness
        );

        assert!(
            self.normal_map_strength.is_finite() && self.normal_map_strength >= 0.0,
            "material '{}': invalid normal map strength {}",
            name,
            self.normal_map_strength
        );
        assert!(self.ior.is_finite() && self.ior >= 0.0, "material '{}': invalid IOR {}", name, self.ior);
        assert!(self.k.is_finite() && self.k >= 0.0, "material '{}': invalid K {}", name, self.k);
        assert!(
            self.dispersion.c.is_finite() && self.dispersion.d.is_finite(),
            "material '{}': invalid dispersion",
            name
        );
    }

    /// Returns the shading normal in the local frame after applying the
    /// normal map.
    ///
    /// * `uv` - Texture coordinates.
    pub fn get_normal_vector(&self, uv: &Point2f) -> Vector3f {
        let z = Vector3f::Z_AXIS;
        match &self.normal_map {
            Some(normal_map) => {
                let t = normal_map.evaluate(uv);
                let x = 2.0 * t[0] - 1.0;
                let y = 2.0 * t[1] - 1.0;
                let mapped = Vector3f::new(x, y, max(0.0, 1.0 - x * x - y * y).sqrt());
                let normal = z + (mapped - z) * self.normal_map_strength;
                if normal.length_squared() > 0.0 {
                    normal.normalize()
                } else {
                    z
                }
            }
            None => z,
        }
    }

    /// Returns false where the mask map makes the surface transparent.
    ///
    /// * `uv` - Texture coordinates.
    pub fn get_mask_value(&self, uv: &Point2f) -> bool {
        match &self.mask_map {
            Some(mask_map) => mask_map.evaluate(uv)[0] > MASK_THRESHOLD,
            None => true,
        }
    }

    /// Resolve parameters at the shading point and tilt the shading frame by
    /// the normal map.
    ///
    /// * `shading_data` - Shading point; `intersection` must be filled in.
    pub fn evaluate_shading_data(&self, shading_data: &mut ShadingData) {
        let uv = shading_data.intersection.tex_coord;
        shading_data.material_params = MaterialParams {
            base_color: self.base_color.evaluate(&uv),
            emission_color: self.emission.evaluate(&uv),
            roughness: self.roughness.evaluate(&uv),
            metalness: self.metalness.evaluate(&uv),
            ior: self.ior,
            k: self.k,
            dispersion: self.dispersion,
        };

        if self.normal_map.is_some() {
            let local_normal = self.get_normal_vector(&uv);
            shading_data.intersection.apply_local_normal(&local_normal);
        }
    }

    /// Sample an incoming direction. Returns `MaterialSample::null()` if no
    /// BSDF is assigned or the BSDF fails to sample.
    ///
    /// * `wavelength`   - Wavelength of the path; dispersive BSDFs may
    ///                    collapse it to a single band.
    /// * `shading_data` - Shading point.
    /// * `sample`       - Uniform random values.
    pub fn sample(
        &self,
        wavelength: &mut Wavelength,
        shading_data: &ShadingData,
        sample: [Float; 3],
    ) -> MaterialSample {
        let bsdf = match &self.bsdf {
            Some(bsdf) => bsdf,
            None => {
                warn!("Material '{}' sampled without a BSDF", self.debug_name);
                return MaterialSample::null();
            }
        };

        let intersection = &shading_data.intersection;
        let outgoing_dir = intersection.world_to_local(&shading_data.outgoing_dir_world);
        let mut ctx = SamplingContext::new(&shading_data.material_params, wavelength, outgoing_dir, sample);

        match bsdf.sample(&mut ctx) {
            Some(s) => {
                debug_assert!(s.weight.is_valid());
                debug_assert!(s.pdf.is_finite() && s.pdf >= 0.0);
                MaterialSample {
                    color: s.weight,
                    incoming_dir_world: intersection.local_to_world(&s.incoming_dir),
                    pdf: s.pdf,
                    event: s.event,
                }
            }
            None => MaterialSample::null(),
        }
    }

    /// Evaluate the BSDF for a pair of world space directions.
    ///
    /// * `wavelength`         - Wavelength of the path.
    /// * `shading_data`       - Shading point.
    /// * `incoming_dir_world` - Direction towards the light.
    pub fn evaluate(
        &self,
        wavelength: &Wavelength,
        shading_data: &ShadingData,
        incoming_dir_world: &Vector3f,
    ) -> BSDFEvaluation {
        let bsdf = match &self.bsdf {
            Some(bsdf) => bsdf,
            None => {
                warn!("Material '{}' evaluated without a BSDF", self.debug_name);
                return BSDFEvaluation::zero();
            }
        };

        let intersection = &shading_data.intersection;
        let ctx = EvaluationContext::new(
            &shading_data.material_params,
            wavelength,
            intersection.world_to_local(&shading_data.outgoing_dir_world),
            intersection.world_to_local(incoming_dir_world),
        );
        bsdf.evaluate(&ctx)
    }

    /// Solid angle density of sampling `incoming_dir_world`.
    ///
    /// * `wavelength`         - Wavelength of the path.
    /// * `shading_data`       - Shading point.
    /// * `incoming_dir_world` - Direction towards the light.
    /// * `dir`                - Forward or reverse density.
    pub fn pdf(
        &self,
        wavelength: &Wavelength,
        shading_data: &ShadingData,
        incoming_dir_world: &Vector3f,
        dir: PdfDirection,
    ) -> Float {
        match &self.bsdf {
            Some(bsdf) => {
                let intersection = &shading_data.intersection;
                let ctx = EvaluationContext::new(
                    &shading_data.material_params,
                    wavelength,
                    intersection.world_to_local(&shading_data.outgoing_dir_world),
                    intersection.world_to_local(incoming_dir_world),
                );
                bsdf.pdf(&ctx, dir)
            }
            None => 0.0,
        }
    }

    /// Returns true if the assigned BSDF is a delta distribution.
    pub fn is_delta(&self) -> bool {
        self.bsdf.as_ref().map_or(false, |bsdf| bsdf.is_delta())
    }
}

/// Atomic reference counted `Material`.
pub type ArcMaterial = Arc<Material>;

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::*;
    use rt_core::texture::ConstantTexture;

    fn shading_data(material: &Material, normal: Vector3f, outgoing: Vector3f) -> ShadingData {
        let mut data = ShadingData {
            intersection: IntersectionData::new(Point3f::zero(), normal, Point2f::new(0.25, 0.25)),
            outgoing_dir_world: outgoing.normalize(),
            ..ShadingData::default()
        };
        material.evaluate_shading_data(&mut data);
        data
    }

    #[test]
    fn new_material_is_diffuse() {
        let material = Material::new("test");
        assert_eq!(material.bsdf().map(|b| b.name()), Some("diffuse"));
        assert!(!material.is_delta());
    }

    #[test]
    #[should_panic]
    fn unknown_bsdf_name_panics() {
        Material::new("test").set_bsdf_by_name("velvet");
    }

    #[test]
    #[should_panic]
    fn compile_rejects_out_of_range_roughness() {
        let mut material = Material::new("test");
        material.roughness = ScalarParameter::new(1.5);
        material.compile();
    }

    #[test]
    #[should_panic]
    fn compile_rejects_missing_bsdf() {
        let mut material = Material::new("test");
        material.set_bsdf(None);
        material.compile();
    }

    #[test]
    fn unassigned_bsdf_yields_null_sample() {
        let mut material = Material::new("test");
        material.set_bsdf(None);
        let data = shading_data(&material, Vector3f::Z_AXIS, Vector3f::Z_AXIS);
        let mut wavelength = Wavelength::default();
        let s = material.sample(&mut wavelength, &data, [0.5, 0.5, 0.5]);
        assert!(!s.is_valid());
        assert!(s.color.is_black());
        let e = material.evaluate(&wavelength, &data, &Vector3f::Z_AXIS);
        assert!(e.color.is_black());
    }

    #[test]
    fn sampled_directions_are_in_world_space() {
        let material = Material::new("test");
        let normal = Vector3f::new(0.0, 1.0, 0.0);
        let data = shading_data(&material, normal, Vector3f::new(0.2, 1.0, 0.1));
        let mut wavelength = Wavelength::default();
        let s = material.sample(&mut wavelength, &data, [0.3, 0.7, 0.1]);
        assert!(s.is_valid());
        assert_eq!(s.event, BSDFEvent::DIFFUSE_REFLECTION);
        assert!(s.incoming_dir_world.dot(&normal) > 0.0);
        assert!(approx_eq!(f32, s.incoming_dir_world.length(), 1.0, epsilon = 1e-5));

        let e = material.evaluate(&wavelength, &data, &s.incoming_dir_world);
        assert!(approx_eq!(f32, e.direct_pdf_w, s.pdf, epsilon = 1e-4));
        let forward = material.pdf(&wavelength, &data, &s.incoming_dir_world, PdfDirection::Forward);
        assert!(approx_eq!(f32, forward, s.pdf, epsilon = 1e-4));
    }

    #[test]
    fn below_horizon_outgoing_direction_fails() {
        let material = Material::new("test");
        let data = shading_data(&material, Vector3f::Z_AXIS, Vector3f::new(0.0, 0.3, -1.0));
        let mut wavelength = Wavelength::default();
        assert!(!material.sample(&mut wavelength, &data, [0.5, 0.5, 0.5]).is_valid());
    }

    #[test]
    fn rough_plastic_is_continuous_at_threshold() {
        let mut below = Material::new("below");
        below.set_bsdf_by_name("roughPlastic");
        below.roughness = ScalarParameter::new(0.0999);
        below.compile();

        let mut above = Material::new("above");
        above.set_bsdf_by_name("roughPlastic");
        above.roughness = ScalarParameter::new(0.1001);
        above.compile();

        let outgoing = Vector3f::new(0.5, 0.0, 0.866);
        let incoming = Vector3f::new(0.707, 0.0, 0.707);
        let wavelength = Wavelength::default();
        let a = below.evaluate(&wavelength, &shading_data(&below, Vector3f::Z_AXIS, outgoing), &incoming);
        let b = above.evaluate(&wavelength, &shading_data(&above, Vector3f::Z_AXIS, outgoing), &incoming);
        for c in 0..3 {
            assert!((a.color[c] - b.color[c]).abs() < 1e-3);
        }
    }

    #[test]
    fn textures_resolve_per_shading_point() {
        let mut material = Material::new("test");
        material.base_color = ColorParameter::with_texture(
            RayColor::one(),
            Arc::new(ConstantTexture::new([0.2, 0.4, 0.6, 1.0])),
        );
        material.roughness = ScalarParameter::with_texture(0.5, Arc::new(ConstantTexture::new([0.5; 4])));
        let data = shading_data(&material, Vector3f::Z_AXIS, Vector3f::Z_AXIS);
        assert_eq!(data.material_params.base_color, RayColor::new(0.2, 0.4, 0.6));
        assert_eq!(data.material_params.roughness, 0.25);
    }

    #[test]
    fn normal_map_tilts_shading_frame() {
        let mut material = Material::new("test");
        assert_eq!(material.get_normal_vector(&Point2f::zero()), Vector3f::Z_AXIS);

        // Flat normal map encoding (0.5, 0.5, 1) leaves the frame unchanged.
        material.normal_map = Some(Arc::new(ConstantTexture::new([0.5, 0.5, 1.0, 1.0])));
        let flat = material.get_normal_vector(&Point2f::zero());
        assert!(approx_eq!(f32, flat.z, 1.0, epsilon = 1e-6));

        material.normal_map = Some(Arc::new(ConstantTexture::new([0.8, 0.5, 1.0, 1.0])));
        let tilted = material.get_normal_vector(&Point2f::zero());
        assert!(tilted.x > 0.0 && tilted.z > 0.0);
        assert!(approx_eq!(f32, tilted.length(), 1.0, epsilon = 1e-5));

        material.normal_map_strength = 0.0;
        assert_eq!(material.get_normal_vector(&Point2f::zero()), Vector3f::Z_AXIS);

        material.normal_map_strength = 1.0;
        let tangent = IntersectionData::new(Point3f::zero(), Vector3f::Z_AXIS, Point2f::zero()).tangent;
        let data = shading_data(&material, Vector3f::Z_AXIS, Vector3f::Z_AXIS);
        assert!(data.intersection.normal.dot(&tangent) > 0.0);
        assert!(data.intersection.normal.z > 0.0);
    }

    #[test]
    fn mask_threshold() {
        let mut material = Material::new("test");
        assert!(material.get_mask_value(&Point2f::zero()));
        material.mask_map = Some(Arc::new(ConstantTexture::new([0.4; 4])));
        assert!(!material.get_mask_value(&Point2f::zero()));
        material.mask_map = Some(Arc::new(ConstantTexture::new([0.6; 4])));
        assert!(material.get_mask_value(&Point2f::zero()));
    }
}
