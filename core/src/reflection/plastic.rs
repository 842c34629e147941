//! Smooth Plastic

use super::*;

/// Diffuse substrate under a perfectly smooth dielectric coating. The coating
/// reflects specularly and only what it transmits (both ways) reaches and
/// leaves the substrate.
#[derive(Copy, Clone, Debug, Default)]
pub struct PlasticBSDF;

impl PlasticBSDF {
    /// Diffuse substrate lobe shared with `RoughPlasticBSDF`.
    ///
    /// * `base_color` - Substrate albedo.
    /// * `fresnel_v`  - Coating reflectance for the outgoing direction.
    /// * `fresnel_l`  - Coating reflectance for the incoming direction.
    pub fn substrate(base_color: &RayColor, fresnel_v: Float, fresnel_l: Float) -> RayColor {
        *base_color * (INV_PI * (1.0 - fresnel_v) * (1.0 - fresnel_l))
    }
}

impl BSDF for PlasticBSDF {
    fn name(&self) -> &'static str {
        "plastic"
    }

    fn sample(&self, ctx: &mut SamplingContext) -> Option<BSDFSample> {
        let n_dot_v = ctx.outgoing_dir.z;
        if n_dot_v < COS_EPSILON {
            return None;
        }

        let ior = ctx.params.ior;
        let fresnel_v = fresnel_dielectric(n_dot_v, ior);
        let specular_probability = plastic_specular_probability(fresnel_v, &ctx.params.base_color);

        if ctx.sample[2] < specular_probability {
            return Some(BSDFSample::new(
                RayColor::splat(fresnel_v / specular_probability),
                reflect_z(&ctx.outgoing_dir),
                specular_probability,
                BSDFEvent::SPECULAR_REFLECTION,
            ));
        }

        let diffuse_probability = 1.0 - specular_probability;
        let incoming_dir = cosine_sample_hemisphere(&ctx.sample_2d());
        let n_dot_l = incoming_dir.z;
        if n_dot_l < COS_EPSILON {
            return None;
        }

        let fresnel_l = fresnel_dielectric(n_dot_l, ior);
        let weight = ctx.params.base_color
            * ((1.0 - fresnel_v) * (1.0 - fresnel_l) / diffuse_probability);

        Some(BSDFSample::new(
            weight,
            incoming_dir,
            cosine_hemisphere_pdf(n_dot_l) * diffuse_probability,
            BSDFEvent::DIFFUSE_REFLECTION,
        ))
    }

    fn evaluate(&self, ctx: &EvaluationContext) -> BSDFEvaluation {
        let n_dot_v = ctx.outgoing_dir.z;
        let n_dot_l = ctx.incoming_dir.z;
        if n_dot_v < COS_EPSILON || n_dot_l < COS_EPSILON {
            return BSDFEvaluation::zero();
        }

        let base_color = &ctx.params.base_color;
        let fresnel_v = fresnel_dielectric(n_dot_v, ctx.params.ior);
        let fresnel_l = fresnel_dielectric(n_dot_l, ctx.params.ior);
        let diffuse_probability = 1.0 - plastic_specular_probability(fresnel_v, base_color);
        let reverse_diffuse_probability = 1.0 - plastic_specular_probability(fresnel_l, base_color);

        BSDFEvaluation::new(
            Self::substrate(base_color, fresnel_v, fresnel_l),
            cosine_hemisphere_pdf(n_dot_l) * diffuse_probability,
            cosine_hemisphere_pdf(n_dot_v) * reverse_diffuse_probability,
        )
    }
}
