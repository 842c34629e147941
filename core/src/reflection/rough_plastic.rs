//! Rough Plastic

use super::*;

/// Diffuse substrate under a rough dielectric coating with a GGX microfacet
/// distribution. Falls back to `PlasticBSDF` below
/// `SPECULAR_EVENT_ROUGHNESS_THRESHOLD`; the substrate lobe is identical in
/// both so the two agree up to the vanishing glossy term.
#[derive(Copy, Clone, Debug, Default)]
pub struct RoughPlasticBSDF;

impl BSDF for RoughPlasticBSDF {
    fn name(&self) -> &'static str {
        "roughPlastic"
    }

    fn sample(&self, ctx: &mut SamplingContext) -> Option<BSDFSample> {
        let roughness = ctx.params.roughness;
        if roughness < SPECULAR_EVENT_ROUGHNESS_THRESHOLD {
            return PlasticBSDF.sample(ctx);
        }

        let n_dot_v = ctx.outgoing_dir.z;
        if n_dot_v < COS_EPSILON {
            return None;
        }

        let fresnel_v = fresnel_dielectric(n_dot_v, ctx.params.ior);
        let specular_probability = plastic_specular_probability(fresnel_v, &ctx.params.base_color);

        let (incoming_dir, event) = if ctx.sample[2] < specular_probability {
            let microfacet = TrowbridgeReitz::from_roughness(roughness);
            let m = microfacet.sample(&ctx.sample_2d());
            (ctx.outgoing_dir.reflect(&m), BSDFEvent::GLOSSY_REFLECTION)
        } else {
            (
                cosine_sample_hemisphere(&ctx.sample_2d()),
                BSDFEvent::DIFFUSE_REFLECTION,
            )
        };

        if incoming_dir.z < COS_EPSILON {
            return None;
        }

        // Weight by the density of the whole mixture so the estimate agrees
        // with `evaluate` whichever lobe produced the direction.
        let evaluation = self.evaluate(&ctx.to_evaluation(incoming_dir));
        if evaluation.direct_pdf_w <= 0.0 || !evaluation.direct_pdf_w.is_finite() {
            return None;
        }

        Some(BSDFSample::new(
            evaluation.color * (incoming_dir.z / evaluation.direct_pdf_w),
            incoming_dir,
            evaluation.direct_pdf_w,
            event,
        ))
    }

    fn evaluate(&self, ctx: &EvaluationContext) -> BSDFEvaluation {
        let roughness = ctx.params.roughness;
        if roughness < SPECULAR_EVENT_ROUGHNESS_THRESHOLD {
            return PlasticBSDF.evaluate(ctx);
        }

        let n_dot_v = ctx.outgoing_dir.z;
        let n_dot_l = ctx.incoming_dir.z;
        if n_dot_v < COS_EPSILON || n_dot_l < COS_EPSILON {
            return BSDFEvaluation::zero();
        }

        let ior = ctx.params.ior;
        let base_color = &ctx.params.base_color;
        let fresnel_v = fresnel_dielectric(n_dot_v, ior);
        let fresnel_l = fresnel_dielectric(n_dot_l, ior);
        let specular_probability = plastic_specular_probability(fresnel_v, base_color);
        let reverse_specular_probability = plastic_specular_probability(fresnel_l, base_color);

        let diffuse = PlasticBSDF::substrate(base_color, fresnel_v, fresnel_l);

        // Glossy coating lobe.
        let m = (ctx.outgoing_dir + ctx.incoming_dir).normalize();
        let v_dot_h = m.dot(&ctx.outgoing_dir);
        let (specular, specular_pdf) = if v_dot_h >= COS_EPSILON {
            let microfacet = TrowbridgeReitz::from_roughness(roughness);
            let d = microfacet.d(&m);
            let g = microfacet.g(n_dot_v, n_dot_l);
            let f = fresnel_dielectric(v_dot_h, ior);
            (
                f * d * g / (4.0 * n_dot_v * n_dot_l),
                microfacet.pdf(&m) / (4.0 * v_dot_h),
            )
        } else {
            (0.0, 0.0)
        };

        let direct_pdf_w = specular_probability * specular_pdf
            + (1.0 - specular_probability) * cosine_hemisphere_pdf(n_dot_l);
        let reverse_pdf_w = reverse_specular_probability * specular_pdf
            + (1.0 - reverse_specular_probability) * cosine_hemisphere_pdf(n_dot_v);

        BSDFEvaluation::new(
            diffuse + RayColor::splat(specular),
            direct_pdf_w,
            reverse_pdf_w,
        )
    }
}
