//! Rough Metal

use super::*;

/// Glossy reflection off a conductor with a GGX microfacet distribution.
/// Falls back to `MetalBSDF` below `SPECULAR_EVENT_ROUGHNESS_THRESHOLD`.
#[derive(Copy, Clone, Debug, Default)]
pub struct RoughMetalBSDF;

impl BSDF for RoughMetalBSDF {
    fn name(&self) -> &'static str {
        "roughMetal"
    }

    fn sample(&self, ctx: &mut SamplingContext) -> Option<BSDFSample> {
        let roughness = ctx.params.roughness;
        if roughness < SPECULAR_EVENT_ROUGHNESS_THRESHOLD {
            return MetalBSDF.sample(ctx);
        }

        let n_dot_v = ctx.outgoing_dir.z;
        if n_dot_v < COS_EPSILON {
            return None;
        }

        // Microfacet normal (aka. half vector).
        let microfacet = TrowbridgeReitz::from_roughness(roughness);
        let m = microfacet.sample(&ctx.sample_2d());
        let v_dot_h = m.dot(&ctx.outgoing_dir);
        if v_dot_h < COS_EPSILON {
            return None;
        }

        let incoming_dir = ctx.outgoing_dir.reflect(&m);
        let n_dot_l = incoming_dir.z;
        if n_dot_l < COS_EPSILON {
            return None;
        }

        let pdf_m = microfacet.pdf(&m);
        if pdf_m <= 0.0 {
            return None;
        }

        let g = microfacet.g(n_dot_v, n_dot_l);
        let f = fresnel_metal(v_dot_h, ctx.params.ior, ctx.params.k);

        Some(BSDFSample::new(
            ctx.params.base_color * (f * g * v_dot_h / (n_dot_v * m.z)),
            incoming_dir,
            pdf_m / (4.0 * v_dot_h),
            BSDFEvent::GLOSSY_REFLECTION,
        ))
    }

    fn evaluate(&self, ctx: &EvaluationContext) -> BSDFEvaluation {
        let roughness = ctx.params.roughness;
        if roughness < SPECULAR_EVENT_ROUGHNESS_THRESHOLD {
            return MetalBSDF.evaluate(ctx);
        }

        let n_dot_v = ctx.outgoing_dir.z;
        let n_dot_l = ctx.incoming_dir.z;
        if n_dot_v < COS_EPSILON || n_dot_l < COS_EPSILON {
            return BSDFEvaluation::zero();
        }

        let m = (ctx.outgoing_dir + ctx.incoming_dir).normalize();
        let v_dot_h = m.dot(&ctx.outgoing_dir);
        if v_dot_h < COS_EPSILON {
            return BSDFEvaluation::zero();
        }

        let microfacet = TrowbridgeReitz::from_roughness(roughness);
        let d = microfacet.d(&m);
        let g = microfacet.g(n_dot_v, n_dot_l);
        let f = fresnel_metal(v_dot_h, ctx.params.ior, ctx.params.k);

        // Reflection keeps the angle to the half vector, so both densities
        // are equal.
        let pdf = microfacet.pdf(&m) / (4.0 * v_dot_h);

        BSDFEvaluation::new(
            ctx.params.base_color * (f * g * d / (4.0 * n_dot_v * n_dot_l)),
            pdf,
            pdf,
        )
    }
}
