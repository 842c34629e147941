//! Lambertian Diffuse

use super::*;

/// Ideal diffuse reflection.
#[derive(Copy, Clone, Debug, Default)]
pub struct DiffuseBSDF;

impl BSDF for DiffuseBSDF {
    fn name(&self) -> &'static str {
        "diffuse"
    }

    fn sample(&self, ctx: &mut SamplingContext) -> Option<BSDFSample> {
        if ctx.outgoing_dir.z < COS_EPSILON {
            return None;
        }

        let incoming_dir = cosine_sample_hemisphere(&ctx.sample_2d());
        let n_dot_l = incoming_dir.z;
        if n_dot_l < COS_EPSILON {
            return None;
        }

        Some(BSDFSample::new(
            ctx.params.base_color,
            incoming_dir,
            cosine_hemisphere_pdf(n_dot_l),
            BSDFEvent::DIFFUSE_REFLECTION,
        ))
    }

    fn evaluate(&self, ctx: &EvaluationContext) -> BSDFEvaluation {
        let n_dot_v = ctx.outgoing_dir.z;
        let n_dot_l = ctx.incoming_dir.z;
        if n_dot_v < COS_EPSILON || n_dot_l < COS_EPSILON {
            return BSDFEvaluation::zero();
        }

        BSDFEvaluation::new(
            ctx.params.base_color * INV_PI,
            cosine_hemisphere_pdf(n_dot_l),
            cosine_hemisphere_pdf(n_dot_v),
        )
    }
}
