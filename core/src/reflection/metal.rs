//! Smooth Metal

use super::*;

/// Perfect mirror reflection off a conductor.
#[derive(Copy, Clone, Debug, Default)]
pub struct MetalBSDF;

impl BSDF for MetalBSDF {
    fn name(&self) -> &'static str {
        "metal"
    }

    fn is_delta(&self) -> bool {
        true
    }

    fn sample(&self, ctx: &mut SamplingContext) -> Option<BSDFSample> {
        let n_dot_v = ctx.outgoing_dir.z;
        if n_dot_v < COS_EPSILON {
            return None;
        }

        let f = fresnel_metal(n_dot_v, ctx.params.ior, ctx.params.k);
        Some(BSDFSample::new(
            ctx.params.base_color * f,
            reflect_z(&ctx.outgoing_dir),
            1.0,
            BSDFEvent::SPECULAR_REFLECTION,
        ))
    }

    fn evaluate(&self, _ctx: &EvaluationContext) -> BSDFEvaluation {
        BSDFEvaluation::zero()
    }
}
