//! Smooth Dielectric

use super::*;

/// Perfectly smooth interface between air and a transparent medium. The
/// surface normal points outside; a negative outgoing cosine means the ray
/// travels inside the medium.
#[derive(Copy, Clone, Debug, Default)]
pub struct DielectricBSDF;

impl BSDF for DielectricBSDF {
    fn name(&self) -> &'static str {
        "dielectric"
    }

    fn is_delta(&self) -> bool {
        true
    }

    fn sample(&self, ctx: &mut SamplingContext) -> Option<BSDFSample> {
        let n_dot_v = ctx.outgoing_dir.z;
        if abs(n_dot_v) < COS_EPSILON {
            return None;
        }

        let (ior, wavelength_weight) = dispersed_ior(ctx);
        let f = fresnel_dielectric(n_dot_v, ior);

        if ctx.sample[2] < f {
            return Some(BSDFSample::new(
                wavelength_weight,
                reflect_z(&ctx.outgoing_dir),
                f,
                BSDFEvent::SPECULAR_REFLECTION,
            ));
        }

        let eta = if n_dot_v > 0.0 { 1.0 / ior } else { ior };
        let incoming_dir = refract(&ctx.outgoing_dir, &Vector3f::Z_AXIS, eta)?;
        if abs(incoming_dir.z) < COS_EPSILON {
            return None;
        }

        Some(BSDFSample::new(
            ctx.params.base_color * wavelength_weight,
            incoming_dir,
            1.0 - f,
            BSDFEvent::SPECULAR_TRANSMISSION,
        ))
    }

    fn evaluate(&self, _ctx: &EvaluationContext) -> BSDFEvaluation {
        BSDFEvaluation::zero()
    }
}
