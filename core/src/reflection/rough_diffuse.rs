//! Oren-Nayar Rough Diffuse

use super::*;

/// Diffuse reflection from a surface made of Lambertian microfacets
/// (Oren-Nayar). The roughness parameter is used as σ, the standard
/// deviation of the microfacet orientation angle in radians; zero roughness
/// is Lambertian.
#[derive(Copy, Clone, Debug, Default)]
pub struct RoughDiffuseBSDF;

impl RoughDiffuseBSDF {
    /// Returns the Oren-Nayar scale applied to `base_color / π`.
    ///
    /// * `sigma` - Standard deviation of the microfacet angle (radians).
    /// * `wo`    - Outgoing direction.
    /// * `wi`    - Incoming direction.
    fn oren_nayar(sigma: Float, wo: &Vector3f, wi: &Vector3f) -> Float {
        let sigma2 = sigma * sigma;
        let a = 1.0 - (sigma2 / (2.0 * (sigma2 + 0.33)));
        let b = 0.45 * sigma2 / (sigma2 + 0.09);

        let sin_theta_i = max(0.0, 1.0 - wi.z * wi.z).sqrt();
        let sin_theta_o = max(0.0, 1.0 - wo.z * wo.z).sqrt();

        // Compute cosine term of Oren-Nayar model.
        let max_cos = if sin_theta_i > 1e-4 && sin_theta_o > 1e-4 {
            let d_cos = (wi.x * wo.x + wi.y * wo.y) / (sin_theta_i * sin_theta_o);
            clamp(d_cos, 0.0, 1.0)
        } else {
            0.0
        };

        // Compute sine and tangent terms of Oren-Nayar model.
        let (sin_alpha, tan_beta) = if wi.z > wo.z {
            (sin_theta_o, sin_theta_i / wi.z)
        } else {
            (sin_theta_i, sin_theta_o / wo.z)
        };

        a + b * max_cos * sin_alpha * tan_beta
    }
}

impl BSDF for RoughDiffuseBSDF {
    fn name(&self) -> &'static str {
        "roughDiffuse"
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

        let scale = Self::oren_nayar(ctx.params.roughness, &ctx.outgoing_dir, &incoming_dir);
        Some(BSDFSample::new(
            ctx.params.base_color * scale,
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

        let scale = Self::oren_nayar(ctx.params.roughness, &ctx.outgoing_dir, &ctx.incoming_dir);
        BSDFEvaluation::new(
            ctx.params.base_color * (scale * INV_PI),
            cosine_hemisphere_pdf(n_dot_l),
            cosine_hemisphere_pdf(n_dot_v),
        )
    }
}
