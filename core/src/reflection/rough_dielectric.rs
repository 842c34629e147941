//! Rough Dielectric

use super::*;

/// Rough interface between air and a transparent medium (Walter et al.
/// 2007) with a GGX microfacet distribution. Falls back to
/// `DielectricBSDF` below `SPECULAR_EVENT_ROUGHNESS_THRESHOLD`.
#[derive(Copy, Clone, Debug, Default)]
pub struct RoughDielectricBSDF;

impl RoughDielectricBSDF {
    /// Evaluates reflection and transmission for a direction pair on either
    /// side of the interface.
    ///
    /// * `params` - Resolved material parameters.
    /// * `ior`    - Index of refraction seen by the ray.
    /// * `wo`     - Outgoing direction.
    /// * `wi`     - Incoming direction.
    fn evaluate_microfacet(
        params: &MaterialParams,
        ior: Float,
        wo: &Vector3f,
        wi: &Vector3f,
    ) -> BSDFEvaluation {
        let n_dot_v = wo.z;
        let n_dot_l = wi.z;
        if abs(n_dot_v) < COS_EPSILON || abs(n_dot_l) < COS_EPSILON {
            return BSDFEvaluation::zero();
        }

        let is_reflection = n_dot_v * n_dot_l > 0.0;
        let eta_v = if n_dot_v > 0.0 { 1.0 } else { ior };
        let eta_l = if n_dot_l > 0.0 { 1.0 } else { ior };

        let m = if is_reflection {
            *wo + *wi
        } else {
            -(eta_v * *wo + eta_l * *wi)
        };
        if m.length_squared() == 0.0 {
            return BSDFEvaluation::zero();
        }
        let m = m.normalize();
        let m = if m.z < 0.0 { -m } else { m };

        // Both directions must see the microfacet from their own side.
        let v_dot_h = wo.dot(&m);
        let l_dot_h = wi.dot(&m);
        if v_dot_h * n_dot_v <= 0.0 || l_dot_h * n_dot_l <= 0.0 {
            return BSDFEvaluation::zero();
        }

        let microfacet = TrowbridgeReitz::from_roughness(params.roughness);
        let d = microfacet.d(&m);
        let g = microfacet.g(abs(n_dot_v), abs(n_dot_l));
        let pdf_m = microfacet.pdf(&m);
        let f = fresnel_dielectric(v_dot_h, ior);

        if is_reflection {
            let value = f * d * g / (4.0 * abs(n_dot_v) * abs(n_dot_l));
            return BSDFEvaluation::new(
                RayColor::splat(value),
                f * pdf_m / (4.0 * abs(v_dot_h)),
                f * pdf_m / (4.0 * abs(l_dot_h)),
            );
        }

        let denom = sqr(eta_v * v_dot_h + eta_l * l_dot_h);
        if denom <= 0.0 {
            return BSDFEvaluation::zero();
        }

        let value = abs(v_dot_h) * abs(l_dot_h) * eta_l * eta_l * (1.0 - f) * d * g
            / (abs(n_dot_v) * abs(n_dot_l) * denom);
        BSDFEvaluation::new(
            params.base_color * value,
            (1.0 - f) * pdf_m * eta_l * eta_l * abs(l_dot_h) / denom,
            (1.0 - f) * pdf_m * eta_v * eta_v * abs(v_dot_h) / denom,
        )
    }
}

impl BSDF for RoughDielectricBSDF {
    fn name(&self) -> &'static str {
        "roughDielectric"
    }

    fn sample(&self, ctx: &mut SamplingContext) -> Option<BSDFSample> {
        let roughness = ctx.params.roughness;
        if roughness < SPECULAR_EVENT_ROUGHNESS_THRESHOLD {
            return DielectricBSDF.sample(ctx);
        }

        let wo = ctx.outgoing_dir;
        let n_dot_v = wo.z;
        if abs(n_dot_v) < COS_EPSILON {
            return None;
        }

        let (ior, wavelength_weight) = dispersed_ior(ctx);

        let microfacet = TrowbridgeReitz::from_roughness(roughness);
        let m = microfacet.sample(&ctx.sample_2d());
        let v_dot_h = wo.dot(&m);
        if abs(v_dot_h) < COS_EPSILON {
            return None;
        }

        let f = fresnel_dielectric(v_dot_h, ior);
        let (incoming_dir, event) = if ctx.sample[2] < f {
            let wi = wo.reflect(&m);
            if wi.z * n_dot_v <= 0.0 {
                return None;
            }
            (wi, BSDFEvent::GLOSSY_REFLECTION)
        } else {
            let eta = if n_dot_v > 0.0 { 1.0 / ior } else { ior };
            let wi = refract(&wo, &m, eta)?;
            if wi.z * n_dot_v >= 0.0 {
                return None;
            }
            (wi, BSDFEvent::GLOSSY_TRANSMISSION)
        };

        let evaluation = Self::evaluate_microfacet(ctx.params, ior, &wo, &incoming_dir);
        if evaluation.direct_pdf_w <= 0.0 || !evaluation.direct_pdf_w.is_finite() {
            return None;
        }

        let weight = evaluation.color * (abs(incoming_dir.z) / evaluation.direct_pdf_w);
        Some(BSDFSample::new(
            weight * wavelength_weight,
            incoming_dir,
            evaluation.direct_pdf_w,
            event,
        ))
    }

    fn evaluate(&self, ctx: &EvaluationContext) -> BSDFEvaluation {
        if ctx.params.roughness < SPECULAR_EVENT_ROUGHNESS_THRESHOLD {
            return DielectricBSDF.evaluate(ctx);
        }

        Self::evaluate_microfacet(
            ctx.params,
            ctx.params.ior_at(ctx.wavelength),
            &ctx.outgoing_dir,
            &ctx.incoming_dir,
        )
    }
}
