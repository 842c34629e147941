//! Trowbridge-Reitz (GGX) Distribution

use crate::geometry::*;
use crate::pbrt::*;

/// Isotropic Trowbridge-Reitz (GGX) microfacet distribution.
///
/// All directions are expressed in the local shading frame where the
/// macro-surface normal is +Z. Valid for α ∈ (0, 1]; smooth surfaces are
/// handled by delta BSDF variants and never reach this model.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TrowbridgeReitz {
    /// Width of the distribution.
    alpha: Float,

    /// α².
    alpha_sqr: Float,
}

impl TrowbridgeReitz {
    /// Create a new distribution from α directly.
    ///
    /// * `alpha` - Width of the distribution in (0, 1].
    pub fn new(alpha: Float) -> Self {
        debug_assert!(alpha > 0.0 && alpha <= 1.0, "alpha = {}", alpha);
        Self {
            alpha,
            alpha_sqr: alpha * alpha,
        }
    }

    /// Create a new distribution from a perceptual roughness where α is the
    /// square of the roughness.
    ///
    /// * `roughness` - Roughness in (0, 1].
    pub fn from_roughness(roughness: Float) -> Self {
        Self::new(roughness * roughness)
    }

    /// Returns α.
    pub fn alpha(&self) -> Float {
        self.alpha
    }

    /// Return the differential area of microfacets oriented with the
    /// half-vector `m`. Zero for half-vectors below the horizon.
    ///
    /// * `m` - Unit half-vector.
    pub fn d(&self, m: &Vector3f) -> Float {
        if m.z <= 0.0 {
            return 0.0;
        }
        let cos2 = m.z * m.z;
        let denom = cos2 * (self.alpha_sqr - 1.0) + 1.0;
        self.alpha_sqr / (PI * denom * denom)
    }

    /// Smith masking term for a single direction.
    ///
    /// * `n_dot_x` - Cosine between the direction and the macro normal.
    pub fn g1(&self, n_dot_x: Float) -> Float {
        if n_dot_x <= 0.0 {
            return 0.0;
        }
        let cos2 = n_dot_x * n_dot_x;
        let tan2 = max(0.0, 1.0 - cos2) / cos2;
        2.0 / (1.0 + (1.0 + self.alpha_sqr * tan2).sqrt())
    }

    /// Separable Smith shadowing-masking term.
    ///
    /// * `n_dot_v` - Cosine of the outgoing direction.
    /// * `n_dot_l` - Cosine of the incoming direction.
    pub fn g(&self, n_dot_v: Float, n_dot_l: Float) -> Float {
        self.g1(n_dot_v) * self.g1(n_dot_l)
    }

    /// Solid angle density of `sample` producing `m`, which is `D(m) cos θm`.
    ///
    /// * `m` - Unit half-vector.
    pub fn pdf(&self, m: &Vector3f) -> Float {
        self.d(m) * max(0.0, m.z)
    }

    /// Draw a half-vector proportionally to `D(m) cos θm`.
    ///
    /// * `u` - Uniform sample in [0, 1)^2.
    pub fn sample(&self, u: &Point2f) -> Vector3f {
        let cos_theta_sqr = (1.0 - u.x) / (1.0 + (self.alpha_sqr - 1.0) * u.x);
        let cos_theta = max(0.0, cos_theta_sqr).sqrt();
        let sin_theta = max(0.0, 1.0 - cos_theta_sqr).sqrt();
        let phi = TWO_PI * u.y;
        Vector3f::new(sin_theta * phi.cos(), sin_theta * phi.sin(), cos_theta)
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::*;
    use proptest::prelude::*;

    /// Integrates `pdf` over the hemisphere with s = 1 - cos θ on a
    /// logarithmic grid so the narrow peak of small α is resolved.
    fn integrate_pdf(distribution: &TrowbridgeReitz) -> f64 {
        let n = 100_000;
        let ln_min = (1.0e-12_f64).ln();
        let delta = -ln_min / n as f64;
        let mut sum = 0.0;
        for k in 0..n {
            let s = (ln_min + (k as f64 + 0.5) * delta).exp();
            let mu = 1.0 - s;
            let m = Vector3f::new((1.0 - mu * mu).sqrt() as Float, 0.0, mu as Float);
            sum += distribution.d(&m) as f64 * mu * s * delta;
        }
        sum * std::f64::consts::TAU
    }

    #[test]
    fn pdf_is_normalized() {
        for alpha in [0.01, 0.25, 0.64, 1.0] {
            let integral = integrate_pdf(&TrowbridgeReitz::new(alpha));
            assert!(
                approx_eq!(f64, integral, 1.0, epsilon = 1e-2),
                "alpha = {}, integral = {}",
                alpha,
                integral
            );
        }
    }

    #[test]
    fn d_is_zero_below_horizon() {
        let d = TrowbridgeReitz::new(0.5);
        assert_eq!(d.d(&Vector3f::new(0.0, 0.0, -1.0)), 0.0);
        assert_eq!(d.pdf(&Vector3f::new(1.0, 0.0, 0.0)), 0.0);
    }

    #[test]
    fn g_is_zero_below_horizon_and_one_at_normal() {
        let d = TrowbridgeReitz::new(0.5);
        assert_eq!(d.g(0.0, 0.5), 0.0);
        assert_eq!(d.g(0.5, -0.1), 0.0);
        assert!(approx_eq!(f32, d.g(1.0, 1.0), 1.0, epsilon = 1e-6));
    }

    #[test]
    fn sample_mean_matches_pdf() {
        // E[cos θm] under the sampling density equals ∫ D cos² dω.
        let distribution = TrowbridgeReitz::new(0.36);
        let n = 256;
        let mut estimate = 0.0_f64;
        for i in 0..n {
            for j in 0..n {
                let u = Point2f::new(
                    (i as Float + 0.5) / n as Float,
                    (j as Float + 0.5) / n as Float,
                );
                estimate += distribution.sample(&u).z as f64;
            }
        }
        estimate /= (n * n) as f64;

        let steps = 200_000;
        let mut integral = 0.0_f64;
        for k in 0..steps {
            let mu = (k as f64 + 0.5) / steps as f64;
            let m = Vector3f::new((1.0 - mu * mu).sqrt() as Float, 0.0, mu as Float);
            integral += distribution.d(&m) as f64 * mu * mu / steps as f64;
        }
        integral *= std::f64::consts::TAU;

        assert!(approx_eq!(f64, estimate, integral, epsilon = 1e-3));
    }

    proptest! {
        #[test]
        fn samples_are_unit_and_upper(
            alpha in 0.01..1.0f32,
            x in 0.0..0.999f32,
            y in 0.0..1.0f32,
        ) {
            let m = TrowbridgeReitz::new(alpha).sample(&Point2f::new(x, y));
            prop_assert!(m.z > 0.0);
            prop_assert!(approx_eq!(f32, m.length(), 1.0, epsilon = 1e-4));
        }

        #[test]
        fn g_is_monotonic(alpha in 0.01..1.0f32, a in 0.01..1.0f32, b in 0.01..1.0f32) {
            let d = TrowbridgeReitz::new(alpha);
            let (lo, hi) = if a < b { (a, b) } else { (b, a) };
            prop_assert!(d.g1(lo) <= d.g1(hi) + 1e-6);
            prop_assert!(d.g(lo, hi) <= d.g(hi, hi) + 1e-6);
            prop_assert!(d.g(lo, hi) >= 0.0);
        }

        #[test]
        fn values_are_finite(alpha in 0.001..1.0f32, z in 0.0..1.0f32) {
            let d = TrowbridgeReitz::new(alpha);
            let m = Vector3f::new((1.0 - z * z).sqrt(), 0.0, z);
            prop_assert!(d.d(&m).is_finite() && d.d(&m) >= 0.0);
            prop_assert!(d.pdf(&m).is_finite() && d.pdf(&m) >= 0.0);
            prop_assert!(d.g(z, z).is_finite());
        }
    }
}
