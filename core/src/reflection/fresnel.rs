//! Fresnel

use super::*;

/// Returns the Fresnel reflectance of a dielectric interface for unpolarized
/// light. A negative cosine means the ray arrives from inside the medium.
///
/// * `cos_theta_i` - Cosine between the direction and the normal of the
///                   interface (pointing outside).
/// * `ior`         - Index of refraction inside divided by outside.
pub fn fresnel_dielectric(cos_theta_i: Float, ior: Float) -> Float {
    let mut cos_theta_i = clamp(cos_theta_i, -1.0, 1.0);
    let (mut eta_i, mut eta_t) = (1.0, ior);

    // Potentially swap indices of refraction.
    if cos_theta_i < 0.0 {
        std::mem::swap(&mut eta_i, &mut eta_t);
        cos_theta_i = -cos_theta_i;
    }

    // Compute _cosThetaT_ using Snell's law.
    let sin_theta_i = max(0.0, 1.0 - cos_theta_i * cos_theta_i).sqrt();
    let sin_theta_t = eta_i / eta_t * sin_theta_i;

    // Handle total internal reflection.
    if sin_theta_t >= 1.0 {
        1.0
    } else {
        let cos_theta_t = max(0.0, 1.0 - sin_theta_t * sin_theta_t).sqrt();
        let r_parl = ((eta_t * cos_theta_i) - (eta_i * cos_theta_t))
            / ((eta_t * cos_theta_i) + (eta_i * cos_theta_t));
        let r_perp = ((eta_i * cos_theta_i) - (eta_t * cos_theta_t))
            / ((eta_i * cos_theta_i) + (eta_t * cos_theta_t));
        clamp((r_parl * r_parl + r_perp * r_perp) / 2.0, 0.0, 1.0)
    }
}

/// Returns the Fresnel reflectance at the boundary between a conductor and
/// air for unpolarized light.
///
/// * `cos_theta_i` - Cosine between the direction and the normal.
/// * `eta`         - Real part of the conductor's index of refraction.
/// * `k`           - Extinction coefficient.
pub fn fresnel_metal(cos_theta_i: Float, eta: Float, k: Float) -> Float {
    let cos_theta_i = clamp(cos_theta_i, 0.0, 1.0);

    let cos_theta_i_2 = cos_theta_i * cos_theta_i;
    let sin_theta_i_2 = 1.0 - cos_theta_i_2;
    let eta_2 = eta * eta;
    let k_2 = k * k;

    let t0 = eta_2 - k_2 - sin_theta_i_2;
    let a2_plus_b2 = (t0 * t0 + 4.0 * eta_2 * k_2).sqrt();
    let t1 = a2_plus_b2 + cos_theta_i_2;
    let a = max(0.0, 0.5 * (a2_plus_b2 + t0)).sqrt();
    let t2 = 2.0 * cos_theta_i * a;
    let rs = (t1 - t2) / (t1 + t2);

    let t3 = cos_theta_i_2 * a2_plus_b2 + sin_theta_i_2 * sin_theta_i_2;
    let t4 = t2 * sin_theta_i_2;
    let rp = rs * (t3 - t4) / (t3 + t4);

    let f = 0.5 * (rp + rs);
    if f.is_finite() {
        clamp(f, 0.0, 1.0)
    } else {
        1.0
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
