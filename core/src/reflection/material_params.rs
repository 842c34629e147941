//! Material Parameters

use super::*;

/// Cauchy dispersion coefficients: `ior(λ) = ior + c / λ² + d / λ⁴` with λ in
/// micrometres.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct DispersionParams {
    /// Dispersive materials collapse rays to a single wavelength.
    pub enable: bool,

    /// Second Cauchy coefficient (μm²).
    pub c: Float,

    /// Third Cauchy coefficient (μm⁴).
    pub d: Float,
}

impl Default for DispersionParams {
    /// Disabled, with BK7 glass coefficients.
    fn default() -> Self {
        Self {
            enable: false,
            c: 0.00420,
            d: 0.0,
        }
    }
}

/// Material parameters resolved at a single shading point.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct MaterialParams {
    /// Albedo / tint.
    pub base_color: RayColor,

    /// Emitted radiance.
    pub emission_color: RayColor,

    /// Perceptual roughness in [0, 1].
    pub roughness: Float,

    /// Metalness in [0, 1].
    pub metalness: Float,

    /// Index of refraction (real part for conductors).
    pub ior: Float,

    /// Extinction coefficient (imaginary part of a conductor's index).
    pub k: Float,

    /// Dispersion.
    pub dispersion: DispersionParams,
}

impl Default for MaterialParams {
    fn default() -> Self {
        Self {
            base_color: RayColor::splat(0.7),
            emission_color: RayColor::zero(),
            roughness: 0.1,
            metalness: 0.0,
            ior: 1.5,
            k: 4.0,
            dispersion: DispersionParams::default(),
        }
    }
}

impl MaterialParams {
    /// Returns the index of refraction seen by a ray. Only rays already
    /// collapsed to a single wavelength see the dispersed value.
    ///
    /// * `wavelength` - Wavelength carried by the ray.
    pub fn ior_at(&self, wavelength: &Wavelength) -> Float {
        if self.dispersion.enable && wavelength.is_single {
            let lambda2 = wavelength.value * wavelength.value;
            self.ior + self.dispersion.c / lambda2 + self.dispersion.d / (lambda2 * lambda2)
        } else {
            self.ior
        }
    }
}
