//! Common local-frame helpers

use super::*;

/// Mirror reflection about the shading normal (+Z).
///
/// * `w` - Direction pointing away from the surface.
#[inline]
pub fn reflect_z(w: &Vector3f) -> Vector3f {
    Vector3f::new(-w.x, -w.y, w.z)
}

/// Refract `wo` through a surface with unit normal `m`. Both the input and
/// the result point away from the surface. Returns `None` on total internal
/// reflection.
///
/// * `wo`  - Outgoing direction.
/// * `m`   - Normal of the refracting (micro) surface, any orientation.
/// * `eta` - Index of refraction on the side of `wo` divided by the index on
///           the other side.
pub fn refract(wo: &Vector3f, m: &Vector3f, eta: Float) -> Option<Vector3f> {
    let cos_o = wo.dot(m);
    let k = 1.0 - eta * eta * (1.0 - cos_o * cos_o);
    if k < 0.0 {
        return None;
    }
    let cos_t = k.sqrt();
    let scale = if cos_o >= 0.0 {
        eta * cos_o - cos_t
    } else {
        eta * cos_o + cos_t
    };
    Some((-eta * *wo + scale * *m).normalize())
}

/// Probability of choosing the specular lobe of a plastic surface, which
/// tracks the energy split between the coating and the diffuse substrate.
///
/// * `fresnel`    - Coating reflectance for the outgoing direction.
/// * `base_color` - Diffuse albedo.
pub fn plastic_specular_probability(fresnel: Float, base_color: &RayColor) -> Float {
    let specular_weight = fresnel;
    let diffuse_weight = (1.0 - fresnel) * base_color.max();
    let total = specular_weight + diffuse_weight;
    if total > 0.0 {
        specular_weight / total
    } else {
        1.0
    }
}

/// Throughput weight of the colour channels a dispersive interface lets
/// through, and the index of refraction the ray sees. Collapses the
/// wavelength when dispersion is enabled.
///
/// * `ctx` - Sampling inputs.
pub fn dispersed_ior(ctx: &mut SamplingContext) -> (Float, RayColor) {
    if ctx.params.dispersion.enable {
        let weight = ctx.wavelength.make_single();
        (ctx.params.ior_at(ctx.wavelength), weight)
    } else {
        (ctx.params.ior, RayColor::one())
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
