//! Reflection and surface scattering models
//!
//! Every BSDF works in the local shading frame where the surface normal is
//! +Z. Both the outgoing (towards the viewer) and incoming (towards the
//! light) directions point away from the surface.

use crate::geometry::*;
use crate::microfacet::*;
use crate::pbrt::*;
use crate::sampling::*;
use crate::spectrum::*;

mod bsdf;
mod bsdf_event;
mod common;
mod dielectric;
mod diffuse;
mod fresnel;
mod material_params;
mod metal;
mod plastic;
mod registry;
mod rough_dielectric;
mod rough_diffuse;
mod rough_metal;
mod rough_plastic;

#[cfg(test)]
mod tests;

// Re-export
pub use bsdf::*;
pub use bsdf_event::*;
pub use common::*;
pub use dielectric::*;
pub use diffuse::*;
pub use fresnel::*;
pub use material_params::*;
pub use metal::*;
pub use plastic::*;
pub use registry::*;
pub use rough_dielectric::*;
pub use rough_diffuse::*;
pub use rough_metal::*;
pub use rough_plastic::*;
