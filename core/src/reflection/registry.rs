//! BSDF Registry

use super::*;

/// Creates a boxed BSDF.
pub type BSDFFactory = fn() -> Box<dyn BSDF>;

fn create<T: BSDF + Default + 'static>() -> Box<dyn BSDF> {
    Box::<T>::default()
}

/// Name to factory table of every BSDF variant.
static BSDF_REGISTRY: [(&str, BSDFFactory); 8] = [
    ("diffuse", create::<DiffuseBSDF>),
    ("roughDiffuse", create::<RoughDiffuseBSDF>),
    ("dielectric", create::<DielectricBSDF>),
    ("roughDielectric", create::<RoughDielectricBSDF>),
    ("metal", create::<MetalBSDF>),
    ("roughMetal", create::<RoughMetalBSDF>),
    ("plastic", create::<PlasticBSDF>),
    ("roughPlastic", create::<RoughPlasticBSDF>),
];

/// Returns a new BSDF for the given short name or `None` if the name is not
/// registered.
///
/// * `name` - Short name as returned by `BSDF::name`.
pub fn create_bsdf(name: &str) -> Option<Box<dyn BSDF>> {
    BSDF_REGISTRY
        .iter()
        .find(|(registered, _)| *registered == name)
        .map(|(_, factory)| factory())
}

/// Returns the names of all registered BSDFs.
pub fn bsdf_names() -> impl Iterator<Item = &'static str> {
    BSDF_REGISTRY.iter().map(|(name, _)| *name)
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_name_round_trips() {
        assert_eq!(bsdf_names().count(), 8);
        for name in bsdf_names() {
            let bsdf = create_bsdf(name).unwrap();
            assert_eq!(bsdf.name(), name);
        }
    }

    #[test]
    fn unknown_name_is_none() {
        assert!(create_bsdf("velvet").is_none());
    }

    #[test]
    fn only_smooth_variants_are_delta() {
        let delta: Vec<&str> = bsdf_names()
            .filter(|name| create_bsdf(name).unwrap().is_delta())
            .collect();
        assert_eq!(delta, vec!["dielectric", "metal"]);
    }
}
