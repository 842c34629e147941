//! Core

#[macro_use]
extern crate hexf;
#[macro_use]
extern crate log;

// Re-export.
pub mod film;
pub mod geometry;
pub mod interaction;
pub mod light;
pub mod microfacet;
pub mod pbrt;
pub mod reflection;
pub mod rng;
pub mod sampling;
pub mod shape;
pub mod simd;
pub mod spectrum;
pub mod texture;
pub mod traversal;
