//! Spectrum

mod ray_color;
mod wavelength;

// Re-export
pub use ray_color::*;
pub use wavelength::*;
