//! Materials

#[macro_use]
extern crate log;

mod material;
mod parameter;

// Re-export
pub use material::*;
pub use parameter::*;
