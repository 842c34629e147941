//! Lights

#[macro_use]
extern crate log;

mod area;
mod background;
mod directional;
mod point;
mod spot;

// Re-export.
pub use area::*;
pub use background::*;
pub use directional::*;
pub use point::*;
pub use spot::*;
