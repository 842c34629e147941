//! Shapes

#[macro_use]
extern crate log;

mod box_shape;
mod rect;
mod sphere;

// Re-export
pub use box_shape::*;
pub use rect::*;
pub use sphere::*;
