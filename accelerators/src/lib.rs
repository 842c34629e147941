//! Ray intersection acceleration data structures.

#[macro_use]
extern crate log;

mod aggregate;
mod bvh;

// Re-export
pub use aggregate::*;
pub use bvh::*;
