//! 8-wide SIMD types used by packet traversal.
//!
//! These are plain arrays the compiler can vectorize; every lane performs
//! exactly the same floating point operations as the scalar code paths so
//! packet and single-ray queries agree bit for bit.

mod float8;
mod mask8;
mod ray8;

// Re-export
pub use float8::*;
pub use mask8::*;
pub use ray8::*;

/// Number of lanes in a packet.
pub const SIMD_WIDTH: usize = 8;
