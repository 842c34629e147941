//! Textures

use crate::geometry::*;
use crate::pbrt::*;
use std::sync::Arc;

/// Texture interface. Material parameters query textures by surface UV.
pub trait Texture: Send + Sync {
    /// Evaluate the texture.
    ///
    /// * `uv` - Surface texture coordinates.
    fn evaluate(&self, uv: &Point2f) -> [Float; 4];
}

/// Atomic reference counted `Texture`.
pub type ArcTexture = Arc<dyn Texture>;

/// Texture returning the same value everywhere.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ConstantTexture {
    value: [Float; 4],
}

impl ConstantTexture {
    /// Create a new `ConstantTexture`.
    ///
    /// * `value` - The value.
    pub fn new(value: [Float; 4]) -> Self {
        Self { value }
    }
}

impl Texture for ConstantTexture {
    fn evaluate(&self, _uv: &Point2f) -> [Float; 4] {
        self.value
    }
}

/// Alternates between two values on a UV grid.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct CheckerboardTexture {
    /// Value of even cells.
    even: [Float; 4],

    /// Value of odd cells.
    odd: [Float; 4],

    /// Number of cells per unit of UV.
    frequency: Float,
}

impl CheckerboardTexture {
    /// Create a new `CheckerboardTexture`.
    ///
    /// * `even`      - Value of even cells.
    /// * `odd`       - Value of odd cells.
    /// * `frequency` - Number of cells per unit of UV.
    pub fn new(even: [Float; 4], odd: [Float; 4], frequency: Float) -> Self {
        Self {
            even,
            odd,
            frequency,
        }
    }
}

impl Texture for CheckerboardTexture {
    fn evaluate(&self, uv: &Point2f) -> [Float; 4] {
        let x = (uv.x * self.frequency).floor() as i64;
        let y = (uv.y * self.frequency).floor() as i64;
        if (x + y).rem_euclid(2) == 0 {
            self.even
        } else {
            self.odd
        }
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn checkerboard_alternates() {
        let t = CheckerboardTexture::new([1.0; 4], [0.0; 4], 2.0);
        assert_eq!(t.evaluate(&Point2f::new(0.1, 0.1)), [1.0; 4]);
        assert_eq!(t.evaluate(&Point2f::new(0.6, 0.1)), [0.0; 4]);
        assert_eq!(t.evaluate(&Point2f::new(0.6, 0.6)), [1.0; 4]);
        assert_eq!(t.evaluate(&Point2f::new(-0.1, 0.1)), [0.0; 4]);
    }
}
