//! Material Parameters

use rt_core::geometry::*;
use rt_core::pbrt::*;
use rt_core::spectrum::*;
use rt_core::texture::*;

/// A scalar material parameter: a base value optionally modulated by the
/// first channel of a texture.
#[derive(Clone)]
pub struct ScalarParameter {
    /// Value used everywhere, or multiplied with the texture.
    pub base_value: Float,

    /// Optional texture.
    pub texture: Option<ArcTexture>,
}

impl ScalarParameter {
    /// Create a constant parameter.
    ///
    /// * `base_value` - The value.
    pub fn new(base_value: Float) -> Self {
        Self {
            base_value,
            texture: None,
        }
    }

    /// Create a textured parameter.
    ///
    /// * `base_value` - Multiplier.
    /// * `texture`    - The texture.
    pub fn with_texture(base_value: Float, texture: ArcTexture) -> Self {
        Self {
            base_value,
            texture: Some(texture),
        }
    }

    /// Resolve the parameter at a surface point.
    ///
    /// * `uv` - Texture coordinates.
    pub fn evaluate(&self, uv: &Point2f) -> Float {
        match &self.texture {
            Some(texture) => self.base_value * texture.evaluate(uv)[0],
            None => self.base_value,
        }
    }
}

/// A colour material parameter: a base colour optionally modulated by the
/// RGB channels of a texture.
#[derive(Clone)]
pub struct ColorParameter {
    /// Colour used everywhere, or multiplied with the texture.
    pub base_value: RayColor,

    /// Optional texture.
    pub texture: Option<ArcTexture>,
}

impl ColorParameter {
    /// Create a constant parameter.
    ///
    /// * `base_value` - The colour.
    pub fn new(base_value: RayColor) -> Self {
        Self {
            base_value,
            texture: None,
        }
    }

    /// Create a textured parameter.
    ///
    /// * `base_value` - Multiplier.
    /// * `texture`    - The texture.
    pub fn with_texture(base_value: RayColor, texture: ArcTexture) -> Self {
        Self {
            base_value,
            texture: Some(texture),
        }
    }

    /// Resolve the parameter at a surface point.
    ///
    /// * `uv` - Texture coordinates.
    pub fn evaluate(&self, uv: &Point2f) -> RayColor {
        match &self.texture {
            Some(texture) => {
                let t = texture.evaluate(uv);
                self.base_value * RayColor::new(t[0], t[1], t[2])
            }
            None => self.base_value,
        }
    }
}
