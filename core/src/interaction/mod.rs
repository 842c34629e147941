//! Interaction

use crate::geometry::*;
use crate::reflection::MaterialParams;

/// Geometry of a ray hit: position, orthonormal shading frame and texture
/// coordinates.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct IntersectionData {
    /// Hit position.
    pub position: Point3f,

    /// Shading normal (local +Z).
    pub normal: Vector3f,

    /// Tangent (local +X).
    pub tangent: Vector3f,

    /// Bitangent (local +Y).
    pub bitangent: Vector3f,

    /// Texture coordinates.
    pub tex_coord: Point2f,
}

impl IntersectionData {
    /// Create a new `IntersectionData` with an arbitrary tangent frame around
    /// the normal.
    ///
    /// * `position`  - Hit position.
    /// * `normal`    - Unit surface normal.
    /// * `tex_coord` - Texture coordinates.
    pub fn new(position: Point3f, normal: Vector3f, tex_coord: Point2f) -> Self {
        let (tangent, bitangent) = normal.coordinate_system();
        Self {
            position,
            normal,
            tangent,
            bitangent,
            tex_coord,
        }
    }

    /// Create a new `IntersectionData` with a given tangent, which is
    /// orthogonalized against the normal.
    ///
    /// * `position`  - Hit position.
    /// * `normal`    - Unit surface normal.
    /// * `tangent`   - Approximate tangent.
    /// * `tex_coord` - Texture coordinates.
    pub fn with_tangent(
        position: Point3f,
        normal: Vector3f,
        tangent: Vector3f,
        tex_coord: Point2f,
    ) -> Self {
        let projected = tangent - normal * normal.dot(&tangent);
        if projected.length_squared() < 1.0e-12 {
            return Self::new(position, normal, tex_coord);
        }
        let tangent = projected.normalize();
        Self {
            position,
            normal,
            tangent,
            bitangent: normal.cross(&tangent),
            tex_coord,
        }
    }

    /// Transform a world space direction into the local shading frame.
    ///
    /// * `v` - World space direction.
    pub fn world_to_local(&self, v: &Vector3f) -> Vector3f {
        Vector3f::new(v.dot(&self.tangent), v.dot(&self.bitangent), v.dot(&self.normal))
    }

    /// Transform a direction in the local shading frame to world space.
    ///
    /// * `v` - Local direction.
    pub fn local_to_world(&self, v: &Vector3f) -> Vector3f {
        self.tangent * v.x + self.bitangent * v.y + self.normal * v.z
    }

    /// Tilt the shading frame towards a normal given in the local frame
    /// (as produced by a normal map).
    ///
    /// * `local_normal` - Unit normal in the local frame.
    pub fn apply_local_normal(&mut self, local_normal: &Vector3f) {
        if *local_normal == Vector3f::Z_AXIS {
            return;
        }
        let normal = self.local_to_world(local_normal).normalize();
        *self = Self::with_tangent(self.position, normal, self.tangent, self.tex_coord);
    }
}

/// Everything a material needs at a shading point.
#[derive(Copy, Clone, Debug, Default)]
pub struct ShadingData {
    /// Hit geometry.
    pub intersection: IntersectionData,

    /// Direction towards the viewer in world space.
    pub outgoing_dir_world: Vector3f,

    /// Parameters resolved by `Material::evaluate_shading_data`.
    pub material_params: MaterialParams,
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
