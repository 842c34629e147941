//! Pinhole camera

use rt_core::geometry::*;
use rt_core::pbrt::*;

/// Perspective camera mapping film positions in [0, 1)² (y up) to rays.
#[derive(Copy, Clone, Debug)]
pub struct Camera {
    position: Point3f,
    forward: Vector3f,
    right: Vector3f,
    up: Vector3f,
}

impl Camera {
    /// Create a camera.
    ///
    /// * `position` - Eye position.
    /// * `target`   - Point looked at.
    /// * `up`       - Approximate up direction.
    /// * `fov`      - Vertical field of view in degrees.
    /// * `aspect`   - Width over height.
    pub fn new(position: Point3f, target: Point3f, up: Vector3f, fov: Float, aspect: Float) -> Self {
        let forward = (target - position).normalize();
        let right = forward.cross(&up).normalize();
        let up = right.cross(&forward);
        let half_height = (0.5 * fov).to_radians().tan();
        Self {
            position,
            forward,
            right: right * (half_height * aspect),
            up: up * half_height,
        }
    }

    /// Returns the ray through a film position.
    ///
    /// * `film_pos` - Position on the film, (0, 0) at the bottom left.
    pub fn generate_ray(&self, film_pos: &Point2f) -> Ray {
        let dir = self.forward
            + self.right * (2.0 * film_pos.x - 1.0)
            + self.up * (2.0 * film_pos.y - 1.0);
        Ray::new(self.position, dir.normalize())
    }
}
