//! Pinhole camera for ray generation.

use crate::Ray;
use prism_math::Vec3;

/// Pinhole camera mapping normalized screen coordinates to primary rays.
///
/// The image plane sits one unit in front of the eye. Its extents are fixed
/// at construction from the vertical field of view and the aspect ratio.
/// Screen coordinates run from `(0, 0)` at the bottom-left corner to
/// `(1, 1)` at the top-right.
#[derive(Debug, Clone)]
pub struct Camera {
    position: Vec3,
    front: Vec3,
    up: Vec3,
    right: Vec3,

    // Image plane, set once in new()
    bottom_left: Vec3,
    horizontal: Vec3,
    vertical: Vec3,
}

impl Camera {
    /// Create a camera at `position` looking along `front`.
    ///
    /// `vfov` is the vertical field of view in degrees and `aspect` is
    /// width / height. `up` only needs to be roughly perpendicular to
    /// `front`; it is re-orthogonalized.
    pub fn new(position: Vec3, front: Vec3, up: Vec3, vfov: f32, aspect: f32) -> Self {
        let half_height = (vfov.to_radians() * 0.5).tan();
        let half_width = aspect * half_height;

        let front = front.normalize_or_zero();
        let right = front.cross(up).normalize_or_zero();
        let up = right.cross(front);

        let bottom_left = position - half_width * right - half_height * up + front;

        Self {
            position,
            front,
            up,
            right,
            bottom_left,
            horizontal: 2.0 * half_width * right,
            vertical: 2.0 * half_height * up,
        }
    }

    /// Generate the ray through screen point `(x, y)`.
    ///
    /// The direction is normalized. Coordinates outside `[0, 1]` simply
    /// extend the image plane.
    pub fn get_ray(&self, x: f32, y: f32) -> Ray {
        let target = self.bottom_left + x * self.horizontal + y * self.vertical;
        Ray::new(self.position, (target - self.position).normalize_or_zero())
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn front(&self) -> Vec3 {
        self.front
    }

    pub fn up(&self) -> Vec3 {
        self.up
    }

    pub fn right(&self) -> Vec3 {
        self.right
    }
}

impl Default for Camera {
    /// At the origin looking down -Z, 90 degree field of view, 4:3 aspect.
    fn default() -> Self {
        Self::new(Vec3::ZERO, Vec3::NEG_Z, Vec3::Y, 90.0, 4.0 / 3.0)
    }
}
