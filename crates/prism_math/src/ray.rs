use crate::Vec3;

/// A ray in 3D space with an origin and a direction.
///
/// The reciprocal of the direction is computed once at construction so the
/// slab test in [`crate::Aabb::hit`] only multiplies. Rays are immutable;
/// spawn a new one instead of editing an existing ray. The parameter domain
/// is `t >= 0`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ray {
    origin: Vec3,
    direction: Vec3,
    inv_direction: Vec3,
}

impl Ray {
    /// Create a new ray. The direction does not have to be normalized.
    #[inline]
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction,
            inv_direction: direction.recip(),
        }
    }

    /// Get the origin point of the ray.
    #[inline]
    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    /// Get the direction vector of the ray.
    #[inline]
    pub fn direction(&self) -> Vec3 {
        self.direction
    }

    /// Get the componentwise reciprocal of the direction.
    ///
    /// Zero components map to signed infinities.
    #[inline]
    pub fn inv_direction(&self) -> Vec3 {
        self.inv_direction
    }

    /// Get the point along the ray at parameter t.
    ///
    /// Returns: origin + t * direction
    #[inline]
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}
