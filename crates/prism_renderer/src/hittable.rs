//! Hittable trait and the Intersection hit record.

use std::fmt;

use crate::{Color, Material};
use prism_math::{Aabb, Ray, Vec2, Vec3};

/// Record of a ray-object intersection.
///
/// The default value is the "no hit" record: `happened == false` and an
/// infinite distance, so any real hit compares closer. The object and
/// material are borrowed from the scene for as long as the record lives.
#[derive(Clone, Copy)]
pub struct Intersection<'a> {
    /// Whether anything was hit
    pub happened: bool,
    /// Point of intersection
    pub coords: Vec3,
    /// Geometric normal at the intersection
    pub normal: Vec3,
    /// Surface parameters at the hit (barycentric for triangles)
    pub uv: Vec2,
    /// Ray parameter of the hit, `f32::INFINITY` when nothing was hit
    pub distance: f32,
    /// The primitive that was hit
    pub object: Option<&'a dyn Hittable>,
    /// Material of the primitive that was hit
    pub material: Option<&'a Material>,
}

impl Intersection<'static> {
    /// The "no hit" record.
    pub const NONE: Intersection<'static> = Intersection {
        happened: false,
        coords: Vec3::ZERO,
        normal: Vec3::ZERO,
        uv: Vec2::ZERO,
        distance: f32::INFINITY,
        object: None,
        material: None,
    };
}

impl Intersection<'_> {
    /// Returns true if this record is a hit strictly closer than `other`.
    #[inline]
    pub fn is_closer_than(&self, other: &Intersection<'_>) -> bool {
        self.happened && self.distance < other.distance
    }
}

impl Default for Intersection<'_> {
    fn default() -> Self {
        Intersection::NONE
    }
}

impl fmt::Debug for Intersection<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Intersection")
            .field("happened", &self.happened)
            .field("coords", &self.coords)
            .field("normal", &self.normal)
            .field("uv", &self.uv)
            .field("distance", &self.distance)
            .field("material", &self.material.map(|m| m.kind()))
            .finish()
    }
}

/// Shading inputs resolved at a hit point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceProperties {
    /// Shading normal
    pub normal: Vec3,
    /// Texture coordinates
    pub st: Vec2,
}

/// Trait for objects that can be hit by rays.
pub trait Hittable: Send + Sync {
    /// Find the nearest intersection along the ray with `t >= 0`.
    ///
    /// Returns [`Intersection::NONE`] on a miss.
    fn ray_cast<'a>(&'a self, ray: &Ray) -> Intersection<'a>;

    /// Get the axis-aligned bounding box of this object.
    fn bounds(&self) -> Aabb;

    /// Resolve the shading normal and texture coordinates of a hit on this
    /// object.
    fn surface_properties(&self, hit: &Intersection<'_>) -> SurfaceProperties;

    /// Diffuse color of the surface at texture coordinates `st`.
    fn diffuse_color(&self, st: Vec2) -> Color;
}

/// Brute-force nearest hit over a list of objects.
///
/// On equal distances the earlier object wins.
pub fn closest_hit<'a, H: Hittable>(objects: &'a [H], ray: &Ray) -> Intersection<'a> {
    let mut closest: Intersection<'a> = Intersection::NONE;

    for object in objects {
        let hit = object.ray_cast(ray);
        if hit.is_closer_than(&closest) {
            closest = hit;
        }
    }

    closest
}
