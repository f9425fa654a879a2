//! Closed set of scene primitives.

use crate::{
    hittable::{Hittable, Intersection, SurfaceProperties},
    Color, Sphere, Triangle, TriangleMesh,
};
use prism_math::{Aabb, Ray, Vec2};

/// Any object a scene can hold.
///
/// The variant set is closed, so dispatch is a `match` rather than a
/// vtable lookup and primitives can live contiguously in a `Vec`.
#[derive(Debug)]
pub enum Primitive {
    Sphere(Sphere),
    Triangle(Triangle),
    Mesh(TriangleMesh),
}

impl Primitive {
    fn as_hittable(&self) -> &dyn Hittable {
        match self {
            Primitive::Sphere(s) => s,
            Primitive::Triangle(t) => t,
            Primitive::Mesh(m) => m,
        }
    }
}

impl Hittable for Primitive {
    fn ray_cast<'a>(&'a self, ray: &Ray) -> Intersection<'a> {
        match self {
            Primitive::Sphere(s) => s.ray_cast(ray),
            Primitive::Triangle(t) => t.ray_cast(ray),
            Primitive::Mesh(m) => m.ray_cast(ray),
        }
    }

    fn bounds(&self) -> Aabb {
        self.as_hittable().bounds()
    }

    fn surface_properties(&self, hit: &Intersection<'_>) -> SurfaceProperties {
        self.as_hittable().surface_properties(hit)
    }

    fn diffuse_color(&self, st: Vec2) -> Color {
        self.as_hittable().diffuse_color(st)
    }
}

impl From<Sphere> for Primitive {
    fn from(sphere: Sphere) -> Self {
        Primitive::Sphere(sphere)
    }
}

impl From<Triangle> for Primitive {
    fn from(triangle: Triangle) -> Self {
        Primitive::Triangle(triangle)
    }
}

impl From<TriangleMesh> for Primitive {
    fn from(mesh: TriangleMesh) -> Self {
        Primitive::Mesh(mesh)
    }
}
