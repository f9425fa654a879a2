//! Triangle and triangle-mesh primitives.
//!
//! Uses the Möller-Trumbore algorithm for ray-triangle intersection.

use std::sync::Arc;

use crate::{
    hittable::{closest_hit, Hittable, Intersection, SurfaceProperties},
    Bvh, Color, Material,
};
use prism_core::{MeshData, Vertex};
use prism_math::{Aabb, Ray, Vec2, Vec3};

/// A single triangle.
///
/// Only the front face (counter-clockwise winding as seen by the ray) is
/// hit; rays travelling along the face normal pass through.
#[derive(Debug)]
pub struct Triangle {
    /// Vertices
    v0: Vec3,
    v1: Vec3,
    v2: Vec3,
    /// Edges from v0
    e1: Vec3,
    e2: Vec3,
    /// Pre-computed face normal (unit length, zero if degenerate)
    normal: Vec3,
    /// Per-vertex texture coordinates
    st0: Vec2,
    st1: Vec2,
    st2: Vec2,
    material: Arc<Material>,
    bbox: Aabb,
}

impl Triangle {
    /// Create a triangle from three imported vertices.
    pub fn new(v0: Vertex, v1: Vertex, v2: Vertex, material: Arc<Material>) -> Self {
        let mut tri = Self::from_positions(v0.position, v1.position, v2.position, material);
        tri.st0 = v0.uv;
        tri.st1 = v1.uv;
        tri.st2 = v2.uv;
        tri
    }

    /// Create an untextured triangle from three positions.
    pub fn from_positions(v0: Vec3, v1: Vec3, v2: Vec3, material: Arc<Material>) -> Self {
        let e1 = v1 - v0;
        let e2 = v2 - v0;

        Self {
            v0,
            v1,
            v2,
            e1,
            e2,
            normal: e1.cross(e2).normalize_or_zero(),
            st0: Vec2::ZERO,
            st1: Vec2::ZERO,
            st2: Vec2::ZERO,
            material,
            bbox: Aabb::from_iter_points([v0, v1, v2]),
        }
    }

    pub fn vertices(&self) -> [Vec3; 3] {
        [self.v0, self.v1, self.v2]
    }

    pub fn normal(&self) -> Vec3 {
        self.normal
    }
}

impl Hittable for Triangle {
    /// Möller-Trumbore ray-triangle intersection algorithm.
    fn ray_cast<'a>(&'a self, ray: &Ray) -> Intersection<'a> {
        // Back faces are culled
        if ray.direction().dot(self.normal) > 0.0 {
            return Intersection::NONE;
        }

        let s0 = ray.origin() - self.v0;
        let s1 = ray.direction().cross(self.e2);
        let s2 = s0.cross(self.e1);

        // Parallel ray or degenerate triangle
        let det = s1.dot(self.e1);
        if det <= 0.0 {
            return Intersection::NONE;
        }

        let inv_det = 1.0 / det;
        let t = s2.dot(self.e2) * inv_det;
        let u = s1.dot(s0) * inv_det;
        let v = s2.dot(ray.direction()) * inv_det;

        if t < 0.0 || u < 0.0 || v < 0.0 || u + v > 1.0 {
            return Intersection::NONE;
        }

        Intersection {
            happened: true,
            coords: ray.at(t),
            normal: self.normal,
            uv: Vec2::new(u, v),
            distance: t,
            object: Some(self as &dyn Hittable),
            material: Some(self.material.as_ref()),
        }
    }

    fn bounds(&self) -> Aabb {
        self.bbox
    }

    fn surface_properties(&self, hit: &Intersection<'_>) -> SurfaceProperties {
        let (u, v) = (hit.uv.x, hit.uv.y);
        SurfaceProperties {
            normal: self.normal,
            st: self.st0 * (1.0 - u - v) + self.st1 * u + self.st2 * v,
        }
    }

    fn diffuse_color(&self, _st: Vec2) -> Color {
        self.material.color()
    }
}

/// A triangle mesh sharing one material.
///
/// Owns its triangles and, when built with an index, a BVH over them. Hits
/// report the individual triangle as the hit object.
#[derive(Debug)]
pub struct TriangleMesh {
    triangles: Vec<Triangle>,
    bvh: Option<Bvh>,
    material: Arc<Material>,
    bbox: Aabb,
}

impl TriangleMesh {
    /// Wrap every vertex triple of an imported mesh into a triangle.
    pub fn new(mesh: &MeshData, material: Arc<Material>, use_bvh: bool) -> Self {
        let triangles = mesh
            .triangles()
            .map(|[a, b, c]| Triangle::new(a, b, c, Arc::clone(&material)))
            .collect();

        Self::from_triangles(triangles, material, use_bvh)
    }

    /// Build a mesh from already constructed triangles.
    pub fn from_triangles(triangles: Vec<Triangle>, material: Arc<Material>, use_bvh: bool) -> Self {
        let bbox = triangles
            .iter()
            .fold(Aabb::EMPTY, |acc, tri| Aabb::surrounding(&acc, &tri.bounds()));
        let bvh = use_bvh.then(|| Bvh::new(&triangles));

        Self {
            triangles,
            bvh,
            material,
            bbox,
        }
    }

    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    pub fn len(&self) -> usize {
        self.triangles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    pub fn has_bvh(&self) -> bool {
        self.bvh.is_some()
    }

    pub fn material(&self) -> &Arc<Material> {
        &self.material
    }
}

impl Hittable for TriangleMesh {
    fn ray_cast<'a>(&'a self, ray: &Ray) -> Intersection<'a> {
        match &self.bvh {
            Some(bvh) => bvh.ray_cast(&self.triangles, ray),
            None => closest_hit(&self.triangles, ray),
        }
    }

    fn bounds(&self) -> Aabb {
        self.bbox
    }

    fn surface_properties(&self, hit: &Intersection<'_>) -> SurfaceProperties {
        SurfaceProperties {
            normal: hit.normal,
            st: hit.uv,
        }
    }

    fn diffuse_color(&self, _st: Vec2) -> Color {
        Color::splat(0.5)
    }
}
