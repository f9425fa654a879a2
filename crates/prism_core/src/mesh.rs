//! Triangle soup produced by asset import.
//!
//! The renderer does not care about shared vertices or index buffers: every
//! triangle is stored as three complete vertices, in file order.

use prism_math::{Aabb, Vec2, Vec3};

/// A single mesh vertex.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Vertex {
    pub position: Vec3,
    pub normal: Vec3,
    pub uv: Vec2,
}

impl Vertex {
    pub fn new(position: Vec3, normal: Vec3, uv: Vec2) -> Self {
        Self {
            position,
            normal,
            uv,
        }
    }
}

/// An imported mesh as a flat, already triangulated vertex list.
///
/// `vertices.len()` is always a multiple of three; vertices `3i`, `3i+1`,
/// `3i+2` form triangle `i`.
#[derive(Clone, Debug, Default)]
pub struct MeshData {
    /// Model name from the source file (may be empty)
    pub name: String,

    /// Triangle vertices, three per triangle
    pub vertices: Vec<Vertex>,
}

impl MeshData {
    /// Create a mesh from a flat vertex list.
    ///
    /// Trailing vertices that do not complete a triangle are dropped.
    pub fn new(name: impl Into<String>, mut vertices: Vec<Vertex>) -> Self {
        let complete = vertices.len() - vertices.len() % 3;
        if complete != vertices.len() {
            log::warn!(
                "Dropping {} trailing vertices that do not form a triangle",
                vertices.len() - complete
            );
            vertices.truncate(complete);
        }

        Self {
            name: name.into(),
            vertices,
        }
    }

    /// Number of triangles in the mesh.
    pub fn triangle_count(&self) -> usize {
        self.vertices.len() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Iterate over the triangles as vertex triples.
    pub fn triangles(&self) -> impl Iterator<Item = [Vertex; 3]> + '_ {
        self.vertices
            .chunks_exact(3)
            .map(|tri| [tri[0], tri[1], tri[2]])
    }

    /// Axis-aligned bounds of all vertex positions.
    pub fn bounds(&self) -> Aabb {
        Aabb::from_iter_points(self.vertices.iter().map(|v| v.position))
    }
}

/// Unit face normal of a triangle with counter-clockwise winding.
///
/// Degenerate triangles yield a zero vector.
pub fn face_normal(p0: Vec3, p1: Vec3, p2: Vec3) -> Vec3 {
    (p1 - p0).cross(p2 - p0).normalize_or_zero()
}
