//! Prism Core - asset import for the Prism renderer.
//!
//! This crate provides:
//!
//! - **Mesh data**: `MeshData`, a flat list of triangle vertices grouped in
//!   threes, each vertex carrying position, normal and texture coordinates
//! - **OBJ support**: Wavefront OBJ loading with polygon triangulation
//!
//! # Example
//!
//! ```ignore
//! use prism_core::load_obj;
//!
//! let mesh = load_obj("models/plane.obj")?;
//! println!("Loaded {} with {} triangles", mesh.name, mesh.triangle_count());
//! ```

pub mod mesh;
pub mod obj;

// Re-export commonly used types
pub use mesh::{MeshData, Vertex};
pub use obj::{load_obj, load_obj_from_str, LoadError, LoadResult};
