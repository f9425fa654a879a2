//! Wavefront OBJ import.
//!
//! Polygons are fan-triangulated by `tobj` and every face is flattened into
//! three full vertices. Exactly one mesh per source is accepted.

use std::io::BufReader;
use std::path::Path;

use prism_math::{Vec2, Vec3};
use thiserror::Error;

use crate::mesh::{face_normal, MeshData, Vertex};

/// Errors that can occur during OBJ loading.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("OBJ error: {0}")]
    Obj(#[from] tobj::LoadError),

    #[error("Expected exactly one mesh, found {0}")]
    MeshCount(usize),

    #[error("Face index count {0} is not a multiple of 3")]
    NotTriangulated(usize),

    #[error("Vertex index {0} out of range")]
    IndexOutOfRange(u32),
}

pub type LoadResult<T> = Result<T, LoadError>;

fn load_options() -> tobj::LoadOptions {
    tobj::LoadOptions {
        single_index: true,
        triangulate: true,
        ..Default::default()
    }
}

/// Load a single-mesh OBJ file from disk.
pub fn load_obj(path: impl AsRef<Path>) -> LoadResult<MeshData> {
    let path = path.as_ref();
    let (models, _materials) = tobj::load_obj(path, &load_options())?;
    let mesh = mesh_from_models(models)?;

    log::info!(
        "Loaded {} ('{}'): {} triangles",
        path.display(),
        mesh.name,
        mesh.triangle_count()
    );

    Ok(mesh)
}

/// Load a single-mesh OBJ from an in-memory string.
///
/// `mtllib` references are not followed.
pub fn load_obj_from_str(source: &str) -> LoadResult<MeshData> {
    let mut reader = BufReader::new(source.as_bytes());
    let (models, _materials) = tobj::load_obj_buf(&mut reader, &load_options(), |_| {
        Err(tobj::LoadError::OpenFileFailed)
    })?;

    mesh_from_models(models)
}

fn mesh_from_models(mut models: Vec<tobj::Model>) -> LoadResult<MeshData> {
    // tobj reports a faceless placeholder model for sources without faces
    models.retain(|m| !m.mesh.indices.is_empty());
    if models.len() != 1 {
        return Err(LoadError::MeshCount(models.len()));
    }
    let model = models.remove(0);
    let mesh = &model.mesh;

    if mesh.indices.len() % 3 != 0 {
        return Err(LoadError::NotTriangulated(mesh.indices.len()));
    }

    let has_normals = !mesh.normals.is_empty();
    let has_uvs = !mesh.texcoords.is_empty();
    if !has_normals {
        log::debug!("Mesh '{}' has no normals, using face normals", model.name);
    }
    if !has_uvs {
        log::debug!("Mesh '{}' has no texture coordinates", model.name);
    }

    let mut vertices = Vec::with_capacity(mesh.indices.len());

    for face in mesh.indices.chunks_exact(3) {
        let positions = [
            vec3_at(&mesh.positions, face[0])?,
            vec3_at(&mesh.positions, face[1])?,
            vec3_at(&mesh.positions, face[2])?,
        ];
        let flat_normal = face_normal(positions[0], positions[1], positions[2]);

        for (&index, position) in face.iter().zip(positions) {
            let normal = if has_normals {
                vec3_at(&mesh.normals, index)?
            } else {
                flat_normal
            };
            let uv = if has_uvs {
                vec2_at(&mesh.texcoords, index)?
            } else {
                Vec2::ZERO
            };
            vertices.push(Vertex::new(position, normal, uv));
        }
    }

    Ok(MeshData::new(model.name, vertices))
}

fn vec3_at(data: &[f32], index: u32) -> LoadResult<Vec3> {
    let start = index as usize * 3;
    data.get(start..start + 3)
        .map(Vec3::from_slice)
        .ok_or(LoadError::IndexOutOfRange(index))
}

fn vec2_at(data: &[f32], index: u32) -> LoadResult<Vec2> {
    let start = index as usize * 2;
    data.get(start..start + 2)
        .map(Vec2::from_slice)
        .ok_or(LoadError::IndexOutOfRange(index))
}
