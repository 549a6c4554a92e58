//! OBJ loading into [`MeshData`].

use std::path::Path;

use anyhow::{bail, Context, Result};
use glint_core::MeshData;
use glint_math::Vec3;

/// Load every model of an OBJ file into one triangle mesh.
///
/// Faces are triangulated and vertices single-indexed; normals, texture
/// coordinates and materials in the file are ignored.
pub fn load_obj<P: AsRef<Path>>(path: P) -> Result<MeshData> {
    let path = path.as_ref();
    let (models, _materials) = tobj::load_obj(
        path,
        &tobj::LoadOptions {
            single_index: true,
            triangulate: true,
            ..Default::default()
        },
    )
    .with_context(|| format!("Failed to load OBJ file {}", path.display()))?;

    if models.is_empty() {
        bail!("No models found in OBJ file {}", path.display());
    }

    let mut positions = Vec::new();
    let mut indices = Vec::new();

    for model in &models {
        let mesh = &model.mesh;
        let base = u32::try_from(positions.len()).context("OBJ file has too many vertices")?;

        positions.extend(mesh.positions.chunks_exact(3).map(Vec3::from_slice));
        indices.extend(mesh.indices.iter().map(|&i| base + i));

        log::debug!(
            "Model '{}': {} vertices, {} triangles",
            model.name,
            mesh.positions.len() / 3,
            mesh.indices.len() / 3
        );
    }

    let mesh = MeshData::from_positions(positions, indices);
    mesh.validate()
        .with_context(|| format!("Invalid mesh in {}", path.display()))?;

    log::info!(
        "Loaded {}: {} vertices, {} triangles",
        path.display(),
        mesh.vertex_count(),
        mesh.triangle_count()
    );
    Ok(mesh)
}
