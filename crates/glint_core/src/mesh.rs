//! Mesh input for the ray tracer.
//!
//! `MeshData` is what a mesh loader hands to the renderer: vertex positions,
//! a flat list of triangle indices and the min/max corners of the mesh. The
//! renderer builds its triangle list and culling box purely from these.

use glint_math::Vec3;
use thiserror::Error;

/// Slack allowed when checking the reported bounds against the vertices.
pub const BOUNDS_TOLERANCE: f32 = 1e-4;

/// Errors found while validating loader output.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MeshError {
    #[error("Index count {0} is not a multiple of 3")]
    IncompleteTriangle(usize),

    #[error("Triangle {triangle} references vertex {index}, but the mesh has {vertex_count} vertices")]
    IndexOutOfRange {
        triangle: usize,
        index: u32,
        vertex_count: usize,
    },

    #[error("Vertex {vertex} at {position:?} lies outside the reported mesh bounds")]
    BoundsDoNotContain { vertex: usize, position: Vec3 },
}

/// Result type for mesh operations.
pub type MeshResult<T> = Result<T, MeshError>;

/// Triangle soup produced by a mesh loader.
#[derive(Clone, Debug, Default)]
pub struct MeshData {
    /// Vertex positions (one Vec3 per vertex)
    pub positions: Vec<Vec3>,

    /// Triangle indices (every 3 indices form a triangle)
    pub indices: Vec<u32>,

    /// Minimum corner as reported by the loader
    pub min: Vec3,

    /// Maximum corner as reported by the loader
    pub max: Vec3,
}

impl MeshData {
    /// Create mesh data from loader output, trusting the reported bounds.
    pub fn new(positions: Vec<Vec3>, indices: Vec<u32>, min: Vec3, max: Vec3) -> Self {
        Self {
            positions,
            indices,
            min,
            max,
        }
    }

    /// Create mesh data and compute the bounds from the positions.
    pub fn from_positions(positions: Vec<Vec3>, indices: Vec<u32>) -> Self {
        let (min, max) = Self::compute_bounds(&positions);
        Self::new(positions, indices, min, max)
    }

    /// Compute min/max corners from positions.
    fn compute_bounds(positions: &[Vec3]) -> (Vec3, Vec3) {
        if positions.is_empty() {
            return (Vec3::ZERO, Vec3::ZERO);
        }

        positions.iter().fold(
            (Vec3::splat(f32::INFINITY), Vec3::splat(f32::NEG_INFINITY)),
            |(min, max), p| (min.min(*p), max.max(*p)),
        )
    }

    /// Get the number of triangles in the mesh.
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Get the number of vertices in the mesh.
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Returns true if the mesh has no triangles.
    pub fn is_empty(&self) -> bool {
        self.triangle_count() == 0
    }

    /// Get the mesh center (center of the reported bounds).
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Get the mesh size (diagonal length of the reported bounds).
    pub fn size(&self) -> f32 {
        (self.max - self.min).length()
    }

    /// Iterate over triangles as vertex triples.
    ///
    /// Triangles with an out-of-range index are skipped; call
    /// [`MeshData::validate`] first to turn those into an error instead.
    pub fn triangles(&self) -> impl Iterator<Item = [Vec3; 3]> + '_ {
        self.indices.chunks_exact(3).filter_map(|face| {
            let v0 = *self.positions.get(face[0] as usize)?;
            let v1 = *self.positions.get(face[1] as usize)?;
            let v2 = *self.positions.get(face[2] as usize)?;
            Some([v0, v1, v2])
        })
    }

    /// Return a copy with every vertex and both corners moved by `offset`.
    pub fn translated(&self, offset: Vec3) -> Self {
        Self {
            positions: self.positions.iter().map(|p| *p + offset).collect(),
            indices: self.indices.clone(),
            min: self.min + offset,
            max: self.max + offset,
        }
    }

    /// Reported corners grown by [`BOUNDS_TOLERANCE`].
    ///
    /// Any mesh that passes [`MeshData::validate`] has every vertex inside
    /// these corners.
    pub fn culling_bounds(&self) -> (Vec3, Vec3) {
        let slack = Vec3::splat(BOUNDS_TOLERANCE);
        (self.min - slack, self.max + slack)
    }

    /// Check the loader output before the renderer relies on it.
    ///
    /// The reported bounds gate every triangle test, so bounds that do not
    /// contain all vertices would silently drop valid hits.
    pub fn validate(&self) -> MeshResult<()> {
        if self.indices.len() % 3 != 0 {
            return Err(MeshError::IncompleteTriangle(self.indices.len()));
        }

        let vertex_count = self.positions.len();
        for (triangle, face) in self.indices.chunks_exact(3).enumerate() {
            if let Some(&index) = face.iter().find(|&&i| i as usize >= vertex_count) {
                return Err(MeshError::IndexOutOfRange {
                    triangle,
                    index,
                    vertex_count,
                });
            }
        }

        let (lo, hi) = self.culling_bounds();
        for (vertex, &position) in self.positions.iter().enumerate() {
            if position.cmplt(lo).any() || position.cmpgt(hi).any() {
                return Err(MeshError::BoundsDoNotContain { vertex, position });
            }
        }

        log::debug!(
            "Mesh validated: {} vertices, {} triangles",
            vertex_count,
            self.triangle_count()
        );
        Ok(())
    }
}
