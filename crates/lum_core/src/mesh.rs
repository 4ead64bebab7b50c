//! Triangle mesh geometry.
//!
//! Meshes are stored in world space: the loader applies the owning surface's
//! transform to positions and normals once, so the renderer can intersect
//! triangles without moving rays into a local frame.

use std::path::Path;

use lum_math::{Aabb, Transform, Vec2, Vec3};

use crate::loader::{LoadError, LoadResult};

/// A mesh consisting of vertex positions, optional normals and UVs, and
/// triangle index triples.
#[derive(Clone, Debug)]
pub struct Mesh {
    /// Vertex positions (one Vec3 per vertex)
    pub positions: Vec<Vec3>,

    /// Vertex normals (optional, one per vertex)
    pub normals: Option<Vec<Vec3>>,

    /// UV coordinates (optional, one per vertex)
    pub uvs: Option<Vec<Vec2>>,

    /// Triangles as vertex index triples
    pub indices: Vec<[u32; 3]>,

    /// Axis-aligned bounding box of all positions
    pub bounds: Aabb,
}

impl Mesh {
    /// Create a new mesh from positions and triangles, optionally with normals.
    pub fn new(positions: Vec<Vec3>, indices: Vec<[u32; 3]>, normals: Option<Vec<Vec3>>) -> Self {
        Self::new_with_uvs(positions, indices, normals, None)
    }

    /// Create a new mesh with UV coordinates.
    ///
    /// Triangles referencing a missing vertex are dropped with a warning.
    /// Normal or UV arrays whose length differs from the vertex count are
    /// discarded.
    pub fn new_with_uvs(
        positions: Vec<Vec3>,
        indices: Vec<[u32; 3]>,
        normals: Option<Vec<Vec3>>,
        uvs: Option<Vec<Vec2>>,
    ) -> Self {
        let vertex_count = positions.len();

        let indices: Vec<[u32; 3]> = indices
            .into_iter()
            .filter(|tri| {
                let valid = tri.iter().all(|&i| (i as usize) < vertex_count);
                if !valid {
                    log::warn!(
                        "Invalid triangle indices: {:?}, vertex count: {}",
                        tri,
                        vertex_count
                    );
                }
                valid
            })
            .collect();

        let normals = normals.filter(|n| {
            let matches = n.len() == vertex_count;
            if !matches {
                log::debug!(
                    "Normals array length ({}) doesn't match vertex count ({}), ignoring normals",
                    n.len(),
                    vertex_count
                );
            }
            matches
        });
        let uvs = uvs.filter(|uv| uv.len() == vertex_count);

        let bounds = Aabb::enclosing(positions.iter().copied());
        Self {
            positions,
            normals,
            uvs,
            indices,
            bounds,
        }
    }

    /// Load a Wavefront OBJ file and place it in the world with `xform`.
    ///
    /// Faces are triangulated and every model in the file is merged into one
    /// mesh. Normals are kept only if every model provides them; the same
    /// holds for texture coordinates.
    pub fn load_obj<P: AsRef<Path>>(path: P, xform: &Transform) -> LoadResult<Self> {
        let path = path.as_ref();
        let (models, _materials) = tobj::load_obj(
            path,
            &tobj::LoadOptions {
                single_index: true,
                triangulate: true,
                ..Default::default()
            },
        )
        .map_err(|source| LoadError::Obj {
            path: path.to_path_buf(),
            source,
        })?;

        let has_normals = models
            .iter()
            .all(|m| m.mesh.normals.len() == m.mesh.positions.len());
        let has_uvs = models
            .iter()
            .all(|m| m.mesh.texcoords.len() / 2 == m.mesh.positions.len() / 3);

        let mut positions = Vec::new();
        let mut normals = Vec::new();
        let mut uvs = Vec::new();
        let mut indices = Vec::new();

        for model in &models {
            let mesh = &model.mesh;
            let base = positions.len() as u32;

            positions.extend(
                mesh.positions
                    .chunks_exact(3)
                    .map(|p| xform.point(Vec3::from_slice(p))),
            );
            if has_normals {
                normals.extend(
                    mesh.normals
                        .chunks_exact(3)
                        .map(|n| xform.normal(Vec3::from_slice(n))),
                );
            }
            if has_uvs {
                uvs.extend(mesh.texcoords.chunks_exact(2).map(Vec2::from_slice));
            }
            indices.extend(
                mesh.indices
                    .chunks_exact(3)
                    .map(|f| [base + f[0], base + f[1], base + f[2]]),
            );
        }

        log::debug!(
            "Loaded {}: {} models, {} vertices, {} triangles",
            path.display(),
            models.len(),
            positions.len(),
            indices.len()
        );

        Ok(Self::new_with_uvs(
            positions,
            indices,
            has_normals.then_some(normals),
            has_uvs.then_some(uvs),
        ))
    }

    /// Check if the mesh has normals.
    pub fn has_normals(&self) -> bool {
        self.normals.is_some()
    }

    /// Check if the mesh has UV coordinates.
    pub fn has_uvs(&self) -> bool {
        self.uvs.is_some()
    }

    /// Get the number of triangles in the mesh.
    pub fn triangle_count(&self) -> usize {
        self.indices.len()
    }

    /// Get the number of vertices in the mesh.
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Vertex positions of triangle `i`.
    pub fn triangle_vertices(&self, i: usize) -> [Vec3; 3] {
        self.indices[i].map(|v| self.positions[v as usize])
    }

    /// Bounding box of triangle `i`.
    pub fn triangle_bounds(&self, i: usize) -> Aabb {
        Aabb::enclosing(self.triangle_vertices(i))
    }
}
