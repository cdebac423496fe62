//! Triangulated mesh data model.

use std::f64::consts::PI;
use veneer_math::{Point2, Point3, Transform, Vec3};

use crate::SurfaceError;

/// A triangulated surface with optional per-vertex attributes.
///
/// This is the mesh-provider contract the mapping code consumes: a vertex
/// position array, optional parallel UV and normal arrays, and an optional
/// triangle index array. If the index array is absent, vertices are grouped
/// implicitly in consecutive triples.
#[derive(Debug, Clone)]
pub struct TriMesh {
    /// Vertex positions in mesh-local space.
    pub positions: Vec<Point3>,
    /// Per-vertex UV coordinates, parallel to `positions`.
    pub uvs: Option<Vec<Point2>>,
    /// Per-vertex normals, parallel to `positions`.
    pub normals: Option<Vec<Vec3>>,
    /// Triangle index array. `None` means implicit grouping in triples.
    pub indices: Option<Vec<[u32; 3]>>,
    local_to_world: Transform,
    world_to_local: Transform,
}

impl TriMesh {
    /// Create a mesh from buffers and a local-to-world transform.
    ///
    /// # Errors
    ///
    /// Returns [`SurfaceError::EmptyMesh`] for an empty position buffer,
    /// [`SurfaceError::AttributeLengthMismatch`] when a UV or normal buffer
    /// is not parallel to the positions,
    /// [`SurfaceError::IndexOutOfBounds`] when a triangle references a
    /// missing vertex, and [`SurfaceError::SingularTransform`] when the
    /// transform cannot be inverted (the inverse is needed for
    /// world-to-local queries).
    pub fn new(
        positions: Vec<Point3>,
        uvs: Option<Vec<Point2>>,
        normals: Option<Vec<Vec3>>,
        indices: Option<Vec<[u32; 3]>>,
        local_to_world: Transform,
    ) -> Result<Self, SurfaceError> {
        if positions.is_empty() {
            return Err(SurfaceError::EmptyMesh);
        }
        let vertices = positions.len();
        if let Some(uvs) = &uvs {
            if uvs.len() != vertices {
                return Err(SurfaceError::AttributeLengthMismatch {
                    got: uvs.len(),
                    vertices,
                });
            }
        }
        if let Some(normals) = &normals {
            if normals.len() != vertices {
                return Err(SurfaceError::AttributeLengthMismatch {
                    got: normals.len(),
                    vertices,
                });
            }
        }
        if let Some(indices) = &indices {
            for tri in indices {
                for &index in tri {
                    if index as usize >= vertices {
                        return Err(SurfaceError::IndexOutOfBounds { index, vertices });
                    }
                }
            }
        }
        let world_to_local = local_to_world
            .inverse()
            .ok_or(SurfaceError::SingularTransform)?;
        Ok(Self {
            positions,
            uvs,
            normals,
            indices,
            local_to_world,
            world_to_local,
        })
    }

    /// Number of triangle faces.
    pub fn face_count(&self) -> usize {
        match &self.indices {
            Some(idx) => idx.len(),
            None => self.positions.len() / 3,
        }
    }

    /// Vertex indices of face `i`.
    pub fn face(&self, i: usize) -> [u32; 3] {
        match &self.indices {
            Some(idx) => idx[i],
            None => {
                let base = (i * 3) as u32;
                [base, base + 1, base + 2]
            }
        }
    }

    /// Transform a world-space point into mesh-local space.
    pub fn world_to_local(&self, p: &Point3) -> Point3 {
        self.world_to_local.apply_point(p)
    }

    /// Transform a mesh-local point into world space.
    pub fn local_to_world(&self, p: &Point3) -> Point3 {
        self.local_to_world.apply_point(p)
    }

    /// Transform a mesh-local normal into world space (normalized).
    pub fn normal_to_world(&self, n: &Vec3) -> Vec3 {
        self.local_to_world.apply_normal(n).normalize()
    }

    /// Build an open cylindrical tube centered at the origin, axis along Y.
    ///
    /// UVs follow the cylindrical convention of
    /// [`cylindrical_uv`](crate::cylindrical_uv): u wraps around the axis,
    /// v runs from the bottom rim (0) to the top rim (1). The seam is
    /// duplicated so each ring has `radial_segments + 1` vertices.
    pub fn cylinder(radius: f64, height: f64, radial_segments: u32) -> Self {
        let segs = radial_segments.max(3) as usize;
        let ring = segs + 1;

        let mut positions = Vec::with_capacity(ring * 2);
        let mut uvs = Vec::with_capacity(ring * 2);
        let mut normals = Vec::with_capacity(ring * 2);

        for v_step in 0..2 {
            let v = v_step as f64;
            let y = v * height - height / 2.0;
            for s in 0..ring {
                let u = s as f64 / segs as f64;
                let theta = u * 2.0 * PI - PI;
                let (sin_t, cos_t) = theta.sin_cos();
                positions.push(Point3::new(radius * sin_t, y, radius * cos_t));
                uvs.push(Point2::new(u, v));
                normals.push(Vec3::new(sin_t, 0.0, cos_t));
            }
        }

        let mut indices = Vec::with_capacity(segs * 2);
        for s in 0..segs as u32 {
            let b0 = s;
            let b1 = s + 1;
            let t0 = ring as u32 + s;
            let t1 = ring as u32 + s + 1;
            indices.push([b0, b1, t0]);
            indices.push([b1, t1, t0]);
        }

        // Identity transform is always invertible
        Self::new(
            positions,
            Some(uvs),
            Some(normals),
            Some(indices),
            Transform::identity(),
        )
        .unwrap()
    }
}
