#![warn(missing_docs)]

//! Mesh data model and parametric surface mapping for veneer.
//!
//! Converts 3D points on a curved mesh surface into 2D parametric (UV)
//! coordinates, and resolves the discontinuity at the wrap seam of a
//! periodic parametric axis:
//!
//! - [`TriMesh`] - triangulated geometry with per-vertex UV/normal attributes
//! - [`CylinderMap`] - closed-form cylindrical mapping and its inverse
//! - [`generic_uv`] - nearest-face UV lookup for arbitrary triangle meshes
//! - [`align_to_anchor`] - seam-aware alignment of UV batches
//!
//! # Example
//!
//! ```
//! use veneer_surface::CylinderMap;
//! use veneer_math::Point2;
//!
//! let map = CylinderMap::new(50.0, 100.0);
//! let p = map.point_at(&Point2::new(0.25, 0.5));
//! let uv = map.uv(&p);
//! assert!((uv.x - 0.25).abs() < 1e-12);
//! assert!((uv.y - 0.5).abs() < 1e-12);
//! ```

mod map;
mod mesh;
mod wrap;

pub use map::{barycentric, cylindrical_uv, generic_uv, surface_normal, CylinderMap};
pub use mesh::TriMesh;
pub use wrap::{align_to_anchor, circular_mean_u};

use thiserror::Error;

/// Errors from mesh queries and UV mapping.
#[derive(Debug, Clone, Error)]
pub enum SurfaceError {
    /// The mesh has no per-vertex UV attribute; generic UV lookup cannot proceed.
    #[error("mesh has no UV attribute")]
    MissingUvs,

    /// The mesh has no per-vertex normal attribute.
    #[error("mesh has no normal attribute")]
    MissingNormals,

    /// The mesh has no vertices or no triangles.
    #[error("mesh is empty")]
    EmptyMesh,

    /// A per-vertex attribute buffer is not parallel to the positions.
    #[error("attribute buffer has {got} entries for {vertices} vertices")]
    AttributeLengthMismatch {
        /// Entries in the offending attribute buffer.
        got: usize,
        /// Entries in the position buffer.
        vertices: usize,
    },

    /// A triangle references a vertex past the end of the position buffer.
    #[error("triangle index {index} out of bounds for {vertices} vertices")]
    IndexOutOfBounds {
        /// The offending vertex index.
        index: u32,
        /// Entries in the position buffer.
        vertices: usize,
    },

    /// The mesh's local-to-world transform is not invertible.
    #[error("mesh transform is singular")]
    SingularTransform,
}
