#![warn(missing_docs)]

//! Interactive surface texture-painting facade for veneer.
//!
//! Provides the [`PaintSession`] type — the primary interface for drawing
//! closed freehand paths on a parametrically mapped surface and resolving
//! texture drops into masked regions or free decals.
//!
//! # Example
//!
//! ```
//! use veneer::{CylinderMap, PaintSession, TriMesh};
//!
//! let mesh = TriMesh::cylinder(50.0, 100.0, 32);
//! let map = CylinderMap::new(50.0, 100.0);
//! let session = PaintSession::new(mesh, map);
//! assert!(session.saved_paths().is_empty());
//! ```

pub use veneer_decal;
pub use veneer_math;
pub use veneer_region;
pub use veneer_surface;

mod session;
mod texture;

pub use session::{
    DecalId, DropOutcome, FreeDecal, MaskedAssociation, PaintSession, PathId, Picker, SavedPath,
    SurfaceHit, TextureId,
};
pub use texture::{LoadTicket, TextureError, TextureSlot};

pub use veneer_decal::{
    DecalError, DecalPlacement, MaskBitmap, MaskedRegion, PixelBuffer, RegionParams, Rgba,
    UvBounds,
};
pub use veneer_math::{Point2, Point3, Tolerance, Transform, Vec2, Vec3};
pub use veneer_region::StrokeRecorder;
pub use veneer_surface::{CylinderMap, SurfaceError, TriMesh};
