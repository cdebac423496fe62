#![warn(missing_docs)]

//! Decal placement and masked-region texture synthesis for veneer.
//!
//! A *decal* is a texture application localized to a bounded sub-region of
//! a larger surface. Two variants:
//!
//! - [`DecalPlacement`] - a free decal: a single oriented sticker placed at
//!   a surface hit point
//! - [`MaskedRegion`] - a masked region decal: a texture tiled and clipped
//!   to the interior of a user-drawn closed path, driven by a rasterized
//!   [`MaskBitmap`] and realized through the per-pixel [`MaskedRegion::shade`]
//!   contract
//!
//! # Example
//!
//! ```
//! use veneer_decal::{MaskedRegion, RegionParams, PixelBuffer};
//! use veneer_surface::CylinderMap;
//! use veneer_math::{Point2, Point3};
//!
//! let map = CylinderMap::new(50.0, 100.0);
//! // A rectangle of surface points around u in [0.4, 0.6], v in [0.3, 0.7]
//! let path: Vec<Point3> = [(0.4, 0.3), (0.6, 0.3), (0.6, 0.7), (0.4, 0.7)]
//!     .iter()
//!     .map(|&(u, v)| map.point_at(&Point2::new(u, v)))
//!     .collect();
//! let region = MaskedRegion::synthesize(&path, &map, &RegionParams::default()).unwrap();
//! let base = PixelBuffer::solid(4, 4, [255, 0, 0, 255]);
//! let inside = map.point_at(&Point2::new(0.5, 0.5));
//! assert!(region.shade(&inside, &base).is_some());
//! ```

mod mask;
mod placement;
mod region;
mod texture;

pub use mask::{MaskBitmap, UvBounds};
pub use placement::{path_centroid, path_diameter, DecalPlacement};
pub use region::{MaskedRegion, RegionParams};
pub use texture::{PixelBuffer, Rgba};

use thiserror::Error;

/// Errors from decal synthesis.
#[derive(Debug, Clone, Error)]
pub enum DecalError {
    /// The path has too few points to bound a region.
    #[error("path with {0} points is not a region (need at least 3)")]
    DegeneratePath(usize),

    /// The path's UV bounding box has zero width or height; mask-space
    /// projection would divide by zero.
    #[error("path collapses to a zero-area UV bounding box")]
    DegenerateBounds,
}
