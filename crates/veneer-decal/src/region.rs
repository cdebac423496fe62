//! Masked-region synthesis: tiling a texture into a closed path's interior.

use veneer_math::{Point2, Point3, Vec2};
use veneer_surface::{align_to_anchor, CylinderMap};

use crate::mask::{MaskBitmap, UvBounds};
use crate::placement::{path_centroid, path_diameter};
use crate::texture::{PixelBuffer, Rgba};
use crate::DecalError;

/// UV extents below this are treated as a collapsed bounding box.
const MIN_UV_EXTENT: f64 = 1e-9;

/// Synthesis parameters for a masked region.
#[derive(Debug, Clone, Copy)]
pub struct RegionParams {
    /// Mask bitmap resolution (edge length in pixels).
    pub mask_size: usize,
    /// Physical surface distance covered by one texture tile.
    pub tile_size: f64,
    /// Fraction of each tile shaved off every border before sampling the
    /// source texture, so tiled sampling never reads the texture's own
    /// edge texels.
    pub edge_padding: f64,
}

impl Default for RegionParams {
    fn default() -> Self {
        Self {
            mask_size: 512,
            tile_size: 16.0,
            edge_padding: 0.02,
        }
    }
}

/// A texture region synthesized for one (closed path, texture drop)
/// pairing.
///
/// Holds everything the per-pixel stage needs: the mask bitmap, the UV
/// window of the path, the tile repeat factors derived from real-world
/// surface coverage, and the projection-volume measures (centroid and
/// diameter) for the renderer. The mask lives exactly as long as this
/// value; recreating the association regenerates it.
#[derive(Debug, Clone)]
pub struct MaskedRegion {
    /// Path centroid in mesh-local space (projection volume center).
    pub centroid: Point3,
    /// Maximum pairwise path distance (projection volume extent).
    pub diameter: f64,
    /// Wrap-aligned UV bounding box of the path.
    pub bounds: UvBounds,
    /// Rasterized inside/outside mask.
    pub mask: MaskBitmap,
    /// Tile repeat factors along u and v.
    pub tile: Vec2,
    /// Edge padding fraction per tile.
    pub edge_padding: f64,
    map: CylinderMap,
    anchor_u: f64,
}

impl MaskedRegion {
    /// Build a masked region for a closed path on a cylindrical surface.
    ///
    /// Maps the path into parametric space, wrap-aligns it against the
    /// centroid's own u, rasterizes the mask over the aligned bounding
    /// box, and derives the tile factors from the box's physical surface
    /// extents divided by the intended tile size.
    ///
    /// # Errors
    ///
    /// [`DecalError::DegeneratePath`] for fewer than 3 points;
    /// [`DecalError::DegenerateBounds`] when the path collapses to a
    /// zero-width or zero-height UV box.
    pub fn synthesize(
        path: &[Point3],
        map: &CylinderMap,
        params: &RegionParams,
    ) -> Result<Self, DecalError> {
        if path.len() < 3 {
            return Err(DecalError::DegeneratePath(path.len()));
        }

        let centroid = path_centroid(path);
        let diameter = path_diameter(path);

        let uvs: Vec<Point2> = path.iter().map(|p| map.uv(p)).collect();
        let anchor_u = map.uv(&centroid).x;
        let aligned = align_to_anchor(&uvs, anchor_u);

        // Non-empty by the length check above
        let bounds = UvBounds::of(&aligned).unwrap();
        if bounds.width() < MIN_UV_EXTENT || bounds.height() < MIN_UV_EXTENT {
            return Err(DecalError::DegenerateBounds);
        }

        let mask = MaskBitmap::rasterize(&aligned, &bounds, params.mask_size);

        let tile = Vec2::new(
            map.world_width(bounds.width()) / params.tile_size,
            map.world_height(bounds.height()) / params.tile_size,
        );

        Ok(Self {
            centroid,
            diameter,
            bounds,
            mask,
            tile,
            edge_padding: params.edge_padding,
            map: *map,
            anchor_u,
        })
    }

    /// Mask-space offset uniform: the UV box minimum corner.
    pub fn uv_offset(&self) -> Vec2 {
        Vec2::new(self.bounds.min_u, self.bounds.min_v)
    }

    /// Mask-space scale uniform: the UV box extents.
    pub fn uv_scale(&self) -> Vec2 {
        Vec2::new(self.bounds.width(), self.bounds.height())
    }

    /// The per-pixel shading contract.
    ///
    /// For a surface point inside the projection volume: recompute its
    /// parametric coordinate with the same mapping used at synthesis time
    /// (aligned to the same anchor), project into mask space, and
    ///
    /// - discard (`None`) outside the `[0, 1]²` mask window,
    /// - discard where the mask reads outside,
    /// - otherwise tile the mask coordinate (`fract(uv · tile)`), inset by
    ///   the edge padding, and sample the source texture there.
    ///
    /// The result is `Some` exactly on the subset of the surface whose
    /// parametric projection falls inside the wrap-aligned path polygon
    /// (up to mask raster resolution), regardless of the projection
    /// volume's literal 3D extent.
    pub fn shade(&self, surface_point: &Point3, base: &PixelBuffer) -> Option<Rgba> {
        let uv = self.map.uv(surface_point);
        let aligned = align_to_anchor(std::slice::from_ref(&uv), self.anchor_u);
        let norm = self.bounds.normalize(&aligned[0]);

        if !(0.0..=1.0).contains(&norm.x) || !(0.0..=1.0).contains(&norm.y) {
            return None;
        }
        // The mask is stored raster-style, top row = max v
        if !self.mask.inside(norm.x, 1.0 - norm.y) {
            return None;
        }

        let fract = |x: f64| x - x.floor();
        let tiled_u = fract(norm.x * self.tile.x);
        let tiled_v = fract(norm.y * self.tile.y);

        let pad = self.edge_padding;
        let padded_u = pad + tiled_u * (1.0 - 2.0 * pad);
        let padded_v = pad + tiled_v * (1.0 - 2.0 * pad);

        // Pixel buffers are top-left origin while parametric v grows upward
        Some(base.sample(padded_u, 1.0 - padded_v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_params() -> RegionParams {
        RegionParams {
            mask_size: 64,
            tile_size: 16.0,
            edge_padding: 0.02,
        }
    }

    fn rect_path(map: &CylinderMap, u0: f64, u1: f64, v0: f64, v1: f64) -> Vec<Point3> {
        [(u0, v0), (u1, v0), (u1, v1), (u0, v1)]
            .iter()
            .map(|&(u, v)| map.point_at(&Point2::new(u, v)))
            .collect()
    }

    #[test]
    fn test_two_point_path_rejected() {
        let map = CylinderMap::new(50.0, 100.0);
        let path = vec![Point3::new(0.0, 0.0, 50.0), Point3::new(1.0, 0.0, 50.0)];
        assert!(matches!(
            MaskedRegion::synthesize(&path, &map, &test_params()),
            Err(DecalError::DegeneratePath(2))
        ));
    }

    #[test]
    fn test_collapsed_bounds_rejected() {
        let map = CylinderMap::new(50.0, 100.0);
        // Three points on one vertical rule of the cylinder: zero u extent
        let path = vec![
            map.point_at(&Point2::new(0.5, 0.1)),
            map.point_at(&Point2::new(0.5, 0.5)),
            map.point_at(&Point2::new(0.5, 0.9)),
        ];
        assert!(matches!(
            MaskedRegion::synthesize(&path, &map, &test_params()),
            Err(DecalError::DegenerateBounds)
        ));
    }

    #[test]
    fn test_tile_factors_scale_with_tile_size() {
        let map = CylinderMap::new(50.0, 100.0);
        let path = rect_path(&map, 0.2, 0.4, 0.3, 0.7);

        let small = MaskedRegion::synthesize(&path, &map, &test_params()).unwrap();
        let mut doubled = test_params();
        doubled.tile_size *= 2.0;
        let large = MaskedRegion::synthesize(&path, &map, &doubled).unwrap();

        assert!((small.tile.x - 2.0 * large.tile.x).abs() < 1e-10);
        assert!((small.tile.y - 2.0 * large.tile.y).abs() < 1e-10);

        // Absolute check: 0.2 of the circumference of a radius-50 cylinder
        let world_w = 0.2 * 2.0 * std::f64::consts::PI * 50.0;
        assert!((small.tile.x - world_w / 16.0).abs() < 1e-10);
    }

    #[test]
    fn test_shade_inside_and_outside() {
        let map = CylinderMap::new(50.0, 100.0);
        let path = rect_path(&map, 0.3, 0.6, 0.2, 0.8);
        let region = MaskedRegion::synthesize(&path, &map, &test_params()).unwrap();
        let base = PixelBuffer::solid(8, 8, [10, 20, 30, 255]);

        let inside = map.point_at(&Point2::new(0.45, 0.5));
        assert_eq!(region.shade(&inside, &base), Some([10, 20, 30, 255]));

        // Inside the UV window test would pass, but well outside the box
        let outside = map.point_at(&Point2::new(0.9, 0.5));
        assert_eq!(region.shade(&outside, &base), None);
    }

    #[test]
    fn test_shade_respects_mask_not_bbox() {
        let map = CylinderMap::new(50.0, 100.0);
        // A triangle: its bounding box corners are outside the polygon
        let path = vec![
            map.point_at(&Point2::new(0.3, 0.2)),
            map.point_at(&Point2::new(0.6, 0.2)),
            map.point_at(&Point2::new(0.45, 0.8)),
        ];
        let region = MaskedRegion::synthesize(&path, &map, &test_params()).unwrap();
        let base = PixelBuffer::solid(8, 8, [255, 255, 255, 255]);

        // Near the top-left corner of the box: inside the box, outside the triangle
        let corner = map.point_at(&Point2::new(0.31, 0.78));
        assert_eq!(region.shade(&corner, &base), None);

        // Near the triangle's own centroid
        let center = map.point_at(&Point2::new(0.45, 0.4));
        assert!(region.shade(&center, &base).is_some());
    }

    #[test]
    fn test_shade_region_straddling_seam() {
        let map = CylinderMap::new(50.0, 100.0);
        // Rectangle across the 0/1 seam: u in [0.9, 1.1] wraps through 0
        let path = rect_path(&map, 0.9, 1.1, 0.3, 0.7);
        let region = MaskedRegion::synthesize(&path, &map, &test_params()).unwrap();
        let base = PixelBuffer::solid(4, 4, [1, 1, 1, 255]);

        // Points on both sides of the seam are inside
        let before = map.point_at(&Point2::new(0.95, 0.5));
        let after = map.point_at(&Point2::new(0.05, 0.5));
        assert!(region.shade(&before, &base).is_some());
        assert!(region.shade(&after, &base).is_some());

        // The opposite side of the cylinder is not
        let far = map.point_at(&Point2::new(0.5, 0.5));
        assert!(region.shade(&far, &base).is_none());
    }

    #[test]
    fn test_projection_volume_measures() {
        let map = CylinderMap::new(50.0, 100.0);
        let path = rect_path(&map, 0.3, 0.6, 0.2, 0.8);
        let region = MaskedRegion::synthesize(&path, &map, &test_params()).unwrap();
        assert!(region.diameter > 0.0);
        assert!(region.diameter >= (path[0] - path[2]).norm() - 1e-9);
    }
}
