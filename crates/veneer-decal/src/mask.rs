//! UV bounding boxes and mask-bitmap rasterization.

use veneer_math::Point2;

/// Axis-aligned bounding box of a wrap-aligned UV coordinate batch.
#[derive(Debug, Clone, Copy)]
pub struct UvBounds {
    /// Minimum u.
    pub min_u: f64,
    /// Maximum u.
    pub max_u: f64,
    /// Minimum v.
    pub min_v: f64,
    /// Maximum v.
    pub max_v: f64,
}

impl UvBounds {
    /// Bounding box of a coordinate slice. Returns `None` for an empty slice.
    pub fn of(uvs: &[Point2]) -> Option<Self> {
        let first = uvs.first()?;
        let mut b = Self {
            min_u: first.x,
            max_u: first.x,
            min_v: first.y,
            max_v: first.y,
        };
        for uv in &uvs[1..] {
            b.min_u = b.min_u.min(uv.x);
            b.max_u = b.max_u.max(uv.x);
            b.min_v = b.min_v.min(uv.y);
            b.max_v = b.max_v.max(uv.y);
        }
        Some(b)
    }

    /// Box width along u.
    pub fn width(&self) -> f64 {
        self.max_u - self.min_u
    }

    /// Box height along v.
    pub fn height(&self) -> f64 {
        self.max_v - self.min_v
    }

    /// Remap a UV coordinate into `[0, 1]²` relative to this box.
    ///
    /// The caller guarantees non-zero extents (see
    /// [`DecalError::DegenerateBounds`](crate::DecalError::DegenerateBounds)).
    pub fn normalize(&self, uv: &Point2) -> Point2 {
        Point2::new(
            (uv.x - self.min_u) / self.width(),
            (uv.y - self.min_v) / self.height(),
        )
    }
}

/// A square binary mask: 0 = outside the region, 255 = inside.
///
/// Rasterized once per (path, drop) pairing from the path's wrap-aligned UV
/// bounding box; top-left raster origin, so the v axis is inverted relative
/// to parametric space.
#[derive(Debug, Clone)]
pub struct MaskBitmap {
    /// Edge length in pixels.
    pub size: usize,
    /// Row-major fill values, `size * size` entries.
    pub data: Vec<u8>,
}

impl MaskBitmap {
    /// Rasterize the polygon interior into a `size`×`size` bitmap.
    ///
    /// Polygon vertices are remapped linearly from `bounds` into pixel
    /// space (v inverted) and filled with an even-odd scanline rule:
    /// for each row, the crossings of the polygon edges with the row's
    /// center line are sorted and spans between alternate pairs filled.
    /// A polygon with fewer than 3 vertices yields an all-outside mask.
    pub fn rasterize(polygon: &[Point2], bounds: &UvBounds, size: usize) -> Self {
        let n = polygon.len();
        if n < 3 {
            return Self {
                size,
                data: vec![0u8; size * size],
            };
        }
        let px: Vec<(f64, f64)> = polygon
            .iter()
            .map(|uv| {
                let norm = bounds.normalize(uv);
                (norm.x * size as f64, (1.0 - norm.y) * size as f64)
            })
            .collect();

        let mut data = vec![0u8; size * size];
        let mut crossings: Vec<f64> = Vec::new();

        for row in 0..size {
            let scan_y = row as f64 + 0.5;
            crossings.clear();

            let mut j = n - 1;
            for i in 0..n {
                let (x0, y0) = px[i];
                let (x1, y1) = px[j];
                if (y0 > scan_y) != (y1 > scan_y) {
                    crossings.push(x0 + (scan_y - y0) * (x1 - x0) / (y1 - y0));
                }
                j = i;
            }
            crossings.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

            for pair in crossings.chunks_exact(2) {
                let start = (pair[0] - 0.5).ceil().max(0.0) as usize;
                let end = ((pair[1] - 0.5).floor() as isize).min(size as isize - 1);
                for col in start as isize..=end {
                    data[row * size + col as usize] = 255;
                }
            }
        }

        Self { size, data }
    }

    /// Sample the fill fraction at normalized mask coordinates, nearest
    /// texel, clamp to edge. `(0, 0)` addresses the top-left.
    pub fn sample(&self, u: f64, v: f64) -> f64 {
        let x = ((u * self.size as f64) as isize).clamp(0, self.size as isize - 1) as usize;
        let y = ((v * self.size as f64) as isize).clamp(0, self.size as isize - 1) as usize;
        self.data[y * self.size + x] as f64 / 255.0
    }

    /// Whether the mask reads "inside" at the given coordinates
    /// (fill fraction at or above 0.5).
    pub fn inside(&self, u: f64, v: f64) -> bool {
        self.sample(u, v) >= 0.5
    }
}
