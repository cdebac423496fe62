//! Sampleable pixel buffers.

/// An RGBA color, 8 bits per channel.
pub type Rgba = [u8; 4];

/// A decoded texture: an addressable 2D pixel grid.
///
/// This is the whole contract the synthesis code has with asset decoding;
/// how the pixels got here (file format, decode pipeline) is someone
/// else's problem.
#[derive(Debug, Clone)]
pub struct PixelBuffer {
    /// Width in pixels.
    pub width: usize,
    /// Height in pixels.
    pub height: usize,
    /// Row-major pixel data, `width * height` entries.
    pub data: Vec<Rgba>,
}

impl PixelBuffer {
    /// Create a buffer filled with a single color.
    pub fn solid(width: usize, height: usize, color: Rgba) -> Self {
        Self {
            width,
            height,
            data: vec![color; width * height],
        }
    }

    /// Create a buffer from raw pixels. Returns `None` when the data
    /// length does not match the dimensions.
    pub fn from_pixels(width: usize, height: usize, data: Vec<Rgba>) -> Option<Self> {
        if data.len() != width * height {
            return None;
        }
        Some(Self {
            width,
            height,
            data,
        })
    }

    /// Sample at normalized coordinates with nearest-texel filtering and
    /// clamp-to-edge addressing; `(0, 0)` is the top-left texel.
    pub fn sample(&self, u: f64, v: f64) -> Rgba {
        let x = ((u * self.width as f64) as isize).clamp(0, self.width as isize - 1) as usize;
        let y = ((v * self.height as f64) as isize).clamp(0, self.height as isize - 1) as usize;
        self.data[y * self.width + x]
    }
}
