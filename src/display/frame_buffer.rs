use crate::color::Pixel;
use crate::error::{EngineError, Result};
use serde::{Deserialize, Serialize};

// ============================================================================
// Edge Policy
// ============================================================================

/// Which pixels count as addressable
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgePolicy {
    /// `0 <= x < width`, `0 <= y < height`
    #[default]
    Inclusive,
    /// Row 0 and column 0 are never written (legacy `x > 0 && y > 0` check)
    SkipOrigin,
}

// ============================================================================
// FrameBuffer
// ============================================================================

/// Row-major 0xRRGGBB pixel storage, origin top-left, y down.
/// `pixels.len() == width * height` after every successful allocation.
#[derive(Debug, Clone)]
pub struct FrameBuffer {
    pixels: Vec<Pixel>,
    width: u32,
    height: u32,
    edges: EdgePolicy,
}

impl FrameBuffer {
    /// Allocate a black buffer
    pub fn new(width: u32, height: u32) -> Result<Self> {
        let mut buffer = Self {
            pixels: Vec::new(),
            width: 0,
            height: 0,
            edges: EdgePolicy::default(),
        };
        buffer.allocate(width, height)?;
        Ok(buffer)
    }

    pub fn with_edge_policy(mut self, edges: EdgePolicy) -> Self {
        self.edges = edges;
        self
    }

    /// Replace the storage with a black `width` x `height` buffer.
    /// The old storage is released first. On failure the buffer is left empty (0x0).
    pub fn allocate(&mut self, width: u32, height: u32) -> Result<()> {
        self.pixels = Vec::new();
        self.width = 0;
        self.height = 0;

        let len = (width as usize)
            .checked_mul(height as usize)
            .ok_or(EngineError::OutOfMemory { width, height })?;
        let mut pixels = Vec::new();
        pixels
            .try_reserve_exact(len)
            .map_err(|_| EngineError::OutOfMemory { width, height })?;
        pixels.resize(len, 0);

        log::debug!("frame buffer allocated: {}x{} ({} bytes)", width, height, len * 4);
        self.pixels = pixels;
        self.width = width;
        self.height = height;
        Ok(())
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Pixels per row
    #[inline]
    pub fn stride(&self) -> usize {
        self.width as usize
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.pixels.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    #[inline]
    pub fn edge_policy(&self) -> EdgePolicy {
        self.edges
    }

    /// Lowest writable coordinate on both axes
    #[inline]
    fn first_addressable(&self) -> i32 {
        match self.edges {
            EdgePolicy::Inclusive => 0,
            EdgePolicy::SkipOrigin => 1,
        }
    }

    /// Storage index of (x, y), or `None` if the pixel is not addressable.
    /// Every pixel access in the crate goes through here.
    #[inline]
    pub fn index(&self, x: i32, y: i32) -> Option<usize> {
        let lo = self.first_addressable();
        if x >= lo && y >= lo && x < self.width as i32 && y < self.height as i32 {
            Some(y as usize * self.stride() + x as usize)
        } else {
            None
        }
    }

    /// Overwrite every pixel
    pub fn clear(&mut self, color: Pixel) {
        self.pixels.fill(color);
    }

    /// Write one pixel. Out-of-range coordinates are ignored.
    #[inline]
    pub fn set_pixel(&mut self, x: i32, y: i32, color: Pixel) {
        if let Some(idx) = self.index(x, y) {
            self.pixels[idx] = color;
        }
    }

    /// Read one pixel, `None` if out of range
    #[inline]
    pub fn get_pixel(&self, x: i32, y: i32) -> Option<Pixel> {
        self.index(x, y).map(|idx| self.pixels[idx])
    }

    /// Fill the horizontal run `x1..=x2` on row `y`, clipped to the addressable area.
    /// Endpoints may be given in either order.
    pub fn fill_span(&mut self, x1: i32, x2: i32, y: i32, color: Pixel) {
        let lo = self.first_addressable();
        if y < lo || y >= self.height as i32 {
            return;
        }
        let (x1, x2) = if x1 <= x2 { (x1, x2) } else { (x2, x1) };
        let start = x1.max(lo);
        let end = x2.min(self.width as i32 - 1);
        if start > end {
            return;
        }

        let row = y as usize * self.stride();
        self.pixels[row + start as usize..=row + end as usize].fill(color);
    }

    /// Raw pixel storage, `stride()` pixels per row
    #[inline]
    pub fn pixels(&self) -> &[Pixel] {
        &self.pixels
    }

    #[inline]
    pub fn pixels_mut(&mut self) -> &mut [Pixel] {
        &mut self.pixels
    }

    /// Pixel storage viewed as bytes for texture upload
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    /// Number of pixels equal to `color`
    pub fn count(&self, color: Pixel) -> usize {
        self.pixels.iter().filter(|&&p| p == color).count()
    }
}
