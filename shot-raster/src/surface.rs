//! Surface collaborator contracts and the owned in-memory surface.
//!
//! A [`PixelSurface`] is an already-allocated pixel store: it owns a
//! contiguous byte buffer, knows its dimensions and [`PixelFormat`], and
//! exposes the buffer with a byte stride. The accessor layer
//! ([`RegionAccessor`](crate::RegionAccessor)) mediates all per-pixel access
//! to it; code outside this crate should rarely touch `bytes_mut` directly.
//!
//! [`MemorySurface`] is the concrete implementation used by the editing
//! pipeline and the tests. Screen-capture backends provide their own
//! `PixelSurface` implementations over platform buffers.
//!
//! # Stride Convention
//!
//! Strides in this crate are measured in **bytes**, and `stride_bytes()` may
//! exceed `width * bytes_per_pixel` when rows carry padding. Byte offsets are
//! always `y * stride_bytes + x * bytes_per_pixel`.

use crate::PixelFormat;
use anyhow::{anyhow, Result};
use shot_common::Rect;

/// An already-allocated pixel store.
///
/// Implementations must keep the buffer layout fixed for the lifetime of the
/// value: `bytes().len() >= stride_bytes() * height` and
/// `stride_bytes() >= width * bytes_per_pixel`.
pub trait PixelSurface {
    /// Surface width in pixels.
    fn width(&self) -> u32;

    /// Surface height in pixels.
    fn height(&self) -> u32;

    /// The pixel encoding of the buffer.
    fn format(&self) -> &PixelFormat;

    /// Row stride in bytes.
    fn stride_bytes(&self) -> usize;

    /// The raw pixel bytes, row-major.
    fn bytes(&self) -> &[u8];

    /// Mutable access to the raw pixel bytes.
    fn bytes_mut(&mut self) -> &mut [u8];

    /// Update the resolution metadata (dots per inch). Metadata only; has no
    /// effect on the pixel buffer.
    fn set_resolution(&mut self, horiz_dpi: f32, vert_dpi: f32);

    /// The full surface bounds as a rectangle at the origin.
    fn bounds(&self) -> Rect {
        Rect::new(0, 0, self.width(), self.height())
    }
}

/// External compositing target consumed by
/// [`RegionAccessor::draw_onto`](crate::RegionAccessor::draw_onto).
///
/// The contract is a synchronous blit: copy `src` of `surface` into `dest` of
/// the context, scaling if the rectangles differ. No return value.
pub trait RenderContext {
    /// Blit `src` of `surface` into `dest` of this context.
    fn draw_image(&mut self, surface: &dyn PixelSurface, dest: Rect, src: Rect);
}

/// A pixel surface that owns its memory in a `Vec<u8>`.
///
/// Rows are tightly packed: the byte stride equals
/// `width * bytes_per_pixel`.
///
/// # Example
///
/// ```
/// use shot_raster::{MemorySurface, PixelFormat, PixelSurface};
///
/// let surface = MemorySurface::new(100, 100, PixelFormat::rgb888());
/// assert_eq!(surface.width(), 100);
/// assert_eq!(surface.stride_bytes(), 400);
/// assert_eq!(surface.bytes().len(), 100 * 100 * 4);
/// ```
#[derive(Debug, Clone)]
pub struct MemorySurface {
    width: u32,
    height: u32,
    format: PixelFormat,
    stride_bytes: usize,
    data: Vec<u8>,

    /// (horizontal, vertical) dots per inch.
    resolution: (f32, f32),
}

impl MemorySurface {
    /// Creates a zero-initialized surface (black, or transparent black for
    /// alpha formats).
    pub fn new(width: u32, height: u32, format: PixelFormat) -> Self {
        let stride_bytes = width as usize * format.bytes_per_pixel() as usize;
        Self {
            width,
            height,
            format,
            stride_bytes,
            data: vec![0u8; stride_bytes * height as usize],
            resolution: (96.0, 96.0),
        }
    }

    /// Resizes the surface. Existing pixel data is not preserved; the new
    /// buffer is zero-initialized.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.stride_bytes = width as usize * self.format.bytes_per_pixel() as usize;
        self.data.clear();
        self.data.resize(self.stride_bytes * height as usize, 0);
    }

    /// The resolution metadata as (horizontal, vertical) dpi.
    pub fn resolution(&self) -> (f32, f32) {
        self.resolution
    }

    fn validate_rect(&self, rect: Rect) -> Result<()> {
        if rect.x < 0
            || rect.y < 0
            || rect.right() > self.width as i32
            || rect.bottom() > self.height as i32
        {
            return Err(anyhow!(
                "Rectangle out of bounds: {:?} (surface size: {}x{})",
                rect,
                self.width,
                self.height
            ));
        }
        Ok(())
    }

    /// Fills a rectangle with one raw pixel value.
    ///
    /// `pixel` must be exactly `bytes_per_pixel` long.
    pub fn fill_rect(&mut self, rect: Rect, pixel: &[u8]) -> Result<()> {
        self.validate_rect(rect)?;

        let bpp = self.format.bytes_per_pixel() as usize;
        if pixel.len() != bpp {
            return Err(anyhow!(
                "Invalid pixel size: got {} bytes, expected {}",
                pixel.len(),
                bpp
            ));
        }

        for y in 0..rect.height as usize {
            let row = (rect.y as usize + y) * self.stride_bytes + rect.x as usize * bpp;
            for x in 0..rect.width as usize {
                let offset = row + x * bpp;
                self.data[offset..offset + bpp].copy_from_slice(pixel);
            }
        }

        Ok(())
    }

    /// Copies external image data into a rectangle.
    ///
    /// `src_stride_bytes` of 0 means the source rows are tightly packed.
    pub fn image_rect(&mut self, dest: Rect, pixels: &[u8], src_stride_bytes: usize) -> Result<()> {
        self.validate_rect(dest)?;

        let bpp = self.format.bytes_per_pixel() as usize;
        let row_bytes = dest.width as usize * bpp;
        let src_stride = if src_stride_bytes == 0 {
            row_bytes
        } else {
            src_stride_bytes
        };

        if dest.height > 0 {
            let required = src_stride * (dest.height as usize - 1) + row_bytes;
            if pixels.len() < required {
                return Err(anyhow!(
                    "Insufficient source data: got {} bytes, need at least {}",
                    pixels.len(),
                    required
                ));
            }
        }

        for y in 0..dest.height as usize {
            let dst = (dest.y as usize + y) * self.stride_bytes + dest.x as usize * bpp;
            let src = y * src_stride;
            self.data[dst..dst + row_bytes].copy_from_slice(&pixels[src..src + row_bytes]);
        }

        Ok(())
    }
}

impl PixelSurface for MemorySurface {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn format(&self) -> &PixelFormat {
        &self.format
    }

    fn stride_bytes(&self) -> usize {
        self.stride_bytes
    }

    fn bytes(&self) -> &[u8] {
        &self.data
    }

    fn bytes_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    fn set_resolution(&mut self, horiz_dpi: f32, vert_dpi: f32) {
        self.resolution = (horiz_dpi, vert_dpi);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_surface() {
        let surface = MemorySurface::new(100, 100, PixelFormat::rgb888());
        assert_eq!(surface.width(), 100);
        assert_eq!(surface.height(), 100);
        assert_eq!(surface.stride_bytes(), 400);
        assert_eq!(surface.bytes().len(), 100 * 100 * 4);
        assert_eq!(surface.bounds(), Rect::new(0, 0, 100, 100));
    }

    #[test]
    fn test_resize() {
        let mut surface = MemorySurface::new(100, 100, PixelFormat::rgb888());
        surface.resize(200, 150);
        assert_eq!(surface.width(), 200);
        assert_eq!(surface.height(), 150);
        assert_eq!(surface.bytes().len(), 200 * 150 * 4);
    }

    #[test]
    fn test_set_resolution() {
        let mut surface = MemorySurface::new(10, 10, PixelFormat::rgb888());
        assert_eq!(surface.resolution(), (96.0, 96.0));
        surface.set_resolution(144.0, 144.0);
        assert_eq!(surface.resolution(), (144.0, 144.0));
    }

    #[test]
    fn test_fill_rect() {
        let mut surface = MemorySurface::new(100, 100, PixelFormat::rgb888());
        surface
            .fill_rect(Rect::new(10, 10, 20, 20), &[0xCC, 0xBB, 0xAA, 0x00])
            .unwrap();

        // Pixel inside the filled region
        let offset = 15 * surface.stride_bytes() + 15 * 4;
        assert_eq!(&surface.bytes()[offset..offset + 4], &[0xCC, 0xBB, 0xAA, 0x00]);

        // Pixel outside stays zeroed
        let offset = 5 * surface.stride_bytes() + 5 * 4;
        assert_eq!(&surface.bytes()[offset..offset + 4], &[0, 0, 0, 0]);
    }

    #[test]
    fn test_fill_rect_wrong_pixel_size() {
        let mut surface = MemorySurface::new(10, 10, PixelFormat::rgb888());
        assert!(surface.fill_rect(Rect::new(0, 0, 5, 5), &[1, 2]).is_err());
    }

    #[test]
    fn test_fill_rect_out_of_bounds() {
        let mut surface = MemorySurface::new(10, 10, PixelFormat::rgb888());
        assert!(surface
            .fill_rect(Rect::new(8, 8, 5, 5), &[0, 0, 0, 0])
            .is_err());
        assert!(surface
            .fill_rect(Rect::new(-1, 0, 5, 5), &[0, 0, 0, 0])
            .is_err());
    }

    #[test]
    fn test_image_rect_tightly_packed() {
        let mut surface = MemorySurface::new(100, 100, PixelFormat::rgb888());
        let green = [0x00, 0xFF, 0x00, 0x00];
        let mut image = Vec::new();
        for _ in 0..100 {
            image.extend_from_slice(&green);
        }

        surface
            .image_rect(Rect::new(30, 30, 10, 10), &image, 0)
            .unwrap();

        let offset = 35 * surface.stride_bytes() + 35 * 4;
        assert_eq!(&surface.bytes()[offset..offset + 4], &green);
    }

    #[test]
    fn test_image_rect_with_stride() {
        let mut surface = MemorySurface::new(100, 100, PixelFormat::rgb888());
        let yellow = [0x00, 0xFF, 0xFF, 0x00];

        // 10 rows of 10 pixels plus 10 pixels of padding per row
        let mut image = Vec::new();
        for _ in 0..10 {
            for _ in 0..10 {
                image.extend_from_slice(&yellow);
            }
            image.extend_from_slice(&[0u8; 40]);
        }

        surface
            .image_rect(Rect::new(40, 40, 10, 10), &image, 80)
            .unwrap();

        let offset = 45 * surface.stride_bytes() + 45 * 4;
        assert_eq!(&surface.bytes()[offset..offset + 4], &yellow);
    }

    #[test]
    fn test_image_rect_insufficient_data() {
        let mut surface = MemorySurface::new(10, 10, PixelFormat::rgb888());
        let short = vec![0u8; 8];
        assert!(surface
            .image_rect(Rect::new(0, 0, 5, 5), &short, 0)
            .is_err());
    }
}
