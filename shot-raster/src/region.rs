//! Locked region access to a pixel surface.
//!
//! [`RegionAccessor`] is the performance-critical primitive underneath the
//! image-editing operations: it exposes a rectangular region of a surface's
//! raw storage for per-pixel read and write, without going through a retained
//! drawing API.
//!
//! # Locking Discipline
//!
//! The accessor acquires its lock eagerly at construction and releases it on
//! [`unlock`](RegionAccessor::unlock), [`draw_onto`](RegionAccessor::draw_onto),
//! [`release_surface`](RegionAccessor::release_surface) or drop. While locked
//! it caches the byte stride and the byte offset of the region's first row;
//! all addressing is `base + y * stride + x * bytes_per_pixel`, bounds-checked
//! through slices.
//!
//! Pixel operations on an unlocked or degenerate accessor are silent no-ops
//! (reads return [`Color::BLACK`]). This no-op policy is deliberate for the
//! hot per-pixel path and callers rely on it; do not turn these cases into
//! errors.
//!
//! # Example
//!
//! ```
//! use shot_common::Rect;
//! use shot_raster::{Color, MemorySurface, PixelFormat, PixelRegion, RegionAccessor};
//!
//! let surface = MemorySurface::new(64, 64, PixelFormat::rgb888());
//! let mut region = RegionAccessor::with_region(surface, Rect::new(16, 16, 32, 32));
//!
//! assert!(region.is_locked());
//! region.set_color(0, 0, Color::opaque(255, 0, 0));
//! assert_eq!(region.get_color(0, 0), Color::opaque(255, 0, 0));
//! ```

use crate::{Color, PixelFormat, PixelSurface, RenderContext};
use shot_common::{Point, Rect};
use tracing::trace;

/// Per-pixel access to a rectangular pixel region.
///
/// Coordinates are region-local: the region's own origin is `(0, 0)` and the
/// valid range is `[0, width) x [0, height)`. Implementations validate or
/// remap every coordinate before touching raw memory.
///
/// This is the common capability shared by [`RegionAccessor`] and the
/// decorating views ([`ClipView`](crate::ClipView),
/// [`OffsetView`](crate::OffsetView)); views stack over any implementor.
pub trait PixelRegion {
    /// The pixel encoding of the underlying surface.
    fn pixel_format(&self) -> &PixelFormat;

    /// The bounds of this region in its own coordinate space.
    fn local_bounds(&self) -> Rect;

    /// True if `(x, y)` is a valid coordinate for this region.
    fn contains(&self, x: i32, y: i32) -> bool;

    /// Read the color at `(x, y)`. Returns [`Color::BLACK`] when the
    /// coordinate is invalid or the underlying accessor is inert.
    fn get_color(&self, x: i32, y: i32) -> Color;

    /// Write the color at `(x, y)`. Silent no-op when the coordinate is
    /// invalid or the underlying accessor is inert.
    fn set_color(&mut self, x: i32, y: i32, color: Color);

    /// Copy the raw channel bytes at `(x, y)` into
    /// `buf[offset..offset + bytes_per_pixel]`.
    ///
    /// No-op on invalid coordinates. Panics if `buf` is too short for the
    /// requested offset; the buffer shape is the caller's contract, unlike
    /// coordinates it is not part of the no-op policy.
    fn get_color_bytes(&self, x: i32, y: i32, buf: &mut [u8], offset: usize);

    /// Write the raw channel bytes from `buf[offset..offset + bytes_per_pixel]`
    /// to `(x, y)`. Same policy as [`get_color_bytes`](Self::get_color_bytes).
    fn set_color_bytes(&mut self, x: i32, y: i32, buf: &[u8], offset: usize);

    /// Format capability query: true if pixels carry an alpha channel.
    fn has_alpha_channel(&self) -> bool {
        self.pixel_format().has_alpha()
    }
}

/// Cached addressing state, valid only while locked.
#[derive(Debug)]
struct LockedSpan {
    /// Surface row stride in bytes.
    stride_bytes: usize,

    /// Byte offset of the region's top-left pixel.
    base: usize,
}

/// Direct memory accessor for a sub-rectangle of a [`PixelSurface`].
///
/// The accessor owns the surface for its lifetime; ownership moves back to
/// the caller through [`release_surface`](Self::release_surface), after which
/// the accessor is inert. Dropping an accessor that still owns its surface
/// releases both the lock and the surface memory, and doing so is always
/// safe exactly once because ownership is tracked statically.
///
/// Not thread-safe: concurrent lock/unlock or get/set on one accessor must be
/// serialized by the caller.
pub struct RegionAccessor<S: PixelSurface> {
    surface: Option<S>,
    region: Rect,
    format: PixelFormat,
    lock: Option<LockedSpan>,
}

impl<S: PixelSurface> RegionAccessor<S> {
    /// Creates an accessor over the full surface and locks it.
    pub fn new(surface: S) -> Self {
        let bounds = surface.bounds();
        Self::with_region(surface, bounds)
    }

    /// Creates an accessor over `region` and locks it.
    ///
    /// The region is always intersected with the surface bounds, so the
    /// effective region never extends outside the surface. A request with
    /// zero area (or one entirely outside the surface) yields an inert
    /// accessor that never locks.
    pub fn with_region(surface: S, region: Rect) -> Self {
        let region = surface.bounds().intersect(&region);
        let format = *surface.format();
        let mut accessor = Self {
            surface: Some(surface),
            region,
            format,
            lock: None,
        };
        accessor.lock();
        accessor
    }

    /// Acquires direct memory access for the region.
    ///
    /// No-op if already locked, if the region has zero area, or if the
    /// surface has been released.
    pub fn lock(&mut self) {
        if self.lock.is_some() || self.region.is_empty() {
            return;
        }
        let Some(surface) = self.surface.as_ref() else {
            return;
        };

        let stride_bytes = surface.stride_bytes();
        let base = self.region.y as usize * stride_bytes
            + self.region.x as usize * self.format.bytes_per_pixel() as usize;
        self.lock = Some(LockedSpan { stride_bytes, base });
        trace!(region = ?self.region, stride_bytes, "locked pixel region");
    }

    /// Releases direct memory access. Safe to call repeatedly.
    pub fn unlock(&mut self) {
        if self.lock.take().is_some() {
            trace!(region = ?self.region, "unlocked pixel region");
        }
    }

    /// True while direct memory access is held.
    pub fn is_locked(&self) -> bool {
        self.lock.is_some()
    }

    /// Region width in pixels.
    pub fn width(&self) -> u32 {
        self.region.width
    }

    /// Region height in pixels.
    pub fn height(&self) -> u32 {
        self.region.height
    }

    /// Left edge of the region in surface coordinates.
    pub fn left(&self) -> i32 {
        self.region.x
    }

    /// Top edge of the region in surface coordinates.
    pub fn top(&self) -> i32 {
        self.region.y
    }

    /// Right edge (exclusive) of the region in surface coordinates.
    pub fn right(&self) -> i32 {
        self.region.right()
    }

    /// Bottom edge (exclusive) of the region in surface coordinates.
    pub fn bottom(&self) -> i32 {
        self.region.bottom()
    }

    /// The region's top-left corner in surface coordinates.
    ///
    /// This is the default origin for an [`OffsetView`](crate::OffsetView)
    /// that addresses the region in full-surface coordinates.
    pub fn origin(&self) -> Point {
        Point::new(self.region.x, self.region.y)
    }

    /// Composites the region into `dest` of an external render context.
    ///
    /// Unlocks first (the context blits from the surface directly) and does
    /// NOT relock afterwards: a caller that needs further pixel access after
    /// drawing must call [`lock`](Self::lock) again.
    pub fn draw_onto(&mut self, ctx: &mut dyn RenderContext, dest: Rect) {
        self.unlock();
        if let Some(surface) = self.surface.as_ref() {
            ctx.draw_image(surface, dest, self.region);
        }
    }

    /// Like [`draw_onto`](Self::draw_onto) with an unscaled destination: the
    /// region is blitted 1:1 at `dest`.
    pub fn draw_onto_at(&mut self, ctx: &mut dyn RenderContext, dest: Point) {
        let dest = Rect::new(dest.x, dest.y, self.region.width, self.region.height);
        self.draw_onto(ctx, dest);
    }

    /// Pass-through resolution metadata setter on the surface.
    pub fn set_resolution(&mut self, horiz_dpi: f32, vert_dpi: f32) {
        if let Some(surface) = self.surface.as_mut() {
            surface.set_resolution(horiz_dpi, vert_dpi);
        }
    }

    /// Unlocks and returns the surface to the caller.
    ///
    /// The accessor is inert afterwards: it never relocks and all pixel
    /// operations are no-ops. Returns `None` if the surface was already
    /// released.
    pub fn release_surface(&mut self) -> Option<S> {
        self.unlock();
        let surface = self.surface.take();
        if surface.is_some() {
            trace!(region = ?self.region, "released surface from accessor");
        }
        surface
    }

    /// Byte offset of `(x, y)` into the surface buffer, or `None` when the
    /// accessor is unlocked or the coordinate is out of the region.
    fn byte_offset(&self, x: i32, y: i32) -> Option<usize> {
        let span = self.lock.as_ref()?;
        if !self.contains(x, y) {
            return None;
        }
        Some(
            span.base
                + y as usize * span.stride_bytes
                + x as usize * self.format.bytes_per_pixel() as usize,
        )
    }
}

impl<S: PixelSurface> PixelRegion for RegionAccessor<S> {
    fn pixel_format(&self) -> &PixelFormat {
        &self.format
    }

    fn local_bounds(&self) -> Rect {
        Rect::new(0, 0, self.region.width, self.region.height)
    }

    fn contains(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as u32) < self.region.width && (y as u32) < self.region.height
    }

    fn get_color(&self, x: i32, y: i32) -> Color {
        let bpp = self.format.bytes_per_pixel() as usize;
        match (self.byte_offset(x, y), self.surface.as_ref()) {
            (Some(offset), Some(surface)) => {
                self.format.decode(&surface.bytes()[offset..offset + bpp])
            }
            _ => Color::BLACK,
        }
    }

    fn set_color(&mut self, x: i32, y: i32, color: Color) {
        let bpp = self.format.bytes_per_pixel() as usize;
        if let (Some(offset), Some(surface)) = (self.byte_offset(x, y), self.surface.as_mut()) {
            self.format
                .encode(color, &mut surface.bytes_mut()[offset..offset + bpp]);
        }
    }

    fn get_color_bytes(&self, x: i32, y: i32, buf: &mut [u8], offset: usize) {
        let bpp = self.format.bytes_per_pixel() as usize;
        if let (Some(src), Some(surface)) = (self.byte_offset(x, y), self.surface.as_ref()) {
            buf[offset..offset + bpp].copy_from_slice(&surface.bytes()[src..src + bpp]);
        }
    }

    fn set_color_bytes(&mut self, x: i32, y: i32, buf: &[u8], offset: usize) {
        let bpp = self.format.bytes_per_pixel() as usize;
        if let (Some(dst), Some(surface)) = (self.byte_offset(x, y), self.surface.as_mut()) {
            surface.bytes_mut()[dst..dst + bpp].copy_from_slice(&buf[offset..offset + bpp]);
        }
    }
}

impl<S: PixelSurface> Drop for RegionAccessor<S> {
    fn drop(&mut self) {
        // The owned surface (if any) is dropped by its own Drop; only the
        // lock needs explicit release here.
        self.unlock();
    }
}
