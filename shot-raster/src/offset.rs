//! Origin-offset decoration over a pixel region.

use crate::{Color, PixelFormat, PixelRegion};
use shot_common::{Point, Rect};

/// Decorates a [`PixelRegion`] with a translated coordinate space.
///
/// Every coordinate is shifted by `-origin` before delegation, so a caller
/// can address pixels in a space anchored elsewhere, typically full-image
/// coordinates while the wrapped accessor only covers a sub-rectangle. The
/// view borrows the wrapped accessor and holds no lock state of its own.
///
/// # Example
///
/// ```
/// use shot_common::{Point, Rect};
/// use shot_raster::{Color, MemorySurface, OffsetView, PixelFormat, PixelRegion, RegionAccessor};
///
/// let surface = MemorySurface::new(32, 32, PixelFormat::rgb888());
/// let mut acc = RegionAccessor::with_region(surface, Rect::new(10, 10, 5, 5));
///
/// // Address the region in surface coordinates.
/// let origin = acc.origin();
/// let mut view = OffsetView::new(&mut acc, origin);
/// view.set_color(12, 12, Color::opaque(255, 0, 0));
/// assert_eq!(acc.get_color(2, 2), Color::opaque(255, 0, 0));
/// ```
pub struct OffsetView<'a, R: PixelRegion> {
    inner: &'a mut R,
    origin: Point,
}

impl<'a, R: PixelRegion> OffsetView<'a, R> {
    /// Wraps `inner` so that its local `(0, 0)` appears at `origin`.
    pub fn new(inner: &'a mut R, origin: Point) -> Self {
        Self { inner, origin }
    }

    /// The current origin.
    pub fn origin(&self) -> Point {
        self.origin
    }

    /// Moves the origin.
    pub fn set_origin(&mut self, origin: Point) {
        self.origin = origin;
    }
}

impl<'a, R: PixelRegion> PixelRegion for OffsetView<'a, R> {
    fn pixel_format(&self) -> &PixelFormat {
        self.inner.pixel_format()
    }

    fn local_bounds(&self) -> Rect {
        self.inner.local_bounds().translate(self.origin.x, self.origin.y)
    }

    fn contains(&self, x: i32, y: i32) -> bool {
        self.inner.contains(x - self.origin.x, y - self.origin.y)
    }

    fn get_color(&self, x: i32, y: i32) -> Color {
        self.inner.get_color(x - self.origin.x, y - self.origin.y)
    }

    fn set_color(&mut self, x: i32, y: i32, color: Color) {
        self.inner.set_color(x - self.origin.x, y - self.origin.y, color);
    }

    fn get_color_bytes(&self, x: i32, y: i32, buf: &mut [u8], offset: usize) {
        self.inner
            .get_color_bytes(x - self.origin.x, y - self.origin.y, buf, offset);
    }

    fn set_color_bytes(&mut self, x: i32, y: i32, buf: &[u8], offset: usize) {
        self.inner
            .set_color_bytes(x - self.origin.x, y - self.origin.y, buf, offset);
    }
}
