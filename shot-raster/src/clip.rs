//! Clip-rectangle decoration over a pixel region.

use crate::{Color, PixelFormat, PixelRegion};
use shot_common::Rect;

/// Decorates a [`PixelRegion`] with a clip rectangle and an inversion flag.
///
/// The view borrows the wrapped accessor and holds no lock state of its own;
/// it is a pure coordinate filter over whatever lock state the accessor
/// currently has.
///
/// # Policy
///
/// With `invert = false`, points inside `clip` behave normally. Reads from
/// outside are clamped onto the clip boundary (clamp-to-edge sampling, not
/// rejection); writes outside are silently dropped.
///
/// With `invert = true`, the polarity flips: points *inside* `clip` are the
/// excluded ones. Excluded reads return a sentinel without sampling the
/// buffer ([`Color::TRANSPARENT`] when the format has alpha, else
/// [`Color::BLACK`]); excluded writes are silently dropped. The byte-buffer
/// access shapes follow the structured-color shapes exactly, including the
/// sentinel fill.
///
/// # Example
///
/// ```
/// use shot_common::Rect;
/// use shot_raster::{ClipView, Color, MemorySurface, PixelFormat, PixelRegion, RegionAccessor};
///
/// let mut acc = RegionAccessor::new(MemorySurface::new(10, 10, PixelFormat::rgb888()));
/// acc.set_color(2, 3, Color::opaque(255, 0, 0));
///
/// let clip = ClipView::with_clip(&mut acc, Rect::new(2, 2, 6, 6));
/// // Reading left of the clip clamps to its left edge.
/// assert_eq!(clip.get_color(-5, 3), clip.get_color(2, 3));
/// ```
pub struct ClipView<'a, R: PixelRegion> {
    inner: &'a mut R,
    clip: Rect,
    invert: bool,
}

impl<'a, R: PixelRegion> ClipView<'a, R> {
    /// Wraps `inner` with the clip defaulting to its full local bounds.
    pub fn new(inner: &'a mut R) -> Self {
        let clip = inner.local_bounds();
        Self {
            inner,
            clip,
            invert: false,
        }
    }

    /// Wraps `inner` with an explicit clip rectangle.
    pub fn with_clip(inner: &'a mut R, clip: Rect) -> Self {
        Self {
            inner,
            clip,
            invert: false,
        }
    }

    /// Flips the clip polarity: inside becomes excluded.
    pub fn invert(mut self, invert: bool) -> Self {
        self.invert = invert;
        self
    }

    /// The current clip rectangle.
    pub fn clip_rect(&self) -> Rect {
        self.clip
    }

    /// Replaces the clip rectangle.
    pub fn set_clip_rect(&mut self, clip: Rect) {
        self.clip = clip;
    }

    /// True when `(x, y)` is excluded under the current polarity.
    fn excluded(&self, x: i32, y: i32) -> bool {
        self.clip.contains_point(x, y) == self.invert
    }

    /// The color returned for excluded reads, never sampled from the buffer.
    fn sentinel(&self) -> Color {
        if self.inner.has_alpha_channel() {
            Color::TRANSPARENT
        } else {
            Color::BLACK
        }
    }
}

impl<'a, R: PixelRegion> PixelRegion for ClipView<'a, R> {
    fn pixel_format(&self) -> &PixelFormat {
        self.inner.pixel_format()
    }

    fn local_bounds(&self) -> Rect {
        self.inner.local_bounds()
    }

    fn contains(&self, x: i32, y: i32) -> bool {
        self.clip.contains_point(x, y) != self.invert
    }

    fn get_color(&self, x: i32, y: i32) -> Color {
        if self.invert {
            if self.clip.contains_point(x, y) {
                return self.sentinel();
            }
            return self.inner.get_color(x, y);
        }
        if !self.clip.contains_point(x, y) {
            if self.clip.is_empty() {
                return self.sentinel();
            }
            let p = self.clip.clamp_point(x, y);
            return self.inner.get_color(p.x, p.y);
        }
        self.inner.get_color(x, y)
    }

    fn set_color(&mut self, x: i32, y: i32, color: Color) {
        if self.excluded(x, y) {
            return;
        }
        self.inner.set_color(x, y, color);
    }

    fn get_color_bytes(&self, x: i32, y: i32, buf: &mut [u8], offset: usize) {
        if self.invert {
            if self.clip.contains_point(x, y) {
                let bpp = self.pixel_format().bytes_per_pixel() as usize;
                let sentinel = self.sentinel();
                self.pixel_format()
                    .encode(sentinel, &mut buf[offset..offset + bpp]);
                return;
            }
            return self.inner.get_color_bytes(x, y, buf, offset);
        }
        if !self.clip.contains_point(x, y) {
            if self.clip.is_empty() {
                return;
            }
            let p = self.clip.clamp_point(x, y);
            return self.inner.get_color_bytes(p.x, p.y, buf, offset);
        }
        self.inner.get_color_bytes(x, y, buf, offset);
    }

    fn set_color_bytes(&mut self, x: i32, y: i32, buf: &[u8], offset: usize) {
        if self.excluded(x, y) {
            return;
        }
        self.inner.set_color_bytes(x, y, buf, offset);
    }
}
