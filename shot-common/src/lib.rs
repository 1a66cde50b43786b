//! Common geometry types for the screenshot editing pipeline.
//!
//! This crate provides the shared types used across the pixel access layers:
//! - [`Point`] - 2D point with i32 coordinates
//! - [`Rect`] - Rectangle with position and dimensions

/// A 2D point with integer coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    /// Create a new point.
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// A rectangle defined by top-left position and dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    /// Create a new rectangle.
    pub const fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Get the right edge (x + width).
    pub const fn right(&self) -> i32 {
        self.x + self.width as i32
    }

    /// Get the bottom edge (y + height).
    pub const fn bottom(&self) -> i32 {
        self.y + self.height as i32
    }

    /// Check if a point is contained within this rectangle.
    pub const fn contains_point(&self, px: i32, py: i32) -> bool {
        px >= self.x && px < self.right() && py >= self.y && py < self.bottom()
    }

    /// Get the area of the rectangle.
    pub const fn area(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    /// True if the rectangle covers no pixels.
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Intersect two rectangles. Disjoint rectangles yield an empty
    /// rectangle anchored at the clamped position.
    pub fn intersect(&self, other: &Rect) -> Rect {
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());
        Rect::new(
            x,
            y,
            (right - x).max(0) as u32,
            (bottom - y).max(0) as u32,
        )
    }

    /// Return a copy shifted by (dx, dy).
    pub const fn translate(&self, dx: i32, dy: i32) -> Rect {
        Rect::new(self.x + dx, self.y + dy, self.width, self.height)
    }

    /// Clamp a point onto the rectangle: x into [x, right - 1] and
    /// y into [y, bottom - 1]. Meaningless for empty rectangles.
    pub fn clamp_point(&self, px: i32, py: i32) -> Point {
        Point::new(
            px.clamp(self.x, self.right() - 1),
            py.clamp(self.y, self.bottom() - 1),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point() {
        let p = Point::new(10, 20);
        assert_eq!(p.x, 10);
        assert_eq!(p.y, 20);
    }

    #[test]
    fn test_rect() {
        let r = Rect::new(10, 20, 100, 50);
        assert_eq!(r.x, 10);
        assert_eq!(r.y, 20);
        assert_eq!(r.width, 100);
        assert_eq!(r.height, 50);
        assert_eq!(r.right(), 110);
        assert_eq!(r.bottom(), 70);
        assert_eq!(r.area(), 5000);
        assert!(!r.is_empty());
    }

    #[test]
    fn test_contains_point() {
        let r = Rect::new(10, 20, 100, 50);
        assert!(r.contains_point(10, 20)); // top-left corner
        assert!(r.contains_point(109, 69)); // bottom-right minus 1
        assert!(!r.contains_point(9, 20)); // left of rect
        assert!(!r.contains_point(10, 19)); // above rect
        assert!(!r.contains_point(110, 69)); // right edge (exclusive)
        assert!(!r.contains_point(109, 70)); // bottom edge (exclusive)
    }

    #[test]
    fn test_intersect_overlapping() {
        let a = Rect::new(0, 0, 100, 100);
        let b = Rect::new(50, 50, 100, 100);
        assert_eq!(a.intersect(&b), Rect::new(50, 50, 50, 50));
        assert_eq!(b.intersect(&a), Rect::new(50, 50, 50, 50));
    }

    #[test]
    fn test_intersect_contained() {
        let outer = Rect::new(0, 0, 100, 100);
        let inner = Rect::new(10, 10, 20, 20);
        assert_eq!(outer.intersect(&inner), inner);
    }

    #[test]
    fn test_intersect_disjoint_is_empty() {
        let a = Rect::new(0, 0, 10, 10);
        let b = Rect::new(50, 50, 10, 10);
        assert!(a.intersect(&b).is_empty());
    }

    #[test]
    fn test_intersect_negative_origin() {
        // A request extending past the top-left is trimmed to the surface.
        let bounds = Rect::new(0, 0, 100, 100);
        let requested = Rect::new(-20, -10, 50, 50);
        assert_eq!(bounds.intersect(&requested), Rect::new(0, 0, 30, 40));
    }

    #[test]
    fn test_translate() {
        let r = Rect::new(10, 20, 5, 5);
        assert_eq!(r.translate(-10, -20), Rect::new(0, 0, 5, 5));
    }

    #[test]
    fn test_clamp_point() {
        let r = Rect::new(2, 2, 6, 6); // covers [2, 8) x [2, 8)
        assert_eq!(r.clamp_point(-5, 3), Point::new(2, 3));
        assert_eq!(r.clamp_point(100, 100), Point::new(7, 7));
        assert_eq!(r.clamp_point(4, 4), Point::new(4, 4));
    }
}
