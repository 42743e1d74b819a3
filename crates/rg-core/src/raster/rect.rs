//! Axis-aligned rectangles in surface coordinates

use serde::{Deserialize, Serialize};

/// A rectangle with its origin at the top-left corner
///
/// Coordinates are signed so that rings around a rectangle touching the
/// surface edge can be expressed without special cases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Exclusive right edge
    pub const fn right(&self) -> i32 {
        self.x + self.width
    }

    /// Exclusive bottom edge
    pub const fn bottom(&self) -> i32 {
        self.y + self.height
    }

    pub const fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    pub const fn area(&self) -> i64 {
        if self.is_empty() {
            0
        } else {
            self.width as i64 * self.height as i64
        }
    }

    pub const fn contains_point(&self, x: i32, y: i32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// Check if this rectangle intersects another
    pub fn intersects(&self, other: &Rect) -> bool {
        !self.is_empty()
            && !other.is_empty()
            && self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }

    /// Calculate the intersection of two rectangles
    pub fn intersection(&self, other: &Rect) -> Option<Rect> {
        if !self.intersects(other) {
            return None;
        }

        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        Some(Rect::new(
            x,
            y,
            self.right().min(other.right()) - x,
            self.bottom().min(other.bottom()) - y,
        ))
    }

    /// Smallest rectangle covering both
    pub fn union(&self, other: &Rect) -> Rect {
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        Rect::new(
            x,
            y,
            self.right().max(other.right()) - x,
            self.bottom().max(other.bottom()) - y,
        )
    }

    /// Grow by `margin` cells on every side
    pub const fn expand(&self, margin: i32) -> Rect {
        Rect::new(
            self.x - margin,
            self.y - margin,
            self.width + 2 * margin,
            self.height + 2 * margin,
        )
    }

    /// Cells of the one-cell ring just outside this rectangle, corners
    /// included, in row-major order
    pub fn ring(&self) -> impl Iterator<Item = (i32, i32)> + use<> {
        let outer = self.expand(1);
        let inner = *self;
        (outer.y..outer.bottom()).flat_map(move |y| {
            (outer.x..outer.right())
                .filter(move |&x| !inner.contains_point(x, y))
                .map(move |x| (x, y))
        })
    }

    /// Cells inside this rectangle in row-major order
    pub fn points(&self) -> impl Iterator<Item = (i32, i32)> + use<> {
        let r = *self;
        (r.y..r.bottom()).flat_map(move |y| (r.x..r.right()).map(move |x| (x, y)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_edges() {
        let r = Rect::new(10, 20, 6, 4);
        assert_eq!(r.right(), 16);
        assert_eq!(r.bottom(), 24);
        assert_eq!(r.area(), 24);
        assert!(!r.is_empty());
        assert!(Rect::new(0, 0, 0, 5).is_empty());
    }

    #[test]
    fn test_rect_intersects() {
        let r1 = Rect::new(0, 0, 10, 10);
        let r2 = Rect::new(5, 5, 10, 10);
        let r3 = Rect::new(10, 0, 5, 5);

        assert!(r1.intersects(&r2));
        assert!(r2.intersects(&r1));
        // Touching edges do not overlap
        assert!(!r1.intersects(&r3));
    }

    #[test]
    fn test_rect_intersection() {
        let r1 = Rect::new(0, 0, 10, 10);
        let r2 = Rect::new(5, 5, 10, 10);

        assert_eq!(r1.intersection(&r2), Some(Rect::new(5, 5, 5, 5)));
        assert_eq!(r1.intersection(&Rect::new(20, 20, 2, 2)), None);
    }

    #[test]
    fn test_rect_union() {
        let r1 = Rect::new(0, 0, 2, 2);
        let r2 = Rect::new(5, 3, 1, 4);
        assert_eq!(r1.union(&r2), Rect::new(0, 0, 6, 7));
    }

    #[test]
    fn test_ring() {
        let ring: Vec<_> = Rect::new(0, 0, 1, 1).ring().collect();
        assert_eq!(ring.len(), 8);
        assert_eq!(ring[0], (-1, -1));
        assert_eq!(ring[7], (1, 1));
        assert!(!ring.contains(&(0, 0)));

        assert_eq!(Rect::new(3, 3, 4, 2).ring().count(), 2 * 6 + 2 * 2);
    }

    #[test]
    fn test_points_row_major() {
        let pts: Vec<_> = Rect::new(1, 1, 2, 2).points().collect();
        assert_eq!(pts, vec![(1, 1), (2, 1), (1, 2), (2, 2)]);
    }
}
