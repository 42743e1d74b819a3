//! The raster surface rooms are painted onto
//!
//! Out-of-bounds reads return `None` and out-of-bounds writes return
//! `false`; the edge of the surface therefore behaves like occupied space.

use serde::{Deserialize, Serialize};

use super::{Color, Rect};

/// A bounded grid of RGBA cells
pub trait Surface {
    fn width(&self) -> i32;

    fn height(&self) -> i32;

    /// Color at `(x, y)`, or `None` outside the surface
    fn get_pixel(&self, x: i32, y: i32) -> Option<Color>;

    /// Paint one cell; `false` if `(x, y)` is outside the surface
    fn set_pixel(&mut self, x: i32, y: i32, color: Color) -> bool;

    /// Paint a rectangle clipped to the surface; `false` if nothing was
    /// painted
    fn fill_rect(&mut self, rect: Rect, color: Color) -> bool {
        let Some(clipped) = rect.intersection(&self.bounds()) else {
            return false;
        };
        for (x, y) in clipped.points() {
            self.set_pixel(x, y, color);
        }
        true
    }

    fn bounds(&self) -> Rect {
        Rect::new(0, 0, self.width(), self.height())
    }

    /// Clear cells are free for growth; the outside is never clear
    fn is_clear(&self, x: i32, y: i32) -> bool {
        self.get_pixel(x, y).is_some_and(|c| c.is_clear())
    }

    fn check_color(&self, x: i32, y: i32, color: Color) -> bool {
        self.get_pixel(x, y) == Some(color)
    }

    /// Whether the cell matches any of `colors`
    fn check_colors(&self, x: i32, y: i32, colors: &[Color]) -> bool {
        self.get_pixel(x, y).is_some_and(|c| colors.contains(&c))
    }
}

/// Owned row-major pixel grid
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PixelBuffer {
    width: i32,
    height: i32,
    cells: Vec<Color>,
}

impl PixelBuffer {
    /// A surface with every cell clear
    pub fn new(width: u32, height: u32) -> Self {
        Self::filled(width, height, Color::CLEAR)
    }

    /// A surface with every cell set to `color`
    pub fn filled(width: u32, height: u32, color: Color) -> Self {
        let width = i32::try_from(width).unwrap_or(i32::MAX);
        let height = i32::try_from(height).unwrap_or(i32::MAX);
        Self {
            width,
            height,
            cells: vec![color; width as usize * height as usize],
        }
    }

    /// Build from packed RGBA bytes; `None` if the length does not match
    pub fn from_rgba(width: u32, height: u32, bytes: &[u8]) -> Option<Self> {
        let expected = (width as usize).checked_mul(height as usize)?.checked_mul(4)?;
        if bytes.len() != expected {
            return None;
        }
        let cells = bytes
            .chunks_exact(4)
            .map(|px| Color::from_array([px[0], px[1], px[2], px[3]]))
            .collect();
        Some(Self {
            width: i32::try_from(width).ok()?,
            height: i32::try_from(height).ok()?,
            cells,
        })
    }

    /// Packed RGBA bytes, row-major
    pub fn to_rgba(&self) -> Vec<u8> {
        self.cells.iter().flat_map(|c| c.to_array()).collect()
    }

    /// All cells, row-major
    pub fn cells(&self) -> &[Color] {
        &self.cells
    }

    /// Number of cells painted exactly `color`
    pub fn count(&self, color: Color) -> usize {
        self.cells.iter().filter(|&&c| c == color).count()
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width || y >= self.height {
            return None;
        }
        Some(y as usize * self.width as usize + x as usize)
    }
}

impl Surface for PixelBuffer {
    fn width(&self) -> i32 {
        self.width
    }

    fn height(&self) -> i32 {
        self.height
    }

    fn get_pixel(&self, x: i32, y: i32) -> Option<Color> {
        self.index(x, y).map(|i| self.cells[i])
    }

    fn set_pixel(&mut self, x: i32, y: i32, color: Color) -> bool {
        match self.index(x, y) {
            Some(i) => {
                self.cells[i] = color;
                true
            }
            None => false,
        }
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) -> bool {
        let Some(clipped) = rect.intersection(&self.bounds()) else {
            return false;
        };
        let stride = self.width as usize;
        for y in clipped.y..clipped.bottom() {
            let start = y as usize * stride + clipped.x as usize;
            self.cells[start..start + clipped.width as usize].fill(color);
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_clear() {
        let s = PixelBuffer::new(4, 3);
        assert_eq!(s.width(), 4);
        assert_eq!(s.height(), 3);
        assert_eq!(s.count(Color::CLEAR), 12);
        assert!(s.is_clear(3, 2));
    }

    #[test]
    fn test_out_of_bounds() {
        let mut s = PixelBuffer::new(4, 4);
        assert_eq!(s.get_pixel(-1, 0), None);
        assert_eq!(s.get_pixel(4, 0), None);
        assert!(!s.set_pixel(0, 4, Color::VOID));
        assert!(!s.is_clear(-1, -1));
        assert!(!s.check_color(9, 9, Color::CLEAR));
        assert!(!s.check_colors(9, 9, &[Color::CLEAR, Color::VOID]));
    }

    #[test]
    fn test_set_and_check() {
        let mut s = PixelBuffer::new(4, 4);
        assert!(s.set_pixel(1, 2, Color::FLOOR));
        assert!(s.check_color(1, 2, Color::FLOOR));
        assert!(s.check_colors(1, 2, &[Color::VOID, Color::FLOOR]));
        assert!(!s.is_clear(1, 2));
    }

    #[test]
    fn test_fill_rect_clips() {
        let mut s = PixelBuffer::new(4, 4);
        assert!(s.fill_rect(Rect::new(2, 2, 10, 10), Color::VOID));
        assert_eq!(s.count(Color::VOID), 4);
        assert!(s.check_color(3, 3, Color::VOID));
        assert!(s.is_clear(1, 1));
    }

    #[test]
    fn test_fill_rect_empty_clip() {
        let mut s = PixelBuffer::new(4, 4);
        assert!(!s.fill_rect(Rect::new(4, 0, 3, 3), Color::VOID));
        assert!(!s.fill_rect(Rect::new(0, 0, 0, 3), Color::VOID));
        assert_eq!(s.count(Color::CLEAR), 16);
    }

    #[test]
    fn test_rgba_round_trip() {
        let mut s = PixelBuffer::new(2, 2);
        s.set_pixel(1, 0, Color::rgba(1, 2, 3, 4));
        let bytes = s.to_rgba();
        assert_eq!(bytes.len(), 16);
        assert_eq!(&bytes[4..8], &[1, 2, 3, 4]);
        assert_eq!(PixelBuffer::from_rgba(2, 2, &bytes), Some(s));
        assert_eq!(PixelBuffer::from_rgba(3, 2, &bytes), None);
    }
}
