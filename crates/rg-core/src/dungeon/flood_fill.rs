//! Four-directional flood fill with an optional safety margin
//!
//! A "roomy" fill only enters cells whose eight neighbours already belong
//! to the region being filled. That margin keeps the fill from crossing a
//! one-cell wall or slipping through a diagonal gap between two wall
//! segments.

use crate::raster::{Color, Rect, Surface};

const CARDINALS: [(i32, i32); 4] = [(0, -1), (0, 1), (1, 0), (-1, 0)];

/// Stateless fill configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FloodFill {
    fill: Color,
    test: Option<Color>,
    roomy: bool,
}

impl FloodFill {
    /// Fill with `fill`, entering cells that match `test` (or clear cells
    /// when `test` is `None`)
    pub fn new(fill: Color, test: Option<Color>, roomy: bool) -> Self {
        Self { fill, test, roomy }
    }

    /// Roomy fill that turns one room's wall color into floor
    pub fn room_floor(wall: Color) -> Self {
        Self::new(Color::FLOOR, Some(wall), true)
    }

    fn base_test<S: Surface + ?Sized>(&self, surface: &S, x: i32, y: i32) -> bool {
        match self.test {
            Some(color) => surface.check_color(x, y, color),
            None => surface.is_clear(x, y),
        }
    }

    fn in_region<S: Surface + ?Sized>(&self, surface: &S, x: i32, y: i32) -> bool {
        self.base_test(surface, x, y) || surface.check_color(x, y, self.fill)
    }

    /// Whether `(x, y)` may be filled
    pub fn test_point<S: Surface + ?Sized>(&self, surface: &S, x: i32, y: i32) -> bool {
        if !self.base_test(surface, x, y) {
            return false;
        }
        if !self.roomy {
            return true;
        }
        for dy in -1..=1 {
            for dx in -1..=1 {
                if (dx != 0 || dy != 0) && !self.in_region(surface, x + dx, y + dy) {
                    return false;
                }
            }
        }
        true
    }

    /// Fill from `(x, y)`, returning the number of cells painted
    ///
    /// The start cell is painted unconditionally if it lies on the surface.
    pub fn fill<S: Surface + ?Sized>(&self, surface: &mut S, x: i32, y: i32) -> usize {
        // A fill color that passes its own test would never terminate
        if self.test == Some(self.fill) || (self.test.is_none() && self.fill.is_clear()) {
            return 0;
        }

        let mut painted = 0;
        let mut stack = vec![(x, y)];
        while let Some((px, py)) = stack.pop() {
            if surface.check_color(px, py, self.fill) || !surface.set_pixel(px, py, self.fill) {
                continue;
            }
            painted += 1;

            for (dx, dy) in CARDINALS {
                let (nx, ny) = (px + dx, py + dy);
                if self.test_point(surface, nx, ny) {
                    stack.push((nx, ny));
                }
            }
        }
        painted
    }

    /// First point of `rect`, row-major, that passes the roomy test
    pub fn find_roomy_start<S: Surface + ?Sized>(
        &self,
        surface: &S,
        rect: Rect,
    ) -> Option<(i32, i32)> {
        let roomy = Self { roomy: true, ..*self };
        rect.points().find(|&(x, y)| roomy.test_point(surface, x, y))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raster::PixelBuffer;

    const WALL: Color = Color::rgb(10, 20, 128);

    /// Parse a picture: '#' wall, '.' clear, 'X' void
    fn surface_from(rows: &[&str]) -> PixelBuffer {
        let mut s = PixelBuffer::new(rows[0].len() as u32, rows.len() as u32);
        for (y, row) in rows.iter().enumerate() {
            for (x, ch) in row.chars().enumerate() {
                let color = match ch {
                    '#' => WALL,
                    'X' => Color::VOID,
                    _ => Color::CLEAR,
                };
                s.set_pixel(x as i32, y as i32, color);
            }
        }
        s
    }

    #[test]
    fn test_plain_fill_stops_at_walls() {
        let mut s = surface_from(&[
            "..#..", //
            "..#..", //
            "..#..", //
        ]);
        let painted = FloodFill::new(Color::FLOOR, None, false).fill(&mut s, 0, 0);
        assert_eq!(painted, 6);
        assert!(s.is_clear(3, 0));
        assert!(s.check_color(1, 2, Color::FLOOR));
    }

    #[test]
    fn test_roomy_fill_leaves_margin() {
        let mut s = surface_from(&[
            "#####", //
            "#####", //
            "#####", //
            "#####", //
        ]);
        let fill = FloodFill::room_floor(WALL);
        let start = fill.find_roomy_start(&s, s.bounds());
        assert_eq!(start, Some((1, 1)));

        let painted = fill.fill(&mut s, 1, 1);
        assert_eq!(painted, 6);
        assert_eq!(s.count(Color::FLOOR), 6);
        // Border ring stays wall
        for (x, y) in Rect::new(1, 1, 3, 2).ring() {
            assert!(s.check_color(x, y, WALL));
        }
    }

    #[test]
    fn test_roomy_fill_does_not_cross_thin_wall() {
        // Two wall-colored regions joined only through a one-cell neck
        let mut s = surface_from(&[
            "XXXXXXXXXXX", //
            "X####X####X", //
            "X#########X", //
            "X####X####X", //
            "XXXXXXXXXXX", //
        ]);
        let fill = FloodFill::room_floor(WALL);
        fill.fill(&mut s, 2, 2);
        for x in 6..10 {
            for y in 1..4 {
                assert!(!s.check_color(x, y, Color::FLOOR), "leaked into ({x}, {y})");
            }
        }
        assert!(s.check_color(2, 2, Color::FLOOR));
    }

    #[test]
    fn test_roomy_fill_does_not_slip_diagonally() {
        let mut s = surface_from(&[
            "XXXXXXXX", //
            "X###XXXX", //
            "X###XXXX", //
            "X####XXX", //
            "XXXX####", //
            "XXXX###X", //
            "XXXX###X", //
            "XXXXXXXX", //
        ]);
        let fill = FloodFill::room_floor(WALL);
        fill.fill(&mut s, 2, 2);
        assert!(s.check_color(2, 2, Color::FLOOR));
        for (x, y) in Rect::new(4, 4, 4, 4).points() {
            assert!(!s.check_color(x, y, Color::FLOOR));
        }
    }

    #[test]
    fn test_no_roomy_start_in_thin_room() {
        let s = surface_from(&[
            "XXXXX", //
            "X###X", //
            "X###X", //
            "XXXXX", //
        ]);
        let fill = FloodFill::room_floor(WALL);
        assert_eq!(fill.find_roomy_start(&s, s.bounds()), None);
    }

    #[test]
    fn test_self_matching_fill_is_noop() {
        let mut s = surface_from(&["###"]);
        assert_eq!(FloodFill::new(WALL, Some(WALL), false).fill(&mut s, 0, 0), 0);
        assert_eq!(FloodFill::new(Color::CLEAR, None, false).fill(&mut s, 0, 0), 0);
    }

    #[test]
    fn test_fill_outside_surface() {
        let mut s = surface_from(&["..."]);
        assert_eq!(FloodFill::new(Color::FLOOR, None, false).fill(&mut s, 5, 5), 0);
    }
}
