//! Plain text view of a built dungeon

use hashbrown::HashSet;

use rg_core::{Color, RoomInfo, Surface};

/// What a cell shows as in text form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Glyph {
    /// Clear or void
    Empty,
    Wall,
    Floor,
    Door,
}

impl Glyph {
    /// Get the display character for this glyph
    pub const fn symbol(&self) -> char {
        match self {
            Glyph::Empty => ' ',
            Glyph::Wall => '#',
            Glyph::Floor => '.',
            Glyph::Door => '+',
        }
    }
}

/// Glyph of a single cell, ignoring doors
pub fn classify(color: Color) -> Glyph {
    if color.is_clear() || color == Color::VOID {
        Glyph::Empty
    } else if color == Color::FLOOR {
        Glyph::Floor
    } else {
        Glyph::Wall
    }
}

/// Render the surface one character per cell, one line per row
pub fn render_ascii<S: Surface + ?Sized>(surface: &S, info: &RoomInfo) -> String {
    let doors: HashSet<(i32, i32)> = info.doors.iter().flat_map(|d| d.cells()).collect();

    let width = surface.width().max(0) as usize;
    let mut out = String::with_capacity((width + 1) * surface.height().max(0) as usize);
    for y in 0..surface.height() {
        for x in 0..surface.width() {
            let glyph = if doors.contains(&(x, y)) {
                Glyph::Door
            } else {
                surface.get_pixel(x, y).map_or(Glyph::Empty, classify)
            };
            out.push(glyph.symbol());
        }
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use rg_core::{build_with_rng, BuildOptions, MapSpec, PixelBuffer, Rect};

    #[test]
    fn test_classify() {
        assert_eq!(classify(Color::CLEAR), Glyph::Empty);
        assert_eq!(classify(Color::rgba(9, 9, 9, 0)), Glyph::Empty);
        assert_eq!(classify(Color::VOID), Glyph::Empty);
        assert_eq!(classify(Color::FLOOR), Glyph::Floor);
        assert_eq!(classify(Color::rgb(12, 40, 128)), Glyph::Wall);
    }

    #[test]
    fn test_render_plain_surface() {
        let mut s = PixelBuffer::new(4, 3);
        s.fill_rect(Rect::new(0, 0, 4, 3), Color::rgb(1, 2, 128));
        s.set_pixel(1, 1, Color::FLOOR);
        s.set_pixel(2, 1, Color::FLOOR);
        s.set_pixel(3, 2, Color::VOID);
        assert_eq!(render_ascii(&s, &RoomInfo::default()), "####\n#..#\n### \n");
    }

    #[test]
    fn test_render_marks_doors() {
        let out = build_with_rng(
            MapSpec::Size {
                width: 40,
                height: 20,
            },
            &BuildOptions {
                room_grid_size: 2,
                ..Default::default()
            },
            &mut || 0.5,
        )
        .unwrap();
        assert!(!out.info.doors.is_empty());

        let text = render_ascii(&out.surface, &out.info);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 20);
        assert!(lines.iter().all(|l| l.chars().count() == 40));

        let carved: u32 = out.info.doors.iter().map(|d| d.length).sum();
        assert_eq!(text.matches('+').count(), carved as usize);
        // Every cell belongs to a room
        assert!(!text.contains(' '));
    }
}
