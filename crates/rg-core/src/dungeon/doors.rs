//! Door placement between touching rooms
//!
//! Rays leave a room's floor through its wall. A ray that crosses into
//! another room's wall and lands on floor right behind it marks a possible
//! door. Candidates are grouped per neighbouring color and one per group
//! is carved.

use serde::{Deserialize, Serialize};

use crate::consts::DOOR_RAY_LENGTH;
use crate::raster::{Color, ColorKey, Rect, Surface};

use super::direction::Direction;

/// A floor cell and the direction a door would leave it in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DoorCandidate {
    pub x: i32,
    pub y: i32,
    pub direction: Direction,
}

/// Floor cells of a room that touch its wall, with the direction of the
/// wall, row-major then West, North, East, South
pub fn walk_room_perimeter<S: Surface + ?Sized>(
    surface: &S,
    bounds: Rect,
    wall: Color,
) -> Vec<DoorCandidate> {
    let mut out = Vec::new();
    for (x, y) in bounds.points() {
        if !surface.check_color(x, y, Color::FLOOR) {
            continue;
        }
        for direction in Direction::PERIMETER_ORDER {
            let (nx, ny) = direction.walk(x, y, 1);
            if surface.check_color(nx, ny, wall) {
                out.push(DoorCandidate { x, y, direction });
            }
        }
    }
    out
}

/// Cast from `(x, y)` and return the color of the room a door there would
/// lead into
pub fn cast_door_ray<S: Surface + ?Sized>(
    surface: &S,
    x: i32,
    y: i32,
    direction: Direction,
    wall: Color,
) -> Option<ColorKey> {
    for step in 1..=DOOR_RAY_LENGTH {
        let (cx, cy) = direction.walk(x, y, step);
        let color = surface.get_pixel(cx, cy)?;
        if color == Color::FLOOR || color == wall || color == Color::VOID {
            continue;
        }
        let (nx, ny) = direction.walk(x, y, step + 1);
        if surface.check_color(nx, ny, Color::FLOOR) {
            return Some(color.key());
        }
    }
    None
}

/// Door candidates of one room grouped by neighbouring color, in order of
/// first discovery
pub fn collect_door_candidates<S: Surface + ?Sized>(
    surface: &S,
    bounds: Rect,
    wall: Color,
) -> Vec<(ColorKey, Vec<DoorCandidate>)> {
    let mut groups: Vec<(ColorKey, Vec<DoorCandidate>)> = Vec::new();
    for candidate in walk_room_perimeter(surface, bounds, wall) {
        let Some(key) = cast_door_ray(surface, candidate.x, candidate.y, candidate.direction, wall)
        else {
            continue;
        };
        match groups.iter_mut().find(|(k, _)| *k == key) {
            Some((_, list)) => list.push(candidate),
            None => groups.push((key, vec![candidate])),
        }
    }
    groups
}

/// Middle candidate of a group
pub fn pick_door(candidates: &[DoorCandidate]) -> Option<DoorCandidate> {
    candidates.get(candidates.len() / 2).copied()
}

/// Paint floor outward from a candidate until the far floor is reached
///
/// Returns the number of cells painted.
pub fn carve_door<S: Surface + ?Sized>(surface: &mut S, door: DoorCandidate) -> u32 {
    let mut length = 0;
    for step in 1..=DOOR_RAY_LENGTH {
        let (cx, cy) = door.direction.walk(door.x, door.y, step);
        if step > 1 && surface.check_color(cx, cy, Color::FLOOR) {
            break;
        }
        if !surface.set_pixel(cx, cy, Color::FLOOR) {
            break;
        }
        length += 1;
    }
    length
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raster::PixelBuffer;

    const A: Color = Color::rgb(10, 10, 128);
    const B: Color = Color::rgb(90, 10, 128);

    /// '.' floor, 'a'/'b' walls, 'X' void
    fn surface_from(rows: &[&str]) -> PixelBuffer {
        let mut s = PixelBuffer::new(rows[0].len() as u32, rows.len() as u32);
        for (y, row) in rows.iter().enumerate() {
            for (x, ch) in row.chars().enumerate() {
                let color = match ch {
                    '.' => Color::FLOOR,
                    'a' => A,
                    'b' => B,
                    'X' => Color::VOID,
                    _ => Color::CLEAR,
                };
                s.set_pixel(x as i32, y as i32, color);
            }
        }
        s
    }

    fn two_rooms() -> PixelBuffer {
        surface_from(&[
            "aaaaabbbbb", //
            "a...ab...b", //
            "a...ab...b", //
            "a...ab...b", //
            "aaaaabbbbb", //
        ])
    }

    #[test]
    fn test_walk_room_perimeter_order() {
        let s = two_rooms();
        let walk = walk_room_perimeter(&s, Rect::new(0, 0, 5, 5), A);
        // First floor cell touches the wall to the west and north
        assert_eq!(
            walk[0],
            DoorCandidate {
                x: 1,
                y: 1,
                direction: Direction::West
            }
        );
        assert_eq!(walk[1].direction, Direction::North);
        // 8 edge cells of a 3x3 floor, corners counted twice
        assert_eq!(walk.len(), 12);
    }

    #[test]
    fn test_cast_door_ray_finds_neighbour() {
        let s = two_rooms();
        assert_eq!(cast_door_ray(&s, 3, 2, Direction::East, A), Some(B.key()));
        assert_eq!(cast_door_ray(&s, 1, 2, Direction::West, A), None);
        assert_eq!(cast_door_ray(&s, 2, 1, Direction::North, A), None);
    }

    #[test]
    fn test_cast_door_ray_ignores_void() {
        let s = surface_from(&[
            "aaaXbbbb", //
            "a.aXb..b", //
            "aaaXbbbb", //
        ]);
        // Void is skipped, then b's wall, then b's floor
        assert_eq!(cast_door_ray(&s, 1, 1, Direction::East, A), Some(B.key()));
    }

    #[test]
    fn test_collect_and_pick_median() {
        let s = two_rooms();
        let groups = collect_door_candidates(&s, Rect::new(0, 0, 5, 5), A);
        assert_eq!(groups.len(), 1);
        let (key, candidates) = &groups[0];
        assert_eq!(*key, B.key());
        assert_eq!(candidates.len(), 3);

        let door = pick_door(candidates).unwrap();
        assert_eq!((door.x, door.y, door.direction), (3, 2, Direction::East));
        assert_eq!(pick_door(&[]), None);
    }

    #[test]
    fn test_carve_door_stops_at_far_floor() {
        let mut s = two_rooms();
        let length = carve_door(
            &mut s,
            DoorCandidate {
                x: 3,
                y: 2,
                direction: Direction::East,
            },
        );
        assert_eq!(length, 2);
        assert!(s.check_color(4, 2, Color::FLOOR));
        assert!(s.check_color(5, 2, Color::FLOOR));
        assert!(s.check_color(4, 1, A));
        assert!(s.check_color(5, 3, B));
    }

    #[test]
    fn test_carve_door_stops_at_edge() {
        let mut s = surface_from(&["a.aa"]);
        let length = carve_door(
            &mut s,
            DoorCandidate {
                x: 1,
                y: 0,
                direction: Direction::East,
            },
        );
        assert_eq!(length, 2);
        assert_eq!(s.count(Color::FLOOR), 3);
    }
}
