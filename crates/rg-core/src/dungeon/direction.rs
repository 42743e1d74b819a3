//! Cardinal directions

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter)]
pub enum Direction {
    North,
    South,
    East,
    West,
}

impl Direction {
    /// Order in which a box tries to extend itself each tick
    pub const GROWTH_ORDER: [Direction; 4] = [
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
    ];

    /// Order in which door rays leave a perimeter cell
    pub const PERIMETER_ORDER: [Direction; 4] = [
        Direction::West,
        Direction::North,
        Direction::East,
        Direction::South,
    ];

    /// Unit step `(dx, dy)`; y grows downwards
    pub const fn offset(&self) -> (i32, i32) {
        match self {
            Direction::North => (0, -1),
            Direction::South => (0, 1),
            Direction::East => (1, 0),
            Direction::West => (-1, 0),
        }
    }

    /// The cell `steps` cells away from `(x, y)`
    pub const fn walk(&self, x: i32, y: i32, steps: i32) -> (i32, i32) {
        let (dx, dy) = self.offset();
        (x + dx * steps, y + dy * steps)
    }
}
