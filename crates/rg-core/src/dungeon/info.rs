//! Summary of a finished build

use serde::{Deserialize, Serialize};

use crate::raster::{Color, Rect};

use super::direction::Direction;
use super::grower::RoomId;

/// A carved door
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Door {
    /// The room that carved the door, then the room it leads into
    pub rooms: (RoomId, RoomId),
    /// Floor cell the door starts from
    pub x: i32,
    pub y: i32,
    pub direction: Direction,
    /// Number of wall cells turned into floor
    pub length: u32,
}

impl Door {
    /// Cells painted by this door, nearest first
    pub fn cells(&self) -> impl Iterator<Item = (i32, i32)> + use<> {
        let door = *self;
        (1..=door.length as i32).map(move |step| door.direction.walk(door.x, door.y, step))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomSummary {
    pub id: RoomId,
    pub color: Color,
    pub bounds: Rect,
    /// Whether a floor could be painted
    pub has_floor: bool,
    /// Registered rooms seen around the bounding box
    pub adjacent: Vec<RoomId>,
    /// Rooms reachable through a door
    pub connected: Vec<RoomId>,
}

/// Everything a caller needs to interpret the painted surface
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomInfo {
    pub floor_color: Color,
    pub void_color: Color,
    /// Rooms in registration order
    pub rooms: Vec<RoomSummary>,
    pub doors: Vec<Door>,
}

impl RoomInfo {
    pub fn room(&self, id: RoomId) -> Option<&RoomSummary> {
        self.rooms.iter().find(|r| r.id == id)
    }
}

impl Default for RoomInfo {
    fn default() -> Self {
        Self {
            floor_color: Color::FLOOR,
            void_color: Color::VOID,
            rooms: Vec::new(),
            doors: Vec::new(),
        }
    }
}
