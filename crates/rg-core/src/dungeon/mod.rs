//! Dungeon generation
//!
//! Room growth, floor filling, door carving and the builder that drives
//! them.

mod builder;
mod connectivity;
mod direction;
mod doors;
mod flood_fill;
mod grower;
mod info;
mod options;

pub use builder::{build, build_with_rng, BuildOutput, BuildPhase, DungeonBuilder, MapSpec};
pub use connectivity::ConnectivityTable;
pub use direction::Direction;
pub use doors::{
    carve_door, cast_door_ray, collect_door_candidates, pick_door, walk_room_perimeter,
    DoorCandidate,
};
pub use flood_fill::FloodFill;
pub use grower::{GrowBox, GrowthPolicy, RoomGrower, RoomId, SeedBudget};
pub use info::{Door, RoomInfo, RoomSummary};
pub use options::{BuildError, BuildOptions};
