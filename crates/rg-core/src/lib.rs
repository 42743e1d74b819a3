//! rg-core: Core room-growing dungeon generation
//!
//! Partitions a raster surface into rectangular rooms grown from jittered
//! seed points, fills each room's interior with floor and carves one door
//! between every pair of touching rooms.
//!
//! This crate contains no I/O. Pixel storage is abstracted behind
//! [`raster::Surface`]; decoding and presentation live in other crates.

pub mod dungeon;
pub mod raster;

mod consts;
mod rng;

pub use consts::*;
pub use dungeon::{
    build, build_with_rng, BuildError, BuildOptions, BuildOutput, BuildPhase, Door,
    DungeonBuilder, GrowthPolicy, MapSpec, RoomId, RoomInfo, RoomSummary,
};
pub use raster::{Color, PixelBuffer, Rect, Surface};
pub use rng::{DungeonRng, UniformSource};
