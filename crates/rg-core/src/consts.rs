//! Generation constants
//!
//! Defaults for build options and the fixed limits of the door carver.

/// Default number of grid divisions along the shorter surface dimension
pub const DEFAULT_ROOM_GRID_SIZE: u32 = 20;

/// Smallest pixel step between seed candidates
pub const MIN_SEED_STEP: u32 = 10;

/// Frequency used when a non-positive frequency is requested
pub const FALLBACK_FREQUENCY: f64 = 0.1;

/// Maximum number of cells a door ray travels from a room's floor
pub const DOOR_RAY_LENGTH: i32 = 6;

/// Blue channel of every derived room color
pub const SEED_BLUE: u8 = 128;
