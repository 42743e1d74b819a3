//! Build configuration

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::{DEFAULT_ROOM_GRID_SIZE, FALLBACK_FREQUENCY, MIN_SEED_STEP};
use crate::raster::Rect;

use super::grower::GrowthPolicy;

/// Configuration rejected before generation starts
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BuildError {
    #[error("room grid size must be at least 1")]
    ZeroGridSize,

    #[error("wiggle must be a finite, non-negative number, got {0}")]
    InvalidWiggle(f64),

    #[error("frequency must be a finite number, got {0}")]
    InvalidFrequency(f64),

    #[error("surface has no area ({width}x{height})")]
    EmptySurface { width: i32, height: i32 },

    #[error("seed region {0:?} does not overlap the surface")]
    SeedRegionOutside(Rect),
}

/// Options for one dungeon build
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildOptions {
    /// Number of seed grid divisions along the shorter surface side
    pub room_grid_size: u32,
    /// Maximum seed jitter, in cells
    pub wiggle: f64,
    /// Probability that a grid candidate is seeded
    pub frequency: f64,
    /// Seed for the default generator; entropy when absent
    pub seed: Option<u64>,
    /// Area to seed; whole surface when absent
    pub seed_region: Option<Rect>,
    pub growth: GrowthPolicy,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            room_grid_size: DEFAULT_ROOM_GRID_SIZE,
            wiggle: 0.0,
            frequency: 1.0,
            seed: None,
            seed_region: None,
            growth: GrowthPolicy::default(),
        }
    }
}

impl BuildOptions {
    pub fn validate(&self) -> Result<(), BuildError> {
        if self.room_grid_size == 0 {
            return Err(BuildError::ZeroGridSize);
        }
        if !self.wiggle.is_finite() || self.wiggle < 0.0 {
            return Err(BuildError::InvalidWiggle(self.wiggle));
        }
        if !self.frequency.is_finite() {
            return Err(BuildError::InvalidFrequency(self.frequency));
        }
        Ok(())
    }

    /// Frequency actually used: non-positive values fall back to 0.1 and
    /// anything above 1 is treated as 1
    pub fn effective_frequency(&self) -> f64 {
        normalize_frequency(self.frequency)
    }

    /// Pixel distance between seed candidates for a surface
    ///
    /// `min_dim / room_grid_size`, kept within `[10, min_dim / 2]`. On
    /// surfaces too small for both bounds the upper one wins.
    pub fn step_for(&self, width: i32, height: i32) -> i32 {
        let min_dim = width.min(height).max(0) as u32;
        let step = min_dim / self.room_grid_size.max(1);
        let upper = (min_dim / 2).max(1);
        step.max(MIN_SEED_STEP).min(upper) as i32
    }

    /// Seeding area clipped to the surface
    pub fn region_for(&self, width: i32, height: i32) -> Result<Rect, BuildError> {
        let surface = Rect::new(0, 0, width, height);
        if surface.is_empty() {
            return Err(BuildError::EmptySurface { width, height });
        }
        match self.seed_region {
            None => Ok(surface),
            Some(region) => region
                .intersection(&surface)
                .ok_or(BuildError::SeedRegionOutside(region)),
        }
    }
}

pub(crate) fn normalize_frequency(frequency: f64) -> f64 {
    if frequency <= 0.0 {
        FALLBACK_FREQUENCY
    } else {
        frequency.min(1.0)
    }
}
