//! Dungeon orchestration (seeding, growth, floors, doors)
//!
//! A build runs in three stages:
//! 1. Seed a jittered grid of growers on clear cells
//! 2. Step every grower, in registration order, until none can grow
//! 3. Record adjacency, paint floors and carve one door per touching pair
//!
//! Stage 2 can be driven one tick at a time through [`DungeonBuilder::advance`]
//! for animated display; the final surface is the same either way.

use hashbrown::{HashMap, HashSet};
use log::{debug, info, trace, warn};
use strum::Display;

use crate::consts::SEED_BLUE;
use crate::raster::{Color, ColorKey, PixelBuffer, Rect, Surface};
use crate::rng::{DungeonRng, UniformSource};

use super::connectivity::ConnectivityTable;
use super::doors::{carve_door, collect_door_candidates, pick_door};
use super::flood_fill::FloodFill;
use super::grower::{RoomGrower, RoomId, SeedBudget};
use super::info::{Door, RoomInfo, RoomSummary};
use super::options::{normalize_frequency, BuildError, BuildOptions};

/// Where a build is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum BuildPhase {
    Growing,
    Finished,
}

/// What to build on
#[derive(Debug, Clone)]
pub enum MapSpec {
    /// A fully open surface
    Size { width: u32, height: u32 },
    /// A prepared surface; opaque black is blocked, transparent is open
    Surface(PixelBuffer),
}

impl MapSpec {
    pub fn into_surface(self) -> PixelBuffer {
        match self {
            MapSpec::Size { width, height } => PixelBuffer::new(width, height),
            MapSpec::Surface(surface) => surface,
        }
    }
}

/// The painted surface and its description
#[derive(Debug, Clone)]
pub struct BuildOutput<S> {
    pub surface: S,
    pub info: RoomInfo,
}

/// Owns the surface and every room for the duration of a build
#[derive(Debug)]
pub struct DungeonBuilder<S: Surface> {
    surface: S,
    options: BuildOptions,
    step: i32,
    region: Rect,
    next_id: u32,
    rooms: Vec<RoomGrower>,
    by_id: HashMap<RoomId, usize>,
    by_color: HashMap<ColorKey, RoomId>,
    floors: HashMap<RoomId, bool>,
    connectivity: ConnectivityTable,
    /// Pairs with a carved door, marked or not
    carved: HashSet<(RoomId, RoomId)>,
    doors: Vec<Door>,
    phase: BuildPhase,
    ticks: u32,
    discarded: u32,
}

impl<S: Surface> DungeonBuilder<S> {
    pub fn new(surface: S, options: BuildOptions) -> Result<Self, BuildError> {
        options.validate()?;
        let region = options.region_for(surface.width(), surface.height())?;
        let step = options.step_for(surface.width(), surface.height());
        Ok(Self {
            surface,
            options,
            step,
            region,
            next_id: 0,
            rooms: Vec::new(),
            by_id: HashMap::new(),
            by_color: HashMap::new(),
            floors: HashMap::new(),
            connectivity: ConnectivityTable::new(),
            carved: HashSet::new(),
            doors: Vec::new(),
            phase: BuildPhase::Growing,
            ticks: 0,
            discarded: 0,
        })
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn options(&self) -> &BuildOptions {
        &self.options
    }

    /// Pixel distance between seed candidates
    pub fn step(&self) -> i32 {
        self.step
    }

    pub fn phase(&self) -> BuildPhase {
        self.phase
    }

    pub fn is_done(&self) -> bool {
        self.phase == BuildPhase::Finished
    }

    /// Growth ticks taken so far
    pub fn ticks(&self) -> u32 {
        self.ticks
    }

    /// Seeds whose planting point was already occupied
    pub fn discarded(&self) -> u32 {
        self.discarded
    }

    /// Rooms in registration order
    pub fn rooms(&self) -> &[RoomGrower] {
        &self.rooms
    }

    pub fn room(&self, id: RoomId) -> Option<&RoomGrower> {
        self.by_id.get(&id).map(|&i| &self.rooms[i])
    }

    pub fn room_by_color(&self, color: Color) -> Option<&RoomGrower> {
        self.by_color
            .get(&color.key())
            .and_then(|id| self.room(*id))
    }

    pub fn connectivity(&self) -> &ConnectivityTable {
        &self.connectivity
    }

    pub fn doors(&self) -> &[Door] {
        &self.doors
    }

    /// Seed the configured region with the configured options
    pub fn seed<R: UniformSource + ?Sized>(&mut self, rng: &mut R) -> usize {
        self.seed_grid(
            rng,
            self.step,
            self.options.wiggle,
            self.options.frequency,
            self.region,
        )
    }

    /// Plant growers on a grid of candidates spaced `step` apart
    ///
    /// Candidates are visited row-major. Each one is kept with probability
    /// `frequency` (no draw when it is 1); kept candidates on clear cells
    /// draw an x then a y jitter in `[-wiggle, wiggle)`. Returns the number
    /// of growers registered.
    pub fn seed_grid<R: UniformSource + ?Sized>(
        &mut self,
        rng: &mut R,
        step: i32,
        wiggle: f64,
        frequency: f64,
        region: Rect,
    ) -> usize {
        let frequency = normalize_frequency(frequency);
        let step = step.max(1) as usize;
        let mut planted = 0;

        for sy in (region.y..region.bottom()).step_by(step) {
            for sx in (region.x..region.right()).step_by(step) {
                if frequency < 1.0 && rng.next_uniform() >= frequency {
                    continue;
                }
                if !self.surface.is_clear(sx, sy) {
                    continue;
                }
                let jx = sx as f64 + rng.next_signed() * wiggle;
                let jy = sy as f64 + rng.next_signed() * wiggle;

                let Some(color) = self.derive_color(sx, sy, region) else {
                    warn!("No free room color near ({sx}, {sy}), skipping seed");
                    continue;
                };
                let id = RoomId(self.next_id);
                self.next_id += 1;

                let mut grower = RoomGrower::new(id, color, self.options.growth);
                if grower.seed(&mut self.surface, jx, jy, SeedBudget::Unbounded, 0) {
                    trace!("Planted {id} at ({jx:.1}, {jy:.1}) with color {color}");
                    self.register(grower);
                    planted += 1;
                } else {
                    trace!("Discarded {id}: ({jx:.1}, {jy:.1}) is occupied");
                    self.discarded += 1;
                }
            }
        }

        debug!(
            "Seeded {planted} rooms with step {step} over {}x{}",
            region.width, region.height
        );
        planted
    }

    /// Room color from the normalized seed position, nudged along the blue
    /// channel until it is unused and not reserved
    fn derive_color(&self, sx: i32, sy: i32, region: Rect) -> Option<Color> {
        let channel = |offset: i32, extent: i32| -> u8 {
            let value = (256.0 * offset as f64 / extent.max(1) as f64).round();
            value.clamp(0.0, 255.0) as u8
        };
        let red = channel(sx - region.x, region.width);
        let green = channel(sy - region.y, region.height);

        (0..=u8::MAX)
            .map(|bump| Color::rgb(red, green, SEED_BLUE.wrapping_add(bump)))
            .find(|c| !c.is_reserved() && !self.by_color.contains_key(&c.key()))
    }

    fn register(&mut self, grower: RoomGrower) {
        self.by_id.insert(grower.id(), self.rooms.len());
        self.by_color.insert(grower.color().key(), grower.id());
        self.rooms.push(grower);
    }

    /// Run one growth tick; finishes the build once nothing can grow
    pub fn advance(&mut self) -> BuildPhase {
        if self.phase == BuildPhase::Finished {
            return self.phase;
        }

        let mut active = false;
        for room in &mut self.rooms {
            active |= room.step(&mut self.surface);
        }
        self.ticks += 1;

        if !active {
            debug!("Growth reached a fixed point after {} ticks", self.ticks);
            self.finish();
            self.phase = BuildPhase::Finished;
        }
        self.phase
    }

    /// Advance until the build is finished
    pub fn run_to_completion(&mut self) {
        while self.advance() == BuildPhase::Growing {}
    }

    fn finish(&mut self) {
        self.prune();

        for room in &mut self.rooms {
            room.compute_adjacent_colors(&self.surface);
        }

        for i in 0..self.rooms.len() {
            self.fill_floor(i);
        }

        for i in 0..self.rooms.len() {
            self.create_doors_for_room(i);
        }

        info!(
            "Built {} rooms with {} doors in {} ticks ({} seeds discarded)",
            self.rooms.len(),
            self.doors.len(),
            self.ticks,
            self.discarded
        );
    }

    /// Drop growers that never planted a box
    fn prune(&mut self) {
        let before = self.rooms.len();
        self.rooms
            .retain(|r| r.bounding_box().is_some() && r.initial_seed().is_some());
        if self.rooms.len() != before {
            self.by_id.clear();
            self.by_color.clear();
            let rooms = core::mem::take(&mut self.rooms);
            for room in rooms {
                self.register(room);
            }
            debug!("Pruned {} unrooted rooms", before - self.rooms.len());
        }
    }

    fn fill_floor(&mut self, index: usize) {
        let room = &self.rooms[index];
        let (id, color) = (room.id(), room.color());
        let Some(root) = room.root_box().map(|b| b.rect) else {
            return;
        };

        let fill = FloodFill::room_floor(color);
        let painted = match fill.find_roomy_start(&self.surface, root) {
            Some((x, y)) => fill.fill(&mut self.surface, x, y),
            None => 0,
        };
        if painted == 0 {
            warn!("{id} is too narrow for a floor");
        }
        self.floors.insert(id, painted > 0);
    }

    /// Carve one door to every neighbour this room has no door to yet
    ///
    /// A pair whose adjacency is one-sided still gets its door but stays
    /// unmarked in the connectivity table.
    fn create_doors_for_room(&mut self, index: usize) {
        let room = &self.rooms[index];
        let (id, wall) = (room.id(), room.color());
        let Some(bounds) = room.bounding_box() else {
            return;
        };

        for (key, candidates) in collect_door_candidates(&self.surface, bounds, wall) {
            let Some(&other) = self.by_color.get(&key) else {
                continue;
            };
            let pair = ConnectivityTable::pair_key(id, other);
            if other == id
                || self.connectivity.is_connected(id, other)
                || self.carved.contains(&pair)
            {
                continue;
            }
            let Some(candidate) = pick_door(&candidates) else {
                continue;
            };

            let length = carve_door(&mut self.surface, candidate);
            self.carved.insert(pair);
            self.doors.push(Door {
                rooms: (id, other),
                x: candidate.x,
                y: candidate.y,
                direction: candidate.direction,
                length,
            });
            trace!(
                "Door {id} -> {other} at ({}, {}) heading {}",
                candidate.x, candidate.y, candidate.direction
            );
            self.connect_rooms(id, other);
        }
    }

    /// Mark two rooms as joined if each has seen the other
    fn connect_rooms(&mut self, a: RoomId, b: RoomId) -> bool {
        let (Some(room_a), Some(room_b)) = (self.room(a), self.room(b)) else {
            warn!("Cannot connect unknown rooms {a} and {b}");
            return false;
        };
        if !room_a.is_adjacent_to(room_b.color()) || !room_b.is_adjacent_to(room_a.color()) {
            warn!("{a} and {b} are not mutual neighbours, leaving them unconnected");
            return false;
        }
        self.connectivity.connect(a, b)
    }

    /// Describe the rooms built so far
    pub fn room_info(&self) -> RoomInfo {
        let rooms = self
            .rooms
            .iter()
            .filter_map(|room| {
                let bounds = room.bounding_box()?;
                let mut adjacent: Vec<RoomId> = room
                    .adjacent_colors()
                    .iter()
                    .filter_map(|key| self.by_color.get(key).copied())
                    .collect();
                adjacent.sort_unstable();
                Some(RoomSummary {
                    id: room.id(),
                    color: room.color(),
                    bounds,
                    has_floor: self.floors.get(&room.id()).copied().unwrap_or(false),
                    adjacent,
                    connected: self.connectivity.neighbors(room.id()),
                })
            })
            .collect();

        RoomInfo {
            floor_color: Color::FLOOR,
            void_color: Color::VOID,
            rooms,
            doors: self.doors.clone(),
        }
    }

    pub fn into_output(self) -> BuildOutput<S> {
        let info = self.room_info();
        BuildOutput {
            surface: self.surface,
            info,
        }
    }
}

/// Build a dungeon using the generator seeded from `options.seed`
pub fn build(
    map: MapSpec,
    options: &BuildOptions,
) -> Result<BuildOutput<PixelBuffer>, BuildError> {
    let mut rng = match options.seed {
        Some(seed) => DungeonRng::new(seed),
        None => DungeonRng::from_entropy(),
    };
    debug!("Building with seed {}", rng.seed());
    build_with_rng(map, options, &mut rng)
}

/// Build a dungeon drawing every random decision from `rng`
pub fn build_with_rng<R: UniformSource + ?Sized>(
    map: MapSpec,
    options: &BuildOptions,
    rng: &mut R,
) -> Result<BuildOutput<PixelBuffer>, BuildError> {
    let mut builder = DungeonBuilder::new(map.into_surface(), options.clone())?;
    builder.seed(rng);
    builder.run_to_completion();
    Ok(builder.into_output())
}
