//! Room growth
//!
//! A room is a set of boxes painted in one wall color. Every tick each box
//! that is still growing tries to push each of its edges one cell outward;
//! an edge moves only if every cell in front of it is clear, so rooms stop
//! where they meet occupied space. A box that cannot move any edge is done
//! and plants 1×1 child boxes on clear cells around its perimeter, which
//! lets a room flow into the gaps its rectangle could not reach.

use hashbrown::HashSet;
use serde::{Deserialize, Serialize};

use crate::raster::{Color, ColorKey, Rect, Surface};

use super::direction::Direction;

/// Stable identity of a room within one build
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub struct RoomId(pub u32);

impl core::fmt::Display for RoomId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "room#{}", self.0)
    }
}

/// How perimeter reseeding spends a box's seed budget
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GrowthPolicy {
    /// Each planted child costs its parent one seed
    pub decrement_for_parent: bool,
    /// Children start with one seed fewer than their parent has left
    pub decrement_for_children: bool,
}

impl Default for GrowthPolicy {
    fn default() -> Self {
        Self {
            decrement_for_parent: true,
            decrement_for_children: false,
        }
    }
}

/// Remaining number of child boxes a box may plant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SeedBudget {
    Unbounded,
    Limited(u32),
}

impl SeedBudget {
    pub const fn is_exhausted(&self) -> bool {
        matches!(self, SeedBudget::Limited(0))
    }

    pub fn decrement(&mut self) {
        if let SeedBudget::Limited(n) = self {
            *n = n.saturating_sub(1);
        }
    }

    /// Budget handed to a child planted now
    pub fn for_child(self, decrement: bool) -> SeedBudget {
        match self {
            SeedBudget::Limited(n) if decrement => SeedBudget::Limited(n.saturating_sub(1)),
            other => other,
        }
    }
}

/// One rectangle of a growing room
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GrowBox {
    pub rect: Rect,
    /// No edge could move on the last attempt
    pub done: bool,
    pub budget: SeedBudget,
    /// Generations from the room's first box
    pub depth: u32,
}

/// A room being grown on a surface
#[derive(Debug, Clone)]
pub struct RoomGrower {
    id: RoomId,
    color: Color,
    policy: GrowthPolicy,
    boxes: Vec<GrowBox>,
    bounds: Option<Rect>,
    initial_seed: Option<(i32, i32)>,
    adjacent: HashSet<ColorKey>,
}

impl RoomGrower {
    pub fn new(id: RoomId, color: Color, policy: GrowthPolicy) -> Self {
        Self {
            id,
            color,
            policy,
            boxes: Vec::new(),
            bounds: None,
            initial_seed: None,
            adjacent: HashSet::new(),
        }
    }

    pub fn id(&self) -> RoomId {
        self.id
    }

    /// Wall color shared by every box of this room
    pub fn color(&self) -> Color {
        self.color
    }

    /// Boxes in the order they were planted
    pub fn boxes(&self) -> &[GrowBox] {
        &self.boxes
    }

    /// The first box planted, which the floor fill starts from
    pub fn root_box(&self) -> Option<&GrowBox> {
        self.boxes.first()
    }

    pub fn initial_seed(&self) -> Option<(i32, i32)> {
        self.initial_seed
    }

    /// Union of all boxes, `None` until the first box is planted
    pub fn bounding_box(&self) -> Option<Rect> {
        self.bounds
    }

    /// Whether any box can still grow
    pub fn is_active(&self) -> bool {
        self.boxes.iter().any(|b| !b.done)
    }

    /// Plant a 1×1 box at the rounded point
    pub fn seed<S: Surface + ?Sized>(
        &mut self,
        surface: &mut S,
        x: f64,
        y: f64,
        budget: SeedBudget,
        depth: u32,
    ) -> bool {
        self.seed_cell(surface, x.round() as i32, y.round() as i32, budget, depth)
    }

    fn seed_cell<S: Surface + ?Sized>(
        &mut self,
        surface: &mut S,
        x: i32,
        y: i32,
        budget: SeedBudget,
        depth: u32,
    ) -> bool {
        if !surface.is_clear(x, y) {
            return false;
        }
        let rect = Rect::new(x, y, 1, 1);
        surface.fill_rect(rect, self.color);
        self.push_box(GrowBox {
            rect,
            done: false,
            budget,
            depth,
        });
        if self.initial_seed.is_none() {
            self.initial_seed = Some((x, y));
        }
        true
    }

    fn push_box(&mut self, grow_box: GrowBox) {
        self.include_in_bounds(grow_box.rect);
        self.boxes.push(grow_box);
    }

    fn include_in_bounds(&mut self, rect: Rect) {
        self.bounds = Some(match self.bounds {
            Some(b) => b.union(&rect),
            None => rect,
        });
    }

    /// Advance every box by one tick
    ///
    /// Returns `true` while at least one box is still growing. Once it
    /// returns `false` further calls leave the surface untouched.
    pub fn step<S: Surface + ?Sized>(&mut self, surface: &mut S) -> bool {
        let count = self.boxes.len();

        for i in 0..count {
            if self.boxes[i].done {
                continue;
            }
            let mut grew = false;
            for dir in Direction::GROWTH_ORDER {
                grew |= self.grow_box(surface, i, dir);
            }
            if !grew {
                self.boxes[i].done = true;
            }
        }

        for i in 0..count {
            if self.boxes[i].done {
                self.plant_seeds_around_perimeter(surface, i);
            }
        }

        self.is_active()
    }

    /// Strip of cells directly in front of one edge of `rect`
    fn edge_strip(rect: Rect, dir: Direction) -> Rect {
        match dir {
            Direction::North => Rect::new(rect.x, rect.y - 1, rect.width, 1),
            Direction::South => Rect::new(rect.x, rect.bottom(), rect.width, 1),
            Direction::East => Rect::new(rect.right(), rect.y, 1, rect.height),
            Direction::West => Rect::new(rect.x - 1, rect.y, 1, rect.height),
        }
    }

    fn grow_box<S: Surface + ?Sized>(
        &mut self,
        surface: &mut S,
        index: usize,
        dir: Direction,
    ) -> bool {
        let strip = Self::edge_strip(self.boxes[index].rect, dir);
        if !strip.points().all(|(x, y)| surface.is_clear(x, y)) {
            return false;
        }
        surface.fill_rect(strip, self.color);
        let grown = self.boxes[index].rect.union(&strip);
        self.boxes[index].rect = grown;
        self.include_in_bounds(grown);
        true
    }

    /// Cells bordering `rect` on its four sides, corners excluded
    fn perimeter(rect: Rect) -> Vec<(i32, i32)> {
        let mut cells = Vec::with_capacity(2 * (rect.width + rect.height).max(0) as usize);
        for dir in Direction::GROWTH_ORDER {
            cells.extend(Self::edge_strip(rect, dir).points());
        }
        cells
    }

    fn plant_seeds_around_perimeter<S: Surface + ?Sized>(
        &mut self,
        surface: &mut S,
        index: usize,
    ) {
        if self.boxes[index].budget.is_exhausted() {
            return;
        }

        for (x, y) in Self::perimeter(self.boxes[index].rect) {
            let parent = self.boxes[index];
            if parent.budget.is_exhausted() {
                return;
            }
            if !surface.is_clear(x, y) {
                continue;
            }
            let child_budget = parent.budget.for_child(self.policy.decrement_for_children);
            if self.seed_cell(surface, x, y, child_budget, parent.depth + 1)
                && self.policy.decrement_for_parent
            {
                self.boxes[index].budget.decrement();
            }
        }
    }

    /// Record every color found on the ring just outside the bounding box
    ///
    /// Must run after growth has converged and before floors are painted.
    pub fn compute_adjacent_colors<S: Surface + ?Sized>(&mut self, surface: &S) {
        self.adjacent.clear();
        let Some(bounds) = self.bounds else {
            return;
        };
        for (x, y) in bounds.ring() {
            if let Some(c) = surface.get_pixel(x, y)
                && c != self.color
            {
                self.adjacent.insert(c.key());
            }
        }
    }

    /// Color keys seen around this room
    pub fn adjacent_colors(&self) -> &HashSet<ColorKey> {
        &self.adjacent
    }

    pub fn is_adjacent_to(&self, color: Color) -> bool {
        self.adjacent.contains(&color.key())
    }
}
