//! Uniform spatial grid over a bounded world, plus one loose cell for
//! everything that falls outside it.
//!
//! The grid owns every body in a generational arena; cells only hold
//! handles. A body lives in exactly one cell at a time, chosen by which
//! cell's bounds contain its position. Bodies that move are re-bucketed
//! eagerly once per tick by [`SpatialGrid::migrate_moved`].

use std::collections::BTreeMap;

use tracing::debug;

use crate::collision::BodyHandle;
use crate::dynamics::PhysicsBody;
use crate::math::{Rect, Vec2i};

/// Which bucket a body currently sits in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CellKey {
    /// A bounded cell, keyed by lattice coordinates
    Bounded(i32, i32),
    /// The catch-all cell for out-of-bounds bodies
    Loose,
}

/// One bucket of the grid
#[derive(Debug, Clone)]
pub struct Cell {
    /// Region of the world this cell covers
    bounds: Rect<i32>,
    /// Handles of the bodies bucketed here
    bodies: Vec<BodyHandle>,
    /// True while the cell holds at least one dynamic body
    active: bool,
}

impl Cell {
    fn new(bounds: Rect<i32>) -> Self {
        Self {
            bounds,
            bodies: Vec::new(),
            active: false,
        }
    }

    /// Returns the cell bounds
    #[inline]
    pub fn bounds(&self) -> Rect<i32> {
        self.bounds
    }

    /// Returns the handles bucketed in this cell
    #[inline]
    pub fn bodies(&self) -> &[BodyHandle] {
        &self.bodies
    }

    /// Returns true while the cell holds at least one dynamic body
    #[inline]
    pub fn is_active(&self) -> bool {
        self.active
    }

    fn remove_handle(&mut self, handle: BodyHandle) -> bool {
        if let Some(pos) = self.bodies.iter().position(|&h| h == handle) {
            self.bodies.swap_remove(pos);
            true
        } else {
            false
        }
    }
}

/// One arena slot. The generation counts how many bodies have lived in the
/// slot; a handle resolves only while its generation matches.
#[derive(Debug, Clone)]
pub(crate) struct BodySlot {
    pub(crate) generation: u32,
    pub(crate) body: Option<PhysicsBody>,
    /// Bucket the body is currently filed under; meaningless while empty
    cell: CellKey,
}

/// The spatial grid: body arena plus position-bucketed cells.
///
/// Cloning performs a deep copy; the clone owns independent bodies.
#[derive(Debug, Clone)]
pub struct SpatialGrid {
    slots: Vec<BodySlot>,
    free: Vec<u32>,
    cells: BTreeMap<(i32, i32), Cell>,
    loose: Cell,
    cell_size: i32,
    live: usize,
}

impl SpatialGrid {
    /// Creates a grid covering `width x height` world units, tiled with
    /// square cells of `cell_size` units starting at the origin. The loose
    /// cell is created alongside and catches every out-of-bounds body.
    pub fn new(width: i32, height: i32, cell_size: i32) -> Self {
        let cell_size = cell_size.max(1);
        let mut grid = Self {
            slots: Vec::new(),
            free: Vec::new(),
            cells: BTreeMap::new(),
            loose: Cell::new(Rect::new(Vec2i::new(0, 0), 0, 0)),
            cell_size,
            live: 0,
        };
        let cols = (width.max(0) + cell_size - 1) / cell_size;
        let rows = (height.max(0) + cell_size - 1) / cell_size;
        for cy in 0..rows {
            for cx in 0..cols {
                let pos = Vec2i::new(cx * cell_size, cy * cell_size);
                grid.add_cell(Rect::new(pos, cell_size, cell_size));
            }
        }
        grid
    }

    /// Adds a bounded cell. The rectangle must be a `cell_size` square
    /// aligned to the cell lattice; misaligned or already-occupied positions
    /// are rejected and `false` is returned.
    pub fn add_cell(&mut self, bounds: Rect<i32>) -> bool {
        if bounds.width != self.cell_size || bounds.height != self.cell_size {
            return false;
        }
        if bounds.pos.x % self.cell_size != 0 || bounds.pos.y % self.cell_size != 0 {
            return false;
        }
        let key = (
            bounds.pos.x.div_euclid(self.cell_size),
            bounds.pos.y.div_euclid(self.cell_size),
        );
        if self.cells.contains_key(&key) {
            return false;
        }
        self.cells.insert(key, Cell::new(bounds));
        true
    }

    /// Returns the number of bounded cells (the loose cell is not counted)
    #[inline]
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Returns the number of live bodies
    #[inline]
    pub fn body_count(&self) -> usize {
        self.live
    }

    /// Returns the cell side length
    #[inline]
    pub fn cell_size(&self) -> i32 {
        self.cell_size
    }

    /// Inserts a body, buckets it by position, and returns its handle.
    ///
    /// Out-of-bounds bodies land in the loose cell; insertion never fails
    /// and never strands a body.
    pub fn insert(&mut self, mut body: PhysicsBody) -> BodyHandle {
        let key = self.key_for_position(body.position().into());
        let dynamic = body.is_dynamic();

        let index = match self.free.pop() {
            Some(index) => index,
            None => {
                self.slots.push(BodySlot {
                    generation: 0,
                    body: None,
                    cell: CellKey::Loose,
                });
                (self.slots.len() - 1) as u32
            }
        };
        let slot = &mut self.slots[index as usize];
        let handle = BodyHandle::new(index, slot.generation);
        body.handle = handle;
        body.moved = false;
        slot.body = Some(body);
        slot.cell = key;

        let cell = self.cell_mut(key);
        cell.bodies.push(handle);
        if dynamic {
            cell.active = true;
        }
        self.live += 1;
        debug!(index, cell = ?key, "body inserted");
        handle
    }

    /// Removes the body behind `handle`, returning the body if the handle
    /// was still live. Bumps the slot generation so every copy of the
    /// handle goes stale at once.
    pub fn remove(&mut self, handle: BodyHandle) -> Option<PhysicsBody> {
        let slot = self.slots.get_mut(handle.index())?;
        if slot.generation != handle.generation() || slot.body.is_none() {
            return None;
        }
        let body = slot.body.take();
        let key = slot.cell;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(handle.index() as u32);
        self.cell_mut(key).remove_handle(handle);
        self.refresh_active(key);
        self.live -= 1;
        debug!(index = handle.index(), "body removed");
        body
    }

    /// Resolves a handle to its body, or `None` once the handle is stale
    pub fn body(&self, handle: BodyHandle) -> Option<&PhysicsBody> {
        let slot = self.slots.get(handle.index())?;
        if slot.generation != handle.generation() {
            return None;
        }
        slot.body.as_ref()
    }

    /// Resolves a handle to its body mutably
    pub fn body_mut(&mut self, handle: BodyHandle) -> Option<&mut PhysicsBody> {
        let slot = self.slots.get_mut(handle.index())?;
        if slot.generation != handle.generation() {
            return None;
        }
        slot.body.as_mut()
    }

    /// Re-buckets every body whose `moved` flag is set and refreshes the
    /// per-cell active flags. Must run between ticks, never concurrently
    /// with integration.
    pub fn migrate_moved(&mut self) {
        let mut moves: Vec<(usize, CellKey, CellKey)> = Vec::new();
        for (index, slot) in self.slots.iter_mut().enumerate() {
            let Some(body) = slot.body.as_mut() else {
                continue;
            };
            if !body.moved {
                continue;
            }
            body.moved = false;
            let target = key_for_position_in(
                &self.cells,
                self.cell_size,
                body.position().into(),
            );
            if target != slot.cell {
                moves.push((index, slot.cell, target));
                slot.cell = target;
            }
        }
        for &(index, from, to) in &moves {
            let handle = BodyHandle::new(index as u32, self.slots[index].generation);
            self.cell_mut(from).remove_handle(handle);
            self.cell_mut(to).bodies.push(handle);
        }
        if !moves.is_empty() {
            self.refresh_all_active();
        }
    }

    /// Iterates bounded cells in lattice order, with their coordinates
    pub fn cells(&self) -> impl Iterator<Item = (&(i32, i32), &Cell)> {
        self.cells.iter()
    }

    /// Returns the bounded cell at the given lattice coordinates
    pub fn cell(&self, coord: (i32, i32)) -> Option<&Cell> {
        self.cells.get(&coord)
    }

    /// Returns the loose cell
    #[inline]
    pub fn loose(&self) -> &Cell {
        &self.loose
    }

    /// Raw arena access for the parallel integration pass. Slots whose
    /// `body` is `None` are free and must be skipped.
    pub(crate) fn slots_mut(&mut self) -> &mut [BodySlot] {
        &mut self.slots
    }

    fn cell_mut(&mut self, key: CellKey) -> &mut Cell {
        match key {
            CellKey::Bounded(x, y) => match self.cells.get_mut(&(x, y)) {
                Some(cell) => cell,
                None => &mut self.loose,
            },
            CellKey::Loose => &mut self.loose,
        }
    }

    fn key_for_position(&self, point: Vec2i) -> CellKey {
        key_for_position_in(&self.cells, self.cell_size, point)
    }

    fn refresh_active(&mut self, key: CellKey) {
        let slots = &self.slots;
        let cell = match key {
            CellKey::Bounded(x, y) => match self.cells.get_mut(&(x, y)) {
                Some(cell) => cell,
                None => &mut self.loose,
            },
            CellKey::Loose => &mut self.loose,
        };
        cell.active = cell_has_dynamic(cell, slots);
    }

    fn refresh_all_active(&mut self) {
        let slots = &self.slots;
        for cell in self.cells.values_mut() {
            cell.active = cell_has_dynamic(cell, slots);
        }
        self.loose.active = cell_has_dynamic(&self.loose, slots);
    }
}

fn cell_has_dynamic(cell: &Cell, slots: &[BodySlot]) -> bool {
    cell.bodies.iter().any(|handle| {
        slots
            .get(handle.index())
            .and_then(|slot| slot.body.as_ref())
            .is_some_and(|body| body.is_dynamic())
    })
}

/// Buckets a point: the containing bounded cell, else the loose cell. The
/// lattice coordinate is computed first and verified with an explicit
/// point-in-rectangle test.
fn key_for_position_in(
    cells: &BTreeMap<(i32, i32), Cell>,
    cell_size: i32,
    point: Vec2i,
) -> CellKey {
    let coord = (point.x.div_euclid(cell_size), point.y.div_euclid(cell_size));
    match cells.get(&coord) {
        Some(cell) if cell.bounds.contains(point) => CellKey::Bounded(coord.0, coord.1),
        _ => CellKey::Loose,
    }
}
