use rayon::prelude::*;
use tracing::{debug, trace};

use crate::collision::{calculate_collision, BodyHandle, Collided};
use crate::dynamics::{integrate, PhysicsBody};
use crate::grid::SpatialGrid;
use crate::math::Vec2f;

/// Configuration for the physics world.
///
/// Changes through the setters apply from the next `update()` on, never in
/// the middle of a tick.
#[derive(Debug, Clone)]
pub struct WorldConfig {
    /// Gravity acceleration; +y points down, so the default pulls bodies
    /// toward larger y
    pub gravity: Vec2f,
    /// Fixed timestep used by `update()`, in seconds
    pub iteration_interval: f32,
    /// Worker count for the integration pass; `0` and `1` both mean serial
    pub threads: usize,
    /// Uniform drag applied to velocity and acceleration every tick
    pub resistance: f32,
    /// World extent covered by bounded grid cells, in world units
    pub world_width: i32,
    /// World extent covered by bounded grid cells, in world units
    pub world_height: i32,
    /// Side length of one grid cell, in world units
    pub cell_size: i32,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            gravity: Vec2f::new(0.0, 9.81),
            iteration_interval: 1.0 / 60.0,
            threads: 4,
            resistance: 2.0,
            world_width: 10_000,
            world_height: 10_000,
            cell_size: 1000,
        }
    }
}

/// Forward neighborhood used to pair adjacent cells exactly once
const NEIGHBOR_OFFSETS: [(i32, i32); 4] = [(1, 0), (1, 1), (0, 1), (-1, 1)];

/// The physics world: owns every body through its spatial grid, advances
/// them in fixed-timestep ticks and records which pairs collided.
///
/// A tick runs strictly in phases: clear the collision list, integrate all
/// dynamic bodies (in parallel), re-bucket moved bodies, then detect and
/// resolve collisions. Each phase sees the completed output of the one
/// before it.
pub struct PhysicsWorld {
    config: WorldConfig,
    grid: SpatialGrid,
    collided: Vec<Collided>,
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self::new(WorldConfig::default())
    }
}

impl PhysicsWorld {
    /// Creates a world with the given configuration
    pub fn new(config: WorldConfig) -> Self {
        let grid = SpatialGrid::new(config.world_width, config.world_height, config.cell_size);
        Self {
            config,
            grid,
            collided: Vec::new(),
        }
    }

    /// Hands a body to the world and returns its handle
    pub fn add_object(&mut self, body: PhysicsBody) -> BodyHandle {
        self.grid.insert(body)
    }

    /// Destroys the body behind `handle`. Returns `false` when the handle
    /// is already stale.
    pub fn remove_object(&mut self, handle: BodyHandle) -> bool {
        self.grid.remove(handle).is_some()
    }

    /// Resolves a handle to its body
    pub fn body(&self, handle: BodyHandle) -> Option<&PhysicsBody> {
        self.grid.body(handle)
    }

    /// Resolves a handle to its body mutably
    pub fn body_mut(&mut self, handle: BodyHandle) -> Option<&mut PhysicsBody> {
        self.grid.body_mut(handle)
    }

    /// Returns the number of live bodies
    pub fn num_bodies(&self) -> usize {
        self.grid.body_count()
    }

    /// Returns the pairs that collided during the most recent tick. The
    /// list is replaced on the next `update()`.
    pub fn collided(&self) -> &[Collided] {
        &self.collided
    }

    /// Returns the current configuration
    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    /// Returns the spatial grid
    pub fn grid(&self) -> &SpatialGrid {
        &self.grid
    }

    /// Sets the gravity acceleration
    pub fn set_gravity(&mut self, gravity: Vec2f) {
        self.config.gravity = gravity;
    }

    /// Sets the integration worker count; `0` and `1` both run serially
    pub fn set_threads(&mut self, threads: usize) {
        self.config.threads = threads;
    }

    /// Sets the fixed timestep from a ticks-per-second rate. Rates that are
    /// not strictly positive are ignored.
    pub fn set_iteration_amount(&mut self, iterations_per_second: f32) {
        if iterations_per_second > 0.0 {
            self.config.iteration_interval = 1.0 / iterations_per_second;
        }
    }

    /// Advances the simulation by one fixed timestep
    pub fn update(&mut self) {
        self.step(self.config.iteration_interval);
    }

    /// Advances the simulation by an explicit time delta, for callers that
    /// drive time themselves
    pub fn step(&mut self, dt: f32) {
        if dt <= 0.0 {
            return;
        }
        self.collided.clear();
        self.integrate_bodies(dt);
        self.grid.migrate_moved();
        self.detect_and_resolve();
        trace!(
            bodies = self.grid.body_count(),
            collisions = self.collided.len(),
            "tick complete"
        );
    }

    /// Integrates every dynamic body. Bodies are independent during this
    /// phase, so the arena is split into disjoint chunks and handed to
    /// rayon; the serial path runs the same per-body code in the same
    /// order.
    fn integrate_bodies(&mut self, dt: f32) {
        let gravity = self.config.gravity;
        let resistance = self.config.resistance;
        let threads = self.config.threads;
        let slots = self.grid.slots_mut();

        if threads > 1 && slots.len() > 1 {
            let chunk_size = (slots.len() + threads - 1) / threads;
            slots.par_chunks_mut(chunk_size).for_each(|chunk| {
                for slot in chunk {
                    if let Some(body) = slot.body.as_mut() {
                        integrate(body, gravity, resistance, dt);
                    }
                }
            });
        } else {
            for slot in slots {
                if let Some(body) = slot.body.as_mut() {
                    integrate(body, gravity, resistance, dt);
                }
            }
        }
    }

    /// Detects collisions across all candidate pairs and resolves each hit
    /// immediately, so corrections are visible to later pairs within the
    /// same tick.
    fn detect_and_resolve(&mut self) {
        let pairs = self.candidate_pairs();
        for (ha, hb) in pairs {
            let Some(a) = self.grid.body(ha) else { continue };
            let Some(b) = self.grid.body(hb) else { continue };
            if a.is_static() && b.is_static() {
                continue;
            }
            let Some(contact) = calculate_collision(a, b) else {
                continue;
            };
            let a_dynamic = a.is_dynamic();
            let b_dynamic = b.is_dynamic();

            self.collided.push(Collided::new(ha, hb));
            debug!(first = ha.index(), second = hb.index(), depth = contact.depth, "collision");

            // normal points from a toward b; split the correction when both
            // bodies can move, otherwise the dynamic one takes it all
            let mtv = contact.normal * contact.depth;
            if a_dynamic && b_dynamic {
                let half = mtv * 0.5;
                if let Some(a) = self.grid.body_mut(ha) {
                    a.collision_action(-half);
                }
                if let Some(b) = self.grid.body_mut(hb) {
                    b.collision_action(half);
                }
            } else if a_dynamic {
                if let Some(a) = self.grid.body_mut(ha) {
                    a.collision_action(-mtv);
                }
            } else if let Some(b) = self.grid.body_mut(hb) {
                b.collision_action(mtv);
            }
        }
    }

    /// Collects candidate pairs in deterministic order: within each bounded
    /// cell, across each forward-neighbor cell boundary, inside the loose
    /// cell, and between the loose cell and every bounded cell. Cells with
    /// no dynamic body on either side are skipped.
    fn candidate_pairs(&self) -> Vec<(BodyHandle, BodyHandle)> {
        let mut pairs = Vec::new();

        for (&coord, cell) in self.grid.cells() {
            if cell.is_active() {
                pairs_within(cell.bodies(), &mut pairs);
            }
            for (dx, dy) in NEIGHBOR_OFFSETS {
                let Some(neighbor) = self.grid.cell((coord.0 + dx, coord.1 + dy)) else {
                    continue;
                };
                if cell.is_active() || neighbor.is_active() {
                    pairs_across(cell.bodies(), neighbor.bodies(), &mut pairs);
                }
            }
        }

        let loose = self.grid.loose();
        if loose.is_active() {
            pairs_within(loose.bodies(), &mut pairs);
        }
        for (_, cell) in self.grid.cells() {
            if loose.is_active() || cell.is_active() {
                pairs_across(loose.bodies(), cell.bodies(), &mut pairs);
            }
        }

        pairs
    }
}

fn pairs_within(bodies: &[BodyHandle], pairs: &mut Vec<(BodyHandle, BodyHandle)>) {
    for i in 0..bodies.len() {
        for j in (i + 1)..bodies.len() {
            pairs.push((bodies[i], bodies[j]));
        }
    }
}

fn pairs_across(
    left: &[BodyHandle],
    right: &[BodyHandle],
    pairs: &mut Vec<(BodyHandle, BodyHandle)>,
) {
    for &a in left {
        for &b in right {
            pairs.push((a, b));
        }
    }
}
