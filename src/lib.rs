//! # gridphys
//!
//! A 2D rigid body physics engine built around a uniform spatial grid.
//!
//! ## Features
//!
//! - **Convex Polygon Bodies**: axis-aligned boxes or arbitrary convex
//!   polygons, shared between bodies through `Arc`
//! - **Collision Detection**: swept-AABB broad phase plus an exact
//!   Separating Axis Theorem narrow phase
//! - **Spatial Grid**: bounded uniform grid with a loose catch-all cell,
//!   so out-of-bounds bodies keep simulating
//! - **Parallel Integration**: the per-tick integration pass fans out over
//!   a rayon thread pool
//! - **Stable Handles**: bodies live in a generational arena; a removed
//!   body's handle goes stale instead of dangling
//!
//! ## Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use gridphys::prelude::*;
//!
//! let mut world = PhysicsWorld::default();
//!
//! // a static floor and a dynamic box above it; +y points down
//! let shape = Arc::new(Shape::rect(100.0, 100.0));
//! let mut floor = PhysicsBody::fixed(Arc::new(Shape::rect(1000.0, 100.0)));
//! floor.set_position(Vec2f::new(0.0, 600.0));
//! world.add_object(floor);
//!
//! let mut falling = PhysicsBody::dynamic(shape, 1.0);
//! falling.set_position(Vec2f::new(450.0, 100.0));
//! let falling = world.add_object(falling);
//!
//! // fixed-timestep simulation loop
//! for _ in 0..600 {
//!     world.update();
//!     for pair in world.collided() {
//!         println!("collision between {:?} and {:?}", pair.first, pair.second);
//!     }
//! }
//!
//! let pos = world.body(falling).unwrap().position();
//! assert!(pos.y > 100.0);
//! ```

pub mod collision;
pub mod dynamics;
pub mod geometry;
pub mod grid;
pub mod math;
mod world;

pub use world::{PhysicsWorld, WorldConfig};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::collision::{BodyHandle, Collided, Contact};
    pub use crate::dynamics::{BodyType, PhysicsBody, PhysicsProperties};
    pub use crate::geometry::{Aabb, Shape, ShapeError};
    pub use crate::grid::SpatialGrid;
    pub use crate::math::{Rect, Vec2, Vec2f, Vec2i};
    pub use crate::world::{PhysicsWorld, WorldConfig};
}
