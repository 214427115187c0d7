//! Collision detection: a fast AABB broad phase and an exact SAT narrow
//! phase over convex polygons.

mod broad_phase;
mod contact;
mod sat;

pub use broad_phase::objects_close;
pub use contact::{can_collide, BodyHandle, Collided};
pub use sat::{calculate_collision, polygons_overlap, project_shape, Contact, Projection};
