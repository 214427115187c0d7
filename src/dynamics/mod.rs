mod body;
mod integrator;

pub use body::{BodyType, PhysicsBody, PhysicsProperties, DEFAULT_ELASTICITY, SIZE_SCALE};
pub use integrator::integrate;
