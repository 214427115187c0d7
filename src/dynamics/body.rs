use std::sync::Arc;

use crate::collision::BodyHandle;
use crate::geometry::{Aabb, Shape};
use crate::math::Vec2f;

/// Conversion factor between shape area units and mass units.
///
/// A dynamic body's mass is `area * density * SIZE_SCALE`; the scale keeps
/// pixel-sized shapes from producing enormous masses. Baked into
/// `inverse_mass` at construction time.
pub const SIZE_SCALE: f32 = 0.1;

/// Default bounciness of a freshly constructed body
pub const DEFAULT_ELASTICITY: f32 = 0.9;

/// The type of body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BodyType {
    /// Dynamic bodies are affected by forces, gravity and collisions
    #[default]
    Dynamic,
    /// Static bodies never move; they collide as immovable obstacles
    Static,
}

/// Per-body mutable kinematic state.
///
/// Plain data: the world and the integrator read and write these fields
/// directly, and callers may mutate them through
/// [`PhysicsBody::physics_mut`]. The engine only sanitizes density and
/// elasticity (absolute-valued) at construction; it does not defend against
/// out-of-range values written later.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhysicsProperties {
    /// Current velocity
    pub velocity: Vec2f,
    /// Current acceleration
    pub acceleration: Vec2f,
    /// Position of the shape centroid in world space
    pub position: Vec2f,
    /// Offset from the shape centroid to the caller's logical anchor point
    /// (e.g. a sprite's top-left corner)
    pub origin_transform: Vec2f,
    /// Orientation in radians; stored but never integrated
    pub angle: f32,
    /// 2D density, absolute-valued at construction
    pub density: f32,
    /// Bounciness coefficient; keep within `[0, ~2]`, values above 1 add
    /// energy on every bounce
    pub elasticity: f32,
    /// `1 / mass`; exactly 0 for static bodies (infinite mass)
    pub inverse_mass: f32,
}

impl PhysicsProperties {
    /// Creates properties for a body of the given density and shape area.
    /// Static bodies get `inverse_mass == 0` regardless of density.
    pub fn new(density: f32, area: f32, is_static: bool) -> Self {
        let density = density.abs();
        let inverse_mass = if is_static {
            0.0
        } else {
            1.0 / (area * density * SIZE_SCALE)
        };
        Self {
            velocity: Vec2f::ZERO,
            acceleration: Vec2f::ZERO,
            position: Vec2f::ZERO,
            origin_transform: Vec2f::ZERO,
            angle: 0.0,
            density,
            elasticity: DEFAULT_ELASTICITY,
            inverse_mass,
        }
    }

    /// Stores `position + origin_transform` so callers can work in their
    /// logical anchor space while physics runs in centroid space
    #[inline]
    pub fn set_position(&mut self, position: Vec2f) {
        self.position = position + self.origin_transform;
    }

    /// Translates the position by `delta`.
    ///
    /// The origin transform is folded in once, by [`set_position`]; the
    /// per-tick integration path must not re-apply it.
    ///
    /// [`set_position`]: Self::set_position
    #[inline]
    pub fn move_position(&mut self, delta: Vec2f) {
        self.position += delta;
    }

    /// Applies drag: decays velocity by `1 - dt/resistance` and
    /// acceleration by `1 - dt/sqrt(resistance)`
    #[inline]
    pub fn apply_resistance(&mut self, dt: f32, resistance: f32) {
        self.velocity *= 1.0 - dt / resistance;
        self.acceleration *= 1.0 - dt / resistance.sqrt();
    }
}

/// A body in the physics world: a shared shape plus kinematic state.
///
/// Constructed by the caller, then handed to the world which owns it until
/// `remove_object`. All mutating physics operations are no-ops on static
/// bodies.
#[derive(Debug, Clone)]
pub struct PhysicsBody {
    /// Handle assigned when the body is inserted into a grid
    pub(crate) handle: BodyHandle,
    body_type: BodyType,
    shape: Arc<Shape>,
    physics: PhysicsProperties,
    collision_mask: u8,
    /// Opaque caller back-reference; the engine never interprets it
    user_data: u64,
    /// Dirty bit: set whenever position changes, cleared by cell migration
    pub(crate) moved: bool,
}

impl PhysicsBody {
    /// Creates a dynamic body. The shape must be fully constructed first:
    /// its area feeds the mass calculation.
    pub fn dynamic(shape: Arc<Shape>, density: f32) -> Self {
        let physics = PhysicsProperties::new(density, shape.area(), false);
        Self {
            handle: BodyHandle::INVALID,
            body_type: BodyType::Dynamic,
            shape,
            physics,
            collision_mask: 0,
            user_data: 0,
            moved: false,
        }
    }

    /// Creates a static body: infinite mass, never moves
    pub fn fixed(shape: Arc<Shape>) -> Self {
        let physics = PhysicsProperties::new(0.0, shape.area(), true);
        Self {
            handle: BodyHandle::INVALID,
            body_type: BodyType::Static,
            shape,
            physics,
            collision_mask: 0,
            user_data: 0,
            moved: false,
        }
    }

    /// Returns the handle assigned by the grid, or `INVALID` before insertion
    #[inline]
    pub fn handle(&self) -> BodyHandle {
        self.handle
    }

    /// Returns the body type
    #[inline]
    pub fn body_type(&self) -> BodyType {
        self.body_type
    }

    /// Returns true if this is a dynamic body
    #[inline]
    pub fn is_dynamic(&self) -> bool {
        self.body_type == BodyType::Dynamic
    }

    /// Returns true if this is a static body
    #[inline]
    pub fn is_static(&self) -> bool {
        self.body_type == BodyType::Static
    }

    /// Returns the shared shape
    #[inline]
    pub fn shape(&self) -> &Arc<Shape> {
        &self.shape
    }

    /// Returns the physics state
    #[inline]
    pub fn physics(&self) -> &PhysicsProperties {
        &self.physics
    }

    /// Returns the physics state mutably. The caller may adjust density,
    /// elasticity, velocity and so on directly; nothing is re-validated.
    #[inline]
    pub fn physics_mut(&mut self) -> &mut PhysicsProperties {
        &mut self.physics
    }

    /// Returns the world-space centroid position
    #[inline]
    pub fn position(&self) -> Vec2f {
        self.physics.position
    }

    /// Sets the position (in the caller's anchor space) and marks the body
    /// for cell migration
    pub fn set_position(&mut self, position: Vec2f) {
        self.physics.set_position(position);
        self.moved = true;
    }

    /// Returns the world-space minimum corner of the body's bounding box
    #[inline]
    pub fn min_position(&self) -> Vec2f {
        self.physics.position + self.shape.min()
    }

    /// Returns the world-space maximum corner of the body's bounding box
    #[inline]
    pub fn max_position(&self) -> Vec2f {
        self.physics.position + self.shape.max()
    }

    /// Returns the body's bounding box in world space
    #[inline]
    pub fn world_aabb(&self) -> Aabb {
        self.shape.local_aabb().translate(self.physics.position)
    }

    /// Sets the offset from the shape centroid to the caller's anchor point
    pub fn set_origin_transform(&mut self, transform: Vec2f) {
        self.physics.origin_transform = transform;
    }

    /// Returns the current origin transform
    #[inline]
    pub fn origin_transform(&self) -> Vec2f {
        self.physics.origin_transform
    }

    /// Sets the bounciness coefficient (absolute-valued)
    pub fn set_elasticity(&mut self, elasticity: f32) {
        self.physics.elasticity = elasticity.abs();
    }

    /// Returns the bounciness coefficient
    #[inline]
    pub fn elasticity(&self) -> f32 {
        self.physics.elasticity
    }

    /// Sets the collision mask; two bodies interact only when their masks
    /// share no set bits
    pub fn set_collision_mask(&mut self, mask: u8) {
        self.collision_mask = mask;
    }

    /// Returns the collision mask
    #[inline]
    pub fn collision_mask(&self) -> u8 {
        self.collision_mask
    }

    /// Stores an opaque caller reference (an entity id, a pointer bit
    /// pattern); the engine never reads it
    pub fn set_user_data(&mut self, user_data: u64) {
        self.user_data = user_data;
    }

    /// Returns the opaque caller reference
    #[inline]
    pub fn user_data(&self) -> u64 {
        self.user_data
    }

    /// Accumulates a force into the acceleration, scaled by inverse mass.
    /// No-op on static bodies.
    pub fn set_force(&mut self, force: Vec2f) {
        if self.is_dynamic() {
            self.physics.acceleration += force * self.physics.inverse_mass;
        }
    }

    /// Replaces the velocity outright. No-op on static bodies.
    pub fn set_velocity(&mut self, velocity: Vec2f) {
        if self.is_dynamic() {
            self.physics.velocity = velocity;
        }
    }

    /// Responds to a collision: translates the body out of penetration along
    /// `position_change` and bounces velocity and acceleration with energy
    /// scaled by elasticity. No-op on static bodies.
    pub fn collision_action(&mut self, position_change: Vec2f) {
        if !self.is_dynamic() {
            return;
        }
        let sign = separation_sign(self.physics.velocity, position_change);
        self.physics.move_position(position_change * sign);
        self.moved = true;
        self.physics.velocity *= -self.physics.elasticity;
        self.physics.acceleration *= -self.physics.elasticity;
    }
}

/// Chooses which way to push a colliding body along the candidate separation
/// vector: against the incoming velocity when the body is moving into it,
/// otherwise along it.
///
/// A heuristic, not a penetration-accurate resolution; kept as its own
/// function so a better resolver can replace it without touching the tick
/// state machine.
#[inline]
fn separation_sign(velocity: Vec2f, position_change: Vec2f) -> f32 {
    if velocity.dot(position_change) > 0.0 {
        -1.0
    } else {
        1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Shape;
    use approx::assert_relative_eq;

    fn box_shape() -> Arc<Shape> {
        Arc::new(Shape::rect(100.0, 100.0))
    }

    #[test]
    fn test_dynamic_inverse_mass() {
        let shape = box_shape();
        let density = 2.0;
        let body = PhysicsBody::dynamic(shape.clone(), density);

        let expected_mass = shape.area() * density * SIZE_SCALE;
        assert_relative_eq!(1.0 / body.physics().inverse_mass, expected_mass, epsilon = 1e-3);
    }

    #[test]
    fn test_density_is_absolute_valued() {
        let body = PhysicsBody::dynamic(box_shape(), -2.0);
        assert_relative_eq!(body.physics().density, 2.0);
        assert!(body.physics().inverse_mass > 0.0);
    }

    #[test]
    fn test_static_inverse_mass_is_zero() {
        let body = PhysicsBody::fixed(box_shape());
        assert_eq!(body.physics().inverse_mass, 0.0);
        assert!(body.is_static());
    }

    #[test]
    fn test_static_operations_are_noops() {
        let mut body = PhysicsBody::fixed(box_shape());
        let before = *body.physics();

        body.set_force(Vec2f::new(100.0, 100.0));
        body.set_velocity(Vec2f::new(5.0, 5.0));
        body.collision_action(Vec2f::new(1.0, 0.0));
        body.set_force(Vec2f::new(-3.0, 7.0));

        assert_eq!(*body.physics(), before);
    }

    #[test]
    fn test_set_force_accumulates() {
        let mut body = PhysicsBody::dynamic(box_shape(), 1.0);
        let inv_mass = body.physics().inverse_mass;

        body.set_force(Vec2f::new(10.0, 0.0));
        body.set_force(Vec2f::new(10.0, 0.0));

        assert_relative_eq!(body.physics().acceleration.x, 20.0 * inv_mass, epsilon = 1e-6);
    }

    #[test]
    fn test_position_roundtrip_with_origin_transform() {
        let mut body = PhysicsBody::dynamic(box_shape(), 1.0);
        let transform = Vec2f::new(50.0, 50.0);
        let anchor = Vec2f::new(200.0, 300.0);

        body.set_origin_transform(transform);
        body.set_position(anchor);

        assert_eq!(body.position(), anchor + transform);
        assert!(body.moved);
    }

    #[test]
    fn test_collision_action_bounces_against_velocity() {
        let mut body = PhysicsBody::dynamic(box_shape(), 1.0);
        body.set_elasticity(0.5);
        body.set_velocity(Vec2f::new(0.0, 10.0));
        let start = body.position();

        // the push candidate points along the velocity, so the body must be
        // moved the opposite way
        body.collision_action(Vec2f::new(0.0, 2.0));

        assert_relative_eq!(body.position().y, start.y - 2.0);
        assert_relative_eq!(body.physics().velocity.y, -5.0);
    }

    #[test]
    fn test_elasticity_default_and_abs() {
        let mut body = PhysicsBody::dynamic(box_shape(), 1.0);
        assert_relative_eq!(body.elasticity(), DEFAULT_ELASTICITY);

        body.set_elasticity(-1.2);
        assert_relative_eq!(body.elasticity(), 1.2);
    }

    #[test]
    fn test_resistance_decays_velocity() {
        let mut props = PhysicsProperties::new(1.0, 100.0, false);
        props.velocity = Vec2f::new(10.0, 10.0);
        props.acceleration = Vec2f::new(1.0, 1.0);

        props.apply_resistance(1.0 / 60.0, 2.0);

        assert!(props.velocity.x < 10.0);
        assert!(props.velocity.x > 9.0);
        assert!(props.acceleration.x < 1.0);
    }
}
