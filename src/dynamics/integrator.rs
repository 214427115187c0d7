use crate::math::Vec2f;

use super::body::PhysicsBody;

/// Advances one body by a single tick of kinematic integration.
///
/// `delta = velocity*dt + 0.5*(acceleration + gravity)*dt²` per axis, with
/// gravity in the downward-positive convention, followed by resistance
/// damping. Marks the body as moved so the grid re-buckets it. Static bodies
/// are left untouched.
pub fn integrate(body: &mut PhysicsBody, gravity: Vec2f, resistance: f32, dt: f32) {
    if !body.is_dynamic() {
        return;
    }

    let physics = body.physics_mut();
    let delta = physics.velocity * dt + (physics.acceleration + gravity) * (0.5 * dt * dt);
    physics.move_position(delta);
    physics.apply_resistance(dt, resistance);
    body.moved = true;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dynamics::PhysicsBody;
    use crate::geometry::Shape;
    use std::sync::Arc;

    const DT: f32 = 1.0 / 60.0;
    const RESISTANCE: f32 = 2.0;

    fn dynamic_body() -> PhysicsBody {
        PhysicsBody::dynamic(Arc::new(Shape::rect(10.0, 10.0)), 1.0)
    }

    #[test]
    fn test_gravity_pulls_down() {
        let mut body = dynamic_body();
        let gravity = Vec2f::new(0.0, 9.81);

        for _ in 0..60 {
            integrate(&mut body, gravity, RESISTANCE, DT);
        }

        // downward-positive convention: the body falls toward +y
        assert!(body.position().y > 0.0);
        assert_eq!(body.position().x, 0.0);
        assert!(body.moved);
    }

    #[test]
    fn test_velocity_advances_position() {
        let mut body = dynamic_body();
        body.set_velocity(Vec2f::new(60.0, 0.0));

        integrate(&mut body, Vec2f::ZERO, RESISTANCE, DT);

        // one tick at 60 units/s moves roughly one unit, less drag
        assert!(body.position().x > 0.9);
        assert!(body.position().x <= 1.0);
    }

    #[test]
    fn test_static_body_never_integrates() {
        let mut body = PhysicsBody::fixed(Arc::new(Shape::rect(10.0, 10.0)));

        for _ in 0..100 {
            integrate(&mut body, Vec2f::new(0.0, 9.81), RESISTANCE, DT);
        }

        assert_eq!(body.position(), Vec2f::ZERO);
        assert!(!body.moved);
    }

    #[test]
    fn test_fall_is_strictly_downward() {
        let mut body = dynamic_body();
        let gravity = Vec2f::new(0.0, 9.81);

        let mut last_y = body.position().y;
        for _ in 0..120 {
            integrate(&mut body, gravity, RESISTANCE, DT);
            assert!(body.position().y > last_y);
            last_y = body.position().y;
        }
    }

    #[test]
    fn test_applied_force_decays() {
        let mut body = dynamic_body();
        body.set_force(Vec2f::new(100.0, 0.0));
        let initial = body.physics().acceleration.x;
        assert!(initial > 0.0);

        for _ in 0..60 {
            integrate(&mut body, Vec2f::ZERO, RESISTANCE, DT);
        }

        // resistance bleeds the acceleration away tick by tick
        assert!(body.physics().acceleration.x < initial);
        assert!(body.physics().acceleration.x >= 0.0);
    }
}
