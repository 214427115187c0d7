use crate::dynamics::PhysicsBody;

/// Cheap AABB early-out: returns true if two bodies could collide this tick.
///
/// The first body's bounding box is taken at its current position and also
/// projected forward by one tick of its velocity; the pair is rejected only
/// when the boxes are separated both now and after the projection. This is
/// an approximate test and must run before the exact SAT phase for every
/// candidate pair.
pub fn objects_close(a: &PhysicsBody, b: &PhysicsBody) -> bool {
    let vel = a.physics().velocity;
    let min_a = a.min_position();
    let max_a = a.max_position();
    let min_b = b.min_position();
    let max_b = b.max_position();

    // separated along x, both now and after one tick of travel
    if (max_a.x < min_b.x && max_a.x + vel.x < min_b.x)
        || (min_a.x > max_b.x && min_a.x + vel.x > max_b.x)
    {
        return false;
    }

    // separated along y likewise
    if (max_a.y < min_b.y && max_a.y + vel.y < min_b.y)
        || (min_a.y > max_b.y && min_a.y + vel.y > max_b.y)
    {
        return false;
    }

    true
}
