use crate::dynamics::PhysicsBody;
use crate::geometry::Shape;
use crate::math::Vec2f;

use super::broad_phase::objects_close;
use super::contact::can_collide;

/// The interval a polygon covers when projected onto an axis
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    pub min: f32,
    pub max: f32,
}

impl Projection {
    /// Returns true if two projection intervals overlap
    #[inline]
    pub fn overlaps(self, other: Self) -> bool {
        !(self.max < other.min || other.max < self.min)
    }

    /// Returns the length of the overlapping interval (negative when
    /// disjoint)
    #[inline]
    pub fn overlap_depth(self, other: Self) -> f32 {
        self.max.min(other.max) - self.min.max(other.min)
    }
}

/// Result of a positive narrow-phase test: the minimum-translation axis and
/// how deep the shapes interpenetrate along it
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    /// Unit separation axis, oriented from the first body toward the second
    pub normal: Vec2f,
    /// Penetration depth along `normal`
    pub depth: f32,
}

/// Projects every frame vertex of `shape` onto `axis`, after translating by
/// the body position and rotating by the body angle, and returns the covered
/// interval.
pub fn project_shape(shape: &Shape, position: Vec2f, angle: f32, axis: Vec2f) -> Projection {
    let mut min = f32::INFINITY;
    let mut max = f32::NEG_INFINITY;
    for &vertex in shape.frame() {
        let world = position + vertex.rotate(angle);
        let s = world.dot(axis);
        min = min.min(s);
        max = max.max(s);
    }
    Projection { min, max }
}

/// Exact SAT overlap test between two bodies.
///
/// Projects both polygons onto every axis in the union of their precomputed
/// axis sets. A single axis with disjoint projections proves separation; if
/// all axes overlap the convex shapes collide, and the axis with the
/// smallest overlap becomes the contact normal (oriented from `a` to `b`).
pub fn polygons_overlap(a: &PhysicsBody, b: &PhysicsBody) -> Option<Contact> {
    let pos_a = a.position();
    let pos_b = b.position();
    let angle_a = a.physics().angle;
    let angle_b = b.physics().angle;

    let mut best_depth = f32::INFINITY;
    let mut best_axis = Vec2f::ZERO;

    let axes = a.shape().axes().iter().chain(b.shape().axes().iter());
    for &axis in axes {
        let proj_a = project_shape(a.shape(), pos_a, angle_a, axis);
        let proj_b = project_shape(b.shape(), pos_b, angle_b, axis);
        // exact touching does not count: a resolved pair must not
        // re-trigger on the next tick
        let depth = proj_a.overlap_depth(proj_b);
        if depth <= 0.0 {
            return None;
        }
        if depth < best_depth {
            best_depth = depth;
            best_axis = axis;
        }
    }

    if best_axis == Vec2f::ZERO {
        // axis-less degenerate shapes cannot produce a contact
        return None;
    }

    // orient the normal from a toward b
    let ab = (pos_b + b.shape().center()) - (pos_a + a.shape().center());
    let normal = if ab.dot(best_axis) < 0.0 {
        -best_axis
    } else {
        best_axis
    };

    Some(Contact {
        normal,
        depth: best_depth,
    })
}

/// Full two-phase collision test between two bodies.
///
/// Gates on the collision masks, rejects distant pairs with the broad phase,
/// then runs the exact SAT test. Returns the contact when the bodies
/// collide.
pub fn calculate_collision(a: &PhysicsBody, b: &PhysicsBody) -> Option<Contact> {
    if !can_collide(a.collision_mask(), b.collision_mask()) {
        return None;
    }
    if !objects_close(a, b) {
        return None;
    }
    polygons_overlap(a, b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Shape;
    use std::sync::Arc;

    fn box_at(size: f32, x: f32, y: f32) -> PhysicsBody {
        let mut body = PhysicsBody::dynamic(Arc::new(Shape::rect(size, size)), 1.0);
        body.set_position(Vec2f::new(x, y));
        body
    }

    #[test]
    fn test_overlapping_boxes_collide() {
        // 100-wide boxes 50 apart overlap by 50
        let a = box_at(100.0, 200.0, 200.0);
        let b = box_at(100.0, 250.0, 200.0);

        let contact = calculate_collision(&a, &b).expect("boxes overlap");
        assert!((contact.depth - 50.0).abs() < 1e-3);
        // normal points from a toward b, along +x
        assert!(contact.normal.x > 0.9);
    }

    #[test]
    fn test_separated_boxes_do_not_collide() {
        let a = box_at(100.0, 300.5, 100.0);
        let b = box_at(100.0, 200.0, 200.0);
        assert_eq!(calculate_collision(&a, &b), None);
    }

    #[test]
    fn test_far_apart_pair_rejected_by_broad_phase() {
        let a = box_at(100.0, 0.0, 0.0);
        let b = box_at(100.0, 5000.0, 5000.0);
        assert_eq!(calculate_collision(&a, &b), None);
    }

    #[test]
    fn test_mask_gates_the_pair() {
        let mut a = box_at(100.0, 200.0, 200.0);
        let mut b = box_at(100.0, 250.0, 200.0);

        a.set_collision_mask(0b0001);
        b.set_collision_mask(0b0001);
        assert_eq!(calculate_collision(&a, &b), None);

        b.set_collision_mask(0b0010);
        assert!(calculate_collision(&a, &b).is_some());
    }

    #[test]
    fn test_projection_tracks_extent() {
        let shape = Shape::rect(10.0, 10.0);
        let proj = project_shape(&shape, Vec2f::new(5.0, 0.0), 0.0, Vec2f::X);
        assert!((proj.min - 5.0).abs() < 1e-6);
        assert!((proj.max - 15.0).abs() < 1e-6);
    }

    #[test]
    fn test_touching_edges_are_not_a_collision() {
        let a = box_at(100.0, 0.0, 0.0);
        let b = box_at(100.0, 100.0, 0.0);
        // shared edge, zero penetration
        assert_eq!(polygons_overlap(&a, &b), None);
    }

    #[test]
    fn test_rotated_body_projects_rotated_vertices() {
        let mut a = box_at(100.0, 0.0, 0.0);
        // rotate 45 degrees: the x-extent grows to the diagonal
        a.physics_mut().angle = std::f32::consts::FRAC_PI_4;
        let proj = project_shape(a.shape(), a.position(), a.physics().angle, Vec2f::X);
        let extent = proj.max - proj.min;
        assert!((extent - 100.0 * 2.0_f32.sqrt()).abs() < 1e-2);
    }
}
