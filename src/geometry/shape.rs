use smallvec::SmallVec;
use thiserror::Error;

use crate::math::{consts::EPSILON, Vec2f};

use super::aabb::Aabb;

/// Errors from polygon construction
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ShapeError {
    /// The vertex list does not describe even a degenerate polygon
    #[error("a polygon needs at least 2 distinct vertices, got {0}")]
    TooFewVertices(usize),
}

/// An immutable convex polygon shared by any number of bodies.
///
/// The polygon is stored as a closed vertex ring (the first vertex repeated
/// as the last). Centroid, area, bounding corners and the SAT test axes are
/// all computed once at construction; the frame is never mutated afterwards,
/// so they stay valid for the shape's lifetime. Bodies of the same size
/// share one shape through an `Arc`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Shape {
    /// Closed vertex ring in local space
    frame: Vec<Vec2f>,
    /// Polygon centroid (shoelace formula)
    center: Vec2f,
    /// Polygon area, always non-negative
    area: f32,
    /// Componentwise minimum corner of the frame
    min: Vec2f,
    /// Componentwise maximum corner of the frame
    max: Vec2f,
    /// Unique unit edge normals, one per distinct edge direction
    axes: SmallVec<[Vec2f; 8]>,
}

impl Shape {
    /// Creates an axis-aligned box with corners `(0,0)`, `(w,0)`, `(w,h)`,
    /// `(0,h)`. Negative dimensions are absolute-valued; this constructor
    /// never fails.
    pub fn rect(width: f32, height: f32) -> Self {
        let w = width.abs();
        let h = height.abs();
        let frame = vec![
            Vec2f::ZERO,
            Vec2f::new(w, 0.0),
            Vec2f::new(w, h),
            Vec2f::new(0.0, h),
            Vec2f::ZERO,
        ];
        Self::from_closed_ring(frame)
    }

    /// Creates a convex polygon from an ordered vertex list.
    ///
    /// The ring is closed automatically (the first vertex is appended if the
    /// list does not already end with it). Returns an error when fewer than
    /// two distinct vertices are supplied.
    pub fn from_vertices(vertices: &[Vec2f]) -> Result<Self, ShapeError> {
        let mut frame: Vec<Vec2f> = vertices.to_vec();
        if let (Some(&first), Some(&last)) = (frame.first(), frame.last()) {
            if first != last {
                frame.push(first);
            }
        }
        // a closed ring of n distinct vertices has n + 1 entries
        if frame.len() < 3 {
            return Err(ShapeError::TooFewVertices(vertices.len()));
        }
        Ok(Self::from_closed_ring(frame))
    }

    fn from_closed_ring(frame: Vec<Vec2f>) -> Self {
        let (center, area) = centroid_and_area(&frame);
        let aabb = Aabb::from_points(&frame);
        let axes = edge_normals(&frame);
        Self {
            frame,
            center,
            area,
            min: aabb.min,
            max: aabb.max,
            axes,
        }
    }

    /// Returns the polygon centroid
    #[inline]
    pub fn center(&self) -> Vec2f {
        self.center
    }

    /// Returns the closed vertex ring
    #[inline]
    pub fn frame(&self) -> &[Vec2f] {
        &self.frame
    }

    /// Returns the componentwise minimum corner, or zero for an empty shape
    #[inline]
    pub fn min(&self) -> Vec2f {
        if self.frame.is_empty() {
            Vec2f::ZERO
        } else {
            self.min
        }
    }

    /// Returns the componentwise maximum corner, or zero for an empty shape
    #[inline]
    pub fn max(&self) -> Vec2f {
        if self.frame.is_empty() {
            Vec2f::ZERO
        } else {
            self.max
        }
    }

    /// Returns the polygon area (non-negative)
    #[inline]
    pub fn area(&self) -> f32 {
        self.area
    }

    /// Returns the number of edges in the ring, 0 for an empty shape
    #[inline]
    pub fn edge_count(&self) -> usize {
        self.frame.len().saturating_sub(1)
    }

    /// Returns the precomputed SAT axes: one unit edge normal per distinct
    /// edge direction
    #[inline]
    pub fn axes(&self) -> &[Vec2f] {
        &self.axes
    }

    /// Returns the bounding box in local space
    #[inline]
    pub fn local_aabb(&self) -> Aabb {
        Aabb::new(self.min(), self.max())
    }
}

/// Computes the polygon centroid and absolute area over a closed ring using
/// the shoelace formula. A two-point "line" falls back to the midpoint with
/// zero area.
fn centroid_and_area(frame: &[Vec2f]) -> (Vec2f, f32) {
    if frame.len() > 3 {
        let mut central = Vec2f::ZERO;
        let mut area2 = 0.0f32;
        for pair in frame.windows(2) {
            let cross = pair[0].x * pair[1].y - pair[1].x * pair[0].y;
            area2 += cross;
            central += (pair[0] + pair[1]) * cross;
        }
        let area = area2 * 0.5;
        if area.abs() > EPSILON {
            (central * (1.0 / (6.0 * area)), area.abs())
        } else {
            (Vec2f::ZERO, 0.0)
        }
    } else if frame.len() >= 2 {
        ((frame[0] + frame[1]) * 0.5, 0.0)
    } else {
        (Vec2f::ZERO, 0.0)
    }
}

/// Collects one unit normal per distinct edge direction of the ring
fn edge_normals(frame: &[Vec2f]) -> SmallVec<[Vec2f; 8]> {
    let mut axes: SmallVec<[Vec2f; 8]> = SmallVec::new();
    for pair in frame.windows(2) {
        let edge = pair[1] - pair[0];
        if edge.is_near_zero(EPSILON) {
            continue;
        }
        let normal = edge.perp().normalize();
        let duplicate = axes
            .iter()
            .any(|&a| (a - normal).is_near_zero(EPSILON));
        if !duplicate {
            axes.push(normal);
        }
    }
    axes
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_rect_frame_and_axes() {
        let shape = Shape::rect(100.0, 50.0);

        // 4 corners plus the closing repeat
        assert_eq!(shape.frame().len(), 5);
        assert_eq!(shape.edge_count(), 4);
        // 4 edges, 4 distinct directions
        assert_eq!(shape.axes().len(), 4);
        for axis in shape.axes() {
            assert_relative_eq!(axis.length(), 1.0, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_rect_area_and_center() {
        let shape = Shape::rect(100.0, 50.0);
        assert_relative_eq!(shape.area(), 5000.0);
        assert_relative_eq!(shape.center().x, 50.0);
        assert_relative_eq!(shape.center().y, 25.0);
    }

    #[test]
    fn test_negative_dimensions_are_corrected() {
        let shape = Shape::rect(-100.0, -50.0);
        assert_relative_eq!(shape.area(), 5000.0);
        assert_eq!(shape.max(), Vec2f::new(100.0, 50.0));
    }

    #[test]
    fn test_min_max_corners() {
        let shape = Shape::rect(20.0, 30.0);
        assert_eq!(shape.min(), Vec2f::ZERO);
        assert_eq!(shape.max(), Vec2f::new(20.0, 30.0));
    }

    #[test]
    fn test_empty_shape_min_max_are_zero() {
        let shape = Shape::default();
        assert_eq!(shape.min(), Vec2f::ZERO);
        assert_eq!(shape.max(), Vec2f::ZERO);
        assert_eq!(shape.edge_count(), 0);
    }

    #[test]
    fn test_from_vertices_triangle() {
        let shape = Shape::from_vertices(&[
            Vec2f::ZERO,
            Vec2f::new(10.0, 0.0),
            Vec2f::new(0.0, 10.0),
        ])
        .unwrap();

        assert_eq!(shape.edge_count(), 3);
        assert_eq!(shape.axes().len(), 3);
        assert_relative_eq!(shape.area(), 50.0);
    }

    #[test]
    fn test_from_vertices_rejects_too_few() {
        assert_eq!(
            Shape::from_vertices(&[Vec2f::ZERO]),
            Err(ShapeError::TooFewVertices(1))
        );
        assert_eq!(Shape::from_vertices(&[]), Err(ShapeError::TooFewVertices(0)));
    }

    #[test]
    fn test_degenerate_line_uses_midpoint() {
        let shape = Shape::from_vertices(&[Vec2f::ZERO, Vec2f::new(10.0, 0.0)]).unwrap();
        assert_relative_eq!(shape.center().x, 5.0);
        assert_relative_eq!(shape.area(), 0.0);
    }
}
