use crate::math::Vec2f;

/// An axis-aligned bounding box defined by minimum and maximum corners.
///
/// Used by the broad phase to reject body pairs before the exact SAT test.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Minimum corner (smallest x, y values)
    pub min: Vec2f,
    /// Maximum corner (largest x, y values)
    pub max: Vec2f,
}

impl Default for Aabb {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl Aabb {
    /// An empty AABB that contains no points
    pub const EMPTY: Self = Self {
        min: Vec2f::new(f32::INFINITY, f32::INFINITY),
        max: Vec2f::new(f32::NEG_INFINITY, f32::NEG_INFINITY),
    };

    /// Creates an AABB from minimum and maximum corners
    #[inline]
    pub const fn new(min: Vec2f, max: Vec2f) -> Self {
        Self { min, max }
    }

    /// Creates an AABB that contains all of the given points
    #[inline]
    pub fn from_points(points: &[Vec2f]) -> Self {
        let mut aabb = Self::EMPTY;
        for &point in points {
            aabb = aabb.expand_to_include(point);
        }
        aabb
    }

    /// Returns the center of the AABB
    #[inline]
    pub fn center(self) -> Vec2f {
        (self.min + self.max) * 0.5
    }

    /// Returns the full size (extents) of the AABB
    #[inline]
    pub fn size(self) -> Vec2f {
        self.max - self.min
    }

    /// Returns true if this AABB intersects another AABB
    #[inline]
    pub fn intersects(self, other: Self) -> bool {
        self.min.x <= other.max.x
            && self.max.x >= other.min.x
            && self.min.y <= other.max.y
            && self.max.y >= other.min.y
    }

    /// Returns true if this AABB contains the given point
    #[inline]
    pub fn contains_point(self, point: Vec2f) -> bool {
        point.x >= self.min.x && point.x <= self.max.x && point.y >= self.min.y && point.y <= self.max.y
    }

    /// Returns a new AABB expanded to include a point
    #[inline]
    pub fn expand_to_include(self, point: Vec2f) -> Self {
        Self {
            min: self.min.min(point),
            max: self.max.max(point),
        }
    }

    /// Returns the AABB translated by `offset`
    #[inline]
    pub fn translate(self, offset: Vec2f) -> Self {
        Self {
            min: self.min + offset,
            max: self.max + offset,
        }
    }

    /// Returns the AABB grown to cover one tick of motion along `velocity`.
    ///
    /// The box is extended in the direction of travel only; this is what the
    /// broad phase uses so that a moving body is not rejected against an
    /// obstacle it will reach within the tick.
    #[inline]
    pub fn swept(self, velocity: Vec2f) -> Self {
        Self {
            min: self.min.min(self.min + velocity),
            max: self.max.max(self.max + velocity),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intersects() {
        let a = Aabb::new(Vec2f::ZERO, Vec2f::new(1.0, 1.0));
        let b = Aabb::new(Vec2f::new(0.5, 0.5), Vec2f::new(1.5, 1.5));
        let c = Aabb::new(Vec2f::new(2.0, 0.0), Vec2f::new(3.0, 1.0));

        assert!(a.intersects(b));
        assert!(b.intersects(a));
        assert!(!a.intersects(c));
    }

    #[test]
    fn test_from_points() {
        let points = [
            Vec2f::new(1.0, 2.0),
            Vec2f::new(-1.0, 0.0),
            Vec2f::new(0.0, -2.0),
        ];
        let aabb = Aabb::from_points(&points);

        assert_eq!(aabb.min, Vec2f::new(-1.0, -2.0));
        assert_eq!(aabb.max, Vec2f::new(1.0, 2.0));
    }

    #[test]
    fn test_swept_extends_toward_velocity() {
        let aabb = Aabb::new(Vec2f::ZERO, Vec2f::new(1.0, 1.0));
        let swept = aabb.swept(Vec2f::new(2.0, -3.0));

        assert_eq!(swept.min, Vec2f::new(0.0, -3.0));
        assert_eq!(swept.max, Vec2f::new(3.0, 1.0));
    }

    #[test]
    fn test_translate() {
        let aabb = Aabb::new(Vec2f::ZERO, Vec2f::new(1.0, 1.0)).translate(Vec2f::new(5.0, 5.0));
        assert_eq!(aabb.min, Vec2f::new(5.0, 5.0));
        assert_eq!(aabb.max, Vec2f::new(6.0, 6.0));
    }
}
