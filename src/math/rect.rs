use std::ops::Add;

use super::vec2::Vec2;

/// An axis-aligned rectangle defined by its upper-left corner and size.
///
/// The grid uses `Rect<i32>` for cell bounds. Containment is inclusive of
/// the rectangle frame on all four edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rect<T> {
    /// Upper-left corner
    pub pos: Vec2<T>,
    pub width: T,
    pub height: T,
}

impl<T: Copy> Rect<T> {
    /// Creates a rectangle from its upper-left corner, width and height
    #[inline]
    pub const fn new(pos: Vec2<T>, width: T, height: T) -> Self {
        Self { pos, width, height }
    }

    /// Returns the upper-left corner
    #[inline]
    pub fn position(&self) -> Vec2<T> {
        self.pos
    }
}

impl<T: Copy + Add<Output = T> + PartialOrd> Rect<T> {
    /// Returns the lower-right corner
    #[inline]
    pub fn max_corner(&self) -> Vec2<T> {
        Vec2::new(self.pos.x + self.width, self.pos.y + self.height)
    }

    /// Returns true if the rectangle contains the point, frame inclusive.
    ///
    /// This is the grid's cell lookup predicate: an explicit
    /// point-in-rectangle test rather than any vector ordering.
    #[inline]
    pub fn contains(&self, point: Vec2<T>) -> bool {
        let max = self.max_corner();
        point.x >= self.pos.x && point.x <= max.x && point.y >= self.pos.y && point.y <= max.y
    }
}
