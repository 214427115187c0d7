use std::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign};

/// A generic 2D vector.
///
/// Used throughout the engine for positions, velocities, forces and grid
/// coordinates. Float-specific helpers (length, normalize, rotate) live on
/// [`Vec2f`]; integer vectors are used for grid cell coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(C)]
pub struct Vec2<T> {
    pub x: T,
    pub y: T,
}

/// 2D vector of `f32`, the engine's working precision
pub type Vec2f = Vec2<f32>;
/// 2D vector of `i32`, used for grid-space coordinates
pub type Vec2i = Vec2<i32>;

impl<T> Vec2<T> {
    /// Creates a new vector from components
    #[inline]
    pub const fn new(x: T, y: T) -> Self {
        Self { x, y }
    }

    /// Sets both components in place
    #[inline]
    pub fn update(&mut self, x: T, y: T) {
        self.x = x;
        self.y = y;
    }
}

impl<T: Copy + PartialOrd> Vec2<T> {
    /// Componentwise-AND less-than: true only if *both* components are less.
    ///
    /// This is a partial order, not a total one: `!a.all_lt(b)` does not
    /// imply `a.all_ge(b)`. Two unequal vectors can be mutually "not less"
    /// and "not greater". `PartialOrd` is intentionally not implemented so
    /// no call site can assume lexicographic ordering.
    #[inline]
    pub fn all_lt(self, other: Self) -> bool {
        self.x < other.x && self.y < other.y
    }

    /// Componentwise-AND greater-than
    #[inline]
    pub fn all_gt(self, other: Self) -> bool {
        self.x > other.x && self.y > other.y
    }

    /// Componentwise-AND less-than-or-equal
    #[inline]
    pub fn all_le(self, other: Self) -> bool {
        self.x <= other.x && self.y <= other.y
    }

    /// Componentwise-AND greater-than-or-equal
    #[inline]
    pub fn all_ge(self, other: Self) -> bool {
        self.x >= other.x && self.y >= other.y
    }
}

impl Vec2f {
    /// Zero vector (0, 0)
    pub const ZERO: Self = Self::new(0.0, 0.0);

    /// Unit vector along X axis (1, 0)
    pub const X: Self = Self::new(1.0, 0.0);

    /// Unit vector along Y axis (0, 1)
    pub const Y: Self = Self::new(0.0, 1.0);

    /// Dot product of two vectors
    #[inline]
    pub fn dot(self, other: Self) -> f32 {
        self.x * other.x + self.y * other.y
    }

    /// Squared length of the vector (avoids sqrt)
    #[inline]
    pub fn length_squared(self) -> f32 {
        self.dot(self)
    }

    /// Length (magnitude) of the vector
    #[inline]
    pub fn length(self) -> f32 {
        self.length_squared().sqrt()
    }

    /// Returns a normalized (unit length) version of the vector.
    /// Returns the zero vector if the input is zero or near-zero.
    #[inline]
    pub fn normalize(self) -> Self {
        let len_sq = self.length_squared();
        if len_sq > 1e-10 {
            let inv = 1.0 / len_sq.sqrt();
            Self::new(self.x * inv, self.y * inv)
        } else {
            Self::ZERO
        }
    }

    /// Rotates the vector by `angle` radians (counter-clockwise in a
    /// y-down coordinate system this turns clockwise on screen)
    #[inline]
    pub fn rotate(self, angle: f32) -> Self {
        let (sin, cos) = angle.sin_cos();
        Self::new(self.x * cos - self.y * sin, self.x * sin + self.y * cos)
    }

    /// Returns the vector rotated 90 degrees (perpendicular)
    #[inline]
    pub fn perp(self) -> Self {
        Self::new(-self.y, self.x)
    }

    /// Componentwise minimum
    #[inline]
    pub fn min(self, other: Self) -> Self {
        Self::new(self.x.min(other.x), self.y.min(other.y))
    }

    /// Componentwise maximum
    #[inline]
    pub fn max(self, other: Self) -> Self {
        Self::new(self.x.max(other.x), self.y.max(other.y))
    }

    /// Componentwise absolute value
    #[inline]
    pub fn abs(self) -> Self {
        Self::new(self.x.abs(), self.y.abs())
    }

    /// Returns true if the vector is approximately zero
    #[inline]
    pub fn is_near_zero(self, epsilon: f32) -> bool {
        self.length_squared() < epsilon * epsilon
    }
}

// Operator overloads

impl<T: Add<Output = T>> Add for Vec2<T> {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Self::new(self.x + other.x, self.y + other.y)
    }
}

impl<T: Copy + Add<Output = T>> AddAssign for Vec2<T> {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.x = self.x + other.x;
        self.y = self.y + other.y;
    }
}

impl<T: Sub<Output = T>> Sub for Vec2<T> {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Self::new(self.x - other.x, self.y - other.y)
    }
}

impl<T: Copy + Sub<Output = T>> SubAssign for Vec2<T> {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.x = self.x - other.x;
        self.y = self.y - other.y;
    }
}

/// Componentwise multiplication (Hadamard product)
impl<T: Mul<Output = T>> Mul for Vec2<T> {
    type Output = Self;

    #[inline]
    fn mul(self, other: Self) -> Self {
        Self::new(self.x * other.x, self.y * other.y)
    }
}

impl<T: Copy + Mul<Output = T>> Mul<T> for Vec2<T> {
    type Output = Self;

    #[inline]
    fn mul(self, scalar: T) -> Self {
        Self::new(self.x * scalar, self.y * scalar)
    }
}

impl<T: Copy + Mul<Output = T>> MulAssign<T> for Vec2<T> {
    #[inline]
    fn mul_assign(&mut self, scalar: T) {
        self.x = self.x * scalar;
        self.y = self.y * scalar;
    }
}

impl<T: Neg<Output = T>> Neg for Vec2<T> {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Self::new(-self.x, -self.y)
    }
}

impl Mul<Vec2f> for f32 {
    type Output = Vec2f;

    #[inline]
    fn mul(self, vec: Vec2f) -> Vec2f {
        Vec2f::new(self * vec.x, self * vec.y)
    }
}

impl From<Vec2f> for Vec2i {
    #[inline]
    fn from(v: Vec2f) -> Self {
        Self::new(v.x as i32, v.y as i32)
    }
}

impl From<Vec2i> for Vec2f {
    #[inline]
    fn from(v: Vec2i) -> Self {
        Self::new(v.x as f32, v.y as f32)
    }
}
