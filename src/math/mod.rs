mod rect;
mod vec2;

pub use rect::Rect;
pub use vec2::{Vec2, Vec2f, Vec2i};

/// Common math constants
pub mod consts {
    /// A small epsilon value for floating point comparisons
    pub const EPSILON: f32 = 1e-6;

    /// Pi constant
    pub const PI: f32 = std::f32::consts::PI;

    /// Two times Pi
    pub const TAU: f32 = std::f32::consts::TAU;
}

/// Utility functions
pub mod utils {
    /// Returns true if two floats are approximately equal
    #[inline]
    pub fn approx_eq(a: f32, b: f32, epsilon: f32) -> bool {
        (a - b).abs() < epsilon
    }

    /// Converts degrees to radians
    #[inline]
    pub fn deg_to_rad(degrees: f32) -> f32 {
        degrees * (std::f32::consts::PI / 180.0)
    }
}
