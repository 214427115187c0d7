use std::ops::Index;

/// A generation-checked handle to a body owned by the spatial grid.
///
/// Handles stay cheap to copy and compare while making stale references
/// detectable: removing a body bumps the slot's generation, so any handle
/// kept by the caller afterwards simply stops resolving instead of dangling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BodyHandle {
    index: u32,
    generation: u32,
}

impl BodyHandle {
    /// Invalid/null body handle
    pub const INVALID: Self = Self {
        index: u32::MAX,
        generation: u32::MAX,
    };

    /// Creates a new body handle
    #[inline]
    pub(crate) fn new(index: u32, generation: u32) -> Self {
        Self { index, generation }
    }

    /// Returns the slot index of this handle
    #[inline]
    pub fn index(self) -> usize {
        self.index as usize
    }

    /// Returns the generation this handle was issued for
    #[inline]
    pub fn generation(self) -> u32 {
        self.generation
    }

    /// Returns true if this handle is valid
    #[inline]
    pub fn is_valid(self) -> bool {
        self != Self::INVALID
    }
}

impl Default for BodyHandle {
    fn default() -> Self {
        Self::INVALID
    }
}

/// Two bodies that collided during the current tick.
///
/// Entries live for exactly one tick: the world clears the collision list at
/// the start of every `update()`. Consume them before the next call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Collided {
    /// First collided body
    pub first: BodyHandle,
    /// Second collided body
    pub second: BodyHandle,
}

impl Collided {
    /// Creates a collision record for a pair of bodies
    #[inline]
    pub fn new(first: BodyHandle, second: BodyHandle) -> Self {
        Self { first, second }
    }

    /// Returns the body at `index` (0 or 1), or `None` for anything else
    #[inline]
    pub fn get(&self, index: usize) -> Option<BodyHandle> {
        match index {
            0 => Some(self.first),
            1 => Some(self.second),
            _ => None,
        }
    }
}

impl Index<usize> for Collided {
    type Output = BodyHandle;

    fn index(&self, index: usize) -> &BodyHandle {
        match index {
            0 => &self.first,
            1 => &self.second,
            _ => panic!("Collided holds exactly two bodies, index {index} is out of range"),
        }
    }
}

/// Returns true if two collision masks allow their bodies to interact.
///
/// Two bodies may collide only when their masks share no set bits. The
/// predicate is symmetric by construction.
#[inline]
pub fn can_collide(mask_a: u8, mask_b: u8) -> bool {
    mask_a & mask_b == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_can_collide_mask_logic() {
        assert!(can_collide(0b0000, 0b0000));
        assert!(can_collide(0b0101, 0b1010));
        assert!(!can_collide(0b0001, 0b0001));
        assert!(!can_collide(0b1111, 0b0100));
    }

    #[test]
    fn test_can_collide_is_symmetric() {
        for a in 0..=u8::MAX {
            for b in [0u8, 1, 2, 0x0f, 0xf0, 0xff] {
                assert_eq!(can_collide(a, b), can_collide(b, a));
            }
        }
    }

    #[test]
    fn test_collided_indexing() {
        let a = BodyHandle::new(0, 0);
        let b = BodyHandle::new(1, 0);
        let pair = Collided::new(a, b);

        assert_eq!(pair[0], a);
        assert_eq!(pair[1], b);
        assert_eq!(pair.get(0), Some(a));
        assert_eq!(pair.get(2), None);
    }

    #[test]
    fn test_invalid_handle() {
        assert!(!BodyHandle::INVALID.is_valid());
        assert!(BodyHandle::new(0, 0).is_valid());
        assert_ne!(BodyHandle::new(0, 0), BodyHandle::new(0, 1));
    }
}
