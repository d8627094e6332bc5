//! Math types.
//!
//! Positions and movement deltas are whole screen pixels, so everything here
//! is integer and exact.

use std::ops::AddAssign;

use serde::{Deserialize, Serialize};

/// 2D integer vector, used both for positions and for movement deltas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct IVec2 {
    pub x: i32,
    pub y: i32,
}

impl IVec2 {
    pub const ZERO: Self = Self { x: 0, y: 0 };
    pub const LEFT: Self = Self { x: -1, y: 0 };
    pub const RIGHT: Self = Self { x: 1, y: 0 };
    /// Screen space: y grows downwards.
    pub const DOWN: Self = Self { x: 0, y: 1 };
    pub const UP: Self = Self { x: 0, y: -1 };

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn is_zero(self) -> bool {
        self == Self::ZERO
    }

    /// Component-wise add, `None` on overflow.
    pub fn checked_add(self, rhs: Self) -> Option<Self> {
        Some(Self::new(self.x.checked_add(rhs.x)?, self.y.checked_add(rhs.y)?))
    }
}

impl AddAssign for IVec2 {
    fn add_assign(&mut self, rhs: Self) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_assign_accumulates() {
        let mut p = IVec2::new(200, 200);
        p += IVec2::RIGHT;
        p += IVec2::UP;
        assert_eq!(p, IVec2::new(201, 199));
    }

    #[test]
    fn checked_add_rejects_overflow() {
        assert_eq!(
            IVec2::new(1, 2).checked_add(IVec2::new(3, -4)),
            Some(IVec2::new(4, -2))
        );
        assert_eq!(IVec2::new(i32::MAX, 0).checked_add(IVec2::RIGHT), None);
    }

    #[test]
    fn unit_directions_are_distinct() {
        let dirs = [IVec2::LEFT, IVec2::RIGHT, IVec2::DOWN, IVec2::UP];
        for (i, a) in dirs.iter().enumerate() {
            assert!(!a.is_zero());
            for b in &dirs[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }
}
