//! Input handling.
//!
//! The windowing layer answers "is this key held right now?". This module
//! turns that into at most one unit movement per frame.

use crate::math::IVec2;

bitflags::bitflags! {
    /// Directional keys.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Keys: u8 {
        const LEFT = 1 << 0;
        const RIGHT = 1 << 1;
        const DOWN = 1 << 2;
        const UP = 1 << 3;
    }
}

impl Default for Keys {
    fn default() -> Self {
        Keys::empty()
    }
}

impl Keys {
    /// Parses a key name as typed on the console (`left`, `r`, `Up`, ...).
    pub fn from_key_word(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "left" | "l" | "a" => Some(Keys::LEFT),
            "right" | "r" | "d" => Some(Keys::RIGHT),
            "down" | "s" => Some(Keys::DOWN),
            "up" | "u" | "w" => Some(Keys::UP),
            _ => None,
        }
    }
}

/// Keyboard state query.
pub trait InputSource {
    fn is_key_pressed(&self, key: Keys) -> bool;

    /// Called once at the start of every frame, before any query.
    fn begin_frame(&mut self) {}
}

/// A plain set of held keys is its own input source.
impl InputSource for Keys {
    fn is_key_pressed(&self, key: Keys) -> bool {
        self.contains(key)
    }
}

/// Unit delta for this frame. Left wins over right, right over down, down
/// over up; only one direction ever applies.
pub fn movement_delta<I: InputSource + ?Sized>(input: &I) -> IVec2 {
    if input.is_key_pressed(Keys::LEFT) {
        IVec2::LEFT
    } else if input.is_key_pressed(Keys::RIGHT) {
        IVec2::RIGHT
    } else if input.is_key_pressed(Keys::DOWN) {
        IVec2::DOWN
    } else if input.is_key_pressed(Keys::UP) {
        IVec2::UP
    } else {
        IVec2::ZERO
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_key_combination_yields_one_direction() {
        for bits in 0..=Keys::all().bits() {
            let keys = Keys::from_bits_truncate(bits);
            let expected = if keys.contains(Keys::LEFT) {
                IVec2::LEFT
            } else if keys.contains(Keys::RIGHT) {
                IVec2::RIGHT
            } else if keys.contains(Keys::DOWN) {
                IVec2::DOWN
            } else if keys.contains(Keys::UP) {
                IVec2::UP
            } else {
                IVec2::ZERO
            };
            let delta = movement_delta(&keys);
            assert_eq!(delta, expected, "keys {keys:?}");
            assert!(delta.x.abs() + delta.y.abs() <= 1);
        }
    }

    #[test]
    fn opposite_keys_do_not_cancel() {
        assert_eq!(movement_delta(&(Keys::LEFT | Keys::RIGHT)), IVec2::LEFT);
        assert_eq!(movement_delta(&(Keys::UP | Keys::DOWN)), IVec2::DOWN);
    }

    #[test]
    fn key_names() {
        assert_eq!(Keys::from_key_word("LEFT"), Some(Keys::LEFT));
        assert_eq!(Keys::from_key_word("w"), Some(Keys::UP));
        assert_eq!(Keys::from_key_word("jump"), None);
        // Console words, not the flag identifiers.
        assert_eq!(Keys::from_key_word("right"), Some(Keys::RIGHT));
        assert_eq!(Keys::from_key_word("DOWN"), Some(Keys::DOWN));
    }
}
