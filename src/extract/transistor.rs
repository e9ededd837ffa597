//! Transistor notch recognition.
//!
//! A transistor is a background pixel with conductors on three of its
//! four sides. The open side and the two diagonals flanking the opposite
//! side must be background; the wire facing the open side becomes the
//! base and the two wires beside it become the inputs.
//!
//! ```text
//!  open top        open right      open bottom     open left
//!   _  .  _         .  A  _         . base .        _  A  .
//!   B  x  A        base x  .        B  x  A         .  x base
//!   . base .        .  B  _         _  .  _         _  B  .
//! ```
//!
//! (`.` background, `_` don't care, `x` the notch pixel)

use super::matrix::Neighborhood;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Terminals<T> {
    pub base: T,
    pub input_a: T,
    pub input_b: T,
}

/// Matches the four notch rotations against the resolved neighbors of a
/// background pixel. The rotations are mutually exclusive since each one
/// needs a different side open.
pub fn detect<T: Copy>(n: &Neighborhood<Option<T>>) -> Option<Terminals<T>> {
    let terminals = |base, input_a, input_b| Terminals {
        base,
        input_a,
        input_b,
    };

    match (n.top, n.right, n.bottom, n.left) {
        (None, Some(right), Some(bottom), Some(left))
            if n.bottom_left.is_none() && n.bottom_right.is_none() =>
        {
            Some(terminals(bottom, right, left))
        }
        (Some(top), None, Some(bottom), Some(left))
            if n.bottom_left.is_none() && n.top_left.is_none() =>
        {
            Some(terminals(left, top, bottom))
        }
        (Some(top), Some(right), None, Some(left))
            if n.top_left.is_none() && n.top_right.is_none() =>
        {
            Some(terminals(top, right, left))
        }
        (Some(top), Some(right), Some(bottom), None)
            if n.bottom_right.is_none() && n.top_right.is_none() =>
        {
            Some(terminals(right, top, bottom))
        }
        _ => None,
    }
}
