use std::ops::Add;

use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Vec2i {
    pub x: i32,
    pub y: i32,
}

impl Vec2i {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl Add for Vec2i {
    type Output = Vec2i;

    fn add(self, rhs: Self) -> Self::Output {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl From<(i32, i32)> for Vec2i {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

/// Half-open pixel rectangle, `min` inclusive and `max` exclusive.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rect {
    pub min: Vec2i,
    pub max: Vec2i,
}

impl Rect {
    pub const fn new(min: Vec2i, max: Vec2i) -> Self {
        Self { min, max }
    }

    /// The 1x1 cell covering a single pixel.
    pub fn pixel(pos: Vec2i) -> Self {
        Self::new(pos, pos + Vec2i::new(1, 1))
    }

    pub fn is_empty(&self) -> bool {
        self.min.x >= self.max.x || self.min.y >= self.max.y
    }

    pub fn width(&self) -> i32 {
        (self.max.x - self.min.x).max(0)
    }

    pub fn height(&self) -> i32 {
        (self.max.y - self.min.y).max(0)
    }

    pub fn contains(&self, pos: Vec2i) -> bool {
        pos.x >= self.min.x && pos.x < self.max.x && pos.y >= self.min.y && pos.y < self.max.y
    }

    /// Smallest rectangle covering both. Empty rectangles do not contribute.
    pub fn union(self, other: Rect) -> Rect {
        if self.is_empty() {
            return other;
        }
        if other.is_empty() {
            return self;
        }
        Rect {
            min: Vec2i::new(self.min.x.min(other.min.x), self.min.y.min(other.min.y)),
            max: Vec2i::new(self.max.x.max(other.max.x), self.max.y.max(other.max.y)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn union_ignores_empty() {
        let cell = Rect::pixel(Vec2i::new(4, 2));
        assert_eq!(Rect::default().union(cell), cell);
        assert_eq!(cell.union(Rect::default()), cell);
    }

    #[test]
    fn union_grows_to_cover_both() {
        let a = Rect::pixel(Vec2i::new(0, 0));
        let b = Rect::pixel(Vec2i::new(2, 3));
        let u = a.union(b);
        assert_eq!(u, Rect::new(Vec2i::new(0, 0), Vec2i::new(3, 4)));
        assert_eq!((u.width(), u.height()), (3, 4));
        assert!(u.contains(Vec2i::new(1, 1)));
        assert!(!u.contains(Vec2i::new(3, 0)));
    }
}
