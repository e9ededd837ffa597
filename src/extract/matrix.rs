use crate::vector::Vec2i;

/// The eight pixels surrounding a position.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Neighborhood<T> {
    pub top_left: T,
    pub top: T,
    pub top_right: T,
    pub left: T,
    pub right: T,
    pub bottom_left: T,
    pub bottom: T,
    pub bottom_right: T,
}

impl<T> Neighborhood<T> {
    pub fn map<U>(self, mut f: impl FnMut(T) -> U) -> Neighborhood<U> {
        Neighborhood {
            top_left: f(self.top_left),
            top: f(self.top),
            top_right: f(self.top_right),
            left: f(self.left),
            right: f(self.right),
            bottom_left: f(self.bottom_left),
            bottom: f(self.bottom),
            bottom_right: f(self.bottom_right),
        }
    }
}

impl<T> Neighborhood<Option<T>> {
    pub fn diagonals_empty(&self) -> bool {
        self.top_left.is_none()
            && self.top_right.is_none()
            && self.bottom_left.is_none()
            && self.bottom_right.is_none()
    }
}

/// Per-pixel region handles for one extraction. Cells outside the raster
/// read as empty.
#[derive(Debug)]
pub struct RegionMatrix<T> {
    width: usize,
    height: usize,
    cells: Vec<Option<T>>,
}

impl<T: Copy> RegionMatrix<T> {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![None; width * height],
        }
    }

    fn offset(&self, pos: Vec2i) -> Option<usize> {
        let x = usize::try_from(pos.x).ok()?;
        let y = usize::try_from(pos.y).ok()?;
        (x < self.width && y < self.height).then(|| y * self.width + x)
    }

    pub fn get(&self, pos: Vec2i) -> Option<T> {
        self.offset(pos).and_then(|i| self.cells[i])
    }

    pub fn set(&mut self, pos: Vec2i, value: T) {
        if let Some(i) = self.offset(pos) {
            self.cells[i] = Some(value);
        }
    }

    pub fn neighborhood(&self, pos: Vec2i) -> Neighborhood<Option<T>> {
        let at = |dx, dy| self.get(pos + Vec2i::new(dx, dy));
        Neighborhood {
            top_left: at(-1, -1),
            top: at(0, -1),
            top_right: at(1, -1),
            left: at(-1, 0),
            right: at(1, 0),
            bottom_left: at(-1, 1),
            bottom: at(0, 1),
            bottom_right: at(1, 1),
        }
    }
}
