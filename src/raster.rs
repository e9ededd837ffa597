//! Indexed-color pixel buffers.
//!
//! Color index 0 is background. Indices `1..=MAX_CHARGE + 1` are
//! conductive pixels carrying charge `index - 1`; anything above that is
//! decoration and is treated like background.

use serde::{Deserialize, Serialize};

use crate::{vector::Vec2i, Error, Result, MAX_CHARGE};

/// Charge level of a palette index, or `None` if the pixel does not conduct.
pub fn classify(index: u8) -> Option<u8> {
    index.checked_sub(1).filter(|charge| *charge <= MAX_CHARGE)
}

/// Palette index used to paint a wire carrying `charge`.
pub fn color_for_charge(charge: u8) -> u8 {
    charge.min(MAX_CHARGE) + 1
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Raster {
    width: usize,
    height: usize,
    pixels: Vec<u8>,
}

impl Raster {
    /// Blank (all background) raster.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; width * height],
        }
    }

    pub fn from_pixels(width: usize, height: usize, pixels: Vec<u8>) -> Result<Self> {
        if pixels.len() != width * height {
            return Err(Error::RasterSize {
                width,
                height,
                found: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Builds a raster from rows of color indices. Short rows are padded
    /// with background so ragged input still yields a rectangle.
    pub fn from_rows<R: AsRef<[u8]>>(rows: &[R]) -> Self {
        let width = rows.iter().map(|r| r.as_ref().len()).max().unwrap_or(0);
        let mut raster = Self::new(width, rows.len());
        for (y, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            raster.pixels[y * width..y * width + row.len()].copy_from_slice(row);
        }
        raster
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// A blank raster of the same dimensions.
    pub fn blank_like(&self) -> Self {
        Self::new(self.width, self.height)
    }

    fn offset(&self, pos: Vec2i) -> Option<usize> {
        let x = usize::try_from(pos.x).ok()?;
        let y = usize::try_from(pos.y).ok()?;
        (x < self.width && y < self.height).then(|| y * self.width + x)
    }

    /// Color index at `pos`; out-of-bounds reads as background.
    pub fn color_index(&self, pos: Vec2i) -> u8 {
        self.offset(pos).map_or(0, |i| self.pixels[i])
    }

    /// Out-of-bounds writes are dropped.
    pub fn set_color_index(&mut self, pos: Vec2i, index: u8) {
        if let Some(i) = self.offset(pos) {
            self.pixels[i] = index;
        }
    }

    /// Charge level at `pos`, or `None` for non-conductive pixels.
    pub fn charge_at(&self, pos: Vec2i) -> Option<u8> {
        classify(self.color_index(pos))
    }
}
