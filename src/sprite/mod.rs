//! Bitmap sprites
//!
//! A sprite is an opacity mask only; colour is chosen by whoever blits it.
//! Sprites are immutable once built and are shared between animation frames
//! and entities through `Rc`.

mod animation;
pub mod assets;

pub use animation::SpriteAnimation;

use crate::error::{Error, Result};

/// Opacity mask, row-major with row 0 at the visual top. Nonzero = opaque.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sprite {
    width: u32,
    height: u32,
    mask: Vec<u8>,
}

impl Sprite {
    pub fn new(width: u32, height: u32, mask: Vec<u8>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension {
                what: "sprite",
                width,
                height,
            });
        }
        let expected = width as usize * height as usize;
        if mask.len() != expected {
            return Err(Error::LengthMismatch {
                what: "sprite mask",
                expected,
                actual: mask.len(),
            });
        }
        Ok(Self {
            width,
            height,
            mask,
        })
    }

    /// Build from a constant mask table
    pub fn from_slice(width: u32, height: u32, mask: &[u8]) -> Result<Self> {
        Self::new(width, height, mask.to_vec())
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn mask(&self) -> &[u8] {
        &self.mask
    }

    /// Mask lookup in sprite coordinates (row 0 = top). Out of range is transparent.
    pub fn is_opaque(&self, x: u32, y: u32) -> bool {
        x < self.width && y < self.height && self.mask[(y * self.width + x) as usize] != 0
    }
}

/// Axis-aligned bounding-box test between two placed sprites
///
/// Only the rectangles are compared; mask bits are not inspected.
pub fn overlaps(a: &Sprite, xa: i32, ya: i32, b: &Sprite, xb: i32, yb: i32) -> bool {
    let (xa, ya, xb, yb) = (xa as i64, ya as i64, xb as i64, yb as i64);
    let (wa, ha) = (a.width as i64, a.height as i64);
    let (wb, hb) = (b.width as i64, b.height as i64);

    xa < xb + wb && xa + wa > xb && ya < yb + hb && ya + ha > yb
}
