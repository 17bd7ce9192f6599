use crate::error::{Error, Result};
use crate::sprite::Sprite;

// ============================================================================
// PixelBuffer
// ============================================================================

/// Packed RGBA pixel buffer for software rendering
///
/// Row-major with the origin at the bottom-left: pixel (x, y) lives at
/// `y * width + x` and y grows upward. Each entry is `r<<24 | g<<16 | b<<8 | a`
/// (see [`crate::util::pack_rgba`]).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    pixels: Vec<u32>,
    width: u32,
    height: u32,
}

impl PixelBuffer {
    /// Create a buffer filled with zero (transparent black)
    pub fn with_size(width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension {
                what: "pixel buffer",
                width,
                height,
            });
        }
        Ok(Self {
            pixels: vec![0; width as usize * height as usize],
            width,
            height,
        })
    }

    /// Wrap existing pixel data; the length must be exactly width * height
    pub fn from_pixels(width: u32, height: u32, pixels: Vec<u32>) -> Result<Self> {
        let mut buffer = Self::with_size(width, height)?;
        if pixels.len() != buffer.pixels.len() {
            return Err(Error::LengthMismatch {
                what: "pixel buffer",
                expected: buffer.pixels.len(),
                actual: pixels.len(),
            });
        }
        buffer.pixels = pixels;
        Ok(buffer)
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
    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    /// Check if coordinates are within bounds
    #[inline]
    fn in_bounds(&self, x: i64, y: i64) -> bool {
        x >= 0 && x < self.width as i64 && y >= 0 && y < self.height as i64
    }

    #[inline]
    fn pixel_index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Overwrite every pixel with `color`
    pub fn clear(&mut self, color: u32) {
        self.pixels.fill(color);
    }

    /// Read a pixel (bounds checked)
    #[inline]
    pub fn get_pixel(&self, x: i32, y: i32) -> Option<u32> {
        if self.in_bounds(x as i64, y as i64) {
            Some(self.pixels[self.pixel_index(x as u32, y as u32)])
        } else {
            None
        }
    }

    /// Set a single pixel (bounds checked, silently clipped)
    #[inline]
    pub fn set_pixel(&mut self, x: i32, y: i32, color: u32) {
        if self.in_bounds(x as i64, y as i64) {
            let idx = self.pixel_index(x as u32, y as u32);
            self.pixels[idx] = color;
        }
    }

    // ========================================================================
    // Sprite Operations
    // ========================================================================

    /// Stamp a sprite mask with its bottom-left corner at (x, y)
    ///
    /// Mask row 0 is the visual top, so cell (xi, yi) lands on
    /// `(x + xi, y + h - 1 - yi)`. Transparent cells are skipped and
    /// off-buffer cells are dropped. Opaque cells overwrite whatever is there.
    pub fn blit_sprite(&mut self, sprite: &Sprite, x: i32, y: i32, color: u32) {
        let sw = sprite.width() as i64;
        let sh = sprite.height() as i64;
        let mask = sprite.mask();

        for yi in 0..sh {
            let dy = y as i64 + sh - 1 - yi;
            if dy < 0 || dy >= self.height as i64 {
                continue;
            }

            let row = &mask[(yi * sw) as usize..((yi + 1) * sw) as usize];
            for (xi, &cell) in row.iter().enumerate() {
                if cell == 0 {
                    continue;
                }
                let dx = x as i64 + xi as i64;
                if dx < 0 || dx >= self.width as i64 {
                    continue;
                }
                let idx = self.pixel_index(dx as u32, dy as u32);
                self.pixels[idx] = color;
            }
        }
    }

    // ========================================================================
    // Upload
    // ========================================================================

    /// Copy pixels into a top-down byte image for a streaming texture
    ///
    /// The buffer's bottom row becomes the first row of `dest`. `dest` must
    /// hold `width * height * 4` bytes.
    pub fn write_rgba_rows_flipped(&self, dest: &mut [u8]) -> Result<()> {
        let expected = self.pixels.len() * 4;
        if dest.len() != expected {
            return Err(Error::LengthMismatch {
                what: "upload",
                expected,
                actual: dest.len(),
            });
        }

        let row_bytes = self.width as usize * 4;
        for (dst_row, src_row) in dest
            .chunks_exact_mut(row_bytes)
            .zip(self.pixels.chunks_exact(self.width as usize).rev())
        {
            for (out, &pixel) in dst_row.chunks_exact_mut(4).zip(src_row) {
                out.copy_from_slice(&pixel.to_ne_bytes());
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::pack_rgba;

    fn block(w: u32, h: u32) -> Sprite {
        Sprite::new(w, h, vec![1; (w * h) as usize]).unwrap()
    }

    #[test]
    fn test_zero_dimensions_rejected() {
        assert!(matches!(
            PixelBuffer::with_size(0, 10),
            Err(Error::InvalidDimension { .. })
        ));
        assert!(PixelBuffer::with_size(10, 0).is_err());
        assert!(matches!(
            PixelBuffer::from_pixels(2, 2, vec![0; 3]),
            Err(Error::LengthMismatch {
                expected: 4,
                actual: 3,
                ..
            })
        ));
    }

    #[test]
    fn test_clear_fills_every_pixel() {
        let mut buffer = PixelBuffer::with_size(7, 5).unwrap();
        for color in [0, pack_rgba(0, 128, 0), u32::MAX] {
            buffer.clear(color);
            assert!(buffer.pixels().iter().all(|&p| p == color));
            let once = buffer.clone();
            buffer.clear(color);
            assert_eq!(buffer, once);
        }
    }

    #[test]
    fn test_get_set_pixel_bounds() {
        let mut buffer = PixelBuffer::with_size(4, 3).unwrap();
        buffer.set_pixel(3, 2, 9);
        buffer.set_pixel(4, 0, 9);
        buffer.set_pixel(-1, 0, 9);
        assert_eq!(buffer.get_pixel(3, 2), Some(9));
        assert_eq!(buffer.pixels()[2 * 4 + 3], 9);
        assert_eq!(buffer.get_pixel(4, 0), None);
        assert_eq!(buffer.pixels().iter().filter(|&&p| p == 9).count(), 1);
    }

    #[test]
    fn test_blit_flips_rows() {
        // Mask row 0 (top) has only the left cell set
        let sprite = Sprite::new(2, 2, vec![1, 0, 0, 0]).unwrap();
        let mut buffer = PixelBuffer::with_size(4, 4).unwrap();
        buffer.blit_sprite(&sprite, 1, 1, 7);
        // Top row of a 2-tall sprite at y=1 is buffer row 2
        assert_eq!(buffer.get_pixel(1, 2), Some(7));
        assert_eq!(buffer.pixels().iter().filter(|&&p| p == 7).count(), 1);
    }

    #[test]
    fn test_blit_transparency() {
        let sprite = Sprite::new(3, 1, vec![1, 0, 1]).unwrap();
        let mut buffer = PixelBuffer::with_size(3, 1).unwrap();
        buffer.clear(5);
        buffer.blit_sprite(&sprite, 0, 0, 8);
        assert_eq!(buffer.pixels(), &[8, 5, 8]);
    }

    #[test]
    fn test_blit_clips_on_every_side() {
        let sprite = block(4, 4);
        for (x, y) in [(-2, 1), (4, 1), (1, -2), (1, 4), (-3, -3), (5, 5)] {
            let mut buffer = PixelBuffer::with_size(6, 6).unwrap();
            buffer.blit_sprite(&sprite, x, y, 1);
            for by in 0..6 {
                for bx in 0..6 {
                    let inside = bx >= x && bx < x + 4 && by >= y && by < y + 4;
                    let expected = if inside { 1 } else { 0 };
                    assert_eq!(buffer.get_pixel(bx, by), Some(expected), "({x},{y}) at ({bx},{by})");
                }
            }
        }
    }

    #[test]
    fn test_blit_fully_offscreen_is_noop() {
        let mut buffer = PixelBuffer::with_size(8, 8).unwrap();
        buffer.blit_sprite(&block(3, 3), 100, 100, 1);
        buffer.blit_sprite(&block(3, 3), -10, 2, 1);
        assert!(buffer.pixels().iter().all(|&p| p == 0));
    }

    #[test]
    fn test_later_blit_wins() {
        let mut buffer = PixelBuffer::with_size(4, 4).unwrap();
        buffer.blit_sprite(&block(2, 2), 0, 0, 1);
        buffer.blit_sprite(&block(2, 2), 1, 1, 2);
        assert_eq!(buffer.get_pixel(0, 0), Some(1));
        assert_eq!(buffer.get_pixel(1, 1), Some(2));
    }

    #[test]
    fn test_upload_flips_rows() {
        let buffer = PixelBuffer::from_pixels(1, 2, vec![0x1111_1111, 0x2222_2222]).unwrap();
        let mut bytes = vec![0u8; 8];
        buffer.write_rgba_rows_flipped(&mut bytes).unwrap();
        assert_eq!(&bytes[..4], &0x2222_2222u32.to_ne_bytes());
        assert_eq!(&bytes[4..], &0x1111_1111u32.to_ne_bytes());
        assert!(buffer.write_rgba_rows_flipped(&mut [0u8; 4]).is_err());
    }
}
