//! 1-bit frame buffer.
//!
//! Pixels are packed eight to a byte in row-major order. The most significant bit
//! of each byte is the leftmost pixel; a set bit is [`Color::White`], a clear bit
//! is [`Color::Black`]. Rows are padded to whole bytes (`row_bytes`).

use std::path::Path;

use image::{GrayImage, ImageResult, Luma};

use crate::color::Color;

/// Owned 1-bit-per-pixel frame buffer.
///
/// [`FrameBuffer::set_pixel`] is the only write path and silently drops
/// coordinates outside the buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameBuffer {
    data: Vec<u8>,
    width: u32,
    height: u32,
    row_bytes: usize,
}

impl FrameBuffer {
    /// Create a buffer cleared to white.
    pub fn new(width: u32, height: u32) -> Self {
        let row_bytes = (width as usize).div_ceil(8);
        Self {
            data: vec![0xFF; row_bytes * height as usize],
            width,
            height,
            row_bytes,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn row_bytes(&self) -> usize {
        self.row_bytes
    }

    pub fn clear(&mut self, color: Color) {
        let fill = match color {
            Color::Black => 0x00,
            Color::White => 0xFF,
        };
        self.data.fill(fill);
    }

    #[inline]
    fn locate(&self, x: i32, y: i32) -> Option<(usize, u8)> {
        if x >= 0 && x < self.width as i32 && y >= 0 && y < self.height as i32 {
            let index = y as usize * self.row_bytes + x as usize / 8;
            let mask = 0x80u8 >> (x as u32 % 8);
            Some((index, mask))
        } else {
            None
        }
    }

    /// Set a pixel at (x, y). Silently ignores out-of-bounds coordinates.
    #[inline]
    pub fn set_pixel(&mut self, x: i32, y: i32, color: Color) {
        if let Some((index, mask)) = self.locate(x, y) {
            match color {
                Color::White => self.data[index] |= mask,
                Color::Black => self.data[index] &= !mask,
            }
        }
    }

    /// Get the color at (x, y), or None if out of bounds.
    #[inline]
    pub fn get_pixel(&self, x: i32, y: i32) -> Option<Color> {
        self.locate(x, y).map(|(index, mask)| {
            if self.data[index] & mask != 0 {
                Color::White
            } else {
                Color::Black
            }
        })
    }

    /// Raw packed rows, `row_bytes * height` bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Expands the buffer into ARGB8888 pixels for a colour host display.
    ///
    /// `out` must hold at least `width * height` pixels.
    pub fn to_argb(&self, out: &mut [u32]) {
        debug_assert!(out.len() >= (self.width * self.height) as usize);
        for (y, row) in out
            .chunks_exact_mut(self.width as usize)
            .take(self.height as usize)
            .enumerate()
        {
            for (x, pixel) in row.iter_mut().enumerate() {
                let color = self.get_pixel(x as i32, y as i32).unwrap_or_default();
                *pixel = color.to_argb();
            }
        }
    }

    pub fn to_gray_image(&self) -> GrayImage {
        GrayImage::from_fn(self.width, self.height, |x, y| {
            let color = self.get_pixel(x as i32, y as i32).unwrap_or_default();
            Luma([color.to_luma()])
        })
    }

    /// Writes the frame as an 8-bit greyscale PNG.
    pub fn save_png<P: AsRef<Path>>(&self, path: P) -> ImageResult<()> {
        self.to_gray_image().save(path)
    }

    /// Number of black pixels in the buffer (padding bits excluded).
    pub fn count_black(&self) -> usize {
        (0..self.height as i32)
            .flat_map(|y| (0..self.width as i32).map(move |x| (x, y)))
            .filter(|&(x, y)| self.get_pixel(x, y) == Some(Color::Black))
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_buffer_is_white_and_padded() {
        let fb = FrameBuffer::new(10, 3);
        assert_eq!(fb.row_bytes(), 2);
        assert_eq!(fb.as_bytes().len(), 6);
        assert_eq!(fb.get_pixel(9, 2), Some(Color::White));
        assert_eq!(fb.count_black(), 0);
    }

    #[test]
    fn set_pixel_packs_msb_first() {
        let mut fb = FrameBuffer::new(16, 1);
        fb.set_pixel(0, 0, Color::Black);
        fb.set_pixel(9, 0, Color::Black);
        assert_eq!(fb.as_bytes(), &[0x7F, 0xBF]);
        fb.set_pixel(0, 0, Color::White);
        assert_eq!(fb.get_pixel(0, 0), Some(Color::White));
        assert_eq!(fb.get_pixel(9, 0), Some(Color::Black));
    }

    #[test]
    fn out_of_bounds_writes_are_dropped() {
        let mut fb = FrameBuffer::new(8, 8);
        fb.set_pixel(-1, 0, Color::Black);
        fb.set_pixel(8, 0, Color::Black);
        fb.set_pixel(0, 8, Color::Black);
        fb.set_pixel(0, -3, Color::Black);
        assert_eq!(fb.count_black(), 0);
        assert_eq!(fb.get_pixel(8, 0), None);
    }

    #[test]
    fn clear_and_export() {
        let mut fb = FrameBuffer::new(4, 2);
        fb.clear(Color::Black);
        fb.set_pixel(1, 1, Color::White);
        let image = fb.to_gray_image();
        assert_eq!(image.get_pixel(1, 1).0, [255]);
        assert_eq!(image.get_pixel(0, 0).0, [0]);

        let mut argb = vec![0u32; 8];
        fb.to_argb(&mut argb);
        assert_eq!(argb[5], Color::White.to_argb());
        assert_eq!(argb[0], Color::Black.to_argb());
    }
}
