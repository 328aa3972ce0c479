//! Ordered (Bayer) dither matrix.
//!
//! The matrix is grown from the 2x2 base `[[0, 2], [3, 1]]`: each doubling step
//! replaces every entry `v` with the quadrant pattern
//!
//! ```text
//! 4v    4v+2
//! 4v+3  4v+1
//! ```
//!
//! placed in the four quadrants of the larger matrix. Entries are finally divided
//! by `n * n`, giving thresholds in `[0, 1)`.

use crate::error::ConfigError;

#[derive(Debug, Clone, PartialEq)]
pub struct DitherMatrix {
    size: usize,
    mask: usize,
    thresholds: Vec<f32>,
}

impl DitherMatrix {
    /// Builds an `n x n` Bayer matrix. `n` must be a power of two, at least 2.
    pub fn bayer(n: usize) -> Result<Self, ConfigError> {
        if n < 2 || !n.is_power_of_two() {
            return Err(ConfigError::DitherSize(n));
        }

        let mut levels: Vec<u32> = vec![0, 2, 3, 1];
        let mut size = 2;
        while size < n {
            let new_size = size * 2;
            let mut grown = vec![0u32; new_size * new_size];
            for y in 0..size {
                for x in 0..size {
                    let v = 4 * levels[y * size + x];
                    grown[y * new_size + x] = v;
                    grown[y * new_size + x + size] = v + 2;
                    grown[(y + size) * new_size + x] = v + 3;
                    grown[(y + size) * new_size + x + size] = v + 1;
                }
            }
            levels = grown;
            size = new_size;
        }

        let scale = 1.0 / (n * n) as f32;
        Ok(Self {
            size: n,
            mask: n - 1,
            thresholds: levels.into_iter().map(|v| v as f32 * scale).collect(),
        })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Threshold for screen pixel (x, y), tiled over the screen.
    #[inline]
    pub fn threshold(&self, x: i32, y: i32) -> f32 {
        let col = x as usize & self.mask;
        let row = y as usize & self.mask;
        self.thresholds[row * self.size + col]
    }
}
