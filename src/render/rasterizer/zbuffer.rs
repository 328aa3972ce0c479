//! Per-pixel depth-buffer rasterization.
//!
//! The straightforward alternative to the span buffer: every candidate span is
//! drawn immediately, pixel by pixel, and a pixel is written only if its depth
//! proxy beats the stored one. Costs `width * height` floats of storage.

use super::{PixelShader, Rasterizer};
use crate::color::Color;
use crate::render::compositor::pixel_range;
use crate::render::framebuffer::FrameBuffer;
use crate::render::span::Span;

pub struct ZBufferRasterizer {
    /// Depth proxy per pixel; `0.0` is infinitely far.
    depth: Vec<f32>,
    width: u32,
    height: u32,
    outline: bool,
    drawn: usize,
}

impl ZBufferRasterizer {
    pub fn new(width: u32, height: u32, outline: bool) -> Self {
        Self {
            depth: vec![0.0; width as usize * height as usize],
            width,
            height,
            outline,
            drawn: 0,
        }
    }

    /// Stored depth at (x, y), if on screen.
    pub fn depth_at(&self, x: u32, y: u32) -> Option<f32> {
        (x < self.width && y < self.height).then(|| self.depth[(y * self.width + x) as usize])
    }
}

impl Rasterizer for ZBufferRasterizer {
    fn begin_frame(&mut self) {
        self.depth.fill(0.0);
        self.drawn = 0;
    }

    fn submit_span(
        &mut self,
        y: usize,
        span: Span,
        buffer: &mut FrameBuffer,
        shader: &dyn PixelShader,
    ) -> bool {
        if y >= self.height as usize || span.is_degenerate() {
            return false;
        }
        let Some((first, last)) = pixel_range(&span, self.width) else {
            return false;
        };

        let row = y * self.width as usize;
        for x in first..=last {
            let z = span.z_at(x as f32);
            let slot = &mut self.depth[row + x as usize];
            if z <= *slot {
                continue;
            }
            *slot = z;
            let color = if self.outline && (x == first || x == last) {
                Color::Black
            } else {
                shader.shade(x, y as i32, span.normal_at(x as f32))
            };
            buffer.set_pixel(x, y as i32, color);
        }
        self.drawn += 1;
        true
    }

    fn end_frame(&mut self, _buffer: &mut FrameBuffer, _shader: &dyn PixelShader) -> usize {
        self.drawn
    }
}
