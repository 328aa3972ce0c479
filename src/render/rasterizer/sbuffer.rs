//! Span-buffer rasterization.
//!
//! Candidate spans are only resolved during the frame; nothing touches the
//! frame buffer until `end_frame`, when each row's finalized spans are
//! composited left to right. Every pixel is therefore written at most once
//! per span, and no per-pixel depth storage is needed.

use super::{PixelShader, Rasterizer};
use crate::render::compositor::composite_row;
use crate::render::framebuffer::FrameBuffer;
use crate::render::span::Span;
use crate::render::span_buffer::SpanBuffer;

pub struct SpanBufferRasterizer {
    spans: SpanBuffer,
    outline: bool,
}

impl SpanBufferRasterizer {
    pub fn new(width: u32, height: u32, outline: bool) -> Self {
        Self {
            spans: SpanBuffer::new(width, height),
            outline,
        }
    }

    /// The resolved spans of the current frame.
    pub fn spans(&self) -> &SpanBuffer {
        &self.spans
    }
}

impl Rasterizer for SpanBufferRasterizer {
    fn begin_frame(&mut self) {
        self.spans.clear();
    }

    #[inline]
    fn submit_span(
        &mut self,
        y: usize,
        span: Span,
        _buffer: &mut FrameBuffer,
        _shader: &dyn PixelShader,
    ) -> bool {
        self.spans.insert(y, span)
    }

    fn end_frame(&mut self, buffer: &mut FrameBuffer, shader: &dyn PixelShader) -> usize {
        for (y, row) in self.spans.rows() {
            composite_row(row, y as i32, buffer, shader, self.outline);
        }
        self.spans.span_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;
    use crate::prelude::Vec3;
    use crate::render::rasterizer::FlatShader;

    #[test]
    fn nothing_is_drawn_before_end_frame() {
        let mut buffer = FrameBuffer::new(16, 2);
        let shader = FlatShader::new(Color::Black);
        let mut rasterizer = SpanBufferRasterizer::new(16, 2, false);
        rasterizer.begin_frame();
        assert!(rasterizer.submit_span(1, Span::flat(0.0, 7.0, 0.5, Vec3::UP), &mut buffer, &shader));
        assert_eq!(buffer.count_black(), 0);
        assert_eq!(rasterizer.end_frame(&mut buffer, &shader), 1);
        assert_eq!(buffer.count_black(), 8);
    }

    #[test]
    fn begin_frame_discards_previous_spans() {
        let mut buffer = FrameBuffer::new(16, 2);
        let shader = FlatShader::new(Color::Black);
        let mut rasterizer = SpanBufferRasterizer::new(16, 2, true);
        rasterizer.begin_frame();
        rasterizer.submit_span(0, Span::flat(0.0, 7.0, 0.5, Vec3::UP), &mut buffer, &shader);
        rasterizer.begin_frame();
        assert_eq!(rasterizer.spans().span_count(), 0);
        assert_eq!(rasterizer.end_frame(&mut buffer, &shader), 0);
    }
}
