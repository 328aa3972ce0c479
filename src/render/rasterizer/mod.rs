//! Span rasterization algorithms.
//!
//! Both implementations consume the candidate spans produced by the edge
//! walker and can be swapped at runtime for testing and benchmarking.
//!
//! Available algorithms:
//! - [`SpanBufferRasterizer`]: resolves visibility per scanline in the span
//!   buffer and composites whole rows at the end of the frame
//! - [`ZBufferRasterizer`]: writes every pixel immediately behind a per-pixel
//!   depth test

mod sbuffer;
mod shader;
mod zbuffer;

pub use sbuffer::SpanBufferRasterizer;
pub use shader::{DitherShader, FlatShader, PixelShader};
pub use zbuffer::ZBufferRasterizer;

use super::framebuffer::FrameBuffer;
use super::span::Span;

/// Trait for span rasterization algorithms.
///
/// A frame is `begin_frame`, any number of `submit_span` calls, then
/// `end_frame`. Pixels may be written at submission or only at the end.
pub trait Rasterizer {
    /// Resets per-frame state.
    fn begin_frame(&mut self);

    /// Offers one candidate span on row `y`. Returns false if it was rejected
    /// as degenerate or off-screen.
    fn submit_span(
        &mut self,
        y: usize,
        span: Span,
        buffer: &mut FrameBuffer,
        shader: &dyn PixelShader,
    ) -> bool;

    /// Finishes the frame and returns the number of spans drawn.
    fn end_frame(&mut self, buffer: &mut FrameBuffer, shader: &dyn PixelShader) -> usize;
}

/// Available rasterization algorithms.
///
/// Use this enum to select which rasterizer the renderer should use.
/// Can be changed at runtime via `Renderer::set_rasterizer`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum RasterizerType {
    /// Span buffer: per-scanline interval splitting, no depth buffer.
    #[default]
    #[value(name = "span")]
    SpanBuffer,
    /// Per-pixel depth buffer.
    #[value(name = "zbuffer")]
    ZBuffer,
}

impl std::fmt::Display for RasterizerType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RasterizerType::SpanBuffer => write!(f, "SpanBuffer"),
            RasterizerType::ZBuffer => write!(f, "ZBuffer"),
        }
    }
}

/// Holds both rasterizer implementations and forwards to the active one.
pub struct RasterizerDispatcher {
    span_buffer: SpanBufferRasterizer,
    z_buffer: ZBufferRasterizer,
    active: RasterizerType,
}

impl RasterizerDispatcher {
    pub fn new(rasterizer_type: RasterizerType, width: u32, height: u32, outline: bool) -> Self {
        Self {
            span_buffer: SpanBufferRasterizer::new(width, height, outline),
            z_buffer: ZBufferRasterizer::new(width, height, outline),
            active: rasterizer_type,
        }
    }

    pub fn set_type(&mut self, rasterizer_type: RasterizerType) {
        self.active = rasterizer_type;
    }

    pub fn active_type(&self) -> RasterizerType {
        self.active
    }

    fn active_mut(&mut self) -> &mut dyn Rasterizer {
        match self.active {
            RasterizerType::SpanBuffer => &mut self.span_buffer,
            RasterizerType::ZBuffer => &mut self.z_buffer,
        }
    }
}

impl Rasterizer for RasterizerDispatcher {
    fn begin_frame(&mut self) {
        self.active_mut().begin_frame();
    }

    #[inline]
    fn submit_span(
        &mut self,
        y: usize,
        span: Span,
        buffer: &mut FrameBuffer,
        shader: &dyn PixelShader,
    ) -> bool {
        self.active_mut().submit_span(y, span, buffer, shader)
    }

    fn end_frame(&mut self, buffer: &mut FrameBuffer, shader: &dyn PixelShader) -> usize {
        self.active_mut().end_frame(buffer, shader)
    }
}
