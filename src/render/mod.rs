//! The render core: clip, project, resolve visibility, composite.

pub mod compositor;
pub mod dither;
pub mod edge_walker;
pub mod framebuffer;
pub mod rasterizer;
pub mod renderer;
pub mod span;
pub mod span_buffer;

pub use dither::DitherMatrix;
pub use edge_walker::{is_back_facing, project_triangle, EdgeWalker, ScreenVertex};
pub use framebuffer::FrameBuffer;
pub use rasterizer::{
    DitherShader, FlatShader, PixelShader, Rasterizer, RasterizerDispatcher, RasterizerType,
    SpanBufferRasterizer, ZBufferRasterizer,
};
pub use renderer::{FrameStats, Renderer};
pub use span::{Span, CROSSOVER_EPSILON, MIN_SPAN_WIDTH};
pub use span_buffer::SpanBuffer;
