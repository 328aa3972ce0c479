//! A span-buffer (S-Buffer) software renderer for 1-bit displays.
//!
//! Triangles are clipped against the near plane, projected, and walked into
//! horizontal spans. Per scanline the span buffer keeps only the visible,
//! non-overlapping pieces, which are then shaded with an ordered dither into a
//! monochrome framebuffer. A per-pixel z-buffer path is available for
//! comparison. SDL2 is only used to show the result.
//!
//! # Quick Start
//!
//! ```ignore
//! use monospan::prelude::*;
//!
//! let mut engine = Engine::new(RenderConfig::default())?;
//! engine.add_model(Model::new(Mesh::cube()));
//! engine.render_frame();
//! engine.framebuffer().save_png("cube.png")?;
//! ```

// Public API - exposed to library consumers
pub mod camera;
pub mod clipper;
pub mod color;
pub mod config;
pub mod engine;
pub mod error;
pub mod light;
pub mod math;
pub mod mesh;
pub mod model;
pub mod projection;
pub mod render;
pub mod transform;
pub mod triangle;
pub mod window;

// Re-export commonly needed types at crate root for convenience
pub use config::RenderConfig;
pub use engine::Engine;
pub use error::{ConfigError, LoadError};
pub use mesh::{Mesh, MeshLoader, ObjLoader};
pub use model::Model;
pub use projection::Projection;
pub use render::{FrameBuffer, FrameStats, RasterizerType, Renderer};
pub use transform::Transform;
pub use triangle::Triangle;

/// Prelude module for convenient imports.
///
/// # Example
/// ```ignore
/// use monospan::prelude::*;
/// ```
pub mod prelude {
    // Camera
    pub use crate::camera::{FpsCamera, FpsCameraController, MouseLook};

    // Engine & configuration
    pub use crate::config::RenderConfig;
    pub use crate::engine::Engine;
    pub use crate::error::{ConfigError, LoadError};

    // Scene
    pub use crate::light::DirectionalLight;
    pub use crate::mesh::{Mesh, MeshLoader, ObjLoader};
    pub use crate::model::Model;
    pub use crate::projection::Projection;
    pub use crate::transform::Transform;
    pub use crate::triangle::Triangle;

    // Math
    pub use crate::math::mat4::Mat4;
    pub use crate::math::quat::Quat;
    pub use crate::math::vec2::Vec2;
    pub use crate::math::vec3::Vec3;

    // Rendering
    pub use crate::color::Color;
    pub use crate::render::{FrameBuffer, FrameStats, RasterizerType, Renderer};

    // Window & Input
    pub use crate::window::{FrameLimiter, InputState, Key, Window, WindowEvent, FPS};
}

/// Module exposing internals for benchmarking. Not part of the stable API.
pub mod bench {
    pub use crate::clipper::{clip_triangle_near, ClipVertex};
    pub use crate::render::{
        DitherMatrix, DitherShader, EdgeWalker, FrameBuffer, PixelShader, Rasterizer,
        RasterizerType, Renderer, Span, SpanBuffer, SpanBufferRasterizer, ZBufferRasterizer,
    };
}
