//! Frame entry point.
//!
//! [`Renderer::render`] runs the whole pipeline for one frame: backface cull,
//! near-plane clip, projection, edge walking, and span submission to the
//! active rasterizer, then lets the rasterizer finish the frame.

use log::{debug, trace};

use super::dither::DitherMatrix;
use super::edge_walker::{is_back_facing, project_triangle, EdgeWalker};
use super::framebuffer::FrameBuffer;
use super::rasterizer::{DitherShader, Rasterizer, RasterizerDispatcher, RasterizerType};
use crate::clipper::clip_triangle_near;
use crate::config::RenderConfig;
use crate::error::ConfigError;
use crate::light::DirectionalLight;
use crate::projection::Projection;
use crate::triangle::Triangle;

/// Per-frame counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub triangles_submitted: usize,
    pub triangles_culled: usize,
    /// Entirely behind the near plane.
    pub triangles_clipped_away: usize,
    /// Post-clip triangles with no height on screen or non-finite vertices.
    pub triangles_degenerate: usize,
    /// Post-clip triangles that were walked.
    pub triangles_rasterized: usize,
    pub candidate_spans: usize,
    pub rejected_spans: usize,
    /// Spans drawn: finalized spans for the span buffer, accepted spans for the z-buffer.
    pub spans_drawn: usize,
}

pub struct Renderer {
    rasterizer: RasterizerDispatcher,
    shader: DitherShader,
    width: u32,
    height: u32,
    backface_culling: bool,
}

impl Renderer {
    pub fn new(config: &RenderConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let matrix = DitherMatrix::bayer(config.dither_size)?;
        debug!(
            "renderer {}x{}, {} rasterizer, {n}x{n} dither",
            config.width,
            config.height,
            config.rasterizer,
            n = config.dither_size
        );
        Ok(Self {
            rasterizer: RasterizerDispatcher::new(
                config.rasterizer,
                config.width,
                config.height,
                config.outline_edges,
            ),
            shader: DitherShader::new(DirectionalLight::default(), matrix),
            width: config.width,
            height: config.height,
            backface_culling: config.backface_culling,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn rasterizer(&self) -> RasterizerType {
        self.rasterizer.active_type()
    }

    pub fn set_rasterizer(&mut self, rasterizer: RasterizerType) {
        self.rasterizer.set_type(rasterizer);
    }

    pub fn set_light(&mut self, light: DirectionalLight) {
        self.shader.set_light(light);
    }

    pub fn set_backface_culling(&mut self, enabled: bool) {
        self.backface_culling = enabled;
    }

    /// Renders view-space triangles into `buffer`.
    ///
    /// The buffer is not cleared; the caller does that before each frame.
    pub fn render<I>(
        &mut self,
        triangles: I,
        projection: &Projection,
        buffer: &mut FrameBuffer,
    ) -> FrameStats
    where
        I: IntoIterator<Item = Triangle>,
    {
        debug_assert_eq!((buffer.width(), buffer.height()), (self.width, self.height));
        let mut stats = FrameStats::default();
        let near_z = projection.near_plane_z();

        self.rasterizer.begin_frame();
        for triangle in triangles {
            stats.triangles_submitted += 1;
            if self.backface_culling && is_back_facing(&triangle.positions()) {
                stats.triangles_culled += 1;
                continue;
            }

            let clipped = clip_triangle_near(&triangle.vertices, near_z);
            if clipped.is_empty() {
                stats.triangles_clipped_away += 1;
                continue;
            }

            for part in &clipped {
                let screen = project_triangle(projection, part, self.width, self.height);
                let Some(walker) = EdgeWalker::new(screen, self.width, self.height) else {
                    trace!("dropping degenerate triangle {screen:?}");
                    stats.triangles_degenerate += 1;
                    continue;
                };
                stats.triangles_rasterized += 1;
                for (y, span) in walker {
                    stats.candidate_spans += 1;
                    if !self.rasterizer.submit_span(y, span, buffer, &self.shader) {
                        stats.rejected_spans += 1;
                    }
                }
            }
        }
        stats.spans_drawn = self.rasterizer.end_frame(buffer, &self.shader);

        debug!("frame: {stats:?}");
        stats
    }
}
