//! Frame driver.
//!
//! The [`Engine`] owns everything one frame needs: configuration, renderer,
//! framebuffer, camera, projection and the models in the scene. It carries no
//! global state, so several engines can coexist.

use log::debug;

use crate::camera::{FpsCamera, FpsCameraController};
use crate::color::Color;
use crate::config::RenderConfig;
use crate::error::ConfigError;
use crate::light::DirectionalLight;
use crate::math::vec3::Vec3;
use crate::model::Model;
use crate::projection::Projection;
use crate::render::{FrameBuffer, FrameStats, RasterizerType, Renderer};
use crate::window::{InputState, Key};

/// Degrees per frame the models turn about Y and X while spinning.
pub const SPIN_DEGREES: f32 = 1.0;

pub struct Engine {
    config: RenderConfig,
    renderer: Renderer,
    framebuffer: FrameBuffer,
    camera: FpsCamera,
    controller: FpsCameraController,
    projection: Projection,
    models: Vec<Model>,
    spinning: bool,
    last_stats: FrameStats,
}

impl Engine {
    pub fn new(config: RenderConfig) -> Result<Self, ConfigError> {
        let renderer = Renderer::new(&config)?;
        let projection = Projection::from_config(&config);
        let framebuffer = FrameBuffer::new(config.width, config.height);
        debug!("engine created with {config:?}");
        Ok(Self {
            renderer,
            framebuffer,
            camera: FpsCamera::new(Vec3::new(0.0, 0.0, 5.0)),
            controller: FpsCameraController::default(),
            projection,
            models: Vec::new(),
            spinning: true,
            last_stats: FrameStats::default(),
            config,
        })
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    // ============ Scene ============

    /// Adds a model and returns its index.
    pub fn add_model(&mut self, model: Model) -> usize {
        self.models.push(model);
        self.models.len() - 1
    }

    pub fn models(&self) -> &[Model] {
        &self.models
    }

    pub fn model_mut(&mut self, index: usize) -> Option<&mut Model> {
        self.models.get_mut(index)
    }

    pub fn camera(&self) -> &FpsCamera {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut FpsCamera {
        &mut self.camera
    }

    pub fn projection(&self) -> &Projection {
        &self.projection
    }

    pub fn set_light(&mut self, light: DirectionalLight) {
        self.renderer.set_light(light);
    }

    // ============ Render Settings ============

    pub fn rasterizer(&self) -> RasterizerType {
        self.renderer.rasterizer()
    }

    pub fn set_rasterizer(&mut self, rasterizer: RasterizerType) {
        self.config.rasterizer = rasterizer;
        self.renderer.set_rasterizer(rasterizer);
    }

    pub fn backface_culling(&self) -> bool {
        self.config.backface_culling
    }

    pub fn set_backface_culling(&mut self, enabled: bool) {
        self.config.backface_culling = enabled;
        self.renderer.set_backface_culling(enabled);
    }

    pub fn spinning(&self) -> bool {
        self.spinning
    }

    pub fn set_spinning(&mut self, spinning: bool) {
        self.spinning = spinning;
    }

    /// Applies a key press from the window.
    pub fn handle_key(&mut self, key: Key) {
        match key {
            Key::Num1 => self.set_rasterizer(RasterizerType::SpanBuffer),
            Key::Num2 => self.set_rasterizer(RasterizerType::ZBuffer),
            Key::C => self.set_backface_culling(!self.backface_culling()),
            Key::P => self.spinning = !self.spinning,
        }
    }

    // ============ Frame ============

    /// Moves the camera from input and advances the model spin by one step.
    pub fn update(&mut self, delta_time: f32, input: &InputState) {
        self.controller.update(&mut self.camera, input, delta_time);
        if self.spinning {
            for model in &mut self.models {
                model
                    .transform_mut()
                    .rotate(SPIN_DEGREES, Vec3::Y)
                    .rotate(SPIN_DEGREES, Vec3::X);
            }
        }
    }

    /// Clears the framebuffer to white and renders every model.
    pub fn render_frame(&mut self) -> FrameStats {
        self.framebuffer.clear(Color::White);
        let view = self.camera.view_matrix();
        let triangles = self
            .models
            .iter()
            .flat_map(|model| model.view_triangles(&view));
        self.last_stats = self
            .renderer
            .render(triangles, &self.projection, &mut self.framebuffer);
        self.last_stats
    }

    pub fn framebuffer(&self) -> &FrameBuffer {
        &self.framebuffer
    }

    pub fn last_stats(&self) -> FrameStats {
        self.last_stats
    }
}
