//! Renderer configuration.
//!
//! Defaults describe the target handheld: a 400x240 monochrome panel, 45 degree
//! vertical field of view and an 8x8 ordered-dither matrix.

use crate::error::ConfigError;
use crate::render::RasterizerType;

pub const SCREEN_WIDTH: u32 = 400;
pub const SCREEN_HEIGHT: u32 = 240;

#[derive(Debug, Clone, PartialEq)]
pub struct RenderConfig {
    pub width: u32,
    pub height: u32,
    pub fov_y_degrees: f32,
    /// Distance to the near plane (positive; the plane sits at `z = -z_near`).
    pub z_near: f32,
    pub z_far: f32,
    /// Edge length of the Bayer matrix; must be a power of two.
    pub dither_size: usize,
    pub rasterizer: RasterizerType,
    pub backface_culling: bool,
    /// Force the first and last pixel of every span to black.
    pub outline_edges: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: SCREEN_WIDTH,
            height: SCREEN_HEIGHT,
            fov_y_degrees: 45.0,
            z_near: 0.1,
            z_far: 1000.0,
            dither_size: 8,
            rasterizer: RasterizerType::default(),
            backface_culling: true,
            outline_edges: true,
        }
    }
}

impl RenderConfig {
    pub fn aspect_ratio(&self) -> f32 {
        self.width as f32 / self.height as f32
    }

    /// Checks every parameter the renderer relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::EmptyScreen {
                width: self.width,
                height: self.height,
            });
        }
        if self.dither_size < 2 || !self.dither_size.is_power_of_two() {
            return Err(ConfigError::DitherSize(self.dither_size));
        }
        let fov_ok = self.fov_y_degrees > 0.0 && self.fov_y_degrees < 180.0;
        let planes_ok = self.z_near > 0.0 && self.z_far > self.z_near && self.z_far.is_finite();
        if !fov_ok || !planes_ok {
            return Err(ConfigError::Projection {
                fov_y_degrees: self.fov_y_degrees,
                z_near: self.z_near,
                z_far: self.z_far,
            });
        }
        Ok(())
    }
}
