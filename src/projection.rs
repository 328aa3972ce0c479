//! Perspective projection parameters.
//!
//! The [`Projection`] struct is the single source of truth for all perspective
//! projection parameters (FOV, aspect ratio, near/far planes). It owns the
//! projection matrix and maps view-space points to screen pixels.

use crate::config::RenderConfig;
use crate::math::mat4::Mat4;
use crate::math::vec3::Vec3;
use crate::math::vec4::Vec4;

/// Perspective projection parameters.
///
/// The camera looks down -Z; `z_near` and `z_far` are positive distances.
#[derive(Debug, Clone, Copy)]
pub struct Projection {
    /// Vertical field of view in radians.
    fov_y: f32,
    /// Aspect ratio (width / height).
    aspect_ratio: f32,
    z_near: f32,
    z_far: f32,
    matrix: Mat4,
}

impl Projection {
    /// Creates a new projection with the given parameters.
    ///
    /// # Arguments
    /// * `fov_y` - Vertical field of view in radians
    /// * `aspect_ratio` - Width divided by height
    /// * `z_near` - Near clipping plane distance (must be > 0)
    /// * `z_far` - Far clipping plane distance (must be > z_near)
    pub fn new(fov_y: f32, aspect_ratio: f32, z_near: f32, z_far: f32) -> Self {
        Self {
            fov_y,
            aspect_ratio,
            z_near,
            z_far,
            matrix: Mat4::perspective_rh_gl(fov_y, aspect_ratio, z_near, z_far),
        }
    }

    /// Creates a projection from degrees instead of radians.
    pub fn from_degrees(fov_y_degrees: f32, aspect_ratio: f32, z_near: f32, z_far: f32) -> Self {
        Self::new(fov_y_degrees.to_radians(), aspect_ratio, z_near, z_far)
    }

    pub fn from_config(config: &RenderConfig) -> Self {
        Self::from_degrees(
            config.fov_y_degrees,
            config.aspect_ratio(),
            config.z_near,
            config.z_far,
        )
    }

    /// Returns the vertical field of view in radians.
    pub fn fov_y(&self) -> f32 {
        self.fov_y
    }

    /// Returns the horizontal field of view in radians.
    ///
    /// Computed from the vertical FOV and aspect ratio.
    pub fn fov_x(&self) -> f32 {
        2.0 * (self.aspect_ratio * (self.fov_y / 2.0).tan()).atan()
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.aspect_ratio
    }

    pub fn z_near(&self) -> f32 {
        self.z_near
    }

    pub fn z_far(&self) -> f32 {
        self.z_far
    }

    /// View-space z of the near plane (negative).
    pub fn near_plane_z(&self) -> f32 {
        -self.z_near
    }

    /// Updates the aspect ratio (typically called on window resize).
    pub fn set_aspect_ratio(&mut self, aspect_ratio: f32) {
        *self = Self::new(self.fov_y, aspect_ratio, self.z_near, self.z_far);
    }

    /// The right-handed, OpenGL-style perspective matrix.
    pub fn matrix(&self) -> &Mat4 {
        &self.matrix
    }

    /// Projects a view-space point to the screen.
    ///
    /// Returns `(x, y, depth)`: pixel coordinates with y growing downwards and
    /// the depth proxy `1 / w = 1 / -z`, larger when nearer. Points at or behind
    /// the eye give non-finite values, so clip first.
    pub fn project(&self, position: Vec3, width: u32, height: u32) -> Vec3 {
        let clip = self.matrix * Vec4::point(position);
        let inv_w = 1.0 / clip.w;
        let ndc_x = clip.x * inv_w;
        let ndc_y = clip.y * inv_w;
        Vec3::new(
            (ndc_x + 1.0) * 0.5 * width as f32,
            (1.0 - ndc_y) * 0.5 * height as f32,
            inv_w,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f32::consts::FRAC_PI_4;

    #[test]
    fn fov_x_matches_aspect_ratio() {
        // With aspect ratio 1:1, fov_x should equal fov_y
        let proj = Projection::new(FRAC_PI_4, 1.0, 0.1, 100.0);
        assert_relative_eq!(proj.fov_x(), proj.fov_y(), epsilon = 1e-6);
    }

    #[test]
    fn from_config_uses_screen_aspect() {
        let proj = Projection::from_config(&RenderConfig::default());
        assert_relative_eq!(proj.fov_y(), FRAC_PI_4, epsilon = 1e-6);
        assert_relative_eq!(proj.aspect_ratio(), 400.0 / 240.0);
        assert_relative_eq!(proj.near_plane_z(), -0.1);
    }

    #[test]
    fn centre_of_view_maps_to_screen_centre() {
        let proj = Projection::from_degrees(90.0, 2.0, 0.1, 100.0);
        let p = proj.project(Vec3::new(0.0, 0.0, -4.0), 400, 200);
        assert_relative_eq!(p.x, 200.0, epsilon = 1e-3);
        assert_relative_eq!(p.y, 100.0, epsilon = 1e-3);
        assert_relative_eq!(p.z, 0.25, epsilon = 1e-6);
    }

    #[test]
    fn frustum_edges_map_to_screen_edges() {
        // 90 degree fov: at distance d the visible half-height is d.
        let proj = Projection::from_degrees(90.0, 2.0, 0.1, 100.0);
        let top_left = proj.project(Vec3::new(-6.0, 3.0, -3.0), 400, 200);
        assert_relative_eq!(top_left.x, 0.0, epsilon = 1e-3);
        assert_relative_eq!(top_left.y, 0.0, epsilon = 1e-3);
    }

    #[test]
    fn depth_proxy_grows_towards_camera() {
        let proj = Projection::from_degrees(45.0, 1.0, 0.1, 100.0);
        let near = proj.project(Vec3::new(0.0, 0.0, -1.0), 100, 100);
        let far = proj.project(Vec3::new(0.0, 0.0, -10.0), 100, 100);
        assert!(near.z > far.z);
    }
}
