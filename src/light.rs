//! Lighting for the monochrome shader.

use crate::prelude::Vec3;

/// A directional light that illuminates the scene uniformly from a direction.
///
/// All rays are parallel, so brightness depends only on the surface normal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectionalLight {
    /// The normalized direction the light is pointing (not where it comes from).
    pub direction: Vec3,
}

impl Default for DirectionalLight {
    /// Light pointing straight down, so surfaces facing up are brightest.
    fn default() -> Self {
        Self {
            direction: Vec3::DOWN,
        }
    }
}

impl DirectionalLight {
    /// Create a new directional light pointing in the given direction.
    /// The direction will be normalized automatically.
    pub fn new(direction: Vec3) -> Self {
        DirectionalLight {
            direction: direction.normalize_or_zero(),
        }
    }

    /// Brightness in `[0.0, 1.0]`: the cosine between the normal and the
    /// direction towards the light, remapped from `[-1, 1]`.
    ///
    /// Surfaces facing away are not clamped to black, they fade towards zero.
    /// A zero normal yields the midpoint `0.5`.
    #[inline]
    pub fn brightness(&self, normal: Vec3) -> f32 {
        let cos = (-self.direction).dot(normal.normalize_or_zero());
        ((cos + 1.0) * 0.5).clamp(0.0, 1.0)
    }
}
