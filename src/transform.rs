//! Transform component for 3D objects.
//!
//! Provides a [`Transform`] struct with a fluent API for managing position,
//! quaternion rotation, and scale.

use crate::math::{mat4::Mat4, quat::Quat, vec3::Vec3};

/// A 3D transform with position, rotation (unit quaternion), and scale.
///
/// Provides a fluent API where mutating methods return `&mut Self` for chaining:
///
/// ```ignore
/// transform
///     .set_position(Vec3::new(0.0, 0.0, -5.0))
///     .rotate(1.0, Vec3::Y)
///     .set_scale_uniform(2.0);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    position: Vec3,
    rotation: Quat,
    scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    /// Create a new transform with default values (position=0, no rotation, scale=1).
    pub fn new() -> Self {
        Self::default()
    }

    // ============ Position ============

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn set_position(&mut self, position: Vec3) -> &mut Self {
        self.position = position;
        self
    }

    /// Translate by a delta vector.
    pub fn translate(&mut self, delta: Vec3) -> &mut Self {
        self.position += delta;
        self
    }

    // ============ Rotation ============

    pub fn rotation(&self) -> Quat {
        self.rotation
    }

    pub fn set_rotation(&mut self, rotation: Quat) -> &mut Self {
        self.rotation = rotation.normalize();
        self
    }

    /// Rotate by `angle_degrees` around the world-space `axis`.
    ///
    /// The new rotation is applied after the existing one.
    pub fn rotate(&mut self, angle_degrees: f32, axis: Vec3) -> &mut Self {
        let delta = Quat::from_axis_angle(axis, angle_degrees.to_radians());
        self.rotation = (delta * self.rotation).normalize();
        self
    }

    // ============ Scale ============

    pub fn scale(&self) -> Vec3 {
        self.scale
    }

    pub fn set_scale(&mut self, scale: Vec3) -> &mut Self {
        self.scale = scale;
        self
    }

    /// Set uniform scale (same value for x, y, z).
    pub fn set_scale_uniform(&mut self, s: f32) -> &mut Self {
        self.scale = Vec3::new(s, s, s);
        self
    }

    // ============ Matrix Generation ============

    /// Generate the transformation matrix.
    ///
    /// Order: Translation * Rotation * Scale
    /// (Scale applied first, then rotation, then translation)
    pub fn to_matrix(&self) -> Mat4 {
        Mat4::translation(self.position) * self.rotation.to_mat4() * Mat4::scaling(self.scale)
    }

    /// Generate the normal matrix for lighting calculations.
    ///
    /// The inverse transpose of `Rotation * Scale`, which for a pure rotation
    /// and axis-aligned scale is `Rotation * Scale^-1`. Zero scale axes map to zero.
    pub fn normal_matrix(&self) -> Mat4 {
        let inverse = |s: f32| if s != 0.0 { 1.0 / s } else { 0.0 };
        let inverse_scale = Vec3::new(
            inverse(self.scale.x),
            inverse(self.scale.y),
            inverse(self.scale.z),
        );
        self.rotation.to_mat4() * Mat4::scaling(inverse_scale)
    }
}
