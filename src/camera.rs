//! First-person camera
//!
//! # Coordinate System
//!
//! Uses a **right-handed** coordinate system:
//! - X: positive right
//! - Y: positive up
//! - Z: positive toward the viewer (the camera looks down -Z)
//!
//! # Orientation
//!
//! Orientation is stored as yaw/pitch angles and turned into direction
//! vectors when needed.
//!
//! - **Yaw**: Rotation around Y-axis (horizontal look, positive = look right)
//! - **Pitch**: Rotation around X-axis (vertical look, positive = look up)

use crate::math::mat4::Mat4;
use crate::math::vec3::Vec3;
use crate::window::InputState;

/// First-person camera with position and yaw/pitch orientation.
#[derive(Debug, Clone)]
pub struct FpsCamera {
    position: Vec3,
    yaw: f32,   // radians
    pitch: f32, // radians

    pitch_min: f32,
    pitch_max: f32,
}

impl Default for FpsCamera {
    fn default() -> Self {
        Self::new(Vec3::ZERO)
    }
}

impl FpsCamera {
    /// Creates a new FPS camera at the given position, looking along -Z.
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            yaw: 0.0,
            pitch: 0.0,
            pitch_min: -89.0_f32.to_radians(),
            pitch_max: 89.0_f32.to_radians(),
        }
    }

    /// Creates a camera at `position` looking toward `target`.
    pub fn looking_at(position: Vec3, target: Vec3) -> Self {
        let mut camera = Self::new(position);
        camera.look_at(target);
        camera
    }

    // =========================================================================
    // Orientation
    // =========================================================================

    /// Rotates the camera by yaw (horizontal) and pitch (vertical) deltas.
    pub fn rotate(&mut self, yaw_delta: f32, pitch_delta: f32) {
        self.rotate_yaw(yaw_delta);
        self.rotate_pitch(pitch_delta);
    }

    /// Positive values rotate right, negative values rotate left.
    pub fn rotate_yaw(&mut self, delta: f32) {
        self.yaw = (self.yaw + delta).rem_euclid(std::f32::consts::TAU);
    }

    /// Positive values look up. Clamped to the pitch limits.
    pub fn rotate_pitch(&mut self, delta: f32) {
        self.pitch = (self.pitch + delta).clamp(self.pitch_min, self.pitch_max);
    }

    /// Points the camera at a world position.
    pub fn look_at(&mut self, target: Vec3) {
        let direction = target - self.position;
        let horizontal_len = (direction.x * direction.x + direction.z * direction.z).sqrt();

        if horizontal_len > f32::EPSILON {
            self.yaw = direction.x.atan2(-direction.z).rem_euclid(std::f32::consts::TAU);
        }
        if direction.magnitude() > f32::EPSILON {
            self.pitch = direction
                .y
                .atan2(horizontal_len)
                .clamp(self.pitch_min, self.pitch_max);
        }
    }

    /// Sets the pitch limits (in radians).
    pub fn set_pitch_limits(&mut self, min: f32, max: f32) {
        self.pitch_min = min;
        self.pitch_max = max;
        self.pitch = self.pitch.clamp(self.pitch_min, self.pitch_max);
    }

    // =========================================================================
    // Movement
    // =========================================================================

    /// Moves the camera along its forward direction.
    pub fn move_forward(&mut self, distance: f32) {
        self.position += self.forward() * distance;
    }

    /// Moves the camera along its right direction (strafe).
    pub fn move_right(&mut self, distance: f32) {
        self.position += self.right() * distance;
    }

    /// Moves the camera along the world up direction.
    pub fn move_up(&mut self, distance: f32) {
        self.position.y += distance;
    }

    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    // =========================================================================
    // Queries
    // =========================================================================

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn forward(&self) -> Vec3 {
        let (sin_yaw, cos_yaw) = self.yaw.sin_cos();
        let (sin_pitch, cos_pitch) = self.pitch.sin_cos();
        Vec3::new(sin_yaw * cos_pitch, sin_pitch, -cos_yaw * cos_pitch)
    }

    /// Horizontal right direction; pitch does not affect it.
    pub fn right(&self) -> Vec3 {
        let (sin_yaw, cos_yaw) = self.yaw.sin_cos();
        Vec3::new(cos_yaw, 0.0, sin_yaw)
    }

    pub fn up(&self) -> Vec3 {
        self.right().cross(self.forward())
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    // =========================================================================
    // Matrix Generation
    // =========================================================================

    /// World-to-camera matrix.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.position + self.forward(), Vec3::UP)
    }
}

// =============================================================================
// Mouse Look
// =============================================================================

/// Turns absolute mouse positions into per-frame deltas.
///
/// The first sample after [`reset`](Self::reset) has no predecessor and
/// yields a zero delta.
#[derive(Debug, Clone, Default)]
pub struct MouseLook {
    previous: Option<(i32, i32)>,
}

impl MouseLook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn delta(&mut self, x: i32, y: i32) -> (i32, i32) {
        let delta = match self.previous {
            Some((px, py)) => (x - px, y - py),
            None => (0, 0),
        };
        self.previous = Some((x, y));
        delta
    }

    /// Forgets the previous position, e.g. when the drag ends.
    pub fn reset(&mut self) {
        self.previous = None;
    }
}

// =============================================================================
// Camera Controller
// =============================================================================

/// Configuration and input handling for FPS camera movement.
#[derive(Debug, Clone)]
pub struct FpsCameraController {
    /// Movement speed in units per second.
    pub move_speed: f32,
    /// Mouse sensitivity in radians per pixel.
    pub look_sensitivity: f32,
    mouse: MouseLook,
}

impl Default for FpsCameraController {
    fn default() -> Self {
        Self::new(5.0, 0.005)
    }
}

impl FpsCameraController {
    pub fn new(move_speed: f32, look_sensitivity: f32) -> Self {
        Self {
            move_speed,
            look_sensitivity,
            mouse: MouseLook::new(),
        }
    }

    /// Updates the camera based on input state.
    ///
    /// # Input Mapping
    /// - W/S: Move forward/backward
    /// - A/D: Strafe left/right
    /// - Space/Shift: Move up/down
    /// - Mouse drag: Look around
    pub fn update(&mut self, camera: &mut FpsCamera, input: &InputState, delta_time: f32) {
        let move_amount = self.move_speed * delta_time;

        if input.forward {
            camera.move_forward(move_amount);
        }
        if input.back {
            camera.move_forward(-move_amount);
        }
        if input.right {
            camera.move_right(move_amount);
        }
        if input.left {
            camera.move_right(-move_amount);
        }
        if input.up {
            camera.move_up(move_amount);
        }
        if input.down {
            camera.move_up(-move_amount);
        }

        let (dx, dy) = match input.mouse_position {
            Some((x, y)) => self.mouse.delta(x, y),
            None => {
                self.mouse.reset();
                (0, 0)
            }
        };
        if dx != 0 || dy != 0 {
            // Screen y grows downward; dragging up looks up.
            camera.rotate(
                dx as f32 * self.look_sensitivity,
                -dy as f32 * self.look_sensitivity,
            );
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
