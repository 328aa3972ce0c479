//! Small linear-algebra toolkit: vectors, matrices and quaternions.

pub mod mat4;
pub mod quat;
pub mod vec2;
pub mod vec3;
pub mod vec4;
