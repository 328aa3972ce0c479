//! Pixel shaders for span rasterization.
//!
//! The rasterizers decide *which* pixels a span owns; the shader decides the
//! colour of each of those pixels. On a 1-bit display that means turning an
//! interpolated normal into a brightness and comparing it against an ordered
//! dither threshold.

use crate::color::Color;
use crate::light::DirectionalLight;
use crate::prelude::Vec3;
use crate::render::dither::DitherMatrix;

/// Trait for per-pixel shading computations.
///
/// The rasterizer calls `shade()` for every pixel of a visible span with the
/// pixel coordinates and the normal interpolated at that pixel.
pub trait PixelShader {
    fn shade(&self, x: i32, y: i32, normal: Vec3) -> Color;
}

/// Directional light quantized through an ordered dither matrix.
///
/// A pixel is white iff its brightness is strictly greater than the dither
/// threshold at `(x mod n, y mod n)`.
#[derive(Debug, Clone)]
pub struct DitherShader {
    light: DirectionalLight,
    matrix: DitherMatrix,
}

impl DitherShader {
    pub fn new(light: DirectionalLight, matrix: DitherMatrix) -> Self {
        Self { light, matrix }
    }

    pub fn light(&self) -> &DirectionalLight {
        &self.light
    }

    pub fn set_light(&mut self, light: DirectionalLight) {
        self.light = light;
    }

    pub fn matrix(&self) -> &DitherMatrix {
        &self.matrix
    }
}

impl PixelShader for DitherShader {
    #[inline]
    fn shade(&self, x: i32, y: i32, normal: Vec3) -> Color {
        if self.light.brightness(normal) > self.matrix.threshold(x, y) {
            Color::White
        } else {
            Color::Black
        }
    }
}

/// Constant colour, ignoring the normal. Useful for silhouette tests.
#[derive(Debug, Clone, Copy)]
pub struct FlatShader {
    color: Color,
}

impl FlatShader {
    pub fn new(color: Color) -> Self {
        Self { color }
    }
}

impl PixelShader for FlatShader {
    #[inline]
    fn shade(&self, _x: i32, _y: i32, _normal: Vec3) -> Color {
        self.color
    }
}
