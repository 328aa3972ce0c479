//! Scanline compositor: turns finalized spans into 1-bit pixels.

use super::framebuffer::FrameBuffer;
use super::rasterizer::PixelShader;
use super::span::Span;
use crate::color::Color;

/// Inclusive pixel columns covered by `span` on a screen `width` pixels wide:
/// `ceil(x_start) ..= floor(x_end)`, clamped to the screen.
#[inline]
pub fn pixel_range(span: &Span, width: u32) -> Option<(i32, i32)> {
    let first = (span.x_start.ceil() as i32).max(0);
    let last = (span.x_end.floor() as i32).min(width as i32 - 1);
    (first <= last).then_some((first, last))
}

/// Writes one span. With `outline` set, its first and last pixel are black.
pub fn composite_span<S: PixelShader + ?Sized>(
    span: &Span,
    y: i32,
    buffer: &mut FrameBuffer,
    shader: &S,
    outline: bool,
) {
    let Some((first, last)) = pixel_range(span, buffer.width()) else {
        return;
    };
    for x in first..=last {
        let color = if outline && (x == first || x == last) {
            Color::Black
        } else {
            shader.shade(x, y, span.normal_at(x as f32))
        };
        buffer.set_pixel(x, y, color);
    }
}

/// Writes every span of row `y` in order.
pub fn composite_row<S: PixelShader + ?Sized>(
    spans: &[Span],
    y: i32,
    buffer: &mut FrameBuffer,
    shader: &S,
    outline: bool,
) {
    for span in spans {
        composite_span(span, y, buffer, shader, outline);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::light::DirectionalLight;
    use crate::prelude::Vec3;
    use crate::render::dither::DitherMatrix;
    use crate::render::rasterizer::{DitherShader, FlatShader};

    fn row_colors(buffer: &FrameBuffer, y: i32) -> Vec<Color> {
        (0..buffer.width() as i32)
            .map(|x| buffer.get_pixel(x, y).unwrap_or_default())
            .collect()
    }

    #[test]
    fn pixel_range_rounds_inward_and_clamps() {
        let span = Span::flat(2.3, 7.8, 1.0, Vec3::UP);
        assert_eq!(pixel_range(&span, 400), Some((3, 7)));
        let span = Span::flat(-10.0, 500.0, 1.0, Vec3::UP);
        assert_eq!(pixel_range(&span, 400), Some((0, 399)));
        let span = Span::flat(4.2, 4.9, 1.0, Vec3::UP);
        assert_eq!(pixel_range(&span, 400), None);
    }

    #[test]
    fn outline_marks_span_ends() {
        let mut buffer = FrameBuffer::new(16, 1);
        let shader = FlatShader::new(Color::White);
        let spans = [Span::flat(2.0, 6.0, 1.0, Vec3::UP), Span::flat(6.0, 12.5, 1.0, Vec3::UP)];
        buffer.clear(Color::White);
        composite_row(&spans, 0, &mut buffer, &shader, true);

        let black: Vec<usize> = row_colors(&buffer, 0)
            .into_iter()
            .enumerate()
            .filter(|&(_, c)| c == Color::Black)
            .map(|(x, _)| x)
            .collect();
        assert_eq!(black, vec![2, 6, 12]);
    }

    #[test]
    fn without_outline_shader_decides_every_pixel() {
        let mut buffer = FrameBuffer::new(16, 1);
        buffer.clear(Color::Black);
        let shader = FlatShader::new(Color::White);
        composite_row(&[Span::flat(0.0, 15.0, 1.0, Vec3::UP)], 0, &mut buffer, &shader, false);
        assert_eq!(buffer.count_black(), 0);
    }

    #[test]
    fn dithered_brightness_follows_interpolated_normal() {
        let mut buffer = FrameBuffer::new(64, 8);
        let shader = DitherShader::new(DirectionalLight::default(), DitherMatrix::bayer(8).unwrap());
        // Facing down on the left, up on the right.
        let span = Span::new(0.0, 63.0, 1.0, 1.0, Vec3::DOWN, Vec3::UP);
        for y in 0..8 {
            composite_row(&[span], y, &mut buffer, &shader, false);
        }
        let white_in = |x0: i32, x1: i32| {
            (0..8)
                .flat_map(|y| (x0..x1).map(move |x| (x, y)))
                .filter(|&(x, y)| buffer.get_pixel(x, y) == Some(Color::White))
                .count()
        };
        assert!(white_in(0, 16) < white_in(48, 64));
        assert_eq!(buffer.get_pixel(0, 0), Some(Color::Black));
    }

    #[test]
    fn offscreen_rows_are_ignored() {
        let mut buffer = FrameBuffer::new(8, 2);
        let shader = FlatShader::new(Color::Black);
        composite_row(&[Span::flat(0.0, 7.0, 1.0, Vec3::UP)], 5, &mut buffer, &shader, true);
        composite_row(&[Span::flat(0.0, 7.0, 1.0, Vec3::UP)], -1, &mut buffer, &shader, true);
        assert_eq!(buffer.count_black(), 0);
    }
}
