//! Screen projection and edge walking.
//!
//! A clipped view-space triangle is projected to pixels, its vertices sorted
//! top to bottom, and its two boundary edges walked one scanline at a time.
//! Every covered row yields one candidate [`Span`].
//!
//! ```text
//!        v1
//!        /\
//!       /  \  upper
//!  long/    v2
//!     /    /
//!    /   /  lower
//!   /  /
//!   v3
//! ```

use super::span::Span;
use crate::clipper::ClipVertex;
use crate::math::vec3::Vec3;
use crate::projection::Projection;

/// Triangles shorter than this (in pixels) have no rows worth walking.
const MIN_TRIANGLE_HEIGHT: f32 = 1e-4;

/// True if the view-space triangle faces away from a camera at the origin.
///
/// Front faces wind counter-clockwise, so their normal points back towards the eye.
pub fn is_back_facing(positions: &[Vec3; 3]) -> bool {
    let [a, b, c] = *positions;
    let normal = (b - a).cross(c - a);
    normal.dot(a) >= 0.0
}

/// A projected vertex: pixel position, depth proxy, and normal.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct ScreenVertex {
    pub x: f32,
    pub y: f32,
    /// `1 / -view_z`; larger is nearer.
    pub depth: f32,
    pub normal: Vec3,
}

impl ScreenVertex {
    pub fn new(x: f32, y: f32, depth: f32, normal: Vec3) -> Self {
        Self { x, y, depth, normal }
    }

    fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.depth.is_finite() && self.normal.is_finite()
    }
}

/// Projects a clipped triangle onto a `width` x `height` screen.
pub fn project_triangle(
    projection: &Projection,
    triangle: &[ClipVertex; 3],
    width: u32,
    height: u32,
) -> [ScreenVertex; 3] {
    triangle.map(|v| {
        let p = projection.project(v.position, width, height);
        ScreenVertex::new(p.x, p.y, p.z, v.normal)
    })
}

/// One triangle edge, walked from its top vertex to its bottom vertex.
#[derive(Clone, Copy, Debug)]
struct Edge {
    top: ScreenVertex,
    bottom: ScreenVertex,
}

impl Edge {
    fn new(top: ScreenVertex, bottom: ScreenVertex) -> Self {
        Self { top, bottom }
    }

    /// Attributes at scanline `y`: `(x, depth, normal)`. The parameter is
    /// clamped to the edge, and a flat edge yields its top vertex.
    fn at(&self, y: f32) -> (f32, f32, Vec3) {
        let height = self.bottom.y - self.top.y;
        let t = if height.abs() > f32::EPSILON {
            ((y - self.top.y) / height).clamp(0.0, 1.0)
        } else {
            0.0
        };
        (
            self.top.x + (self.bottom.x - self.top.x) * t,
            self.top.depth + (self.bottom.depth - self.top.depth) * t,
            self.top.normal.lerp(self.bottom.normal, t),
        )
    }
}

/// Iterator over the candidate spans of one projected triangle, top to bottom.
///
/// Rows run from `ceil(top.y)` to `floor(bottom.y)`, limited to the screen.
/// Spans entirely off-screen are skipped and the rest are clamped to
/// `[0, width - 1]`. Sub-pixel spans are still yielded; the rasterizers
/// discard them.
#[derive(Clone, Debug)]
pub struct EdgeWalker {
    long: Edge,
    upper: Edge,
    lower: Edge,
    mid_y: f32,
    /// The middle vertex lies left of the long edge.
    mid_on_left: bool,
    y: i32,
    y_last: i32,
    width: u32,
}

impl EdgeWalker {
    /// Returns `None` for triangles with non-finite vertices or no height.
    pub fn new(vertices: [ScreenVertex; 3], width: u32, height: u32) -> Option<Self> {
        if !vertices.iter().all(ScreenVertex::is_finite) {
            return None;
        }

        let mut sorted = vertices;
        sorted.sort_unstable_by(|a, b| a.y.total_cmp(&b.y));
        let [v1, v2, v3] = sorted;
        if (v3.y - v1.y).abs() < MIN_TRIANGLE_HEIGHT {
            return None;
        }

        let long = Edge::new(v1, v3);
        let (long_x, _, _) = long.at(v2.y);

        Some(Self {
            long,
            upper: Edge::new(v1, v2),
            lower: Edge::new(v2, v3),
            mid_y: v2.y,
            mid_on_left: v2.x < long_x,
            y: (v1.y.ceil() as i32).max(0),
            y_last: (v3.y.floor() as i32).min(height as i32 - 1),
            width,
        })
    }

    /// Candidate span on scanline `y`, before screen clamping.
    fn span_at(&self, y: f32) -> Span {
        let short = if y < self.mid_y { &self.upper } else { &self.lower };
        let long = self.long.at(y);
        let short = short.at(y);
        let (mut left, mut right) = if self.mid_on_left {
            (short, long)
        } else {
            (long, short)
        };
        if left.0 > right.0 {
            std::mem::swap(&mut left, &mut right);
        }
        Span::new(left.0, right.0, left.1, right.1, left.2, right.2)
    }
}

impl Iterator for EdgeWalker {
    type Item = (usize, Span);

    fn next(&mut self) -> Option<Self::Item> {
        let max_x = self.width as f32 - 1.0;
        while self.y <= self.y_last {
            let y = self.y;
            self.y += 1;

            let mut span = self.span_at(y as f32);
            if span.x_end < 0.0 || span.x_start >= self.width as f32 {
                continue;
            }
            span.clip(0.0, max_x);
            return Some((y as usize, span));
        }
        None
    }
}
