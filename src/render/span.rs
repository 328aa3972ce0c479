//! Horizontal spans: the unit of visibility in the span buffer.
//!
//! A span covers `[x_start, x_end]` on one scanline. Depth and normal are
//! linear in x between the two endpoints. Depth is the inverse view depth
//! `1 / -z`, so a larger value is nearer the camera.

use crate::prelude::{Vec2, Vec3};

/// Spans narrower than this (in pixels) are dropped.
pub const MIN_SPAN_WIDTH: f32 = 1.0;

/// Depth crossings closer than this to either end of a shared range are ignored.
pub const CROSSOVER_EPSILON: f32 = 1e-3;

#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Span {
    pub x_start: f32,
    pub x_end: f32,
    pub z_start: f32,
    pub z_end: f32,
    pub normal_start: Vec3,
    pub normal_end: Vec3,
}

impl Span {
    pub fn new(
        x_start: f32,
        x_end: f32,
        z_start: f32,
        z_end: f32,
        normal_start: Vec3,
        normal_end: Vec3,
    ) -> Self {
        Self {
            x_start,
            x_end,
            z_start,
            z_end,
            normal_start,
            normal_end,
        }
    }

    /// Span with a single depth and normal across its width.
    pub fn flat(x_start: f32, x_end: f32, z: f32, normal: Vec3) -> Self {
        Self::new(x_start, x_end, z, z, normal, normal)
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.x_end - self.x_start
    }

    /// Interpolation parameter of `x` along the span. Zero-width spans map
    /// everything to the start.
    #[inline]
    fn t_at(&self, x: f32) -> f32 {
        let width = self.width();
        if width.abs() > f32::EPSILON {
            (x - self.x_start) / width
        } else {
            0.0
        }
    }

    #[inline]
    pub fn z_at(&self, x: f32) -> f32 {
        self.z_start + (self.z_end - self.z_start) * self.t_at(x)
    }

    #[inline]
    pub fn normal_at(&self, x: f32) -> Vec3 {
        self.normal_start.lerp(self.normal_end, self.t_at(x))
    }

    fn is_finite(&self) -> bool {
        self.x_start.is_finite()
            && self.x_end.is_finite()
            && self.z_start.is_finite()
            && self.z_end.is_finite()
            && self.normal_start.is_finite()
            && self.normal_end.is_finite()
    }

    /// True for spans that must never enter a span list: non-finite values,
    /// reversed or empty ranges, and anything narrower than [`MIN_SPAN_WIDTH`].
    pub fn is_degenerate(&self) -> bool {
        !self.is_finite() || self.x_start >= self.x_end || self.width() < MIN_SPAN_WIDTH
    }

    /// True if the open x-intervals of the two spans intersect. Spans that
    /// only touch at an endpoint do not overlap.
    #[inline]
    pub fn overlaps(&self, other: &Span) -> bool {
        self.x_start < other.x_end && other.x_start < self.x_end
    }

    /// Shrinks the span to `[new_start, new_end]`, re-interpolating depth and
    /// normal at any moved endpoint. Bounds that are not tighter than the
    /// current ones are ignored. Returns whether anything changed.
    pub fn clip(&mut self, new_start: f32, new_end: f32) -> bool {
        let start = new_start.max(self.x_start);
        let end = new_end.min(self.x_end);
        if start == self.x_start && end == self.x_end {
            return false;
        }

        let original = *self;
        if start != original.x_start {
            self.x_start = start;
            self.z_start = original.z_at(start);
            self.normal_start = original.normal_at(start);
        }
        if end != original.x_end {
            self.x_end = end;
            self.z_end = original.z_at(end);
            self.normal_end = original.normal_at(end);
        }
        true
    }

    /// Copy of the span clipped to `[new_start, new_end]`.
    pub fn clipped(mut self, new_start: f32, new_end: f32) -> Self {
        self.clip(new_start, new_end);
        self
    }

    /// Splits the span at `x` into left and right halves.
    pub fn split_at(&self, x: f32) -> (Span, Span) {
        (
            self.clipped(self.x_start, x),
            self.clipped(x, self.x_end),
        )
    }

    /// Point `(x, z)` where the depth lines of the two spans cross inside their
    /// shared x-range, if they do.
    ///
    /// The crossing is found from the depth difference at the ends of the
    /// shared range; it must change sign strictly, and the crossing must lie
    /// more than [`CROSSOVER_EPSILON`] from both ends.
    pub fn crossover(&self, other: &Span) -> Option<Vec2> {
        let lo = self.x_start.max(other.x_start);
        let hi = self.x_end.min(other.x_end);
        if hi <= lo {
            return None;
        }

        let d_lo = self.z_at(lo) - other.z_at(lo);
        let d_hi = self.z_at(hi) - other.z_at(hi);
        if d_lo * d_hi >= 0.0 {
            return None;
        }

        let x = lo + (hi - lo) * d_lo / (d_lo - d_hi);
        if x - lo > CROSSOVER_EPSILON && hi - x > CROSSOVER_EPSILON {
            Some(Vec2::new(x, self.z_at(x)))
        } else {
            None
        }
    }

    /// True if this span is strictly nearer than `other` over their shared
    /// range, judged at its midpoint. Equal depth is not in front.
    ///
    /// Only meaningful when [`Span::crossover`] found no crossing.
    pub fn is_in_front_of(&self, other: &Span) -> bool {
        let lo = self.x_start.max(other.x_start);
        let hi = self.x_end.min(other.x_end);
        let mid = (lo + hi) * 0.5;
        self.z_at(mid) > other.z_at(mid)
    }
}
