//! The span buffer (S-Buffer): per-scanline visibility without a depth buffer.
//!
//! Each row holds spans sorted by `x_start` and pairwise disjoint in x, and
//! every span is the nearest surface inserted so far over its range. A new
//! span is resolved against the existing ones by cutting whichever is behind,
//! or, when the two depth lines cross inside the shared range, by splitting
//! both at the crossing.
//!
//! Insertion is iterative. Pieces of the incoming span that still need
//! resolving go onto a pending stack. Every step either narrows a pending
//! piece or removes one overlap, and pieces narrower than
//! [`MIN_SPAN_WIDTH`](super::span::MIN_SPAN_WIDTH) are dropped, so the loop
//! always terminates.

use log::trace;

use super::span::Span;

#[derive(Debug, Clone)]
pub struct SpanBuffer {
    rows: Vec<Vec<Span>>,
    width: u32,
    pending: Vec<Span>,
}

impl SpanBuffer {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            rows: vec![Vec::new(); height as usize],
            width,
            pending: Vec::new(),
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// Empties every row, keeping allocations for the next frame.
    pub fn clear(&mut self) {
        for row in &mut self.rows {
            row.clear();
        }
    }

    /// Spans of row `y`, sorted by `x_start`. Out-of-range rows are empty.
    pub fn row(&self, y: usize) -> &[Span] {
        self.rows.get(y).map(Vec::as_slice).unwrap_or_default()
    }

    /// All rows with their y coordinate.
    pub fn rows(&self) -> impl Iterator<Item = (usize, &[Span])> {
        self.rows.iter().map(Vec::as_slice).enumerate()
    }

    /// Total number of spans across all rows.
    pub fn span_count(&self) -> usize {
        self.rows.iter().map(Vec::len).sum()
    }

    /// Inserts a candidate span into row `y`.
    ///
    /// Returns false if the span was rejected outright: row out of range,
    /// entirely off-screen horizontally, or degenerate. An accepted span may
    /// still end up entirely hidden.
    pub fn insert(&mut self, y: usize, span: Span) -> bool {
        let Some(row) = self.rows.get_mut(y) else {
            return false;
        };
        if span.x_end < 0.0 || span.x_start >= self.width as f32 || span.is_degenerate() {
            trace!("dropping span {span:?} on row {y}");
            return false;
        }

        self.pending.push(span);
        while let Some(s) = self.pending.pop() {
            resolve(row, s, &mut self.pending);
        }
        true
    }
}

/// Pushes `span` for further resolution unless it is too small to matter.
fn push_piece(pending: &mut Vec<Span>, span: Span) {
    if !span.is_degenerate() {
        pending.push(span);
    }
}

/// Replaces `row[index]` with the non-degenerate spans in `pieces`.
fn replace(row: &mut Vec<Span>, index: usize, pieces: [Option<Span>; 2]) {
    let kept = pieces.into_iter().flatten().filter(|p| !p.is_degenerate());
    row.splice(index..=index, kept);
}

/// One resolution step of `s` against the first span in `row` it overlaps.
fn resolve(row: &mut Vec<Span>, s: Span, pending: &mut Vec<Span>) {
    // Spans are disjoint, so x_end is sorted as well as x_start.
    let index = row.partition_point(|c| c.x_end <= s.x_start);
    let current = match row.get(index) {
        Some(c) if c.overlaps(&s) => *c,
        _ => {
            row.insert(index, s);
            return;
        }
    };

    if let Some(p) = s.crossover(&current) {
        // Visibility flips at p.x: split both, the halves resolve simply.
        let (left, right) = current.split_at(p.x);
        replace(row, index, [Some(left), Some(right)]);
        let (left, right) = s.split_at(p.x);
        push_piece(pending, left);
        push_piece(pending, right);
        return;
    }

    if s.is_in_front_of(&current) {
        // Keep the parts of `current` outside `s`; `s` is retried against the rest.
        let left = (current.x_start < s.x_start)
            .then(|| current.clipped(current.x_start, s.x_start));
        let right = (current.x_end > s.x_end)
            .then(|| current.clipped(s.x_end, current.x_end));
        replace(row, index, [left, right]);
        pending.push(s);
    } else {
        // `current` wins the overlap; whatever sticks out of it goes on.
        if s.x_start < current.x_start {
            push_piece(pending, s.clipped(s.x_start, current.x_start));
        }
        if s.x_end > current.x_end {
            push_piece(pending, s.clipped(current.x_end, s.x_end));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prelude::Vec3;
    use approx::assert_relative_eq;

    const WIDTH: u32 = 400;

    fn flat(x_start: f32, x_end: f32, z: f32) -> Span {
        Span::flat(x_start, x_end, z, Vec3::UP)
    }

    fn ramp(x_start: f32, x_end: f32, z_start: f32, z_end: f32) -> Span {
        Span::new(x_start, x_end, z_start, z_end, Vec3::UP, Vec3::UP)
    }

    fn assert_sorted_and_disjoint(row: &[Span]) {
        for s in row {
            assert!(!s.is_degenerate(), "degenerate span {s:?}");
        }
        for pair in row.windows(2) {
            assert!(pair[0].x_start <= pair[1].x_start, "unsorted: {pair:?}");
            assert!(pair[0].x_end <= pair[1].x_start, "overlap: {pair:?}");
        }
    }

    /// Small deterministic generator so the property tests are reproducible.
    struct Lcg(u64);

    impl Lcg {
        fn next_u32(&mut self) -> u32 {
            self.0 = self
                .0
                .wrapping_mul(6364136223846793005)
                .wrapping_add(1442695040888963407);
            (self.0 >> 33) as u32
        }

        fn range(&mut self, lo: u32, hi: u32) -> u32 {
            lo + self.next_u32() % (hi - lo)
        }

        fn unit(&mut self) -> f32 {
            self.next_u32() as f32 / (1u64 << 31) as f32
        }
    }

    #[test]
    fn disjoint_spans_insert_independently() {
        let mut buffer = SpanBuffer::new(WIDTH, 1);
        assert!(buffer.insert(0, flat(200.0, 260.0, 0.5)));
        assert!(buffer.insert(0, flat(10.0, 50.0, 0.5)));
        assert!(buffer.insert(0, flat(50.0, 90.0, 0.2)));
        let row = buffer.row(0);
        assert_eq!(row.len(), 3);
        assert_eq!(row[0], flat(10.0, 50.0, 0.5));
        assert_eq!(row[1], flat(50.0, 90.0, 0.2));
        assert_eq!(row[2], flat(200.0, 260.0, 0.5));
    }

    #[test]
    fn nearer_contained_span_splits_farther_one() {
        let mut buffer = SpanBuffer::new(WIDTH, 1);
        let far = ramp(20.0, 120.0, 0.2, 0.3);
        let near = flat(50.0, 80.0, 0.9);
        buffer.insert(0, far);
        buffer.insert(0, near);

        let row = buffer.row(0);
        assert_eq!(row.len(), 3);
        assert_eq!(row[0].x_start, 20.0);
        assert_eq!(row[0].x_end, 50.0);
        assert_eq!(row[1], near);
        assert_eq!(row[2].x_start, 80.0);
        assert_eq!(row[2].x_end, 120.0);
        assert_relative_eq!(row[0].z_end, far.z_at(50.0));
        assert_relative_eq!(row[2].z_start, far.z_at(80.0));
        assert_sorted_and_disjoint(row);
    }

    #[test]
    fn farther_contained_span_is_hidden() {
        let mut buffer = SpanBuffer::new(WIDTH, 1);
        buffer.insert(0, flat(20.0, 120.0, 0.9));
        assert!(buffer.insert(0, flat(50.0, 80.0, 0.1)));
        assert_eq!(buffer.row(0), &[flat(20.0, 120.0, 0.9)]);
    }

    #[test]
    fn nearer_containing_span_replaces_farther_one() {
        let mut buffer = SpanBuffer::new(WIDTH, 1);
        buffer.insert(0, flat(50.0, 80.0, 0.1));
        buffer.insert(0, flat(40.0, 100.0, 0.3));
        buffer.insert(0, flat(20.0, 120.0, 0.9));
        assert_eq!(buffer.row(0), &[flat(20.0, 120.0, 0.9)]);
    }

    #[test]
    fn partial_overlap_clips_the_rear_span() {
        let mut buffer = SpanBuffer::new(WIDTH, 1);
        buffer.insert(0, flat(10.0, 60.0, 0.4));
        buffer.insert(0, flat(40.0, 100.0, 0.6));
        let row = buffer.row(0);
        assert_eq!(row, &[flat(10.0, 40.0, 0.4), flat(40.0, 100.0, 0.6)]);

        let mut buffer = SpanBuffer::new(WIDTH, 1);
        buffer.insert(0, flat(10.0, 60.0, 0.6));
        buffer.insert(0, flat(40.0, 100.0, 0.4));
        let row = buffer.row(0);
        assert_eq!(row, &[flat(10.0, 60.0, 0.6), flat(60.0, 100.0, 0.4)]);
    }

    #[test]
    fn span_covering_several_neighbours() {
        let mut buffer = SpanBuffer::new(WIDTH, 1);
        buffer.insert(0, flat(10.0, 30.0, 0.5));
        buffer.insert(0, flat(40.0, 60.0, 0.9));
        buffer.insert(0, flat(70.0, 90.0, 0.5));
        buffer.insert(0, flat(0.0, 100.0, 0.7));
        assert_eq!(
            buffer.row(0),
            &[
                flat(0.0, 40.0, 0.7),
                flat(40.0, 60.0, 0.9),
                flat(60.0, 100.0, 0.7),
            ]
        );
    }

    #[test]
    fn crossing_spans_swap_at_crossover() {
        let mut buffer = SpanBuffer::new(WIDTH, 1);
        // a is nearer on the left, b on the right; they cross at x = 50.
        let a = ramp(0.0, 100.0, 1.0, 0.0);
        let b = ramp(0.0, 100.0, 0.0, 1.0);
        buffer.insert(0, a);
        buffer.insert(0, b);

        let row = buffer.row(0);
        assert_eq!(row.len(), 2);
        assert_relative_eq!(row[0].x_end, 50.0, epsilon = 1e-3);
        assert_relative_eq!(row[1].x_start, 50.0, epsilon = 1e-3);
        assert_relative_eq!(row[0].z_start, 1.0);
        assert_relative_eq!(row[1].z_end, 1.0);
        assert_sorted_and_disjoint(row);
    }

    #[test]
    fn crossing_with_offset_ranges() {
        let mut buffer = SpanBuffer::new(WIDTH, 1);
        let a = ramp(0.0, 80.0, 0.2, 1.0);
        let b = ramp(20.0, 200.0, 0.8, 0.8);
        buffer.insert(0, a);
        buffer.insert(0, b);

        // a.z(x) = 0.2 + 0.01 x reaches 0.8 at x = 60.
        let row = buffer.row(0);
        assert_eq!(row.len(), 4);
        assert_eq!(row[0].x_start, 0.0);
        assert_eq!(row[0].x_end, 20.0);
        assert_relative_eq!(row[1].x_end, 60.0, epsilon = 1e-3);
        assert_relative_eq!(row[1].z_end, 0.8, epsilon = 1e-5);
        assert_relative_eq!(row[2].x_end, 80.0);
        assert_relative_eq!(row[2].z_end, 1.0);
        assert_eq!(row[3].x_start, 80.0);
        assert_eq!(row[3].x_end, 200.0);
        assert_sorted_and_disjoint(row);
    }

    #[test]
    fn degenerate_and_offscreen_spans_are_rejected() {
        let mut buffer = SpanBuffer::new(WIDTH, 2);
        assert!(!buffer.insert(0, flat(10.0, 10.5, 0.5)));
        assert!(!buffer.insert(0, flat(10.0, f32::NAN, 0.5)));
        assert!(!buffer.insert(0, flat(-50.0, -1.0, 0.5)));
        assert!(!buffer.insert(0, flat(400.0, 450.0, 0.5)));
        assert!(!buffer.insert(2, flat(10.0, 50.0, 0.5)));
        assert_eq!(buffer.span_count(), 0);
    }

    #[test]
    fn clear_empties_rows() {
        let mut buffer = SpanBuffer::new(WIDTH, 3);
        buffer.insert(1, flat(10.0, 50.0, 0.5));
        buffer.insert(2, flat(10.0, 50.0, 0.5));
        assert_eq!(buffer.span_count(), 2);
        buffer.clear();
        assert_eq!(buffer.span_count(), 0);
        assert_eq!(buffer.height(), 3);
    }

    #[test]
    fn random_flat_spans_keep_nearest_surface() {
        let mut rng = Lcg(0x5eed);
        for _ in 0..50 {
            let mut buffer = SpanBuffer::new(WIDTH, 1);
            let mut inserted = Vec::new();
            for _ in 0..20 {
                let start = rng.range(0, 380);
                let end = rng.range(start + 1, 400);
                // distinct depths, so there are no ties
                let z = 0.01 + rng.range(0, 1_000_000) as f32 * 1e-6 + inserted.len() as f32;
                let span = flat(start as f32, end as f32, z);
                inserted.push(span);
                buffer.insert(0, span);
            }

            let row = buffer.row(0);
            assert_sorted_and_disjoint(row);
            for px in 0..400 {
                let x = px as f32 + 0.5;
                let nearest = inserted
                    .iter()
                    .filter(|s| s.x_start <= x && x <= s.x_end)
                    .map(|s| s.z_at(x))
                    .fold(None, |acc: Option<f32>, z| Some(acc.map_or(z, |a| a.max(z))));
                let visible = row.iter().find(|s| s.x_start <= x && x <= s.x_end);
                match (nearest, visible) {
                    (Some(z), Some(s)) => assert_eq!(s.z_at(x), z, "x = {x}"),
                    (None, None) => {}
                    other => panic!("coverage mismatch at x = {x}: {other:?}"),
                }
            }
        }
    }

    #[test]
    fn random_sloped_spans_stay_disjoint_and_bounded() {
        let mut rng = Lcg(42);
        for _ in 0..50 {
            let mut buffer = SpanBuffer::new(WIDTH, 1);
            let n = 24;
            for _ in 0..n {
                let start = rng.unit() * 390.0;
                let end = start + 1.0 + rng.unit() * (400.0 - start);
                buffer.insert(0, ramp(start, end, 0.1 + rng.unit(), 0.1 + rng.unit()));
            }
            let row = buffer.row(0);
            assert_sorted_and_disjoint(row);
            assert!(row.len() <= n * n, "{} spans", row.len());
        }
    }

    #[test]
    fn random_sloped_spans_visible_surface_is_nearest() {
        let mut rng = Lcg(7);
        for _ in 0..20 {
            let mut buffer = SpanBuffer::new(WIDTH, 1);
            let mut inserted = Vec::new();
            for _ in 0..12 {
                let start = rng.unit() * 300.0;
                let end = start + 20.0 + rng.unit() * 80.0;
                let span = ramp(start, end, 0.1 + rng.unit(), 0.1 + rng.unit());
                inserted.push(span);
                buffer.insert(0, span);
            }

            // Sub-pixel pieces are dropped next to endpoints and crossings,
            // so only sample away from those.
            let mut events: Vec<f32> = inserted.iter().flat_map(|s| [s.x_start, s.x_end]).collect();
            for (i, a) in inserted.iter().enumerate() {
                events.extend(inserted[i + 1..].iter().filter_map(|b| a.crossover(b)).map(|p| p.x));
            }

            let row = buffer.row(0);
            assert_sorted_and_disjoint(row);
            for px in 0..400 {
                let x = px as f32 + 0.5;
                if events.iter().any(|e| (e - x).abs() < 2.0) {
                    continue;
                }
                let Some(visible) = row.iter().find(|s| s.x_start <= x && x <= s.x_end) else {
                    continue;
                };
                let nearest = inserted
                    .iter()
                    .filter(|o| o.x_start <= x && x <= o.x_end)
                    .map(|o| o.z_at(x))
                    .fold(f32::MIN, f32::max);
                assert!(visible.z_at(x) >= nearest - 1e-4, "x = {x}");
            }
        }
    }
}
