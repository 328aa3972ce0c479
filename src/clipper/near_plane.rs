//! View-space near-plane clipping.
//!
//! Triangles are clipped in camera space, before the perspective divide, so no
//! vertex that reaches projection can sit at or behind the eye. Only the near
//! plane is clipped against; geometry outside the side planes is handled by
//! span clamping in screen space.
//!
//! Clipping one convex triangle against one plane with Sutherland-Hodgman gives
//! a polygon of 0, 3 or 4 vertices, which fan-triangulates into 0, 1 or 2
//! triangles with the input winding.

use crate::prelude::Vec3;

/// A plane defined by a point on the plane and its normal vector.
/// The normal points toward the "inside" (visible) half-space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Plane {
    pub point: Vec3,
    pub normal: Vec3,
}

impl Plane {
    pub fn new(point: Vec3, normal: Vec3) -> Self {
        Self { point, normal }
    }

    /// Near plane at view-space depth `near_z` (negative). Points with
    /// `z <= near_z` are inside.
    pub fn near(near_z: f32) -> Self {
        Self::new(Vec3::new(0.0, 0.0, near_z), Vec3::FORWARD)
    }

    /// Returns the signed distance from a point to this plane.
    /// Positive = inside (same side as normal), Negative = outside.
    pub fn signed_distance(&self, position: Vec3) -> f32 {
        (position - self.point).dot(self.normal)
    }
}

/// A camera-space vertex carrying everything that is interpolated along a
/// clipped edge.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct ClipVertex {
    pub position: Vec3,
    pub normal: Vec3,
}

impl ClipVertex {
    pub fn new(position: Vec3, normal: Vec3) -> Self {
        Self { position, normal }
    }

    /// Linearly interpolate position and normal between two vertices.
    pub fn lerp(&self, other: &Self, t: f32) -> Self {
        Self {
            position: self.position.lerp(other.position, t),
            normal: self.normal.lerp(other.normal, t),
        }
    }
}

/// Output of [`clip_triangle_near`]: up to two triangles, stored inline.
#[derive(Clone, Copy, Debug, Default)]
pub struct ClippedTriangles {
    triangles: [[ClipVertex; 3]; 2],
    len: usize,
}

impl ClippedTriangles {
    fn push(&mut self, triangle: [ClipVertex; 3]) {
        debug_assert!(self.len < 2);
        self.triangles[self.len] = triangle;
        self.len += 1;
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn as_slice(&self) -> &[[ClipVertex; 3]] {
        &self.triangles[..self.len]
    }

    pub fn iter(&self) -> std::slice::Iter<'_, [ClipVertex; 3]> {
        self.as_slice().iter()
    }
}

impl<'a> IntoIterator for &'a ClippedTriangles {
    type Item = &'a [ClipVertex; 3];
    type IntoIter = std::slice::Iter<'a, [ClipVertex; 3]>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Clip a camera-space triangle against the plane `z = near_z`.
///
/// Vertices with `z <= near_z` are kept. New vertices are placed at
/// `t = (near_z - z_a) / (z_b - z_a)` along the crossing edge, with position
/// and normal interpolated by the same `t`.
pub fn clip_triangle_near(triangle: &[ClipVertex; 3], near_z: f32) -> ClippedTriangles {
    let plane = Plane::near(near_z);
    let distances = triangle.map(|v| plane.signed_distance(v.position));
    let mut out = ClippedTriangles::default();

    if distances.iter().all(|&d| d >= 0.0) {
        out.push(*triangle);
        return out;
    }
    if distances.iter().all(|&d| d < 0.0) {
        return out;
    }

    // Sutherland-Hodgman against one plane: at most 4 output vertices.
    let mut polygon = [ClipVertex::default(); 4];
    let mut count = 0;
    for i in 0..3 {
        let j = (i + 1) % 3;
        let (current, next) = (&triangle[i], &triangle[j]);
        let (d1, d2) = (distances[i], distances[j]);
        let current_inside = d1 >= 0.0;
        let next_inside = d2 >= 0.0;

        if current_inside {
            polygon[count] = *current;
            count += 1;
        }
        if current_inside != next_inside {
            let t = d1 / (d1 - d2);
            polygon[count] = current.lerp(next, t);
            count += 1;
        }
    }

    for i in 1..count.saturating_sub(1) {
        out.push([polygon[0], polygon[i], polygon[i + 1]]);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const NEAR: f32 = -0.1;

    fn vertex(x: f32, y: f32, z: f32) -> ClipVertex {
        ClipVertex::new(Vec3::new(x, y, z), Vec3::new(x, y, 0.0))
    }

    fn signed_area_xy(t: &[ClipVertex; 3]) -> f32 {
        let [a, b, c] = t.map(|v| v.position);
        (b.x - a.x) * (c.y - a.y) - (c.x - a.x) * (b.y - a.y)
    }

    #[test]
    fn fully_inside_passes_through() {
        let tri = [vertex(0.0, 0.0, -1.0), vertex(1.0, 0.0, -2.0), vertex(0.0, 1.0, -3.0)];
        let out = clip_triangle_near(&tri, NEAR);
        assert_eq!(out.len(), 1);
        assert_eq!(out.as_slice()[0], tri);
    }

    #[test]
    fn fully_outside_is_discarded() {
        let tri = [vertex(0.0, 0.0, 1.0), vertex(1.0, 0.0, 0.0), vertex(0.0, 1.0, -0.05)];
        assert!(clip_triangle_near(&tri, NEAR).is_empty());
    }

    #[test]
    fn vertex_on_plane_counts_as_inside() {
        let tri = [vertex(0.0, 0.0, NEAR), vertex(1.0, 0.0, NEAR), vertex(0.0, 1.0, NEAR)];
        assert_eq!(clip_triangle_near(&tri, NEAR).len(), 1);
    }

    #[test]
    fn one_inside_gives_one_triangle() {
        let tri = [vertex(0.0, 0.0, -1.1), vertex(1.0, 0.0, 0.9), vertex(0.0, 1.0, 0.9)];
        let out = clip_triangle_near(&tri, NEAR);
        assert_eq!(out.len(), 1);
        let t = out.as_slice()[0];
        assert_eq!(t[0], tri[0]);
        for v in &t[1..] {
            assert_relative_eq!(v.position.z, NEAR, epsilon = 1e-6);
        }
        // t = (near - z_a) / (z_b - z_a) = 1.0 / 2.0
        assert_relative_eq!(t[1].position.x, 0.5, epsilon = 1e-6);
        assert_relative_eq!(t[2].position.y, 0.5, epsilon = 1e-6);
    }

    #[test]
    fn two_inside_gives_two_triangles_with_interpolated_normals() {
        // Vertex 2 is behind the near plane.
        let tri = [vertex(0.0, 0.0, -1.1), vertex(2.0, 0.0, -1.1), vertex(0.0, 2.0, 0.9)];
        let out = clip_triangle_near(&tri, NEAR);
        assert_eq!(out.len(), 2);

        let on_plane: Vec<ClipVertex> = out
            .iter()
            .flatten()
            .filter(|v| (v.position.z - NEAR).abs() < 1e-6)
            .copied()
            .collect();
        assert!(!on_plane.is_empty());
        for v in on_plane {
            // t = (-0.1 - -1.1) / (0.9 - -1.1) = 0.5, so y lands halfway to the apex
            assert_relative_eq!(v.position.y, 1.0, epsilon = 1e-6);
            assert_relative_eq!(v.normal.y, 1.0, epsilon = 1e-6);
            assert_relative_eq!(v.normal.x, v.position.x, epsilon = 1e-6);
        }
    }

    #[test]
    fn winding_is_preserved() {
        let tri = [vertex(0.0, 0.0, -1.1), vertex(2.0, 0.0, -1.1), vertex(0.0, 2.0, 0.9)];
        let sign = signed_area_xy(&tri).signum();
        for t in &clip_triangle_near(&tri, NEAR) {
            assert_eq!(signed_area_xy(t).signum(), sign);
        }
    }
}
