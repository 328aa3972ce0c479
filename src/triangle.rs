use crate::clipper::ClipVertex;
use crate::math::vec3::Vec3;

/// A triangle in camera (view) space, as handed to the renderer.
///
/// Vertices are counter-clockwise when seen from the front.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Triangle {
    pub vertices: [ClipVertex; 3],
}

impl Triangle {
    pub fn new(vertices: [ClipVertex; 3]) -> Self {
        Self { vertices }
    }

    /// Triangle whose vertices all share one normal.
    pub fn flat(positions: [Vec3; 3], normal: Vec3) -> Self {
        Self::new(positions.map(|p| ClipVertex::new(p, normal)))
    }

    /// Triangle with the geometric normal of its counter-clockwise winding.
    pub fn from_positions(positions: [Vec3; 3]) -> Self {
        let [a, b, c] = positions;
        Self::flat(positions, (b - a).cross(c - a).normalize_or_zero())
    }

    pub fn positions(&self) -> [Vec3; 3] {
        self.vertices.map(|v| v.position)
    }
}
