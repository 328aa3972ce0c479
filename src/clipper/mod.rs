//! Polygon clipping.
//!
//! Geometry is clipped in view space against the near plane only, using the
//! Sutherland-Hodgman algorithm (see [`near_plane`]).

pub mod near_plane;

pub use near_plane::{clip_triangle_near, ClipVertex, ClippedTriangles, Plane};
