//! A mesh placed in the world.
//!
//! A [`Model`] pairs a [`Mesh`] with a world [`Transform`] and turns its faces
//! into camera-space [`Triangle`]s for the renderer.

use std::path::Path;

use crate::clipper::ClipVertex;
use crate::error::LoadError;
use crate::math::mat4::Mat4;
use crate::mesh::{Mesh, MeshLoader};
use crate::transform::Transform;
use crate::triangle::Triangle;

pub struct Model {
    name: String,
    mesh: Mesh,
    transform: Transform,
}

impl Model {
    /// Wraps a mesh with an identity transform; the model takes the mesh's name.
    pub fn new(mesh: Mesh) -> Self {
        Self {
            name: mesh.name().to_string(),
            mesh,
            transform: Transform::default(),
        }
    }

    /// Loads the mesh at `path` with the given loader.
    pub fn load<L: MeshLoader + ?Sized>(loader: &L, path: &Path) -> Result<Self, LoadError> {
        loader.load_mesh(path).map(Self::new)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    // ============ Transform Accessors ============

    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    pub fn transform_mut(&mut self) -> &mut Transform {
        &mut self.transform
    }

    /// Camera-space triangles for every face, given the camera's view matrix.
    ///
    /// Normals go through the view rotation and the model's normal matrix and
    /// are renormalized.
    pub fn view_triangles(&self, view: &Mat4) -> impl Iterator<Item = Triangle> + '_ {
        let model_view = *view * self.transform.to_matrix();
        let normal_view = *view * self.transform.normal_matrix();
        self.mesh.faces().iter().map(move |face| {
            let corners = self.mesh.face_vertices(face);
            Triangle::new(corners.map(|(position, normal)| {
                ClipVertex::new(
                    model_view.transform_point(position),
                    normal_view.transform_direction(normal).normalize_or_zero(),
                )
            }))
        })
    }
}
