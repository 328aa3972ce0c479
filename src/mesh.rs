//! Triangle meshes and mesh loading.
//!
//! A [`Mesh`] stores positions, optional vertex normals, and indexed faces in
//! model space. Faces wind counter-clockwise seen from outside. Faces without
//! normal indices are shaded with their flat geometric normal.
//!
//! Loading goes through the [`MeshLoader`] trait; [`ObjLoader`] reads
//! Wavefront OBJ via `tobj`.

use std::io::BufReader;
use std::path::{Path, PathBuf};

use log::info;

use crate::error::LoadError;
use crate::math::vec3::Vec3;

/// One triangle: indices into the mesh's positions, and optionally into its normals.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Face {
    pub a: usize,
    pub b: usize,
    pub c: usize,
    pub normals: Option<[usize; 3]>,
}

impl Face {
    pub const fn new(a: usize, b: usize, c: usize) -> Self {
        Self {
            a,
            b,
            c,
            normals: None,
        }
    }

    pub const fn with_normals(a: usize, b: usize, c: usize, normals: [usize; 3]) -> Self {
        Self {
            a,
            b,
            c,
            normals: Some(normals),
        }
    }

    pub const fn indices(&self) -> [usize; 3] {
        [self.a, self.b, self.c]
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Mesh {
    name: String,
    positions: Vec<Vec3>,
    normals: Vec<Vec3>,
    faces: Vec<Face>,
}

impl Mesh {
    /// Builds a mesh, checking that it has faces and that every index is in range.
    pub fn new(
        name: impl Into<String>,
        positions: Vec<Vec3>,
        normals: Vec<Vec3>,
        faces: Vec<Face>,
    ) -> Result<Self, LoadError> {
        let name = name.into();
        if faces.is_empty() {
            return Err(LoadError::EmptyMesh(name));
        }
        for (face_index, face) in faces.iter().enumerate() {
            let checks = face
                .indices()
                .into_iter()
                .map(|i| (i, positions.len()))
                .chain(face.normals.into_iter().flatten().map(|i| (i, normals.len())));
            for (index, count) in checks {
                if index >= count {
                    return Err(LoadError::IndexOutOfRange {
                        face: face_index,
                        index,
                        count,
                    });
                }
            }
        }
        Ok(Self {
            name,
            positions,
            normals,
            faces,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    pub fn normals(&self) -> &[Vec3] {
        &self.normals
    }

    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    pub fn triangle_count(&self) -> usize {
        self.faces.len()
    }

    /// Model-space positions and normals of a face's three corners.
    pub fn face_vertices(&self, face: &Face) -> [(Vec3, Vec3); 3] {
        let positions = face.indices().map(|i| self.positions[i]);
        let normals = match face.normals {
            Some(indices) => indices.map(|i| self.normals[i]),
            None => {
                let [a, b, c] = positions;
                [(b - a).cross(c - a).normalize_or_zero(); 3]
            }
        };
        [
            (positions[0], normals[0]),
            (positions[1], normals[1]),
            (positions[2], normals[2]),
        ]
    }

    /// Axis-aligned cube spanning -1..1 on every axis, flat shaded.
    pub fn cube() -> Self {
        let positions = vec![
            Vec3::new(-1.0, -1.0, -1.0),
            Vec3::new(1.0, -1.0, -1.0),
            Vec3::new(1.0, 1.0, -1.0),
            Vec3::new(-1.0, 1.0, -1.0),
            Vec3::new(-1.0, -1.0, 1.0),
            Vec3::new(1.0, -1.0, 1.0),
            Vec3::new(1.0, 1.0, 1.0),
            Vec3::new(-1.0, 1.0, 1.0),
        ];
        let faces = [
            // +Z
            [4, 5, 6],
            [4, 6, 7],
            // -Z
            [1, 0, 3],
            [1, 3, 2],
            // +X
            [5, 1, 2],
            [5, 2, 6],
            // -X
            [0, 4, 7],
            [0, 7, 3],
            // +Y
            [7, 6, 2],
            [7, 2, 3],
            // -Y
            [0, 1, 5],
            [0, 5, 4],
        ];
        Self::builtin("cube", positions, &faces)
    }

    /// Regular icosahedron with circumradius `sqrt(1 + phi^2)`, flat shaded.
    pub fn icosahedron() -> Self {
        let t = (1.0 + 5.0f32.sqrt()) / 2.0;
        let positions = vec![
            Vec3::new(-1.0, t, 0.0),
            Vec3::new(1.0, t, 0.0),
            Vec3::new(-1.0, -t, 0.0),
            Vec3::new(1.0, -t, 0.0),
            Vec3::new(0.0, -1.0, t),
            Vec3::new(0.0, 1.0, t),
            Vec3::new(0.0, -1.0, -t),
            Vec3::new(0.0, 1.0, -t),
            Vec3::new(t, 0.0, -1.0),
            Vec3::new(t, 0.0, 1.0),
            Vec3::new(-t, 0.0, -1.0),
            Vec3::new(-t, 0.0, 1.0),
        ];
        let faces = [
            [0, 11, 5],
            [0, 5, 1],
            [0, 1, 7],
            [0, 7, 10],
            [0, 10, 11],
            [1, 5, 9],
            [5, 11, 4],
            [11, 10, 2],
            [10, 7, 6],
            [7, 1, 8],
            [3, 9, 4],
            [3, 4, 2],
            [3, 2, 6],
            [3, 6, 8],
            [3, 8, 9],
            [4, 9, 5],
            [2, 4, 11],
            [6, 2, 10],
            [8, 6, 7],
            [9, 8, 1],
        ];
        Self::builtin("icosahedron", positions, &faces)
    }

    fn builtin(name: &str, positions: Vec<Vec3>, faces: &[[usize; 3]]) -> Self {
        Self {
            name: name.to_string(),
            positions,
            normals: Vec::new(),
            faces: faces.iter().map(|&[a, b, c]| Face::new(a, b, c)).collect(),
        }
    }
}

/// Source of meshes, one implementation per file format.
pub trait MeshLoader {
    fn load_mesh(&self, path: &Path) -> Result<Mesh, LoadError>;
}

/// Wavefront OBJ loader.
///
/// Polygons are triangulated, and all objects in the file are merged into a
/// single mesh. Materials are ignored.
#[derive(Debug, Clone, Copy, Default)]
pub struct ObjLoader;

impl ObjLoader {
    fn options() -> tobj::LoadOptions {
        tobj::LoadOptions {
            triangulate: true,
            single_index: true,
            ..Default::default()
        }
    }

    /// Parses OBJ text held in memory. `name` labels the mesh and any error.
    pub fn load_from_str(&self, name: &str, source: &str) -> Result<Mesh, LoadError> {
        let mut reader = BufReader::new(source.as_bytes());
        let (models, _materials) =
            tobj::load_obj_buf(&mut reader, &Self::options(), |_| Ok(Default::default()))
                .map_err(|source| LoadError::Obj {
                    path: PathBuf::from(name),
                    source,
                })?;
        merge_models(name, &models)
    }
}

impl MeshLoader for ObjLoader {
    fn load_mesh(&self, path: &Path) -> Result<Mesh, LoadError> {
        let (models, _materials) =
            tobj::load_obj(path, &Self::options()).map_err(|source| LoadError::Obj {
                path: path.to_path_buf(),
                source,
            })?;
        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        let mesh = merge_models(&name, &models)?;
        info!(
            "loaded `{}`: {} vertices, {} triangles",
            path.display(),
            mesh.positions().len(),
            mesh.triangle_count()
        );
        Ok(mesh)
    }
}

/// Merges `tobj` models into one mesh. With `single_index` the normal array,
/// when present, is indexed like the positions.
fn merge_models(name: &str, models: &[tobj::Model]) -> Result<Mesh, LoadError> {
    let mut positions = Vec::new();
    let mut normals = Vec::new();
    let mut faces = Vec::new();

    for model in models {
        let mesh = &model.mesh;
        let base = positions.len();
        let normal_base = normals.len();
        let vertex_count = mesh.positions.len() / 3;
        let has_normals = mesh.normals.len() == mesh.positions.len();

        positions.extend(
            mesh.positions
                .chunks_exact(3)
                .map(|p| Vec3::new(p[0], p[1], p[2])),
        );
        if has_normals {
            normals.extend(
                mesh.normals
                    .chunks_exact(3)
                    .map(|n| Vec3::new(n[0], n[1], n[2])),
            );
        }

        for (i, tri) in mesh.indices.chunks_exact(3).enumerate() {
            let [a, b, c] = [tri[0], tri[1], tri[2]].map(|i| i as usize);
            if let Some(&index) = [a, b, c].iter().find(|&&i| i >= vertex_count) {
                return Err(LoadError::IndexOutOfRange {
                    face: faces.len() + i,
                    index,
                    count: vertex_count,
                });
            }
            faces.push(if has_normals {
                Face::with_normals(
                    base + a,
                    base + b,
                    base + c,
                    [normal_base + a, normal_base + b, normal_base + c],
                )
            } else {
                Face::new(base + a, base + b, base + c)
            });
        }
    }

    Mesh::new(name, positions, normals, faces)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn assert_outward(mesh: &Mesh) {
        for face in mesh.faces() {
            let [(a, n), (b, _), (c, _)] = mesh.face_vertices(face);
            let centroid = (a + b + c) / 3.0;
            assert!(n.dot(centroid) > 0.0, "{} face {face:?} points inward", mesh.name());
        }
    }

    #[test]
    fn builtin_meshes_wind_outward() {
        let cube = Mesh::cube();
        assert_eq!(cube.triangle_count(), 12);
        assert_outward(&cube);

        let ico = Mesh::icosahedron();
        assert_eq!(ico.triangle_count(), 20);
        assert_outward(&ico);
    }

    #[test]
    fn flat_normal_is_unit_length() {
        let cube = Mesh::cube();
        let [(_, n), _, _] = cube.face_vertices(&cube.faces()[0]);
        assert_relative_eq!(n.magnitude(), 1.0, epsilon = 1e-6);
        assert_relative_eq!(n.z, 1.0, epsilon = 1e-6);
    }

    #[test]
    fn new_rejects_bad_meshes() {
        assert!(matches!(
            Mesh::new("empty", vec![Vec3::ZERO], Vec::new(), Vec::new()),
            Err(LoadError::EmptyMesh(name)) if name == "empty"
        ));
        let positions = vec![Vec3::ZERO, Vec3::X, Vec3::Y];
        assert!(matches!(
            Mesh::new("bad", positions.clone(), Vec::new(), vec![Face::new(0, 1, 3)]),
            Err(LoadError::IndexOutOfRange { face: 0, index: 3, count: 3 })
        ));
        assert!(matches!(
            Mesh::new("bad", positions, vec![Vec3::Z], vec![Face::with_normals(0, 1, 2, [0, 0, 1])]),
            Err(LoadError::IndexOutOfRange { face: 0, index: 1, count: 1 })
        ));
    }

    #[test]
    fn loads_obj_with_normals() {
        let source = "\
o quad
v -1 -1 0
v 1 -1 0
v 1 1 0
v -1 1 0
vn 0 0 1
f 1//1 2//1 3//1 4//1
";
        let mesh = ObjLoader.load_from_str("quad", source).unwrap();
        assert_eq!(mesh.name(), "quad");
        assert_eq!(mesh.triangle_count(), 2);
        let [(_, n), _, _] = mesh.face_vertices(&mesh.faces()[1]);
        assert_relative_eq!(n.z, 1.0);
    }

    #[test]
    fn loads_obj_without_normals() {
        let source = "\
v 0 0 0
v 1 0 0
v 0 1 0
f 1 2 3
";
        let mesh = ObjLoader.load_from_str("tri", source).unwrap();
        assert_eq!(mesh.faces()[0].normals, None);
        let [(_, n), _, _] = mesh.face_vertices(&mesh.faces()[0]);
        assert_relative_eq!(n.z, 1.0);
    }

    #[test]
    fn obj_without_faces_is_empty() {
        let result = ObjLoader.load_from_str("points", "v 0 0 0\nv 1 0 0\n");
        assert!(matches!(result, Err(LoadError::EmptyMesh(_))));
    }

    #[test]
    fn missing_file_reports_path() {
        let err = ObjLoader
            .load_mesh(Path::new("does/not/exist.obj"))
            .unwrap_err();
        assert!(err.to_string().contains("does/not/exist.obj"));
    }
}
