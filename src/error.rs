//! Error types for the fallible edges of the crate: mesh loading and configuration.
//!
//! The render core itself has no error path; degenerate geometry is dropped.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("failed to parse OBJ `{path}`: {source}")]
    Obj {
        path: PathBuf,
        #[source]
        source: tobj::LoadError,
    },

    #[error("mesh `{0}` contains no triangles")]
    EmptyMesh(String),

    #[error("face {face} references vertex {index}, but the mesh has {count} vertices")]
    IndexOutOfRange {
        face: usize,
        index: usize,
        count: usize,
    },
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("screen size {width}x{height} must be non-zero")]
    EmptyScreen { width: u32, height: u32 },

    #[error("dither matrix size {0} must be a power of two no smaller than 2")]
    DitherSize(usize),

    #[error("invalid projection: fov {fov_y_degrees} deg, near {z_near}, far {z_far}")]
    Projection {
        fov_y_degrees: f32,
        z_near: f32,
        z_far: f32,
    },
}
