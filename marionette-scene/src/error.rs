use thiserror::Error;

use crate::scene::NodeKind;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Scene has no node named {0:?}")]
    MissingNode(String),

    #[error("Node {name:?} is a {found:?}, expected a {expected:?}")]
    WrongNodeKind {
        name: String,
        expected: NodeKind,
        found: NodeKind,
    },

    #[error("Mesh has no surface {surface}. Surface count: {surface_count}")]
    SurfaceOutOfRange {
        surface: usize,
        surface_count: usize,
    },

    #[error("Skeleton error")]
    Skeleton(#[from] marionette_skeleton::Error),

    #[error("Mesh error")]
    Mesh(#[from] marionette_mesh::Error),
}
