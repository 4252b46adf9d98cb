use marionette_core::BoneIndex;
use thiserror::Error;

use crate::tessellate::TessellationError;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Polygon has weights for {found} bones, but the skeleton has {expected}")]
    WeightCountMismatch { expected: usize, found: usize },

    #[error("Weights of bone {bone} cover {found} points, but the polygon has {expected}")]
    WeightLengthMismatch {
        bone: BoneIndex,
        expected: usize,
        found: usize,
    },

    #[error("Polygon has {found} texture coordinates for {expected} points")]
    UvLengthMismatch { expected: usize, found: usize },

    #[error("Contour {contour} references point {point}, but the polygon has {point_count}")]
    ContourIndexOutOfRange {
        contour: usize,
        point: usize,
        point_count: usize,
    },

    #[error("Skeleton with {0} bones can not be indexed by mesh joints")]
    TooManyBones(usize),

    #[error("Index {index} is out of range for {vertex_count} vertices")]
    IndexOutOfRange { index: u32, vertex_count: usize },

    #[error("Mesh attribute has {found} values for {expected} vertices")]
    AttributeLengthMismatch { expected: usize, found: usize },

    #[error("Index count {0} is not a multiple of 3")]
    IncompleteTriangle(usize),

    #[error("Mesh surface has no primitive in progress")]
    NoPrimitive,

    #[error("Tessellation failed")]
    Tessellation(#[from] TessellationError),
}
