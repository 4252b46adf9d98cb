//! Skinned meshes for Marionette.
//!
//! A [`Polygon2D`] with per bone point weights is tessellated by a [`SkinnedMeshBuilder`] into a
//! [`TriangleMesh`] in world space, carrying texture coordinates and the 4 strongest
//! [`BoneInfluences`] of every vertex through the tessellation. The mesh is then committed to a
//! [`MeshSink`] such as [`SurfaceTool`] to produce [`MeshData`].

mod builder;
mod error;
pub mod influence;
pub mod mesh;
mod polygon;
pub mod skinning;
mod surface;
pub mod tessellate;

pub use builder::{
    merge_vertex_attributes, MergeContext, MeshVertex, SkinnedMeshBuilder, TriangleMesh,
    VertexAttributes,
};
pub use error::*;
pub use influence::{BoneInfluences, InfluencePicker, MAX_INFLUENCES};
pub use mesh::{MeshData, SkinnedVertex};
pub use polygon::Polygon2D;
pub use skinning::deform_positions;
pub use surface::{MeshSink, SurfaceTool};
pub use tessellate::{EarcutTessellator, TessellationError, Tessellator, WindingRule};
