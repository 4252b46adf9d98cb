//! # Marionette
//!
//! ## What it is
//!
//! Marionette turns a rigged 2D puppet into a skinned 3D character. The puppet is a polygon cut
//! out of an image, with each point weighted to the bones of a 2D skeleton.
//!
//! This crate exports all marionette crates, but the separate crates can just as well be used
//! manually.
//!
//! ## How it works
//!
//! Setup happens once:
//! - the 2D skeleton is mirrored into a 3D skeleton with [`skeleton::mirror_skeleton`],
//!   projecting every bone transform with a [`base::Projection`].
//! - the polygon is tessellated by a [`mesh::SkinnedMeshBuilder`], which keeps the 4 strongest
//!   bone influences of every vertex, merging them where the tessellator welds vertices.
//! - a [`skeleton::Skin`] is derived from the rest transforms of the 3D skeleton.
//!
//! Every frame afterwards, a [`skeleton::PoseSynchronizer`] copies the pose of the 2D skeleton
//! onto the 3D skeleton.
//!
//! [`scene::Character`] ties these steps together for a [`scene::SceneTree`].

/// Rexports
pub use marionette_core as base;
pub use marionette_mesh as mesh;
pub use marionette_scene as scene;
pub use marionette_skeleton as skeleton;

pub use marionette_core::glam;

pub mod prelude {
    pub use marionette_core::{convert_transform, BoneIndex, Projection};
    pub use marionette_mesh::{BoneInfluences, MeshData, Polygon2D, SkinnedMeshBuilder, WindingRule};
    pub use marionette_scene::{Character, CharacterConfig, MeshInstance, SceneTree};
    pub use marionette_skeleton::{
        mirror_skeleton, PoseSynchronizer, Skeleton2D, Skeleton3D, SkeletonSink, SkeletonSource,
        Skin,
    };
}
