//! Base crate for Marionette.
//!
//! Holds the types every other crate agrees on: how bones are identified and how the 2D image
//! space of a puppet maps onto the 3D world.

mod projection;

pub use projection::{convert_transform, Projection, DEFAULT_PIXELS_PER_UNIT};

/// Index of a bone inside a skeleton.
///
/// Bones are dense and ordered by creation, so the index *is* the identity of the bone. The same
/// index refers to the same bone in a 2D skeleton and its 3D mirror.
pub type BoneIndex = usize;

pub use glam;
