//! Bone hierarchies for Marionette.
//!
//! A [`Skeleton2D`] in image space is mirrored once into a [`Skeleton3D`] using
//! [`mirror_skeleton`], after which a [`PoseSynchronizer`] copies the 2D pose onto the 3D
//! skeleton every frame. A [`Skin`] derived from the 3D rest transforms turns the 3D pose into
//! joint matrices for rendering.

mod error;
mod mirror;
mod skeleton;
mod skin;
mod source;
mod sync;

pub use error::*;
pub use mirror::mirror_skeleton;
pub use skeleton::{Bone3D, PoseOverride, Skeleton3D, SkeletonSink};
pub use skin::{Skin, SkinBind};
pub use source::{Bone2D, Skeleton2D, SkeletonSource};
pub use sync::PoseSynchronizer;
