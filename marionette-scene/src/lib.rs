//! Scene integration for Marionette.
//!
//! A [`Character`] is created once its [`SceneTree`] holds a skinned polygon, the 2D skeleton
//! animating it, an empty 3D skeleton and a [`MeshInstance`]. It builds the 3D skeleton and mesh
//! and then follows the 2D skeleton every frame.

mod character;
mod config;
mod error;
mod instance;
mod material;
mod puppet;
mod scene;

pub use character::Character;
pub use config::{CharacterConfig, NodeNames};
pub use error::*;
pub use instance::{DetachedSkeleton, MeshInstance};
pub use material::{MaterialRef, DEFAULT_MATERIAL};
pub use puppet::Puppet;
pub use scene::{Node, NodeKind, SceneTree};
