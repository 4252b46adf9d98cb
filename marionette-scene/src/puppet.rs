use marionette_mesh::Polygon2D;
use marionette_skeleton::{Skeleton2D, Skeleton3D};

use crate::{Character, CharacterConfig, MeshInstance, Result, SceneTree};

/// Everything needed to bring a 2D puppet to life, such as when loaded from a file
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Puppet {
    #[cfg_attr(feature = "serde", serde(default))]
    pub config: CharacterConfig,
    pub skeleton: Skeleton2D,
    pub polygon: Polygon2D,
}

impl Puppet {
    pub fn new(skeleton: Skeleton2D, polygon: Polygon2D) -> Self {
        Self {
            config: CharacterConfig::default(),
            skeleton,
            polygon,
        }
    }

    pub fn with_config(mut self, config: CharacterConfig) -> Self {
        self.config = config;
        self
    }

    /// Lays out the nodes a [`Character`] expects under the configured names.
    ///
    /// The 2D skeleton starts out at rest.
    pub fn to_scene(&self) -> SceneTree {
        let names = &self.config.node_names;

        let mut skeleton = self.skeleton.clone();
        skeleton.reset_poses();

        SceneTree::new()
            .with_child(names.polygon.clone(), self.polygon.clone())
            .with_child(names.skeleton_2d.clone(), skeleton)
            .with_child(names.skeleton_3d.clone(), Skeleton3D::new())
            .with_child(
                names.mesh.clone(),
                MeshInstance::new().with_skeleton(names.skeleton_3d.clone()),
            )
    }

    pub fn instantiate(self) -> Result<Character> {
        let mut scene = self.to_scene();
        Character::ready(&mut scene, self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(feature = "serde")]
    #[test]
    fn from_json() {
        let puppet: Puppet = serde_json::from_str(
            r#"{
                "skeleton": {
                    "bones": [
                        {
                            "name": "root",
                            "parent": null,
                            "rest": [1.0, 0.0, 0.0, 1.0, 256.0, 256.0]
                        }
                    ]
                },
                "polygon": {
                    "points": [[0.0, 0.0], [512.0, 0.0], [512.0, 512.0], [0.0, 512.0]],
                    "bone_weights": [[1.0, 1.0, 1.0, 1.0]]
                }
            }"#,
        )
        .unwrap();

        let character = puppet.instantiate().unwrap();

        assert_eq!(character.skeleton_3d().bones()[0].name(), "root");
        assert_eq!(
            character.mesh().mesh().map(|v| v.triangle_count()),
            Some(2)
        );
    }

    #[test]
    fn weights_must_match_skeleton() {
        use glam::{Affine2, Vec2};

        use crate::Error;

        let skeleton = Skeleton2D::new()
            .with_bone("root", None, Affine2::IDENTITY)
            .unwrap();

        let polygon = Polygon2D::new([Vec2::ZERO, Vec2::X, Vec2::Y])
            .with_bone_weights([1.0; 3])
            .with_bone_weights([0.0; 3]);

        assert_eq!(
            Puppet::new(skeleton, polygon).instantiate().unwrap_err(),
            Error::Mesh(marionette_mesh::Error::WeightCountMismatch {
                expected: 1,
                found: 2
            })
        );
    }
}
