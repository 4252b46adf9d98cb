use marionette_core::Projection;
use marionette_mesh::WindingRule;

use crate::material::MaterialRef;

/// Names of the scene nodes making up a character
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct NodeNames {
    pub polygon: String,
    pub skeleton_2d: String,
    pub mesh: String,
    pub skeleton_3d: String,
}

impl Default for NodeNames {
    fn default() -> Self {
        Self {
            polygon: "polygon".into(),
            skeleton_2d: "2d_skeleton".into(),
            mesh: "mesh".into(),
            skeleton_3d: "3d_skeleton".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CharacterConfig {
    pub projection: Projection,
    pub winding_rule: WindingRule,
    /// Assigned to the only surface of the generated mesh
    pub material: MaterialRef,
    pub node_names: NodeNames,
    /// Rescale the bone weights of each vertex to sum to one
    pub normalize_weights: bool,
}

impl CharacterConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_projection(mut self, projection: Projection) -> Self {
        self.projection = projection;
        self
    }

    pub fn with_winding_rule(mut self, winding_rule: WindingRule) -> Self {
        self.winding_rule = winding_rule;
        self
    }

    pub fn with_material(mut self, material: impl Into<MaterialRef>) -> Self {
        self.material = material.into();
        self
    }

    pub fn with_node_names(mut self, node_names: NodeNames) -> Self {
        self.node_names = node_names;
        self
    }

    pub fn with_normalized_weights(mut self, normalize_weights: bool) -> Self {
        self.normalize_weights = normalize_weights;
        self
    }
}
