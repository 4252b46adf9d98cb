use std::fmt::Display;

/// Path of the material used for character meshes unless configured otherwise
pub const DEFAULT_MATERIAL: &str = "res://mat/figure.tres";

/// Reference to a material resource by path.
///
/// Resolving the path is up to the renderer.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct MaterialRef(String);

impl MaterialRef {
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    pub fn path(&self) -> &str {
        &self.0
    }
}

impl Default for MaterialRef {
    fn default() -> Self {
        Self::new(DEFAULT_MATERIAL)
    }
}

impl From<&str> for MaterialRef {
    fn from(v: &str) -> Self {
        Self::new(v)
    }
}

impl From<String> for MaterialRef {
    fn from(v: String) -> Self {
        Self(v)
    }
}

impl Display for MaterialRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
