use marionette_mesh::Polygon2D;
use marionette_skeleton::{Skeleton2D, Skeleton3D};

use crate::{instance::MeshInstance, Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Polygon,
    Skeleton2D,
    Skeleton3D,
    MeshInstance,
}

#[derive(Debug, Clone)]
pub enum Node {
    Polygon(Polygon2D),
    Skeleton2D(Skeleton2D),
    Skeleton3D(Skeleton3D),
    MeshInstance(MeshInstance),
}

impl Node {
    pub fn kind(&self) -> NodeKind {
        match self {
            Node::Polygon(_) => NodeKind::Polygon,
            Node::Skeleton2D(_) => NodeKind::Skeleton2D,
            Node::Skeleton3D(_) => NodeKind::Skeleton3D,
            Node::MeshInstance(_) => NodeKind::MeshInstance,
        }
    }
}

impl From<Polygon2D> for Node {
    fn from(v: Polygon2D) -> Self {
        Self::Polygon(v)
    }
}

impl From<Skeleton2D> for Node {
    fn from(v: Skeleton2D) -> Self {
        Self::Skeleton2D(v)
    }
}

impl From<Skeleton3D> for Node {
    fn from(v: Skeleton3D) -> Self {
        Self::Skeleton3D(v)
    }
}

impl From<MeshInstance> for Node {
    fn from(v: MeshInstance) -> Self {
        Self::MeshInstance(v)
    }
}

/// The named children of a character in the scene
#[derive(Debug, Clone, Default)]
pub struct SceneTree {
    children: Vec<(String, Node)>,
}

macro_rules! node_accessors {
    ($get:ident, $get_mut:ident, $take:ident, $variant:ident, $ty:ty) => {
        pub fn $get(&self, name: &str) -> Result<&$ty> {
            match self.expect(name)? {
                Node::$variant(v) => Ok(v),
                node => Err(Error::WrongNodeKind {
                    name: name.into(),
                    expected: NodeKind::$variant,
                    found: node.kind(),
                }),
            }
        }

        pub fn $get_mut(&mut self, name: &str) -> Result<&mut $ty> {
            match self.expect_mut(name)? {
                Node::$variant(v) => Ok(v),
                node => Err(Error::WrongNodeKind {
                    name: name.into(),
                    expected: NodeKind::$variant,
                    found: node.kind(),
                }),
            }
        }

        /// Removes the node from the scene if it exists and is of the right kind
        pub fn $take(&mut self, name: &str) -> Result<$ty> {
            let index = self
                .position(name)
                .ok_or_else(|| Error::MissingNode(name.into()))?;

            match self.children.remove(index) {
                (_, Node::$variant(v)) => Ok(v),
                (child, node) => {
                    let found = node.kind();
                    self.children.insert(index, (child, node));

                    Err(Error::WrongNodeKind {
                        name: name.into(),
                        expected: NodeKind::$variant,
                        found,
                    })
                }
            }
        }
    };
}

impl SceneTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a child, replacing any child of the same name
    pub fn add_child(&mut self, name: impl Into<String>, node: impl Into<Node>) {
        let name = name.into();
        let node = node.into();

        match self.children.iter_mut().find(|(v, _)| *v == name) {
            Some((_, slot)) => *slot = node,
            None => self.children.push((name, node)),
        }
    }

    pub fn with_child(mut self, name: impl Into<String>, node: impl Into<Node>) -> Self {
        self.add_child(name, node);
        self
    }

    pub fn get(&self, name: &str) -> Option<&Node> {
        self.children
            .iter()
            .find(|(v, _)| v == name)
            .map(|(_, node)| node)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Node> {
        self.children
            .iter_mut()
            .find(|(v, _)| v == name)
            .map(|(_, node)| node)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn remove_child(&mut self, name: &str) -> Option<Node> {
        let index = self.position(name)?;
        Some(self.children.remove(index).1)
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.children.iter().position(|(v, _)| v == name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.children.iter().map(|(v, _)| v.as_str())
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    fn expect(&self, name: &str) -> Result<&Node> {
        self.get(name)
            .ok_or_else(|| Error::MissingNode(name.into()))
    }

    fn expect_mut(&mut self, name: &str) -> Result<&mut Node> {
        self.get_mut(name)
            .ok_or_else(|| Error::MissingNode(name.into()))
    }

    node_accessors!(polygon, polygon_mut, take_polygon, Polygon, Polygon2D);
    node_accessors!(
        skeleton_2d,
        skeleton_2d_mut,
        take_skeleton_2d,
        Skeleton2D,
        Skeleton2D
    );
    node_accessors!(
        skeleton_3d,
        skeleton_3d_mut,
        take_skeleton_3d,
        Skeleton3D,
        Skeleton3D
    );
    node_accessors!(
        mesh_instance,
        mesh_instance_mut,
        take_mesh_instance,
        MeshInstance,
        MeshInstance
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup() {
        let mut scene = SceneTree::new()
            .with_child("polygon", Polygon2D::default())
            .with_child("mesh", MeshInstance::new());

        assert_eq!(scene.names().collect::<Vec<_>>(), ["polygon", "mesh"]);
        assert!(scene.polygon("polygon").is_ok());

        assert_eq!(
            scene.skeleton_2d("missing").unwrap_err(),
            Error::MissingNode("missing".into())
        );

        assert_eq!(
            scene.skeleton_3d("mesh").unwrap_err(),
            Error::WrongNodeKind {
                name: "mesh".into(),
                expected: NodeKind::Skeleton3D,
                found: NodeKind::MeshInstance
            }
        );

        assert!(scene.take_skeleton_2d("polygon").is_err());
        assert!(scene.contains("polygon"));

        assert!(scene.take_polygon("polygon").is_ok());
        assert!(!scene.contains("polygon"));
        assert_eq!(scene.len(), 1);
    }

    #[test]
    fn replace() {
        let mut scene = SceneTree::new().with_child("node", Polygon2D::default());
        scene.add_child("node", Skeleton2D::new());

        assert_eq!(scene.len(), 1);
        assert_eq!(scene.get("node").map(|v| v.kind()), Some(NodeKind::Skeleton2D));
    }
}
