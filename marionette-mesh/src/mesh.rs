use std::collections::BTreeMap;

use glam::{U16Vec4, Vec2, Vec3, Vec4};
use itertools::{izip, Itertools};

use crate::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AttributeType {
    Vec2,
    Vec3,
    Vec4,
    U16Vec4,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AttributeValues {
    Vec2(Vec<Vec2>),
    Vec3(Vec<Vec3>),
    Vec4(Vec<Vec4>),
    U16Vec4(Vec<U16Vec4>),
}

impl AttributeValues {
    pub fn ty(&self) -> AttributeType {
        match self {
            AttributeValues::Vec2(_) => AttributeType::Vec2,
            AttributeValues::Vec3(_) => AttributeType::Vec3,
            AttributeValues::Vec4(_) => AttributeType::Vec4,
            AttributeValues::U16Vec4(_) => AttributeType::U16Vec4,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            AttributeValues::Vec2(v) => v.len(),
            AttributeValues::Vec3(v) => v.len(),
            AttributeValues::Vec4(v) => v.len(),
            AttributeValues::U16Vec4(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn as_vec2(&self) -> Option<&[Vec2]> {
        if let Self::Vec2(v) = self {
            Some(v)
        } else {
            None
        }
    }

    pub fn as_vec3(&self) -> Option<&[Vec3]> {
        if let Self::Vec3(v) = self {
            Some(v)
        } else {
            None
        }
    }

    pub fn as_vec4(&self) -> Option<&[Vec4]> {
        if let Self::Vec4(v) = self {
            Some(v)
        } else {
            None
        }
    }

    pub fn as_u16_vec4(&self) -> Option<&[U16Vec4]> {
        if let Self::U16Vec4(v) = self {
            Some(v)
        } else {
            None
        }
    }
}

impl From<Vec<Vec2>> for AttributeValues {
    fn from(v: Vec<Vec2>) -> Self {
        Self::Vec2(v)
    }
}

impl From<Vec<Vec3>> for AttributeValues {
    fn from(v: Vec<Vec3>) -> Self {
        Self::Vec3(v)
    }
}

impl From<Vec<Vec4>> for AttributeValues {
    fn from(v: Vec<Vec4>) -> Self {
        Self::Vec4(v)
    }
}

impl From<Vec<U16Vec4>> for AttributeValues {
    fn from(v: Vec<U16Vec4>) -> Self {
        Self::U16Vec4(v)
    }
}

impl FromIterator<Vec2> for AttributeValues {
    fn from_iter<T: IntoIterator<Item = Vec2>>(iter: T) -> Self {
        Self::Vec2(iter.into_iter().collect_vec())
    }
}

impl FromIterator<Vec3> for AttributeValues {
    fn from_iter<T: IntoIterator<Item = Vec3>>(iter: T) -> Self {
        Self::Vec3(iter.into_iter().collect_vec())
    }
}

impl FromIterator<Vec4> for AttributeValues {
    fn from_iter<T: IntoIterator<Item = Vec4>>(iter: T) -> Self {
        Self::Vec4(iter.into_iter().collect_vec())
    }
}

impl FromIterator<U16Vec4> for AttributeValues {
    fn from_iter<T: IntoIterator<Item = U16Vec4>>(iter: T) -> Self {
        Self::U16Vec4(iter.into_iter().collect_vec())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MeshAttribute {
    name: &'static str,
    ty: AttributeType,
}

impl MeshAttribute {
    pub const fn new(name: &'static str, ty: AttributeType) -> Self {
        Self { name, ty }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn ty(&self) -> AttributeType {
        self.ty
    }
}

pub const POSITION_ATTRIBUTE: MeshAttribute =
    MeshAttribute::new("vertex_position_attribute", AttributeType::Vec3);
pub const TEX_COORD_ATTRIBUTE: MeshAttribute =
    MeshAttribute::new("vertex_tex_coord_attribute", AttributeType::Vec2);
pub const NORMAL_ATTRIBUTE: MeshAttribute =
    MeshAttribute::new("vertex_normal_attribute", AttributeType::Vec3);
pub const JOINT_INDEX_ATTRIBUTE: MeshAttribute =
    MeshAttribute::new("vertex_joint_index_attribute", AttributeType::U16Vec4);
pub const WEIGHT_ATTRIBUTE: MeshAttribute =
    MeshAttribute::new("vertex_weight_attribute", AttributeType::Vec4);

/// Vertex layout of a skinned mesh for upload to the gpu
#[repr(C)]
#[derive(bytemuck::Pod, bytemuck::Zeroable, Copy, Debug, Clone, Default, PartialEq)]
pub struct SkinnedVertex {
    pub pos: Vec3,
    _padding: f32,
    pub normal: Vec3,
    _padding2: f32,
    pub weights: Vec4,
    pub tex_coord: Vec2,
    pub joints: U16Vec4,
}

impl SkinnedVertex {
    pub fn new(pos: Vec3, normal: Vec3, tex_coord: Vec2, joints: U16Vec4, weights: Vec4) -> Self {
        Self {
            pos,
            _padding: 0.0,
            normal,
            _padding2: 0.0,
            weights,
            tex_coord,
            joints,
        }
    }
}

/// CPU created mesh data
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshData {
    indices: Vec<u32>,
    attributes: BTreeMap<MeshAttribute, AttributeValues>,
}

impl MeshData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_indices(mut self, indices: impl IntoIterator<Item = u32>) -> Self {
        self.indices = indices.into_iter().collect_vec();
        self
    }

    pub fn with_attribute<I>(mut self, attribute: MeshAttribute, values: I) -> Self
    where
        I: IntoIterator,
        AttributeValues: FromIterator<I::Item>,
    {
        self.insert_attribute(attribute, values);
        self
    }

    pub fn insert_attribute<I>(&mut self, attribute: MeshAttribute, values: I)
    where
        I: IntoIterator,
        AttributeValues: FromIterator<I::Item>,
    {
        let values = AttributeValues::from_iter(values);

        assert_eq!(
            attribute.ty,
            values.ty(),
            "Values must be of the same type as the attribute {:?}. Expected: {:?}, found: {:?}",
            attribute.name,
            attribute.ty,
            values.ty()
        );

        self.attributes.insert(attribute, values);
    }

    pub fn get_attribute(&self, attribute: MeshAttribute) -> Option<&AttributeValues> {
        self.attributes.get(&attribute)
    }

    pub fn skinned(
        indices: impl IntoIterator<Item = u32>,
        positions: impl IntoIterator<Item = Vec3>,
        tex_coords: impl IntoIterator<Item = Vec2>,
        joints: impl IntoIterator<Item = U16Vec4>,
        weights: impl IntoIterator<Item = Vec4>,
    ) -> Self {
        Self::new()
            .with_indices(indices)
            .with_attribute(POSITION_ATTRIBUTE, positions)
            .with_attribute(TEX_COORD_ATTRIBUTE, tex_coords)
            .with_attribute(JOINT_INDEX_ATTRIBUTE, joints)
            .with_attribute(WEIGHT_ATTRIBUTE, weights)
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn vertex_count(&self) -> usize {
        self.positions().map(|v| v.len()).unwrap_or_default()
    }

    pub fn positions(&self) -> Option<&[Vec3]> {
        self.get_attribute(POSITION_ATTRIBUTE)?.as_vec3()
    }

    pub fn tex_coords(&self) -> Option<&[Vec2]> {
        self.get_attribute(TEX_COORD_ATTRIBUTE)?.as_vec2()
    }

    pub fn normals(&self) -> Option<&[Vec3]> {
        self.get_attribute(NORMAL_ATTRIBUTE)?.as_vec3()
    }

    pub fn joints(&self) -> Option<&[U16Vec4]> {
        self.get_attribute(JOINT_INDEX_ATTRIBUTE)?.as_u16_vec4()
    }

    pub fn weights(&self) -> Option<&[Vec4]> {
        self.get_attribute(WEIGHT_ATTRIBUTE)?.as_vec4()
    }

    /// Checks that the indices form whole triangles referencing existing vertices, and that
    /// every attribute covers every vertex
    pub fn validate(&self) -> Result<()> {
        if self.indices.len() % 3 != 0 {
            return Err(Error::IncompleteTriangle(self.indices.len()));
        }

        let vertex_count = self.vertex_count();

        if let Some(&index) = self
            .indices
            .iter()
            .find(|&&v| v as usize >= vertex_count)
        {
            return Err(Error::IndexOutOfRange {
                index,
                vertex_count,
            });
        }

        if let Some(values) = self.attributes.values().find(|v| v.len() != vertex_count) {
            return Err(Error::AttributeLengthMismatch {
                expected: vertex_count,
                found: values.len(),
            });
        }

        Ok(())
    }

    /// Generates smooth normals by accumulating the area weighted face normal of every triangle
    /// sharing a vertex.
    ///
    /// Vertices not part of any triangle face `+Z`.
    pub fn generate_normals(&mut self) -> Result<()> {
        self.validate()?;

        let positions = self.positions().unwrap_or_default();
        let mut normals = vec![Vec3::ZERO; positions.len()];

        for triangle in self.indices.chunks_exact(3) {
            let [a, b, c] = [triangle[0], triangle[1], triangle[2]].map(|v| v as usize);
            let normal = (positions[b] - positions[a]).cross(positions[c] - positions[a]);

            normals[a] += normal;
            normals[b] += normal;
            normals[c] += normal;
        }

        self.insert_attribute(
            NORMAL_ATTRIBUTE,
            normals.into_iter().map(|v| v.normalize_or(Vec3::Z)),
        );

        Ok(())
    }

    /// Interleaves the attributes into vertices.
    ///
    /// Returns `None` if the mesh lacks any skinned attribute. Missing normals face `+Z`.
    pub fn skinned_vertices(&self) -> Option<impl Iterator<Item = SkinnedVertex> + '_> {
        let positions = self.positions()?;
        let tex_coords = self.tex_coords()?;
        let joints = self.joints()?;
        let weights = self.weights()?;
        let normals = self
            .normals()
            .map(|v| v.iter().copied())
            .into_iter()
            .flatten()
            .chain(std::iter::repeat(Vec3::Z));

        Some(
            izip!(positions, normals, tex_coords, joints, weights).map(
                |(&pos, normal, &tex_coord, &joints, &weights)| {
                    SkinnedVertex::new(pos, normal, tex_coord, joints, weights)
                },
            ),
        )
    }
}
