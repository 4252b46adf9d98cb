use glam::{Vec2, Vec3};
use itertools::Itertools;
use marionette_core::Projection;

use crate::{
    influence::BoneInfluences,
    mesh::MeshData,
    polygon::Polygon2D,
    surface::MeshSink,
    tessellate::{ContourVertex, EarcutTessellator, Tessellator, VertexCombine, WindingRule},
    Error, Result,
};

/// The data carried by each vertex through tessellation
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VertexAttributes {
    pub tex_coord: Vec2,
    pub influences: BoneInfluences,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MeshVertex {
    pub position: Vec3,
    pub attributes: VertexAttributes,
}

/// Triangulated skinned geometry, ready to be submitted to a [`MeshSink`]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TriangleMesh {
    pub vertices: Vec<MeshVertex>,
    /// Every 3 consecutive indices form a triangle
    pub indices: Vec<u32>,
}

impl TriangleMesh {
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn positions(&self) -> impl Iterator<Item = Vec3> + '_ {
        self.vertices.iter().map(|v| v.position)
    }

    /// Writes the mesh into `sink` as a single primitive with generated normals
    pub fn submit<S: MeshSink + ?Sized>(&self, sink: &mut S) -> Result<MeshData> {
        sink.begin();

        for &vertex in &self.vertices {
            sink.add_vertex(vertex)?;
        }

        for &index in &self.indices {
            sink.add_index(index)?;
        }

        sink.generate_normals()?;
        sink.commit()
    }
}

/// Merges the attributes of vertices welded together during tessellation
#[derive(Debug, Clone, Copy)]
pub struct MergeContext {
    pub bone_count: usize,
}

impl MergeContext {
    pub fn new(bone_count: usize) -> Self {
        Self { bone_count }
    }
}

impl VertexCombine<VertexAttributes> for MergeContext {
    fn combine(
        &self,
        _: Vec2,
        data: &[&VertexAttributes],
        weights: &[f32],
    ) -> VertexAttributes {
        merge_vertex_attributes(self, data, weights)
    }
}

/// Blends the texture coordinates by `weights` and accumulates the weighted influence of every
/// bone, keeping the strongest of the accumulated influences.
pub fn merge_vertex_attributes(
    context: &MergeContext,
    data: &[&VertexAttributes],
    weights: &[f32],
) -> VertexAttributes {
    let tex_coord = data
        .iter()
        .zip(weights)
        .map(|(v, &weight)| v.tex_coord * weight)
        .sum();

    let mut accumulated = vec![0.0; context.bone_count];

    for (v, &weight) in data.iter().zip(weights) {
        for (bone, influence) in v.influences.iter() {
            if let Some(slot) = accumulated.get_mut(bone) {
                *slot += weight * influence;
            }
        }
    }

    VertexAttributes {
        tex_coord,
        influences: BoneInfluences::from_weights(accumulated),
    }
}

/// Turns a skinned [`Polygon2D`] into a [`TriangleMesh`] in world space
#[derive(Debug, Clone)]
pub struct SkinnedMeshBuilder<T = EarcutTessellator> {
    projection: Projection,
    winding_rule: WindingRule,
    normalize_weights: bool,
    tessellator: T,
}

impl SkinnedMeshBuilder {
    pub fn new(projection: Projection) -> Self {
        Self {
            projection,
            winding_rule: WindingRule::EvenOdd,
            normalize_weights: false,
            tessellator: EarcutTessellator::new(),
        }
    }
}

impl Default for SkinnedMeshBuilder {
    fn default() -> Self {
        Self::new(Projection::default())
    }
}

impl<T: Tessellator> SkinnedMeshBuilder<T> {
    pub fn with_tessellator<U: Tessellator>(self, tessellator: U) -> SkinnedMeshBuilder<U> {
        SkinnedMeshBuilder {
            projection: self.projection,
            winding_rule: self.winding_rule,
            normalize_weights: self.normalize_weights,
            tessellator,
        }
    }

    pub fn with_winding_rule(mut self, winding_rule: WindingRule) -> Self {
        self.winding_rule = winding_rule;
        self
    }

    /// Rescale the retained weights of each vertex to sum to one
    pub fn with_normalized_weights(mut self, normalize_weights: bool) -> Self {
        self.normalize_weights = normalize_weights;
        self
    }

    pub fn projection(&self) -> &Projection {
        &self.projection
    }

    /// Projects every contour of `polygon` into world space, attaching the texture coordinate and
    /// strongest bone influences of each point.
    ///
    /// The polygon is expected to be valid.
    pub fn contours(&self, polygon: &Polygon2D) -> Vec<Vec<ContourVertex<VertexAttributes>>> {
        let projection = &self.projection;

        polygon
            .contours()
            .iter()
            .map(|contour| {
                contour
                    .iter()
                    .map(|&point| {
                        let position = projection.point_to_3d(polygon.points()[point]);
                        ContourVertex::new(
                            position.truncate(),
                            VertexAttributes {
                                tex_coord: projection.tex_coord(polygon.uv(point)),
                                influences: polygon.influences(point),
                            },
                        )
                    })
                    .collect_vec()
            })
            .collect_vec()
    }

    /// Tessellates `polygon`, skinned to a skeleton of `bone_count` bones.
    pub fn build(&mut self, polygon: &Polygon2D, bone_count: usize) -> Result<TriangleMesh> {
        let _span = tracing::info_span!(
            "build_mesh",
            points = polygon.point_count(),
            bone_count
        )
        .entered();

        if bone_count > u16::MAX as usize + 1 {
            return Err(Error::TooManyBones(bone_count));
        }

        polygon.validate(bone_count)?;

        let contours = self.contours(polygon);
        let tessellation = self.tessellator.tessellate(
            &contours,
            self.winding_rule,
            &MergeContext::new(bone_count),
        )?;

        let normalize = self.normalize_weights;
        let vertices = tessellation
            .vertices
            .into_iter()
            .map(|v| {
                let mut attributes = v.data;
                if normalize {
                    attributes.influences = attributes.influences.normalized();
                }

                MeshVertex {
                    position: v.position.extend(0.0),
                    attributes,
                }
            })
            .collect_vec();

        let mesh = TriangleMesh {
            vertices,
            indices: tessellation.indices,
        };

        tracing::info!(
            vertices = mesh.vertices.len(),
            triangles = mesh.triangle_count(),
            "built mesh"
        );

        Ok(mesh)
    }
}
