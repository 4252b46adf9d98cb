use itertools::Itertools;

use crate::{builder::MeshVertex, mesh::MeshData, Error, Result};

/// Receives a mesh one vertex and index at a time.
///
/// A primitive is started with [`MeshSink::begin`] and turned into [`MeshData`] by
/// [`MeshSink::commit`]. Nothing is kept from a primitive which fails to commit.
pub trait MeshSink {
    /// Starts a new primitive, discarding any primitive in progress
    fn begin(&mut self);

    fn add_vertex(&mut self, vertex: MeshVertex) -> Result<()>;

    fn add_index(&mut self, index: u32) -> Result<()>;

    /// Requests normals to be generated from the triangles on commit
    fn generate_normals(&mut self) -> Result<()>;

    fn commit(&mut self) -> Result<MeshData>;
}

#[derive(Debug, Default)]
struct Primitive {
    vertices: Vec<MeshVertex>,
    indices: Vec<u32>,
    generate_normals: bool,
}

/// Assembles [`MeshData`] from individual vertices.
#[derive(Debug, Default)]
pub struct SurfaceTool {
    primitive: Option<Primitive>,
}

impl SurfaceTool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_building(&self) -> bool {
        self.primitive.is_some()
    }

    fn primitive(&mut self) -> Result<&mut Primitive> {
        self.primitive.as_mut().ok_or(Error::NoPrimitive)
    }
}

impl MeshSink for SurfaceTool {
    fn begin(&mut self) {
        self.primitive = Some(Primitive::default());
    }

    fn add_vertex(&mut self, vertex: MeshVertex) -> Result<()> {
        self.primitive()?.vertices.push(vertex);
        Ok(())
    }

    fn add_index(&mut self, index: u32) -> Result<()> {
        self.primitive()?.indices.push(index);
        Ok(())
    }

    fn generate_normals(&mut self) -> Result<()> {
        self.primitive()?.generate_normals = true;
        Ok(())
    }

    fn commit(&mut self) -> Result<MeshData> {
        let primitive = self.primitive.take().ok_or(Error::NoPrimitive)?;

        let joints = primitive
            .vertices
            .iter()
            .map(|v| {
                let influences = &v.attributes.influences;
                influences.joints().ok_or_else(|| {
                    Error::TooManyBones(influences.bones.iter().max().copied().unwrap_or_default() + 1)
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let mut mesh = MeshData::skinned(
            primitive.indices,
            primitive.vertices.iter().map(|v| v.position),
            primitive.vertices.iter().map(|v| v.attributes.tex_coord),
            joints,
            primitive
                .vertices
                .iter()
                .map(|v| v.attributes.influences.weight_vec())
                .collect_vec(),
        );

        mesh.validate()?;

        if primitive.generate_normals {
            mesh.generate_normals()?;
        }

        tracing::debug!(
            vertices = mesh.vertex_count(),
            triangles = mesh.triangle_count(),
            "committed primitive"
        );

        Ok(mesh)
    }
}

#[cfg(test)]
mod tests {
    use glam::{vec2, vec3, U16Vec4, Vec3};

    use super::*;
    use crate::{builder::VertexAttributes, influence::BoneInfluences};

    fn vertex(x: f32, y: f32, bone: usize) -> MeshVertex {
        MeshVertex {
            position: vec3(x, y, 0.0),
            attributes: VertexAttributes {
                tex_coord: vec2(x, y),
                influences: BoneInfluences::single(bone, 1.0),
            },
        }
    }

    #[test]
    fn triangle() {
        let mut surface = SurfaceTool::new();

        surface.begin();
        surface.add_vertex(vertex(0.0, 0.0, 0)).unwrap();
        surface.add_vertex(vertex(1.0, 0.0, 1)).unwrap();
        surface.add_vertex(vertex(0.0, 1.0, 1)).unwrap();
        for index in [0, 1, 2] {
            surface.add_index(index).unwrap();
        }
        surface.generate_normals().unwrap();

        let mesh = surface.commit().unwrap();

        assert!(!surface.is_building());
        assert_eq!(mesh.vertex_count(), 3);
        assert_eq!(mesh.indices(), [0, 1, 2]);
        assert_eq!(mesh.normals(), Some(&[Vec3::Z; 3][..]));
        assert_eq!(mesh.joints().unwrap()[1], U16Vec4::new(1, 0, 0, 0));
    }

    #[test]
    fn no_primitive() {
        let mut surface = SurfaceTool::new();

        assert_eq!(surface.add_index(0), Err(Error::NoPrimitive));
        assert_eq!(surface.commit(), Err(Error::NoPrimitive));
    }

    #[test]
    fn failed_commit_discards_primitive() {
        let mut surface = SurfaceTool::new();

        surface.begin();
        surface.add_vertex(vertex(0.0, 0.0, 0)).unwrap();
        surface.add_index(3).unwrap();

        assert_eq!(
            surface.commit(),
            Err(Error::IncompleteTriangle(1))
        );
        assert!(!surface.is_building());

        surface.begin();
        surface.add_vertex(vertex(0.0, 0.0, 70_000)).unwrap();
        assert_eq!(surface.commit(), Err(Error::TooManyBones(70_001)));
    }
}
