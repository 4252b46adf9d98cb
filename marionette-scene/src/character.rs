use glam::{Mat4, Vec3};
use marionette_mesh::{deform_positions, SkinnedMeshBuilder, SurfaceTool};
use marionette_skeleton::{
    mirror_skeleton, PoseSynchronizer, Skeleton2D, Skeleton3D, SkeletonSink, SkeletonSource,
};

use crate::{config::CharacterConfig, instance::MeshInstance, scene::SceneTree, Result};

/// A 2D puppet rendered as a skinned 3D mesh.
///
/// Created once the scene is ready, after which [`Character::process`] is called every frame to
/// follow the animated 2D skeleton.
#[derive(Debug)]
pub struct Character {
    config: CharacterConfig,
    sync: PoseSynchronizer<Skeleton2D, Skeleton3D>,
    mesh: MeshInstance,
}

impl Character {
    /// Builds the 3D skeleton and skinned mesh from the polygon and 2D skeleton in `scene`.
    ///
    /// On success the character takes the skeletons and mesh instance out of the scene and the
    /// polygon is removed. On failure the scene is left untouched.
    pub fn ready(scene: &mut SceneTree, config: CharacterConfig) -> Result<Self> {
        let _span = tracing::info_span!("character_ready").entered();

        let names = &config.node_names;

        let polygon = scene.polygon(&names.polygon)?;
        let skeleton_2d = scene.skeleton_2d(&names.skeleton_2d)?;
        let mut skeleton_3d = scene.skeleton_3d(&names.skeleton_3d)?.clone();
        let mut mesh = scene.mesh_instance(&names.mesh)?.clone();

        {
            let mut detached = mesh.detach_skeleton();

            mirror_skeleton(skeleton_2d, &mut skeleton_3d, &config.projection)?;

            let triangles = SkinnedMeshBuilder::new(config.projection)
                .with_winding_rule(config.winding_rule)
                .with_normalized_weights(config.normalize_weights)
                .build(polygon, skeleton_2d.bone_count())?;

            detached.set_mesh(triangles.submit(&mut SurfaceTool::new())?);
            detached.set_surface_material(0, config.material.clone())?;
        }

        if mesh.skeleton().is_none() {
            mesh.set_skeleton(Some(names.skeleton_3d.clone()));
        }

        mesh.set_skin(skeleton_3d.create_skin_from_rest_transforms());

        let skeleton_2d = scene.take_skeleton_2d(&names.skeleton_2d)?;
        scene.take_skeleton_3d(&names.skeleton_3d)?;
        scene.take_mesh_instance(&names.mesh)?;
        scene.take_polygon(&names.polygon)?;

        let sync = PoseSynchronizer::new(skeleton_2d, skeleton_3d, config.projection)?;

        tracing::info!(
            bones = sync.target().bone_count(),
            vertices = mesh.mesh().map(|v| v.vertex_count()).unwrap_or_default(),
            "character ready"
        );

        Ok(Self { config, sync, mesh })
    }

    /// Copies the current 2D pose onto the 3D skeleton
    pub fn process(&mut self, _delta: f32) {
        self.sync.sync();
    }

    pub fn config(&self) -> &CharacterConfig {
        &self.config
    }

    pub fn skeleton_2d(&self) -> &Skeleton2D {
        self.sync.source()
    }

    /// The 2D skeleton, to be animated by the host between frames
    pub fn skeleton_2d_mut(&mut self) -> &mut Skeleton2D {
        self.sync.source_mut()
    }

    pub fn skeleton_3d(&self) -> &Skeleton3D {
        self.sync.target()
    }

    pub fn mesh(&self) -> &MeshInstance {
        &self.mesh
    }

    /// Skinning matrices of the current 3D pose, indexed by joint
    pub fn joint_matrices(&self) -> Vec<Mat4> {
        match self.mesh.skin() {
            Some(skin) => skin.joint_matrices(&self.skeleton_3d().global_poses()),
            None => Vec::new(),
        }
    }

    /// Vertex positions of the mesh in the current pose
    pub fn deformed_positions(&self) -> Vec<Vec3> {
        self.mesh
            .mesh()
            .and_then(|mesh| deform_positions(mesh, &self.joint_matrices()))
            .unwrap_or_default()
    }
}
