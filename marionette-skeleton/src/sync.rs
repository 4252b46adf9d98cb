use marionette_core::Projection;

use crate::{Error, Result, SkeletonSink, SkeletonSource};

/// Drives a 3D skeleton from the current pose of a 2D skeleton.
///
/// Owns both skeletons, which are bound to each other once at construction.
#[derive(Debug, Clone)]
pub struct PoseSynchronizer<S, K> {
    source: S,
    target: K,
    projection: Projection,
}

impl<S, K> PoseSynchronizer<S, K>
where
    S: SkeletonSource,
    K: SkeletonSink,
{
    pub fn new(source: S, target: K, projection: Projection) -> Result<Self> {
        let source_count = source.bone_count();
        let target_count = target.bone_count();

        if source_count != target_count {
            return Err(Error::BoneCountMismatch {
                source_count,
                target_count,
            });
        }

        Ok(Self {
            source,
            target,
            projection,
        })
    }

    /// Pushes the root relative pose of every 2D bone onto the matching 3D bone as a persistent,
    /// full strength global pose override.
    pub fn sync(&mut self) {
        debug_assert_eq!(self.source.bone_count(), self.target.bone_count());

        for bone in 0..self.source.bone_count() {
            let pose = self
                .projection
                .transform_to_3d(self.source.skeleton_pose(bone));

            self.target
                .set_bone_global_pose_override(bone, pose, 1.0, true);
        }

        tracing::trace!(bones = self.source.bone_count(), "synchronized pose");
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// The 2D skeleton, for the host to animate
    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    pub fn target(&self) -> &K {
        &self.target
    }

    pub fn projection(&self) -> &Projection {
        &self.projection
    }

    pub fn into_inner(self) -> (S, K) {
        (self.source, self.target)
    }
}

#[cfg(test)]
mod tests {
    use glam::{vec2, vec3, Affine2, Mat4, Vec3};

    use super::*;
    use crate::{mirror_skeleton, Skeleton2D, Skeleton3D};

    fn setup() -> PoseSynchronizer<Skeleton2D, Skeleton3D> {
        let source = Skeleton2D::new()
            .with_bone("hip", None, Affine2::from_translation(vec2(256.0, 384.0)))
            .unwrap()
            .with_bone(
                "spine",
                Some(0),
                Affine2::from_angle_translation(-0.3, vec2(0.0, -100.0)),
            )
            .unwrap()
            .with_bone(
                "head",
                Some(1),
                Affine2::from_angle_translation(0.6, vec2(0.0, -80.0)),
            )
            .unwrap();

        let projection = Projection::default();
        let mut target = Skeleton3D::new();
        mirror_skeleton(&source, &mut target, &projection).unwrap();

        PoseSynchronizer::new(source, target, projection).unwrap()
    }

    #[test]
    fn rest_pose_keeps_identity_joints() {
        let mut sync = setup();
        let skin = sync.target().create_skin_from_rest_transforms();

        sync.sync();

        for matrix in skin.joint_matrices(&sync.target().global_poses()) {
            assert!(matrix.abs_diff_eq(Mat4::IDENTITY, 1e-5));
        }
    }

    #[test]
    fn follows_source() {
        let mut sync = setup();

        sync.source_mut()
            .set_pose(2, Affine2::from_angle_translation(1.2, vec2(10.0, -80.0)))
            .unwrap();
        sync.sync();

        let projection = *sync.projection();
        let poses = sync.target().global_poses();

        for (bone, pose) in poses.iter().enumerate() {
            let expected = projection.transform_to_3d(sync.source().skeleton_pose(bone));
            assert!(pose.abs_diff_eq(expected, 1e-6));
        }

        let head = sync.target().bones()[2].global_override().unwrap();
        assert_eq!(head.amount, 1.0);
        assert!(head.persistent);
        assert!(Vec3::from(head.pose.matrix3.z_axis).abs_diff_eq(vec3(0.0, 0.0, 1.0), 1e-6));
    }

    #[test]
    fn bone_count_mismatch() {
        let source = Skeleton2D::new()
            .with_bone("root", None, Affine2::IDENTITY)
            .unwrap();

        let result = PoseSynchronizer::new(source, Skeleton3D::new(), Projection::default());

        assert!(matches!(
            result,
            Err(Error::BoneCountMismatch {
                source_count: 1,
                target_count: 0
            })
        ));
    }
}
