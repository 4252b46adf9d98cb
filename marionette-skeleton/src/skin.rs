use glam::{Affine3A, Mat4};
use itertools::Itertools;
use marionette_core::BoneIndex;

#[derive(Debug, Clone, PartialEq)]
pub struct SkinBind {
    pub bone: BoneIndex,
    /// Transforms a vertex from model space to bone space when no pose is applied
    pub inverse_bind_matrix: Mat4,
}

/// Binds the vertices of a mesh to the bones of a skeleton.
///
/// Created once from the rest transforms and never changed afterwards.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Skin {
    binds: Vec<SkinBind>,
}

impl Skin {
    /// Creates a skin binding one joint per bone from the global rest transforms
    pub fn from_global_rests(global_rests: &[Affine3A]) -> Self {
        Self {
            binds: global_rests
                .iter()
                .enumerate()
                .map(|(bone, rest)| SkinBind {
                    bone,
                    inverse_bind_matrix: Mat4::from(rest.inverse()),
                })
                .collect_vec(),
        }
    }

    pub fn binds(&self) -> &[SkinBind] {
        &self.binds
    }

    pub fn joint_count(&self) -> usize {
        self.binds.len()
    }

    /// Fills `buffer` with the matrices moving a vertex from its rest position to its posed position
    /// for each joint.
    pub fn fill_joint_matrices(&self, global_poses: &[Affine3A], buffer: &mut [Mat4]) {
        for (bind, slot) in self.binds.iter().zip(buffer) {
            *slot = Mat4::from(global_poses[bind.bone]) * bind.inverse_bind_matrix;
        }
    }

    pub fn joint_matrices(&self, global_poses: &[Affine3A]) -> Vec<Mat4> {
        let mut buffer = vec![Mat4::IDENTITY; self.binds.len()];
        self.fill_joint_matrices(global_poses, &mut buffer);
        buffer
    }
}

#[cfg(test)]
mod tests {
    use glam::{vec3, Affine3A, Mat4};

    use super::*;

    #[test]
    fn rest_is_identity() {
        let rests = [
            Affine3A::from_translation(vec3(0.0, 1.0, 0.0)),
            Affine3A::from_rotation_z(0.7) * Affine3A::from_translation(vec3(2.0, 0.0, 0.0)),
        ];

        let skin = Skin::from_global_rests(&rests);

        assert_eq!(skin.joint_count(), 2);

        for matrix in skin.joint_matrices(&rests) {
            assert!(matrix.abs_diff_eq(Mat4::IDENTITY, 1e-5));
        }
    }
}
