use glam::{Mat4, U16Vec4, Vec3, Vec4};
use itertools::izip;

use crate::mesh::MeshData;

/// Deforms a single point by linear blend skinning.
///
/// Weights are taken relative to their sum. A point without any weight is left in place, as is
/// the contribution of a joint missing from `joint_matrices`.
pub fn skin_point(position: Vec3, joints: U16Vec4, weights: Vec4, joint_matrices: &[Mat4]) -> Vec3 {
    let total = weights.element_sum();
    if total <= 0.0 {
        return position;
    }

    let mut result = Vec3::ZERO;
    for (joint, weight) in joints.to_array().into_iter().zip(weights.to_array()) {
        if weight <= 0.0 {
            continue;
        }

        let matrix = joint_matrices
            .get(joint as usize)
            .copied()
            .unwrap_or(Mat4::IDENTITY);

        result += matrix.transform_point3(position) * weight;
    }

    result / total
}

/// Computes the posed vertex positions of a skinned mesh on the cpu.
///
/// Returns `None` if the mesh lacks positions, joints or weights.
pub fn deform_positions(mesh: &MeshData, joint_matrices: &[Mat4]) -> Option<Vec<Vec3>> {
    let positions = mesh.positions()?;
    let joints = mesh.joints()?;
    let weights = mesh.weights()?;

    Some(
        izip!(positions, joints, weights)
            .map(|(&position, &joints, &weights)| {
                skin_point(position, joints, weights, joint_matrices)
            })
            .collect(),
    )
}
