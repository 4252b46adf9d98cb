use glam::Affine3A;
use marionette_core::Projection;

use crate::{Error, Result, SkeletonSink, SkeletonSource};

/// Reproduces the bone hierarchy of `source` in the empty 3D skeleton `target`.
///
/// Every bone keeps its index, name and parent. The root relative rest transform of each 2D bone
/// is projected to 3D and stored relative to the mirrored parent, such that the global rest of
/// each 3D bone is exactly the projected 2D rest. Projected poses are expressed in the same
/// space, which keeps skins derived from the mirror consistent with [`crate::PoseSynchronizer`].
///
/// All poses are reset to rest afterwards.
pub fn mirror_skeleton<S, K>(source: &S, target: &mut K, projection: &Projection) -> Result<()>
where
    S: SkeletonSource + ?Sized,
    K: SkeletonSink + ?Sized,
{
    let _span = tracing::info_span!("mirror_skeleton", bones = source.bone_count()).entered();

    let existing = target.bone_count();
    if existing != 0 {
        return Err(Error::NotEmpty(existing));
    }

    let bone_count = source.bone_count();

    // Checked up front to leave `target` empty on failure
    for bone in 0..bone_count {
        if let Some(parent) = source.bone_parent(bone).filter(|&parent| parent >= bone) {
            return Err(Error::ParentOrder { bone, parent });
        }
    }

    let mut global_rests: Vec<Affine3A> = Vec::with_capacity(bone_count);

    for bone in 0..bone_count {
        let index = target.add_bone(source.bone_name(bone));
        if index != bone {
            return Err(Error::IndexMismatch {
                expected: bone,
                found: index,
            });
        }

        let parent = source.bone_parent(bone);
        target.set_bone_parent(bone, parent)?;

        let global_rest = projection.transform_to_3d(source.skeleton_rest(bone));
        let local_rest = match parent {
            Some(parent) => global_rests[parent].inverse() * global_rest,
            None => global_rest,
        };

        target.set_bone_rest(bone, local_rest)?;
        global_rests.push(global_rest);

        tracing::debug!(bone, bone_name = source.bone_name(bone), ?parent, "mirrored bone");
    }

    target.reset_bone_poses();

    tracing::info!(bone_count, "mirrored skeleton");

    Ok(())
}
