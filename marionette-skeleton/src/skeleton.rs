use glam::Affine3A;
use marionette_core::BoneIndex;

use crate::{skin::Skin, Error, Result};

/// Write access to a 3D bone hierarchy.
pub trait SkeletonSink {
    fn bone_count(&self) -> usize;

    /// Appends a new parentless bone at rest, returning its index
    fn add_bone(&mut self, name: &str) -> BoneIndex;

    fn set_bone_parent(&mut self, bone: BoneIndex, parent: Option<BoneIndex>) -> Result<()>;

    /// Sets the rest transform of `bone` relative to its parent
    fn set_bone_rest(&mut self, bone: BoneIndex, rest: Affine3A) -> Result<()>;

    /// Moves every bone back to its rest transform
    fn reset_bone_poses(&mut self);

    /// Overrides the skeleton space pose of `bone`.
    ///
    /// `amount` blends between the computed pose (0.0) and `pose` (1.0). A persistent override
    /// stays in effect until replaced; others are dropped by the next frame.
    ///
    /// # Panics
    /// If `bone` is out of range.
    fn set_bone_global_pose_override(
        &mut self,
        bone: BoneIndex,
        pose: Affine3A,
        amount: f32,
        persistent: bool,
    );

    fn create_skin_from_rest_transforms(&self) -> Skin;
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PoseOverride {
    pub pose: Affine3A,
    pub amount: f32,
    pub persistent: bool,
}

#[derive(Debug, Clone)]
pub struct Bone3D {
    name: String,
    parent: Option<BoneIndex>,
    /// Relative to the parent
    rest: Affine3A,
    /// Relative to the parent
    pose: Affine3A,
    global_override: Option<PoseOverride>,
}

impl Bone3D {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parent(&self) -> Option<BoneIndex> {
        self.parent
    }

    pub fn rest(&self) -> Affine3A {
        self.rest
    }

    pub fn pose(&self) -> Affine3A {
        self.pose
    }

    pub fn global_override(&self) -> Option<&PoseOverride> {
        self.global_override.as_ref()
    }
}

/// A 3D bone hierarchy with rest and runtime poses.
#[derive(Debug, Clone, Default)]
pub struct Skeleton3D {
    bones: Vec<Bone3D>,
}

impl Skeleton3D {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bones(&self) -> &[Bone3D] {
        &self.bones
    }

    pub fn bone(&self, bone: BoneIndex) -> Option<&Bone3D> {
        self.bones.get(bone)
    }

    pub fn find_bone(&self, name: &str) -> Option<BoneIndex> {
        self.bones.iter().position(|v| v.name == name)
    }

    fn bone_mut(&mut self, bone: BoneIndex) -> Result<&mut Bone3D> {
        self.bones.get_mut(bone).ok_or(Error::BoneOutOfRange(bone))
    }

    /// Sets the runtime transform of `bone` relative to its parent
    pub fn set_bone_pose(&mut self, bone: BoneIndex, pose: Affine3A) -> Result<()> {
        self.bone_mut(bone)?.pose = pose;
        Ok(())
    }

    pub fn clear_pose_overrides(&mut self) {
        self.bones.iter_mut().for_each(|v| v.global_override = None);
    }

    /// Drops every override which was not set as persistent
    pub fn clear_transient_overrides(&mut self) {
        for bone in &mut self.bones {
            if bone.global_override.is_some_and(|v| !v.persistent) {
                bone.global_override = None;
            }
        }
    }

    /// Rest transforms relative to the skeleton root
    pub fn global_rests(&self) -> Vec<Affine3A> {
        let mut globals: Vec<Affine3A> = Vec::with_capacity(self.bones.len());

        for bone in &self.bones {
            let global = match bone.parent {
                Some(parent) => globals[parent] * bone.rest,
                None => bone.rest,
            };

            globals.push(global);
        }

        globals
    }

    /// Current transforms relative to the skeleton root, with overrides applied
    pub fn global_poses(&self) -> Vec<Affine3A> {
        let mut globals: Vec<Affine3A> = Vec::with_capacity(self.bones.len());

        for bone in &self.bones {
            let mut global = match bone.parent {
                Some(parent) => globals[parent] * bone.pose,
                None => bone.pose,
            };

            if let Some(v) = &bone.global_override {
                global = blend(global, v.pose, v.amount);
            }

            globals.push(global);
        }

        globals
    }
}

fn blend(from: Affine3A, to: Affine3A, amount: f32) -> Affine3A {
    if amount >= 1.0 {
        return to;
    }

    if amount <= 0.0 {
        return from;
    }

    let (from_scale, from_rotation, from_translation) = from.to_scale_rotation_translation();
    let (to_scale, to_rotation, to_translation) = to.to_scale_rotation_translation();

    Affine3A::from_scale_rotation_translation(
        from_scale.lerp(to_scale, amount),
        from_rotation.slerp(to_rotation, amount),
        from_translation.lerp(to_translation, amount),
    )
}

impl SkeletonSink for Skeleton3D {
    fn bone_count(&self) -> usize {
        self.bones.len()
    }

    fn add_bone(&mut self, name: &str) -> BoneIndex {
        self.bones.push(Bone3D {
            name: name.to_string(),
            parent: None,
            rest: Affine3A::IDENTITY,
            pose: Affine3A::IDENTITY,
            global_override: None,
        });

        self.bones.len() - 1
    }

    fn set_bone_parent(&mut self, bone: BoneIndex, parent: Option<BoneIndex>) -> Result<()> {
        if let Some(parent) = parent {
            if parent >= bone {
                return Err(Error::ParentOrder { bone, parent });
            }
        }

        self.bone_mut(bone)?.parent = parent;
        Ok(())
    }

    fn set_bone_rest(&mut self, bone: BoneIndex, rest: Affine3A) -> Result<()> {
        self.bone_mut(bone)?.rest = rest;
        Ok(())
    }

    fn reset_bone_poses(&mut self) {
        self.bones.iter_mut().for_each(|v| v.pose = v.rest);
    }

    fn set_bone_global_pose_override(
        &mut self,
        bone: BoneIndex,
        pose: Affine3A,
        amount: f32,
        persistent: bool,
    ) {
        self.bones[bone].global_override = Some(PoseOverride {
            pose,
            amount,
            persistent,
        });
    }

    fn create_skin_from_rest_transforms(&self) -> Skin {
        Skin::from_global_rests(&self.global_rests())
    }
}
