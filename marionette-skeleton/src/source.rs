use glam::Affine2;
use marionette_core::BoneIndex;

use crate::{Error, Result};

/// Read access to a 2D bone hierarchy.
///
/// Transforms are reported relative to the skeleton root, i.e; with all parents applied.
pub trait SkeletonSource {
    fn bone_count(&self) -> usize;

    fn bone_name(&self, bone: BoneIndex) -> &str;

    fn bone_parent(&self, bone: BoneIndex) -> Option<BoneIndex>;

    /// The rest transform of `bone` relative to the skeleton root
    fn skeleton_rest(&self, bone: BoneIndex) -> Affine2;

    /// The current transform of `bone` relative to the skeleton root
    fn skeleton_pose(&self, bone: BoneIndex) -> Affine2;
}

#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Bone2D {
    name: String,
    parent: Option<BoneIndex>,
    /// Rest transform relative to the parent
    rest: Affine2,
    /// Current transform relative to the parent
    pose: Affine2,
}

impl Bone2D {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parent(&self) -> Option<BoneIndex> {
        self.parent
    }

    pub fn rest(&self) -> Affine2 {
        self.rest
    }

    pub fn pose(&self) -> Affine2 {
        self.pose
    }
}

/// A 2D bone hierarchy in image space.
///
/// Bones are appended in topological order, a parent always being created before its children.
#[derive(Debug, Clone, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "SkeletonData")
)]
pub struct Skeleton2D {
    bones: Vec<Bone2D>,
}

/// A skeleton as stored, before its hierarchy is checked
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct SkeletonData {
    bones: Vec<BoneData>,
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct BoneData {
    name: String,
    parent: Option<BoneIndex>,
    rest: Affine2,
    /// Defaults to the rest transform
    #[serde(default)]
    pose: Option<Affine2>,
}

#[cfg(feature = "serde")]
impl TryFrom<SkeletonData> for Skeleton2D {
    type Error = Error;

    fn try_from(value: SkeletonData) -> Result<Self> {
        let mut skeleton = Self::new();

        for bone in value.bones {
            let index = skeleton.add_bone(bone.name, bone.parent, bone.rest)?;
            if let Some(pose) = bone.pose {
                skeleton.bones[index].pose = pose;
            }
        }

        Ok(skeleton)
    }
}

impl Skeleton2D {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a bone with a rest transform relative to `parent`.
    ///
    /// The pose of the new bone starts out at rest.
    pub fn add_bone(
        &mut self,
        name: impl Into<String>,
        parent: Option<BoneIndex>,
        rest: Affine2,
    ) -> Result<BoneIndex> {
        let index = self.bones.len();

        if let Some(parent) = parent {
            if parent >= index {
                return Err(Error::ParentOrder {
                    bone: index,
                    parent,
                });
            }
        }

        self.bones.push(Bone2D {
            name: name.into(),
            parent,
            rest,
            pose: rest,
        });

        Ok(index)
    }

    pub fn with_bone(
        mut self,
        name: impl Into<String>,
        parent: Option<BoneIndex>,
        rest: Affine2,
    ) -> Result<Self> {
        self.add_bone(name, parent, rest)?;
        Ok(self)
    }

    pub fn bones(&self) -> &[Bone2D] {
        &self.bones
    }

    pub fn bone(&self, bone: BoneIndex) -> Option<&Bone2D> {
        self.bones.get(bone)
    }

    pub fn find_bone(&self, name: &str) -> Option<BoneIndex> {
        self.bones.iter().position(|v| v.name == name)
    }

    /// Sets the current transform of `bone` relative to its parent
    pub fn set_pose(&mut self, bone: BoneIndex, pose: Affine2) -> Result<()> {
        let bone = self
            .bones
            .get_mut(bone)
            .ok_or(Error::BoneOutOfRange(bone))?;

        bone.pose = pose;
        Ok(())
    }

    pub fn reset_poses(&mut self) {
        self.bones.iter_mut().for_each(|v| v.pose = v.rest);
    }

    fn compose(&self, bone: BoneIndex, local: impl Fn(&Bone2D) -> Affine2) -> Affine2 {
        let mut transform = local(&self.bones[bone]);
        let mut parent = self.bones[bone].parent;

        while let Some(index) = parent {
            let bone = &self.bones[index];
            transform = local(bone) * transform;
            parent = bone.parent;
        }

        transform
    }
}

impl SkeletonSource for Skeleton2D {
    fn bone_count(&self) -> usize {
        self.bones.len()
    }

    fn bone_name(&self, bone: BoneIndex) -> &str {
        &self.bones[bone].name
    }

    fn bone_parent(&self, bone: BoneIndex) -> Option<BoneIndex> {
        self.bones[bone].parent
    }

    fn skeleton_rest(&self, bone: BoneIndex) -> Affine2 {
        self.compose(bone, |v| v.rest)
    }

    fn skeleton_pose(&self, bone: BoneIndex) -> Affine2 {
        self.compose(bone, |v| v.pose)
    }
}

#[cfg(test)]
mod tests {
    use glam::{vec2, Affine2};

    use super::*;

    #[test]
    fn parent_before_child() {
        let mut skeleton = Skeleton2D::new();

        assert_eq!(
            skeleton.add_bone("arm", Some(0), Affine2::IDENTITY),
            Err(Error::ParentOrder { bone: 0, parent: 0 })
        );

        let root = skeleton.add_bone("root", None, Affine2::IDENTITY).unwrap();
        let arm = skeleton
            .add_bone("arm", Some(root), Affine2::IDENTITY)
            .unwrap();

        assert_eq!((root, arm), (0, 1));
        assert_eq!(skeleton.find_bone("arm"), Some(1));
        assert_eq!(skeleton.bone_parent(arm), Some(root));
    }

    #[test]
    fn root_relative() {
        let skeleton = Skeleton2D::new()
            .with_bone("root", None, Affine2::from_translation(vec2(10.0, 0.0)))
            .unwrap()
            .with_bone(
                "arm",
                Some(0),
                Affine2::from_angle_translation(std::f32::consts::FRAC_PI_2, vec2(0.0, 5.0)),
            )
            .unwrap()
            .with_bone("hand", Some(1), Affine2::from_translation(vec2(2.0, 0.0)))
            .unwrap();

        let hand = skeleton.skeleton_rest(2);
        assert!(hand.translation.abs_diff_eq(vec2(10.0, 7.0), 1e-5));

        let mut skeleton = skeleton;
        skeleton
            .set_pose(0, Affine2::from_translation(vec2(0.0, 0.0)))
            .unwrap();

        assert!(skeleton
            .skeleton_pose(2)
            .translation
            .abs_diff_eq(vec2(0.0, 7.0), 1e-5));
        assert!(skeleton
            .skeleton_rest(2)
            .translation
            .abs_diff_eq(vec2(10.0, 7.0), 1e-5));

        skeleton.reset_poses();
        assert!(skeleton
            .skeleton_pose(2)
            .abs_diff_eq(skeleton.skeleton_rest(2), 1e-6));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn deserialize_checks_hierarchy() {
        let skeleton: Skeleton2D = serde_json::from_str(
            r#"{
                "bones": [
                    { "name": "root", "parent": null, "rest": [1.0, 0.0, 0.0, 1.0, 2.0, 0.0] },
                    { "name": "arm", "parent": 0, "rest": [1.0, 0.0, 0.0, 1.0, 0.0, 3.0] }
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(skeleton.bone_parent(1), Some(0));
        assert!(skeleton
            .skeleton_pose(1)
            .translation
            .abs_diff_eq(vec2(2.0, 3.0), 1e-6));

        // A cycle, and a parent which does not exist
        for parent in [1, 5] {
            let json = format!(
                r#"{{
                    "bones": [
                        {{ "name": "root", "parent": {parent}, "rest": [1.0, 0.0, 0.0, 1.0, 0.0, 0.0] }},
                        {{ "name": "arm", "parent": 0, "rest": [1.0, 0.0, 0.0, 1.0, 0.0, 0.0] }}
                    ]
                }}"#
            );

            assert!(serde_json::from_str::<Skeleton2D>(&json).is_err());
        }
    }
}
