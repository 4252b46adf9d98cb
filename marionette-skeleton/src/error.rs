use marionette_core::BoneIndex;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Bone {bone} references parent {parent} which is not created before it")]
    ParentOrder { bone: BoneIndex, parent: BoneIndex },

    #[error("Bone {0} does not exist in the skeleton")]
    BoneOutOfRange(BoneIndex),

    #[error("Mirror target already contains {0} bones")]
    NotEmpty(usize),

    #[error("Bone {expected} was created at index {found}")]
    IndexMismatch { expected: BoneIndex, found: BoneIndex },

    #[error("Skeleton bone counts differ. Source: {source_count}, target: {target_count}")]
    BoneCountMismatch {
        source_count: usize,
        target_count: usize,
    },
}
