use glam::{U16Vec4, Vec4};
use marionette_core::BoneIndex;

/// Maximum number of bones which may influence a single vertex
pub const MAX_INFLUENCES: usize = 4;

/// The bones influencing a vertex, and by how much.
///
/// Unused slots have bone `0` and weight `0.0`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BoneInfluences {
    pub bones: [BoneIndex; MAX_INFLUENCES],
    pub weights: [f32; MAX_INFLUENCES],
}

impl BoneInfluences {
    /// Influence by a single bone
    pub fn single(bone: BoneIndex, weight: f32) -> Self {
        let mut influences = Self::default();
        influences.bones[0] = bone;
        influences.weights[0] = weight;
        influences
    }

    /// Selects the strongest influences among per bone `weights`, indexed by bone
    pub fn from_weights(weights: impl IntoIterator<Item = f32>) -> Self {
        weights.into_iter().enumerate().collect()
    }

    /// Iterates the slots carrying a positive weight
    pub fn iter(&self) -> impl Iterator<Item = (BoneIndex, f32)> + '_ {
        self.bones
            .iter()
            .copied()
            .zip(self.weights.iter().copied())
            .filter(|(_, weight)| *weight > 0.0)
    }

    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn total_weight(&self) -> f32 {
        self.weights.iter().sum()
    }

    /// Returns the influences scaled so the weights sum to one.
    ///
    /// Influences without any weight are returned as is.
    pub fn normalized(mut self) -> Self {
        let total = self.total_weight();
        if total > 0.0 {
            self.weights.iter_mut().for_each(|v| *v /= total);
        }

        self
    }

    /// Joint indices as stored in a vertex buffer.
    ///
    /// Returns `None` if a bone does not fit in 16 bits.
    pub fn joints(&self) -> Option<U16Vec4> {
        let [a, b, c, d] = self.bones;
        Some(U16Vec4::new(
            a.try_into().ok()?,
            b.try_into().ok()?,
            c.try_into().ok()?,
            d.try_into().ok()?,
        ))
    }

    pub fn weight_vec(&self) -> Vec4 {
        Vec4::from_array(self.weights)
    }
}

impl FromIterator<(BoneIndex, f32)> for BoneInfluences {
    fn from_iter<T: IntoIterator<Item = (BoneIndex, f32)>>(iter: T) -> Self {
        let mut picker = InfluencePicker::new();
        iter.into_iter()
            .for_each(|(bone, weight)| picker.push(bone, weight));
        picker.finish()
    }
}

/// Greedily keeps the [`MAX_INFLUENCES`] strongest of a stream of bone weights.
///
/// A weight is only admitted if it is strictly greater than the weakest weight picked so far,
/// hence zero weights are never picked and ties go to the bone seen first. Once all slots are
/// taken, a weight *equal* to the weakest pick is dropped as well, even though it is as strong as
/// a weight which was kept.
#[derive(Debug, Clone, Default)]
pub struct InfluencePicker {
    influences: BoneInfluences,
    picked: usize,
    lowest_picked: f32,
}

impl InfluencePicker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, bone: BoneIndex, weight: f32) {
        if weight.is_nan() || weight <= self.lowest_picked {
            return;
        }

        let slots = &mut self.influences;

        if self.picked < MAX_INFLUENCES {
            slots.bones[self.picked] = bone;
            slots.weights[self.picked] = weight;
            self.picked += 1;

            if self.picked == MAX_INFLUENCES {
                self.lowest_picked = min_weight(&slots.weights);
            }
        } else {
            // First minimum wins
            let mut lowest = 0;
            for (i, &v) in slots.weights.iter().enumerate() {
                if v < slots.weights[lowest] {
                    lowest = i;
                }
            }

            slots.bones[lowest] = bone;
            slots.weights[lowest] = weight;
            self.lowest_picked = min_weight(&slots.weights);
        }
    }

    pub fn picked(&self) -> usize {
        self.picked
    }

    pub fn finish(self) -> BoneInfluences {
        self.influences
    }
}

fn min_weight(weights: &[f32; MAX_INFLUENCES]) -> f32 {
    weights.iter().copied().fold(f32::INFINITY, f32::min)
}
