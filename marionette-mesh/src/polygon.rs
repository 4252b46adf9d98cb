use std::borrow::Cow;

use glam::Vec2;
use itertools::Itertools;
use marionette_core::BoneIndex;

use crate::{influence::BoneInfluences, Error, Result};

/// A skinned polygon in image space.
///
/// Either a single outline made of all points in order, or several contours each indexing into
/// the shared points.
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Polygon2D {
    points: Vec<Vec2>,
    /// Texture coordinates in pixels, parallel to the points. Empty to use the points themselves
    #[cfg_attr(feature = "serde", serde(default))]
    uvs: Vec<Vec2>,
    #[cfg_attr(feature = "serde", serde(default))]
    contours: Vec<Vec<usize>>,
    /// Weight of each point, per bone
    #[cfg_attr(feature = "serde", serde(default))]
    bone_weights: Vec<Vec<f32>>,
}

impl Polygon2D {
    pub fn new(points: impl IntoIterator<Item = Vec2>) -> Self {
        Self {
            points: points.into_iter().collect_vec(),
            ..Default::default()
        }
    }

    pub fn with_uvs(mut self, uvs: impl IntoIterator<Item = Vec2>) -> Self {
        self.uvs = uvs.into_iter().collect_vec();
        self
    }

    pub fn with_contour(mut self, contour: impl IntoIterator<Item = usize>) -> Self {
        self.contours.push(contour.into_iter().collect_vec());
        self
    }

    /// Appends the per point weights of the next bone
    pub fn with_bone_weights(mut self, weights: impl IntoIterator<Item = f32>) -> Self {
        self.bone_weights.push(weights.into_iter().collect_vec());
        self
    }

    pub fn set_bone_weights(&mut self, bone: BoneIndex, weights: Vec<f32>) {
        if self.bone_weights.len() <= bone {
            self.bone_weights.resize_with(bone + 1, Vec::new);
        }

        self.bone_weights[bone] = weights;
    }

    pub fn points(&self) -> &[Vec2] {
        &self.points
    }

    pub fn point_count(&self) -> usize {
        self.points.len()
    }

    pub fn uv(&self, point: usize) -> Vec2 {
        self.uvs.get(point).copied().unwrap_or(self.points[point])
    }

    pub fn bone_weights(&self, bone: BoneIndex) -> &[f32] {
        &self.bone_weights[bone]
    }

    pub fn bone_count(&self) -> usize {
        self.bone_weights.len()
    }

    /// The contours to tessellate. Without explicit contours this is the outline.
    pub fn contours(&self) -> Cow<'_, [Vec<usize>]> {
        if self.contours.is_empty() {
            Cow::Owned(vec![(0..self.points.len()).collect_vec()])
        } else {
            Cow::Borrowed(&self.contours)
        }
    }

    /// Checks that every parallel array matches the points, and that weights are given for
    /// exactly `bone_count` bones
    pub fn validate(&self, bone_count: usize) -> Result<()> {
        let point_count = self.points.len();

        if !self.uvs.is_empty() && self.uvs.len() != point_count {
            return Err(Error::UvLengthMismatch {
                expected: point_count,
                found: self.uvs.len(),
            });
        }

        if self.bone_weights.len() != bone_count {
            return Err(Error::WeightCountMismatch {
                expected: bone_count,
                found: self.bone_weights.len(),
            });
        }

        for (bone, weights) in self.bone_weights.iter().enumerate() {
            if weights.len() != point_count {
                return Err(Error::WeightLengthMismatch {
                    bone,
                    expected: point_count,
                    found: weights.len(),
                });
            }
        }

        for (contour, indices) in self.contours.iter().enumerate() {
            if let Some(&point) = indices.iter().find(|&&v| v >= point_count) {
                return Err(Error::ContourIndexOutOfRange {
                    contour,
                    point,
                    point_count,
                });
            }
        }

        Ok(())
    }

    /// The strongest bones influencing `point`
    pub fn influences(&self, point: usize) -> BoneInfluences {
        BoneInfluences::from_weights(self.bone_weights.iter().map(|v| v[point]))
    }
}

#[cfg(test)]
mod tests {
    use glam::vec2;

    use super::*;

    fn square() -> Polygon2D {
        Polygon2D::new([
            vec2(0.0, 0.0),
            vec2(10.0, 0.0),
            vec2(10.0, 10.0),
            vec2(0.0, 10.0),
        ])
    }

    #[test]
    fn outline() {
        let polygon = square()
            .with_bone_weights([1.0, 1.0, 0.0, 0.0])
            .with_bone_weights([0.0, 0.5, 1.0, 1.0]);

        assert_eq!(polygon.validate(2), Ok(()));
        assert_eq!(polygon.contours().to_vec(), vec![vec![0, 1, 2, 3]]);

        // Falls back to points without texture coordinates
        assert_eq!(polygon.uv(2), vec2(10.0, 10.0));

        let influences = polygon.influences(1);
        assert_eq!(influences.bones, [0, 1, 0, 0]);
        assert_eq!(influences.weights, [1.0, 0.5, 0.0, 0.0]);
    }

    #[test]
    fn inconsistent() {
        let polygon = square().with_bone_weights([1.0, 1.0, 1.0]);

        assert_eq!(
            polygon.validate(1),
            Err(Error::WeightLengthMismatch {
                bone: 0,
                expected: 4,
                found: 3
            })
        );

        assert_eq!(
            square().validate(1),
            Err(Error::WeightCountMismatch {
                expected: 1,
                found: 0
            })
        );

        assert_eq!(
            square().with_uvs([Vec2::ZERO]).validate(0),
            Err(Error::UvLengthMismatch {
                expected: 4,
                found: 1
            })
        );

        assert_eq!(
            square().with_contour([0, 1, 7]).validate(0),
            Err(Error::ContourIndexOutOfRange {
                contour: 0,
                point: 7,
                point_count: 4
            })
        );
    }
}
