use glam::{vec2, vec3, Affine2, Affine3A, Vec2, Vec3, Vec3A};

/// Pixels of the source image that map to one world unit.
pub const DEFAULT_PIXELS_PER_UNIT: f32 = 512.0;

/// Converts a transform in 2D image space to a transform in 3D world space.
///
/// The basis vectors are copied as is and `Z` is the world `Z` axis. Only the origin is scaled
/// and has its `Y` negated, image space being `Y`-down and world space `Y`-up. Bone rotations
/// thus keep their winding while the bones land at the right place in the world.
pub fn convert_transform(transform: Affine2, scale: f32) -> Affine3A {
    let x = transform.matrix2.x_axis;
    let y = transform.matrix2.y_axis;
    let origin = transform.translation * scale;

    Affine3A::from_cols(
        Vec3A::new(x.x, x.y, 0.0),
        Vec3A::new(y.x, y.y, 0.0),
        Vec3A::Z,
        Vec3A::new(origin.x, -origin.y, 0.0),
    )
}

/// The mapping from the pixel space of a 2D puppet to the 3D world.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Projection {
    /// World units per pixel
    pub scale: f32,
    /// Applied to mesh vertex positions after scaling
    pub offset: Vec2,
}

impl Projection {
    pub fn new(scale: f32, offset: Vec2) -> Self {
        Self { scale, offset }
    }

    pub fn with_offset(mut self, offset: Vec2) -> Self {
        self.offset = offset;
        self
    }

    /// See [`convert_transform`]
    pub fn transform_to_3d(&self, transform: Affine2) -> Affine3A {
        convert_transform(transform, self.scale)
    }

    /// Projects a polygon point into the plane `z = 0`.
    ///
    /// Note that the offset is applied to mesh vertices but not to bone transforms.
    pub fn point_to_3d(&self, point: Vec2) -> Vec3 {
        vec3(
            point.x * self.scale + self.offset.x,
            point.y * -self.scale + self.offset.y,
            0.0,
        )
    }

    /// Maps a texture coordinate given in pixels to normalized texture space
    pub fn tex_coord(&self, uv: Vec2) -> Vec2 {
        uv * self.scale
    }
}

impl Default for Projection {
    fn default() -> Self {
        Self {
            scale: 1.0 / DEFAULT_PIXELS_PER_UNIT,
            offset: vec2(-0.5, 1.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use glam::{vec2, Affine2, Affine3A, Mat2, Vec3};

    use super::*;

    #[test]
    fn identity() {
        let converted = convert_transform(Affine2::IDENTITY, 1.0 / 512.0);

        assert_eq!(converted, Affine3A::IDENTITY);
        assert_eq!(Vec3::from(converted.matrix3.z_axis), Vec3::Z);
    }

    #[test]
    fn origin_is_scaled_and_flipped() {
        let transform = Affine2::from_translation(vec2(100.0, 50.0));
        let converted = convert_transform(transform, 1.0 / 512.0);

        assert!(Vec3::from(converted.translation)
            .abs_diff_eq(vec3(100.0 / 512.0, -50.0 / 512.0, 0.0), 1e-7));
    }

    #[test]
    fn basis_is_not_flipped() {
        let rotation = Mat2::from_angle(0.3);
        let transform = Affine2::from_mat2_translation(rotation, vec2(8.0, -16.0));

        let converted = convert_transform(transform, 0.5);

        assert_eq!(
            Vec3::from(converted.matrix3.x_axis),
            vec3(rotation.x_axis.x, rotation.x_axis.y, 0.0)
        );
        assert_eq!(
            Vec3::from(converted.matrix3.y_axis),
            vec3(rotation.y_axis.x, rotation.y_axis.y, 0.0)
        );
        assert_eq!(Vec3::from(converted.translation), vec3(4.0, 8.0, 0.0));
    }

    #[test]
    fn points() {
        let projection = Projection::default();

        assert_eq!(projection.point_to_3d(Vec2::ZERO), vec3(-0.5, 1.0, 0.0));
        assert_eq!(
            projection.point_to_3d(vec2(512.0, 512.0)),
            vec3(0.5, 0.0, 0.0)
        );
        assert_eq!(projection.tex_coord(vec2(256.0, 512.0)), vec2(0.5, 1.0));
    }
}
