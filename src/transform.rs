use cgmath::Matrix4;
use cgmath::Rad;
use cgmath::SquareMatrix;
use cgmath::Vector3;

/// Affine pose of a body in its parent frame: a rotation submatrix plus a
/// translation column, stored column-major as cgmath does.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    matrix: Matrix4<f64>,
}

impl Transform {
    pub fn identity() -> Transform {
        Transform {
            matrix: Matrix4::identity(),
        }
    }

    pub fn from_matrix(matrix: Matrix4<f64>) -> Transform {
        Transform { matrix }
    }

    pub fn matrix(&self) -> Matrix4<f64> {
        self.matrix
    }

    pub fn translation(&self) -> Vector3<f64> {
        Vector3::new(self.matrix.w.x, self.matrix.w.y, self.matrix.w.z)
    }

    /// Writes the translation column. The homogeneous `w.w` element is left as is.
    pub fn set_translation(&mut self, position: Vector3<f64>) {
        self.matrix.w.x = position.x;
        self.matrix.w.y = position.y;
        self.matrix.w.z = position.z;
    }

    /// Copy of this transform with the translation column zeroed.
    pub fn rotation_only(&self) -> Transform {
        let mut rotation = *self;
        rotation.set_translation(Vector3::new(0.0, 0.0, 0.0));
        rotation
    }

    /// Rotates a direction by the rotation submatrix, ignoring translation.
    pub fn apply_rotation_only(&self, v: Vector3<f64>) -> Vector3<f64> {
        (self.matrix * v.extend(0.0)).truncate()
    }

    /// Premultiplies by a rotation of `angle` radians about the unit vector `axis`.
    ///
    /// The translation column is rotated along with the basis; callers that
    /// track position separately write it back afterwards.
    pub fn pre_rotate(&mut self, axis: Vector3<f64>, angle: f64) {
        self.matrix = Matrix4::from_axis_angle(axis, Rad(angle)) * self.matrix;
    }

    /// The sixteen elements in column-major order.
    pub fn to_array(&self) -> [f64; 16] {
        let columns: [[f64; 4]; 4] = self.matrix.into();
        let mut out = [0.0; 16];
        for (i, column) in columns.iter().enumerate() {
            out[i * 4..i * 4 + 4].copy_from_slice(column);
        }
        out
    }

    pub fn from_array(elements: [f64; 16]) -> Transform {
        let mut columns = [[0.0; 4]; 4];
        for (i, column) in columns.iter_mut().enumerate() {
            column.copy_from_slice(&elements[i * 4..i * 4 + 4]);
        }
        Transform {
            matrix: Matrix4::from(columns),
        }
    }
}

impl Default for Transform {
    fn default() -> Self {
        Transform::identity()
    }
}

impl From<Matrix4<f64>> for Transform {
    fn from(matrix: Matrix4<f64>) -> Self {
        Transform::from_matrix(matrix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn translation_lives_in_last_column() {
        let mut t = Transform::identity();
        t.set_translation(Vector3::new(1.0, 2.0, 3.0));
        assert_eq!(t.to_array()[12..15], [1.0, 2.0, 3.0]);
        assert_eq!(t.to_array()[15], 1.0);
        assert_eq!(t.translation(), Vector3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn rotation_only_drops_translation() {
        let mut t = Transform::identity();
        t.pre_rotate(Vector3::unit_z(), FRAC_PI_2);
        t.set_translation(Vector3::new(5.0, 0.0, 0.0));
        let r = t.rotation_only();
        assert_eq!(r.translation(), Vector3::new(0.0, 0.0, 0.0));
        assert_eq!(
            r.apply_rotation_only(Vector3::unit_x()),
            t.apply_rotation_only(Vector3::unit_x())
        );
    }

    #[test]
    fn quarter_turn_about_z() {
        let mut t = Transform::identity();
        t.pre_rotate(Vector3::unit_z(), FRAC_PI_2);
        let v = t.apply_rotation_only(Vector3::unit_x());
        assert_relative_eq!(v, Vector3::unit_y(), epsilon = 1e-12);
    }

    #[test]
    fn array_layout_is_column_major() {
        let mut elements = [0.0; 16];
        for (i, e) in elements.iter_mut().enumerate() {
            *e = i as f64;
        }
        let t = Transform::from_array(elements);
        assert_eq!(t.translation(), Vector3::new(12.0, 13.0, 14.0));
        assert_eq!(t.to_array(), elements);
    }
}
