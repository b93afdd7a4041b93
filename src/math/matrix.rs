use std::ops::Mul;

use crate::error::Result;

use super::Vector3;

/// A row-major 3x3 matrix, used as the camera orientation basis.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Matrix3 {
    pub rows: [[f64; 3]; 3],
}

impl Matrix3 {
    /// Instantiate a new Matrix3 from its rows.
    pub fn new(rows: [[f64; 3]; 3]) -> Self {
        Self { rows }
    }

    /// The identity matrix.
    pub fn identity() -> Self {
        Self {
            rows: [[1., 0., 0.], [0., 1., 0.], [0., 0., 1.]],
        }
    }

    /// Build an orientation basis that points the viewport's +z axis from
    /// `from` toward `at`, with `up` fixing the roll.
    ///
    /// Fails when `from` and `at` coincide, or when `up` is parallel to the
    /// viewing direction.
    pub fn look_at(from: Vector3, at: Vector3, up: Vector3) -> Result<Self> {
        let w = (from - at).normalize()?;
        let u = up.cross(w).normalize()?;
        let v = w.cross(u);

        Ok(Self {
            rows: [
                [u.x, v.x, -w.x],
                [u.y, v.y, -w.y],
                [u.z, v.z, -w.z],
            ],
        })
    }
}

impl Default for Matrix3 {
    fn default() -> Self {
        Self::identity()
    }
}

impl Mul<Vector3> for Matrix3 {
    type Output = Vector3;

    fn mul(self, rhs: Vector3) -> Self::Output {
        let m = self.rows;
        Vector3 {
            x: m[0][0] * rhs.x + m[0][1] * rhs.y + m[0][2] * rhs.z,
            y: m[1][0] * rhs.x + m[1][1] * rhs.y + m[1][2] * rhs.z,
            z: m[2][0] * rhs.x + m[2][1] * rhs.y + m[2][2] * rhs.z,
        }
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn identity_leaves_vectors_untouched() {
        let v = Vector3::new(0.25, -1., 3.);
        assert_eq!(Matrix3::identity() * v, v);
    }

    #[test]
    fn look_at_maps_the_viewport_axis_onto_the_viewing_direction() {
        let from = Vector3::new(3., 0., 1.);
        let at = Vector3::new(0., 0., 4.);
        let m = Matrix3::look_at(from, at, Vector3::new(0., 1., 0.)).unwrap();

        let forward = m * Vector3::new(0., 0., 1.);
        let expected = (at - from).normalize().unwrap();
        assert_relative_eq!(forward.x, expected.x, epsilon = 1e-12);
        assert_relative_eq!(forward.y, expected.y, epsilon = 1e-12);
        assert_relative_eq!(forward.z, expected.z, epsilon = 1e-12);
    }

    #[test]
    fn look_at_rejects_a_degenerate_viewing_direction() {
        let p = Vector3::new(1., 2., 3.);
        assert!(Matrix3::look_at(p, p, Vector3::new(0., 1., 0.)).is_err());
    }
}
