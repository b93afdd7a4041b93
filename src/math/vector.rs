use std::ops::{Add, AddAssign, Div, Mul, MulAssign, Neg, Sub};

use crate::error::{Error, Result};

use super::Axis;

/// The componentwise smallest possible vector. Useful as a seed for maximums.
pub const VECTOR_MIN: Vector3 = Vector3 {
    x: f64::MIN,
    y: f64::MIN,
    z: f64::MIN,
};

/// The componentwise largest possible vector. Useful as a seed for minimums.
pub const VECTOR_MAX: Vector3 = Vector3 {
    x: f64::MAX,
    y: f64::MAX,
    z: f64::MAX,
};

/// A vector in 3D space.
#[derive(Clone, Copy, PartialEq, Debug, Default)]
pub struct Vector3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vector3 {
    /// Instantiate a new Vector3.
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Find the dot product between two Vector3s.
    pub fn dot(self, other: Self) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Cross two Vector3s.
    pub fn cross(self, other: Self) -> Self {
        Self {
            x: self.y * other.z - self.z * other.y,
            y: -self.x * other.z + self.z * other.x,
            z: self.x * other.y - self.y * other.x,
        }
    }

    /// Find the magnitude of this Vector3.
    pub fn magnitude(self) -> f64 {
        (self.x.powi(2) + self.y.powi(2) + self.z.powi(2)).sqrt()
    }

    /// Normalize this Vector3 by dividing it by its own magnitude.
    ///
    /// Fails with [`Error::DegenerateVector`] when the magnitude is zero.
    pub fn normalize(self) -> Result<Self> {
        let magnitude = self.magnitude();
        if magnitude == 0.0 {
            return Err(Error::DegenerateVector);
        }
        Ok(self / magnitude)
    }

    /// Grab the component of this Vector3 along an axis.
    pub fn axis(self, axis: Axis) -> f64 {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
            Axis::Z => self.z,
        }
    }
}

impl Add for Vector3 {
    type Output = Vector3;

    fn add(self, rhs: Self) -> Self::Output {
        Self {
            x: self.x + rhs.x,
            y: self.y + rhs.y,
            z: self.z + rhs.z,
        }
    }
}

impl AddAssign for Vector3 {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sub for Vector3 {
    type Output = Vector3;

    fn sub(self, rhs: Self) -> Self::Output {
        Self {
            x: self.x - rhs.x,
            y: self.y - rhs.y,
            z: self.z - rhs.z,
        }
    }
}

impl Neg for Vector3 {
    type Output = Vector3;

    fn neg(self) -> Self::Output {
        Self {
            x: -self.x,
            y: -self.y,
            z: -self.z,
        }
    }
}

impl Mul<f64> for Vector3 {
    type Output = Vector3;

    fn mul(self, rhs: f64) -> Self::Output {
        Self {
            x: self.x * rhs,
            y: self.y * rhs,
            z: self.z * rhs,
        }
    }
}

impl MulAssign<f64> for Vector3 {
    fn mul_assign(&mut self, rhs: f64) {
        *self = *self * rhs;
    }
}

impl Div<f64> for Vector3 {
    type Output = Vector3;

    fn div(self, rhs: f64) -> Self::Output {
        Self {
            x: self.x / rhs,
            y: self.y / rhs,
            z: self.z / rhs,
        }
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn normalized_vectors_have_unit_magnitude() {
        for v in &[
            Vector3::new(3., -4., 12.),
            Vector3::new(0., 0., 0.001),
            Vector3::new(-7., 2., 5.),
        ] {
            assert_relative_eq!(v.normalize().unwrap().magnitude(), 1.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn normalizing_a_zero_vector_fails() {
        assert!(matches!(
            Vector3::default().normalize(),
            Err(Error::DegenerateVector)
        ));
    }

    #[test]
    fn cross_product_is_perpendicular_to_both_operands() {
        let a = Vector3::new(1., 2., 3.);
        let b = Vector3::new(-4., 0.5, 2.);
        let c = a.cross(b);
        assert_relative_eq!(c.dot(a), 0.0, epsilon = 1e-12);
        assert_relative_eq!(c.dot(b), 0.0, epsilon = 1e-12);
    }
}
