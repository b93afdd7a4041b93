use super::Vector3;

/// A ray, parameterized as `origin + direction * t`.
#[derive(Clone, Debug, PartialEq)]
pub struct Ray {
    pub origin: Vector3,
    pub direction: Vector3,
}

impl Ray {
    /// Instantiate a new Ray. The direction is expected to be nonzero, but
    /// does not have to be normalized; every intersection routine carries
    /// the quadratic `d . d` term.
    pub fn new(origin: Vector3, direction: Vector3) -> Self {
        Self { origin, direction }
    }

    /// The point along this ray at parametric distance `t`.
    pub fn along(&self, t: f64) -> Vector3 {
        self.origin + self.direction * t
    }
}
