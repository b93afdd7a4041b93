mod matrix;
mod ray;
mod vector;

pub use matrix::*;
pub use ray::*;
pub use vector::*;

/// An axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

/// Reflect `incident` about `normal`: `2 (incident . normal) normal - incident`.
///
/// The incident vector points away from the surface, so this is applied to
/// the view vector (and to the light vector when computing highlights).
pub fn reflect(incident: Vector3, normal: Vector3) -> Vector3 {
    normal * (2. * incident.dot(normal)) - incident
}

/// Calculate the refracted direction for a ray crossing between two media,
/// based on Snell's law. Both `incident` and `normal` must be normalized,
/// with `normal` facing the incident ray.
///
/// Returns `None` on total internal reflection.
pub fn refract(incident: Vector3, normal: Vector3, from_ior: f64, to_ior: f64) -> Option<Vector3> {
    let n = from_ior / to_ior;
    let cos_i = -normal.dot(incident);
    let sin_t2 = n * n * (1. - cos_i * cos_i);
    if sin_t2 > 1. {
        return None;
    }

    let cos_t = (1. - sin_t2).sqrt();
    Some(incident * n + normal * (n * cos_i - cos_t))
}
