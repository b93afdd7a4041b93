use crate::{
    material::Material,
    math::{Ray, Vector3},
};

/// A sphere.
#[derive(Debug, Clone)]
pub struct Sphere {
    pub center: Vector3,
    pub radius: f64,
    pub material: Material,
}

impl Sphere {
    pub fn new(center: Vector3, radius: f64, material: Material) -> Self {
        Self {
            center,
            radius,
            material,
        }
    }

    /// Solve `|origin + t * direction - center|^2 = radius^2` for both roots.
    ///
    /// Returns `(INFINITY, INFINITY)` when the ray misses. Both roots are
    /// handed back so the caller can pick the nearer one inside its own
    /// valid range; a ray starting inside the sphere still has a usable
    /// far root.
    pub fn intersect(&self, ray: &Ray) -> (f64, f64) {
        let oc = ray.origin - self.center;
        let k1 = ray.direction.dot(ray.direction);
        let k2 = 2. * oc.dot(ray.direction);
        let k3 = oc.dot(oc) - self.radius * self.radius;

        let discriminant = k2 * k2 - 4. * k1 * k3;
        if discriminant < 0. {
            return (f64::INFINITY, f64::INFINITY);
        }

        let sqrt_d = discriminant.sqrt();
        ((-k2 + sqrt_d) / (2. * k1), (-k2 - sqrt_d) / (2. * k1))
    }
}
