use crate::{
    error::Result,
    material::Material,
    math::{Ray, Vector3},
    scene::EPSILON,
};

/// The determinant cutoff below which a ray counts as parallel to the
/// triangle plane. Distinct from the self-intersection bias, which is a
/// distance along the ray rather than a volume ratio.
const DET_EPSILON: f64 = 1e-6;

/// A triangle with precomputed edges and a flat face normal.
#[derive(Debug, Clone)]
pub struct Triangle {
    pub v0: Vector3,
    pub v1: Vector3,
    pub v2: Vector3,
    pub edge1: Vector3,
    pub edge2: Vector3,
    pub normal: Vector3,
    pub material: Material,
}

impl Triangle {
    /// Instantiate a new Triangle, precomputing its edges and face normal.
    ///
    /// Fails when the vertices are collinear (the face normal degenerates).
    pub fn new(v0: Vector3, v1: Vector3, v2: Vector3, material: Material) -> Result<Self> {
        let edge1 = v1 - v0;
        let edge2 = v2 - v0;
        let normal = edge1.cross(edge2).normalize()?;

        Ok(Self {
            v0,
            v1,
            v2,
            edge1,
            edge2,
            normal,
            material,
        })
    }

    /// The centroid of this triangle. Used to order triangles along a BVH
    /// split axis.
    pub fn centroid(&self) -> Vector3 {
        (self.v0 + self.v1 + self.v2) / 3.
    }

    /// Moller-Trumbore ray intersection.
    ///
    /// Returns the parametric distance to the hit, or `INFINITY` when the
    /// ray is parallel to the triangle plane, the barycentric coordinates
    /// fall outside the triangle, or the hit sits behind the
    /// self-intersection bias.
    pub fn intersect(&self, ray: &Ray) -> f64 {
        let h = ray.direction.cross(self.edge2);
        let det = self.edge1.dot(h);
        if det.abs() < DET_EPSILON {
            return f64::INFINITY;
        }

        let inv = 1. / det;
        let s = ray.origin - self.v0;
        let u = inv * s.dot(h);
        if !(0.0..=1.0).contains(&u) {
            return f64::INFINITY;
        }

        let q = s.cross(self.edge1);
        let v = inv * ray.direction.dot(q);
        if v < 0. || u + v > 1. {
            return f64::INFINITY;
        }

        let t = inv * self.edge2.dot(q);
        if t > EPSILON {
            t
        } else {
            f64::INFINITY
        }
    }

    /// Move every vertex by `delta`.
    pub fn translate(&mut self, delta: Vector3) {
        self.v0 += delta;
        self.v1 += delta;
        self.v2 += delta;
        self.recompute();
    }

    /// Scale every vertex about the origin.
    pub fn scale(&mut self, factor: f64) {
        self.v0 *= factor;
        self.v1 *= factor;
        self.v2 *= factor;
        self.recompute();
    }

    fn recompute(&mut self) {
        self.edge1 = self.v1 - self.v0;
        self.edge2 = self.v2 - self.v0;
        self.normal = self
            .edge1
            .cross(self.edge2)
            .normalize()
            .expect("transform degenerated a valid triangle");
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    fn triangle() -> Triangle {
        Triangle::new(
            Vector3::new(0., 0., 5.),
            Vector3::new(2., 0., 5.),
            Vector3::new(0., 2., 5.),
            Material::default(),
        )
        .unwrap()
    }

    #[test]
    fn face_normal_is_perpendicular_to_both_edges() {
        let tri = triangle();
        assert_relative_eq!(tri.normal.dot(tri.edge1), 0.0, epsilon = 1e-12);
        assert_relative_eq!(tri.normal.dot(tri.edge2), 0.0, epsilon = 1e-12);
        assert_relative_eq!(tri.normal.magnitude(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn collinear_vertices_are_rejected() {
        let result = Triangle::new(
            Vector3::new(0., 0., 0.),
            Vector3::new(1., 1., 1.),
            Vector3::new(2., 2., 2.),
            Material::default(),
        );
        assert!(result.is_err());
    }

    #[test]
    fn barycentric_points_are_hit_at_the_expected_distance() {
        let tri = triangle();

        for &(a, b) in &[(0.25, 0.5), (0.1, 0.1), (0.4, 0.55)] {
            let target = tri.v0 + tri.edge1 * a + tri.edge2 * b;
            // aiming the direction exactly at the target puts the hit at t = 1
            let ray = Ray::new(Vector3::default(), target);
            assert_relative_eq!(tri.intersect(&ray), 1.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn barycentric_coordinates_outside_the_triangle_miss() {
        let tri = triangle();

        for &(a, b) in &[(0.75, 0.75), (-0.1, 0.5), (0.5, -0.1), (1.1, 0.)] {
            let target = tri.v0 + tri.edge1 * a + tri.edge2 * b;
            let ray = Ray::new(Vector3::default(), target);
            assert_eq!(tri.intersect(&ray), f64::INFINITY);
        }
    }

    #[test]
    fn parallel_rays_miss() {
        let tri = triangle();
        let ray = Ray::new(Vector3::default(), Vector3::new(1., 0., 0.));
        assert_eq!(tri.intersect(&ray), f64::INFINITY);
    }

    #[test]
    fn transforms_recompute_the_face_normal() {
        let mut tri = triangle();
        tri.scale(2.);
        tri.translate(Vector3::new(1., -1., 3.));

        assert_eq!(tri.v0, Vector3::new(1., -1., 13.));
        assert_relative_eq!(tri.normal.dot(tri.edge1), 0.0, epsilon = 1e-12);
        assert_relative_eq!(tri.normal.magnitude(), 1.0, epsilon = 1e-12);
    }
}
