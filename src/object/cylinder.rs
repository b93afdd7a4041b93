use crate::{
    error::Result,
    material::Material,
    math::{Ray, Vector3},
    scene::EPSILON,
};

/// A finite capped cylinder: a lateral surface plus two disk caps.
#[derive(Debug, Clone)]
pub struct Cylinder {
    /// The bottom-center of the cylinder.
    pub base: Vector3,
    /// The cylinder's axis, normalized.
    pub axis: Vector3,
    /// The distance along the axis from the base to the top cap.
    pub height: f64,
    pub radius: f64,
    pub material: Material,
}

impl Cylinder {
    /// Instantiate a new Cylinder. The axis is normalized here, and a zero
    /// axis fails.
    pub fn new(
        base: Vector3,
        axis: Vector3,
        height: f64,
        radius: f64,
        material: Material,
    ) -> Result<Self> {
        Ok(Self {
            base,
            axis: axis.normalize()?,
            height,
            radius,
            material,
        })
    }

    /// Intersect a ray against the lateral surface and both caps, returning
    /// the nearest valid parametric distance or `INFINITY`.
    ///
    /// The lateral surface comes from solving the circle equation in the
    /// plane perpendicular to the axis, keeping roots whose axial
    /// projection lies within the cylinder's span. Cap hits must land
    /// within the cap radius.
    pub fn intersect(&self, ray: &Ray) -> f64 {
        let d = ray.direction;
        let v = self.axis;
        let w = ray.origin - self.base;

        let d_proj = d - v * d.dot(v);
        let w_proj = w - v * w.dot(v);
        let a = d_proj.dot(d_proj);
        let b = 2. * d_proj.dot(w_proj);
        let c = w_proj.dot(w_proj) - self.radius * self.radius;

        let mut t_hit = f64::INFINITY;

        // lateral surface; a vanishes when the ray runs along the axis
        let discriminant = b * b - 4. * a * c;
        if a.abs() > EPSILON && discriminant >= 0. {
            let sqrt_d = discriminant.sqrt();
            for &t in &[(-b - sqrt_d) / (2. * a), (-b + sqrt_d) / (2. * a)] {
                if t > EPSILON && t < t_hit {
                    let proj = (ray.along(t) - self.base).dot(v);
                    if (0. ..=self.height).contains(&proj) {
                        t_hit = t;
                    }
                }
            }
        }

        // caps; skipped when the ray is parallel to the cap planes
        let d_dot_v = d.dot(v);
        if d_dot_v.abs() > EPSILON {
            let top = self.base + v * self.height;
            for &center in &[self.base, top] {
                let t = (center - ray.origin).dot(v) / d_dot_v;
                if t > EPSILON && t < t_hit {
                    let offset = ray.along(t) - center;
                    let radial = offset - v * offset.dot(v);
                    if radial.magnitude() <= self.radius {
                        t_hit = t;
                    }
                }
            }
        }

        t_hit
    }

    /// The surface normal at a hit point: radial on the lateral surface,
    /// axial on the caps.
    pub fn normal_at(&self, point: Vector3) -> Vector3 {
        let proj = (point - self.base).dot(self.axis);
        if proj > 0. && proj < self.height {
            let on_axis = self.base + self.axis * proj;
            (point - on_axis)
                .normalize()
                .expect("lateral hit point lies on the cylinder axis")
        } else if proj >= self.height {
            self.axis
        } else {
            -self.axis
        }
    }
}
