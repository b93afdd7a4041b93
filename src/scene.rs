use log::info;
use rayon::prelude::*;

use crate::{
    camera::Camera,
    error::Result,
    lighting::{compute_lighting, Light},
    material::Color,
    math::{reflect, refract, Ray},
    object::{Cylinder, HitObject, Mesh, Sphere},
};

/// The self-intersection bias: secondary and shadow rays only count hits
/// strictly beyond this parametric distance from their origin.
pub const EPSILON: f64 = 1e-3;

/// Refractive indices for the two media transparent surfaces separate.
const IOR_AIR: f64 = 1.0;
const IOR_GLASS: f64 = 1.5;

/// Scene options. Defaults are provided.
#[derive(Debug, Clone)]
pub struct SceneOptions {
    /// The maximum number of reflection/refraction bounces from an initial
    /// ray.
    pub recursion_depth: u32,

    /// The color rays that escape the scene resolve to.
    pub background: Color,
}

impl Default for SceneOptions {
    fn default() -> Self {
        Self {
            recursion_depth: 3,
            background: Color::black(),
        }
    }
}

/// A scene: fixed collections of primitives and lights, a camera to render
/// from, and rendering options.
///
/// Constructed once before rendering and read-only afterward, so pixels can
/// be traced in parallel without any shared mutable state.
#[derive(Default)]
pub struct Scene {
    pub spheres: Vec<Sphere>,
    pub cylinders: Vec<Cylinder>,
    pub mesh: Mesh,
    pub lights: Vec<Light>,
    pub camera: Camera,
    pub options: SceneOptions,
}

impl Scene {
    /// Find the nearest primitive struck by a ray within `(t_min, t_max)`.
    ///
    /// Spheres and cylinders are tested brute force; triangles go through
    /// the mesh's BVH. For spheres both quadratic roots are considered, so
    /// a ray that starts inside one still finds its far wall.
    pub fn closest_intersection(
        &self,
        ray: &Ray,
        t_min: f64,
        t_max: f64,
    ) -> Option<(HitObject, f64)> {
        let mut closest_t = f64::INFINITY;
        let mut closest = None;

        for sphere in self.spheres.iter() {
            let (t1, t2) = sphere.intersect(ray);
            if t_min < t1 && t1 < t_max && t1 < closest_t {
                closest_t = t1;
                closest = Some(HitObject::Sphere(sphere));
            }
            if t_min < t2 && t2 < t_max && t2 < closest_t {
                closest_t = t2;
                closest = Some(HitObject::Sphere(sphere));
            }
        }

        for cylinder in self.cylinders.iter() {
            let t = cylinder.intersect(ray);
            if t_min < t && t < t_max && t < closest_t {
                closest_t = t;
                closest = Some(HitObject::Cylinder(cylinder));
            }
        }

        if let Some((index, t)) = self.mesh.intersect(ray, t_min, t_max.min(closest_t)) {
            closest_t = t;
            closest = Some(HitObject::Triangle(&self.mesh.triangles()[index]));
        }

        closest.map(|object| (object, closest_t))
    }

    /// Trace a ray into the scene, recursing for reflection and refraction
    /// until `depth` runs out.
    pub fn trace_ray(&self, ray: &Ray, t_min: f64, t_max: f64, depth: u32) -> Color {
        let (object, t) = match self.closest_intersection(ray, t_min, t_max) {
            Some(hit) => hit,
            None => return self.options.background,
        };

        let point = ray.along(t);
        let normal = object.normal_at(point);
        let view = -ray.direction;
        let material = object.material();

        let lighting = compute_lighting(self, point, normal, view, material.specular);
        let local_color = material.color * lighting;

        if depth == 0 || (material.reflective <= 0. && material.transparency <= 0.) {
            return local_color;
        }

        let mut color = local_color;

        if material.reflective > 0. {
            let reflected = reflect(view, normal)
                .normalize()
                .expect("reflection of a nonzero view vector is nonzero");
            let reflected_color = self.trace_ray(
                &Ray::new(point, reflected),
                EPSILON,
                f64::INFINITY,
                depth - 1,
            );
            color = color * (1. - material.reflective)
                + reflected_color * material.reflective;
        }

        if material.transparency > 0. {
            let incident = ray
                .direction
                .normalize()
                .expect("ray directions are nonzero");

            // flip the normal and the index ratio when exiting the medium
            let refracted = if incident.dot(normal) < 0. {
                refract(incident, normal, IOR_AIR, IOR_GLASS)
            } else {
                refract(incident, -normal, IOR_GLASS, IOR_AIR)
            };

            // total internal reflection transmits nothing
            let transmitted_color = match refracted {
                Some(direction) => self.trace_ray(
                    &Ray::new(point, direction),
                    EPSILON,
                    f64::INFINITY,
                    depth - 1,
                ),
                None => Color::black(),
            };
            color = color * (1. - material.transparency)
                + transmitted_color * material.transparency;
        }

        color
    }

    /// Trace out a pixel, where top-left of the image is (0, 0).
    /// This function is run many times in parallel.
    pub fn trace_pixel(&self, x: i32, y: i32) -> Color {
        let ray = Ray::new(self.camera.origin, self.camera.direction_at(x, y));

        // t = 1 is the projection plane, so nothing behind it is visible
        self.trace_ray(&ray, 1., f64::INFINITY, self.options.recursion_depth)
    }

    /// Render the image out as a list of Colors, one scanline after the
    /// next. Every pixel's ray tree is independent, so the loop is handed
    /// to rayon's parallel iterator wholesale.
    pub fn render(&self) -> Vec<Color> {
        let (vw, vh) = (self.camera.vw, self.camera.vh);
        info!("rendering a {}x{} frame", vw, vh);

        (0..(vw * vh))
            .into_par_iter()
            .map(|i| self.trace_pixel(i % vw, i / vw))
            .collect::<Vec<_>>()
    }

    /// Render the image out to the desired save file. Colors are rounded
    /// and clamped to displayable pixels here, and nowhere earlier.
    pub fn render_to(&self, path: &str, format: image::ImageFormat) -> Result<()> {
        let rendered = self.render();

        let mut imgbuf: image::RgbImage =
            image::ImageBuffer::new(self.camera.vw as u32, self.camera.vh as u32);

        for (i, color) in rendered.into_iter().enumerate() {
            imgbuf.put_pixel(
                i as u32 % self.camera.vw as u32,
                i as u32 / self.camera.vw as u32,
                color.to_rgb8(),
            );
        }

        imgbuf.save_with_format(path, format)?;
        Ok(())
    }
}
