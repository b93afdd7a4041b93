use crate::{
    math::{reflect, Ray, Vector3},
    scene::{Scene, EPSILON},
};

/// A light source.
///
/// The set of light kinds is closed, so shading matches on it exhaustively;
/// adding a kind forces every match site to handle it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Light {
    /// Uniform illumination that reaches every surface unconditionally.
    Ambient { intensity: f64 },

    /// A light that emits in all directions from a position in the scene.
    Point { intensity: f64, position: Vector3 },

    /// A light infinitely far away, shining along one fixed direction for
    /// every point in the scene. The direction points *toward* the light.
    Directional { intensity: f64, direction: Vector3 },
}

/// Accumulate the scalar lighting intensity at a surface point.
///
/// Point and directional lights are skipped entirely when any scene object
/// occludes them (hard shadows). Diffuse contributes when the light reaches
/// the front face; the Phong highlight contributes when the material has a
/// specular exponent and the reflected light vector faces the viewer. The
/// result is unclamped and may exceed 1.
pub fn compute_lighting(
    scene: &Scene,
    point: Vector3,
    normal: Vector3,
    view: Vector3,
    specular: Option<f64>,
) -> f64 {
    let mut intensity = 0.;

    for light in scene.lights.iter() {
        let (light_intensity, l, shadow_t_max) = match *light {
            Light::Ambient { intensity: ambient } => {
                intensity += ambient;
                continue;
            }
            // a point light sits at parametric distance 1 along its own
            // unnormalized direction vector
            Light::Point {
                intensity,
                position,
            } => (intensity, position - point, 1.),
            Light::Directional {
                intensity,
                direction,
            } => (intensity, direction, f64::INFINITY),
        };

        let shadow_ray = Ray::new(point, l);
        if scene
            .closest_intersection(&shadow_ray, EPSILON, shadow_t_max)
            .is_some()
        {
            continue;
        }

        let n_dot_l = normal.dot(l);
        if n_dot_l > 0. {
            intensity += light_intensity * n_dot_l / (normal.magnitude() * l.magnitude());
        }

        if let Some(exponent) = specular {
            let r = reflect(l, normal);
            let r_dot_v = r.dot(view);
            if r_dot_v > 0. {
                intensity +=
                    light_intensity * (r_dot_v / (r.magnitude() * view.magnitude())).powf(exponent);
            }
        }
    }

    intensity
}
