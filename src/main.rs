use std::time::Instant;

use log::{info, warn};

use whitted::{
    camera::Camera,
    error::Result,
    lighting::Light,
    material::{Color, Material},
    math::Vector3,
    object::{Cylinder, Mesh, Sphere},
    scene::Scene,
};

fn main() -> Result<()> {
    env_logger::init();

    info!("initializing scene");
    let start_time = Instant::now();

    let mut scene = Scene {
        camera: Camera {
            vw: 300,
            vh: 300,
            ..Default::default()
        },
        ..Default::default()
    };

    // a shiny red reflective sphere
    scene.spheres.push(Sphere::new(
        Vector3::new(0.5, 0., 4.),
        1.,
        Material {
            color: Color::new(255., 0., 0.),
            specular: Some(500.),
            reflective: 0.8,
            ..Default::default()
        },
    ));

    // a dark blue refractive cylinder
    scene.cylinders.push(Cylinder::new(
        Vector3::new(-0.5, -1., 3.),
        Vector3::new(0., 1., 0.),
        2.,
        0.8,
        Material {
            color: Color::new(0., 0., 139.),
            specular: Some(50.),
            transparency: 0.7,
            ..Default::default()
        },
    )?);

    // the white bunny, scaled up and pushed behind the cylinder; a missing
    // model file downgrades to a bunnyless render
    match Mesh::from_obj(
        "assets/bunny.obj",
        Material {
            color: Color::white(),
            specular: Some(10.),
            ..Default::default()
        },
    ) {
        Ok(mut mesh) => {
            mesh.scale(3.5);
            mesh.shift(Vector3::new(-0.5, -1., 5.));
            scene.mesh = mesh;
        }
        Err(err) => warn!("proceeding without the bunny mesh: {}", err),
    }

    scene.lights.push(Light::Ambient { intensity: 0.2 });
    scene.lights.push(Light::Point {
        intensity: 0.6,
        position: Vector3::new(2., 1., 0.),
    });
    scene.lights.push(Light::Directional {
        intensity: 0.2,
        direction: Vector3::new(1., 4., 4.),
    });

    scene.render_to("render.png", image::ImageFormat::Png)?;

    info!(
        "operation complete in {:.2}s",
        start_time.elapsed().as_secs_f64()
    );
    Ok(())
}
