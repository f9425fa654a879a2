//! Simple path tracer example.
//!
//! Renders a grid of spheres twice, with and without the BVH, checks that
//! both images match and saves the result as PNG.

use std::sync::Arc;
use std::time::Instant;

use prism_renderer::{
    render, Camera, Color, Material, RenderConfig, Scene, Sphere, Vec3,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Prism Path Tracer - Simple Example");
    println!("==================================");

    let start = Instant::now();
    let mut scene = build_scene();
    println!("Scene built in {:?} ({} primitives)", start.elapsed(), scene.primitives().len());

    let config = RenderConfig::default().with_samples(16).with_seed(1);

    println!(
        "Rendering {}x{} @ {} spp without BVH...",
        scene.width, scene.height, config.samples_per_pixel
    );
    let start = Instant::now();
    let linear = render(&scene, &config);
    println!("Rendered in {:?}", start.elapsed());

    scene.build_bvh();
    println!("Rendering with BVH...");
    let start = Instant::now();
    let indexed = render(&scene, &config);
    println!("Rendered in {:?}", start.elapsed());

    if linear.pixels != indexed.pixels {
        return Err("BVH and linear renders differ".into());
    }

    let filename = "simple_render.png";
    indexed.save_png(filename)?;
    println!("Saved to {}", filename);

    Ok(())
}

fn build_scene() -> Scene {
    let mut scene =
        Scene::new(640, 360, Camera::default()).with_background(Color::new(0.6, 0.75, 1.0));
    scene.camera = Camera::new(
        Vec3::new(0.0, 3.0, 12.0),
        Vec3::new(0.0, -0.2, -1.0),
        Vec3::Y,
        50.0,
        scene.aspect_ratio(),
    );

    // Ground
    scene.add(Sphere::new(
        Vec3::new(0.0, -1000.0, 0.0),
        1000.0,
        Arc::new(Material::lambertian(Color::new(0.5, 0.5, 0.5))),
    ));

    // Three main spheres
    scene.add(Sphere::new(
        Vec3::new(0.0, 1.0, 0.0),
        1.0,
        Arc::new(Material::transparent(1.5)),
    ));
    scene.add(Sphere::new(
        Vec3::new(-2.5, 1.0, 0.0),
        1.0,
        Arc::new(Material::lambertian(Color::new(0.4, 0.2, 0.1))),
    ));
    scene.add(Sphere::new(
        Vec3::new(2.5, 1.0, 0.0),
        1.0,
        Arc::new(Material::metal(Color::new(0.7, 0.6, 0.5))),
    ));

    // Small spheres on a grid, one shared material per kind
    let materials = [
        Arc::new(Material::lambertian(Color::new(0.8, 0.2, 0.2))),
        Arc::new(Material::metal(Color::splat(0.8)).with_kr(0.7)),
        Arc::new(Material::lambertian(Color::new(0.2, 0.6, 0.3))),
        Arc::new(Material::transparent(1.33)),
    ];
    for i in -5i32..5 {
        for j in -4i32..2 {
            let center = Vec3::new(i as f32 + 0.3 * (j % 2) as f32, 0.2, j as f32 - 0.5);
            if center.distance(Vec3::new(0.0, 0.2, 0.0)) < 1.2 {
                continue;
            }
            let material = &materials[(i + j).rem_euclid(4) as usize];
            scene.add(Sphere::new(center, 0.2, Arc::clone(material)));
        }
    }

    // Key light
    scene.add(Sphere::new(
        Vec3::new(-4.0, 8.0, 4.0),
        1.5,
        Arc::new(Material::light(Color::ONE, Color::splat(4.0))),
    ));

    scene
}
