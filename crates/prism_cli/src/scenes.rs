//! Built-in scene presets.

use std::path::Path;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use prism_core::load_obj;
use prism_renderer::{Camera, Color, Material, Scene, Sphere, TriangleMesh, Vec3};

/// Number of presets [`build`] knows about.
pub const PRESET_COUNT: usize = 4;

/// Build preset `index`, loading meshes from `models`.
///
/// Meshes get their own BVH when `use_bvh` is set. The scene-level BVH is
/// left to the caller.
pub fn build(index: usize, models: &Path, use_bvh: bool) -> Result<Scene> {
    let scene = match index {
        0 => showcase(models, use_bvh)?,
        1 => cornell_box(models, use_bvh)?,
        2 => rock(models, use_bvh)?,
        3 => spheres(),
        _ => bail!("unknown scene preset {index} (expected 0-{})", PRESET_COUNT - 1),
    };

    log::info!(
        "Scene {index}: {} primitives, {}x{}",
        scene.primitives().len(),
        scene.width,
        scene.height
    );
    Ok(scene)
}

fn square_scene(size: u32, position: Vec3) -> Scene {
    let mut scene = Scene::new(size, size, Camera::default());
    scene.camera = Camera::new(position, Vec3::NEG_Z, Vec3::Y, 90.0, scene.aspect_ratio());
    scene
}

fn mesh(models: &Path, file: &str, material: Arc<Material>, use_bvh: bool) -> Result<TriangleMesh> {
    let path = models.join(file);
    let data = load_obj(&path).with_context(|| format!("failed to load {}", path.display()))?;
    Ok(TriangleMesh::new(&data, material, use_bvh))
}

fn sphere(center: Vec3, radius: f32, material: Material) -> Sphere {
    Sphere::new(center, radius, Arc::new(material))
}

fn add_sky_lights(scene: &mut Scene) {
    scene.add(sphere(
        Vec3::new(-5.0, 25.0, 30.0),
        5.0,
        Material::light(Color::ONE, Color::splat(1.0)),
    ));
    scene.add(sphere(
        Vec3::new(5.0, 30.0, 40.0),
        3.0,
        Material::light(Color::ONE, Color::splat(0.8)),
    ));
}

/// One sphere of every material over a ground plane.
fn showcase(models: &Path, use_bvh: bool) -> Result<Scene> {
    let mut scene = square_scene(1200, Vec3::new(0.0, 2.0, 9.0));

    scene.add(sphere(Vec3::new(-2.0, 2.5, 2.8), 2.5, Material::metal(Color::splat(0.5))));
    scene.add(sphere(Vec3::new(5.0, 3.0, 1.0), 3.0, Material::transparent(1.5)));
    for (center, radius, color) in [
        (Vec3::new(-2.3, 0.5, 3.0), 0.5, Color::new(0.2, 0.3, 0.3)),
        (Vec3::new(2.5, 0.5, 2.5), 0.5, Color::new(1.0, 0.0, 0.0)),
        (Vec3::new(3.0, 2.5, -1.5), 2.5, Color::new(0.0, 0.0, 0.8)),
        (Vec3::new(-3.0, 0.3, 5.0), 0.3, Color::new(0.8, 0.0, 0.3)),
        (Vec3::new(3.0, 0.5, 4.0), 0.5, Color::new(0.5, 0.9, 0.9)),
        (Vec3::new(-4.5, 0.5, 4.0), 0.5, Color::new(0.0, 0.9, 0.3)),
    ] {
        scene.add(sphere(center, radius, Material::lambertian(color)));
    }

    let ground = Arc::new(Material::lambertian(Color::ONE));
    scene.add(mesh(models, "plane.obj", ground, use_bvh)?);
    add_sky_lights(&mut scene);

    Ok(scene)
}

/// Closed room lit by a ceiling panel, with a glass sphere.
fn cornell_box(models: &Path, use_bvh: bool) -> Result<Scene> {
    let mut scene = square_scene(800, Vec3::new(-0.2, 2.66, 2.3));

    let tinted = |color: Color, gain: f32| {
        Arc::new(Material::lambertian(color).with_kd(color * gain))
    };
    let red = tinted(Color::new(0.63, 0.065, 0.05), 1.5);
    let green = tinted(Color::new(0.14, 0.45, 0.091), 1.5);
    let white = tinted(Color::new(0.725, 0.71, 0.68), 1.1);
    let light = Arc::new(Material::light(Color::ONE, Color::splat(158.5)));
    let box_material = Arc::new(Material::lambertian(Color::ONE));

    for (file, material) in [
        ("back.obj", &white),
        ("ceiling.obj", &white),
        ("floor.obj", &white),
        ("shortbox.obj", &box_material),
        ("tallbox.obj", &box_material),
        ("left.obj", &red),
        ("right.obj", &green),
        ("light.obj", &light),
    ] {
        scene.add(mesh(models, file, Arc::clone(material), use_bvh)?);
    }
    scene.add(sphere(Vec3::new(0.5, 2.6, -1.3), 0.8, Material::transparent(1.5)));

    Ok(scene)
}

/// A single mesh under the sky lights.
fn rock(models: &Path, use_bvh: bool) -> Result<Scene> {
    let mut scene = square_scene(600, Vec3::new(0.0, 2.0, 2.0));

    let material = Arc::new(Material::lambertian(Color::ONE));
    scene.add(mesh(models, "rock.obj", material, use_bvh)?);
    add_sky_lights(&mut scene);

    Ok(scene)
}

/// Analytic spheres only; needs no model files.
fn spheres() -> Scene {
    let mut scene = square_scene(600, Vec3::new(0.0, 1.5, 6.0));

    scene.add(sphere(
        Vec3::new(0.0, -1000.0, 0.0),
        1000.0,
        Material::lambertian(Color::new(0.5, 0.5, 0.5)),
    ));
    scene.add(sphere(Vec3::new(-2.2, 1.0, 0.0), 1.0, Material::metal(Color::new(0.8, 0.6, 0.2))));
    scene.add(sphere(Vec3::new(0.0, 1.0, 0.0), 1.0, Material::transparent(1.5)));
    scene.add(sphere(
        Vec3::new(2.2, 1.0, 0.0),
        1.0,
        Material::lambertian(Color::new(0.1, 0.2, 0.5)),
    ));
    add_sky_lights(&mut scene);

    scene
}
