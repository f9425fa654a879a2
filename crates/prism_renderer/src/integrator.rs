//! Recursive light transport.
//!
//! [`radiance`] follows one path through the scene. Each call resolves the
//! nearest hit and dispatches on the material kind; scattering kinds spawn
//! new rays at `depth + 1` until the scene's `max_depth` is exceeded.

use crate::{fresnel, gen_signed, reflect, refract, Color, MaterialKind, Scene};
use prism_math::{Ray, Vec3};
use rand::RngCore;

/// Distance spawned rays are pushed off the surface along the normal.
pub const EPSILON: f32 = 1e-4;

/// Origin for a ray leaving `p` in direction `dir`.
///
/// Moves `p` by [`EPSILON`] along the normal, to the side `dir` travels
/// into, so the new ray does not re-hit the surface it starts on.
#[inline]
pub fn offset_origin(p: Vec3, normal: Vec3, dir: Vec3) -> Vec3 {
    if dir.dot(normal) < 0.0 {
        p - normal * EPSILON
    } else {
        p + normal * EPSILON
    }
}

/// Estimate the radiance arriving along `ray`.
///
/// Returns black once `depth` exceeds `scene.max_depth` and the background
/// color when nothing is hit. Random draws (diffuse scattering only) come
/// from `rng`.
pub fn radiance(scene: &Scene, ray: &Ray, depth: u32, rng: &mut dyn RngCore) -> Color {
    if depth > scene.max_depth {
        return Color::ZERO;
    }

    let hit = scene.ray_cast(ray);
    let (Some(object), Some(material)) = (hit.object, hit.material) else {
        return scene.background;
    };

    let surface = object.surface_properties(&hit);
    let (p, n) = (hit.coords, surface.normal);

    match material.kind() {
        MaterialKind::Light => object.diffuse_color(surface.st) * material.kd,

        // Every child ray would come back black
        _ if depth >= scene.max_depth => Color::ZERO,

        MaterialKind::Transparent => {
            let dir = ray.direction().normalize_or_zero();
            let reflect_dir = reflect(dir, n).normalize_or_zero();
            let refract_dir = refract(dir, n, material.ior).normalize_or_zero();

            let reflect_color = radiance(
                scene,
                &Ray::new(offset_origin(p, n, reflect_dir), reflect_dir),
                depth + 1,
                rng,
            );
            // Total internal reflection leaves nothing to refract
            let refract_color = if refract_dir == Vec3::ZERO {
                Color::ZERO
            } else {
                radiance(
                    scene,
                    &Ray::new(offset_origin(p, n, refract_dir), refract_dir),
                    depth + 1,
                    rng,
                )
            };

            let kr = fresnel(dir, n, material.ior);
            reflect_color * kr + refract_color * (1.0 - kr)
        }

        MaterialKind::Metal => {
            let reflect_dir = reflect(ray.direction(), n);
            let reflected = radiance(
                scene,
                &Ray::new(offset_origin(p, n, reflect_dir), reflect_dir),
                depth + 1,
                rng,
            );
            object.diffuse_color(surface.st) * reflected * material.kr
        }

        MaterialKind::Lambertian => {
            let jitter = Vec3::new(gen_signed(rng), gen_signed(rng), gen_signed(rng));
            let diffuse_dir = (n + jitter).try_normalize().unwrap_or(n);
            let incoming = radiance(
                scene,
                &Ray::new(offset_origin(p, n, diffuse_dir), diffuse_dir),
                depth + 1,
                rng,
            );
            object.diffuse_color(surface.st) * incoming * material.kd
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Camera, Material, Sphere, Triangle};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::sync::Arc;

    fn scene_with(material: Material, background: Color, max_depth: u32) -> Scene {
        let mut scene = Scene::new(4, 4, Camera::default())
            .with_background(background)
            .with_max_depth(max_depth);
        scene.add(Sphere::new(Vec3::new(0.0, 0.0, -3.0), 1.0, Arc::new(material)));
        scene
    }

    fn forward() -> Ray {
        Ray::new(Vec3::ZERO, Vec3::NEG_Z)
    }

    fn assert_color_near(a: Color, b: Color, tol: f32) {
        assert!((a - b).abs().max_element() <= tol, "{a:?} != {b:?}");
    }

    #[test]
    fn test_offset_origin_side() {
        let p = Vec3::new(1.0, 2.0, 3.0);
        assert_eq!(offset_origin(p, Vec3::Y, Vec3::Y), p + Vec3::Y * EPSILON);
        assert_eq!(offset_origin(p, Vec3::Y, Vec3::NEG_Y), p - Vec3::Y * EPSILON);
    }

    #[test]
    fn test_miss_returns_background() {
        let background = Color::new(0.1, 0.2, 0.3);
        let scene = scene_with(Material::default(), background, 10);
        let mut rng = StdRng::seed_from_u64(0);

        let away = Ray::new(Vec3::ZERO, Vec3::Z);
        assert_eq!(radiance(&scene, &away, 0, &mut rng), background);
    }

    #[test]
    fn test_past_max_depth_is_black() {
        let scene = scene_with(Material::light(Color::ONE, Color::ONE), Color::ONE, 3);
        let mut rng = StdRng::seed_from_u64(0);

        assert_eq!(radiance(&scene, &forward(), 4, &mut rng), Color::ZERO);
        assert_eq!(radiance(&scene, &Ray::new(Vec3::ZERO, Vec3::Z), 4, &mut rng), Color::ZERO);
    }

    #[test]
    fn test_max_depth_zero_stops_scattering() {
        for material in [
            Material::lambertian(Color::ONE),
            Material::metal(Color::ONE),
            Material::transparent(1.5),
        ] {
            let scene = scene_with(material, Color::ONE, 0);
            let mut rng = StdRng::seed_from_u64(9);
            let untouched = rng.clone();

            assert_eq!(radiance(&scene, &forward(), 0, &mut rng), Color::ZERO);
            // No diffuse sample was drawn
            assert_eq!(rng.next_u64(), untouched.clone().next_u64());
        }
    }

    #[test]
    fn test_light_at_depth_zero() {
        let emission = Color::new(2.0, 3.0, 4.0);
        let color = Color::new(0.5, 0.5, 1.0);
        let scene = scene_with(Material::light(color, emission), Color::ZERO, 0);
        let mut rng = StdRng::seed_from_u64(0);

        assert_eq!(radiance(&scene, &forward(), 0, &mut rng), color * emission);
    }

    #[test]
    fn test_metal_reflects_background() {
        let background = Color::new(1.0, 0.5, 0.25);
        let tint = Color::splat(0.5);
        let scene = scene_with(Material::metal(tint).with_kr(0.8), background, 10);
        let mut rng = StdRng::seed_from_u64(0);

        // Head-on: the mirror ray returns straight to the empty sky behind
        let color = radiance(&scene, &forward(), 0, &mut rng);
        assert_color_near(color, tint * background * 0.8, 1e-6);
    }

    #[test]
    fn test_glass_sphere_passes_background_through() {
        let background = Color::new(0.3, 0.6, 0.9);
        let scene = scene_with(Material::transparent(1.5), background, 10);
        let mut rng = StdRng::seed_from_u64(0);

        // Reflected and transmitted shares both end in the background
        let color = radiance(&scene, &forward(), 0, &mut rng);
        assert_color_near(color, background, 1e-3);
    }

    #[test]
    fn test_lambertian_is_bounded_and_seeded() {
        let color = Color::new(1.0, 0.5, 0.0);
        let scene = scene_with(Material::lambertian(color), Color::ONE, 10);

        let mut a = StdRng::seed_from_u64(5);
        let mut b = StdRng::seed_from_u64(5);
        let first = radiance(&scene, &forward(), 0, &mut a);
        let second = radiance(&scene, &forward(), 0, &mut b);

        assert_eq!(first, second);
        assert!(first.cmpge(Color::ZERO).all());
        assert!(first.cmple(color * 0.6 + Color::splat(1e-6)).all());
    }

    #[test]
    fn test_lambertian_floor_under_open_sky() {
        // Upward-facing quad; any scattered ray escapes to the sky
        let mut scene = Scene::new(4, 4, Camera::default()).with_background(Color::ONE);
        let material = Arc::new(Material::lambertian(Color::new(0.5, 0.25, 1.0)));
        let (a, b, c, d) = (
            Vec3::new(-10.0, -1.0, 10.0),
            Vec3::new(10.0, -1.0, 10.0),
            Vec3::new(10.0, -1.0, -10.0),
            Vec3::new(-10.0, -1.0, -10.0),
        );
        scene.add(Triangle::from_positions(a, b, c, Arc::clone(&material)));
        scene.add(Triangle::from_positions(a, c, d, material));

        let mut rng = StdRng::seed_from_u64(11);
        let down = Ray::new(Vec3::ZERO, Vec3::new(0.1, -1.0, -0.2));
        for _ in 0..16 {
            let color = radiance(&scene, &down, 0, &mut rng);
            assert_color_near(color, Color::new(0.5, 0.25, 1.0) * 0.6, 1e-6);
        }
    }
}
