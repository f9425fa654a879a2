//! Sphere primitive for ray tracing.

use std::f32::consts::PI;
use std::sync::Arc;

use crate::{
    hittable::{Hittable, Intersection, SurfaceProperties},
    Color, Material,
};
use prism_math::{Aabb, Ray, Vec2, Vec3};

/// An analytic sphere primitive.
#[derive(Debug)]
pub struct Sphere {
    center: Vec3,
    radius: f32,
    material: Arc<Material>,
    bbox: Aabb,
}

impl Sphere {
    /// Create a new sphere. Negative radii are clamped to zero.
    pub fn new(center: Vec3, radius: f32, material: Arc<Material>) -> Self {
        let radius = radius.max(0.0);
        let rvec = Vec3::splat(radius);
        let bbox = Aabb::from_points(center - rvec, center + rvec);

        Self {
            center,
            radius,
            material,
            bbox,
        }
    }

    pub fn center(&self) -> Vec3 {
        self.center
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn material(&self) -> &Arc<Material> {
        &self.material
    }

    /// Get the UV coordinates for a point on the unit sphere.
    fn get_sphere_uv(p: Vec3) -> Vec2 {
        // theta: angle down from +Y
        // phi: angle around Y axis from +X
        let theta = (-p.y).clamp(-1.0, 1.0).acos();
        let phi = (-p.z).atan2(p.x) + PI;

        Vec2::new(phi / (2.0 * PI), theta / PI)
    }
}

/// Real roots of `a t^2 + b t + c`, smallest first.
///
/// A non-positive discriminant counts as no intersection, so tangent rays
/// miss.
fn solve_quadratic(a: f32, b: f32, c: f32) -> Option<(f32, f32)> {
    let discr = b * b - 4.0 * a * c;
    if discr <= 0.0 {
        return None;
    }

    let q = if b > 0.0 {
        -0.5 * (b + discr.sqrt())
    } else {
        -0.5 * (b - discr.sqrt())
    };
    let x0 = q / a;
    let x1 = c / q;

    Some(if x0 > x1 { (x1, x0) } else { (x0, x1) })
}

impl Hittable for Sphere {
    fn ray_cast<'a>(&'a self, ray: &Ray) -> Intersection<'a> {
        let l = ray.origin() - self.center;
        let a = ray.direction().length_squared();
        let b = 2.0 * ray.direction().dot(l);
        let c = l.length_squared() - self.radius * self.radius;

        let Some((t0, t1)) = solve_quadratic(a, b, c) else {
            return Intersection::NONE;
        };

        // Origin inside the sphere: take the far root
        let t = if t0 < 0.0 { t1 } else { t0 };
        if t < 0.0 {
            return Intersection::NONE;
        }

        let coords = ray.at(t);
        let normal = (coords - self.center).normalize_or_zero();

        Intersection {
            happened: true,
            coords,
            normal,
            uv: Self::get_sphere_uv(normal),
            distance: t,
            object: Some(self as &dyn Hittable),
            material: Some(self.material.as_ref()),
        }
    }

    fn bounds(&self) -> Aabb {
        self.bbox
    }

    fn surface_properties(&self, hit: &Intersection<'_>) -> SurfaceProperties {
        SurfaceProperties {
            normal: (hit.coords - self.center).normalize_or_zero(),
            st: hit.uv,
        }
    }

    fn diffuse_color(&self, _st: Vec2) -> Color {
        self.material.color()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_sphere() -> Sphere {
        Sphere::new(Vec3::ZERO, 1.0, Arc::new(Material::default()))
    }

    #[test]
    fn test_sphere_hit() {
        let sphere = unit_sphere();
        let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::new(0.0, 0.0, -1.0));

        let hit = sphere.ray_cast(&ray);
        assert!(hit.happened);
        assert!((hit.distance - 4.0).abs() < 1e-5);
        assert!((hit.normal - Vec3::Z).length() < 1e-5);
        assert!((hit.coords - Vec3::Z).length() < 1e-5);
        assert!(hit.material.is_some());
    }

    #[test]
    fn test_sphere_miss() {
        let sphere = unit_sphere();

        // Ray pointing away from sphere
        let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::Z);
        assert!(!sphere.ray_cast(&ray).happened);

        // Ray passing beside it
        let ray = Ray::new(Vec3::new(2.0, 0.0, 5.0), Vec3::NEG_Z);
        assert!(!sphere.ray_cast(&ray).happened);
    }

    #[test]
    fn test_sphere_tangent_ray_misses() {
        let sphere = unit_sphere();
        let ray = Ray::new(Vec3::new(1.0, 0.0, 5.0), Vec3::NEG_Z);
        assert!(!sphere.ray_cast(&ray).happened);
    }

    #[test]
    fn test_sphere_hit_from_inside_takes_far_side() {
        let sphere = unit_sphere();
        let ray = Ray::new(Vec3::ZERO, Vec3::X);

        let hit = sphere.ray_cast(&ray);
        assert!(hit.happened);
        assert!((hit.distance - 1.0).abs() < 1e-5);
        assert!((hit.normal - Vec3::X).length() < 1e-5);
    }

    #[test]
    fn test_zero_radius_sphere_never_hits() {
        let sphere = Sphere::new(Vec3::ZERO, 0.0, Arc::new(Material::default()));
        let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::NEG_Z);
        assert!(!sphere.ray_cast(&ray).happened);
    }

    #[test]
    fn test_sphere_bounds() {
        let sphere = Sphere::new(Vec3::new(1.0, 2.0, 3.0), 0.5, Arc::new(Material::default()));
        let bounds = sphere.bounds();
        assert_eq!(bounds.min, Vec3::new(0.5, 1.5, 2.5));
        assert_eq!(bounds.max, Vec3::new(1.5, 2.5, 3.5));
        assert_eq!(bounds.centroid(), Vec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_sphere_surface_and_color() {
        let material = Arc::new(Material::lambertian(Color::new(0.2, 0.3, 0.4)));
        let sphere = Sphere::new(Vec3::ZERO, 2.0, material);
        let ray = Ray::new(Vec3::new(0.0, 5.0, 0.0), Vec3::NEG_Y);

        let hit = sphere.ray_cast(&ray);
        let props = sphere.surface_properties(&hit);
        assert!((props.normal - Vec3::Y).length() < 1e-5);
        assert_eq!(sphere.diffuse_color(props.st), Color::new(0.2, 0.3, 0.4));
    }
}
