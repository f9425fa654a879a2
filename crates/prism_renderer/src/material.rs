//! Surface materials and the optics helpers the integrator uses.

use prism_math::Vec3;

/// Color type alias (RGB values typically 0-1)
pub type Color = Vec3;

/// How light interacts with a surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MaterialKind {
    /// Diffuse surface, scatters one jittered ray around the normal
    Lambertian,
    /// Dielectric, splits into Fresnel-weighted reflection and refraction
    Transparent,
    /// Perfect mirror tinted by the surface color
    Metal,
    /// Emitter, ends the path
    Light,
}

/// Material shared (read-only) by any number of primitives.
#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    kind: MaterialKind,
    /// Base color returned by the primitive's diffuse color
    color: Color,
    /// Index of refraction (only used by `Transparent`)
    pub ior: f32,
    /// Specular exponent, carried for shading extensions
    pub specular_exponent: f32,
    /// Reflectance scale for `Metal`
    pub kr: f32,
    /// Diffuse weight for `Lambertian`, emission for `Light`
    pub kd: Color,
}

impl Material {
    /// Create a material of the given kind and base color with default
    /// coefficients.
    pub fn new(kind: MaterialKind, color: Color) -> Self {
        Self {
            kind,
            color,
            ior: 1.5,
            specular_exponent: 16.0,
            kr: 0.9,
            kd: Color::splat(0.6),
        }
    }

    pub fn lambertian(color: Color) -> Self {
        Self::new(MaterialKind::Lambertian, color)
    }

    pub fn transparent(ior: f32) -> Self {
        Self::new(MaterialKind::Transparent, Color::ONE).with_ior(ior)
    }

    pub fn metal(color: Color) -> Self {
        Self::new(MaterialKind::Metal, color)
    }

    /// Emissive material; the emitted radiance is `color * emission`.
    pub fn light(color: Color, emission: Color) -> Self {
        Self::new(MaterialKind::Light, color).with_kd(emission)
    }

    pub fn with_ior(mut self, ior: f32) -> Self {
        self.ior = ior;
        self
    }

    pub fn with_kr(mut self, kr: f32) -> Self {
        self.kr = kr;
        self
    }

    pub fn with_kd(mut self, kd: Color) -> Self {
        self.kd = kd;
        self
    }

    #[inline]
    pub fn kind(&self) -> MaterialKind {
        self.kind
    }

    #[inline]
    pub fn color(&self) -> Color {
        self.color
    }
}

impl Default for Material {
    fn default() -> Self {
        Self::lambertian(Color::ONE)
    }
}

// =============================================================================
// Helper functions
// =============================================================================

/// Reflect a vector about a normal.
#[inline]
pub fn reflect(v: Vec3, n: Vec3) -> Vec3 {
    v - 2.0 * v.dot(n) * n
}

/// Refract a unit vector through a surface with index of refraction `ior`.
///
/// `n` is the outward normal; the side the ray arrives from is taken from
/// the sign of `dot(v, n)`. Returns `Vec3::ZERO` on total internal
/// reflection.
pub fn refract(v: Vec3, n: Vec3, ior: f32) -> Vec3 {
    let mut cosi = v.dot(n).clamp(-1.0, 1.0);
    let (mut etai, mut etat) = (1.0, ior);
    let mut normal = n;
    if cosi < 0.0 {
        cosi = -cosi;
    } else {
        std::mem::swap(&mut etai, &mut etat);
        normal = -n;
    }

    let eta = etai / etat;
    let k = 1.0 - eta * eta * (1.0 - cosi * cosi);
    if k < 0.0 {
        Vec3::ZERO
    } else {
        eta * v + (eta * cosi - k.sqrt()) * normal
    }
}

/// Fraction of light reflected at a dielectric boundary.
///
/// Unpolarized average of the s- and p-polarized Fresnel coefficients.
/// Returns 1 on total internal reflection.
pub fn fresnel(v: Vec3, n: Vec3, ior: f32) -> f32 {
    let cosi = v.dot(n).clamp(-1.0, 1.0);
    let (mut etai, mut etat) = (1.0, ior);
    if cosi > 0.0 {
        std::mem::swap(&mut etai, &mut etat);
    }

    let sint = etai / etat * (1.0 - cosi * cosi).max(0.0).sqrt();
    if sint >= 1.0 {
        return 1.0;
    }

    let cost = (1.0 - sint * sint).max(0.0).sqrt();
    let cosi = cosi.abs();
    let rs = (etat * cosi - etai * cost) / (etat * cosi + etai * cost);
    let rp = (etai * cosi - etat * cost) / (etai * cosi + etat * cost);
    (rs * rs + rp * rp) / 2.0
}
