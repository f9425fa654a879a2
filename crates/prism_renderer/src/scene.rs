//! Scene container and nearest-hit dispatch.

use crate::{closest_hit, Bvh, Camera, Color, Hittable, Intersection, Primitive};
use prism_math::{Aabb, Ray};

/// Everything needed to render one image.
///
/// Owns the primitives and, once [`Scene::build_bvh`] has run, a BVH over
/// them. The scene is assembled up front and only read while rendering.
#[derive(Debug)]
pub struct Scene {
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
    /// Radiance returned by rays that hit nothing
    pub background: Color,
    /// Deepest recursion level that still scatters
    pub max_depth: u32,
    pub camera: Camera,
    primitives: Vec<Primitive>,
    bvh: Option<Bvh>,
}

impl Scene {
    /// Create an empty scene. The camera aspect should match `width / height`.
    pub fn new(width: u32, height: u32, camera: Camera) -> Self {
        Self {
            width,
            height,
            background: Color::ONE,
            max_depth: 10,
            camera,
            primitives: Vec::new(),
            bvh: None,
        }
    }

    /// Set background color.
    pub fn with_background(mut self, color: Color) -> Self {
        self.background = color;
        self
    }

    /// Set the recursion limit.
    pub fn with_max_depth(mut self, max_depth: u32) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// `width / height` as a float.
    pub fn aspect_ratio(&self) -> f32 {
        self.width as f32 / self.height.max(1) as f32
    }

    /// Add a primitive.
    ///
    /// Adding after [`Scene::build_bvh`] discards the index; call it again
    /// before rendering.
    pub fn add(&mut self, primitive: impl Into<Primitive>) {
        if self.bvh.take().is_some() {
            log::warn!("Primitive added after BVH build, index discarded");
        }
        self.primitives.push(primitive.into());
    }

    pub fn primitives(&self) -> &[Primitive] {
        &self.primitives
    }

    /// Build the scene-level BVH over the current primitives.
    pub fn build_bvh(&mut self) {
        self.bvh = Some(Bvh::new(&self.primitives));
    }

    pub fn has_bvh(&self) -> bool {
        self.bvh.is_some()
    }

    pub fn bvh(&self) -> Option<&Bvh> {
        self.bvh.as_ref()
    }

    /// Bounds of all primitives.
    pub fn bounds(&self) -> Aabb {
        self.primitives
            .iter()
            .fold(Aabb::EMPTY, |acc, p| Aabb::surrounding(&acc, &p.bounds()))
    }

    /// Nearest hit along `ray`, through the BVH when one was built.
    pub fn ray_cast(&self, ray: &Ray) -> Intersection<'_> {
        match &self.bvh {
            Some(bvh) => bvh.ray_cast(&self.primitives, ray),
            None => self.linear_scan(ray),
        }
    }

    /// Nearest hit by testing every primitive. Ties keep the first added.
    pub fn linear_scan(&self, ray: &Ray) -> Intersection<'_> {
        closest_hit(&self.primitives, ray)
    }
}

impl Default for Scene {
    /// 1280x960 with the default camera and no primitives.
    fn default() -> Self {
        Self::new(1280, 960, Camera::default())
    }
}
