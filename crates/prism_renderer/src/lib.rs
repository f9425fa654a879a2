//! Prism Renderer - CPU Path Tracing
//!
//! A recursive Monte Carlo path tracer with a median-split BVH.
//!
//! The scene owns its primitives and, optionally, a bounding volume
//! hierarchy over them. The integrator walks one path per call, dispatching
//! on the four material kinds; the renderer averages samples per pixel and
//! spreads buckets of pixels over the rayon thread pool.

mod bucket;
mod bvh;
mod camera;
mod hittable;
mod integrator;
mod material;
mod primitive;
mod renderer;
mod sampling;
mod scene;
mod sphere;
mod triangle;

pub use bucket::{generate_buckets, render_bucket, Bucket, BucketResult, DEFAULT_BUCKET_SIZE};
pub use bvh::{Bvh, BvhNode, BvhStats};
pub use camera::Camera;
pub use hittable::{closest_hit, Hittable, Intersection, SurfaceProperties};
pub use integrator::{offset_origin, radiance, EPSILON};
pub use material::{fresnel, reflect, refract, Color, Material, MaterialKind};
pub use primitive::Primitive;
pub use renderer::{
    color_to_rgb8, render, render_pixel, ImageBuffer, OutputError, OutputResult, RenderConfig,
};
pub use sampling::{gen_f32, gen_signed, pixel_rng};
pub use scene::Scene;
pub use sphere::Sphere;
pub use triangle::{Triangle, TriangleMesh};

/// Re-export Vec3 and common math types from prism_math
pub use prism_math::{Aabb, Interval, Ray, Vec2, Vec3};
