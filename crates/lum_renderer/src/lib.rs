//! Lumen Renderer - Whitted-style CPU ray tracing
//!
//! Intersects rays against spheres, quads and triangle meshes through either a
//! naive accelerator or a bounding-box hierarchy (BBH), and shades hits with
//! Blinn-Phong direct lighting, hard shadows, mirror reflection and refraction.

mod accelerator;
mod bbh;
mod camera;
mod image_buffer;
mod intersection;
mod quad;
mod scene;
mod shading;
mod sphere;
mod stats;
mod surface;
mod triangle;

pub use accelerator::{Accelerator, NaiveAccel, Primitive, PrimitiveSet};
pub use bbh::{Bbh, BbhNode, BoundedPrimitive};
pub use camera::Camera;
pub use image_buffer::{color_to_srgb8, linear_to_srgb, ImageBuffer};
pub use intersection::{Intersection, ShapeHit};
pub use quad::Quad;
pub use scene::Scene;
pub use shading::{reflect, refract, shade, MAX_DEPTH};
pub use sphere::Sphere;
pub use stats::RayStats;
pub use surface::{Shape, Surface};
pub use triangle::{intersect_triangle, TriangleMesh};

/// Re-export common math types from lum_math
pub use lum_math::{Aabb, Ray, Transform, Vec3};
