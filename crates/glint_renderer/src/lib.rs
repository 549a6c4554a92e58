//! Glint Renderer - progressive CPU ray tracing
//!
//! A small recursive ray tracer that accumulates one scanline per tick:
//! spheres, axis-aligned boxes and triangle meshes lit by a background
//! gradient, with diffuse and mirror materials.

pub mod camera;
mod cuboid;
mod hittable;
mod material;
pub mod progressive;
pub mod renderer;
pub mod sampling;
mod scene;
mod sphere;
mod triangle;

pub use camera::{Camera, PixelOffset};
pub use cuboid::Cuboid;
pub use hittable::{HitRecord, Hittable};
pub use material::{Color, DiffuseMode, Lambertian, Material, Metal, ScatterResult};
pub use progressive::{ProgressiveRenderer, RenderState};
pub use renderer::{background, color_to_rgba, ray_color};
pub use scene::Scene;
pub use sphere::Sphere;
pub use triangle::Triangle;

/// Re-export the math types used across the public API
pub use glint_math::{Aabb, Interval, Mat4, Ray, Vec3, Vec4};
