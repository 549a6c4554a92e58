//! Glint math types.
//!
//! Re-exports `glam` and adds the small set of ray-tracing primitives the
//! renderer needs: rays, parametric intervals, axis-aligned boxes and a
//! view-transform extension for `Mat4`.

// Re-export glam for convenience
pub use glam::*;

mod aabb;
mod interval;
mod ray;
mod transform;

pub use aabb::{Aabb, SlabSpan};
pub use interval::Interval;
pub use ray::Ray;
pub use transform::Mat4Ext;
