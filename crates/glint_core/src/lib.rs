//! Glint Core - renderer-agnostic inputs for the progressive ray tracer.
//!
//! This crate provides:
//!
//! - **Mesh data**: `MeshData`, the triangle soup a mesh loader hands over
//!   (positions, index triples and the loader's reported bounds)
//! - **Render settings**: `RenderSettings`, the configuration surface of the
//!   renderer, loadable from JSON
//!
//! # Example
//!
//! ```ignore
//! use glint_core::{MeshData, RenderSettings};
//!
//! let settings = RenderSettings::load("render.json")?;
//! let mesh = MeshData::from_positions(positions, indices);
//! mesh.validate()?;
//! ```

pub mod mesh;
pub mod settings;

// Re-export commonly used types
pub use mesh::{MeshData, MeshError, MeshResult, BOUNDS_TOLERANCE};
pub use settings::{ConfigError, ConfigResult, RenderSettings};
