//! Pinhole camera for primary ray generation.
//!
//! Rays start at the view-space origin and pass through a fixed image plane
//! at z = -1 spanning [-aspect, aspect] x [-1, 1]. The view matrix maps world
//! space to view space; its inverse brings each ray back into world space.

use crate::{sampling::gen_f32, Ray};
use glint_math::{Mat4, Mat4Ext, Vec3};
use rand::RngCore;

/// Sub-pixel sample position, each component in [0, 1).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PixelOffset {
    pub x: f32,
    pub y: f32,
}

impl PixelOffset {
    /// Sample through the pixel center.
    pub const CENTER: PixelOffset = PixelOffset { x: 0.5, y: 0.5 };

    /// Uniformly random position inside the pixel.
    pub fn jittered(rng: &mut dyn RngCore) -> Self {
        let x = gen_f32(rng);
        let y = gen_f32(rng);
        Self { x, y }
    }

    /// Jittered when anti-aliasing is on, the pixel center otherwise.
    pub fn sample(anti_aliasing: bool, rng: &mut dyn RngCore) -> Self {
        if anti_aliasing {
            Self::jittered(rng)
        } else {
            Self::CENTER
        }
    }
}

/// Camera for generating rays into the scene.
#[derive(Debug, Clone)]
pub struct Camera {
    width: u32,
    height: u32,

    // Image plane in view space
    lower_left: Vec3,
    horizontal: Vec3,
    vertical: Vec3,

    world_from_view: Mat4,
}

impl Camera {
    /// Create a camera for a `width` x `height` image looking through `view`.
    ///
    /// A singular view matrix cannot be inverted; the camera then keeps the
    /// identity transform and logs a warning.
    pub fn new(width: u32, height: u32, view: Mat4) -> Self {
        let aspect = if height > 0 {
            width as f32 / height as f32
        } else {
            1.0
        };

        let world_from_view = view.try_inverse().unwrap_or_else(|| {
            log::warn!("View matrix is not invertible, falling back to identity");
            Mat4::IDENTITY
        });

        Self {
            width,
            height,
            lower_left: Vec3::new(-aspect, -1.0, -1.0),
            horizontal: Vec3::new(2.0 * aspect, 0.0, 0.0),
            vertical: Vec3::new(0.0, 2.0, 0.0),
            world_from_view,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn world_from_view(&self) -> Mat4 {
        self.world_from_view
    }

    /// World-space ray through pixel (`x`, `y`) at sub-pixel `offset`.
    ///
    /// Row 0 is the bottom of the image.
    pub fn get_ray(&self, x: u32, y: u32, offset: PixelOffset) -> Ray {
        let u = (x as f32 + offset.x) / self.width.max(1) as f32;
        let v = (y as f32 + offset.y) / self.height.max(1) as f32;

        let view_ray = Ray::new(
            Vec3::ZERO,
            self.lower_left + u * self.horizontal + v * self.vertical,
        );
        self.world_from_view.transform_ray(&view_ray)
    }
}
