//! Core path tracing functions.
//!
//! Implements recursive light transport with:
//! - A per-path bounce budget
//! - Hemisphere or true-Lambertian diffuse bounces
//! - A vertical ground-to-sky background gradient
//! - A normal-visualisation debug mode

use crate::{Color, DiffuseMode, Hittable, Ray};
use glint_core::RenderSettings;
use glint_math::{Interval, Vec3};
use rand::RngCore;

/// Compute the color seen by a ray.
///
/// `max_bounces` is the remaining bounce budget: a negative budget yields
/// black, so a budget of `n` allows `n + 1` surface hits. Rays shorter than
/// `settings.epsilon` are ignored to avoid self-intersection.
pub fn ray_color(
    ray: &Ray,
    world: &dyn Hittable,
    max_bounces: i32,
    settings: &RenderSettings,
    rng: &mut dyn RngCore,
) -> Color {
    // Out of bounces: no more light is gathered
    if max_bounces < 0 {
        return Color::ZERO;
    }

    let Some(mut rec) = world.hit(ray, Interval::new(settings.epsilon, f32::INFINITY)) else {
        return background(ray, settings.ground_color, settings.sky_color);
    };

    rec.normal = rec.normal.normalize_or_zero();

    if settings.show_normals {
        return 0.5 * rec.normal + Vec3::splat(0.5);
    }

    let mode = DiffuseMode::from_flag(settings.true_lambertian);
    match rec.material.scatter(ray, &rec, mode, rng) {
        Some(result) => {
            let bounced = ray_color(&result.scattered, world, max_bounces - 1, settings, rng);
            result.attenuation * bounced
        }
        None => Color::ZERO,
    }
}

/// Background seen by a ray that hits nothing.
///
/// Blends linearly from `ground` (straight down) to `sky` (straight up) on
/// the normalized direction's y component.
pub fn background(ray: &Ray, ground: Color, sky: Color) -> Color {
    let unit_direction = ray.direction().normalize_or_zero();
    let a = 0.5 * (unit_direction.y + 1.0);
    ground * (1.0 - a) + sky * a
}

/// Apply gamma correction (gamma = 2.0).
#[inline]
pub fn linear_to_gamma(linear: f32) -> f32 {
    if linear > 0.0 {
        linear.sqrt()
    } else {
        0.0
    }
}

/// Clamp a value to [0, 1] range.
#[inline]
pub fn clamp_01(x: f32) -> f32 {
    x.clamp(0.0, 1.0)
}

/// Convert a linear color to gamma-corrected 8-bit RGBA.
pub fn color_to_rgba(color: Color) -> [u8; 4] {
    let r = (255.0 * clamp_01(linear_to_gamma(color.x))) as u8;
    let g = (255.0 * clamp_01(linear_to_gamma(color.y))) as u8;
    let b = (255.0 * clamp_01(linear_to_gamma(color.z))) as u8;
    [r, g, b, 255]
}
