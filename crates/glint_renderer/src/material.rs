//! Material trait for surface scattering.

use crate::sampling::{near_zero, random_on_hemisphere, random_unit_vector, reflect};
use crate::{hittable::HitRecord, Ray};
use glint_math::Vec3;
use rand::RngCore;

/// Color type alias (RGB values typically 0-1)
pub type Color = Vec3;

/// How diffuse surfaces pick their bounce direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DiffuseMode {
    /// Uniform direction in the hemisphere around the normal.
    #[default]
    Hemisphere,
    /// Normal plus a random unit vector (cosine-weighted).
    TrueLambertian,
}

impl DiffuseMode {
    /// Map the `true_lambertian` settings flag to a mode.
    pub fn from_flag(true_lambertian: bool) -> Self {
        if true_lambertian {
            DiffuseMode::TrueLambertian
        } else {
            DiffuseMode::Hemisphere
        }
    }
}

/// Outcome of a successful scatter.
#[derive(Debug, Clone, Copy)]
pub struct ScatterResult {
    /// Per-channel energy kept by this bounce
    pub attenuation: Color,
    /// Outgoing ray, starting at the hit point
    pub scattered: Ray,
}

/// Trait for materials that describe how light interacts with surfaces.
///
/// Materials are shared, read-only scene objects. `scatter` must not touch
/// shared state; all randomness comes from `rng`.
pub trait Material: Send + Sync {
    /// Scatter an incoming ray.
    ///
    /// Returns `Some` with the attenuation and scattered ray, or `None` if
    /// the ray is absorbed.
    fn scatter(
        &self,
        ray_in: &Ray,
        rec: &HitRecord,
        mode: DiffuseMode,
        rng: &mut dyn RngCore,
    ) -> Option<ScatterResult>;
}

/// Lambertian (diffuse) material.
#[derive(Debug, Clone)]
pub struct Lambertian {
    albedo: Color,
}

impl Lambertian {
    /// Create a new Lambertian material with the given albedo color.
    pub fn new(albedo: Color) -> Self {
        Self { albedo }
    }

    pub fn albedo(&self) -> Color {
        self.albedo
    }
}

impl Material for Lambertian {
    fn scatter(
        &self,
        _ray_in: &Ray,
        rec: &HitRecord,
        mode: DiffuseMode,
        rng: &mut dyn RngCore,
    ) -> Option<ScatterResult> {
        let mut scatter_direction = match mode {
            DiffuseMode::TrueLambertian => rec.normal + random_unit_vector(rng),
            DiffuseMode::Hemisphere => random_on_hemisphere(rec.normal, rng),
        };

        // Catch degenerate scatter direction
        if near_zero(scatter_direction) {
            scatter_direction = rec.normal;
        }

        Some(ScatterResult {
            attenuation: self.albedo,
            scattered: Ray::new(rec.p, scatter_direction),
        })
    }
}

/// Metal (mirror) material.
#[derive(Debug, Clone)]
pub struct Metal {
    albedo: Color,
}

impl Metal {
    /// Create a new Metal material with the given albedo color.
    pub fn new(albedo: Color) -> Self {
        Self { albedo }
    }

    pub fn albedo(&self) -> Color {
        self.albedo
    }
}

impl Material for Metal {
    fn scatter(
        &self,
        ray_in: &Ray,
        rec: &HitRecord,
        _mode: DiffuseMode,
        _rng: &mut dyn RngCore,
    ) -> Option<ScatterResult> {
        let reflected = reflect(ray_in.direction(), rec.normal);
        Some(ScatterResult {
            attenuation: self.albedo,
            scattered: Ray::new(rec.p, reflected),
        })
    }
}
