//! Render settings.
//!
//! The configuration surface consumed by the renderer: image size,
//! accumulation and bounce limits, the shadow-acne epsilon, background
//! colors and the shading toggles. Settings can be loaded from JSON; any
//! field left out falls back to its default.

use std::path::Path;

use glint_math::Vec3;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur while loading or validating settings.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid setting: {0}")]
    Invalid(String),
}

/// Result type for settings operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Renderer configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
    /// Number of full frames to accumulate before the image is converged
    pub max_frames: i32,
    /// Bounce budget; a negative budget terminates a path with black
    pub max_bounces: i32,
    /// Minimum hit distance, avoids self-intersection ("shadow acne")
    pub epsilon: f32,
    /// Background color looking straight down
    pub ground_color: Vec3,
    /// Background color looking straight up
    pub sky_color: Vec3,
    /// Debug mode: shade with the remapped surface normal
    pub show_normals: bool,
    /// Jitter the sample position inside each pixel
    pub anti_aliasing: bool,
    /// Diffuse scatter as normal + unit vector instead of uniform hemisphere
    pub true_lambertian: bool,
    /// Base seed for the per-pixel random streams
    pub seed: u64,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            width: 500,
            height: 500,
            max_frames: 1000,
            max_bounces: 1,
            epsilon: 0.001,
            ground_color: Vec3::new(1.0, 1.0, 1.0),
            sky_color: Vec3::new(0.5, 0.7, 1.0),
            show_normals: false,
            anti_aliasing: true,
            true_lambertian: false,
            seed: 0,
        }
    }
}

impl RenderSettings {
    /// Parse settings from a JSON string and validate them.
    pub fn from_json_str(json: &str) -> ConfigResult<Self> {
        let settings: RenderSettings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file and validate them.
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json_str(&json)?;
        log::info!(
            "Loaded render settings from {:?}: {}x{}, {} frames, {} bounces",
            path,
            settings.width,
            settings.height,
            settings.max_frames,
            settings.max_bounces
        );
        Ok(settings)
    }

    /// Serialize the settings to pretty-printed JSON.
    pub fn to_json(&self) -> ConfigResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Set image resolution.
    pub fn with_resolution(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Set accumulation and bounce limits.
    pub fn with_quality(mut self, max_frames: i32, max_bounces: i32) -> Self {
        self.max_frames = max_frames;
        self.max_bounces = max_bounces;
        self
    }

    /// Set the background gradient.
    pub fn with_background(mut self, ground_color: Vec3, sky_color: Vec3) -> Self {
        self.ground_color = ground_color;
        self.sky_color = sky_color;
        self
    }

    /// Number of pixels in the image.
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Check that the settings describe a renderable image.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::Invalid(format!(
                "image size must be non-zero, got {}x{}",
                self.width, self.height
            )));
        }
        if !self.epsilon.is_finite() || self.epsilon <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "epsilon must be a positive finite number, got {}",
                self.epsilon
            )));
        }
        if self.max_frames < 0 {
            return Err(ConfigError::Invalid(format!(
                "max_frames must not be negative, got {}",
                self.max_frames
            )));
        }
        if !self.ground_color.is_finite() || !self.sky_color.is_finite() {
            return Err(ConfigError::Invalid(
                "background colors must be finite".to_string(),
            ));
        }
        Ok(())
    }
}
