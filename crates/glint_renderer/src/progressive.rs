//! Progressive scanline accumulation.
//!
//! Each tick traces one sample for every pixel of one row and adds it to a
//! running sum. The alpha channel of every accumulator pixel counts the
//! samples it holds, so the displayed color is `rgb / a`.
//!
//! Two kinds of reset exist:
//! - a hard reset ([`ProgressiveRenderer::reset_image`]) zeroes the image
//!   and restarts from frame 0,
//! - a soft reset ([`ProgressiveRenderer::reset_accumulation`]) keeps the
//!   old image but squashes each pixel to weight 1 the next time its row is
//!   traced, so a moving camera fades instead of flashing black.

use glint_core::RenderSettings;
use glint_math::{Mat4, Vec4};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rayon::prelude::*;

use crate::camera::{Camera, PixelOffset};
use crate::renderer::{color_to_rgba, ray_color};
use crate::sampling::{pixel_seed, JITTER_STREAM};
use crate::{Color, Hittable};

/// What the next [`ProgressiveRenderer::update_image`] call will do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderState {
    /// Ticks are skipped until the renderer is unfrozen.
    Frozen,
    /// Ticks trace a row and add samples.
    Accumulating,
    /// `max_frames` full frames are done; ticks change nothing.
    Converged,
}

/// Accumulating scanline renderer.
pub struct ProgressiveRenderer {
    settings: RenderSettings,
    view: Mat4,
    camera: Camera,
    /// Row-major, row 0 at the bottom. rgb = sum of samples, a = sample count.
    image: Vec<Vec4>,
    freeze: bool,
    /// Completed full passes; -1 right after a soft reset
    current_frame: i32,
    current_line: u32,
    /// Rows traced since creation, feeds the random streams
    ticks: u64,
}

impl ProgressiveRenderer {
    /// Create a renderer with an empty image.
    pub fn new(settings: RenderSettings, view: Mat4) -> Self {
        let camera = Camera::new(settings.width, settings.height, view);
        let image = vec![Vec4::ZERO; settings.pixel_count()];
        Self {
            settings,
            view,
            camera,
            image,
            freeze: false,
            current_frame: 0,
            current_line: 0,
            ticks: 0,
        }
    }

    /// Advance the render by one row.
    ///
    /// Returns true if a row was traced.
    pub fn update_image(&mut self, world: &dyn Hittable) -> bool {
        if self.freeze {
            return false;
        }

        self.image.resize(self.settings.pixel_count(), Vec4::ZERO);

        let height = self.settings.height;
        if self.settings.width == 0 || height == 0 {
            log::warn!(
                "Skipping render tick for empty image {}x{}",
                self.settings.width,
                height
            );
            return false;
        }

        if self.is_converged() {
            return false;
        }

        self.update_line(self.current_line % height, world);

        self.current_line += 1;
        if self.current_line >= height {
            self.current_frame += 1;
            self.current_line %= height;
            log::debug!("Frame {} complete", self.current_frame);
            if self.is_converged() {
                log::info!(
                    "Render converged after {} frames ({} ticks)",
                    self.current_frame,
                    self.ticks
                );
            }
        }

        true
    }

    /// Trace one sample for every pixel in row `y` and accumulate it.
    fn update_line(&mut self, y: u32, world: &dyn Hittable) {
        let settings = &self.settings;
        let camera = &self.camera;
        let ticks = self.ticks;
        let blend = self.current_frame <= 0;

        // One sub-pixel offset for the whole row
        let mut jitter_rng = StdRng::seed_from_u64(pixel_seed(settings.seed, ticks, JITTER_STREAM));
        let offset = PixelOffset::sample(settings.anti_aliasing, &mut jitter_rng);

        let width = settings.width as usize;
        let start = y as usize * width;
        let row = &mut self.image[start..start + width];

        row.par_iter_mut().enumerate().for_each(|(x, pixel)| {
            let mut rng = StdRng::seed_from_u64(pixel_seed(settings.seed, ticks, x as u64));

            if blend {
                // Collapse to weight 1 (0 for untouched pixels)
                let old = *pixel;
                *pixel = (old / old.w.max(1.0)).clamp(Vec4::ZERO, Vec4::ONE);
            }

            let ray = camera.get_ray(x as u32, y, offset);
            let c = ray_color(&ray, world, settings.max_bounces, settings, &mut rng);
            *pixel += c.extend(1.0);
        });

        self.ticks += 1;
    }

    /// Hard reset: clear the image and restart from frame 0, unfrozen.
    pub fn reset_image(&mut self) {
        self.image.clear();
        self.image.resize(self.settings.pixel_count(), Vec4::ZERO);
        self.current_frame = 0;
        self.current_line = 0;
        self.freeze = false;
    }

    /// Soft reset: keep the image, restart accumulation at weight 1.
    pub fn reset_accumulation(&mut self) {
        self.current_frame = -1;
    }

    /// Move the camera. Triggers a soft reset.
    pub fn set_view(&mut self, view: Mat4) {
        self.view = view;
        self.camera = Camera::new(self.settings.width, self.settings.height, view);
        self.reset_accumulation();
    }

    /// Change the image size. Triggers a hard reset.
    pub fn set_resolution(&mut self, width: u32, height: u32) {
        self.settings.width = width;
        self.settings.height = height;
        self.camera = Camera::new(width, height, self.view);
        self.reset_image();
    }

    /// Replace the settings.
    ///
    /// A resolution change hard-resets the image, anything else soft-resets.
    pub fn update_settings(&mut self, settings: RenderSettings) {
        let resized =
            settings.width != self.settings.width || settings.height != self.settings.height;
        self.settings = settings;
        if resized {
            let (width, height) = (self.settings.width, self.settings.height);
            self.set_resolution(width, height);
        } else {
            self.reset_accumulation();
        }
    }

    pub fn set_freeze(&mut self, freeze: bool) {
        self.freeze = freeze;
    }

    /// Flip the freeze flag and return the new value.
    pub fn toggle_freeze(&mut self) -> bool {
        self.freeze = !self.freeze;
        self.freeze
    }

    pub fn is_frozen(&self) -> bool {
        self.freeze
    }

    pub fn is_converged(&self) -> bool {
        self.current_frame >= self.settings.max_frames
    }

    pub fn state(&self) -> RenderState {
        if self.freeze {
            RenderState::Frozen
        } else if self.is_converged() {
            RenderState::Converged
        } else {
            RenderState::Accumulating
        }
    }

    pub fn settings(&self) -> &RenderSettings {
        &self.settings
    }

    pub fn view(&self) -> Mat4 {
        self.view
    }

    pub fn image(&self) -> &[Vec4] {
        &self.image
    }

    pub fn current_frame(&self) -> i32 {
        self.current_frame
    }

    pub fn current_line(&self) -> u32 {
        self.current_line
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Averaged linear color of pixel (`x`, `y`), row 0 at the bottom.
    pub fn resolved_pixel(&self, x: u32, y: u32) -> Option<Color> {
        if x >= self.settings.width || y >= self.settings.height {
            return None;
        }
        let index = y as usize * self.settings.width as usize + x as usize;
        let acc = self.image.get(index)?;
        if acc.w > 0.0 {
            Some(acc.truncate() / acc.w)
        } else {
            Some(Color::ZERO)
        }
    }

    /// Gamma-corrected RGBA8 buffer with the top row first.
    pub fn to_rgba8(&self) -> Vec<u8> {
        let (width, height) = (self.settings.width, self.settings.height);
        let mut out = Vec::with_capacity(width as usize * height as usize * 4);
        for y in (0..height).rev() {
            for x in 0..width {
                let color = self.resolved_pixel(x, y).unwrap_or(Color::ZERO);
                out.extend_from_slice(&color_to_rgba(color));
            }
        }
        out
    }
}
