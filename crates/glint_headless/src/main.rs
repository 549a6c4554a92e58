use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use glint_core::RenderSettings;
use glint_renderer::ProgressiveRenderer;

mod cli;
mod demo_scene;
mod logger;
mod mesh_loader;

use cli::Args;
use logger::init_logger;

/// Settings from the config file (or defaults) with command-line overrides.
fn resolve_settings(args: &Args) -> Result<RenderSettings> {
    let mut settings = match &args.config {
        Some(path) => RenderSettings::load(path)?,
        None => RenderSettings::default(),
    };

    if let Some(width) = args.width {
        settings.width = width;
    }
    if let Some(height) = args.height {
        settings.height = height;
    }
    if let Some(seed) = args.seed {
        settings.seed = seed;
    }
    settings.show_normals |= args.show_normals;

    settings.validate()?;
    Ok(settings)
}

fn save_png(renderer: &ProgressiveRenderer, path: &Path) -> Result<()> {
    let settings = renderer.settings();
    let image = image::RgbaImage::from_raw(settings.width, settings.height, renderer.to_rgba8())
        .context("Image buffer does not match the resolution")?;
    image
        .save(path)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    log::info!("Image saved as {}", path.display());
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logger(args.debug_level.into());

    log::info!("Starting Glint");

    let settings = resolve_settings(&args)?;
    log::info!(
        "Rendering {}x{}, {} max frames, {} bounces",
        settings.width,
        settings.height,
        settings.max_frames,
        settings.max_bounces
    );

    let scene = demo_scene::build(args.mesh.as_deref())?;

    let budget = args.tick_budget(settings.height);
    let mut renderer = ProgressiveRenderer::new(settings, demo_scene::default_view());

    let start = Instant::now();
    let mut ticks = 0u64;
    while ticks < budget && renderer.update_image(&scene) {
        ticks += 1;
    }

    log::info!(
        "Traced {} lines in {:.2?} ({} frames, {:?})",
        ticks,
        start.elapsed(),
        renderer.current_frame(),
        renderer.state()
    );

    save_png(&renderer, &args.output)
}
