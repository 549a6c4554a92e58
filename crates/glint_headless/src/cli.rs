use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use log::LevelFilter;

/// Log levels accepted on the command line
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "glint")]
#[command(about = "Progressive CPU ray tracer, rendered headless to a PNG")]
pub struct Args {
    /// JSON render settings; missing fields keep their defaults
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// OBJ mesh placed in the scene (a built-in mesh is used otherwise)
    #[arg(short, long)]
    pub mesh: Option<PathBuf>,

    /// Full frames to accumulate before writing the image
    #[arg(short, long, default_value_t = 4)]
    pub frames: u32,

    /// Hard cap on scanline ticks, overrides --frames
    #[arg(long)]
    pub ticks: Option<u64>,

    /// Image width in pixels (overrides the config file)
    #[arg(long)]
    pub width: Option<u32>,

    /// Image height in pixels (overrides the config file)
    #[arg(long)]
    pub height: Option<u32>,

    /// Shade with surface normals instead of tracing light
    #[arg(long)]
    pub show_normals: bool,

    /// Base seed for the per-pixel random streams
    #[arg(long)]
    pub seed: Option<u64>,

    /// Output PNG path
    #[arg(short, long, default_value = "glint.png")]
    pub output: PathBuf,

    /// Set the logging level
    #[arg(long, value_enum, default_value = "info")]
    pub debug_level: LogLevel,
}

impl Args {
    /// Number of ticks to run for an image `height` rows tall.
    pub fn tick_budget(&self, height: u32) -> u64 {
        self.ticks
            .unwrap_or(u64::from(self.frames) * u64::from(height))
    }
}
