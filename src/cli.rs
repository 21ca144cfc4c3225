use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use log::LevelFilter;

use chromatrace::sampler::DEFAULT_IMAGE_SIZE;

/// Custom enum for log levels that can be used with clap's ValueEnum
#[derive(Debug, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convert our custom LogLevel enum to log crate's LevelFilter
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

/// Command line arguments structure using clap derive macros
#[derive(Parser, Debug)]
#[command(name = "chromatrace")]
#[command(about = "Ray trace a JSON scene of spheres and planes to an image")]
pub struct Args {
    /// Scene description (JSON)
    pub scene: PathBuf,

    /// Output image path (.png, .bmp, .tif or .tga)
    pub output: PathBuf,

    /// Set the logging level (defaults to "info")
    #[arg(long, default_value = "info", help = "Set the logging level")]
    pub debug_level: LogLevel,

    /// Image width in pixels
    #[arg(
        long,
        default_value_t = DEFAULT_IMAGE_SIZE,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    pub width: u32,

    /// Image height in pixels
    #[arg(
        long,
        default_value_t = DEFAULT_IMAGE_SIZE,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    pub height: u32,

    /// Seed for sub-pixel jitter; omit for a fresh random seed
    #[arg(long)]
    pub seed: Option<u64>,
}
