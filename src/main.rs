use anyhow::Context;
use clap::Parser;
use log::{error, info};

mod cli;
mod logger;

use chromatrace::output::{output_format, save_image};
use chromatrace::random::new_rng;
use chromatrace::{load_scene, Sampler};
use cli::Args;
use logger::init_logger;

fn run(args: &Args) -> anyhow::Result<()> {
    // Reject a bad output path before spending time on the render
    output_format(&args.output)?;

    let description = load_scene(&args.scene)
        .with_context(|| format!("loading scene {}", args.scene.display()))?;

    if let Some(seed) = args.seed {
        info!("Sampling with fixed seed {}", seed);
    }
    let mut sampler = Sampler::new(
        args.width,
        args.height,
        description.antialias,
        new_rng(args.seed),
    );
    let image = sampler.render(&description.scene);

    save_image(&image, &args.output)
        .with_context(|| format!("writing image {}", args.output.display()))?;
    Ok(())
}

fn main() {
    let args = Args::parse();

    init_logger(args.debug_level.clone().into());

    // Log application startup with version information
    info!("ChromaTrace - Git Version {} ({})", env!("GIT_HASH"), env!("GIT_DATE"));

    if let Err(e) = run(&args) {
        error!("{:#}", e);
        std::process::exit(1);
    }
}
