//! Headless vorton fluid runner.
//!
//! Loads a TOML scene file, runs every scene as an independent simulation
//! in parallel and logs a summary per scene. `RUST_LOG=debug` adds
//! per-frame progress.

mod config;
mod scene;

use anyhow::Result;
use clap::Parser;
use log::info;
use rayon::prelude::*;
use std::path::PathBuf;

use config::SceneFile;
use scene::{run_scene, SceneReport};

/// Runs vorton fluid scenes headless and reports statistics.
#[derive(Parser, Debug)]
#[command(name = "vorton_demo")]
#[command(about = "Runs vorton fluid scenes and reports statistics")]
struct Args {
	/// Path to the scene TOML file.
	#[arg(short, long)]
	config: PathBuf,

	/// Override the frame count of every scene.
	#[arg(short, long)]
	frames: Option<u32>,
}

fn main() -> Result<()> {
	env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

	let args = Args::parse();

	info!("Loading scenes from: {}", args.config.display());
	let file = SceneFile::load(&args.config)?;
	info!("Running {} scene(s)", file.scenes.len());

	let reports: Vec<SceneReport> = file
		.scenes
		.par_iter()
		.map(|scene| run_scene(scene, args.frames.unwrap_or(scene.frames)))
		.collect::<Result<_>>()?;

	for report in &reports {
		report.log();
	}

	Ok(())
}
