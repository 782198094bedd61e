//! Headless host loop for one scene.
//!
//! Per frame: tick, advect the tracer lattice, then grow the domain around
//! the tracers and recompute spacing.

use anyhow::{Context, Result};
use glam::Vec3;
use log::{debug, info, warn};
use vorton_field::{lattice_colour, seed_tracer_lattice, Simulation, SolverParams, Tracer};
use web_time::Instant;

use crate::config::SceneConfig;

/// Frames between progress lines at debug level.
const PROGRESS_INTERVAL: u32 = 60;

/// Summary of a finished scene.
#[derive(Debug, Clone)]
pub struct SceneReport {
	pub name: String,
	pub frames: u32,
	pub vortons: usize,
	pub tracers: usize,
	/// Vorton advections skipped over all frames.
	pub skipped_vortons: usize,
	/// Tracer advections skipped over all frames.
	pub skipped_tracers: usize,
	/// Frames in which the domain grew.
	pub growth_frames: u32,
	pub domain_origin: Vec3,
	pub domain_size: Vec3,
	pub max_leaf_speed: f32,
	pub total_vorticity: Vec3,
	/// Centroid of the tracer cloud at the end of the run.
	pub tracer_centroid: Vec3,
	pub elapsed_ms: f64,
}

impl SceneReport {
	pub fn log(&self) {
		info!(
			"[{}] {} frames in {:.1} ms ({:.3} ms/frame)",
			self.name,
			self.frames,
			self.elapsed_ms,
			self.elapsed_ms / self.frames.max(1) as f64
		);
		info!(
			"[{}] vortons={} tracers={} max |v|={:.4} Σω={:?}",
			self.name, self.vortons, self.tracers, self.max_leaf_speed, self.total_vorticity
		);
		info!(
			"[{}] domain origin={:?} size={:?} (grew in {} frames), tracer centroid={:?}",
			self.name, self.domain_origin, self.domain_size, self.growth_frames, self.tracer_centroid
		);
		if self.skipped_vortons > 0 || self.skipped_tracers > 0 {
			warn!(
				"[{}] skipped {} vorton and {} tracer advections outside the domain",
				self.name, self.skipped_vortons, self.skipped_tracers
			);
		}
	}
}

/// Build the simulation and tracers for `scene` and run `frames` frames.
pub fn run_scene(scene: &SceneConfig, frames: u32) -> Result<SceneReport> {
	let size = Vec3::from_array(scene.size);
	let params = scene.solver.apply(SolverParams::DEFAULT);
	let mut sim = Simulation::with_params(size, scene.depth, params)
		.with_context(|| format!("Failed to create simulation for scene '{}'", scene.name))?;

	for vorton in &scene.vortons {
		sim.insert_vorton(Vec3::from_array(vorton.position), Vec3::from_array(vorton.vorticity));
	}

	let n = scene.tracer_lattice;
	let mut tracers = seed_tracer_lattice(n, Vec3::ZERO, size, |coord| lattice_colour(coord, n));

	debug!(
		"[{}] depth={} vortons={} tracers={}",
		scene.name,
		sim.domain().depth(),
		sim.vortons().len(),
		tracers.len()
	);

	let mut skipped_vortons = 0;
	let mut skipped_tracers = 0;
	let mut growth_frames = 0;
	let start = Instant::now();

	for frame in 0..frames {
		let tick = sim.tick();
		let advection = sim.advect_tracers(&mut tracers);
		if sim.adapt_domain_to(&tracers) {
			growth_frames += 1;
		}

		skipped_vortons += tick.skipped;
		skipped_tracers += advection.skipped;

		if frame % PROGRESS_INTERVAL == 0 {
			debug!(
				"[{}] frame {} tick={}us pairs={} size={:?}",
				scene.name,
				frame,
				tick.timing_us,
				tick.diffusion_pairs,
				sim.domain().size()
			);
		}
	}

	let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;

	Ok(SceneReport {
		name: scene.name.clone(),
		frames,
		vortons: sim.vortons().len(),
		tracers: tracers.len(),
		skipped_vortons,
		skipped_tracers,
		growth_frames,
		domain_origin: sim.domain().origin(),
		domain_size: sim.domain().size(),
		max_leaf_speed: max_leaf_speed(&sim),
		total_vorticity: sim.vorton_set().total_vorticity(),
		tracer_centroid: centroid(&tracers),
		elapsed_ms,
	})
}

fn max_leaf_speed(sim: &Simulation) -> f32 {
	let tree = sim.tree();
	tree.nodes()[tree.leaf_base()..]
		.iter()
		.map(|leaf| leaf.velocity.length())
		.fold(0.0, f32::max)
}

fn centroid<P>(tracers: &[Tracer<P>]) -> Vec3 {
	if tracers.is_empty() {
		return Vec3::ZERO;
	}
	tracers.iter().map(|t| t.position).sum::<Vec3>() / tracers.len() as f32
}
