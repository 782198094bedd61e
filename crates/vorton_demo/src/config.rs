//! Scene file parsing.
//!
//! ```toml
//! [[scene]]
//! name = "ring"
//! size = [1.0, 1.0, 1.0]
//! depth = 3
//! frames = 120
//! tracer_lattice = 30
//!
//! [scene.solver]
//! viscosity = 0.02
//!
//! [[scene.vorton]]
//! position = [0.5, 0.5, 0.5]
//! vorticity = [0.5, 0.0, 0.0]
//! ```

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::path::Path;
use vorton_field::{JacobianScheme, SolverParams};

/// Root of a scene file.
#[derive(Debug, Deserialize)]
pub struct SceneFile {
	#[serde(rename = "scene", default)]
	pub scenes: Vec<SceneConfig>,
}

/// One independent simulation.
#[derive(Debug, Deserialize)]
pub struct SceneConfig {
	/// Scene name used in the report.
	pub name: String,
	/// Initial domain extent, anchored at the world origin.
	pub size: [f32; 3],
	/// Octree depth (clamped by the solver).
	#[serde(default = "default_depth")]
	pub depth: u32,
	/// Frames to run unless overridden on the command line.
	#[serde(default = "default_frames")]
	pub frames: u32,
	/// Tracers per axis, seeded over the initial domain.
	#[serde(default = "default_tracer_lattice")]
	pub tracer_lattice: u32,
	/// Optional solver parameter overrides.
	#[serde(default)]
	pub solver: SolverOverrides,
	/// Seed vortons.
	#[serde(rename = "vorton", default)]
	pub vortons: Vec<VortonConfig>,
}

/// A seed vorton.
#[derive(Debug, Deserialize)]
pub struct VortonConfig {
	pub position: [f32; 3],
	pub vorticity: [f32; 3],
}

/// Per-scene solver overrides; unset fields keep the defaults.
#[derive(Debug, Default, Deserialize)]
pub struct SolverOverrides {
	pub viscosity: Option<f32>,
	pub dt: Option<f32>,
	pub tilt_fudge: Option<f32>,
	pub core_radius: Option<f32>,
	/// Use the historical x-component Jacobian.
	#[serde(default)]
	pub legacy_jacobian: bool,
}

fn default_depth() -> u32 {
	3
}

fn default_frames() -> u32 {
	120
}

fn default_tracer_lattice() -> u32 {
	30
}

impl SceneFile {
	/// Load and validate a scene file.
	pub fn load(path: &Path) -> Result<Self> {
		let content = std::fs::read_to_string(path)
			.with_context(|| format!("Failed to read scene file: {}", path.display()))?;
		Self::parse(&content).with_context(|| format!("Invalid scene file: {}", path.display()))
	}

	/// Parse and validate scene TOML.
	pub fn parse(content: &str) -> Result<Self> {
		let file: SceneFile = toml::from_str(content).context("Failed to parse scene TOML")?;

		if file.scenes.is_empty() {
			bail!("Scene file must define at least one [[scene]]");
		}
		for scene in &file.scenes {
			scene.validate()?;
		}

		Ok(file)
	}
}

impl SceneConfig {
	fn validate(&self) -> Result<()> {
		if self.size.iter().any(|s| !s.is_finite() || *s <= 0.0) {
			bail!("Scene '{}': size must be positive, got {:?}", self.name, self.size);
		}
		if self.tracer_lattice == 0 {
			bail!("Scene '{}': tracer_lattice must be at least 1", self.name);
		}
		if let Some(dt) = self.solver.dt {
			if !dt.is_finite() || dt <= 0.0 {
				bail!("Scene '{}': dt must be positive, got {}", self.name, dt);
			}
		}
		Ok(())
	}
}

impl SolverOverrides {
	/// Apply the overrides on top of `base`.
	pub fn apply(&self, base: SolverParams) -> SolverParams {
		SolverParams {
			viscosity: self.viscosity.unwrap_or(base.viscosity),
			dt: self.dt.unwrap_or(base.dt),
			tilt_fudge: self.tilt_fudge.unwrap_or(base.tilt_fudge),
			core_radius: self.core_radius.unwrap_or(base.core_radius),
			jacobian: if self.legacy_jacobian {
				JacobianScheme::LegacyXComponent
			} else {
				base.jacobian
			},
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_parse_defaults() {
		let file = SceneFile::parse(
			r#"
			[[scene]]
			name = "centre"
			size = [1.0, 1.0, 1.0]

			[[scene.vorton]]
			position = [0.5, 0.5, 0.5]
			vorticity = [0.5, 0.0, 0.0]
			"#,
		)
		.unwrap();

		let scene = &file.scenes[0];
		assert_eq!(scene.depth, 3);
		assert_eq!(scene.frames, 120);
		assert_eq!(scene.tracer_lattice, 30);
		assert_eq!(scene.vortons.len(), 1);
		assert_eq!(scene.solver.apply(SolverParams::DEFAULT), SolverParams::DEFAULT);
	}

	#[test]
	fn test_solver_overrides() {
		let file = SceneFile::parse(
			r#"
			[[scene]]
			name = "thick"
			size = [2.0, 1.0, 1.0]
			[scene.solver]
			viscosity = 0.5
			legacy_jacobian = true
			"#,
		)
		.unwrap();

		let params = file.scenes[0].solver.apply(SolverParams::DEFAULT);
		assert_eq!(params.viscosity, 0.5);
		assert_eq!(params.dt, SolverParams::DEFAULT.dt);
		assert_eq!(params.jacobian, JacobianScheme::LegacyXComponent);
	}

	#[test]
	fn test_rejects_invalid_scenes() {
		assert!(SceneFile::parse("").is_err(), "no scenes");
		assert!(SceneFile::parse("[[scene]]\nname = \"flat\"\nsize = [1.0, 0.0, 1.0]").is_err());
		assert!(SceneFile::parse("[[scene]]\nname = \"bare\"\nsize = [1.0, 1.0, 1.0]\ntracer_lattice = 0").is_err());
		assert!(SceneFile::parse("[[scene]]\nname = \"x\"\nsize = [1.0, 1.0, 1.0]\n[scene.solver]\ndt = -1.0").is_err());
	}
}
