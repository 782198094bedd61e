//! Runtime solver parameters.

use crate::constants::{DEFAULT_CORE_RADIUS, DEFAULT_DT, DEFAULT_TILT_FUDGE, DEFAULT_VISCOSITY};

/// How the velocity gradient for stretch/tilt is assembled from the cached
/// leaf velocities.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum JacobianScheme {
	/// Forward differences per component: `J[i][j] = (v_i(c + e_j) - v_i(c)) / step_j`.
	#[default]
	Componentwise,
	/// The historical expression: row `i` is `(v_i(c) - v_x(c + e_i))`
	/// divided by each step length. Kept for comparison runs only.
	LegacyXComponent,
}

/// Tunable solver parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SolverParams {
	/// Viscosity used for pairwise exchange and decay.
	pub viscosity: f32,
	/// Time step for diffusion, stretching and advection.
	pub dt: f32,
	/// Scale on the stretch/tilt rate.
	pub tilt_fudge: f32,
	/// Core radius of the velocity kernel.
	pub core_radius: f32,
	/// Velocity gradient scheme for stretch/tilt.
	pub jacobian: JacobianScheme,
}

impl SolverParams {
	/// Default parameters.
	pub const DEFAULT: Self = Self {
		viscosity: DEFAULT_VISCOSITY,
		dt: DEFAULT_DT,
		tilt_fudge: DEFAULT_TILT_FUDGE,
		core_radius: DEFAULT_CORE_RADIUS,
		jacobian: JacobianScheme::Componentwise,
	};

	/// Parameters with diffusion switched off.
	pub const INVISCID: Self = Self {
		viscosity: 0.0,
		..Self::DEFAULT
	};

	/// Fraction of a vorticity difference exchanged per pair per tick.
	#[inline]
	pub fn exchange_rate(&self) -> f32 {
		self.viscosity * self.dt
	}

	/// Scale applied to the stretch/tilt rate per tick.
	#[inline]
	pub fn stretch_scale(&self) -> f32 {
		self.tilt_fudge * self.dt
	}
}

impl Default for SolverParams {
	fn default() -> Self {
		Self::DEFAULT
	}
}
