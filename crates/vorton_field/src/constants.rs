//! Numerical constants for the vorton field solver.
//!
//! Tunable quantities (viscosity, time step, tilt fudge, core radius) have
//! their defaults here and are carried at runtime by
//! [`SolverParams`](crate::params::SolverParams). Everything else is fixed.
//!
//! # Tree Layout
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────────┐
//! │                 FLAT COMPLETE OCTREE (depth D = 2)                   │
//! ├──────────────────────────────────────────────────────────────────────┤
//! │                                                                      │
//! │  slot:   0 │ 1 ........ 8 │ 9 ................................ 72     │
//! │          │ │              │                                          │
//! │  level:  0 │      1       │                  2 (leaves)              │
//! │                                                                      │
//! │  level_start(l) = Σ 8^i for i < l        = 0, 1, 9, 73, 585, ...     │
//! │  tree_size(D)   = level_start(D + 1)     = 1, 9, 73, 585, ...        │
//! │  slot(l, code)  = level_start(l) + code  (code = Morton index)       │
//! │                                                                      │
//! │  children(k)    = 8k + 1 ..= 8k + 8                                  │
//! │  parent(k)      = (k - 1) / 8                                        │
//! │                                                                      │
//! └──────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Since `level_start(l + 1) = 8 * level_start(l) + 1`, shifting a level's
//! start right by 3 yields the start of the level above.

/// Shallowest supported tree depth.
pub const MIN_DEPTH: u32 = 2;

/// Deepest supported tree depth. 10 bits per axis fill a 30-bit Morton code.
pub const MAX_DEPTH: u32 = 10;

/// Kinematic viscosity used by the diffusion exchange.
pub const DEFAULT_VISCOSITY: f32 = 0.01;

/// Fixed solver time step (one display frame at 60 Hz).
pub const DEFAULT_DT: f32 = 1.0 / 60.0;

/// Scale applied to the stretch/tilt rate before integration.
pub const DEFAULT_TILT_FUDGE: f32 = 0.2;

/// Core radius of the velocity kernel. Inside it the falloff is softened.
pub const DEFAULT_CORE_RADIUS: f32 = 50.0;

/// Kernel normalization (2/π).
pub const KERNEL_NORMALIZATION: f32 = std::f32::consts::FRAC_2_PI;

/// Floor for magnitude-weight sums so empty cells divide cleanly.
pub const WEIGHT_EPSILON: f32 = 1e-9;

/// Added to the squared separation in the kernel to avoid the singularity.
pub const DISTANCE_EPSILON: f32 = 0.001;

/// Number of cells a tracked point is kept away from the domain boundary.
pub const DOMAIN_MARGIN_CELLS: f32 = 2.0;

/// Clamp a requested depth into `[MIN_DEPTH, MAX_DEPTH]`.
#[inline]
pub const fn clamp_depth(depth: u32) -> u32 {
  if depth < MIN_DEPTH {
    MIN_DEPTH
  } else if depth > MAX_DEPTH {
    MAX_DEPTH
  } else {
    depth
  }
}

#[cfg(test)]
#[path = "constants_test.rs"]
mod constants_test;
