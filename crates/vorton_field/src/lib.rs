//! vorton_field - vortex particle fluid simulation on a flat octree
//!
//! Vorticity is carried by free particles ("vortons"). Every tick they are
//! bucketed into the leaves of a fixed-depth octree whose internal nodes
//! hold magnitude-weighted aggregates. Velocity at each leaf lattice point
//! is gathered from the leaf and, level by level, the seven sibling
//! aggregates of its ancestors, giving an O(depth) Barnes-Hut style query.
//!
//! # Features
//!
//! - **Viscous diffusion**: pairwise vorticity exchange between neighbouring
//!   leaves plus isotropic decay
//! - **Stretch and tilt**: finite-difference velocity gradient applied to
//!   each vorton's vorticity
//! - **Tracer advection**: trilinear interpolation of the cached leaf
//!   velocities for any host-owned point type
//! - **Domain tracking**: the world box grows to follow particles while the
//!   grid topology stays fixed
//!
//! # Example
//!
//! ```
//! use glam::Vec3;
//! use vorton_field::{seed_tracer_lattice, Simulation};
//!
//! let mut sim = Simulation::new(Vec3::ONE, 4).unwrap();
//! sim.insert_vorton(Vec3::splat(0.5), Vec3::new(0.0, 0.0, 0.5));
//!
//! let mut tracers = seed_tracer_lattice(8, Vec3::ZERO, Vec3::ONE, |_| ());
//! for _ in 0..10 {
//!   sim.tick();
//!   sim.advect_tracers(&mut tracers);
//!   sim.adapt_domain_to(&tracers);
//! }
//! ```

pub mod constants;
pub mod error;

pub use constants::{MAX_DEPTH, MIN_DEPTH};
pub use error::{FieldError, Result};

// Octree storage and indexing
pub mod octree;
pub use octree::{RebuildStats, VortexNode, VortexTree};

pub mod domain;
pub use domain::{world_to_leaf_slot, FieldDomain};

pub mod params;
pub use params::{JacobianScheme, SolverParams};

pub mod vorton;
pub use vorton::{Vorton, VortonId, VortonSet};

// Solver phases
pub mod advection;
pub mod diffusion;
pub mod interpolate;
pub mod stretch;
pub mod velocity;
pub use advection::{advect, AdvectionStats, Advected};
pub use interpolate::interpolate_velocity;

pub mod tracer;
pub use tracer::{lattice_colour, seed_tracer_lattice, Tracer};

pub mod simulation;
pub use simulation::{Simulation, TickStats};
