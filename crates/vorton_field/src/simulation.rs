//! Simulation - one vorton fluid instance and its per-tick solver.
//!
//! ```text
//! tick():
//!   rebuild ──▶ diffuse ──▶ velocity_grid ──▶ stretch_tilt ──▶ advect vortons
//!
//! host, once per frame after the tick:
//!   advect_tracers ──▶ adapt_domain_to (adapt each point, recompute spacing)
//! ```
//!
//! Every mutating call takes `&mut self`, so a tick can never overlap tracer
//! advection, domain growth or vorton insertion on the same instance.
//! Separate instances share nothing and may be driven from different threads.

use glam::{UVec3, Vec3};
use tracing::{debug, error};
use web_time::Instant;

use crate::advection::{advect, AdvectionStats, Advected};
use crate::diffusion::diffuse;
use crate::domain::FieldDomain;
use crate::error::Result;
use crate::interpolate;
use crate::octree::{VortexNode, VortexTree};
use crate::params::SolverParams;
use crate::stretch::stretch_tilt;
use crate::velocity::velocity_grid;
use crate::vorton::{Vorton, VortonId, VortonSet};

/// Work done by one [`Simulation::tick`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TickStats {
  /// Vortons alive at the start of the tick.
  pub vortons: usize,
  /// Leaves holding at least one vorton.
  pub occupied_leaves: usize,
  /// Pairwise diffusion exchanges performed.
  pub diffusion_pairs: usize,
  /// Vortons updated by stretch/tilt.
  pub stretched: usize,
  /// Vortons moved by advection.
  pub advected: usize,
  /// Vortons outside the domain, skipped by advection.
  pub skipped: usize,
  /// Wall time of the whole tick in microseconds.
  pub timing_us: u64,
}

/// A vorton fluid simulation over a fixed-depth octree.
#[derive(Clone, Debug)]
pub struct Simulation {
  domain: FieldDomain,
  tree: VortexTree,
  vortons: VortonSet,
  params: SolverParams,
}

impl Simulation {
  /// Create a simulation covering `[0, size]` with default solver
  /// parameters. `depth` is clamped into `[MIN_DEPTH, MAX_DEPTH]`.
  pub fn new(size: Vec3, depth: u32) -> Result<Self> {
    Self::with_params(size, depth, SolverParams::DEFAULT)
  }

  pub fn with_params(size: Vec3, depth: u32, params: SolverParams) -> Result<Self> {
    let domain = FieldDomain::new(size, depth)?;
    let tree = VortexTree::new(domain.depth())
      .inspect_err(|err| error!(%err, depth = domain.depth(), "cannot create simulation"))?;

    debug!(?size, depth = domain.depth(), nodes = tree.len(), "created simulation");

    Ok(Self {
      domain,
      tree,
      vortons: VortonSet::new(),
      params,
    })
  }

  /// Advance the vorton field by one step of `params.dt`.
  #[cfg_attr(feature = "tracing-spans", tracing::instrument(skip_all, name = "simulation::tick"))]
  pub fn tick(&mut self) -> TickStats {
    let start = Instant::now();
    let mut stats = TickStats {
      vortons: self.vortons.len(),
      ..TickStats::default()
    };

    {
      #[cfg(feature = "tracing-spans")]
      let _span = tracing::info_span!("rebuild").entered();
      let rebuild = self.tree.rebuild(&self.domain, self.vortons.as_slice());
      stats.occupied_leaves = rebuild.occupied_leaves;
    }

    {
      #[cfg(feature = "tracing-spans")]
      let _span = tracing::info_span!("diffuse").entered();
      stats.diffusion_pairs = diffuse(&self.tree, self.vortons.as_mut_slice(), &self.params);
    }

    {
      #[cfg(feature = "tracing-spans")]
      let _span = tracing::info_span!("velocity_grid").entered();
      velocity_grid(&mut self.tree, &self.domain, self.params.core_radius);
    }

    {
      #[cfg(feature = "tracing-spans")]
      let _span = tracing::info_span!("stretch_tilt").entered();
      stats.stretched = stretch_tilt(&self.tree, &self.domain, self.vortons.as_mut_slice(), &self.params);
    }

    {
      #[cfg(feature = "tracing-spans")]
      let _span = tracing::info_span!("advect_vortons").entered();
      let advection = advect(&self.tree, &self.domain, self.vortons.as_mut_slice(), self.params.dt);
      stats.advected = advection.advected;
      stats.skipped = advection.skipped;
    }

    stats.timing_us = start.elapsed().as_micros() as u64;
    debug!(
      vortons = stats.vortons,
      occupied = stats.occupied_leaves,
      pairs = stats.diffusion_pairs,
      skipped = stats.skipped,
      timing_us = stats.timing_us,
      "tick"
    );

    stats
  }

  /// Advect host-owned points through the velocity field of the last tick.
  pub fn advect_tracers<T: Advected>(&self, points: &mut [T]) -> AdvectionStats {
    advect(&self.tree, &self.domain, points, self.params.dt)
  }

  /// Grow the domain so `point` stays two cells inside it.
  ///
  /// Call [`recompute_spacing`](Self::recompute_spacing) once all points of
  /// the frame have been seen.
  pub fn adapt_domain(&mut self, point: Vec3) -> bool {
    self.domain.adapt(point)
  }

  pub fn recompute_spacing(&mut self) {
    self.domain.recompute_spacing();
  }

  /// Adapt to every point, then recompute spacing once. Returns whether the
  /// domain grew.
  pub fn adapt_domain_to<T: Advected>(&mut self, points: &[T]) -> bool {
    let mut grew = false;
    for point in points {
      grew |= self.domain.adapt(point.position());
    }
    self.domain.recompute_spacing();
    if grew {
      debug!(origin = ?self.domain.origin(), size = ?self.domain.size(), "domain grew");
    }
    grew
  }

  /// Interpolated velocity at `pos`, or `None` outside the domain.
  pub fn interpolate_velocity(&self, pos: Vec3) -> Option<Vec3> {
    interpolate::interpolate_velocity(&self.tree, &self.domain, pos)
  }

  pub fn insert_vorton(&mut self, position: Vec3, vorticity: Vec3) -> VortonId {
    self.vortons.insert(Vorton::new(position, vorticity))
  }

  pub fn remove_vorton(&mut self, id: VortonId) -> Option<Vorton> {
    self.vortons.remove(id)
  }

  pub fn clear_vortons(&mut self) {
    self.vortons.clear();
  }

  /// Cached velocity of leaf `cell`, or `None` past the grid.
  pub fn leaf_velocity(&self, cell: UVec3) -> Option<Vec3> {
    let cells = self.domain.cells();
    if cell.cmpge(UVec3::splat(cells)).any() {
      return None;
    }
    Some(self.tree.leaf(cell).velocity)
  }

  pub fn node(&self, slot: usize) -> Option<&VortexNode> {
    self.tree.node(slot)
  }

  /// Flat tree slot of the leaf containing `pos`.
  pub fn leaf_slot_of(&self, pos: Vec3) -> Option<usize> {
    self.domain.leaf_slot(pos)
  }

  pub fn vortons(&self) -> &[Vorton] {
    self.vortons.as_slice()
  }

  pub fn vorton_set(&self) -> &VortonSet {
    &self.vortons
  }

  pub fn domain(&self) -> &FieldDomain {
    &self.domain
  }

  pub fn tree(&self) -> &VortexTree {
    &self.tree
  }

  pub fn params(&self) -> &SolverParams {
    &self.params
  }

  pub fn params_mut(&mut self) -> &mut SolverParams {
    &mut self.params
  }
}

#[cfg(test)]
#[path = "simulation_test.rs"]
mod simulation_test;
