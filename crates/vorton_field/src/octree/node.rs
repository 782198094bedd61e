//! VortexNode - one slot of the flat octree.
//!
//! Leaves summarize the vortons bucketed into their cell; internal nodes
//! summarize their eight children. Positions are domain-local.

use glam::Vec3;

/// Aggregate record stored at every octree slot.
///
/// `weight` and `magnitude` are scratch values rebuilt every tick and hold
/// no meaning between ticks.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct VortexNode {
  /// Magnitude-weighted mean position (domain-local).
  pub position: Vec3,
  /// Magnitude-weighted mean vorticity.
  pub vorticity: Vec3,
  /// Cached velocity at the cell's lattice point (leaves only).
  pub velocity: Vec3,
  /// Sum of contributor magnitudes from the last averaging pass.
  pub weight: f32,
  /// `|vorticity|`, cached for the parent's averaging pass.
  pub magnitude: f32,
}

impl VortexNode {
  /// Node with no vorticity at the local origin.
  pub const ZERO: Self = Self {
    position: Vec3::ZERO,
    vorticity: Vec3::ZERO,
    velocity: Vec3::ZERO,
    weight: 0.0,
    magnitude: 0.0,
  };

  /// True when nothing beneath this node carries vorticity.
  #[inline]
  pub fn is_quiescent(&self) -> bool {
    self.vorticity == Vec3::ZERO
  }
}

/// Running magnitude-weighted average of (position, vorticity) pairs.
#[derive(Clone, Copy, Debug)]
pub(crate) struct WeightedMean {
  weight: f32,
  position: Vec3,
  vorticity: Vec3,
}

impl WeightedMean {
  pub(crate) fn new() -> Self {
    Self {
      weight: crate::constants::WEIGHT_EPSILON,
      position: Vec3::ZERO,
      vorticity: Vec3::ZERO,
    }
  }

  /// Add a contributor weighted by `magnitude`.
  #[inline]
  pub(crate) fn add(&mut self, position: Vec3, vorticity: Vec3, magnitude: f32) {
    self.weight += magnitude;
    self.position += position * magnitude;
    self.vorticity += vorticity * magnitude;
  }

  /// Write the mean into `node`, leaving its cached velocity untouched.
  #[inline]
  pub(crate) fn store(&self, node: &mut VortexNode) {
    node.weight = self.weight;
    node.position = self.position / self.weight;
    node.vorticity = self.vorticity / self.weight;
  }
}

#[cfg(test)]
#[path = "node_test.rs"]
mod node_test;
