//! Advection of vortons and passive tracers through the interpolated
//! velocity field.
//!
//! Points outside the domain are skipped for the step and left where they
//! are; the skip count is reported so hosts can see when their domain
//! tracking falls behind.

use glam::Vec3;
use tracing::trace;

use crate::domain::FieldDomain;
use crate::interpolate::interpolate_velocity;
use crate::octree::VortexTree;
use crate::vorton::Vorton;

/// Anything with a position that can be carried by the flow.
pub trait Advected {
  fn position(&self) -> Vec3;
  fn set_position(&mut self, position: Vec3);
}

impl Advected for Vec3 {
  #[inline]
  fn position(&self) -> Vec3 {
    *self
  }

  #[inline]
  fn set_position(&mut self, position: Vec3) {
    *self = position;
  }
}

impl Advected for Vorton {
  #[inline]
  fn position(&self) -> Vec3 {
    self.position
  }

  #[inline]
  fn set_position(&mut self, position: Vec3) {
    self.position = position;
  }
}

/// Outcome of one advection pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AdvectionStats {
  /// Points moved by the interpolated velocity.
  pub advected: usize,
  /// Points outside the domain, left unchanged.
  pub skipped: usize,
}

impl AdvectionStats {
  /// True when every point was advected.
  #[inline]
  pub fn all_advected(&self) -> bool {
    self.skipped == 0
  }
}

impl std::ops::AddAssign for AdvectionStats {
  fn add_assign(&mut self, other: Self) {
    self.advected += other.advected;
    self.skipped += other.skipped;
  }
}

/// Euler-step every point by `velocity * dt`.
pub fn advect<T: Advected>(tree: &VortexTree, domain: &FieldDomain, points: &mut [T], dt: f32) -> AdvectionStats {
  let mut stats = AdvectionStats::default();

  for (index, point) in points.iter_mut().enumerate() {
    let position = point.position();
    match interpolate_velocity(tree, domain, position) {
      Some(velocity) => {
        point.set_position(position + velocity * dt);
        stats.advected += 1;
      }
      None => {
        trace!(index, ?position, "skipping advection outside domain");
        stats.skipped += 1;
      }
    }
  }

  stats
}

#[cfg(test)]
#[path = "advection_test.rs"]
mod advection_test;
