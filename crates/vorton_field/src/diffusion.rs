//! Viscous diffusion by pairwise vorticity exchange between neighbouring
//! vortons.
//!
//! Only interior cells are visited (the last layer on each axis is skipped),
//! and only the forward neighbours `+x`, `+y`, `+z`: each exchange updates
//! both sides, so a backward visit would count the pair twice.

use glam::{UVec3, Vec3};

use crate::octree::VortexTree;
use crate::params::SolverParams;
use crate::vorton::Vorton;

/// Move `rate` of the difference from `left` toward `right`.
///
/// Returns the updated pair. `left + right` is unchanged.
#[inline]
pub fn exchange_vorticity(left: Vec3, right: Vec3, rate: f32) -> (Vec3, Vec3) {
  let exchange = (left - right) * rate;
  (left - exchange, right + exchange)
}

#[inline]
fn exchange_pair(vortons: &mut [Vorton], a: usize, b: usize, rate: f32) {
  let (left, right) = exchange_vorticity(vortons[a].vorticity, vortons[b].vorticity, rate);
  vortons[a].vorticity = left;
  vortons[b].vorticity = right;
}

/// Diffuse vorticity across the leaf grid. Returns the number of pairwise
/// exchanges performed.
///
/// `tree` must have been rebuilt from `vortons` this tick.
pub fn diffuse(tree: &VortexTree, vortons: &mut [Vorton], params: &SolverParams) -> usize {
  let rate = params.exchange_rate();
  let decay = 1.0 - rate;
  let interior = tree.cells() - 1;
  let mut pairs = 0;

  for x in 0..interior {
    for y in 0..interior {
      for z in 0..interior {
        let cell = UVec3::new(x, y, z);
        let neighbours = [cell + UVec3::X, cell + UVec3::Y, cell + UVec3::Z];

        for this in tree.chain(cell) {
          for other in tree.chain_after(this) {
            exchange_pair(vortons, this, other, rate);
            pairs += 1;
          }
          for &neighbour in &neighbours {
            for other in tree.chain(neighbour) {
              exchange_pair(vortons, this, other, rate);
              pairs += 1;
            }
          }
          vortons[this].vorticity *= decay;
        }
      }
    }
  }

  pairs
}

#[cfg(test)]
#[path = "diffusion_test.rs"]
mod diffusion_test;
