//! Vortex stretching and tilting: `dω/dt = (ω · ∇) v`.
//!
//! The velocity gradient is estimated per leaf cell by forward differences
//! against the `+x`, `+y`, `+z` neighbours' cached velocities. On the last
//! layer the neighbour index is clamped to the cell itself.

use glam::{Mat3, UVec3, Vec3};

use crate::domain::FieldDomain;
use crate::octree::VortexTree;
use crate::params::{JacobianScheme, SolverParams};
use crate::vorton::Vorton;

/// Velocity gradient at leaf `cell`, as a matrix with `J * ω` giving the
/// stretch/tilt rate.
pub fn velocity_gradient(tree: &VortexTree, domain: &FieldDomain, cell: UVec3, scheme: JacobianScheme) -> Mat3 {
  let last = domain.cells() - 1;
  let neighbour = |axis: UVec3| (cell + axis).min(UVec3::splat(last));

  let v = tree.leaf(cell).velocity;
  let vx = tree.leaf(neighbour(UVec3::X)).velocity;
  let vy = tree.leaf(neighbour(UVec3::Y)).velocity;
  let vz = tree.leaf(neighbour(UVec3::Z)).velocity;
  let inv = domain.inv_step();

  match scheme {
    JacobianScheme::Componentwise => {
      // Column j is ∂v/∂x_j
      Mat3::from_cols((vx - v) * inv.x, (vy - v) * inv.y, (vz - v) * inv.z)
    }
    JacobianScheme::LegacyXComponent => {
      let rows = Vec3::new(v.x - vx.x, v.y - vy.x, v.z - vz.x);
      Mat3::from_cols(rows * inv.x, rows * inv.y, rows * inv.z)
    }
  }
}

/// Integrate stretch/tilt into every in-domain vorton. Returns how many
/// vortons were updated.
///
/// Reads the cached leaf velocities, so it must run after the velocity grid.
pub fn stretch_tilt(tree: &VortexTree, domain: &FieldDomain, vortons: &mut [Vorton], params: &SolverParams) -> usize {
  let scale = params.stretch_scale();
  let mut stretched = 0;

  for vorton in vortons.iter_mut() {
    let Some(cell) = domain.cell_of(vorton.position) else {
      continue;
    };
    let jacobian = velocity_gradient(tree, domain, cell, params.jacobian);
    vorton.vorticity += jacobian * vorton.vorticity * scale;
    stretched += 1;
  }

  stretched
}

#[cfg(test)]
#[path = "stretch_test.rs"]
mod stretch_test;
