//! Trilinear interpolation of the cached leaf velocities.
//!
//! Cell corners (binary: ZYX):
//!
//! ```text
//!        c011 ─────── c111
//!        /│           /│
//!     c010 ─────── c110│
//!       │ c001 ──────┼─c101
//!       │/           │/
//!     c000 ─────── c100
//! ```

use glam::{UVec3, Vec3};

use crate::domain::FieldDomain;
use crate::octree::VortexTree;

/// Interpolate the velocity at world position `pos`.
///
/// Returns `None` when `pos` lies outside `[origin, origin + size]` on any
/// axis. Corner indices past the last cell are clamped, so the far faces
/// take the last cell's value.
pub fn interpolate_velocity(tree: &VortexTree, domain: &FieldDomain, pos: Vec3) -> Option<Vec3> {
  let cell = domain.cell_of(pos)?;
  let last = UVec3::splat(domain.cells() - 1);

  let grid = domain.to_local(pos) * domain.inv_step();
  let t = (grid - cell.as_vec3()).clamp(Vec3::ZERO, Vec3::ONE);
  let far = (cell + UVec3::ONE).min(last);

  let corner = |x: u32, y: u32, z: u32| tree.leaf(UVec3::new(x, y, z)).velocity;

  let c00 = corner(cell.x, cell.y, cell.z).lerp(corner(cell.x, cell.y, far.z), t.z);
  let c01 = corner(cell.x, far.y, cell.z).lerp(corner(cell.x, far.y, far.z), t.z);
  let c10 = corner(far.x, cell.y, cell.z).lerp(corner(far.x, cell.y, far.z), t.z);
  let c11 = corner(far.x, far.y, cell.z).lerp(corner(far.x, far.y, far.z), t.z);

  let c0 = c00.lerp(c01, t.y);
  let c1 = c10.lerp(c11, t.y);

  Some(c0.lerp(c1, t.x))
}

#[cfg(test)]
#[path = "interpolate_test.rs"]
mod interpolate_test;
