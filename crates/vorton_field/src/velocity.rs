//! Multi-resolution velocity evaluation over the vorticity octree.
//!
//! The velocity at a leaf's lattice point is gathered in O(depth): the
//! leaf's own aggregate, then at each coarser level the seven siblings of
//! the branch the walk came from. Distant mass is therefore seen only as
//! the aggregate of the coarsest node that separates it from the query.
//!
//! ```text
//!  level 1:  [ s ][ s ][ s ][ s ][ s ][ s ][ s ][ ↑ ]   7 siblings
//!  level 2:  [ s ][ s ][ ↑ ][ s ][ s ][ s ][ s ][ s ]   7 siblings
//!  level 3:  [ s ][ s ][ s ][ s ][ q ][ s ][ s ][ s ]   leaf q + 7 siblings
//! ```

use glam::{UVec3, Vec3};

use crate::constants::{DISTANCE_EPSILON, KERNEL_NORMALIZATION};
use crate::domain::FieldDomain;
use crate::octree::index::{cell_code, level_start};
use crate::octree::{VortexNode, VortexTree};

/// Velocity induced at `query` by one aggregate node (both domain-local).
///
/// Biot-Savart with a softened core: inside `core_radius` the falloff is
/// `1/(r R^2)` rather than `1/r^3`.
#[inline]
pub fn kernel(query: Vec3, node: &VortexNode, core_radius: f32) -> Vec3 {
  let offset = query - node.position;
  let distance = offset.length_squared() + DISTANCE_EPSILON;
  let inv_distance = distance.sqrt().recip();
  let radius_sq = core_radius * core_radius;
  let law = if distance < radius_sq {
    inv_distance / radius_sq
  } else {
    inv_distance / distance
  };

  let vorticity = node.vorticity * (KERNEL_NORMALIZATION * radius_sq * core_radius);
  vorticity.cross(offset * law)
}

/// Velocity at the lattice point of leaf `cell`.
pub fn velocity_at_leaf(tree: &VortexTree, domain: &FieldDomain, cell: UVec3, core_radius: f32) -> Vec3 {
  let nodes = tree.nodes();
  let query = cell.as_vec3() * domain.step();

  let mut code = cell_code(cell) as usize;
  let mut level = tree.depth();
  let mut layer = level_start(level);

  let mut velocity = kernel(query, &nodes[layer + code], core_radius);

  while level > 0 {
    let siblings = layer + (code & !7);
    let branch = code & 7;
    for octant in (0..8).filter(|&o| o != branch) {
      velocity += kernel(query, &nodes[siblings + octant], core_radius);
    }
    code >>= 3;
    layer >>= 3;
    level -= 1;
  }

  velocity
}

/// Evaluate and cache the velocity of every leaf except the boundary layer
/// at index 0 on each axis. Returns the number of leaves evaluated.
pub fn velocity_grid(tree: &mut VortexTree, domain: &FieldDomain, core_radius: f32) -> usize {
  let cells = tree.cells();
  let mut evaluated = 0;

  for x in 1..cells {
    for y in 1..cells {
      for z in 1..cells {
        let cell = UVec3::new(x, y, z);
        let velocity = velocity_at_leaf(tree, domain, cell, core_radius);
        tree.leaf_mut(cell).velocity = velocity;
        evaluated += 1;
      }
    }
  }

  evaluated
}

#[cfg(test)]
#[path = "velocity_test.rs"]
mod velocity_test;
