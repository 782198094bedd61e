//! VortexTree - flat complete octree with per-leaf vorton chains.
//!
//! ```text
//! nodes:  [ root | level 1 (8) | ... | leaves (8^D) ]   VortexNode per slot
//! heads:  [ leaf code -> first vorton index | None ]    8^D entries
//! next:   [ vorton index -> next vorton index | None ]  one per vorton
//! ```
//!
//! Chains are index-linked lists threaded through `next`, so bucketing is an
//! O(1) prepend and nothing points into the vorton storage.

use glam::UVec3;

use super::index::{cell_code, first_child, level_start, tree_size};
use super::node::{VortexNode, WeightedMean};
use crate::domain::FieldDomain;
use crate::error::{FieldError, Result};
use crate::vorton::Vorton;

/// Complete octree of fixed depth stored in one flat array.
#[derive(Clone, Debug)]
pub struct VortexTree {
  depth: u32,
  nodes: Vec<VortexNode>,
  heads: Vec<Option<u32>>,
  next: Vec<Option<u32>>,
}

/// Counts from one rebuild.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RebuildStats {
  /// Vortons placed into a leaf chain.
  pub bucketed: usize,
  /// Vortons outside the domain, left out of the tree this tick.
  pub outside: usize,
  /// Leaves holding at least one vorton.
  pub occupied_leaves: usize,
}

impl VortexTree {
  /// Allocate a zeroed tree with leaves at `depth`.
  ///
  /// Storage is reserved fallibly; a failed reservation is reported instead
  /// of aborting the process.
  pub fn new(depth: u32) -> Result<Self> {
    let len = tree_size(depth);
    let leaves = len - level_start(depth);

    let mut nodes = Vec::new();
    nodes
      .try_reserve_exact(len)
      .map_err(|_| FieldError::AllocationFailure { nodes: len })?;
    nodes.resize(len, VortexNode::ZERO);

    let mut heads = Vec::new();
    heads
      .try_reserve_exact(leaves)
      .map_err(|_| FieldError::AllocationFailure { nodes: len })?;
    heads.resize(leaves, None);

    Ok(Self {
      depth,
      nodes,
      heads,
      next: Vec::new(),
    })
  }

  #[inline]
  pub fn depth(&self) -> u32 {
    self.depth
  }

  /// Leaf cells per axis.
  #[inline]
  pub fn cells(&self) -> u32 {
    1 << self.depth
  }

  /// Total number of slots.
  #[inline]
  pub fn len(&self) -> usize {
    self.nodes.len()
  }

  /// Always false: a tree holds at least a root and one level of leaves.
  #[inline]
  pub fn is_empty(&self) -> bool {
    self.nodes.is_empty()
  }

  /// Flat index of the first leaf.
  #[inline]
  pub fn leaf_base(&self) -> usize {
    level_start(self.depth)
  }

  /// Number of leaf slots (`8^depth`).
  #[inline]
  pub fn leaf_count(&self) -> usize {
    self.heads.len()
  }

  #[inline]
  pub fn nodes(&self) -> &[VortexNode] {
    &self.nodes
  }

  #[inline]
  pub fn node(&self, slot: usize) -> Option<&VortexNode> {
    self.nodes.get(slot)
  }

  /// Flat index of the leaf at `cell`. `cell` must be inside the grid.
  #[inline]
  pub fn leaf_slot(&self, cell: UVec3) -> usize {
    self.leaf_base() + cell_code(cell) as usize
  }

  #[inline]
  pub fn leaf(&self, cell: UVec3) -> &VortexNode {
    &self.nodes[self.leaf_slot(cell)]
  }

  #[inline]
  pub fn leaf_mut(&mut self, cell: UVec3) -> &mut VortexNode {
    let slot = self.leaf_slot(cell);
    &mut self.nodes[slot]
  }

  /// Iterate over the vorton indices bucketed into `cell`.
  pub fn chain(&self, cell: UVec3) -> Chain<'_> {
    Chain {
      next: &self.next,
      cursor: self.heads[cell_code(cell) as usize],
    }
  }

  /// Iterate over the vortons that follow `index` in its leaf chain.
  pub fn chain_after(&self, index: usize) -> Chain<'_> {
    Chain {
      next: &self.next,
      cursor: self.next.get(index).copied().flatten(),
    }
  }

  /// Rebuild the tree from scratch for the current vortons.
  ///
  /// 1. Reset every node and chain link
  /// 2. Bucket each in-domain vorton into its leaf chain
  /// 3. Average each leaf chain (magnitude-weighted, domain-local)
  /// 4. Average children into parents, leaves up to the root
  pub fn rebuild(&mut self, domain: &FieldDomain, vortons: &[Vorton]) -> RebuildStats {
    self.reset(vortons.len());
    let (bucketed, outside) = self.bucket(domain, vortons);
    let occupied_leaves = self.average_leaves(domain, vortons);
    self.propagate();

    RebuildStats {
      bucketed,
      outside,
      occupied_leaves,
    }
  }

  /// Zero every node and clear every chain link.
  pub fn reset(&mut self, vorton_count: usize) {
    self.nodes.fill(VortexNode::ZERO);
    self.heads.fill(None);
    self.next.clear();
    self.next.resize(vorton_count, None);
  }

  /// Prepend each in-domain vorton onto its leaf's chain.
  ///
  /// Returns `(bucketed, outside)`.
  fn bucket(&mut self, domain: &FieldDomain, vortons: &[Vorton]) -> (usize, usize) {
    let mut outside = 0;
    for (index, vorton) in vortons.iter().enumerate() {
      let Some(cell) = domain.cell_of(vorton.position) else {
        tracing::trace!(index, position = ?vorton.position, "vorton outside domain, not bucketed");
        outside += 1;
        continue;
      };
      let code = cell_code(cell) as usize;
      self.next[index] = self.heads[code];
      self.heads[code] = Some(index as u32);
    }
    (vortons.len() - outside, outside)
  }

  /// Weighted average of each leaf's chain. Returns the occupied leaf count.
  fn average_leaves(&mut self, domain: &FieldDomain, vortons: &[Vorton]) -> usize {
    let base = self.leaf_base();
    let origin = domain.origin();
    let mut occupied = 0;

    for code in 0..self.heads.len() {
      let mut mean = WeightedMean::new();
      let mut cursor = self.heads[code];
      if cursor.is_some() {
        occupied += 1;
      }
      while let Some(index) = cursor {
        let vorton = &vortons[index as usize];
        mean.add(vorton.position, vorton.vorticity, vorton.vorticity.length());
        cursor = self.next[index as usize];
      }

      let node = &mut self.nodes[base + code];
      mean.store(node);
      node.position -= origin;
    }

    occupied
  }

  /// Average children into parents for every internal node, bottom-up.
  fn propagate(&mut self) {
    for parent in (0..self.leaf_base()).rev() {
      let first = first_child(parent);
      let mut mean = WeightedMean::new();
      for child in &mut self.nodes[first..first + 8] {
        child.magnitude = child.vorticity.length();
        mean.add(child.position, child.vorticity, child.magnitude);
      }
      mean.store(&mut self.nodes[parent]);
    }
  }
}

/// Iterator over vorton indices in one leaf chain.
pub struct Chain<'a> {
  next: &'a [Option<u32>],
  cursor: Option<u32>,
}

impl Iterator for Chain<'_> {
  type Item = usize;

  #[inline]
  fn next(&mut self) -> Option<usize> {
    let index = self.cursor? as usize;
    self.cursor = self.next[index];
    Some(index)
  }
}

#[cfg(test)]
#[path = "tree_test.rs"]
mod tree_test;
