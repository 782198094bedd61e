//! Morton (Z-order) cell codes and flat-tree level offsets.
//!
//! A level-`l` node is stored at `level_start(l) + cell_offset(x, y, z)`.
//! All functions here are pure and `const`.

use glam::UVec3;

/// Bits per axis supported by [`spread_bits`] (10 bits -> 30-bit code).
pub const AXIS_BITS: u32 = 10;

/// Insert two zero bits between each of the low 10 bits of `x`.
///
/// `0b1011` -> `0b001_000_001_001`
#[inline]
pub const fn spread_bits(x: u32) -> u32 {
  let mut x = x & ((1 << AXIS_BITS) - 1);
  x = (x | (x << 16)) & 0x0300_00ff;
  x = (x | (x << 8)) & 0x0300_f00f;
  x = (x | (x << 4)) & 0x030c_30c3;
  x = (x | (x << 2)) & 0x0924_9249;
  x
}

/// Inverse of [`spread_bits`]: gather every third bit back together.
#[inline]
pub const fn compact_bits(x: u32) -> u32 {
  let mut x = x & 0x0924_9249;
  x = (x | (x >> 2)) & 0x030c_30c3;
  x = (x | (x >> 4)) & 0x0300_f00f;
  x = (x | (x >> 8)) & 0xff00_00ff;
  x = (x | (x >> 16)) & 0x0000_03ff;
  x
}

/// Morton code of cell `(x, y, z)` within one octree level.
///
/// Bit 0 of every octal digit is X, bit 1 is Y, bit 2 is Z, so the low
/// three bits of a code are the octant within the parent.
#[inline]
pub const fn cell_offset(x: u32, y: u32, z: u32) -> u32 {
  spread_bits(x) | (spread_bits(y) << 1) | (spread_bits(z) << 2)
}

/// [`cell_offset`] for a `UVec3` cell coordinate.
#[inline]
pub fn cell_code(cell: UVec3) -> u32 {
  cell_offset(cell.x, cell.y, cell.z)
}

/// Recover the cell coordinate from a Morton code.
#[inline]
pub fn decode_cell_offset(code: u32) -> UVec3 {
  UVec3::new(compact_bits(code), compact_bits(code >> 1), compact_bits(code >> 2))
}

/// Number of nodes in levels `0..=level` of a complete octree (Σ 8^i).
///
/// `level_base(l) == 8 * level_base(l - 1) + 1`, so
/// `level_base(l) >> 3 == level_base(l - 1)`.
#[inline]
pub const fn level_base(level: u32) -> usize {
  (((1u64 << (3 * (level + 1))) - 1) / 7) as usize
}

/// Flat index of the first node of `level` (`level_base(level - 1)`, or 0
/// for the root level).
#[inline]
pub const fn level_start(level: u32) -> usize {
  if level == 0 {
    0
  } else {
    level_base(level - 1)
  }
}

/// Total node count of a complete octree whose leaves sit at `depth`.
#[inline]
pub const fn tree_size(depth: u32) -> usize {
  level_base(depth)
}

/// Flat index of the first of the eight children of `slot`.
#[inline]
pub const fn first_child(slot: usize) -> usize {
  (slot << 3) + 1
}

#[cfg(test)]
#[path = "index_test.rs"]
mod index_test;
