//! FieldDomain - the world-space box covered by the leaf grid.
//!
//! The grid resolution (`cells` per axis) is fixed by the tree depth. Only
//! the box (origin and size) and the derived cell spacing change at runtime,
//! when the domain grows to follow wandering particles.

use glam::{UVec3, Vec3};
use tracing::warn;

use crate::constants::{clamp_depth, DOMAIN_MARGIN_CELLS};
use crate::error::{FieldError, Result};
use crate::octree::index::{cell_offset, level_start};

/// World-space extent and leaf-grid spacing of a simulation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FieldDomain {
	depth: u32,
	cells: u32,
	/// Minimum corner in world space.
	pub(crate) origin: Vec3,
	/// Extent along each axis.
	pub(crate) size: Vec3,
	/// Leaf cell edge lengths (`size / cells`).
	pub(crate) step: Vec3,
	/// Cached reciprocal of `step`.
	pub(crate) inv_step: Vec3,
}

impl FieldDomain {
	/// Create a domain anchored at the world origin.
	///
	/// `depth` is clamped into `[MIN_DEPTH, MAX_DEPTH]`.
	pub fn new(size: Vec3, depth: u32) -> Result<Self> {
		if !size.is_finite() || size.min_element() <= 0.0 {
			return Err(FieldError::InvalidExtent { size });
		}
		let depth = clamp_depth(depth);
		let mut domain = Self {
			depth,
			cells: 1 << depth,
			origin: Vec3::ZERO,
			size,
			step: Vec3::ZERO,
			inv_step: Vec3::ZERO,
		};
		domain.recompute_spacing();
		Ok(domain)
	}

	#[inline]
	pub fn depth(&self) -> u32 {
		self.depth
	}

	/// Leaf cells per axis (`2^depth`).
	#[inline]
	pub fn cells(&self) -> u32 {
		self.cells
	}

	#[inline]
	pub fn origin(&self) -> Vec3 {
		self.origin
	}

	#[inline]
	pub fn size(&self) -> Vec3 {
		self.size
	}

	#[inline]
	pub fn step(&self) -> Vec3 {
		self.step
	}

	#[inline]
	pub fn inv_step(&self) -> Vec3 {
		self.inv_step
	}

	/// Maximum corner in world space.
	#[inline]
	pub fn max(&self) -> Vec3 {
		self.origin + self.size
	}

	/// Convert a world position into domain-local coordinates.
	#[inline]
	pub fn to_local(&self, pos: Vec3) -> Vec3 {
		pos - self.origin
	}

	/// Check if a world position lies inside `[origin, origin + size]`.
	#[inline]
	pub fn contains(&self, pos: Vec3) -> bool {
		let local = self.to_local(pos);
		local.cmpge(Vec3::ZERO).all() && local.cmple(self.size).all()
	}

	/// Leaf cell containing `pos`, or `None` outside the domain.
	///
	/// A point on the far face belongs to the last cell on that axis.
	pub fn cell_of(&self, pos: Vec3) -> Option<UVec3> {
		if !self.contains(pos) {
			return None;
		}
		let grid = self.to_local(pos) * self.inv_step;
		Some(grid.as_uvec3().min(UVec3::splat(self.cells - 1)))
	}

	/// Flat tree slot of the leaf containing `pos`, or `None` outside the
	/// domain.
	pub fn leaf_slot(&self, pos: Vec3) -> Option<usize> {
		self.cell_of(pos)
			.map(|cell| level_start(self.depth) + cell_offset(cell.x, cell.y, cell.z) as usize)
	}

	/// World position of a leaf's lattice point (its minimum corner).
	#[inline]
	pub fn lattice_point(&self, cell: UVec3) -> Vec3 {
		self.origin + cell.as_vec3() * self.step
	}

	/// Grow the box so `point` stays at least two cells inside it.
	///
	/// The box never shrinks: moving the origin down also extends the size so
	/// the far face stays put. Returns whether anything changed. Cell spacing
	/// is left alone until [`recompute_spacing`](Self::recompute_spacing).
	pub fn adapt(&mut self, point: Vec3) -> bool {
		if !point.is_finite() {
			warn!(?point, "ignoring non-finite point in domain adaptation");
			return false;
		}

		let margin = self.step * DOMAIN_MARGIN_CELLS;
		let mut grew = false;

		for axis in 0..3 {
			if point[axis] < self.origin[axis] + margin[axis] {
				let origin = point[axis] - margin[axis];
				self.size[axis] += self.origin[axis] - origin;
				self.origin[axis] = origin;
				grew = true;
			}
			if point[axis] > self.origin[axis] + self.size[axis] - margin[axis] {
				self.size[axis] = point[axis] - self.origin[axis] + margin[axis];
				grew = true;
			}
		}

		grew
	}

	/// Recompute `step` and its reciprocal from the current size.
	///
	/// Grid topology is untouched: `cells` and the tree size are fixed.
	pub fn recompute_spacing(&mut self) {
		self.step = self.size / self.cells as f32;
		self.inv_step = self.step.recip();
	}
}

/// Flat tree slot of the level-`depth` node containing `pos`.
///
/// The caller must ensure `pos` lies in `[origin, origin + size)` on every
/// axis; the result is meaningless otherwise.
#[inline]
pub fn world_to_leaf_slot(domain: &FieldDomain, depth: u32, pos: Vec3) -> usize {
	let segments = (1u32 << depth) as f32;
	let cell = (domain.to_local(pos) / (domain.size / segments)).as_uvec3();
	cell_offset(cell.x, cell.y, cell.z) as usize + level_start(depth)
}

#[cfg(test)]
#[path = "domain_test.rs"]
mod domain_test;
