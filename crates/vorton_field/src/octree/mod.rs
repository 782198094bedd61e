//! Flat complete octree holding the vorticity field.
//!
//! Every level is stored densely in one array, root first. A node's
//! children and parent are found by index arithmetic alone:
//!
//! ```text
//! children(k) = 8k + 1 ..= 8k + 8
//! parent(k)   = (k - 1) / 8
//! leaf(x,y,z) = level_start(depth) + morton(x, y, z)
//! ```
//!
//! # Module Structure
//!
//! - [`index`]: Morton codes and level offsets
//! - [`node`]: `VortexNode` - per-slot aggregate record
//! - [`tree`]: `VortexTree` - node array, leaf chains and the rebuild pass

pub mod index;
pub mod node;
pub mod tree;

// Re-exports
pub use node::VortexNode;
pub use tree::{Chain, RebuildStats, VortexTree};
