//! Error type for simulation construction.
//!
//! Once a [`Simulation`](crate::Simulation) exists no operation on it can
//! fail: out-of-domain queries are reported through `Option` and
//! [`AdvectionStats`](crate::AdvectionStats) instead of errors.

use glam::Vec3;
use thiserror::Error;

/// Errors raised while creating a simulation.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum FieldError {
  /// Tree or bucket storage could not be reserved.
  #[error("failed to allocate {nodes} octree nodes")]
  AllocationFailure { nodes: usize },

  /// The domain extent is zero, negative, or not finite.
  #[error("domain extent must be finite and positive, got {size:?}")]
  InvalidExtent { size: Vec3 },
}

pub type Result<T> = std::result::Result<T, FieldError>;
