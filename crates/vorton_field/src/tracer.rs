//! Passive tracer particles owned by the host.

use glam::{UVec3, Vec3};

use crate::advection::Advected;

/// A point carried by the flow with an opaque payload (colour, id, ...).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Tracer<P> {
  pub position: Vec3,
  pub payload: P,
}

impl<P> Tracer<P> {
  pub fn new(position: Vec3, payload: P) -> Self {
    Self { position, payload }
  }
}

impl<P> Advected for Tracer<P> {
  #[inline]
  fn position(&self) -> Vec3 {
    self.position
  }

  #[inline]
  fn set_position(&mut self, position: Vec3) {
    self.position = position;
  }
}

/// Seed an `n × n × n` lattice of tracers starting at `origin` with spacing
/// `extent / n`.
///
/// The payload is computed from each tracer's lattice coordinate. Ordering
/// is X-major, Z innermost.
pub fn seed_tracer_lattice<P>(n: u32, origin: Vec3, extent: Vec3, mut payload: impl FnMut(UVec3) -> P) -> Vec<Tracer<P>> {
  if n == 0 {
    return Vec::new();
  }
  let spacing = extent / n as f32;
  let mut tracers = Vec::with_capacity((n as usize).pow(3));
  for x in 0..n {
    for y in 0..n {
      for z in 0..n {
        let coord = UVec3::new(x, y, z);
        tracers.push(Tracer::new(origin + coord.as_vec3() * spacing, payload(coord)));
      }
    }
  }
  tracers
}

/// RGBA colour ramp over a lattice coordinate: red follows X, green Y,
/// blue Z.
pub fn lattice_colour(coord: UVec3, n: u32) -> [u8; 4] {
  let scale = 255.0 / n.max(1) as f32;
  let channel = |c: u32| (c as f32 * scale) as u8;
  [channel(coord.x), channel(coord.y), channel(coord.z), 255]
}
