//! Vortons and the set that owns them.
//!
//! A vorton is a point carrier of vorticity. The set lives outside the
//! octree and is re-bucketed into it every tick.

use glam::Vec3;

/// Stable handle to a vorton, valid until it is removed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VortonId(u64);

impl VortonId {
  /// Get the raw ID value.
  pub fn raw(&self) -> u64 {
    self.0
  }
}

/// A free vortex element.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vorton {
  /// World-space position.
  pub position: Vec3,
  /// Vorticity vector.
  pub vorticity: Vec3,
}

impl Vorton {
  pub fn new(position: Vec3, vorticity: Vec3) -> Self {
    Self {
      position,
      vorticity,
    }
  }
}

/// Dynamic collection of vortons with stable ids.
///
/// Storage is dense; ids are kept in a parallel array so tree chains can
/// address vortons by position in [`as_slice`](Self::as_slice).
#[derive(Clone, Debug, Default)]
pub struct VortonSet {
  vortons: Vec<Vorton>,
  ids: Vec<VortonId>,
  next_id: u64,
}

impl VortonSet {
  pub fn new() -> Self {
    Self::default()
  }

  /// Add a vorton and return its handle.
  pub fn insert(&mut self, vorton: Vorton) -> VortonId {
    let id = VortonId(self.next_id);
    self.next_id += 1;
    self.vortons.push(vorton);
    self.ids.push(id);
    id
  }

  /// Remove a vorton by handle. Order of the remaining vortons may change.
  pub fn remove(&mut self, id: VortonId) -> Option<Vorton> {
    let index = self.ids.iter().position(|&other| other == id)?;
    self.ids.swap_remove(index);
    Some(self.vortons.swap_remove(index))
  }

  pub fn get(&self, id: VortonId) -> Option<&Vorton> {
    let index = self.ids.iter().position(|&other| other == id)?;
    self.vortons.get(index)
  }

  pub fn get_mut(&mut self, id: VortonId) -> Option<&mut Vorton> {
    let index = self.ids.iter().position(|&other| other == id)?;
    self.vortons.get_mut(index)
  }

  pub fn clear(&mut self) {
    self.vortons.clear();
    self.ids.clear();
  }

  pub fn len(&self) -> usize {
    self.vortons.len()
  }

  pub fn is_empty(&self) -> bool {
    self.vortons.is_empty()
  }

  pub fn as_slice(&self) -> &[Vorton] {
    &self.vortons
  }

  pub fn as_mut_slice(&mut self) -> &mut [Vorton] {
    &mut self.vortons
  }

  /// Iterate over `(id, vorton)` pairs.
  pub fn iter(&self) -> impl Iterator<Item = (VortonId, &Vorton)> {
    self.ids.iter().copied().zip(self.vortons.iter())
  }

  /// Sum of all vorticity vectors.
  pub fn total_vorticity(&self) -> Vec3 {
    self.vortons.iter().map(|v| v.vorticity).sum()
  }
}
