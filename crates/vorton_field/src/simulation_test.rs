use glam::{UVec3, Vec3};

use super::*;
use crate::constants::MIN_DEPTH;
use crate::error::FieldError;
use crate::tracer::{seed_tracer_lattice, Tracer};
use crate::velocity::kernel;

/// 1×1×1 domain, depth 3, one vorton at the centre with vorticity +X.
fn single_vorton() -> (Simulation, VortonId) {
  let mut sim = Simulation::new(Vec3::ONE, 3).unwrap();
  let id = sim.insert_vorton(Vec3::splat(0.5), Vec3::new(0.5, 0.0, 0.0));
  (sim, id)
}

#[test]
fn test_self_leaf_velocity_is_zero_after_tick() {
  let (mut sim, _) = single_vorton();
  let stats = sim.tick();

  assert_eq!(stats.vortons, 1);
  assert_eq!(stats.occupied_leaves, 1);
  assert_eq!(stats.advected, 1);
  assert_eq!(stats.skipped, 0);

  // The only contributor sits on the leaf's own lattice point: d = 0
  let own = sim.leaf_velocity(UVec3::splat(4)).unwrap();
  assert_eq!(own, Vec3::ZERO);
}

/// A neighbour leaf sees exactly the kernel of the occupied leaf aggregate.
#[test]
fn test_neighbour_leaf_matches_kernel() {
  let (mut sim, _) = single_vorton();
  sim.tick();

  let cell = UVec3::new(4, 5, 4);
  let query = cell.as_vec3() * sim.domain().step();
  let aggregate = sim.tree().leaf(UVec3::splat(4));
  let expected = kernel(query, aggregate, sim.params().core_radius);

  let got = sim.leaf_velocity(cell).unwrap();
  assert!((got - expected).length() < 1e-6, "got {:?} expected {:?}", got, expected);
  // ω = +X, offset = +Y: induced flow along +Z
  assert!(got.z > 0.0);
  assert!(got.x.abs() < 1e-6 && got.y.abs() < 1e-6);
}

/// The vorton sits on a lattice point with zero velocity, and the Jacobian
/// column along its own axis vanishes: only viscous decay changes it.
#[test]
fn test_single_vorton_only_decays() {
  let (mut sim, id) = single_vorton();
  let rate = sim.params().exchange_rate();
  sim.tick();

  let vorton = sim.vorton_set().get(id).unwrap();
  assert!((vorton.position - Vec3::splat(0.5)).length() < 1e-6, "moved to {:?}", vorton.position);
  let expected = 0.5 * (1.0 - rate);
  assert!((vorton.vorticity.x - expected).abs() < 1e-6, "got {:?}", vorton.vorticity);
  assert!(vorton.vorticity.y.abs() < 1e-6 && vorton.vorticity.z.abs() < 1e-6);
}

#[test]
fn test_ancestors_hold_single_vorton_aggregate() {
  let (mut sim, _) = single_vorton();
  sim.tick();

  // Walk leaf -> root through parent slots
  let mut slot = sim.leaf_slot_of(Vec3::splat(0.5)).unwrap();
  while slot > 0 {
    slot = (slot - 1) >> 3;
    let node = sim.node(slot).unwrap();
    assert!((node.vorticity - Vec3::new(0.5, 0.0, 0.0)).length() < 1e-5, "slot {}: {:?}", slot, node.vorticity);
    assert!((node.position - Vec3::splat(0.5)).length() < 1e-5);
  }
}

#[test]
fn test_empty_tick_leaves_velocities_zero() {
  let mut sim = Simulation::new(Vec3::new(2.0, 1.0, 1.0), MIN_DEPTH).unwrap();
  let stats = sim.tick();
  sim.tick();

  assert_eq!(stats.vortons, 0);
  assert_eq!(stats.diffusion_pairs, 0);
  assert!(sim.tree().nodes().iter().all(|n| n.velocity == Vec3::ZERO));
}

#[test]
fn test_outside_vorton_is_skipped_and_observable() {
  let mut sim = Simulation::new(Vec3::ONE, 3).unwrap();
  let outside = Vec3::new(1.5, 0.5, 0.5);
  let id = sim.insert_vorton(outside, Vec3::Z);
  sim.insert_vorton(Vec3::splat(0.25), Vec3::Z);

  let stats = sim.tick();

  assert_eq!(stats.skipped, 1);
  assert_eq!(stats.advected, 1);
  assert_eq!(stats.stretched, 1);
  assert_eq!(sim.vorton_set().get(id).unwrap().position, outside);
}

#[test]
fn test_tracers_follow_induced_flow() {
  let (mut sim, _) = single_vorton();
  sim.tick();

  let start = Vec3::new(0.5, 0.625, 0.5);
  let mut tracers = [Tracer::new(start, ()), Tracer::new(Vec3::splat(-1.0), ())];
  let stats = sim.advect_tracers(&mut tracers);

  assert_eq!(stats, AdvectionStats { advected: 1, skipped: 1 });
  assert!(tracers[0].position.z > start.z, "tracer should move along +Z: {:?}", tracers[0].position);
  assert_eq!(tracers[1].position, Vec3::splat(-1.0));
}

#[test]
fn test_interpolate_rejects_outside() {
  let (mut sim, _) = single_vorton();
  sim.tick();
  assert!(sim.interpolate_velocity(Vec3::new(0.5, -0.1, 0.5)).is_none());
  assert_eq!(sim.interpolate_velocity(Vec3::splat(0.5)), Some(Vec3::ZERO));
}

#[test]
fn test_adapt_domain_to_grows_and_respaces() {
  let mut sim = Simulation::new(Vec3::ONE, 2).unwrap();
  let before = *sim.domain();

  let points = [Vec3::splat(0.5), Vec3::new(3.0, 0.5, 0.5)];
  assert!(sim.adapt_domain_to(&points));

  let domain = sim.domain();
  assert!(domain.size().x > before.size().x);
  assert_eq!(domain.cells(), before.cells(), "topology is fixed");
  assert!((domain.step().x - domain.size().x / 4.0).abs() < 1e-6);
  assert_eq!(sim.tree().len(), 73);

  // Exactly two of the new cells inside the far face: no further growth
  assert!(!sim.adapt_domain_to(&[Vec3::new(1.75, 0.5, 0.5)]));
}

#[test]
fn test_adapt_over_tracer_lattice() {
  let mut sim = Simulation::new(Vec3::ONE, 3).unwrap();
  let tracers = seed_tracer_lattice(4, Vec3::ZERO, Vec3::ONE, |_| ());
  sim.adapt_domain_to(&tracers);

  let domain = sim.domain();
  assert_eq!(domain.origin(), Vec3::splat(-0.25), "lattice corner pulled two cells inside");
  assert!(tracers.iter().all(|t| domain.contains(t.position)));
}

#[test]
fn test_per_point_adapt_then_recompute() {
  let mut sim = Simulation::new(Vec3::ONE, 2).unwrap();
  let step = sim.domain().step();
  assert!(sim.adapt_domain(Vec3::new(0.5, 0.5, 2.0)));
  assert_eq!(sim.domain().step(), step, "spacing waits for recompute");
  sim.recompute_spacing();
  assert!(sim.domain().step().z > step.z);
}

#[test]
fn test_insert_remove_clear() {
  let mut sim = Simulation::new(Vec3::ONE, 2).unwrap();
  let a = sim.insert_vorton(Vec3::splat(0.1), Vec3::X);
  let b = sim.insert_vorton(Vec3::splat(0.2), Vec3::Y);
  assert_ne!(a, b);
  assert_eq!(sim.vortons().len(), 2);

  assert_eq!(sim.remove_vorton(a).map(|v| v.vorticity), Some(Vec3::X));
  assert!(sim.remove_vorton(a).is_none());
  assert_eq!(sim.vorton_set().get(b).unwrap().vorticity, Vec3::Y);

  sim.clear_vortons();
  assert!(sim.vortons().is_empty());
  assert_eq!(sim.tick().vortons, 0);
}

#[test]
fn test_construction_errors_and_clamping() {
  assert!(matches!(
    Simulation::new(Vec3::new(1.0, 0.0, 1.0), 3),
    Err(FieldError::InvalidExtent { .. })
  ));
  assert!(Simulation::new(Vec3::splat(f32::INFINITY), 3).is_err());

  let sim = Simulation::new(Vec3::ONE, 0).unwrap();
  assert_eq!(sim.domain().depth(), MIN_DEPTH);
  assert_eq!(sim.tree().len(), 73);
}

#[test]
fn test_leaf_velocity_bounds() {
  let sim = Simulation::new(Vec3::ONE, 2).unwrap();
  assert!(sim.leaf_velocity(UVec3::splat(3)).is_some());
  assert!(sim.leaf_velocity(UVec3::new(0, 4, 0)).is_none());
  assert!(sim.node(72).is_some());
  assert!(sim.node(73).is_none());
}

#[test]
fn test_params_override() {
  let mut sim = Simulation::with_params(Vec3::ONE, 3, SolverParams::INVISCID).unwrap();
  let id = sim.insert_vorton(Vec3::splat(0.5), Vec3::new(0.5, 0.0, 0.0));
  sim.tick();
  assert_eq!(sim.vorton_set().get(id).unwrap().vorticity.x, 0.5, "no viscous decay");

  sim.params_mut().viscosity = 0.5;
  assert_eq!(sim.params().viscosity, 0.5);
}

#[test]
fn test_simulation_is_send() {
  fn assert_send<T: Send + Sync>() {}
  assert_send::<Simulation>();
}
