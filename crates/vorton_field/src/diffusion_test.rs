use glam::Vec3;

use super::*;
use crate::domain::FieldDomain;

fn rebuilt(depth: u32, vortons: &[Vorton]) -> VortexTree {
  let domain = FieldDomain::new(Vec3::ONE, depth).unwrap();
  let mut tree = VortexTree::new(depth).unwrap();
  tree.rebuild(&domain, vortons);
  tree
}

#[test]
fn test_exchange_conserves_pair_total() {
  let cases = [
    (Vec3::new(1.0, 0.0, 0.0), Vec3::new(0.0, 2.0, 0.0), 0.25),
    (Vec3::new(-3.5, 0.1, 7.0), Vec3::new(0.3, -0.2, 1.0), 0.01 / 60.0),
    (Vec3::splat(1e3), Vec3::splat(-1e3), 0.5),
  ];
  for (w1, w2, rate) in cases {
    let (a, b) = exchange_vorticity(w1, w2, rate);
    let err = ((a + b) - (w1 + w2)).abs().max_element();
    assert!(err < 1e-3, "Pair total drifted by {} for {:?} {:?}", err, w1, w2);
  }
}

#[test]
fn test_exchange_moves_toward_mean() {
  let (a, b) = exchange_vorticity(Vec3::X * 2.0, Vec3::ZERO, 0.25);
  assert_eq!(a, Vec3::X * 1.5);
  assert_eq!(b, Vec3::X * 0.5);

  // Half rate meets in the middle
  let (a, b) = exchange_vorticity(Vec3::X * 2.0, Vec3::ZERO, 0.5);
  assert_eq!(a, b);
}

#[test]
fn test_exchange_zero_rate_is_identity() {
  let (a, b) = exchange_vorticity(Vec3::X, Vec3::Y, 0.0);
  assert_eq!((a, b), (Vec3::X, Vec3::Y));
}

#[test]
fn test_diffuse_empty_grid() {
  let tree = rebuilt(3, &[]);
  let mut vortons: Vec<Vorton> = Vec::new();
  assert_eq!(diffuse(&tree, &mut vortons, &SolverParams::DEFAULT), 0);
}

/// A lone interior vorton only decays.
#[test]
fn test_diffuse_single_vorton_decays() {
  let mut vortons = vec![Vorton::new(Vec3::splat(0.5), Vec3::new(0.5, 0.0, 0.0))];
  let tree = rebuilt(3, &vortons);
  let params = SolverParams::DEFAULT;

  assert_eq!(diffuse(&tree, &mut vortons, &params), 0);
  let expected = 0.5 * (1.0 - params.viscosity * params.dt);
  assert!((vortons[0].vorticity.x - expected).abs() < 1e-7);
}

/// Vortons in the last layer are never visited as a source cell.
#[test]
fn test_diffuse_skips_outer_layer() {
  let mut vortons = vec![Vorton::new(Vec3::splat(0.95), Vec3::X)];
  let tree = rebuilt(3, &vortons);
  diffuse(&tree, &mut vortons, &SolverParams::DEFAULT);
  assert_eq!(vortons[0].vorticity, Vec3::X);
}

#[test]
fn test_diffuse_same_cell_pair() {
  let mut vortons = vec![
    Vorton::new(Vec3::splat(0.51), Vec3::X * 2.0),
    Vorton::new(Vec3::splat(0.52), Vec3::ZERO),
  ];
  let tree = rebuilt(3, &vortons);
  let params = SolverParams::INVISCID;

  // Zero viscosity: exchanges happen but move nothing
  assert_eq!(diffuse(&tree, &mut vortons, &params), 1);
  assert_eq!(vortons[0].vorticity, Vec3::X * 2.0);

  let params = SolverParams {
    viscosity: 6.0,
    ..SolverParams::DEFAULT
  };
  let before: Vec3 = vortons.iter().map(|v| v.vorticity).sum();
  diffuse(&tree, &mut vortons, &params);
  let after: Vec3 = vortons.iter().map(|v| v.vorticity).sum();

  assert!(vortons[0].vorticity.x < 2.0);
  assert!(vortons[1].vorticity.x > 0.0);
  // Both decay once after exchanging, so the total shrinks by the decay factor
  let decay = 1.0 - params.exchange_rate();
  assert!((after - before * decay).length() < 1e-5, "before {:?} after {:?}", before, after);
}

/// Each forward neighbour pair is exchanged exactly once.
#[test]
fn test_diffuse_forward_neighbours_once() {
  let step = 0.125;
  let centre = Vec3::splat(3.5 * step);
  let mut vortons = vec![
    Vorton::new(centre, Vec3::X),
    Vorton::new(centre + Vec3::X * step, Vec3::Y),
    Vorton::new(centre + Vec3::Y * step, Vec3::Y),
    Vorton::new(centre + Vec3::Z * step, Vec3::Y),
    // Backward neighbour: reached from its own cell's +x pass
    Vorton::new(centre - Vec3::X * step, Vec3::Z),
  ];
  let tree = rebuilt(3, &vortons);
  let pairs = diffuse(&tree, &mut vortons, &SolverParams::DEFAULT);
  assert_eq!(pairs, 4);
}

/// Vorticity spreads from a strong vorton to its +x neighbour.
#[test]
fn test_diffuse_spreads_to_neighbour() {
  let mut vortons = vec![
    Vorton::new(Vec3::splat(0.3), Vec3::Z * 4.0),
    Vorton::new(Vec3::new(0.3 + 0.125, 0.3, 0.3), Vec3::ZERO),
  ];
  let tree = rebuilt(3, &vortons);
  let pairs = diffuse(&tree, &mut vortons, &SolverParams::DEFAULT);

  assert_eq!(pairs, 1);
  assert!(vortons[1].vorticity.z > 0.0);
  assert!(vortons[0].vorticity.z < 4.0);
}
