//! Property-based tests for subdivision and displacement.
//!
//! These tests use proptest to generate random terrains and verify the
//! structural invariants every cycle must preserve.
//!
//! Run with: cargo test -p terrain-fractal -- proptest

use proptest::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;
use terrain_fractal::{GenerationState, displace, subdivided};
use terrain_types::{TriangularMesh, Vertex, triangular_number};

// =============================================================================
// Strategies
// =============================================================================

/// A triangular mesh with arbitrary vertex positions and base 2..=9.
fn arb_mesh() -> impl Strategy<Value = TriangularMesh> {
    (2usize..=9).prop_flat_map(|base| {
        prop::collection::vec(prop::array::uniform3(-100.0..100.0f64), triangular_number(base))
            .prop_map(|coords| {
                let vertices = coords.into_iter().map(Vertex::from).collect();
                TriangularMesh::from_vertices(vertices)
                    .unwrap_or_else(|e| panic!("strategy built an invalid mesh: {e}"))
            })
    })
}

fn arb_state() -> impl Strategy<Value = GenerationState> {
    (0.01..10.0f64, 0.05..0.95f64).prop_map(|(magnitude, damping)| {
        GenerationState::new(magnitude, damping)
            .unwrap_or_else(|e| panic!("strategy built an invalid state: {e}"))
    })
}

// =============================================================================
// Subdivision
// =============================================================================

proptest! {
    #[test]
    fn proptest_subdivide_grows_base(mesh in arb_mesh()) {
        let base = mesh.base();
        let out = subdivided(&mesh);
        prop_assert_eq!(out.base(), 2 * base - 1);
        prop_assert_eq!(out.len(), triangular_number(2 * base - 1));
        prop_assert_eq!(out.layout().triangle_count(), 4 * mesh.layout().triangle_count());
    }

    #[test]
    fn proptest_subdivide_keeps_old_vertices(mesh in arb_mesh()) {
        let out = subdivided(&mesh);
        let old = mesh.layout();
        let new = out.layout();
        for row in 0..old.row_count() {
            for col in 0..old.row_len(row) {
                let before = old.index_of(row, col).map(|i| mesh.vertices()[i]);
                let after = new.index_of(2 * row, 2 * col).map(|i| out.vertices()[i]);
                prop_assert_eq!(before, after);
            }
        }
    }

    #[test]
    fn proptest_subdivide_resolves_everything(mesh in arb_mesh()) {
        let out = subdivided(&mesh);
        prop_assert_eq!(out.pending_count(), 0);
        prop_assert!(out.vertices().iter().all(Vertex::is_finite));
    }

    #[test]
    fn proptest_subdivide_stays_in_hull(mesh in arb_mesh()) {
        // Midpoints never leave the bounding box of the original vertices
        let out = subdivided(&mesh);
        for axis in 0..3 {
            let lo = mesh.vertices().iter().map(|v| v.position[axis]).fold(f64::INFINITY, f64::min);
            let hi = mesh.vertices().iter().map(|v| v.position[axis]).fold(f64::NEG_INFINITY, f64::max);
            for v in out.vertices() {
                prop_assert!(v.position[axis] >= lo - 1e-9 && v.position[axis] <= hi + 1e-9);
            }
        }
    }

    #[test]
    fn proptest_displace_bounded(mesh in arb_mesh(), state in arb_state(), seed in any::<u64>()) {
        let mut out = mesh.clone();
        let next = displace(&mut out, state, &mut StdRng::seed_from_u64(seed));

        let half = state.magnitude() / 2.0;
        for (a, b) in mesh.vertices().iter().zip(out.vertices()) {
            let dz = b.position.z - a.position.z;
            // Inclusive upper bound absorbs rounding in the addition
            prop_assert!(dz >= -half - 1e-9 && dz <= half + 1e-9, "dz = {}", dz);
            prop_assert_eq!(a.position.x, b.position.x);
            prop_assert_eq!(a.position.y, b.position.y);
        }
        prop_assert!((next.magnitude() - state.magnitude() * state.damping()).abs() < 1e-12);
    }

    #[test]
    fn proptest_magnitude_after_k_calls(state in arb_state(), k in 0u32..12) {
        let mut mesh = TriangularMesh::equilateral(1.0);
        let mut rng = StdRng::seed_from_u64(0);
        let mut current = state;
        for _ in 0..k {
            current = displace(&mut mesh, current, &mut rng);
        }
        let expected = state.magnitude() * state.damping().powi(i32::try_from(k).unwrap_or(i32::MAX));
        prop_assert!((current.magnitude() - expected).abs() <= 1e-12 * state.magnitude().max(1.0));
    }
}
