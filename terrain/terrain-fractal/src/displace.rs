//! Damped random height displacement.

use rand::Rng;
use terrain_types::TriangularMesh;
use tracing::debug;

use crate::state::GenerationState;

/// Perturb every vertex height and return the decayed state.
///
/// Each `z` receives an independent offset drawn uniformly from
/// `[-magnitude / 2, magnitude / 2)`; `x` and `y` are untouched. Old and new
/// vertices are treated alike.
///
/// # Example
///
/// ```
/// use rand::SeedableRng;
/// use rand::rngs::StdRng;
/// use terrain_types::TriangularMesh;
/// use terrain_fractal::{displace, GenerationState};
///
/// let mut mesh = TriangularMesh::equilateral(7.0);
/// let mut rng = StdRng::seed_from_u64(42);
/// let state = GenerationState::new(2.0, 0.5)?;
///
/// let next = displace(&mut mesh, state, &mut rng);
/// assert_eq!(next.magnitude(), 1.0);
/// assert!(mesh.vertices().iter().all(|v| v.position.z.abs() <= 1.0));
/// # Ok::<(), terrain_fractal::FractalError>(())
/// ```
pub fn displace<R: Rng + ?Sized>(
    mesh: &mut TriangularMesh,
    state: GenerationState,
    rng: &mut R,
) -> GenerationState {
    let half = state.magnitude() / 2.0;

    // Fully decayed magnitudes underflow to an empty range
    if half > 0.0 {
        for vertex in mesh.vertices_mut() {
            vertex.position.z += rng.gen_range(-half..half);
        }
    }

    let next = state.decayed();
    debug!(
        "Displaced {} vertices by up to ±{:.5}, next magnitude {:.5}",
        mesh.len(),
        half,
        next.magnitude()
    );
    next
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp, clippy::cast_precision_loss)]
mod tests {
    use super::*;
    use crate::subdivide::subdivide;
    use approx::assert_relative_eq;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn make_mesh() -> TriangularMesh {
        let mut mesh = TriangularMesh::equilateral(7.0);
        for _ in 0..3 {
            subdivide(&mut mesh);
        }
        mesh
    }

    #[test]
    fn test_offsets_within_half_magnitude() {
        let mut mesh = make_mesh();
        let before = mesh.clone();
        let mut rng = StdRng::seed_from_u64(7);
        let state = GenerationState::new(2.5, 0.45).unwrap();

        displace(&mut mesh, state, &mut rng);

        for (a, b) in before.vertices().iter().zip(mesh.vertices()) {
            let dz = b.position.z - a.position.z;
            assert!((-1.25..1.25).contains(&dz), "offset {dz} out of range");
            assert_eq!(a.position.x, b.position.x);
            assert_eq!(a.position.y, b.position.y);
        }
    }

    #[test]
    fn test_magnitude_decays_geometrically() {
        let mut mesh = make_mesh();
        let mut rng = StdRng::seed_from_u64(1);
        let initial = GenerationState::new(2.5, 0.4).unwrap();

        let mut state = initial;
        for _ in 0..6 {
            state = displace(&mut mesh, state, &mut rng);
        }
        assert_relative_eq!(state.magnitude(), 2.5 * 0.4_f64.powi(6), epsilon = 1e-12);
        assert_relative_eq!(state.magnitude(), initial.magnitude_after(6), epsilon = 1e-15);
    }

    #[test]
    fn test_same_seed_same_terrain() {
        let state = GenerationState::new(1.0, 0.5).unwrap();

        let mut a = make_mesh();
        displace(&mut a, state, &mut StdRng::seed_from_u64(99));
        let mut b = make_mesh();
        displace(&mut b, state, &mut StdRng::seed_from_u64(99));
        assert_eq!(a, b);

        let mut c = make_mesh();
        displace(&mut c, state, &mut StdRng::seed_from_u64(100));
        assert_ne!(a, c);
    }

    #[test]
    fn test_offsets_not_biased_upward() {
        let mut mesh = make_mesh();
        for _ in 0..2 {
            subdivide(&mut mesh);
        }
        let mut rng = StdRng::seed_from_u64(3);
        displace(&mut mesh, GenerationState::new(2.0, 0.5).unwrap(), &mut rng);

        let mean = mesh.vertices().iter().map(|v| v.position.z).sum::<f64>() / mesh.len() as f64;
        assert!(mean.abs() < 0.1, "mean offset {mean}");
    }
}
