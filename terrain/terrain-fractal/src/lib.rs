//! Fractal terrain by triangular subdivision and damped random displacement.
//!
//! Each generation cycle has two steps:
//!
//! - **Subdivide**: every triangle of a [`TriangularMesh`] is split into four
//!   by inserting a vertex at the midpoint of every edge (base `b` becomes
//!   `2b - 1`)
//! - **Displace**: every vertex height is offset by uniform noise of width
//!   `magnitude`, after which the magnitude is multiplied by a damping
//!   coefficient
//!
//! Repeating the cycle adds ever finer, ever smaller bumps to the surface.
//!
//! # Examples
//!
//! Driving the two steps by hand:
//!
//! ```
//! use rand::SeedableRng;
//! use rand::rngs::StdRng;
//! use terrain_types::TriangularMesh;
//! use terrain_fractal::{displace, subdivide, GenerationState};
//!
//! let mut mesh = TriangularMesh::equilateral(7.0);
//! let mut state = GenerationState::new(2.5, 0.45)?;
//! let mut rng = StdRng::seed_from_u64(1);
//!
//! for _ in 0..4 {
//!     subdivide(&mut mesh);
//!     state = displace(&mut mesh, state, &mut rng);
//! }
//!
//! assert_eq!(mesh.base(), 17);
//! assert_eq!(mesh.layout().triangle_count(), 256);
//! # Ok::<(), terrain_fractal::FractalError>(())
//! ```
//!
//! Event-driven stepping, where repeated signals coalesce:
//!
//! ```
//! use terrain_fractal::{GenerationParams, TerrainGenerator};
//!
//! let mut generator = TerrainGenerator::new(&GenerationParams::new().with_seed(3))?;
//!
//! generator.request_advance();
//! generator.request_advance();
//! assert!(generator.poll()?.is_some());
//! assert!(generator.poll()?.is_none());
//! assert_eq!(generator.mesh().len(), 6);
//! # Ok::<(), terrain_fractal::FractalError>(())
//! ```

#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

mod displace;
mod error;
mod generator;
mod params;
mod result;
mod state;
mod subdivide;

pub use displace::displace;
pub use error::{FractalError, FractalResult};
pub use generator::TerrainGenerator;
pub use params::GenerationParams;
pub use result::CycleReport;
pub use state::GenerationState;
pub use subdivide::{subdivide, subdivided};

pub use terrain_types::TriangularMesh;
