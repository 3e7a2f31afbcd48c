//! Cycle driver for automatic and event-driven generation.

use rand::SeedableRng;
use rand::rngs::StdRng;
use terrain_types::TriangularMesh;
use tracing::{debug, info};

use crate::displace::displace;
use crate::error::{FractalError, FractalResult};
use crate::params::GenerationParams;
use crate::result::CycleReport;
use crate::state::GenerationState;
use crate::subdivide::subdivide;

/// Owns a terrain mesh and advances it one Subdivide + Displace cycle at a
/// time.
///
/// Two trigger styles are supported:
///
/// - **Automatic**: [`run`](Self::run) or [`run_configured`](Self::run_configured)
///   performs a fixed number of cycles up front.
/// - **Event-driven**: [`request_advance`](Self::request_advance) records an
///   external signal and [`poll`](Self::poll) performs at most one cycle, so
///   any number of signals between polls collapse into one step.
///
/// Every method takes `&mut self` for the whole cycle, so a renderer holding
/// [`mesh`](Self::mesh) can never observe a half-subdivided grid.
///
/// # Example
///
/// ```
/// use terrain_fractal::{GenerationParams, TerrainGenerator};
///
/// let params = GenerationParams::new().with_seed(7).with_iterations(3);
/// let mut generator = TerrainGenerator::new(&params)?;
/// let reports = generator.run_configured()?;
///
/// assert_eq!(reports.len(), 3);
/// assert_eq!(generator.mesh().base(), 9);
/// assert_eq!(generator.mesh().len(), 45);
/// # Ok::<(), terrain_fractal::FractalError>(())
/// ```
#[derive(Debug, Clone)]
pub struct TerrainGenerator {
    mesh: TriangularMesh,
    state: GenerationState,
    rng: StdRng,
    iterations: u32,
    max_vertices: usize,
    cycles: u32,
    advance_requested: bool,
}

impl TerrainGenerator {
    /// Validate `params` and build the initial single-triangle terrain.
    ///
    /// # Errors
    ///
    /// Returns an error if any parameter is invalid.
    pub fn new(params: &GenerationParams) -> FractalResult<Self> {
        params.validate()?;
        let rng = match params.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::with_mesh(TriangularMesh::equilateral(params.side_length), params, rng)
    }

    /// Start from an existing mesh and random source.
    ///
    /// `params.side_length` and `params.seed` are ignored.
    ///
    /// # Errors
    ///
    /// Returns an error if the magnitude, damping or vertex ceiling is
    /// invalid, or the mesh already exceeds the ceiling.
    pub fn with_mesh(
        mesh: TriangularMesh,
        params: &GenerationParams,
        rng: StdRng,
    ) -> FractalResult<Self> {
        let state = params.initial_state()?;
        if params.max_vertices < mesh.len() {
            return Err(FractalError::InvalidMaxVertices(params.max_vertices));
        }
        debug!(
            "Terrain generator ready: {} vertices, magnitude {}, damping {}",
            mesh.len(),
            state.magnitude(),
            state.damping()
        );
        Ok(Self {
            mesh,
            state,
            rng,
            iterations: params.iterations,
            max_vertices: params.max_vertices,
            cycles: 0,
            advance_requested: false,
        })
    }

    /// Current terrain.
    #[inline]
    #[must_use]
    pub const fn mesh(&self) -> &TriangularMesh {
        &self.mesh
    }

    /// Displacement state for the next cycle.
    #[inline]
    #[must_use]
    pub const fn state(&self) -> GenerationState {
        self.state
    }

    /// Cycles completed so far.
    #[inline]
    #[must_use]
    pub const fn cycles(&self) -> u32 {
        self.cycles
    }

    /// Whether an advance signal is waiting for [`poll`](Self::poll).
    #[inline]
    #[must_use]
    pub const fn advance_pending(&self) -> bool {
        self.advance_requested
    }

    /// Run one Subdivide + Displace cycle.
    ///
    /// # Errors
    ///
    /// Returns [`FractalError::MeshTooLarge`] without touching the mesh if
    /// the subdivided mesh would exceed the vertex ceiling.
    pub fn step(&mut self) -> FractalResult<CycleReport> {
        let current = self.mesh.len();
        let projected = self.mesh.layout().subdivided().vertex_count();
        if projected > self.max_vertices {
            return Err(FractalError::MeshTooLarge {
                current,
                projected,
                max: self.max_vertices,
            });
        }

        let applied = self.state.magnitude();
        subdivide(&mut self.mesh);
        self.state = displace(&mut self.mesh, self.state, &mut self.rng);
        self.cycles += 1;

        let report = CycleReport {
            cycle: self.cycles,
            base: self.mesh.base(),
            vertex_count: self.mesh.len(),
            triangle_count: self.mesh.layout().triangle_count(),
            magnitude_applied: applied,
            next_magnitude: self.state.magnitude(),
            height_range: self.mesh.height_range(),
        };
        info!("{report}");
        Ok(report)
    }

    /// Run `cycles` cycles back to back.
    ///
    /// # Errors
    ///
    /// Stops at the first cycle that would exceed the vertex ceiling; cycles
    /// completed before it remain applied.
    pub fn run(&mut self, cycles: u32) -> FractalResult<Vec<CycleReport>> {
        (0..cycles).map(|_| self.step()).collect()
    }

    /// Run the configured number of cycles.
    ///
    /// # Errors
    ///
    /// See [`run`](Self::run).
    pub fn run_configured(&mut self) -> FractalResult<Vec<CycleReport>> {
        self.run(self.iterations)
    }

    /// Record an external advance signal.
    pub fn request_advance(&mut self) {
        self.advance_requested = true;
    }

    /// Run one cycle if an advance was requested since the last poll.
    ///
    /// # Errors
    ///
    /// See [`step`](Self::step). The request is consumed even on error.
    pub fn poll(&mut self) -> FractalResult<Option<CycleReport>> {
        if !std::mem::take(&mut self.advance_requested) {
            return Ok(None);
        }
        self.step().map(Some)
    }

    /// Give up ownership of the terrain.
    #[must_use]
    pub fn into_mesh(self) -> TriangularMesh {
        self.mesh
    }
}
