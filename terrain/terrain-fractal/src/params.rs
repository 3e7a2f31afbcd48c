//! Generation parameters.

use terrain_types::{RowLayout, triangular_number};

use crate::error::{FractalError, FractalResult};
use crate::state::GenerationState;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Parameters for terrain generation.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct GenerationParams {
    /// Side length of the initial equilateral triangle.
    pub side_length: f64,

    /// Displacement magnitude used by the first cycle.
    #[cfg_attr(feature = "serde", serde(alias = "magnitude"))]
    pub initial_magnitude: f64,

    /// Factor the magnitude is multiplied by after every cycle.
    pub damping: f64,

    /// Cycles run by automatic generation.
    pub iterations: u32,

    /// Seed for the height noise. `None` seeds from entropy.
    pub seed: Option<u64>,

    /// Maximum vertices allowed in the mesh (prevents memory issues).
    pub max_vertices: usize,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            side_length: 7.0,
            initial_magnitude: 2.5,
            damping: 0.45,
            iterations: 5,
            seed: None,
            max_vertices: 10_000_000,
        }
    }
}

impl GenerationParams {
    /// Create new parameters with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the initial triangle's side length.
    #[must_use]
    pub const fn with_side_length(mut self, side_length: f64) -> Self {
        self.side_length = side_length;
        self
    }

    /// Set the first cycle's displacement magnitude.
    #[must_use]
    pub const fn with_magnitude(mut self, magnitude: f64) -> Self {
        self.initial_magnitude = magnitude;
        self
    }

    /// Set the damping coefficient.
    #[must_use]
    pub const fn with_damping(mut self, damping: f64) -> Self {
        self.damping = damping;
        self
    }

    /// Set the number of automatic cycles.
    #[must_use]
    pub const fn with_iterations(mut self, iterations: u32) -> Self {
        self.iterations = iterations;
        self
    }

    /// Seed the height noise for reproducible terrain.
    #[must_use]
    pub const fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the vertex ceiling.
    #[must_use]
    pub const fn with_max_vertices(mut self, max_vertices: usize) -> Self {
        self.max_vertices = max_vertices;
        self
    }

    /// Check every field.
    ///
    /// # Errors
    ///
    /// Returns the first invalid field found.
    pub fn validate(&self) -> FractalResult<()> {
        self.initial_state()?;
        if !(self.side_length.is_finite() && self.side_length > 0.0) {
            return Err(FractalError::InvalidSideLength(self.side_length));
        }
        if self.max_vertices < triangular_number(2) {
            return Err(FractalError::InvalidMaxVertices(self.max_vertices));
        }
        Ok(())
    }

    /// Displacement state for the first cycle.
    ///
    /// # Errors
    ///
    /// Returns an error if the magnitude or damping is invalid.
    pub fn initial_state(&self) -> FractalResult<GenerationState> {
        GenerationState::new(self.initial_magnitude, self.damping)
    }

    /// Base of the mesh after `cycles` cycles starting from one triangle.
    ///
    /// Each cycle maps base `b` to `2b - 1`, so this is `2^cycles + 1`.
    #[must_use]
    pub const fn expected_base(cycles: u32) -> usize {
        let mut layout = RowLayout::new(2);
        let mut i = 0;
        while i < cycles {
            layout = layout.subdivided();
            i += 1;
        }
        layout.base()
    }

    /// Vertex count after `cycles` cycles starting from one triangle.
    #[must_use]
    pub const fn expected_vertex_count(cycles: u32) -> usize {
        triangular_number(Self::expected_base(cycles))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_default_params() {
        let params = GenerationParams::default();
        assert!(params.validate().is_ok());
        assert_eq!(params.iterations, 5);
        assert!(params.seed.is_none());
    }

    #[test]
    fn test_builder() {
        let params = GenerationParams::new()
            .with_side_length(3.5)
            .with_magnitude(1.0)
            .with_damping(0.4)
            .with_iterations(3)
            .with_seed(42)
            .with_max_vertices(1000);

        assert!((params.side_length - 3.5).abs() < f64::EPSILON);
        assert_eq!(params.iterations, 3);
        assert_eq!(params.seed, Some(42));
        assert_eq!(params.max_vertices, 1000);
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects() {
        let err = GenerationParams::new().with_magnitude(0.0).validate();
        assert!(matches!(err, Err(FractalError::InvalidMagnitude(_))));

        let err = GenerationParams::new().with_damping(1.0).validate();
        assert!(matches!(err, Err(FractalError::InvalidDamping(_))));

        let err = GenerationParams::new().with_side_length(-7.0).validate();
        assert!(matches!(err, Err(FractalError::InvalidSideLength(_))));

        let err = GenerationParams::new().with_max_vertices(2).validate();
        assert!(matches!(err, Err(FractalError::InvalidMaxVertices(2))));
    }

    #[test]
    fn test_expected_sizes() {
        let counts: Vec<_> = (0..5).map(GenerationParams::expected_vertex_count).collect();
        assert_eq!(counts, vec![3, 6, 15, 45, 153]);
        assert_eq!(GenerationParams::expected_base(5), 33);
    }
}
