//! Error types for terrain generation.

use terrain_types::LayoutError;
use thiserror::Error;

/// Errors that can occur while configuring or running terrain generation.
///
/// Structural faults inside a subdivision step are not represented here:
/// they indicate a broken row layout and panic instead.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FractalError {
    /// Displacement magnitude must be positive and finite.
    #[error("Invalid displacement magnitude: {0} (must be > 0)")]
    InvalidMagnitude(f64),

    /// Damping coefficient must lie strictly between 0 and 1.
    #[error("Invalid damping coefficient: {0} (must be in (0, 1))")]
    InvalidDamping(f64),

    /// Side length of the initial triangle must be positive and finite.
    #[error("Invalid side length: {0} (must be > 0)")]
    InvalidSideLength(f64),

    /// Vertex ceiling cannot hold even the initial triangle.
    #[error("Invalid vertex limit: {0} (must be >= 3)")]
    InvalidMaxVertices(usize),

    /// Next subdivision would exceed the vertex ceiling.
    #[error("Subdivision would exceed maximum mesh size ({current} -> {projected} vertices, max {max})")]
    MeshTooLarge {
        /// Current vertex count.
        current: usize,
        /// Vertex count after the next subdivision.
        projected: usize,
        /// Maximum allowed vertex count.
        max: usize,
    },

    /// Supplied mesh does not form a triangular grid.
    #[error(transparent)]
    Layout(#[from] LayoutError),
}

/// Result type for generation operations.
pub type FractalResult<T> = std::result::Result<T, FractalError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = FractalError::InvalidDamping(1.5);
        assert!(format!("{err}").contains("1.5"));

        let err = FractalError::MeshTooLarge {
            current: 153,
            projected: 561,
            max: 200,
        };
        let display = format!("{err}");
        assert!(display.contains("153"));
        assert!(display.contains("561"));
        assert!(display.contains("200"));
    }

    #[test]
    fn test_layout_error_converts() {
        let err: FractalError = LayoutError::EmptyMesh.into();
        assert_eq!(format!("{err}"), "Mesh has no vertices");
    }
}
