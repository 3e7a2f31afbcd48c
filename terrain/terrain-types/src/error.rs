//! Error types for triangular mesh construction.

use thiserror::Error;

/// Errors raised when a vertex sequence cannot form a triangular grid.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutError {
    /// Mesh has no vertices.
    #[error("Mesh has no vertices")]
    EmptyMesh,

    /// A single vertex has no edges to subdivide.
    #[error("Mesh needs at least 3 vertices, got {0}")]
    TooFewVertices(usize),

    /// Vertex count is not a triangular number.
    #[error(
        "Vertex count {count} is not a triangular number (between {below} for base {base} and {above})"
    )]
    NotTriangular {
        /// Offending vertex count.
        count: usize,
        /// Largest base whose triangular number is below `count`.
        base: usize,
        /// `T(base)`.
        below: usize,
        /// `T(base + 1)`.
        above: usize,
    },
}

/// Result type for layout operations.
pub type LayoutResult<T> = std::result::Result<T, LayoutError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = LayoutError::EmptyMesh;
        assert_eq!(format!("{err}"), "Mesh has no vertices");

        let err = LayoutError::TooFewVertices(1);
        assert!(format!("{err}").contains('1'));

        let err = LayoutError::NotTriangular {
            count: 7,
            base: 3,
            below: 6,
            above: 10,
        };
        let display = format!("{err}");
        assert!(display.contains("7"));
        assert!(display.contains("base 3"));
        assert!(display.contains("and 10"));
    }
}
