//! Triangular terrain mesh.

use std::fmt;

use nalgebra::Point3;

use crate::error::LayoutResult;
use crate::layout::RowLayout;
use crate::triangle::Triangle;
use crate::vertex::Vertex;

/// Height of an equilateral triangle relative to its side length.
const EQUILATERAL_HEIGHT: f64 = 0.866_025_403_784_438_6;

/// A triangular grid of vertices stored row by row.
///
/// The mesh exclusively owns its vertex sequence. Its length is always a
/// triangular number `T(base)` with `base >= 2`; constructors enforce this
/// and no method can change the length, so [`RowLayout`] arithmetic is valid
/// for every index at all times. Vertex values are freely mutable through
/// [`vertices_mut`](Self::vertices_mut).
///
/// # Example
///
/// ```
/// use terrain_types::{TriangularMesh, Vertex};
///
/// let mesh = TriangularMesh::from_vertices(vec![
///     Vertex::from_coords(-1.0, 0.0, 0.0),
///     Vertex::from_coords(1.0, 0.0, 0.0),
///     Vertex::from_coords(0.0, 1.7, 0.0),
/// ])?;
///
/// assert_eq!(mesh.base(), 2);
/// assert_eq!(mesh.row(0).len(), 2);
/// assert_eq!(mesh.triangles().count(), 1);
/// # Ok::<(), terrain_types::LayoutError>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct TriangularMesh {
    vertices: Vec<Vertex>,
    layout: RowLayout,
}

impl TriangularMesh {
    /// Build a mesh from a row-major vertex sequence.
    ///
    /// # Errors
    ///
    /// Returns an error if the sequence is empty, shorter than one triangle,
    /// or its length is not a triangular number.
    pub fn from_vertices(vertices: Vec<Vertex>) -> LayoutResult<Self> {
        let layout = RowLayout::for_vertex_count(vertices.len())?;
        Ok(Self { vertices, layout })
    }

    /// The single equilateral triangle every terrain starts from.
    ///
    /// Centered on the origin in the XY plane with its base edge along -Y.
    ///
    /// # Example
    ///
    /// ```
    /// use terrain_types::TriangularMesh;
    ///
    /// let mesh = TriangularMesh::equilateral(2.0);
    /// let v = mesh.vertices();
    /// assert_eq!(v[0].position.x, -1.0);
    /// assert_eq!(v[1].position.x, 1.0);
    /// assert_eq!(v[0].position.y, v[1].position.y);
    /// assert_eq!(v[2].position.x, 0.0);
    /// ```
    #[must_use]
    pub fn equilateral(side_length: f64) -> Self {
        let half = side_length / 2.0;
        let half_height = side_length * EQUILATERAL_HEIGHT / 2.0;
        Self {
            vertices: vec![
                Vertex::from_coords(-half, -half_height, 0.0),
                Vertex::from_coords(half, -half_height, 0.0),
                Vertex::from_coords(0.0, half_height, 0.0),
            ],
            layout: RowLayout::new(2),
        }
    }

    /// Vertices along the bottom edge.
    #[inline]
    #[must_use]
    pub const fn base(&self) -> usize {
        self.layout.base()
    }

    /// Row arithmetic for this mesh.
    #[inline]
    #[must_use]
    pub const fn layout(&self) -> RowLayout {
        self.layout
    }

    /// Number of vertices.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// Never `true`: every constructor requires at least 3 vertices.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Row-major vertex sequence.
    #[inline]
    #[must_use]
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// Mutable access to vertex values. The length stays fixed.
    #[inline]
    pub fn vertices_mut(&mut self) -> &mut [Vertex] {
        &mut self.vertices
    }

    /// Vertex by index.
    #[inline]
    #[must_use]
    pub fn vertex(&self, index: usize) -> Option<&Vertex> {
        self.vertices.get(index)
    }

    /// Vertices of `row`, empty past the apex.
    #[must_use]
    pub fn row(&self, row: usize) -> &[Vertex] {
        self.vertices
            .get(self.layout.row_range(row))
            .unwrap_or_default()
    }

    /// Count of vertices still flagged pending.
    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.vertices.iter().filter(|v| v.pending).count()
    }

    /// Lowest and highest `z`.
    #[must_use]
    pub fn height_range(&self) -> (f64, f64) {
        self.vertices
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
                (lo.min(v.position.z), hi.max(v.position.z))
            })
    }

    /// Every triangle in [`RowLayout::triangle_indices`] order.
    pub fn triangles(&self) -> impl Iterator<Item = Triangle> + '_ {
        self.layout.triangle_indices().map(|[a, b, c]| {
            Triangle::new(self.point(a), self.point(b), self.point(c))
        })
    }

    /// Give up ownership of the vertex sequence.
    #[must_use]
    pub fn into_vertices(self) -> Vec<Vertex> {
        self.vertices
    }

    fn point(&self, index: usize) -> Point3<f64> {
        self.vertices[index].position
    }
}

impl fmt::Display for TriangularMesh {
    /// Row-by-row dump of every vertex.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Terrain mesh: base {}, {} vertices, {} triangles",
            self.base(),
            self.len(),
            self.layout.triangle_count()
        )?;
        for (row, range) in self.layout.rows().enumerate() {
            writeln!(f, "row {row} ({} vertices):", range.len())?;
            for v in &self.vertices[range] {
                writeln!(
                    f,
                    "  X {:+.5}, Y {:+.5}, Z {:+.5}, N {}",
                    v.position.x,
                    v.position.y,
                    v.position.z,
                    u8::from(v.pending)
                )?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::error::LayoutError;
    use approx::assert_relative_eq;

    fn base_three() -> TriangularMesh {
        let vertices = (0..6)
            .map(|i| Vertex::from_coords(f64::from(i), 0.0, f64::from(i) * 0.5))
            .collect();
        TriangularMesh::from_vertices(vertices).unwrap()
    }

    #[test]
    fn test_from_vertices_rejects_non_triangular() {
        let vertices = vec![Vertex::from_coords(0.0, 0.0, 0.0); 4];
        let err = TriangularMesh::from_vertices(vertices).unwrap_err();
        assert!(matches!(err, LayoutError::NotTriangular { count: 4, .. }));

        let err = TriangularMesh::from_vertices(Vec::new()).unwrap_err();
        assert_eq!(err, LayoutError::EmptyMesh);
    }

    #[test]
    fn test_smallest_mesh_is_not_empty() {
        let mesh = TriangularMesh::equilateral(1.0);
        assert_eq!(mesh.len(), 3);
        assert!(!mesh.is_empty());
        assert!(TriangularMesh::from_vertices(vec![Vertex::placeholder(); 1]).is_err());
    }

    #[test]
    fn test_equilateral_geometry() {
        let mesh = TriangularMesh::equilateral(3.5);
        assert_eq!(mesh.base(), 2);
        let v = mesh.vertices();
        assert_relative_eq!((v[1].position - v[0].position).norm(), 3.5, epsilon = 1e-12);
        assert_relative_eq!((v[2].position - v[0].position).norm(), 3.5, epsilon = 1e-12);
        assert_relative_eq!((v[2].position - v[1].position).norm(), 3.5, epsilon = 1e-12);
        assert!(v.iter().all(|v| v.position.z == 0.0 && !v.pending));
    }

    #[test]
    fn test_rows() {
        let mesh = base_three();
        assert_eq!(mesh.row(0).len(), 3);
        assert_eq!(mesh.row(1)[0].position.x, 3.0);
        assert_eq!(mesh.row(2).len(), 1);
        assert!(mesh.row(3).is_empty());
    }

    #[test]
    fn test_triangles_face_up() {
        let mesh = TriangularMesh::equilateral(7.0);
        let tris: Vec<_> = mesh.triangles().collect();
        assert_eq!(tris.len(), 1);
        assert!(tris[0].normal().unwrap().z > 0.99);
    }

    #[test]
    fn test_height_range() {
        let (lo, hi) = base_three().height_range();
        assert_eq!(lo, 0.0);
        assert_eq!(hi, 2.5);
    }

    #[test]
    fn test_display_dump() {
        let dump = TriangularMesh::equilateral(2.0).to_string();
        assert!(dump.contains("base 2, 3 vertices, 1 triangles"));
        assert!(dump.contains("row 1 (1 vertices):"));
        assert!(dump.contains("X -1.00000"));
        assert_eq!(dump.matches(", N 0").count(), 3);
    }
}
