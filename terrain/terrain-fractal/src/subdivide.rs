//! Four-to-one triangular subdivision.
//!
//! Subdivision runs in two passes over the row layout:
//!
//! 1. **Insertion** writes every old vertex into its final slot of a vector
//!    sized for base `2b - 1`, with pending placeholders between them and a
//!    full row of placeholders between consecutive old rows.
//! 2. **Resolution** walks the new rows from the base. Odd-length rows
//!    alternate old and new vertices, so each new one is interpolated from
//!    its left and right neighbors. Even-length rows are entirely new and are
//!    resolved from the rows on either side.
//!
//! ```text
//!                 o                 apex of old row k = 1
//!               n   n               new row, 2k - 2 = 2
//!             o   n   o             old row k = 2, inflated to 2k - 1 = 3
//! ```

use terrain_types::{Neighbor, Point3, RowLayout, TriangularMesh, Vertex};
use tracing::{debug, trace};

/// Subdivide a mesh in place so every triangle becomes four.
///
/// A mesh of base `b` becomes base `2b - 1` with `T(2b - 1)` vertices. Old
/// vertices keep their coordinates exactly; every new vertex lies at the
/// midpoint of the old edge it splits.
///
/// # Panics
///
/// Panics if a neighbor lookup falls outside the vertex sequence, which
/// only happens if the row layout invariant is broken. Old vertices enter
/// the new grid resolved, so a `pending` flag left set on the input mesh is
/// discarded rather than re-interpolated.
///
/// # Example
///
/// ```
/// use terrain_types::TriangularMesh;
/// use terrain_fractal::subdivide;
///
/// let mut mesh = TriangularMesh::equilateral(7.0);
/// subdivide(&mut mesh);
/// assert_eq!(mesh.base(), 3);
/// assert_eq!(mesh.len(), 6);
///
/// subdivide(&mut mesh);
/// assert_eq!(mesh.len(), 15);
/// assert_eq!(mesh.pending_count(), 0);
/// ```
pub fn subdivide(mesh: &mut TriangularMesh) {
    *mesh = subdivided(mesh);
}

/// Subdivided copy of `mesh`, leaving the original untouched.
///
/// # Panics
///
/// See [`subdivide`].
#[must_use]
pub fn subdivided(mesh: &TriangularMesh) -> TriangularMesh {
    let target = mesh.layout().subdivided();

    let mut vertices = insert_placeholders(mesh);
    assert_eq!(
        vertices.len(),
        target.vertex_count(),
        "insertion pass produced {} vertices, expected T({}) = {}",
        vertices.len(),
        target.base(),
        target.vertex_count()
    );

    resolve_pending(&mut vertices, target);

    debug!(
        "Subdivided terrain: base {} -> {}, {} -> {} vertices",
        mesh.base(),
        target.base(),
        mesh.len(),
        vertices.len()
    );

    TriangularMesh::from_vertices(vertices)
        .unwrap_or_else(|err| panic!("subdivided terrain lost its row layout: {err}"))
}

/// Insertion pass: lay out old vertices and placeholders for base `2b - 1`.
fn insert_placeholders(mesh: &TriangularMesh) -> Vec<Vertex> {
    let layout = mesh.layout();
    let mut out = Vec::with_capacity(layout.subdivided().vertex_count());

    for row in 0..layout.row_count() {
        let old_row = mesh.row(row);
        let k = old_row.len();

        for (col, vertex) in old_row.iter().enumerate() {
            out.push(Vertex::new(vertex.position));
            if col + 1 < k {
                out.push(Vertex::placeholder());
            }
        }

        // Row of new vertices between this old row and the next
        if k > 1 {
            out.extend(std::iter::repeat_n(Vertex::placeholder(), 2 * k - 2));
        }

        trace!(row, old_len = k, emitted = out.len(), "inflated row");
    }

    out
}

/// Resolution pass: assign coordinates to every pending vertex.
fn resolve_pending(vertices: &mut [Vertex], layout: RowLayout) {
    for row in 0..layout.row_count() {
        let start = layout.row_start(row);
        let len = layout.row_len(row);

        for col in 0..len {
            let index = start + col;

            if len % 2 == 1 {
                // Alternating old/new row: split the horizontal edge.
                if !vertices[index].pending {
                    continue;
                }
                let left = fetch(vertices, layout, row, col, Neighbor::Left);
                let right = fetch(vertices, layout, row, col, Neighbor::Right);
                vertices[index].resolve(
                    (left.x + right.x) / 2.0,
                    left.y,
                    (left.z + right.z) / 2.0,
                );
            } else {
                // All-new row: each vertex splits an old diagonal edge.
                debug_assert!(vertices[index].pending, "old vertex in new row {row}");
                let below_left = fetch(vertices, layout, row, col, Neighbor::BelowLeft);
                let below_right = fetch(vertices, layout, row, col, Neighbor::BelowRight);
                let (a, b) = if col % 2 == 1 {
                    (below_right, fetch(vertices, layout, row, col, Neighbor::AboveLeft))
                } else {
                    (below_left, fetch(vertices, layout, row, col, Neighbor::AboveRight))
                };
                vertices[index].resolve(
                    (below_left.x + below_right.x) / 2.0,
                    (a.y + b.y) / 2.0,
                    (a.z + b.z) / 2.0,
                );
            }
        }
    }
}

/// Position of a neighbor, panicking if the layout invariant is broken.
fn fetch(
    vertices: &[Vertex],
    layout: RowLayout,
    row: usize,
    col: usize,
    dir: Neighbor,
) -> Point3<f64> {
    let index = layout.neighbor(row, col, dir);
    match index.and_then(|i| vertices.get(i)) {
        Some(vertex) => vertex.position,
        None => panic!(
            "row layout broken: {dir:?} neighbor of row {row}, col {col} (offset {}) \
             resolves to {index:?}, outside {} vertices",
            layout.row_start(row),
            vertices.len()
        ),
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::float_cmp,
    clippy::cast_precision_loss
)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn make_triangle() -> TriangularMesh {
        TriangularMesh::equilateral(3.5)
    }

    /// Base-3 mesh with distinct heights so interpolation is observable.
    fn make_tilted() -> TriangularMesh {
        let mut mesh = make_triangle();
        subdivide(&mut mesh);
        for (i, v) in mesh.vertices_mut().iter_mut().enumerate() {
            v.position.z = i as f64;
        }
        mesh
    }

    #[test]
    fn test_single_triangle_fixture() {
        let mesh = make_triangle();
        let out = subdivided(&mesh);

        assert_eq!(out.base(), 3);
        assert_eq!(out.len(), 6);
        assert_eq!(out.pending_count(), 0);

        let old = mesh.vertices();
        let v = out.vertices();
        // Old vertices relocated to the corners, unchanged
        assert_eq!(v[0], old[0]);
        assert_eq!(v[2], old[1]);
        assert_eq!(v[5], old[2]);

        // Base edge midpoint shares the base-row y
        assert_relative_eq!(v[1].position.x, 0.0);
        assert_eq!(v[1].position.y, old[0].position.y);

        // Side midpoints
        let mid_left = (old[0].position.coords + old[2].position.coords) / 2.0;
        let mid_right = (old[1].position.coords + old[2].position.coords) / 2.0;
        assert_relative_eq!(v[3].position.coords, mid_left, epsilon = 1e-12);
        assert_relative_eq!(v[4].position.coords, mid_right, epsilon = 1e-12);
    }

    #[test]
    fn test_insertion_pass_row_lengths() {
        let mesh = make_tilted();
        let placed = insert_placeholders(&mesh);
        let layout = RowLayout::new(5);
        assert_eq!(placed.len(), layout.vertex_count());

        for (row, range) in layout.rows().enumerate() {
            let slice = &placed[range];
            if row % 2 == 1 {
                assert!(slice.iter().all(|v| v.pending), "row {row} should be all new");
            } else {
                for (col, v) in slice.iter().enumerate() {
                    assert_eq!(v.pending, col % 2 == 1, "row {row} col {col}");
                }
            }
        }
    }

    #[test]
    fn test_old_vertices_preserved() {
        let mesh = make_tilted();
        let out = subdivided(&mesh);
        let old_layout = mesh.layout();
        let new_layout = out.layout();

        for row in 0..old_layout.row_count() {
            for col in 0..old_layout.row_len(row) {
                let before = old_layout.index_of(row, col).unwrap();
                let after = new_layout.index_of(2 * row, 2 * col).unwrap();
                assert_eq!(out.vertices()[after], mesh.vertices()[before]);
            }
        }
    }

    #[test]
    fn test_pending_corners_are_kept_as_old_vertices() {
        let vertices = vec![
            Vertex::placeholder(),
            Vertex::from_coords(1.0, 0.0, 0.0),
            Vertex {
                pending: true,
                ..Vertex::from_coords(0.0, 1.0, 2.0)
            },
        ];
        let mesh = TriangularMesh::from_vertices(vertices).unwrap();
        let out = subdivided(&mesh);

        assert_eq!(out.pending_count(), 0);
        assert_eq!(out.vertices()[0].position, Point3::origin());
        assert_eq!(out.vertices()[5].position, Point3::new(0.0, 1.0, 2.0));
        assert_relative_eq!(out.vertices()[3].position.coords, Point3::new(0.0, 0.5, 1.0).coords);
    }

    #[test]
    fn test_pending_interior_vertices_are_not_overwritten() {
        let mut mesh = make_tilted();
        for v in mesh.vertices_mut() {
            v.pending = true;
        }
        let out = subdivided(&mesh);
        let old_layout = mesh.layout();
        let new_layout = out.layout();

        assert_eq!(out.pending_count(), 0);
        for row in 0..old_layout.row_count() {
            for col in 0..old_layout.row_len(row) {
                let before = old_layout.index_of(row, col).unwrap();
                let after = new_layout.index_of(2 * row, 2 * col).unwrap();
                assert_eq!(out.vertices()[after].position, mesh.vertices()[before].position);
            }
        }
    }

    #[test]
    fn test_new_vertices_are_edge_midpoints() {
        let mesh = make_tilted();
        let out = subdivided(&mesh);
        let layout = out.layout();
        let v = out.vertices();

        for row in 0..layout.row_count() {
            for col in 0..layout.row_len(row) {
                let index = layout.index_of(row, col).unwrap();
                let (a, b) = match (row % 2, col % 2) {
                    (0, 0) => continue,
                    (0, _) => (Neighbor::Left, Neighbor::Right),
                    (_, 0) => (Neighbor::BelowLeft, Neighbor::AboveRight),
                    (_, _) => (Neighbor::BelowRight, Neighbor::AboveLeft),
                };
                let pa = v[layout.neighbor(row, col, a).unwrap()].position;
                let pb = v[layout.neighbor(row, col, b).unwrap()].position;
                let mid = (pa.coords + pb.coords) / 2.0;
                assert_relative_eq!(v[index].position.coords, mid, epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn test_repeated_subdivision_counts() {
        let mut mesh = make_triangle();
        let mut counts = vec![mesh.len()];
        for _ in 0..4 {
            subdivide(&mut mesh);
            counts.push(mesh.len());
        }
        assert_eq!(counts, vec![3, 6, 15, 45, 153]);
        assert_eq!(mesh.base(), 17);
        assert_eq!(mesh.layout().triangle_count(), 256);
    }

    #[test]
    fn test_flat_mesh_stays_flat() {
        let mut mesh = make_triangle();
        for _ in 0..3 {
            subdivide(&mut mesh);
        }
        assert!(mesh.vertices().iter().all(|v| v.position.z == 0.0 && v.is_finite()));
        for tri in mesh.triangles() {
            let n = tri.normal().expect("non-degenerate");
            assert_relative_eq!(n.z, 1.0, epsilon = 1e-9);
        }
    }

    #[test]
    #[should_panic(expected = "row layout broken")]
    fn test_out_of_range_lookup_panics() {
        let vertices = vec![Vertex::placeholder(); 3];
        fetch(&vertices, RowLayout::new(2), 0, 0, Neighbor::Left);
    }
}
