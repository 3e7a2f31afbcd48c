//! Row layout arithmetic for triangular grids.
//!
//! All adjacency in a [`TriangularMesh`](crate::TriangularMesh) is implied by
//! linear index. The formulas live here so that nothing else has to repeat
//! them.

use std::ops::Range;

use crate::error::{LayoutError, LayoutResult};

/// Triangular number `T(n) = n(n+1)/2`: vertex count of a grid with `n`
/// vertices per edge.
///
/// # Example
///
/// ```
/// use terrain_types::triangular_number;
///
/// assert_eq!(triangular_number(2), 3);
/// assert_eq!(triangular_number(5), 15);
/// ```
#[inline]
#[must_use]
pub const fn triangular_number(n: usize) -> usize {
    n * (n + 1) / 2
}

/// Number of vertices along the base edge for a grid of `vertex_count`
/// vertices.
///
/// Accumulates row lengths `1, 2, 3, ...` until the running total reaches
/// `vertex_count`. For a count that is not triangular the result is the
/// smallest base whose grid holds at least that many vertices.
///
/// # Example
///
/// ```
/// use terrain_types::base_for_count;
///
/// assert_eq!(base_for_count(3), 2);
/// assert_eq!(base_for_count(45), 9);
/// ```
#[must_use]
pub const fn base_for_count(vertex_count: usize) -> usize {
    let mut total = 0;
    let mut base = 0;
    while total < vertex_count {
        base += 1;
        total += base;
    }
    base
}

/// Whether `count` is a triangular number.
#[inline]
#[must_use]
pub const fn is_triangular(count: usize) -> bool {
    triangular_number(base_for_count(count)) == count
}

/// Direction from a vertex to one of its up to six grid neighbors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Neighbor {
    /// Previous vertex in the same row.
    Left,
    /// Next vertex in the same row.
    Right,
    /// Row toward the apex, column `col - 1`.
    AboveLeft,
    /// Row toward the apex, column `col`.
    AboveRight,
    /// Row toward the base, column `col`.
    BelowLeft,
    /// Row toward the base, column `col + 1`.
    BelowRight,
}

impl Neighbor {
    /// All six directions.
    pub const ALL: [Self; 6] = [
        Self::Left,
        Self::Right,
        Self::AboveLeft,
        Self::AboveRight,
        Self::BelowLeft,
        Self::BelowRight,
    ];
}

/// Index arithmetic for a triangular grid with a given base.
///
/// Rows are numbered from the base: row 0 holds `base` vertices, row
/// `base - 1` is the apex. Within a row, columns run along +X. Vertex
/// `(row, col)` sits between `(row - 1, col)` and `(row - 1, col + 1)`.
///
/// ```text
///      above_left  above_right
///    left      (r,c)      right
///      below_left  below_right
/// ```
///
/// # Example
///
/// ```
/// use terrain_types::RowLayout;
///
/// let layout = RowLayout::new(3);
/// assert_eq!(layout.vertex_count(), 6);
/// assert_eq!(layout.row_offsets().collect::<Vec<_>>(), vec![0, 3, 5]);
/// assert_eq!(layout.locate(4), Some((1, 1)));
/// assert_eq!(layout.above_right(1), Some(4));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RowLayout {
    base: usize,
}

impl RowLayout {
    /// Layout for a grid with `base` vertices along its bottom edge.
    #[inline]
    #[must_use]
    pub const fn new(base: usize) -> Self {
        Self { base }
    }

    /// Layout matching a vertex count.
    ///
    /// # Errors
    ///
    /// Returns an error if `count` is zero, below 3, or not a triangular
    /// number.
    pub const fn for_vertex_count(count: usize) -> LayoutResult<Self> {
        if count == 0 {
            return Err(LayoutError::EmptyMesh);
        }
        if count < 3 {
            return Err(LayoutError::TooFewVertices(count));
        }
        let base = base_for_count(count);
        if triangular_number(base) != count {
            return Err(LayoutError::NotTriangular {
                count,
                base: base - 1,
                below: triangular_number(base - 1),
                above: triangular_number(base),
            });
        }
        Ok(Self { base })
    }

    /// Vertices along the bottom edge.
    #[inline]
    #[must_use]
    pub const fn base(self) -> usize {
        self.base
    }

    /// Total vertex count, `T(base)`.
    #[inline]
    #[must_use]
    pub const fn vertex_count(self) -> usize {
        triangular_number(self.base)
    }

    /// Number of rows (equal to the base).
    #[inline]
    #[must_use]
    pub const fn row_count(self) -> usize {
        self.base
    }

    /// Number of triangles, `(base - 1)^2`.
    #[inline]
    #[must_use]
    pub const fn triangle_count(self) -> usize {
        let edges = self.base.saturating_sub(1);
        edges * edges
    }

    /// Layout after one subdivision: base `2b - 1`.
    #[inline]
    #[must_use]
    pub const fn subdivided(self) -> Self {
        Self {
            base: (2 * self.base).saturating_sub(1),
        }
    }

    /// Length of `row`, zero past the apex.
    #[inline]
    #[must_use]
    pub const fn row_len(self, row: usize) -> usize {
        self.base.saturating_sub(row)
    }

    /// Index of the first vertex of `row`.
    ///
    /// For `row == base` this is one past the last vertex.
    #[inline]
    #[must_use]
    pub const fn row_start(self, row: usize) -> usize {
        triangular_number(self.base) - triangular_number(self.row_len(row))
    }

    /// Index range covered by `row`.
    #[inline]
    #[must_use]
    pub const fn row_range(self, row: usize) -> Range<usize> {
        let start = self.row_start(row);
        start..start + self.row_len(row)
    }

    /// Starting indices of the rows of length `base, base - 1, ..., 1`.
    pub fn row_offsets(self) -> impl Iterator<Item = usize> {
        (0..self.base).map(move |row| self.row_start(row))
    }

    /// Index ranges of every row, base first.
    pub fn rows(self) -> impl Iterator<Item = Range<usize>> {
        (0..self.base).map(move |row| self.row_range(row))
    }

    /// `(row, col)` of a linear index.
    #[must_use]
    pub const fn locate(self, index: usize) -> Option<(usize, usize)> {
        let mut row = 0;
        let mut start = 0;
        while row < self.base {
            let len = self.base - row;
            if index < start + len {
                return Some((row, index - start));
            }
            start += len;
            row += 1;
        }
        None
    }

    /// Linear index of `(row, col)`.
    #[inline]
    #[must_use]
    pub const fn index_of(self, row: usize, col: usize) -> Option<usize> {
        if row < self.base && col < self.row_len(row) {
            Some(self.row_start(row) + col)
        } else {
            None
        }
    }

    /// Index of the neighbor of `(row, col)` in direction `dir`.
    ///
    /// Constant time; returns `None` when the neighbor falls off the grid.
    #[must_use]
    pub const fn neighbor(self, row: usize, col: usize, dir: Neighbor) -> Option<usize> {
        match dir {
            Neighbor::Left => match col.checked_sub(1) {
                Some(c) => self.index_of(row, c),
                None => None,
            },
            Neighbor::Right => self.index_of(row, col + 1),
            Neighbor::AboveLeft => match col.checked_sub(1) {
                Some(c) => self.index_of(row + 1, c),
                None => None,
            },
            Neighbor::AboveRight => self.index_of(row + 1, col),
            Neighbor::BelowLeft => match row.checked_sub(1) {
                Some(r) => self.index_of(r, col),
                None => None,
            },
            Neighbor::BelowRight => match row.checked_sub(1) {
                Some(r) => self.index_of(r, col + 1),
                None => None,
            },
        }
    }

    fn neighbor_of(self, index: usize, dir: Neighbor) -> Option<usize> {
        let (row, col) = self.locate(index)?;
        self.neighbor(row, col, dir)
    }

    /// Previous vertex in the same row.
    #[must_use]
    pub fn left_neighbor(self, index: usize) -> Option<usize> {
        self.neighbor_of(index, Neighbor::Left)
    }

    /// Next vertex in the same row.
    #[must_use]
    pub fn right_neighbor(self, index: usize) -> Option<usize> {
        self.neighbor_of(index, Neighbor::Right)
    }

    /// Upper-left vertex in the row toward the apex.
    #[must_use]
    pub fn above_left(self, index: usize) -> Option<usize> {
        self.neighbor_of(index, Neighbor::AboveLeft)
    }

    /// Upper-right vertex in the row toward the apex.
    #[must_use]
    pub fn above_right(self, index: usize) -> Option<usize> {
        self.neighbor_of(index, Neighbor::AboveRight)
    }

    /// Lower-left vertex in the row toward the base.
    #[must_use]
    pub fn below_left(self, index: usize) -> Option<usize> {
        self.neighbor_of(index, Neighbor::BelowLeft)
    }

    /// Lower-right vertex in the row toward the base.
    #[must_use]
    pub fn below_right(self, index: usize) -> Option<usize> {
        self.neighbor_of(index, Neighbor::BelowRight)
    }

    /// Indices of every existing neighbor of `index`.
    pub fn neighbors(self, index: usize) -> impl Iterator<Item = usize> {
        Neighbor::ALL
            .into_iter()
            .filter_map(move |dir| self.neighbor_of(index, dir))
    }

    /// Vertex index triples of every triangle, counter-clockwise from +Z.
    ///
    /// For each row from the base and each column `j` short of the row's
    /// end, yields the upward triangle `(j, j + 1, above j)`, followed by the
    /// downward triangle `(j, above j, above j - 1)` when `j` is interior.
    ///
    /// # Example
    ///
    /// ```
    /// use terrain_types::RowLayout;
    ///
    /// let tris: Vec<_> = RowLayout::new(3).triangle_indices().collect();
    /// assert_eq!(tris, vec![[0, 1, 3], [1, 2, 4], [1, 4, 3], [3, 4, 5]]);
    /// ```
    pub fn triangle_indices(self) -> impl Iterator<Item = [usize; 3]> {
        (0..self.base.saturating_sub(1)).flat_map(move |row| {
            let start = self.row_start(row);
            let len = self.row_len(row);
            (0..len - 1).flat_map(move |j| {
                let above = start + len + j;
                let up = [start + j, start + j + 1, above];
                let down = (j > 0).then_some([start + j, above, above - 1]);
                std::iter::once(up).chain(down)
            })
        })
    }
}
