//! Core types for triangular fractal terrain.
//!
//! This crate provides the data structure the terrain generator operates on:
//!
//! - [`Vertex`] - A point in 3D space with a transient `pending` flag
//! - [`TriangularMesh`] - A row-major vertex sequence laid out as a triangular grid
//! - [`RowLayout`] - Row offsets and neighbor arithmetic for that grid
//! - [`Triangle`] - A concrete triangle with flat-normal helpers
//!
//! # Layout
//!
//! A mesh with `base` vertices along its bottom edge stores
//! `T(base) = base * (base + 1) / 2` vertices. Rows are contiguous and run
//! from the base row (row 0, `base` vertices) to the apex (one vertex).
//! Adjacency is never stored: it is recovered from a vertex's linear index.
//!
//! ```text
//!          5              row 2 (apex)
//!        3   4            row 1
//!      0   1   2          row 0 (base)
//! ```
//!
//! # Coordinate System
//!
//! - X: along the rows
//! - Y: across the rows (base row at negative Y)
//! - Z: height, the only axis displaced by the generator
//!
//! Triangle index triples are **counter-clockwise** viewed from +Z.
//!
//! # Example
//!
//! ```
//! use terrain_types::TriangularMesh;
//!
//! let mesh = TriangularMesh::equilateral(7.0);
//! assert_eq!(mesh.len(), 3);
//! assert_eq!(mesh.base(), 2);
//! assert_eq!(mesh.layout().triangle_count(), 1);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod error;
mod layout;
mod mesh;
mod triangle;
mod vertex;

pub use error::{LayoutError, LayoutResult};
pub use layout::{Neighbor, RowLayout, base_for_count, is_triangular, triangular_number};
pub use mesh::TriangularMesh;
pub use triangle::Triangle;
pub use vertex::Vertex;

// Re-export nalgebra types for convenience
pub use nalgebra::{Point3, Vector3};
