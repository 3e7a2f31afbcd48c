//! Terrain vertex type.

use nalgebra::Point3;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A terrain vertex.
///
/// `pending` marks a vertex inserted by subdivision whose coordinates have not
/// been resolved from its neighbors yet. A mesh handed out of the generator
/// never contains pending vertices.
///
/// # Example
///
/// ```
/// use terrain_types::Vertex;
///
/// let v = Vertex::from_coords(1.0, 2.0, 3.0);
/// assert_eq!(v.position.z, 3.0);
/// assert!(!v.is_pending());
///
/// let p = Vertex::placeholder();
/// assert!(p.is_pending());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Vertex {
    /// 3D position.
    pub position: Point3<f64>,

    /// Set while the vertex awaits position resolution.
    pub pending: bool,
}

impl Vertex {
    /// Create a resolved vertex at `position`.
    #[inline]
    #[must_use]
    pub const fn new(position: Point3<f64>) -> Self {
        Self {
            position,
            pending: false,
        }
    }

    /// Create a resolved vertex from raw coordinates.
    #[inline]
    #[must_use]
    #[allow(clippy::missing_const_for_fn)] // Point3::new is not const in nalgebra
    pub fn from_coords(x: f64, y: f64, z: f64) -> Self {
        Self::new(Point3::new(x, y, z))
    }

    /// Create a pending vertex at the origin.
    #[inline]
    #[must_use]
    pub fn placeholder() -> Self {
        Self {
            position: Point3::origin(),
            pending: true,
        }
    }

    /// Whether the vertex still awaits resolution.
    #[inline]
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.pending
    }

    /// Assign a position and clear the pending flag.
    #[inline]
    pub fn resolve(&mut self, x: f64, y: f64, z: f64) {
        self.position = Point3::new(x, y, z);
        self.pending = false;
    }

    /// Whether every coordinate is finite.
    #[inline]
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.position.iter().all(|c| c.is_finite())
    }
}

impl From<Point3<f64>> for Vertex {
    fn from(position: Point3<f64>) -> Self {
        Self::new(position)
    }
}

impl From<[f64; 3]> for Vertex {
    fn from([x, y, z]: [f64; 3]) -> Self {
        Self::from_coords(x, y, z)
    }
}
