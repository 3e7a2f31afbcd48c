//! Frame preparation for the rendering collaborator.
//!
//! Walks the vertex sequence in the fixed row pattern a triangle renderer
//! draws it in and computes each triangle's flat normal. No drawing happens
//! here; the resulting statistics are what a frame would submit.

use std::fmt;

use terrain_types::{TriangularMesh, Vector3};

/// Totals for one prepared frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameStats {
    pub triangles: usize,
    pub degenerate: usize,
    pub surface_area: f64,
    /// Mean unit normal over non-degenerate triangles.
    pub mean_normal: Vector3<f64>,
}

impl fmt::Display for FrameStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} triangles ({} degenerate), area {:.4}, mean normal ({:+.3}, {:+.3}, {:+.3})",
            self.triangles,
            self.degenerate,
            self.surface_area,
            self.mean_normal.x,
            self.mean_normal.y,
            self.mean_normal.z
        )
    }
}

/// Prepare every triangle of `mesh` for drawing.
#[allow(clippy::cast_precision_loss)]
pub fn prepare_frame(mesh: &TriangularMesh) -> FrameStats {
    let mut triangles = 0;
    let mut degenerate = 0;
    let mut surface_area = 0.0;
    let mut normal_sum = Vector3::zeros();

    for tri in mesh.triangles() {
        triangles += 1;
        surface_area += tri.area();
        match tri.normal() {
            Some(n) => normal_sum += n,
            None => degenerate += 1,
        }
    }

    let lit = triangles - degenerate;
    let mean_normal = if lit > 0 {
        normal_sum / lit as f64
    } else {
        Vector3::zeros()
    };

    FrameStats {
        triangles,
        degenerate,
        surface_area,
        mean_normal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use terrain_fractal::subdivide;

    #[test]
    fn test_flat_frame() {
        let mut mesh = TriangularMesh::equilateral(2.0);
        subdivide(&mut mesh);
        subdivide(&mut mesh);

        let stats = prepare_frame(&mesh);
        assert_eq!(stats.triangles, 16);
        assert_eq!(stats.degenerate, 0);
        assert!((stats.mean_normal.z - 1.0).abs() < 1e-9);
        // Area of an equilateral triangle with side 2
        assert!((stats.surface_area - 3.0_f64.sqrt()).abs() < 1e-9);
    }
}
