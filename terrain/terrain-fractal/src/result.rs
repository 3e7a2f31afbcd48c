//! Per-cycle generation reports.

use std::fmt;

/// Summary of one Subdivide + Displace cycle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CycleReport {
    /// 1-based cycle number.
    pub cycle: u32,

    /// Base of the mesh after the cycle.
    pub base: usize,

    /// Vertex count after the cycle.
    pub vertex_count: usize,

    /// Triangle count after the cycle.
    pub triangle_count: usize,

    /// Magnitude used by this cycle's displacement.
    pub magnitude_applied: f64,

    /// Magnitude the next cycle will use.
    pub next_magnitude: f64,

    /// Lowest and highest height after the cycle.
    pub height_range: (f64, f64),
}

impl CycleReport {
    /// Spread between the lowest and highest vertex.
    #[must_use]
    pub fn relief(&self) -> f64 {
        self.height_range.1 - self.height_range.0
    }
}

impl fmt::Display for CycleReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Cycle {}: base {}, {} vertices, {} triangles, magnitude {:.4} → {:.4}, z in [{:.4}, {:.4}]",
            self.cycle,
            self.base,
            self.vertex_count,
            self.triangle_count,
            self.magnitude_applied,
            self.next_magnitude,
            self.height_range.0,
            self.height_range.1
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report() -> CycleReport {
        CycleReport {
            cycle: 2,
            base: 5,
            vertex_count: 15,
            triangle_count: 16,
            magnitude_applied: 1.125,
            next_magnitude: 0.5,
            height_range: (-0.75, 1.25),
        }
    }

    #[test]
    fn test_relief() {
        assert!((report().relief() - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_display() {
        let display = format!("{}", report());
        assert!(display.contains("Cycle 2"));
        assert!(display.contains("15 vertices"));
        assert!(display.contains("16 triangles"));
        assert!(display.contains("1.1250 → 0.5000"));
    }
}
