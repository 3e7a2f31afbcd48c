//! Displacement state threaded through successive cycles.

use crate::error::{FractalError, FractalResult};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Current displacement magnitude and the damping applied after each use.
///
/// Passed into [`displace`](crate::displace) and returned decayed, so the
/// running magnitude is ordinary owned state instead of a global.
///
/// # Example
///
/// ```
/// use terrain_fractal::GenerationState;
///
/// let state = GenerationState::new(2.0, 0.5)?;
/// assert_eq!(state.decayed().magnitude(), 1.0);
/// assert_eq!(state.magnitude_after(3), 0.25);
/// # Ok::<(), terrain_fractal::FractalError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawState"))]
pub struct GenerationState {
    magnitude: f64,
    damping: f64,
}

/// Unvalidated field set that deserialization goes through.
#[cfg(feature = "serde")]
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawState {
    magnitude: f64,
    damping: f64,
}

#[cfg(feature = "serde")]
impl TryFrom<RawState> for GenerationState {
    type Error = FractalError;

    fn try_from(raw: RawState) -> FractalResult<Self> {
        Self::new(raw.magnitude, raw.damping)
    }
}

impl GenerationState {
    /// Validate and create a state.
    ///
    /// # Errors
    ///
    /// Returns an error if `magnitude` is not positive and finite, or if
    /// `damping` is outside the open interval `(0, 1)`.
    pub fn new(magnitude: f64, damping: f64) -> FractalResult<Self> {
        if !(magnitude.is_finite() && magnitude > 0.0) {
            return Err(FractalError::InvalidMagnitude(magnitude));
        }
        if !(damping > 0.0 && damping < 1.0) {
            return Err(FractalError::InvalidDamping(damping));
        }
        Ok(Self { magnitude, damping })
    }

    /// Width of the displacement interval for the next call.
    #[inline]
    #[must_use]
    pub const fn magnitude(&self) -> f64 {
        self.magnitude
    }

    /// Factor applied to the magnitude after every call.
    #[inline]
    #[must_use]
    pub const fn damping(&self) -> f64 {
        self.damping
    }

    /// State for the following call.
    #[inline]
    #[must_use]
    pub fn decayed(self) -> Self {
        Self {
            magnitude: self.magnitude * self.damping,
            ..self
        }
    }

    /// Magnitude after `cycles` further calls: `magnitude * damping^cycles`.
    #[must_use]
    pub fn magnitude_after(&self, cycles: u32) -> f64 {
        (0..cycles).fold(self.magnitude, |m, _| m * self.damping)
    }
}
