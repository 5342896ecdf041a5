//! Equal-power stereo pan law.

use core::f32::consts::PI;
use libm::{cosf, sinf};

/// Equal-power panner.
///
/// Maps a pan position in \[-1, 1\] to a quarter-circle angle
/// `(pan + 1) * π/4` and returns `(cos, sin)` of it, so
/// `left² + right² = 1` at every position and perceived loudness stays
/// constant across the sweep.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StereoPanner;

impl StereoPanner {
    /// Left and right gains for a pan position in \[-1, 1\].
    ///
    /// # Example
    ///
    /// ```rust
    /// use enzo_core::StereoPanner;
    ///
    /// let (l, r) = StereoPanner::gains(-1.0);
    /// assert!((l - 1.0).abs() < 1e-6 && r.abs() < 1e-6);
    /// ```
    #[inline]
    pub fn gains(pan: f32) -> (f32, f32) {
        let angle = (pan + 1.0) * 0.25 * PI;
        (cosf(angle), sinf(angle))
    }
}
