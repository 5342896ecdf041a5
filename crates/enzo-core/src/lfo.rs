//! Low-frequency oscillator driving the gain modulation.

use core::f64::consts::TAU;
use libm::sin;

/// Sine LFO built on a phase accumulator.
///
/// Phase lives in \[0, 1) and advances by `freq_hz / sample_rate` per
/// sample. Wrapping uses a single subtraction because the increment is
/// always below 1 for the 0.1–20 Hz control range. The phase is kept in
/// `f64` so it does not drift audibly over long sessions.
///
/// # Example
///
/// ```rust
/// use enzo_core::LfoOscillator;
///
/// let mut lfo = LfoOscillator::new();
/// let value = lfo.value(); // sin(0) = 0
/// lfo.advance(2.0, 48000.0);
/// let gain = LfoOscillator::modulation(value, 0.5);
/// assert!((gain - 0.75).abs() < 1e-6);
/// ```
#[derive(Debug, Clone, Default)]
pub struct LfoOscillator {
    /// Current phase position [0.0, 1.0)
    phase: f64,
}

impl LfoOscillator {
    /// Create an oscillator at phase 0.
    pub fn new() -> Self {
        Self { phase: 0.0 }
    }

    /// Bipolar output for the current phase, `sin(2π·phase)` in \[-1, 1\].
    #[inline]
    pub fn value(&self) -> f32 {
        sin(TAU * self.phase) as f32
    }

    /// Advance the phase by one sample.
    #[inline]
    pub fn advance(&mut self, freq_hz: f32, sample_rate: f32) {
        self.phase += f64::from(freq_hz) / f64::from(sample_rate);
        if self.phase >= 1.0 {
            self.phase -= 1.0;
        }
    }

    /// Unipolar gain multiplier for a bipolar LFO value and a strength in \[0, 1\].
    ///
    /// `1 - strength + strength * (value * 0.5 + 0.5)`: strength 0 leaves the
    /// gain untouched, strength 1 swings it from 0 at the trough to 1 at the peak.
    #[inline]
    pub fn modulation(value: f32, strength: f32) -> f32 {
        1.0 - strength + strength * (value * 0.5 + 0.5)
    }

    /// Get current phase (0.0 - 1.0)
    pub fn phase(&self) -> f64 {
        self.phase
    }

    /// Jump to `phase`. Values outside \[0, 1) restart the cycle at 0.
    pub fn set_phase(&mut self, phase: f64) {
        self.phase = if (0.0..1.0).contains(&phase) { phase } else { 0.0 };
    }

    /// Reset phase to 0
    pub fn reset(&mut self) {
        self.phase = 0.0;
    }
}
