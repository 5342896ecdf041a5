//! Feed-forward auto-gain compensation for the saturation stage.
//!
//! Driving a waveshaper harder raises its perceived loudness. The
//! compensator tracks the input peak envelope, asks the active curve what it
//! would output at that envelope level under the current drive, and scales
//! the wet signal by the ratio. No lookahead buffer is used, so the stage adds
//! zero latency.
//!
//! This is an envelope-driven approximation, not an RMS or loudness match.
//! The factor is clamped to [`MIN_COMPENSATION`]..=[`MAX_COMPENSATION`] so a
//! near-silent envelope against a near-zero curve output cannot run away.

use crate::envelope::EnvelopeFollower;
use crate::saturation::{SaturationMode, apply};

/// Envelope level below which compensation is disabled (factor 1.0).
pub const SILENCE_THRESHOLD: f32 = 0.002;

/// Curve output below which the ratio is not trusted (factor 1.0).
pub const MIN_DRIVEN_LEVEL: f32 = 0.0001;

/// Lower bound of the compensation factor.
pub const MIN_COMPENSATION: f32 = 0.1;

/// Upper bound of the compensation factor.
pub const MAX_COMPENSATION: f32 = 4.0;

/// Compensation factor for a given envelope, drive multiplier and curve.
///
/// Returns 1.0 when the envelope is at or below [`SILENCE_THRESHOLD`] or the
/// estimated curve output is at or below [`MIN_DRIVEN_LEVEL`]; otherwise
/// `envelope / envDriven` clamped to \[0.1, 4.0\].
///
/// Fold uses the bounded peak estimate `min(envelope * drive, 1)` instead of
/// evaluating the folder: folding is non-monotonic and would produce
/// compensation spikes near its zero crossings.
#[inline]
pub fn compensation(envelope: f32, drive: f32, mode: SaturationMode) -> f32 {
    if envelope <= SILENCE_THRESHOLD {
        return 1.0;
    }

    let env_driven = match mode {
        SaturationMode::Fold => (envelope * drive).min(1.0),
        _ => apply(envelope * drive, mode).abs(),
    };

    if env_driven > MIN_DRIVEN_LEVEL {
        (envelope / env_driven).clamp(MIN_COMPENSATION, MAX_COMPENSATION)
    } else {
        1.0
    }
}

/// Envelope follower plus curve-aware gain correction.
///
/// # Example
///
/// ```rust
/// use enzo_core::{AutoGainCompensator, SaturationMode};
///
/// let mut agc = AutoGainCompensator::new(48000.0);
///
/// // Feed the stereo peak, then shape each channel with the returned factor.
/// let comp = agc.track(0.05, 10.0, SaturationMode::Digital);
/// let wet = agc.shape(0.05, 10.0, SaturationMode::Digital, comp);
/// assert!(wet.is_finite());
/// ```
#[derive(Debug, Clone)]
pub struct AutoGainCompensator {
    envelope: EnvelopeFollower,
    last_factor: f32,
}

impl AutoGainCompensator {
    /// Create a compensator with the default 5 ms / 150 ms envelope.
    pub fn new(sample_rate: f32) -> Self {
        Self {
            envelope: EnvelopeFollower::new(sample_rate),
            last_factor: 1.0,
        }
    }

    /// Recompute the envelope coefficients for a new sample rate and time constants.
    ///
    /// Clears the envelope; this is the only place it is reset besides
    /// [`reset`](Self::reset).
    pub fn configure(&mut self, sample_rate: f32, attack_seconds: f32, release_seconds: f32) {
        self.envelope = EnvelopeFollower::with_times(sample_rate, attack_seconds, release_seconds);
        self.last_factor = 1.0;
    }

    /// Advance the envelope with one peak value and return the compensation factor.
    ///
    /// `input_abs_peak` is `max(|left|, |right|)` for the stereo path or
    /// `|sample|` for a single channel.
    #[inline]
    pub fn track(&mut self, input_abs_peak: f32, drive: f32, mode: SaturationMode) -> f32 {
        let envelope = self.envelope.update(input_abs_peak);
        self.last_factor = compensation(envelope, drive, mode);
        self.last_factor
    }

    /// Drive, shape and compensate one sample.
    #[inline]
    pub fn shape(&self, sample: f32, drive: f32, mode: SaturationMode, comp: f32) -> f32 {
        apply(sample * drive, mode) * comp
    }

    /// Current envelope estimate.
    pub fn envelope(&self) -> f32 {
        self.envelope.level()
    }

    /// Factor returned by the most recent [`track`](Self::track) call.
    pub fn last_factor(&self) -> f32 {
        self.last_factor
    }

    /// Clear the envelope state.
    pub fn reset(&mut self) {
        self.envelope.reset();
        self.last_factor = 1.0;
    }
}

impl Default for AutoGainCompensator {
    fn default() -> Self {
        Self::new(48000.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn silence_guard_returns_unity() {
        for mode in SaturationMode::ALL {
            assert_eq!(compensation(0.0, 10.0, mode), 1.0);
            assert_eq!(compensation(SILENCE_THRESHOLD, 10.0, mode), 1.0);
        }
    }

    #[test]
    fn digital_compensation_matches_ratio() {
        // envDriven = clamp(0.5) = 0.5 → 0.05 / 0.5 = 0.1
        let comp = compensation(0.05, 10.0, SaturationMode::Digital);
        assert!((comp - 0.1).abs() < 1e-6);
    }

    #[test]
    fn clamp_upper_bound() {
        // Fold peak estimate of 0.5 * 10 is capped at 1 → ratio 0.5.
        let comp = compensation(0.5, 10.0, SaturationMode::Fold);
        assert!((comp - 0.5).abs() < 1e-6);

        // Huge envelope against bounded tanh output hits the 4.0 ceiling.
        let comp = compensation(100.0, 1.0, SaturationMode::Tape);
        assert_eq!(comp, MAX_COMPENSATION);
    }

    #[test]
    fn clamp_lower_bound() {
        // Large drive into identity → ratio 1/drive would go below 0.1.
        let comp = compensation(0.01, 50.0, SaturationMode::Off);
        assert_eq!(comp, MIN_COMPENSATION);
    }

    #[test]
    fn fold_uses_bounded_estimate() {
        // Evaluating the folder at 2.0 would give 0.0 and fall back to 1.0;
        // the bounded estimate gives min(2.0, 1.0) = 1.0 → 0.2 / 1.0.
        let comp = compensation(0.2, 10.0, SaturationMode::Fold);
        assert!((comp - 0.2).abs() < 1e-6);
    }

    #[test]
    fn tracked_factor_settles_for_constant_input() {
        let mut agc = AutoGainCompensator::new(44100.0);
        let mut comp = 1.0;
        for _ in 0..44100 {
            comp = agc.track(0.05, 10.0, SaturationMode::Digital);
        }
        assert!((comp - 0.1).abs() < 1e-3, "got {comp}");
        assert!((agc.envelope() - 0.05).abs() < 1e-3);
        assert_eq!(agc.last_factor(), comp);

        let wet = agc.shape(0.05, 10.0, SaturationMode::Digital, comp);
        assert!((wet - 0.05).abs() < 1e-3, "got {wet}");
    }

    #[test]
    fn reset_clears_envelope() {
        let mut agc = AutoGainCompensator::new(48000.0);
        for _ in 0..100 {
            agc.track(1.0, 1.0, SaturationMode::Tape);
        }
        agc.reset();
        assert_eq!(agc.envelope(), 0.0);
        assert_eq!(agc.last_factor(), 1.0);
    }
}
