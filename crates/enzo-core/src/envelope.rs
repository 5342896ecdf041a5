//! Peak envelope follower feeding the auto-gain stage.

use libm::expf;

use crate::math::flush_denormal;

/// Default attack time constant (seconds).
pub const DEFAULT_ATTACK_SECONDS: f32 = 0.005;

/// Default release time constant (seconds).
pub const DEFAULT_RELEASE_SECONDS: f32 = 0.150;

/// Asymmetric one-pole peak tracker.
///
/// Rises with the attack coefficient whenever the instantaneous peak exceeds
/// the current envelope, and decays with the release coefficient otherwise.
/// A fast attack (5 ms) catches transients; a slow release (150 ms) keeps the
/// estimate from pumping between peaks.
///
/// The envelope state persists across blocks and is only cleared by
/// [`reset`](Self::reset).
///
/// # Example
///
/// ```rust
/// use enzo_core::EnvelopeFollower;
///
/// let mut env = EnvelopeFollower::new(48000.0);
/// let level = env.update(0.5);
/// assert!(level > 0.0 && level < 0.5);
/// ```
#[derive(Debug, Clone)]
pub struct EnvelopeFollower {
    envelope: f32,
    attack_coeff: f32,
    release_coeff: f32,
    sample_rate: f32,
    attack_seconds: f32,
    release_seconds: f32,
}

impl EnvelopeFollower {
    /// Create a follower with the default 5 ms attack and 150 ms release.
    pub fn new(sample_rate: f32) -> Self {
        Self::with_times(sample_rate, DEFAULT_ATTACK_SECONDS, DEFAULT_RELEASE_SECONDS)
    }

    /// Create with specified attack and release time constants.
    pub fn with_times(sample_rate: f32, attack_seconds: f32, release_seconds: f32) -> Self {
        let mut follower = Self {
            envelope: 0.0,
            attack_coeff: 0.0,
            release_coeff: 0.0,
            sample_rate,
            attack_seconds,
            release_seconds,
        };
        follower.recalculate_coefficients();
        follower
    }

    /// Re-derive both coefficients for a new sample rate.
    pub fn set_sample_rate(&mut self, sample_rate: f32) {
        self.sample_rate = sample_rate;
        self.recalculate_coefficients();
    }

    /// Set both time constants (seconds) and recalculate coefficients.
    pub fn set_times(&mut self, attack_seconds: f32, release_seconds: f32) {
        self.attack_seconds = attack_seconds;
        self.release_seconds = release_seconds;
        self.recalculate_coefficients();
    }

    /// Advance by one sample with the given absolute peak and return the envelope.
    ///
    /// `input_abs_peak` is expected to be non-negative (the caller has already
    /// rectified, e.g. `max(|left|, |right|)`).
    #[inline]
    pub fn update(&mut self, input_abs_peak: f32) -> f32 {
        let coeff = if input_abs_peak > self.envelope {
            self.attack_coeff
        } else {
            self.release_coeff
        };

        self.envelope = flush_denormal(self.envelope + coeff * (input_abs_peak - self.envelope));
        self.envelope
    }

    /// Envelope after the most recent update.
    #[inline]
    pub fn level(&self) -> f32 {
        self.envelope
    }

    /// Attack coefficient (per-sample fraction of the gap closed while rising).
    pub fn attack_coeff(&self) -> f32 {
        self.attack_coeff
    }

    /// Release coefficient (per-sample fraction of the gap closed while falling).
    pub fn release_coeff(&self) -> f32 {
        self.release_coeff
    }

    /// Drop the envelope to zero.
    pub fn reset(&mut self) {
        self.envelope = 0.0;
    }

    fn recalculate_coefficients(&mut self) {
        self.attack_coeff = one_pole_coeff(self.sample_rate, self.attack_seconds);
        self.release_coeff = one_pole_coeff(self.sample_rate, self.release_seconds);
    }
}

impl Default for EnvelopeFollower {
    fn default() -> Self {
        Self::new(48000.0)
    }
}

/// `1 - exp(-1 / (sample_rate * seconds))`, or 1.0 for a zero time constant.
#[inline]
fn one_pole_coeff(sample_rate: f32, seconds: f32) -> f32 {
    let samples = sample_rate * seconds;
    if samples <= 0.0 {
        1.0
    } else {
        1.0 - expf(-1.0 / samples)
    }
}
