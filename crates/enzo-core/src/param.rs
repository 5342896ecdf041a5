//! Parameter ramps for zipper-free control changes.
//!
//! Host controls arrive once per block (and UI controls may stream a new
//! value every block). Applying them directly would step the gain, pan or
//! drive at block boundaries and produce audible "zipper noise". Every
//! control the engine uses runs through a [`SmoothedParam`], a one-pole
//! exponential ramp advanced once per sample.
//!
//! ```rust
//! use enzo_core::SmoothedParam;
//!
//! let mut gain = SmoothedParam::with_config(1.0, 48000.0, 0.02);
//! gain.set_target(0.0);
//!
//! let mut block = [0.8f32; 64];
//! for sample in block.iter_mut() {
//!     *sample *= gain.advance();
//! }
//! assert!(block[63] < block[0]);
//! assert!(block[63] > 0.7, "a 20 ms ramp barely moves in 64 samples");
//! ```

use libm::expf;

/// A scalar control value that ramps exponentially toward its target.
///
/// Each call to [`advance`](Self::advance) moves the current value by
/// `(target - current) * coeff`, where
/// `coeff = 1 - exp(-1 / (sample_rate * ramp_seconds))`. The ramp never
/// jumps, no matter how often [`set_target`](Self::set_target) is called.
#[derive(Debug, Clone)]
pub struct SmoothedParam {
    current: f32,
    target: f32,
    /// Smoothing coefficient (1 = instant, ~0 = very slow)
    coeff: f32,
    sample_rate: f32,
    /// Ramp time constant in seconds
    ramp_seconds: f32,
}

impl SmoothedParam {
    /// Ramp parked at `initial`.
    ///
    /// Smoothing is disabled until [`reset`](Self::reset) (or
    /// [`with_config`](Self::with_config)) supplies a sample rate and
    /// ramp time.
    pub fn new(initial: f32) -> Self {
        Self {
            current: initial,
            target: initial,
            coeff: 1.0,
            sample_rate: 44100.0,
            ramp_seconds: 0.0,
        }
    }

    /// Ramp parked at `initial` with a `ramp_seconds` time constant at `sample_rate`.
    pub fn with_config(initial: f32, sample_rate: f32, ramp_seconds: f32) -> Self {
        let mut param = Self::new(initial);
        param.reset(sample_rate, ramp_seconds);
        param
    }

    /// Reinitialize the ramp coefficient for a new sample rate and time constant.
    ///
    /// The current and target values are left untouched; call
    /// [`set_immediate`](Self::set_immediate) afterwards to snap the ramp
    /// to a known value.
    pub fn reset(&mut self, sample_rate: f32, ramp_seconds: f32) {
        debug_assert!(
            sample_rate.is_finite() && sample_rate > 0.0,
            "sample rate must be finite and positive, got {sample_rate}"
        );
        self.sample_rate = sample_rate;
        self.ramp_seconds = ramp_seconds;
        self.recalculate_coeff();
    }

    /// Set the value the ramp moves toward.
    #[inline]
    pub fn set_target(&mut self, target: f32) {
        self.target = target;
    }

    /// Move both current value and target to `value`.
    ///
    /// Used at setup so the first block does not ramp in from a stale value.
    #[inline]
    pub fn set_immediate(&mut self, value: f32) {
        self.target = value;
        self.current = value;
    }

    /// Step one sample toward the target and return the new value.
    #[inline]
    pub fn advance(&mut self) -> f32 {
        self.current += self.coeff * (self.target - self.current);
        self.current
    }

    /// Value after the most recent step.
    #[inline]
    pub fn get(&self) -> f32 {
        self.current
    }

    /// Value being approached.
    #[inline]
    pub fn target(&self) -> f32 {
        self.target
    }

    /// Per-sample ramp coefficient.
    ///
    /// The largest possible per-sample step is `coeff * |target - current|`.
    #[inline]
    pub fn coeff(&self) -> f32 {
        self.coeff
    }

    /// Ramp time constant in seconds.
    pub fn ramp_seconds(&self) -> f32 {
        self.ramp_seconds
    }

    /// Within 1e-6 of the target.
    #[inline]
    pub fn is_settled(&self) -> bool {
        (self.current - self.target).abs() < 1e-6
    }

    /// Jump to the target.
    #[inline]
    pub fn snap_to_target(&mut self) {
        self.current = self.target;
    }

    /// Recalculate the smoothing coefficient from sample rate and ramp time.
    ///
    /// A one-pole lowpass `y[n] = y[n-1] + coeff * (target - y[n-1])` has a
    /// time constant tau (time to cover 63.2% of a step) when
    ///
    ///   `coeff = 1 - exp(-1 / (tau * sample_rate))`
    ///
    /// After 5*tau the ramp has covered 99.3% of the step. A zero ramp time
    /// gives `coeff = 1`, i.e. instant response.
    fn recalculate_coeff(&mut self) {
        if self.ramp_seconds <= 0.0 || self.sample_rate <= 0.0 {
            self.coeff = 1.0;
        } else {
            let samples = self.ramp_seconds * self.sample_rate;
            self.coeff = 1.0 - expf(-1.0 / samples);
        }
    }
}

impl Default for SmoothedParam {
    fn default() -> Self {
        Self::new(0.0)
    }
}
