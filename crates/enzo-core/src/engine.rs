//! The effect engine: LFO gain, saturation with auto-gain, and equal-power pan.
//!
//! Signal flow per sample:
//!
//! ```text
//! in ─┬─────────────────────────────┐
//!     └─ drive ─ curve ─ × comp ─ wet ┴─ mix ─ × gain·lfo ─ × pan ─ out
//! ```
//!
//! Every control runs through a [`SmoothedParam`], so parameter changes
//! between blocks never step the output. The saturation stage is faded in
//! and out by its own ramp instead of being switched, which keeps enable,
//! disable and mode-to-Off transitions click-free.
//!
//! ## Channel handling
//!
//! Panning and saturation are defined for the first two channels only:
//!
//! - **2 or more channels**: channels 0 and 1 get saturation and pan,
//!   channels 2.. get gain only.
//! - **fewer than 2 channels**: each channel gets saturation and gain, no pan.
//!
//! This is an explicit branch on channel count, not an N-channel matrix.

use crate::auto_gain::AutoGainCompensator;
use crate::envelope::{DEFAULT_ATTACK_SECONDS, DEFAULT_RELEASE_SECONDS};
use crate::lfo::LfoOscillator;
use crate::math::wet_dry_mix;
use crate::pan::StereoPanner;
use crate::param::SmoothedParam;
use crate::processor::AudioProcessor;
use crate::snapshot::ParameterSnapshot;

/// Sat-mix level at or below which the saturation math is skipped.
pub const DRY_THRESHOLD: f32 = 0.0001;

const DEFAULT_SAMPLE_RATE: f32 = 44100.0;

/// Ramp and envelope time constants, in seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineTiming {
    /// Gain ramp.
    pub gain_seconds: f32,
    /// Pan ramp.
    pub pan_seconds: f32,
    /// Drive ramp. Slower than the others to avoid zipper noise on the curve input.
    pub drive_seconds: f32,
    /// Saturation crossfade ramp.
    pub sat_mix_seconds: f32,
    /// Envelope attack.
    pub attack_seconds: f32,
    /// Envelope release.
    pub release_seconds: f32,
}

impl Default for EngineTiming {
    fn default() -> Self {
        Self {
            gain_seconds: 0.02,
            pan_seconds: 0.02,
            drive_seconds: 0.05,
            sat_mix_seconds: 0.02,
            attack_seconds: DEFAULT_ATTACK_SECONDS,
            release_seconds: DEFAULT_RELEASE_SECONDS,
        }
    }
}

/// Stereo gain / pan / saturation effect.
///
/// Owns all mutable DSP state. Nothing is allocated after construction.
///
/// # Example
///
/// ```rust
/// use enzo_core::{AudioProcessor, EffectEngine, ParameterSnapshot};
///
/// let mut engine = EffectEngine::new();
/// engine.configure(44100.0, 512);
///
/// let mut left = vec![1.0f32; 512];
/// let mut right = vec![1.0f32; 512];
/// engine.process_block(&mut [&mut left[..], &mut right[..]], ParameterSnapshot::default());
///
/// // Center pan is -3 dB per side.
/// assert!((left[511] - 0.7071).abs() < 1e-3);
/// ```
#[derive(Debug, Clone)]
pub struct EffectEngine {
    sample_rate: f32,
    max_block_size: usize,
    timing: EngineTiming,

    gain: SmoothedParam,
    pan: SmoothedParam,
    drive: SmoothedParam,
    sat_mix: SmoothedParam,

    lfo: LfoOscillator,
    auto_gain: AutoGainCompensator,

    snapshot: ParameterSnapshot,
}

impl Default for EffectEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl EffectEngine {
    /// Create an engine with the default ramp and envelope times.
    pub fn new() -> Self {
        Self::with_timing(EngineTiming::default())
    }

    /// Create an engine with custom ramp and envelope times.
    ///
    /// The engine starts at 44.1 kHz with the default parameter snapshot;
    /// call [`configure`](AudioProcessor::configure) before processing.
    pub fn with_timing(timing: EngineTiming) -> Self {
        let snapshot = ParameterSnapshot::default();
        let sr = DEFAULT_SAMPLE_RATE;
        let mut auto_gain = AutoGainCompensator::new(sr);
        auto_gain.configure(sr, timing.attack_seconds, timing.release_seconds);

        Self {
            sample_rate: sr,
            max_block_size: 0,
            timing,
            gain: SmoothedParam::with_config(snapshot.gain, sr, timing.gain_seconds),
            pan: SmoothedParam::with_config(snapshot.pan, sr, timing.pan_seconds),
            drive: SmoothedParam::with_config(snapshot.drive_multiplier(), sr, timing.drive_seconds),
            sat_mix: SmoothedParam::with_config(snapshot.sat_mix_target(), sr, timing.sat_mix_seconds),
            lfo: LfoOscillator::new(),
            auto_gain,
            snapshot,
        }
    }

    /// Current sample rate in Hz.
    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    /// Block size reported by the last [`configure`](AudioProcessor::configure).
    pub fn max_block_size(&self) -> usize {
        self.max_block_size
    }

    /// Ramp and envelope times in use.
    pub fn timing(&self) -> EngineTiming {
        self.timing
    }

    /// Current LFO phase in \[0, 1).
    pub fn lfo_phase(&self) -> f64 {
        self.lfo.phase()
    }

    /// Current auto-gain envelope level.
    pub fn envelope(&self) -> f32 {
        self.auto_gain.envelope()
    }

    /// Most recent auto-gain compensation factor.
    pub fn last_compensation(&self) -> f32 {
        self.auto_gain.last_factor()
    }

    /// Current value of the saturation crossfade ramp.
    pub fn sat_mix(&self) -> f32 {
        self.sat_mix.get()
    }

    fn push_targets(&mut self, snapshot: &ParameterSnapshot) {
        self.gain.set_target(snapshot.gain);
        self.pan.set_target(snapshot.pan);
        self.drive.set_target(snapshot.drive_multiplier());
        self.sat_mix.set_target(snapshot.sat_mix_target());
    }

    fn snap_all(&mut self) {
        let snapshot = self.snapshot;
        self.gain.set_immediate(snapshot.gain);
        self.pan.set_immediate(snapshot.pan);
        self.drive.set_immediate(snapshot.drive_multiplier());
        self.sat_mix.set_immediate(snapshot.sat_mix_target());
    }
}

impl AudioProcessor for EffectEngine {
    fn configure(&mut self, sample_rate: f32, max_block_size: usize) {
        debug_assert!(
            sample_rate.is_finite() && sample_rate > 0.0,
            "sample rate must be positive and finite, got {sample_rate}"
        );

        self.sample_rate = sample_rate;
        self.max_block_size = max_block_size;

        let t = self.timing;
        self.gain.reset(sample_rate, t.gain_seconds);
        self.pan.reset(sample_rate, t.pan_seconds);
        self.drive.reset(sample_rate, t.drive_seconds);
        self.sat_mix.reset(sample_rate, t.sat_mix_seconds);
        self.snap_all();

        self.auto_gain.configure(sample_rate, t.attack_seconds, t.release_seconds);

        #[cfg(feature = "tracing")]
        tracing::debug!(
            sample_rate,
            max_block_size,
            sat_mode = self.snapshot.sat_mode.label(),
            "engine configured"
        );
    }

    fn process_block(&mut self, channels: &mut [&mut [f32]], snapshot: ParameterSnapshot) {
        self.snapshot = snapshot;
        self.push_targets(&snapshot);

        let num_samples = channels.iter().map(|c| c.len()).min().unwrap_or(0);
        let num_channels = channels.len();
        let mode = snapshot.sat_mode;
        let sample_rate = self.sample_rate;

        for i in 0..num_samples {
            let base_gain = self.gain.advance();
            let drive = self.drive.advance();
            let sat_mix = self.sat_mix.advance();

            let lfo_value = self.lfo.value();
            let final_gain = if snapshot.lfo_enabled {
                base_gain * LfoOscillator::modulation(lfo_value, snapshot.lfo_strength)
            } else {
                base_gain
            };
            self.lfo.advance(snapshot.lfo_freq_hz, sample_rate);

            let (left_gain, right_gain) = StereoPanner::gains(self.pan.advance());

            if num_channels >= 2 {
                let mut l = channels[0][i];
                let mut r = channels[1][i];

                if sat_mix > DRY_THRESHOLD {
                    let comp = self.auto_gain.track(l.abs().max(r.abs()), drive, mode);
                    let wet_l = self.auto_gain.shape(l, drive, mode, comp);
                    let wet_r = self.auto_gain.shape(r, drive, mode, comp);
                    l = wet_dry_mix(l, wet_l, sat_mix);
                    r = wet_dry_mix(r, wet_r, sat_mix);
                }

                channels[0][i] = l * final_gain * left_gain;
                channels[1][i] = r * final_gain * right_gain;

                for channel in channels[2..].iter_mut() {
                    channel[i] *= final_gain;
                }
            } else {
                for channel in channels.iter_mut() {
                    let mut s = channel[i];

                    if sat_mix > DRY_THRESHOLD {
                        let comp = self.auto_gain.track(s.abs(), drive, mode);
                        let wet = self.auto_gain.shape(s, drive, mode, comp);
                        s = wet_dry_mix(s, wet, sat_mix);
                    }

                    channel[i] = s * final_gain;
                }
            }
        }
    }

    fn save_state(&self) -> ParameterSnapshot {
        self.snapshot
    }

    fn load_state(&mut self, snapshot: ParameterSnapshot) {
        self.snapshot = snapshot;
        self.push_targets(&snapshot);

        #[cfg(feature = "tracing")]
        tracing::debug!(
            gain = snapshot.gain,
            pan = snapshot.pan,
            sat_mode = snapshot.sat_mode.label(),
            "engine state loaded"
        );
    }
}
