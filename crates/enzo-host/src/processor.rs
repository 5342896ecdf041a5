//! Audio-thread wrapper tying the engine to the shared parameter store.

use crate::error::StateError;
use crate::shared::SharedParams;
use crate::state::{self, LoadMode};
use enzo_core::{AudioProcessor, EffectEngine, EngineTiming};

/// Host-facing processor: one [`EffectEngine`] fed from [`SharedParams`].
///
/// The host calls [`activate`](Self::activate) on setup, then
/// [`process`](Self::process) once per audio block. Every block reads the
/// parameter store exactly once.
///
/// # Example
///
/// ```rust
/// use enzo_host::{EnzoProcessor, SharedParams};
/// use enzo_core::snapshot::GAIN;
///
/// let params = SharedParams::new();
/// let mut processor = EnzoProcessor::new(params.clone());
/// processor.activate(48000.0, 256);
///
/// params.set_value(GAIN, 0.5);
/// let mut left = [1.0f32; 256];
/// let mut right = [1.0f32; 256];
/// processor.process(&mut [&mut left[..], &mut right[..]]);
/// assert!(left[255] < left[0]);
/// ```
#[derive(Debug)]
pub struct EnzoProcessor {
    engine: EffectEngine,
    params: SharedParams,
    active: bool,
}

impl EnzoProcessor {
    /// Create a processor reading from `params` with default timing.
    pub fn new(params: SharedParams) -> Self {
        Self::with_timing(params, EngineTiming::default())
    }

    /// Create a processor with custom ramp and envelope times.
    pub fn with_timing(params: SharedParams, timing: EngineTiming) -> Self {
        Self {
            engine: EffectEngine::with_timing(timing),
            params,
            active: false,
        }
    }

    /// Prepare for playback. Ramps start at the current parameter values.
    pub fn activate(&mut self, sample_rate: f32, max_block_size: usize) {
        self.engine.load_state(self.params.snapshot());
        self.engine.configure(sample_rate, max_block_size);
        self.active = true;
        tracing::debug!(sample_rate, max_block_size, "processor activated");
    }

    /// Stop playback. Engine state, including the LFO phase, carries over
    /// to the next [`activate`](Self::activate).
    pub fn deactivate(&mut self) {
        self.active = false;
        tracing::debug!("processor deactivated");
    }

    /// Whether [`activate`](Self::activate) has been called since the last deactivation.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Process one block in place. Must follow [`activate`](Self::activate).
    pub fn process(&mut self, channels: &mut [&mut [f32]]) {
        debug_assert!(self.active, "process called before activate");
        let snapshot = self.params.snapshot();
        self.engine.process_block(channels, snapshot);
    }

    /// Shared parameter handle.
    pub fn params(&self) -> &SharedParams {
        &self.params
    }

    /// Wrapped engine.
    pub fn engine(&self) -> &EffectEngine {
        &self.engine
    }

    /// Processing latency reported to the host.
    pub fn latency_samples(&self) -> usize {
        self.engine.latency_samples()
    }

    /// Serialize the current parameter values.
    pub fn save_state(&self) -> Result<Vec<u8>, StateError> {
        state::save(&self.params)
    }

    /// Restore parameter values, skipping entries that do not match.
    pub fn load_state(&mut self, bytes: &[u8]) -> Result<(), StateError> {
        self.load_with(bytes, LoadMode::Lenient)
    }

    /// Restore parameter values, rejecting unknown or malformed entries.
    pub fn load_state_strict(&mut self, bytes: &[u8]) -> Result<(), StateError> {
        self.load_with(bytes, LoadMode::Strict)
    }

    fn load_with(&mut self, bytes: &[u8], mode: LoadMode) -> Result<(), StateError> {
        state::load(&self.params, bytes, mode)?;
        self.engine.load_state(self.params.snapshot());
        Ok(())
    }
}
