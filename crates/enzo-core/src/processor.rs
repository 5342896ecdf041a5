//! The processor interface a host adapter drives.
//!
//! A plugin framework calls into an effect at three moments: setup,
//! every audio block, and state save/restore. [`AudioProcessor`] names those
//! entry points so host glue can be written against the trait instead of a
//! concrete engine.

use crate::snapshot::ParameterSnapshot;

/// Real-time audio processor driven by a host.
///
/// # Real-time contract
///
/// [`process_block`](Self::process_block) runs on the audio thread. It must
/// not allocate, lock, log or panic on well-formed input. Everything that
/// depends on the sample rate is derived in [`configure`](Self::configure).
///
/// # Example
///
/// ```rust
/// use enzo_core::{AudioProcessor, EffectEngine, ParameterSnapshot};
///
/// let mut engine = EffectEngine::new();
/// engine.configure(48000.0, 256);
///
/// let mut left = [0.5f32; 256];
/// let mut right = [0.5f32; 256];
/// engine.process_block(&mut [&mut left[..], &mut right[..]], ParameterSnapshot::default());
/// assert_eq!(engine.latency_samples(), 0);
/// ```
pub trait AudioProcessor {
    /// Prepare for playback at `sample_rate`.
    ///
    /// `max_block_size` is informational; implementations must still accept
    /// blocks of any length.
    fn configure(&mut self, sample_rate: f32, max_block_size: usize);

    /// Process channel slices in place with one parameter snapshot.
    fn process_block(&mut self, channels: &mut [&mut [f32]], snapshot: ParameterSnapshot);

    /// Current parameter state for persistence.
    fn save_state(&self) -> ParameterSnapshot;

    /// Restore parameter state. Takes effect on the next block.
    fn load_state(&mut self, snapshot: ParameterSnapshot);

    /// Processing latency in samples.
    fn latency_samples(&self) -> usize {
        0
    }

    /// Time the output keeps ringing after the input stops, in seconds.
    fn tail_seconds(&self) -> f32 {
        0.0
    }

    /// Whether the processor consumes MIDI.
    fn accepts_midi(&self) -> bool {
        false
    }
}
