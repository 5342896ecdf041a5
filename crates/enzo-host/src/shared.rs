//! Lock-free parameter store shared between the UI and audio threads.
//!
//! Values are kept in host units (percent, Hz, -100..100 pan) as f32
//! bit patterns in `AtomicU32`s. The control thread writes with `Release`,
//! the audio thread reads with `Acquire` once per block through
//! [`SharedParams::snapshot`].

use enzo_core::{PARAM_COUNT, PARAM_DESCRIPTORS, ParamDescriptor, ParamUnit, ParameterSnapshot};
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

struct SharedData {
    values: [AtomicU32; PARAM_COUNT],
}

/// Parameter values accessible from every thread.
///
/// Cloning is cheap and shares the same storage, so the UI thread and the
/// audio processor each hold their own handle.
///
/// # Example
///
/// ```rust
/// use enzo_host::SharedParams;
/// use enzo_core::snapshot::SAT_DRIVE;
///
/// let params = SharedParams::new();
/// let audio_side = params.clone();
///
/// params.set_value(SAT_DRIVE, 250.0);
/// assert_eq!(audio_side.get_value(SAT_DRIVE), Some(100.0));
/// assert_eq!(audio_side.snapshot().sat_drive, 1.0);
/// ```
#[derive(Clone)]
pub struct SharedParams {
    inner: Arc<SharedData>,
}

impl Default for SharedParams {
    fn default() -> Self {
        Self::new()
    }
}

impl SharedParams {
    /// Create a store with every parameter at its default.
    pub fn new() -> Self {
        let values = core::array::from_fn(|i| AtomicU32::new(PARAM_DESCRIPTORS[i].default.to_bits()));
        Self {
            inner: Arc::new(SharedData { values }),
        }
    }

    /// Number of parameters.
    pub fn param_count(&self) -> usize {
        PARAM_COUNT
    }

    /// Get parameter descriptor by index.
    pub fn descriptor(&self, index: usize) -> Option<&'static ParamDescriptor> {
        PARAM_DESCRIPTORS.get(index)
    }

    /// All parameter descriptors.
    pub fn descriptors(&self) -> &'static [ParamDescriptor] {
        &PARAM_DESCRIPTORS
    }

    /// Find parameter index by stable `ParamId`.
    pub fn index_by_id(&self, id: u32) -> Option<usize> {
        PARAM_DESCRIPTORS.iter().position(|d| d.id.0 == id)
    }

    /// Read the current value of a parameter (lock-free).
    pub fn get_value(&self, index: usize) -> Option<f32> {
        self.inner
            .values
            .get(index)
            .map(|v| f32::from_bits(v.load(Ordering::Acquire)))
    }

    /// Write a parameter value (lock-free). Clamps to descriptor bounds.
    pub fn set_value(&self, index: usize, value: f32) {
        if let Some((atomic, desc)) = self.inner.values.get(index).zip(PARAM_DESCRIPTORS.get(index)) {
            atomic.store(desc.clamp(value).to_bits(), Ordering::Release);
        }
    }

    /// Current value as a control position in \[0, 1\], following the
    /// parameter's scale.
    pub fn get_normalized(&self, index: usize) -> Option<f32> {
        let desc = PARAM_DESCRIPTORS.get(index)?;
        self.get_value(index).map(|v| desc.normalize(v))
    }

    /// Write a control position in \[0, 1\]. Stepped parameters land on whole steps.
    pub fn set_normalized(&self, index: usize, position: f32) {
        let Some(desc) = PARAM_DESCRIPTORS.get(index) else {
            return;
        };
        let mut value = desc.denormalize(position);
        if desc.step_labels.is_some() {
            value = value.round();
        }
        self.set_value(index, value);
    }

    /// Display text for the current value: the step label for switches and
    /// choices, otherwise the number with its unit.
    pub fn value_text(&self, index: usize) -> Option<String> {
        let desc = PARAM_DESCRIPTORS.get(index)?;
        let value = self.get_value(index)?;
        if let Some(label) = desc.label_for(value) {
            return Some(label.to_owned());
        }
        let text = match desc.unit {
            ParamUnit::LinearGain => format!("{:.1}{}", value * 100.0, desc.unit.suffix()),
            ParamUnit::Hertz => format!("{value:.2}{}", desc.unit.suffix()),
            ParamUnit::Percent | ParamUnit::None => format!("{value:.1}{}", desc.unit.suffix()),
        };
        Some(text)
    }

    /// Read every parameter once and build the block snapshot.
    pub fn snapshot(&self) -> ParameterSnapshot {
        let raw: [f32; PARAM_COUNT] =
            core::array::from_fn(|i| f32::from_bits(self.inner.values[i].load(Ordering::Acquire)));
        ParameterSnapshot::from_host_values(&raw)
    }

    /// Overwrite every parameter from a snapshot.
    pub fn store_snapshot(&self, snapshot: &ParameterSnapshot) {
        for (index, value) in snapshot.to_host_values().into_iter().enumerate() {
            self.set_value(index, value);
        }
    }

    /// Restore every parameter to its default.
    pub fn reset_to_defaults(&self) {
        for (index, desc) in PARAM_DESCRIPTORS.iter().enumerate() {
            self.set_value(index, desc.default);
        }
    }
}

impl core::fmt::Debug for SharedParams {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let mut map = f.debug_map();
        for (index, desc) in PARAM_DESCRIPTORS.iter().enumerate() {
            map.entry(&desc.string_id, &self.get_value(index));
        }
        map.finish()
    }
}
