//! Per-block parameter snapshot and the host parameter layout.
//!
//! The host stores eight parameters in host units (percent, Hz, -100..100
//! pan). [`ParameterSnapshot`] holds one consistent read of them, already
//! normalized for the DSP: pan in \[-1, 1\], strength and drive in \[0, 1\].
//! The engine takes a snapshot by value at the start of each block and
//! never reads the host store directly.

use crate::param_info::{ParamDescriptor, ParamId, ParamScale, ParamUnit, ParameterInfo};
use crate::saturation::SaturationMode;

/// Number of host parameters.
pub const PARAM_COUNT: usize = 8;

/// Index of the gain parameter.
pub const GAIN: usize = 0;
/// Index of the LFO strength parameter.
pub const LFO_STRENGTH: usize = 1;
/// Index of the LFO frequency parameter.
pub const LFO_FREQ: usize = 2;
/// Index of the LFO enable switch.
pub const LFO_ENABLED: usize = 3;
/// Index of the pan parameter.
pub const PAN: usize = 4;
/// Index of the saturation mode choice.
pub const SAT_MODE: usize = 5;
/// Index of the saturation enable switch.
pub const SAT_ENABLED: usize = 6;
/// Index of the saturation drive parameter.
pub const SAT_DRIVE: usize = 7;

/// Host parameter descriptors in index order. IDs 100..=107 are stable.
pub static PARAM_DESCRIPTORS: [ParamDescriptor; PARAM_COUNT] = [
    ParamDescriptor::custom("Gain", "Gain", 0.0, 1.5, 1.0)
        .with_unit(ParamUnit::LinearGain)
        .with_id(ParamId(100), "gain"),
    ParamDescriptor::custom("LFO Strength", "LFO Amt", 0.0, 100.0, 0.0)
        .with_unit(ParamUnit::Percent)
        .with_step(0.1)
        .with_id(ParamId(101), "lfo_strength")
        .with_group("lfo"),
    // JUCE skew 0.4 → power exponent 2.5
    ParamDescriptor::custom("LFO Frequency", "LFO Rate", 0.1, 20.0, 1.0)
        .with_unit(ParamUnit::Hertz)
        .with_scale(ParamScale::Power(2.5))
        .with_id(ParamId(102), "lfo_freq")
        .with_group("lfo"),
    ParamDescriptor::toggle("LFO Enabled", "LFO On", false)
        .with_id(ParamId(103), "lfo_enabled")
        .with_group("lfo"),
    ParamDescriptor::custom("Pan", "Pan", -100.0, 100.0, 0.0)
        .with_unit(ParamUnit::Percent)
        .with_step(1.0)
        .with_id(ParamId(104), "pan"),
    ParamDescriptor::choice("Saturation Mode", "Sat Mode", &SaturationMode::LABELS, 0)
        .with_id(ParamId(105), "sat_mode")
        .with_group("saturation"),
    ParamDescriptor::toggle("Saturation Enabled", "Sat On", false)
        .with_id(ParamId(106), "sat_enabled")
        .with_group("saturation"),
    ParamDescriptor::custom("Saturation Drive", "Drive", 0.0, 100.0, 0.0)
        .with_unit(ParamUnit::Percent)
        .with_step(0.1)
        .with_id(ParamId(107), "sat_drive")
        .with_group("saturation"),
];

/// Minimum drive multiplier (drive 0%).
pub const MIN_DRIVE: f32 = 1.0;

/// Drive multiplier range added on top of [`MIN_DRIVE`] at drive 100%.
pub const DRIVE_RANGE: f32 = 9.0;

/// One block's worth of control values, normalized for the DSP.
///
/// # Example
///
/// ```rust
/// use enzo_core::{ParameterSnapshot, SaturationMode};
///
/// // Raw host values: gain, strength %, freq Hz, lfo on, pan, mode, sat on, drive %
/// let snap = ParameterSnapshot::from_host_values(&[1.0, 50.0, 2.0, 1.0, -100.0, 3.0, 1.0, 100.0]);
/// assert_eq!(snap.pan, -1.0);
/// assert_eq!(snap.sat_mode, SaturationMode::Digital);
/// assert_eq!(snap.drive_multiplier(), 10.0);
/// assert_eq!(snap.sat_mix_target(), 1.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParameterSnapshot {
    /// Linear gain in \[0, 1.5\].
    pub gain: f32,
    /// Pan position in \[-1, 1\].
    pub pan: f32,
    /// LFO depth in \[0, 1\].
    pub lfo_strength: f32,
    /// LFO rate in Hz, \[0.1, 20\].
    pub lfo_freq_hz: f32,
    /// Whether the LFO modulates the gain.
    pub lfo_enabled: bool,
    /// Active saturation curve.
    pub sat_mode: SaturationMode,
    /// Whether the saturation stage is mixed in.
    pub sat_enabled: bool,
    /// Saturation drive in \[0, 1\].
    pub sat_drive: f32,
}

impl Default for ParameterSnapshot {
    fn default() -> Self {
        let mut defaults = [0.0; PARAM_COUNT];
        for (value, desc) in defaults.iter_mut().zip(PARAM_DESCRIPTORS.iter()) {
            *value = desc.default;
        }
        Self::from_host_values(&defaults)
    }
}

impl ParameterSnapshot {
    /// Build a snapshot from raw host values in index order.
    ///
    /// Each value is clamped to its descriptor range. Missing trailing
    /// values take their defaults.
    pub fn from_host_values(values: &[f32]) -> Self {
        let raw = |index: usize| {
            let desc = &PARAM_DESCRIPTORS[index];
            desc.clamp(values.get(index).copied().unwrap_or(desc.default))
        };

        Self {
            gain: raw(GAIN),
            pan: raw(PAN) / 100.0,
            lfo_strength: raw(LFO_STRENGTH) / 100.0,
            lfo_freq_hz: raw(LFO_FREQ),
            lfo_enabled: raw(LFO_ENABLED) >= 0.5,
            sat_mode: SaturationMode::from_index(raw(SAT_MODE) as usize),
            sat_enabled: raw(SAT_ENABLED) >= 0.5,
            sat_drive: raw(SAT_DRIVE) / 100.0,
        }
    }

    /// Raw host values in index order.
    pub fn to_host_values(&self) -> [f32; PARAM_COUNT] {
        let mut values = [0.0; PARAM_COUNT];
        for (index, value) in values.iter_mut().enumerate() {
            *value = self.get_param(index);
        }
        values
    }

    /// Drive multiplier applied before the curve, 1× at 0% up to 10× at 100%.
    #[inline]
    pub fn drive_multiplier(&self) -> f32 {
        MIN_DRIVE + self.sat_drive * DRIVE_RANGE
    }

    /// Crossfade target for the saturation stage.
    ///
    /// 1.0 only when the stage is enabled and a curve other than
    /// [`Off`](SaturationMode::Off) is selected.
    #[inline]
    pub fn sat_mix_target(&self) -> f32 {
        if self.sat_enabled && self.sat_mode != SaturationMode::Off {
            1.0
        } else {
            0.0
        }
    }
}

fn flag(on: bool) -> f32 {
    if on { 1.0 } else { 0.0 }
}

impl ParameterInfo for ParameterSnapshot {
    fn param_count(&self) -> usize {
        PARAM_COUNT
    }

    fn param_info(&self, index: usize) -> Option<ParamDescriptor> {
        PARAM_DESCRIPTORS.get(index).copied()
    }

    fn get_param(&self, index: usize) -> f32 {
        match index {
            GAIN => self.gain,
            LFO_STRENGTH => self.lfo_strength * 100.0,
            LFO_FREQ => self.lfo_freq_hz,
            LFO_ENABLED => flag(self.lfo_enabled),
            PAN => self.pan * 100.0,
            SAT_MODE => self.sat_mode.index() as f32,
            SAT_ENABLED => flag(self.sat_enabled),
            SAT_DRIVE => self.sat_drive * 100.0,
            _ => 0.0,
        }
    }

    fn set_param(&mut self, index: usize, value: f32) {
        let Some(desc) = PARAM_DESCRIPTORS.get(index) else {
            return;
        };
        let value = desc.clamp(value);
        match index {
            GAIN => self.gain = value,
            LFO_STRENGTH => self.lfo_strength = value / 100.0,
            LFO_FREQ => self.lfo_freq_hz = value,
            LFO_ENABLED => self.lfo_enabled = value >= 0.5,
            PAN => self.pan = value / 100.0,
            SAT_MODE => self.sat_mode = SaturationMode::from_index(value as usize),
            SAT_ENABLED => self.sat_enabled = value >= 0.5,
            SAT_DRIVE => self.sat_drive = value / 100.0,
            _ => {}
        }
    }
}
