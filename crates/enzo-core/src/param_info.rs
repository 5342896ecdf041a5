//! Parameter metadata shared by the core and any host adapter.
//!
//! The engine only ever sees a [`ParameterSnapshot`](crate::ParameterSnapshot).
//! The types here describe the host-facing side of those values: ranges,
//! defaults, stable IDs, stepping and display units. A host adapter reads
//! them to register parameters and to clamp what the UI or automation sends.
//!
//! Nothing in this module allocates.

/// Curve used when a host maps a parameter onto its 0..1 control range.
///
/// `Linear` spreads the range evenly. `Power(k)` maps a normalized position
/// `n` to `min + n^k * (max - min)`, so `k > 1` spends more of the control's
/// travel on the low end. A JUCE skew factor `s` is `Power(1.0 / s)`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum ParamScale {
    /// Even resolution over the whole range.
    #[default]
    Linear,
    /// `n^k` curve; `k > 1` favours low values.
    Power(f32),
}

/// Numeric parameter ID used for automation lanes and saved state.
///
/// IDs are part of the saved-state format and must not be renumbered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ParamId(pub u32);

/// Bit set describing how a host may treat a parameter.
///
/// ```rust
/// use enzo_core::ParamFlags;
///
/// let toggle = ParamFlags::AUTOMATABLE.union(ParamFlags::STEPPED);
/// assert!(toggle.contains(ParamFlags::AUTOMATABLE));
/// assert!(!ParamFlags::AUTOMATABLE.contains(ParamFlags::STEPPED));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParamFlags(u8);

impl ParamFlags {
    /// Host may record and play back automation.
    pub const AUTOMATABLE: Self = Self(1);
    /// Only whole steps from `min` are meaningful (switches, choices).
    pub const STEPPED: Self = Self(1 << 1);

    /// `true` when every bit of `other` is present.
    #[inline]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Both sets combined.
    #[inline]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }
}

impl Default for ParamFlags {
    fn default() -> Self {
        Self::AUTOMATABLE
    }
}

/// Read and write parameters by position, in host units.
///
/// Host units are what a user sees on a knob (percent, Hz, -100..100 pan),
/// not the normalized values the DSP works with. Indices never change for a
/// given implementor.
pub trait ParameterInfo {
    /// How many parameters there are.
    fn param_count(&self) -> usize;

    /// Metadata for `index`, `None` past the end.
    fn param_info(&self, index: usize) -> Option<ParamDescriptor>;

    /// Value at `index`; `0.0` past the end.
    fn get_param(&self, index: usize) -> f32;

    /// Store `value` at `index`, clamped to its range. Ignored past the end.
    fn set_param(&mut self, index: usize, value: f32);

    /// Position of the parameter whose display name, short name or string ID
    /// matches `name`, ignoring ASCII case.
    fn find_param_by_name(&self, name: &str) -> Option<usize> {
        (0..self.param_count()).find(|&i| {
            self.param_info(i).is_some_and(|desc| {
                desc.name.eq_ignore_ascii_case(name)
                    || desc.short_name.eq_ignore_ascii_case(name)
                    || desc.string_id.eq_ignore_ascii_case(name)
            })
        })
    }

    /// Numeric ID of the parameter at `index`.
    fn param_id(&self, index: usize) -> Option<ParamId> {
        self.param_info(index).map(|desc| desc.id)
    }

    /// Position of the parameter carrying `id`. Linear scan; not for the audio path.
    fn param_index_by_id(&self, id: ParamId) -> Option<usize> {
        (0..self.param_count()).find(|&i| self.param_info(i).is_some_and(|desc| desc.id == id))
    }
}

/// Range, default and host metadata for one parameter.
///
/// Built with `const` constructors so a whole layout can live in a `static`.
///
/// ```rust
/// use enzo_core::{ParamDescriptor, ParamId, ParamUnit};
///
/// let rate = ParamDescriptor::custom("LFO Frequency", "Rate", 0.1, 20.0, 1.0)
///     .with_unit(ParamUnit::Hertz)
///     .with_id(ParamId(102), "lfo_freq");
/// assert_eq!(rate.clamp(50.0), 20.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamDescriptor {
    /// Display name.
    pub name: &'static str,
    /// Abbreviated name for narrow displays.
    pub short_name: &'static str,
    /// Display unit.
    pub unit: ParamUnit,
    /// Lowest host value.
    pub min: f32,
    /// Highest host value.
    pub max: f32,
    /// Host value on first load.
    pub default: f32,
    /// Quantization interval.
    pub step: f32,
    /// Numeric ID; `ParamId(0)` until assigned.
    pub id: ParamId,
    /// Text ID, e.g. `"sat_drive"`.
    pub string_id: &'static str,
    /// Mapping onto the host's 0..1 control range.
    pub scale: ParamScale,
    /// Host capabilities.
    pub flags: ParamFlags,
    /// Grouping key for host parameter trees (`"lfo"`, `"saturation"`).
    pub group: &'static str,
    /// One label per step, for switches and choices.
    pub step_labels: Option<&'static [&'static str]>,
}

impl ParamDescriptor {
    /// Continuous parameter with custom name and range, no unit, linear scale.
    pub const fn custom(
        name: &'static str,
        short_name: &'static str,
        min: f32,
        max: f32,
        default: f32,
    ) -> Self {
        Self {
            name,
            short_name,
            unit: ParamUnit::None,
            min,
            max,
            default,
            step: 0.01,
            id: ParamId(0),
            string_id: "",
            scale: ParamScale::Linear,
            flags: ParamFlags::AUTOMATABLE,
            group: "",
            step_labels: None,
        }
    }

    /// Two-state switch stored as 0.0 / 1.0.
    pub const fn toggle(name: &'static str, short_name: &'static str, default_on: bool) -> Self {
        Self::custom(name, short_name, 0.0, 1.0, if default_on { 1.0 } else { 0.0 })
            .with_step(1.0)
            .with_flags(ParamFlags::AUTOMATABLE.union(ParamFlags::STEPPED))
            .with_step_labels(&["Off", "On"])
    }

    /// Choice parameter over `labels`, stored as the index.
    pub const fn choice(
        name: &'static str,
        short_name: &'static str,
        labels: &'static [&'static str],
        default_index: usize,
    ) -> Self {
        Self::custom(
            name,
            short_name,
            0.0,
            (labels.len() - 1) as f32,
            default_index as f32,
        )
        .with_step(1.0)
        .with_flags(ParamFlags::AUTOMATABLE.union(ParamFlags::STEPPED))
        .with_step_labels(labels)
    }

    /// Assign numeric and text IDs.
    pub const fn with_id(mut self, id: ParamId, string_id: &'static str) -> Self {
        self.id = id;
        self.string_id = string_id;
        self
    }

    /// Display unit.
    pub const fn with_unit(mut self, unit: ParamUnit) -> Self {
        self.unit = unit;
        self
    }

    /// Quantization interval.
    pub const fn with_step(mut self, step: f32) -> Self {
        self.step = step;
        self
    }

    /// Control curve.
    pub const fn with_scale(mut self, scale: ParamScale) -> Self {
        self.scale = scale;
        self
    }

    /// Replace the flag set.
    pub const fn with_flags(mut self, flags: ParamFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Group key.
    pub const fn with_group(mut self, group: &'static str) -> Self {
        self.group = group;
        self
    }

    /// Labels for each step from `min`.
    pub const fn with_step_labels(mut self, labels: &'static [&'static str]) -> Self {
        self.step_labels = Some(labels);
        self
    }

    /// Clamp into `min..=max`. NaN becomes the default.
    #[inline]
    pub fn clamp(&self, value: f32) -> f32 {
        if value.is_nan() {
            self.default
        } else {
            value.clamp(self.min, self.max)
        }
    }

    /// Label for a stepped value, if this parameter has labels.
    pub fn label_for(&self, value: f32) -> Option<&'static str> {
        let labels = self.step_labels?;
        let index = ((self.clamp(value) - self.min) / self.step) as usize;
        labels.get(index).copied()
    }

    /// Host value to control position in \[0, 1\].
    #[inline]
    pub fn normalize(&self, value: f32) -> f32 {
        let span = self.max - self.min;
        if span == 0.0 {
            return 0.0;
        }
        let linear = ((value - self.min) / span).clamp(0.0, 1.0);
        match self.scale {
            ParamScale::Linear => linear,
            ParamScale::Power(k) => libm::powf(linear, 1.0 / k),
        }
    }

    /// Control position in \[0, 1\] to host value.
    #[inline]
    pub fn denormalize(&self, position: f32) -> f32 {
        let position = position.clamp(0.0, 1.0);
        let shaped = match self.scale {
            ParamScale::Linear => position,
            ParamScale::Power(k) => libm::powf(position, k),
        };
        self.min + shaped * (self.max - self.min)
    }
}

/// Unit type for parameter display and formatting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamUnit {
    /// Linear gain factor, presented to users as a percentage (1.0 = 100%).
    LinearGain,

    /// Hertz (Hz) - for LFO rate.
    Hertz,

    /// Percentage (%) - for strength, drive and pan position.
    Percent,

    /// No unit - for toggles and choices.
    None,
}

impl ParamUnit {
    /// Returns the unit suffix string for display.
    pub const fn suffix(&self) -> &'static str {
        match self {
            ParamUnit::LinearGain | ParamUnit::Percent => "%",
            ParamUnit::Hertz => " Hz",
            ParamUnit::None => "",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct TestEffect {
        level: f32,
        enabled: bool,
    }

    impl ParameterInfo for TestEffect {
        fn param_count(&self) -> usize {
            2
        }

        fn param_info(&self, index: usize) -> Option<ParamDescriptor> {
            match index {
                0 => Some(
                    ParamDescriptor::custom("Level", "Lvl", 0.0, 100.0, 50.0)
                        .with_unit(ParamUnit::Percent)
                        .with_id(ParamId(10), "test_level"),
                ),
                1 => Some(ParamDescriptor::toggle("Enabled", "On", false).with_id(ParamId(11), "test_on")),
                _ => None,
            }
        }

        fn get_param(&self, index: usize) -> f32 {
            match index {
                0 => self.level,
                1 => f32::from(u8::from(self.enabled)),
                _ => 0.0,
            }
        }

        fn set_param(&mut self, index: usize, value: f32) {
            if let Some(desc) = self.param_info(index) {
                match index {
                    0 => self.level = desc.clamp(value),
                    1 => self.enabled = desc.clamp(value) >= 0.5,
                    _ => {}
                }
            }
        }
    }

    #[test]
    fn test_lookup_by_name_and_id() {
        let effect = TestEffect { level: 50.0, enabled: false };
        assert_eq!(effect.find_param_by_name("level"), Some(0));
        assert_eq!(effect.find_param_by_name("ON"), Some(1));
        assert_eq!(effect.find_param_by_name("test_on"), Some(1));
        assert_eq!(effect.find_param_by_name("missing"), None);

        assert_eq!(effect.param_id(1), Some(ParamId(11)));
        assert_eq!(effect.param_index_by_id(ParamId(10)), Some(0));
        assert_eq!(effect.param_index_by_id(ParamId(99)), None);
    }

    #[test]
    fn test_set_param_clamps_and_ignores_out_of_range() {
        let mut effect = TestEffect { level: 50.0, enabled: false };
        effect.set_param(0, 250.0);
        assert_eq!(effect.get_param(0), 100.0);
        effect.set_param(1, 0.7);
        assert_eq!(effect.get_param(1), 1.0);
        effect.set_param(9, 1.0);
        assert_eq!(effect.get_param(9), 0.0);
    }

    #[test]
    fn test_clamp_handles_nan() {
        let desc = ParamDescriptor::custom("Gain", "Gain", 0.0, 1.5, 1.0);
        assert_eq!(desc.clamp(f32::NAN), 1.0);
        assert_eq!(desc.clamp(-1.0), 0.0);
        assert_eq!(desc.clamp(2.0), 1.5);
    }

    #[test]
    fn test_choice_descriptor() {
        let desc = ParamDescriptor::choice("Mode", "Mode", &["A", "B", "C"], 1);
        assert_eq!(desc.min, 0.0);
        assert_eq!(desc.max, 2.0);
        assert_eq!(desc.default, 1.0);
        assert!(desc.flags.contains(ParamFlags::STEPPED));
        assert_eq!(desc.label_for(2.0), Some("C"));
        assert_eq!(desc.label_for(7.0), Some("C"));
    }

    #[test]
    fn test_normalize_linear() {
        let desc = ParamDescriptor::custom("Pan", "Pan", -100.0, 100.0, 0.0);
        assert_eq!(desc.normalize(-100.0), 0.0);
        assert_eq!(desc.normalize(0.0), 0.5);
        assert_eq!(desc.denormalize(1.0), 100.0);
    }

    #[test]
    fn test_normalize_power_skew() {
        // A 0.4 skew puts the 0.1..20 Hz midpoint well below the linear midpoint.
        let desc = ParamDescriptor::custom("Rate", "Rate", 0.1, 20.0, 1.0)
            .with_scale(ParamScale::Power(2.5));
        let mid = desc.denormalize(0.5);
        assert!(mid < 5.0, "expected low-end resolution, got {mid}");
        assert!((desc.denormalize(desc.normalize(3.0)) - 3.0).abs() < 1e-3);
        assert!(desc.normalize(0.1).abs() < 1e-6);
        assert!((desc.normalize(20.0) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_param_unit_suffix() {
        assert_eq!(ParamUnit::LinearGain.suffix(), "%");
        assert_eq!(ParamUnit::Hertz.suffix(), " Hz");
        assert_eq!(ParamUnit::None.suffix(), "");
    }
}
