//! Memoryless waveshaping curves for the saturation stage.
//!
//! Each curve produces a different harmonic character:
//!
//! | Mode | Transfer | Harmonics | Output bound |
//! |------|----------|-----------|--------------|
//! | [`Off`](SaturationMode::Off) | identity | none | unbounded |
//! | [`Tape`](SaturationMode::Tape) | `tanh(x)` | odd | (-1, 1) |
//! | [`Tube`](SaturationMode::Tube) | asymmetric exponential | even + odd | (-1.25, 1) |
//! | [`Digital`](SaturationMode::Digital) | hard clip | odd (many) | \[-1, 1\] |
//! | [`Fold`](SaturationMode::Fold) | triangle wavefolder | dense | \[-1, 1\] |

use libm::{expf, fmodf, tanhf};

/// Saturation curve selection.
///
/// The discriminants match the host's choice-parameter indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum SaturationMode {
    /// Bypass (identity).
    #[default]
    Off = 0,
    /// Smooth symmetric soft clip.
    Tape = 1,
    /// Asymmetric exponential curve, adds even harmonics.
    Tube = 2,
    /// Hard clip at ±1.
    Digital = 3,
    /// Triangle wavefolder, always bounded to ±1.
    Fold = 4,
}

impl SaturationMode {
    /// All modes in host index order.
    pub const ALL: [SaturationMode; 5] = [
        SaturationMode::Off,
        SaturationMode::Tape,
        SaturationMode::Tube,
        SaturationMode::Digital,
        SaturationMode::Fold,
    ];

    /// Display labels in host index order.
    pub const LABELS: [&'static str; 5] = ["Off", "Tape", "Tube", "Digital", "Fold"];

    /// Get mode from a choice index. Undefined indices fall back to [`Off`](Self::Off).
    pub fn from_index(index: usize) -> Self {
        match index {
            1 => SaturationMode::Tape,
            2 => SaturationMode::Tube,
            3 => SaturationMode::Digital,
            4 => SaturationMode::Fold,
            _ => SaturationMode::Off,
        }
    }

    /// Choice index for this mode.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Display label for this mode.
    pub fn label(self) -> &'static str {
        Self::LABELS[self.index()]
    }

    /// Apply this mode's transfer curve to one sample.
    #[inline]
    pub fn apply(self, x: f32) -> f32 {
        apply(x, self)
    }
}

/// Apply the selected transfer curve to one sample.
///
/// Stateless and allocation-free; safe to call per sample on the audio thread.
///
/// # Example
///
/// ```rust
/// use enzo_core::saturation::{apply, SaturationMode};
///
/// assert_eq!(apply(0.3, SaturationMode::Off), 0.3);
/// assert_eq!(apply(4.0, SaturationMode::Digital), 1.0);
/// assert!(apply(7.5, SaturationMode::Fold).abs() <= 1.0);
/// ```
#[inline]
pub fn apply(x: f32, mode: SaturationMode) -> f32 {
    match mode {
        SaturationMode::Off => x,
        SaturationMode::Tape => tape(x),
        SaturationMode::Tube => tube(x),
        SaturationMode::Digital => digital(x),
        SaturationMode::Fold => fold(x),
    }
}

/// Symmetric soft clip, `tanh(x)`.
#[inline]
pub fn tape(x: f32) -> f32 {
    tanhf(x)
}

/// Asymmetric exponential saturation.
///
/// The positive half approaches 1 as `1 - e^-x`; the negative half uses a
/// gentler 0.8 slope and approaches -1.25.
#[inline]
pub fn tube(x: f32) -> f32 {
    if x >= 0.0 {
        1.0 - expf(-x)
    } else {
        -(1.0 - expf(x * 0.8)) / 0.8
    }
}

/// Hard clip to \[-1, 1\].
#[inline]
pub fn digital(x: f32) -> f32 {
    x.clamp(-1.0, 1.0)
}

/// Triangle wavefolder.
///
/// Maps `x` onto a triangle wave of period 4 that passes through the identity
/// on \[-1, 1\]. Excursions reflect back instead of clipping, so the output
/// stays in \[-1, 1\] for any finite input.
#[inline]
pub fn fold(x: f32) -> f32 {
    let mut phase = fmodf(x + 1.0, 4.0);
    if phase < 0.0 {
        phase += 4.0;
    }
    if phase < 2.0 { phase - 1.0 } else { 3.0 - phase }
}
