//! Small DSP helpers shared by the engine stages.

/// Flush subnormal (denormalized) floats to zero.
///
/// Subnormal floats cause severe CPU slowdowns on most architectures. Values
/// below 1e-20 are replaced with zero, well before the IEEE 754 subnormal
/// range begins. Use on state that decays toward zero indefinitely, such as
/// an envelope releasing into silence.
#[allow(clippy::inline_always)]
#[inline(always)]
pub fn flush_denormal(x: f32) -> f32 {
    if x.abs() < 1e-20 { 0.0 } else { x }
}

/// Crossfade between dry and wet signals.
///
/// Equivalent to `dry * (1 - mix) + wet * mix` with one fewer multiply.
///
/// # Arguments
///
/// * `dry` - Unprocessed signal
/// * `wet` - Processed signal
/// * `mix` - Blend factor in \[0.0, 1.0\]: 0.0 = all dry, 1.0 = all wet
#[inline]
pub fn wet_dry_mix(dry: f32, wet: f32, mix: f32) -> f32 {
    dry + (wet - dry) * mix
}
