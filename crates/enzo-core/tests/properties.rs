//! Property-based tests for enzo-core DSP stages.
//!
//! Tests pan law, curve bounds, compensation clamping, ramp convergence and
//! engine robustness using proptest for randomized input generation.

use enzo_core::auto_gain::{MAX_COMPENSATION, MIN_COMPENSATION, compensation};
use enzo_core::saturation::apply;
use enzo_core::{
    AudioProcessor, AutoGainCompensator, EffectEngine, LfoOscillator, ParameterSnapshot,
    SaturationMode, SmoothedParam, StereoPanner,
};
use proptest::prelude::*;

fn mode_strategy() -> impl Strategy<Value = SaturationMode> {
    (0usize..5).prop_map(SaturationMode::from_index)
}

prop_compose! {
    fn snapshot_strategy()(
        gain in 0.0f32..=1.5,
        pan in -1.0f32..=1.0,
        lfo_strength in 0.0f32..=1.0,
        lfo_freq_hz in 0.1f32..=20.0,
        lfo_enabled in any::<bool>(),
        sat_mode in mode_strategy(),
        sat_enabled in any::<bool>(),
        sat_drive in 0.0f32..=1.0,
    ) -> ParameterSnapshot {
        ParameterSnapshot {
            gain, pan, lfo_strength, lfo_freq_hz, lfo_enabled, sat_mode, sat_enabled, sat_drive,
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// Left and right gains satisfy l² + r² = 1 for every pan position.
    #[test]
    fn pan_is_equal_power(pan in -1.0f32..=1.0f32) {
        let (l, r) = StereoPanner::gains(pan);
        prop_assert!((l * l + r * r - 1.0).abs() < 1e-5, "pan {} gave ({}, {})", pan, l, r);
        prop_assert!(l >= -1e-6 && r >= -1e-6);
    }

    /// The wavefolder never leaves [-1, 1], however hard it is driven.
    #[test]
    fn fold_is_bounded(x in -1.0e4f32..1.0e4f32) {
        let y = apply(x, SaturationMode::Fold);
        prop_assert!((-1.0..=1.0).contains(&y), "fold({}) = {}", x, y);
    }

    /// Digital mode is exactly a hard clip; Off is exactly the identity.
    #[test]
    fn digital_and_off_identities(x in -100.0f32..100.0f32) {
        prop_assert_eq!(apply(x, SaturationMode::Digital), x.clamp(-1.0, 1.0));
        prop_assert_eq!(apply(x, SaturationMode::Off), x);
    }

    /// Tape and Tube stay inside their asymptotes.
    #[test]
    fn soft_curves_are_bounded(x in -1.0e3f32..1.0e3f32) {
        let tape = apply(x, SaturationMode::Tape);
        let tube = apply(x, SaturationMode::Tube);
        prop_assert!((-1.0..=1.0).contains(&tape));
        prop_assert!((-1.25..=1.0).contains(&tube), "tube({}) = {}", x, tube);
    }

    /// The compensation factor is always within [0.1, 4.0].
    #[test]
    fn compensation_is_clamped(
        envelope in 0.0f32..10.0f32,
        drive in 1.0f32..=10.0f32,
        mode in mode_strategy(),
    ) {
        let comp = compensation(envelope, drive, mode);
        prop_assert!((MIN_COMPENSATION..=MAX_COMPENSATION).contains(&comp));
    }

    /// Tracking any input sequence keeps the factor within [0.1, 4.0].
    #[test]
    fn tracked_compensation_is_clamped(
        input in prop::array::uniform32(-1.0f32..=1.0f32),
        drive in 1.0f32..=10.0f32,
        mode in mode_strategy(),
    ) {
        let mut agc = AutoGainCompensator::new(48000.0);
        for _ in 0..16 {
            for &sample in &input {
                let comp = agc.track(sample.abs(), drive, mode);
                prop_assert!((MIN_COMPENSATION..=MAX_COMPENSATION).contains(&comp));
                prop_assert!(agc.shape(sample, drive, mode, comp).is_finite());
            }
        }
    }

    /// A ramp reaches its target after twelve time constants.
    #[test]
    fn smoothing_converges(
        initial in 0.0f32..=1.5f32,
        target in 0.0f32..=1.5f32,
        ramp_ms in 1.0f32..50.0f32,
    ) {
        let sr = 48000.0;
        let ramp_seconds = ramp_ms / 1000.0;
        let mut param = SmoothedParam::with_config(initial, sr, ramp_seconds);
        param.set_target(target);

        let steps = (sr * ramp_seconds * 12.0) as usize;
        for _ in 0..steps {
            param.advance();
        }
        prop_assert!((param.get() - target).abs() < 1e-3, "{} -> {}: {}", initial, target, param.get());
    }

    /// No single step overshoots the distance to the current target.
    #[test]
    fn smoothing_never_jumps(
        targets in prop::collection::vec(0.0f32..=1.5f32, 1..64),
    ) {
        let mut param = SmoothedParam::with_config(1.0, 44100.0, 0.02);
        for target in targets {
            param.set_target(target);
            let before = param.get();
            let after = param.advance();
            prop_assert!((after - before).abs() <= (target - before).abs() + 1e-6);
        }
    }

    /// The LFO phase stays in [0, 1) for any rate in range.
    #[test]
    fn lfo_phase_in_unit_interval(
        freq in 0.1f32..=20.0f32,
        sr in 8000.0f32..=192000.0f32,
        steps in 1usize..4000,
    ) {
        let mut lfo = LfoOscillator::new();
        for _ in 0..steps {
            lfo.advance(freq, sr);
            prop_assert!((0.0..1.0).contains(&lfo.phase()));
        }
        let value = lfo.value();
        prop_assert!((-1.0..=1.0).contains(&value));
    }

    /// Silence in, silence out, for every parameter combination.
    #[test]
    fn silence_stays_silent(snapshot in snapshot_strategy()) {
        let mut engine = EffectEngine::new();
        engine.load_state(snapshot);
        engine.configure(48000.0, 256);

        let mut left = [0.0f32; 256];
        let mut right = [0.0f32; 256];
        engine.process_block(&mut [&mut left[..], &mut right[..]], snapshot);

        for (&l, &r) in left.iter().zip(right.iter()) {
            prop_assert!(l.is_finite() && r.is_finite());
            prop_assert!(l.abs() < 1e-9 && r.abs() < 1e-9);
        }
        prop_assert_eq!(engine.last_compensation(), 1.0);
    }

    /// Bounded input never produces non-finite output or an unclamped factor.
    #[test]
    fn engine_output_is_finite(
        snapshot in snapshot_strategy(),
        input in prop::array::uniform32(-1.0f32..=1.0f32),
        mono in any::<bool>(),
    ) {
        let mut engine = EffectEngine::new();
        engine.configure(44100.0, 32);

        for _ in 0..8 {
            let mut left = input;
            let mut right = input;
            if mono {
                engine.process_block(&mut [&mut left[..]], snapshot);
            } else {
                engine.process_block(&mut [&mut left[..], &mut right[..]], snapshot);
            }
            prop_assert!(left.iter().chain(right.iter()).all(|s| s.is_finite()));
            let comp = engine.last_compensation();
            prop_assert!((MIN_COMPENSATION..=MAX_COMPENSATION).contains(&comp));
        }
    }

    /// Raw host values always land inside the normalized ranges.
    #[test]
    fn host_values_are_normalized(raw in prop::array::uniform8(-1.0e3f32..1.0e3f32)) {
        let snap = ParameterSnapshot::from_host_values(&raw);
        prop_assert!((0.0..=1.5).contains(&snap.gain));
        prop_assert!((-1.0..=1.0).contains(&snap.pan));
        prop_assert!((0.0..=1.0).contains(&snap.lfo_strength));
        prop_assert!((0.1..=20.0).contains(&snap.lfo_freq_hz));
        prop_assert!((0.0..=1.0).contains(&snap.sat_drive));
        prop_assert!((1.0..=10.0).contains(&snap.drive_multiplier()));
    }
}
