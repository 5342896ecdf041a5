//! Enzo Core - real-time DSP for a stereo gain / pan / saturation effect
//!
//! This crate is the processing core of the Enzo effect: an LFO-modulated
//! gain stage, an equal-power stereo panner, and a four-curve saturation
//! stage with automatic level compensation. It runs on the audio thread with
//! zero allocation, locking or logging in the processing path.
//!
//! # Core Abstractions
//!
//! ## Engine
//!
//! - [`EffectEngine`] - Owns all DSP state and processes blocks in place
//! - [`AudioProcessor`] - Setup / process / state interface a host drives
//! - [`ParameterSnapshot`] - One block's worth of normalized control values
//!
//! ## Building Blocks
//!
//! - [`SmoothedParam`] - One-pole ramp for zipper-free control changes
//! - [`EnvelopeFollower`] - Fast-attack / slow-release peak tracker
//! - [`SaturationMode`] and [`saturation::apply`] - Tape, Tube, Digital, Fold curves
//! - [`AutoGainCompensator`] - Envelope-driven loudness correction
//! - [`LfoOscillator`] - Sine phase accumulator for gain modulation
//! - [`StereoPanner`] - Equal-power pan law
//!
//! ## Parameter Metadata
//!
//! - [`ParamDescriptor`], [`ParamId`], [`ParamFlags`], [`ParamScale`], [`ParamUnit`]
//! - [`ParameterInfo`] - Index-based access in host units
//! - [`PARAM_DESCRIPTORS`] - The eight host parameters with stable IDs
//!
//! # no_std Support
//!
//! This crate is `no_std` compatible. Disable the default `std` feature:
//!
//! ```toml
//! [dependencies]
//! enzo-core = { version = "0.1", default-features = false }
//! ```
//!
//! Enable the `tracing` feature to get setup-time diagnostics from
//! [`AudioProcessor::configure`] and [`AudioProcessor::load_state`].
//!
//! # Example
//!
//! ```rust
//! use enzo_core::{AudioProcessor, EffectEngine, ParameterSnapshot, SaturationMode};
//!
//! let mut engine = EffectEngine::new();
//! engine.configure(48000.0, 128);
//!
//! let snapshot = ParameterSnapshot {
//!     sat_enabled: true,
//!     sat_mode: SaturationMode::Tape,
//!     sat_drive: 0.5,
//!     ..Default::default()
//! };
//!
//! let mut left = [0.3f32; 128];
//! let mut right = [0.3f32; 128];
//! engine.process_block(&mut [&mut left[..], &mut right[..]], snapshot);
//! assert!(left.iter().all(|s| s.is_finite()));
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

pub mod auto_gain;
pub mod engine;
pub mod envelope;
pub mod lfo;
pub mod math;
pub mod pan;
pub mod param;
pub mod param_info;
pub mod processor;
pub mod saturation;
pub mod snapshot;

pub use auto_gain::AutoGainCompensator;
pub use engine::{EffectEngine, EngineTiming};
pub use envelope::EnvelopeFollower;
pub use lfo::LfoOscillator;
pub use math::{flush_denormal, wet_dry_mix};
pub use pan::StereoPanner;
pub use param::SmoothedParam;
pub use param_info::{ParamDescriptor, ParamFlags, ParamId, ParamScale, ParamUnit, ParameterInfo};
pub use processor::AudioProcessor;
pub use saturation::SaturationMode;
pub use snapshot::{PARAM_COUNT, PARAM_DESCRIPTORS, ParameterSnapshot};
