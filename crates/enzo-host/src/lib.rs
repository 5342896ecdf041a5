//! Host adapter for the Enzo effect.
//!
//! Connects [`enzo_core::EffectEngine`] to a plugin host:
//!
//! - [`SharedParams`] - lock-free parameter store shared by UI and audio threads
//! - [`EnzoProcessor`] - reads one snapshot per block and drives the engine
//! - [`state`] - JSON state save/restore keyed by stable parameter ID
//! - [`StateError`] - failures while restoring state
//!
//! # Threading
//!
//! ```text
//! UI / automation ──set_value──► SharedParams ◄──snapshot── EnzoProcessor (audio)
//! ```
//!
//! The audio thread performs one atomic load per parameter per block and
//! never allocates, locks or logs.

pub mod error;
pub mod processor;
pub mod shared;
pub mod state;

pub use error::StateError;
pub use processor::EnzoProcessor;
pub use shared::SharedParams;
pub use state::LoadMode;
