//! Placa Reverb - Dattorro-style plate reverb
//!
//! A figure-eight plate reverb network built on the [`placa-core`](placa_core)
//! primitives:
//!
//! - [`ReverbEngine`] - the complete effect: trim, predelay, input diffusion,
//!   tank, output tap matrix, wet/dry mix
//! - [`ReverbTank`] - the cross-fed figure-eight recirculation loop
//! - [`OutputTapMatrix`] - the 14-line weighted tap network that derives the
//!   stereo output
//! - [`tuning`] - the reference delay tables and the sample-rate scale factor
//!
//! All delay lengths are tuned at a 29761 Hz reference rate and rescaled to
//! the active sample rate by an integer factor, so the room character stays
//! put when the host rate changes.
//!
//! ## Example
//!
//! ```rust
//! use placa_reverb::ReverbEngine;
//!
//! let mut engine = ReverbEngine::new(48000.0)?;
//! engine.set_decay(0.6);
//! engine.set_damping(0.3);
//! engine.set_wet_dry_pct(35.0);
//!
//! let mut output = [0.0f32; 2];
//! for frame in [[0.5f32, 0.5], [0.1, -0.2], [0.0, 0.0]] {
//!     engine.process_frame(&frame, &mut output);
//! }
//! # Ok::<(), placa_reverb::ConfigError>(())
//! ```
//!
//! ## Real-time contract
//!
//! [`ReverbEngine::configure`] is the only allocating operation; call it from
//! a setup context. [`ReverbEngine::process_frame`] and every setter are
//! allocation-free and safe on the audio thread.

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
extern crate alloc;

pub mod engine;
pub mod error;
pub mod tank;
pub mod taps;
pub mod tuning;

pub use engine::ReverbEngine;
pub use error::{ConfigError, MIN_SAMPLE_RATE};
pub use tank::{ReverbTank, TankTaps};
pub use taps::OutputTapMatrix;
