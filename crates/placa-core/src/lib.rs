//! Placa Core - DSP primitives for the placa plate reverb
//!
//! The leaf components of a Dattorro-style plate reverb network, designed for
//! real-time processing with zero allocation in the audio path.
//!
//! # Components
//!
//! ## Delay
//!
//! - [`DelayLine`] - integer-sample circular delay with read-before-write
//!   access and a tap of the sample committed this tick
//!
//! ## Diffusion
//!
//! - [`Diffuser`] - Schroeder allpass stage for transient smearing
//! - [`ModulatedDiffuser`] - reversed-polarity allpass whose read position
//!   carries a fixed excursion offset
//!
//! ## Filtering & Smoothing
//!
//! - [`CutoffLowpass`] - one-pole lowpass with a cutoff-derived coefficient
//! - [`DampedLowpass`] - one-pole lowpass driven directly by a damping amount
//! - [`Dezipper`] - one-pole control smoother for click-free gain changes
//!
//! ## Utilities
//!
//! - [`db_to_linear`], [`mono_sum`], [`flush_denormal`]
//!
//! # no_std Support
//!
//! This crate is `no_std` compatible. Disable the default `std` feature:
//!
//! ```toml
//! [dependencies]
//! placa-core = { version = "0.1", default-features = false }
//! ```
//!
//! # Design Principles
//!
//! - **Real-time safe**: buffers allocate on construction/configuration only
//! - **No dependencies on std**: pure `no_std` with `libm` for math
//! - **Cooked coefficients**: transcendental math runs at configuration or
//!   parameter-change time, never per sample

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
extern crate alloc;

pub mod delay;
pub mod dezipper;
pub mod diffuser;
pub mod lowpass;
pub mod math;

// Re-export main types at crate root
pub use delay::DelayLine;
pub use dezipper::Dezipper;
pub use diffuser::{Diffuser, ModulatedDiffuser};
pub use lowpass::{CutoffLowpass, DampedLowpass};
pub use math::{db_to_linear, flush_denormal, linear_to_db, mono_sum};
