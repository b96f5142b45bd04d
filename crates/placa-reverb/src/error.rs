//! Error types for engine configuration.

use thiserror::Error;

/// Lowest sample rate the network supports, in Hz.
///
/// Below this the integer rescale factor rounds to zero and every delay
/// collapses to zero length.
pub const MIN_SAMPLE_RATE: f32 = 14881.0;

/// Errors that can occur while configuring the reverb engine.
///
/// Per-tick processing is total and never fails; configuration is the only
/// fallible operation. Out-of-memory is not represented here because the
/// global allocator aborts rather than returning it.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// Sample rate was non-finite or not positive.
    #[error("sample rate must be positive and finite, got {0}")]
    InvalidSampleRate(f32),

    /// Sample rate was below the minimum the delay tables support.
    #[error("sample rate {0} Hz is below the minimum supported rate of {MIN_SAMPLE_RATE} Hz")]
    SampleRateTooLow(f32),
}
