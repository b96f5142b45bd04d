//! Reference delay tables for the plate network.
//!
//! Every delay length in the network was tuned at 29761 Hz, the rate the
//! plate design was published at. At configuration time each reference length is
//! multiplied by an integer scale factor derived from the active sample rate,
//! keeping the tap relationships aligned on whole samples.

/// Sample rate the reference delay lengths were tuned at, in Hz.
pub const REFERENCE_RATE: f32 = 29761.0;

/// Input diffusion chain delay lengths, in reference samples.
pub const INPUT_DIFFUSER_DELAYS: [usize; 4] = [142, 107, 379, 277];

/// Tank output-diffuser delay lengths (left, right), in reference samples.
pub const TANK_DIFFUSER_DELAYS: [usize; 2] = [1800, 2656];

/// Tank modulated-diffuser delay lengths (left, right), in reference samples.
pub const MODULATED_DIFFUSER_DELAYS: [usize; 2] = [672, 908];

/// Tank delay lengths: left chain pre/post-diffuser, then right chain.
pub const TANK_DELAYS: [usize; 4] = [4453, 3720, 3163, 4217];

/// Default predelay, in reference samples.
pub const DEFAULT_PREDELAY: usize = 300;

/// Output tap matrix delay lengths d1..d14, in reference samples.
pub const OUTPUT_TAP_DELAYS: [usize; 14] = [
    353, 3627, 1990, 1228, 187, 2673, 1066, 121, 1996, 335, 1913, 2111, 2974, 266,
];

/// Integer multiplier taking reference lengths to the given sample rate.
///
/// `round(sample_rate / 29761)`: 1 at 44.1 kHz, 2 at 48 kHz, 3 at 96 kHz.
/// Rates below ~14.9 kHz would round to 0 and collapse the network; the
/// engine rejects those before calling this.
#[inline]
pub fn scale_factor(sample_rate: f32) -> usize {
    libm::roundf(sample_rate / REFERENCE_RATE) as usize
}
