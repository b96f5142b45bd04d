//! Allpass diffusers for transient smearing.
//!
//! A Schroeder allpass passes all frequencies at equal magnitude while
//! scrambling phase, smearing a transient into a dense cluster of echoes
//! without coloring it. The plate network uses two flavors:
//!
//! - [`Diffuser`] - the plain stage used in the input chain and the tank's
//!   decay path:
//!
//!   ```text
//!   d_out = delay.read()
//!   d_in  = x - g * d_out
//!   y     = g * d_in + d_out
//!   delay.write(d_in)
//!   ```
//!
//! - [`ModulatedDiffuser`] - the tank's entry stage. Coefficient polarity is
//!   reversed (`d_in = x + g * d_out`, `y = -g * d_in + d_out`) and the read
//!   position is the write cursor plus a fixed excursion offset cooked once
//!   from the sample rate, rather than trailing the cursor by the nominal
//!   length.
//!
//! Both expose the sample committed to the delay this tick via `tap()`; the
//! output matrix reads tank energy there before the long delays resolve it.

use crate::DelayLine;
use crate::flush_denormal;
use libm::{ceilf, roundf, sinf};

/// Sample rate the reference excursion magnitude was tuned at.
const EXCURSION_REFERENCE_RATE: f32 = 29761.0;

/// Schroeder allpass diffuser.
///
/// Stable for coefficients with magnitude below 1; the shared diffusion
/// control stays in `[0, 1)`.
///
/// # Example
///
/// ```rust
/// use placa_core::Diffuser;
///
/// let mut diffuser = Diffuser::new(4096);
/// diffuser.set_delay(142);
/// diffuser.set_gain(0.5);
///
/// let y = diffuser.process(1.0);
/// assert!(y.is_finite());
/// ```
#[derive(Debug, Clone)]
pub struct Diffuser {
    delay: DelayLine,
    gain: f32,
}

impl Diffuser {
    /// Creates a diffuser with the given delay capacity in samples.
    pub fn new(capacity: usize) -> Self {
        Self {
            delay: DelayLine::new(capacity),
            gain: 0.5,
        }
    }

    /// Reallocates the delay storage and resets state.
    pub fn configure(&mut self, capacity: usize) {
        self.delay.configure(capacity);
    }

    /// Sets the delay length in samples.
    pub fn set_delay(&mut self, samples: usize) {
        self.delay.set_delay(samples);
    }

    /// Sets the allpass coefficient.
    #[inline]
    pub fn set_gain(&mut self, gain: f32) {
        self.gain = gain;
    }

    /// Current allpass coefficient.
    pub fn gain(&self) -> f32 {
        self.gain
    }

    /// Process one sample.
    #[inline]
    pub fn process(&mut self, input: f32) -> f32 {
        let d_out = self.delay.read();
        let d_in = flush_denormal(input - d_out * self.gain);
        let output = d_in * self.gain + d_out;
        self.delay.write(d_in);
        output
    }

    /// The sample committed to the internal delay this tick.
    #[inline]
    pub fn tap(&self) -> f32 {
        self.delay.tap()
    }

    /// Clears the internal delay.
    pub fn reset(&mut self) {
        self.delay.reset();
    }
}

/// Reversed-polarity allpass with a static excursion read position.
///
/// The excursion term is framed as an LFO in the plate design but evaluates
/// its sine at a fixed phase, so it cooks down to a constant per sample rate:
///
/// ```text
/// excursion = ceil(2 * round(8 * rate / 29761) * (sin(2pi / rate) + 1))
/// ```
///
/// The nominal delay length is still configured on the line; the modulated
/// read path uses the excursion offset, not the nominal length.
#[derive(Debug, Clone)]
pub struct ModulatedDiffuser {
    delay: DelayLine,
    gain: f32,
    excursion: usize,
}

impl ModulatedDiffuser {
    /// Creates a modulated diffuser with the given delay capacity in samples.
    pub fn new(capacity: usize) -> Self {
        Self {
            delay: DelayLine::new(capacity),
            gain: 0.5,
            excursion: 0,
        }
    }

    /// Reallocates the delay storage and resets state.
    pub fn configure(&mut self, capacity: usize) {
        self.delay.configure(capacity);
    }

    /// Sets the nominal delay length in samples.
    pub fn set_delay(&mut self, samples: usize) {
        self.delay.set_delay(samples);
    }

    /// Cooks the excursion offset for the given sample rate.
    pub fn set_excursion(&mut self, sample_rate: f32) {
        let magnitude = 2.0 * roundf(8.0 * sample_rate / EXCURSION_REFERENCE_RATE);
        let phase = sinf(core::f32::consts::TAU / sample_rate) + 1.0;
        self.excursion = ceilf(magnitude * phase) as usize;
    }

    /// The cooked excursion offset in samples.
    pub fn excursion(&self) -> usize {
        self.excursion
    }

    /// Sets the allpass coefficient.
    #[inline]
    pub fn set_gain(&mut self, gain: f32) {
        self.gain = gain;
    }

    /// Process one sample.
    #[inline]
    pub fn process(&mut self, input: f32) -> f32 {
        let d_out = self.delay.read_offset(self.excursion);
        let d_in = flush_denormal(input + d_out * self.gain);
        let output = d_in * -self.gain + d_out;
        self.delay.write(d_in);
        output
    }

    /// The sample committed to the internal delay this tick.
    #[inline]
    pub fn tap(&self) -> f32 {
        self.delay.tap()
    }

    /// Clears the internal delay.
    pub fn reset(&mut self) {
        self.delay.reset();
    }
}
