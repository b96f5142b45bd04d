//! One-pole lowpass stages for input filtering and tank damping.
//!
//! Two variants, both holding a single sample of state:
//!
//! - [`CutoffLowpass`] derives its coefficient from a cutoff frequency:
//!   `gain = exp(-2pi * cutoff / buffer_size)`, then
//!   `y[n] = x[n]*(1-gain) + y[n-1]*gain`. The divisor is the stage's
//!   configured buffer size rather than a separate sample-rate field; the
//!   engine configures it with the sample-rate-sized buffer value, so the
//!   cutoff lands where a sample-rate formula would put it.
//! - [`DampedLowpass`] takes the damping amount as the coefficient directly,
//!   with the weights tilted the other way:
//!   `y[n] = x[n]*damping + y[n-1]*(1-damping)`. Damping of 1 passes the
//!   input through; small damping values absorb high frequencies hard.
//!
//! Coefficients are cooked on configuration or parameter change, never in
//! the per-sample path.

use crate::flush_denormal;
use libm::expf;

/// One-pole lowpass with a cutoff-frequency-derived coefficient.
///
/// # Example
///
/// ```rust
/// use placa_core::CutoffLowpass;
///
/// let mut lp = CutoffLowpass::new(48000, 2000.0);
/// let filtered = lp.process(1.0);
/// assert!(filtered < 1.0);
/// ```
#[derive(Debug, Clone)]
pub struct CutoffLowpass {
    state: f32,
    gain: f32,
    cutoff: f32,
    buffer_size: usize,
}

impl CutoffLowpass {
    /// Creates the stage with a reference buffer size and cutoff in Hz.
    pub fn new(buffer_size: usize, cutoff_hz: f32) -> Self {
        let mut lp = Self {
            state: 0.0,
            gain: 0.0,
            cutoff: cutoff_hz,
            buffer_size,
        };
        lp.recalculate_gain();
        lp
    }

    /// Updates the reference buffer size and resets the state.
    pub fn configure(&mut self, buffer_size: usize) {
        self.buffer_size = buffer_size;
        self.recalculate_gain();
        self.reset();
    }

    /// Sets the cutoff frequency in Hz and recooks the coefficient.
    pub fn set_cutoff(&mut self, cutoff_hz: f32) {
        self.cutoff = cutoff_hz;
        self.recalculate_gain();
    }

    /// Currently configured cutoff in Hz.
    pub fn cutoff(&self) -> f32 {
        self.cutoff
    }

    /// Process one sample.
    #[inline]
    pub fn process(&mut self, input: f32) -> f32 {
        self.state = flush_denormal(input * (1.0 - self.gain) + self.state * self.gain);
        self.state
    }

    /// Zeroes the state register.
    pub fn reset(&mut self) {
        self.state = 0.0;
    }

    fn recalculate_gain(&mut self) {
        self.gain = expf(-core::f32::consts::TAU * self.cutoff / self.buffer_size as f32);
    }
}

/// One-pole lowpass whose coefficient is the damping amount itself.
///
/// Used inside the tank loop for high-frequency absorption. Stable for
/// damping in (0, 1]; the host-facing control floor is 0.0005.
#[derive(Debug, Clone)]
pub struct DampedLowpass {
    state: f32,
    damping: f32,
}

impl DampedLowpass {
    /// Creates the stage with the given damping amount.
    pub fn new(damping: f32) -> Self {
        Self {
            state: 0.0,
            damping,
        }
    }

    /// Sets the damping amount.
    ///
    /// 1.0 is transparent; values toward 0 darken the tail. The caller is
    /// responsible for keeping the value inside (0, 1].
    #[inline]
    pub fn set_damping(&mut self, damping: f32) {
        self.damping = damping;
    }

    /// Currently configured damping amount.
    pub fn damping(&self) -> f32 {
        self.damping
    }

    /// Process one sample.
    #[inline]
    pub fn process(&mut self, input: f32) -> f32 {
        self.state = flush_denormal(input * self.damping + self.state * (1.0 - self.damping));
        self.state
    }

    /// Zeroes the state register.
    pub fn reset(&mut self) {
        self.state = 0.0;
    }
}
