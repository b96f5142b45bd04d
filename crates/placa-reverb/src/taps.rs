//! Weighted output tap matrix.
//!
//! Fourteen delay lines re-read the six tank node signals at staggered
//! offsets and sum them with fixed signs into the left and right reverb
//! outputs. The groupings, lengths, and signs decorrelate the two outputs
//! from each other and from the tank's loop period; they are design
//! constants and are reproduced digit for digit.
//!
//! Wiring (reference lengths at 29761 Hz):
//!
//! ```text
//! a1 -> d1=353   d2=3627  d3=1990
//! a2 -> d4=1228  d5=187
//! a3 -> d6=2673  d7=1066
//! a4 -> d8=121   d9=1996  d10=335
//! a5 -> d11=1913 d12=2111
//! a6 -> d13=2974 d14=266
//!
//! left  = d1 + d2 - d8 - d4 - d10 + d6 - d12
//! right = d14 + d13 - d7 - d11 - d5 + d9 - d3
//! ```

use crate::tank::TankTaps;
use crate::tuning::{OUTPUT_TAP_DELAYS, scale_factor};
use placa_core::DelayLine;

/// Which tank tap feeds each of the 14 delay lines, as indices into
/// `[a1..a6]`.
const TAP_SOURCES: [usize; 14] = [0, 0, 0, 1, 1, 2, 2, 3, 3, 3, 4, 4, 5, 5];

/// The 14-line tap matrix deriving the stereo reverb pair from tank nodes.
#[derive(Debug, Clone)]
pub struct OutputTapMatrix {
    lines: [DelayLine; 14],
}

impl OutputTapMatrix {
    /// Creates the matrix with every line at the given capacity.
    pub fn new(capacity: usize) -> Self {
        Self {
            lines: core::array::from_fn(|_| DelayLine::new(capacity)),
        }
    }

    /// Resizes every line to one second at `sample_rate` and applies the
    /// rescaled reference lengths.
    pub fn configure(&mut self, sample_rate: f32) {
        let capacity = sample_rate as usize;
        let scale = scale_factor(sample_rate);
        for (line, reference) in self.lines.iter_mut().zip(OUTPUT_TAP_DELAYS) {
            line.configure(capacity);
            line.set_delay(reference * scale);
        }
    }

    /// Zero-fills every line without reallocating.
    pub fn reset(&mut self) {
        for line in &mut self.lines {
            line.reset();
        }
    }

    /// Advances all 14 lines one tick and returns `(left, right)`.
    #[inline]
    pub fn process(&mut self, taps: &TankTaps) -> (f32, f32) {
        let sources = [taps.a1, taps.a2, taps.a3, taps.a4, taps.a5, taps.a6];
        let mut d = [0.0f32; 14];
        for i in 0..14 {
            d[i] = self.lines[i].process(sources[TAP_SOURCES[i]]);
        }

        let left = d[0] + d[1] - d[7] - d[3] - d[9] + d[5] - d[11];
        let right = d[13] + d[12] - d[6] - d[10] - d[4] + d[8] - d[2];
        (left, right)
    }
}
