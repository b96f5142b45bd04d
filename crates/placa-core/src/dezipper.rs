//! Control-rate smoother for zipper-free gain changes.
//!
//! Host gain controls arrive as step changes; applied raw they produce
//! audible "zipper" discontinuities. The dezipper is a one-pole lowpass over
//! the control value with fixed coefficients:
//!
//! ```text
//! smoothed[n] = 0.001 * target + 0.999 * smoothed[n-1]
//! ```
//!
//! so the distance to the target shrinks by exactly 0.999 per sample.
//! At 48 kHz the step settles to within 1% in about 96 ms.

/// Feedforward weight applied to the incoming target.
const DZ_FF: f32 = 0.001;
/// Feedback weight applied to the previous smoothed value.
const DZ_FB: f32 = 0.999;

/// One-pole smoother with fixed 0.001/0.999 coefficients.
///
/// # Example
///
/// ```rust
/// use placa_core::Dezipper;
///
/// let mut dz = Dezipper::new();
/// let first = dz.smooth(1.0);
/// assert!((first - 0.001).abs() < 1e-7);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Dezipper {
    state: f32,
}

impl Dezipper {
    /// Creates a dezipper with its state at zero.
    pub fn new() -> Self {
        Self { state: 0.0 }
    }

    /// Advances one sample toward `target` and returns the smoothed value.
    #[inline]
    pub fn smooth(&mut self, target: f32) -> f32 {
        self.state = DZ_FF * target + DZ_FB * self.state;
        self.state
    }

    /// Current smoothed value without advancing.
    #[inline]
    pub fn value(&self) -> f32 {
        self.state
    }

    /// Returns the state to zero.
    pub fn reset(&mut self) {
        self.state = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn follows_closed_form_decay() {
        // |smoothed[n] - target| = |initial - target| * 0.999^n
        let mut dz = Dezipper::new();
        let target = 1.0f32;
        let mut expected_gap = 1.0f32;

        for n in 1..=10_000 {
            let smoothed = dz.smooth(target);
            expected_gap *= DZ_FB;
            let gap = (smoothed - target).abs();
            assert!(
                (gap - expected_gap).abs() < 1e-3,
                "gap {} vs closed form {} at sample {}",
                gap,
                expected_gap,
                n
            );
        }
    }

    #[test]
    fn converges_to_target() {
        let mut dz = Dezipper::new();
        let mut out = 0.0;
        for _ in 0..20_000 {
            out = dz.smooth(0.5);
        }
        assert!((out - 0.5).abs() < 1e-4, "should settle near 0.5, got {out}");
    }

    #[test]
    fn reset_returns_to_zero() {
        let mut dz = Dezipper::new();
        dz.smooth(1.0);
        dz.reset();
        assert_eq!(dz.value(), 0.0);
    }
}
