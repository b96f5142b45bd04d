//! The figure-eight feedback tank.
//!
//! Two symmetric channel chains, each:
//!
//! ```text
//! ModulatedDiffuser -> DelayLine -> DampedLowpass -> x decay
//!                   -> Diffuser  -> DelayLine
//! ```
//!
//! cross-fed so that each channel's input is the *other* channel's previous
//! output plus the diffused feed. The cross-feed registers persist across
//! ticks; they are what makes the loop a figure eight rather than two
//! independent combs.
//!
//! Six internal nodes are tapped per tick for the output matrix: the samples
//! committed to each channel's two delay lines and to its output diffuser.

use crate::tuning::{
    MODULATED_DIFFUSER_DELAYS, TANK_DELAYS, TANK_DIFFUSER_DELAYS, scale_factor,
};
use placa_core::{DampedLowpass, DelayLine, Diffuser, ModulatedDiffuser};

/// The six tank node signals consumed by the output tap matrix.
///
/// `a1..a3` come from the left chain (delay A, output diffuser, delay B),
/// `a4..a6` from the right chain in the same order.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TankTaps {
    /// Left chain, first delay line.
    pub a1: f32,
    /// Left chain, output diffuser.
    pub a2: f32,
    /// Left chain, second delay line (the channel output).
    pub a3: f32,
    /// Right chain, first delay line.
    pub a4: f32,
    /// Right chain, output diffuser.
    pub a5: f32,
    /// Right chain, second delay line (the channel output).
    pub a6: f32,
}

/// One half of the tank.
#[derive(Debug, Clone)]
struct TankChannel {
    entry_diffuser: ModulatedDiffuser,
    delay_a: DelayLine,
    damping: DampedLowpass,
    output_diffuser: Diffuser,
    delay_b: DelayLine,
}

impl TankChannel {
    fn new(capacity: usize) -> Self {
        Self {
            entry_diffuser: ModulatedDiffuser::new(capacity),
            delay_a: DelayLine::new(capacity),
            damping: DampedLowpass::new(0.5),
            output_diffuser: Diffuser::new(capacity),
            delay_b: DelayLine::new(capacity),
        }
    }

    fn configure(
        &mut self,
        sample_rate: f32,
        entry_delay: usize,
        delay_a: usize,
        diffuser_delay: usize,
        delay_b: usize,
    ) {
        let capacity = sample_rate as usize;
        let scale = scale_factor(sample_rate);

        self.entry_diffuser.configure(capacity);
        self.entry_diffuser.set_delay(entry_delay * scale);
        self.entry_diffuser.set_excursion(sample_rate);

        self.delay_a.configure(capacity);
        self.delay_a.set_delay(delay_a * scale);

        self.output_diffuser.configure(capacity);
        self.output_diffuser.set_delay(diffuser_delay * scale);

        self.delay_b.configure(capacity);
        self.delay_b.set_delay(delay_b * scale);

        self.damping.reset();
    }

    fn reset(&mut self) {
        self.entry_diffuser.reset();
        self.delay_a.reset();
        self.damping.reset();
        self.output_diffuser.reset();
        self.delay_b.reset();
    }

    #[inline]
    fn process(&mut self, input: f32, decay: f32) -> f32 {
        let diffused = self.entry_diffuser.process(input);
        let delayed = self.delay_a.process(diffused);
        let damped = self.damping.process(delayed);
        let decayed = damped * decay;
        let rediffused = self.output_diffuser.process(decayed);
        self.delay_b.process(rediffused)
    }
}

/// The recirculating feedback network producing the dense reverberant tail.
///
/// # Stability
///
/// The decay factor scales energy once per loop traversal and is not clamped
/// here; the caller keeps it in `[0, 1)`. Values at or above 1 recirculate
/// energy indefinitely.
#[derive(Debug, Clone)]
pub struct ReverbTank {
    left: TankChannel,
    right: TankChannel,
    prev_left_out: f32,
    prev_right_out: f32,
    decay: f32,
}

impl ReverbTank {
    /// Creates a tank with every internal buffer at the given capacity.
    pub fn new(capacity: usize) -> Self {
        Self {
            left: TankChannel::new(capacity),
            right: TankChannel::new(capacity),
            prev_left_out: 0.0,
            prev_right_out: 0.0,
            decay: 0.5,
        }
    }

    /// Resizes all buffers to one second at `sample_rate` and applies the
    /// rescaled reference delay lengths.
    pub fn configure(&mut self, sample_rate: f32) {
        self.left.configure(
            sample_rate,
            MODULATED_DIFFUSER_DELAYS[0],
            TANK_DELAYS[0],
            TANK_DIFFUSER_DELAYS[0],
            TANK_DELAYS[1],
        );
        self.right.configure(
            sample_rate,
            MODULATED_DIFFUSER_DELAYS[1],
            TANK_DELAYS[2],
            TANK_DIFFUSER_DELAYS[1],
            TANK_DELAYS[3],
        );
        self.prev_left_out = 0.0;
        self.prev_right_out = 0.0;
    }

    /// Silences all internal state without reallocating.
    pub fn reset(&mut self) {
        self.left.reset();
        self.right.reset();
        self.prev_left_out = 0.0;
        self.prev_right_out = 0.0;
    }

    /// Applies one diffusion coefficient to every diffuser in the tank.
    pub fn set_diffusion(&mut self, diffusion: f32) {
        self.left.entry_diffuser.set_gain(diffusion);
        self.left.output_diffuser.set_gain(diffusion);
        self.right.entry_diffuser.set_gain(diffusion);
        self.right.output_diffuser.set_gain(diffusion);
    }

    /// Sets the per-traversal decay factor. Stable for values in `[0, 1)`.
    pub fn set_decay(&mut self, decay: f32) {
        self.decay = decay;
    }

    /// Current decay factor.
    pub fn decay(&self) -> f32 {
        self.decay
    }

    /// Sets the damping amount on both channel lowpass stages.
    pub fn set_damping(&mut self, damping: f32) {
        self.left.damping.set_damping(damping);
        self.right.damping.set_damping(damping);
    }

    /// Advances the tank one tick and returns the six tap signals.
    ///
    /// Both channel inputs are formed from the previous tick's outputs
    /// before either chain runs, so evaluation order cannot skew the
    /// cross-feed.
    #[inline]
    pub fn process(&mut self, diffused_input: f32) -> TankTaps {
        let left_in = self.prev_right_out + diffused_input;
        let right_in = self.prev_left_out + diffused_input;

        let left_out = self.left.process(left_in, self.decay);
        let right_out = self.right.process(right_in, self.decay);

        self.prev_left_out = left_out;
        self.prev_right_out = right_out;

        TankTaps {
            a1: self.left.delay_a.tap(),
            a2: self.left.output_diffuser.tap(),
            a3: self.left.delay_b.tap(),
            a4: self.right.delay_a.tap(),
            a5: self.right.output_diffuser.tap(),
            a6: self.right.delay_b.tap(),
        }
    }
}
