//! Engine orchestration: predelay, input diffusion, tank, tap matrix, mix.
//!
//! One [`ReverbEngine`] instance owns every buffer and register in the
//! network. All allocation happens in [`configure`](ReverbEngine::configure);
//! the per-tick path is pure arithmetic over fixed-size buffers, so
//! [`process_frame`](ReverbEngine::process_frame) is real-time safe.
//!
//! Signal flow per tick:
//!
//! ```text
//! in -> dezipped gain -> mono feed -> predelay -> cutoff lowpass
//!    -> 4x input diffusers -> tank -> tap matrix -> wet/dry mix -> out
//! ```
//!
//! Control values are cooked when set and cached; nothing transcendental
//! runs per sample.

use crate::error::{ConfigError, MIN_SAMPLE_RATE};
use crate::tank::ReverbTank;
use crate::taps::OutputTapMatrix;
use crate::tuning::{DEFAULT_PREDELAY, INPUT_DIFFUSER_DELAYS, scale_factor};
use placa_core::{CutoffLowpass, DelayLine, Dezipper, Diffuser, mono_sum};

/// Default cutoff for the input lowpass, in Hz.
const DEFAULT_CUTOFF_HZ: f32 = 2000.0;

/// Complete plate-reverb engine.
///
/// # Ownership & threading
///
/// All state is exclusively owned; both `configure` and `process_frame` take
/// `&mut self`, so the borrow checker enforces the serialization the
/// real-time contract requires.
///
/// # Parameter domains
///
/// Setters cache values without validating them; the documented domains are
/// the caller's contract. Out-of-domain values (decay >= 1, negative cutoff)
/// produce unstable or undefined audio, not panics.
///
/// # Example
///
/// ```rust
/// use placa_reverb::ReverbEngine;
///
/// let mut engine = ReverbEngine::new(48000.0).unwrap();
/// engine.set_decay(0.7);
/// engine.set_wet_dry_pct(50.0);
///
/// let input = [0.5f32, 0.5];
/// let mut output = [0.0f32; 2];
/// engine.process_frame(&input, &mut output);
/// ```
#[derive(Debug, Clone)]
pub struct ReverbEngine {
    sample_rate: f32,

    gain_dezipper: Dezipper,
    predelay: DelayLine,
    input_lowpass: CutoffLowpass,
    input_diffusers: [Diffuser; 4],
    tank: ReverbTank,
    tap_matrix: OutputTapMatrix,

    // Cooked control values
    gain_linear: f32,
    predelay_samples: Option<usize>,
    diffusion: f32,
    decay: f32,
    damping: f32,
    cutoff_hz: f32,
    wet_dry_pct: f32,
}

impl ReverbEngine {
    /// Creates and configures an engine for the given sample rate.
    pub fn new(sample_rate: f32) -> Result<Self, ConfigError> {
        let capacity = sample_rate.max(1.0) as usize;
        let mut engine = Self {
            sample_rate,
            gain_dezipper: Dezipper::new(),
            predelay: DelayLine::new(capacity),
            input_lowpass: CutoffLowpass::new(capacity, DEFAULT_CUTOFF_HZ),
            input_diffusers: core::array::from_fn(|_| Diffuser::new(capacity)),
            tank: ReverbTank::new(capacity),
            tap_matrix: OutputTapMatrix::new(capacity),
            gain_linear: 1.0,
            predelay_samples: None,
            diffusion: 0.5,
            decay: 0.5,
            damping: 0.5,
            cutoff_hz: DEFAULT_CUTOFF_HZ,
            wet_dry_pct: 100.0,
        };
        engine.configure(sample_rate)?;
        Ok(engine)
    }

    /// Resizes every buffer to one second at `sample_rate`, rescales every
    /// reference delay length, reapplies cached parameters, and silences all
    /// state.
    ///
    /// This is the only operation that allocates; call it from a non-audio
    /// context.
    pub fn configure(&mut self, sample_rate: f32) -> Result<(), ConfigError> {
        if !sample_rate.is_finite() || sample_rate <= 0.0 {
            return Err(ConfigError::InvalidSampleRate(sample_rate));
        }
        if sample_rate < MIN_SAMPLE_RATE {
            return Err(ConfigError::SampleRateTooLow(sample_rate));
        }

        self.sample_rate = sample_rate;
        let capacity = sample_rate as usize;
        let scale = scale_factor(sample_rate);

        #[cfg(feature = "tracing")]
        tracing::debug!("configure: sample_rate {sample_rate} Hz, delay scale {scale}");

        self.predelay.configure(capacity);
        self.predelay
            .set_delay(self.predelay_samples.unwrap_or(DEFAULT_PREDELAY * scale));

        self.input_lowpass.configure(capacity);
        self.input_lowpass.set_cutoff(self.cutoff_hz);

        for (diffuser, reference) in self.input_diffusers.iter_mut().zip(INPUT_DIFFUSER_DELAYS) {
            diffuser.configure(capacity);
            diffuser.set_delay(reference * scale);
            diffuser.set_gain(self.diffusion);
        }

        self.tank.configure(sample_rate);
        self.tank.set_diffusion(self.diffusion);
        self.tank.set_decay(self.decay);
        self.tank.set_damping(self.damping);

        self.tap_matrix.configure(sample_rate);

        self.gain_dezipper.reset();
        Ok(())
    }

    /// Silences every buffer and register without reallocating.
    ///
    /// For transport resets where the sample rate is unchanged.
    pub fn reset(&mut self) {
        self.gain_dezipper.reset();
        self.predelay.reset();
        self.input_lowpass.reset();
        for diffuser in &mut self.input_diffusers {
            diffuser.reset();
        }
        self.tank.reset();
        self.tap_matrix.reset();
    }

    /// The sample rate the engine was last configured for, in Hz.
    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    /// Sets the input trim as linear gain. Smoothed by the dezipper.
    pub fn set_gain_linear(&mut self, gain: f32) {
        self.gain_linear = gain;
    }

    /// Sets the input trim in dB. Convenience over [`set_gain_linear`](Self::set_gain_linear).
    pub fn set_gain_db(&mut self, db: f32) {
        self.gain_linear = placa_core::db_to_linear(db);
    }

    /// Sets the predelay length in samples at the current rate.
    ///
    /// Must be below one second of samples. Until first set, the reference
    /// default (300 samples at 29761 Hz, rescaled) applies.
    pub fn set_predelay_samples(&mut self, samples: usize) {
        self.predelay_samples = Some(samples);
        self.predelay.set_delay(samples);
    }

    /// Sets the diffusion coefficient shared by the input chain and every
    /// tank diffuser. Domain `[0, 1)`.
    pub fn set_diffusion(&mut self, diffusion: f32) {
        self.diffusion = diffusion;
        for diffuser in &mut self.input_diffusers {
            diffuser.set_gain(diffusion);
        }
        self.tank.set_diffusion(diffusion);
    }

    /// Sets the tank decay factor. Domain `[0, 1)`; values at or above 1
    /// recirculate energy without decay.
    pub fn set_decay(&mut self, decay: f32) {
        self.decay = decay;
        self.tank.set_decay(decay);
    }

    /// Sets the tank damping amount. Domain `[0.0005, 1]`.
    pub fn set_damping(&mut self, damping: f32) {
        self.damping = damping;
        self.tank.set_damping(damping);
    }

    /// Sets the input lowpass cutoff in Hz. Domain `(0, inf)`.
    pub fn set_cutoff_hz(&mut self, cutoff_hz: f32) {
        self.cutoff_hz = cutoff_hz;
        self.input_lowpass.set_cutoff(cutoff_hz);
    }

    /// Current input lowpass cutoff in Hz.
    pub fn cutoff_hz(&self) -> f32 {
        self.cutoff_hz
    }

    /// Sets the wet/dry balance in percent. Domain `[0, 100]`.
    pub fn set_wet_dry_pct(&mut self, pct: f32) {
        self.wet_dry_pct = pct;
    }

    /// Current wet/dry balance in percent.
    pub fn wet_dry_pct(&self) -> f32 {
        self.wet_dry_pct
    }

    /// Processes one audio frame.
    ///
    /// Supported layouts, selected by slice lengths:
    ///
    /// - 1 in / 1 out: dezipped trim only, no reverb (mono passthrough)
    /// - 1 in / 2 out: reverb with the trimmed mono input as the dry signal
    ///   on both channels
    /// - 2 in / 2 out: reverb over the averaged feed, per-channel dry
    ///
    /// # Panics
    ///
    /// Panics on any other combination of slice lengths.
    pub fn process_frame(&mut self, input: &[f32], output: &mut [f32]) {
        let gain = self.gain_dezipper.smooth(self.gain_linear);

        match (input.len(), output.len()) {
            (1, 1) => {
                output[0] = input[0] * gain;
            }
            (1, 2) => {
                let dry = input[0] * gain;
                let (reverb_l, reverb_r) = self.process_tick(dry);
                let (l, r) = self.mix(reverb_l, reverb_r, dry, dry);
                output[0] = l;
                output[1] = r;
            }
            (2, 2) => {
                let dry_l = input[0] * gain;
                let dry_r = input[1] * gain;
                let feed = mono_sum(dry_l, dry_r);
                let (reverb_l, reverb_r) = self.process_tick(feed);
                let (l, r) = self.mix(reverb_l, reverb_r, dry_l, dry_r);
                output[0] = l;
                output[1] = r;
            }
            (ins, outs) => panic!("unsupported channel layout: {ins} in / {outs} out"),
        }
    }

    /// Runs the mono feed through the full network for one tick.
    #[inline]
    fn process_tick(&mut self, feed: f32) -> (f32, f32) {
        let predelayed = self.predelay.process(feed);
        let filtered = self.input_lowpass.process(predelayed);

        let mut diffused = filtered;
        for diffuser in &mut self.input_diffusers {
            diffused = diffuser.process(diffused);
        }

        let taps = self.tank.process(diffused);
        self.tap_matrix.process(&taps)
    }

    #[inline]
    fn mix(&self, reverb_l: f32, reverb_r: f32, dry_l: f32, dry_r: f32) -> (f32, f32) {
        let wet = self.wet_dry_pct / 100.0;
        let dry = 1.0 - wet;
        (reverb_l * wet + dry_l * dry, reverb_r * wet + dry_r * dry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine_at(rate: f32) -> ReverbEngine {
        ReverbEngine::new(rate).expect("configuration should succeed")
    }

    #[test]
    fn rejects_degenerate_sample_rates() {
        assert_eq!(
            ReverbEngine::new(-48000.0).unwrap_err(),
            ConfigError::InvalidSampleRate(-48000.0)
        );
        assert!(matches!(
            ReverbEngine::new(f32::NAN).unwrap_err(),
            ConfigError::InvalidSampleRate(rate) if rate.is_nan()
        ));
        assert_eq!(
            ReverbEngine::new(8000.0).unwrap_err(),
            ConfigError::SampleRateTooLow(8000.0)
        );
    }

    #[test]
    fn mono_to_mono_is_trimmed_passthrough() {
        let mut engine = engine_at(48000.0);
        engine.set_gain_linear(1.0);

        // Let the dezipper settle, then the output tracks the input.
        let mut out = [0.0f32];
        for _ in 0..20_000 {
            engine.process_frame(&[0.5], &mut out);
        }
        assert!((out[0] - 0.5).abs() < 1e-3, "expected ~0.5, got {}", out[0]);
    }

    #[test]
    fn stereo_impulse_produces_a_tail() {
        let mut engine = engine_at(48000.0);
        engine.set_wet_dry_pct(100.0);

        let mut out = [0.0f32; 2];
        engine.process_frame(&[1.0, 1.0], &mut out);

        let mut energy = 0.0f64;
        for _ in 0..48_000 {
            engine.process_frame(&[0.0, 0.0], &mut out);
            assert!(out[0].is_finite() && out[1].is_finite());
            energy += f64::from(out[0] * out[0] + out[1] * out[1]);
        }
        assert!(energy > 0.0, "reverb tail should carry energy");
    }

    #[test]
    fn outputs_are_decorrelated() {
        let mut engine = engine_at(48000.0);
        engine.set_wet_dry_pct(100.0);

        let mut out = [0.0f32; 2];
        engine.process_frame(&[1.0, 1.0], &mut out);

        let mut differ = false;
        for _ in 0..48_000 {
            engine.process_frame(&[0.0, 0.0], &mut out);
            if (out[0] - out[1]).abs() > 1e-6 {
                differ = true;
            }
        }
        assert!(differ, "left and right tails should not be identical");
    }

    #[test]
    fn dry_engine_passes_trimmed_input() {
        let mut engine = engine_at(48000.0);
        engine.set_wet_dry_pct(0.0);

        let mut out = [0.0f32; 2];
        for _ in 0..20_000 {
            engine.process_frame(&[0.25, -0.25], &mut out);
        }
        assert!((out[0] - 0.25).abs() < 1e-3);
        assert!((out[1] + 0.25).abs() < 1e-3);
    }

    #[test]
    fn mono_in_duplicates_dry_on_both_channels() {
        let mut engine = engine_at(48000.0);
        engine.set_wet_dry_pct(0.0);

        let mut out = [0.0f32; 2];
        for _ in 0..20_000 {
            engine.process_frame(&[0.4], &mut out);
        }
        assert!((out[0] - 0.4).abs() < 1e-3);
        assert_eq!(out[0], out[1]);
    }

    #[test]
    fn silence_recovery_after_reset() {
        let mut engine = engine_at(48000.0);
        let mut out = [0.0f32; 2];
        for _ in 0..48_000 {
            engine.process_frame(&[0.5, -0.3], &mut out);
        }

        engine.reset();
        for n in 0..48_000 {
            engine.process_frame(&[0.0, 0.0], &mut out);
            assert_eq!(out[0], 0.0, "residue at tick {n}");
            assert_eq!(out[1], 0.0, "residue at tick {n}");
        }
    }

    #[test]
    fn reconfigure_changes_rate_and_silences() {
        let mut engine = engine_at(44100.0);
        let mut out = [0.0f32; 2];
        for _ in 0..1000 {
            engine.process_frame(&[1.0, 1.0], &mut out);
        }

        engine.configure(96000.0).unwrap();
        assert_eq!(engine.sample_rate(), 96000.0);
        engine.process_frame(&[0.0, 0.0], &mut out);
        assert_eq!(out, [0.0, 0.0]);
    }

    #[test]
    fn predelay_setting_shifts_onset() {
        let onset = |predelay: usize| -> usize {
            let mut engine = engine_at(48000.0);
            engine.set_predelay_samples(predelay);
            engine.set_wet_dry_pct(100.0);
            engine.set_gain_linear(1000.0); // counteract the dezipper ramp

            let mut out = [0.0f32; 2];
            engine.process_frame(&[1.0, 1.0], &mut out);
            for n in 1..96_000 {
                engine.process_frame(&[0.0, 0.0], &mut out);
                if out[0].abs() > 1e-9 || out[1].abs() > 1e-9 {
                    return n;
                }
            }
            panic!("no onset found");
        };

        let early = onset(100);
        let late = onset(4100);
        assert_eq!(late - early, 4000, "onset should shift by the predelay");
    }

    #[test]
    #[should_panic]
    fn unsupported_layout_panics() {
        let mut engine = engine_at(48000.0);
        let mut out = [0.0f32];
        engine.process_frame(&[0.0, 0.0], &mut out);
    }
}
