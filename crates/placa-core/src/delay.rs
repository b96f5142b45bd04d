//! Integer-sample circular delay line.
//!
//! The single storage primitive every stage of the plate network is built on:
//! predelay, diffusers, tank delays, and the output tap matrix all own one or
//! more of these. Unlike an interpolated delay, the read position is a whole
//! number of samples, so a read is a single index - no fractional math in the
//! tick path.
//!
//! # Access pattern
//!
//! Each tick reads the delayed sample *before* writing the new one, then
//! advances the write cursor by exactly one step:
//!
//! ```text
//! out = storage[(write + capacity - delay) % capacity]
//! storage[write] = in; write += 1 (wrap at capacity)
//! ```
//!
//! The just-written sample stays available through [`DelayLine::tap`] so the
//! output matrix can pick up pre-delay energy without waiting for the long
//! delay to resolve it.

#[cfg(not(feature = "std"))]
extern crate alloc;

#[cfg(feature = "std")]
extern crate std as alloc;

use alloc::vec;
use alloc::vec::Vec;

/// Fixed-capacity circular delay buffer.
///
/// # Memory
///
/// The buffer is heap-allocated during construction or
/// [`configure`](Self::configure) and never reallocates during processing.
///
/// # Example
///
/// ```rust
/// use placa_core::DelayLine;
///
/// let mut line = DelayLine::new(64);
/// line.set_delay(3);
///
/// line.process(1.0);
/// line.process(0.0);
/// line.process(0.0);
/// assert_eq!(line.process(0.0), 1.0); // impulse emerges 3 ticks later
/// ```
#[derive(Debug, Clone)]
pub struct DelayLine {
    /// Circular buffer storage
    storage: Vec<f32>,
    /// Write position in the buffer
    write_pos: usize,
    /// Read offset behind the write position, in samples
    delay: usize,
    /// Sample committed on the most recent write
    tap: f32,
}

impl DelayLine {
    /// Creates a delay line with the given capacity in samples.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is 0.
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "Delay capacity must be > 0");

        Self {
            storage: vec![0.0; capacity],
            write_pos: 0,
            delay: 1,
            tap: 0.0,
        }
    }

    /// Reallocates storage to a new capacity and resets all state.
    ///
    /// The configured delay is clamped into the new capacity; callers are
    /// expected to follow up with [`set_delay`](Self::set_delay).
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is 0.
    pub fn configure(&mut self, capacity: usize) {
        assert!(capacity > 0, "Delay capacity must be > 0");
        self.storage = vec![0.0; capacity];
        self.delay = self.delay.min(capacity - 1);
        self.reset();
    }

    /// Zero-fills storage and returns the cursors to 0. No reallocation.
    pub fn reset(&mut self) {
        self.storage.fill(0.0);
        self.write_pos = 0;
        self.tap = 0.0;
    }

    /// Sets the read offset used on subsequent ticks.
    ///
    /// A delay of 0 reads the slot about to be overwritten, i.e. the sample
    /// written `capacity` ticks ago.
    ///
    /// # Panics
    ///
    /// Panics if `delay >= capacity`. A delay meeting the capacity would
    /// silently alias the read cursor onto live data otherwise.
    pub fn set_delay(&mut self, delay: usize) {
        assert!(
            delay < self.storage.len(),
            "delay {} must be < capacity {}",
            delay,
            self.storage.len()
        );
        self.delay = delay;
    }

    /// Returns the currently configured delay in samples.
    pub fn delay(&self) -> usize {
        self.delay
    }

    /// Returns the buffer capacity in samples.
    pub fn capacity(&self) -> usize {
        self.storage.len()
    }

    /// Reads the sample at the configured delay behind the write cursor.
    #[inline]
    pub fn read(&self) -> f32 {
        let len = self.storage.len();
        self.storage[(self.write_pos + len - self.delay) % len]
    }

    /// Reads the sample at `offset` slots *ahead of* the write cursor.
    ///
    /// Used by the modulated diffuser, whose read position tracks the write
    /// cursor plus a fixed excursion instead of trailing it.
    #[inline]
    pub fn read_offset(&self, offset: usize) -> f32 {
        let len = self.storage.len();
        self.storage[(self.write_pos + offset) % len]
    }

    /// Writes a sample, records it as the tap, and advances the write cursor.
    #[inline]
    pub fn write(&mut self, sample: f32) {
        self.storage[self.write_pos] = sample;
        self.tap = sample;
        self.write_pos += 1;
        if self.write_pos >= self.storage.len() {
            self.write_pos = 0;
        }
    }

    /// Combined read-before-write tick.
    #[inline]
    pub fn process(&mut self, input: f32) -> f32 {
        let output = self.read();
        self.write(input);
        output
    }

    /// The sample committed to the buffer on the most recent write.
    #[inline]
    pub fn tap(&self) -> f32 {
        self.tap
    }
}
