//! Fixed-length ring buffer carrying the Karplus-Strong feedback recurrence.

use rand::Rng;

use super::DECAY;

/// Shortest delay line that still has a front and a second-from-front sample.
pub const MIN_DELAY_LENGTH: usize = 2;

/// Longest supported delay line, about six minutes of period at 44.1 kHz.
pub const MAX_DELAY_LENGTH: usize = 1 << 24;

/// A circulating window of samples whose length never changes.
///
/// Each [`step`](DelayLine::step) emits the front sample, averages it with its
/// successor, damps the average by [`DECAY`] and pushes the result onto the back.
#[derive(Debug, Clone)]
pub struct DelayLine {
    buffer: Vec<f64>,
    front: usize,
}

impl DelayLine {
    /// Fills a delay line of `size` slots with uniform noise in [-0.5, 0.5).
    ///
    /// Returns `None`, without drawing from `rng`, when `size` is outside
    /// [`MIN_DELAY_LENGTH`]..=[`MAX_DELAY_LENGTH`].
    pub fn noise_burst<R: Rng + ?Sized>(size: usize, rng: &mut R) -> Option<Self> {
        if !(MIN_DELAY_LENGTH..=MAX_DELAY_LENGTH).contains(&size) {
            return None;
        }
        let samples = (0..size).map(|_| rng.gen::<f64>() - 0.5).collect();
        Self::from_samples(samples)
    }

    /// Wraps existing samples, front first.
    ///
    /// Returns `None` when fewer than [`MIN_DELAY_LENGTH`] samples are given.
    pub fn from_samples(samples: Vec<f64>) -> Option<Self> {
        if samples.len() < MIN_DELAY_LENGTH {
            return None;
        }
        Some(Self {
            buffer: samples,
            front: 0,
        })
    }

    /// Number of slots; constant for the lifetime of the line.
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    /// Always false: a delay line holds at least [`MIN_DELAY_LENGTH`] samples.
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// The sample the next [`step`](DelayLine::step) will emit.
    pub fn front(&self) -> f64 {
        self.buffer[self.front]
    }

    /// Emits the front sample and feeds the damped two-point average back in.
    pub fn step(&mut self) -> f64 {
        let len = self.buffer.len();
        let next_pos = (self.front + 1) % len;

        let current = self.buffer[self.front];
        let next = self.buffer[next_pos];

        // The slot just vacated by the front becomes the new back.
        self.buffer[self.front] = DECAY * 0.5 * (current + next);
        self.front = next_pos;

        current
    }

    /// Iterates the current contents from front to back.
    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        let (wrapped, head) = self.buffer.split_at(self.front);
        head.iter().chain(wrapped.iter()).copied()
    }
}
