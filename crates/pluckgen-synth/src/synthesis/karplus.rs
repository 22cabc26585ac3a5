//! Karplus-Strong synthesis for plucked string sounds.
//!
//! A noise burst circulates through a delay line whose length sets the pitch.
//! Every pass through the feedback path averages neighbouring samples, so the
//! burst loses its high partials first and settles into a decaying tone.
//!
//! The period is an integer number of samples, so the sounding pitch is
//! `sample_rate / floor(sample_rate / frequency)` rather than `frequency`
//! itself. At 44.1 kHz a 262 Hz request plays at 262.5 Hz.

use rand::Rng;

use super::delay_line::{DelayLine, MAX_DELAY_LENGTH, MIN_DELAY_LENGTH};
use crate::error::{SynthError, SynthResult};

/// Computes the delay line length `floor(sample_rate / frequency)`.
///
/// # Errors
/// [`SynthError::InvalidFrequency`] when the frequency is not a positive finite
/// number or the resulting period is shorter than two samples or longer than
/// [`MAX_DELAY_LENGTH`].
pub fn delay_length(frequency: f64, sample_rate: u32) -> SynthResult<usize> {
    let invalid = || SynthError::InvalidFrequency {
        freq: frequency,
        sample_rate,
    };

    if !frequency.is_finite() || frequency <= 0.0 {
        return Err(invalid());
    }

    let period = (sample_rate as f64 / frequency).floor();
    if period < MIN_DELAY_LENGTH as f64 || period > MAX_DELAY_LENGTH as f64 {
        return Err(invalid());
    }

    Ok(period as usize)
}

/// Number of output samples for a note of `duration_seconds`.
///
/// # Errors
/// [`SynthError::InvalidSampleRate`] for a zero rate and
/// [`SynthError::InvalidDuration`] for a non-positive or non-finite duration.
pub fn num_samples_for(duration_seconds: f64, sample_rate: u32) -> SynthResult<usize> {
    if sample_rate == 0 {
        return Err(SynthError::InvalidSampleRate { rate: sample_rate });
    }
    if !duration_seconds.is_finite() || duration_seconds <= 0.0 {
        return Err(SynthError::InvalidDuration {
            duration: duration_seconds,
        });
    }

    Ok((duration_seconds * sample_rate as f64).round() as usize)
}

/// A validated plucked-string voice.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KarplusStrong {
    frequency: f64,
    sample_rate: u32,
    delay_length: usize,
}

impl KarplusStrong {
    /// Creates a voice for `frequency` at `sample_rate`.
    ///
    /// # Errors
    /// See [`delay_length`].
    pub fn new(frequency: f64, sample_rate: u32) -> SynthResult<Self> {
        if sample_rate == 0 {
            return Err(SynthError::InvalidSampleRate { rate: sample_rate });
        }
        let delay_length = delay_length(frequency, sample_rate)?;
        Ok(Self {
            frequency,
            sample_rate,
            delay_length,
        })
    }

    /// Requested frequency in Hz.
    pub fn frequency(&self) -> f64 {
        self.frequency
    }

    /// Sample rate in Hz.
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Delay line length, i.e. the period in samples.
    pub fn delay_length(&self) -> usize {
        self.delay_length
    }

    /// Frequency actually produced by the integer period.
    pub fn effective_frequency(&self) -> f64 {
        self.sample_rate as f64 / self.delay_length as f64
    }

    /// Plucks the string and collects `num_samples` outputs in order.
    ///
    /// # Errors
    /// [`SynthError::InvalidFrequency`] if the delay line cannot be built.
    pub fn synthesize<R: Rng + ?Sized>(
        &self,
        num_samples: usize,
        rng: &mut R,
    ) -> SynthResult<Vec<f64>> {
        let mut line = DelayLine::noise_burst(self.delay_length, rng).ok_or(
            SynthError::InvalidFrequency {
                freq: self.frequency,
                sample_rate: self.sample_rate,
            },
        )?;

        let mut output = Vec::with_capacity(num_samples);
        for _ in 0..num_samples {
            output.push(line.step());
        }

        Ok(output)
    }
}

/// Generates a full waveform of `num_samples` samples for `frequency`.
///
/// # Errors
/// [`SynthError::InvalidFrequency`] when the frequency cannot be realised at
/// `sample_rate`; nothing is drawn from `rng` in that case.
pub fn generate<R: Rng + ?Sized>(
    frequency: f64,
    sample_rate: u32,
    num_samples: usize,
    rng: &mut R,
) -> SynthResult<Vec<f64>> {
    let voice = KarplusStrong::new(frequency, sample_rate)?;
    voice.synthesize(num_samples, rng)
}
