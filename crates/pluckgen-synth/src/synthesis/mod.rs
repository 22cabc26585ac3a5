//! Karplus-Strong synthesis.
//!
//! - `delay_line` - the circulating noise buffer and its damped averaging step
//! - `karplus` - drives a delay line for a whole note

pub mod delay_line;
pub mod karplus;

pub use delay_line::{DelayLine, MAX_DELAY_LENGTH, MIN_DELAY_LENGTH};
pub use karplus::{delay_length, generate, num_samples_for, KarplusStrong};

/// Default output sample rate in Hz.
pub const SAMPLE_RATE: u32 = 44100;

/// Default note length in seconds.
pub const DEFAULT_DURATION_SECONDS: f64 = 1.0;

/// Energy retained per feedback step; models string damping.
pub const DECAY: f64 = 0.995;
