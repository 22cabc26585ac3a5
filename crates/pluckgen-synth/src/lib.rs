//! Plucked string tone synthesis.
//!
//! This crate turns a single frequency into a decaying plucked-string tone with
//! the Karplus-Strong algorithm and stores it as a mono 16-bit PCM WAV file.
//!
//! # Overview
//!
//! The pipeline has three stages:
//!
//! 1. [`synthesis::generate`] excites a delay line of `floor(sample_rate / freq)`
//!    samples with noise and runs its damped averaging recurrence.
//! 2. [`quantize::quantize_all`] scales to 16-bit, rounding half away from zero
//!    and clipping out-of-range values.
//! 3. [`wav::WavWriter`] serializes the samples behind a canonical 44-byte
//!    RIFF header and persists the file atomically.
//!
//! # Determinism
//!
//! Synthesis draws all of its randomness from a caller-supplied [`rand::Rng`].
//! Passing a generator from [`rng::create_rng`] makes output byte-identical
//! across runs.
//!
//! # Example
//!
//! ```no_run
//! use pluckgen_synth::{generate, quantize_all, rng::create_rng, WavWriter};
//! use std::path::Path;
//!
//! let mut rng = create_rng(42);
//! let waveform = generate(262.0, 44100, 44100, &mut rng)?;
//! let pcm = quantize_all(&waveform);
//! let written = WavWriter::mono(44100).write_file(Path::new("C4.wav"), &pcm)?;
//! println!("PCM hash: {}", written.pcm_hash);
//! # Ok::<(), pluckgen_synth::SynthError>(())
//! ```

pub mod error;
pub mod quantize;
pub mod rng;
pub mod synthesis;
pub mod wav;

pub use error::{SynthError, SynthResult};
pub use quantize::{quantize, quantize_all};
pub use synthesis::{generate, KarplusStrong, DECAY, DEFAULT_DURATION_SECONDS, SAMPLE_RATE};
pub use wav::{WavFormat, WavResult, WavWriter, WrittenFile};
