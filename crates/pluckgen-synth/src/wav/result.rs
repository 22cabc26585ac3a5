//! WAV file generation result type.

use super::format::WavFormat;
use super::writer::{encode_wav, pcm_hash};

/// Result of WAV file generation.
#[derive(Debug, Clone)]
pub struct WavResult {
    /// Complete WAV file bytes.
    pub wav_data: Vec<u8>,
    /// BLAKE3 hash of PCM data only.
    pub pcm_hash: String,
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Number of sample frames.
    pub num_frames: usize,
}

impl WavResult {
    /// Creates a WavResult from mono 16-bit samples.
    pub fn from_mono(samples: &[i16], sample_rate: u32) -> std::io::Result<Self> {
        let format = WavFormat::mono(sample_rate);
        Ok(Self {
            wav_data: encode_wav(&format, samples)?,
            pcm_hash: pcm_hash(samples),
            sample_rate,
            num_frames: samples.len(),
        })
    }

    /// Returns the duration in seconds.
    pub fn duration_seconds(&self) -> f64 {
        self.num_frames as f64 / self.sample_rate as f64
    }
}
