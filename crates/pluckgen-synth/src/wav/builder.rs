//! WAV file writer builder pattern.

use std::path::Path;

use super::format::WavFormat;
use super::result::WavResult;
use super::writer::{encode_wav, pcm_hash, write_wav_file};
use crate::error::SynthResult;

/// Mono 16-bit WAV writer bound to a sample rate.
#[derive(Debug, Clone, Copy)]
pub struct WavWriter {
    format: WavFormat,
}

/// Summary of a file written by [`WavWriter::write_file`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenFile {
    /// BLAKE3 hash of the PCM payload.
    pub pcm_hash: String,
    /// Number of sample frames written.
    pub num_frames: usize,
    /// Total file size in bytes.
    pub bytes_written: usize,
}

impl WavWriter {
    /// Creates a new WAV writer with mono format.
    pub fn mono(sample_rate: u32) -> Self {
        Self {
            format: WavFormat::mono(sample_rate),
        }
    }

    /// Format this writer emits.
    pub fn format(&self) -> WavFormat {
        self.format
    }

    /// Encodes samples into an in-memory WAV file.
    pub fn write_mono(&self, samples: &[i16]) -> SynthResult<Vec<u8>> {
        Ok(encode_wav(&self.format, samples)?)
    }

    /// Encodes samples and hashes their payload.
    pub fn render(&self, samples: &[i16]) -> SynthResult<WavResult> {
        Ok(WavResult::from_mono(samples, self.format.sample_rate)?)
    }

    /// Persists samples to `path`, replacing any existing file atomically.
    pub fn write_file(&self, path: &Path, samples: &[i16]) -> SynthResult<WrittenFile> {
        let bytes_written = write_wav_file(path, &self.format, samples)?;
        Ok(WrittenFile {
            pcm_hash: pcm_hash(samples),
            num_frames: samples.len(),
            bytes_written,
        })
    }
}
