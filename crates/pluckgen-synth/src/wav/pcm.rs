//! WAV decoding, PCM extraction and hashing.

use std::path::Path;

use super::format::WavFormat;
use crate::error::{SynthError, SynthResult};

/// A decoded 16-bit PCM WAV file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedWav {
    /// Format declared by the `fmt ` chunk.
    pub format: WavFormat,
    /// Interleaved samples in playback order.
    pub samples: Vec<i16>,
}

impl DecodedWav {
    /// Number of sample frames.
    pub fn num_frames(&self) -> usize {
        self.samples.len() / self.format.channels.max(1) as usize
    }

    /// Duration in seconds.
    pub fn duration_seconds(&self) -> f64 {
        if self.format.sample_rate == 0 {
            return 0.0;
        }
        self.num_frames() as f64 / self.format.sample_rate as f64
    }
}

struct Chunk<'a> {
    id: &'a [u8],
    body: &'a [u8],
}

fn read_u16(bytes: &[u8], at: usize) -> u16 {
    u16::from_le_bytes([bytes[at], bytes[at + 1]])
}

fn read_u32(bytes: &[u8], at: usize) -> u32 {
    u32::from_le_bytes([bytes[at], bytes[at + 1], bytes[at + 2], bytes[at + 3]])
}

/// Walks the chunks after the `WAVE` tag, stopping at the first truncated one.
fn chunks(wav_data: &[u8]) -> impl Iterator<Item = Chunk<'_>> {
    let mut pos: usize = 12;
    std::iter::from_fn(move || {
        let header_end = pos.checked_add(8)?;
        if header_end > wav_data.len() {
            return None;
        }
        let id = &wav_data[pos..pos + 4];
        let size = read_u32(wav_data, pos + 4) as usize;
        let body_end = header_end.checked_add(size)?;
        if body_end > wav_data.len() {
            return None;
        }

        // Chunks are word aligned.
        pos = body_end + (size % 2);
        Some(Chunk {
            id,
            body: &wav_data[header_end..body_end],
        })
    })
}

fn is_riff_wave(wav_data: &[u8]) -> bool {
    wav_data.len() >= 12 && &wav_data[0..4] == b"RIFF" && &wav_data[8..12] == b"WAVE"
}

/// Extracts PCM data from a WAV file buffer.
///
/// Used for comparing WAV files by their audio content only.
///
/// # Returns
/// PCM data if found, or None if the format is invalid
pub fn extract_pcm_data(wav_data: &[u8]) -> Option<&[u8]> {
    if !is_riff_wave(wav_data) {
        return None;
    }
    chunks(wav_data)
        .find(|chunk| chunk.id == b"data")
        .map(|chunk| chunk.body)
}

/// Computes the PCM hash of a WAV file.
///
/// # Returns
/// BLAKE3 hash of PCM data, or None if format is invalid
pub fn compute_pcm_hash(wav_data: &[u8]) -> Option<String> {
    extract_pcm_data(wav_data).map(|pcm| blake3::hash(pcm).to_hex().to_string())
}

/// Decodes an uncompressed 16-bit PCM WAV file.
///
/// Unknown chunks are skipped.
///
/// # Errors
/// [`SynthError::InvalidFormat`] when the buffer is not RIFF/WAVE, lacks a
/// `fmt ` or `data` chunk, or declares anything other than 16-bit linear PCM.
pub fn read_wav(wav_data: &[u8]) -> SynthResult<DecodedWav> {
    if !is_riff_wave(wav_data) {
        return Err(SynthError::invalid_format("missing RIFF/WAVE header"));
    }

    let mut format = None;
    let mut pcm = None;
    for chunk in chunks(wav_data) {
        match chunk.id {
            b"fmt " if format.is_none() => format = Some(parse_fmt(chunk.body)?),
            b"data" if pcm.is_none() => pcm = Some(chunk.body),
            _ => {}
        }
    }

    let format = format.ok_or_else(|| SynthError::invalid_format("missing fmt chunk"))?;
    let pcm = pcm.ok_or_else(|| SynthError::invalid_format("missing data chunk"))?;

    if pcm.len() % 2 != 0 {
        return Err(SynthError::invalid_format(format!(
            "data chunk length {} is not a whole number of 16-bit samples",
            pcm.len()
        )));
    }

    let samples = pcm
        .chunks_exact(2)
        .map(|pair| i16::from_le_bytes([pair[0], pair[1]]))
        .collect();

    Ok(DecodedWav { format, samples })
}

fn parse_fmt(body: &[u8]) -> SynthResult<WavFormat> {
    if body.len() < 16 {
        return Err(SynthError::invalid_format(format!(
            "fmt chunk too short: {} bytes",
            body.len()
        )));
    }

    let audio_format = read_u16(body, 0);
    if audio_format != 1 {
        return Err(SynthError::invalid_format(format!(
            "unsupported encoding {audio_format} (only linear PCM is supported)"
        )));
    }

    let channels = read_u16(body, 2);
    if channels == 0 {
        return Err(SynthError::invalid_format("zero channels"));
    }

    let bits_per_sample = read_u16(body, 14);
    if bits_per_sample != 16 {
        return Err(SynthError::invalid_format(format!(
            "unsupported sample width: {bits_per_sample} bits"
        )));
    }

    Ok(WavFormat {
        channels,
        sample_rate: read_u32(body, 4),
        bits_per_sample,
    })
}

/// Reads and decodes a WAV file from disk.
pub fn read_wav_file(path: &Path) -> SynthResult<DecodedWav> {
    let bytes = std::fs::read(path)?;
    read_wav(&bytes)
}
