//! Core WAV encoding and file persistence.

use std::io::{self, Write};
use std::path::Path;

use super::format::{WavFormat, HEADER_LEN};
use crate::error::SynthResult;

/// Writes a complete WAV file to a writer.
///
/// # Arguments
/// * `writer` - Output writer
/// * `format` - WAV format parameters
/// * `pcm_data` - Raw PCM samples as bytes
pub fn write_wav<W: Write>(writer: &mut W, format: &WavFormat, pcm_data: &[u8]) -> io::Result<()> {
    let data_size = u32::try_from(pcm_data.len())
        .ok()
        .filter(|size| *size <= u32::MAX - 36)
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "PCM payload exceeds 4 GiB"))?;
    let riff_size = 36 + data_size; // Total file size minus the 8-byte RIFF preamble
    let block_align = format
        .block_align()
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "block align overflows u16"))?;
    let byte_rate = format.byte_rate().ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("byte rate overflows u32 at {} Hz", format.sample_rate),
        )
    })?;

    // RIFF header
    writer.write_all(b"RIFF")?;
    writer.write_all(&riff_size.to_le_bytes())?;
    writer.write_all(b"WAVE")?;

    // fmt chunk
    writer.write_all(b"fmt ")?;
    writer.write_all(&16u32.to_le_bytes())?; // Chunk size (16 for PCM)
    writer.write_all(&1u16.to_le_bytes())?; // Audio format (1 = PCM)
    writer.write_all(&format.channels.to_le_bytes())?;
    writer.write_all(&format.sample_rate.to_le_bytes())?;
    writer.write_all(&byte_rate.to_le_bytes())?;
    writer.write_all(&block_align.to_le_bytes())?;
    writer.write_all(&format.bits_per_sample.to_le_bytes())?;

    // data chunk
    writer.write_all(b"data")?;
    writer.write_all(&data_size.to_le_bytes())?;
    writer.write_all(pcm_data)?;

    Ok(())
}

/// Serializes 16-bit samples as little-endian bytes in playback order.
pub fn pcm16_bytes(samples: &[i16]) -> Vec<u8> {
    let mut pcm = Vec::with_capacity(samples.len() * 2);
    for sample in samples {
        pcm.extend_from_slice(&sample.to_le_bytes());
    }
    pcm
}

/// BLAKE3 hex digest of the little-endian PCM payload.
pub fn pcm_hash(samples: &[i16]) -> String {
    blake3::hash(&pcm16_bytes(samples)).to_hex().to_string()
}

/// Encodes a whole WAV file into a buffer of exactly `44 + 2 * len` bytes.
pub fn encode_wav(format: &WavFormat, samples: &[i16]) -> io::Result<Vec<u8>> {
    let pcm = pcm16_bytes(samples);
    let mut buffer = Vec::with_capacity(HEADER_LEN + pcm.len());
    write_wav(&mut buffer, format, &pcm)?;
    Ok(buffer)
}

/// Writes a WAV file to `path` without exposing a partially written file.
///
/// The bytes go to a temporary file in the destination directory, which is
/// then renamed over `path`. On failure the previous contents of `path`, if
/// any, are left as they were.
pub fn write_wav_file(path: &Path, format: &WavFormat, samples: &[i16]) -> SynthResult<usize> {
    let bytes = encode_wav(format, samples)?;

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
    tmp.write_all(&bytes)?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| e.error)?;

    Ok(bytes.len())
}
