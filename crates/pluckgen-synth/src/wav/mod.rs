//! Deterministic WAV file writer.
//!
//! This module writes canonical 16-bit PCM WAV files: a 44-byte RIFF header
//! followed by little-endian samples, with no timestamps or optional chunks.
//! The BLAKE3 hash of the PCM payload identifies a tone independently of the
//! header.

mod builder;
mod format;
mod pcm;
mod result;
mod writer;


pub use builder::{WavWriter, WrittenFile};
pub use format::{WavFormat, HEADER_LEN};
pub use pcm::{compute_pcm_hash, extract_pcm_data, read_wav, read_wav_file, DecodedWav};
pub use result::WavResult;
pub use writer::{encode_wav, pcm16_bytes, pcm_hash, write_wav, write_wav_file};
