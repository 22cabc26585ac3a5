//! Inspect command implementation
//!
//! Decodes a WAV file and reports its format and PCM hash.

use anyhow::{Context, Result};
use colored::Colorize;
use pluckgen_synth::wav::{pcm_hash, read_wav_file};
use serde::Serialize;
use std::path::Path;
use std::process::ExitCode;

#[derive(Debug, Serialize)]
struct InspectOutput {
    channels: u16,
    sample_rate: u32,
    bits_per_sample: u16,
    num_frames: usize,
    duration_seconds: f64,
    peak: i32,
    pcm_hash: String,
}

/// Run the inspect command
pub fn run(path: &Path, json_output: bool) -> Result<ExitCode> {
    let decoded = read_wav_file(path)
        .with_context(|| format!("Failed to decode WAV file: {}", path.display()))?;

    let output = InspectOutput {
        channels: decoded.format.channels,
        sample_rate: decoded.format.sample_rate,
        bits_per_sample: decoded.format.bits_per_sample,
        num_frames: decoded.num_frames(),
        duration_seconds: decoded.duration_seconds(),
        peak: decoded
            .samples
            .iter()
            .map(|&s| (s as i32).abs())
            .max()
            .unwrap_or(0),
        pcm_hash: pcm_hash(&decoded.samples),
    };

    if json_output {
        let json = serde_json::to_string_pretty(&output).context("Failed to serialize output")?;
        println!("{}", json);
    } else {
        println!("{} {}", "File:".cyan().bold(), path.display());
        println!(
            "  {} ch, {} Hz, {}-bit PCM",
            output.channels, output.sample_rate, output.bits_per_sample
        );
        println!(
            "  {} frames ({:.3} s), peak {}",
            output.num_frames, output.duration_seconds, output.peak
        );
        println!("  {} {}", "PCM hash:".dimmed(), output.pcm_hash);
    }

    Ok(ExitCode::SUCCESS)
}
