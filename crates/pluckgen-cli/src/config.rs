//! Generation settings.
//!
//! Settings come from an optional JSON file and are then overridden by
//! command-line flags. The resulting [`GenerateConfig`] is passed explicitly
//! to the catalog; nothing here is process-wide.

use anyhow::{bail, Context, Result};
use pluckgen_synth::{DEFAULT_DURATION_SECONDS, SAMPLE_RATE};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::catalog::Note;

/// Highest rate whose byte rate (two bytes per frame) fits the WAV header.
pub const MAX_SAMPLE_RATE: u32 = u32::MAX / 2;

/// Settings for one catalog generation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GenerateConfig {
    /// Directory that receives `<note>.wav` files.
    pub output_dir: PathBuf,
    /// Output sample rate in Hz.
    pub sample_rate: u32,
    /// Length of each note in seconds.
    pub duration_seconds: f64,
    /// Base seed; `None` draws each noise burst from OS entropy.
    pub seed: Option<u32>,
    /// Regenerate notes whose files already exist.
    pub force: bool,
    /// Replacement note table; `None` uses the pentatonic minor scale.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<Vec<Note>>,
}

impl Default for GenerateConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            sample_rate: SAMPLE_RATE,
            duration_seconds: DEFAULT_DURATION_SECONDS,
            seed: None,
            force: false,
            notes: None,
        }
    }
}

/// Command-line overrides applied on top of a loaded config.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub output_dir: Option<PathBuf>,
    pub sample_rate: Option<u32>,
    pub duration_seconds: Option<f64>,
    pub seed: Option<u32>,
    pub force: bool,
}

impl GenerateConfig {
    /// Parses a config from JSON text.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Failed to parse config JSON")
    }

    /// Loads a config file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::from_json(&text).with_context(|| format!("Invalid config file: {}", path.display()))
    }

    /// Applies command-line overrides. `force` only ever turns regeneration on.
    pub fn with_overrides(mut self, overrides: ConfigOverrides) -> Self {
        if let Some(dir) = overrides.output_dir {
            self.output_dir = dir;
        }
        if let Some(rate) = overrides.sample_rate {
            self.sample_rate = rate;
        }
        if let Some(duration) = overrides.duration_seconds {
            self.duration_seconds = duration;
        }
        if overrides.seed.is_some() {
            self.seed = overrides.seed;
        }
        self.force |= overrides.force;
        self
    }

    /// Rejects settings that cannot produce a file.
    ///
    /// Note frequencies are not checked here; an unplayable note fails on its
    /// own during generation.
    pub fn validate(&self) -> Result<()> {
        if self.sample_rate == 0 {
            bail!("sample_rate must be positive");
        }
        if self.sample_rate > MAX_SAMPLE_RATE {
            bail!(
                "sample_rate {} exceeds the 16-bit mono WAV limit of {} Hz",
                self.sample_rate,
                MAX_SAMPLE_RATE
            );
        }
        if !self.duration_seconds.is_finite() || self.duration_seconds <= 0.0 {
            bail!(
                "duration_seconds must be a positive number, got {}",
                self.duration_seconds
            );
        }
        if let Some(notes) = &self.notes {
            if notes.is_empty() {
                bail!("notes must not be empty");
            }
            for note in notes {
                validate_note_name(&note.name)?;
            }
            for (i, note) in notes.iter().enumerate() {
                if notes[..i].iter().any(|other| other.name == note.name) {
                    bail!("duplicate note name '{}'", note.name);
                }
            }
        }
        Ok(())
    }
}

/// Note names become file names, so they must be a single path component.
fn validate_note_name(name: &str) -> Result<()> {
    if name.is_empty() {
        bail!("note name must not be empty");
    }
    if name == "." || name == ".." || name.contains(['/', '\\']) || name.contains('\0') {
        bail!("note name '{}' is not a valid file name", name);
    }
    Ok(())
}
