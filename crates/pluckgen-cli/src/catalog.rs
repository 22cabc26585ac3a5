//! The note catalog: which tones exist and how they get onto disk.
//!
//! Each note is rendered to `<output_dir>/<name>.wav`. A file that is already
//! present counts as generated, and its note is skipped unless the run forces
//! regeneration. No checksum is consulted; presence alone is the cache key.

use pluckgen_synth::rng::{create_note_rng, entropy_rng};
use pluckgen_synth::synthesis::{delay_length, num_samples_for};
use pluckgen_synth::{generate, quantize_all, SynthError, SynthResult, WavWriter};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::config::GenerateConfig;

/// A named target pitch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Note {
    /// Name used as the file stem.
    pub name: String,
    /// Target frequency in Hz.
    pub frequency_hz: f64,
}

impl Note {
    /// Creates a note from a name and a frequency in Hz.
    pub fn new(name: impl Into<String>, frequency_hz: f64) -> Self {
        Self {
            name: name.into(),
            frequency_hz,
        }
    }

    /// Delay line length for this note at `sample_rate`.
    pub fn period(&self, sample_rate: u32) -> SynthResult<usize> {
        delay_length(self.frequency_hz, sample_rate)
    }
}

/// C4 Eb F G Bb, in playing order.
pub const PENTATONIC_MINOR: [(&str, f64); 5] = [
    ("C4", 262.0),
    ("Eb", 311.0),
    ("F", 349.0),
    ("G", 391.0),
    ("Bb", 466.0),
];

/// Turns a note into 16-bit samples.
///
/// The catalog owns the caching and persistence; implementations only
/// synthesize.
pub trait ToneRenderer {
    fn render(
        &mut self,
        note: &Note,
        sample_rate: u32,
        num_samples: usize,
    ) -> SynthResult<Vec<i16>>;
}

/// Karplus-Strong renderer.
///
/// With a seed every note draws from its own derived stream, so output does
/// not depend on which other notes were rendered in the same run.
#[derive(Debug, Clone, Copy, Default)]
pub struct KarplusRenderer {
    seed: Option<u32>,
}

impl KarplusRenderer {
    /// Creates a renderer; `None` seeds each note from OS entropy.
    pub fn new(seed: Option<u32>) -> Self {
        Self { seed }
    }
}

impl ToneRenderer for KarplusRenderer {
    fn render(
        &mut self,
        note: &Note,
        sample_rate: u32,
        num_samples: usize,
    ) -> SynthResult<Vec<i16>> {
        let waveform = match self.seed {
            Some(seed) => generate(
                note.frequency_hz,
                sample_rate,
                num_samples,
                &mut create_note_rng(seed, &note.name),
            )?,
            None => generate(note.frequency_hz, sample_rate, num_samples, &mut entropy_rng())?,
        };
        Ok(quantize_all(&waveform))
    }
}

/// What happened to one note.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum NoteOutcome {
    /// A new file was written.
    Generated {
        /// BLAKE3 hash of the PCM payload.
        pcm_hash: String,
        /// Sample frames written.
        num_frames: usize,
    },
    /// The file already existed.
    Skipped,
    /// Synthesis or the write failed; any earlier file is untouched.
    Failed {
        /// Stable error code.
        code: String,
        /// Human-readable message.
        message: String,
    },
}

impl NoteOutcome {
    fn failed(err: &SynthError) -> Self {
        Self::Failed {
            code: err.code().to_string(),
            message: err.to_string(),
        }
    }
}

/// Per-note entry of a [`CatalogReport`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NoteReport {
    pub name: String,
    pub frequency_hz: f64,
    pub path: PathBuf,
    #[serde(flatten)]
    pub outcome: NoteOutcome,
}

/// Results of a catalog run, in catalog order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CatalogReport {
    pub entries: Vec<NoteReport>,
}

impl CatalogReport {
    /// Ordered `name -> path` pairs for every note with a file on disk.
    pub fn paths(&self) -> Vec<(&str, &Path)> {
        self.entries
            .iter()
            .filter(|entry| !matches!(entry.outcome, NoteOutcome::Failed { .. }))
            .map(|entry| (entry.name.as_str(), entry.path.as_path()))
            .collect()
    }

    pub fn generated_count(&self) -> usize {
        self.count(|outcome| matches!(outcome, NoteOutcome::Generated { .. }))
    }

    pub fn skipped_count(&self) -> usize {
        self.count(|outcome| matches!(outcome, NoteOutcome::Skipped))
    }

    pub fn failed_count(&self) -> usize {
        self.count(|outcome| matches!(outcome, NoteOutcome::Failed { .. }))
    }

    pub fn has_failures(&self) -> bool {
        self.failed_count() > 0
    }

    fn count(&self, pred: impl Fn(&NoteOutcome) -> bool) -> usize {
        self.entries.iter().filter(|entry| pred(&entry.outcome)).count()
    }
}

/// An ordered table of notes.
#[derive(Debug, Clone, PartialEq)]
pub struct NoteCatalog {
    notes: Vec<Note>,
}

impl Default for NoteCatalog {
    fn default() -> Self {
        Self::pentatonic_minor()
    }
}

impl NoteCatalog {
    /// Creates a catalog that renders `notes` in the given order.
    pub fn new(notes: Vec<Note>) -> Self {
        Self { notes }
    }

    /// The five-note pentatonic minor table.
    pub fn pentatonic_minor() -> Self {
        Self::new(
            PENTATONIC_MINOR
                .iter()
                .map(|&(name, freq)| Note::new(name, freq))
                .collect(),
        )
    }

    /// The catalog a config asks for.
    pub fn from_config(config: &GenerateConfig) -> Self {
        match &config.notes {
            Some(notes) => Self::new(notes.clone()),
            None => Self::pentatonic_minor(),
        }
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    /// Where `note` lives under `output_dir`.
    pub fn file_path(output_dir: &Path, note: &Note) -> PathBuf {
        output_dir.join(format!("{}.wav", note.name))
    }

    /// Renders every note with Karplus-Strong synthesis.
    pub fn generate(&self, config: &GenerateConfig) -> SynthResult<CatalogReport> {
        self.generate_with(config, &mut KarplusRenderer::new(config.seed))
    }

    /// Renders every note in order with `renderer`.
    ///
    /// # Errors
    /// Only a config that cannot describe any note (zero sample rate or bad
    /// duration) fails the whole run. Per-note failures are recorded in the
    /// report and the remaining notes are still attempted.
    pub fn generate_with<R: ToneRenderer>(
        &self,
        config: &GenerateConfig,
        renderer: &mut R,
    ) -> SynthResult<CatalogReport> {
        let num_samples = num_samples_for(config.duration_seconds, config.sample_rate)?;
        let writer = WavWriter::mono(config.sample_rate);

        let mut report = CatalogReport::default();
        for note in &self.notes {
            let path = Self::file_path(&config.output_dir, note);

            let outcome = if !config.force && path.exists() {
                info!(note = %note.name, path = %path.display(), "already created, skipping");
                NoteOutcome::Skipped
            } else {
                info!(note = %note.name, path = %path.display(), "creating");
                let rendered = Self::render_note(
                    renderer,
                    &writer,
                    note,
                    &path,
                    config.sample_rate,
                    num_samples,
                );
                match rendered {
                    Ok(outcome) => outcome,
                    Err(err) => {
                        warn!(
                            note = %note.name,
                            code = err.code(),
                            error = %err,
                            "note generation failed"
                        );
                        NoteOutcome::failed(&err)
                    }
                }
            };

            report.entries.push(NoteReport {
                name: note.name.clone(),
                frequency_hz: note.frequency_hz,
                path,
                outcome,
            });
        }

        Ok(report)
    }

    fn render_note<R: ToneRenderer>(
        renderer: &mut R,
        writer: &WavWriter,
        note: &Note,
        path: &Path,
        sample_rate: u32,
        num_samples: usize,
    ) -> SynthResult<NoteOutcome> {
        let samples = renderer.render(note, sample_rate, num_samples)?;
        let written = writer.write_file(path, &samples)?;
        debug!(
            note = %note.name,
            bytes = written.bytes_written,
            pcm_hash = %written.pcm_hash,
            "wrote file"
        );
        Ok(NoteOutcome::Generated {
            pcm_hash: written.pcm_hash,
            num_frames: written.num_frames,
        })
    }
}
