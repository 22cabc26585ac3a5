//! End-to-end tests for catalog generation against a real filesystem.

use pluckgen_cli::{
    GenerateConfig, KarplusRenderer, Note, NoteCatalog, NoteOutcome, ToneRenderer,
};
use pluckgen_synth::wav::{pcm_hash, read_wav_file};
use pluckgen_synth::{SynthResult, WavFormat};
use pretty_assertions::assert_eq;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Counts render calls while delegating to the real synthesizer.
struct CountingRenderer {
    inner: KarplusRenderer,
    calls: Vec<String>,
}

impl CountingRenderer {
    fn new(seed: u32) -> Self {
        Self {
            inner: KarplusRenderer::new(Some(seed)),
            calls: Vec::new(),
        }
    }
}

impl ToneRenderer for CountingRenderer {
    fn render(
        &mut self,
        note: &Note,
        sample_rate: u32,
        num_samples: usize,
    ) -> SynthResult<Vec<i16>> {
        self.calls.push(note.name.clone());
        self.inner.render(note, sample_rate, num_samples)
    }
}

fn seeded_config(dir: &Path, seed: u32) -> GenerateConfig {
    GenerateConfig {
        output_dir: dir.to_path_buf(),
        seed: Some(seed),
        ..GenerateConfig::default()
    }
}

fn file_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

#[test]
fn test_generates_every_note_in_order() {
    let dir = TempDir::new().unwrap();
    let config = seeded_config(dir.path(), 42);

    let report = NoteCatalog::pentatonic_minor().generate(&config).unwrap();

    let names: Vec<&str> = report.entries.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, vec!["C4", "Eb", "F", "G", "Bb"]);
    assert_eq!(report.generated_count(), 5);
    assert!(!report.has_failures());
    assert_eq!(
        file_names(dir.path()),
        vec!["Bb.wav", "C4.wav", "Eb.wav", "F.wav", "G.wav"]
    );

    for entry in &report.entries {
        let decoded = read_wav_file(&entry.path).unwrap();
        assert_eq!(decoded.format, WavFormat::mono(44100));
        assert_eq!(decoded.samples.len(), 44100);
        assert_eq!(fs::metadata(&entry.path).unwrap().len(), 44 + 88200);

        match &entry.outcome {
            NoteOutcome::Generated {
                pcm_hash: hash,
                num_frames,
            } => {
                assert_eq!(*num_frames, 44100);
                assert_eq!(hash, &pcm_hash(&decoded.samples));
            }
            other => panic!("{} was not generated: {:?}", entry.name, other),
        }
    }
}

#[test]
fn test_paths_mapping_follows_catalog_order() {
    let dir = TempDir::new().unwrap();
    let report = NoteCatalog::pentatonic_minor()
        .generate(&seeded_config(dir.path(), 1))
        .unwrap();

    let paths = report.paths();
    assert_eq!(paths.len(), 5);
    assert_eq!(paths[0].0, "C4");
    assert_eq!(paths[0].1, dir.path().join("C4.wav"));
    assert_eq!(paths[4].0, "Bb");
}

#[test]
fn test_existing_files_are_cache_hits() {
    let dir = TempDir::new().unwrap();
    let config = seeded_config(dir.path(), 42);
    let catalog = NoteCatalog::pentatonic_minor();

    let mut first = CountingRenderer::new(42);
    catalog.generate_with(&config, &mut first).unwrap();
    assert_eq!(first.calls.len(), 5);

    let mut second = CountingRenderer::new(42);
    let report = catalog.generate_with(&config, &mut second).unwrap();

    assert!(second.calls.is_empty());
    assert_eq!(report.skipped_count(), 5);
    assert_eq!(report.paths().len(), 5);
}

#[test]
fn test_presence_alone_is_the_cache_key() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("F.wav"), b"not really a wav").unwrap();

    let mut renderer = CountingRenderer::new(3);
    let report = NoteCatalog::pentatonic_minor()
        .generate_with(&seeded_config(dir.path(), 3), &mut renderer)
        .unwrap();

    assert_eq!(renderer.calls, vec!["C4", "Eb", "G", "Bb"]);
    assert_eq!(report.entries[2].outcome, NoteOutcome::Skipped);
    assert_eq!(fs::read(dir.path().join("F.wav")).unwrap(), b"not really a wav");
}

#[test]
fn test_force_regenerates() {
    let dir = TempDir::new().unwrap();
    let mut config = seeded_config(dir.path(), 42);
    let catalog = NoteCatalog::pentatonic_minor();
    catalog.generate(&config).unwrap();

    config.force = true;
    let mut renderer = CountingRenderer::new(42);
    let report = catalog.generate_with(&config, &mut renderer).unwrap();

    assert_eq!(renderer.calls.len(), 5);
    assert_eq!(report.generated_count(), 5);
}

#[test]
fn test_seeded_runs_are_byte_identical() {
    let a = TempDir::new().unwrap();
    let b = TempDir::new().unwrap();
    let catalog = NoteCatalog::pentatonic_minor();

    catalog.generate(&seeded_config(a.path(), 42)).unwrap();
    catalog.generate(&seeded_config(b.path(), 42)).unwrap();

    for name in file_names(a.path()) {
        let left = fs::read(a.path().join(&name)).unwrap();
        let right = fs::read(b.path().join(&name)).unwrap();
        assert!(left == right, "{} differs between runs", name);
    }
}

#[test]
fn test_invalid_frequency_does_not_stop_the_run() {
    let dir = TempDir::new().unwrap();
    let catalog = NoteCatalog::new(vec![
        Note::new("Low", 220.0),
        Note::new("Silent", 0.0),
        Note::new("TooHigh", 30000.0),
        Note::new("High", 880.0),
    ]);

    let report = catalog.generate(&seeded_config(dir.path(), 5)).unwrap();

    assert_eq!(report.generated_count(), 2);
    assert_eq!(report.failed_count(), 2);
    for entry in &report.entries[1..3] {
        match &entry.outcome {
            NoteOutcome::Failed { code, .. } => assert_eq!(code, "SYNTH_001"),
            other => panic!("expected failure for {}, got {:?}", entry.name, other),
        }
        assert!(!entry.path.exists());
    }

    let names: Vec<&str> = report.paths().into_iter().map(|(name, _)| name).collect();
    assert_eq!(names, vec!["Low", "High"]);
}

#[test]
fn test_write_failure_is_isolated() {
    let dir = TempDir::new().unwrap();
    // A non-empty directory where Eb.wav should go blocks the final rename.
    let blocked = dir.path().join("Eb.wav");
    fs::create_dir(&blocked).unwrap();
    fs::write(blocked.join("keep"), b"x").unwrap();

    let config = GenerateConfig {
        force: true,
        ..seeded_config(dir.path(), 8)
    };
    let report = NoteCatalog::pentatonic_minor().generate(&config).unwrap();

    assert_eq!(report.generated_count(), 4);
    match &report.entries[1].outcome {
        NoteOutcome::Failed { code, .. } => assert_eq!(code, "SYNTH_005"),
        other => panic!("expected I/O failure, got {:?}", other),
    }
    assert!(blocked.join("keep").exists());
    assert!(dir.path().join("G.wav").exists());
}

#[test]
fn test_missing_output_dir_fails_every_note() {
    let dir = TempDir::new().unwrap();
    let config = seeded_config(&dir.path().join("absent"), 2);

    let report = NoteCatalog::pentatonic_minor().generate(&config).unwrap();

    assert_eq!(report.failed_count(), 5);
    assert!(report.paths().is_empty());
}

#[test]
fn test_invalid_duration_fails_whole_run() {
    let dir = TempDir::new().unwrap();
    let config = GenerateConfig {
        duration_seconds: 0.0,
        ..seeded_config(dir.path(), 2)
    };

    assert!(NoteCatalog::pentatonic_minor().generate(&config).is_err());
    assert!(file_names(dir.path()).is_empty());
}

#[test]
fn test_custom_duration_and_rate() {
    let dir = TempDir::new().unwrap();
    let config = GenerateConfig {
        sample_rate: 22050,
        duration_seconds: 0.5,
        ..seeded_config(dir.path(), 11)
    };

    let report = NoteCatalog::pentatonic_minor().generate(&config).unwrap();
    let decoded = read_wav_file(&report.entries[0].path).unwrap();

    assert_eq!(decoded.format.sample_rate, 22050);
    assert_eq!(decoded.samples.len(), 11025);
}

#[test]
fn test_unencodable_sample_rate_fails_the_note() {
    let dir = TempDir::new().unwrap();
    let config = GenerateConfig {
        sample_rate: 3_000_000_000,
        duration_seconds: 1e-6,
        ..seeded_config(dir.path(), 4)
    };
    assert!(config.validate().is_err());

    let catalog = NoteCatalog::new(vec![Note::new("A", 1_000_000.0)]);
    let report = catalog.generate(&config).unwrap();

    match &report.entries[0].outcome {
        NoteOutcome::Failed { code, .. } => assert_eq!(code, "SYNTH_005"),
        other => panic!("expected I/O failure, got {:?}", other),
    }
    assert!(file_names(dir.path()).is_empty());
}
