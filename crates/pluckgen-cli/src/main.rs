//! pluckgen - Karplus-Strong note catalog generator
//!
//! Renders each note of a small catalog to `<note>.wav`, skipping notes that
//! already have a file.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use pluckgen_cli::commands;
use pluckgen_cli::{ConfigOverrides, GenerateConfig, NoteCatalog};

/// pluckgen - plucked string tones from frequencies
#[derive(Parser)]
#[command(name = "pluckgen")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Log at debug level (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render every catalog note to <note>.wav
    Generate {
        /// JSON config file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Output directory (default: current directory)
        #[arg(short, long)]
        out_dir: Option<PathBuf>,

        /// Seed for reproducible noise bursts
        #[arg(long)]
        seed: Option<u32>,

        /// Regenerate notes whose files already exist
        #[arg(short, long)]
        force: bool,

        /// Note length in seconds
        #[arg(long)]
        duration: Option<f64>,

        /// Output sample rate in Hz
        #[arg(long)]
        sample_rate: Option<u32>,

        /// Output machine-readable JSON report
        #[arg(long)]
        json: bool,
    },

    /// List catalog notes with their delay line periods
    Notes {
        /// JSON config file supplying a custom note table
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Sample rate used to compute periods
        #[arg(long, default_value_t = pluckgen_synth::SAMPLE_RATE)]
        sample_rate: u32,

        /// Output machine-readable JSON
        #[arg(long)]
        json: bool,
    },

    /// Decode a WAV file and print its format and PCM hash
    Inspect {
        /// Path to the WAV file
        file: PathBuf,

        /// Output machine-readable JSON
        #[arg(long)]
        json: bool,
    },
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(path: Option<&PathBuf>) -> anyhow::Result<GenerateConfig> {
    match path {
        Some(path) => GenerateConfig::load(path),
        None => Ok(GenerateConfig::default()),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Generate {
            config,
            out_dir,
            seed,
            force,
            duration,
            sample_rate,
            json,
        } => load_config(config.as_ref()).and_then(|loaded| {
            let config = loaded.with_overrides(ConfigOverrides {
                output_dir: out_dir,
                sample_rate,
                duration_seconds: duration,
                seed,
                force,
            });
            commands::generate::run(&config, json)
        }),
        Commands::Notes {
            config,
            sample_rate,
            json,
        } => load_config(config.as_ref()).and_then(|loaded| {
            commands::notes::run(&NoteCatalog::from_config(&loaded), sample_rate, json)
        }),
        Commands::Inspect { file, json } => commands::inspect::run(&file, json),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {:#}", colored::Colorize::red("error"), e);
            ExitCode::from(1)
        }
    }
}
