//! Generate command implementation
//!
//! Renders every catalog note that does not already have a file.

use anyhow::{Context, Result};
use colored::Colorize;
use std::process::ExitCode;
use std::time::Instant;

use crate::catalog::{CatalogReport, NoteCatalog, NoteOutcome};
use crate::config::GenerateConfig;

/// Run the generate command
///
/// # Returns
/// Exit code: 0 success, 2 if any note failed
pub fn run(config: &GenerateConfig, json_output: bool) -> Result<ExitCode> {
    config.validate().context("Invalid generation settings")?;

    let start = Instant::now();
    let catalog = NoteCatalog::from_config(config);

    if !json_output {
        println!("{} {}", "Output dir:".cyan().bold(), config.output_dir.display());
        match config.seed {
            Some(seed) => println!("{} {}", "Seed:".dimmed(), seed),
            None => println!("{} {}", "Seed:".dimmed(), "entropy".dimmed()),
        }
        if config.force {
            println!("{} {}", "Force:".cyan().bold(), "enabled".green());
        }
    }

    let report = catalog
        .generate(config)
        .context("Failed to generate note catalog")?;

    if json_output {
        let json = serde_json::to_string_pretty(&report).context("Failed to serialize report")?;
        println!("{}", json);
    } else {
        print_report(&report);
        println!(
            "\n{} {} generated, {} skipped, {} failed ({:.2?})",
            "Done:".cyan().bold(),
            report.generated_count(),
            report.skipped_count(),
            report.failed_count(),
            start.elapsed()
        );
    }

    Ok(exit_code(&report))
}

fn exit_code(report: &CatalogReport) -> ExitCode {
    if report.has_failures() {
        ExitCode::from(2)
    } else {
        ExitCode::SUCCESS
    }
}

fn print_report(report: &CatalogReport) {
    for entry in &report.entries {
        let path = entry.path.display();
        match &entry.outcome {
            NoteOutcome::Generated { pcm_hash, .. } => println!(
                "  {} {:<4} {} {}",
                "+".green(),
                entry.name,
                path,
                pcm_hash[..16].dimmed()
            ),
            NoteOutcome::Skipped => println!(
                "  {} {:<4} {} {}",
                "=".dimmed(),
                entry.name,
                path,
                "(already created)".dimmed()
            ),
            NoteOutcome::Failed { code, message } => println!(
                "  {} {:<4} {} [{}] {}",
                "x".red(),
                entry.name,
                path,
                code,
                message.red()
            ),
        }
    }
}
