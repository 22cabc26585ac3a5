//! Notes command implementation
//!
//! Lists the catalog with the period each note gets at a sample rate.

use anyhow::{Context, Result};
use colored::Colorize;
use serde::Serialize;
use std::process::ExitCode;

use crate::catalog::NoteCatalog;

#[derive(Debug, Serialize)]
struct NoteRow<'a> {
    name: &'a str,
    frequency_hz: f64,
    period: Option<usize>,
    effective_hz: Option<f64>,
}

/// Run the notes command
pub fn run(catalog: &NoteCatalog, sample_rate: u32, json_output: bool) -> Result<ExitCode> {
    let rows: Vec<NoteRow<'_>> = catalog
        .notes()
        .iter()
        .map(|note| {
            let period = note.period(sample_rate).ok();
            NoteRow {
                name: &note.name,
                frequency_hz: note.frequency_hz,
                period,
                effective_hz: period.map(|n| sample_rate as f64 / n as f64),
            }
        })
        .collect();

    if json_output {
        let json = serde_json::to_string_pretty(&rows).context("Failed to serialize notes")?;
        println!("{}", json);
        return Ok(ExitCode::SUCCESS);
    }

    println!("{} {} Hz", "Sample rate:".cyan().bold(), sample_rate);
    for row in &rows {
        match (row.period, row.effective_hz) {
            (Some(period), Some(effective)) => println!(
                "  {:<4} {:>8.2} Hz  N={:<5} {}",
                row.name,
                row.frequency_hz,
                period,
                format!("plays {:.2} Hz", effective).dimmed()
            ),
            _ => println!(
                "  {:<4} {:>8.2} Hz  {}",
                row.name,
                row.frequency_hz,
                "unplayable at this rate".red()
            ),
        }
    }

    Ok(ExitCode::SUCCESS)
}
