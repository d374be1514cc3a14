//! atmoscan - Spatial Audio Scanner
//!
//! Finds video files containing object-based spatial audio (Dolby Atmos,
//! DTS:X) by probing their audio streams with ffprobe, caching results
//! keyed on file identity (size + mtime), and exporting the findings as a
//! table, pipe-delimited text, or CSV.

pub mod cache;
pub mod classify;
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod output;
pub mod probe;
pub mod progress;
pub mod scan;
pub mod scanner;
pub mod signature;

use std::fs::File;
use std::io;
use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;

use anyhow::{Context, Result};

use crate::cli::{Cli, OutputFormat};
use crate::config::Config;
use crate::error::ExitCode;
use crate::output::{filter_by_language, CsvOutput, TableOutput, TxtOutput};
use crate::probe::FfprobeAdapter;
use crate::progress::{ChannelProgress, TerminalProgress};
use crate::scan::{ScanOutcome, ScanResult, Scanner};

/// Run the CLI application: scan, filter, export, and map the outcome to
/// an exit code.
///
/// The scan runs on a worker thread while this thread consumes progress
/// events and drives the terminal progress bar, so the display stays
/// responsive during long ffprobe calls.
///
/// # Errors
///
/// Returns an error for failures outside the scan itself (the output file
/// cannot be written, the scan thread panicked). Per-file scan failures
/// are handled inside the pipeline and never surface here.
pub fn run_app(cli: Cli) -> Result<ExitCode> {
    logging::init_logging(cli.verbose, cli.quiet);
    let config = Config::load();

    let ffprobe = cli
        .ffprobe
        .or(config.ffprobe_path)
        .unwrap_or_else(|| PathBuf::from("ffprobe"));
    let cache_path = cli
        .cache
        .or(config.cache_path)
        .unwrap_or_else(Config::default_cache_path);
    log::debug!(
        "using ffprobe at {}, cache at {}",
        ffprobe.display(),
        cache_path.display()
    );

    let outcome = run_scan(
        Scanner::new(FfprobeAdapter::new(ffprobe), cache_path),
        cli.folders.clone(),
        cli.quiet,
    )?;

    if outcome.cache_error.is_some() {
        eprintln!("warning: results are complete, but the scan cache could not be saved");
    }

    let results = filter_by_language(&outcome.results, &cli.language);
    write_results(&results, cli.output, cli.out.as_deref())?;

    if !cli.quiet {
        eprintln!(
            "Done — {} track(s) in {} file(s) scanned",
            results.len(),
            outcome.stats.files_total
        );
    }

    Ok(if results.is_empty() {
        ExitCode::NoTracksFound
    } else {
        ExitCode::Success
    })
}

/// Run the scan on a worker thread, relaying progress events to the
/// terminal over a channel.
fn run_scan(
    scanner: Scanner<FfprobeAdapter>,
    folders: Vec<PathBuf>,
    quiet: bool,
) -> Result<ScanOutcome> {
    let (sender, receiver) = mpsc::channel();

    let worker = thread::spawn(move || {
        let progress = ChannelProgress::new(sender);
        scanner.scan(&folders, &progress)
    });

    // The channel closes when the scan drops its sender, ending this loop.
    let display = TerminalProgress::new(quiet);
    for event in receiver {
        display.update(event);
    }
    display.finish();

    worker
        .join()
        .map_err(|_| anyhow::anyhow!("scan worker panicked"))
}

/// Serialize `results` in the requested format to stdout or a file.
fn write_results(
    results: &[ScanResult],
    format: OutputFormat,
    out: Option<&std::path::Path>,
) -> Result<()> {
    let mut writer: Box<dyn io::Write> = match out {
        Some(path) => Box::new(
            File::create(path)
                .with_context(|| format!("failed to create output file {}", path.display()))?,
        ),
        None => Box::new(io::stdout().lock()),
    };

    match format {
        OutputFormat::Table => TableOutput::new(results)
            .write_to(&mut writer)
            .context("failed to write results")?,
        OutputFormat::Txt => TxtOutput::new(results)
            .write_to(&mut writer)
            .context("failed to write results")?,
        OutputFormat::Csv => CsvOutput::new(results)
            .write_to(&mut writer)
            .context("failed to write results")?,
    }
    Ok(())
}
