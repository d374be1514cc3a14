//! Command-line interface definitions.
//!
//! # Example
//!
//! ```bash
//! # Scan a library and print a table of detected tracks
//! atmoscan ~/Movies
//!
//! # Scan several folders, export CSV for a spreadsheet
//! atmoscan ~/Movies /mnt/nas/tv --output csv --out tracks.csv
//!
//! # Only English tracks, with a custom ffprobe build
//! atmoscan ~/Movies --language eng --ffprobe /opt/ffmpeg/bin/ffprobe
//! ```

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Find Dolby Atmos and DTS:X audio tracks in video libraries.
///
/// atmoscan walks the given folders, probes every video file's audio
/// streams with ffprobe, and reports tracks carrying object-based spatial
/// audio. Results are cached per file (size + mtime), so unchanged files
/// are not probed again on later runs.
#[derive(Debug, Parser)]
#[command(name = "atmoscan")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Folders to scan recursively for video files
    #[arg(value_name = "FOLDER", required = true)]
    pub folders: Vec<PathBuf>,

    /// Output format for the results
    #[arg(short, long, value_enum, default_value = "table")]
    pub output: OutputFormat,

    /// Write results to this file instead of stdout
    #[arg(long, value_name = "PATH")]
    pub out: Option<PathBuf>,

    /// Only show tracks whose language tag equals this value
    /// (case-insensitive); empty shows everything
    #[arg(short, long, value_name = "LANG", default_value = "")]
    pub language: String,

    /// Path to the scan cache file
    ///
    /// If not specified, a platform-specific default is used.
    #[arg(long, value_name = "PATH")]
    pub cache: Option<PathBuf>,

    /// ffprobe executable to invoke
    #[arg(long, value_name = "PATH", env = "ATMOSCAN_FFPROBE")]
    pub ffprobe: Option<PathBuf>,

    /// Increase verbosity level (-v for info, -vv for debug, -vvv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress output and all logging except errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

/// Available result presentations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Aligned columns for reading in the terminal
    Table,
    /// One pipe-delimited line per track
    Txt,
    /// CSV with a header row, for spreadsheets
    Csv,
}
