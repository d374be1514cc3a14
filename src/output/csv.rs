//! CSV output formatter for scan results.
//!
//! One row per detected track, with the header
//! `File, Format, Language, Codec, Profile`.

use std::io;

use serde::Serialize;
use thiserror::Error;

use crate::scan::ScanResult;

/// Errors that can occur during CSV output generation.
#[derive(Debug, Error)]
pub enum CsvOutputError {
    /// I/O error during writing.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Error during CSV serialization.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// A single row in the CSV output.
#[derive(Debug, Serialize)]
struct CsvRow<'a> {
    #[serde(rename = "File")]
    file: String,
    #[serde(rename = "Format")]
    format: String,
    #[serde(rename = "Language")]
    language: &'a str,
    #[serde(rename = "Codec")]
    codec: &'a str,
    #[serde(rename = "Profile")]
    profile: &'a str,
}

/// CSV output formatter.
pub struct CsvOutput<'a> {
    results: &'a [ScanResult],
}

impl<'a> CsvOutput<'a> {
    /// Create a CSV formatter over the given results.
    #[must_use]
    pub fn new(results: &'a [ScanResult]) -> Self {
        Self { results }
    }

    /// Write the CSV output to the given writer.
    ///
    /// # Errors
    ///
    /// Returns `CsvOutputError` if writing or serialization fails.
    pub fn write_to<W: io::Write>(&self, writer: W) -> Result<(), CsvOutputError> {
        let mut csv_writer = csv::Writer::from_writer(writer);

        for r in self.results {
            csv_writer.serialize(CsvRow {
                file: r.path.to_string_lossy().into_owned(),
                format: r.format.to_string(),
                language: &r.language,
                codec: &r.codec,
                profile: &r.profile,
            })?;
        }

        csv_writer.flush()?;
        Ok(())
    }

    /// Generate CSV output as a string.
    ///
    /// # Errors
    ///
    /// Returns `CsvOutputError` if serialization fails.
    pub fn to_string(&self) -> Result<String, CsvOutputError> {
        let mut buffer = Vec::new();
        self.write_to(&mut buffer)?;
        Ok(String::from_utf8_lossy(&buffer).into_owned())
    }
}
