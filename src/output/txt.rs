//! Plain-text output: one result per line, fields joined by `" | "`.

use std::io;

use crate::scan::ScanResult;

/// Pipe-delimited text formatter.
pub struct TxtOutput<'a> {
    results: &'a [ScanResult],
}

impl<'a> TxtOutput<'a> {
    /// Create a text formatter over the given results.
    #[must_use]
    pub fn new(results: &'a [ScanResult]) -> Self {
        Self { results }
    }

    /// Write one line per result to `writer`.
    ///
    /// # Errors
    ///
    /// Returns any I/O error from the writer.
    pub fn write_to<W: io::Write>(&self, mut writer: W) -> io::Result<()> {
        for r in self.results {
            writeln!(
                writer,
                "{} | {} | {} | {} | {}",
                r.path.display(),
                r.format,
                r.language,
                r.codec,
                r.profile
            )?;
        }
        Ok(())
    }

    /// Render the output as a string.
    #[must_use]
    pub fn to_string(&self) -> String {
        let mut buffer = Vec::new();
        // Writing to a Vec cannot fail.
        self.write_to(&mut buffer).expect("write to Vec");
        String::from_utf8_lossy(&buffer).into_owned()
    }
}
