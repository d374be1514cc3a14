//! Aligned-column table for the terminal.

use std::io;

use crate::scan::ScanResult;

const HEADERS: [&str; 5] = ["File", "Format", "Language", "Codec", "Profile"];

/// Human-readable table formatter, used for the default stdout view.
pub struct TableOutput<'a> {
    results: &'a [ScanResult],
}

impl<'a> TableOutput<'a> {
    /// Create a table formatter over the given results.
    #[must_use]
    pub fn new(results: &'a [ScanResult]) -> Self {
        Self { results }
    }

    /// Write the table to `writer`. Empty results produce no output.
    ///
    /// # Errors
    ///
    /// Returns any I/O error from the writer.
    pub fn write_to<W: io::Write>(&self, mut writer: W) -> io::Result<()> {
        if self.results.is_empty() {
            return Ok(());
        }

        let rows: Vec<[String; 5]> = self
            .results
            .iter()
            .map(|r| {
                [
                    r.path.display().to_string(),
                    r.format.to_string(),
                    r.language.clone(),
                    r.codec.clone(),
                    r.profile.clone(),
                ]
            })
            .collect();

        let mut widths: [usize; 5] = HEADERS.map(str::len);
        for row in &rows {
            for (w, cell) in widths.iter_mut().zip(row) {
                *w = (*w).max(cell.chars().count());
            }
        }

        write_row(&mut writer, &HEADERS.map(String::from), &widths)?;
        write_row(
            &mut writer,
            &widths.map(|w| "-".repeat(w)),
            &widths,
        )?;
        for row in &rows {
            write_row(&mut writer, row, &widths)?;
        }
        Ok(())
    }
}

fn write_row<W: io::Write>(writer: &mut W, cells: &[String; 5], widths: &[usize; 5]) -> io::Result<()> {
    let line = cells
        .iter()
        .zip(widths.iter().copied())
        .map(|(cell, width)| format!("{:<width$}", cell))
        .collect::<Vec<_>>()
        .join("  ");
    writeln!(writer, "{}", line.trim_end())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::FormatLabel;
    use std::path::PathBuf;

    #[test]
    fn test_table_alignment() {
        let results = vec![
            ScanResult {
                path: PathBuf::from("/a.mkv"),
                format: FormatLabel::DolbyAtmos,
                language: "eng".to_string(),
                codec: "truehd".to_string(),
                profile: "dolby truehd atmos".to_string(),
            },
            ScanResult {
                path: PathBuf::from("/long/path/movie.mkv"),
                format: FormatLabel::DtsX,
                language: "fr".to_string(),
                codec: "dts".to_string(),
                profile: "dts-x".to_string(),
            },
        ];

        let mut buffer = Vec::new();
        TableOutput::new(&results).write_to(&mut buffer).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("File"));
        assert!(lines[1].starts_with("----"));
        // The format column starts at the same offset in every row.
        let offset = lines[0].find("Format").unwrap();
        assert_eq!(&lines[2][offset..offset + 11], "Dolby Atmos");
        assert_eq!(&lines[3][offset..offset + 5], "DTS:X");
    }

    #[test]
    fn test_table_empty_results_prints_nothing() {
        let mut buffer = Vec::new();
        TableOutput::new(&[]).write_to(&mut buffer).unwrap();
        assert!(buffer.is_empty());
    }
}
