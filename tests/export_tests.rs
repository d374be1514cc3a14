//! Export and filtering behavior on results produced by a real scan pass.

use std::fs::File;
use std::path::Path;

use tempfile::TempDir;

use atmoscan::output::{filter_by_language, CsvOutput, TxtOutput};
use atmoscan::probe::{Prober, RawStream};
use atmoscan::progress::NoopProgress;
use atmoscan::scan::Scanner;

/// Prober with one Atmos track per language, keyed by file name prefix.
struct PerLanguageProber;

impl Prober for PerLanguageProber {
    fn probe(&self, path: &Path) -> Vec<RawStream> {
        let language = path
            .file_stem()
            .unwrap()
            .to_string_lossy()
            .split('-')
            .next()
            .unwrap()
            .to_string();
        vec![RawStream {
            codec: "truehd".to_string(),
            profile: "dolby truehd atmos".to_string(),
            language,
        }]
    }
}

fn scan_fixture() -> (TempDir, Vec<atmoscan::scan::ScanResult>) {
    let folder = TempDir::new().unwrap();
    for name in ["eng-movie.mkv", "fra-film.mkv", "eng-show.mp4"] {
        File::create(folder.path().join(name)).unwrap();
    }
    let cache_dir = TempDir::new().unwrap();
    let scanner = Scanner::new(PerLanguageProber, cache_dir.path().join("cache.json"));
    let outcome = scanner.scan(&[folder.path().to_path_buf()], &NoopProgress);
    (folder, outcome.results)
}

#[test]
fn test_language_filter_on_scan_results() {
    let (_folder, results) = scan_fixture();
    assert_eq!(results.len(), 3);

    let eng = filter_by_language(&results, "ENG");
    assert_eq!(eng.len(), 2);
    assert!(eng.iter().all(|r| r.language == "eng"));

    let all = filter_by_language(&results, "");
    assert_eq!(all.len(), 3);

    let none = filter_by_language(&results, "jpn");
    assert!(none.is_empty());
}

#[test]
fn test_txt_export_shape() {
    let (_folder, results) = scan_fixture();
    let text = TxtOutput::new(&results).to_string();

    assert_eq!(text.lines().count(), 3);
    for line in text.lines() {
        let fields: Vec<&str> = line.split(" | ").collect();
        assert_eq!(fields.len(), 5);
        assert_eq!(fields[1], "Dolby Atmos");
        assert_eq!(fields[3], "truehd");
    }
}

#[test]
fn test_csv_export_header_and_row_count() {
    let (_folder, results) = scan_fixture();
    let csv_str = CsvOutput::new(&results).to_string().unwrap();
    let mut lines = csv_str.lines();

    assert_eq!(lines.next(), Some("File,Format,Language,Codec,Profile"));
    assert_eq!(lines.count(), 3);
}
