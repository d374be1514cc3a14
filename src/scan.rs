//! Scan orchestration.
//!
//! Composes the walker, signature computation, cache, prober and
//! classifier into one end-to-end pass over a set of folders:
//!
//! 1. load the cache once,
//! 2. enumerate all video files across all folders into one list,
//! 3. per file: compute the signature, consult the cache, on a miss probe
//!    and classify and overwrite the cache entry,
//! 4. flatten every file's tracks into [`ScanResult`] rows,
//! 5. persist the cache once, after the full list is processed.
//!
//! Failures are per-file and never abort the batch: an unreadable file is
//! skipped (and left out of the cache), a probe failure is cached as
//! "scanned, nothing found" so it is not retried until the file changes.
//! Only a cache save failure is surfaced, and even then the computed
//! results are returned.

use std::path::PathBuf;

use crate::cache::{CacheEntry, CacheError, CacheStore};
use crate::classify::{classify, FormatLabel, TrackRecord};
use crate::probe::Prober;
use crate::progress::ProgressCallback;
use crate::scanner::Walker;
use crate::signature::FileSignature;

/// One detected spatial-audio track in one file: the flattened join of
/// file path and [`TrackRecord`]. A file with no qualifying tracks
/// contributes no rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanResult {
    /// File containing the track.
    pub path: PathBuf,
    /// Detected spatial audio family.
    pub format: FormatLabel,
    /// Language tag of the track.
    pub language: String,
    /// Codec name, lowercased.
    pub codec: String,
    /// Profile string, lowercased.
    pub profile: String,
}

impl ScanResult {
    fn from_track(path: PathBuf, track: TrackRecord) -> Self {
        Self {
            path,
            format: track.format,
            language: track.language,
            codec: track.codec,
            profile: track.profile,
        }
    }
}

/// Counters describing one scan pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanStats {
    /// Files enumerated across all folders, including duplicates.
    pub files_total: usize,
    /// Files skipped because their metadata could not be read.
    pub files_skipped: usize,
    /// Files served from the cache.
    pub cache_hits: usize,
    /// Files probed because no fresh cache entry existed.
    pub cache_misses: usize,
    /// Qualifying tracks found (cached and fresh).
    pub tracks_found: usize,
}

/// Everything a scan produces.
///
/// `results` is valid even when `cache_error` is set; only persistence
/// for the next run was lost in that case.
#[derive(Debug)]
pub struct ScanOutcome {
    /// Flattened result rows, in file enumeration order.
    pub results: Vec<ScanResult>,
    /// Counters for the pass.
    pub stats: ScanStats,
    /// Error from the final cache save, if any.
    pub cache_error: Option<CacheError>,
}

/// Scan orchestrator.
///
/// Owns the prober and the cache location; the cache itself is loaded,
/// mutated and saved within a single [`scan`](Self::scan) call, so no two
/// concurrent scans may share a cache path.
#[derive(Debug)]
pub struct Scanner<P> {
    prober: P,
    cache_path: PathBuf,
}

impl<P: Prober> Scanner<P> {
    /// Create a scanner probing with `prober` and caching at `cache_path`.
    #[must_use]
    pub fn new(prober: P, cache_path: impl Into<PathBuf>) -> Self {
        Self {
            prober,
            cache_path: cache_path.into(),
        }
    }

    /// Run one scan over `folders`.
    ///
    /// `progress` is invoked with `(processed, total)` after every file,
    /// including files that yield zero tracks or fail outright; it reaches
    /// `(total, total)` exactly once. A scan over zero files completes
    /// immediately with no invocations.
    pub fn scan(&self, folders: &[PathBuf], progress: &dyn ProgressCallback) -> ScanOutcome {
        let mut cache = CacheStore::load(&self.cache_path);
        log::debug!(
            "scanning {} folder(s), {} cached file(s)",
            folders.len(),
            cache.len()
        );

        let files: Vec<PathBuf> = Walker::new(folders.iter().cloned()).files().collect();
        let total = files.len();
        log::info!("found {} video file(s) to scan", total);

        let mut stats = ScanStats {
            files_total: total,
            ..ScanStats::default()
        };
        let mut results = Vec::new();

        for (index, file) in files.into_iter().enumerate() {
            self.scan_file(file, &mut cache, &mut stats, &mut results);
            progress.on_file_scanned(index + 1, total);
        }

        let cache_error = cache.save().err();
        if let Some(e) = &cache_error {
            log::warn!("scan results are complete but the cache was not persisted: {}", e);
        }

        log::info!(
            "scan complete: {} track(s) in {} file(s) ({} cache hit(s), {} skipped)",
            stats.tracks_found,
            stats.files_total,
            stats.cache_hits,
            stats.files_skipped
        );

        ScanOutcome {
            results,
            stats,
            cache_error,
        }
    }

    fn scan_file(
        &self,
        file: PathBuf,
        cache: &mut CacheStore,
        stats: &mut ScanStats,
        results: &mut Vec<ScanResult>,
    ) {
        let key = file.to_string_lossy().into_owned();

        let signature = match FileSignature::for_path(&file) {
            Ok(signature) => signature,
            Err(e) => {
                // Deleted mid-scan or unreadable: skip without touching
                // its cache entry.
                log::warn!("skipping {}: {}", file.display(), e);
                stats.files_skipped += 1;
                return;
            }
        };

        let tracks: Vec<TrackRecord> = match cache.lookup(&key, &signature) {
            Some(tracks) => {
                log::debug!("cache hit for {}", file.display());
                stats.cache_hits += 1;
                tracks.to_vec()
            }
            None => {
                stats.cache_misses += 1;
                let tracks: Vec<TrackRecord> = self
                    .prober
                    .probe(&file)
                    .iter()
                    .filter_map(classify)
                    .collect();
                // An empty list is cached too: "scanned, nothing found"
                // must not be re-probed until the file changes.
                cache.insert(key, CacheEntry::new(signature, tracks.clone()));
                tracks
            }
        };

        stats.tracks_found += tracks.len();
        results.extend(
            tracks
                .into_iter()
                .map(|track| ScanResult::from_track(file.clone(), track)),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::probe::RawStream;
    use crate::progress::NoopProgress;
    use std::collections::HashMap;
    use std::fs::{self, File};
    use std::path::Path;
    use std::sync::Mutex;
    use tempfile::TempDir;

    /// Prober serving canned streams keyed by file name, recording every
    /// invocation.
    #[derive(Default)]
    struct FakeProber {
        streams: HashMap<String, Vec<RawStream>>,
        calls: Mutex<Vec<PathBuf>>,
        delete_on_probe: Vec<PathBuf>,
    }

    impl FakeProber {
        fn with_streams(streams: &[(&str, Vec<RawStream>)]) -> Self {
            Self {
                streams: streams
                    .iter()
                    .map(|(name, s)| ((*name).to_string(), s.clone()))
                    .collect(),
                ..Self::default()
            }
        }

        fn call_count(&self) -> usize {
            self.calls.lock().unwrap().len()
        }
    }

    impl Prober for FakeProber {
        fn probe(&self, path: &Path) -> Vec<RawStream> {
            self.calls.lock().unwrap().push(path.to_path_buf());
            for doomed in &self.delete_on_probe {
                if doomed != path {
                    let _ = fs::remove_file(doomed);
                }
            }
            let name = path.file_name().unwrap().to_string_lossy().into_owned();
            self.streams.get(&name).cloned().unwrap_or_default()
        }
    }

    /// Progress callback recording every `(processed, total)` pair.
    #[derive(Default)]
    struct RecordingProgress {
        calls: Mutex<Vec<(usize, usize)>>,
    }

    impl ProgressCallback for RecordingProgress {
        fn on_file_scanned(&self, processed: usize, total: usize) {
            self.calls.lock().unwrap().push((processed, total));
        }
    }

    fn atmos_stream() -> RawStream {
        RawStream {
            codec: "truehd".to_string(),
            profile: "dolby truehd atmos".to_string(),
            language: "eng".to_string(),
        }
    }

    fn aac_stream() -> RawStream {
        RawStream {
            codec: "aac".to_string(),
            profile: "lc".to_string(),
            language: "eng".to_string(),
        }
    }

    fn touch(path: &Path) {
        File::create(path).unwrap();
    }

    #[test]
    fn test_scan_finds_spatial_tracks_only() {
        let media = TempDir::new().unwrap();
        let other = TempDir::new().unwrap();
        touch(&media.path().join("atmos.mkv"));
        touch(&other.path().join("plain.mkv"));

        let prober = FakeProber::with_streams(&[
            ("atmos.mkv", vec![atmos_stream()]),
            ("plain.mkv", vec![aac_stream()]),
        ]);
        let cache = TempDir::new().unwrap();
        let scanner = Scanner::new(prober, cache.path().join("cache.json"));

        let outcome = scanner.scan(
            &[media.path().to_path_buf(), other.path().to_path_buf()],
            &NoopProgress,
        );

        assert_eq!(outcome.results.len(), 1);
        let row = &outcome.results[0];
        assert_eq!(row.path.file_name().unwrap(), "atmos.mkv");
        assert_eq!(row.format, FormatLabel::DolbyAtmos);
        assert_eq!(row.codec, "truehd");
        assert_eq!(outcome.stats.files_total, 2);
        assert_eq!(outcome.stats.tracks_found, 1);
        assert!(outcome.cache_error.is_none());
    }

    #[test]
    fn test_second_scan_uses_cache() {
        let media = TempDir::new().unwrap();
        touch(&media.path().join("atmos.mkv"));
        let cache = TempDir::new().unwrap();
        let cache_path = cache.path().join("cache.json");
        let folders = [media.path().to_path_buf()];

        let first = Scanner::new(
            FakeProber::with_streams(&[("atmos.mkv", vec![atmos_stream()])]),
            &cache_path,
        );
        let first_outcome = first.scan(&folders, &NoopProgress);
        assert_eq!(first.prober.call_count(), 1);
        assert_eq!(first_outcome.stats.cache_misses, 1);

        // Fresh scanner, same cache file, unchanged file: the prober must
        // never run, and the rows must be identical.
        let second = Scanner::new(
            FakeProber::with_streams(&[("atmos.mkv", vec![atmos_stream()])]),
            &cache_path,
        );
        let second_outcome = second.scan(&folders, &NoopProgress);
        assert_eq!(second.prober.call_count(), 0);
        assert_eq!(second_outcome.stats.cache_hits, 1);
        assert_eq!(second_outcome.results, first_outcome.results);
    }

    #[test]
    fn test_changed_file_is_reprobed() {
        let media = TempDir::new().unwrap();
        let file = media.path().join("movie.mkv");
        touch(&file);
        let cache = TempDir::new().unwrap();
        let cache_path = cache.path().join("cache.json");
        let folders = [media.path().to_path_buf()];

        let first = Scanner::new(
            FakeProber::with_streams(&[("movie.mkv", vec![aac_stream()])]),
            &cache_path,
        );
        first.scan(&folders, &NoopProgress);

        // Change the file's mtime; the entry must be recomputed and the
        // new probe result (now Atmos) overwrite the old one.
        filetime::set_file_mtime(&file, filetime::FileTime::from_unix_time(1_500_000_000, 0))
            .unwrap();

        let second = Scanner::new(
            FakeProber::with_streams(&[("movie.mkv", vec![atmos_stream()])]),
            &cache_path,
        );
        let outcome = second.scan(&folders, &NoopProgress);
        assert_eq!(second.prober.call_count(), 1);
        assert_eq!(outcome.stats.cache_misses, 1);
        assert_eq!(outcome.results.len(), 1);
    }

    #[test]
    fn test_probe_failure_cached_as_nothing_found() {
        let media = TempDir::new().unwrap();
        touch(&media.path().join("broken.mkv"));
        let cache = TempDir::new().unwrap();
        let cache_path = cache.path().join("cache.json");
        let folders = [media.path().to_path_buf()];

        // No canned streams: the prober reports nothing, as the ffprobe
        // adapter does on any invocation failure.
        let first = Scanner::new(FakeProber::default(), &cache_path);
        let outcome = first.scan(&folders, &NoopProgress);
        assert!(outcome.results.is_empty());

        let second = Scanner::new(FakeProber::default(), &cache_path);
        let outcome = second.scan(&folders, &NoopProgress);
        assert_eq!(second.prober.call_count(), 0, "empty result must be cached");
        assert_eq!(outcome.stats.cache_hits, 1);
    }

    #[test]
    fn test_unreadable_file_is_skipped_not_fatal() {
        let media = TempDir::new().unwrap();
        touch(&media.path().join("stays.mkv"));
        touch(&media.path().join("vanishes.mkv"));

        // Whichever file is probed first deletes the other, so exactly one
        // file fails its signature read mid-scan.
        let prober = FakeProber {
            streams: [
                ("stays.mkv".to_string(), vec![atmos_stream()]),
                ("vanishes.mkv".to_string(), vec![atmos_stream()]),
            ]
            .into_iter()
            .collect(),
            calls: Mutex::new(Vec::new()),
            delete_on_probe: vec![
                media.path().join("stays.mkv"),
                media.path().join("vanishes.mkv"),
            ],
        };

        let cache = TempDir::new().unwrap();
        let scanner = Scanner::new(prober, cache.path().join("cache.json"));
        let progress = RecordingProgress::default();
        let outcome = scanner.scan(&[media.path().to_path_buf()], &progress);

        assert_eq!(outcome.stats.files_total, 2);
        assert_eq!(outcome.stats.files_skipped, 1);
        assert_eq!(outcome.results.len(), 1);
        // The skipped file still counts toward progress.
        assert_eq!(progress.calls.lock().unwrap().last(), Some(&(2, 2)));
    }

    #[test]
    fn test_progress_invariants() {
        let media = TempDir::new().unwrap();
        for i in 0..5 {
            touch(&media.path().join(format!("file{}.mkv", i)));
        }
        let cache = TempDir::new().unwrap();
        let scanner = Scanner::new(FakeProber::default(), cache.path().join("cache.json"));
        let progress = RecordingProgress::default();

        scanner.scan(&[media.path().to_path_buf()], &progress);

        let calls = progress.calls.lock().unwrap();
        assert_eq!(calls.len(), 5);
        assert!(calls.iter().all(|&(_, total)| total == 5));
        assert!(calls.windows(2).all(|w| w[0].0 <= w[1].0));
        assert_eq!(calls.iter().filter(|&&(p, t)| p == t).count(), 1);
        assert_eq!(*calls.last().unwrap(), (5, 5));
    }

    #[test]
    fn test_zero_file_scan_completes_without_callbacks() {
        let empty = TempDir::new().unwrap();
        let cache = TempDir::new().unwrap();
        let scanner = Scanner::new(FakeProber::default(), cache.path().join("cache.json"));
        let progress = RecordingProgress::default();

        let outcome = scanner.scan(&[empty.path().to_path_buf()], &progress);

        assert!(outcome.results.is_empty());
        assert_eq!(outcome.stats.files_total, 0);
        assert!(progress.calls.lock().unwrap().is_empty());
    }

    #[test]
    fn test_cache_save_failure_still_returns_results() {
        let media = TempDir::new().unwrap();
        touch(&media.path().join("atmos.mkv"));

        let prober = FakeProber::with_streams(&[("atmos.mkv", vec![atmos_stream()])]);
        let scanner = Scanner::new(prober, "/proc/not/writable/cache.json");

        let outcome = scanner.scan(&[media.path().to_path_buf()], &NoopProgress);
        assert_eq!(outcome.results.len(), 1);
        assert!(outcome.cache_error.is_some());
    }
}
