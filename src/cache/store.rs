//! JSON-backed cache store.
//!
//! One document maps absolute file paths to [`CacheEntry`] values. The
//! store is loaded once at scan start, mutated in memory while the scan
//! owns it, and written back once at scan end as a full overwrite.
//!
//! Loading never fails: a missing file, an unreadable file, or a document
//! that does not parse all degrade to an empty cache, and individual
//! entries that fail to parse are skipped. Only `save` reports errors,
//! because losing persistence for the *next* run is worth telling the
//! caller about.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::cache::CacheEntry;
use crate::classify::TrackRecord;
use crate::signature::FileSignature;

/// Errors from persisting the cache.
#[derive(thiserror::Error, Debug)]
pub enum CacheError {
    /// The cache document could not be serialized.
    #[error("failed to serialize cache: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Writing or renaming the cache file failed.
    #[error("failed to write cache to {path}: {source}")]
    Io {
        /// Path of the cache file.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

/// Persistent mapping from file path to cached scan outcome.
#[derive(Debug)]
pub struct CacheStore {
    path: PathBuf,
    entries: HashMap<String, CacheEntry>,
}

impl CacheStore {
    /// Load the cache from `path`, falling back to an empty cache on any
    /// read or parse failure.
    #[must_use]
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = match fs::read_to_string(&path) {
            Ok(contents) => parse_document(&contents, &path),
            Err(e) => {
                log::debug!("no cache at {} ({}), starting empty", path.display(), e);
                HashMap::new()
            }
        };
        Self { path, entries }
    }

    /// Create an empty cache that will persist to `path`.
    #[must_use]
    pub fn empty(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            entries: HashMap::new(),
        }
    }

    /// Write the full cache document, replacing prior contents.
    ///
    /// Writes to a sibling temp file first and renames it into place, so a
    /// crash mid-write leaves the previous cache intact.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError`] when serialization or any filesystem step
    /// fails. The in-memory entries are unaffected.
    pub fn save(&self) -> Result<(), CacheError> {
        let json = serde_json::to_string_pretty(&self.entries)?;

        let io_err = |source| CacheError::Io {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(io_err)?;
            }
        }

        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json).map_err(io_err)?;
        fs::rename(&tmp, &self.path).map_err(io_err)?;

        log::debug!(
            "saved {} cache entries to {}",
            self.entries.len(),
            self.path.display()
        );
        Ok(())
    }

    /// Return the cached tracks for `path` if the entry is still fresh.
    ///
    /// `None` is a cache miss: no entry, or the stored signature differs
    /// from `signature`. A hit with an empty slice means the file was
    /// scanned before and contains no spatial audio.
    #[must_use]
    pub fn lookup(&self, path: &str, signature: &FileSignature) -> Option<&[TrackRecord]> {
        match self.entries.get(path) {
            Some(entry) if entry.signature == *signature => Some(&entry.tracks),
            Some(_) => {
                log::debug!("cache entry for {} is stale", path);
                None
            }
            None => None,
        }
    }

    /// Insert or overwrite the entry for `path`.
    pub fn insert(&mut self, path: String, entry: CacheEntry) {
        self.entries.insert(path, entry);
    }

    /// Number of cached files.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the cache holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Path of the backing cache file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Parse the cache document leniently: a malformed document yields an
/// empty map, a malformed entry is skipped.
fn parse_document(contents: &str, path: &Path) -> HashMap<String, CacheEntry> {
    let raw: HashMap<String, serde_json::Value> = match serde_json::from_str(contents) {
        Ok(raw) => raw,
        Err(e) => {
            log::warn!(
                "cache at {} is not valid JSON ({}), starting empty",
                path.display(),
                e
            );
            return HashMap::new();
        }
    };

    let mut entries = HashMap::with_capacity(raw.len());
    for (file, value) in raw {
        match serde_json::from_value::<CacheEntry>(value) {
            Ok(entry) => {
                entries.insert(file, entry);
            }
            Err(e) => {
                log::debug!("skipping malformed cache entry for {}: {}", file, e);
            }
        }
    }
    log::debug!("loaded {} cache entries from {}", entries.len(), path.display());
    entries
}
