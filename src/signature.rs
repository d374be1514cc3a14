//! File identity signatures for change detection.
//!
//! A [`FileSignature`] is a cheap change marker built from filesystem
//! metadata (size + modification time). Two signatures are equal iff both
//! components match exactly. It is not a content identity: a file rewritten
//! with the same length and mtime will not be detected as changed.

use std::fmt;
use std::fs;
use std::io;
use std::path::Path;
use std::str::FromStr;
use std::time::{SystemTime, UNIX_EPOCH};

/// Change marker for a file: size plus modification time.
///
/// Serialized in the cache as `"<size>_<secs>.<nanos>"`, e.g.
/// `"1048576_1700000000.000000000"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileSignature {
    /// File size in bytes.
    pub size: u64,
    mtime_secs: u64,
    mtime_nanos: u32,
}

impl FileSignature {
    /// Read the signature of the file at `path` from filesystem metadata.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error if the file is inaccessible
    /// (deleted mid-scan, permission denied). Callers treat this as
    /// "skip file", not as a fatal scan error.
    pub fn for_path(path: &Path) -> io::Result<Self> {
        let metadata = fs::metadata(path)?;
        let modified = metadata.modified().unwrap_or(SystemTime::UNIX_EPOCH);
        Ok(Self::new(metadata.len(), modified))
    }

    /// Build a signature from explicit components.
    #[must_use]
    pub fn new(size: u64, modified: SystemTime) -> Self {
        // Pre-epoch mtimes collapse to zero; exact equality is all that
        // matters for change detection.
        let since_epoch = modified
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default();
        Self {
            size,
            mtime_secs: since_epoch.as_secs(),
            mtime_nanos: since_epoch.subsec_nanos(),
        }
    }
}

impl fmt::Display for FileSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}_{}.{:09}",
            self.size, self.mtime_secs, self.mtime_nanos
        )
    }
}

/// Error parsing a signature from its cache wire form.
#[derive(thiserror::Error, Debug)]
#[error("invalid file signature: {0:?}")]
pub struct ParseSignatureError(String);

impl FromStr for FileSignature {
    type Err = ParseSignatureError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bad = || ParseSignatureError(s.to_string());

        let (size, mtime) = s.split_once('_').ok_or_else(bad)?;
        let size = size.parse::<u64>().map_err(|_| bad())?;

        // The fractional part is optional so signatures written by other
        // tools ("<size>_<secs>") still parse.
        let (secs, nanos) = match mtime.split_once('.') {
            Some((secs, frac)) => {
                if frac.is_empty() || frac.len() > 9 || !frac.bytes().all(|b| b.is_ascii_digit()) {
                    return Err(bad());
                }
                let mut padded = frac.to_string();
                while padded.len() < 9 {
                    padded.push('0');
                }
                (
                    secs.parse::<u64>().map_err(|_| bad())?,
                    padded.parse::<u32>().map_err(|_| bad())?,
                )
            }
            None => (mtime.parse::<u64>().map_err(|_| bad())?, 0),
        };

        Ok(Self {
            size,
            mtime_secs: secs,
            mtime_nanos: nanos,
        })
    }
}
