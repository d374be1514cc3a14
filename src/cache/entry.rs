//! Cache entry definitions and wire format.
//!
//! The on-disk schema of `scan_cache.json`:
//!
//! ```json
//! {
//!   "/media/movie.mkv": {
//!     "sig": "1048576_1700000000.000000000",
//!     "tracks": [["Dolby Atmos", "eng", "truehd", "dolby truehd atmos"]]
//!   }
//! }
//! ```
//!
//! The schema is unversioned; entries that fail to parse are treated as
//! cache misses by the store, never as errors.

use serde::{Deserialize, Serialize};

use crate::classify::{FormatLabel, TrackRecord};
use crate::signature::FileSignature;

/// Cached scan outcome for a single file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "WireEntry", into = "WireEntry")]
pub struct CacheEntry {
    /// Signature of the file when it was scanned.
    pub signature: FileSignature,
    /// Qualifying tracks found, in stream order. Empty means the file was
    /// scanned and contains no spatial audio.
    pub tracks: Vec<TrackRecord>,
}

impl CacheEntry {
    /// Create an entry for a freshly scanned file.
    #[must_use]
    pub fn new(signature: FileSignature, tracks: Vec<TrackRecord>) -> Self {
        Self { signature, tracks }
    }
}

/// Serialized shape: signature as a string, tracks as 4-element arrays.
#[derive(Debug, Serialize, Deserialize)]
struct WireEntry {
    sig: String,
    tracks: Vec<(String, String, String, String)>,
}

/// Error converting a wire entry into a [`CacheEntry`].
#[derive(thiserror::Error, Debug)]
pub enum WireEntryError {
    #[error(transparent)]
    Signature(#[from] crate::signature::ParseSignatureError),
    #[error(transparent)]
    Format(#[from] crate::classify::ParseFormatError),
}

impl TryFrom<WireEntry> for CacheEntry {
    type Error = WireEntryError;

    fn try_from(wire: WireEntry) -> Result<Self, Self::Error> {
        let signature = wire.sig.parse::<FileSignature>()?;
        let tracks = wire
            .tracks
            .into_iter()
            .map(|(format, language, codec, profile)| {
                Ok(TrackRecord {
                    format: format.parse::<FormatLabel>()?,
                    language,
                    codec,
                    profile,
                })
            })
            .collect::<Result<Vec<_>, WireEntryError>>()?;
        Ok(Self { signature, tracks })
    }
}

impl From<CacheEntry> for WireEntry {
    fn from(entry: CacheEntry) -> Self {
        Self {
            sig: entry.signature.to_string(),
            tracks: entry
                .tracks
                .into_iter()
                .map(|t| (t.format.to_string(), t.language, t.codec, t.profile))
                .collect(),
        }
    }
}
