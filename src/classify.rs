//! Spatial-audio classification of probed streams.
//!
//! Maps the `(codec, profile)` metadata of an audio stream to a spatial
//! audio format label. The matching is deliberately heuristic: vendors
//! advertise Atmos and DTS:X through free-form profile strings, so the
//! rules below do substring matching on lowercased metadata. The decision
//! table is load-bearing for cache compatibility; changing it invalidates
//! the meaning of previously cached results.

use std::fmt;
use std::str::FromStr;

use crate::probe::RawStream;

/// Object-based audio families this tool recognizes.
/// Serialized in exports and the cache through its `Display`/`FromStr`
/// forms (`"Dolby Atmos"`, `"DTS:X"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormatLabel {
    /// Dolby Atmos, carried over TrueHD or E-AC-3 (JOC).
    DolbyAtmos,
    /// DTS:X, carried over a DTS core.
    DtsX,
}

impl fmt::Display for FormatLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DolbyAtmos => f.write_str("Dolby Atmos"),
            Self::DtsX => f.write_str("DTS:X"),
        }
    }
}

/// Error parsing a format label from its display form.
#[derive(thiserror::Error, Debug)]
#[error("unknown spatial audio format: {0:?}")]
pub struct ParseFormatError(String);

impl FromStr for FormatLabel {
    type Err = ParseFormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Dolby Atmos" => Ok(Self::DolbyAtmos),
            "DTS:X" => Ok(Self::DtsX),
            other => Err(ParseFormatError(other.to_string())),
        }
    }
}

/// One qualifying audio track found in a file.
///
/// Immutable once created; `codec` and `profile` keep the lowercased
/// strings the prober reported, so exports show what the container
/// actually advertised.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackRecord {
    /// Detected spatial audio family.
    pub format: FormatLabel,
    /// Language tag from the stream, `"unknown"` when untagged.
    pub language: String,
    /// Codec name as reported, lowercased.
    pub codec: String,
    /// Profile string as reported, lowercased.
    pub profile: String,
}

/// Classify a probed stream, or exclude it.
///
/// Rules, first match wins, case-insensitive:
///
/// 1. profile contains `"atmos"` → Dolby Atmos (TrueHD-with-Atmos and any
///    other codec advertising an Atmos profile string)
/// 2. codec is `eac3`/`e-ac-3` and profile contains `"joc"` → Dolby Atmos
///    (Joint Object Coding is Atmos over Dolby Digital Plus)
/// 3. codec is `dts` and profile contains `"x"` → DTS:X
/// 4. otherwise the stream is not spatial audio
#[must_use]
pub fn classify(stream: &RawStream) -> Option<TrackRecord> {
    let codec = stream.codec.to_lowercase();
    let profile = stream.profile.to_lowercase();

    let format = if profile.contains("atmos") {
        FormatLabel::DolbyAtmos
    } else if (codec == "eac3" || codec == "e-ac-3") && profile.contains("joc") {
        FormatLabel::DolbyAtmos
    } else if codec == "dts" && profile.contains('x') {
        FormatLabel::DtsX
    } else {
        return None;
    };

    Some(TrackRecord {
        format,
        language: stream.language.clone(),
        codec,
        profile,
    })
}
