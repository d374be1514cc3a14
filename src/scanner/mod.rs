//! File discovery for the scan pipeline.
//!
//! The [`Walker`] enumerates candidate video files under a set of root
//! folders. Discovery is deliberately simple: recursive traversal, a fixed
//! extension set matched case-insensitively, traversal order preserved.
//! Overlapping roots yield the same file more than once; the walker does
//! not deduplicate (a repeated file is a cache hit downstream anyway).

pub mod walker;

pub use walker::Walker;

use std::path::Path;

/// File extensions treated as video containers, lowercase without dots.
pub const VIDEO_EXTENSIONS: [&str; 6] = ["mkv", "mp4", "avi", "mov", "ts", "m2ts"];

/// Whether `path` carries one of the recognized video extensions,
/// compared case-insensitively.
#[must_use]
pub fn is_video_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            VIDEO_EXTENSIONS
                .iter()
                .any(|known| ext.eq_ignore_ascii_case(known))
        })
}
