//! Recursive video-file enumeration over a set of root folders.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use super::is_video_file;

/// Directory walker yielding recognized video files.
///
/// Traversal is single-threaded and lazy; the scan is serialized on one
/// ffprobe subprocess at a time, so parallel discovery buys nothing here.
/// Unreadable directories and files are logged and skipped rather than
/// stopping the walk.
#[derive(Debug)]
pub struct Walker {
    roots: Vec<PathBuf>,
}

impl Walker {
    /// Create a walker over the given root folders.
    ///
    /// Roots are visited in the given order. A root that is itself a file
    /// with a video extension yields that file.
    #[must_use]
    pub fn new<I, P>(roots: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            roots: roots.into_iter().map(Into::into).collect(),
        }
    }

    /// The roots this walker traverses.
    #[must_use]
    pub fn roots(&self) -> &[PathBuf] {
        &self.roots
    }

    /// Lazily enumerate video files under all roots, in traversal order.
    ///
    /// Duplicate roots or overlapping subtrees yield duplicate paths.
    pub fn files(&self) -> impl Iterator<Item = PathBuf> + '_ {
        self.roots.iter().flat_map(|root| walk_root(root))
    }
}

fn walk_root(root: &Path) -> impl Iterator<Item = PathBuf> {
    WalkDir::new(root)
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                log::warn!("skipping unreadable path while walking: {}", e);
                None
            }
        })
        .filter(|entry| entry.file_type().is_file())
        .map(walkdir::DirEntry::into_path)
        .filter(|path| is_video_file(path))
}
