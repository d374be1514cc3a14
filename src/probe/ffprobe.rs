//! ffprobe subprocess adapter.
//!
//! Invokes ffprobe once per file, restricted to audio streams, asking for
//! JSON on stdout:
//!
//! ```text
//! ffprobe -v error -select_streams a -show_streams -of json <path>
//! ```
//!
//! On Windows the child is started with `CREATE_NO_WINDOW` so no console
//! flashes up when the scanner runs from a graphical shell.

use std::path::{Path, PathBuf};
use std::process::Command;

use serde::Deserialize;

use super::{Prober, RawStream};

/// Language tag reported for streams that carry none.
const UNKNOWN_LANGUAGE: &str = "unknown";

/// Prober backed by the ffprobe command-line tool.
#[derive(Debug, Clone)]
pub struct FfprobeAdapter {
    program: PathBuf,
}

impl Default for FfprobeAdapter {
    fn default() -> Self {
        Self::new("ffprobe")
    }
}

impl FfprobeAdapter {
    /// Create an adapter invoking the given ffprobe executable.
    ///
    /// `program` may be a bare name resolved via `PATH` or an explicit
    /// path to the binary.
    #[must_use]
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// The executable this adapter invokes.
    #[must_use]
    pub fn program(&self) -> &Path {
        &self.program
    }

    fn command(&self, path: &Path) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(["-v", "error", "-select_streams", "a", "-show_streams", "-of", "json"])
            .arg(path);

        #[cfg(windows)]
        {
            use std::os::windows::process::CommandExt;
            const CREATE_NO_WINDOW: u32 = 0x0800_0000;
            cmd.creation_flags(CREATE_NO_WINDOW);
        }

        cmd
    }
}

impl Prober for FfprobeAdapter {
    fn probe(&self, path: &Path) -> Vec<RawStream> {
        let output = match self.command(path).output() {
            Ok(output) => output,
            Err(e) => {
                log::warn!(
                    "ffprobe ({}) could not be started for {}: {}",
                    self.program.display(),
                    path.display(),
                    e
                );
                return Vec::new();
            }
        };

        if !output.status.success() {
            log::debug!(
                "ffprobe exited with {} for {}: {}",
                output.status,
                path.display(),
                String::from_utf8_lossy(&output.stderr).trim()
            );
        }

        // Parse whatever landed on stdout even on a non-zero exit; an
        // unreadable file yields no document and therefore no streams.
        match parse_streams(&output.stdout) {
            Ok(streams) => streams,
            Err(e) => {
                log::debug!("unparseable ffprobe output for {}: {}", path.display(), e);
                Vec::new()
            }
        }
    }
}

#[derive(Debug, Deserialize)]
struct FfprobeDocument {
    #[serde(default)]
    streams: Vec<FfprobeStream>,
}

#[derive(Debug, Deserialize)]
struct FfprobeStream {
    #[serde(default)]
    codec_name: String,
    #[serde(default)]
    profile: String,
    #[serde(default)]
    tags: FfprobeTags,
}

#[derive(Debug, Default, Deserialize)]
struct FfprobeTags {
    language: Option<String>,
}

fn parse_streams(stdout: &[u8]) -> Result<Vec<RawStream>, serde_json::Error> {
    let document: FfprobeDocument = serde_json::from_slice(stdout)?;
    Ok(document
        .streams
        .into_iter()
        .map(|s| RawStream {
            codec: s.codec_name.to_lowercase(),
            profile: s.profile.to_lowercase(),
            language: s
                .tags
                .language
                .unwrap_or_else(|| UNKNOWN_LANGUAGE.to_string()),
        })
        .collect())
}
