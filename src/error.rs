//! Process exit codes.

/// Exit codes for the atmoscan CLI.
///
/// - 0: scan completed and spatial audio tracks were found
/// - 1: unexpected failure
/// - 2: scan completed normally but found no spatial audio
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Scan completed and at least one track was found.
    Success = 0,
    /// An unexpected error occurred.
    GeneralError = 1,
    /// Scan completed but no spatial audio was found.
    NoTracksFound = 2,
}

impl ExitCode {
    /// Get the numeric exit code.
    #[must_use]
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}
