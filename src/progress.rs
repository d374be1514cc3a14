//! Progress reporting for scans.
//!
//! The orchestrator reports `(processed, total)` after every file through
//! the [`ProgressCallback`] trait. Three implementations cover the
//! consumers:
//!
//! * [`NoopProgress`] for library callers that don't care,
//! * [`ChannelProgress`] to hand events from the scan thread to whatever
//!   owns the display (the producer/consumer side of the CLI),
//! * [`TerminalProgress`] to render an indicatif bar with elapsed time and
//!   a remaining-time estimate.

use std::sync::mpsc::Sender;
use std::sync::Mutex;

use indicatif::{ProgressBar, ProgressStyle};

/// One progress update: files processed so far out of the total.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressEvent {
    /// Files fully handled so far, including skipped and failed ones.
    pub processed: usize,
    /// Total files in this scan. Constant for the scan's duration.
    pub total: usize,
}

/// Callback invoked by the orchestrator after each file completes.
///
/// For a scan of N files the callback sees `total == N` on every call,
/// `processed` non-decreasing, and `processed == total` exactly once at
/// the end. A zero-file scan completes without any invocation.
pub trait ProgressCallback: Send + Sync {
    /// Called after a file has been handled (probed, served from cache,
    /// or skipped).
    fn on_file_scanned(&self, processed: usize, total: usize);
}

/// Callback that discards all updates.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopProgress;

impl ProgressCallback for NoopProgress {
    fn on_file_scanned(&self, _processed: usize, _total: usize) {}
}

/// Callback that forwards updates over an mpsc channel.
///
/// The scan thread holds the sender; the receiving side drives the
/// interactive display without sharing any mutable state with the scan.
/// A disconnected receiver is ignored so an abandoned display never
/// aborts a scan.
#[derive(Debug, Clone)]
pub struct ChannelProgress {
    sender: Sender<ProgressEvent>,
}

impl ChannelProgress {
    /// Wrap a sender end of a progress channel.
    #[must_use]
    pub fn new(sender: Sender<ProgressEvent>) -> Self {
        Self { sender }
    }
}

impl ProgressCallback for ChannelProgress {
    fn on_file_scanned(&self, processed: usize, total: usize) {
        let _ = self.sender.send(ProgressEvent { processed, total });
    }
}

/// Terminal progress bar rendered with indicatif.
///
/// The bar is created on the first update, once the total is known, and
/// shows position, percentage, elapsed time and an ETA. In quiet mode all
/// updates are dropped.
pub struct TerminalProgress {
    bar: Mutex<Option<ProgressBar>>,
    quiet: bool,
}

impl TerminalProgress {
    /// Create a reporter; `quiet` suppresses all drawing.
    #[must_use]
    pub fn new(quiet: bool) -> Self {
        Self {
            bar: Mutex::new(None),
            quiet,
        }
    }

    fn style() -> ProgressStyle {
        ProgressStyle::with_template(
            "[{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) (ETA: {eta})",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█>-")
    }

    /// Apply one update to the bar.
    pub fn update(&self, event: ProgressEvent) {
        if self.quiet {
            return;
        }

        let mut guard = self.bar.lock().unwrap();
        let bar = guard.get_or_insert_with(|| {
            let bar = ProgressBar::new(event.total as u64);
            bar.set_style(Self::style());
            bar
        });
        bar.set_position(event.processed as u64);
        if event.processed >= event.total {
            bar.finish_and_clear();
        }
    }

    /// Clear the bar if it is still drawn.
    pub fn finish(&self) {
        if let Some(bar) = self.bar.lock().unwrap().take() {
            bar.finish_and_clear();
        }
    }
}

impl ProgressCallback for TerminalProgress {
    fn on_file_scanned(&self, processed: usize, total: usize) {
        self.update(ProgressEvent { processed, total });
    }
}
