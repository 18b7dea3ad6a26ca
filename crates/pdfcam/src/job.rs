//! Background imports with cooperative cancellation.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, JoinHandle};

use pdfcam_core::{ImportOptions, ObjectDict};
use pdfcam_parse::{ImportError, parse_content_stream};
use tracing::debug;

/// A content stream import running on a worker thread.
///
/// Dropping the job without joining detaches the worker; call
/// [`cancel`](Self::cancel) first to stop it early.
#[derive(Debug)]
pub struct ImportJob {
    cancel: Arc<AtomicBool>,
    handle: JoinHandle<Result<ObjectDict, ImportError>>,
}

impl ImportJob {
    /// Start interpreting `text` on a new thread.
    ///
    /// # Errors
    ///
    /// Returns [`ImportError::Io`] if the thread cannot be spawned.
    pub fn spawn(text: impl Into<String>, options: ImportOptions) -> Result<Self, ImportError> {
        Self::spawn_with_flag(text, options, Arc::new(AtomicBool::new(false)))
    }

    /// Start a job that observes an existing cancellation flag.
    pub fn spawn_with_flag(
        text: impl Into<String>,
        options: ImportOptions,
        cancel: Arc<AtomicBool>,
    ) -> Result<Self, ImportError> {
        let text = text.into();
        let signal = Arc::clone(&cancel);
        let handle = thread::Builder::new()
            .name("pdfcam-import".to_string())
            .spawn(move || {
                debug!(bytes = text.len(), "background import started");
                parse_content_stream(&text, &options, &signal)
            })?;
        Ok(Self { cancel, handle })
    }

    /// Ask the worker to stop at the next line boundary.
    pub fn cancel(&self) {
        self.cancel.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.load(Ordering::Relaxed)
    }

    pub fn cancel_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.cancel)
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Wait for the worker and return its result.
    ///
    /// # Errors
    ///
    /// [`ImportError::Cancelled`] if the job was cancelled before it
    /// finished, [`ImportError::WorkerPanicked`] if the worker panicked.
    pub fn join(self) -> Result<ObjectDict, ImportError> {
        self.handle
            .join()
            .map_err(|_| ImportError::WorkerPanicked)?
    }
}
