//! Process-wide destination for unhandled-verification diagnostics.
//!
//! Exactly one sink is active at a time. Replacing it swaps the whole
//! [`SharedSink`] reference, and a diagnostic in flight writes to the
//! snapshot it loaded before writing:
//! - Stdout: default when no sink was set (or `None` was set)
//! - Stderr: for processes that keep stdout machine-readable
//! - Buffer: captures output for tests and embedders
//! - Writer: any caller-supplied `Write` implementation

use std::io::{self, Write};
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};

/// Sink that captures diagnostic text in memory.
pub struct BufferSink {
    buffer: Mutex<String>,
}

impl BufferSink {
    /// Create an empty buffer sink.
    pub fn new() -> Self {
        BufferSink {
            buffer: Mutex::new(String::new()),
        }
    }

    fn write_report(&self, text: &str) {
        self.buffer.lock().push_str(text);
    }

    /// Get all captured output.
    pub fn contents(&self) -> String {
        self.buffer.lock().clone()
    }

    /// Clear captured output.
    pub fn clear(&self) {
        self.buffer.lock().clear();
    }
}

impl Default for BufferSink {
    fn default() -> Self {
        Self::new()
    }
}

/// A destination for diagnostic text.
///
/// Uses enum dispatch; only the `Writer` variant goes through a trait object.
pub enum Sink {
    /// Writes to the process's standard output.
    Stdout,
    /// Writes to the process's standard error.
    Stderr,
    /// Captures to an in-memory buffer.
    Buffer(BufferSink),
    /// Writes to a caller-supplied writer, serialized by a mutex.
    Writer(Mutex<Box<dyn Write + Send>>),
}

impl Sink {
    /// Write one complete diagnostic and flush it.
    ///
    /// The text is written with a single `write_all` so concurrent reports
    /// to the same sink never interleave.
    pub fn write_report(&self, text: &str) -> io::Result<()> {
        match self {
            Sink::Stdout => {
                let mut out = io::stdout().lock();
                out.write_all(text.as_bytes())?;
                out.flush()
            }
            Sink::Stderr => {
                let mut err = io::stderr().lock();
                err.write_all(text.as_bytes())?;
                err.flush()
            }
            Sink::Buffer(buffer) => {
                buffer.write_report(text);
                Ok(())
            }
            Sink::Writer(writer) => {
                let mut writer = writer.lock();
                writer.write_all(text.as_bytes())?;
                writer.flush()
            }
        }
    }

    /// Get all captured output.
    ///
    /// Returns an empty string for sinks that don't capture.
    pub fn contents(&self) -> String {
        match self {
            Sink::Buffer(buffer) => buffer.contents(),
            Sink::Stdout | Sink::Stderr | Sink::Writer(_) => String::new(),
        }
    }

    /// Clear captured output. No-op for sinks that don't capture.
    pub fn clear(&self) {
        if let Sink::Buffer(buffer) = self {
            buffer.clear();
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            Sink::Stdout => "stdout",
            Sink::Stderr => "stderr",
            Sink::Buffer(_) => "buffer",
            Sink::Writer(_) => "writer",
        }
    }
}

impl std::fmt::Debug for Sink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Sink").field(&self.kind()).finish()
    }
}

/// Shared sink reference; the unit of atomic replacement.
pub type SharedSink = Arc<Sink>;

/// Create a sink writing to stdout.
pub fn stdout_sink() -> SharedSink {
    Arc::new(Sink::Stdout)
}

/// Create a sink writing to stderr.
pub fn stderr_sink() -> SharedSink {
    Arc::new(Sink::Stderr)
}

/// Create a buffer sink for capturing diagnostics.
pub fn buffer_sink() -> SharedSink {
    Arc::new(Sink::Buffer(BufferSink::new()))
}

/// Create a sink around any writer.
pub fn writer_sink(writer: impl Write + Send + 'static) -> SharedSink {
    Arc::new(Sink::Writer(Mutex::new(Box::new(writer))))
}

/// The active sink. `None` means stdout.
///
/// The lock is only held to swap or clone the `Arc`, never while writing.
static ACTIVE_SINK: RwLock<Option<SharedSink>> = parking_lot::const_rwlock(None);

/// Replace the process-wide sink for unhandled-verification diagnostics.
///
/// Passing `None` restores the stdout default.
pub fn set_unhandled_verifications_sink(sink: Option<SharedSink>) {
    let previous = std::mem::replace(&mut *ACTIVE_SINK.write(), sink);
    tracing::debug!(
        previous = previous.as_ref().map_or("stdout", |s| s.kind()),
        "unhandled verifications sink replaced"
    );
}

/// Snapshot of the sink a diagnostic fired now would be written to.
pub fn current_sink() -> SharedSink {
    ACTIVE_SINK.read().clone().unwrap_or_else(stdout_sink)
}

/// Serializes unit tests that install a process-wide sink.
#[cfg(test)]
pub(crate) static SINK_TEST_LOCK: Mutex<()> = parking_lot::const_mutex(());
