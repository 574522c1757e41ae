//! Creation-context capture and rendering.
//!
//! The stack is captured unresolved when a tracked verifier is built, and
//! only symbolised if the verifier ends up being reported.

use std::fmt;
use std::panic::Location;

use backtrace::{Backtrace, BacktraceSymbol};

/// Default number of frames kept in a rendered creation context.
pub(crate) const DEFAULT_MAX_FRAMES: usize = 32;

/// Symbol prefixes of frames that belong to the capture machinery itself.
const INTERNAL_PREFIXES: [&str; 2] = [env!("CARGO_CRATE_NAME"), "backtrace"];

/// One rendered stack frame.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Frame {
    /// Demangled function name.
    pub(crate) function: String,
    /// Source file, or `<unknown>` when debug info is missing.
    pub(crate) file: String,
    /// Source line, 0 when unknown.
    pub(crate) line: u32,
}

impl Frame {
    fn from_symbol(symbol: &BacktraceSymbol) -> Option<Self> {
        let function = symbol.name().map(|name| format!("{name:#}"));
        let file = symbol.filename().map(|path| path.display().to_string());
        if function.is_none() && file.is_none() {
            return None;
        }
        Some(Frame {
            function: function.unwrap_or_else(|| "<unknown>".to_string()),
            file: file.unwrap_or_else(|| "<unknown>".to_string()),
            line: symbol.lineno().unwrap_or(0),
        })
    }

    fn from_location(location: &Location<'_>) -> Self {
        Frame {
            function: "<unknown>".to_string(),
            file: location.file().to_string(),
            line: location.line(),
        }
    }

    /// Whether this frame belongs to the verifier or the unwinder.
    pub(crate) fn is_internal(&self) -> bool {
        let path = self.function.strip_prefix('<').unwrap_or(&self.function);
        INTERNAL_PREFIXES.iter().any(|prefix| {
            path.strip_prefix(prefix)
                .is_some_and(|rest| rest.starts_with("::"))
        })
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.function)?;
        writeln!(f, "\t{}:{}", self.file, self.line)
    }
}

/// Where a tracked verifier was built.
pub(crate) struct CreationContext {
    trace: Backtrace,
    location: &'static Location<'static>,
    max_frames: usize,
}

impl CreationContext {
    /// Capture the current call chain without symbolising it.
    pub(crate) fn capture(location: &'static Location<'static>, max_frames: usize) -> Self {
        CreationContext {
            trace: Backtrace::new_unresolved(),
            location,
            max_frames,
        }
    }

    /// Resolve symbols and return the caller-side frames, outermost last.
    ///
    /// Never empty: falls back to the construction location when no
    /// symbolised frame survives filtering.
    pub(crate) fn frames(&mut self) -> Vec<Frame> {
        self.trace.resolve();
        let mut frames: Vec<Frame> = self
            .trace
            .frames()
            .iter()
            .flat_map(backtrace::BacktraceFrame::symbols)
            .filter_map(Frame::from_symbol)
            .skip_while(Frame::is_internal)
            .take(self.max_frames)
            .collect();
        if frames.is_empty() {
            frames.push(Frame::from_location(self.location));
        }
        frames
    }

    /// Render one `function\n\tfile:line` entry per frame.
    pub(crate) fn render(&mut self) -> String {
        render_frames(&self.frames())
    }
}

impl fmt::Debug for CreationContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CreationContext")
            .field("location", &self.location)
            .field("max_frames", &self.max_frames)
            .finish_non_exhaustive()
    }
}

pub(crate) fn render_frames(frames: &[Frame]) -> String {
    frames.iter().map(ToString::to_string).collect()
}
