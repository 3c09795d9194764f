//! Sink handles for record output

// Standard library
use std::fmt;
use std::io::{self, Write};
use std::sync::Arc;

// External dependencies
use parking_lot::Mutex;

/// Where finished records are written.
///
/// Handles are cheap to clone and safe to share; one record is written as one
/// line, made atomic by the stream lock. Write failures are swallowed:
/// logging is fire-and-forget and never reports sink errors to the caller.
#[derive(Clone, Default)]
pub enum Writer {
    /// Standard output (the default)
    #[default]
    Stdout,
    /// Standard error
    Stderr,
    /// A caller-supplied writer, shared behind a lock
    Custom(Arc<Mutex<Box<dyn Write + Send>>>),
}

impl Writer {
    /// Wrap an arbitrary writer, e.g. a buffer or a file.
    pub fn custom(writer: impl Write + Send + 'static) -> Self {
        Self::Custom(Arc::new(Mutex::new(Box::new(writer))))
    }

    pub(crate) fn write_line(&self, line: &[u8]) {
        match self {
            Self::Stdout => {
                let mut out = io::stdout().lock();
                let _ = out.write_all(line);
                let _ = out.write_all(b"\n");
            }
            Self::Stderr => {
                let mut out = io::stderr().lock();
                let _ = out.write_all(line);
                let _ = out.write_all(b"\n");
            }
            Self::Custom(writer) => {
                let mut out = writer.lock();
                let _ = out.write_all(line);
                let _ = out.write_all(b"\n");
                let _ = out.flush();
            }
        }
    }
}

impl fmt::Debug for Writer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stdout => f.write_str("Stdout"),
            Self::Stderr => f.write_str("Stderr"),
            Self::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}
