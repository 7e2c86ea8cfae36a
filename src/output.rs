//! Output sinks.
//!
//! The tracker writes to any `Write + Send`. Text is emitted newline-first: each new line
//! starts with `\n`, so the most recent line stays open and can be completed inline.

use std::io::{self, Write};
use std::sync::{Arc, Mutex, PoisonError};

/// Boxed output sink owned by a tracker.
pub type Sink = Box<dyn Write + Send>;

/// Standard output sink.
pub fn stdout_sink() -> Sink {
    Box::new(io::stdout())
}

/// In-memory sink whose clones share one buffer.
///
/// Hand one clone to the tracker and read the rendered text through another.
#[derive(Debug, Clone, Default)]
pub struct CaptureBuffer {
    bytes: Arc<Mutex<Vec<u8>>>,
}

impl CaptureBuffer {
    /// Create an empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything written so far, lossily decoded.
    pub fn contents(&self) -> String {
        let bytes = self.bytes.lock().unwrap_or_else(PoisonError::into_inner);
        String::from_utf8_lossy(&bytes).into_owned()
    }

    /// Rendered lines with the leading newline dropped and trailing spaces trimmed.
    pub fn lines(&self) -> Vec<String> {
        let contents = self.contents();
        contents
            .strip_prefix('\n')
            .unwrap_or(&contents)
            .split('\n')
            .map(|line| line.trim_end().to_string())
            .filter(|line| !line.is_empty())
            .collect()
    }

    /// Discard everything written so far.
    pub fn clear(&self) {
        self.bytes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    /// Box a clone of this buffer as a tracker sink.
    pub fn sink(&self) -> Sink {
        Box::new(self.clone())
    }
}

impl Write for CaptureBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.bytes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
