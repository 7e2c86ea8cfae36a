//! Shared fixture for scenario tests: a tracker wired to a capture buffer and a manual
//! clock.

#![allow(dead_code, missing_docs)]

use peeklog::clock::ManualClock;
use peeklog::output::CaptureBuffer;
use peeklog::tracker::{ScopeTracker, TrackerOptions};
use std::time::Duration;

/// Tracker plus handles to its output and time source.
pub struct ScopeHarness {
    pub tracker: ScopeTracker,
    buffer: CaptureBuffer,
    clock: ManualClock,
}

impl ScopeHarness {
    /// Harness at `verbosity` with otherwise default options.
    pub fn new(verbosity: i32) -> Self {
        Self::with_options(TrackerOptions {
            verbosity,
            ..TrackerOptions::default()
        })
    }

    /// Harness with explicit options.
    pub fn with_options(options: TrackerOptions) -> Self {
        let buffer = CaptureBuffer::new();
        let clock = ManualClock::new();
        let tracker = ScopeTracker::with_clock(buffer.sink(), options, clock.clone());
        Self {
            tracker,
            buffer,
            clock,
        }
    }

    /// Move the manual clock forward.
    pub fn advance_ms(&self, millis: u64) {
        self.clock.advance(Duration::from_millis(millis));
    }

    /// Raw output, including the leading newlines.
    pub fn output(&self) -> String {
        self.buffer.contents()
    }

    /// Non-empty rendered lines.
    pub fn lines(&self) -> Vec<String> {
        self.buffer.lines()
    }

    /// Forget everything written so far.
    pub fn clear(&self) {
        self.buffer.clear();
    }
}
