//! Per-level scope state.

use std::time::Instant;

/// Header value reserved to mean "no visible header".
///
/// The empty string is treated the same way.
pub const SILENT_HEADER: &str = "...";

/// Whether a header suppresses the opening decoration.
pub fn is_silent_header(header: &str) -> bool {
    header.is_empty() || header == SILENT_HEADER
}

/// Bookkeeping for one nesting level.
///
/// One slot exists per possible depth; slots are overwritten on every `up()` into that depth.
#[derive(Debug, Clone)]
pub struct LevelState {
    /// When the level was entered.
    pub started: Instant,
    /// Indentation prefix in effect before the level's decoration was drawn.
    ///
    /// The closing decoration is drawn with this prefix, never with the live one.
    pub prefix_snapshot: String,
    /// The opener emitted a minimal `header...` line that the closer should complete.
    pub pending_inline: bool,
    /// Header the level was opened with.
    pub header: String,
}

impl LevelState {
    /// Fresh slot stamped with `now`.
    pub fn new(now: Instant) -> Self {
        Self {
            started: now,
            prefix_snapshot: String::new(),
            pending_inline: false,
            header: SILENT_HEADER.to_string(),
        }
    }

    /// Overwrite the slot for a newly entered level.
    pub fn enter(&mut self, now: Instant, prefix_snapshot: String, header: &str) {
        self.started = now;
        self.prefix_snapshot = prefix_snapshot;
        self.pending_inline = false;
        self.header.clear();
        self.header.push_str(header);
    }

    /// Whether the slot carries a header that should be displayed.
    pub fn has_visible_header(&self) -> bool {
        !is_silent_header(&self.header)
    }
}
