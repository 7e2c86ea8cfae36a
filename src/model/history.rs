//! Per-header timing history.
//!
//! Accumulates how often each scope header was closed and how long those scopes took in
//! total. Entries are never evicted; the map grows for the lifetime of the tracker.

use std::collections::HashMap;
use std::time::Duration;

/// Call count and cumulative elapsed time for one header.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HistoryEntry {
    /// Number of `down()` calls that closed a scope with this header.
    pub calls: u64,
    /// Sum of the elapsed time of those scopes.
    pub total: Duration,
}

impl HistoryEntry {
    /// Mean elapsed time per call, zero when nothing was recorded.
    pub fn mean(&self) -> Duration {
        if self.calls == 0 {
            return Duration::ZERO;
        }
        #[allow(clippy::cast_precision_loss)]
        let mean = self.total.as_secs_f64() / self.calls as f64;
        Duration::try_from_secs_f64(mean).unwrap_or(Duration::MAX)
    }
}

/// Mapping from header text to accumulated timing.
#[derive(Debug, Clone, Default)]
pub struct PerformanceHistory {
    entries: HashMap<String, HistoryEntry>,
}

impl PerformanceHistory {
    /// Create an empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one closed scope.
    pub fn record(&mut self, header: &str, elapsed: Duration) {
        let entry = self.entries.entry(header.to_string()).or_default();
        entry.calls += 1;
        entry.total = entry.total.saturating_add(elapsed);
    }

    /// Look up the accumulated timing for a header.
    pub fn get(&self, header: &str) -> Option<&HistoryEntry> {
        self.entries.get(header)
    }

    /// Number of distinct headers recorded.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing has been recorded yet.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries sorted by total elapsed time, longest first; ties broken by header.
    pub fn sorted_by_total(&self) -> Vec<(&str, HistoryEntry)> {
        let mut rows: Vec<(&str, HistoryEntry)> = self
            .entries
            .iter()
            .map(|(header, entry)| (header.as_str(), *entry))
            .collect();
        rows.sort_by(|a, b| b.1.total.cmp(&a.1.total).then_with(|| a.0.cmp(b.0)));
        rows
    }
}
