//! Timing history summary.

use crate::model::ScopeError;
use crate::render::format_elapsed;
use crate::tracker::ScopeTracker;

const REPORT_TITLE: &str = "performance history";
const REPORT_HEADERS: [&str; 4] = ["header", "calls", "total", "mean"];

impl ScopeTracker {
    /// Write the accumulated history as a table, slowest total first.
    ///
    /// # Errors
    ///
    /// Returns [`ScopeError::Sink`] if the write fails.
    pub fn history_report(&mut self) -> Result<(), ScopeError> {
        let rows: Vec<[String; 4]> = self
            .history()
            .sorted_by_total()
            .into_iter()
            .map(|(header, entry)| {
                [
                    header.to_string(),
                    entry.calls.to_string(),
                    format_elapsed(entry.total),
                    format_elapsed(entry.mean()),
                ]
            })
            .collect();

        let mut table = self.table(REPORT_TITLE, &REPORT_HEADERS)?;
        for row in rows {
            table.add_row(row)?;
        }
        table.close()
    }
}
