//! Streamed box tables.
//!
//! The frame is sized from the header row when the table is opened. Rows are written as
//! they are added, so a cell wider than its column widens that column for the rest of the
//! table but cannot move lines that are already on the terminal.

use std::fmt::Display;

use unicode_width::UnicodeWidthStr;

use super::center;
use crate::model::ScopeError;
use crate::tracker::ScopeTracker;

/// Narrowest column, regardless of header length.
pub const MIN_COLUMN_WIDTH: usize = 5;

const SEPARATOR: &str = " │ ";
const MARGIN: &str = "│";

/// A table being written row by row.
///
/// Closed explicitly with [`close`](Self::close) or implicitly on drop.
#[derive(Debug)]
pub struct ConsoleTable<'a> {
    tracker: &'a mut ScopeTracker,
    widths: Vec<usize>,
    frame_width: usize,
    closed: bool,
}

impl ScopeTracker {
    /// Open a table and write its title bar and header row.
    ///
    /// # Errors
    ///
    /// Returns [`ScopeError::Sink`] if the write fails.
    pub fn table(&mut self, title: &str, headers: &[&str]) -> Result<ConsoleTable<'_>, ScopeError> {
        let widths: Vec<usize> = headers
            .iter()
            .map(|header| header.width().max(MIN_COLUMN_WIDTH))
            .collect();
        let header_row = format_row(headers, &widths);
        let frame_width = header_row.width();

        let fill = frame_width.saturating_sub(title.width() + 4);
        let left = fill / 2;
        let level = self.level();
        let title_bar = format!(
            "╭{} {title} {}╮",
            self.style().line(level, left),
            self.style().line(level, fill - left)
        );
        let blank_row = format!("{MARGIN}{}{MARGIN}", " ".repeat(frame_width.saturating_sub(2)));

        self.log(&title_bar)?;
        self.log(&blank_row)?;
        self.log(&header_row)?;
        tracing::trace!(columns = widths.len(), title, "table opened");

        Ok(ConsoleTable {
            tracker: self,
            widths,
            frame_width,
            closed: false,
        })
    }
}

impl ConsoleTable<'_> {
    /// Write one row. Each cell is rendered with `Display` and centered in its column.
    ///
    /// # Errors
    ///
    /// Returns [`ScopeError::RowWidth`] when the number of cells differs from the number of
    /// headers, [`ScopeError::Sink`] if the write fails.
    pub fn add_row<I>(&mut self, cells: I) -> Result<(), ScopeError>
    where
        I: IntoIterator,
        I::Item: Display,
    {
        let cells: Vec<String> = cells.into_iter().map(|cell| cell.to_string()).collect();
        if cells.len() != self.widths.len() {
            return Err(ScopeError::RowWidth {
                expected: self.widths.len(),
                actual: cells.len(),
            });
        }
        for (width, cell) in self.widths.iter_mut().zip(&cells) {
            *width = (*width).max(cell.width());
        }
        let row = format_row(&cells, &self.widths);
        self.tracker.log(&row)
    }

    /// Draw the bottom border. Further calls do nothing.
    ///
    /// # Errors
    ///
    /// Returns [`ScopeError::Sink`] if the write fails.
    pub fn close(&mut self) -> Result<(), ScopeError> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;
        let bottom = format!("╰{}╯", "─".repeat(self.frame_width.saturating_sub(2)));
        self.tracker.log(&bottom)
    }

    /// Column widths in display columns.
    pub fn widths(&self) -> &[usize] {
        &self.widths
    }
}

impl Drop for ConsoleTable<'_> {
    fn drop(&mut self) {
        if let Err(err) = self.close() {
            tracing::error!(%err, "failed to close table on drop");
        }
    }
}

fn format_row<S: AsRef<str>>(cells: &[S], widths: &[usize]) -> String {
    let body = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| center(cell.as_ref(), *width))
        .collect::<Vec<_>>()
        .join(SEPARATOR);
    format!("{MARGIN}{body}{MARGIN}")
}
