//! Inline progress bars.
//!
//! ```text
//! ╭────────────────╮
//! │ 0%  load  100% │
//! ├ ▄▄▄▄▄▄▄▄▄▄▄▄▄▄ ┤
//! ╰────────────────╯
//! ```

use unicode_width::UnicodeWidthStr;

use crate::model::ScopeError;
use crate::style::glyphs::PROGRESS_CELL;
use crate::tracker::ScopeTracker;

const START_LABEL: &str = "│ 0%";
const END_LABEL: &str = "100% │";

/// A progress bar whose cells are appended to a single line.
#[derive(Debug)]
pub struct ProgressBar<'a> {
    tracker: &'a mut ScopeTracker,
    width: usize,
    cells: usize,
    closed: bool,
}

impl ScopeTracker {
    /// Write a boxed progress header and open the bar line.
    ///
    /// `width` is the number of cells that represent 100%. It is widened when needed so
    /// the labels and `title` fit inside the box with a space on each side of the title.
    ///
    /// # Errors
    ///
    /// Returns [`ScopeError::Sink`] if the write fails.
    pub fn progress(&mut self, title: &str, width: usize) -> Result<ProgressBar<'_>, ScopeError> {
        // The percent labels take six columns of the row; keep a space either side of the title.
        let width = width.max(title.width() + 8);
        let border = "─".repeat(width + 2);
        let gap = width - (6 + title.width());
        let left = gap / 2;
        let labels = format!(
            "{START_LABEL}{}{title}{}{END_LABEL}",
            " ".repeat(left),
            " ".repeat(gap - left)
        );

        self.log(&format!("╭{border}╮"))?;
        self.log(&labels)?;
        self.log("├ ")?;

        Ok(ProgressBar {
            tracker: self,
            width,
            cells: 0,
            closed: false,
        })
    }
}

impl ProgressBar<'_> {
    /// Advance to `fraction` of the total, appending any missing cells.
    ///
    /// Values are clamped to `0.0..=1.0`; reaching 1.0 closes the bar. Progress never
    /// moves backwards.
    ///
    /// # Errors
    ///
    /// Returns [`ScopeError::Sink`] if the write fails.
    pub fn update(&mut self, fraction: f64) -> Result<(), ScopeError> {
        if self.closed {
            return Ok(());
        }
        let fraction = if fraction.is_nan() {
            0.0
        } else {
            fraction.clamp(0.0, 1.0)
        };
        let target = cells_for(fraction, self.width);
        if target > self.cells {
            self.tracker
                .write_raw(&PROGRESS_CELL.repeat(target - self.cells))?;
            self.cells = target;
        }
        if fraction >= 1.0 {
            self.close()?;
        }
        Ok(())
    }

    /// Fill the remaining cells and draw the bottom border. Further calls do nothing.
    ///
    /// # Errors
    ///
    /// Returns [`ScopeError::Sink`] if the write fails.
    pub fn close(&mut self) -> Result<(), ScopeError> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;
        let remaining = self.width.saturating_sub(self.cells);
        self.cells = self.width;
        self.tracker
            .write_raw(&format!("{} ┤", PROGRESS_CELL.repeat(remaining)))?;
        self.tracker
            .log(&format!("╰{}╯", "─".repeat(self.width + 2)))
    }

    /// Cells drawn so far.
    pub fn cells(&self) -> usize {
        self.cells
    }

    /// Whether the bar has been closed.
    pub fn is_closed(&self) -> bool {
        self.closed
    }
}

impl Drop for ProgressBar<'_> {
    fn drop(&mut self) {
        if let Err(err) = self.close() {
            tracing::error!(%err, "failed to close progress bar on drop");
        }
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
fn cells_for(fraction: f64, width: usize) -> usize {
    ((fraction * width as f64).floor() as usize).min(width)
}
