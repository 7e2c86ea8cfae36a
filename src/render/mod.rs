//! Output helpers layered on top of [`ScopeTracker`](crate::tracker::ScopeTracker).
//!
//! Everything here writes through the tracker's `log`/`inline` primitives, so it inherits
//! the current indentation and is gated by the same mute and verbosity rules.

pub mod duration;
pub mod items;
pub mod progress;
pub mod report;
pub mod table;

pub use duration::format_elapsed;
pub use progress::ProgressBar;
pub use table::ConsoleTable;

use unicode_width::UnicodeWidthStr;

/// Center `text` in `width` display columns; the odd space goes to the right.
pub(crate) fn center(text: &str, width: usize) -> String {
    let pad = width.saturating_sub(text.width());
    let left = pad / 2;
    format!("{}{text}{}", " ".repeat(left), " ".repeat(pad - left))
}
