//! Scope tracker: nesting level, indentation and the verbosity-gated scope decorations.
//!
//! Every `up()` pushes one level and every `down()` pops it. Each level remembers the
//! indentation prefix that was live before it was entered, and the closer is always drawn
//! with that snapshot. Nested output in between uses the deeper prefix, but the closer
//! lines up with its opener no matter how deep the nesting went.
//!
//! Output is newline-first: every new line starts with `\n`, so a minimal `header...` opener
//! stays open on the terminal until its closer appends ` done  • 0.1s` to it.

pub mod guard;
pub mod visibility;

pub use guard::{ScopeGuard, VerbosityGuard};
pub use visibility::Visibility;

use std::fmt;
use std::io::Write;
use std::time::Duration;

use crate::clock::{Clock, SystemClock};
use crate::model::{is_silent_header, LevelState, PerformanceHistory, ScopeError};
use crate::output::Sink;
use crate::render::format_elapsed;
use crate::style::glyphs::{
    CLOSE_MARKER, DEFAULT_EXIT, DONE_GLYPH, ELLIPSIS, INDENT_UNIT, OPEN_MARKER, TIME_MARKER,
    WARNING_MARKER,
};
use crate::style::{Style, StyleName};

#[cfg(test)]
#[path = "tracker_tests.rs"]
mod tests;

/// Default maximum nesting depth.
pub const DEFAULT_MAX_DEPTH: usize = 40;

/// Largest accepted `max_depth`. One level slot is allocated per depth up front.
pub const MAX_DEPTH_LIMIT: usize = 1024;

// ===== TrackerOptions =====

/// Construction-time settings for a [`ScopeTracker`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrackerOptions {
    /// Initial verbosity threshold.
    pub verbosity: i32,
    /// Deepest level that is tracked; deeper `up()` calls are absorbed.
    pub max_depth: usize,
    /// Decoration style.
    pub style: StyleName,
    /// Whether per-header timing history is accumulated.
    pub history: bool,
}

impl Default for TrackerOptions {
    fn default() -> Self {
        Self {
            verbosity: 0,
            max_depth: DEFAULT_MAX_DEPTH,
            style: StyleName::Minimal,
            history: false,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Tracking {
    level: usize,
    restore: i32,
}

// ===== ScopeTracker =====

/// Hierarchical console writer.
///
/// Not synchronized: share it behind a `Mutex` (see [`crate::shared`]) or pass it by
/// `&mut` to the code that needs it.
pub struct ScopeTracker {
    level: usize,
    verbosity: i32,
    /// Slot `n` describes level `n`; slot 0 is the root and never entered.
    levels: Box<[LevelState]>,
    max_depth: usize,
    /// `up()` calls absorbed at `max_depth`, unwound by the next `down()` calls.
    overflow: usize,
    overflow_warned: bool,
    prefix: String,
    style: Style,
    history_enabled: bool,
    history: PerformanceHistory,
    muted_at: Option<usize>,
    /// Level whose minimal opener is still the last thing on the terminal line.
    open_line: Option<usize>,
    tracking: Option<Tracking>,
    sink: Sink,
    clock: Box<dyn Clock>,
}

impl fmt::Debug for ScopeTracker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScopeTracker")
            .field("level", &self.level)
            .field("verbosity", &self.verbosity)
            .field("max_depth", &self.max_depth)
            .field("overflow", &self.overflow)
            .field("prefix", &self.prefix)
            .field("style", &self.style.name())
            .field("history_enabled", &self.history_enabled)
            .field("muted_at", &self.muted_at)
            .field("open_line", &self.open_line)
            .finish_non_exhaustive()
    }
}

impl ScopeTracker {
    /// Tracker with default options writing to `sink`.
    pub fn new(sink: Sink) -> Self {
        Self::with_options(sink, TrackerOptions::default())
    }

    /// Tracker with explicit options and the system clock.
    pub fn with_options(sink: Sink, options: TrackerOptions) -> Self {
        Self::with_clock(sink, options, SystemClock)
    }

    /// Tracker with explicit options and time source.
    ///
    /// `max_depth` is clamped to `1..=MAX_DEPTH_LIMIT`.
    pub fn with_clock(sink: Sink, options: TrackerOptions, clock: impl Clock + 'static) -> Self {
        let max_depth = options.max_depth.clamp(1, MAX_DEPTH_LIMIT);
        if options.max_depth > MAX_DEPTH_LIMIT {
            tracing::warn!(
                requested = options.max_depth,
                limit = MAX_DEPTH_LIMIT,
                "max_depth above limit; clamping"
            );
        }
        let now = clock.now();
        Self {
            level: 0,
            verbosity: options.verbosity,
            levels: vec![LevelState::new(now); max_depth + 1].into_boxed_slice(),
            max_depth,
            overflow: 0,
            overflow_warned: false,
            prefix: String::new(),
            style: Style::named(options.style),
            history_enabled: options.history,
            history: PerformanceHistory::new(),
            muted_at: None,
            open_line: None,
            tracking: None,
            sink,
            clock: Box::new(clock),
        }
    }

    // ----- accessors -----

    /// Current nesting depth; 0 is the root. Never exceeds `max_depth`.
    pub fn level(&self) -> usize {
        self.level
    }

    /// Number of `up()` calls currently absorbed above `max_depth`.
    pub fn overflow(&self) -> usize {
        self.overflow
    }

    /// Configured maximum depth.
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Current verbosity threshold.
    pub fn verbosity(&self) -> i32 {
        self.verbosity
    }

    /// Change the verbosity threshold. Takes effect at the next transition.
    pub fn set_verbosity(&mut self, verbosity: i32) {
        if verbosity != self.verbosity {
            tracing::debug!(from = self.verbosity, to = verbosity, "verbosity changed");
        }
        self.verbosity = verbosity;
    }

    /// Live indentation prefix used for output at the current level.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Header of the innermost open scope, if any.
    pub fn current_header(&self) -> Option<&str> {
        (self.level > 0).then(|| self.levels[self.level].header.as_str())
    }

    /// Whether any level is waiting for an inline completion.
    pub fn has_pending_inline(&self) -> bool {
        self.levels[1..=self.level]
            .iter()
            .any(|slot| slot.pending_inline)
    }

    /// Decoration style in use.
    pub fn style(&self) -> &Style {
        &self.style
    }

    /// Switch decoration style.
    pub fn set_style(&mut self, name: StyleName) {
        self.style = Style::named(name);
    }

    /// Accumulated timing history.
    pub fn history(&self) -> &PerformanceHistory {
        &self.history
    }

    /// Turn timing history on or off. Recorded entries are kept either way.
    pub fn set_history(&mut self, enabled: bool) {
        self.history_enabled = enabled;
    }

    /// Whether timing history is being accumulated.
    pub fn history_enabled(&self) -> bool {
        self.history_enabled
    }

    /// Whether output is currently muted.
    pub fn is_muted(&self) -> bool {
        self.muted_at.is_some()
    }

    /// Whether plain output at the current level would be written.
    pub fn is_visible(&self) -> bool {
        !self.is_muted() && visibility::shows_level(self.verbosity, self.level)
    }

    // ----- scope transitions -----

    /// Enter a new scope.
    ///
    /// # Errors
    ///
    /// Returns [`ScopeError::Sink`] if writing the opener fails.
    pub fn up(&mut self, header: &str) -> Result<(), ScopeError> {
        self.enter(header, false)
    }

    /// Enter a new scope without writing anything.
    ///
    /// # Errors
    ///
    /// Returns [`ScopeError::Sink`] only if the overflow warning cannot be written.
    pub fn up_skipped(&mut self, header: &str) -> Result<(), ScopeError> {
        self.enter(header, true)
    }

    /// Leave the innermost scope. `None` uses the style's default glyph.
    ///
    /// # Errors
    ///
    /// Returns [`ScopeError::Underflow`] at the root level, [`ScopeError::Sink`] if writing
    /// the closer fails.
    pub fn down(&mut self, exit: Option<&str>) -> Result<(), ScopeError> {
        self.exit(exit, false)
    }

    /// Leave the innermost scope without writing anything.
    ///
    /// # Errors
    ///
    /// Returns [`ScopeError::Underflow`] at the root level.
    pub fn down_skipped(&mut self) -> Result<(), ScopeError> {
        self.exit(None, true)
    }

    fn enter(&mut self, header: &str, skip: bool) -> Result<(), ScopeError> {
        if self.level >= self.max_depth {
            self.overflow += 1;
            tracing::warn!(
                max_depth = self.max_depth,
                overflow = self.overflow,
                header,
                "scope depth exceeds maximum"
            );
            if !self.overflow_warned {
                self.overflow_warned = true;
                let message = format!(
                    "scope depth {} exceeds maximum {}; clamping to {}",
                    self.max_depth + self.overflow,
                    self.max_depth,
                    self.max_depth
                );
                self.warning(&message)?;
            }
            return Ok(());
        }

        let now = self.clock.now();
        let snapshot = self.prefix.clone();
        self.level += 1;
        let level = self.level;
        self.levels[level].enter(now, snapshot, header);
        self.prefix.push_str(INDENT_UNIT);
        tracing::trace!(level, header, skip, "scope entered");

        if skip || is_silent_header(header) || self.is_muted() {
            return Ok(());
        }

        let snapshot = self.levels[level].prefix_snapshot.clone();
        match visibility::on_enter(self.verbosity, level) {
            Visibility::Full => {
                let text = format!(
                    "{OPEN_MARKER} {} {header} {} [L{level}]",
                    self.style.opener_rule(level),
                    self.style.rule_end(level)
                );
                self.write_line(&snapshot, &text)?;
            }
            Visibility::Minimal => {
                self.write_line(&snapshot, &format!("{header}{ELLIPSIS}"))?;
                self.levels[level].pending_inline = true;
                self.open_line = Some(level);
            }
            Visibility::Silent => {}
        }
        Ok(())
    }

    fn exit(&mut self, exit: Option<&str>, skip: bool) -> Result<(), ScopeError> {
        if self.overflow > 0 {
            self.overflow -= 1;
            tracing::trace!(overflow = self.overflow, "absorbed scope left");
            return Ok(());
        }
        if self.level == 0 {
            tracing::warn!(verbosity = self.verbosity, "down() called at root level");
            return Err(ScopeError::Underflow {
                verbosity: self.verbosity,
            });
        }

        let closing = self.level;
        let elapsed = self
            .clock
            .now()
            .saturating_duration_since(self.levels[closing].started);
        if self.history_enabled {
            self.history.record(&self.levels[closing].header, elapsed);
        }

        // Restore the opener's prefix before any closer text is built.
        self.prefix.clone_from(&self.levels[closing].prefix_snapshot);
        self.level -= 1;
        self.overflow_warned = false;
        let new_level = self.level;
        let line_open = std::mem::take(&mut self.levels[closing].pending_inline)
            && self.open_line == Some(closing);
        tracing::trace!(level = closing, ?elapsed, skip, "scope left");

        let result = if skip || self.is_muted() {
            Ok(())
        } else {
            self.render_exit(closing, new_level, exit, elapsed, line_open)
        };

        if self.open_line == Some(closing) {
            self.open_line = None;
        }
        if let Some(tracking) = self.tracking {
            if tracking.level == closing {
                self.tracking = None;
                self.set_verbosity(tracking.restore);
            }
        }
        result
    }

    fn render_exit(
        &mut self,
        closing: usize,
        new_level: usize,
        exit: Option<&str>,
        elapsed: Duration,
        line_open: bool,
    ) -> Result<(), ScopeError> {
        let time = format_elapsed(elapsed);
        let prefix = self.prefix.clone();
        match visibility::on_exit(self.verbosity, new_level) {
            Visibility::Full => {
                let text = format!(
                    "{CLOSE_MARKER}{} {} {}  {TIME_MARKER} {time}",
                    self.style.closer_rule(closing),
                    exit.unwrap_or(DEFAULT_EXIT),
                    self.style.rule_end(closing)
                );
                self.write_line(&prefix, &text)?;
            }
            Visibility::Minimal => {
                let completion = format!("{}  {TIME_MARKER} {time}", exit.unwrap_or(DONE_GLYPH));
                if line_open {
                    self.write_inline(&completion)?;
                } else {
                    // The opener line is gone (interleaved output or skipped opener); start over.
                    let slot = &self.levels[closing];
                    let text = if slot.has_visible_header() {
                        format!("{}{ELLIPSIS} {completion}", slot.header)
                    } else {
                        completion
                    };
                    self.write_line(&prefix, &text)?;
                }
            }
            Visibility::Silent => {}
        }
        Ok(())
    }

    // ----- mute / reset / tracking -----

    /// Silence all output until [`unmute`](Self::unmute) is called at this level or above.
    pub fn mute(&mut self) {
        if self.muted_at.is_none() {
            self.muted_at = Some(self.level);
        }
    }

    /// Lift a mute. Ignored while still nested deeper than where the mute started.
    pub fn unmute(&mut self) {
        if let Some(at) = self.muted_at {
            if self.level <= at {
                self.muted_at = None;
            }
        }
    }

    /// Return to a pristine root state.
    ///
    /// Keeps verbosity, style, history setting, sink and clock; drops open scopes, recorded
    /// history, mute and tracking.
    pub fn reset(&mut self) {
        let now = self.clock.now();
        self.level = 0;
        self.overflow = 0;
        self.overflow_warned = false;
        self.prefix.clear();
        for slot in self.levels.iter_mut() {
            *slot = LevelState::new(now);
        }
        self.history = PerformanceHistory::new();
        self.muted_at = None;
        self.open_line = None;
        self.tracking = None;
        tracing::debug!("tracker reset");
    }

    /// Open a scope at a raised verbosity that is restored when the scope closes.
    ///
    /// The header gets a ` (tracking)` suffix. Only one tracked scope can be active; further
    /// calls while one is open are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`ScopeError::Sink`] if writing the opener fails.
    pub fn track(&mut self, header: &str, verbosity: i32) -> Result<(), ScopeError> {
        if self.tracking.is_some() {
            return Ok(());
        }
        let restore = self.verbosity;
        let before = self.level;
        self.set_verbosity(verbosity);
        let entered = self.up(&format!("{header} (tracking)"));
        if self.level > before {
            self.tracking = Some(Tracking {
                level: self.level,
                restore,
            });
        } else {
            self.set_verbosity(restore);
        }
        entered
    }

    // ----- plain output -----

    /// Write a message line at the current indentation.
    ///
    /// # Errors
    ///
    /// Returns [`ScopeError::Sink`] if the write fails.
    pub fn log(&mut self, message: &str) -> Result<(), ScopeError> {
        if !self.is_visible() {
            return Ok(());
        }
        let prefix = self.prefix.clone();
        self.write_line(&prefix, message)
    }

    /// Append text to the current line.
    ///
    /// # Errors
    ///
    /// Returns [`ScopeError::Sink`] if the write fails.
    pub fn inline(&mut self, message: &str) -> Result<(), ScopeError> {
        if !self.is_visible() {
            return Ok(());
        }
        self.write_inline(message)
    }

    /// Write an empty line carrying only the indentation.
    ///
    /// # Errors
    ///
    /// Returns [`ScopeError::Sink`] if the write fails.
    pub fn blank(&mut self) -> Result<(), ScopeError> {
        self.log("")
    }

    /// Report a problem.
    ///
    /// When the current level is visible this is a regular `⛔` line. When it is hidden the
    /// warning is still written, prefixed with the path of open scope headers. Muted trackers
    /// and negative verbosity write nothing.
    ///
    /// # Errors
    ///
    /// Returns [`ScopeError::Sink`] if the write fails.
    pub fn warning(&mut self, message: &str) -> Result<(), ScopeError> {
        tracing::warn!(level = self.level, warning = message, "tracker warning");
        if self.is_muted() || self.verbosity < 0 {
            return Ok(());
        }
        if self.is_visible() {
            return self.log(&format!("{WARNING_MARKER} {message}"));
        }
        let path = self.breadcrumb();
        write!(self.sink, "\n{WARNING_MARKER} in {path}:\n ─────> {message}")?;
        self.open_line = None;
        self.sink.flush()?;
        Ok(())
    }

    /// Terminate the current line.
    ///
    /// Output is newline-first, so the final line stays unterminated until this is called.
    ///
    /// # Errors
    ///
    /// Returns [`ScopeError::Sink`] if the write fails.
    pub fn end_line(&mut self) -> Result<(), ScopeError> {
        self.sink.write_all(b"\n")?;
        self.open_line = None;
        self.sink.flush()?;
        Ok(())
    }

    /// Open scope headers joined as `a/b/`.
    fn breadcrumb(&self) -> String {
        let mut path = String::from("/");
        for slot in &self.levels[1..=self.level] {
            path.push_str(&slot.header);
            path.push('/');
        }
        if self.level > 0 {
            path.remove(0);
        }
        path
    }

    // ----- raw writes -----

    fn write_line(&mut self, prefix: &str, text: &str) -> Result<(), ScopeError> {
        write!(self.sink, "\n{prefix} {text}")?;
        self.open_line = None;
        self.sink.flush()?;
        Ok(())
    }

    fn write_inline(&mut self, text: &str) -> Result<(), ScopeError> {
        write!(self.sink, " {text}")?;
        self.sink.flush()?;
        Ok(())
    }

    /// Append raw text with no separator, gated like plain output.
    pub(crate) fn write_raw(&mut self, text: &str) -> Result<(), ScopeError> {
        if !self.is_visible() {
            return Ok(());
        }
        self.sink.write_all(text.as_bytes())?;
        self.sink.flush()?;
        Ok(())
    }
}
