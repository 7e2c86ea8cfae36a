//! Error types for peeklog.
//!
//! This module defines the error taxonomy using `thiserror`. Errors compose via `?` and
//! `From` conversions so that sink failures bubble out of every rendering call untouched.
//!
//! # Error Hierarchy
//!
//! - [`AppError`] - Top-level error for the `peeklog` binary
//!   - [`ScopeError`] - Tracker failures (underflow, sink I/O, malformed table rows)
//!   - [`ConfigError`](crate::config::ConfigError) - Config file read/parse failures
//!   - [`LoggingError`](crate::logging::LoggingError) - Diagnostic subscriber setup failures
//!
//! # Recovery Strategy
//!
//! Nesting overflow is **non-fatal**: the tracker clamps and warns once, it never returns an
//! error for it. Underflow is surfaced to the caller so that unbalanced `down()` calls are
//! caught where they happen instead of silently corrupting the indentation. Sink errors are
//! never wrapped in retries or swallowed.

use thiserror::Error;

/// Errors produced by [`ScopeTracker`](crate::tracker::ScopeTracker) and the renderers
/// built on top of it.
#[derive(Debug, Error)]
pub enum ScopeError {
    /// `down()` was called while the tracker was already at the root level.
    ///
    /// The tracker's state is left untouched: level stays at 0, no history is recorded and
    /// nothing is written.
    ///
    /// # Examples
    ///
    /// ```
    /// use peeklog::model::error::ScopeError;
    ///
    /// let err = ScopeError::Underflow { verbosity: 2 };
    /// assert!(err.to_string().contains("root level"));
    /// ```
    #[error("down() called at root level (verbosity {verbosity}) without a matching up()")]
    Underflow {
        /// Verbosity threshold in effect when the unbalanced call happened.
        verbosity: i32,
    },

    /// A table row did not have one cell per column.
    ///
    /// # Examples
    ///
    /// ```
    /// use peeklog::model::error::ScopeError;
    ///
    /// let err = ScopeError::RowWidth { expected: 3, actual: 2 };
    /// assert!(err.to_string().contains("expected 3"));
    /// ```
    #[error("table row has {actual} cells, expected {expected}")]
    RowWidth {
        /// Number of columns the table was created with.
        expected: usize,
        /// Number of cells in the rejected row.
        actual: usize,
    },

    /// Writing to the output sink failed.
    ///
    /// Propagated as-is; the tracker does not retry or suppress sink failures.
    #[error("output sink error: {0}")]
    Sink(#[from] std::io::Error),
}

/// Top-level error for the `peeklog` binary.
#[derive(Debug, Error)]
pub enum AppError {
    /// Tracker or sink failure while rendering.
    #[error("render failed: {0}")]
    Scope(#[from] ScopeError),

    /// Configuration could not be loaded.
    #[error("configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),

    /// Diagnostic logging could not be initialized.
    #[error("logging setup failed: {0}")]
    Logging(#[from] crate::logging::LoggingError),
}
