//! peeklog
//!
//! Hierarchical console output. Code announces the scopes it enters and leaves; the
//! tracker indents nested output, decorates scope boundaries, times each scope, and decides
//! from a single verbosity threshold how much of the tree is shown.
//!
//! ```
//! use peeklog::output::CaptureBuffer;
//! use peeklog::tracker::{ScopeTracker, TrackerOptions};
//!
//! let buffer = CaptureBuffer::new();
//! let mut log = ScopeTracker::with_options(buffer.sink(), TrackerOptions::default());
//!
//! log.up("Build")?;
//! log.up("compile")?; // deeper than the threshold: not shown
//! log.down(None)?;
//! log.down(Some("ok"))?;
//!
//! assert!(buffer.contents().starts_with("\n Build... ok  • "));
//! # Ok::<(), peeklog::model::ScopeError>(())
//! ```

pub mod clock;
pub mod config;
pub mod demo;
pub mod logging;
pub mod model;
pub mod output;
pub mod render;
pub mod shared;
pub mod style;
pub mod tracker;

pub use model::{AppError, ScopeError};
pub use tracker::{ScopeTracker, TrackerOptions};
