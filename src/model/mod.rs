//! Domain model types (pure).
//!
//! Error taxonomy, per-level bookkeeping and timing history. Nothing in here writes output.

pub mod error;
pub mod history;
pub mod level;

// Re-export for convenience
pub use error::{AppError, ScopeError};
pub use history::{HistoryEntry, PerformanceHistory};
pub use level::{is_silent_header, LevelState, SILENT_HEADER};
