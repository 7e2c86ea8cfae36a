//! Glyph tables for the built-in styles.
//!
//! Centralized location for every decoration character so that renderers never hardcode
//! box-drawing symbols.

/// One indentation unit per nesting level.
pub const INDENT_UNIT: &str = " │";

/// Marker that replaces the indentation bar on a full scope opener.
pub const OPEN_MARKER: &str = "◻";

/// Marker that starts a full scope closure.
pub const CLOSE_MARKER: &str = "╰";

/// Continuation marker after a minimal header.
pub const ELLIPSIS: &str = "...";

/// Inline completion text when no exit message was given.
pub const DONE_GLYPH: &str = "✓";

/// Full-closure text when no exit message was given.
pub const DEFAULT_EXIT: &str = "───";

/// Separator placed before elapsed times.
pub const TIME_MARKER: &str = "•";

/// Prefix for warnings.
pub const WARNING_MARKER: &str = "⛔";

/// Bullet used by itemized lists.
pub const BULLET: &str = "•";

/// Width of the rule drawn after a closure marker.
pub const CLOSER_RULE_WIDTH: usize = 20;

/// Cell glyph for progress bars.
pub const PROGRESS_CELL: &str = "▄";

pub(crate) const MINIMAL_RULES: &[&str] = &["──────────────────────"];

pub(crate) const MINIMAL_RULE_ENDS: &[&str] = &["─────────"];

pub(crate) const MINIMAL_LINES: &[&str] = &["────────────────────────────────────────────"];

pub(crate) const RENAISSANCE_RULES: &[&str] = &[
    "--=---===--==--=---==-",
    "-=---=-===-==----===-=-",
    "--=-====-----=-===---=-",
    "-==--=----===-=---==--=-",
    "--==-=---==--=---==---=-",
    "--=---==-===----==-=--=-",
];

pub(crate) const RENAISSANCE_RULE_ENDS: &[&str] = &[
    "-=--",
    "-==-=--",
    "-==-=--=",
    "-==-=---=",
    "---==---=",
    "-=-==---=",
    "---==-=--=",
    "-==-=-----=-",
    "-=-==---===--=",
    "-===-=-----==-",
    "-==-----=-==--=",
    "-===-=-----=-==",
    "-===----==-=--=",
    "-==--==---=-",
];

pub(crate) const RENAISSANCE_LINES: &[&str] = &[
    "===----=-===-==----===-=-----==--===-----=--==-----=-===--=------=",
    "====--=-----==-=-==----===---==---=-==---===-=----===----=-------=",
    "===-==----=----==-===--=------===-==--=-----===--=------===-=---=-",
    "===--=---==---===--==-------==----===--=---==----===---==-------==",
];
