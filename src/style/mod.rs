//! Decoration styles.
//!
//! Provides the rule and separator sets used by scope openers, closures, tables and
//! horizontal lines. Two sets ship with the crate:
//! - `minimal` - plain box-drawing rules
//! - `renaissance` - ornamental `-=` patterns
//!
//! Ornamental patterns are picked by nesting level so output is reproducible.

pub mod glyphs;

use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

use glyphs::{
    CLOSER_RULE_WIDTH, MINIMAL_LINES, MINIMAL_RULES, MINIMAL_RULE_ENDS, RENAISSANCE_LINES,
    RENAISSANCE_RULES, RENAISSANCE_RULE_ENDS,
};

// ===== StyleName =====

/// Name of a built-in style, as accepted by config files, env vars and the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum StyleName {
    /// Plain box-drawing rules.
    #[default]
    Minimal,
    /// Ornamental `-=` rules.
    #[serde(alias = "reinassance")]
    #[value(alias = "reinassance")]
    Renaissance,
}

impl StyleName {
    /// Lowercase identifier.
    pub fn as_str(self) -> &'static str {
        match self {
            StyleName::Minimal => "minimal",
            StyleName::Renaissance => "renaissance",
        }
    }
}

impl fmt::Display for StyleName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unknown style name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown style '{0}' (expected 'minimal' or 'renaissance')")]
pub struct UnknownStyle(pub String);

impl FromStr for StyleName {
    type Err = UnknownStyle;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "minimal" => Ok(StyleName::Minimal),
            "renaissance" | "reinassance" => Ok(StyleName::Renaissance),
            other => Err(UnknownStyle(other.to_string())),
        }
    }
}

// ===== Style =====

/// Rule and separator tables for one style.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Style {
    name: StyleName,
    rules: &'static [&'static str],
    rule_ends: &'static [&'static str],
    lines: &'static [&'static str],
}

impl Style {
    /// Resolve a style by name.
    pub fn named(name: StyleName) -> Self {
        match name {
            StyleName::Minimal => Self {
                name,
                rules: MINIMAL_RULES,
                rule_ends: MINIMAL_RULE_ENDS,
                lines: MINIMAL_LINES,
            },
            StyleName::Renaissance => Self {
                name,
                rules: RENAISSANCE_RULES,
                rule_ends: RENAISSANCE_RULE_ENDS,
                lines: RENAISSANCE_LINES,
            },
        }
    }

    /// Which built-in style this is.
    pub fn name(&self) -> StyleName {
        self.name
    }

    /// Rule drawn before the header of a full opener.
    pub fn opener_rule(&self, level: usize) -> &'static str {
        pick(self.rules, level)
    }

    /// Short rule drawn after a header or exit message.
    pub fn rule_end(&self, level: usize) -> &'static str {
        pick(self.rule_ends, level)
    }

    /// Rule drawn right after the closure marker.
    pub fn closer_rule(&self, level: usize) -> String {
        self.line(level, CLOSER_RULE_WIDTH)
    }

    /// Separator line of exactly `width` characters.
    ///
    /// The source pattern repeats when `width` exceeds its length.
    pub fn line(&self, level: usize, width: usize) -> String {
        pick(self.lines, level).chars().cycle().take(width).collect()
    }
}

impl Default for Style {
    fn default() -> Self {
        Self::named(StyleName::default())
    }
}

fn pick(table: &'static [&'static str], level: usize) -> &'static str {
    table.get(level % table.len().max(1)).copied().unwrap_or("")
}
