//! Bracketed item lists and horizontal rules.

use std::fmt::Display;

use unicode_width::UnicodeWidthStr;

use crate::model::ScopeError;
use crate::style::glyphs::BULLET;
use crate::tracker::ScopeTracker;

/// Width of an untitled rule.
const HLINE_WIDTH: usize = 50;
/// Width of each side of a titled rule.
const HLINE_SIDE_WIDTH: usize = 20;

impl ScopeTracker {
    /// Write `• header: [a; b; c]`, wrapping at `wrap` display columns.
    ///
    /// Continuation lines are indented to align with the first item.
    ///
    /// # Errors
    ///
    /// Returns [`ScopeError::Sink`] if the write fails.
    pub fn itemize<I>(&mut self, header: &str, items: I, wrap: usize) -> Result<(), ScopeError>
    where
        I: IntoIterator,
        I::Item: Display,
    {
        if !self.is_visible() {
            return Ok(());
        }
        let items: Vec<String> = items.into_iter().map(|item| item.to_string()).collect();
        for line in wrap_items(header, &items, wrap) {
            self.log(&line)?;
        }
        Ok(())
    }

    /// Write a separator rule, optionally with a centered title.
    ///
    /// # Errors
    ///
    /// Returns [`ScopeError::Sink`] if the write fails.
    pub fn hline(&mut self, title: Option<&str>) -> Result<(), ScopeError> {
        let level = self.level();
        let text = match title {
            None => self.style().line(level, HLINE_WIDTH),
            Some(title) => {
                let right = self.style().line(level, HLINE_SIDE_WIDTH);
                let left: String = right.chars().rev().collect();
                format!("{left} {title} {right}")
            }
        };
        self.log(&text)
    }
}

fn wrap_items(header: &str, items: &[String], wrap: usize) -> Vec<String> {
    let opener = format!("{BULLET} {header}: [");
    let indent = opener.width();
    let mut lines = Vec::new();
    let mut current = opener;

    for item in items {
        let entry = format!("{item}; ");
        if current.width() > indent && current.width() + entry.width() > wrap {
            lines.push(current.trim_end().to_string());
            current = " ".repeat(indent);
        }
        current.push_str(&entry);
    }

    let mut last = current.strip_suffix("; ").unwrap_or(&current).to_string();
    last.push(']');
    lines.push(last);
    lines
}
