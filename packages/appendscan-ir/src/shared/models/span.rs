//! Source location types
//!
//! These types represent positions in source code, as handed over by the
//! front end for every statement and expression node.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Single location in source code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Location {
    pub line: u32,
    pub column: u32,
}

impl Location {
    pub fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }
}

/// Span in source code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Span {
    pub start_line: u32,
    pub start_col: u32,
    pub end_line: u32,
    pub end_col: u32,
}

impl Span {
    pub fn new(start_line: u32, start_col: u32, end_line: u32, end_col: u32) -> Self {
        Self {
            start_line,
            start_col,
            end_line,
            end_col,
        }
    }

    /// Create a zero span (0:0-0:0)
    pub fn zero() -> Self {
        Self::new(0, 0, 0, 0)
    }

    /// Single-line span, convenient for synthetic trees
    pub fn line(line: u32) -> Self {
        Self::new(line, 1, line, 1)
    }

    pub fn start(&self) -> Location {
        Location::new(self.start_line, self.start_col)
    }

    pub fn end(&self) -> Location {
        Location::new(self.end_line, self.end_col)
    }

    pub fn contains(&self, other: &Span) -> bool {
        self.start() <= other.start() && other.end() <= self.end()
    }
}

impl Default for Span {
    fn default() -> Self {
        Self::zero()
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.start_line, self.start_col)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span_contains() {
        let outer = Span::new(1, 1, 10, 2);
        let inner = Span::new(3, 4, 3, 30);
        assert!(outer.contains(&inner));
        assert!(!inner.contains(&outer));
    }

    #[test]
    fn test_span_display_uses_start() {
        assert_eq!(Span::new(12, 7, 14, 1).to_string(), "12:7");
    }
}
