//! Semantic categories and decoration tables for highlighted output.
//!
//! The translator tags the text it emits with a semantic category. A
//! decoration table maps each category to an open/close string pair that is
//! spliced around the text at zero layout width, so decorated and plain
//! output always share the same line breaks.

use owo_colors::colors::{Blue, Cyan, Green, Magenta, Red, Yellow};
use owo_colors::Color;

/// Types of content that can be rendered with different styles
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Syntax {
    String,
    Number,
    Atom,
    Operator,
    Call,
    Variable,
    Boolean,
    Nil,
    List,
    Map,
    Tuple,
}

const CATEGORIES: usize = 11;

fn index(syntax: Syntax) -> usize {
    match syntax {
        Syntax::String => 0,
        Syntax::Number => 1,
        Syntax::Atom => 2,
        Syntax::Operator => 3,
        Syntax::Call => 4,
        Syntax::Variable => 5,
        Syntax::Boolean => 6,
        Syntax::Nil => 7,
        Syntax::List => 8,
        Syntax::Map => 9,
        Syntax::Tuple => 10,
    }
}

/// A table of open/close decoration strings per category. The default table
/// decorates nothing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Decorations {
    entries: [Option<(String, String)>; CATEGORIES],
}

const ANSI_RESET: &str = "\x1b[0m";

impl Decorations {
    /// No decoration at all; output is plain text.
    pub fn none() -> Decorations {
        Decorations::default()
    }

    /// ANSI escape decorations for terminal output.
    pub fn ansi() -> Decorations {
        let mut table = Decorations::none();
        table.set(Syntax::String, Green::ANSI_FG, ANSI_RESET);
        table.set(Syntax::Number, Magenta::ANSI_FG, ANSI_RESET);
        table.set(Syntax::Atom, Cyan::ANSI_FG, ANSI_RESET);
        table.set(Syntax::Operator, Red::ANSI_FG, ANSI_RESET);
        table.set(Syntax::Call, Blue::ANSI_FG, ANSI_RESET);
        table.set(Syntax::Boolean, Yellow::ANSI_FG, ANSI_RESET);
        table.set(Syntax::Nil, Yellow::ANSI_FG, ANSI_RESET);
        table
    }

    /// Set the open/close pair for one category.
    pub fn set(&mut self, syntax: Syntax, open: impl Into<String>, close: impl Into<String>) {
        self.entries[index(syntax)] = Some((open.into(), close.into()));
    }

    /// Look up the pair for a category, if one was configured.
    pub fn get(&self, syntax: Syntax) -> Option<(&str, &str)> {
        self.entries[index(syntax)]
            .as_ref()
            .map(|(open, close)| (open.as_str(), close.as_str()))
    }

    /// Whether any category is decorated.
    pub fn is_empty(&self) -> bool {
        self.entries.iter().all(|entry| entry.is_none())
    }
}
