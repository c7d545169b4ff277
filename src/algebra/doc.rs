//! Layout documents in the Wadler-Lindig style.
//!
//! A `Doc` describes formatting intent (text, indentation, possible line
//! breaks, groups) without committing to a layout. The renderer decides, at
//! each group boundary, whether the group prints on one line or breaks, so
//! the same document tree serves every line width.

/// How a soft break behaves once its enclosing group has broken.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BreakKind {
    /// Breaks whenever the enclosing group breaks.
    Strict,
    /// Breaks only if the upcoming content would not fit, even inside a
    /// broken group. Produces fill-style layouts.
    Flex,
}

/// How a `Nest` applies its indentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NestMode {
    /// Add to the current indentation unconditionally.
    Always,
    /// Add to the current indentation only while rendering in broken mode.
    IfBroken,
    /// Discard the accumulated indentation and restart from column zero.
    /// Used for heredoc bodies, whose lines keep their own alignment.
    Reset,
}

/// How a group participates in an *enclosing* group's fit decision. The
/// group's own layout is always decided from its own content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fit {
    /// Scanned like any other content.
    Neutral,
    /// Reported as fitting without being scanned: the enclosing group stays
    /// flat up to this point and this group decides for itself.
    Optimistic,
    /// Reported as never fitting: conservatively breaks the enclosing group.
    Pessimistic,
}

/// A layout document. Documents are pure values; rendering is the only
/// place they are consumed, and it never mutates them.
#[derive(Debug, Clone, PartialEq)]
pub enum Doc {
    Empty,
    /// Verbatim text with an explicit display width. The width is carried
    /// separately so zero-width decorations (ANSI escapes, markup) can be
    /// embedded without disturbing layout decisions.
    Text { text: String, width: usize },
    Concat(Vec<Doc>),
    Nest {
        doc: Box<Doc>,
        amount: usize,
        mode: NestMode,
    },
    /// A soft break: renders as `flat` when the group is flat, and as a
    /// newline plus indentation when it breaks.
    Break { flat: String, kind: BreakKind },
    /// A hard newline. Any group containing one can never fit flat.
    Line,
    Group { doc: Box<Doc>, fit: Fit },
    /// Permanently disables the flat alternative for this subtree.
    ForceUnfit(Box<Doc>),
}

// ── Helper constructors ─────────────────────────────────────────────────

/// The empty document.
pub fn empty() -> Doc {
    Doc::Empty
}

/// Verbatim text; width is the number of characters.
pub fn text(s: impl Into<String>) -> Doc {
    let text = s.into();
    let width = text.chars().count();
    Doc::Text { text, width }
}

/// Text that occupies no columns as far as layout is concerned.
/// Decorations go through here.
pub fn zero_width(s: impl Into<String>) -> Doc {
    Doc::Text {
        text: s.into(),
        width: 0,
    }
}

/// Concatenation, flattening nested concats and dropping empties.
pub fn concat(docs: Vec<Doc>) -> Doc {
    let mut parts = Vec::with_capacity(docs.len());
    for doc in docs {
        match doc {
            Doc::Empty => {}
            Doc::Concat(inner) => parts.extend(inner),
            other => parts.push(other),
        }
    }
    match parts.len() {
        0 => Doc::Empty,
        1 => parts.pop().unwrap(),
        _ => Doc::Concat(parts),
    }
}

/// Indent the child by `amount` extra columns after each newline.
pub fn nest(doc: Doc, amount: usize) -> Doc {
    Doc::Nest {
        doc: Box::new(doc),
        amount,
        mode: NestMode::Always,
    }
}

/// Indent the child only when rendering in broken mode.
pub fn nest_if_broken(doc: Doc, amount: usize) -> Doc {
    Doc::Nest {
        doc: Box::new(doc),
        amount,
        mode: NestMode::IfBroken,
    }
}

/// Render the child flush against the left margin, ignoring accumulated
/// indentation.
pub fn nest_reset(doc: Doc) -> Doc {
    Doc::Nest {
        doc: Box::new(doc),
        amount: 0,
        mode: NestMode::Reset,
    }
}

/// A strict soft break rendering as `flat` on one line.
pub fn soft_break(flat: impl Into<String>) -> Doc {
    Doc::Break {
        flat: flat.into(),
        kind: BreakKind::Strict,
    }
}

/// A flex soft break: breaks individually, only where needed.
pub fn flex_break(flat: impl Into<String>) -> Doc {
    Doc::Break {
        flat: flat.into(),
        kind: BreakKind::Flex,
    }
}

/// A hard newline.
pub fn line() -> Doc {
    Doc::Line
}

/// A group with neutral fit bias.
pub fn group(doc: Doc) -> Doc {
    Doc::Group {
        doc: Box::new(doc),
        fit: Fit::Neutral,
    }
}

/// A group with an explicit fit bias.
pub fn group_with(doc: Doc, fit: Fit) -> Doc {
    Doc::Group {
        doc: Box::new(doc),
        fit,
    }
}

/// Mark a subtree as inherently multi-line.
pub fn force_unfit(doc: Doc) -> Doc {
    Doc::ForceUnfit(Box::new(doc))
}

/// Join documents with a separator.
pub fn join(docs: Vec<Doc>, separator: Doc) -> Doc {
    let mut parts = Vec::with_capacity(docs.len() * 2);
    for (i, doc) in docs.into_iter().enumerate() {
        if i > 0 {
            parts.push(separator.clone());
        }
        parts.push(doc);
    }
    concat(parts)
}
