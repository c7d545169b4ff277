//! Single-pass renderer for layout documents.
//!
//! The renderer walks the document with an explicit work stack, deciding at
//! each group boundary whether the group fits on the remaining line. The fit
//! scan is lazy: it inspects the group's content only as far as needed (it
//! stops as soon as the budget is exceeded or a hard line is found), and the
//! output is emitted in one forward pass with no backtracking.
//!
//! Indentation is emitted lazily, just before the next visible text, so
//! blank lines never carry trailing whitespace.

use crate::algebra::doc::{BreakKind, Doc, Fit, NestMode};

/// A width that no realistic content exceeds; used for "never wrap here"
/// sub-renders. Kept well away from `usize::MAX` so column arithmetic
/// cannot overflow.
pub const INFINITY: usize = usize::MAX / 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Flat,
    Broken,
}

#[derive(Debug, Clone, Copy)]
struct Cmd<'a> {
    indent: usize,
    mode: Mode,
    doc: &'a Doc,
}

/// Render a document within the given line width. A width of zero is legal
/// and simply breaks every breakable point; content that cannot break
/// (a single long token) is emitted past the limit rather than failing.
pub fn render(doc: &Doc, width: usize) -> String {
    let mut out = String::new();
    let mut col: usize = 0;
    // Indentation owed to the current line, paid when text arrives.
    let mut pending_indent: Option<usize> = None;

    let mut stack: Vec<Cmd> = vec![Cmd {
        indent: 0,
        mode: Mode::Broken,
        doc,
    }];

    while let Some(cmd) = stack.pop() {
        match cmd.doc {
            Doc::Empty => {}

            Doc::Text { text, width: w } => {
                if let Some(indent) = pending_indent.take() {
                    out.push_str(&" ".repeat(indent));
                }
                out.push_str(text);
                col += w;
            }

            Doc::Concat(parts) => {
                for part in parts.iter().rev() {
                    stack.push(Cmd { doc: part, ..cmd });
                }
            }

            Doc::Nest {
                doc: child,
                amount,
                mode,
            } => {
                let indent = match mode {
                    NestMode::Always => cmd.indent + amount,
                    NestMode::IfBroken => {
                        if cmd.mode == Mode::Broken {
                            cmd.indent + amount
                        } else {
                            cmd.indent
                        }
                    }
                    NestMode::Reset => *amount,
                };
                stack.push(Cmd {
                    indent,
                    mode: cmd.mode,
                    doc: child,
                });
            }

            Doc::Line => {
                out.push('\n');
                pending_indent = Some(cmd.indent);
                col = cmd.indent;
            }

            Doc::Break { flat, kind } => {
                let flat_width = flat.chars().count();
                let keep_flat = match cmd.mode {
                    Mode::Flat => true,
                    Mode::Broken => {
                        *kind == BreakKind::Flex
                            && fits_after_flex(width, col + flat_width, &stack)
                    }
                };
                if keep_flat {
                    if !flat.is_empty() {
                        if let Some(indent) = pending_indent.take() {
                            out.push_str(&" ".repeat(indent));
                        }
                        out.push_str(flat);
                        col += flat_width;
                    }
                } else {
                    out.push('\n');
                    pending_indent = Some(cmd.indent);
                    col = cmd.indent;
                }
            }

            Doc::Group { doc: child, fit } => {
                // A group inside an already-flat group inherits flatness:
                // the outer fit scan covered it. Biased groups are the
                // exception, the outer scan answered for them without
                // looking inside, so they decide from their own content.
                let decide = cmd.mode == Mode::Broken || *fit != Fit::Neutral;
                let mode = if decide {
                    if fits(width.saturating_sub(col), child) {
                        Mode::Flat
                    } else {
                        Mode::Broken
                    }
                } else {
                    Mode::Flat
                };
                stack.push(Cmd {
                    indent: cmd.indent,
                    mode,
                    doc: child,
                });
            }

            // The refusal to fit is accounted for in the fit scans; for
            // rendering the subtree is simply committed to broken mode.
            Doc::ForceUnfit(child) => {
                stack.push(Cmd {
                    indent: cmd.indent,
                    mode: Mode::Broken,
                    doc: child,
                });
            }
        }
    }

    out
}

/// Whether `doc`, rendered flat, stays within `budget` columns. Stops as
/// soon as the answer is known: over budget, or a hard line / force-unfit
/// marker (never fits), or an optimistic or pessimistic group (answers
/// without being scanned).
fn fits(budget: usize, doc: &Doc) -> bool {
    let mut remaining = budget;
    let mut work: Vec<&Doc> = vec![doc];

    while let Some(doc) = work.pop() {
        match doc {
            Doc::Empty => {}
            Doc::Text { width, .. } => {
                if *width > remaining {
                    return false;
                }
                remaining -= width;
            }
            Doc::Concat(parts) => {
                for part in parts.iter().rev() {
                    work.push(part);
                }
            }
            Doc::Nest { doc: child, .. } => work.push(child),
            Doc::Break { flat, .. } => {
                let width = flat.chars().count();
                if width > remaining {
                    return false;
                }
                remaining -= width;
            }
            Doc::Line => return false,
            Doc::Group { doc: child, fit } => match fit {
                Fit::Optimistic => return true,
                Fit::Pessimistic => return false,
                Fit::Neutral => work.push(child),
            },
            Doc::ForceUnfit(_) => return false,
        }
    }

    true
}

/// Lookahead for a flex break rendered flat: starting from `col`, does the
/// upcoming content fit up to the next break opportunity? The scan walks
/// the renderer's remaining work stack without consuming it.
fn fits_after_flex(width: usize, col: usize, stack: &[Cmd]) -> bool {
    if col > width {
        return false;
    }
    let mut remaining = width - col;
    let mut work: Vec<&Doc> = Vec::new();

    // The next command to execute sits at the top of the stack.
    let mut pending = stack.iter().rev().map(|cmd| cmd.doc);

    loop {
        let doc = match work.pop() {
            Some(doc) => doc,
            None => match pending.next() {
                Some(doc) => doc,
                None => return true,
            },
        };

        match doc {
            Doc::Empty => {}
            Doc::Text { width, .. } => {
                if *width > remaining {
                    return false;
                }
                remaining -= width;
            }
            Doc::Concat(parts) => {
                for part in parts.iter().rev() {
                    work.push(part);
                }
            }
            Doc::Nest { doc: child, .. } => work.push(child),
            // Any break or line is the next opportunity to wrap; what
            // fits up to here is all that matters.
            Doc::Break { .. } | Doc::Line => return true,
            Doc::Group { doc: child, fit } => match fit {
                Fit::Optimistic => return true,
                Fit::Pessimistic => return false,
                Fit::Neutral => work.push(child),
            },
            Doc::ForceUnfit(child) => work.push(child),
        }
    }
}
