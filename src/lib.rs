//! Formatting core for the Rivet language.
//!
//! This crate renders an already-parsed Rivet syntax tree back into
//! canonical, line-width-bounded source text. Parsing, file handling, and
//! command line concerns live elsewhere in the toolchain; the input here is
//! an annotated AST plus the comment stream the tokenizer set aside, and the
//! output is text (or, one level down, a layout document that can be
//! composed with other renderers).

pub mod algebra;
pub mod formatting;
pub mod language;
