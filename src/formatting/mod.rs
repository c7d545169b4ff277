//! Turning syntax trees into formatted text.
//!
//! The pipeline is migrations (optional rewrites), translation (tree to
//! layout document), then rendering (document to text, width-aware). Each
//! stage is pure; all configuration arrives through [`Options`].

mod comments;
mod literals;
mod migrations;
mod operators;
mod options;
mod syntax;
mod translator;

pub use options::{Arity, FormatError, Migrations, Options, SigilCallback, SigilInfo};
pub use syntax::{Decorations, Syntax};

use crate::algebra::{render, Doc};
use crate::language::{Comment, Node};

/// Format a tree to its canonical text.
///
/// `comments` must be sorted by line; they are re-attached to the statements
/// and elements they precede or trail. The result always ends with a single
/// newline.
pub fn format(root: &Node, comments: &[Comment], options: &Options) -> Result<String, FormatError> {
    let doc = to_document(root, comments, options)?;
    let mut output = render(&doc, options.width);
    while output.ends_with('\n') {
        output.pop();
    }
    output.push('\n');
    Ok(output)
}

/// Translate a tree to its layout document without rendering. Useful for
/// callers that want to render the same document at several widths.
pub fn to_document(
    root: &Node,
    comments: &[Comment],
    options: &Options,
) -> Result<Doc, FormatError> {
    if options.migrations.any() {
        let rewritten = migrations::apply(root, &options.migrations);
        let mut translator = translator::Translator::new(options, comments);
        translator.translate(&rewritten)
    } else {
        let mut translator = translator::Translator::new(options, comments);
        translator.translate(root)
    }
}
