//! The AST-to-document translator.
//!
//! This is the heart of the formatter: a recursive transform from node
//! shapes to layout documents, encoding the call, operator, container, and
//! clause layout policies. The translator walks the tree top-down and builds
//! documents bottom-up; all width-aware decisions are deferred to the
//! algebra renderer.

use tracing::debug;

use crate::algebra::{
    concat, empty, flex_break, force_unfit, group, group_with, line, nest, nest_reset, soft_break,
    text, zero_width, Doc, Fit,
};
use crate::formatting::comments::CommentCursor;
use crate::formatting::literals;
use crate::formatting::operators::{
    binary_operand_needs_parens, unary_operand_needs_parens, Assoc, NewlineClass, Side,
};
use crate::formatting::options::{FormatError, Options, SigilInfo};
use crate::formatting::syntax::Syntax;
use crate::language::{
    BinaryOp, BlockSection, Clause, Comment, Meta, Node, Segment, Target, UnaryOp,
};

/// Indentation added per nesting level.
const INDENT: usize = 2;

/// Where a node sits relative to its parent; drives the no-parens-call
/// relaxation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Ctx {
    /// Statement position: a block body or the top level.
    Block,
    /// A direct argument of a call.
    DirectArgument,
    /// Anywhere else: operator operands, container elements, map values.
    Operand,
}

pub struct Translator<'a> {
    options: &'a Options,
    cursor: CommentCursor<'a>,
    /// Set while rendering interpolation sub-expressions: suppresses all
    /// comment interleaving, since the embedded expression lives inside a
    /// single line of a literal.
    skip_comments: bool,
}

impl<'a> Translator<'a> {
    pub fn new(options: &'a Options, comments: &'a [Comment]) -> Translator<'a> {
        Translator {
            options,
            cursor: CommentCursor::new(comments),
            skip_comments: false,
        }
    }

    /// Translate a whole source unit: the root node's statements followed by
    /// any comments left in the queue.
    pub fn translate(&mut self, root: &Node) -> Result<Doc, FormatError> {
        let body: &[Node] = match root {
            Node::Block { body, .. } => body,
            other => std::slice::from_ref(other),
        };
        let (doc, _) = self.statements_to_doc(body, Some(u32::MAX))?;
        Ok(doc)
    }

    // ── Statement sequences ─────────────────────────────────────────────

    /// Render a sibling sequence, interleaving comments from the queue.
    /// Returns the document and how many elements (statements or comments)
    /// were emitted.
    fn statements_to_doc(
        &mut self,
        body: &[Node],
        closing: Option<u32>,
    ) -> Result<(Doc, usize), FormatError> {
        let mut parts: Vec<Doc> = Vec::new();
        let mut emitted = 0usize;
        let mut blank_pending = false;

        for node in body {
            if !self.skip_comments {
                if let Some(start) = node.start_line() {
                    for comment in self.cursor.take_before(start) {
                        let blank = blank_pending || comment.blank_before > 0;
                        push_element(&mut parts, &mut emitted, text(comment.text.as_str()), blank);
                        blank_pending = comment.blank_after > 0;
                    }
                }
            }

            let mut doc = self.node_to_doc(node, Ctx::Block)?;
            let mut blank_after = node.meta().newlines.unwrap_or(0) >= 2;

            // Comments whose line falls inside the just-rendered span trail
            // the statement on the same line.
            if !self.skip_comments {
                if let Some(end) = node.end_line() {
                    for comment in self.cursor.take_through(end) {
                        doc = concat(vec![doc, text(" "), text(comment.text.as_str())]);
                        blank_after = blank_after || comment.blank_after > 0;
                    }
                }
            }

            push_element(&mut parts, &mut emitted, doc, blank_pending);
            blank_pending = blank_after;
        }

        if !self.skip_comments {
            if let Some(closing) = closing {
                for comment in self.cursor.take_before(closing) {
                    let blank = blank_pending || comment.blank_before > 0;
                    push_element(&mut parts, &mut emitted, text(comment.text.as_str()), blank);
                    blank_pending = false;
                }
            }
        }

        Ok((concat(parts), emitted))
    }

    // ── Node dispatch ───────────────────────────────────────────────────

    fn node_to_doc(&mut self, node: &Node, ctx: Ctx) -> Result<Doc, FormatError> {
        match node {
            Node::Integer { token, .. } => {
                Ok(self.styled(Syntax::Number, literals::normalize_integer(token)))
            }
            Node::Float { token, .. } => {
                Ok(self.styled(Syntax::Number, literals::normalize_float(token)))
            }
            Node::CharToken { token, .. } => Ok(self.styled(Syntax::Number, token.clone())),
            Node::Boolean { value, .. } => {
                Ok(self.styled(Syntax::Boolean, if *value { "true" } else { "false" }))
            }
            Node::Nil { .. } => Ok(self.styled(Syntax::Nil, "nil")),
            Node::Atom { name, .. } => {
                Ok(self.styled(Syntax::Atom, format!(":{}", literals::atom_body(name))))
            }
            Node::Var { name, .. } => Ok(self.styled(Syntax::Variable, name.clone())),

            Node::Str { segments, meta } => self.string_to_doc(segments, meta, "\""),
            Node::Charlist { segments, meta } => self.string_to_doc(segments, meta, "'"),
            Node::Sigil {
                name,
                segments,
                modifiers,
                meta,
            } => self.sigil_to_doc(name, segments, modifiers, meta),

            Node::List { elements, meta } => {
                let open = self.styled(Syntax::List, "[");
                let close = self.styled(Syntax::List, "]");
                self.container_to_doc(open, elements, close, meta)
            }
            Node::Tuple { elements, meta } => {
                let open = self.styled(Syntax::Tuple, "{");
                let close = self.styled(Syntax::Tuple, "}");
                self.container_to_doc(open, elements, close, meta)
            }
            Node::Map {
                name,
                entries,
                meta,
            } => {
                let prefix = match name {
                    Some(name) => {
                        let name_doc = self.node_to_doc(name, Ctx::Operand)?;
                        concat(vec![self.styled(Syntax::Map, "%"), name_doc])
                    }
                    None => self.styled(Syntax::Map, "%"),
                };
                let open = concat(vec![prefix, self.styled(Syntax::Map, "{")]);
                let close = self.styled(Syntax::Map, "}");
                self.container_to_doc(open, entries, close, meta)
            }
            Node::Bitstring { segments, meta } => {
                self.container_to_doc(text("<<"), segments, text(">>"), meta)
            }

            Node::Pair { key, value, .. } => self.pair_to_doc(key, value),

            Node::Unary { op, operand, .. } => self.unary_to_doc(*op, operand),
            Node::Binary {
                op, left, right, ..
            } => self.binary_to_doc(*op, left, right),

            Node::Call {
                target,
                args,
                sections,
                meta,
            } => self.call_to_doc(target, args, sections, meta, ctx),

            Node::Fn { clauses, meta } => self.fn_to_doc(clauses, meta),

            Node::Block { body, meta } => {
                let (doc, emitted) = self.statements_to_doc(body, meta.closing_line)?;
                let wrapped = concat(vec![
                    text("("),
                    nest(concat(vec![soft_break(""), doc]), INDENT),
                    soft_break(""),
                    text(")"),
                ]);
                Ok(if emitted > 1 {
                    force_unfit(wrapped)
                } else {
                    group(wrapped)
                })
            }

            Node::Raw { text: raw, meta } => {
                debug!(line = ?meta.line, "emitting unrecognized node verbatim");
                let lines: Vec<Doc> = raw.split('\n').map(text).collect();
                Ok(crate::algebra::join(lines, line()))
            }
        }
    }

    // ── Literals with segments ──────────────────────────────────────────

    fn string_to_doc(
        &mut self,
        segments: &[Segment],
        meta: &Meta,
        default_delimiter: &str,
    ) -> Result<Doc, FormatError> {
        let delimiter = meta
            .delimiter
            .clone()
            .unwrap_or_else(|| default_delimiter.to_string());
        let heredoc = delimiter == "\"\"\"" || delimiter == "'''";

        let body = self.segments_to_doc(segments, &delimiter)?;
        let open = self.styled(Syntax::String, delimiter.clone());
        let close = self.styled(Syntax::String, delimiter);

        if heredoc {
            // Heredocs are inherently multi-line: opener, content lines kept
            // at their own alignment, closer on its own line.
            Ok(force_unfit(concat(vec![
                open,
                nest_reset(concat(vec![line(), body])),
                line(),
                close,
            ])))
        } else {
            Ok(concat(vec![open, body, close]))
        }
    }

    /// Literal segments with delimiter escaping and newline splitting;
    /// interpolations render at never-wrap width inside `#{...}`.
    fn segments_to_doc(
        &mut self,
        segments: &[Segment],
        delimiter: &str,
    ) -> Result<Doc, FormatError> {
        let mut parts = Vec::new();
        for segment in segments {
            match segment {
                Segment::Literal(raw) => {
                    let escaped = literals::escape_delimiter(raw, delimiter);
                    for (i, piece) in escaped.split('\n').enumerate() {
                        if i > 0 {
                            parts.push(line());
                        }
                        if !piece.is_empty() {
                            parts.push(self.styled(Syntax::String, piece));
                        }
                    }
                }
                Segment::Interpolation(expr) => {
                    let saved = self.skip_comments;
                    self.skip_comments = true;
                    let inner = self.node_to_doc(expr, Ctx::Block);
                    self.skip_comments = saved;
                    parts.push(text("#{"));
                    parts.push(group_with(inner?, Fit::Optimistic));
                    parts.push(text("}"));
                }
            }
        }
        Ok(concat(parts))
    }

    fn sigil_to_doc(
        &mut self,
        name: &str,
        segments: &[Segment],
        modifiers: &str,
        meta: &Meta,
    ) -> Result<Doc, FormatError> {
        let opening = meta.delimiter.clone().unwrap_or_else(|| "\"".to_string());
        let closing = closing_delimiter(&opening);
        let heredoc = opening == "\"\"\"" || opening == "'''";

        let body = match self.options.sigil(name) {
            Some(callback) => {
                let raw: String = segments
                    .iter()
                    .map(|segment| match segment {
                        Segment::Literal(text) => text.as_str(),
                        Segment::Interpolation(_) => "",
                    })
                    .collect();
                let info = SigilInfo {
                    file: self.options.file.as_deref(),
                    line: meta.line,
                    name,
                    modifiers,
                    opening_delimiter: &opening,
                };
                let replaced =
                    callback(&raw, &info).map_err(|message| FormatError::SigilCallback {
                        name: name.to_string(),
                        message,
                    })?;
                let lines: Vec<Doc> = replaced
                    .split('\n')
                    .map(|piece| self.styled(Syntax::String, piece))
                    .collect();
                crate::algebra::join(lines, line())
            }
            None => self.segments_to_doc(segments, &closing)?,
        };

        let open = self.styled(Syntax::String, format!("~{}{}", name, opening));
        let close = self.styled(Syntax::String, format!("{}{}", closing, modifiers));

        if heredoc {
            Ok(force_unfit(concat(vec![
                open,
                nest_reset(concat(vec![line(), body])),
                line(),
                close,
            ])))
        } else {
            Ok(concat(vec![open, body, close]))
        }
    }

    // ── Containers ──────────────────────────────────────────────────────

    fn container_to_doc(
        &mut self,
        open: Doc,
        elements: &[Node],
        close: Doc,
        meta: &Meta,
    ) -> Result<Doc, FormatError> {
        if elements.is_empty() {
            return Ok(concat(vec![open, close]));
        }

        let items: Vec<&Node> = elements.iter().collect();
        let (body, has_comments) = self.elements_body(&items, Ctx::Operand, meta.closing_line)?;

        let doc = concat(vec![
            open,
            nest(concat(vec![soft_break(""), body]), INDENT),
            soft_break(""),
            close,
        ]);
        Ok(if has_comments {
            force_unfit(doc)
        } else {
            group(doc)
        })
    }

    /// Comma-separated elements with comment interleaving. Returns the body
    /// document and whether any comment forced multi-line layout.
    fn elements_body(
        &mut self,
        elements: &[&Node],
        ctx: Ctx,
        closing: Option<u32>,
    ) -> Result<(Doc, bool), FormatError> {
        let mut parts = Vec::new();
        let mut has_comments = false;
        let mut blank_pending = false;
        let count = elements.len();

        for (i, element) in elements.iter().enumerate() {
            if !self.skip_comments {
                if let Some(start) = element.start_line() {
                    for comment in self.cursor.take_before(start) {
                        has_comments = true;
                        // At most one blank line survives around a comment.
                        if (blank_pending || comment.blank_before > 0) && !parts.is_empty() {
                            parts.push(line());
                        }
                        parts.push(text(comment.text.as_str()));
                        parts.push(line());
                        blank_pending = comment.blank_after > 0;
                    }
                }
            }
            if blank_pending {
                parts.push(line());
                blank_pending = false;
            }

            let mut doc = self.node_to_doc(element, ctx)?;
            if i + 1 < count {
                doc = concat(vec![doc, text(",")]);
            }

            if !self.skip_comments {
                if let Some(end) = element.end_line() {
                    for comment in self.cursor.take_through(end) {
                        has_comments = true;
                        doc = concat(vec![doc, text(" "), text(comment.text.as_str())]);
                    }
                }
            }

            parts.push(doc);
            if i + 1 < count {
                parts.push(soft_break(" "));
            }
        }

        if !self.skip_comments {
            if let Some(closing) = closing {
                for comment in self.cursor.take_before(closing) {
                    has_comments = true;
                    parts.push(line());
                    if comment.blank_before > 0 {
                        parts.push(line());
                    }
                    parts.push(text(comment.text.as_str()));
                }
            }
        }

        Ok((concat(parts), has_comments))
    }

    fn pair_to_doc(&mut self, key: &Node, value: &Node) -> Result<Doc, FormatError> {
        let value_doc = self.node_to_doc(value, Ctx::Operand)?;

        // Atom keys use keyword shorthand; anything else is arrow syntax.
        let key_doc = match key {
            Node::Atom { name, .. } => {
                let rendered = self.styled(Syntax::Atom, format!("{}:", literals::atom_body(name)));
                return Ok(concat(vec![rendered, text(" "), value_doc]));
            }
            _ => self.node_to_doc(key, Ctx::Operand)?,
        };
        Ok(concat(vec![key_doc, text(" => "), value_doc]))
    }

    // ── Operators ───────────────────────────────────────────────────────

    fn unary_to_doc(&mut self, op: UnaryOp, operand: &Node) -> Result<Doc, FormatError> {
        let mut doc = self.node_to_doc(operand, Ctx::Operand)?;
        if unary_operand_needs_parens(op, operand) {
            doc = concat(vec![text("("), doc, text(")")]);
        }
        let symbol = self.styled(Syntax::Operator, op.symbol());
        Ok(if op.is_word() {
            concat(vec![symbol, text(" "), doc])
        } else {
            concat(vec![symbol, doc])
        })
    }

    fn binary_to_doc(
        &mut self,
        op: BinaryOp,
        left: &Node,
        right: &Node,
    ) -> Result<Doc, FormatError> {
        match op.newline_class() {
            NewlineClass::NoSpace => {
                let left_doc = self.operand_to_doc(op, Side::Left, left)?;
                let right_doc = self.operand_to_doc(op, Side::Right, right)?;
                let symbol = self.styled(Syntax::Operator, op.symbol());
                Ok(concat(vec![left_doc, symbol, right_doc]))
            }
            NewlineClass::NoNewline => {
                let left_doc = self.operand_to_doc(op, Side::Left, left)?;
                let right_doc = self.operand_to_doc(op, Side::Right, right)?;
                let symbol = self.styled(Syntax::Operator, op.symbol());
                Ok(concat(vec![
                    left_doc,
                    text(" "),
                    symbol,
                    text(" "),
                    right_doc,
                ]))
            }
            NewlineClass::StrictBeforeLeft => {
                // Pipeline chains: collect the left spine so every operand
                // starts an equally-indented line when breaking.
                let mut chain = vec![right];
                let mut head = left;
                while let Node::Binary {
                    op: inner,
                    left: l,
                    right: r,
                    ..
                } = head
                {
                    if *inner != op {
                        break;
                    }
                    chain.push(r);
                    head = l;
                }
                chain.push(head);
                chain.reverse();

                let mut parts = vec![self.operand_to_doc(op, Side::Left, chain[0])?];
                for operand in &chain[1..] {
                    parts.push(soft_break(" "));
                    parts.push(self.styled(Syntax::Operator, op.symbol()));
                    parts.push(text(" "));
                    parts.push(self.operand_to_doc(op, Side::Right, operand)?);
                }
                Ok(group(concat(parts)))
            }
            NewlineClass::StrictBeforeRight => {
                // Guard-style chains: break before the operator, flush with
                // the first operand.
                let mut chain = vec![left];
                let mut tail = right;
                while let Node::Binary {
                    op: inner,
                    left: l,
                    right: r,
                    ..
                } = tail
                {
                    if *inner != op {
                        break;
                    }
                    chain.push(l);
                    tail = r;
                }
                chain.push(tail);

                let mut parts = vec![self.operand_to_doc(op, Side::Left, chain[0])?];
                for operand in &chain[1..] {
                    parts.push(soft_break(" "));
                    parts.push(self.styled(Syntax::Operator, op.symbol()));
                    parts.push(text(" "));
                    parts.push(self.operand_to_doc(op, Side::Right, operand)?);
                }
                Ok(group(concat(parts)))
            }
            NewlineClass::FlexAfter => {
                // Default: break after the operator, continuation nested one
                // level. Same-operator chains share a single group and a
                // single indentation level, collected along whichever spine
                // the operator associates to.
                let mut chain: Vec<&Node> = Vec::new();
                match op.assoc() {
                    Assoc::Left => {
                        chain.push(right);
                        let mut head = left;
                        while let Node::Binary {
                            op: inner,
                            left: l,
                            right: r,
                            ..
                        } = head
                        {
                            if *inner != op {
                                break;
                            }
                            chain.push(r);
                            head = l;
                        }
                        chain.push(head);
                        chain.reverse();
                    }
                    Assoc::Right => {
                        chain.push(left);
                        let mut tail = right;
                        while let Node::Binary {
                            op: inner,
                            left: l,
                            right: r,
                            ..
                        } = tail
                        {
                            if *inner != op {
                                break;
                            }
                            chain.push(l);
                            tail = r;
                        }
                        chain.push(tail);
                    }
                }

                let mut parts = Vec::new();
                let mut rest = Vec::new();
                for (i, operand) in chain.iter().enumerate() {
                    // Every collected operand except the one on the spine's
                    // far end sits on the associative side of its operator.
                    let side = match op.assoc() {
                        Assoc::Left if i == 0 => Side::Left,
                        Assoc::Left => Side::Right,
                        Assoc::Right if i + 1 == chain.len() => Side::Right,
                        Assoc::Right => Side::Left,
                    };
                    let doc = self.operand_to_doc(op, side, operand)?;
                    if i == 0 {
                        parts.push(doc);
                    } else {
                        rest.push(text(" "));
                        rest.push(self.styled(Syntax::Operator, op.symbol()));
                        rest.push(flex_break(" "));
                        rest.push(doc);
                    }
                }
                parts.push(nest(concat(rest), INDENT));
                Ok(group(concat(parts)))
            }
        }
    }

    fn operand_to_doc(
        &mut self,
        parent: BinaryOp,
        side: Side,
        operand: &Node,
    ) -> Result<Doc, FormatError> {
        let doc = self.node_to_doc(operand, Ctx::Operand)?;
        Ok(if binary_operand_needs_parens(parent, side, operand) {
            concat(vec![text("("), doc, text(")")])
        } else {
            doc
        })
    }

    // ── Calls ───────────────────────────────────────────────────────────

    fn call_to_doc(
        &mut self,
        target: &Target,
        args: &[Node],
        sections: &[BlockSection],
        meta: &Meta,
        ctx: Ctx,
    ) -> Result<Doc, FormatError> {
        let target_doc = self.target_to_doc(target)?;

        if !sections.is_empty() {
            return self.block_call_to_doc(target_doc, args, sections, meta);
        }

        if args.is_empty() {
            return Ok(concat(vec![target_doc, text("()")]));
        }

        let no_parens = matches!(target, Target::Local(name)
                if self.options.local_without_parens(name, args.len()))
            && matches!(ctx, Ctx::Block | Ctx::DirectArgument);

        let items = self.split_keyword_tail(args, meta);
        let (body, has_comments) = self.elements_body(&items, Ctx::DirectArgument, None)?;

        let doc = if no_parens {
            concat(vec![
                target_doc,
                text(" "),
                nest(body, INDENT),
            ])
        } else {
            concat(vec![
                target_doc,
                text("("),
                nest(concat(vec![soft_break(""), body]), INDENT),
                soft_break(""),
                text(")"),
            ])
        };
        Ok(if has_comments {
            force_unfit(doc)
        } else {
            group(doc)
        })
    }

    /// The last positional argument, when it is a non-empty keyword list,
    /// prints as a trailing keyword sequence without brackets, unless a
    /// comment belongs structurally before it and the brackets are needed
    /// to anchor that comment.
    fn split_keyword_tail<'n>(&self, args: &'n [Node], meta: &Meta) -> Vec<&'n Node> {
        let (last, rest) = match args.split_last() {
            Some(split) => split,
            None => return Vec::new(),
        };

        let eligible = last.is_keyword_list() && !self.keyword_tail_hides_comment(last, meta);
        if !eligible {
            return args.iter().collect();
        }

        let Node::List { elements, .. } = last else {
            return args.iter().collect();
        };
        rest.iter().chain(elements.iter()).collect()
    }

    fn keyword_tail_hides_comment(&self, list: &Node, call_meta: &Meta) -> bool {
        if self.skip_comments {
            return false;
        }
        let (Some(call_line), Some(list_line)) = (call_meta.line, list.start_line()) else {
            return false;
        };
        self.cursor
            .peek()
            .is_some_and(|comment| comment.line >= call_line && comment.line < list_line)
    }

    fn target_to_doc(&mut self, target: &Target) -> Result<Doc, FormatError> {
        match target {
            Target::Local(name) => Ok(self.styled(Syntax::Call, name.clone())),
            Target::Remote { module, name } => {
                let module_doc = self.receiver_to_doc(module)?;
                Ok(concat(vec![
                    module_doc,
                    text("."),
                    self.styled(Syntax::Call, name.clone()),
                ]))
            }
            Target::Anonymous(inner) => {
                let inner_doc = self.receiver_to_doc(inner)?;
                Ok(concat(vec![inner_doc, text(".")]))
            }
        }
    }

    /// The receiver of a dot: operator expressions and anonymous functions
    /// must be parenthesized or the dot rebinds.
    fn receiver_to_doc(&mut self, receiver: &Node) -> Result<Doc, FormatError> {
        let doc = self.node_to_doc(receiver, Ctx::Operand)?;
        Ok(match receiver {
            Node::Binary { .. } | Node::Unary { .. } | Node::Fn { .. } => {
                concat(vec![text("("), doc, text(")")])
            }
            _ => doc,
        })
    }

    fn block_call_to_doc(
        &mut self,
        target_doc: Doc,
        args: &[Node],
        sections: &[BlockSection],
        meta: &Meta,
    ) -> Result<Doc, FormatError> {
        let mut parts = vec![target_doc];

        if !args.is_empty() {
            let items = self.split_keyword_tail(args, meta);
            let (body, _) = self.elements_body(&items, Ctx::DirectArgument, None)?;
            parts.push(text(" "));
            parts.push(group(nest(body, INDENT)));
        }

        for (i, section) in sections.iter().enumerate() {
            if i == 0 {
                parts.push(text(format!(" {}", section.keyword)));
            } else {
                parts.push(line());
                parts.push(text(section.keyword.clone()));
            }
            let (body, emitted) = self.statements_to_doc(&section.body, section.meta.closing_line)?;
            if emitted > 0 {
                parts.push(nest(concat(vec![line(), body]), INDENT));
            }
        }

        parts.push(line());
        parts.push(text("end"));
        Ok(force_unfit(concat(parts)))
    }

    // ── Anonymous functions ─────────────────────────────────────────────

    fn fn_to_doc(&mut self, clauses: &[Clause], meta: &Meta) -> Result<Doc, FormatError> {
        let multi_line_source = match (meta.line, meta.closing_line) {
            (Some(first), Some(last)) => last > first,
            _ => false,
        };
        let inline = clauses.len() == 1
            && clauses[0].body.len() <= 1
            && !multi_line_source;

        if inline {
            let clause = &clauses[0];
            let head = match self.clause_head_to_doc(clause)? {
                Doc::Empty => empty(),
                head => concat(vec![text(" "), head]),
            };
            let (body, _) = self.statements_to_doc(&clause.body, None)?;
            return Ok(group(concat(vec![
                text("fn"),
                head,
                text(" ->"),
                nest(concat(vec![soft_break(" "), body]), INDENT),
                soft_break(" "),
                text("end"),
            ])));
        }

        let mut parts = vec![text("fn")];
        let mut clause_docs = Vec::new();
        for clause in clauses {
            let head = self.clause_head_to_doc(clause)?;
            let (body, _) = self.statements_to_doc(&clause.body, None)?;
            clause_docs.push(concat(vec![
                line(),
                head,
                text(" ->"),
                nest(concat(vec![line(), body]), INDENT),
            ]));
        }
        parts.push(nest(concat(clause_docs), INDENT));
        parts.push(line());
        parts.push(text("end"));
        Ok(force_unfit(concat(parts)))
    }

    /// Patterns and optional guard, with no surrounding whitespace; empty
    /// when the clause binds nothing.
    fn clause_head_to_doc(&mut self, clause: &Clause) -> Result<Doc, FormatError> {
        if clause.patterns.is_empty() && clause.guard.is_none() {
            return Ok(empty());
        }

        let mut docs = Vec::new();
        for pattern in &clause.patterns {
            docs.push(self.node_to_doc(pattern, Ctx::Operand)?);
        }
        let mut head = crate::algebra::join(docs, text(", "));

        if let Some(guard) = &clause.guard {
            let guard_doc = self.node_to_doc(guard, Ctx::Operand)?;
            head = concat(vec![
                head,
                text(" "),
                self.styled(Syntax::Operator, "when"),
                text(" "),
                guard_doc,
            ]);
        }
        Ok(head)
    }

    // ── Decoration ──────────────────────────────────────────────────────

    fn styled(&self, syntax: Syntax, content: impl Into<String>) -> Doc {
        match self.options.decorations.get(syntax) {
            Some((open, close)) => concat(vec![
                zero_width(open.to_string()),
                text(content),
                zero_width(close.to_string()),
            ]),
            None => text(content),
        }
    }
}

/// Append one statement or comment to a sequence, with at most one blank
/// line of separation. Blank-line clamping lives in exactly one place.
fn push_element(parts: &mut Vec<Doc>, emitted: &mut usize, doc: Doc, blank_before: bool) {
    if *emitted > 0 {
        parts.push(line());
        if blank_before {
            parts.push(line());
        }
    }
    parts.push(doc);
    *emitted += 1;
}

fn closing_delimiter(opening: &str) -> String {
    match opening {
        "(" => ")".to_string(),
        "[" => "]".to_string(),
        "{" => "}".to_string(),
        "<" => ">".to_string(),
        other => other.to_string(),
    }
}
