//! Opt-in, semantics-preserving rewrites applied before translation.
//!
//! Each migration is a node-shape-triggered rewrite, independently
//! toggleable from [`Migrations`](crate::formatting::Migrations). The
//! rewrites run as one pre-pass producing a fresh tree; translation then
//! proceeds normally, with no knowledge of what was rewritten.

use tracing::debug;

use crate::formatting::options::Migrations;
use crate::language::{BinaryOp, BlockSection, Clause, Meta, Node, Segment, Target, UnaryOp};

/// Apply the enabled migrations to a tree, returning the rewritten copy.
pub fn apply(node: &Node, toggles: &Migrations) -> Node {
    rewrite(node, toggles)
}

fn rewrite(node: &Node, toggles: &Migrations) -> Node {
    match node {
        Node::Charlist { segments, meta } if toggles.charlist_sigils => {
            debug!(line = ?meta.line, "rewriting charlist to ~c sigil");
            Node::Sigil {
                name: "c".to_string(),
                segments: rewrite_segments(segments, toggles),
                modifiers: String::new(),
                meta: Meta {
                    delimiter: Some("\"".to_string()),
                    ..meta.clone()
                },
            }
        }

        Node::Call {
            target: Target::Local(name),
            args,
            sections,
            meta,
        } if toggles.negated_conditionals && name == "unless" && !args.is_empty() => {
            debug!(line = ?meta.line, "rewriting unless to if");
            let mut args: Vec<Node> = args.iter().map(|arg| rewrite(arg, toggles)).collect();
            let condition = args.remove(0);
            args.insert(0, negate(condition));
            Node::Call {
                target: Target::Local("if".to_string()),
                args,
                sections: rewrite_sections(sections, toggles),
                meta: meta.clone(),
            }
        }

        Node::Charlist { segments, meta } => Node::Charlist {
            segments: rewrite_segments(segments, toggles),
            meta: meta.clone(),
        },
        Node::Str { segments, meta } => Node::Str {
            segments: rewrite_segments(segments, toggles),
            meta: meta.clone(),
        },
        Node::Sigil {
            name,
            segments,
            modifiers,
            meta,
        } => Node::Sigil {
            name: name.clone(),
            segments: rewrite_segments(segments, toggles),
            modifiers: modifiers.clone(),
            meta: meta.clone(),
        },
        Node::List { elements, meta } => Node::List {
            elements: rewrite_all(elements, toggles),
            meta: meta.clone(),
        },
        Node::Pair { key, value, meta } => Node::Pair {
            key: Box::new(rewrite(key, toggles)),
            value: Box::new(rewrite(value, toggles)),
            meta: meta.clone(),
        },
        Node::Tuple { elements, meta } => Node::Tuple {
            elements: rewrite_all(elements, toggles),
            meta: meta.clone(),
        },
        Node::Map {
            name,
            entries,
            meta,
        } => Node::Map {
            name: name
                .as_ref()
                .map(|name| Box::new(rewrite(name, toggles))),
            entries: rewrite_all(entries, toggles),
            meta: meta.clone(),
        },
        Node::Bitstring { segments, meta } => Node::Bitstring {
            segments: rewrite_all(segments, toggles),
            meta: meta.clone(),
        },
        Node::Unary { op, operand, meta } => Node::Unary {
            op: *op,
            operand: Box::new(rewrite(operand, toggles)),
            meta: meta.clone(),
        },
        Node::Binary {
            op,
            left,
            right,
            meta,
        } => Node::Binary {
            op: *op,
            left: Box::new(rewrite(left, toggles)),
            right: Box::new(rewrite(right, toggles)),
            meta: meta.clone(),
        },
        Node::Call {
            target,
            args,
            sections,
            meta,
        } => Node::Call {
            target: rewrite_target(target, toggles),
            args: rewrite_all(args, toggles),
            sections: rewrite_sections(sections, toggles),
            meta: meta.clone(),
        },
        Node::Fn { clauses, meta } => Node::Fn {
            clauses: clauses
                .iter()
                .map(|clause| Clause {
                    patterns: rewrite_all(&clause.patterns, toggles),
                    guard: clause.guard.as_ref().map(|guard| rewrite(guard, toggles)),
                    body: rewrite_all(&clause.body, toggles),
                    meta: clause.meta.clone(),
                })
                .collect(),
            meta: meta.clone(),
        },
        Node::Block { body, meta } => Node::Block {
            body: rewrite_all(body, toggles),
            meta: meta.clone(),
        },

        Node::Integer { .. }
        | Node::Float { .. }
        | Node::CharToken { .. }
        | Node::Boolean { .. }
        | Node::Nil { .. }
        | Node::Atom { .. }
        | Node::Var { .. }
        | Node::Raw { .. } => node.clone(),
    }
}

fn rewrite_all(nodes: &[Node], toggles: &Migrations) -> Vec<Node> {
    nodes.iter().map(|node| rewrite(node, toggles)).collect()
}

fn rewrite_segments(segments: &[Segment], toggles: &Migrations) -> Vec<Segment> {
    segments
        .iter()
        .map(|segment| match segment {
            Segment::Literal(text) => Segment::Literal(text.clone()),
            Segment::Interpolation(node) => Segment::Interpolation(rewrite(node, toggles)),
        })
        .collect()
}

fn rewrite_sections(sections: &[BlockSection], toggles: &Migrations) -> Vec<BlockSection> {
    sections
        .iter()
        .map(|section| BlockSection {
            keyword: section.keyword.clone(),
            body: rewrite_all(&section.body, toggles),
            meta: section.meta.clone(),
        })
        .collect()
}

fn rewrite_target(target: &Target, toggles: &Migrations) -> Target {
    match target {
        Target::Local(name) => Target::Local(name.clone()),
        Target::Remote { module, name } => Target::Remote {
            module: Box::new(rewrite(module, toggles)),
            name: name.clone(),
        },
        Target::Anonymous(inner) => Target::Anonymous(Box::new(rewrite(inner, toggles))),
    }
}

/// Negate a condition through the rewrite table: relational operators flip
/// to their complement, existing negations unwrap, guard-predicate calls
/// wrap in `not`, anything else wraps in `!`.
fn negate(condition: Node) -> Node {
    let condition = match condition {
        Node::Binary {
            op,
            left,
            right,
            meta,
        } => match op.negation_complement() {
            Some(complement) => {
                return Node::Binary {
                    op: complement,
                    left,
                    right,
                    meta,
                };
            }
            None => Node::Binary {
                op,
                left,
                right,
                meta,
            },
        },
        other => other,
    };

    match condition {
        Node::Unary {
            op: UnaryOp::Not | UnaryOp::Bang,
            operand,
            ..
        } => *operand,
        node if is_guard_predicate(&node) => Node::Unary {
            op: UnaryOp::Not,
            operand: Box::new(node),
            meta: Meta::none(),
        },
        node => Node::Unary {
            op: UnaryOp::Bang,
            operand: Box::new(node),
            meta: Meta::none(),
        },
    }
}

/// Calls that are known to return a strict boolean: type-test guards
/// (`is_list(x)`) and predicate naming (`valid?(x)`), plus the boolean
/// connectives themselves.
fn is_guard_predicate(node: &Node) -> bool {
    match node {
        Node::Call {
            target: Target::Local(name),
            ..
        } => name.starts_with("is_") || name.ends_with('?'),
        Node::Binary { op, .. } => {
            op.logical_family() || matches!(op, BinaryOp::In | BinaryOp::NotIn)
        }
        Node::Boolean { .. } => true,
        _ => false,
    }
}
