//! Operator layout tables: precedence, associativity, newline behaviour,
//! and the parenthesization policy for nested operands.

use crate::language::{BinaryOp, Node, UnaryOp};

/// Which side an operand sits on relative to its parent operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Assoc {
    Left,
    Right,
}

/// How an operator behaves when its expression has to span lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NewlineClass {
    /// No surrounding whitespace and no breaking (`..`, `::`).
    NoSpace,
    /// Single spaces, but never a line break across the operator.
    NoNewline,
    /// Left-associative chains that break *before* the operator, each
    /// operand equally indented (`|>`).
    StrictBeforeLeft,
    /// Right-associative chains that break before the operator without
    /// extra indentation relative to the first operand (`when`).
    StrictBeforeRight,
    /// The default: break after the operator, nested one level.
    FlexAfter,
}

/// Precedence of unary operators; higher binds tighter than any binary.
pub const UNARY_PRECEDENCE: u8 = 210;

impl BinaryOp {
    pub fn precedence(&self) -> u8 {
        match self {
            BinaryOp::When => 40,
            BinaryOp::Spec => 50,
            BinaryOp::Match => 60,
            BinaryOp::OrOr | BinaryOp::Or => 70,
            BinaryOp::AndAnd | BinaryOp::And => 80,
            BinaryOp::Eq
            | BinaryOp::NotEq
            | BinaryOp::StrictEq
            | BinaryOp::StrictNotEq
            | BinaryOp::Matches => 90,
            BinaryOp::Lt | BinaryOp::Gt | BinaryOp::Le | BinaryOp::Ge => 100,
            BinaryOp::Pipe => 110,
            BinaryOp::In | BinaryOp::NotIn => 120,
            BinaryOp::Concat | BinaryOp::ListConcat | BinaryOp::ListDiff => 130,
            BinaryOp::Add | BinaryOp::Sub => 140,
            BinaryOp::Mul | BinaryOp::Div => 150,
            BinaryOp::Range => 160,
            BinaryOp::Default => 170,
        }
    }

    pub fn assoc(&self) -> Assoc {
        match self {
            BinaryOp::When
            | BinaryOp::Spec
            | BinaryOp::Match
            | BinaryOp::Concat
            | BinaryOp::ListConcat
            | BinaryOp::ListDiff
            | BinaryOp::Range
            | BinaryOp::Default => Assoc::Right,
            _ => Assoc::Left,
        }
    }

    pub fn newline_class(&self) -> NewlineClass {
        match self {
            BinaryOp::Range | BinaryOp::Spec => NewlineClass::NoSpace,
            BinaryOp::In | BinaryOp::NotIn | BinaryOp::Default => NewlineClass::NoNewline,
            BinaryOp::Pipe => NewlineClass::StrictBeforeLeft,
            BinaryOp::When => NewlineClass::StrictBeforeRight,
            _ => NewlineClass::FlexAfter,
        }
    }

    /// Operators whose nested occurrences always print parenthesized, even
    /// under themselves: `1 in (2 in 3)` style chains read ambiguously.
    pub fn always_parenthesizes_nested(&self) -> bool {
        matches!(self, BinaryOp::In | BinaryOp::NotIn | BinaryOp::Range)
    }

    /// The boolean connectives. Mixing two different members without
    /// parentheses is disallowed by policy, whatever precedence says.
    pub fn logical_family(&self) -> bool {
        matches!(
            self,
            BinaryOp::Or | BinaryOp::OrOr | BinaryOp::And | BinaryOp::AndAnd
        )
    }

    /// The relational complement used by the negated-conditional rewrite.
    pub fn negation_complement(&self) -> Option<BinaryOp> {
        match self {
            BinaryOp::Eq => Some(BinaryOp::NotEq),
            BinaryOp::NotEq => Some(BinaryOp::Eq),
            BinaryOp::StrictEq => Some(BinaryOp::StrictNotEq),
            BinaryOp::StrictNotEq => Some(BinaryOp::StrictEq),
            BinaryOp::Lt => Some(BinaryOp::Ge),
            BinaryOp::Ge => Some(BinaryOp::Lt),
            BinaryOp::Gt => Some(BinaryOp::Le),
            BinaryOp::Le => Some(BinaryOp::Gt),
            _ => None,
        }
    }
}

/// Whether a binary operand needs parentheses under `parent`, given the
/// side it occupies.
pub fn binary_operand_needs_parens(parent: BinaryOp, side: Side, operand: &Node) -> bool {
    let child = match operand {
        Node::Binary { op, .. } => *op,
        // Unary operators bind tighter than every binary operator.
        _ => return false,
    };

    if child == parent {
        if parent.always_parenthesizes_nested() {
            return true;
        }
        // Same-operator chains print flat on the associative side.
        return match parent.assoc() {
            Assoc::Left => side != Side::Left,
            Assoc::Right => side != Side::Right,
        };
    }

    if parent.logical_family() && child.logical_family() {
        return true;
    }

    if child.precedence() > parent.precedence() {
        return false;
    }

    if child.precedence() < parent.precedence() {
        return true;
    }

    // Equal precedence, different operator (`a + b - c`): flat only on the
    // associative side.
    match parent.assoc() {
        Assoc::Left => side != Side::Left,
        Assoc::Right => side != Side::Right,
    }
}

/// Whether the operand of a unary operator needs parentheses.
pub fn unary_operand_needs_parens(op: UnaryOp, operand: &Node) -> bool {
    match operand {
        Node::Binary { op: inner, .. } => {
            // `-x..y` would re-parse as `(-x)..y`; no-space operators bind
            // tighter visually, everything else needs the parens anyway.
            inner.precedence() < UNARY_PRECEDENCE
        }
        Node::Unary { op: inner, .. } => {
            // `--x` and `^^x` are lexed as different tokens; symbolic
            // doubling always separates with parens. `not not x` is fine.
            !(op.is_word() && inner.is_word())
        }
        _ => false,
    }
}
