//! Abstract Syntax Tree types consumed by the formatter.
//!
//! The parser lives in a separate crate; what arrives here is a tree of
//! tagged nodes with advisory source positions attached. Positions are
//! advisory in the strict sense: a node with no line number still formats,
//! it just opts out of the heuristics (comment interleaving, original-span
//! checks) that need to know where it came from.

use serde::{Deserialize, Serialize};

/// Source metadata attached to a node. Every field is optional and the
/// formatter must behave sensibly when any of them is absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Meta {
    /// Line the node starts on, 1-based.
    pub line: Option<u32>,
    /// Line of the closing delimiter, for nodes that have one.
    pub closing_line: Option<u32>,
    /// Opening delimiter as written in the source, for strings, charlists
    /// and sigils (`"`, `"""`, `'`, `(`, `/`, ...).
    pub delimiter: Option<String>,
    /// Number of newlines that followed this expression in the source,
    /// used to preserve (at most one) blank line between statements.
    pub newlines: Option<u32>,
}

impl Meta {
    /// Metadata carrying only a starting line.
    pub fn at(line: u32) -> Meta {
        Meta {
            line: Some(line),
            ..Meta::default()
        }
    }

    /// Metadata with no position information at all.
    pub fn none() -> Meta {
        Meta::default()
    }
}

/// A piece of a string, charlist, or sigil body: either literal text or an
/// interpolated expression.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Segment {
    Literal(String),
    Interpolation(Node),
}

/// One clause of an anonymous function: patterns, optional guard, body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Clause {
    pub patterns: Vec<Node>,
    pub guard: Option<Node>,
    pub body: Vec<Node>,
    pub meta: Meta,
}

/// One keyword section of a call's trailing block (`do`, `else`, `after`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockSection {
    pub keyword: String,
    pub body: Vec<Node>,
    pub meta: Meta,
}

/// What a call is invoked on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Target {
    /// A bare local name: `foo(...)`.
    Local(String),
    /// A qualified call: `expr.name(...)`.
    Remote { module: Box<Node>, name: String },
    /// Calling a function value: `expr.(...)`.
    Anonymous(Box<Node>),
}

/// Unary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnaryOp {
    /// `not`
    Not,
    /// `!`
    Bang,
    /// `-`
    Neg,
    /// `+`
    Pos,
    /// `^` (pin)
    Pin,
}

/// Binary operators. Layout behaviour (precedence, associativity, newline
/// class) is table-driven in `formatting::operators`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BinaryOp {
    /// `when`
    When,
    /// `::`
    Spec,
    /// `=`
    Match,
    /// `||`
    OrOr,
    /// `or`
    Or,
    /// `&&`
    AndAnd,
    /// `and`
    And,
    /// `==`
    Eq,
    /// `!=`
    NotEq,
    /// `===`
    StrictEq,
    /// `!==`
    StrictNotEq,
    /// `=~`
    Matches,
    /// `<`
    Lt,
    /// `>`
    Gt,
    /// `<=`
    Le,
    /// `>=`
    Ge,
    /// `|>`
    Pipe,
    /// `in`
    In,
    /// `not in`
    NotIn,
    /// `<>`
    Concat,
    /// `++`
    ListConcat,
    /// `--`
    ListDiff,
    /// `+`
    Add,
    /// `-`
    Sub,
    /// `*`
    Mul,
    /// `/`
    Div,
    /// `..`
    Range,
    /// `\\`
    Default,
}

/// A node in the Rivet AST.
///
/// Literal nodes carry the original token text so the formatter can apply
/// its cosmetic normalizations (underscore grouping, hex casing) to what the
/// author actually wrote.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Node {
    Integer {
        token: String,
        meta: Meta,
    },
    Float {
        token: String,
        meta: Meta,
    },
    /// Character literals such as `?a` and `?\n`, passed through verbatim.
    CharToken {
        token: String,
        meta: Meta,
    },
    Boolean {
        value: bool,
        meta: Meta,
    },
    Nil {
        meta: Meta,
    },
    Atom {
        name: String,
        meta: Meta,
    },
    Var {
        name: String,
        meta: Meta,
    },
    /// Double-quoted string or heredoc (delimiter in `meta.delimiter`).
    Str {
        segments: Vec<Segment>,
        meta: Meta,
    },
    /// Single-quoted charlist or charlist heredoc.
    Charlist {
        segments: Vec<Segment>,
        meta: Meta,
    },
    Sigil {
        name: String,
        segments: Vec<Segment>,
        modifiers: String,
        meta: Meta,
    },
    List {
        elements: Vec<Node>,
        meta: Meta,
    },
    /// A keyword entry (`key: value`) inside a list, map, or argument tail.
    Pair {
        key: Box<Node>,
        value: Box<Node>,
        meta: Meta,
    },
    Tuple {
        elements: Vec<Node>,
        meta: Meta,
    },
    /// `%{...}` or, with a name, `%Name{...}`.
    Map {
        name: Option<Box<Node>>,
        entries: Vec<Node>,
        meta: Meta,
    },
    Bitstring {
        segments: Vec<Node>,
        meta: Meta,
    },
    Unary {
        op: UnaryOp,
        operand: Box<Node>,
        meta: Meta,
    },
    Binary {
        op: BinaryOp,
        left: Box<Node>,
        right: Box<Node>,
        meta: Meta,
    },
    Call {
        target: Target,
        args: Vec<Node>,
        /// Trailing `do ... end` sections, empty when the call has none.
        sections: Vec<BlockSection>,
        meta: Meta,
    },
    /// Anonymous function, `fn ... end`.
    Fn {
        clauses: Vec<Clause>,
        meta: Meta,
    },
    /// A sequence of expressions (a file body, a parenthesized block).
    Block {
        body: Vec<Node>,
        meta: Meta,
    },
    /// Escape hatch for foreign or compiler-injected shapes the printable
    /// grammar does not cover: emitted verbatim, best effort.
    Raw {
        text: String,
        meta: Meta,
    },
}

impl Node {
    pub fn meta(&self) -> &Meta {
        match self {
            Node::Integer { meta, .. }
            | Node::Float { meta, .. }
            | Node::CharToken { meta, .. }
            | Node::Boolean { meta, .. }
            | Node::Nil { meta }
            | Node::Atom { meta, .. }
            | Node::Var { meta, .. }
            | Node::Str { meta, .. }
            | Node::Charlist { meta, .. }
            | Node::Sigil { meta, .. }
            | Node::List { meta, .. }
            | Node::Pair { meta, .. }
            | Node::Tuple { meta, .. }
            | Node::Map { meta, .. }
            | Node::Bitstring { meta, .. }
            | Node::Unary { meta, .. }
            | Node::Binary { meta, .. }
            | Node::Call { meta, .. }
            | Node::Fn { meta, .. }
            | Node::Block { meta, .. }
            | Node::Raw { meta, .. } => meta,
        }
    }

    /// First source line this node occupies, if known.
    pub fn start_line(&self) -> Option<u32> {
        self.meta().line
    }

    /// Last source line this node occupies, if known. Falls back to the
    /// starting line when there is no closing delimiter position.
    pub fn end_line(&self) -> Option<u32> {
        let meta = self.meta();
        meta.closing_line.or(meta.line)
    }

    /// Whether the node spanned more than one line in the original source.
    /// Unknown positions answer `false`, disabling span-based heuristics.
    pub fn spans_multiple_lines(&self) -> bool {
        match (self.start_line(), self.end_line()) {
            (Some(first), Some(last)) => last > first,
            _ => false,
        }
    }

    /// A non-empty list whose every element is a keyword pair. Such a list
    /// in final argument position is eligible to print without brackets.
    pub fn is_keyword_list(&self) -> bool {
        match self {
            Node::List { elements, .. } => {
                !elements.is_empty()
                    && elements
                        .iter()
                        .all(|element| matches!(element, Node::Pair { .. }))
            }
            _ => false,
        }
    }
}

impl UnaryOp {
    pub fn symbol(&self) -> &'static str {
        match self {
            UnaryOp::Not => "not",
            UnaryOp::Bang => "!",
            UnaryOp::Neg => "-",
            UnaryOp::Pos => "+",
            UnaryOp::Pin => "^",
        }
    }

    /// Word operators need a space before their operand; symbolic ones
    /// attach directly.
    pub fn is_word(&self) -> bool {
        matches!(self, UnaryOp::Not)
    }
}

impl BinaryOp {
    pub fn symbol(&self) -> &'static str {
        match self {
            BinaryOp::When => "when",
            BinaryOp::Spec => "::",
            BinaryOp::Match => "=",
            BinaryOp::OrOr => "||",
            BinaryOp::Or => "or",
            BinaryOp::AndAnd => "&&",
            BinaryOp::And => "and",
            BinaryOp::Eq => "==",
            BinaryOp::NotEq => "!=",
            BinaryOp::StrictEq => "===",
            BinaryOp::StrictNotEq => "!==",
            BinaryOp::Matches => "=~",
            BinaryOp::Lt => "<",
            BinaryOp::Gt => ">",
            BinaryOp::Le => "<=",
            BinaryOp::Ge => ">=",
            BinaryOp::Pipe => "|>",
            BinaryOp::In => "in",
            BinaryOp::NotIn => "not in",
            BinaryOp::Concat => "<>",
            BinaryOp::ListConcat => "++",
            BinaryOp::ListDiff => "--",
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Range => "..",
            BinaryOp::Default => "\\\\",
        }
    }
}
