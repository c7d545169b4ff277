//! Formatter configuration.
//!
//! Everything a formatting call can be told is collected here and passed in
//! explicitly; there is no ambient registry. Configuration mistakes fail at
//! construction time, not in the middle of a render.

use std::collections::HashMap;
use std::fmt;

use crate::formatting::syntax::Decorations;

/// Default maximum line width.
pub const DEFAULT_WIDTH: usize = 98;

/// Arity selector for the locals-without-parens table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    Exact(u8),
    /// Any arity of at least one argument.
    Any,
}

/// Toggles for the opt-in, semantics-preserving rewrites.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Migrations {
    /// Rewrite `unless` into `if` with a negated condition.
    pub negated_conditionals: bool,
    /// Rewrite single-quoted charlists into `~c` sigil form.
    pub charlist_sigils: bool,
}

impl Migrations {
    pub fn any(&self) -> bool {
        self.negated_conditionals || self.charlist_sigils
    }
}

/// Context handed to a custom sigil callback.
#[derive(Debug, Clone, Copy)]
pub struct SigilInfo<'a> {
    pub file: Option<&'a str>,
    pub line: Option<u32>,
    pub name: &'a str,
    pub modifiers: &'a str,
    pub opening_delimiter: &'a str,
}

/// A user-supplied formatter for one uppercase sigil: receives the raw
/// body and must return the replacement body text.
pub type SigilCallback = Box<dyn Fn(&str, &SigilInfo) -> Result<String, String>>;

/// Errors surfaced to the caller of a formatting run.
#[derive(Debug)]
pub enum FormatError {
    /// A sigil callback was registered under a name that is not an
    /// uppercase identifier.
    InvalidSigilName(String),
    /// A sigil callback refused or failed to produce replacement text.
    SigilCallback { name: String, message: String },
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormatError::InvalidSigilName(name) => {
                write!(
                    f,
                    "invalid sigil name {:?}: custom sigils are single uppercase identifiers",
                    name
                )
            }
            FormatError::SigilCallback { name, message } => {
                write!(f, "sigil ~{} callback failed: {}", name, message)
            }
        }
    }
}

impl std::error::Error for FormatError {}

/// Per-call formatter configuration. Constructed once before translation
/// begins and threaded, immutably, through every recursive call.
pub struct Options {
    /// Maximum line width; `algebra::INFINITY` never wraps.
    pub width: usize,
    /// File name reported to sigil callbacks, when known.
    pub file: Option<String>,
    /// Calls that print without surrounding parentheses.
    pub locals_without_parens: Vec<(String, Arity)>,
    pub migrations: Migrations,
    pub decorations: Decorations,
    sigils: HashMap<String, SigilCallback>,
}

impl Default for Options {
    fn default() -> Options {
        Options::new()
    }
}

impl fmt::Debug for Options {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&str> = self.sigils.keys().map(|name| name.as_str()).collect();
        names.sort_unstable();
        f.debug_struct("Options")
            .field("width", &self.width)
            .field("file", &self.file)
            .field("locals_without_parens", &self.locals_without_parens)
            .field("migrations", &self.migrations)
            .field("sigils", &names)
            .finish()
    }
}

impl Options {
    pub fn new() -> Options {
        Options {
            width: DEFAULT_WIDTH,
            file: None,
            locals_without_parens: Vec::new(),
            migrations: Migrations::default(),
            decorations: Decorations::none(),
            sigils: HashMap::new(),
        }
    }

    pub fn with_width(mut self, width: usize) -> Options {
        self.width = width;
        self
    }

    pub fn with_file(mut self, file: impl Into<String>) -> Options {
        self.file = Some(file.into());
        self
    }

    pub fn with_migrations(mut self, migrations: Migrations) -> Options {
        self.migrations = migrations;
        self
    }

    pub fn with_decorations(mut self, decorations: Decorations) -> Options {
        self.decorations = decorations;
        self
    }

    /// Add one entry to the locals-without-parens table.
    pub fn without_parens(mut self, name: impl Into<String>, arity: Arity) -> Options {
        self.locals_without_parens.push((name.into(), arity));
        self
    }

    /// Register a custom sigil callback. Fails fast when the name is not an
    /// uppercase identifier, which is the only namespace open to users.
    pub fn register_sigil(
        &mut self,
        name: impl Into<String>,
        callback: SigilCallback,
    ) -> Result<(), FormatError> {
        let name = name.into();
        let valid = !name.is_empty()
            && name.chars().next().is_some_and(|c| c.is_ascii_uppercase())
            && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
        if !valid {
            return Err(FormatError::InvalidSigilName(name));
        }
        self.sigils.insert(name, callback);
        Ok(())
    }

    /// Builder-style variant of [`Options::register_sigil`].
    pub fn with_sigil(
        mut self,
        name: impl Into<String>,
        callback: SigilCallback,
    ) -> Result<Options, FormatError> {
        self.register_sigil(name, callback)?;
        Ok(self)
    }

    pub fn sigil(&self, name: &str) -> Option<&SigilCallback> {
        self.sigils.get(name)
    }

    /// Whether `name/arity` is registered to print without parentheses.
    pub fn local_without_parens(&self, name: &str, arity: usize) -> bool {
        self.locals_without_parens
            .iter()
            .any(|(local, selector)| {
                local == name
                    && match selector {
                        Arity::Exact(n) => usize::from(*n) == arity,
                        Arity::Any => arity >= 1,
                    }
            })
    }
}
