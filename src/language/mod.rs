//! Types representing the Rivet language Abstract Syntax Tree

mod comments;
mod types;

// Re-export all public symbols
pub use comments::*;
pub use types::*;
