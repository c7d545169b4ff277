//! Layout algebra: composable documents and the width-aware renderer

mod doc;
mod render;

// Re-export all public symbols
pub use doc::*;
pub use render::*;
