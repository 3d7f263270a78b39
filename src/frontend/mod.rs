//! recgen frontend
//!
//! - `compilation`: symbol table over parsed files, the in-repo [`SemanticModel`] host
//! - `diagnostics`: rendering of syntax errors with source context
//!
//! [`SemanticModel`]: crate::backend::semantic::SemanticModel

// Syntax components are provided by the shared recgen_syntax crate.
pub use recgen_syntax::{ast, lexer, parser};

pub mod compilation;
pub mod diagnostics;

pub use compilation::{Compilation, FileErrors, ParsedUnit};
