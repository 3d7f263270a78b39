//! Declaration frontend for recgen: lexer, parser, AST, diagnostics.
//!
//! The accepted language is a C#-like declaration subset: `using` directives, namespaces, classes,
//! structs, interfaces, enums, and member signatures. Expression bodies are recorded as source
//! spans and never parsed.
//!
//! ## Notes
//! - This crate is intentionally "syntax-only": it does not do name resolution or type checking.
//! - Vocabulary identity (keywords/punctuation) comes from `recgen_core::lang` registries.
//!
//! ## Examples
//! ```rust
//! use recgen_syntax::{ast::Item, parser};
//!
//! let file = parser::parse_source("namespace Game { public partial class Player : Record { public int Hp; } }").unwrap();
//! assert!(matches!(file.items[0].node, Item::Namespace(_)));
//! ```

pub mod ast;
pub mod diagnostics;
pub mod lexer;
pub mod parser;
pub mod token_helpers;
