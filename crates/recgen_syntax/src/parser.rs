//! Parser for the declaration language
//!
//! Converts a token stream into a [`SourceFile`]: namespaces, `using` directives, type
//! declarations, and member signatures. Method bodies, initializers and attribute arguments are
//! skipped as balanced token runs and recorded as spans.
//!
//! ## Examples
//!
//! ```rust
//! use recgen_syntax::{lexer, parser};
//!
//! let source = "public partial class Player : Record { public int Hp = 10; }";
//! let tokens = lexer::lex(source).unwrap();
//! let file = parser::parse(&tokens).unwrap();
//! assert_eq!(file.items.len(), 1);
//! ```

use crate::ast::*;
use crate::diagnostics::CompileError;
use crate::lexer::{self, Token, TokenKind};
use recgen_core::lang::keywords::{self, KeywordId};
use recgen_core::lang::punctuation::PunctuationId;

// NOTE: This module is split across multiple files using `include!` to keep all parser
// methods in the same Rust module (preserving privacy + call patterns) while avoiding
// a single large source file.

include!("parser/core.rs");
include!("parser/helpers.rs");
include!("parser/decl.rs");
include!("parser/members.rs");
include!("parser/types.rs");
include!("parser/util.rs");
include!("parser/api.rs");
include!("parser/tests.rs");
