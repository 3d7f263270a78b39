//! Token types for the declaration lexer.
//!
//! The lexer uses **registry-backed IDs** for vocabulary:
//! - `Keyword(KeywordId)` for reserved words
//! - `Punctuation(PunctuationId)` for the punctuation the parser inspects
//!
//! Everything the parser only needs to step over (operators inside initializers, literals) is kept
//! as its raw spelling.
//!
//! ## Notes
//! - Use `crate::token_helpers` for ergonomic token matching at call sites.

use crate::ast::Span;
use recgen_core::lang::keywords::{self, KeywordId};
use recgen_core::lang::punctuation::PunctuationId;

// ============================================================================
// TOKEN TYPES
// ============================================================================

/// Kind of token produced by the lexer.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    // ========== Keyword / punctuation (ID-based) ==========
    Keyword(KeywordId),
    Punctuation(PunctuationId),

    // ========== Identifiers and Literals ==========
    Ident(String),
    /// Numeric literal spelling, suffix included (`1.5f`, `0xFF`, `10_000L`).
    Number(String),
    /// String literal spelling, quotes and prefixes included.
    String(String),
    /// Character literal spelling, quotes included.
    Char(String),

    // ========== Other ==========
    /// Operators the parser never inspects (`+`, `&&`, `??`, `!=`, ...).
    Symbol(String),
    Eof,
}

/// A token with its kind and source span.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    /// Construct a new token.
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Self { kind, span }
    }
}

/// Resolve an identifier spelling to a keyword id, if reserved.
pub fn keyword_id(name: &str) -> Option<KeywordId> {
    keywords::from_str(name)
}
