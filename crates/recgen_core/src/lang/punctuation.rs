//! Punctuation vocabulary.
//!
//! This module defines the set of punctuation tokens the declaration parser cares about:
//! delimiters, separators, access markers, generic brackets, and the few markers used by member
//! declarations (`=`, `?`, `=>`).
//!
//! ## Notes
//! - Lookup via [`from_str`] is **case-sensitive**.
//! - `<` and `>` are registered as generic delimiters. The lexer never fuses them into `<<`/`>>`,
//!   so `List<List<int>>` closes with two separate `>` tokens.
//!
//! ## Examples
//! ```rust
//! use recgen_core::lang::punctuation::{self, PunctuationId};
//!
//! assert_eq!(punctuation::from_str("=>"), Some(PunctuationId::FatArrow));
//! assert_eq!(punctuation::as_str(PunctuationId::Lt), "<");
//! ```

/// Broad syntactic grouping for punctuation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PunctuationCategory {
    /// Brackets, braces and generic angle brackets.
    Delimiter,
    /// Separators like `,`, `;` and `:`.
    Separator,
    /// Access/path markers like `.`.
    Access,
    /// Misc markers like `?`, `=` and `=>`.
    Marker,
}

/// Stable identifier for punctuation tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PunctuationId {
    // Separators
    Comma,
    Colon,
    Semicolon,

    // Access
    Dot,

    // Markers
    Question,
    Eq,
    FatArrow,

    // Delimiters
    LParen,
    RParen,
    LBracket,
    RBracket,
    LBrace,
    RBrace,
    Lt,
    Gt,
}

/// Metadata for a punctuation token.
#[derive(Debug, Clone, Copy)]
pub struct PunctuationInfo {
    pub id: PunctuationId,
    pub canonical: &'static str,
    pub category: PunctuationCategory,
}

/// Registry of all punctuation tokens.
pub const PUNCTUATION: &[PunctuationInfo] = &[
    info(PunctuationId::Comma, ",", PunctuationCategory::Separator),
    info(PunctuationId::Colon, ":", PunctuationCategory::Separator),
    info(PunctuationId::Semicolon, ";", PunctuationCategory::Separator),
    info(PunctuationId::Dot, ".", PunctuationCategory::Access),
    info(PunctuationId::Question, "?", PunctuationCategory::Marker),
    info(PunctuationId::Eq, "=", PunctuationCategory::Marker),
    info(PunctuationId::FatArrow, "=>", PunctuationCategory::Marker),
    info(PunctuationId::LParen, "(", PunctuationCategory::Delimiter),
    info(PunctuationId::RParen, ")", PunctuationCategory::Delimiter),
    info(PunctuationId::LBracket, "[", PunctuationCategory::Delimiter),
    info(PunctuationId::RBracket, "]", PunctuationCategory::Delimiter),
    info(PunctuationId::LBrace, "{", PunctuationCategory::Delimiter),
    info(PunctuationId::RBrace, "}", PunctuationCategory::Delimiter),
    info(PunctuationId::Lt, "<", PunctuationCategory::Delimiter),
    info(PunctuationId::Gt, ">", PunctuationCategory::Delimiter),
];

/// Return the canonical spelling for a punctuation token.
pub fn as_str(id: PunctuationId) -> &'static str {
    info_for(id).canonical
}

/// Return the category for a punctuation token.
pub fn category(id: PunctuationId) -> PunctuationCategory {
    info_for(id).category
}

/// Return the full metadata entry for a punctuation token.
///
/// ## Panics
/// - If the registry is missing an entry for `id` (this indicates a programming error).
pub fn info_for(id: PunctuationId) -> &'static PunctuationInfo {
    PUNCTUATION
        .iter()
        .find(|p| p.id == id)
        .expect("punctuation info missing")
}

/// Resolve a punctuation spelling to its identifier.
pub fn from_str(s: &str) -> Option<PunctuationId> {
    PUNCTUATION.iter().find(|p| p.canonical == s).map(|p| p.id)
}

/// Resolve a single character to a punctuation token.
///
/// ## Notes
/// - Multi-character tokens (`=>`) are never returned; the lexer checks those first.
pub fn from_char(c: char) -> Option<PunctuationId> {
    let mut buf = [0u8; 4];
    from_str(c.encode_utf8(&mut buf))
}

const fn info(id: PunctuationId, canonical: &'static str, category: PunctuationCategory) -> PunctuationInfo {
    PunctuationInfo { id, canonical, category }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_punctuation_round_trips() {
        for p in PUNCTUATION {
            assert_eq!(from_str(p.canonical), Some(p.id));
        }
    }

    #[test]
    fn test_from_char_skips_multi_char_tokens() {
        assert_eq!(from_char('<'), Some(PunctuationId::Lt));
        assert_eq!(from_char(';'), Some(PunctuationId::Semicolon));
        assert_eq!(from_char('='), Some(PunctuationId::Eq));
        assert_eq!(from_char('+'), None);
    }

    #[test]
    fn test_angle_brackets_are_delimiters() {
        assert_eq!(category(PunctuationId::Lt), PunctuationCategory::Delimiter);
        assert_eq!(category(PunctuationId::Gt), PunctuationCategory::Delimiter);
    }
}
