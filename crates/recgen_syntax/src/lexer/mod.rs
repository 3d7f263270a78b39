//! Lexer for the declaration language
//!
//! Handles tokenization including:
//! - Keywords and identifiers (including verbatim `@name` identifiers)
//! - Numeric, character and string literals (regular, verbatim `@"..."`, interpolated `$"..."`,
//!   raw `"""..."""`)
//! - Punctuation by registry ID, other operators as raw symbols
//! - Line comments, block comments and preprocessor lines (skipped)
//!
//! ## Module Structure
//!
//! - `tokens` - Token types (TokenKind, Token)

pub mod tokens;

pub use tokens::{Token, TokenKind, keyword_id};

use crate::ast::Span;
use crate::diagnostics::CompileError;
use recgen_core::lang::punctuation::PunctuationId;

// ============================================================================
// LEXER STATE
// ============================================================================

/// Lexer for declaration source code.
///
/// Whitespace is insignificant; `<` and `>` are always emitted as single tokens so that nested
/// generic argument lists close one bracket at a time.
pub struct Lexer<'a> {
    source: &'a str,
    chars: std::iter::Peekable<std::str::CharIndices<'a>>,
    current_pos: usize,
    /// Open parens, brackets and braces, for unmatched-close detection
    bracket_depth: usize,
    tokens: Vec<Token>,
    errors: Vec<CompileError>,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer for the given source code.
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            chars: source.char_indices().peekable(),
            current_pos: 0,
            bracket_depth: 0,
            tokens: Vec::new(),
            errors: Vec::new(),
        }
    }

    /// Tokenize the entire source code.
    ///
    /// Returns a vector of tokens on success, or a vector of errors on failure.
    /// The token stream always ends with an `Eof` token.
    pub fn tokenize(mut self) -> Result<Vec<Token>, Vec<CompileError>> {
        while !self.is_at_end() {
            self.scan_token();
        }

        self.tokens.push(Token::new(
            TokenKind::Eof,
            Span::new(self.current_pos, self.current_pos),
        ));

        if self.errors.is_empty() {
            Ok(self.tokens)
        } else {
            Err(self.errors)
        }
    }

    // ========================================================================
    // Core character handling
    // ========================================================================

    fn is_at_end(&mut self) -> bool {
        self.chars.peek().is_none()
    }

    fn peek(&mut self) -> Option<char> {
        self.chars.peek().map(|(_, c)| *c)
    }

    fn peek_next(&self) -> Option<char> {
        let mut iter = self.source[self.current_pos..].chars();
        iter.next();
        iter.next()
    }

    fn advance(&mut self) -> Option<char> {
        if let Some((pos, c)) = self.chars.next() {
            self.current_pos = pos + c.len_utf8();
            Some(c)
        } else {
            None
        }
    }

    fn match_char(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.advance();
            true
        } else {
            false
        }
    }

    // ========================================================================
    // Main scanning dispatch
    // ========================================================================

    fn scan_token(&mut self) {
        while let Some(c) = self.peek() {
            if c.is_whitespace() {
                self.advance();
            } else {
                break;
            }
        }

        let start = self.current_pos;

        let Some(c) = self.advance() else {
            return;
        };

        match c {
            // Comments and preprocessor lines
            '/' => {
                if self.match_char('/') {
                    self.skip_line();
                } else if self.match_char('*') {
                    self.skip_block_comment(start);
                } else {
                    self.operator(start, c);
                }
            }
            '#' => self.skip_line(),

            // Punctuation
            '=' => {
                if self.match_char('>') {
                    self.add_punct(PunctuationId::FatArrow, start);
                } else if self.match_char('=') {
                    self.add_symbol(start);
                } else {
                    self.add_punct(PunctuationId::Eq, start);
                }
            }
            '<' | '>' => {
                if c == '<' && self.match_char('<') {
                    // `<<` never appears inside type arguments; `>>` must stay split.
                    self.match_char('=');
                    self.add_symbol(start);
                } else if self.match_char('=') {
                    self.add_symbol(start);
                } else if c == '<' {
                    self.add_punct(PunctuationId::Lt, start);
                } else {
                    self.add_punct(PunctuationId::Gt, start);
                }
            }
            '?' => {
                if self.match_char('?') {
                    self.match_char('=');
                    self.add_symbol(start);
                } else {
                    self.add_punct(PunctuationId::Question, start);
                }
            }
            '(' => self.open_bracket(PunctuationId::LParen, start),
            ')' => self.close_bracket(PunctuationId::RParen, start),
            '[' => self.open_bracket(PunctuationId::LBracket, start),
            ']' => self.close_bracket(PunctuationId::RBracket, start),
            '{' => self.open_bracket(PunctuationId::LBrace, start),
            '}' => self.close_bracket(PunctuationId::RBrace, start),
            ',' => self.add_punct(PunctuationId::Comma, start),
            ';' => self.add_punct(PunctuationId::Semicolon, start),
            ':' => self.add_punct(PunctuationId::Colon, start),
            '.' => {
                if self.peek().is_some_and(|n| n.is_ascii_digit()) {
                    self.scan_number(start);
                } else {
                    self.add_punct(PunctuationId::Dot, start);
                }
            }

            // Literals
            '"' => {
                if self.peek() == Some('"') && self.peek_next() == Some('"') {
                    self.scan_raw_string(start);
                } else {
                    self.scan_string(start, false, false);
                }
            }
            '\'' => self.scan_char(start),
            '@' => self.scan_at(start),
            '$' => {
                let verbatim = self.match_char('@');
                if self.match_char('"') {
                    self.scan_string(start, verbatim, true);
                } else {
                    self.unexpected('$', start);
                }
            }
            '0'..='9' => self.scan_number(start),

            // Identifiers and keywords
            _ if is_ident_start(c) => self.scan_identifier(start),

            '+' | '-' | '*' | '%' | '!' | '&' | '|' | '^' | '~' => self.operator(start, c),

            _ => self.unexpected(c, start),
        }
    }

    // ========================================================================
    // Token helpers
    // ========================================================================

    fn add_token(&mut self, kind: TokenKind, start: usize) {
        self.tokens.push(Token::new(kind, Span::new(start, self.current_pos)));
    }

    fn add_punct(&mut self, id: PunctuationId, start: usize) {
        self.add_token(TokenKind::Punctuation(id), start);
    }

    fn add_symbol(&mut self, start: usize) {
        let spelling = self.source[start..self.current_pos].to_string();
        self.add_token(TokenKind::Symbol(spelling), start);
    }

    fn unexpected(&mut self, c: char, start: usize) {
        self.errors.push(CompileError::new(
            format!("Unexpected character '{}'", c),
            Span::new(start, self.current_pos),
        ));
    }

    /// Scan an operator the parser never inspects: doubled (`&&`, `++`), compound (`+=`) or `->`.
    fn operator(&mut self, start: usize, first: char) {
        if matches!(first, '+' | '-' | '&' | '|') && self.match_char(first) {
            // doubled
        } else if first == '-' && self.match_char('>') {
            // pointer member access
        } else {
            self.match_char('=');
        }
        self.add_symbol(start);
    }

    /// Emit a bracket token and track bracket depth.
    fn open_bracket(&mut self, kind: PunctuationId, start: usize) {
        self.bracket_depth += 1;
        self.add_punct(kind, start);
    }

    /// Emit a closing bracket token and decrement bracket depth.
    /// Produces an error if there's no matching opening bracket.
    fn close_bracket(&mut self, kind: PunctuationId, start: usize) {
        if self.bracket_depth == 0 {
            self.errors.push(CompileError::new(
                "Unmatched closing bracket".to_string(),
                Span::new(start, self.current_pos),
            ));
        } else {
            self.bracket_depth -= 1;
        }
        self.add_punct(kind, start);
    }

    // ========================================================================
    // Trivia
    // ========================================================================

    fn skip_line(&mut self) {
        while let Some(c) = self.peek() {
            if c == '\n' {
                break;
            }
            self.advance();
        }
    }

    fn skip_block_comment(&mut self, start: usize) {
        loop {
            match self.advance() {
                Some('*') if self.peek() == Some('/') => {
                    self.advance();
                    return;
                }
                Some(_) => {}
                None => {
                    self.errors.push(CompileError::new(
                        "Unterminated block comment".to_string(),
                        Span::new(start, self.current_pos),
                    ));
                    return;
                }
            }
        }
    }

    // ========================================================================
    // Literal scanning
    // ========================================================================

    /// Scan a string body after its opening quote.
    ///
    /// - `verbatim`: no backslash escapes, `""` escapes a quote, newlines allowed.
    /// - `interpolated`: `{...}` holes may contain nested strings; `{{` escapes a brace.
    fn scan_string(&mut self, start: usize, verbatim: bool, interpolated: bool) {
        let mut hole_depth = 0usize;
        loop {
            let Some(c) = self.advance() else {
                self.unterminated("string", start);
                return;
            };
            match c {
                '"' if hole_depth > 0 => self.skip_nested_string(start),
                '"' if verbatim && self.peek() == Some('"') => {
                    self.advance();
                }
                '"' => break,
                '\\' if !verbatim && hole_depth == 0 => {
                    self.advance();
                }
                '\n' if !verbatim && hole_depth == 0 => {
                    self.unterminated("string", start);
                    return;
                }
                '{' if interpolated => {
                    if hole_depth == 0 && self.peek() == Some('{') {
                        self.advance();
                    } else {
                        hole_depth += 1;
                    }
                }
                '}' if interpolated && hole_depth > 0 => hole_depth -= 1,
                _ => {}
            }
        }
        self.add_token(TokenKind::String(self.source[start..self.current_pos].to_string()), start);
    }

    /// Skip a regular string nested in an interpolation hole.
    fn skip_nested_string(&mut self, start: usize) {
        loop {
            match self.advance() {
                Some('"') => return,
                Some('\\') => {
                    self.advance();
                }
                Some(_) => {}
                None => {
                    self.unterminated("string", start);
                    return;
                }
            }
        }
    }

    /// `"""..."""`: the opening run of quotes determines the closing run.
    fn scan_raw_string(&mut self, start: usize) {
        let mut quotes = 1;
        while self.match_char('"') {
            quotes += 1;
        }
        let mut run = 0;
        loop {
            match self.advance() {
                Some('"') => {
                    run += 1;
                    if run == quotes {
                        break;
                    }
                }
                Some(_) => run = 0,
                None => {
                    self.unterminated("raw string", start);
                    return;
                }
            }
        }
        self.add_token(TokenKind::String(self.source[start..self.current_pos].to_string()), start);
    }

    fn scan_char(&mut self, start: usize) {
        loop {
            match self.advance() {
                Some('\'') => break,
                Some('\\') => {
                    self.advance();
                }
                Some('\n') | None => {
                    self.unterminated("character", start);
                    return;
                }
                Some(_) => {}
            }
        }
        self.add_token(TokenKind::Char(self.source[start..self.current_pos].to_string()), start);
    }

    fn unterminated(&mut self, what: &str, start: usize) {
        self.errors.push(CompileError::new(
            format!("Unterminated {} literal", what),
            Span::new(start, self.current_pos),
        ));
    }

    /// `@"verbatim"`, `@$"verbatim interpolated"` or `@identifier`.
    fn scan_at(&mut self, start: usize) {
        if self.match_char('"') {
            self.scan_string(start, true, false);
        } else if self.peek() == Some('$') && self.peek_next() == Some('"') {
            self.advance();
            self.advance();
            self.scan_string(start, true, true);
        } else if self.peek().is_some_and(is_ident_start) {
            let name_start = self.current_pos;
            self.consume_ident_continue();
            // A verbatim identifier is never a keyword.
            let name = self.source[name_start..self.current_pos].to_string();
            self.add_token(TokenKind::Ident(name), start);
        } else {
            self.unexpected('@', start);
        }
    }

    /// Numbers are kept as spellings: digits, separators, radix prefixes, fractions, exponents
    /// and type suffixes.
    fn scan_number(&mut self, start: usize) {
        let hex = self.source[start..].starts_with("0x") || self.source[start..].starts_with("0X");
        self.consume_number_run(hex);
        if !hex && self.peek() == Some('.') && self.peek_next().is_some_and(|c| c.is_ascii_digit()) {
            self.advance();
            self.consume_number_run(false);
        }
        self.add_token(TokenKind::Number(self.source[start..self.current_pos].to_string()), start);
    }

    fn consume_number_run(&mut self, hex: bool) {
        while let Some(c) = self.peek() {
            if !(c.is_ascii_alphanumeric() || c == '_') {
                break;
            }
            self.advance();
            if !hex && matches!(c, 'e' | 'E') && matches!(self.peek(), Some('+') | Some('-')) {
                self.advance();
            }
        }
    }

    // ========================================================================
    // Identifier scanning
    // ========================================================================

    fn consume_ident_continue(&mut self) {
        while let Some(c) = self.peek() {
            if is_ident_continue(c) {
                self.advance();
            } else {
                break;
            }
        }
    }

    fn scan_identifier(&mut self, start: usize) {
        self.consume_ident_continue();

        let spelling = &self.source[start..self.current_pos];

        if let Some(id) = keyword_id(spelling) {
            self.add_token(TokenKind::Keyword(id), start);
        } else {
            self.add_token(TokenKind::Ident(spelling.to_string()), start);
        }
    }
}

// ============================================================================
// Helper functions
// ============================================================================

fn is_ident_start(c: char) -> bool {
    c.is_alphabetic() || c == '_'
}

fn is_ident_continue(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Convenience function to lex a source string.
///
/// This is a shorthand for `Lexer::new(source).tokenize()`.
#[tracing::instrument(skip_all, fields(source_len = source.len()))]
pub fn lex(source: &str) -> Result<Vec<Token>, Vec<CompileError>> {
    Lexer::new(source).tokenize()
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use recgen_core::lang::keywords::KeywordId;

    fn kinds(source: &str) -> Vec<TokenKind> {
        lex(source)
            .unwrap()
            .into_iter()
            .map(|t| t.kind)
            .filter(|k| !matches!(k, TokenKind::Eof))
            .collect()
    }

    #[test]
    fn test_punctuation_registry_parity() {
        use recgen_core::lang::punctuation::{self, PunctuationId};

        for p in punctuation::PUNCTUATION {
            match p.id {
                // Closing delimiters error when unmatched; use a matching pair.
                PunctuationId::LParen | PunctuationId::RParen => {
                    let tokens = lex("()").unwrap();
                    assert!(tokens[0].kind.is_punctuation(PunctuationId::LParen));
                    assert!(tokens[1].kind.is_punctuation(PunctuationId::RParen));
                }
                PunctuationId::LBracket | PunctuationId::RBracket => {
                    let tokens = lex("[]").unwrap();
                    assert!(tokens[0].kind.is_punctuation(PunctuationId::LBracket));
                    assert!(tokens[1].kind.is_punctuation(PunctuationId::RBracket));
                }
                PunctuationId::LBrace | PunctuationId::RBrace => {
                    let tokens = lex("{}").unwrap();
                    assert!(tokens[0].kind.is_punctuation(PunctuationId::LBrace));
                    assert!(tokens[1].kind.is_punctuation(PunctuationId::RBrace));
                }
                _ => {
                    let tokens = lex(p.canonical).unwrap_or_else(|errs| {
                        panic!("lex({:?}) failed: {:?}", p.canonical, errs);
                    });
                    assert_eq!(tokens.len(), 2, "lex({:?}) produced {:?}", p.canonical, tokens);
                    assert!(tokens[0].kind.is_punctuation(p.id), "lex({:?})", p.canonical);
                }
            }
        }
    }

    #[test]
    fn test_keyword_registry_parity() {
        use recgen_core::lang::keywords;

        for k in keywords::KEYWORDS {
            let tokens = lex(k.canonical).unwrap_or_else(|errs| panic!("lex({:?}) failed: {:?}", k.canonical, errs));
            assert_eq!(tokens.len(), 2, "expected token + EOF for keyword {:?}, got {:?}", k.id, tokens);
            assert!(tokens[0].kind.is_keyword(k.id));
            assert!(matches!(tokens[1].kind, TokenKind::Eof));
        }
    }

    #[test]
    fn test_class_header() {
        let toks = kinds("public sealed partial class Player : Record");
        assert_eq!(toks[0], TokenKind::Keyword(KeywordId::Public));
        assert_eq!(toks[1], TokenKind::Keyword(KeywordId::Sealed));
        assert_eq!(toks[2], TokenKind::Keyword(KeywordId::Partial));
        assert_eq!(toks[3], TokenKind::Keyword(KeywordId::Class));
        assert_eq!(toks[4], TokenKind::Ident("Player".to_string()));
        assert_eq!(toks[5], TokenKind::Punctuation(PunctuationId::Colon));
        assert_eq!(toks[6], TokenKind::Ident("Record".to_string()));
    }

    #[test]
    fn test_nested_generics_close_one_bracket_at_a_time() {
        let toks = kinds("List<List<int>> x;");
        let gts = toks.iter().filter(|k| k.is_punctuation(PunctuationId::Gt)).count();
        assert_eq!(gts, 2);
    }

    #[test]
    fn test_comparison_operators_are_symbols() {
        let toks = kinds("a <= b >= c == d => e");
        assert_eq!(toks[1], TokenKind::Symbol("<=".to_string()));
        assert_eq!(toks[3], TokenKind::Symbol(">=".to_string()));
        assert_eq!(toks[5], TokenKind::Symbol("==".to_string()));
        assert_eq!(toks[7], TokenKind::Punctuation(PunctuationId::FatArrow));
    }

    #[test]
    fn test_shifts() {
        let toks = kinds("a << 2 >> 1");
        assert_eq!(toks[1], TokenKind::Symbol("<<".to_string()));
        assert!(toks[3].is_punctuation(PunctuationId::Gt));
        assert!(toks[4].is_punctuation(PunctuationId::Gt));
    }

    #[test]
    fn test_comments_and_preprocessor_lines_are_skipped() {
        let toks = kinds("#nullable enable\n// line\nint /* block\n comment */ x; #region\n");
        assert_eq!(
            toks,
            vec![
                TokenKind::Keyword(KeywordId::Int),
                TokenKind::Ident("x".to_string()),
                TokenKind::Punctuation(PunctuationId::Semicolon),
            ]
        );
    }

    #[test]
    fn test_string_forms_keep_their_spelling() {
        let source = r#""a\"b" @"c""d" $"{x} {{y}}" $"{(f ? "p" : "q")}" @"multi
line""#;
        let toks = kinds(source);
        assert_eq!(toks.len(), 5, "{toks:?}");
        assert_eq!(toks[0], TokenKind::String(r#""a\"b""#.to_string()));
        assert_eq!(toks[1], TokenKind::String(r#"@"c""d""#.to_string()));
        assert_eq!(toks[2], TokenKind::String(r#"$"{x} {{y}}""#.to_string()));
        assert_eq!(toks[3], TokenKind::String(r#"$"{(f ? "p" : "q")}""#.to_string()));
        assert!(matches!(&toks[4], TokenKind::String(s) if s.contains('\n')));
    }

    #[test]
    fn test_raw_string() {
        let toks = kinds(r#"""" has "quotes" """ ;"#);
        assert_eq!(toks[0], TokenKind::String(r#"""" has "quotes" """"#.to_string()));
        assert!(toks[1].is_punctuation(PunctuationId::Semicolon));
    }

    #[test]
    fn test_char_literals() {
        let toks = kinds(r"'a' '\'' '\n'");
        assert_eq!(toks[0], TokenKind::Char("'a'".to_string()));
        assert_eq!(toks[1], TokenKind::Char(r"'\''".to_string()));
        assert_eq!(toks[2], TokenKind::Char(r"'\n'".to_string()));
    }

    #[test]
    fn test_numbers() {
        let toks = kinds("42 3.14f 1_000_000L 0xFF 1e-5 .5m 1.0e+3d");
        let spellings: Vec<_> = toks
            .iter()
            .map(|k| match k {
                TokenKind::Number(s) => s.as_str(),
                other => panic!("expected number, got {other:?}"),
            })
            .collect();
        assert_eq!(spellings, vec!["42", "3.14f", "1_000_000L", "0xFF", "1e-5", ".5m", "1.0e+3d"]);
    }

    #[test]
    fn test_member_access_after_number_is_not_a_fraction() {
        let toks = kinds("1.ToString()");
        assert_eq!(toks[0], TokenKind::Number("1".to_string()));
        assert!(toks[1].is_punctuation(PunctuationId::Dot));
    }

    #[test]
    fn test_verbatim_identifier_is_never_a_keyword() {
        let toks = kinds("int @class;");
        assert_eq!(toks[1], TokenKind::Ident("class".to_string()));
    }

    #[test]
    fn test_unicode_identifier_accepted() {
        let toks = kinds("int café;");
        assert_eq!(toks[1], TokenKind::Ident("café".to_string()));
    }

    #[test]
    fn test_operators() {
        let toks = kinds("a && b || !c ?? d ++ -- += -> %");
        let symbols: Vec<_> = toks
            .iter()
            .filter_map(|k| match k {
                TokenKind::Symbol(s) => Some(s.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(symbols, vec!["&&", "||", "!", "??", "++", "--", "+=", "->", "%"]);
    }

    #[test]
    fn test_unmatched_closing_bracket() {
        for src in [")", "]", "}"] {
            let errors = lex(src).unwrap_err();
            assert_eq!(errors.len(), 1);
            assert!(errors[0].message.contains("Unmatched closing bracket"));
        }
    }

    #[test]
    fn test_unterminated_literals() {
        let errors = lex("\"abc\nint x;").unwrap_err();
        assert!(errors[0].message.contains("Unterminated string literal"));

        let errors = lex("/* never closed").unwrap_err();
        assert!(errors[0].message.contains("Unterminated block comment"));

        let errors = lex("'a").unwrap_err();
        assert!(errors[0].message.contains("Unterminated character literal"));
    }

    #[test]
    fn test_unexpected_character() {
        let errors = lex("int `x;").unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].message.contains("Unexpected character '`'"));
    }

    #[test]
    fn test_spans_are_byte_offsets() {
        let tokens = lex("int  x").unwrap();
        assert_eq!(tokens[0].span, Span::new(0, 3));
        assert_eq!(tokens[1].span, Span::new(5, 6));
        assert_eq!(tokens[2].span, Span::new(6, 6));
    }
}
