/// Token-stream helpers and error recovery.
///
/// This chunk contains the low-level primitives used throughout parsing:
/// - Peeking/consuming tokens (`peek`, `advance`)
/// - Matching / expecting keywords, punctuation and contextual identifiers
/// - Skipping balanced token runs and measuring expression extents
/// - Error recovery (`synchronize`)
impl<'a> Parser<'a> {
    // ========================================================================
    // Helpers
    // ========================================================================

    /// Return `true` if the current token is [`TokenKind::Eof`].
    fn is_at_end(&self) -> bool {
        matches!(self.peek().kind, TokenKind::Eof)
    }

    /// Return the current token without consuming it.
    fn peek(&self) -> &Token {
        &self.tokens[self.pos.min(self.tokens.len() - 1)]
    }

    /// Return the token `n` positions ahead without consuming anything (clamped to `Eof`).
    fn peek_at(&self, n: usize) -> &Token {
        let idx = (self.pos + n).min(self.tokens.len() - 1);
        &self.tokens[idx]
    }

    /// Advance to the next token and return the token we just consumed.
    fn advance(&mut self) -> &Token {
        if !self.is_at_end() {
            self.pos += 1;
        }
        &self.tokens[self.pos.saturating_sub(1)]
    }

    /// End offset of the most recently consumed token.
    fn previous_end(&self) -> usize {
        if self.pos == 0 {
            self.peek().span.start
        } else {
            self.tokens[self.pos - 1].span.end
        }
    }

    fn current_span(&self) -> Span {
        self.peek().span
    }

    fn check_keyword(&self, id: KeywordId) -> bool {
        self.peek().kind.is_keyword(id)
    }

    fn check_punct(&self, id: PunctuationId) -> bool {
        self.peek().kind.is_punctuation(id)
    }

    /// Return `true` if the current token is the identifier `name` (contextual keyword).
    fn check_ident(&self, name: &str) -> bool {
        self.peek().kind.is_ident(name)
    }

    fn check_symbol(&self, spelling: &str) -> bool {
        matches!(&self.peek().kind, TokenKind::Symbol(s) if s == spelling)
    }

    fn match_keyword(&mut self, id: KeywordId) -> bool {
        if self.check_keyword(id) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn match_punct(&mut self, id: PunctuationId) -> bool {
        if self.check_punct(id) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn expect_punct(&mut self, id: PunctuationId, msg: &str) -> Result<&Token, CompileError> {
        if self.check_punct(id) {
            Ok(self.advance())
        } else {
            Err(CompileError::syntax(
                format!("{}, found {:?}", msg, self.peek().kind),
                self.peek().span,
            ))
        }
    }

    fn error_here(&self, msg: &str) -> CompileError {
        CompileError::syntax(format!("{}, found {:?}", msg, self.peek().kind), self.current_span())
    }

    /// Return `true` for `(`, `[` and `{`.
    fn at_open_delimiter(&self) -> bool {
        self.check_punct(PunctuationId::LParen)
            || self.check_punct(PunctuationId::LBracket)
            || self.check_punct(PunctuationId::LBrace)
    }

    fn at_close_delimiter(&self) -> bool {
        self.check_punct(PunctuationId::RParen)
            || self.check_punct(PunctuationId::RBracket)
            || self.check_punct(PunctuationId::RBrace)
    }

    /// Skip a balanced `(...)`, `[...]` or `{...}` run starting at the current open delimiter.
    ///
    /// ## Returns
    /// - The span covering the run, delimiters included.
    fn skip_balanced(&mut self) -> Result<Span, CompileError> {
        let start = self.current_span();
        if !self.at_open_delimiter() {
            return Err(self.error_here("Expected '(', '[' or '{'"));
        }
        let mut depth = 0usize;
        loop {
            if self.is_at_end() {
                return Err(CompileError::syntax("Unclosed delimiter".to_string(), start));
            }
            if self.at_open_delimiter() {
                depth += 1;
            } else if self.at_close_delimiter() {
                depth -= 1;
            }
            self.advance();
            if depth == 0 {
                return Ok(Span::new(start.start, self.previous_end()));
            }
        }
    }

    /// Measure an expression without parsing it.
    ///
    /// The expression ends before a `;` or an unmatched closing delimiter at nesting depth 0.
    /// With `stop_at_comma`, a `,` at depth 0 that is not inside a generic argument list also ends
    /// it (field declarators, enum members).
    ///
    /// ## Errors
    /// - The expression is empty.
    fn expression_extent(&mut self, stop_at_comma: bool) -> Result<Span, CompileError> {
        let start = self.current_span().start;
        let mut depth = 0usize;
        let mut angle_depth = 0usize;
        let mut end = None;
        loop {
            if self.is_at_end() {
                break;
            }
            if self.at_open_delimiter() {
                depth += 1;
            } else if self.at_close_delimiter() {
                if depth == 0 {
                    break;
                }
                depth -= 1;
            } else if depth == 0 && self.check_punct(PunctuationId::Semicolon) {
                break;
            } else if depth == 0 && angle_depth == 0 && stop_at_comma && self.check_punct(PunctuationId::Comma) {
                break;
            } else if self.check_punct(PunctuationId::Lt) {
                angle_depth += 1;
            } else if self.check_punct(PunctuationId::Gt) {
                angle_depth = angle_depth.saturating_sub(1);
            }
            end = Some(self.advance().span.end);
        }
        match end {
            Some(end) => Ok(Span::new(start, end)),
            None => Err(self.error_here("Expected expression")),
        }
    }

    /// Skip a member the AST does not model (events, indexers, operators, destructors, delegates).
    ///
    /// The member ends at a `;` at depth 0, or at a `{...}` body that is not part of an
    /// initializer or expression body.
    fn skip_member(&mut self) -> Result<(), CompileError> {
        let mut in_expression = false;
        loop {
            if self.is_at_end() || self.check_punct(PunctuationId::RBrace) {
                return Err(self.error_here("Expected ';' or member body"));
            }
            if self.check_punct(PunctuationId::LParen) || self.check_punct(PunctuationId::LBracket) {
                self.skip_balanced()?;
                continue;
            }
            if self.check_punct(PunctuationId::LBrace) {
                self.skip_balanced()?;
                if !in_expression && !self.check_punct(PunctuationId::Eq) {
                    self.match_punct(PunctuationId::Semicolon);
                    return Ok(());
                }
                continue;
            }
            if self.match_punct(PunctuationId::Semicolon) {
                return Ok(());
            }
            if self.check_punct(PunctuationId::Eq) || self.check_punct(PunctuationId::FatArrow) {
                in_expression = true;
            }
            self.advance();
        }
    }

    /// Recover after an error that started at token index `start_pos`.
    ///
    /// Skips to the end of the broken construct: past a `;` or a brace group, or up to a `}` that
    /// closes the enclosing body, or up to the next type declaration keyword. Always makes
    /// progress when the failing construct consumed nothing.
    fn synchronize(&mut self, start_pos: usize) {
        if self.pos == start_pos && !self.is_at_end() {
            if self.check_punct(PunctuationId::LBrace) {
                let _ = self.skip_balanced();
                return;
            }
            self.advance();
        }
        while !self.is_at_end() {
            if self.check_punct(PunctuationId::RBrace) {
                return;
            }
            if self.check_punct(PunctuationId::LBrace) {
                let _ = self.skip_balanced();
                self.match_punct(PunctuationId::Semicolon);
                return;
            }
            if self.match_punct(PunctuationId::Semicolon) {
                return;
            }
            if self.check_keyword(KeywordId::Class)
                || self.check_keyword(KeywordId::Struct)
                || self.check_keyword(KeywordId::Interface)
                || self.check_keyword(KeywordId::Enum)
                || self.check_keyword(KeywordId::Namespace)
            {
                return;
            }
            self.advance();
        }
    }
}
