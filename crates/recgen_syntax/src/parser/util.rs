/// Miscellaneous parser utilities.
///
/// This chunk contains small shared parsing helpers: identifier and qualified-name parsing.
impl<'a> Parser<'a> {
    // ========================================================================
    // Utilities
    // ========================================================================

    fn identifier(&mut self) -> Result<Ident, CompileError> {
        match &self.peek().kind {
            TokenKind::Ident(name) => {
                let name = name.clone();
                self.advance();
                Ok(name)
            }
            _ => Err(CompileError::syntax(
                format!("Expected identifier, found {:?}", self.peek().kind),
                self.current_span(),
            )),
        }
    }

    fn identifier_spanned(&mut self) -> Result<Spanned<Ident>, CompileError> {
        let span = self.current_span();
        let name = self.identifier()?;
        Ok(Spanned::new(name, span))
    }

    /// `A.B.C`, optionally prefixed with the `global::` alias qualifier (dropped).
    fn qualified_name(&mut self) -> Result<QualifiedName, CompileError> {
        if self.check_ident("global")
            && self.peek_at(1).kind.is_punctuation(PunctuationId::Colon)
            && self.peek_at(2).kind.is_punctuation(PunctuationId::Colon)
        {
            self.advance();
            self.advance();
            self.advance();
        }
        let mut segments = vec![self.identifier()?];
        while self.check_punct(PunctuationId::Dot) && matches!(self.peek_at(1).kind, TokenKind::Ident(_)) {
            self.advance();
            segments.push(self.identifier()?);
        }
        Ok(QualifiedName::new(segments))
    }
}
