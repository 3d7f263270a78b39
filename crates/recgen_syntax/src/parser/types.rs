/// Type-expression parsing methods.
///
/// This chunk parses syntactic type references, including:
/// - Keyword types (`int`, `string`)
/// - Qualified names (`A.B.Foo`, `global::A.Foo`)
/// - Generic applications (`List<int>`, `Dictionary<string, List<int>>`)
/// - Suffixes: nullable (`int?`), arrays (`int[]`, `int[,]`), pointers (`int*`, ignored)
/// - Tuples (`(int, string name)`)
///
/// ## Notes
/// - `TypeRef` parsing is purely syntactic; resolution happens in the compilation.
impl<'a> Parser<'a> {
    // ========================================================================
    // Types
    // ========================================================================

    /// `<T, in U, out V>` after a type or method name.
    fn type_params(&mut self) -> Result<Vec<Ident>, CompileError> {
        let mut params = Vec::new();
        if !self.match_punct(PunctuationId::Lt) {
            return Ok(params);
        }
        loop {
            self.attribute_lists()?;
            if (self.check_ident("in") || self.check_ident("out")) && matches!(self.peek_at(1).kind, TokenKind::Ident(_)) {
                self.advance();
            }
            params.push(self.identifier()?);
            if !self.match_punct(PunctuationId::Comma) {
                break;
            }
        }
        self.expect_punct(PunctuationId::Gt, "Expected '>' after type parameters")?;
        Ok(params)
    }

    /// `<A, B>` generic argument list.
    fn type_args(&mut self) -> Result<Vec<Spanned<TypeRef>>, CompileError> {
        self.expect_punct(PunctuationId::Lt, "Expected '<'")?;
        let mut args = Vec::new();
        if self.check_punct(PunctuationId::Gt) {
            // Unbound generic: `typeof(List<>)`
            self.advance();
            return Ok(args);
        }
        loop {
            args.push(self.type_ref()?);
            if !self.match_punct(PunctuationId::Comma) {
                break;
            }
        }
        self.expect_punct(PunctuationId::Gt, "Expected '>' after type arguments")?;
        Ok(args)
    }

    fn type_ref(&mut self) -> Result<Spanned<TypeRef>, CompileError> {
        let start = self.current_span().start;
        let mut ty = self.primary_type()?;

        loop {
            if self.match_punct(PunctuationId::Question) {
                let span = Span::new(start, self.previous_end());
                ty = Spanned::new(TypeRef::Nullable(Box::new(ty)), span);
            } else if self.check_punct(PunctuationId::LBracket)
                && (self.peek_at(1).kind.is_punctuation(PunctuationId::RBracket)
                    || self.peek_at(1).kind.is_punctuation(PunctuationId::Comma))
            {
                self.advance();
                let mut rank = 1;
                while self.match_punct(PunctuationId::Comma) {
                    rank += 1;
                }
                self.expect_punct(PunctuationId::RBracket, "Expected ']' in array type")?;
                let span = Span::new(start, self.previous_end());
                ty = Spanned::new(
                    TypeRef::Array {
                        element: Box::new(ty),
                        rank,
                    },
                    span,
                );
            } else if self.check_symbol("*") {
                self.advance();
            } else {
                break;
            }
        }

        Ok(ty)
    }

    fn primary_type(&mut self) -> Result<Spanned<TypeRef>, CompileError> {
        let start = self.current_span().start;

        if let Some(id) = self.peek().keyword_id().filter(|id| keywords::is_builtin_type(*id)) {
            self.advance();
            return Ok(Spanned::new(TypeRef::Builtin(id), Span::new(start, self.previous_end())));
        }

        if self.match_punct(PunctuationId::LParen) {
            let mut elems = Vec::new();
            loop {
                elems.push(self.type_ref()?);
                // Optional element name.
                if matches!(self.peek().kind, TokenKind::Ident(_)) {
                    self.advance();
                }
                if !self.match_punct(PunctuationId::Comma) {
                    break;
                }
            }
            self.expect_punct(PunctuationId::RParen, "Expected ')' to close tuple type")?;
            return Ok(Spanned::new(TypeRef::Tuple(elems), Span::new(start, self.previous_end())));
        }

        if matches!(self.peek().kind, TokenKind::Ident(_)) {
            let mut name = self.qualified_name()?;
            let mut args = Vec::new();
            while self.check_punct(PunctuationId::Lt) {
                args = self.type_args()?;
                // `Outer<T>.Inner`: keep the outer arguments.
                if self.check_punct(PunctuationId::Dot) && matches!(self.peek_at(1).kind, TokenKind::Ident(_)) {
                    self.advance();
                    name.segments.extend(self.qualified_name()?.segments);
                } else {
                    break;
                }
            }
            return Ok(Spanned::new(
                TypeRef::Named { name, args },
                Span::new(start, self.previous_end()),
            ));
        }

        Err(self.error_here("Expected type"))
    }
}
