/// Member parsing methods.
///
/// This chunk parses the members of a type body:
/// - Fields with one or more declarators and optional initializers
/// - Properties (accessor lists, expression bodies, initializers)
/// - Method and constructor signatures (bodies skipped)
/// - Nested types
///
/// Events, indexers, operators, conversion operators, destructors and delegates are recognised and
/// skipped as [`Member::Other`].
impl<'a> Parser<'a> {
    // ========================================================================
    // Type bodies
    // ========================================================================

    /// Parse members up to (not including) the closing `}` of a type body.
    fn class_members(&mut self, class_name: &str) -> Vec<Spanned<Member>> {
        let mut members = Vec::new();
        while !self.check_punct(PunctuationId::RBrace) && !self.is_at_end() {
            let start_pos = self.pos;
            match self.member(class_name) {
                Ok(member) => members.push(member),
                Err(e) => {
                    self.errors.push(e);
                    self.synchronize(start_pos);
                }
            }
        }
        members
    }

    fn member(&mut self, class_name: &str) -> Result<Spanned<Member>, CompileError> {
        let start = self.current_span().start;
        let attributes = self.attribute_lists()?;
        let modifiers = self.modifiers();

        let member = self.member_after_modifiers(class_name, attributes, modifiers)?;
        Ok(Spanned::new(member, Span::new(start, self.previous_end())))
    }

    fn member_after_modifiers(
        &mut self,
        class_name: &str,
        attributes: Vec<Spanned<Attribute>>,
        modifiers: Modifiers,
    ) -> Result<Member, CompileError> {
        // Nested types
        if let Some(kind) = self.class_kind() {
            return Ok(Member::Class(self.class_decl(attributes, modifiers, kind)?));
        }
        if self.match_keyword(KeywordId::Enum) {
            return Ok(Member::Enum(self.enum_decl(attributes, modifiers)?));
        }

        // Members we recognise but do not model
        if self.check_keyword(KeywordId::Delegate)
            || self.check_keyword(KeywordId::Event)
            || self.check_keyword(KeywordId::Implicit)
            || self.check_keyword(KeywordId::Explicit)
            || self.check_symbol("~")
        {
            self.skip_member()?;
            return Ok(Member::Other);
        }

        // Constructor: `Name(`
        if self.check_ident(class_name) && self.peek_at(1).kind.is_punctuation(PunctuationId::LParen) {
            let name = self.identifier_spanned()?;
            self.method_tail(true)?;
            return Ok(Member::Constructor(ConstructorDecl {
                attributes,
                modifiers,
                name,
            }));
        }

        let ty = self.type_ref()?;

        // Indexers and operators
        if self.check_keyword(KeywordId::This) || self.check_keyword(KeywordId::Operator) {
            self.skip_member()?;
            return Ok(Member::Other);
        }

        let name = self.member_name()?;

        if self.check_punct(PunctuationId::Lt) || self.check_punct(PunctuationId::LParen) {
            let type_params = self.type_params()?;
            self.method_tail(false)?;
            return Ok(Member::Method(MethodDecl {
                attributes,
                modifiers,
                return_type: ty,
                name,
                type_params,
            }));
        }

        if self.check_punct(PunctuationId::LBrace) || self.check_punct(PunctuationId::FatArrow) {
            return Ok(Member::Property(self.property_tail(attributes, modifiers, ty, name)?));
        }

        Ok(Member::Field(self.field_tail(attributes, modifiers, ty, name)?))
    }

    /// Member name, possibly qualified by an explicitly implemented interface (`IFoo.Bar`).
    fn member_name(&mut self) -> Result<Spanned<Ident>, CompileError> {
        let mut name = self.identifier_spanned()?;
        while self.check_punct(PunctuationId::Dot) && matches!(self.peek_at(1).kind, TokenKind::Ident(_)) {
            self.advance();
            name = self.identifier_spanned()?;
        }
        Ok(name)
    }

    // ========================================================================
    // Methods and constructors
    // ========================================================================

    /// Parse from the parameter list to the end of a method or constructor.
    fn method_tail(&mut self, is_constructor: bool) -> Result<(), CompileError> {
        if !self.check_punct(PunctuationId::LParen) {
            return Err(self.error_here("Expected '(' to open parameter list"));
        }
        self.skip_balanced()?;

        if is_constructor && self.match_punct(PunctuationId::Colon) {
            // `: base(...)` / `: this(...)`
            self.advance();
            if !self.check_punct(PunctuationId::LParen) {
                return Err(self.error_here("Expected '(' after constructor initializer"));
            }
            self.skip_balanced()?;
        }
        self.skip_constraints();
        self.body()
    }

    /// `{ ... }`, `=> expr;` or `;`.
    fn body(&mut self) -> Result<(), CompileError> {
        if self.check_punct(PunctuationId::LBrace) {
            self.skip_balanced()?;
            return Ok(());
        }
        if self.match_punct(PunctuationId::FatArrow) {
            self.expression_extent(false)?;
        }
        self.expect_punct(PunctuationId::Semicolon, "Expected ';' or body")?;
        Ok(())
    }

    // ========================================================================
    // Properties
    // ========================================================================

    fn property_tail(
        &mut self,
        attributes: Vec<Spanned<Attribute>>,
        modifiers: Modifiers,
        ty: Spanned<TypeRef>,
        name: Spanned<Ident>,
    ) -> Result<PropertyDecl, CompileError> {
        if self.match_punct(PunctuationId::FatArrow) {
            let body = self.expression_extent(false)?;
            self.expect_punct(PunctuationId::Semicolon, "Expected ';' after expression body")?;
            return Ok(PropertyDecl {
                attributes,
                modifiers,
                ty,
                name,
                accessors: Vec::new(),
                expression_body: Some(body),
                initializer: None,
            });
        }

        self.expect_punct(PunctuationId::LBrace, "Expected '{' to open accessor list")?;
        let mut accessors = Vec::new();
        while !self.check_punct(PunctuationId::RBrace) && !self.is_at_end() {
            accessors.push(self.accessor()?);
        }
        self.expect_punct(PunctuationId::RBrace, "Expected '}' to close accessor list")?;

        let initializer = if self.match_punct(PunctuationId::Eq) {
            let init = self.expression_extent(false)?;
            self.expect_punct(PunctuationId::Semicolon, "Expected ';' after property initializer")?;
            Some(init)
        } else {
            None
        };

        Ok(PropertyDecl {
            attributes,
            modifiers,
            ty,
            name,
            accessors,
            expression_body: None,
            initializer,
        })
    }

    fn accessor(&mut self) -> Result<Accessor, CompileError> {
        self.attribute_lists()?;
        let modifiers = self.modifiers();
        let kind = if self.check_ident("get") {
            AccessorKind::Get
        } else if self.check_ident("set") {
            AccessorKind::Set
        } else if self.check_ident("init") {
            AccessorKind::Init
        } else {
            return Err(self.error_here("Expected 'get', 'set' or 'init'"));
        };
        self.advance();

        let has_body = if self.match_punct(PunctuationId::Semicolon) {
            false
        } else {
            self.body()?;
            true
        };

        Ok(Accessor {
            kind,
            modifiers,
            has_body,
        })
    }

    // ========================================================================
    // Fields
    // ========================================================================

    /// Parse the declarators of a field whose first name has been consumed.
    fn field_tail(
        &mut self,
        attributes: Vec<Spanned<Attribute>>,
        modifiers: Modifiers,
        ty: Spanned<TypeRef>,
        first: Spanned<Ident>,
    ) -> Result<FieldDecl, CompileError> {
        let mut declarators = Vec::new();
        let mut name = first;
        loop {
            if self.check_punct(PunctuationId::LBracket) {
                // Fixed-size buffer length.
                self.skip_balanced()?;
            }
            let initializer = if self.match_punct(PunctuationId::Eq) {
                Some(self.expression_extent(true)?)
            } else {
                None
            };
            let span = Span::new(name.span.start, self.previous_end());
            declarators.push(Spanned::new(
                VariableDeclarator {
                    name: name.node,
                    initializer,
                },
                span,
            ));

            if !self.match_punct(PunctuationId::Comma) {
                break;
            }
            name = self.identifier_spanned()?;
        }
        self.expect_punct(PunctuationId::Semicolon, "Expected ';' after field declaration")?;

        Ok(FieldDecl {
            attributes,
            modifiers,
            ty,
            declarators,
        })
    }
}
