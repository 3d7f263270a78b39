/// Declaration parsing methods.
///
/// This chunk parses namespace-level constructs:
/// - `using` directives (plain, `static`, aliased, `global`)
/// - Block and file-scoped namespaces
/// - Attribute lists and modifier runs
/// - `class` / `struct` / `interface` / `record` and `enum` declarations
impl<'a> Parser<'a> {
    // ========================================================================
    // Namespace level
    // ========================================================================

    fn namespace_member(&mut self) -> Result<Option<NamespaceMember>, CompileError> {
        let start = self.current_span().start;

        if self.check_keyword(KeywordId::Using)
            || (self.check_ident("global") && self.peek_at(1).kind.is_keyword(KeywordId::Using))
        {
            let using = self.using_directive()?;
            return Ok(Some(NamespaceMember::Using(using)));
        }

        if self.match_keyword(KeywordId::Namespace) {
            let ns = self.namespace_decl()?;
            let span = Span::new(start, self.previous_end());
            return Ok(Some(NamespaceMember::Item(Spanned::new(Item::Namespace(ns), span))));
        }

        let had_attributes = self.check_punct(PunctuationId::LBracket);
        let attributes = self.attribute_lists()?;
        let modifiers = self.modifiers();

        // `[assembly: ...]` lists with nothing following them.
        if had_attributes && attributes.is_empty() && modifiers.is_empty() && !self.at_type_keyword() {
            return Ok(None);
        }

        let item = self.type_declaration(attributes, modifiers)?;
        Ok(item.map(|item| Spanned::new(item, Span::new(start, self.previous_end()))).map(NamespaceMember::Item))
    }

    fn using_directive(&mut self) -> Result<Spanned<UsingDirective>, CompileError> {
        let start = self.current_span().start;
        let is_global = self.check_ident("global");
        if is_global {
            self.advance();
        }
        self.advance(); // `using`

        let is_static = self.match_keyword(KeywordId::Static);
        let alias = if matches!(self.peek().kind, TokenKind::Ident(_)) && self.peek_at(1).kind.is_punctuation(PunctuationId::Eq) {
            let alias = self.identifier()?;
            self.advance(); // `=`
            Some(alias)
        } else {
            None
        };
        let path = self.qualified_name()?;
        if self.check_punct(PunctuationId::Lt) {
            // Aliases to constructed generic types; the arguments are not recorded.
            self.type_args()?;
        }
        self.expect_punct(PunctuationId::Semicolon, "Expected ';' after using directive")?;

        Ok(Spanned::new(
            UsingDirective {
                path,
                alias,
                is_static,
                is_global,
            },
            Span::new(start, self.previous_end()),
        ))
    }

    /// Parse after `namespace`.
    fn namespace_decl(&mut self) -> Result<NamespaceDecl, CompileError> {
        let name = self.qualified_name()?;
        let mut usings = Vec::new();
        let mut items = Vec::new();

        if self.match_punct(PunctuationId::Semicolon) {
            // File-scoped: everything up to EOF belongs to this namespace.
            self.namespace_members(false, &mut usings, &mut items);
            return Ok(NamespaceDecl {
                name,
                file_scoped: true,
                usings,
                items,
            });
        }

        self.expect_punct(PunctuationId::LBrace, "Expected '{' or ';' after namespace name")?;
        self.namespace_members(true, &mut usings, &mut items);
        self.expect_punct(PunctuationId::RBrace, "Expected '}' to close namespace")?;
        self.match_punct(PunctuationId::Semicolon);

        Ok(NamespaceDecl {
            name,
            file_scoped: false,
            usings,
            items,
        })
    }

    // ========================================================================
    // Attributes and modifiers
    // ========================================================================

    /// Parse zero or more `[...]` attribute lists.
    ///
    /// Lists targeting `assembly` or `module` are consumed and dropped.
    fn attribute_lists(&mut self) -> Result<Vec<Spanned<Attribute>>, CompileError> {
        let mut attributes = Vec::new();
        while self.match_punct(PunctuationId::LBracket) {
            let target = if matches!(self.peek().kind, TokenKind::Ident(_)) && self.peek_at(1).kind.is_punctuation(PunctuationId::Colon) {
                let target = self.identifier()?;
                self.advance(); // `:`
                Some(target)
            } else {
                None
            };
            let global = matches!(target.as_deref(), Some("assembly") | Some("module"));

            loop {
                let start = self.current_span().start;
                let name = self.qualified_name()?;
                let args = if self.check_punct(PunctuationId::LParen) {
                    Some(self.skip_balanced()?)
                } else {
                    None
                };
                if !global {
                    attributes.push(Spanned::new(
                        Attribute {
                            name,
                            target: target.clone(),
                            args,
                        },
                        Span::new(start, self.previous_end()),
                    ));
                }
                if !self.match_punct(PunctuationId::Comma) || self.check_punct(PunctuationId::RBracket) {
                    break;
                }
            }
            self.expect_punct(PunctuationId::RBracket, "Expected ']' to close attribute list")?;
        }
        Ok(attributes)
    }

    fn modifiers(&mut self) -> Modifiers {
        let mut mods = Vec::new();
        while let Some(m) = self.peek().keyword_id().and_then(Modifier::from_keyword) {
            mods.push(m);
            self.advance();
        }
        Modifiers(mods)
    }

    // ========================================================================
    // Type declarations
    // ========================================================================

    /// `class`, `struct`, `interface`, `enum`, `delegate`, or contextual `record`.
    fn at_type_keyword(&self) -> bool {
        self.check_keyword(KeywordId::Class)
            || self.check_keyword(KeywordId::Struct)
            || self.check_keyword(KeywordId::Interface)
            || self.check_keyword(KeywordId::Enum)
            || self.check_keyword(KeywordId::Delegate)
            || self.at_record_keyword()
    }

    /// `record` is contextual: `record Foo`, `record class Foo`, `record struct Foo`.
    fn at_record_keyword(&self) -> bool {
        self.check_ident("record")
            && matches!(
                self.peek_at(1).kind,
                TokenKind::Ident(_) | TokenKind::Keyword(KeywordId::Class) | TokenKind::Keyword(KeywordId::Struct)
            )
    }

    /// Parse a type declaration after its attributes and modifiers.
    ///
    /// ## Returns
    /// - `Ok(None)` for delegates, which are skipped.
    fn type_declaration(
        &mut self,
        attributes: Vec<Spanned<Attribute>>,
        modifiers: Modifiers,
    ) -> Result<Option<Item>, CompileError> {
        if let Some(kind) = self.class_kind() {
            return Ok(Some(Item::Class(self.class_decl(attributes, modifiers, kind)?)));
        }
        if self.match_keyword(KeywordId::Enum) {
            return Ok(Some(Item::Enum(self.enum_decl(attributes, modifiers)?)));
        }
        if self.check_keyword(KeywordId::Delegate) {
            self.skip_member()?;
            return Ok(None);
        }
        Err(self.error_here("Expected type declaration"))
    }

    /// Consume a class-like keyword and return its kind.
    fn class_kind(&mut self) -> Option<ClassKind> {
        if self.at_record_keyword() {
            self.advance();
            if self.match_keyword(KeywordId::Struct) {
                return Some(ClassKind::Struct);
            }
            self.match_keyword(KeywordId::Class);
            return Some(ClassKind::Class);
        }
        if self.match_keyword(KeywordId::Class) {
            Some(ClassKind::Class)
        } else if self.match_keyword(KeywordId::Struct) {
            Some(ClassKind::Struct)
        } else if self.match_keyword(KeywordId::Interface) {
            Some(ClassKind::Interface)
        } else {
            None
        }
    }

    /// Parse after the class-like keyword.
    fn class_decl(
        &mut self,
        attributes: Vec<Spanned<Attribute>>,
        modifiers: Modifiers,
        kind: ClassKind,
    ) -> Result<ClassDecl, CompileError> {
        let name = self.identifier_spanned()?;
        let type_params = self.type_params()?;

        // Primary constructor parameters.
        if self.check_punct(PunctuationId::LParen) {
            self.skip_balanced()?;
        }

        let mut bases = Vec::new();
        if self.match_punct(PunctuationId::Colon) {
            loop {
                bases.push(self.type_ref()?);
                if self.check_punct(PunctuationId::LParen) {
                    // Base constructor arguments of a primary constructor.
                    self.skip_balanced()?;
                }
                if !self.match_punct(PunctuationId::Comma) {
                    break;
                }
            }
        }
        self.skip_constraints();

        let mut members = Vec::new();
        if !self.match_punct(PunctuationId::Semicolon) {
            self.expect_punct(PunctuationId::LBrace, "Expected '{' to open type body")?;
            members = self.class_members(&name.node);
            self.expect_punct(PunctuationId::RBrace, "Expected '}' to close type body")?;
            self.match_punct(PunctuationId::Semicolon);
        }

        Ok(ClassDecl {
            attributes,
            modifiers,
            kind,
            name,
            type_params,
            bases,
            members,
        })
    }

    /// Parse after `enum`.
    fn enum_decl(&mut self, attributes: Vec<Spanned<Attribute>>, modifiers: Modifiers) -> Result<EnumDecl, CompileError> {
        let name = self.identifier_spanned()?;
        let underlying = if self.match_punct(PunctuationId::Colon) {
            Some(self.type_ref()?)
        } else {
            None
        };

        self.expect_punct(PunctuationId::LBrace, "Expected '{' to open enum body")?;
        let mut variants = Vec::new();
        while !self.check_punct(PunctuationId::RBrace) && !self.is_at_end() {
            self.attribute_lists()?;
            let start = self.current_span().start;
            let variant = self.identifier()?;
            let value = if self.match_punct(PunctuationId::Eq) {
                Some(self.expression_extent(true)?)
            } else {
                None
            };
            variants.push(Spanned::new(
                EnumVariant { name: variant, value },
                Span::new(start, self.previous_end()),
            ));
            if !self.match_punct(PunctuationId::Comma) {
                break;
            }
        }
        self.expect_punct(PunctuationId::RBrace, "Expected '}' to close enum body")?;
        self.match_punct(PunctuationId::Semicolon);

        Ok(EnumDecl {
            attributes,
            modifiers,
            name,
            underlying,
            variants,
        })
    }

    /// Skip `where T : ...` clauses up to the body (`{`, `;` or `=>`).
    fn skip_constraints(&mut self) {
        if !self.check_ident("where") {
            return;
        }
        while !self.is_at_end()
            && !self.check_punct(PunctuationId::LBrace)
            && !self.check_punct(PunctuationId::Semicolon)
            && !self.check_punct(PunctuationId::FatArrow)
        {
            if self.check_punct(PunctuationId::LParen) {
                // `new()`
                if self.skip_balanced().is_err() {
                    return;
                }
                continue;
            }
            self.advance();
        }
    }
}
